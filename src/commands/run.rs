use anyhow::Context;

use crate::RunArgs;
use crate::transform::Transformer;

pub fn run(args: &RunArgs) -> Result<(), anyhow::Error> {
    let config = super::load_config(&args.source, args.output.as_deref())?;

    let transformer = Transformer::new(config);
    let report = transformer.run().with_context(|| {
        format!(
            "failed to transform {}",
            transformer.config().index.display()
        )
    })?;

    if let Some((path, bytes)) = &report.written {
        println!(
            "Wrote {} ({} bytes): {} article(s), {} tagged block(s), {} tag(s)",
            path.display(),
            bytes,
            report.articles,
            report.blocks_tagged,
            report.tags_rendered
        );
    }

    Ok(())
}
