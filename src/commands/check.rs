use anyhow::Context;

use crate::CheckArgs;
use crate::transform::Transformer;

pub fn run(args: &CheckArgs) -> Result<(), anyhow::Error> {
    let config = super::load_config(&args.source, None)?;

    let transformer = Transformer::new(config);
    let report = transformer.check().with_context(|| {
        format!("{} would fail to transform", transformer.config().index.display())
    })?;

    println!("{}: ok", transformer.config().index.display());
    println!("  articles:        {}", report.articles);
    println!("  tag sets:        {}", report.tag_sets);
    println!(
        "  metadata blocks: {} to tag, {} already tagged",
        report.blocks_tagged, report.blocks_skipped
    );
    println!("  tags:            {}", report.tags_rendered);
    println!(
        "  sidebar entry:   {}",
        if report.sidebar_replaced { "replace" } else { "insert" }
    );
    if let Some(index) = report.script_index {
        println!("  script:          #{index}");
    }
    println!(
        "  output:          {} (not written)",
        transformer.config().output_path().display()
    );

    Ok(())
}
