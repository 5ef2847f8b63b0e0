//! File writing stage.
//!
//! Writes the transformed document to the output path.

use crate::transform::IndexDocument;
use crate::transform::pipeline::{PipelineContext, PipelineError, Stage};

/// Stage that serializes the document and writes it to disk.
///
/// The output path is `output` from the config, falling back to the index
/// itself. In atomic mode the file is replaced by rename, so a reader never
/// sees a partial document.
pub struct WriteStage;

impl Stage for WriteStage {
    fn name(&self) -> &'static str {
        "write"
    }

    fn process(
        &self,
        doc: &mut IndexDocument,
        ctx: &mut PipelineContext,
    ) -> Result<(), PipelineError> {
        let output_path = ctx.config.output_path();
        let bytes = doc.write(output_path, ctx.config.write.mode)?;

        ctx.report.written = Some((output_path.clone(), bytes));
        Ok(())
    }
}
