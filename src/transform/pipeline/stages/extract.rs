//! Tag extraction stage.

use crate::transform::IndexDocument;
use crate::transform::pipeline::{PipelineContext, PipelineError, Stage};
use crate::transform::tags::TagSet;

/// Stage that parses every metadata script into a tag set.
///
/// Tag sets are stored in document order. No metadata scripts at all is
/// not an error here; pairing them with blocks is the next stage's job.
pub struct ExtractTagsStage;

impl Stage for ExtractTagsStage {
    fn name(&self) -> &'static str {
        "extract"
    }

    fn process(
        &self,
        doc: &mut IndexDocument,
        ctx: &mut PipelineContext,
    ) -> Result<(), PipelineError> {
        let join_attribute = &ctx.config.tags.join_attribute;

        let tag_sets: Vec<TagSet> = doc
            .select(&ctx.config.selectors.metadata_script)?
            .into_iter()
            .map(|id| {
                let key = doc.attr(id, join_attribute).map(str::to_string);
                TagSet::parse(&doc.text(id)).with_key(key)
            })
            .collect();

        tracing::debug!(
            tag_sets = tag_sets.len(),
            tags = tag_sets.iter().map(|set| set.tags().len()).sum::<usize>(),
            "extracted tag sets"
        );

        ctx.report.tag_sets = tag_sets.len();
        ctx.tag_sets = tag_sets;

        Ok(())
    }
}
