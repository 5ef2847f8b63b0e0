//! Tag rendering stage.

use crate::transform::IndexDocument;
use crate::transform::markup::{TAG_CONTAINER_CLASS, render_tags};
use crate::transform::pipeline::{PipelineContext, PipelineError, Stage};
use crate::transform::tags::align;

/// Stage that appends a rendered tag container to every metadata block.
///
/// Blocks are paired with tag sets according to `tags.alignment`. The whole
/// pairing is resolved before the first block is touched, so an alignment
/// failure leaves the document unchanged.
///
/// A block that already holds a tag container from an earlier run is
/// skipped; nothing inside a block is ever removed or reordered.
pub struct RenderTagsStage;

impl Stage for RenderTagsStage {
    fn name(&self) -> &'static str {
        "tags"
    }

    fn process(
        &self,
        doc: &mut IndexDocument,
        ctx: &mut PipelineContext,
    ) -> Result<(), PipelineError> {
        let tags_config = &ctx.config.tags;

        let blocks = doc.select(&ctx.config.selectors.metadata_block)?;
        let block_keys: Vec<Option<String>> = blocks
            .iter()
            .map(|&id| doc.attr(id, &tags_config.join_attribute).map(str::to_string))
            .collect();

        let pairing = align(tags_config, &block_keys, &ctx.tag_sets)?;

        for (position, (block, set_index)) in blocks.into_iter().zip(pairing).enumerate() {
            let already_tagged = doc.child_elements(block).iter().any(|child| {
                child.value().name() == "div"
                    && child.value().classes().any(|class| class == TAG_CONTAINER_CLASS)
            });
            if already_tagged {
                tracing::debug!(position, "metadata block already has tags, skipping");
                ctx.report.blocks_skipped += 1;
                continue;
            }

            let tags: Vec<&str> = ctx.tag_sets[set_index]
                .visible(&tags_config.exclude)
                .collect();

            doc.append_html(block, &render_tags(tags.iter().copied()))?;

            ctx.report.blocks_tagged += 1;
            ctx.report.tags_rendered += tags.len();
        }

        tracing::debug!(
            tagged = ctx.report.blocks_tagged,
            skipped = ctx.report.blocks_skipped,
            "rendered tags"
        );

        Ok(())
    }
}
