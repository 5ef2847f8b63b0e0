//! Article counting stage.

use crate::transform::IndexDocument;
use crate::transform::pipeline::{PipelineContext, PipelineError, Stage};

/// Stage that counts the article headings under the posts list.
///
/// Runs before any mutation so the sidebar badge reflects the document as
/// generated, never anything tagpress inserted.
pub struct CountArticlesStage;

impl Stage for CountArticlesStage {
    fn name(&self) -> &'static str {
        "count"
    }

    fn process(
        &self,
        doc: &mut IndexDocument,
        ctx: &mut PipelineContext,
    ) -> Result<(), PipelineError> {
        let selectors = &ctx.config.selectors;

        let posts_list = doc
            .select_first(&selectors.posts_list)?
            .ok_or_else(|| PipelineError::structure(&selectors.posts_list))?;

        let count = doc.select_in(posts_list, &selectors.article_heading)?.len();
        tracing::debug!(articles = count, "counted articles");

        ctx.article_count = Some(count);
        ctx.report.articles = count;

        Ok(())
    }
}
