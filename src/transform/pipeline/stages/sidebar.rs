//! Sidebar category injection stage.

use crate::transform::IndexDocument;
use crate::transform::markup::render_all_articles;
use crate::transform::pipeline::{PipelineContext, PipelineError, Stage};

/// Stage that puts an "all articles" entry at the head of the category list.
///
/// The entry links to the unfiltered listing and shows the article count
/// measured by the count stage. It carries `sidebar.marker`, and any entry
/// with that marker left by an earlier run is removed first, so the list
/// always ends up with exactly one.
pub struct SidebarStage;

impl Stage for SidebarStage {
    fn name(&self) -> &'static str {
        "sidebar"
    }

    fn process(
        &self,
        doc: &mut IndexDocument,
        ctx: &mut PipelineContext,
    ) -> Result<(), PipelineError> {
        let sidebar = &ctx.config.sidebar;

        let count = ctx.article_count.ok_or_else(|| {
            PipelineError::stage("sidebar", "article count is unknown (was the count stage run?)")
        })?;

        let list_selector = &ctx.config.selectors.sidebar_list;
        let list = doc
            .select_first(list_selector)?
            .ok_or_else(|| PipelineError::structure(list_selector))?;

        let previous: Vec<_> = doc
            .child_elements(list)
            .iter()
            .filter(|child| child.value().attr(&sidebar.marker).is_some())
            .map(|child| child.id())
            .collect();

        ctx.report.sidebar_replaced = !previous.is_empty();
        for id in previous {
            tracing::debug!("replacing sidebar entry from an earlier run");
            doc.detach(id);
        }

        doc.prepend_html(list, &render_all_articles(sidebar, count))?;
        tracing::debug!(count, "inserted all-articles entry");

        Ok(())
    }
}
