//! Script injection stage.

use crate::config::ScriptTarget;
use crate::transform::IndexDocument;
use crate::transform::pipeline::{PipelineContext, PipelineError, Stage};

/// Stage that replaces the body of one `<script>` element.
///
/// The target is either the script at `script.index` among all scripts in
/// document order, or the first script carrying the `script.marker`
/// attribute. The replacement text is inserted verbatim; no other script
/// is touched.
pub struct InjectScriptStage;

impl Stage for InjectScriptStage {
    fn name(&self) -> &'static str {
        "script"
    }

    fn process(
        &self,
        doc: &mut IndexDocument,
        ctx: &mut PipelineContext,
    ) -> Result<(), PipelineError> {
        let scripts = doc.select("script")?;

        let (position, target) = match ctx.config.script.target() {
            ScriptTarget::Index(index) => {
                let target = scripts.get(index).copied().ok_or_else(|| {
                    PipelineError::structure(format!(
                        "script #{index} (document has {} script elements)",
                        scripts.len()
                    ))
                })?;
                (index, target)
            }
            ScriptTarget::Marker(marker) => {
                let selector = format!("script[{marker}]");
                let target = doc
                    .select_first(&selector)?
                    .ok_or_else(|| PipelineError::structure(&selector))?;
                let position = scripts.iter().position(|&id| id == target).unwrap_or_default();
                (position, target)
            }
        };

        doc.replace_text(target, ctx.replacement_script)?;
        tracing::debug!(position, bytes = ctx.replacement_script.len(), "replaced script body");

        ctx.report.script_index = Some(position);
        Ok(())
    }
}
