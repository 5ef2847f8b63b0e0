use crate::config::TagpressConfig;

use super::document::{IndexDocument, read_utf8};
use super::pipeline::{Pipeline, PipelineContext, PipelineError, TransformReport};

/// Runs the transformation pipeline for one configured index document.
pub struct Transformer {
    config: TagpressConfig,
}

impl Transformer {
    pub fn new(config: TagpressConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &TagpressConfig {
        &self.config
    }

    /// Transform the index and write the result.
    pub fn run(&self) -> Result<TransformReport, PipelineError> {
        self.execute(&Pipeline::default_pipeline())
    }

    /// Run every mutation in memory without writing anything.
    pub fn check(&self) -> Result<TransformReport, PipelineError> {
        self.execute(&Pipeline::check_pipeline())
    }

    fn execute(&self, pipeline: &Pipeline) -> Result<TransformReport, PipelineError> {
        // Both inputs are read up front: a missing replacement script must
        // fail the run before the document is touched.
        let replacement = read_utf8(&self.config.script.source)?;
        let mut doc = IndexDocument::load(&self.config.index)?;
        tracing::info!(path = %doc.path().display(), "loaded index document");

        let mut ctx = PipelineContext::new(&self.config, &replacement);
        pipeline.run(&mut doc, &mut ctx)?;

        Ok(ctx.into_report())
    }
}

#[cfg(test)]
mod tests {
    use std::fs;
    use std::path::{Path, PathBuf};

    use super::*;
    use crate::config::{TagpressConfig, WriteMode};
    use crate::transform::fixtures::{blog_page, blog_page_with_scripts};

    const DEV_SCRIPT: &str = "// dev build\nconsole.log(\"dev\");\n";

    fn scratch_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("tagpress-run-{}-{name}", std::process::id()));
        let _ = fs::remove_dir_all(&dir);
        fs::create_dir_all(dir.join("docs")).unwrap();
        dir
    }

    fn setup(dir: &Path, page: &str) -> TagpressConfig {
        fs::write(dir.join("docs/index.html"), page).unwrap();
        fs::write(dir.join("dev_script.txt"), DEV_SCRIPT).unwrap();
        TagpressConfig::default().resolve_paths(dir)
    }

    #[test]
    fn test_run_rewrites_index() {
        let dir = scratch_dir("rewrite");
        let config = setup(&dir, &blog_page(&["tech, rust, categories"; 3]));

        let report = Transformer::new(config.clone()).run().unwrap();

        assert_eq!(report.articles, 3);
        assert_eq!(report.tag_sets, 3);
        assert_eq!(report.blocks_tagged, 3);
        assert_eq!(report.tags_rendered, 6);
        assert_eq!(report.script_index, Some(12));
        assert_eq!(report.written.as_ref().map(|(path, _)| path), Some(&config.index));

        let doc = IndexDocument::load(&config.index).unwrap();
        assert_eq!(doc.select("div.dt-tags").unwrap().len(), 3);
        let scripts = doc.select("script").unwrap();
        assert_eq!(doc.text(scripts[12]), DEV_SCRIPT);
        let first = doc
            .select_first("div.sidebar-section.categories ul > li")
            .unwrap()
            .unwrap();
        assert_eq!(doc.text(first), "ALL ARTICLES (3)");
    }

    #[test]
    fn test_default_run_pairs_block_with_previous_tag_set() {
        let dir = scratch_dir("legacy");
        let config = setup(&dir, &blog_page(&["first", "second"]));

        Transformer::new(config.clone()).run().unwrap();

        let doc = IndexDocument::load(&config.index).unwrap();
        let tags: Vec<String> = doc
            .select("div.metadata div.dt-tag")
            .unwrap()
            .into_iter()
            .map(|id| doc.text(id))
            .collect();
        assert_eq!(tags, vec!["second", "first"]);
    }

    #[test]
    fn test_empty_index_does_not_fail() {
        let dir = scratch_dir("empty");
        let config = setup(&dir, &blog_page(&[]));

        let report = Transformer::new(config.clone()).run().unwrap();
        assert_eq!(report.articles, 0);

        let doc = IndexDocument::load(&config.index).unwrap();
        let badge = doc.select_first("li span.category-count").unwrap().unwrap();
        assert_eq!(doc.text(badge), " (0)");
    }

    #[test]
    fn test_failure_leaves_file_unchanged() {
        let dir = scratch_dir("failure");
        let page = blog_page_with_scripts(&["rust"], 5);
        let config = setup(&dir, &page);

        let err = Transformer::new(config.clone()).run().unwrap_err();

        assert!(matches!(err, PipelineError::Structure { .. }));
        assert_eq!(fs::read_to_string(&config.index).unwrap(), page);
    }

    #[test]
    fn test_missing_replacement_script() {
        let dir = scratch_dir("no-script");
        let page = blog_page(&["rust"]);
        let config = setup(&dir, &page);
        fs::remove_file(&config.script.source).unwrap();

        let err = Transformer::new(config.clone()).run().unwrap_err();

        assert!(matches!(err, PipelineError::Io { action: "read", .. }));
        assert_eq!(fs::read_to_string(&config.index).unwrap(), page);
    }

    #[test]
    fn test_check_writes_nothing() {
        let dir = scratch_dir("check");
        let page = blog_page(&["rust", "tech"]);
        let config = setup(&dir, &page);

        let report = Transformer::new(config.clone()).check().unwrap();

        assert_eq!(report.blocks_tagged, 2);
        assert!(report.written.is_none());
        assert_eq!(fs::read_to_string(&config.index).unwrap(), page);
    }

    #[test]
    fn test_second_run_converges() {
        let dir = scratch_dir("converge");
        let config = setup(&dir, &blog_page(&["rust", "tech"]));

        Transformer::new(config.clone()).run().unwrap();
        let once = fs::read_to_string(&config.index).unwrap();
        let report = Transformer::new(config.clone()).run().unwrap();
        let twice = fs::read_to_string(&config.index).unwrap();

        assert!(report.sidebar_replaced);
        assert_eq!(report.blocks_skipped, 2);
        assert_eq!(once, twice);
    }

    #[test]
    fn test_output_path_and_overwrite_mode() {
        let dir = scratch_dir("output");
        let page = blog_page(&["rust"]);
        let mut config = setup(&dir, &page);
        config.output = Some(dir.join("public/index.html"));
        config.write.mode = WriteMode::Overwrite;

        Transformer::new(config.clone()).run().unwrap();

        assert_eq!(fs::read_to_string(&config.index).unwrap(), page);
        let written = fs::read_to_string(dir.join("public/index.html")).unwrap();
        assert!(written.contains("dt-tags"));
    }
}
