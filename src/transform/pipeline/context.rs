//! Pipeline context for sharing state across stages.

use std::path::PathBuf;

use crate::config::TagpressConfig;
use crate::transform::tags::TagSet;

/// Shared context for pipeline stages.
///
/// Carries the configuration and the replacement script in, and the values
/// measured by earlier stages forward to later ones.
pub struct PipelineContext<'a> {
    /// Run configuration
    pub config: &'a TagpressConfig,

    /// Replacement body for the target script
    pub replacement_script: &'a str,

    /// Article headings counted before any mutation.
    ///
    /// None until the count stage populates it.
    pub article_count: Option<usize>,

    /// Tag sets in metadata script order.
    ///
    /// Empty until the extract stage populates it.
    pub tag_sets: Vec<TagSet>,

    /// What the run did, for reporting
    pub report: TransformReport,
}

impl<'a> PipelineContext<'a> {
    pub fn new(config: &'a TagpressConfig, replacement_script: &'a str) -> Self {
        Self {
            config,
            replacement_script,
            article_count: None,
            tag_sets: Vec::new(),
            report: TransformReport::default(),
        }
    }

    pub fn into_report(self) -> TransformReport {
        self.report
    }
}

/// Summary of a pipeline run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TransformReport {
    /// Article headings under the posts list
    pub articles: usize,
    /// Metadata script nodes parsed into tag sets
    pub tag_sets: usize,
    /// Metadata blocks that received a tag container
    pub blocks_tagged: usize,
    /// Metadata blocks already carrying a tag container
    pub blocks_skipped: usize,
    /// Tag elements rendered across all blocks
    pub tags_rendered: usize,
    /// Whether a synthetic sidebar entry from an earlier run was replaced
    pub sidebar_replaced: bool,
    /// Position of the replaced script among all script elements
    pub script_index: Option<usize>,
    /// Where the document was written, and how many bytes
    pub written: Option<(PathBuf, usize)>,
}
