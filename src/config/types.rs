//! Configuration type definitions.
//!
//! This module contains the data structures read from `tagpress.yaml`.
//! These types are pure data - no I/O or complex logic. Every field has a
//! default, so an empty (or missing) config file describes the stock
//! blog layout.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Index of the script element replaced when no marker is configured.
///
/// The stock index page carries its development script as the thirteenth
/// `<script>` element.
pub const DEFAULT_SCRIPT_INDEX: usize = 12;

// =============================================================================
// Top-level config
// =============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TagpressConfig {
    /// The index document to transform
    pub index: PathBuf,

    /// Where to write the result (defaults to `index`)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output: Option<PathBuf>,

    pub selectors: SelectorConfig,
    pub tags: TagsConfig,
    pub sidebar: SidebarConfig,
    pub script: ScriptConfig,
    pub write: WriteConfig,
}

impl Default for TagpressConfig {
    fn default() -> Self {
        Self {
            index: PathBuf::from("docs/index.html"),
            output: None,
            selectors: SelectorConfig::default(),
            tags: TagsConfig::default(),
            sidebar: SidebarConfig::default(),
            script: ScriptConfig::default(),
            write: WriteConfig::default(),
        }
    }
}

impl TagpressConfig {
    /// The path the transformed document is written to.
    pub fn output_path(&self) -> &PathBuf {
        self.output.as_ref().unwrap_or(&self.index)
    }
}

// =============================================================================
// Selectors
// =============================================================================

/// CSS selectors for the anchors the pipeline reads and mutates.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SelectorConfig {
    /// Container holding one heading per article
    pub posts_list: String,
    /// Article heading, relative to the posts list
    pub article_heading: String,
    /// Script elements carrying per-article tag text
    pub metadata_script: String,
    /// Per-article blocks that receive rendered tags
    pub metadata_block: String,
    /// The category list in the sidebar
    pub sidebar_list: String,
}

impl Default for SelectorConfig {
    fn default() -> Self {
        Self {
            posts_list: "div.posts-list".to_string(),
            article_heading: "h2".to_string(),
            metadata_script: "script.post-metadata".to_string(),
            metadata_block: "div.metadata".to_string(),
            sidebar_list: "div.sidebar-section.categories ul".to_string(),
        }
    }
}

impl SelectorConfig {
    /// All selectors paired with their config key, for validation.
    pub fn entries(&self) -> [(&'static str, &str); 5] {
        [
            ("selectors.posts_list", &self.posts_list),
            ("selectors.article_heading", &self.article_heading),
            ("selectors.metadata_script", &self.metadata_script),
            ("selectors.metadata_block", &self.metadata_block),
            ("selectors.sidebar_list", &self.sidebar_list),
        ]
    }
}

// =============================================================================
// Tags
// =============================================================================

/// How metadata blocks are paired with extracted tag sets.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TagAlignment {
    /// Block `i` takes tag set `i`; counts must match.
    Positional,
    /// Block `i` takes tag set `i - 1`, the first block wrapping to the last set.
    #[default]
    Legacy,
    /// Blocks and script nodes are joined by `join_attribute`.
    Keyed,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TagsConfig {
    pub alignment: TagAlignment,
    /// Attribute carrying the join key when `alignment` is `keyed`
    pub join_attribute: String,
    /// Tags that are parsed but never rendered
    pub exclude: Vec<String>,
}

impl Default for TagsConfig {
    fn default() -> Self {
        Self {
            alignment: TagAlignment::default(),
            join_attribute: "data-post-id".to_string(),
            exclude: vec!["categories".to_string()],
        }
    }
}

// =============================================================================
// Sidebar
// =============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SidebarConfig {
    /// Link text of the synthetic entry
    pub label: String,
    /// Link target of the synthetic entry
    pub href: String,
    /// Attribute marking the synthetic entry so reruns can find it
    pub marker: String,
}

impl Default for SidebarConfig {
    fn default() -> Self {
        Self {
            label: "ALL ARTICLES".to_string(),
            href: String::new(),
            marker: "data-tagpress-all-articles".to_string(),
        }
    }
}

// =============================================================================
// Script injection
// =============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ScriptConfig {
    /// File holding the replacement script body
    pub source: PathBuf,
    /// Position of the target among all `<script>` elements
    pub index: usize,
    /// Attribute identifying the target; takes precedence over `index`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub marker: Option<String>,
}

impl Default for ScriptConfig {
    fn default() -> Self {
        Self {
            source: PathBuf::from("dev_script.txt"),
            index: DEFAULT_SCRIPT_INDEX,
            marker: None,
        }
    }
}

/// The script element whose contents get replaced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScriptTarget {
    Index(usize),
    Marker(String),
}

impl ScriptConfig {
    pub fn target(&self) -> ScriptTarget {
        match &self.marker {
            Some(marker) => ScriptTarget::Marker(marker.clone()),
            None => ScriptTarget::Index(self.index),
        }
    }
}

// =============================================================================
// Writing
// =============================================================================

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WriteMode {
    /// Write a sibling temp file, then rename it over the target
    #[default]
    Atomic,
    /// Truncate and write the target in place
    Overwrite,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct WriteConfig {
    pub mode: WriteMode,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_describe_stock_layout() {
        let config = TagpressConfig::default();
        assert_eq!(config.index, PathBuf::from("docs/index.html"));
        assert_eq!(config.output_path(), &PathBuf::from("docs/index.html"));
        assert_eq!(config.tags.exclude, vec!["categories".to_string()]);
        assert_eq!(config.tags.alignment, TagAlignment::Legacy);
        assert_eq!(config.script.target(), ScriptTarget::Index(12));
        assert_eq!(config.write.mode, WriteMode::Atomic);
    }

    #[test]
    fn test_marker_takes_precedence_over_index() {
        let script = ScriptConfig {
            marker: Some("data-dev".to_string()),
            ..ScriptConfig::default()
        };
        assert_eq!(script.target(), ScriptTarget::Marker("data-dev".to_string()));
    }

    #[test]
    fn test_output_overrides_index() {
        let config = TagpressConfig {
            output: Some(PathBuf::from("out/index.html")),
            ..TagpressConfig::default()
        };
        assert_eq!(config.output_path(), &PathBuf::from("out/index.html"));
    }
}
