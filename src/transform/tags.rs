//! Tag sets and their pairing with metadata blocks.
//!
//! Each article's tags live as freeform text inside a metadata `<script>`.
//! A tag is any maximal run of word characters, spaces and hyphens, trimmed;
//! everything else (quotes, commas, brackets, colons) separates tags.

use std::collections::HashMap;
use std::sync::LazyLock;

use regex::Regex;

use crate::config::{TagAlignment, TagsConfig};
use crate::transform::pipeline::PipelineError;

static TAG_TOKEN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[\w -]+").expect("tag token pattern is valid"));

/// Offset applied to a block's position under positional alignment.
pub const POSITIONAL_OFFSET: isize = 0;

/// Offset applied under legacy alignment: block `i` reads tag set `i - 1`.
pub const LEGACY_OFFSET: isize = -1;

/// The ordered tags parsed from one metadata script node.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TagSet {
    tags: Vec<String>,
    /// Join key read from the script node, for keyed alignment
    key: Option<String>,
}

impl TagSet {
    /// Parse tags out of raw script text.
    pub fn parse(text: &str) -> Self {
        let tags = TAG_TOKEN
            .find_iter(text)
            .map(|m| m.as_str().trim())
            .filter(|tag| !tag.is_empty())
            .map(str::to_string)
            .collect();

        Self { tags, key: None }
    }

    pub fn with_key(mut self, key: Option<String>) -> Self {
        self.key = key;
        self
    }

    pub fn tags(&self) -> &[String] {
        &self.tags
    }

    pub fn key(&self) -> Option<&str> {
        self.key.as_deref()
    }

    /// Tags in order, minus the excluded ones.
    pub fn visible<'a>(&'a self, exclude: &'a [String]) -> impl Iterator<Item = &'a str> + 'a {
        self.tags
            .iter()
            .filter(move |tag| !exclude.contains(tag))
            .map(String::as_str)
    }
}

/// Pick the tag set for every metadata block.
///
/// `block_keys` holds one entry per block in document order (the block's join
/// attribute, when present). Returns, per block, an index into `tag_sets`.
/// No index is ever out of range: a block that cannot be paired is an error.
pub fn align(
    config: &TagsConfig,
    block_keys: &[Option<String>],
    tag_sets: &[TagSet],
) -> Result<Vec<usize>, PipelineError> {
    let blocks = block_keys.len();
    let fail = |detail: String| PipelineError::Alignment {
        blocks,
        tag_sets: tag_sets.len(),
        detail,
    };

    match config.alignment {
        TagAlignment::Positional => {
            if blocks != tag_sets.len() {
                return Err(fail("counts differ".to_string()));
            }
            (0..blocks)
                .map(|i| offset_index(i, POSITIONAL_OFFSET, tag_sets.len(), false).ok_or_else(|| {
                    fail(format!("metadata block {i} has no tag set"))
                }))
                .collect()
        }
        TagAlignment::Legacy => (0..blocks)
            .map(|i| {
                offset_index(i, LEGACY_OFFSET, tag_sets.len(), true).ok_or_else(|| {
                    fail(format!(
                        "metadata block {i} maps to tag set {} which does not exist",
                        i as isize + LEGACY_OFFSET
                    ))
                })
            })
            .collect(),
        TagAlignment::Keyed => {
            let attribute = &config.join_attribute;
            let mut by_key = HashMap::new();
            for (index, set) in tag_sets.iter().enumerate() {
                let Some(key) = set.key() else {
                    return Err(fail(format!("metadata script {index} has no '{attribute}' attribute")));
                };
                if by_key.insert(key, index).is_some() {
                    return Err(fail(format!("'{attribute}' value '{key}' appears on more than one metadata script")));
                }
            }

            block_keys
                .iter()
                .enumerate()
                .map(|(i, key)| {
                    let key = key.as_deref().ok_or_else(|| {
                        fail(format!("metadata block {i} has no '{attribute}' attribute"))
                    })?;
                    by_key.get(key).copied().ok_or_else(|| {
                        fail(format!("metadata block {i} refers to unknown '{attribute}' value '{key}'"))
                    })
                })
                .collect()
        }
    }
}

/// Resolve `position + offset` against a sequence of `len` items.
///
/// With `wrap`, a negative index counts back from the end once, the way the
/// legacy layout indexed its tag list. Anything still outside `0..len` is `None`.
fn offset_index(position: usize, offset: isize, len: usize, wrap: bool) -> Option<usize> {
    let len = isize::try_from(len).ok()?;
    let mut index = isize::try_from(position).ok()? + offset;
    if wrap && index < 0 {
        index += len;
    }
    if (0..len).contains(&index) {
        usize::try_from(index).ok()
    } else {
        None
    }
}
