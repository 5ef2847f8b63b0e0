//! The index document being transformed.
//!
//! Wraps a parsed `scraper::Html` tree together with the path it was loaded
//! from. Stages query it by CSS selector and mutate it through node ids;
//! new structure is spliced in by parsing a markup fragment and grafting
//! its nodes into the document tree.

use std::fs;
use std::path::{Path, PathBuf};

use ego_tree::{NodeId, NodeRef, Tree};
use scraper::node::Text;
use scraper::{ElementRef, Html, Node, Selector};

use crate::config::WriteMode;
use crate::transform::pipeline::PipelineError;

/// A parsed index document, owned by the pipeline for a single run.
pub struct IndexDocument {
    path: PathBuf,
    html: Html,
}

impl IndexDocument {
    /// Read and parse the document at `path`.
    pub fn load(path: &Path) -> Result<Self, PipelineError> {
        let source = read_utf8(path)?;
        Ok(Self::parse(path, &source))
    }

    /// Parse a document from source text.
    ///
    /// Parsing is as permissive as a browser's: recoverable errors are
    /// logged, never returned.
    pub fn parse(path: impl Into<PathBuf>, source: &str) -> Self {
        let path = path.into();
        let html = Html::parse_document(source);

        if !html.errors.is_empty() {
            tracing::debug!(
                path = %path.display(),
                errors = html.errors.len(),
                "recovered from markup errors"
            );
        }

        Self { path, html }
    }

    /// The path this document was loaded from.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// All elements matching `selector`, in document order.
    pub fn select(&self, selector: &str) -> Result<Vec<NodeId>, PipelineError> {
        let selector = parse_selector(selector)?;
        Ok(matching(self.html.tree.root(), &selector)
            .map(|el| el.id())
            .collect())
    }

    /// The first element matching `selector`, in document order.
    pub fn select_first(&self, selector: &str) -> Result<Option<NodeId>, PipelineError> {
        let selector = parse_selector(selector)?;
        Ok(matching(self.html.tree.root(), &selector)
            .next()
            .map(|el| el.id()))
    }

    /// Descendants of `scope` matching `selector`, in document order.
    pub fn select_in(&self, scope: NodeId, selector: &str) -> Result<Vec<NodeId>, PipelineError> {
        let selector = parse_selector(selector)?;
        Ok(self
            .html
            .tree
            .get(scope)
            .map(|node| {
                matching(node, &selector)
                    .filter(|el| el.id() != scope)
                    .map(|el| el.id())
                    .collect()
            })
            .unwrap_or_default())
    }

    pub fn element(&self, id: NodeId) -> Option<ElementRef<'_>> {
        self.html.tree.get(id).and_then(ElementRef::wrap)
    }

    /// Concatenated text content of an element.
    pub fn text(&self, id: NodeId) -> String {
        self.element(id)
            .map(|el| el.text().collect())
            .unwrap_or_default()
    }

    pub fn attr(&self, id: NodeId, name: &str) -> Option<&str> {
        self.element(id).and_then(|el| el.value().attr(name))
    }

    /// Direct element children of `id`.
    pub fn child_elements(&self, id: NodeId) -> Vec<ElementRef<'_>> {
        self.html
            .tree
            .get(id)
            .map(|node| node.children().filter_map(ElementRef::wrap).collect())
            .unwrap_or_default()
    }

    /// Parse `markup` as a fragment and append its nodes as the last children of `parent`.
    pub fn append_html(&mut self, parent: NodeId, markup: &str) -> Result<(), PipelineError> {
        let fragment = Html::parse_fragment(markup);
        let roots = fragment_roots(&fragment);

        for root in roots {
            graft(&mut self.html.tree, parent, root, Placement::Last)?;
        }

        Ok(())
    }

    /// Parse `markup` as a fragment and insert its nodes as the first children of `parent`.
    pub fn prepend_html(&mut self, parent: NodeId, markup: &str) -> Result<(), PipelineError> {
        let fragment = Html::parse_fragment(markup);
        let roots = fragment_roots(&fragment);

        // Prepending in reverse keeps the fragment's own order.
        for root in roots.into_iter().rev() {
            graft(&mut self.html.tree, parent, root, Placement::First)?;
        }

        Ok(())
    }

    /// Remove a node (and its subtree) from the document.
    pub fn detach(&mut self, id: NodeId) {
        if let Some(mut node) = self.html.tree.get_mut(id) {
            node.detach();
        }
    }

    /// Replace all children of `id` with a single text node.
    pub fn replace_text(&mut self, id: NodeId, text: &str) -> Result<(), PipelineError> {
        let mut node = self
            .html
            .tree
            .get_mut(id)
            .ok_or_else(|| PipelineError::stage("document", "node is no longer part of the tree"))?;

        while let Some(mut child) = node.first_child() {
            child.detach();
        }

        node.append(Node::Text(Text { text: text.into() }));
        Ok(())
    }

    /// Serialize the whole document back to markup.
    pub fn html(&self) -> String {
        self.html.html()
    }

    /// Serialize the document and write it to `path`.
    ///
    /// Returns the number of bytes written.
    pub fn write(&self, path: &Path, mode: WriteMode) -> Result<usize, PipelineError> {
        let html = self.html();

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .map_err(|e| PipelineError::io("create directory", parent, e))?;
        }

        match mode {
            WriteMode::Overwrite => {
                fs::write(path, &html).map_err(|e| PipelineError::io("write", path, e))?;
            }
            WriteMode::Atomic => {
                let temp = temp_path_for(path);
                fs::write(&temp, &html).map_err(|e| PipelineError::io("write", &temp, e))?;
                if let Err(e) = fs::rename(&temp, path) {
                    let _ = fs::remove_file(&temp);
                    return Err(PipelineError::io("replace", path, e));
                }
            }
        }

        tracing::debug!(path = %path.display(), bytes = html.len(), ?mode, "wrote document");
        Ok(html.len())
    }
}

/// Read a UTF-8 text file.
pub fn read_utf8(path: &Path) -> Result<String, PipelineError> {
    let bytes = fs::read(path).map_err(|e| PipelineError::io("read", path, e))?;

    String::from_utf8(bytes).map_err(|e| PipelineError::Parse {
        path: path.to_path_buf(),
        message: format!("content is not valid UTF-8 ({})", e.utf8_error()),
    })
}

fn parse_selector(selector: &str) -> Result<Selector, PipelineError> {
    Selector::parse(selector).map_err(|e| PipelineError::Selector {
        selector: selector.to_string(),
        message: e.to_string(),
    })
}

/// Elements under `scope` (inclusive) matching `selector`, walked in tree
/// order.
///
/// `Html::select` iterates nodes in the order they were created, which
/// drifts from document order once nodes are inserted or the parser
/// reparents them.
fn matching<'a>(
    scope: NodeRef<'a, Node>,
    selector: &'a Selector,
) -> impl Iterator<Item = ElementRef<'a>> + 'a {
    scope
        .descendants()
        .filter_map(ElementRef::wrap)
        .filter(move |el| selector.matches(el))
}

/// Sibling path used while writing atomically: `dir/.name.tagpress.tmp`.
fn temp_path_for(path: &Path) -> PathBuf {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "index.html".to_string());
    path.with_file_name(format!(".{name}.tagpress.tmp"))
}

/// Top-level nodes of a parsed fragment.
///
/// `Html::parse_fragment` wraps the content in an `<html>` element.
fn fragment_roots(fragment: &Html) -> Vec<NodeRef<'_, Node>> {
    fragment.root_element().children().collect()
}

#[derive(Clone, Copy)]
enum Placement {
    First,
    Last,
}

/// Copy `source` and its subtree under `parent` in `tree`.
fn graft(
    tree: &mut Tree<Node>,
    parent: NodeId,
    source: NodeRef<'_, Node>,
    placement: Placement,
) -> Result<NodeId, PipelineError> {
    let mut parent_node = tree
        .get_mut(parent)
        .ok_or_else(|| PipelineError::stage("document", "insertion point is no longer part of the tree"))?;

    let value = source.value().clone();
    let id = match placement {
        Placement::First => parent_node.prepend(value).id(),
        Placement::Last => parent_node.append(value).id(),
    };

    for child in source.children() {
        graft(tree, id, child, Placement::Last)?;
    }

    Ok(id)
}
