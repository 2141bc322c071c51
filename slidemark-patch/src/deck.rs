//! Slide deck state
//!
//! [`Deck`] owns the markdown source and everything derived from it: the content
//! tree, the rendered HTML, the slide groups and the current selection. Every
//! change to the source recomputes the derived values in one go, so a reader
//! never sees a tree that belongs to an older source.
//!
//! If a derived value cannot be recomputed the previous one is kept and a
//! warning is logged; a half-typed tag never blanks the preview.

use crate::edit::Edit;
use crate::error::PatchError;
use crate::formats::css::prepend_selector;
use crate::formats::html::serializer::{node_to_html, nodes_to_html};
use crate::formats::markdown::parser::parse_markdown;
use crate::locator::find_in_slide;
use crate::selection::Selection;
use crate::style::{StyleEngine, StyleOptions};
use crate::tree::{assign_node_index_trace, remove_blank_text_nodes, text_content, Node};

pub const DEFAULT_SCOPE_CLASS_PREFIX: &str = "slide-index-";

const HEADING_TAGS: &[&str] = &["h1", "h2", "h3", "h4", "h5", "h6"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeckOptions {
    /// Prefix of the class that scopes a slide's stylesheets, followed by the slide index
    pub scope_class_prefix: String,
    pub style: StyleOptions,
}

impl Default for DeckOptions {
    fn default() -> Self {
        Self {
            scope_class_prefix: DEFAULT_SCOPE_CLASS_PREFIX.to_string(),
            style: StyleOptions::default(),
        }
    }
}

/// The top-level nodes between two `hr` boundaries.
#[derive(Debug, Clone, PartialEq)]
pub struct SlideGroup {
    pub index: usize,
    /// Normalized nodes carrying traces local to this slide
    pub nodes: Vec<Node>,
    pub title: String,
    pub html: String,
    pub class_name: String,
}

/// Class of the `n`th slide with the default prefix.
pub fn slide_index_class_name(index: usize) -> String {
    format!("{DEFAULT_SCOPE_CLASS_PREFIX}{index}")
}

/// Splits a document into slides.
///
/// The tree is normalized first, comments and doctypes are left out and a
/// leading empty slide (a document starting with `---`, or an empty document)
/// is dropped. Each slide gets its own traces and its `<style>` rules are
/// scoped to `.{prefix}{index}`.
pub fn slide_groups(root: &Node, prefix: &str) -> Vec<SlideGroup> {
    let normalized = remove_blank_text_nodes(root);

    let mut groups: Vec<Vec<Node>> = vec![Vec::new()];
    for node in normalized.children() {
        match node {
            Node::Comment(_) | Node::Doctype => {}
            node if node.is_element("hr") => groups.push(Vec::new()),
            node => {
                if let Some(group) = groups.last_mut() {
                    group.push(node.clone());
                }
            }
        }
    }
    if groups.first().is_some_and(Vec::is_empty) {
        groups.remove(0);
    }

    groups
        .into_iter()
        .enumerate()
        .map(|(index, mut nodes)| {
            let class_name = format!("{prefix}{index}");
            assign_node_index_trace(&mut nodes);
            scope_styles(&mut nodes, &format!(".{class_name}"));

            let html = nodes_to_html(&nodes).unwrap_or_else(|e| {
                log::warn!("failed to render slide {index}: {e}");
                String::new()
            });
            SlideGroup {
                index,
                title: content_title(&nodes),
                html,
                class_name,
                nodes,
            }
        })
        .collect()
}

fn scope_styles(nodes: &mut [Node], selector: &str) {
    for node in nodes {
        let Some(element) = node.as_element_mut() else {
            continue;
        };
        if element.tag_name != "style" {
            scope_styles(&mut element.children, selector);
            continue;
        }
        for child in &mut element.children {
            if let Node::Text(text) = child {
                match prepend_selector(&text.value, selector) {
                    Ok(css) => text.value = css,
                    Err(e) => log::warn!("leaving slide stylesheet unscoped: {e}"),
                }
            }
        }
    }
}

/// Text of the first heading, else of the first node with any text.
pub fn content_title(nodes: &[Node]) -> String {
    if let Some(heading) = nodes.iter().find_map(first_heading) {
        return text_content(heading).trim().to_string();
    }
    nodes
        .iter()
        .filter(|node| !node.is_element("style"))
        .map(|node| text_content(node).trim().to_string())
        .find(|text| !text.is_empty())
        .unwrap_or_default()
}

fn first_heading(node: &Node) -> Option<&Node> {
    let element = node.as_element()?;
    if HEADING_TAGS.contains(&element.tag_name.as_str()) {
        return Some(node);
    }
    element.children.iter().find_map(first_heading)
}

/// Markdown source plus everything derived from it.
#[derive(Debug, Clone)]
pub struct Deck {
    markdown: String,
    tree: Node,
    html: String,
    slides: Vec<SlideGroup>,
    selections: Vec<Selection>,
    revision: u64,
    engine: StyleEngine,
    options: DeckOptions,
}

impl Deck {
    pub fn new(markdown: impl Into<String>, options: DeckOptions) -> Self {
        let mut deck = Self {
            markdown: markdown.into(),
            tree: Node::root(Vec::new()),
            html: String::new(),
            slides: Vec::new(),
            selections: Vec::new(),
            revision: 0,
            engine: StyleEngine::new(options.style.clone()),
            options,
        };
        deck.recompute();
        deck
    }

    pub fn markdown(&self) -> &str {
        &self.markdown
    }

    pub fn tree(&self) -> &Node {
        &self.tree
    }

    pub fn html(&self) -> &str {
        &self.html
    }

    pub fn slides(&self) -> &[SlideGroup] {
        &self.slides
    }

    pub fn slide(&self, index: usize) -> Option<&SlideGroup> {
        self.slides.get(index)
    }

    /// Bumped on every source change.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn options(&self) -> &DeckOptions {
        &self.options
    }

    pub fn set_markdown(&mut self, markdown: impl Into<String>) {
        self.markdown = markdown.into();
        self.recompute();
    }

    /// Applies `edit` to the source. Returns `false` when the edit does not fit.
    pub fn replace_markdown(&mut self, edit: &Edit) -> bool {
        match edit.apply(&self.markdown) {
            Some(markdown) => {
                self.set_markdown(markdown);
                true
            }
            None => {
                log::warn!(
                    "edit {:?} does not fit a source of {} bytes",
                    edit.range,
                    self.markdown.len()
                );
                false
            }
        }
    }

    fn recompute(&mut self) {
        self.revision += 1;

        match parse_markdown(&self.markdown) {
            Ok(tree) => self.tree = tree,
            Err(e) => {
                log::warn!("keeping previous tree at revision {}: {e}", self.revision);
                return;
            }
        }
        match node_to_html(&self.tree) {
            Ok(html) => self.html = html,
            Err(e) => log::warn!("keeping previous HTML at revision {}: {e}", self.revision),
        }
        self.slides = slide_groups(&self.tree, &self.options.scope_class_prefix);
    }

    /// Replaces the current selection.
    pub fn select(&mut self, selection: Selection) {
        self.selections = vec![selection];
    }

    pub fn clear_selection(&mut self) {
        self.selections.clear();
    }

    pub fn selections(&self) -> &[Selection] {
        &self.selections
    }

    pub fn selected(&self) -> Option<&Selection> {
        self.selections.first()
    }

    /// The selected node, or `None` when nothing is selected or the trace went stale.
    pub fn selected_node(&self) -> Option<&Node> {
        let selection = self.selected()?;
        let trace = selection.trace.as_ref()?;
        let slide = self.slides.get(selection.slide_index)?;
        find_in_slide(&slide.nodes, trace, selection.detail.origin)
    }

    /// Styles the selected element. Returns whether the source changed.
    pub fn apply_style_to_selection(&mut self, style: &str) -> bool {
        let Some(element) = self.selected_node().and_then(Node::as_element) else {
            return false;
        };
        let Some(edit) = self.engine.apply_style(element, style, &self.markdown) else {
            return false;
        };
        self.replace_markdown(&edit)
    }

    /// Removes the selected wrapper. Returns whether the source changed.
    pub fn remove_style_from_selection(&mut self) -> Result<bool, PatchError> {
        let Some(element) = self.selected_node().and_then(Node::as_element) else {
            return Ok(false);
        };
        let Some(edit) = self.engine.remove_style(element, &self.markdown)? else {
            return Ok(false);
        };
        Ok(self.replace_markdown(&edit))
    }
}

impl Default for Deck {
    fn default() -> Self {
        Self::new(String::new(), DeckOptions::default())
    }
}
