//! Document - element registry, tree structure, queries and measurement.

use std::collections::HashMap;

use crate::error::{Error, Result};

use super::{Content, Display, Element, Visibility};

// Monospace text metrics used for content-sized elements. Real layout is out
// of scope; these keep measurement deterministic for hosts and tests.
const CHAR_WIDTH: f32 = 7.0;
const LINE_HEIGHT: f32 = 14.0;
const TEXT_PADDING_H: f32 = 5.0;
const TEXT_PADDING_V: f32 = 3.0;

/// Snapshot of an anchor's box in document coordinates (element rect plus
/// document scroll offset). Taken at show-time, never cached across shows.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct AnchorGeometry {
    pub top: f32,
    pub left: f32,
    pub width: f32,
    pub height: f32,
}

/// The document: an element registry plus one mounted tree rooted at `body`.
#[derive(Debug)]
pub struct Document {
    /// Elements by ID. Detached elements stay registered.
    elements: HashMap<u64, Element>,
    /// Element IDs by `id` attribute.
    names: HashMap<String, u64>,
    /// The `body` element every mounted element descends from.
    root_id: u64,
    /// Horizontal scroll offset of the viewport.
    pub scroll_left: f32,
    /// Vertical scroll offset of the viewport.
    pub scroll_top: f32,
    next_id: u64,
}

impl Document {
    pub fn new() -> Self {
        let mut doc = Self {
            elements: HashMap::new(),
            names: HashMap::new(),
            root_id: 0,
            scroll_left: 0.0,
            scroll_top: 0.0,
            next_id: 1,
        };
        doc.root_id = doc.create(Element::new("body"));
        doc
    }

    /// The `body` element ID.
    pub fn root_id(&self) -> u64 {
        self.root_id
    }

    /// Register a new element and return its ID.
    pub fn create(&mut self, mut element: Element) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        element.id = id;
        if let Some(name) = element.attribute("id") {
            self.names.insert(name.to_string(), id);
        }
        self.elements.insert(id, element);
        id
    }

    pub fn get(&self, id: u64) -> Option<&Element> {
        self.elements.get(&id)
    }

    pub fn get_mut(&mut self, id: u64) -> Option<&mut Element> {
        self.elements.get_mut(&id)
    }

    pub fn contains(&self, id: u64) -> bool {
        self.elements.contains_key(&id)
    }

    /// Append `child` to `parent`'s children, detaching it first if needed.
    pub fn append(&mut self, parent_id: u64, child_id: u64) -> Result<()> {
        if !self.elements.contains_key(&parent_id) {
            return Err(Error::ElementNotFound(parent_id));
        }
        if !self.elements.contains_key(&child_id) {
            return Err(Error::ElementNotFound(child_id));
        }
        self.unmount(child_id);
        if let Some(parent) = self.elements.get_mut(&parent_id) {
            parent.children.push(child_id);
        }
        if let Some(child) = self.elements.get_mut(&child_id) {
            child.parent_id = Some(parent_id);
        }
        Ok(())
    }

    /// Insert an element as the first child of `body`.
    pub fn mount_first(&mut self, id: u64) {
        if !self.elements.contains_key(&id) {
            return;
        }
        self.unmount(id);
        let root_id = self.root_id;
        if let Some(root) = self.elements.get_mut(&root_id) {
            root.children.insert(0, id);
        }
        if let Some(element) = self.elements.get_mut(&id) {
            element.parent_id = Some(root_id);
        }
    }

    /// Detach an element from its parent. The element (and its subtree)
    /// stays registered and can be re-inserted later.
    pub fn unmount(&mut self, id: u64) {
        let Some(parent_id) = self.elements.get(&id).and_then(|e| e.parent_id) else {
            return;
        };
        if let Some(parent) = self.elements.get_mut(&parent_id) {
            parent.children.retain(|&c| c != id);
        }
        if let Some(element) = self.elements.get_mut(&id) {
            element.parent_id = None;
        }
    }

    /// Unregister an element and its whole subtree.
    pub fn remove_subtree(&mut self, id: u64) {
        self.unmount(id);
        let mut stack = vec![id];
        while let Some(current) = stack.pop() {
            if let Some(element) = self.elements.remove(&current) {
                if let Some(name) = element.attribute("id") {
                    self.names.remove(name);
                }
                stack.extend(element.children);
            }
        }
    }

    /// Whether the element is part of the mounted tree.
    pub fn is_mounted(&self, id: u64) -> bool {
        let mut current = id;
        while let Some(element) = self.elements.get(&current) {
            match element.parent_id {
                Some(parent_id) => current = parent_id,
                None => return current == self.root_id,
            }
        }
        false
    }

    /// Resolve a selector against the mounted tree, in document order.
    /// Supported forms: `#id`, `.class`, and a bare tag name.
    pub fn select(&self, selector: &str) -> Result<Vec<u64>> {
        let parsed = Selector::parse(selector)?;
        let mut matches = Vec::new();
        self.collect_matches(self.root_id, &parsed, &mut matches);
        Ok(matches)
    }

    fn collect_matches(&self, id: u64, selector: &Selector, out: &mut Vec<u64>) {
        let Some(element) = self.elements.get(&id) else {
            return;
        };
        if id != self.root_id && selector.matches(element) {
            out.push(id);
        }
        for &child in &element.children {
            self.collect_matches(child, selector, out);
        }
    }

    /// Measure an element's rendered box.
    ///
    /// An element that is not part of the mounted tree (or is `display:
    /// none`) measures 0x0 - layout only exists for rendered elements, so
    /// popups must be mounted (hidden via `visibility`) before measuring.
    pub fn measure(&self, id: u64) -> (f32, f32) {
        if !self.is_mounted(id) {
            return (0.0, 0.0);
        }
        self.layout_size(id)
    }

    fn layout_size(&self, id: u64) -> (f32, f32) {
        let Some(element) = self.elements.get(&id) else {
            return (0.0, 0.0);
        };
        if element.style.display == Display::None {
            return (0.0, 0.0);
        }
        if let (Some(width), Some(height)) = (element.width, element.height) {
            return (width, height);
        }
        match &element.content {
            Content::Text(text) | Content::Markup(text) => text_metrics(text),
            Content::Empty => {
                // Content-sized container: widest child by tallest stack.
                let mut width: f32 = 0.0;
                let mut height: f32 = 0.0;
                for &child in &element.children {
                    let (w, h) = self.layout_size(child);
                    width = width.max(w);
                    height += h;
                }
                (width, height)
            }
        }
    }

    /// Anchor box snapshot in document coordinates.
    pub fn anchor_geometry(&self, id: u64) -> Option<AnchorGeometry> {
        let element = self.elements.get(&id)?;
        let (width, height) = self.layout_size(id);
        Some(AnchorGeometry {
            top: element.style.top + self.scroll_top,
            left: element.style.left + self.scroll_left,
            width,
            height,
        })
    }

    /// Render the mounted tree as indented markup, escaping text content.
    pub fn dump_markup(&self) -> String {
        let mut out = String::new();
        self.render_element(self.root_id, 0, &mut out);
        out
    }

    fn render_element(&self, id: u64, depth: usize, out: &mut String) {
        let Some(element) = self.elements.get(&id) else {
            return;
        };
        let indent = "  ".repeat(depth);
        out.push_str(&indent);
        out.push('<');
        out.push_str(&element.tag);
        if !element.classes.is_empty() {
            out.push_str(&format!(" class=\"{}\"", escape_attr(&element.classes.join(" "))));
        }
        let mut attr_names: Vec<&String> = element.attributes.keys().collect();
        attr_names.sort();
        for name in attr_names {
            out.push_str(&format!(" {}=\"{}\"", name, escape_attr(&element.attributes[name])));
        }
        if let Some(style) = render_style(element) {
            out.push_str(&format!(" style=\"{style}\""));
        }
        out.push('>');
        match &element.content {
            Content::Text(text) => out.push_str(&escape_text(text)),
            Content::Markup(markup) => out.push_str(markup),
            Content::Empty => {
                if !element.children.is_empty() {
                    out.push('\n');
                    for &child in &element.children {
                        self.render_element(child, depth + 1, out);
                    }
                    out.push_str(&indent);
                }
            }
        }
        out.push_str(&format!("</{}>\n", element.tag));
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

/// A parsed selector.
enum Selector {
    /// `#name` - match on the `id` attribute.
    Name(String),
    /// `.class` - match on a CSS class.
    Class(String),
    /// Bare tag name.
    Tag(String),
}

impl Selector {
    fn parse(selector: &str) -> Result<Selector> {
        let selector = selector.trim();
        if let Some(name) = selector.strip_prefix('#') {
            if name.is_empty() {
                return Err(Error::Selector(selector.to_string()));
            }
            return Ok(Self::Name(name.to_string()));
        }
        if let Some(class) = selector.strip_prefix('.') {
            if class.is_empty() {
                return Err(Error::Selector(selector.to_string()));
            }
            return Ok(Self::Class(class.to_string()));
        }
        if selector.is_empty() || selector.contains(char::is_whitespace) {
            return Err(Error::Selector(selector.to_string()));
        }
        Ok(Self::Tag(selector.to_string()))
    }

    fn matches(&self, element: &Element) -> bool {
        match self {
            Self::Name(name) => element.attribute("id") == Some(name.as_str()),
            Self::Class(class) => element.has_class(class),
            Self::Tag(tag) => element.tag == *tag,
        }
    }
}

/// Measure a text block with the fixed monospace metrics.
fn text_metrics(text: &str) -> (f32, f32) {
    let mut lines = 0usize;
    let mut widest = 0usize;
    for line in text.lines() {
        lines += 1;
        widest = widest.max(line.chars().count());
    }
    lines = lines.max(1);
    (
        widest as f32 * CHAR_WIDTH + TEXT_PADDING_H * 2.0,
        lines as f32 * LINE_HEIGHT + TEXT_PADDING_V * 2.0,
    )
}

/// Inline style string, or `None` when every property is at its default.
fn render_style(element: &Element) -> Option<String> {
    let style = &element.style;
    let mut parts = Vec::new();
    if style.top != 0.0 || style.left != 0.0 {
        parts.push(format!("top: {}px", style.top));
        parts.push(format!("left: {}px", style.left));
    }
    if style.visibility == Visibility::Hidden {
        parts.push("visibility: hidden".to_string());
    }
    if style.display == Display::None {
        parts.push("display: none".to_string());
    }
    if style.opacity != 1.0 {
        parts.push(format!("opacity: {}", style.opacity));
    }
    if parts.is_empty() {
        None
    } else {
        Some(parts.join("; "))
    }
}

fn escape_text(text: &str) -> String {
    text.replace('&', "&amp;").replace('<', "&lt;").replace('>', "&gt;")
}

fn escape_attr(value: &str) -> String {
    escape_text(value).replace('"', "&quot;")
}
