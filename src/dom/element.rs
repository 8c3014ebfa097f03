//! Element - the node type of the document tree.

use std::collections::HashMap;

/// Inner content of an element.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Content {
    #[default]
    Empty,
    /// Plain text; escaped when the tree is rendered to markup.
    Text(String),
    /// Raw markup; emitted verbatim when rendered.
    Markup(String),
}

/// CSS-style visibility. A hidden element keeps its layout box.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Visibility {
    #[default]
    Visible,
    Hidden,
}

/// CSS-style display. An element with `display: none` has no layout box.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Display {
    #[default]
    Block,
    None,
}

/// Inline style of an element.
#[derive(Debug, Clone, PartialEq)]
pub struct Style {
    /// Top edge in document coordinates.
    pub top: f32,
    /// Left edge in document coordinates.
    pub left: f32,
    pub visibility: Visibility,
    pub display: Display,
    /// Opacity in `0.0..=1.0`.
    pub opacity: f32,
}

impl Default for Style {
    fn default() -> Self {
        Self {
            top: 0.0,
            left: 0.0,
            visibility: Visibility::Visible,
            display: Display::Block,
            opacity: 1.0,
        }
    }
}

/// A node of the document tree.
#[derive(Debug)]
pub struct Element {
    /// Unique element ID, assigned when registered with a document.
    pub id: u64,
    /// Tag name (purely descriptive; selectors match on it).
    pub tag: String,
    /// CSS classes, in insertion order.
    pub classes: Vec<String>,
    /// Named attributes.
    pub attributes: HashMap<String, String>,
    /// Inner content. An element with content has no child elements.
    pub content: Content,
    /// Parent element ID; `None` while detached.
    pub parent_id: Option<u64>,
    /// Child element IDs.
    pub children: Vec<u64>,
    /// Inline style.
    pub style: Style,
    /// Explicit border-box width; content-sized when unset.
    pub width: Option<f32>,
    /// Explicit border-box height; content-sized when unset.
    pub height: Option<f32>,
}

impl Element {
    pub fn new(tag: &str) -> Self {
        Self {
            id: 0,
            tag: tag.to_string(),
            classes: Vec::new(),
            attributes: HashMap::new(),
            content: Content::Empty,
            parent_id: None,
            children: Vec::new(),
            style: Style::default(),
            width: None,
            height: None,
        }
    }

    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }

    pub fn set_attribute(&mut self, name: &str, value: &str) {
        self.attributes.insert(name.to_string(), value.to_string());
    }

    pub fn remove_attribute(&mut self, name: &str) -> Option<String> {
        self.attributes.remove(name)
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }

    pub fn add_class(&mut self, class: &str) {
        if !self.has_class(class) {
            self.classes.push(class.to_string());
        }
    }

    /// Replace all classes.
    pub fn set_classes(&mut self, classes: &[&str]) {
        self.classes = classes.iter().map(|c| c.to_string()).collect();
    }

    pub fn set_size(&mut self, width: f32, height: f32) {
        self.width = Some(width);
        self.height = Some(height);
    }

    pub fn set_position(&mut self, left: f32, top: f32) {
        self.style.left = left;
        self.style.top = top;
    }
}
