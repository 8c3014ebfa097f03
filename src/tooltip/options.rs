//! Attachment configuration.

use std::fmt;
use std::time::Duration;

use crate::dom::Element;

use super::Gravity;

/// A configured value that is either fixed or computed per anchor at the
/// point of use.
pub enum Dynamic<T> {
    Literal(T),
    Computed(Box<dyn Fn(&Element) -> T>),
}

impl<T: Clone> Dynamic<T> {
    pub fn resolve(&self, anchor: &Element) -> T {
        match self {
            Self::Literal(value) => value.clone(),
            Self::Computed(f) => f(anchor),
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for Dynamic<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Literal(value) => f.debug_tuple("Literal").field(value).finish(),
            Self::Computed(_) => f.write_str("Computed(..)"),
        }
    }
}

/// Where the tooltip text comes from.
pub enum TitleSource {
    /// Read this attribute off the anchor. The literal name `title` is
    /// redirected to the side attribute the fix-up step fills.
    Attr(String),
    /// Invoke with the anchor.
    Computed(Box<dyn Fn(&Element) -> String>),
}

impl fmt::Debug for TitleSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Attr(name) => f.debug_tuple("Attr").field(name).finish(),
            Self::Computed(_) => f.write_str("Computed(..)"),
        }
    }
}

/// Which document events drive show and hide.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Trigger {
    /// Pointer enter/leave.
    #[default]
    Hover,
    /// Focus gained/lost.
    Focus,
    /// Nothing is bound; the host drives show/hide directly.
    Manual,
}

/// Tooltip options for one attachment batch. Shared by reference across all
/// anchors of the batch; immutable after attachment.
#[derive(Debug)]
pub struct Options {
    /// Extra class added to the popup container.
    pub class_name: Option<Dynamic<String>>,
    /// Delay before a hover-in shows the popup.
    pub delay_in: Duration,
    /// Delay before a hover-out hides the popup.
    pub delay_out: Duration,
    /// Animate opacity in fixed steps instead of revealing instantly.
    pub fade: bool,
    /// Shown when the resolved title is empty.
    pub fallback: String,
    pub gravity: Dynamic<Gravity>,
    /// Treat the title as raw markup instead of escaped text.
    pub html: bool,
    /// Gap between the anchor edge and the popup.
    pub offset: f32,
    /// Final popup opacity.
    pub opacity: f32,
    pub title: TitleSource,
    pub trigger: Trigger,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            class_name: None,
            delay_in: Duration::ZERO,
            delay_out: Duration::ZERO,
            fade: false,
            fallback: String::new(),
            gravity: Dynamic::Literal(Gravity::default()),
            html: false,
            offset: 0.0,
            opacity: 0.8,
            title: TitleSource::Attr("title".to_string()),
            trigger: Trigger::Hover,
        }
    }
}
