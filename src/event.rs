//! Document events and the trigger binding registry.

use std::collections::HashMap;

/// Events the host can dispatch at an element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    PointerEnter,
    PointerLeave,
    FocusGained,
    FocusLost,
}

/// What the trigger binder does when a bound event fires.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reaction {
    HoverIn,
    HoverOut,
}

/// Trigger bindings attached to elements.
#[derive(Debug, Default)]
pub struct BindingRegistry {
    /// Map of element ID -> event -> reaction.
    bindings: HashMap<u64, HashMap<EventKind, Reaction>>,
}

impl BindingRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, element_id: u64, kind: EventKind, reaction: Reaction) {
        self.bindings.entry(element_id).or_default().insert(kind, reaction);
    }

    pub fn get(&self, element_id: u64, kind: EventKind) -> Option<Reaction> {
        self.bindings.get(&element_id).and_then(|b| b.get(&kind).copied())
    }

    pub fn is_bound(&self, element_id: u64) -> bool {
        self.bindings.get(&element_id).is_some_and(|b| !b.is_empty())
    }

    /// Remove all bindings for an element.
    pub fn remove_all(&mut self, element_id: u64) {
        self.bindings.remove(&element_id);
    }
}
