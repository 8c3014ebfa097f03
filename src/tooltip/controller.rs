//! Per-anchor popup controller: show/hide lifecycle and the fade state
//! machine.

use std::rc::Rc;
use std::time::Duration;

use crate::dom::{Content, Document, Element, Visibility};
use crate::state::{State, TimerAction};

use super::options::{Options, TitleSource};
use super::placement;

/// Interval between fade animation steps.
pub const FADE_TICK_INTERVAL: Duration = Duration::from_millis(30);

/// Side attribute the anchor's live `title` is moved into, so a host's
/// native tooltip never fires for an attached anchor.
pub const TITLE_STASH_ATTR: &str = "original-title";

/// Fade animation state for one popup. A step is one tenth of opacity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FadeState {
    #[default]
    Idle,
    FadingIn { step: u32 },
    FadingOut { step: u32 },
}

/// Last entry/exit intent reported by the event layer; re-checked at the
/// moment a deferred trigger fires.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HoverIntent {
    In,
    Out,
}

/// Controller record for one anchor element.
#[derive(Debug)]
pub struct TipState {
    pub anchor_id: u64,
    pub options: Rc<Options>,
    pub enabled: bool,
    pub hover_intent: Option<HoverIntent>,
    pub fade: FadeState,
    /// Live fade ticker; at most one per popup.
    pub fade_timer: Option<u64>,
    /// Pending deferred show/hide trigger.
    pub intent_timer: Option<u64>,
    /// Cached popup element; built on first show, then remounted as needed.
    pub tip_id: Option<u64>,
}

impl TipState {
    pub fn new(anchor_id: u64, options: Rc<Options>) -> Self {
        Self {
            anchor_id,
            options,
            enabled: true,
            hover_intent: None,
            fade: FadeState::Idle,
            fade_timer: None,
            intent_timer: None,
            tip_id: None,
        }
    }
}

pub fn enable(state: &mut State, anchor_id: u64) {
    if let Some(tip) = state.tips.get_mut(&anchor_id) {
        tip.enabled = true;
    }
}

/// Disable the controller. A popup that is already visible stays visible
/// until the next natural hide.
pub fn disable(state: &mut State, anchor_id: u64) {
    if let Some(tip) = state.tips.get_mut(&anchor_id) {
        tip.enabled = false;
    }
}

pub fn toggle_enabled(state: &mut State, anchor_id: u64) {
    if let Some(tip) = state.tips.get_mut(&anchor_id) {
        tip.enabled = !tip.enabled;
    }
}

/// Show the popup for an anchor: resolve the title, mount the popup hidden,
/// measure it, place it against the anchor, then reveal it.
pub fn show(state: &mut State, anchor_id: u64) {
    let Some(tip) = state.tips.get(&anchor_id) else {
        return;
    };
    if !tip.enabled {
        return;
    }
    let options = Rc::clone(&tip.options);

    let text = title(state, anchor_id);
    if text.is_empty() {
        tracing::debug!(anchor = anchor_id, "show suppressed: no title");
        return;
    }

    let tip_id = tip_element(state, anchor_id);

    // Reset content and classes before mounting so nothing stale from a
    // previous show (dynamic gravity class, old text) ever renders.
    if let Some(inner_id) = child_with_class(&state.document, tip_id, "tipsy-inner") {
        if let Some(inner) = state.document.get_mut(inner_id) {
            inner.content = if options.html {
                Content::Markup(text.clone())
            } else {
                Content::Text(text.clone())
            };
        }
    }
    if let Some(container) = state.document.get_mut(tip_id) {
        container.set_classes(&["tipsy"]);
        container.style.top = 0.0;
        container.style.left = 0.0;
        container.style.visibility = Visibility::Hidden;
    }

    // Evict whatever popup is currently displayed, then mount this one
    // hidden. Measurement needs the element in the tree.
    state.slot.acquire(&mut state.document, tip_id);

    let Some(geometry) = state.document.anchor_geometry(anchor_id) else {
        tracing::warn!(anchor = anchor_id, "anchor vanished before placement");
        return;
    };
    let (tip_width, tip_height) = state.document.measure(tip_id);
    let gravity = match state.document.get(anchor_id) {
        Some(anchor) => options.gravity.resolve(anchor),
        None => return,
    };
    let pos = placement::compute_position(geometry, tip_width, tip_height, gravity, options.offset);

    let orientation = placement::orientation_class(gravity);
    if let Some(container) = state.document.get_mut(tip_id) {
        container.style.top = pos.top;
        container.style.left = pos.left;
        container.add_class(&orientation);
    }
    if let Some(arrow_id) = child_with_class(&state.document, tip_id, "tipsy-arrow") {
        let arrow_class = placement::arrow_class(gravity);
        if let Some(arrow) = state.document.get_mut(arrow_id) {
            arrow.set_classes(&["tipsy-arrow", arrow_class.as_str()]);
        }
    }
    if let Some(extra) = &options.class_name {
        let class = match state.document.get(anchor_id) {
            Some(anchor) => extra.resolve(anchor),
            None => return,
        };
        if let Some(container) = state.document.get_mut(tip_id) {
            container.add_class(&class);
        }
    }

    if options.fade {
        start_fade_in(state, anchor_id, tip_id);
    } else if let Some(container) = state.document.get_mut(tip_id) {
        container.style.visibility = Visibility::Visible;
        container.style.opacity = options.opacity;
    }
}

/// Hide the popup for an anchor: immediately, or via the fade-out ramp.
/// No-op when nothing of this anchor's is mounted.
pub fn hide(state: &mut State, anchor_id: u64) {
    let Some(tip) = state.tips.get(&anchor_id) else {
        return;
    };
    let Some(tip_id) = tip.tip_id else {
        return;
    };
    let fade = tip.options.fade;
    if !state.document.is_mounted(tip_id) {
        return;
    }
    if fade {
        let current = state.document.get(tip_id).map(|e| e.style.opacity).unwrap_or(0.0);
        cancel_fade_timer(state, anchor_id);
        let timer = state.schedule_timer(
            FADE_TICK_INTERVAL,
            TimerAction::FadeTick(anchor_id),
            Some(FADE_TICK_INTERVAL),
        );
        if let Some(tip) = state.tips.get_mut(&anchor_id) {
            tip.fade = FadeState::FadingOut { step: opacity_steps(current) };
            tip.fade_timer = Some(timer);
        }
    } else {
        state.slot.release(&mut state.document, tip_id);
    }
}

/// Advance the fade state machine one step. Returns whether the ticker
/// should keep firing.
pub fn fade_tick(state: &mut State, anchor_id: u64) -> bool {
    let Some(tip) = state.tips.get_mut(&anchor_id) else {
        return false;
    };
    let Some(tip_id) = tip.tip_id else {
        tip.fade = FadeState::Idle;
        tip.fade_timer = None;
        return false;
    };
    let target = opacity_steps(tip.options.opacity);
    match tip.fade {
        FadeState::Idle => {
            tip.fade_timer = None;
            false
        }
        FadeState::FadingIn { step } => {
            let step = (step + 1).min(target);
            if let Some(element) = state.document.get_mut(tip_id) {
                element.style.opacity = step as f32 / 10.0;
            }
            if step >= target {
                tip.fade = FadeState::Idle;
                tip.fade_timer = None;
                false
            } else {
                tip.fade = FadeState::FadingIn { step };
                true
            }
        }
        FadeState::FadingOut { step } => {
            let step = step.saturating_sub(1);
            if let Some(element) = state.document.get_mut(tip_id) {
                element.style.opacity = step as f32 / 10.0;
            }
            if step == 0 {
                // Terminal transition: the popup leaves the document.
                state.slot.release(&mut state.document, tip_id);
                tip.fade = FadeState::Idle;
                tip.fade_timer = None;
                false
            } else {
                tip.fade = FadeState::FadingOut { step };
                true
            }
        }
    }
}

/// Move the anchor's live `title` attribute into the stash attribute, once,
/// so the host's native tooltip never fires.
pub fn fix_title(state: &mut State, anchor_id: u64) {
    let Some(anchor) = state.document.get_mut(anchor_id) else {
        return;
    };
    let live = anchor.attribute("title").map(str::to_string);
    let has_live = live.as_deref().is_some_and(|t| !t.is_empty());
    if has_live || anchor.attribute(TITLE_STASH_ATTR).is_none() {
        anchor.set_attribute(TITLE_STASH_ATTR, live.as_deref().unwrap_or(""));
        anchor.remove_attribute("title");
    }
}

/// Resolve the tooltip text for an anchor: attribute lookup or callback,
/// trimmed, with the configured fallback when empty.
pub fn title(state: &mut State, anchor_id: u64) -> String {
    let Some(tip) = state.tips.get(&anchor_id) else {
        return String::new();
    };
    let options = Rc::clone(&tip.options);
    fix_title(state, anchor_id);
    let Some(anchor) = state.document.get(anchor_id) else {
        return String::new();
    };
    let raw = match &options.title {
        TitleSource::Attr(name) => {
            let name = if name == "title" { TITLE_STASH_ATTR } else { name.as_str() };
            anchor.attribute(name).unwrap_or_default().to_string()
        }
        TitleSource::Computed(f) => f(anchor),
    };
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        options.fallback.clone()
    } else {
        trimmed.to_string()
    }
}

/// Build the popup element for an anchor on first use; afterwards return
/// the cached wrapper. It is mounted and unmounted, never rebuilt.
fn tip_element(state: &mut State, anchor_id: u64) -> u64 {
    if let Some(tip_id) = state.tips.get(&anchor_id).and_then(|t| t.tip_id) {
        return tip_id;
    }
    let mut container = Element::new("div");
    container.add_class("tipsy");
    container.set_attribute("data-tipsy-pointee", &anchor_id.to_string());
    let container_id = state.document.create(container);

    let mut arrow = Element::new("div");
    arrow.add_class("tipsy-arrow");
    let arrow_id = state.document.create(arrow);

    let mut inner = Element::new("div");
    inner.add_class("tipsy-inner");
    let inner_id = state.document.create(inner);

    // Cannot fail: all three elements were just created.
    let _ = state.document.append(container_id, arrow_id);
    let _ = state.document.append(container_id, inner_id);

    if let Some(tip) = state.tips.get_mut(&anchor_id) {
        tip.tip_id = Some(container_id);
    }
    container_id
}

fn start_fade_in(state: &mut State, anchor_id: u64, tip_id: u64) {
    if let Some(container) = state.document.get_mut(tip_id) {
        container.style.visibility = Visibility::Visible;
        container.style.opacity = 0.0;
    }
    cancel_fade_timer(state, anchor_id);
    let timer = state.schedule_timer(
        FADE_TICK_INTERVAL,
        TimerAction::FadeTick(anchor_id),
        Some(FADE_TICK_INTERVAL),
    );
    if let Some(tip) = state.tips.get_mut(&anchor_id) {
        tip.fade = FadeState::FadingIn { step: 0 };
        tip.fade_timer = Some(timer);
    }
}

/// Cancel this anchor's pending fade ticker, if any. Only one fade timer
/// may be live per popup.
fn cancel_fade_timer(state: &mut State, anchor_id: u64) {
    let pending = state.tips.get_mut(&anchor_id).and_then(|t| t.fade_timer.take());
    if let Some(timer) = pending {
        state.cancel_timer(timer);
    }
}

fn child_with_class(document: &Document, parent_id: u64, class: &str) -> Option<u64> {
    let parent = document.get(parent_id)?;
    parent
        .children
        .iter()
        .copied()
        .find(|&child| document.get(child).is_some_and(|e| e.has_class(class)))
}

/// Number of fade steps for an opacity (tenths, rounded).
fn opacity_steps(opacity: f32) -> u32 {
    (opacity * 10.0).round().max(0.0) as u32
}
