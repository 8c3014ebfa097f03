//! Attachment entry points and the trigger binder.

use std::rc::Rc;

use crate::error::Result;
use crate::event::{EventKind, Reaction};
use crate::state::{State, TimerAction};
use crate::tooltip::controller;
use crate::tooltip::{HoverIntent, Options, TipState, Trigger};

/// Attach tooltips to every element matching `selector`. Repeated
/// attachment to an element reuses its existing controller (and that
/// controller's original options).
pub fn attach(state: &mut State, selector: &str, options: Rc<Options>) -> Result<Vec<u64>> {
    let ids = state.document.select(selector)?;
    for &anchor_id in &ids {
        if !state.tips.contains_key(&anchor_id) {
            state.tips.insert(anchor_id, TipState::new(anchor_id, Rc::clone(&options)));
            controller::fix_title(state, anchor_id);
        }
        if let Some(tip) = state.tips.get(&anchor_id) {
            match tip.options.trigger {
                Trigger::Hover => {
                    state.bindings.set(anchor_id, EventKind::PointerEnter, Reaction::HoverIn);
                    state.bindings.set(anchor_id, EventKind::PointerLeave, Reaction::HoverOut);
                }
                Trigger::Focus => {
                    state.bindings.set(anchor_id, EventKind::FocusGained, Reaction::HoverIn);
                    state.bindings.set(anchor_id, EventKind::FocusLost, Reaction::HoverOut);
                }
                Trigger::Manual => {}
            }
        }
    }
    Ok(ids)
}

/// Tear down controllers: cancel pending timers, unmount and drop popup
/// elements, remove trigger bindings.
pub fn detach(state: &mut State, ids: &[u64]) {
    for &anchor_id in ids {
        let Some(tip) = state.tips.remove(&anchor_id) else {
            continue;
        };
        if let Some(timer) = tip.fade_timer {
            state.cancel_timer(timer);
        }
        if let Some(timer) = tip.intent_timer {
            state.cancel_timer(timer);
        }
        if let Some(tip_id) = tip.tip_id {
            state.slot.release(&mut state.document, tip_id);
            state.document.remove_subtree(tip_id);
        }
        state.bindings.remove_all(anchor_id);
    }
}

/// Dispatch a document event at an element, running the bound trigger
/// reaction if any. Unbound events are a silent no-op.
pub fn dispatch(state: &mut State, element_id: u64, kind: EventKind) {
    let Some(reaction) = state.bindings.get(element_id, kind) else {
        return;
    };
    match reaction {
        Reaction::HoverIn => enter(state, element_id),
        Reaction::HoverOut => leave(state, element_id),
    }
}

fn enter(state: &mut State, anchor_id: u64) {
    let Some(tip) = state.tips.get_mut(&anchor_id) else {
        return;
    };
    tip.hover_intent = Some(HoverIntent::In);
    let delay = tip.options.delay_in;
    let pending = tip.intent_timer.take();
    if let Some(timer) = pending {
        state.cancel_timer(timer);
    }
    if delay.is_zero() {
        controller::show(state, anchor_id);
    } else {
        controller::fix_title(state, anchor_id);
        let timer = state.schedule_timer(delay, TimerAction::DeferredShow(anchor_id), None);
        if let Some(tip) = state.tips.get_mut(&anchor_id) {
            tip.intent_timer = Some(timer);
        }
    }
}

fn leave(state: &mut State, anchor_id: u64) {
    let Some(tip) = state.tips.get_mut(&anchor_id) else {
        return;
    };
    tip.hover_intent = Some(HoverIntent::Out);
    let delay = tip.options.delay_out;
    let pending = tip.intent_timer.take();
    if let Some(timer) = pending {
        state.cancel_timer(timer);
    }
    if delay.is_zero() {
        controller::hide(state, anchor_id);
    } else {
        let timer = state.schedule_timer(delay, TimerAction::DeferredHide(anchor_id), None);
        if let Some(tip) = state.tips.get_mut(&anchor_id) {
            tip.intent_timer = Some(timer);
        }
    }
}

/// Deferred trigger: intent is re-checked at fire time, so a leave that
/// arrived while the timer was pending suppresses the show.
pub(crate) fn fire_deferred_show(state: &mut State, anchor_id: u64) {
    let Some(tip) = state.tips.get_mut(&anchor_id) else {
        return;
    };
    tip.intent_timer = None;
    if tip.hover_intent == Some(HoverIntent::In) {
        controller::show(state, anchor_id);
    }
}

pub(crate) fn fire_deferred_hide(state: &mut State, anchor_id: u64) {
    let Some(tip) = state.tips.get_mut(&anchor_id) else {
        return;
    };
    tip.intent_timer = None;
    if tip.hover_intent == Some(HoverIntent::Out) {
        controller::hide(state, anchor_id);
    }
}
