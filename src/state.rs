//! Shared engine state and the timer service.

use std::collections::{HashMap, VecDeque};
use std::time::{Duration, Instant};

use crate::binder;
use crate::dom::Document;
use crate::event::BindingRegistry;
use crate::tooltip::controller;
use crate::tooltip::{DisplaySlot, TipState};

/// What a timer does when it fires. Actions re-validate controller state at
/// fire time, so a superseded action is a no-op.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerAction {
    /// Re-check hover intent, then show this anchor's popup.
    DeferredShow(u64),
    /// Re-check hover intent, then hide this anchor's popup.
    DeferredHide(u64),
    /// Advance this anchor's fade state machine.
    FadeTick(u64),
}

/// A pending timer callback.
#[derive(Debug)]
pub struct PendingTimer {
    /// Unique timer ID.
    pub id: u64,
    /// When this timer should fire.
    pub fire_at: Instant,
    pub action: TimerAction,
    /// For repeating timers: interval between firings.
    pub interval: Option<Duration>,
    /// Whether this timer has been cancelled.
    pub cancelled: bool,
}

/// Shared tooltip engine state: the document, trigger bindings, controller
/// records and the timer queue.
pub struct State {
    pub document: Document,
    pub bindings: BindingRegistry,
    /// Pending timer callbacks.
    pub timers: VecDeque<PendingTimer>,
    /// Controller records keyed by anchor element ID.
    pub tips: HashMap<u64, TipState>,
    /// The single mounted-popup slot.
    pub slot: DisplaySlot,
    /// The engine's notion of current time; advanced by `process_timers`.
    pub now: Instant,
    next_timer_id: u64,
}

impl State {
    pub fn new() -> Self {
        Self {
            document: Document::new(),
            bindings: BindingRegistry::new(),
            timers: VecDeque::new(),
            tips: HashMap::new(),
            slot: DisplaySlot::new(),
            now: Instant::now(),
            next_timer_id: 1,
        }
    }

    /// Schedule a timer `delay` from the engine's current time.
    pub fn schedule_timer(
        &mut self,
        delay: Duration,
        action: TimerAction,
        interval: Option<Duration>,
    ) -> u64 {
        let id = self.next_timer_id;
        self.next_timer_id += 1;
        self.timers.push_back(PendingTimer {
            id,
            fire_at: self.now + delay,
            action,
            interval,
            cancelled: false,
        });
        id
    }

    /// Cancel a timer by ID.
    pub fn cancel_timer(&mut self, timer_id: u64) {
        for timer in self.timers.iter_mut() {
            if timer.id == timer_id {
                timer.cancelled = true;
                break;
            }
        }
    }

    /// Process any timers due at `now`, advancing the engine clock.
    /// Returns the number of callbacks invoked.
    pub fn process_timers(&mut self, now: Instant) -> usize {
        self.now = now;
        let mut fired = 0;

        let mut i = 0;
        while i < self.timers.len() {
            if self.timers[i].cancelled {
                self.timers.remove(i);
                continue;
            }
            if self.timers[i].fire_at <= now {
                let Some(mut timer) = self.timers.remove(i) else {
                    break;
                };
                fired += 1;
                let repeat = self.run_action(timer.action);
                if repeat {
                    if let Some(interval) = timer.interval {
                        // Reinsert right away so a cancellation from a later
                        // action in this same pump still finds the timer.
                        timer.fire_at = now + interval;
                        self.timers.push_back(timer);
                    }
                }
                continue;
            }
            i += 1;
        }

        fired
    }

    /// Run a timer action. Returns whether a repeating timer should stay
    /// scheduled.
    fn run_action(&mut self, action: TimerAction) -> bool {
        match action {
            TimerAction::DeferredShow(anchor_id) => {
                binder::fire_deferred_show(self, anchor_id);
                false
            }
            TimerAction::DeferredHide(anchor_id) => {
                binder::fire_deferred_hide(self, anchor_id);
                false
            }
            TimerAction::FadeTick(anchor_id) => controller::fade_tick(self, anchor_id),
        }
    }

    /// Check if there are any pending timers.
    pub fn has_pending_timers(&self) -> bool {
        self.timers.iter().any(|t| !t.cancelled)
    }

    /// Earliest deadline among pending timers.
    pub fn next_timer_deadline(&self) -> Option<Instant> {
        self.timers.iter().filter(|t| !t.cancelled).map(|t| t.fire_at).min()
    }
}

impl Default for State {
    fn default() -> Self {
        Self::new()
    }
}
