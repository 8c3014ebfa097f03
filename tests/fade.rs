//! Fade state machine: tick counts, monotonicity, cancellation races.

mod common;

use std::time::Duration;

use common::*;
use tipsy::tooltip::{FADE_TICK_INTERVAL, FadeState, Options, controller};

fn fade_options() -> Options {
    Options { fade: true, ..Options::default() }
}

fn pending_timers(state: &tipsy::State) -> usize {
    state.timers.iter().filter(|t| !t.cancelled).count()
}

#[test]
fn test_fade_in_is_exactly_n_ticks_at_fixed_interval() {
    let (mut state, anchor) = state_with_anchor("Hello");
    attach_manual(&mut state, "#save", fade_options());

    let start = state.now;
    controller::show(&mut state, anchor);
    assert_eq!(tip_opacity(&state, anchor), 0.0);

    // Configured opacity 0.8 gives N = 8 ticks, 30ms apart, ending at 0.8.
    let mut opacities = Vec::new();
    let mut tick = 0u32;
    while let Some(deadline) = state.next_timer_deadline() {
        tick += 1;
        assert_eq!(deadline, start + FADE_TICK_INTERVAL * tick);
        state.process_timers(deadline);
        opacities.push(tip_opacity(&state, anchor));
    }

    assert_eq!(opacities, vec![0.1, 0.2, 0.3, 0.4, 0.5, 0.6, 0.7, 0.8]);
    assert_eq!(state.tips[&anchor].fade, FadeState::Idle);
    assert_eq!(mounted_tips(&state).len(), 1);
}

#[test]
fn test_fade_in_monotone_and_bounded() {
    let (mut state, anchor) = state_with_anchor("Hello");
    attach_manual(&mut state, "#save", Options { opacity: 0.5, ..fade_options() });

    controller::show(&mut state, anchor);
    let mut previous = 0.0;
    while run_next_timers(&mut state) {
        let opacity = tip_opacity(&state, anchor);
        assert!(opacity >= previous);
        assert!(opacity <= 0.5);
        previous = opacity;
    }
    assert_eq!(previous, 0.5);
}

#[test]
fn test_fade_out_ramps_down_and_unmounts() {
    let (mut state, anchor) = state_with_anchor("Hello");
    attach_manual(&mut state, "#save", fade_options());

    controller::show(&mut state, anchor);
    drain_timers(&mut state);
    assert_eq!(tip_opacity(&state, anchor), 0.8);

    controller::hide(&mut state, anchor);
    let mut opacities = Vec::new();
    while run_next_timers(&mut state) {
        opacities.push(tip_opacity(&state, anchor));
    }

    assert_eq!(opacities, vec![0.7, 0.6, 0.5, 0.4, 0.3, 0.2, 0.1, 0.0]);
    assert!(mounted_tips(&state).is_empty());
    assert_eq!(state.tips[&anchor].fade, FadeState::Idle);
}

#[test]
fn test_hide_right_after_show_leaves_no_dangling_fade_in() {
    let (mut state, anchor) = state_with_anchor("Hello");
    attach_manual(&mut state, "#save", fade_options());

    controller::show(&mut state, anchor);
    controller::hide(&mut state, anchor);

    // The fade-in ticker was cancelled; only the fade-out ticker survives.
    assert_eq!(pending_timers(&state), 1);
    assert!(matches!(state.tips[&anchor].fade, FadeState::FadingOut { .. }));

    drain_timers(&mut state);
    assert!(mounted_tips(&state).is_empty());
    assert_eq!(state.tips[&anchor].fade, FadeState::Idle);
    assert!(!state.has_pending_timers());
}

#[test]
fn test_rapid_show_hide_show_keeps_one_ticker() {
    let (mut state, anchor) = state_with_anchor("Hello");
    attach_manual(&mut state, "#save", fade_options());

    controller::show(&mut state, anchor);
    controller::hide(&mut state, anchor);
    controller::show(&mut state, anchor);
    assert_eq!(pending_timers(&state), 1);

    drain_timers(&mut state);
    assert_eq!(mounted_tips(&state).len(), 1);
    assert_eq!(tip_opacity(&state, anchor), 0.8);
}

#[test]
fn test_show_mid_fade_restarts_from_zero() {
    let (mut state, anchor) = state_with_anchor("Hello");
    attach_manual(&mut state, "#save", fade_options());

    controller::show(&mut state, anchor);
    for _ in 0..3 {
        run_next_timers(&mut state);
    }
    assert_eq!(tip_opacity(&state, anchor), 0.3);

    controller::show(&mut state, anchor);
    assert_eq!(tip_opacity(&state, anchor), 0.0);
    assert_eq!(pending_timers(&state), 1);

    drain_timers(&mut state);
    assert_eq!(tip_opacity(&state, anchor), 0.8);
    assert_eq!(mounted_tips(&state).len(), 1);
}

#[test]
fn test_hide_mid_fade_out_restarts_from_current_opacity() {
    let (mut state, anchor) = state_with_anchor("Hello");
    attach_manual(&mut state, "#save", fade_options());

    controller::show(&mut state, anchor);
    drain_timers(&mut state);

    controller::hide(&mut state, anchor);
    for _ in 0..4 {
        run_next_timers(&mut state);
    }
    assert_eq!(tip_opacity(&state, anchor), 0.4);

    // A second hide restarts the ramp from where it is, without doubling
    // the ticker or re-removing the element.
    controller::hide(&mut state, anchor);
    assert_eq!(pending_timers(&state), 1);
    drain_timers(&mut state);
    assert!(mounted_tips(&state).is_empty());
}

#[test]
fn test_without_fade_no_timers_run() {
    let (mut state, anchor) = state_with_anchor("Hello");
    attach_manual(&mut state, "#save", Options::default());

    controller::show(&mut state, anchor);
    assert!(!state.has_pending_timers());
    assert_eq!(tip_opacity(&state, anchor), 0.8);

    controller::hide(&mut state, anchor);
    assert!(!state.has_pending_timers());
    assert!(mounted_tips(&state).is_empty());
}

#[test]
fn test_interval_is_thirty_millis() {
    assert_eq!(FADE_TICK_INTERVAL, Duration::from_millis(30));
}
