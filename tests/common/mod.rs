//! Shared test helpers.

use std::rc::Rc;

use tipsy::dom::Element;
use tipsy::tooltip::{Options, Trigger};
use tipsy::{State, attach};

/// Create a state with one mounted `button#save` anchor at the geometry the
/// placement scenarios use (left 200, top 100, 50x20).
#[allow(dead_code)]
pub fn state_with_anchor(title: &str) -> (State, u64) {
    let mut state = State::new();
    let id = mount_anchor(&mut state, "save", title, (200.0, 100.0, 50.0, 20.0));
    (state, id)
}

/// Mount a `button` anchor with an `id` attribute and optional title.
pub fn mount_anchor(state: &mut State, name: &str, title: &str, rect: (f32, f32, f32, f32)) -> u64 {
    let (left, top, width, height) = rect;
    let mut element = Element::new("button");
    element.set_attribute("id", name);
    if !title.is_empty() {
        element.set_attribute("title", title);
    }
    element.set_position(left, top);
    element.set_size(width, height);
    let id = state.document.create(element);
    let root = state.document.root_id();
    state.document.append(root, id).unwrap();
    id
}

/// Attach with manual trigger so tests drive the controller directly.
#[allow(dead_code)]
pub fn attach_manual(state: &mut State, selector: &str, mut options: Options) -> Vec<u64> {
    options.trigger = Trigger::Manual;
    attach(state, selector, Rc::new(options)).unwrap()
}

/// Run the next due timer batch, advancing the clock to its deadline.
/// Returns false when no timers are pending.
#[allow(dead_code)]
pub fn run_next_timers(state: &mut State) -> bool {
    match state.next_timer_deadline() {
        Some(deadline) => {
            state.process_timers(deadline);
            true
        }
        None => false,
    }
}

/// Drain the whole timer queue in deadline order.
#[allow(dead_code)]
pub fn drain_timers(state: &mut State) {
    while run_next_timers(state) {}
}

/// IDs of mounted popup elements.
#[allow(dead_code)]
pub fn mounted_tips(state: &State) -> Vec<u64> {
    state.document.select(".tipsy").unwrap()
}

/// The popup element cached for an anchor.
#[allow(dead_code)]
pub fn tip_element(state: &State, anchor_id: u64) -> u64 {
    state.tips[&anchor_id].tip_id.expect("popup not built yet")
}

/// Current opacity of an anchor's popup element.
#[allow(dead_code)]
pub fn tip_opacity(state: &State, anchor_id: u64) -> f32 {
    let tip_id = tip_element(state, anchor_id);
    state.document.get(tip_id).unwrap().style.opacity
}
