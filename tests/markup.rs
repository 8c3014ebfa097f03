//! Rendered markup contract: container, arrow and content classes.

mod common;

use common::*;
use tipsy::tooltip::{Dynamic, Options, controller};

#[test]
fn test_shown_popup_markup() {
    let (mut state, anchor) = state_with_anchor("Save");
    attach_manual(&mut state, "#save", Options { offset: 5.0, ..Options::default() });

    controller::show(&mut state, anchor);

    let dump = state.document.dump_markup();
    insta::assert_snapshot!(dump.trim_end(), @r#"
    <body>
      <div class="tipsy tipsy-n" data-tipsy-pointee="2" style="top: 125px; left: 206px; opacity: 0.8">
        <div class="tipsy-arrow tipsy-arrow-n"></div>
        <div class="tipsy-inner">Save</div>
      </div>
      <button id="save" original-title="Save" style="top: 100px; left: 200px"></button>
    </body>
    "#);
}

#[test]
fn test_dynamic_gravity_resets_orientation_classes() {
    let (mut state, anchor) = state_with_anchor("Save");
    let options = Options {
        gravity: Dynamic::Computed(Box::new(|element| {
            // Anchors flagged "flipped" get the opposite edge.
            if element.has_class("flipped") {
                tipsy::tooltip::Gravity::parse_or_default("s")
            } else {
                tipsy::tooltip::Gravity::parse_or_default("n")
            }
        })),
        ..Options::default()
    };
    attach_manual(&mut state, "#save", options);

    controller::show(&mut state, anchor);
    let tip_id = tip_element(&state, anchor);
    assert!(state.document.get(tip_id).unwrap().has_class("tipsy-n"));

    state.document.get_mut(anchor).unwrap().add_class("flipped");
    controller::show(&mut state, anchor);
    let tip = state.document.get(tip_id).unwrap();
    assert!(tip.has_class("tipsy-s"));
    assert!(!tip.has_class("tipsy-n"));
}

#[test]
fn test_extra_class_option() {
    let (mut state, anchor) = state_with_anchor("Save");
    let options = Options {
        class_name: Some(Dynamic::Literal("warning".to_string())),
        ..Options::default()
    };
    attach_manual(&mut state, "#save", options);

    controller::show(&mut state, anchor);
    let tip = state.document.get(tip_element(&state, anchor)).unwrap();
    assert!(tip.has_class("tipsy"));
    assert!(tip.has_class("warning"));
}

#[test]
fn test_computed_extra_class_gets_anchor() {
    let (mut state, anchor) = state_with_anchor("Save");
    let options = Options {
        class_name: Some(Dynamic::Computed(Box::new(|element| {
            format!("tip-for-{}", element.attribute("id").unwrap_or("unknown"))
        }))),
        ..Options::default()
    };
    attach_manual(&mut state, "#save", options);

    controller::show(&mut state, anchor);
    let tip = state.document.get(tip_element(&state, anchor)).unwrap();
    assert!(tip.has_class("tip-for-save"));
}
