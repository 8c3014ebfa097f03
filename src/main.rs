//! Tipsy demo: build a small document, attach tooltips, simulate hover,
//! and dump the resulting tree. Run with `RUST_LOG=debug` for engine
//! tracing.

use std::rc::Rc;
use std::time::Duration;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use tipsy::dom::Element;
use tipsy::event::EventKind;
use tipsy::tooltip::{Dynamic, Gravity, Options};
use tipsy::{State, attach, dispatch};

#[derive(Parser)]
#[command(name = "tipsy-demo")]
#[command(about = "Tooltip engine demo: attach, hover, dump the document")]
struct Cli {
    /// Gravity code (n, s, e, w, or two-character forms like ne, sw)
    #[arg(long, default_value = "n")]
    gravity: String,

    /// Animate the popup in fixed opacity steps
    #[arg(long)]
    fade: bool,

    /// Hover-in delay in milliseconds
    #[arg(long, default_value_t = 0)]
    delay_in: u64,

    /// Hover-out delay in milliseconds
    #[arg(long, default_value_t = 0)]
    delay_out: u64,

    /// Final popup opacity
    #[arg(long, default_value_t = 0.8)]
    opacity: f32,

    /// Gap between the anchor edge and the popup
    #[arg(long, default_value_t = 0.0)]
    offset: f32,

    /// Treat titles as raw markup
    #[arg(long)]
    html: bool,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    let mut state = State::new();
    let save = button(&mut state, "save", "Save the document", 40.0, 40.0);
    let open = button(&mut state, "open", "Open a document", 40.0, 80.0);

    let options = Options {
        gravity: Dynamic::Literal(Gravity::parse_or_default(&cli.gravity)),
        fade: cli.fade,
        delay_in: Duration::from_millis(cli.delay_in),
        delay_out: Duration::from_millis(cli.delay_out),
        opacity: cli.opacity,
        offset: cli.offset,
        html: cli.html,
        ..Options::default()
    };
    attach(&mut state, "button", Rc::new(options))?;

    println!("-- initial tree --\n{}", state.document.dump_markup());

    dispatch(&mut state, save, EventKind::PointerEnter);
    pump(&mut state);
    println!("-- after hovering #save --\n{}", state.document.dump_markup());

    dispatch(&mut state, save, EventKind::PointerLeave);
    dispatch(&mut state, open, EventKind::PointerEnter);
    pump(&mut state);
    println!("-- after moving to #open --\n{}", state.document.dump_markup());

    Ok(())
}

fn button(state: &mut State, name: &str, title: &str, left: f32, top: f32) -> u64 {
    let mut element = Element::new("button");
    element.set_attribute("id", name);
    element.set_attribute("title", title);
    element.set_position(left, top);
    element.set_size(90.0, 24.0);
    let id = state.document.create(element);
    let root = state.document.root_id();
    let _ = state.document.append(root, id);
    id
}

/// Drain the timer queue in deadline order (deferred triggers, fade ticks).
fn pump(state: &mut State) {
    while let Some(deadline) = state.next_timer_deadline() {
        state.process_timers(deadline);
    }
}
