//! StopWatch State Machine
//!
//! This demo loads the stopwatch graph from a TOML description and drives
//! it with a few actions.
//!
//! Key concepts:
//! - Declarative graph description
//! - Lifecycle notifications observed on the bus
//! - A guard vetoing a transition while exiting
//! - A listener requesting a follow-up action
//!
//! Run with: RUST_LOG=statebus=debug cargo run --example stopwatch

use statebus::builder::{FsmDescription, FsmInjector};
use statebus::bus::{EventBus, Guard, CHANGED};
use statebus::machine::TransitionOutcome;
use tracing_subscriber::EnvFilter;

const DESCRIPTION: &str = include_str!("stopwatch.toml");

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    println!("=== StopWatch State Machine ===\n");

    let injector = FsmInjector::new(FsmDescription::from_toml(DESCRIPTION)?);

    let mut bus: EventBus<u64> = EventBus::new();
    bus.on(CHANGED, |note, _| {
        println!("  now in {}", note.kind().unwrap_or("?"));
    });
    bus.on("StopWatch/notes/freezeDisplay", |note, _| {
        println!("  display frozen at {:?} ms", note.payload());
    });
    // Refuse to stop a stopwatch that has been running for less than a second
    bus.guard(
        "StopWatch/notes/leavingRunning",
        Guard::new(|note| {
            let stopping = note.kind() == Some("StopWatch/states/stopped");
            !stopping || note.payload().is_some_and(|ms| *ms >= 1000)
        }),
    );
    // Stop automatically once a split is taken past one minute
    bus.on("StopWatch/notes/freezeDisplay", |note, reaction| {
        if note.payload().is_some_and(|ms| *ms > 60_000) {
            reaction.send_action("StopWatch/actions/stop", note.payload().copied());
        }
    });

    let mut machine = injector.inject_checked(bus)?;
    println!("Activating:");
    machine.activate()?;

    let script: [(&str, Option<u64>); 6] = [
        ("StopWatch/actions/start", None),
        ("StopWatch/actions/stop", Some(400)),
        ("StopWatch/actions/split", Some(1_500)),
        ("StopWatch/actions/unsplit", None),
        ("StopWatch/actions/split", Some(75_000)),
        ("StopWatch/actions/reset", None),
    ];

    for (action, payload) in script {
        println!("\n{action} {payload:?}:");
        match machine.on_action(action, payload)? {
            TransitionOutcome::Ignored => println!("  ignored"),
            TransitionOutcome::CanceledOnExit { to, .. } => {
                println!("  vetoed on the way to {to}");
            }
            TransitionOutcome::CanceledOnEnter { to, .. } => println!("  {to} refused entry"),
            TransitionOutcome::Changed { .. } => {}
        }
    }

    println!("\nVisited: {:?}", machine.history().get_path());
    println!("\n=== Demo Complete ===");
    Ok(())
}
