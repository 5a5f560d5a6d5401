//! Traffic Light State Machine
//!
//! This example demonstrates a simple cyclic state machine.
//!
//! Key concepts:
//! - Cyclic state transitions (states repeat)
//! - States generated with `state_enum!`
//! - Rejected moves leave the light where it was
//! - Walking back through history
//!
//! Run with: RUST_LOG=debug cargo run --example traffic_light

use switchyard::builder::MachineBuilder;
use switchyard::state_enum;
use tracing_subscriber::EnvFilter;

state_enum! {
    enum TrafficLight {
        Red,
        Yellow,
        Green,
    }
    sentinel: Off
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    println!("=== Traffic Light State Machine ===\n");

    let mut light = MachineBuilder::new()
        .transition(TrafficLight::Red, TrafficLight::Green)
        .transition(TrafficLight::Green, TrafficLight::Yellow)
        .transition(TrafficLight::Yellow, TrafficLight::Red)
        .initial(TrafficLight::Red)
        .build()
        .expect("traffic light topology is valid");

    println!("Initial state: {:?}\n", light.state());

    println!("Two full cycles:");
    for next in [TrafficLight::Green, TrafficLight::Yellow, TrafficLight::Red]
        .iter()
        .cycle()
        .take(6)
    {
        let from = *light.state();
        match light.go_to(next) {
            Ok(()) => println!("  {from:?} -> {next:?}"),
            Err(err) => println!("  {from:?} -> {next:?} rejected: {err}"),
        }
    }

    println!("\nSkipping yellow is not allowed:");
    light.go_to(&TrafficLight::Green).expect("red -> green");
    if let Err(err) = light.go_to(&TrafficLight::Red) {
        println!("  {err}");
    }
    println!("  Still {:?}", light.state());

    println!("\nBacking up through history:");
    while light.go_back().is_ok() {
        println!("  back to {:?}", light.state());
    }
    println!("  {} entries left in history", light.history().len());

    println!("\n=== Example Complete ===");
}
