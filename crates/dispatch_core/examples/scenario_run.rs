//! Run the default 50 riders / 10 drivers scenario and print the report.
//!
//! Run with: cargo run -p dispatch_core --example scenario_run

use bevy_ecs::prelude::World;
use dispatch_core::activity::ActivityLog;
use dispatch_core::error::DispatchResult;
use dispatch_core::runner::{run_until_empty, simulation_schedule};
use dispatch_core::scenario::{build_scenario, ScenarioParams};

fn main() -> DispatchResult<()> {
    const NUM_RIDERS: usize = 50;
    const NUM_DRIVERS: usize = 10;

    let mut world = World::new();
    build_scenario(
        &mut world,
        ScenarioParams::default()
            .with_counts(NUM_RIDERS, NUM_DRIVERS)
            .with_grid(50, 50)
            .with_seed(123),
    )?;

    let mut schedule = simulation_schedule();
    let max_steps = 100_000;
    let steps = run_until_empty(&mut world, &mut schedule, max_steps);

    let clock = world.resource::<dispatch_core::clock::SimulationClock>();
    let log = world.resource::<ActivityLog>();
    let report = log.report();

    println!(
        "--- Scenario run ({} riders, {} drivers, seed 123) ---",
        NUM_RIDERS, NUM_DRIVERS
    );
    println!("Steps executed: {}", steps);
    println!("Simulation time: {} ticks", clock.now());
    println!(
        "Riders seen: {}, drivers seen: {}",
        log.rider_count(),
        log.driver_count()
    );
    println!("Average rider wait time:       {:.2}", report.rider_wait_time);
    println!("Average driver total distance: {:.2}", report.driver_total_distance);
    println!("Average driver ride distance:  {:.2}", report.driver_ride_distance);

    Ok(())
}
