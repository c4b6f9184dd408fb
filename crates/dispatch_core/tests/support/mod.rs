#![allow(dead_code)]

use bevy_ecs::prelude::World;
use dispatch_core::clock::{EventKind, EventSubject, SimulationClock};
use dispatch_core::runner::{run_next_event, run_until_empty, simulation_schedule};

pub const MAX_STEPS: usize = 10_000;

/// Schedule an event on the world's clock.
pub fn schedule(world: &mut World, timestamp: u64, kind: EventKind, subject: EventSubject) {
    world
        .resource_mut::<SimulationClock>()
        .schedule_at(timestamp, kind, Some(subject));
}

/// Run the default schedule until the event queue drains. Returns the number
/// of events processed.
pub fn run_all(world: &mut World) -> usize {
    let mut schedule = simulation_schedule();
    run_until_empty(world, &mut schedule, MAX_STEPS)
}

/// Process exactly one event.
pub fn run_one(world: &mut World) -> bool {
    let mut schedule = simulation_schedule();
    run_next_event(world, &mut schedule)
}
