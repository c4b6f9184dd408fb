//! Simulation runner: advances the clock and routes events into the ECS.
//!
//! Clock progression happens here, outside systems. Each step pops the next
//! event from [`SimulationClock`], publishes it as [`CurrentEvent`], then
//! runs the schedule; systems are gated on the event kind so only the
//! matching handler does work.

use bevy_ecs::prelude::{Res, Schedule, World};
use bevy_ecs::schedule::IntoSystemConfigs;

use crate::clock::{CurrentEvent, EventKind, SimulationClock};
use crate::scenario::SimulationEndTime;
use crate::systems::{
    driver_request::driver_request_system, dropoff::dropoff_system, pickup::pickup_system,
    rider_cancel::rider_cancel_system, rider_request::rider_request_system,
};

// Condition functions for each event kind
fn is_rider_request(event: Option<Res<CurrentEvent>>) -> bool {
    event
        .map(|e| e.0.kind == EventKind::RiderRequest)
        .unwrap_or(false)
}

fn is_driver_request(event: Option<Res<CurrentEvent>>) -> bool {
    event
        .map(|e| e.0.kind == EventKind::DriverRequest)
        .unwrap_or(false)
}

fn is_rider_cancel(event: Option<Res<CurrentEvent>>) -> bool {
    event
        .map(|e| e.0.kind == EventKind::RiderCancel)
        .unwrap_or(false)
}

fn is_pickup(event: Option<Res<CurrentEvent>>) -> bool {
    event
        .map(|e| e.0.kind == EventKind::Pickup)
        .unwrap_or(false)
}

fn is_dropoff(event: Option<Res<CurrentEvent>>) -> bool {
    event
        .map(|e| e.0.kind == EventKind::Dropoff)
        .unwrap_or(false)
}

/// Runs one simulation step: pops the next event, publishes it as
/// [`CurrentEvent`], then runs the schedule. Returns `true` if an event was
/// processed, `false` if the clock was empty or the next event is at or past
/// [`SimulationEndTime`] (when that resource is present).
pub fn run_next_event(world: &mut World, schedule: &mut Schedule) -> bool {
    let stop_at = world.get_resource::<SimulationEndTime>().map(|end| end.0);
    let next_ts = world
        .get_resource::<SimulationClock>()
        .and_then(|clock| clock.next_event_time());
    if let (Some(end), Some(ts)) = (stop_at, next_ts) {
        if ts >= end {
            return false;
        }
    }

    let event = match world.resource_mut::<SimulationClock>().pop_next() {
        Some(event) => event,
        None => return false,
    };
    world.insert_resource(CurrentEvent(event));

    schedule.run(world);
    true
}

/// Runs simulation steps until the event queue is empty or `max_steps` is
/// reached. Returns the number of steps executed.
pub fn run_until_empty(world: &mut World, schedule: &mut Schedule, max_steps: usize) -> usize {
    let mut steps = 0;
    while steps < max_steps && run_next_event(world, schedule) {
        steps += 1;
    }
    steps
}

/// Builds the default simulation schedule: one handler per event kind, each
/// gated on the current event so the rest stay idle.
pub fn simulation_schedule() -> Schedule {
    let mut schedule = Schedule::default();
    schedule.add_systems((
        rider_request_system.run_if(is_rider_request),
        driver_request_system.run_if(is_driver_request),
        rider_cancel_system.run_if(is_rider_cancel),
        pickup_system.run_if(is_pickup),
        dropoff_system.run_if(is_dropoff),
    ));
    schedule
}
