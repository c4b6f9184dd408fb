use bevy_ecs::prelude::World;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::activity::ActivityLog;
use crate::clock::{EventKind, EventSubject, SimulationClock};
use crate::dispatch::Dispatcher;
use crate::ecs::{Driver, Rider};
use crate::error::{DispatchError, DispatchResult};
use crate::geometry::Location;
use crate::matching::{MatchingStrategyResource, NearestIdleDriver};
use crate::scenario::params::{ScenarioParams, SimulationEndTime};

pub fn create_nearest_matching() -> MatchingStrategyResource {
    MatchingStrategyResource::new(Box::new(NearestIdleDriver))
}

/// Insert the resources every simulation needs, with no actors spawned.
/// Timetable-driven runs call this and then [`super::apply_timetable`].
pub fn insert_core_resources(world: &mut World, end_time: Option<u64>) {
    world.insert_resource(SimulationClock::default());
    world.insert_resource(Dispatcher::default());
    world.insert_resource(ActivityLog::default());
    world.insert_resource(create_nearest_matching());
    if let Some(end) = end_time {
        world.insert_resource(SimulationEndTime(end));
    }
}

/// Insert core resources and populate a seeded random scenario: drivers at
/// random cells making their first request across `driver_spread`, riders
/// requesting across `request_window`.
pub fn build_scenario(world: &mut World, params: ScenarioParams) -> DispatchResult<()> {
    validate(&params)?;
    insert_core_resources(world, params.simulation_end_time);

    let mut rng = match params.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    for index in 0..params.num_drivers {
        let location = random_location(&mut rng, &params);
        let speed = rng.gen_range(params.min_speed..=params.max_speed);
        let driver = Driver::new(format!("driver-{index}"), location, speed)?;
        let entity = world.spawn(driver).id();
        let at = rng.gen_range(0..=params.driver_spread);
        world.resource_mut::<SimulationClock>().schedule_at(
            at,
            EventKind::DriverRequest,
            Some(EventSubject::Driver(entity)),
        );
    }

    for index in 0..params.num_riders {
        let origin = random_location(&mut rng, &params);
        let destination = random_location(&mut rng, &params);
        let patience = rng.gen_range(params.min_patience..=params.max_patience);
        let rider = Rider::new(format!("rider-{index}"), origin, destination, patience);
        let entity = world.spawn(rider).id();
        let at = rng.gen_range(0..=params.request_window);
        world.resource_mut::<SimulationClock>().schedule_at(
            at,
            EventKind::RiderRequest,
            Some(EventSubject::Rider(entity)),
        );
    }

    Ok(())
}

fn validate(params: &ScenarioParams) -> DispatchResult<()> {
    if params.grid_rows <= 0 || params.grid_columns <= 0 {
        return Err(DispatchError::Config(format!(
            "grid must be non-empty, got {}x{}",
            params.grid_rows, params.grid_columns
        )));
    }
    if params.min_speed == 0 || params.min_speed > params.max_speed {
        return Err(DispatchError::Config(format!(
            "speed range {}..={} must start at 1 or above",
            params.min_speed, params.max_speed
        )));
    }
    if params.min_patience > params.max_patience {
        return Err(DispatchError::Config(format!(
            "patience range {}..={} is empty",
            params.min_patience, params.max_patience
        )));
    }
    Ok(())
}

fn random_location(rng: &mut StdRng, params: &ScenarioParams) -> Location {
    Location::new(
        rng.gen_range(0..params.grid_rows),
        rng.gen_range(0..params.grid_columns),
    )
}
