//! Test helpers for common test setup and utilities.
//!
//! Shared across unit tests, integration tests, and benches to reduce
//! fixture duplication.

use bevy_ecs::prelude::{Entity, World};

use crate::activity::ActivityLog;
use crate::clock::SimulationClock;
use crate::dispatch::Dispatcher;
use crate::ecs::{Driver, Rider};
use crate::geometry::Location;
use crate::scenario::create_nearest_matching;

/// Create a world with every resource the dispatch systems expect and no
/// actors spawned.
pub fn create_test_world() -> World {
    let mut world = World::new();
    world.insert_resource(SimulationClock::default());
    world.insert_resource(Dispatcher::default());
    world.insert_resource(ActivityLog::default());
    world.insert_resource(create_nearest_matching());
    world
}

/// Spawn an idle driver fixture.
///
/// # Panics
///
/// Panics on a zero speed; test fixtures are expected to be valid.
pub fn spawn_driver(world: &mut World, id: &str, location: Location, speed: u32) -> Entity {
    let driver = Driver::new(id, location, speed).expect("fixture speed should be valid");
    world.spawn(driver).id()
}

/// Spawn a waiting rider fixture.
pub fn spawn_rider(
    world: &mut World,
    id: &str,
    origin: Location,
    destination: Location,
    patience: u64,
) -> Entity {
    world
        .spawn(Rider::new(id, origin, destination, patience))
        .id()
}
