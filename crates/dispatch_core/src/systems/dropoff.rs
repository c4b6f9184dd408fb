use bevy_ecs::prelude::{Query, Res, ResMut};

use crate::activity::{ActivityCategory, ActivityKind, ActivityLog};
use crate::clock::{CurrentEvent, EventKind, EventSubject, SimulationClock};
use crate::ecs::{Driver, Rider};

/// Handles a driver arriving at a rider's destination.
///
/// The ride ends, both sides are logged, and the driver immediately asks the
/// dispatcher for a new rider.
pub fn dropoff_system(
    event: Res<CurrentEvent>,
    mut clock: ResMut<SimulationClock>,
    mut log: ResMut<ActivityLog>,
    riders: Query<&Rider>,
    mut drivers: Query<&mut Driver>,
) {
    if event.0.kind != EventKind::Dropoff {
        return;
    }
    let Some(EventSubject::Ride {
        rider: rider_entity,
        driver: driver_entity,
    }) = event.0.subject
    else {
        return;
    };
    let Ok(mut driver) = drivers.get_mut(driver_entity) else {
        return;
    };

    let arrived = match driver.end_ride() {
        Ok(location) => location,
        Err(_) => {
            debug_assert!(false, "dropoff scheduled for a driver with no active ride");
            return;
        }
    };
    log.notify(
        clock.now(),
        ActivityCategory::Driver,
        ActivityKind::Dropoff,
        &driver.id,
        arrived,
    );
    if let Ok(rider) = riders.get(rider_entity) {
        log.notify(
            clock.now(),
            ActivityCategory::Rider,
            ActivityKind::Dropoff,
            &rider.id,
            arrived,
        );
    }

    clock.schedule_in(
        0,
        EventKind::DriverRequest,
        Some(EventSubject::Driver(driver_entity)),
    );
}
