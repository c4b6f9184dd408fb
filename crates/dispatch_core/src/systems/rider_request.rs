use bevy_ecs::prelude::{Query, Res, ResMut};

use crate::activity::{ActivityCategory, ActivityKind, ActivityLog};
use crate::clock::{CurrentEvent, EventKind, EventSubject, SimulationClock};
use crate::dispatch::Dispatcher;
use crate::ecs::{Driver, Rider};
use crate::matching::{DriverCandidate, MatchingStrategyResource};

/// Handles a rider asking for a driver.
///
/// On a match the chosen driver starts driving to the rider's origin and a
/// pickup is scheduled for the arrival tick. Whether or not a driver was
/// found, a cancellation fires once the rider's patience runs out; it is a
/// no-op if the rider was picked up first.
pub fn rider_request_system(
    event: Res<CurrentEvent>,
    mut clock: ResMut<SimulationClock>,
    mut dispatcher: ResMut<Dispatcher>,
    strategy: Res<MatchingStrategyResource>,
    mut log: ResMut<ActivityLog>,
    riders: Query<&Rider>,
    mut drivers: Query<&mut Driver>,
) {
    if event.0.kind != EventKind::RiderRequest {
        return;
    }
    let Some(EventSubject::Rider(rider_entity)) = event.0.subject else {
        return;
    };
    let Ok(rider) = riders.get(rider_entity) else {
        return;
    };

    log.notify(
        clock.now(),
        ActivityCategory::Rider,
        ActivityKind::Request,
        &rider.id,
        rider.origin,
    );

    let origin = rider.origin;
    let patience = rider.patience;

    // Registry view in registration order, so first-seen tie-breaks hold.
    let candidates: Vec<DriverCandidate> = dispatcher
        .registered_drivers()
        .iter()
        .filter_map(|&entity| {
            drivers.get(entity).ok().map(|driver| DriverCandidate {
                entity,
                location: driver.location,
                speed: driver.speed,
                is_idle: driver.is_idle,
            })
        })
        .collect();

    let matched = dispatcher.request_driver(rider_entity, origin, &candidates, &**strategy);
    if let Some(driver_entity) = matched {
        if let Ok(mut driver) = drivers.get_mut(driver_entity) {
            let eta = driver.start_drive(origin);
            clock.schedule_in(
                eta,
                EventKind::Pickup,
                Some(EventSubject::Ride {
                    rider: rider_entity,
                    driver: driver_entity,
                }),
            );
        }
    }

    clock.schedule_in(
        patience,
        EventKind::RiderCancel,
        Some(EventSubject::Rider(rider_entity)),
    );
}
