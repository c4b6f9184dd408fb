use bevy_ecs::prelude::{Query, Res, ResMut};

use crate::activity::{ActivityCategory, ActivityKind, ActivityLog};
use crate::clock::{CurrentEvent, EventKind, EventSubject, SimulationClock};
use crate::dispatch::Dispatcher;
use crate::ecs::{Driver, Rider};
use crate::matching::RiderCandidate;

/// Handles a driver asking for a rider.
///
/// The driver is registered on first contact, then the oldest still-waiting
/// rider (if any) is assigned: the driver starts driving to their origin and
/// a pickup is scheduled for the arrival tick.
pub fn driver_request_system(
    event: Res<CurrentEvent>,
    mut clock: ResMut<SimulationClock>,
    mut dispatcher: ResMut<Dispatcher>,
    mut log: ResMut<ActivityLog>,
    riders: Query<&Rider>,
    mut drivers: Query<&mut Driver>,
) {
    if event.0.kind != EventKind::DriverRequest {
        return;
    }
    let Some(EventSubject::Driver(driver_entity)) = event.0.subject else {
        return;
    };
    {
        let Ok(driver) = drivers.get(driver_entity) else {
            return;
        };
        log.notify(
            clock.now(),
            ActivityCategory::Driver,
            ActivityKind::Request,
            &driver.id,
            driver.location,
        );
    }

    // Waiting-list view in arrival order.
    let waiting: Vec<RiderCandidate> = dispatcher
        .waiting_riders()
        .iter()
        .filter_map(|&entity| {
            riders.get(entity).ok().map(|rider| RiderCandidate {
                entity,
                status: rider.status,
            })
        })
        .collect();

    let Some(rider_entity) = dispatcher.request_rider(driver_entity, &waiting) else {
        return;
    };
    let Ok(rider) = riders.get(rider_entity) else {
        return;
    };
    let origin = rider.origin;

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
