use bevy_ecs::prelude::{Query, Res, ResMut};

use crate::activity::{ActivityCategory, ActivityKind, ActivityLog};
use crate::clock::{CurrentEvent, EventKind, EventSubject, SimulationClock};
use crate::ecs::{Driver, Rider, RiderStatus};

/// Handles a driver arriving at a rider's origin.
///
/// If the rider is still waiting the ride starts and a dropoff is scheduled.
/// If the rider cancelled in the meantime (or another driver got there
/// first), the driver immediately asks for a new rider.
pub fn pickup_system(
    event: Res<CurrentEvent>,
    mut clock: ResMut<SimulationClock>,
    mut log: ResMut<ActivityLog>,
    mut riders: Query<&mut Rider>,
    mut drivers: Query<&mut Driver>,
) {
    if event.0.kind != EventKind::Pickup {
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

    let arrived = match driver.end_drive() {
        Ok(location) => location,
        Err(_) => {
            debug_assert!(false, "pickup scheduled for a driver with no active drive");
            return;
        }
    };
    log.notify(
        clock.now(),
        ActivityCategory::Driver,
        ActivityKind::Pickup,
        &driver.id,
        arrived,
    );

    let Ok(mut rider) = riders.get_mut(rider_entity) else {
        return;
    };
    match rider.status {
        RiderStatus::Waiting => {
            rider.status = RiderStatus::Satisfied;
            log.notify(
                clock.now(),
                ActivityCategory::Rider,
                ActivityKind::Pickup,
                &rider.id,
                rider.origin,
            );
            let ride_time = driver.start_ride(rider.destination);
            clock.schedule_in(
                ride_time,
                EventKind::Dropoff,
                Some(EventSubject::Ride {
                    rider: rider_entity,
                    driver: driver_entity,
                }),
            );
        }
        RiderStatus::Cancelled | RiderStatus::Satisfied => {
            // The rider is gone; look for the next one right away.
            clock.schedule_in(
                0,
                EventKind::DriverRequest,
                Some(EventSubject::Driver(driver_entity)),
            );
        }
    }
}
