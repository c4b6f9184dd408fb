use bevy_ecs::prelude::{Query, Res, ResMut};

use crate::activity::{ActivityCategory, ActivityKind, ActivityLog};
use crate::clock::{CurrentEvent, EventKind, EventSubject, SimulationClock};
use crate::dispatch::Dispatcher;
use crate::ecs::{Rider, RiderStatus};

/// Handles a rider withdrawing before pickup.
///
/// Only riders still waiting cancel: satisfied riders are past the point of
/// cancelling, and a repeat cancellation is a no-op, so the activity log sees
/// at most one cancel per rider.
pub fn rider_cancel_system(
    event: Res<CurrentEvent>,
    clock: Res<SimulationClock>,
    mut dispatcher: ResMut<Dispatcher>,
    mut log: ResMut<ActivityLog>,
    mut riders: Query<&mut Rider>,
) {
    if event.0.kind != EventKind::RiderCancel {
        return;
    }
    let Some(EventSubject::Rider(rider_entity)) = event.0.subject else {
        return;
    };
    let Ok(mut rider) = riders.get_mut(rider_entity) else {
        return;
    };
    if rider.status != RiderStatus::Waiting {
        return;
    }

    rider.status = RiderStatus::Cancelled;
    dispatcher.cancel_ride(rider_entity);
    log.notify(
        clock.now(),
        ActivityCategory::Rider,
        ActivityKind::Cancel,
        &rider.id,
        rider.origin,
    );
}
