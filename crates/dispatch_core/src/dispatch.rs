//! The dispatch coordinator.
//!
//! A [`Dispatcher`] fulfills requests from riders and drivers. When a rider
//! requests a driver and none is registered yet, the rider joins the waiting
//! list. When a driver requests a rider, the driver is registered on first
//! contact and the oldest still-waiting rider is handed out. A rider that has
//! not been picked up may cancel, which removes them from the waiting list.
//!
//! The coordinator only selects; starting drives and flipping statuses is the
//! calling system's job.

use bevy_ecs::prelude::{Entity, Resource};

use crate::ecs::RiderStatus;
use crate::geometry::Location;
use crate::matching::{DriverCandidate, MatchingStrategy, RiderCandidate};

/// Owns the ordered waiting-rider list and the driver registry.
///
/// Riders wait in arrival order; drivers keep their registration order, which
/// is also the tie-break order for nearest-driver selection.
#[derive(Debug, Default, Resource)]
pub struct Dispatcher {
    waiting_riders: Vec<Entity>,
    registered_drivers: Vec<Entity>,
}

impl Dispatcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Riders currently queued, oldest first.
    pub fn waiting_riders(&self) -> &[Entity] {
        &self.waiting_riders
    }

    /// Drivers known to the coordinator, in registration order.
    pub fn registered_drivers(&self) -> &[Entity] {
        &self.registered_drivers
    }

    pub fn has_drivers(&self) -> bool {
        !self.registered_drivers.is_empty()
    }

    /// Find a driver for `rider`, or queue the rider.
    ///
    /// `candidates` must list the registered drivers in registration order;
    /// the dispatch systems assemble it from the live driver components.
    ///
    /// With an empty registry the rider joins the waiting list (at most once)
    /// and `None` is returned. Otherwise the strategy picks among idle
    /// candidates; when every registered driver is busy the rider is NOT
    /// queued — the inherited drop-when-busy behavior, kept as observed.
    ///
    /// Selection does not mutate rider or driver state.
    pub fn request_driver(
        &mut self,
        rider: Entity,
        origin: Location,
        candidates: &[DriverCandidate],
        strategy: &dyn MatchingStrategy,
    ) -> Option<Entity> {
        if self.registered_drivers.is_empty() {
            self.enqueue_rider(rider);
            return None;
        }
        strategy.find_driver(origin, candidates)
    }

    /// Find a rider for `driver`, registering the driver on first contact.
    ///
    /// `waiting` must mirror the waiting list in order. The first entry whose
    /// status is still [`RiderStatus::Waiting`] is returned without being
    /// removed; removal happens only through [`Dispatcher::cancel_ride`].
    pub fn request_rider(&mut self, driver: Entity, waiting: &[RiderCandidate]) -> Option<Entity> {
        self.register_driver(driver);
        waiting
            .iter()
            .find(|rider| rider.status == RiderStatus::Waiting)
            .map(|rider| rider.entity)
    }

    /// Drop `rider` from the waiting list. No-op when absent; safe to repeat.
    /// The rider's status stays untouched — that mutation belongs to the
    /// caller.
    pub fn cancel_ride(&mut self, rider: Entity) {
        if let Some(index) = self.waiting_riders.iter().position(|&entity| entity == rider) {
            self.waiting_riders.remove(index);
        }
    }

    /// Add `driver` to the registry unless already present. Returns whether
    /// the driver was newly registered.
    pub fn register_driver(&mut self, driver: Entity) -> bool {
        if self.registered_drivers.contains(&driver) {
            return false;
        }
        self.registered_drivers.push(driver);
        true
    }

    fn enqueue_rider(&mut self, rider: Entity) {
        if !self.waiting_riders.contains(&rider) {
            self.waiting_riders.push(rider);
        }
    }
}
