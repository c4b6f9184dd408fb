use bevy_ecs::prelude::Entity;

use super::types::DriverCandidate;
use crate::geometry::Location;

/// Trait for driver-selection strategies.
pub trait MatchingStrategy: Send + Sync {
    /// Pick a driver for a rider at `origin` from the candidate list, given
    /// in registration order. Returns `None` when nobody qualifies.
    fn find_driver(&self, origin: Location, candidates: &[DriverCandidate]) -> Option<Entity>;
}
