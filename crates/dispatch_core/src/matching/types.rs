use bevy_ecs::prelude::Entity;

use crate::ecs::RiderStatus;
use crate::geometry::{Location, Speed};

/// Registry view of one driver, assembled by the dispatch systems in
/// registration order.
#[derive(Debug, Clone, Copy)]
pub struct DriverCandidate {
    pub entity: Entity,
    pub location: Location,
    pub speed: Speed,
    pub is_idle: bool,
}

/// Waiting-list view of one rider, in arrival order.
#[derive(Debug, Clone, Copy)]
pub struct RiderCandidate {
    pub entity: Entity,
    pub status: RiderStatus,
}
