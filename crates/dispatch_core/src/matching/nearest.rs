use bevy_ecs::prelude::Entity;

use super::strategy::MatchingStrategy;
use super::types::DriverCandidate;
use crate::geometry::{manhattan_distance, travel_time, Location};

/// Nearest-idle-driver selection.
///
/// Scans the candidates in order and keeps the idle driver with the smallest
/// travel time to the rider's origin. Ties keep the earlier-registered
/// driver; busy drivers are never considered, however close.
#[derive(Debug, Default)]
pub struct NearestIdleDriver;

impl MatchingStrategy for NearestIdleDriver {
    fn find_driver(&self, origin: Location, candidates: &[DriverCandidate]) -> Option<Entity> {
        let mut best: Option<(Entity, u64)> = None;
        for candidate in candidates {
            if !candidate.is_idle {
                continue;
            }
            let eta = travel_time(
                candidate.speed,
                manhattan_distance(candidate.location, origin),
            );
            match best {
                Some((_, best_eta)) if eta >= best_eta => {}
                _ => best = Some((candidate.entity, eta)),
            }
        }
        best.map(|(entity, _)| entity)
    }
}
