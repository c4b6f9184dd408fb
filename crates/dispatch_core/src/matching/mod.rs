pub mod nearest;
pub mod strategy;
pub mod types;

use bevy_ecs::prelude::Resource;

pub use nearest::NearestIdleDriver;
pub use strategy::MatchingStrategy;
pub use types::{DriverCandidate, RiderCandidate};

/// Resource wrapper for the matching strategy trait object.
#[derive(Resource)]
pub struct MatchingStrategyResource(pub Box<dyn MatchingStrategy>);

impl MatchingStrategyResource {
    pub fn new(strategy: Box<dyn MatchingStrategy>) -> Self {
        Self(strategy)
    }
}

impl std::ops::Deref for MatchingStrategyResource {
    type Target = dyn MatchingStrategy;

    fn deref(&self) -> &Self::Target {
        self.0.as_ref()
    }
}
