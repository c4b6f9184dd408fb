//! Activity log: records notifications from the event layer and derives the
//! end-of-run statistics.
//!
//! The log is a passive collaborator — the dispatch systems notify it about
//! requests, cancellations, pickups, and dropoffs, and it computes averages
//! on demand without feeding anything back into the simulation.

use std::collections::HashMap;
use std::fmt;

use bevy_ecs::prelude::Resource;
use serde::Serialize;

use crate::geometry::{manhattan_distance, Location};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActivityCategory {
    Rider,
    Driver,
}

impl fmt::Display for ActivityCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ActivityCategory::Rider => write!(f, "rider"),
            ActivityCategory::Driver => write!(f, "driver"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActivityKind {
    Request,
    Cancel,
    Pickup,
    Dropoff,
}

impl fmt::Display for ActivityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ActivityKind::Request => write!(f, "request"),
            ActivityKind::Cancel => write!(f, "cancel"),
            ActivityKind::Pickup => write!(f, "pickup"),
            ActivityKind::Dropoff => write!(f, "dropoff"),
        }
    }
}

/// One recorded notification.
#[derive(Debug, Clone)]
pub struct Activity {
    pub timestamp: u64,
    pub kind: ActivityKind,
    pub id: String,
    pub location: Location,
}

/// Aggregated statistics over a finished run.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ActivityReport {
    /// Average ticks riders spent between requesting and being picked up or
    /// cancelling. Riders still waiting at the end are not counted.
    pub rider_wait_time: f64,
    /// Average distance drivers covered, empty pickup legs included.
    pub driver_total_distance: f64,
    /// Average distance drivers covered while carrying a rider.
    pub driver_ride_distance: f64,
}

/// Collects activities per actor. Insert as a resource; the dispatch systems
/// call [`ActivityLog::notify`].
#[derive(Debug, Default, Resource)]
pub struct ActivityLog {
    riders: HashMap<String, Vec<Activity>>,
    drivers: HashMap<String, Vec<Activity>>,
}

impl ActivityLog {
    pub fn notify(
        &mut self,
        timestamp: u64,
        category: ActivityCategory,
        kind: ActivityKind,
        id: &str,
        location: Location,
    ) {
        let per_actor = match category {
            ActivityCategory::Rider => &mut self.riders,
            ActivityCategory::Driver => &mut self.drivers,
        };
        per_actor.entry(id.to_string()).or_default().push(Activity {
            timestamp,
            kind,
            id: id.to_string(),
            location,
        });
    }

    /// Distinct riders seen so far.
    pub fn rider_count(&self) -> usize {
        self.riders.len()
    }

    /// Distinct drivers seen so far.
    pub fn driver_count(&self) -> usize {
        self.drivers.len()
    }

    /// Every recorded activity, ordered by timestamp (then id) for stable
    /// export.
    pub fn sorted_activities(&self) -> Vec<(ActivityCategory, &Activity)> {
        let mut all: Vec<(ActivityCategory, &Activity)> = Vec::new();
        for activities in self.riders.values() {
            all.extend(activities.iter().map(|a| (ActivityCategory::Rider, a)));
        }
        for activities in self.drivers.values() {
            all.extend(activities.iter().map(|a| (ActivityCategory::Driver, a)));
        }
        all.sort_by(|a, b| {
            a.1.timestamp
                .cmp(&b.1.timestamp)
                .then_with(|| a.1.id.cmp(&b.1.id))
        });
        all
    }

    pub fn report(&self) -> ActivityReport {
        ActivityReport {
            rider_wait_time: self.average_wait_time(),
            driver_total_distance: self.average_total_distance(),
            driver_ride_distance: self.average_ride_distance(),
        }
    }

    fn average_wait_time(&self) -> f64 {
        let mut wait = 0u64;
        let mut count = 0u32;
        for activities in self.riders.values() {
            // A rider with a single activity never finished waiting: the
            // first entry is the request, the second a pickup or cancel.
            if activities.len() >= 2 {
                wait += activities[1].timestamp - activities[0].timestamp;
                count += 1;
            }
        }
        if count == 0 {
            0.0
        } else {
            wait as f64 / f64::from(count)
        }
    }

    fn average_total_distance(&self) -> f64 {
        self.average_driver_distance(|_| true)
    }

    fn average_ride_distance(&self) -> f64 {
        self.average_driver_distance(|activity| activity.kind == ActivityKind::Dropoff)
    }

    /// Average, over all drivers seen, of the summed Manhattan distance
    /// between consecutive activity locations whose later endpoint passes
    /// `counts`.
    fn average_driver_distance(&self, counts: impl Fn(&Activity) -> bool) -> f64 {
        let mut total = 0u64;
        let mut driver_count = 0u32;
        for activities in self.drivers.values() {
            for pair in activities.windows(2) {
                if counts(&pair[1]) {
                    total += u64::from(manhattan_distance(pair[0].location, pair[1].location));
                }
            }
            driver_count += 1;
        }
        if driver_count == 0 {
            0.0
        } else {
            total as f64 / f64::from(driver_count)
        }
    }
}
