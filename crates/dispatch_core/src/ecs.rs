//! Entity state: rider and driver components.
//!
//! Identity for both is the string id alone; every other field is mutable
//! journey state. Equality is implemented accordingly.

use std::fmt;

use bevy_ecs::prelude::Component;

use crate::error::{DispatchError, DispatchResult};
use crate::geometry::{manhattan_distance, travel_time, Location, Speed};

/// Where a rider is in their journey through the simulation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RiderStatus {
    Waiting,
    Cancelled,
    Satisfied,
}

/// A rider asking for a lift from `origin` to `destination`.
#[derive(Debug, Clone, Component)]
pub struct Rider {
    pub id: String,
    pub origin: Location,
    pub destination: Location,
    pub status: RiderStatus,
    /// Advisory wait budget in ticks. The dispatcher never enforces it; the
    /// event layer schedules a cancellation this far after the request.
    pub patience: u64,
}

impl Rider {
    /// Create a waiting rider.
    pub fn new(
        id: impl Into<String>,
        origin: Location,
        destination: Location,
        patience: u64,
    ) -> Self {
        Self {
            id: id.into(),
            origin,
            destination,
            status: RiderStatus::Waiting,
            patience,
        }
    }
}

impl PartialEq for Rider {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Rider {}

impl fmt::Display for Rider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.id)
    }
}

/// A driver, idle or moving toward `destination`.
#[derive(Debug, Clone, Component)]
pub struct Driver {
    pub id: String,
    pub location: Location,
    pub speed: Speed,
    pub is_idle: bool,
    /// Set while driving to a pickup or carrying a rider; cleared on arrival.
    pub destination: Option<Location>,
}

impl Driver {
    /// Create an idle driver. Fails on a zero speed.
    pub fn new(id: impl Into<String>, location: Location, speed: u32) -> DispatchResult<Self> {
        Ok(Self {
            id: id.into(),
            location,
            speed: Speed::new(speed)?,
            is_idle: true,
            destination: None,
        })
    }

    /// Estimated ticks to reach `target` from the current location.
    pub fn travel_time_to(&self, target: Location) -> u64 {
        travel_time(self.speed, manhattan_distance(self.location, target))
    }

    /// Begin driving toward a pickup location. Returns the travel time.
    pub fn start_drive(&mut self, target: Location) -> u64 {
        let time = self.travel_time_to(target);
        self.is_idle = false;
        self.destination = Some(target);
        time
    }

    /// Begin carrying a rider toward their destination. Returns the ride time.
    pub fn start_ride(&mut self, destination: Location) -> u64 {
        self.start_drive(destination)
    }

    /// Arrive: the destination becomes the new location and the driver goes
    /// idle. Errors when no drive is in progress.
    pub fn end_drive(&mut self) -> DispatchResult<Location> {
        let arrived = self
            .destination
            .take()
            .ok_or_else(|| DispatchError::NoActiveDrive(self.id.clone()))?;
        self.location = arrived;
        self.is_idle = true;
        Ok(arrived)
    }

    /// Arrive at the rider's destination. Same contract as [`Driver::end_drive`].
    pub fn end_ride(&mut self) -> DispatchResult<Location> {
        self.end_drive()
    }
}

impl PartialEq for Driver {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Driver {}

impl fmt::Display for Driver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn equality_is_by_id_only() {
        let bob_here = Driver::new("Bob", Location::new(3, 4), 1).expect("driver");
        let bob_there = Driver::new("Bob", Location::new(5, 6), 2).expect("driver");
        let tom = Driver::new("Tom", Location::new(3, 4), 1).expect("driver");
        assert_eq!(bob_here, bob_there);
        assert_ne!(bob_here, tom);

        let jim = Rider::new("Jim", Location::new(1, 1), Location::new(2, 2), 3);
        let other_jim = Rider::new("Jim", Location::new(9, 9), Location::new(0, 0), 8);
        assert_eq!(jim, other_jim);
    }

    #[test]
    fn drive_lifecycle_moves_the_driver() {
        let mut driver = Driver::new("Bob", Location::new(1, 1), 1).expect("driver");
        assert!(driver.is_idle);

        let time = driver.start_drive(Location::new(3, 3));
        assert_eq!(time, 4);
        assert!(!driver.is_idle);
        assert_eq!(driver.destination, Some(Location::new(3, 3)));

        let arrived = driver.end_drive().expect("arrival");
        assert_eq!(arrived, Location::new(3, 3));
        assert_eq!(driver.location, arrived);
        assert!(driver.is_idle);
        assert_eq!(driver.destination, None);
    }

    #[test]
    fn ending_a_drive_without_destination_is_an_error() {
        let mut driver = Driver::new("Bob", Location::new(1, 1), 1).expect("driver");
        let err = driver.end_drive().expect_err("no active drive");
        assert!(matches!(err, DispatchError::NoActiveDrive(id) if id == "Bob"));
    }

    #[test]
    fn zero_speed_driver_is_rejected() {
        assert!(Driver::new("Slow", Location::new(0, 0), 0).is_err());
    }

    #[test]
    fn riders_start_out_waiting() {
        let rider = Rider::new("Jim", Location::new(1, 1), Location::new(2, 3), 5);
        assert_eq!(rider.status, RiderStatus::Waiting);
    }
}
