//! Discrete-event clock.
//!
//! Events are processed strictly in timestamp order; events sharing a
//! timestamp fire in the order they were scheduled, which keeps waiting-list
//! admission deterministic across runs.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use bevy_ecs::prelude::{Entity, Resource};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum EventKind {
    RiderRequest,
    DriverRequest,
    RiderCancel,
    Pickup,
    Dropoff,
}

/// Which entities an event is about.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventSubject {
    Rider(Entity),
    Driver(Entity),
    /// A matched pair en route: pickup and dropoff carry both sides.
    Ride { rider: Entity, driver: Entity },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Event {
    pub timestamp: u64,
    pub kind: EventKind,
    pub subject: Option<EventSubject>,
}

/// Heap entry: `seq` keeps events with equal timestamps in scheduling order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Scheduled {
    event: Event,
    seq: u64,
}

impl Ord for Scheduled {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reverse ordering to make BinaryHeap a min-heap by timestamp.
        other
            .event
            .timestamp
            .cmp(&self.event.timestamp)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

impl PartialOrd for Scheduled {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// The event currently being processed, published to systems by the runner.
#[derive(Debug, Clone, Copy, Resource)]
pub struct CurrentEvent(pub Event);

#[derive(Debug, Default, Resource)]
pub struct SimulationClock {
    now: u64,
    next_seq: u64,
    events: BinaryHeap<Scheduled>,
}

impl SimulationClock {
    pub fn now(&self) -> u64 {
        self.now
    }

    /// Schedule an event at an absolute timestamp.
    pub fn schedule_at(&mut self, timestamp: u64, kind: EventKind, subject: Option<EventSubject>) {
        debug_assert!(
            timestamp >= self.now,
            "event timestamp must be >= current time"
        );
        let seq = self.next_seq;
        self.next_seq += 1;
        self.events.push(Scheduled {
            event: Event {
                timestamp,
                kind,
                subject,
            },
            seq,
        });
    }

    /// Schedule an event `delay` ticks from now.
    pub fn schedule_in(&mut self, delay: u64, kind: EventKind, subject: Option<EventSubject>) {
        self.schedule_at(self.now.saturating_add(delay), kind, subject);
    }

    pub fn next_event_time(&self) -> Option<u64> {
        self.events.peek().map(|scheduled| scheduled.event.timestamp)
    }

    /// Pop the next event and advance the clock to its timestamp.
    pub fn pop_next(&mut self) -> Option<Event> {
        let scheduled = self.events.pop()?;
        self.now = scheduled.event.timestamp;
        Some(scheduled.event)
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}
