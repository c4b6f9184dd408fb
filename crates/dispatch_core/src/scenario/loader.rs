//! Timetable loader.
//!
//! One event per line, fields separated by whitespace; blank lines and lines
//! starting with `#` are skipped:
//!
//! ```text
//! 0  DriverRequest Amaranth 1,1 1
//! 5  RiderRequest  Cerise   4,2 1,5 15
//! 20 RiderCancel   Cerise
//! ```
//!
//! | Kind            | Fields after the id                   |
//! |-----------------|---------------------------------------|
//! | `DriverRequest` | location (`row,col`), speed           |
//! | `RiderRequest`  | origin, destination, patience (ticks) |
//! | `RiderCancel`   | —                                     |
//!
//! Repeated ids refer to the same actor: a driver requesting twice keeps its
//! first location and speed, and a cancel line must name a rider that also
//! has a request line.

use std::collections::HashMap;
use std::io::{BufRead, BufReader, Read};
use std::path::Path;

use bevy_ecs::prelude::{Entity, World};

use crate::clock::{EventKind, EventSubject, SimulationClock};
use crate::ecs::{Driver, Rider};
use crate::error::{DispatchError, DispatchResult};
use crate::geometry::Location;

/// One parsed timetable line.
#[derive(Debug, Clone, PartialEq)]
pub enum TimetableEntry {
    DriverRequest {
        timestamp: u64,
        id: String,
        location: Location,
        speed: u32,
    },
    RiderRequest {
        timestamp: u64,
        id: String,
        origin: Location,
        destination: Location,
        patience: u64,
    },
    RiderCancel {
        timestamp: u64,
        id: String,
    },
}

impl TimetableEntry {
    pub fn timestamp(&self) -> u64 {
        match self {
            TimetableEntry::DriverRequest { timestamp, .. }
            | TimetableEntry::RiderRequest { timestamp, .. }
            | TimetableEntry::RiderCancel { timestamp, .. } => *timestamp,
        }
    }
}

/// Load timetable entries from a file.
pub fn load_timetable(path: &Path) -> DispatchResult<Vec<TimetableEntry>> {
    let file = std::fs::File::open(path)?;
    load_timetable_reader(file)
}

/// Like [`load_timetable`] but accepts any `Read` source (pass a
/// `std::io::Cursor` in tests).
pub fn load_timetable_reader<R: Read>(reader: R) -> DispatchResult<Vec<TimetableEntry>> {
    let mut entries = Vec::new();
    for (number, line) in BufReader::new(reader).lines().enumerate() {
        let line = line?;
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }
        let entry = parse_line(trimmed)
            .map_err(|err| DispatchError::Parse(format!("line {}: {err}", number + 1)))?;
        entries.push(entry);
    }
    Ok(entries)
}

/// Spawn each unique actor once and schedule its events into the world's
/// clock. Call after [`super::insert_core_resources`].
pub fn apply_timetable(world: &mut World, entries: &[TimetableEntry]) -> DispatchResult<()> {
    let mut riders: HashMap<String, Entity> = HashMap::new();
    let mut drivers: HashMap<String, Entity> = HashMap::new();

    for entry in entries {
        match entry {
            TimetableEntry::DriverRequest {
                timestamp,
                id,
                location,
                speed,
            } => {
                let entity = match drivers.get(id) {
                    Some(&entity) => entity,
                    None => {
                        let driver = Driver::new(id.clone(), *location, *speed)?;
                        let entity = world.spawn(driver).id();
                        drivers.insert(id.clone(), entity);
                        entity
                    }
                };
                world.resource_mut::<SimulationClock>().schedule_at(
                    *timestamp,
                    EventKind::DriverRequest,
                    Some(EventSubject::Driver(entity)),
                );
            }
            TimetableEntry::RiderRequest {
                timestamp,
                id,
                origin,
                destination,
                patience,
            } => {
                let entity = match riders.get(id) {
                    Some(&entity) => entity,
                    None => {
                        let rider = Rider::new(id.clone(), *origin, *destination, *patience);
                        let entity = world.spawn(rider).id();
                        riders.insert(id.clone(), entity);
                        entity
                    }
                };
                world.resource_mut::<SimulationClock>().schedule_at(
                    *timestamp,
                    EventKind::RiderRequest,
                    Some(EventSubject::Rider(entity)),
                );
            }
            TimetableEntry::RiderCancel { timestamp, id } => {
                let entity = riders.get(id).copied().ok_or_else(|| {
                    DispatchError::Parse(format!("cancel for unknown rider {id:?}"))
                })?;
                world.resource_mut::<SimulationClock>().schedule_at(
                    *timestamp,
                    EventKind::RiderCancel,
                    Some(EventSubject::Rider(entity)),
                );
            }
        }
    }
    Ok(())
}

fn parse_line(line: &str) -> DispatchResult<TimetableEntry> {
    let mut fields = line.split_whitespace();
    let timestamp = parse_number::<u64>(next_field(&mut fields, "timestamp")?, "timestamp")?;
    let kind = next_field(&mut fields, "event kind")?;

    let entry = match kind {
        "DriverRequest" => {
            let id = next_field(&mut fields, "driver id")?.to_string();
            let location: Location = next_field(&mut fields, "location")?.parse()?;
            let speed = parse_number::<u32>(next_field(&mut fields, "speed")?, "speed")?;
            TimetableEntry::DriverRequest {
                timestamp,
                id,
                location,
                speed,
            }
        }
        "RiderRequest" => {
            let id = next_field(&mut fields, "rider id")?.to_string();
            let origin: Location = next_field(&mut fields, "origin")?.parse()?;
            let destination: Location = next_field(&mut fields, "destination")?.parse()?;
            let patience = parse_number::<u64>(next_field(&mut fields, "patience")?, "patience")?;
            TimetableEntry::RiderRequest {
                timestamp,
                id,
                origin,
                destination,
                patience,
            }
        }
        "RiderCancel" => {
            let id = next_field(&mut fields, "rider id")?.to_string();
            TimetableEntry::RiderCancel { timestamp, id }
        }
        other => {
            return Err(DispatchError::Parse(format!(
                "unknown event kind {other:?}"
            )))
        }
    };

    if let Some(extra) = fields.next() {
        return Err(DispatchError::Parse(format!(
            "unexpected trailing field {extra:?}"
        )));
    }
    Ok(entry)
}

fn next_field<'a>(
    fields: &mut impl Iterator<Item = &'a str>,
    what: &str,
) -> DispatchResult<&'a str> {
    fields
        .next()
        .ok_or_else(|| DispatchError::Parse(format!("missing {what}")))
}

fn parse_number<T: std::str::FromStr>(field: &str, what: &str) -> DispatchResult<T> {
    field
        .parse::<T>()
        .map_err(|_| DispatchError::Parse(format!("bad {what} {field:?}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    const TIMETABLE: &str = "\
# morning shift
0  DriverRequest Amaranth 1,1 1

5  RiderRequest  Cerise   4,2 1,5 15
20 RiderCancel   Cerise
";

    #[test]
    fn parses_all_entry_kinds() {
        let entries = load_timetable_reader(Cursor::new(TIMETABLE)).expect("timetable");
        assert_eq!(
            entries,
            vec![
                TimetableEntry::DriverRequest {
                    timestamp: 0,
                    id: "Amaranth".to_string(),
                    location: Location::new(1, 1),
                    speed: 1,
                },
                TimetableEntry::RiderRequest {
                    timestamp: 5,
                    id: "Cerise".to_string(),
                    origin: Location::new(4, 2),
                    destination: Location::new(1, 5),
                    patience: 15,
                },
                TimetableEntry::RiderCancel {
                    timestamp: 20,
                    id: "Cerise".to_string(),
                },
            ]
        );
    }

    #[test]
    fn rejects_malformed_lines_with_line_context() {
        let err = load_timetable_reader(Cursor::new("0 DriverRequest Bob 1,1"))
            .expect_err("missing speed");
        assert!(err.to_string().contains("line 1"));

        assert!(load_timetable_reader(Cursor::new("x RiderCancel Bob")).is_err());
        assert!(load_timetable_reader(Cursor::new("0 Teleport Bob 1,1")).is_err());
        assert!(load_timetable_reader(Cursor::new("0 RiderCancel Bob extra")).is_err());
    }

    #[test]
    fn cancel_for_unknown_rider_fails_to_apply() {
        let mut world = World::new();
        crate::scenario::insert_core_resources(&mut world, None);
        let entries = vec![TimetableEntry::RiderCancel {
            timestamp: 1,
            id: "Ghost".to_string(),
        }];
        assert!(apply_timetable(&mut world, &entries).is_err());
    }

    #[test]
    fn repeated_driver_ids_share_one_entity() {
        let mut world = World::new();
        crate::scenario::insert_core_resources(&mut world, None);
        let entries = vec![
            TimetableEntry::DriverRequest {
                timestamp: 0,
                id: "Bob".to_string(),
                location: Location::new(1, 1),
                speed: 1,
            },
            TimetableEntry::DriverRequest {
                timestamp: 9,
                id: "Bob".to_string(),
                location: Location::new(5, 5),
                speed: 2,
            },
        ];
        apply_timetable(&mut world, &entries).expect("apply");

        let drivers: Vec<&Driver> = world.query::<&Driver>().iter(&world).collect();
        assert_eq!(drivers.len(), 1);
        // First sighting wins.
        assert_eq!(drivers[0].location, Location::new(1, 1));
    }
}
