//! Grid geometry: locations, Manhattan distance, and travel time.
//!
//! The city is an integer grid. Distance between two cells is the Manhattan
//! distance, and travel time is distance over speed rounded to the nearest
//! tick with ties going to the even value, so repeated runs of the same
//! schedule always agree on arrival times.

use std::fmt;
use std::str::FromStr;

use crate::error::{DispatchError, DispatchResult};

/// A cell on the city grid, addressed by row and column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Location {
    pub row: i32,
    pub column: i32,
}

impl Location {
    pub const fn new(row: i32, column: i32) -> Self {
        Self { row, column }
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.column)
    }
}

impl FromStr for Location {
    type Err = DispatchError;

    /// Parse the textual `"row,column"` form used by timetable files.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (row, column) = s.split_once(',').ok_or_else(|| {
            DispatchError::Parse(format!("location {s:?}: expected \"row,column\""))
        })?;
        let coordinate = |part: &str| {
            part.trim().parse::<i32>().map_err(|_| {
                DispatchError::Parse(format!("location {s:?}: bad coordinate {part:?}"))
            })
        };
        Ok(Self::new(coordinate(row)?, coordinate(column)?))
    }
}

/// Manhattan distance between two grid cells.
pub fn manhattan_distance(a: Location, b: Location) -> u32 {
    a.row.abs_diff(b.row) + a.column.abs_diff(b.column)
}

/// Distance units covered per tick. Always at least one by construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Speed(u32);

impl Speed {
    /// Rejects zero: a driver that cannot move would make every travel-time
    /// estimate divide by zero.
    pub fn new(units_per_tick: u32) -> DispatchResult<Self> {
        if units_per_tick == 0 {
            return Err(DispatchError::InvalidSpeed(units_per_tick));
        }
        Ok(Self(units_per_tick))
    }

    pub fn get(self) -> u32 {
        self.0
    }
}

impl fmt::Display for Speed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Ticks needed to cover `distance` at `speed`, rounded to the nearest
/// integer with ties rounded half-to-even.
pub fn travel_time(speed: Speed, distance: u32) -> u64 {
    round_half_even(f64::from(distance) / f64::from(speed.get()))
}

fn round_half_even(value: f64) -> u64 {
    let floor = value.floor();
    let fraction = value - floor;
    let down = floor as u64;
    if fraction > 0.5 {
        down + 1
    } else if fraction < 0.5 {
        down
    } else if down % 2 == 0 {
        down
    } else {
        down + 1
    }
}
