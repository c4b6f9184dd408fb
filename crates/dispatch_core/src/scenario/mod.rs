mod build;
mod loader;
mod params;

pub use build::{build_scenario, create_nearest_matching, insert_core_resources};
pub use loader::{apply_timetable, load_timetable, load_timetable_reader, TimetableEntry};
pub use params::{ScenarioParams, SimulationEndTime};
