use bevy_ecs::prelude::Resource;

/// Simulation end time in ticks. When present the runner stops before
/// processing any event at or past this timestamp.
#[derive(Debug, Clone, Copy, Resource)]
pub struct SimulationEndTime(pub u64);

/// Parameters for building a randomized simulation scenario.
#[derive(Debug, Clone)]
pub struct ScenarioParams {
    pub num_riders: usize,
    pub num_drivers: usize,
    /// Seed for the scenario RNG; `None` draws from entropy.
    pub seed: Option<u64>,
    /// Grid extent: rows are drawn from `[0, grid_rows)`, columns from
    /// `[0, grid_columns)`.
    pub grid_rows: i32,
    pub grid_columns: i32,
    /// Riders request uniformly in `[0, request_window]`.
    pub request_window: u64,
    /// Drivers make their first request uniformly in `[0, driver_spread]`.
    pub driver_spread: u64,
    pub min_speed: u32,
    pub max_speed: u32,
    pub min_patience: u64,
    pub max_patience: u64,
    /// Optional cutoff; see [`SimulationEndTime`].
    pub simulation_end_time: Option<u64>,
}

impl Default for ScenarioParams {
    fn default() -> Self {
        Self {
            num_riders: 50,
            num_drivers: 10,
            seed: None,
            grid_rows: 100,
            grid_columns: 100,
            request_window: 200,
            driver_spread: 200,
            min_speed: 1,
            max_speed: 5,
            min_patience: 10,
            max_patience: 60,
            simulation_end_time: None,
        }
    }
}

impl ScenarioParams {
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_counts(mut self, num_riders: usize, num_drivers: usize) -> Self {
        self.num_riders = num_riders;
        self.num_drivers = num_drivers;
        self
    }

    pub fn with_grid(mut self, rows: i32, columns: i32) -> Self {
        self.grid_rows = rows;
        self.grid_columns = columns;
        self
    }

    /// Riders request uniformly across this window of ticks.
    pub fn with_request_window(mut self, window: u64) -> Self {
        self.request_window = window;
        self
    }

    /// Driver speed range, inclusive on both ends.
    pub fn with_speed_range(mut self, min_speed: u32, max_speed: u32) -> Self {
        self.min_speed = min_speed;
        self.max_speed = max_speed;
        self
    }

    /// Rider patience range, inclusive on both ends.
    pub fn with_patience_range(mut self, min_patience: u64, max_patience: u64) -> Self {
        self.min_patience = min_patience;
        self.max_patience = max_patience;
        self
    }

    /// Stop the runner before events at or past this tick.
    pub fn with_simulation_end_time(mut self, end: u64) -> Self {
        self.simulation_end_time = Some(end);
        self
    }
}
