//! Command-line front end: replay a timetable or run a random scenario, then
//! print the activity report.

use std::fs::File;
use std::path::{Path, PathBuf};

use anyhow::Context;
use bevy_ecs::prelude::World;
use clap::Parser;

use dispatch_core::activity::ActivityLog;
use dispatch_core::runner::{run_until_empty, simulation_schedule};
use dispatch_core::scenario::{
    apply_timetable, build_scenario, insert_core_resources, load_timetable, ScenarioParams,
};

/// Ride dispatch simulator.
#[derive(Debug, Parser)]
#[command(name = "dispatch", version, about)]
struct Args {
    /// Timetable file to replay; omit to generate a random scenario.
    #[arg(long)]
    schedule: Option<PathBuf>,

    /// Riders in the random scenario.
    #[arg(long, default_value_t = 50)]
    riders: usize,

    /// Drivers in the random scenario.
    #[arg(long, default_value_t = 10)]
    drivers: usize,

    /// RNG seed for the random scenario.
    #[arg(long)]
    seed: Option<u64>,

    /// Stop before processing events at or past this tick.
    #[arg(long)]
    until: Option<u64>,

    /// Print the report as JSON instead of text.
    #[arg(long)]
    json: bool,

    /// Also write every recorded activity to this CSV file.
    #[arg(long)]
    activities_csv: Option<PathBuf>,
}

const MAX_STEPS: usize = 1_000_000;

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    let mut world = World::new();

    match &args.schedule {
        Some(path) => {
            insert_core_resources(&mut world, args.until);
            let entries = load_timetable(path)
                .with_context(|| format!("loading timetable {}", path.display()))?;
            apply_timetable(&mut world, &entries).context("applying timetable")?;
        }
        None => {
            let mut params = ScenarioParams::default().with_counts(args.riders, args.drivers);
            params.simulation_end_time = args.until;
            if let Some(seed) = args.seed {
                params = params.with_seed(seed);
            }
            build_scenario(&mut world, params).context("building scenario")?;
        }
    }

    let mut schedule = simulation_schedule();
    let steps = run_until_empty(&mut world, &mut schedule, MAX_STEPS);

    let log = world.resource::<ActivityLog>();
    let report = log.report();
    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!("processed {steps} events");
        println!(
            "riders seen: {}, drivers seen: {}",
            log.rider_count(),
            log.driver_count()
        );
        println!("average rider wait time:       {:.2}", report.rider_wait_time);
        println!("average driver total distance: {:.2}", report.driver_total_distance);
        println!("average driver ride distance:  {:.2}", report.driver_ride_distance);
    }

    if let Some(path) = &args.activities_csv {
        write_activities_csv(log, path)
            .with_context(|| format!("writing activities to {}", path.display()))?;
    }

    Ok(())
}

fn write_activities_csv(log: &ActivityLog, path: &Path) -> anyhow::Result<()> {
    let mut writer = csv::Writer::from_writer(File::create(path)?);
    writer.write_record(["timestamp", "category", "kind", "id", "row", "column"])?;
    for (category, activity) in log.sorted_activities() {
        writer.write_record([
            activity.timestamp.to_string(),
            category.to_string(),
            activity.kind.to_string(),
            activity.id.clone(),
            activity.location.row.to_string(),
            activity.location.column.to_string(),
        ])?;
    }
    writer.flush()?;
    Ok(())
}
