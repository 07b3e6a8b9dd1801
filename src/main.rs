//! Demo front end: load or seed a planner, print its state and the next
//! open slot.
//!
//! ```text
//! referee-scheduler [state.json] [config.json]
//! ```
//!
//! A missing state file is seeded with the stock referee panel and
//! written back.

use anyhow::{Context, Result};
use chrono::Local;
use std::path::Path;

use referee_scheduler::config::{PlannerConfig, Roster};
use referee_scheduler::dates::{format_datetime, format_duration};
use referee_scheduler::models::RefereeRole;
use referee_scheduler::scheduler::Planner;
use referee_scheduler::{logging, persistence};

fn main() -> Result<()> {
    logging::init();

    let state_path = std::env::args().nth(1);
    let config = match std::env::args().nth(2) {
        Some(path) => PlannerConfig::from_file(&path)
            .with_context(|| format!("reading configuration {path}"))?,
        None => PlannerConfig::default(),
    };

    let planner = match state_path.as_deref() {
        Some(path) if Path::new(path).exists() => {
            let (planner, report) = persistence::load(path, config)
                .with_context(|| format!("loading {path}"))?;
            if !report.is_clean() {
                println!(
                    "Loaded with {} skipped record(s) and {} dropped reference(s)",
                    report.skipped.len(),
                    report.dangling.len() + report.repeated.len()
                );
            }
            planner
        }
        Some(path) => {
            let planner = Planner::new(config).with_roster(&Roster::english_panel());
            persistence::save(&planner, path).with_context(|| format!("saving {path}"))?;
            println!("Seeded {path} with the stock referee panel");
            planner
        }
        None => Planner::new(config).with_roster(&Roster::english_panel()),
    };

    print_overview(&planner);
    Ok(())
}

fn print_overview(planner: &Planner) {
    let now = Local::now().naive_local();
    let stats = planner.stats_at(now);

    println!("Matches: {} ({} upcoming, {} past)", stats.total_matches, stats.upcoming_matches, stats.past_matches);
    for role in RefereeRole::ALL {
        let count = stats.referees_by_role.get(&role).copied().unwrap_or(0);
        println!("  {role}: {count}");
    }

    for m in planner.upcoming_matches_at(now) {
        println!(
            "  {}  {}  ({}, {} referee(s))",
            format_datetime(m.start),
            m.name(),
            format_duration(m.start, m.end),
            m.resource_ids.len()
        );
    }

    match planner.find_next_slot_at(now, now) {
        Some(slot) => {
            println!("Next open slot: {}", format_datetime(slot.start));
            for role in RefereeRole::ALL {
                println!("  {} free: {}", role, slot.available(role).len());
            }
            if let Some(crew) = planner.suggest_crew(slot.start) {
                let names: Vec<&str> = crew.members().map(|r| r.name.as_str()).collect();
                println!("  Suggested crew: {}", names.join(", "));
            }
        }
        None => println!(
            "No open slot in the next {} days",
            planner.config().search_horizon_days
        ),
    }
}
