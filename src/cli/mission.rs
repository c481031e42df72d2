//! Mission CLI commands
//!
//! Daily target, status, the 14-day grid and the watch loop.

use clap::Subcommand;

use super::{drain_to_audit, parse_amount, Session};
use crate::display::{format_mission_grid, format_status};
use crate::error::TrackerResult;
use crate::services::{ClockAdvance, Ticker};

/// Mission subcommands
#[derive(Subcommand)]
pub enum MissionCommands {
    /// Set the daily spending target from today to the end of the cycle
    Target {
        /// Amount per day
        amount: String,
    },
    /// Show balance and today's mission progress
    Status,
    /// Show the 14-day mission grid
    #[command(name = "mission", alias = "grid")]
    Grid,
    /// Keep running, reconciling the day and autosaving periodically
    Watch {
        /// Stop after this many ticks
        #[arg(long)]
        ticks: Option<u64>,
    },
}

/// Handle a mission command
pub fn handle_mission_command(session: &mut Session, cmd: MissionCommands) -> TrackerResult<()> {
    match cmd {
        MissionCommands::Target { amount } => {
            let value = parse_amount(&amount)?;
            let now = session.engine.now();
            session.engine.set_daily_target(value, now)?;
            println!(
                "Daily target set to {} from day {} to day 14",
                value.format_with_symbol(session.currency()),
                session.engine.mission().current_day_index(now)
            );
        }

        MissionCommands::Status => {
            let now = session.engine.now();
            let snapshot = session.engine.snapshot(now);
            let progress = session.engine.spending_progress(now);
            print!(
                "{}",
                format_status(
                    &snapshot,
                    &progress,
                    session.currency(),
                    &session.settings.date_format
                )
            );
        }

        MissionCommands::Grid => {
            let reports = session.engine.day_reports(session.engine.now());
            print!(
                "{}",
                format_mission_grid(&reports, session.currency(), &session.settings.date_format)
            );
        }

        MissionCommands::Watch { ticks } => {
            let mut ticker = Ticker::from_settings(&session.settings);
            let Session { engine, audit, .. } = session;

            println!(
                "Watching mission from {} (tick every {}s, Ctrl-C to stop)",
                engine.mission().start_date(),
                ticker.tick_interval().as_secs()
            );
            ticker.run(engine, ticks, |engine, outcome| {
                match outcome.advance {
                    ClockAdvance::RolledOver {
                        previous_start,
                        start_date,
                    } => println!(
                        "Mission cycle from {} ended; new cycle started {}",
                        previous_start, start_date
                    ),
                    ClockAdvance::DayAdvanced { to, .. } => {
                        println!("Mission day {}/14", to)
                    }
                    ClockAdvance::Unchanged => {}
                }
                drain_to_audit(engine, audit)?;
                Ok(())
            })?;
        }
    }

    Ok(())
}
