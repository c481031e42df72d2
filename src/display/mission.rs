//! Mission status and grid formatting

use crate::models::{DayReport, DayStatus, CYCLE_DAYS};
use crate::services::{ProgressHealth, SpendingProgress, TrackerSnapshot};

fn status_icon(status: DayStatus) -> &'static str {
    match status {
        DayStatus::Today => "▶",
        DayStatus::Completed => "✓",
        DayStatus::OverBudget => "✗",
        DayStatus::Unset => "·",
        DayStatus::Future => " ",
    }
}

fn health_label(health: ProgressHealth) -> &'static str {
    match health {
        ProgressHealth::OnTrack => "on track",
        ProgressHealth::Warning => "warning",
        ProgressHealth::OverBudget => "over budget",
    }
}

/// Balance and today's mission summary
pub fn format_status(
    snapshot: &TrackerSnapshot,
    progress: &SpendingProgress,
    currency: &str,
    date_format: &str,
) -> String {
    let mission = &snapshot.mission;
    let mut output = String::new();

    output.push_str(&format!(
        "Balance:         {}\n",
        snapshot.balance.format_with_symbol(currency)
    ));
    output.push_str(&format!(
        "Mission:         day {}/{} ({} to {})\n",
        snapshot.current_day,
        CYCLE_DAYS,
        mission.start_date().format(date_format),
        mission.end_date().format(date_format)
    ));

    if snapshot.daily_target.is_zero() {
        output.push_str("Daily target:    not set\n");
    } else {
        output.push_str(&format!(
            "Daily target:    {}\n",
            snapshot.daily_target.format_with_symbol(currency)
        ));
    }

    output.push_str(&format!(
        "Spent today:     {}\n",
        snapshot.todays_expenses.format_with_symbol(currency)
    ));
    output.push_str(&format!(
        "Available today: {}\n",
        snapshot.available_today.format_with_symbol(currency)
    ));
    output.push_str(&format!(
        "Progress:        {:.0}% ({})\n",
        progress.percent,
        health_label(progress.health)
    ));

    output
}

/// The 14-day grid, one line per day
pub fn format_mission_grid(reports: &[DayReport], currency: &str, date_format: &str) -> String {
    let mut output = String::new();
    output.push_str(&format!(
        "{:2} {:>3}  {:10}  {:>12}  {:>12}\n",
        "", "Day", "Date", "Spent", "Target"
    ));
    output.push_str(&"-".repeat(46));
    output.push('\n');

    for report in reports {
        let target = if report.target.is_zero() {
            "-".to_string()
        } else {
            report.target.format_with_symbol(currency)
        };
        output.push_str(&format!(
            "{:2} {:>3}  {:10}  {:>12}  {:>12}\n",
            status_icon(report.status),
            report.day,
            report.date.format(date_format).to_string(),
            report.expenses.format_with_symbol(currency),
            target
        ));
    }

    let over = reports
        .iter()
        .filter(|r| r.status == DayStatus::OverBudget)
        .count();
    let completed = reports
        .iter()
        .filter(|r| r.status == DayStatus::Completed)
        .count();
    output.push_str(&format!(
        "\n{} day(s) within target, {} over budget\n",
        completed, over
    ));

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{MissionCycle, MissionDay, Money};
    use chrono::NaiveDate;

    fn cycle() -> MissionCycle {
        let mut cycle = MissionCycle::new(NaiveDate::from_ymd_opt(2025, 3, 1).unwrap());
        cycle.set_target_from_day_forward(MissionDay::FIRST, Money::from_cents(1000));
        cycle
            .add_expense(MissionDay::FIRST, Money::from_cents(1500))
            .unwrap();
        cycle
    }

    #[test]
    fn test_grid() {
        let reports = cycle().day_reports(MissionDay::new(3).unwrap(), Money::zero());
        let grid = format_mission_grid(&reports, "$", "%Y-%m-%d");

        // Header, rule, 14 days, blank, summary
        assert_eq!(grid.lines().count(), 18);
        assert!(grid.contains("2025-03-01"));
        assert!(grid.contains("$15.00"));
        assert!(grid.contains("1 day(s) within target, 1 over budget"));
    }

    #[test]
    fn test_status() {
        let mission = cycle();
        let snapshot = TrackerSnapshot {
            balance: Money::from_cents(8500),
            daily_target: Money::from_cents(1000),
            transactions: Vec::new(),
            mission,
            current_day: MissionDay::FIRST,
            todays_expenses: Money::from_cents(1500),
            available_today: Money::zero(),
        };
        let progress = SpendingProgress {
            percent: 150.0,
            health: ProgressHealth::OverBudget,
        };

        let status = format_status(&snapshot, &progress, "৳", "%Y-%m-%d");
        assert!(status.contains("Balance:         ৳85.00"));
        assert!(status.contains("day 1/14 (2025-03-01 to 2025-03-14)"));
        assert!(status.contains("Progress:        150% (over budget)"));
    }
}
