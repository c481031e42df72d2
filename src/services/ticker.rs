//! Periodic triggers
//!
//! A tick reconciles the engine with the clock so midnight and cycle expiry
//! are noticed without a user action. Every few ticks the state is flushed
//! again. The engine already flushes after each mutation, so the periodic
//! flush only covers day changes picked up between mutations.

use std::thread;
use std::time::Duration as StdDuration;

use chrono::{DateTime, Duration, Utc};

use super::engine::{AccountingEngine, ClockAdvance};
use crate::config::settings::Settings;
use crate::error::TrackerResult;

/// Result of a single tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TickOutcome {
    pub advance: ClockAdvance,
    pub flushed: bool,
}

/// Drives the tick and autosave triggers
#[derive(Debug, Clone)]
pub struct Ticker {
    tick_interval: StdDuration,
    flush_interval: Duration,
    last_flush: Option<DateTime<Utc>>,
}

impl Ticker {
    pub fn new(tick_interval: StdDuration, flush_interval: StdDuration) -> Self {
        Self {
            tick_interval,
            flush_interval: Duration::from_std(flush_interval).unwrap_or(Duration::seconds(30)),
            last_flush: None,
        }
    }

    pub fn from_settings(settings: &Settings) -> Self {
        Self::new(
            StdDuration::from_secs(settings.tick_interval_secs.max(1)),
            StdDuration::from_secs(settings.autosave_interval_secs.max(1)),
        )
    }

    pub fn tick_interval(&self) -> StdDuration {
        self.tick_interval
    }

    /// Reconcile the engine with `now` and flush if the autosave is due
    pub fn tick(
        &mut self,
        engine: &mut AccountingEngine,
        now: DateTime<Utc>,
    ) -> TrackerResult<TickOutcome> {
        let advance = engine.advance_clock(now)?;

        let due = match self.last_flush {
            Some(last) => now - last >= self.flush_interval,
            None => {
                self.last_flush = Some(now);
                false
            }
        };
        if due {
            engine.flush()?;
            self.last_flush = Some(now);
            tracing::trace!(%now, "autosave");
        }

        Ok(TickOutcome {
            advance,
            flushed: due,
        })
    }

    /// Tick on the wall clock until `ticks` have run, or forever if `None`
    ///
    /// `on_tick` sees the engine after every tick, e.g. to drain events.
    pub fn run<F>(
        &mut self,
        engine: &mut AccountingEngine,
        ticks: Option<u64>,
        mut on_tick: F,
    ) -> TrackerResult<()>
    where
        F: FnMut(&mut AccountingEngine, TickOutcome) -> TrackerResult<()>,
    {
        let mut count = 0u64;
        loop {
            let now = engine.now();
            let outcome = self.tick(engine, now)?;
            on_tick(engine, outcome)?;

            count += 1;
            if ticks.is_some_and(|limit| count >= limit) {
                break;
            }
            thread::sleep(self.tick_interval);
        }
        // Final flush so nothing picked up by the last tick is lost
        engine.flush()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::{Clock, ManualClock};
    use crate::models::MissionDay;
    use crate::storage::MemoryStore;
    use chrono::TimeZone;

    fn setup() -> (AccountingEngine, ManualClock) {
        let clock = ManualClock::new(Utc.with_ymd_and_hms(2025, 3, 1, 23, 59, 0).unwrap());
        let engine =
            AccountingEngine::open(Box::new(MemoryStore::new()), Box::new(clock.clone())).unwrap();
        (engine, clock)
    }

    #[test]
    fn test_tick_detects_midnight() {
        let (mut engine, clock) = setup();
        let mut ticker = Ticker::new(StdDuration::from_secs(1), StdDuration::from_secs(30));

        let first = ticker.tick(&mut engine, clock.now()).unwrap();
        assert_eq!(first.advance, ClockAdvance::Unchanged);

        clock.advance(Duration::minutes(2));
        let second = ticker.tick(&mut engine, clock.now()).unwrap();
        assert_eq!(
            second.advance,
            ClockAdvance::DayAdvanced {
                from: MissionDay::FIRST,
                to: MissionDay::new(2).unwrap(),
            }
        );
    }

    #[test]
    fn test_autosave_interval() {
        let (mut engine, clock) = setup();
        let mut ticker = Ticker::new(StdDuration::from_secs(1), StdDuration::from_secs(30));

        assert!(!ticker.tick(&mut engine, clock.now()).unwrap().flushed);
        clock.advance(Duration::seconds(10));
        assert!(!ticker.tick(&mut engine, clock.now()).unwrap().flushed);
        clock.advance(Duration::seconds(20));
        assert!(ticker.tick(&mut engine, clock.now()).unwrap().flushed);
        clock.advance(Duration::seconds(1));
        assert!(!ticker.tick(&mut engine, clock.now()).unwrap().flushed);
    }

    #[test]
    fn test_run_stops_after_ticks() {
        let (mut engine, _) = setup();
        let mut ticker = Ticker::new(StdDuration::from_millis(1), StdDuration::from_secs(30));
        let mut seen = 0;
        ticker
            .run(&mut engine, Some(3), |_, _| {
                seen += 1;
                Ok(())
            })
            .unwrap();
        assert_eq!(seen, 3);
    }
}
