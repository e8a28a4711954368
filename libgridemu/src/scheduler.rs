use std::{
    thread,
    time::{Duration, Instant},
};

use log::debug;

use crate::{CycleOutcome, Emulator};

pub const DEFAULT_INTERVAL: Duration = Duration::from_millis(1);

/// Drives cycles at a fixed interval while running. Every cycle runs to completion before control
/// comes back, so pausing can only ever happen between two cycles.
#[derive(Debug, Clone)]
pub struct Scheduler {
    interval: Duration,
    next_tick: Option<Instant>,
}

impl Scheduler {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            next_tick: None,
        }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    pub fn is_running(&self) -> bool {
        self.next_tick.is_some()
    }

    /// Schedules the first tick right away. Does nothing if already running.
    pub fn start(&mut self, now: Instant) {
        if self.next_tick.is_none() {
            debug!("Scheduler started with a {:?} interval", self.interval);
            self.next_tick = Some(now);
        }
    }

    /// Cancels the pending tick.
    pub fn pause(&mut self) {
        if self.next_tick.take().is_some() {
            debug!("Scheduler paused");
        }
    }

    /// Returns whether the scheduler is running afterwards.
    pub fn toggle(&mut self, now: Instant) -> bool {
        if self.is_running() {
            self.pause();
        } else {
            self.start(now);
        }

        self.is_running()
    }

    /// Runs a cycle if one is due and schedules the next one an interval later. An interval too
    /// long to be represented leaves nothing scheduled, pausing the scheduler.
    pub fn poll(&mut self, emulator: &mut Emulator, now: Instant) -> Option<CycleOutcome> {
        let due = self.next_tick?;

        if now < due {
            return None;
        }

        let outcome = emulator.cycle();
        self.next_tick = now.checked_add(self.interval);

        if self.next_tick.is_none() {
            debug!("Interval of {:?} overflows the clock, scheduler paused", self.interval);
        }

        Some(outcome)
    }

    /// Runs exactly one cycle, whether running or not, leaving the schedule untouched.
    pub fn step(&self, emulator: &mut Emulator) -> CycleOutcome {
        emulator.cycle()
    }

    /// How long until the pending tick is due, `None` while paused.
    pub fn time_until_tick(&self, now: Instant) -> Option<Duration> {
        self.next_tick
            .map(|due| due.saturating_duration_since(now))
    }

    /// Starts and keeps ticking, sleeping between cycles, until `stop` returns true after a cycle.
    /// Pauses before returning the number of cycles run.
    pub fn run_until<F>(&mut self, emulator: &mut Emulator, mut stop: F) -> u64
    where
        F: FnMut(&CycleOutcome, &Emulator) -> bool,
    {
        let mut executed = 0;
        self.start(Instant::now());

        while let Some(wait) = self.time_until_tick(Instant::now()) {
            if !wait.is_zero() {
                thread::sleep(wait);
            }

            let Some(outcome) = self.poll(emulator, Instant::now()) else {
                continue;
            };
            executed += 1;

            if stop(&outcome, emulator) {
                break;
            }
        }

        self.pause();
        executed
    }
}

impl Default for Scheduler {
    fn default() -> Self {
        Self::new(DEFAULT_INTERVAL)
    }
}
