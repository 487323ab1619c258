//! Fixed timestep clock
//!
//! Turns variable frame deltas into a whole number of fixed ticks. Leftover
//! time carries into the next frame; a long stall is capped at
//! `max_substeps` ticks so the simulation never tries to catch up forever.

use std::time::Duration;

#[derive(Debug, Clone)]
pub struct FixedStep {
    period: Duration,
    max_substeps: u32,
    accumulator: Duration,
}

impl FixedStep {
    pub fn new(period: Duration, max_substeps: u32) -> Self {
        Self {
            period,
            max_substeps: max_substeps.max(1),
            accumulator: Duration::ZERO,
        }
    }

    pub fn period(&self) -> Duration {
        self.period
    }

    /// Add a frame's elapsed time and return how many ticks to run now
    pub fn advance(&mut self, elapsed: Duration) -> u32 {
        if self.period.is_zero() {
            return 0;
        }
        self.accumulator += elapsed;

        let mut ticks = 0;
        while self.accumulator >= self.period && ticks < self.max_substeps {
            self.accumulator -= self.period;
            ticks += 1;
        }
        // Drop backlog beyond the cap
        if ticks == self.max_substeps && self.accumulator >= self.period {
            let keep = self.period - Duration::from_nanos(1);
            log::debug!("Dropping {:?} of simulation backlog", self.accumulator - keep);
            self.accumulator = keep;
        }
        ticks
    }

    /// Time until the next tick is due
    pub fn until_next(&self) -> Duration {
        self.period.saturating_sub(self.accumulator)
    }
}
