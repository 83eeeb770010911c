//! Salon parameters: lobby pacing and turn loop control.
//!
//! [`SalonParams`] groups the static parameters that control
//! [`RunSalonUseCase`](crate::use_cases::run_salon::RunSalonUseCase).

use serde::{Deserialize, Serialize};
use std::ops::RangeInclusive;
use std::time::Duration;

/// Labels occasionally attached to a message for display.
pub const INSIGHT_LABELS: [&str; 5] = ["#Analysis", "#Ethics", "#Synthesis", "#Data", "#Risk"];

/// Turn loop and lobby control parameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SalonParams {
    /// Guests drawn from the persona pool for each salon.
    pub guest_count: usize,
    /// Delay before each turn's generation call.
    pub pacing: Duration,
    /// Delay before connecting participants become online.
    pub connect_delay: Duration,
    /// Delay between guest arrivals.
    pub join_interval: Duration,
    /// Emergence check and progress advance every K turn messages.
    pub emergence_interval: usize,
    /// Smallest progress increment (inclusive).
    pub progress_min: u8,
    /// Largest progress increment (inclusive).
    pub progress_max: u8,
    /// Transcript size (opening included) that ends the session.
    pub message_cap: usize,
    /// Probability that a message carries an insight label.
    pub insight_label_chance: f64,
}

impl Default for SalonParams {
    fn default() -> Self {
        Self {
            guest_count: 3,
            pacing: Duration::from_millis(2000),
            connect_delay: Duration::from_millis(1000),
            join_interval: Duration::from_millis(1500),
            emergence_interval: 4,
            progress_min: 15,
            progress_max: 25,
            message_cap: 20,
            insight_label_chance: 0.3,
        }
    }
}

impl SalonParams {
    /// Parameters with all delays removed.
    pub fn instant() -> Self {
        Self::default()
            .with_pacing(Duration::ZERO)
            .with_connect_delay(Duration::ZERO)
            .with_join_interval(Duration::ZERO)
    }

    pub fn progress_range(&self) -> RangeInclusive<u8> {
        let low = self.progress_min.min(self.progress_max);
        low..=self.progress_max.max(low)
    }

    // ==================== Builder Methods ====================

    pub fn with_guest_count(mut self, count: usize) -> Self {
        self.guest_count = count;
        self
    }

    pub fn with_pacing(mut self, pacing: Duration) -> Self {
        self.pacing = pacing;
        self
    }

    pub fn with_connect_delay(mut self, delay: Duration) -> Self {
        self.connect_delay = delay;
        self
    }

    pub fn with_join_interval(mut self, interval: Duration) -> Self {
        self.join_interval = interval;
        self
    }

    pub fn with_emergence_interval(mut self, k: usize) -> Self {
        self.emergence_interval = k.max(1);
        self
    }

    pub fn with_progress_increment(mut self, min: u8, max: u8) -> Self {
        self.progress_min = min;
        self.progress_max = max;
        self
    }

    pub fn with_message_cap(mut self, cap: usize) -> Self {
        self.message_cap = cap;
        self
    }

    pub fn with_insight_label_chance(mut self, chance: f64) -> Self {
        self.insight_label_chance = chance.clamp(0.0, 1.0);
        self
    }
}
