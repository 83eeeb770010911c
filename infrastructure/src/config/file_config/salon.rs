//! Salon configuration from TOML (`[salon]` section)

use salon_application::SalonParams;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Raw salon configuration from TOML
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileSalonConfig {
    pub guest_count: usize,
    pub pacing_ms: u64,
    pub connect_delay_ms: u64,
    pub join_interval_ms: u64,
    pub emergence_interval: usize,
    pub progress_min: u8,
    pub progress_max: u8,
    pub message_cap: usize,
    pub insight_label_chance: f64,
}

impl Default for FileSalonConfig {
    fn default() -> Self {
        let params = SalonParams::default();
        Self {
            guest_count: params.guest_count,
            pacing_ms: params.pacing.as_millis() as u64,
            connect_delay_ms: params.connect_delay.as_millis() as u64,
            join_interval_ms: params.join_interval.as_millis() as u64,
            emergence_interval: params.emergence_interval,
            progress_min: params.progress_min,
            progress_max: params.progress_max,
            message_cap: params.message_cap,
            insight_label_chance: params.insight_label_chance,
        }
    }
}

impl FileSalonConfig {
    pub fn to_params(&self) -> SalonParams {
        SalonParams::default()
            .with_guest_count(self.guest_count)
            .with_pacing(Duration::from_millis(self.pacing_ms))
            .with_connect_delay(Duration::from_millis(self.connect_delay_ms))
            .with_join_interval(Duration::from_millis(self.join_interval_ms))
            .with_emergence_interval(self.emergence_interval)
            .with_progress_increment(self.progress_min, self.progress_max)
            .with_message_cap(self.message_cap)
            .with_insight_label_chance(self.insight_label_chance)
    }
}
