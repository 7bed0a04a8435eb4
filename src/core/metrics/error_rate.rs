use crate::core::metrics::MetricRecord;
use serde::{Deserialize, Serialize};

/// Alignment error rate (percent) for one tile and cycle.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ErrorMetric {
    pub lane: u32,
    pub tile: u32,
    pub cycle: u32,
    pub error_rate: f32,
}

impl MetricRecord for ErrorMetric {
    fn lane(&self) -> u32 {
        self.lane
    }

    fn tile(&self) -> u32 {
        self.tile
    }

    fn cycle(&self) -> Option<u32> {
        Some(self.cycle)
    }
}
