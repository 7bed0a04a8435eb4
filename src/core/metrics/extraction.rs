use crate::core::metrics::MetricRecord;
use serde::{Deserialize, Serialize};

/// Per-channel image intensity and focus for one tile and cycle.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ExtractionMetric {
    pub lane: u32,
    pub tile: u32,
    pub cycle: u32,
    pub max_intensity: Vec<u16>,
    pub focus_score: Vec<f32>,
}

impl ExtractionMetric {
    pub fn max_intensity(&self, channel: usize) -> Option<u16> {
        self.max_intensity.get(channel).copied()
    }

    pub fn focus_score(&self, channel: usize) -> Option<f32> {
        self.focus_score.get(channel).copied()
    }
}

impl MetricRecord for ExtractionMetric {
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
