use crate::core::metrics::MetricRecord;
use crate::core::model::DnaBase;
use serde::{Deserialize, Serialize};

/// Index of the no-call slot in `called_counts`; bases follow in A, C, G, T order.
const NO_CALL: usize = 0;

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct CorrectedIntensityMetric {
    pub lane: u32,
    pub tile: u32,
    pub cycle: u32,
    pub corrected_int_all: [u16; 4],
    pub corrected_int_called: [f32; 4],
    pub called_counts: [u32; 5],
    #[serde(default)]
    pub signal_to_noise: f32,
}

impl CorrectedIntensityMetric {
    pub fn corrected_int_all(&self, base: DnaBase) -> u16 {
        self.corrected_int_all[base.index()]
    }

    pub fn corrected_int_called(&self, base: DnaBase) -> f32 {
        self.corrected_int_called[base.index()]
    }

    pub fn called_count(&self, base: DnaBase) -> u32 {
        self.called_counts[base.index() + 1]
    }

    /// Clusters called this cycle, no-calls included.
    pub fn total_calls(&self) -> u64 {
        self.called_counts.iter().map(|&c| u64::from(c)).sum()
    }

    pub fn percent_base(&self, base: DnaBase) -> f32 {
        percent_of_calls(u64::from(self.called_count(base)), self.total_calls())
    }

    pub fn percent_nocall(&self) -> f32 {
        percent_of_calls(u64::from(self.called_counts[NO_CALL]), self.total_calls())
    }
}

fn percent_of_calls(count: u64, total: u64) -> f32 {
    if total == 0 {
        return f32::NAN;
    }
    count as f32 * 100.0 / total as f32
}

impl MetricRecord for CorrectedIntensityMetric {
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_percent_base() {
        let m = CorrectedIntensityMetric {
            lane: 1,
            tile: 1101,
            cycle: 1,
            called_counts: [10, 30, 20, 20, 20],
            ..Default::default()
        };
        assert_eq!(m.total_calls(), 100);
        assert_eq!(m.percent_base(DnaBase::A), 30.0);
        assert_eq!(m.percent_nocall(), 10.0);
    }

    #[test]
    fn test_percent_base_without_calls_is_nan() {
        let m = CorrectedIntensityMetric::default();
        assert!(m.percent_base(DnaBase::G).is_nan());
        assert!(m.percent_nocall().is_nan());
    }
}
