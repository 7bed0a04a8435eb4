use crate::core::model::RunInfo;
use serde::{Deserialize, Serialize};
use tracing::debug;

mod corrected_int;
mod error_rate;
mod extraction;
mod q;
mod tile;

pub use corrected_int::CorrectedIntensityMetric;
pub use error_rate::ErrorMetric;
pub use extraction::ExtractionMetric;
pub use q::{QCollapsedMetric, QMetric, QMetricSet};
pub use tile::{ReadMetric, TileMetric};

/// Identity shared by every per-tile metric record.
pub trait MetricRecord {
    fn lane(&self) -> u32;

    fn tile(&self) -> u32;

    /// `None` for metrics recorded once per tile rather than per cycle.
    fn cycle(&self) -> Option<u32> {
        None
    }
}

/// Every metric set of one run, as materialized by the InterOp decoders.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct RunMetrics {
    pub run_info: RunInfo,
    #[serde(default)]
    pub tile: Vec<TileMetric>,
    #[serde(default)]
    pub extraction: Vec<ExtractionMetric>,
    #[serde(default)]
    pub corrected_intensity: Vec<CorrectedIntensityMetric>,
    #[serde(default)]
    pub error: Vec<ErrorMetric>,
    #[serde(default)]
    q: QMetricSet,
    #[serde(skip)]
    q_collapsed: Option<Vec<QCollapsedMetric>>,
}

impl RunMetrics {
    pub fn new(run_info: RunInfo) -> Self {
        Self {
            run_info,
            ..Default::default()
        }
    }

    pub fn q_metrics(&self) -> &QMetricSet {
        &self.q
    }

    /// Replace the Q metric set, dropping any collapsed set built from the old one.
    pub fn set_q_metrics(&mut self, q: QMetricSet) {
        self.q = q;
        self.q_collapsed = None;
    }

    /// Collapsed Q metrics, if `ensure_q_collapsed` has run since the Q set last changed.
    pub fn q_collapsed(&self) -> Option<&[QCollapsedMetric]> {
        self.q_collapsed.as_deref()
    }

    /// Build the collapsed Q set (cumulative values included) on first use and
    /// return the cached copy afterwards.
    pub fn ensure_q_collapsed(&mut self) -> &[QCollapsedMetric] {
        let q = &self.q;
        self.q_collapsed.get_or_insert_with(|| {
            let collapsed = q.collapse();
            debug!(
                records = collapsed.len(),
                binned = q.bins.is_some(),
                "built collapsed q metrics"
            );
            collapsed
        })
    }
}
