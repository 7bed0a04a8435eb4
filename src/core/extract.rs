//! Per-category extraction of one plotted value from a metric record.
//!
//! Each extractor is bound to its secondary key (read, channel or base) when it is
//! built and returns NaN for a record or metric type it has no value for.

use crate::core::metrics::{
    CorrectedIntensityMetric, ErrorMetric, ExtractionMetric, QCollapsedMetric, TileMetric,
};
use crate::core::model::{DnaBase, MetricType};

pub trait MetricValue<R> {
    fn value(&self, record: &R, metric: MetricType) -> f32;
}

pub struct TileValue {
    read: Option<u32>,
}

impl TileValue {
    pub fn new(read: Option<u32>) -> Self {
        Self { read }
    }
}

impl MetricValue<TileMetric> for TileValue {
    fn value(&self, record: &TileMetric, metric: MetricType) -> f32 {
        let per_read = || self.read.and_then(|r| record.read(r));
        match metric {
            MetricType::Clusters => record.cluster_density / 1000.0,
            MetricType::ClustersPF => record.cluster_density_pf / 1000.0,
            MetricType::ClusterCount => record.cluster_count / 1000.0,
            MetricType::ClusterCountPF => record.cluster_count_pf / 1000.0,
            MetricType::PercentAligned => per_read().map_or(f32::NAN, |r| r.percent_aligned),
            MetricType::PercentPhasing => per_read().map_or(f32::NAN, |r| r.percent_phasing),
            MetricType::PercentPrephasing => {
                per_read().map_or(f32::NAN, |r| r.percent_prephasing)
            }
            _ => f32::NAN,
        }
    }
}

pub struct ExtractionValue {
    channel: usize,
}

impl ExtractionValue {
    pub fn new(channel: usize) -> Self {
        Self { channel }
    }
}

impl MetricValue<ExtractionMetric> for ExtractionValue {
    fn value(&self, record: &ExtractionMetric, metric: MetricType) -> f32 {
        match metric {
            MetricType::Intensity => record
                .max_intensity(self.channel)
                .map_or(f32::NAN, f32::from),
            MetricType::Fwhm => record.focus_score(self.channel).unwrap_or(f32::NAN),
            _ => f32::NAN,
        }
    }
}

pub struct CorrectedIntensityValue {
    base: Option<DnaBase>,
}

impl CorrectedIntensityValue {
    pub fn new(base: Option<DnaBase>) -> Self {
        Self { base }
    }
}

impl MetricValue<CorrectedIntensityMetric> for CorrectedIntensityValue {
    fn value(&self, record: &CorrectedIntensityMetric, metric: MetricType) -> f32 {
        match (metric, self.base) {
            (MetricType::PercentNoCall, _) => record.percent_nocall(),
            (MetricType::SignalToNoise, _) => record.signal_to_noise,
            (MetricType::BasePercent, Some(base)) => record.percent_base(base),
            (MetricType::CorrectedIntensity, Some(base)) => {
                f32::from(record.corrected_int_all(base))
            }
            (MetricType::CalledIntensity, Some(base)) => record.corrected_int_called(base),
            _ => f32::NAN,
        }
    }
}

pub struct QValue;

impl MetricValue<QCollapsedMetric> for QValue {
    fn value(&self, record: &QCollapsedMetric, metric: MetricType) -> f32 {
        match metric {
            MetricType::Q20Percent => record.percent_over_q20(),
            MetricType::Q30Percent => record.percent_over_q30(),
            MetricType::AccumPercentQ20 => record.cumulative_percent_over_q20(),
            MetricType::AccumPercentQ30 => record.cumulative_percent_over_q30(),
            MetricType::QScore => record.median as f32,
            _ => f32::NAN,
        }
    }
}

pub struct ErrorValue;

impl MetricValue<ErrorMetric> for ErrorValue {
    fn value(&self, record: &ErrorMetric, metric: MetricType) -> f32 {
        match metric {
            MetricType::ErrorRate => record.error_rate,
            _ => f32::NAN,
        }
    }
}
