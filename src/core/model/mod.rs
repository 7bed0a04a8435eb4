use crate::core::error::InteropError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

mod layout;
mod qscore;

pub use layout::{FlowcellLayout, ReadInfo, RunInfo};
pub use qscore::{BinTable, MAX_Q_BINS, QHistogram, QScoreBin};

/// Metric set a metric type is read from.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub enum MetricGroup {
    Tile,
    Extraction,
    CorrectedIntensity,
    Q,
    Error,
    Unknown,
}

impl MetricGroup {
    pub fn as_str(self) -> &'static str {
        match self {
            MetricGroup::Tile => "Tile",
            MetricGroup::Extraction => "Extraction",
            MetricGroup::CorrectedIntensity => "CorrectedInt",
            MetricGroup::Q => "Q",
            MetricGroup::Error => "Error",
            MetricGroup::Unknown => "Unknown",
        }
    }
}

/// Most specific key a metric type is indexed by.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum MetricFeature {
    Unknown,
    Tile,
    Cycle,
    Read,
    Channel,
    Base,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub enum MetricType {
    Intensity,
    Fwhm,
    BasePercent,
    PercentNoCall,
    Q20Percent,
    Q30Percent,
    AccumPercentQ20,
    AccumPercentQ30,
    QScore,
    Clusters,
    ClustersPF,
    ClusterCount,
    ClusterCountPF,
    ErrorRate,
    PercentPhasing,
    PercentPrephasing,
    PercentAligned,
    CorrectedIntensity,
    CalledIntensity,
    SignalToNoise,
    UnknownMetricType,
}

impl MetricType {
    /// Every metric type in declaration order, including `UnknownMetricType`.
    pub const ALL: [MetricType; 21] = [
        MetricType::Intensity,
        MetricType::Fwhm,
        MetricType::BasePercent,
        MetricType::PercentNoCall,
        MetricType::Q20Percent,
        MetricType::Q30Percent,
        MetricType::AccumPercentQ20,
        MetricType::AccumPercentQ30,
        MetricType::QScore,
        MetricType::Clusters,
        MetricType::ClustersPF,
        MetricType::ClusterCount,
        MetricType::ClusterCountPF,
        MetricType::ErrorRate,
        MetricType::PercentPhasing,
        MetricType::PercentPrephasing,
        MetricType::PercentAligned,
        MetricType::CorrectedIntensity,
        MetricType::CalledIntensity,
        MetricType::SignalToNoise,
        MetricType::UnknownMetricType,
    ];

    pub fn name(self) -> &'static str {
        match self {
            MetricType::Intensity => "Intensity",
            MetricType::Fwhm => "FWHM",
            MetricType::BasePercent => "BasePercent",
            MetricType::PercentNoCall => "PercentNoCall",
            MetricType::Q20Percent => "Q20Percent",
            MetricType::Q30Percent => "Q30Percent",
            MetricType::AccumPercentQ20 => "AccumPercentQ20",
            MetricType::AccumPercentQ30 => "AccumPercentQ30",
            MetricType::QScore => "QScore",
            MetricType::Clusters => "Clusters",
            MetricType::ClustersPF => "ClustersPF",
            MetricType::ClusterCount => "ClusterCount",
            MetricType::ClusterCountPF => "ClusterCountPF",
            MetricType::ErrorRate => "ErrorRate",
            MetricType::PercentPhasing => "PercentPhasing",
            MetricType::PercentPrephasing => "PercentPrephasing",
            MetricType::PercentAligned => "PercentAligned",
            MetricType::CorrectedIntensity => "CorrectedIntensity",
            MetricType::CalledIntensity => "CalledIntensity",
            MetricType::SignalToNoise => "SignalToNoise",
            MetricType::UnknownMetricType => "UnknownMetricType",
        }
    }

    /// Human-readable text used for plot titles and axis labels.
    pub fn description(self) -> &'static str {
        match self {
            MetricType::Intensity => "Intensity",
            MetricType::Fwhm => "FWHM",
            MetricType::BasePercent => "% Base",
            MetricType::PercentNoCall => "% NoCall",
            MetricType::Q20Percent => "% >=Q20",
            MetricType::Q30Percent => "% >=Q30",
            MetricType::AccumPercentQ20 => "% >=Q20 (Accumulated)",
            MetricType::AccumPercentQ30 => "% >=Q30 (Accumulated)",
            MetricType::QScore => "Median QScore",
            MetricType::Clusters => "Density (K/mm2)",
            MetricType::ClustersPF => "Density PF (K/mm2)",
            MetricType::ClusterCount => "Cluster Count (k)",
            MetricType::ClusterCountPF => "Clusters PF (k)",
            MetricType::ErrorRate => "Error Rate",
            MetricType::PercentPhasing => "% Phasing",
            MetricType::PercentPrephasing => "% Prephasing",
            MetricType::PercentAligned => "% Aligned",
            MetricType::CorrectedIntensity => "Corrected Int",
            MetricType::CalledIntensity => "Called Int",
            MetricType::SignalToNoise => "Signal to Noise",
            MetricType::UnknownMetricType => "Unknown",
        }
    }

    pub fn group(self) -> MetricGroup {
        match self {
            MetricType::Intensity | MetricType::Fwhm => MetricGroup::Extraction,
            MetricType::BasePercent
            | MetricType::PercentNoCall
            | MetricType::CorrectedIntensity
            | MetricType::CalledIntensity
            | MetricType::SignalToNoise => MetricGroup::CorrectedIntensity,
            MetricType::Q20Percent
            | MetricType::Q30Percent
            | MetricType::AccumPercentQ20
            | MetricType::AccumPercentQ30
            | MetricType::QScore => MetricGroup::Q,
            MetricType::Clusters
            | MetricType::ClustersPF
            | MetricType::ClusterCount
            | MetricType::ClusterCountPF
            | MetricType::PercentPhasing
            | MetricType::PercentPrephasing
            | MetricType::PercentAligned => MetricGroup::Tile,
            MetricType::ErrorRate => MetricGroup::Error,
            MetricType::UnknownMetricType => MetricGroup::Unknown,
        }
    }

    pub fn is_cycle_metric(self) -> bool {
        !matches!(self.group(), MetricGroup::Tile | MetricGroup::Unknown)
    }

    pub fn is_read_metric(self) -> bool {
        matches!(
            self,
            MetricType::PercentPhasing | MetricType::PercentPrephasing | MetricType::PercentAligned
        )
    }

    pub fn is_channel_metric(self) -> bool {
        matches!(self, MetricType::Intensity | MetricType::Fwhm)
    }

    pub fn is_base_metric(self) -> bool {
        matches!(
            self,
            MetricType::BasePercent | MetricType::CorrectedIntensity | MetricType::CalledIntensity
        )
    }

    pub fn feature(self) -> MetricFeature {
        if self.group() == MetricGroup::Unknown {
            MetricFeature::Unknown
        } else if self.is_base_metric() {
            MetricFeature::Base
        } else if self.is_channel_metric() {
            MetricFeature::Channel
        } else if self.is_read_metric() {
            MetricFeature::Read
        } else if self.is_cycle_metric() {
            MetricFeature::Cycle
        } else {
            MetricFeature::Tile
        }
    }
}

impl fmt::Display for MetricType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for MetricType {
    type Err = InteropError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        MetricType::ALL
            .iter()
            .copied()
            .filter(|t| *t != MetricType::UnknownMetricType)
            .find(|t| t.name() == s)
            .ok_or_else(|| InteropError::InvalidMetricType(format!("Unsupported metric type: {}", s)))
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub enum DnaBase {
    A,
    C,
    G,
    T,
}

impl DnaBase {
    pub fn index(self) -> usize {
        match self {
            DnaBase::A => 0,
            DnaBase::C => 1,
            DnaBase::G => 2,
            DnaBase::T => 3,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            DnaBase::A => "A",
            DnaBase::C => "C",
            DnaBase::G => "G",
            DnaBase::T => "T",
        }
    }
}

impl FromStr for DnaBase {
    type Err = InteropError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "A" => Ok(DnaBase::A),
            "C" => Ok(DnaBase::C),
            "G" => Ok(DnaBase::G),
            "T" => Ok(DnaBase::T),
            _ => Err(InteropError::InvalidFilterOption(format!(
                "Unknown DNA base: {}",
                s
            ))),
        }
    }
}

/// Convention used to encode surface, swath, section and tile number in a tile id.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub enum TileNamingMethod {
    #[default]
    Unknown,
    /// `SSTT`: surface, swath, two-digit tile number (e.g. 1101).
    FourDigit,
    /// `SWCTT`: surface, swath, section, two-digit tile number (e.g. 11101).
    FiveDigit,
    /// Tiles are numbered consecutively within a lane.
    Absolute,
}
