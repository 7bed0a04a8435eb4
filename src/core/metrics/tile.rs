use crate::core::metrics::MetricRecord;
use serde::{Deserialize, Serialize};

/// Per-read values reported for one tile.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ReadMetric {
    pub read: u32,
    pub percent_aligned: f32,
    pub percent_phasing: f32,
    pub percent_prephasing: f32,
}

/// Cluster density and count for a tile, plus per-read phasing and alignment.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct TileMetric {
    pub lane: u32,
    pub tile: u32,
    pub cluster_density: f32,
    pub cluster_density_pf: f32,
    pub cluster_count: f32,
    pub cluster_count_pf: f32,
    #[serde(default)]
    pub reads: Vec<ReadMetric>,
}

impl TileMetric {
    pub fn read(&self, number: u32) -> Option<&ReadMetric> {
        self.reads.iter().find(|r| r.read == number)
    }
}

impl MetricRecord for TileMetric {
    fn lane(&self) -> u32 {
        self.lane
    }

    fn tile(&self) -> u32 {
        self.tile
    }
}
