use crate::core::model::TileNamingMethod;
use serde::{Deserialize, Serialize};

/// Physical geometry of a flowcell, fixed for the whole run.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct FlowcellLayout {
    pub lane_count: u32,
    /// Tiles along one swath of one surface, across all sections.
    pub tile_count: u32,
    pub swath_count: u32,
    #[serde(default = "default_one")]
    pub sections_per_lane: u32,
    #[serde(default = "default_one")]
    pub surface_count: u32,
    #[serde(default)]
    pub naming_method: TileNamingMethod,
    #[serde(default)]
    pub barcode: String,
}

fn default_one() -> u32 {
    1
}

impl FlowcellLayout {
    /// Swaths laid side by side in one lane row. Collapsed surfaces share their swaths.
    pub fn total_swaths(&self, collapse_surfaces: bool) -> u32 {
        if collapse_surfaces {
            self.swath_count
        } else {
            self.swath_count * self.surface_count
        }
    }

    pub fn tiles_per_lane(&self) -> u32 {
        self.tile_count * self.swath_count * self.surface_count
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ReadInfo {
    pub number: u32,
    pub cycle_count: u32,
    #[serde(default)]
    pub is_index: bool,
}

/// Run-level facts the flowcell pipeline consumes but never changes.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct RunInfo {
    pub flowcell: FlowcellLayout,
    #[serde(default)]
    pub reads: Vec<ReadInfo>,
    #[serde(default)]
    pub channels: Vec<String>,
}

impl RunInfo {
    pub fn total_cycles(&self) -> u32 {
        self.reads.iter().map(|r| r.cycle_count).sum()
    }
}
