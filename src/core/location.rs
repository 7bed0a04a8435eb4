//! Maps a tile id onto its column in a lane row of the flowcell map.

use crate::core::model::{FlowcellLayout, TileNamingMethod};

/// Surface number (1 = top, 2 = bottom) encoded in the tile id.
pub fn surface(tile_id: u32, method: TileNamingMethod) -> u32 {
    match method {
        TileNamingMethod::FourDigit => tile_id / 1000,
        TileNamingMethod::FiveDigit => tile_id / 10000,
        TileNamingMethod::Absolute | TileNamingMethod::Unknown => 1,
    }
}

pub fn swath(tile_id: u32, method: TileNamingMethod) -> u32 {
    match method {
        TileNamingMethod::FourDigit => (tile_id / 100) % 10,
        TileNamingMethod::FiveDigit => (tile_id / 1000) % 10,
        TileNamingMethod::Absolute | TileNamingMethod::Unknown => 1,
    }
}

/// Section (camera) within the swath; four-digit ids have a single section.
pub fn section(tile_id: u32, method: TileNamingMethod) -> u32 {
    match method {
        TileNamingMethod::FiveDigit => (tile_id / 100) % 10,
        TileNamingMethod::FourDigit | TileNamingMethod::Absolute | TileNamingMethod::Unknown => 1,
    }
}

/// Tile number within its section.
pub fn tile_number(tile_id: u32, method: TileNamingMethod) -> u32 {
    match method {
        TileNamingMethod::FourDigit | TileNamingMethod::FiveDigit => tile_id % 100,
        TileNamingMethod::Absolute => tile_id,
        TileNamingMethod::Unknown => 1,
    }
}

/// Zero-based column of a tile within its lane row.
///
/// Columns run tile by tile along a swath, swath after swath. Unless surfaces are
/// collapsed, the bottom surface's swaths follow the top surface's. Malformed
/// zero components count as the first swath/section/tile, and an unknown naming
/// method places every tile in column 0.
pub fn column_index(
    tile_id: u32,
    method: TileNamingMethod,
    sections_per_lane: u32,
    tile_count: u32,
    swath_count: u32,
    collapse_surfaces: bool,
) -> usize {
    if method == TileNamingMethod::Unknown {
        return 0;
    }
    let tiles_per_section = tile_count / sections_per_lane.max(1);
    let within_swath = section(tile_id, method).saturating_sub(1) * tiles_per_section
        + tile_number(tile_id, method).saturating_sub(1);
    let mut swath_index = swath(tile_id, method).saturating_sub(1);
    if !collapse_surfaces {
        swath_index += surface(tile_id, method).saturating_sub(1) * swath_count;
    }
    swath_index as usize * tile_count as usize + within_swath as usize
}

/// [`column_index`] with the geometry taken from a layout.
pub fn column_index_for(tile_id: u32, layout: &FlowcellLayout, collapse_surfaces: bool) -> usize {
    column_index(
        tile_id,
        layout.naming_method,
        layout.sections_per_lane,
        layout.tile_count,
        layout.swath_count,
        collapse_surfaces,
    )
}
