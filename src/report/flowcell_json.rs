use crate::core::plot::{AxisRange, FlowcellMap};
use anyhow::{Context, Result};
use serde::Serialize;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

#[derive(Serialize)]
struct FlowcellDocument<'a> {
    title: &'a str,
    subtitle: &'a str,
    label: &'a str,
    range: AxisRange,
    lanes: usize,
    swaths: usize,
    tiles: usize,
    columns: usize,
    /// Row-major, one row per lane.
    values: Vec<Option<f32>>,
    tile_ids: &'a [u32],
}

impl<'a> FlowcellDocument<'a> {
    fn new(map: &'a FlowcellMap) -> Self {
        let grid = map.grid();
        Self {
            title: grid.title(),
            subtitle: grid.subtitle(),
            label: grid.label(),
            range: grid.range(),
            lanes: map.lane_count(),
            swaths: map.swath_count(),
            tiles: map.tile_count(),
            columns: grid.column_count(),
            // JSON has no NaN
            values: grid
                .values()
                .iter()
                .map(|&v| v.is_finite().then_some(v))
                .collect(),
            tile_ids: map.tile_ids(),
        }
    }
}

pub fn write(path: &Path, map: &FlowcellMap) -> Result<()> {
    let file = File::create(path).with_context(|| "create flowcell map failed")?;
    let mut w = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut w, &FlowcellDocument::new(map))?;
    writeln!(w)?;
    w.flush()?;
    Ok(())
}
