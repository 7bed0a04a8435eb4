use crate::core::error::{IndexAxis, InteropError, InteropResult};
use crate::core::extract::{
    CorrectedIntensityValue, ErrorValue, ExtractionValue, MetricValue, QValue, TileValue,
};
use crate::core::filter::RecordFilter;
use crate::core::location;
use crate::core::metrics::{MetricRecord, RunMetrics};
use crate::core::model::{FlowcellLayout, MetricFeature, MetricGroup, MetricType};
use crate::core::plot::heatmap::{AxisRange, HeatmapGrid};
use std::time::Instant;
use tracing::debug;

/// Upper bound applied to error-rate plots.
const MAX_ERROR_RATE: f32 = 5.0;

/// One value per lane (row) and tile position (column), with the tile id that
/// produced each cell.
#[derive(Debug, Default)]
pub struct FlowcellMap {
    grid: HeatmapGrid<'static>,
    tile_ids: Vec<u32>,
    swath_count: usize,
    tile_count: usize,
}

impl FlowcellMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Size the map for `lanes` rows of `swaths * tiles` columns.
    pub fn resize(&mut self, lanes: usize, swaths: usize, tiles: usize) {
        let cols = swaths * tiles;
        if lanes != self.grid.row_count() || cols != self.grid.column_count() {
            self.tile_ids = vec![0; lanes * cols];
        }
        self.grid.resize(lanes, cols);
        self.swath_count = swaths;
        self.tile_count = tiles;
    }

    pub fn set_data(&mut self, row: usize, col: usize, tile: u32, value: f32) -> InteropResult<()> {
        let idx = self.tile_index(row, col)?;
        self.grid.set(row, col, value)?;
        self.tile_ids[idx] = tile;
        Ok(())
    }

    pub fn tile_id(&self, row: usize, col: usize) -> InteropResult<u32> {
        let idx = self.tile_index(row, col)?;
        Ok(self.tile_ids[idx])
    }

    fn tile_index(&self, row: usize, col: usize) -> InteropResult<usize> {
        self.grid.at(row, col)?;
        let idx = row * self.grid.column_count() + col;
        if idx >= self.tile_ids.len() {
            return Err(InteropError::out_of_range(
                IndexAxis::Buffer,
                idx,
                self.tile_ids.len(),
            ));
        }
        Ok(idx)
    }

    pub fn tile_ids(&self) -> &[u32] {
        &self.tile_ids
    }

    pub fn grid(&self) -> &HeatmapGrid<'static> {
        &self.grid
    }

    /// Grid access for range and labels; sizing goes through [`FlowcellMap::resize`].
    pub(crate) fn grid_mut(&mut self) -> &mut HeatmapGrid<'static> {
        &mut self.grid
    }

    pub fn lane_count(&self) -> usize {
        self.grid.row_count()
    }

    pub fn swath_count(&self) -> usize {
        self.swath_count
    }

    pub fn tile_count(&self) -> usize {
        self.tile_count
    }

    pub fn clear(&mut self) {
        self.grid.clear();
        self.tile_ids.clear();
        self.swath_count = 0;
        self.tile_count = 0;
    }
}

/// Write every accepted, non-NaN record value into its lane/tile cell.
///
/// Each written value is also pushed onto `values` for range scaling. An empty
/// record slice leaves the map as it is.
pub fn populate_flowcell_map<R, P, F>(
    records: &[R],
    proxy: &P,
    metric: MetricType,
    layout: &FlowcellLayout,
    filter: &F,
    data: &mut FlowcellMap,
    values: &mut Vec<f32>,
) -> InteropResult<()>
where
    R: MetricRecord,
    P: MetricValue<R>,
    F: RecordFilter,
{
    if records.is_empty() {
        return Ok(());
    }
    let collapse = !filter.is_specific_surface();
    let mut filtered = 0usize;
    let mut missing = 0usize;
    for record in records {
        if !filter.is_valid(record) {
            filtered += 1;
            continue;
        }
        let value = proxy.value(record, metric);
        if value.is_nan() {
            missing += 1;
            continue;
        }
        // lane 0 maps past the last row
        let row = (record.lane() as usize).checked_sub(1).unwrap_or(usize::MAX);
        let col = location::column_index_for(record.tile(), layout, collapse);
        data.set_data(row, col, record.tile(), value)?;
        values.push(value);
    }
    debug!(
        metric = %metric,
        records = records.len(),
        written = records.len() - filtered - missing,
        filtered,
        missing,
        "populated flowcell map"
    );
    Ok(())
}

/// Outlier-resistant display range over the plotted values.
///
/// Quartiles are plain order statistics at `floor(n/4)` and `floor(3n/4)`;
/// the range spans two inter-quartile widths past them, clipped to the data.
/// Sorts `values` in place.
pub fn robust_range(values: &mut [f32]) -> AxisRange {
    if values.is_empty() {
        return AxisRange::default();
    }
    values.sort_by(f32::total_cmp);
    let n = values.len();
    let lower = values[(0.25 * n as f64) as usize];
    let upper = values[(0.75 * n as f64) as usize];
    let iqr = upper - lower;
    AxisRange {
        min: (lower - 2.0 * iqr).max(values[0]),
        max: values[n - 1].min(upper + 2.0 * iqr),
    }
}

/// [`robust_range`], except error rate which always starts at 0 and is capped.
pub fn flowcell_range(metric: MetricType, values: &mut [f32]) -> AxisRange {
    let range = robust_range(values);
    if metric == MetricType::ErrorRate {
        return AxisRange {
            min: 0.0,
            max: range.max.min(MAX_ERROR_RATE),
        };
    }
    range
}

/// Plot one metric over the flowcell.
///
/// The selection is checked against the run before any record is read. On
/// success `data` is replaced by a fully populated, ranged and labeled map; on
/// failure it is left as it was.
pub fn plot_flowcell_map<F: RecordFilter>(
    metrics: &mut RunMetrics,
    metric: MetricType,
    filter: &F,
    data: &mut FlowcellMap,
) -> InteropResult<()> {
    let started = Instant::now();
    filter.validate(metric, &metrics.run_info)?;
    if filter.all_cycles(metric) {
        return Err(InteropError::InvalidFilterOption(
            "All cycles is unsupported".to_string(),
        ));
    }
    if filter.all_reads(metric) && metrics.run_info.reads.len() > 1 {
        return Err(InteropError::InvalidFilterOption(
            "All reads is unsupported".to_string(),
        ));
    }
    if filter.all_channels(metric) {
        return Err(InteropError::InvalidFilterOption(
            "All channels is unsupported".to_string(),
        ));
    }
    if filter.all_bases(metric) {
        return Err(InteropError::InvalidFilterOption(
            "All bases is unsupported".to_string(),
        ));
    }

    let group = metric.group();
    if group == MetricGroup::Q {
        metrics.ensure_q_collapsed();
    }
    let metrics = &*metrics;
    let layout = &metrics.run_info.flowcell;

    let mut map = FlowcellMap::new();
    map.resize(
        layout.lane_count as usize,
        layout.total_swaths(!filter.is_specific_surface()) as usize,
        layout.tile_count as usize,
    );
    let mut values = Vec::with_capacity(map.grid().length());

    match group {
        MetricGroup::Tile => {
            let read = filter.read().or_else(|| match metrics.run_info.reads.as_slice() {
                [only] => Some(only.number),
                _ => None,
            });
            populate_flowcell_map(
                &metrics.tile,
                &TileValue::new(read),
                metric,
                layout,
                filter,
                &mut map,
                &mut values,
            )?;
        }
        MetricGroup::Extraction => {
            let channel = filter.channel().ok_or_else(|| {
                InteropError::InvalidFilterOption("All channels is unsupported".to_string())
            })?;
            populate_flowcell_map(
                &metrics.extraction,
                &ExtractionValue::new(channel),
                metric,
                layout,
                filter,
                &mut map,
                &mut values,
            )?;
        }
        MetricGroup::CorrectedIntensity => {
            populate_flowcell_map(
                &metrics.corrected_intensity,
                &CorrectedIntensityValue::new(filter.dna_base()),
                metric,
                layout,
                filter,
                &mut map,
                &mut values,
            )?;
        }
        MetricGroup::Q => {
            populate_flowcell_map(
                metrics.q_collapsed().unwrap_or_default(),
                &QValue,
                metric,
                layout,
                filter,
                &mut map,
                &mut values,
            )?;
        }
        MetricGroup::Error => {
            populate_flowcell_map(
                &metrics.error,
                &ErrorValue,
                metric,
                layout,
                filter,
                &mut map,
                &mut values,
            )?;
        }
        MetricGroup::Unknown => {
            return Err(InteropError::InvalidMetricType(format!(
                "Unsupported metric type: {} ({} group)",
                metric,
                group.as_str()
            )));
        }
    }

    let range = flowcell_range(metric, &mut values);
    map.grid_mut().set_range(range.min, range.max);

    let barcode = &layout.barcode;
    let title = if barcode.is_empty() {
        metric.description().to_string()
    } else {
        format!("{} {}", barcode, metric.description())
    };
    let mut subtitle = String::new();
    if layout.surface_count > 1 {
        subtitle.push_str(&filter.surface_description());
        subtitle.push(' ');
    }
    subtitle.push_str(&filter.cycle_description());
    if metric.is_channel_metric() {
        subtitle.push(' ');
        subtitle.push_str(&filter.channel_description(&metrics.run_info.channels));
    }
    if metric.is_base_metric() {
        subtitle.push(' ');
        subtitle.push_str(&filter.base_description());
    }
    if metric.is_read_metric() {
        subtitle.push(' ');
        subtitle.push_str(&filter.read_description());
    }
    let grid = map.grid_mut();
    grid.set_title(title);
    grid.set_subtitle(subtitle);
    grid.set_label(metric.description());

    debug!(
        metric = %metric,
        group = group.as_str(),
        values = values.len(),
        min = range.min,
        max = range.max,
        elapsed = ?started.elapsed(),
        "plotted flowcell map"
    );
    *data = map;
    Ok(())
}

/// [`plot_flowcell_map`] for a metric given by name.
pub fn plot_flowcell_map_by_name<F: RecordFilter>(
    metrics: &mut RunMetrics,
    metric_name: &str,
    filter: &F,
    data: &mut FlowcellMap,
) -> InteropResult<()> {
    let metric: MetricType = metric_name.parse()?;
    if metric == MetricType::UnknownMetricType {
        return Err(InteropError::InvalidMetricType(format!(
            "Unsupported metric type: {}",
            metric_name
        )));
    }
    plot_flowcell_map(metrics, metric, filter, data)
}

/// Names of every metric that can be drawn on a flowcell map.
pub fn list_flowcell_metrics() -> Vec<String> {
    MetricType::ALL
        .iter()
        .filter(|m| m.feature() != MetricFeature::Unknown)
        .map(|m| m.name().to_string())
        .collect()
}
