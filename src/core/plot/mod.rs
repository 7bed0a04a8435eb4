mod flowcell;
mod heatmap;

pub use flowcell::{
    FlowcellMap, flowcell_range, list_flowcell_metrics, plot_flowcell_map,
    plot_flowcell_map_by_name, populate_flowcell_map, robust_range,
};
pub use heatmap::{AxisRange, GridState, HeatmapGrid};
