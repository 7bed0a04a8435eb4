use kira_flowcell::core::error::{IndexAxis, InteropError};
use kira_flowcell::core::filter::FilterOptions;
use kira_flowcell::core::io::load_run_metrics;
use kira_flowcell::core::model::{DnaBase, MetricType, TileNamingMethod};
use kira_flowcell::core::plot::{
    AxisRange, FlowcellMap, GridState, plot_flowcell_map, plot_flowcell_map_by_name,
};
use kira_flowcell::core::summary::lane_q_summaries;
use std::io::Write;

const RUN: &str = r#"{
    "run_info": {
        "flowcell": {
            "lane_count": 2,
            "tile_count": 2,
            "swath_count": 1,
            "surface_count": 2,
            "naming_method": "FourDigit",
            "barcode": "HXYZ"
        },
        "reads": [
            {"number": 1, "cycle_count": 3},
            {"number": 2, "cycle_count": 3}
        ],
        "channels": ["Red", "Green"]
    },
    "tile": [
        {"lane": 1, "tile": 1101, "cluster_density": 200000.0, "cluster_density_pf": 180000.0,
         "cluster_count": 1000.0, "cluster_count_pf": 900.0,
         "reads": [{"read": 1, "percent_aligned": 90.0, "percent_phasing": 0.1, "percent_prephasing": 0.05},
                   {"read": 2, "percent_aligned": 80.0, "percent_phasing": 0.2, "percent_prephasing": 0.06}]},
        {"lane": 2, "tile": 2102, "cluster_density": 220000.0, "cluster_density_pf": 190000.0,
         "cluster_count": 1100.0, "cluster_count_pf": 950.0, "reads": []}
    ],
    "corrected_intensity": [
        {"lane": 1, "tile": 1102, "cycle": 2,
         "corrected_int_all": [100, 200, 300, 400],
         "corrected_int_called": [110.0, 210.0, 310.0, 410.0],
         "called_counts": [10, 30, 20, 20, 20],
         "signal_to_noise": 8.0}
    ],
    "error": [
        {"lane": 1, "tile": 1101, "cycle": 1, "error_rate": 0.4},
        {"lane": 1, "tile": 1102, "cycle": 1, "error_rate": 0.6},
        {"lane": 2, "tile": 2101, "cycle": 1, "error_rate": 9.0}
    ],
    "q": {
        "bins": null,
        "metrics": [
            {"lane": 1, "tile": 1101, "cycle": 1,
             "histogram": {"counts": [0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,4]}},
            {"lane": 1, "tile": 1101, "cycle": 2,
             "histogram": {"counts": [0,0,0,0,0,0,0,0,0,0,4,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0]}}
        ]
    }
}"#;

fn write_run() -> tempfile::NamedTempFile {
    let mut file = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
    file.write_all(RUN.as_bytes()).unwrap();
    file
}

#[test]
fn error_rate_map_from_file() {
    let file = write_run();
    let mut metrics = load_run_metrics(file.path()).unwrap();
    let filter = FilterOptions::new(TileNamingMethod::FourDigit).with_cycle(1);
    let mut map = FlowcellMap::new();
    plot_flowcell_map(&mut metrics, MetricType::ErrorRate, &filter, &mut map).unwrap();

    let grid = map.grid();
    assert_eq!(grid.state(), GridState::Labeled);
    // both surfaces land on the same swath columns
    assert_eq!((grid.row_count(), grid.column_count()), (2, 2));
    assert_eq!(grid.at(0, 0).unwrap(), 0.4);
    assert_eq!(grid.at(0, 1).unwrap(), 0.6);
    assert_eq!(grid.at(1, 0).unwrap(), 9.0);
    assert_eq!(map.tile_id(1, 0).unwrap(), 2101);
    assert_eq!(grid.range(), AxisRange { min: 0.0, max: 5.0 });
    assert_eq!(grid.title(), "HXYZ Error Rate");
    assert_eq!(grid.subtitle(), "All Surfaces Cycle 1");
    assert!(matches!(
        grid.at(2, 0),
        Err(InteropError::OutOfRange {
            axis: IndexAxis::Row,
            ..
        })
    ));
}

#[test]
fn read_metric_needs_a_read_on_multi_read_runs() {
    let file = write_run();
    let mut metrics = load_run_metrics(file.path()).unwrap();
    let mut map = FlowcellMap::new();
    let filter = FilterOptions::new(TileNamingMethod::FourDigit);
    assert!(matches!(
        plot_flowcell_map(&mut metrics, MetricType::PercentAligned, &filter, &mut map),
        Err(InteropError::InvalidFilterOption(_))
    ));

    let filter = filter.with_read(2).with_surface(1);
    plot_flowcell_map(&mut metrics, MetricType::PercentAligned, &filter, &mut map).unwrap();
    assert_eq!(map.grid().column_count(), 4);
    assert_eq!(map.grid().at(0, 0).unwrap(), 80.0);
    assert_eq!(map.grid().subtitle(), "Top All Cycles Read 2");
}

#[test]
fn base_metric_by_name() {
    let file = write_run();
    let mut metrics = load_run_metrics(file.path()).unwrap();
    let mut map = FlowcellMap::new();
    let filter = FilterOptions::new(TileNamingMethod::FourDigit)
        .with_cycle(2)
        .with_base(DnaBase::A);
    plot_flowcell_map_by_name(&mut metrics, "BasePercent", &filter, &mut map).unwrap();
    assert_eq!(map.grid().at(0, 1).unwrap(), 30.0);
    assert_eq!(map.grid().label(), "% Base");
}

#[test]
fn accumulated_q30_folds_earlier_cycles() {
    let file = write_run();
    let mut metrics = load_run_metrics(file.path()).unwrap();
    let mut map = FlowcellMap::new();
    let filter = FilterOptions::new(TileNamingMethod::FourDigit).with_cycle(2);

    plot_flowcell_map(&mut metrics, MetricType::Q30Percent, &filter, &mut map).unwrap();
    assert_eq!(map.grid().at(0, 0).unwrap(), 0.0);

    plot_flowcell_map(&mut metrics, MetricType::AccumPercentQ30, &filter, &mut map).unwrap();
    assert_eq!(map.grid().at(0, 0).unwrap(), 50.0);

    let rows = lane_q_summaries(metrics.q_metrics(), 2).unwrap();
    assert_eq!(rows[0].total, 8);
    assert_eq!(rows[0].percent_q30, 50.0);
}
