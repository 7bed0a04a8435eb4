use crate::cli::args::{Cli, Commands, PlotArgs, QsummaryArgs};
use anyhow::{Context, Result};
use clap::Parser;
use kira_flowcell::core::filter::FilterOptions;
use kira_flowcell::core::io;
use kira_flowcell::core::plot::{self, FlowcellMap};
use kira_flowcell::core::summary;
use kira_flowcell::report;
use std::fs;
use std::path::Path;
use std::time::{Duration, Instant};
use tracing::{debug, info};

pub fn entry() -> Result<()> {
    let cli = Cli::parse();
    init_logging(&cli);
    match cli.command {
        Commands::ListMetrics => list_metrics(),
        Commands::Plot(args) => run_plot(args),
        Commands::Qsummary(args) => run_qsummary(args),
    }
}

fn init_logging(cli: &Cli) {
    use tracing_subscriber::{EnvFilter, fmt, prelude::*};

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(cli.log_level.as_str()));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
        .init();
}

fn list_metrics() -> Result<()> {
    for name in plot::list_flowcell_metrics() {
        println!("{}", name);
    }
    Ok(())
}

fn run_plot(args: PlotArgs) -> Result<()> {
    let t0 = Instant::now();

    let t_load = Instant::now();
    let mut metrics = io::load_run_metrics(&args.metrics)?;
    stage_done("load", t_load);

    let mut filter = FilterOptions::new(metrics.run_info.flowcell.naming_method);
    filter.lane = args.lane;
    filter.surface = args.surface;
    filter.cycle = args.cycle;
    filter.read = args.read;
    filter.channel = args.channel;
    filter.base = args.base;

    let t_plot = Instant::now();
    let mut map = FlowcellMap::new();
    plot::plot_flowcell_map_by_name(&mut metrics, &args.metric, &filter, &mut map)
        .with_context(|| format!("failed to plot {}", args.metric))?;
    stage_done("plot", t_plot);

    let t_write = Instant::now();
    ensure_parent(&args.out)?;
    report::flowcell_json::write(&args.out, &map)
        .with_context(|| format!("failed to write {}", args.out.display()))?;
    stage_done("write", t_write);

    info!(
        metric = %args.metric,
        out = %args.out.display(),
        lanes = map.lane_count(),
        columns = map.grid().column_count(),
        total = %fmt_dur(t0.elapsed()),
        "flowcell map written"
    );
    Ok(())
}

fn run_qsummary(args: QsummaryArgs) -> Result<()> {
    let t0 = Instant::now();

    let t_load = Instant::now();
    let metrics = io::load_run_metrics(&args.metrics)?;
    stage_done("load", t_load);

    let t_summary = Instant::now();
    let rows = summary::lane_q_summaries(
        metrics.q_metrics(),
        metrics.run_info.flowcell.lane_count,
    )?;
    stage_done("summary", t_summary);

    let t_write = Instant::now();
    ensure_parent(&args.out)?;
    report::summary_txt::write(&args.out, &rows)
        .with_context(|| format!("failed to write {}", args.out.display()))?;
    stage_done("write", t_write);

    info!(
        out = %args.out.display(),
        lanes = rows.len().saturating_sub(1),
        total = %fmt_dur(t0.elapsed()),
        "q-score summary written"
    );
    Ok(())
}

fn ensure_parent(path: &Path) -> Result<()> {
    match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => fs::create_dir_all(dir)
            .with_context(|| format!("failed to create output dir {}", dir.display())),
        _ => Ok(()),
    }
}

fn stage_done(name: &str, t: Instant) {
    debug!(stage = name, elapsed = %fmt_dur(t.elapsed()), "stage finished");
}

fn fmt_dur(d: Duration) -> String {
    if d.as_secs_f64() < 1.0 {
        format!("{}ms", d.as_millis())
    } else {
        format!("{:.3}s", d.as_secs_f64())
    }
}
