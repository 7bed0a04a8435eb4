use clap::{Parser, Subcommand, ValueEnum};
use kira_flowcell::core::model::DnaBase;
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "kira-flowcell",
    version,
    about = "Flowcell heatmaps and q-score summaries from InterOp run metrics"
)]
pub struct Cli {
    /// Log level
    #[arg(long, global = true, value_enum, default_value_t = LogLevel::Info, env = "KIRA_LOG")]
    pub log_level: LogLevel,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Print the metric names that can be drawn on a flowcell map
    ListMetrics,
    /// Plot one metric over the flowcell and write the map as JSON
    Plot(PlotArgs),
    /// Write per-lane q-score summaries
    Qsummary(QsummaryArgs),
}

#[derive(Parser)]
pub struct PlotArgs {
    /// Run metrics document (.json or .json.gz)
    pub metrics: PathBuf,

    #[arg(long)]
    pub metric: String,

    #[arg(long)]
    pub out: PathBuf,

    #[arg(long)]
    pub lane: Option<u32>,

    /// 1 = top, 2 = bottom
    #[arg(long)]
    pub surface: Option<u32>,

    #[arg(long)]
    pub cycle: Option<u32>,

    #[arg(long)]
    pub read: Option<u32>,

    /// Zero-based channel index
    #[arg(long)]
    pub channel: Option<usize>,

    /// A, C, G or T
    #[arg(long)]
    pub base: Option<DnaBase>,
}

#[derive(Parser)]
pub struct QsummaryArgs {
    pub metrics: PathBuf,

    #[arg(long)]
    pub out: PathBuf,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    pub fn as_str(self) -> &'static str {
        match self {
            LogLevel::Error => "error",
            LogLevel::Warn => "warn",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
            LogLevel::Trace => "trace",
        }
    }
}
