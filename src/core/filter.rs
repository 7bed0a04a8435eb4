//! Record selection for flowcell plots.

use crate::core::error::{InteropError, InteropResult};
use crate::core::location;
use crate::core::metrics::MetricRecord;
use crate::core::model::{DnaBase, MetricType, RunInfo, TileNamingMethod};

/// What the flowcell pipeline asks of a filter.
pub trait RecordFilter {
    /// Reject selections that point outside the run.
    fn validate(&self, metric: MetricType, run_info: &RunInfo) -> InteropResult<()>;

    /// Whether a record belongs to the requested lane, surface and cycle.
    fn is_valid<R: MetricRecord + ?Sized>(&self, record: &R) -> bool;

    fn is_specific_surface(&self) -> bool;

    fn channel(&self) -> Option<usize>;

    fn dna_base(&self) -> Option<DnaBase>;

    fn read(&self) -> Option<u32>;

    fn all_cycles(&self, metric: MetricType) -> bool;

    fn all_reads(&self, metric: MetricType) -> bool;

    fn all_channels(&self, metric: MetricType) -> bool;

    fn all_bases(&self, metric: MetricType) -> bool;

    fn surface_description(&self) -> String;

    fn cycle_description(&self) -> String;

    fn channel_description(&self, channels: &[String]) -> String;

    fn base_description(&self) -> String;

    fn read_description(&self) -> String;
}

/// User selection; `None` in any field means "all".
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FilterOptions {
    pub naming_method: TileNamingMethod,
    pub lane: Option<u32>,
    pub surface: Option<u32>,
    pub cycle: Option<u32>,
    pub read: Option<u32>,
    pub channel: Option<usize>,
    pub base: Option<DnaBase>,
}

impl FilterOptions {
    pub fn new(naming_method: TileNamingMethod) -> Self {
        Self {
            naming_method,
            ..Default::default()
        }
    }

    pub fn with_lane(mut self, lane: u32) -> Self {
        self.lane = Some(lane);
        self
    }

    pub fn with_surface(mut self, surface: u32) -> Self {
        self.surface = Some(surface);
        self
    }

    pub fn with_cycle(mut self, cycle: u32) -> Self {
        self.cycle = Some(cycle);
        self
    }

    pub fn with_read(mut self, read: u32) -> Self {
        self.read = Some(read);
        self
    }

    pub fn with_channel(mut self, channel: usize) -> Self {
        self.channel = Some(channel);
        self
    }

    pub fn with_base(mut self, base: DnaBase) -> Self {
        self.base = Some(base);
        self
    }
}

fn invalid(msg: String) -> InteropError {
    InteropError::InvalidFilterOption(msg)
}

impl RecordFilter for FilterOptions {
    fn validate(&self, metric: MetricType, run_info: &RunInfo) -> InteropResult<()> {
        let layout = &run_info.flowcell;
        if let Some(lane) = self.lane {
            if lane == 0 || lane > layout.lane_count {
                return Err(invalid(format!(
                    "Lane {} is out of range (1-{})",
                    lane, layout.lane_count
                )));
            }
        }
        if let Some(surface) = self.surface {
            if surface == 0 || surface > layout.surface_count {
                return Err(invalid(format!(
                    "Surface {} is out of range (1-{})",
                    surface, layout.surface_count
                )));
            }
        }
        if let Some(cycle) = self.cycle {
            let total = run_info.total_cycles();
            if cycle == 0 || (total > 0 && cycle > total) {
                return Err(invalid(format!(
                    "Cycle {} is out of range (1-{})",
                    cycle, total
                )));
            }
        }
        if let Some(read) = self.read {
            if !run_info.reads.is_empty() && !run_info.reads.iter().any(|r| r.number == read) {
                return Err(invalid(format!("Read {} is not part of the run", read)));
            }
        }
        if let Some(channel) = self.channel {
            if metric.is_channel_metric()
                && !run_info.channels.is_empty()
                && channel >= run_info.channels.len()
            {
                return Err(invalid(format!(
                    "Channel {} is out of range (0-{})",
                    channel,
                    run_info.channels.len() - 1
                )));
            }
        }
        Ok(())
    }

    fn is_valid<R: MetricRecord + ?Sized>(&self, record: &R) -> bool {
        if self.lane.is_some_and(|lane| lane != record.lane()) {
            return false;
        }
        if self
            .surface
            .is_some_and(|s| s != location::surface(record.tile(), self.naming_method))
        {
            return false;
        }
        match (self.cycle, record.cycle()) {
            (Some(wanted), Some(cycle)) => wanted == cycle,
            _ => true,
        }
    }

    fn is_specific_surface(&self) -> bool {
        self.surface.is_some()
    }

    fn channel(&self) -> Option<usize> {
        self.channel
    }

    fn dna_base(&self) -> Option<DnaBase> {
        self.base
    }

    fn read(&self) -> Option<u32> {
        self.read
    }

    fn all_cycles(&self, metric: MetricType) -> bool {
        self.cycle.is_none() && metric.is_cycle_metric()
    }

    fn all_reads(&self, metric: MetricType) -> bool {
        self.read.is_none() && metric.is_read_metric()
    }

    fn all_channels(&self, metric: MetricType) -> bool {
        self.channel.is_none() && metric.is_channel_metric()
    }

    fn all_bases(&self, metric: MetricType) -> bool {
        self.base.is_none() && metric.is_base_metric()
    }

    fn surface_description(&self) -> String {
        match self.surface {
            None => "All Surfaces".to_string(),
            Some(1) => "Top".to_string(),
            Some(2) => "Bottom".to_string(),
            Some(s) => format!("Surface {}", s),
        }
    }

    fn cycle_description(&self) -> String {
        match self.cycle {
            None => "All Cycles".to_string(),
            Some(c) => format!("Cycle {}", c),
        }
    }

    fn channel_description(&self, channels: &[String]) -> String {
        match self.channel {
            None => "All Channels".to_string(),
            Some(c) => channels
                .get(c)
                .cloned()
                .unwrap_or_else(|| format!("Channel {}", c + 1)),
        }
    }

    fn base_description(&self) -> String {
        match self.base {
            None => "All Bases".to_string(),
            Some(b) => b.as_str().to_string(),
        }
    }

    fn read_description(&self) -> String {
        match self.read {
            None => "All Reads".to_string(),
            Some(r) => format!("Read {}", r),
        }
    }
}
