use crate::core::metrics::MetricRecord;
use crate::core::model::{BinTable, QHistogram};
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct QMetric {
    pub lane: u32,
    pub tile: u32,
    pub cycle: u32,
    pub histogram: QHistogram,
}

impl MetricRecord for QMetric {
    fn lane(&self) -> u32 {
        self.lane
    }

    fn tile(&self) -> u32 {
        self.tile
    }

    fn cycle(&self) -> Option<u32> {
        Some(self.cycle)
    }
}

/// Q metrics of one run together with the bin table from their header.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct QMetricSet {
    #[serde(default)]
    pub bins: Option<BinTable>,
    #[serde(default)]
    pub metrics: Vec<QMetric>,
}

impl QMetricSet {
    pub fn new(bins: Option<BinTable>, metrics: Vec<QMetric>) -> Self {
        Self { bins, metrics }
    }

    pub fn len(&self) -> usize {
        self.metrics.len()
    }

    pub fn is_empty(&self) -> bool {
        self.metrics.is_empty()
    }

    /// Sort by (lane, tile, cycle) and fill every histogram's cumulative counts,
    /// each cycle folding in the previous cycle of the same tile.
    pub fn populate_cumulative_distribution(&mut self) {
        self.metrics.sort_by_key(|m| (m.lane, m.tile, m.cycle));
        for i in 0..self.metrics.len() {
            let (done, rest) = self.metrics.split_at_mut(i);
            let cur = &mut rest[0];
            match done.last() {
                Some(prev) if prev.lane == cur.lane && prev.tile == cur.tile => {
                    cur.histogram.accumulate(Some(&prev.histogram))
                }
                _ => cur.histogram.accumulate(None),
            }
        }
    }

    /// Reduce every histogram to Q20/Q30/total/median plus their cumulative values.
    pub fn collapse(&self) -> Vec<QCollapsedMetric> {
        let bins = self.bins.as_ref();
        let q20 = BinTable::index_for_q_value(bins, 20) as u32;
        let q30 = BinTable::index_for_q_value(bins, 30) as u32;

        let mut ordered = self.clone();
        ordered.populate_cumulative_distribution();
        ordered
            .metrics
            .iter()
            .map(|m| {
                let h = &m.histogram;
                QCollapsedMetric {
                    lane: m.lane,
                    tile: m.tile,
                    cycle: m.cycle,
                    q20: h.total_over(q20, None),
                    q30: h.total_over(q30, None),
                    total: h.sum(),
                    median: h.median(bins),
                    cumulative_q20: h.total_over_cumulative(q20, None),
                    cumulative_q30: h.total_over_cumulative(q30, None),
                    cumulative_total: h.sum_cumulative(),
                }
            })
            .collect()
    }
}

/// A Q metric reduced to the counts the flowcell map plots.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct QCollapsedMetric {
    pub lane: u32,
    pub tile: u32,
    pub cycle: u32,
    pub q20: u64,
    pub q30: u64,
    pub total: u64,
    pub median: u32,
    pub cumulative_q20: u64,
    pub cumulative_q30: u64,
    pub cumulative_total: u64,
}

impl QCollapsedMetric {
    pub fn percent_over_q20(&self) -> f32 {
        ratio(self.q20, self.total)
    }

    pub fn percent_over_q30(&self) -> f32 {
        ratio(self.q30, self.total)
    }

    pub fn cumulative_percent_over_q20(&self) -> f32 {
        ratio(self.cumulative_q20, self.cumulative_total)
    }

    pub fn cumulative_percent_over_q30(&self) -> f32 {
        ratio(self.cumulative_q30, self.cumulative_total)
    }
}

fn ratio(count: u64, total: u64) -> f32 {
    if total == 0 {
        return f32::NAN;
    }
    100.0 * count as f32 / total as f32
}

impl MetricRecord for QCollapsedMetric {
    fn lane(&self) -> u32 {
        self.lane
    }

    fn tile(&self) -> u32 {
        self.tile
    }

    fn cycle(&self) -> Option<u32> {
        Some(self.cycle)
    }
}
