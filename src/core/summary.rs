//! Lane-level q-score summaries built from raw Q histograms.

use crate::core::error::InteropResult;
use crate::core::metrics::QMetricSet;
use crate::core::model::{BinTable, QHistogram};
use serde::Serialize;

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct QSummary {
    /// `None` for the whole-run row.
    pub lane: Option<u32>,
    pub records: usize,
    pub total: u64,
    pub percent_q20: f32,
    pub percent_q30: f32,
    pub median: u32,
}

/// One summary per lane `1..=lane_count`, followed by the whole-run summary.
///
/// Histograms whose length differs from the first record's are left out of
/// the distribution.
pub fn lane_q_summaries(q: &QMetricSet, lane_count: u32) -> InteropResult<Vec<QSummary>> {
    let width = q.metrics.first().map_or(0, |m| m.histogram.len());
    let mut lanes = vec![(0usize, vec![0u64; width]); lane_count as usize];
    let mut run = (0usize, vec![0u64; width]);

    for m in &q.metrics {
        m.histogram.accumulate_into(&mut run.1);
        run.0 += 1;
        if let Some((records, dist)) = (m.lane as usize)
            .checked_sub(1)
            .and_then(|i| lanes.get_mut(i))
        {
            m.histogram.accumulate_into(dist);
            *records += 1;
        }
    }

    let bins = q.bins.as_ref();
    let mut out = Vec::with_capacity(lanes.len() + 1);
    for (i, (records, dist)) in lanes.into_iter().enumerate() {
        out.push(summarize(Some(i as u32 + 1), records, dist, bins)?);
    }
    out.push(summarize(None, run.0, run.1, bins)?);
    Ok(out)
}

fn summarize(
    lane: Option<u32>,
    records: usize,
    distribution: Vec<u64>,
    bins: Option<&BinTable>,
) -> InteropResult<QSummary> {
    let hist = QHistogram::new(distribution)?;
    let total = hist.sum();
    let q20 = BinTable::index_for_q_value(bins, 20) as u32;
    let q30 = BinTable::index_for_q_value(bins, 30) as u32;
    Ok(QSummary {
        lane,
        records,
        total,
        percent_q20: hist.percent_over(q20, None),
        percent_q30: hist.percent_over(q30, None),
        median: if total == 0 { 0 } else { hist.median(bins) },
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::metrics::QMetric;
    use crate::core::model::QScoreBin;

    fn metric(lane: u32, counts: Vec<u64>) -> QMetric {
        QMetric {
            lane,
            tile: 1101,
            cycle: 1,
            histogram: QHistogram::new(counts).unwrap(),
        }
    }

    fn hist(entries: &[(usize, u64)]) -> Vec<u64> {
        let mut counts = vec![0u64; 40];
        for &(i, c) in entries {
            counts[i] = c;
        }
        counts
    }

    #[test]
    fn test_lane_and_run_rows() {
        let set = QMetricSet::new(
            None,
            vec![
                metric(1, hist(&[(9, 5), (34, 5)])),
                metric(1, hist(&[(34, 10)])),
                metric(2, hist(&[(24, 4)])),
            ],
        );
        let rows = lane_q_summaries(&set, 3).unwrap();
        assert_eq!(rows.len(), 4);

        assert_eq!(rows[0].lane, Some(1));
        assert_eq!(rows[0].records, 2);
        assert_eq!(rows[0].total, 20);
        assert_eq!(rows[0].percent_q30, 75.0);
        assert_eq!(rows[0].median, 35);

        assert_eq!(rows[1].percent_q20, 100.0);
        assert_eq!(rows[1].percent_q30, 0.0);
        assert_eq!(rows[1].median, 25);

        assert_eq!(rows[2].records, 0);
        assert!(rows[2].percent_q20.is_nan());
        assert_eq!(rows[2].median, 0);

        assert_eq!(rows[3].lane, None);
        assert_eq!(rows[3].total, 24);
    }

    #[test]
    fn test_binned_median_uses_bin_values() {
        let bins = BinTable::new(vec![
            QScoreBin::new(2, 9, 7),
            QScoreBin::new(10, 29, 22),
            QScoreBin::new(30, 41, 37),
        ])
        .unwrap();
        let set = QMetricSet::new(Some(bins), vec![metric(1, vec![1, 2, 7])]);
        let rows = lane_q_summaries(&set, 1).unwrap();
        assert_eq!(rows[0].median, 37);
        // first bin with value >= 30 is index 2
        assert_eq!(rows[0].percent_q30, 70.0);
        assert_eq!(rows[0].percent_q20, 90.0);
    }

    #[test]
    fn test_empty_set() {
        let rows = lane_q_summaries(&QMetricSet::default(), 2).unwrap();
        assert_eq!(rows.len(), 3);
        assert!(rows.iter().all(|r| r.total == 0 && r.records == 0));
    }
}
