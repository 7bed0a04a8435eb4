use crate::core::error::{IndexAxis, InteropError, InteropResult};
use serde::{Deserialize, Serialize};

/// Upper bound on the number of bins in a q-score histogram.
pub const MAX_Q_BINS: usize = 50;

/// One bin of a quantized q-score table.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct QScoreBin {
    pub lower: u16,
    pub upper: u16,
    pub value: u16,
}

impl QScoreBin {
    pub fn new(lower: u16, upper: u16, value: u16) -> Self {
        Self {
            lower,
            upper,
            value,
        }
    }
}

/// Bin table shared by every histogram of one Q metric set.
///
/// A histogram statistic called without a table (or with an empty one) treats the
/// bin index as the q-score, index 0 being Q1.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<QScoreBin>", into = "Vec<QScoreBin>")]
pub struct BinTable {
    bins: Vec<QScoreBin>,
}

impl BinTable {
    pub fn new(bins: Vec<QScoreBin>) -> InteropResult<Self> {
        if bins.len() > MAX_Q_BINS {
            return Err(InteropError::out_of_range(
                IndexAxis::Bin,
                bins.len(),
                MAX_Q_BINS,
            ));
        }
        Ok(Self { bins })
    }

    pub fn bins(&self) -> &[QScoreBin] {
        &self.bins
    }

    pub fn len(&self) -> usize {
        self.bins.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bins.is_empty()
    }

    pub fn bin_at(&self, n: usize) -> InteropResult<&QScoreBin> {
        self.bins
            .get(n)
            .ok_or_else(|| InteropError::out_of_range(IndexAxis::Bin, n, self.bins.len()))
    }

    /// Histogram index holding the given q-value.
    ///
    /// Without a table the index is `qval - 1`; with one it is the first bin whose
    /// value reaches `qval` (or the table length when none does).
    pub fn index_for_q_value(table: Option<&BinTable>, qval: u32) -> usize {
        match active_bins(table) {
            None => (qval as usize).saturating_sub(1),
            Some(bins) => bins
                .iter()
                .position(|b| u32::from(b.value) >= qval)
                .unwrap_or(bins.len()),
        }
    }
}

impl TryFrom<Vec<QScoreBin>> for BinTable {
    type Error = InteropError;

    fn try_from(bins: Vec<QScoreBin>) -> Result<Self, Self::Error> {
        BinTable::new(bins)
    }
}

impl From<BinTable> for Vec<QScoreBin> {
    fn from(table: BinTable) -> Self {
        table.bins
    }
}

fn active_bins(table: Option<&BinTable>) -> Option<&[QScoreBin]> {
    table.map(|t| t.bins.as_slice()).filter(|b| !b.is_empty())
}

/// Per (lane, tile, cycle) q-score histogram with an optional running total.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "StoredHistogram")]
pub struct QHistogram {
    counts: Vec<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    cumulative: Option<Vec<u64>>,
}

#[derive(Deserialize)]
struct StoredHistogram {
    counts: Vec<u64>,
    #[serde(default)]
    cumulative: Option<Vec<u64>>,
}

impl TryFrom<StoredHistogram> for QHistogram {
    type Error = InteropError;

    fn try_from(stored: StoredHistogram) -> Result<Self, Self::Error> {
        let mut hist = QHistogram::new(stored.counts)?;
        if let Some(cumulative) = stored.cumulative {
            if cumulative.len() != hist.counts.len() {
                return Err(InteropError::out_of_range(
                    IndexAxis::Bin,
                    cumulative.len(),
                    hist.counts.len(),
                ));
            }
            hist.cumulative = Some(cumulative);
        }
        Ok(hist)
    }
}

impl QHistogram {
    pub fn new(counts: Vec<u64>) -> InteropResult<Self> {
        if counts.len() > MAX_Q_BINS {
            return Err(InteropError::out_of_range(
                IndexAxis::Bin,
                counts.len(),
                MAX_Q_BINS,
            ));
        }
        Ok(Self {
            counts,
            cumulative: None,
        })
    }

    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    pub fn counts(&self) -> &[u64] {
        &self.counts
    }

    pub fn cumulative(&self) -> Option<&[u64]> {
        self.cumulative.as_deref()
    }

    pub fn is_cumulative_empty(&self) -> bool {
        self.cumulative.as_ref().is_none_or(|c| c.is_empty())
    }

    pub fn count_at(&self, n: usize) -> InteropResult<u64> {
        self.counts
            .get(n)
            .copied()
            .ok_or_else(|| InteropError::out_of_range(IndexAxis::Bin, n, self.counts.len()))
    }

    pub fn sum(&self) -> u64 {
        self.counts.iter().sum()
    }

    /// Sum of the cumulative histogram; callers accumulate first.
    pub fn sum_cumulative(&self) -> u64 {
        debug_assert!(!self.is_cumulative_empty());
        self.cumulative.as_deref().map_or(0, |c| c.iter().sum())
    }

    pub fn total_over(&self, threshold: u32, bins: Option<&BinTable>) -> u64 {
        total_over(&self.counts, threshold, bins)
    }

    pub fn total_over_cumulative(&self, threshold: u32, bins: Option<&BinTable>) -> u64 {
        debug_assert!(!self.is_cumulative_empty());
        self.cumulative
            .as_deref()
            .map_or(0, |c| total_over(c, threshold, bins))
    }

    /// Percent of clusters at or above `threshold`; NaN for an empty histogram.
    pub fn percent_over(&self, threshold: u32, bins: Option<&BinTable>) -> f32 {
        percent(self.total_over(threshold, bins), self.sum())
    }

    pub fn percent_over_cumulative(&self, threshold: u32, bins: Option<&BinTable>) -> f32 {
        if self.is_cumulative_empty() {
            return f32::NAN;
        }
        percent(
            self.total_over_cumulative(threshold, bins),
            self.sum_cumulative(),
        )
    }

    /// Median q-score, or `u32::MAX` when the median bin falls past the bin table.
    pub fn median(&self, bins: Option<&BinTable>) -> u32 {
        let total = self.sum();
        let position = if total % 2 == 0 {
            total / 2 + 1
        } else {
            (total + 1) / 2
        };
        let mut i = 0usize;
        let mut running = 0u64;
        while i < self.counts.len() {
            running += self.counts[i];
            if running >= position {
                break;
            }
            i += 1;
        }
        match active_bins(bins) {
            None => (i + 1) as u32,
            Some(_) if self.counts.len() == MAX_Q_BINS => (i + 1) as u32,
            Some(table) => table.get(i).map_or(u32::MAX, |b| u32::from(b.value)),
        }
    }

    /// Start the cumulative histogram from this cycle's counts plus the previous
    /// cycle's cumulative counts. `None` accumulates from this histogram itself,
    /// which leaves the cumulative counts equal to the raw counts.
    pub fn accumulate(&mut self, previous: Option<&QHistogram>) {
        let mut cumulative = self.counts.clone();
        if let Some(prev) = previous.and_then(|p| p.cumulative.as_deref()) {
            for (cur, add) in cumulative.iter_mut().zip(prev) {
                *cur += *add;
            }
        }
        self.cumulative = Some(cumulative);
    }

    /// Add raw counts into a running distribution of the same length.
    pub fn accumulate_into(&self, distribution: &mut [u64]) {
        if distribution.len() != self.counts.len() {
            return;
        }
        for (dst, &c) in distribution.iter_mut().zip(&self.counts) {
            *dst += c;
        }
    }
}

fn total_over(hist: &[u64], threshold: u32, bins: Option<&BinTable>) -> u64 {
    match active_bins(bins) {
        None => hist
            .get(threshold as usize..)
            .map_or(0, |tail| tail.iter().sum()),
        Some(table) => table
            .iter()
            .zip(hist)
            .filter(|(b, _)| u32::from(b.value) >= threshold)
            .map(|(_, &c)| c)
            .sum(),
    }
}

fn percent(count: u64, total: u64) -> f32 {
    if total == 0 {
        return f32::NAN;
    }
    100.0 * count as f32 / total as f32
}

#[cfg(test)]
mod tests {
    use super::*;

    fn binned_table() -> BinTable {
        BinTable::new(vec![
            QScoreBin::new(1, 9, 7),
            QScoreBin::new(10, 19, 16),
            QScoreBin::new(20, 24, 22),
            QScoreBin::new(25, 29, 27),
            QScoreBin::new(30, 34, 32),
            QScoreBin::new(35, 39, 37),
            QScoreBin::new(40, 49, 41),
        ])
        .unwrap()
    }

    #[test]
    fn test_sum_and_count_at() {
        let h = QHistogram::new(vec![1, 2, 3]).unwrap();
        assert_eq!(h.sum(), 6);
        assert_eq!(h.count_at(2).unwrap(), 3);
        let err = h.count_at(3).unwrap_err();
        assert_eq!(err, InteropError::out_of_range(IndexAxis::Bin, 3, 3));
    }

    #[test]
    fn test_too_many_bins_rejected() {
        assert!(QHistogram::new(vec![0; MAX_Q_BINS + 1]).is_err());
        assert!(BinTable::new(vec![QScoreBin::default(); MAX_Q_BINS + 1]).is_err());
    }

    #[test]
    fn test_deserialize_enforces_histogram_limits() {
        let wide = format!("{{\"counts\": {:?}}}", vec![1u64; MAX_Q_BINS + 1]);
        assert!(serde_json::from_str::<QHistogram>(&wide).is_err());

        let mismatched = r#"{"counts": [1, 2, 3], "cumulative": [1, 2]}"#;
        assert!(serde_json::from_str::<QHistogram>(mismatched).is_err());

        let h: QHistogram =
            serde_json::from_str(r#"{"counts": [1, 2, 3], "cumulative": [2, 4, 6]}"#).unwrap();
        assert_eq!(h.sum(), 6);
        assert_eq!(h.cumulative().unwrap(), &[2, 4, 6]);
    }

    #[test]
    fn test_percent_over_large_counts() {
        let h = QHistogram::new(vec![u64::MAX / 4, u64::MAX / 4]).unwrap();
        assert_eq!(h.percent_over(1, None), 50.0);
    }

    #[test]
    fn test_bin_at_out_of_range() {
        let table = binned_table();
        assert_eq!(table.bin_at(2).unwrap().value, 22);
        assert!(matches!(
            table.bin_at(7),
            Err(InteropError::OutOfRange {
                axis: IndexAxis::Bin,
                ..
            })
        ));
    }

    #[test]
    fn test_total_over_without_bins_uses_index() {
        let h = QHistogram::new(vec![5, 5, 5, 5]).unwrap();
        assert_eq!(h.total_over(2, None), 10);
        assert_eq!(h.total_over(4, None), 0);
        assert_eq!(h.total_over(9, None), 0);
        let empty = BinTable::default();
        assert_eq!(h.total_over(2, Some(&empty)), 10);
    }

    #[test]
    fn test_total_over_with_bins_uses_bin_value() {
        let h = QHistogram::new(vec![1, 2, 3, 4, 5, 6, 7]).unwrap();
        let table = binned_table();
        // bins with value >= 30: 32, 37, 41
        assert_eq!(h.total_over(30, Some(&table)), 5 + 6 + 7);
        assert_eq!(h.total_over(20, Some(&table)), 3 + 4 + 5 + 6 + 7);
    }

    #[test]
    fn test_percent_over_empty_is_nan() {
        let h = QHistogram::new(vec![0, 0, 0]).unwrap();
        assert!(h.percent_over(1, None).is_nan());
        let h = QHistogram::new(vec![1, 1, 2]).unwrap();
        assert_eq!(h.percent_over(2, None), 50.0);
    }

    #[test]
    fn test_percent_over_cumulative() {
        let mut h = QHistogram::new(vec![0, 0]).unwrap();
        assert!(h.percent_over_cumulative(1, None).is_nan());
        h.accumulate(None);
        assert!(h.percent_over_cumulative(1, None).is_nan());
        let mut next = QHistogram::new(vec![2, 2]).unwrap();
        next.accumulate(Some(&h));
        assert_eq!(next.percent_over_cumulative(1, None), 50.0);
    }

    #[test]
    fn test_median_without_bins() {
        // total 10 (even) -> position 6; running sums 1,3,6 -> index 2
        let h = QHistogram::new(vec![1, 2, 3, 4]).unwrap();
        assert_eq!(h.median(None), 3);
        // total 9 (odd) -> position 5; running sums 4,5 -> index 1
        let h = QHistogram::new(vec![4, 1, 4]).unwrap();
        assert_eq!(h.median(None), 2);
    }

    #[test]
    fn test_median_with_bins() {
        let table = binned_table();
        let h = QHistogram::new(vec![0, 0, 0, 1, 10, 1, 0]).unwrap();
        assert_eq!(h.median(Some(&table)), 32);
    }

    #[test]
    fn test_median_full_width_ignores_bins() {
        let table = binned_table();
        let mut counts = vec![0u64; MAX_Q_BINS];
        counts[29] = 10;
        let h = QHistogram::new(counts).unwrap();
        assert_eq!(h.median(Some(&table)), 30);
        assert_eq!(h.median(None), 30);
    }

    #[test]
    fn test_median_past_table_saturates() {
        let table = BinTable::new(vec![QScoreBin::new(1, 19, 14), QScoreBin::new(20, 29, 25)])
            .unwrap();
        let h = QHistogram::new(vec![0, 0, 5]).unwrap();
        assert_eq!(h.median(Some(&table)), u32::MAX);
    }

    #[test]
    fn test_accumulate_self_does_not_double() {
        let mut h = QHistogram::new(vec![1, 2, 3]).unwrap();
        assert!(h.is_cumulative_empty());
        h.accumulate(None);
        assert_eq!(h.cumulative().unwrap(), &[1, 2, 3]);
        h.accumulate(None);
        assert_eq!(h.cumulative().unwrap(), &[1, 2, 3]);
        assert_eq!(h.sum_cumulative(), 6);
    }

    #[test]
    fn test_accumulate_from_previous_cycle() {
        let mut first = QHistogram::new(vec![1, 2, 3]).unwrap();
        first.accumulate(None);
        let mut second = QHistogram::new(vec![10, 0, 1]).unwrap();
        second.accumulate(Some(&first));
        assert_eq!(second.cumulative().unwrap(), &[11, 2, 4]);
        assert_eq!(second.total_over_cumulative(1, None), 6);
    }

    #[test]
    fn test_accumulate_into_checks_length() {
        let h = QHistogram::new(vec![1, 2]).unwrap();
        let mut dist = vec![10, 10];
        h.accumulate_into(&mut dist);
        assert_eq!(dist, vec![11, 12]);
        let mut wrong = vec![0, 0, 0];
        h.accumulate_into(&mut wrong);
        assert_eq!(wrong, vec![0, 0, 0]);
    }

    #[test]
    fn test_index_for_q_value() {
        assert_eq!(BinTable::index_for_q_value(None, 30), 29);
        let table = binned_table();
        assert_eq!(BinTable::index_for_q_value(Some(&table), 30), 4);
        assert_eq!(BinTable::index_for_q_value(Some(&table), 50), 7);
    }
}
