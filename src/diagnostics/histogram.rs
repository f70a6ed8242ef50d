//! Equal-width histograms

use serde::{Deserialize, Serialize};

/// Equal-width histogram over the observed value range.
///
/// The last bin is closed on the right, so the maximum value is counted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Histogram {
    /// `bins + 1` bin edges, ascending
    pub edges: Vec<f64>,
    /// Count per bin
    pub counts: Vec<usize>,
}

impl Histogram {
    /// Bin `values` into `bins` equal-width bins. Non-finite values are skipped.
    ///
    /// With no finite values every count is zero over `[0, 1]`; a constant
    /// input gets a unit-wide range centred on the value.
    pub fn from_values(values: &[f64], bins: usize) -> Self {
        let bins = bins.max(1);
        let finite: Vec<f64> = values.iter().copied().filter(|v| v.is_finite()).collect();

        let (lo, hi) = match finite.iter().copied().fold(None, |acc: Option<(f64, f64)>, v| {
            Some(acc.map_or((v, v), |(lo, hi)| (lo.min(v), hi.max(v))))
        }) {
            None => (0.0, 1.0),
            Some((lo, hi)) if lo == hi => (lo - 0.5, hi + 0.5),
            Some(range) => range,
        };

        let width = (hi - lo) / bins as f64;
        let edges = (0..=bins).map(|i| lo + width * i as f64).collect();
        let mut counts = vec![0; bins];
        for v in finite {
            let idx = (((v - lo) / width) as usize).min(bins - 1);
            counts[idx] += 1;
        }

        Self { edges, counts }
    }

    /// Number of bins
    pub fn bins(&self) -> usize {
        self.counts.len()
    }

    /// Values counted
    pub fn total(&self) -> usize {
        self.counts.iter().sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counts_include_max() {
        let h = Histogram::from_values(&[0.0, 0.5, 1.0, 1.0], 2);
        assert_eq!(h.edges, vec![0.0, 0.5, 1.0]);
        assert_eq!(h.counts, vec![1, 3]);
    }

    #[test]
    fn test_constant_input() {
        let h = Histogram::from_values(&[2.0, 2.0], 4);
        assert_eq!(h.total(), 2);
        assert_eq!(h.bins(), 4);
        assert_eq!(h.edges[0], 1.5);
    }

    #[test]
    fn test_empty_and_non_finite() {
        let h = Histogram::from_values(&[f64::NAN, f64::INFINITY], 3);
        assert_eq!(h.total(), 0);
        assert_eq!(h.bins(), 3);
    }

    #[test]
    fn test_zero_bins_clamped_to_one() {
        let h = Histogram::from_values(&[1.0, 2.0], 0);
        assert_eq!(h.counts, vec![2]);
    }
}
