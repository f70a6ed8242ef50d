//! Contingency table between true labels and predicted clusters

use std::fmt;

/// Dense cross-tabulation of true labels against predicted clusters.
///
/// `count(t, p)` is the number of samples with true label `t` assigned to
/// cluster `p`. Rows are true labels, columns are clusters; reading a column
/// gives the transpose (cluster → true label counts). Recording is
/// commutative, so the table does not depend on sample order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ContingencyTable {
    counts: Vec<Vec<usize>>,
    n_classes: usize,
    n_clusters: usize,
}

impl ContingencyTable {
    /// All-zero table with `n_classes` rows and `n_clusters` columns
    pub fn new(n_classes: usize, n_clusters: usize) -> Self {
        Self { counts: vec![vec![0; n_clusters]; n_classes], n_classes, n_clusters }
    }

    /// Number of true classes (rows)
    pub fn n_classes(&self) -> usize {
        self.n_classes
    }

    /// Number of predicted clusters (columns)
    pub fn n_clusters(&self) -> usize {
        self.n_clusters
    }

    /// Count one sample. Callers validate the indices.
    pub(crate) fn record(&mut self, true_label: usize, cluster: usize) {
        self.counts[true_label][cluster] += 1;
    }

    /// Samples with true label `true_label` assigned to `cluster`
    pub fn count(&self, true_label: usize, cluster: usize) -> usize {
        self.counts[true_label][cluster]
    }

    /// Counts for one true label, indexed by cluster
    pub fn row(&self, true_label: usize) -> &[usize] {
        &self.counts[true_label]
    }

    /// Counts for one cluster, indexed by true label
    pub fn column(&self, cluster: usize) -> Vec<usize> {
        self.counts.iter().map(|row| row[cluster]).collect()
    }

    /// Samples carrying true label `true_label`
    pub fn row_total(&self, true_label: usize) -> usize {
        self.counts[true_label].iter().sum()
    }

    /// Samples assigned to `cluster`
    pub fn column_total(&self, cluster: usize) -> usize {
        self.counts.iter().map(|row| row[cluster]).sum()
    }

    /// Total samples recorded
    pub fn total(&self) -> usize {
        self.counts.iter().flatten().sum()
    }

    /// Add another table of the same dimensions into this one
    pub fn merge(&mut self, other: &Self) {
        for (row, other_row) in self.counts.iter_mut().zip(&other.counts) {
            for (c, o) in row.iter_mut().zip(other_row) {
                *c += o;
            }
        }
    }
}

/// Index of the largest count; ties go to the lowest index.
/// `None` when every count is zero.
pub(crate) fn argmax_count(counts: &[usize]) -> Option<usize> {
    let mut best: Option<usize> = None;
    for (i, &c) in counts.iter().enumerate() {
        if c > 0 && best.is_none_or(|b| c > counts[b]) {
            best = Some(i);
        }
    }
    best
}

impl fmt::Display for ContingencyTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:>8}", "")?;
        for p in 0..self.n_clusters {
            write!(f, "{:>7}", format!("C{p}"))?;
        }
        writeln!(f)?;

        for t in 0..self.n_classes {
            write!(f, "{:>8}", format!("True {t}"))?;
            for p in 0..self.n_clusters {
                write!(f, "{:>7}", self.counts[t][p])?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_and_totals() {
        let mut table = ContingencyTable::new(2, 3);
        table.record(0, 0);
        table.record(0, 0);
        table.record(0, 2);
        table.record(1, 2);

        assert_eq!(table.count(0, 0), 2);
        assert_eq!(table.row(0), &[2, 0, 1]);
        assert_eq!(table.column(2), vec![1, 1]);
        assert_eq!(table.row_total(0), 3);
        assert_eq!(table.column_total(1), 0);
        assert_eq!(table.total(), 4);
    }

    #[test]
    fn test_merge_adds_counts() {
        let mut a = ContingencyTable::new(2, 2);
        a.record(1, 0);
        let mut b = ContingencyTable::new(2, 2);
        b.record(1, 0);
        b.record(0, 1);

        a.merge(&b);
        assert_eq!(a.count(1, 0), 2);
        assert_eq!(a.count(0, 1), 1);
        assert_eq!(a.total(), 3);
    }

    #[test]
    fn test_argmax_count() {
        assert_eq!(argmax_count(&[1, 3, 3, 0]), Some(1));
        assert_eq!(argmax_count(&[0, 0, 2]), Some(2));
        assert_eq!(argmax_count(&[0, 0]), None);
        assert_eq!(argmax_count(&[]), None);
    }

    #[test]
    fn test_display_has_every_row() {
        let table = ContingencyTable::new(3, 2);
        let text = table.to_string();
        assert!(text.contains("True 2"));
        assert!(text.contains("C1"));
    }
}
