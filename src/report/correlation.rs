use serde::Serialize;

use crate::align::AlignedTable;

/// Pearson correlation over the pairwise-complete observations of two columns.
///
/// Positions where either side is `None` (or non-finite) are skipped. Returns `NaN`
/// when fewer than two pairs remain or either side has zero variance.
#[must_use]
pub fn pearson(a: &[Option<f64>], b: &[Option<f64>]) -> f64 {
    let pairs: Vec<(f64, f64)> = a
        .iter()
        .zip(b)
        .filter_map(|(x, y)| match (x, y) {
            (Some(x), Some(y)) if x.is_finite() && y.is_finite() => Some((*x, *y)),
            _ => None,
        })
        .collect();

    if pairs.len() < 2 {
        return f64::NAN;
    }

    #[allow(clippy::cast_precision_loss)]
    let n = pairs.len() as f64;
    let mean_a = pairs.iter().map(|p| p.0).sum::<f64>() / n;
    let mean_b = pairs.iter().map(|p| p.1).sum::<f64>() / n;

    let mut cov = 0.0;
    let mut var_a = 0.0;
    let mut var_b = 0.0;
    for (x, y) in &pairs {
        let da = x - mean_a;
        let db = y - mean_b;
        cov += da * db;
        var_a += da * da;
        var_b += db * db;
    }

    let denom = (var_a * var_b).sqrt();
    if denom == 0.0 {
        f64::NAN
    } else {
        (cov / denom).clamp(-1.0, 1.0)
    }
}

/// Square matrix of pairwise correlations between table columns.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CorrelationMatrix {
    labels: Vec<String>,
    values: Vec<Vec<f64>>,
}

impl CorrelationMatrix {
    /// Correlates every pair of columns of `table`.
    #[must_use]
    pub fn from_table(table: &AlignedTable) -> Self {
        let columns: Vec<Vec<Option<f64>>> =
            (0..table.columns().len()).map(|i| table.column_f64(i)).collect();
        Self::from_columns(table.columns().to_vec(), &columns)
    }

    /// Correlates equally long columns.
    ///
    /// The diagonal is exactly `1.0` for a column with at least two distinct values
    /// and `NaN` otherwise; the lower triangle mirrors the upper one.
    #[must_use]
    pub fn from_columns(labels: Vec<String>, columns: &[Vec<Option<f64>>]) -> Self {
        let n = columns.len();
        let mut values = vec![vec![f64::NAN; n]; n];
        for i in 0..n {
            values[i][i] = if pearson(&columns[i], &columns[i]).is_nan() {
                f64::NAN
            } else {
                1.0
            };
            for j in (i + 1)..n {
                let r = pearson(&columns[i], &columns[j]);
                values[i][j] = r;
                values[j][i] = r;
            }
        }
        Self { labels, values }
    }

    #[must_use]
    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    /// Matrix dimension.
    #[must_use]
    pub fn size(&self) -> usize {
        self.labels.len()
    }

    #[must_use]
    pub fn get(&self, i: usize, j: usize) -> Option<f64> {
        self.values.get(i).and_then(|row| row.get(j)).copied()
    }

    /// Looks a cell up by column names.
    #[must_use]
    pub fn between(&self, a: &str, b: &str) -> Option<f64> {
        let i = self.labels.iter().position(|l| l == a)?;
        let j = self.labels.iter().position(|l| l == b)?;
        self.get(i, j)
    }

    #[must_use]
    pub fn rows(&self) -> &[Vec<f64>] {
        &self.values
    }
}
