use std::collections::BTreeMap;

use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;

use super::{Alignment, BucketKey};
use crate::fundamentals::MetricSeries;

/// Wide table of one metric: rows are quarter buckets, columns are tickers.
///
/// Rows are stored in ascending `(year, quarter)` order; [`rows`](Self::rows) and
/// [`rows_descending`](Self::rows_descending) read the same storage in either direction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlignedTable {
    alignment: Alignment,
    columns: Vec<String>,
    rows: BTreeMap<BucketKey, Vec<Option<Decimal>>>,
}

impl AlignedTable {
    /// An empty table with the given columns.
    #[must_use]
    pub fn new(alignment: Alignment, columns: Vec<String>) -> Self {
        Self {
            alignment,
            columns,
            rows: BTreeMap::new(),
        }
    }

    /// Buckets, merges, filters to the inclusive year range and drops all-absent rows.
    #[must_use]
    pub fn assemble(alignment: Alignment, series: &[MetricSeries], start_year: i32, end_year: i32) -> Self {
        let mut table = Self::merge(alignment, series, (start_year, end_year));
        table.retain_years(start_year, end_year);
        table.drop_empty_rows();
        table
    }

    /// Merges bucketed series into one table keyed by the union of their buckets.
    ///
    /// Columns follow the order of `series`; a repeated symbol is ignored after its
    /// first occurrence.
    #[must_use]
    pub fn merge(alignment: Alignment, series: &[MetricSeries], years: (i32, i32)) -> Self {
        let mut table = Self::new(alignment, Vec::with_capacity(series.len()));
        for s in series {
            if table.columns.iter().any(|c| c == &s.symbol) {
                continue;
            }
            table.columns.push(s.symbol.clone());
            let col = table.columns.len() - 1;
            for row in table.rows.values_mut() {
                row.push(None);
            }
            for (key, value) in alignment.bucket(s, years) {
                let width = table.columns.len();
                let row = table.rows.entry(key).or_insert_with(|| vec![None; width]);
                row[col] = value;
            }
        }
        table
    }

    /// Keeps rows whose bucket year lies in `start_year..=end_year`.
    pub fn retain_years(&mut self, start_year: i32, end_year: i32) {
        self.rows
            .retain(|key, _| (start_year..=end_year).contains(&key.year()));
    }

    /// Removes rows where every ticker is absent.
    pub fn drop_empty_rows(&mut self) {
        self.rows.retain(|_, values| values.iter().any(Option::is_some));
    }

    #[must_use]
    pub const fn alignment(&self) -> Alignment {
        self.alignment
    }

    #[must_use]
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Number of rows.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Rows in chronological order.
    pub fn rows(&self) -> impl DoubleEndedIterator<Item = (&BucketKey, &[Option<Decimal>])> {
        self.rows.iter().map(|(k, v)| (k, v.as_slice()))
    }

    /// Rows newest first, by `(year, quarter)`.
    pub fn rows_descending(&self) -> impl Iterator<Item = (&BucketKey, &[Option<Decimal>])> {
        self.rows().rev()
    }

    /// Row keys in chronological order.
    pub fn keys(&self) -> impl DoubleEndedIterator<Item = &BucketKey> {
        self.rows.keys()
    }

    /// One cell.
    #[must_use]
    pub fn value(&self, key: &BucketKey, column: &str) -> Option<Decimal> {
        let idx = self.columns.iter().position(|c| c == column)?;
        self.rows.get(key).and_then(|row| row[idx])
    }

    /// A column as `f64`, chronological, `None` for absent cells.
    #[must_use]
    pub fn column_f64(&self, idx: usize) -> Vec<Option<f64>> {
        self.rows
            .values()
            .map(|row| row.get(idx).copied().flatten().and_then(|v| v.to_f64()))
            .collect()
    }
}
