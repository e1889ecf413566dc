use polars::prelude::*;
use rust_decimal::prelude::ToPrimitive;

use crate::align::AlignedTable;
use crate::report::CorrelationMatrix;

/// Trait for converting report structures into Polars DataFrames.
///
/// Lets callers hand an aligned table or a correlation matrix to Polars for
/// further analysis without going through the text renderers.
pub trait ToDataFrame {
    /// Converts the object into a Polars DataFrame.
    fn to_dataframe(&self) -> PolarsResult<DataFrame>;
}

impl ToDataFrame for AlignedTable {
    /// One row per bucket in chronological order. The first column is the bucket
    /// label, named after the alignment index; each ticker becomes an `f64` column.
    fn to_dataframe(&self) -> PolarsResult<DataFrame> {
        let index: Vec<String> = self.keys().map(ToString::to_string).collect();
        let mut columns = Vec::with_capacity(self.columns().len() + 1);
        columns.push(Column::new(self.alignment().index_name().into(), index));

        for (idx, name) in self.columns().iter().enumerate() {
            let values: Vec<Option<f64>> = self
                .rows()
                .map(|(_, row)| row.get(idx).copied().flatten().and_then(|v| v.to_f64()))
                .collect();
            columns.push(Column::new(name.as_str().into(), values));
        }
        DataFrame::new(columns)
    }
}

impl ToDataFrame for CorrelationMatrix {
    /// Square frame with a leading `ticker` label column. Undefined cells are null.
    fn to_dataframe(&self) -> PolarsResult<DataFrame> {
        let mut columns = Vec::with_capacity(self.size() + 1);
        columns.push(Column::new("ticker".into(), self.labels().to_vec()));

        for (j, name) in self.labels().iter().enumerate() {
            let values: Vec<Option<f64>> = (0..self.size())
                .map(|i| self.get(i, j).filter(|v| !v.is_nan()))
                .collect();
            columns.push(Column::new(name.as_str().into(), values));
        }
        DataFrame::new(columns)
    }
}
