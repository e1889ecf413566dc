use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::align::AlignedTable;
use crate::core::FcError;

/// How columns are rescaled before charting.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub enum Normalization {
    /// Divide each column by its maximum.
    #[default]
    MaxScale,
    /// Map each column onto `[0, 1]`.
    MinMax,
}

impl Normalization {
    /// Rescales one column. A column that cannot be scaled (no values, a zero maximum,
    /// or a zero range) comes back all `None`.
    #[must_use]
    pub fn apply(self, column: &[Option<f64>]) -> Vec<Option<f64>> {
        let finite = || column.iter().flatten().copied().filter(|v| v.is_finite());
        let max = finite().fold(f64::NEG_INFINITY, f64::max);
        let min = finite().fold(f64::INFINITY, f64::min);

        let scale = |v: f64| -> Option<f64> {
            match self {
                Self::MaxScale if max.is_finite() && max != 0.0 => Some(v / max),
                Self::MinMax if max.is_finite() && max > min => Some((v - min) / (max - min)),
                _ => None,
            }
        };

        column
            .iter()
            .map(|v| v.filter(|x| x.is_finite()).and_then(scale))
            .collect()
    }
}

impl fmt::Display for Normalization {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::MaxScale => "max",
            Self::MinMax => "min-max",
        })
    }
}

impl FromStr for Normalization {
    type Err = FcError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "max" | "max-scale" | "max_scale" => Ok(Self::MaxScale),
            "min-max" | "minmax" | "min_max" => Ok(Self::MinMax),
            other => Err(FcError::InvalidParams(format!("unknown normalization: {other}"))),
        }
    }
}

/// Chart-ready view of a table: chronological x labels and one line per ticker.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartData {
    pub x_labels: Vec<String>,
    pub series: Vec<(String, Vec<Option<f64>>)>,
    pub normalized: bool,
}

impl ChartData {
    /// Extracts the table in chronological order, optionally rescaling each column.
    #[must_use]
    pub fn from_table(table: &AlignedTable, normalization: Option<Normalization>) -> Self {
        let x_labels = table.keys().map(ToString::to_string).collect();
        let series = table
            .columns()
            .iter()
            .enumerate()
            .map(|(i, name)| {
                let raw = table.column_f64(i);
                let values = match normalization {
                    Some(n) => n.apply(&raw),
                    None => raw,
                };
                (name.clone(), values)
            })
            .collect();
        Self {
            x_labels,
            series,
            normalized: normalization.is_some(),
        }
    }

    /// Smallest and largest plotted value, if any.
    #[must_use]
    pub fn value_range(&self) -> Option<(f64, f64)> {
        self.series
            .iter()
            .flat_map(|(_, v)| v.iter().flatten().copied())
            .filter(|v| v.is_finite())
            .fold(None, |acc, v| match acc {
                None => Some((v, v)),
                Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
            })
    }
}
