//! Plain-text rendering of aligned tables and correlation matrices.

use std::fmt::Write as _;

use rust_decimal::{Decimal, RoundingStrategy};

use super::CorrelationMatrix;
use crate::align::AlignedTable;

/// Formats a currency amount as whole units with thousands separators, e.g. `$1,234,568`.
#[must_use]
pub fn format_currency(value: Decimal) -> String {
    let rounded = value.round_dp_with_strategy(0, RoundingStrategy::MidpointNearestEven);
    let digits = rounded.abs().trunc().to_string();
    let sign = if rounded.is_sign_negative() && !rounded.is_zero() {
        "-"
    } else {
        ""
    };
    format!("{sign}${}", group_thousands(&digits))
}

fn group_thousands(digits: &str) -> String {
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// Renders the table newest quarter first, absent cells blank.
#[must_use]
pub fn render_table(table: &AlignedTable) -> String {
    let index_name = table.alignment().index_name();
    let body: Vec<(String, Vec<String>)> = table
        .rows_descending()
        .map(|(key, row)| {
            let cells = row
                .iter()
                .map(|v| v.map(format_currency).unwrap_or_default())
                .collect();
            (key.to_string(), cells)
        })
        .collect();

    let index_width = body
        .iter()
        .map(|(k, _)| k.len())
        .chain(std::iter::once(index_name.len()))
        .max()
        .unwrap_or(0);
    let widths: Vec<usize> = table
        .columns()
        .iter()
        .enumerate()
        .map(|(i, name)| {
            body.iter()
                .map(|(_, cells)| cells[i].len())
                .chain(std::iter::once(name.len()))
                .max()
                .unwrap_or(0)
        })
        .collect();

    let mut out = String::new();
    let _ = write!(out, "{index_name:<index_width$}");
    for (name, w) in table.columns().iter().zip(&widths) {
        let _ = write!(out, "  {name:>w$}");
    }
    out.push('\n');
    for (key, cells) in &body {
        let _ = write!(out, "{key:<index_width$}");
        for (cell, w) in cells.iter().zip(&widths) {
            let _ = write!(out, "  {cell:>w$}");
        }
        out.push('\n');
    }
    out
}

/// Renders the matrix with two decimals; undefined cells print as `nan`.
#[must_use]
pub fn render_correlation(matrix: &CorrelationMatrix) -> String {
    let label_width = matrix.labels().iter().map(String::len).max().unwrap_or(0);
    let cell_width = label_width.max(5);

    let mut out = String::new();
    let _ = write!(out, "{:label_width$}", "");
    for label in matrix.labels() {
        let _ = write!(out, "  {label:>cell_width$}");
    }
    out.push('\n');
    for (label, row) in matrix.labels().iter().zip(matrix.rows()) {
        let _ = write!(out, "{label:<label_width$}");
        for v in row {
            let cell = if v.is_nan() {
                "nan".to_string()
            } else {
                format!("{v:.2}")
            };
            let _ = write!(out, "  {cell:>cell_width$}");
        }
        out.push('\n');
    }
    out
}
