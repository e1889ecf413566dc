//! Reporting over an aligned table: correlation, normalization, text output and charts.

mod correlation;
mod format;
mod normalize;

#[cfg(feature = "plot")]
mod chart;

pub use correlation::{CorrelationMatrix, pearson};
pub use format::{format_currency, render_correlation, render_table};
pub use normalize::{ChartData, Normalization};

#[cfg(feature = "plot")]
pub use chart::{ChartConfig, coolwarm, heatmap_svg, line_chart_svg};
