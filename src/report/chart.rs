//! SVG rendering of the trend chart and the correlation heatmap.

use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};

use super::{ChartData, CorrelationMatrix};
use crate::core::FcError;
use crate::fundamentals::Metric;

/// Chart canvas settings.
#[derive(Debug, Clone)]
pub struct ChartConfig {
    pub width: u32,
    pub height: u32,
    pub line_width: u32,
    pub point_radius: u32,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            width: 1200,
            height: 600,
            line_width: 2,
            point_radius: 4,
        }
    }
}

fn render_err<E: std::fmt::Display>(e: E) -> FcError {
    FcError::Render(e.to_string())
}

/// Draws one line per ticker over the chronological quarter axis.
///
/// Lines break where a ticker has no value.
///
/// # Errors
///
/// Returns [`FcError::Render`] when there is nothing to plot or drawing fails.
pub fn line_chart_svg(data: &ChartData, metric: Metric, cfg: &ChartConfig) -> Result<String, FcError> {
    let (lo, hi) = data
        .value_range()
        .ok_or_else(|| FcError::Render("no values to plot".into()))?;
    let pad = if hi > lo { (hi - lo) * 0.05 } else { hi.abs().max(1.0) * 0.1 };
    let x_max = data.x_labels.len().saturating_sub(1).max(1) as f64;

    let title = format!(
        "{} Trend Over Time{}",
        metric.label(),
        if data.normalized { " (Normalized)" } else { "" }
    );
    let y_desc = if data.normalized {
        "Normalized Value".to_string()
    } else {
        format!("{} (USD)", metric.label())
    };

    let mut svg = String::new();
    {
        let root = SVGBackend::with_string(&mut svg, (cfg.width, cfg.height)).into_drawing_area();
        root.fill(&WHITE).map_err(render_err)?;

        let mut chart = ChartBuilder::on(&root)
            .caption(title, ("sans-serif", 22))
            .margin(15)
            .x_label_area_size(60)
            .y_label_area_size(100)
            .build_cartesian_2d(-0.25..x_max + 0.25, (lo - pad)..(hi + pad))
            .map_err(render_err)?;

        let labels = &data.x_labels;
        chart
            .configure_mesh()
            .x_desc("Fiscal Quarter")
            .y_desc(y_desc)
            .x_labels(labels.len().clamp(2, 16))
            .x_label_formatter(&|x| {
                let i = x.round();
                if (x - i).abs() > 1e-6 || i < 0.0 {
                    return String::new();
                }
                labels.get(i as usize).cloned().unwrap_or_default()
            })
            .y_label_formatter(&|y| {
                if data.normalized {
                    format!("{y:.2}")
                } else {
                    compact_amount(*y)
                }
            })
            .draw()
            .map_err(render_err)?;

        for (idx, (name, values)) in data.series.iter().enumerate() {
            let color = Palette99::pick(idx).to_rgba();
            let points: Vec<(usize, f64)> = values
                .iter()
                .enumerate()
                .filter_map(|(i, v)| v.map(|v| (i, v)))
                .collect();

            for (n, segment) in contiguous_runs(&points).into_iter().enumerate() {
                let line = LineSeries::new(
                    segment.iter().map(|(i, v)| (*i as f64, *v)),
                    color.stroke_width(cfg.line_width),
                );
                let drawn = chart.draw_series(line).map_err(render_err)?;
                if n == 0 {
                    drawn.label(name.as_str()).legend(move |(x, y)| {
                        PathElement::new(vec![(x, y), (x + 20, y)], color.stroke_width(2))
                    });
                }
            }
            chart
                .draw_series(
                    points
                        .iter()
                        .map(|(i, v)| Circle::new((*i as f64, *v), cfg.point_radius, color.filled())),
                )
                .map_err(render_err)?;
        }

        chart
            .configure_series_labels()
            .background_style(WHITE.mix(0.8))
            .border_style(BLACK)
            .draw()
            .map_err(render_err)?;

        root.present().map_err(render_err)?;
    }
    Ok(svg)
}

/// Splits index-sorted points into runs of consecutive indices.
fn contiguous_runs(points: &[(usize, f64)]) -> Vec<&[(usize, f64)]> {
    let mut runs = Vec::new();
    let mut start = 0;
    for i in 1..=points.len() {
        if i == points.len() || points[i].0 != points[i - 1].0 + 1 {
            if i > start {
                runs.push(&points[start..i]);
            }
            start = i;
        }
    }
    runs
}

fn compact_amount(v: f64) -> String {
    let a = v.abs();
    if a >= 1e12 {
        format!("{:.1}T", v / 1e12)
    } else if a >= 1e9 {
        format!("{:.1}B", v / 1e9)
    } else if a >= 1e6 {
        format!("{:.1}M", v / 1e6)
    } else {
        format!("{v:.0}")
    }
}

/// Diverging blue-white-red scale over `[-1, 1]`; undefined cells are grey.
#[must_use]
pub fn coolwarm(v: f64) -> RGBColor {
    const COLD: (f64, f64, f64) = (59.0, 76.0, 192.0);
    const MID: (f64, f64, f64) = (221.0, 221.0, 221.0);
    const WARM: (f64, f64, f64) = (180.0, 4.0, 38.0);

    if v.is_nan() {
        return RGBColor(160, 160, 160);
    }
    let t = v.clamp(-1.0, 1.0);
    let (from, to, f) = if t < 0.0 { (MID, COLD, -t) } else { (MID, WARM, t) };
    let lerp = |a: f64, b: f64| {
        (a + (b - a) * f).round().clamp(0.0, 255.0) as u8
    };
    RGBColor(lerp(from.0, to.0), lerp(from.1, to.1), lerp(from.2, to.2))
}

/// Draws the annotated correlation heatmap.
///
/// # Errors
///
/// Returns [`FcError::Render`] for an empty matrix or when drawing fails.
pub fn heatmap_svg(matrix: &CorrelationMatrix, metric: Metric, cfg: &ChartConfig) -> Result<String, FcError> {
    let n = matrix.size();
    if n == 0 {
        return Err(FcError::Render("empty correlation matrix".into()));
    }
    let n_i32 = i32::try_from(n).map_err(render_err)?;
    let side = cfg.height.max(400);

    let mut svg = String::new();
    {
        let root = SVGBackend::with_string(&mut svg, (side + 120, side)).into_drawing_area();
        root.fill(&WHITE).map_err(render_err)?;

        let mut chart = ChartBuilder::on(&root)
            .caption(
                format!("Correlation of Quarterly {}", metric.label()),
                ("sans-serif", 22),
            )
            .margin(15)
            .x_label_area_size(40)
            .y_label_area_size(80)
            .build_cartesian_2d((0..n_i32).into_segmented(), (0..n_i32).into_segmented())
            .map_err(render_err)?;

        let labels = matrix.labels();
        // Row 0 is drawn at the top.
        let label_at = |v: &SegmentValue<i32>, flip: bool| match v {
            SegmentValue::CenterOf(i) => {
                let idx = if flip { n_i32 - 1 - *i } else { *i };
                usize::try_from(idx)
                    .ok()
                    .and_then(|k| labels.get(k).cloned())
                    .unwrap_or_default()
            }
            _ => String::new(),
        };

        chart
            .configure_mesh()
            .disable_mesh()
            .x_labels(n)
            .y_labels(n)
            .x_label_formatter(&|v| label_at(v, false))
            .y_label_formatter(&|v| label_at(v, true))
            .draw()
            .map_err(render_err)?;

        let cells = (0..n_i32).flat_map(|i| (0..n_i32).map(move |j| (i, j)));
        let value_of = |i: i32, j: i32| {
            let (i, j) = (usize::try_from(i).unwrap_or(0), usize::try_from(j).unwrap_or(0));
            matrix.get(i, j).unwrap_or(f64::NAN)
        };

        chart
            .draw_series(cells.clone().map(|(i, j)| {
                let y = n_i32 - 1 - i;
                Rectangle::new(
                    [
                        (SegmentValue::Exact(j), SegmentValue::Exact(y)),
                        (SegmentValue::Exact(j + 1), SegmentValue::Exact(y + 1)),
                    ],
                    coolwarm(value_of(i, j)).filled(),
                )
            }))
            .map_err(render_err)?;

        chart
            .draw_series(cells.map(|(i, j)| {
                let v = value_of(i, j);
                let text = if v.is_nan() { "nan".to_string() } else { format!("{v:.2}") };
                let ink = if v.abs() > 0.6 { WHITE } else { BLACK };
                Text::new(
                    text,
                    (SegmentValue::CenterOf(j), SegmentValue::CenterOf(n_i32 - 1 - i)),
                    ("sans-serif", 16)
                        .into_font()
                        .color(&ink)
                        .pos(Pos::new(HPos::Center, VPos::Center)),
                )
            }))
            .map_err(render_err)?;

        root.present().map_err(render_err)?;
    }
    Ok(svg)
}
