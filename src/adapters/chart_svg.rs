//! SVG line chart for a compound projection series.

use crate::domain::compound::Projection;

const WIDTH: f64 = 500.0;
const HEIGHT: f64 = 200.0;
const PADDING: f64 = 40.0;

fn polyline(values: &[(u32, f64)], max_period: u32, min: f64, max: f64) -> String {
    let plot_width = WIDTH - 2.0 * PADDING;
    let plot_height = HEIGHT - 2.0 * PADDING;

    let range = max - min;
    let scale_y = if range > 0.0 { plot_height / range } else { 1.0 };
    let scale_x = if max_period > 0 {
        plot_width / max_period as f64
    } else {
        0.0
    };

    values
        .iter()
        .map(|&(period, value)| {
            let x = PADDING + period as f64 * scale_x;
            let y = HEIGHT - PADDING - (value - min) * scale_y;
            format!("{:.1},{:.1}", x, y)
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Render total value and contributed amount over time. Points with
/// non-finite values are left out.
pub fn generate_series_svg(series: &[Projection]) -> String {
    let value_points: Vec<(u32, f64)> = series
        .iter()
        .filter(|p| p.total_value.is_finite())
        .map(|p| (p.period_count, p.total_value))
        .collect();
    let contributed_points: Vec<(u32, f64)> = series
        .iter()
        .filter(|p| p.total_contributed.is_finite())
        .map(|p| (p.period_count, p.total_contributed))
        .collect();

    if value_points.is_empty() && contributed_points.is_empty() {
        return r#"<svg xmlns="http://www.w3.org/2000/svg"><text x="10" y="20">No projection data available.</text></svg>"#
            .to_string();
    }

    let all = value_points.iter().chain(contributed_points.iter());
    let min = all.clone().map(|p| p.1).fold(f64::INFINITY, f64::min);
    let max = all.clone().map(|p| p.1).fold(f64::NEG_INFINITY, f64::max);
    let max_period = all.map(|p| p.0).max().unwrap_or(0);

    format!(
        r##"<svg xmlns="http://www.w3.org/2000/svg" width="{w:.0}" height="{h:.0}" viewBox="0 0 {w:.0} {h:.0}">
  <line x1="{p:.0}" y1="{p:.0}" x2="{p:.0}" y2="{base:.0}" stroke="#888"/>
  <line x1="{p:.0}" y1="{base:.0}" x2="{right:.0}" y2="{base:.0}" stroke="#888"/>
  <polyline class="total-value" fill="none" stroke="#1f77b4" stroke-width="2" points="{value}"/>
  <polyline class="contributed" fill="none" stroke="#ff7f0e" stroke-width="1" points="{contributed}"/>
</svg>
"##,
        w = WIDTH,
        h = HEIGHT,
        p = PADDING,
        base = HEIGHT - PADDING,
        right = WIDTH - PADDING,
        value = polyline(&value_points, max_period, min, max),
        contributed = polyline(&contributed_points, max_period, min, max),
    )
}
