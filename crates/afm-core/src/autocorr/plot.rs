use std::path::Path;

use plotters::prelude::*;

use crate::consts::{ACF_REFERENCE_LEVEL, PLOT_HEIGHT, PLOT_WIDTH};
use crate::error::{AfmError, Result};

use super::AcfTable;

const COLOR_X: RGBColor = RGBColor(255, 140, 0);
const COLOR_Y: RGBColor = RGBColor(65, 105, 225);
const COLOR_REFERENCE: RGBColor = RGBColor(165, 42, 42);
const LINE_WIDTH: u32 = 3;

fn plot_err<E: std::fmt::Display>(e: E) -> AfmError {
    AfmError::Plot(e.to_string())
}

fn value_range(table: &AcfTable) -> (f64, f64) {
    let (lo, hi) = table
        .x
        .acf
        .iter()
        .chain(table.y.acf.iter())
        .filter(|v| v.is_finite())
        .fold((0.0f64, 1.0f64), |(lo, hi), &v| (lo.min(v), hi.max(v)));
    let pad = (hi - lo) * 0.05;
    (lo - pad, hi + pad)
}

/// Render both autocorrelation curves into an SVG file, with horizontal
/// guides at zero and at the reference level.
pub fn plot_acf(table: &AcfTable, path: &Path) -> Result<()> {
    let root = SVGBackend::new(path, (PLOT_WIDTH, PLOT_HEIGHT)).into_drawing_area();
    root.fill(&WHITE).map_err(plot_err)?;

    let lags = table.x.acf.len().max(table.y.acf.len()).max(2) - 1;
    let x_max = (lags as f64 * table.x.width_line).max(f64::EPSILON);
    let (y_min, y_max) = value_range(table);

    let mut chart = ChartBuilder::on(&root)
        .caption(
            format!(
                "Autocorrelation along {}- and {}-direction",
                table.x.axis, table.y.axis
            ),
            ("sans-serif", 26),
        )
        .margin(15)
        .x_label_area_size(50)
        .y_label_area_size(70)
        .build_cartesian_2d(0.0..x_max, y_min..y_max)
        .map_err(plot_err)?;

    chart
        .configure_mesh()
        .x_desc("Sampling length, μm")
        .y_desc("Autocorrelation function, C(τ)")
        .draw()
        .map_err(plot_err)?;

    for level in [0.0, ACF_REFERENCE_LEVEL] {
        let color = if level == 0.0 { BLACK } else { COLOR_REFERENCE };
        chart
            .draw_series(LineSeries::new(
                vec![(0.0, level), (x_max, level)],
                color.stroke_width(1),
            ))
            .map_err(plot_err)?;
    }

    for (series, color) in [(&table.x, COLOR_X), (&table.y, COLOR_Y)] {
        chart
            .draw_series(LineSeries::new(
                series.points(),
                color.stroke_width(LINE_WIDTH),
            ))
            .map_err(plot_err)?
            .label(format!("Along {}-direction", series.axis))
            .legend(move |(x, y)| {
                PathElement::new(vec![(x, y), (x + 20, y)], color.stroke_width(LINE_WIDTH))
            });
    }

    chart
        .configure_series_labels()
        .background_style(WHITE.mix(0.8))
        .border_style(BLACK)
        .draw()
        .map_err(plot_err)?;

    root.present().map_err(plot_err)?;
    Ok(())
}
