//! Chart rendering for the analysis reports.
//!
//! Two images: a bar chart of mean price per airline, and a heatmap of
//! mean price across (departure time slot × airline). Rendering goes
//! through the `plotters` bitmap backend.

use std::path::Path;

use plotters::prelude::*;

use crate::error::{DataError, Result};
use crate::stats::{AirlineStats, HeatmapData};

const BAR_CHART_SIZE: (u32, u32) = (960, 540);
const HEATMAP_CELL: (u32, u32) = (110, 52);

/// Render the mean-price-per-airline bar chart to `path`.
pub fn render_airline_bar_chart(stats: &[AirlineStats], path: &Path) -> Result<()> {
    if stats.is_empty() {
        return Err(DataError::InsufficientPlotData("price_by_airline"));
    }

    let y_max = stats
        .iter()
        .map(|s| s.summary.mean)
        .fold(1.0f64, f64::max)
        * 1.15;

    let root = BitMapBackend::new(path, BAR_CHART_SIZE).into_drawing_area();
    root.fill(&WHITE).map_err(chart_err)?;

    let mut chart = ChartBuilder::on(&root)
        .caption("Average Flight Prices by Airline", ("sans-serif", 26))
        .margin(16)
        .x_label_area_size(48)
        .y_label_area_size(72)
        .build_cartesian_2d((0usize..stats.len()).into_segmented(), 0f64..y_max)
        .map_err(chart_err)?;

    chart
        .configure_mesh()
        .disable_x_mesh()
        .x_label_formatter(&|seg| match seg {
            SegmentValue::CenterOf(i) | SegmentValue::Exact(i) => stats
                .get(*i)
                .map(|s| s.airline.clone())
                .unwrap_or_default(),
            _ => String::new(),
        })
        .x_labels(stats.len())
        .y_desc("Average Price (TRY)")
        .draw()
        .map_err(chart_err)?;

    chart
        .draw_series(
            Histogram::vertical(&chart)
                .style(BLUE.mix(0.65).filled())
                .margin(12)
                .data(stats.iter().enumerate().map(|(i, s)| (i, s.summary.mean))),
        )
        .map_err(chart_err)?;

    root.present().map_err(chart_err)?;
    Ok(())
}

/// Render the (time slot × airline) mean-price heatmap to `path`.
pub fn render_price_heatmap(data: &HeatmapData, path: &Path) -> Result<()> {
    let cells: Vec<(usize, usize, f64)> = data
        .cells
        .iter()
        .enumerate()
        .flat_map(|(row, columns)| {
            columns
                .iter()
                .enumerate()
                .filter_map(move |(col, &cell)| cell.map(|value| (col, row, value)))
        })
        .collect();

    if data.airlines.is_empty() || cells.is_empty() {
        return Err(DataError::InsufficientPlotData("price_heatmap"));
    }

    let lo = cells.iter().map(|(_, _, v)| *v).fold(f64::INFINITY, f64::min);
    let hi = cells
        .iter()
        .map(|(_, _, v)| *v)
        .fold(f64::NEG_INFINITY, f64::max);

    let cols = data.airlines.len();
    let rows = data.slots.len();
    let width = 180 + cols as u32 * HEATMAP_CELL.0;
    let height = 120 + rows as u32 * HEATMAP_CELL.1;

    let root = BitMapBackend::new(path, (width, height)).into_drawing_area();
    root.fill(&WHITE).map_err(chart_err)?;

    let mut chart = ChartBuilder::on(&root)
        .caption("Average Price by Departure Time Slot", ("sans-serif", 26))
        .margin(16)
        .x_label_area_size(48)
        .y_label_area_size(110)
        .build_cartesian_2d((0usize..cols).into_segmented(), (0usize..rows).into_segmented())
        .map_err(chart_err)?;

    chart
        .configure_mesh()
        .disable_x_mesh()
        .disable_y_mesh()
        .x_labels(cols)
        .y_labels(rows)
        .x_label_formatter(&|seg| match seg {
            SegmentValue::CenterOf(i) | SegmentValue::Exact(i) => {
                data.airlines.get(*i).cloned().unwrap_or_default()
            }
            _ => String::new(),
        })
        .y_label_formatter(&|seg| match seg {
            SegmentValue::CenterOf(i) | SegmentValue::Exact(i) => {
                data.slots.get(*i).map(|s| s.to_string()).unwrap_or_default()
            }
            _ => String::new(),
        })
        .draw()
        .map_err(chart_err)?;

    chart
        .draw_series(cells.iter().map(|(col, row, value)| {
            let t = if hi > lo { (value - lo) / (hi - lo) } else { 0.5 };
            Rectangle::new(
                [
                    (SegmentValue::Exact(*col), SegmentValue::Exact(*row)),
                    (SegmentValue::Exact(col + 1), SegmentValue::Exact(row + 1)),
                ],
                heat_color(t).filled(),
            )
        }))
        .map_err(chart_err)?;

    chart
        .draw_series(cells.iter().map(|(col, row, value)| {
            Text::new(
                format!("{value:.0}"),
                (SegmentValue::CenterOf(*col), SegmentValue::CenterOf(*row)),
                ("sans-serif", 14),
            )
        }))
        .map_err(chart_err)?;

    root.present().map_err(chart_err)?;
    Ok(())
}

// Light-yellow to deep-blue gradient, low to high price.
fn heat_color(t: f64) -> RGBColor {
    let t = t.clamp(0.0, 1.0);
    let lerp = |a: u8, b: u8| (a as f64 + (b as f64 - a as f64) * t).round() as u8;
    RGBColor(lerp(255, 37), lerp(255, 52), lerp(204, 148))
}

fn chart_err<E: std::fmt::Display>(err: E) -> DataError {
    DataError::Chart(err.to_string())
}
