//! Chart rendering for the aggregated table. Pure sink: every function
//! writes a PNG and returns nothing to the pipeline.

use std::error::Error;

use ndarray::{Array1, Array2, ArrayView1};
use plotters::coord::Shift;
use plotters::prelude::*;

use crate::models::GroupSummary;

/// Numeric columns of the aggregated table, in output order.
pub const NUMERIC_COLUMNS: [&str; 6] = [
    "total_cases",
    "total_deaths",
    "gdp_per_capita",
    "human_development_index",
    "month",
    "total_deaths_to_total_cases",
];

/// Equal-width-bin histogram of one numeric column.
pub fn histogram(
    values: &[f64],
    title: &str,
    x_desc: &str,
    output_file: &str,
) -> Result<(), Box<dyn Error>> {
    let (lo, width, counts) =
        bin_counts(values, 10).ok_or("no finite values to plot")?;
    let y_max = counts.iter().copied().max().unwrap_or(0) + 1;

    let root = BitMapBackend::new(output_file, (1024, 768)).into_drawing_area();
    root.fill(&WHITE)?;

    let mut chart = ChartBuilder::on(&root)
        .caption(title, ("sans-serif", 30))
        .margin(20)
        .x_label_area_size(40)
        .y_label_area_size(40)
        .build_cartesian_2d(0u32..counts.len() as u32, 0u32..y_max)?;

    chart
        .configure_mesh()
        .x_desc(x_desc)
        .y_desc("Count")
        .x_label_formatter(&|i| format!("{:.0}", lo + f64::from(*i) * width))
        .draw()?;

    chart.draw_series(
        Histogram::vertical(&chart)
            .style(BLUE.filled())
            .data(counts.iter().enumerate().map(|(i, &c)| (i as u32, c))),
    )?;

    root.present()?;
    println!("Histogram saved to {}", output_file);
    Ok(())
}

/// Scatter plot of two numeric columns; non-finite pairs are skipped.
pub fn scatter(
    xs: &[f64],
    ys: &[f64],
    title: &str,
    x_desc: &str,
    y_desc: &str,
    output_file: &str,
) -> Result<(), Box<dyn Error>> {
    let points: Vec<(f64, f64)> = xs
        .iter()
        .zip(ys.iter())
        .filter(|(x, y)| x.is_finite() && y.is_finite())
        .map(|(&x, &y)| (x, y))
        .collect();
    if points.is_empty() {
        return Err("no finite points to plot".into());
    }
    let (x_lo, x_hi) = finite_range(points.iter().map(|p| p.0));
    let (y_lo, y_hi) = finite_range(points.iter().map(|p| p.1));

    let root = BitMapBackend::new(output_file, (1024, 768)).into_drawing_area();
    root.fill(&WHITE)?;

    let mut chart = ChartBuilder::on(&root)
        .caption(title, ("sans-serif", 30))
        .margin(20)
        .x_label_area_size(40)
        .y_label_area_size(60)
        .build_cartesian_2d(x_lo..x_hi, y_lo..y_hi)?;

    chart.configure_mesh().x_desc(x_desc).y_desc(y_desc).draw()?;

    chart.draw_series(
        points
            .iter()
            .map(|&(x, y)| Circle::new((x, y), 5, BLUE.filled())),
    )?;

    root.present()?;
    println!("Scatter plot saved to {}", output_file);
    Ok(())
}

/// Pairwise-relationship grid over all numeric columns of the aggregated
/// table: histograms on the diagonal, scatter panels elsewhere, each
/// annotated with the Pearson correlation of the pair.
pub fn pairplot(summaries: &[GroupSummary], output_file: &str) -> Result<(), Box<dyn Error>> {
    if summaries.is_empty() {
        return Err("no rows to plot".into());
    }
    let matrix = numeric_matrix(summaries)?;
    let n = NUMERIC_COLUMNS.len();

    let root = BitMapBackend::new(output_file, (1500, 1500)).into_drawing_area();
    root.fill(&WHITE)?;
    let panels = root.split_evenly((n, n));

    for row in 0..n {
        for col in 0..n {
            let panel = &panels[row * n + col];
            let ys: Vec<f64> = matrix.column(row).iter().copied().collect();
            let xs: Vec<f64> = matrix.column(col).iter().copied().collect();
            if row == col {
                draw_histogram_panel(panel, &xs, NUMERIC_COLUMNS[row])?;
            } else {
                let caption = match correlation(&matrix.column(col), &matrix.column(row)) {
                    Some(r) => format!(
                        "{} vs {} (r={:.2})",
                        NUMERIC_COLUMNS[col], NUMERIC_COLUMNS[row], r
                    ),
                    None => format!("{} vs {}", NUMERIC_COLUMNS[col], NUMERIC_COLUMNS[row]),
                };
                draw_scatter_panel(panel, &xs, &ys, &caption)?;
            }
        }
    }

    root.present()?;
    println!("Pairplot saved to {}", output_file);
    Ok(())
}

/// Bar chart of a numeric column per category.
pub fn bar_chart(
    categories: &[String],
    values: &[f64],
    title: &str,
    y_desc: &str,
    output_file: &str,
) -> Result<(), Box<dyn Error>> {
    if categories.is_empty() || categories.len() != values.len() {
        return Err("no categories to plot".into());
    }
    let max_value = values.iter().cloned().fold(f64::NAN, f64::max);
    let y_top = if max_value.is_finite() && max_value > 0.0 {
        max_value * 1.2
    } else {
        1.0
    };

    let root = BitMapBackend::new(output_file, (1280, 720)).into_drawing_area();
    root.fill(&WHITE)?;

    let mut chart = ChartBuilder::on(&root)
        .caption(title, ("sans-serif", 30))
        .margin(10)
        .x_label_area_size(50)
        .y_label_area_size(70)
        .build_cartesian_2d(0..categories.len() as u32, 0.0..y_top)?;

    chart
        .configure_mesh()
        .x_labels(categories.len())
        .y_desc(y_desc)
        .label_style(("sans-serif", 15))
        .x_label_formatter(&|x| categories.get(*x as usize).cloned().unwrap_or_default())
        .draw()?;

    chart.draw_series(values.iter().enumerate().map(|(i, &v)| {
        Rectangle::new(
            [(i as u32, 0.0), (i as u32 + 1, v)],
            RGBAColor(110, 48, 75, 1f64).filled(),
        )
    }))?;

    root.present()?;
    println!("Bar chart saved to {}", output_file);
    Ok(())
}

fn numeric_matrix(summaries: &[GroupSummary]) -> Result<Array2<f64>, Box<dyn Error>> {
    let mut flat = Vec::with_capacity(summaries.len() * NUMERIC_COLUMNS.len());
    for s in summaries {
        flat.extend_from_slice(&[
            s.total_cases,
            s.total_deaths,
            s.gdp_per_capita,
            s.human_development_index,
            f64::from(s.month),
            s.total_deaths_to_total_cases,
        ]);
    }
    Ok(Array2::from_shape_vec(
        (summaries.len(), NUMERIC_COLUMNS.len()),
        flat,
    )?)
}

/// Pearson correlation of two columns, non-finite pairs dropped. `None`
/// when either side has no spread.
fn correlation(x: &ArrayView1<f64>, y: &ArrayView1<f64>) -> Option<f64> {
    let pairs: Vec<(f64, f64)> = x
        .iter()
        .zip(y.iter())
        .filter(|(a, b)| a.is_finite() && b.is_finite())
        .map(|(&a, &b)| (a, b))
        .collect();
    if pairs.is_empty() {
        return None;
    }
    let xs = Array1::from(pairs.iter().map(|p| p.0).collect::<Vec<f64>>());
    let ys = Array1::from(pairs.iter().map(|p| p.1).collect::<Vec<f64>>());
    let x_mean = xs.mean()?;
    let y_mean = ys.mean()?;
    let numerator: f64 = xs
        .iter()
        .zip(ys.iter())
        .map(|(&xi, &yi)| (xi - x_mean) * (yi - y_mean))
        .sum();
    let denominator_x = xs.iter().map(|&xi| (xi - x_mean).powi(2)).sum::<f64>().sqrt();
    let denominator_y = ys.iter().map(|&yi| (yi - y_mean).powi(2)).sum::<f64>().sqrt();
    if denominator_x > 0.0 && denominator_y > 0.0 {
        Some(numerator / (denominator_x * denominator_y))
    } else {
        None
    }
}

fn draw_histogram_panel(
    panel: &DrawingArea<BitMapBackend, Shift>,
    values: &[f64],
    caption: &str,
) -> Result<(), Box<dyn Error>> {
    let (lo, width, counts) = match bin_counts(values, 8) {
        Some(bins) => bins,
        None => return Ok(()),
    };
    let y_max = counts.iter().copied().max().unwrap_or(0) + 1;

    let mut chart = ChartBuilder::on(panel)
        .caption(caption, ("sans-serif", 14))
        .margin(5)
        .x_label_area_size(20)
        .y_label_area_size(25)
        .build_cartesian_2d(0u32..counts.len() as u32, 0u32..y_max)?;

    chart
        .configure_mesh()
        .disable_mesh()
        .label_style(("sans-serif", 10))
        .x_label_formatter(&|i| format!("{:.0}", lo + f64::from(*i) * width))
        .draw()?;

    chart.draw_series(
        Histogram::vertical(&chart)
            .style(BLUE.filled())
            .data(counts.iter().enumerate().map(|(i, &c)| (i as u32, c))),
    )?;
    Ok(())
}

fn draw_scatter_panel(
    panel: &DrawingArea<BitMapBackend, Shift>,
    xs: &[f64],
    ys: &[f64],
    caption: &str,
) -> Result<(), Box<dyn Error>> {
    let points: Vec<(f64, f64)> = xs
        .iter()
        .zip(ys.iter())
        .filter(|(x, y)| x.is_finite() && y.is_finite())
        .map(|(&x, &y)| (x, y))
        .collect();
    if points.is_empty() {
        return Ok(());
    }
    let (x_lo, x_hi) = finite_range(points.iter().map(|p| p.0));
    let (y_lo, y_hi) = finite_range(points.iter().map(|p| p.1));

    let mut chart = ChartBuilder::on(panel)
        .caption(caption, ("sans-serif", 14))
        .margin(5)
        .x_label_area_size(20)
        .y_label_area_size(25)
        .build_cartesian_2d(x_lo..x_hi, y_lo..y_hi)?;

    chart
        .configure_mesh()
        .disable_mesh()
        .label_style(("sans-serif", 10))
        .draw()?;

    chart.draw_series(
        points
            .iter()
            .map(|&(x, y)| Circle::new((x, y), 3, RGBAColor(190, 86, 131, 0.7).filled())),
    )?;
    Ok(())
}

/// Histogram bins over the finite values: (lowest edge, bin width, counts).
fn bin_counts(values: &[f64], bins: usize) -> Option<(f64, f64, Vec<u32>)> {
    let finite: Vec<f64> = values.iter().copied().filter(|v| v.is_finite()).collect();
    if finite.is_empty() || bins == 0 {
        return None;
    }
    let lo = finite.iter().cloned().fold(f64::INFINITY, f64::min);
    let hi = finite.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
    let width = ((hi - lo) / bins as f64).max(f64::EPSILON);
    let mut counts = vec![0u32; bins];
    for v in finite {
        let idx = (((v - lo) / width) as usize).min(bins - 1);
        counts[idx] += 1;
    }
    Some((lo, width, counts))
}

/// Axis range over finite values, padded when degenerate so the chart
/// builder always gets a non-empty span.
fn finite_range(values: impl Iterator<Item = f64>) -> (f64, f64) {
    let finite: Vec<f64> = values.filter(|v| v.is_finite()).collect();
    let mut lo = finite.iter().cloned().fold(f64::INFINITY, f64::min);
    let mut hi = finite.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
    if !lo.is_finite() || !hi.is_finite() {
        return (0.0, 1.0);
    }
    if (hi - lo).abs() < f64::EPSILON {
        lo -= 1.0;
        hi += 1.0;
    }
    (lo, hi)
}
