//! SVG line plots of free-energy, PMF and RMSE curves.
//!
//! Uses the plotters SVG backend so rendering needs no system fonts.

use plotters::prelude::*;
use std::ops::Range;
use std::path::Path;
use thiserror::Error;

const FIGURE_SIZE: (u32, u32) = (800, 600);
const ERROR_BAR_WIDTH: u32 = 6;
const LEGEND_SWATCH: i32 = 20;
const RANGE_PADDING: f64 = 0.05;

#[derive(Debug, Error)]
pub enum FigureError {
    #[error("Plot '{0}' has no data points to draw")]
    NoData(String),
    #[error("Series '{label}' has {x} x values but {y} y values")]
    SeriesLength { label: String, x: usize, y: usize },
    #[error("Drawing failed for '{path}': {message}")]
    Drawing { path: String, message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Marker {
    Circle,
    Triangle,
    Cross,
}

impl Marker {
    pub fn cycle(index: usize) -> Self {
        match index % 3 {
            0 => Marker::Triangle,
            1 => Marker::Circle,
            _ => Marker::Cross,
        }
    }
}

/// One labeled curve, optionally with symmetric error bars.
#[derive(Debug, Clone, PartialEq)]
pub struct PlotSeries {
    pub label: String,
    pub x: Vec<f64>,
    pub y: Vec<f64>,
    pub y_err: Option<Vec<f64>>,
    pub marker: Option<Marker>,
}

impl PlotSeries {
    pub fn new(label: impl Into<String>, x: Vec<f64>, y: Vec<f64>) -> Self {
        Self {
            label: label.into(),
            x,
            y,
            y_err: None,
            marker: None,
        }
    }

    pub fn with_errors(mut self, y_err: Vec<f64>) -> Self {
        self.y_err = Some(y_err);
        self
    }

    pub fn with_marker(mut self, marker: Marker) -> Self {
        self.marker = Some(marker);
        self
    }

    fn points(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.x.iter().copied().zip(self.y.iter().copied())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct LinePlot {
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    pub series: Vec<PlotSeries>,
    pub line_width: u32,
    pub alpha: f64,
    pub x_ticks: usize,
    pub y_ticks: usize,
}

impl LinePlot {
    pub fn new(title: impl Into<String>, x_label: impl Into<String>, y_label: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            x_label: x_label.into(),
            y_label: y_label.into(),
            series: Vec::new(),
            line_width: 2,
            alpha: 0.5,
            x_ticks: 6,
            y_ticks: 10,
        }
    }

    pub fn push(&mut self, series: PlotSeries) {
        self.series.push(series);
    }

    fn validate(&self) -> Result<(), FigureError> {
        for s in &self.series {
            if s.x.len() != s.y.len() {
                return Err(FigureError::SeriesLength {
                    label: s.label.clone(),
                    x: s.x.len(),
                    y: s.y.len(),
                });
            }
            if let Some(err) = &s.y_err {
                if err.len() != s.y.len() {
                    return Err(FigureError::SeriesLength {
                        label: s.label.clone(),
                        x: s.x.len(),
                        y: err.len(),
                    });
                }
            }
        }
        Ok(())
    }

    /// Axis ranges covering every finite point and error bar, with a small margin.
    pub fn bounds(&self) -> Option<(Range<f64>, Range<f64>)> {
        let mut x = (f64::INFINITY, f64::NEG_INFINITY);
        let mut y = (f64::INFINITY, f64::NEG_INFINITY);

        for s in &self.series {
            for (i, (px, py)) in s.points().enumerate() {
                if !px.is_finite() || !py.is_finite() {
                    continue;
                }
                let e = s
                    .y_err
                    .as_ref()
                    .map(|err| err[i])
                    .filter(|e| e.is_finite())
                    .unwrap_or(0.0)
                    .abs();
                x = (x.0.min(px), x.1.max(px));
                y = (y.0.min(py - e), y.1.max(py + e));
            }
        }

        if x.0 > x.1 {
            return None;
        }
        Some((pad(x.0, x.1), pad(y.0, y.1)))
    }
}

fn pad(lo: f64, hi: f64) -> Range<f64> {
    let span = hi - lo;
    if span <= f64::EPSILON * lo.abs().max(1.0) {
        let half = lo.abs().max(1.0) * RANGE_PADDING;
        return (lo - half)..(hi + half);
    }
    (lo - span * RANGE_PADDING)..(hi + span * RANGE_PADDING)
}

/// Renders `plot` to an SVG file at `path`.
pub fn render_svg(plot: &LinePlot, path: &Path) -> Result<(), FigureError> {
    plot.validate()?;
    let (x_range, y_range) = plot
        .bounds()
        .ok_or_else(|| FigureError::NoData(plot.title.clone()))?;

    let draw_err = |e: &dyn std::fmt::Display| FigureError::Drawing {
        path: path.display().to_string(),
        message: e.to_string(),
    };

    let root = SVGBackend::new(path, FIGURE_SIZE).into_drawing_area();
    root.fill(&WHITE).map_err(|e| draw_err(&e))?;

    let mut chart = ChartBuilder::on(&root)
        .caption(&plot.title, ("sans-serif", 20))
        .margin(20)
        .x_label_area_size(40)
        .y_label_area_size(60)
        .build_cartesian_2d(x_range, y_range)
        .map_err(|e| draw_err(&e))?;

    chart
        .configure_mesh()
        .x_desc(plot.x_label.as_str())
        .y_desc(plot.y_label.as_str())
        .x_labels(plot.x_ticks)
        .y_labels(plot.y_ticks)
        .draw()
        .map_err(|e| draw_err(&e))?;

    for (i, series) in plot.series.iter().enumerate() {
        let color = Palette99::pick(i).mix(plot.alpha);
        let line_style = color.stroke_width(plot.line_width);

        chart
            .draw_series(LineSeries::new(series.points(), line_style))
            .map_err(|e| draw_err(&e))?
            .label(series.label.as_str())
            .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + LEGEND_SWATCH, y)], line_style));

        if let Some(errors) = &series.y_err {
            chart
                .draw_series(series.points().zip(errors.iter().copied()).map(
                    |((x, y), e)| {
                        ErrorBar::new_vertical(x, y - e, y, y + e, line_style, ERROR_BAR_WIDTH)
                    },
                ))
                .map_err(|e| draw_err(&e))?;
        }

        let marker_style = color.filled();
        let drawn = match series.marker {
            Some(Marker::Circle) => chart
                .draw_series(series.points().map(|p| Circle::new(p, 4, marker_style)))
                .map(|_| ()),
            Some(Marker::Triangle) => chart
                .draw_series(series.points().map(|p| TriangleMarker::new(p, 4, marker_style)))
                .map(|_| ()),
            Some(Marker::Cross) => chart
                .draw_series(series.points().map(|p| Cross::new(p, 4, line_style)))
                .map(|_| ()),
            None => Ok(()),
        };
        drawn.map_err(|e| draw_err(&e))?;
    }

    chart
        .configure_series_labels()
        .background_style(&WHITE.mix(0.8))
        .border_style(&BLACK)
        .draw()
        .map_err(|e| draw_err(&e))?;

    root.present().map_err(|e| draw_err(&e))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    fn sample_plot() -> LinePlot {
        let mut plot = LinePlot::new("PMF", "d (nm)", "PMF (RT)");
        plot.push(
            PlotSeries::new("u", vec![1.0, 2.0, 3.0], vec![0.5, 0.0, 1.0])
                .with_errors(vec![0.1, 0.1, 0.2]),
        );
        plot.push(
            PlotSeries::new("us", vec![1.0, 2.0, 3.0], vec![0.4, 0.0, 1.2])
                .with_marker(Marker::Circle),
        );
        plot
    }

    #[test]
    fn bounds_include_error_bars() {
        let (x, y) = sample_plot().bounds().unwrap();
        assert!(x.start < 1.0 && x.end > 3.0);
        assert!(y.start < -0.1 && y.end > 1.2);
    }

    #[test]
    fn bounds_pad_constant_series() {
        let mut plot = LinePlot::new("flat", "x", "y");
        plot.push(PlotSeries::new("zero", vec![1.0, 2.0], vec![0.0, 0.0]));
        let (_, y) = plot.bounds().unwrap();
        assert!(y.start < 0.0 && y.end > 0.0);
    }

    #[test]
    fn render_writes_svg_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("pmfs.svg");
        render_svg(&sample_plot(), &path).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        assert!(content.contains("<svg"));
        assert!(content.contains("us"));
    }

    #[test]
    fn render_rejects_empty_plot() {
        let dir = tempdir().unwrap();
        let plot = LinePlot::new("empty", "x", "y");
        assert!(matches!(
            render_svg(&plot, &dir.path().join("empty.svg")),
            Err(FigureError::NoData(_))
        ));
    }

    #[test]
    fn render_rejects_ragged_series() {
        let dir = tempdir().unwrap();
        let mut plot = LinePlot::new("ragged", "x", "y");
        plot.push(PlotSeries::new("bad", vec![1.0, 2.0], vec![1.0]));
        assert!(matches!(
            render_svg(&plot, &dir.path().join("ragged.svg")),
            Err(FigureError::SeriesLength { .. })
        ));
    }

    #[test]
    fn markers_cycle_through_shapes() {
        assert_eq!(Marker::cycle(0), Marker::Triangle);
        assert_eq!(Marker::cycle(1), Marker::Circle);
        assert_eq!(Marker::cycle(2), Marker::Cross);
        assert_eq!(Marker::cycle(3), Marker::Triangle);
    }
}
