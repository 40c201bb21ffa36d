//! Chart geometry: scales, ticks, point positions, the curve path and hit testing.
//!
//! Everything a surface needs to draw the uptake chart is computed here from the
//! dataset and the container size, so the SVG and Canvas surfaces never do
//! their own arithmetic and a re-layout is just a call to [`ChartLayout::compute`].

use serde::{Deserialize, Serialize};

use crate::types::{format_number, ChartDataset};

/// Space around the plot area, in CSS px.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ChartMargins {
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub left: f64,
}

impl Default for ChartMargins {
    fn default() -> Self {
        Self {
            top: 28.0,
            right: 28.0,
            bottom: 40.0,
            left: 56.0,
        }
    }
}

/// Fixed presentation parameters of the uptake chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartStyle {
    pub margins: ChartMargins,
    /// Value axis domain (min, max)
    pub y_domain: (f64, f64),
    /// Pixel padding inside the plot at both ends of the value axis
    pub y_padding: f64,
    pub tick_count: usize,
    pub point_radius: f64,
    pub active_point_radius: f64,
    /// Distance of the value label above its point
    pub label_offset: f64,
    /// Distance of category labels below the plot
    pub x_tick_offset: f64,
    pub axis_title: String,
    pub series_name: String,
}

impl Default for ChartStyle {
    fn default() -> Self {
        Self {
            margins: ChartMargins::default(),
            y_domain: (18.0, 32.0),
            y_padding: 2.0,
            tick_count: 5,
            point_radius: 6.0,
            active_point_radius: 8.0,
            label_offset: 12.0,
            x_tick_offset: 22.0,
            axis_title: "Plant-based meal uptake (%)".to_string(),
            series_name: "Uptake".to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    /// Containment test with the rect grown by `slack` on every side.
    pub fn contains(&self, x: f64, y: f64, slack: f64) -> bool {
        x >= self.x - slack
            && x <= self.right() + slack
            && y >= self.y - slack
            && y <= self.bottom() + slack
    }
}

/// A data point placed in container coordinates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlotPoint {
    pub index: usize,
    pub cycle: String,
    pub value: f64,
    pub x: f64,
    pub y: f64,
    /// `"{value}%"`, drawn above the marker and shown in the tooltip
    pub label: String,
    pub label_y: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AxisTick {
    /// Pixel position along the axis
    pub position: f64,
    pub label: String,
}

/// Path command in container coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "camelCase")]
pub enum PathCommand {
    MoveTo {
        x: f64,
        y: f64,
    },
    LineTo {
        x: f64,
        y: f64,
    },
    CubicTo {
        c1x: f64,
        c1y: f64,
        c2x: f64,
        c2y: f64,
        x: f64,
        y: f64,
    },
    Close,
}

/// Hover tooltip content for one point.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Tooltip {
    pub index: usize,
    /// `"Cycle: {label}"`
    pub title: String,
    pub series: String,
    /// `"{value}%"`
    pub value: String,
    /// Anchor point in container coordinates
    pub x: f64,
    pub y: f64,
}

/// Complete geometry of the chart for one container size.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartLayout {
    pub width: f64,
    pub height: f64,
    pub plot: Rect,
    pub points: Vec<PlotPoint>,
    pub y_ticks: Vec<AxisTick>,
    pub x_ticks: Vec<AxisTick>,
    /// Baseline of the x axis labels
    pub x_tick_y: f64,
    pub line: Vec<PathCommand>,
    pub area: Vec<PathCommand>,
    /// Pixel y of the value-axis minimum; the area fills down to here
    pub baseline_y: f64,
    pub axis_title: String,
    pub series_name: String,
    pub point_radius: f64,
    pub active_point_radius: f64,
}

impl ChartLayout {
    /// Layout with no drawable content, used for degenerate containers.
    pub fn empty(width: f64, height: f64) -> Self {
        Self {
            width: width.max(0.0),
            height: height.max(0.0),
            ..Self::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn compute(dataset: &ChartDataset, width: f64, height: f64, style: &ChartStyle) -> Self {
        let m = style.margins;
        let plot = Rect {
            x: m.left,
            y: m.top,
            width: width - m.left - m.right,
            height: height - m.top - m.bottom,
        };
        let (y_min, y_max) = style.y_domain;
        let span = y_max - y_min;
        if !(plot.width > 0.0 && plot.height > style.y_padding * 2.0 && span > 0.0)
            || dataset.is_empty()
        {
            return Self::empty(width, height);
        }

        let range_top = plot.y + style.y_padding;
        let range_bottom = plot.bottom() - style.y_padding;
        let y_of = |v: f64| range_bottom - (v - y_min) / span * (range_bottom - range_top);

        let n = dataset.len();
        let x_of = |i: usize| {
            if n == 1 {
                plot.x + plot.width / 2.0
            } else {
                plot.x + plot.width * i as f64 / (n - 1) as f64
            }
        };

        let points: Vec<PlotPoint> = dataset
            .points()
            .iter()
            .enumerate()
            .map(|(index, p)| {
                let y = y_of(p.value);
                PlotPoint {
                    index,
                    cycle: p.cycle.clone(),
                    value: p.value,
                    x: x_of(index),
                    y,
                    label: p.percent_label(),
                    label_y: y - style.label_offset,
                }
            })
            .collect();

        let tick_count = style.tick_count.max(2);
        let y_ticks = (0..tick_count)
            .map(|k| {
                let v = y_min + span * k as f64 / (tick_count - 1) as f64;
                AxisTick {
                    position: y_of(v),
                    label: format_number(v),
                }
            })
            .collect();

        let x_ticks = points
            .iter()
            .map(|p| AxisTick {
                position: p.x,
                label: p.cycle.clone(),
            })
            .collect();

        let coords: Vec<(f64, f64)> = points.iter().map(|p| (p.x, p.y)).collect();
        let line = monotone_x_path(&coords);
        let baseline_y = y_of(y_min);
        let area = area_path(&line, &coords, baseline_y);

        Self {
            width,
            height,
            plot,
            points,
            y_ticks,
            x_ticks,
            x_tick_y: plot.bottom() + style.x_tick_offset,
            line,
            area,
            baseline_y,
            axis_title: style.axis_title.clone(),
            series_name: style.series_name.clone(),
            point_radius: style.point_radius,
            active_point_radius: style.active_point_radius,
        }
    }

    /// Point whose category is closest to `x`, if the pointer is over the plot.
    pub fn nearest_point(&self, x: f64, y: f64) -> Option<&PlotPoint> {
        if self.is_empty() || !self.plot.contains(x, y, self.active_point_radius) {
            return None;
        }
        self.points.iter().min_by(|a, b| {
            (a.x - x)
                .abs()
                .partial_cmp(&(b.x - x).abs())
                .unwrap_or(std::cmp::Ordering::Equal)
        })
    }

    pub fn tooltip_at(&self, x: f64, y: f64) -> Option<Tooltip> {
        self.nearest_point(x, y).map(|p| Tooltip {
            index: p.index,
            title: format!("Cycle: {}", p.cycle),
            series: self.series_name.clone(),
            value: p.label.clone(),
            x: p.x,
            y: p.y,
        })
    }
}

fn sign(v: f64) -> f64 {
    if v < 0.0 {
        -1.0
    } else {
        1.0
    }
}

/// Tangent at the middle of three points (Fritsch-Carlson, as in monotone-X curves).
fn interior_tangent(p0: (f64, f64), p1: (f64, f64), p2: (f64, f64)) -> f64 {
    let h0 = p1.0 - p0.0;
    let h1 = p2.0 - p1.0;
    if h0 <= 0.0 || h1 <= 0.0 {
        return 0.0;
    }
    let s0 = (p1.1 - p0.1) / h0;
    let s1 = (p2.1 - p1.1) / h1;
    let p = (s0 * h1 + s1 * h0) / (h0 + h1);
    let t = (sign(s0) + sign(s1)) * s0.abs().min(s1.abs()).min(0.5 * p.abs());
    if t.is_finite() {
        t
    } else {
        0.0
    }
}

/// One-sided tangent at an end point given the neighbour's tangent.
fn end_tangent(p0: (f64, f64), p1: (f64, f64), t: f64) -> f64 {
    let h = p1.0 - p0.0;
    if h > 0.0 {
        (3.0 * (p1.1 - p0.1) / h - t) / 2.0
    } else {
        t
    }
}

/// Monotone cubic interpolation through `points` (x strictly increasing).
///
/// Each segment stays within the value range of its two end points, so the
/// curve never suggests a peak or dip the data does not have.
pub fn monotone_x_path(points: &[(f64, f64)]) -> Vec<PathCommand> {
    let Some(&(x0, y0)) = points.first() else {
        return Vec::new();
    };
    let mut path = vec![PathCommand::MoveTo { x: x0, y: y0 }];
    if points.len() == 2 {
        if let Some(&(x, y)) = points.last() {
            path.push(PathCommand::LineTo { x, y });
        }
        return path;
    }
    if points.len() < 3 {
        return path;
    }

    let n = points.len();
    let mut tangents = vec![0.0; n];
    for (i, w) in points.windows(3).enumerate() {
        if let (Some(&a), Some(&b), Some(&c), Some(t)) =
            (w.first(), w.get(1), w.get(2), tangents.get_mut(i + 1))
        {
            *t = interior_tangent(a, b, c);
        }
    }
    if let (Some(&a), Some(&b), Some(&t1)) = (points.first(), points.get(1), tangents.get(1)) {
        if let Some(t0) = tangents.first_mut() {
            *t0 = end_tangent(a, b, t1);
        }
    }
    if let (Some(&a), Some(&b), Some(&tp)) =
        (points.get(n - 2), points.get(n - 1), tangents.get(n - 2))
    {
        if let Some(tn) = tangents.last_mut() {
            *tn = end_tangent(a, b, tp);
        }
    }

    for (seg, t) in points.windows(2).zip(tangents.windows(2)) {
        if let (Some(&(ax, ay)), Some(&(bx, by)), Some(&ta), Some(&tb)) =
            (seg.first(), seg.get(1), t.first(), t.get(1))
        {
            let dx = (bx - ax) / 3.0;
            path.push(PathCommand::CubicTo {
                c1x: ax + dx,
                c1y: ay + dx * ta,
                c2x: bx - dx,
                c2y: by - dx * tb,
                x: bx,
                y: by,
            });
        }
    }
    path
}

/// Close the line path down to the baseline to form the filled area.
fn area_path(line: &[PathCommand], points: &[(f64, f64)], baseline_y: f64) -> Vec<PathCommand> {
    let (Some(&(first_x, _)), Some(&(last_x, _))) = (points.first(), points.last()) else {
        return Vec::new();
    };
    let mut area = line.to_vec();
    area.push(PathCommand::LineTo {
        x: last_x,
        y: baseline_y,
    });
    area.push(PathCommand::LineTo {
        x: first_x,
        y: baseline_y,
    });
    area.push(PathCommand::Close);
    area
}
