//! Chart renderer and chart geometry tests.
//!
//! Uses `RecordingSurface` to observe what the renderer draws, and checks the
//! monotone curve by sampling its cubic segments.
#![allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::float_cmp,
    clippy::panic,
    clippy::cast_lossless
)]

mod common;

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use common::{Frame, RecordingSurface};
use qiposter::chart::ChartRenderer;
use qiposter::content::uptake_dataset;
use qiposter::layout::{ChartLayout, ChartStyle, PathCommand};
use qiposter::render::ChartSurface;
use qiposter::types::{ChartDataset, ChartPoint, RenderKey};
use test_case::test_case;

struct Harness {
    chart: ChartRenderer<RecordingSurface>,
    frames: Rc<RefCell<Vec<Frame>>>,
    surfaces: Rc<Cell<u32>>,
}

fn harness(dataset: ChartDataset, key: RenderKey) -> Harness {
    let frames = Rc::new(RefCell::new(Vec::new()));
    let surfaces = Rc::new(Cell::new(0));
    let chart = {
        let frames = Rc::clone(&frames);
        let surfaces = Rc::clone(&surfaces);
        ChartRenderer::new(
            dataset,
            ChartStyle::default(),
            key,
            Box::new(move |_key| {
                surfaces.set(surfaces.get() + 1);
                Ok(RecordingSurface {
                    frames: Rc::clone(&frames),
                    ..RecordingSurface::default()
                })
            }),
        )
        .unwrap()
    };
    Harness {
        chart,
        frames,
        surfaces,
    }
}

fn layout(width: f64, height: f64) -> ChartLayout {
    ChartLayout::compute(&uptake_dataset(), width, height, &ChartStyle::default())
}

fn cycles(layout: &ChartLayout) -> Vec<String> {
    layout.points.iter().map(|p| p.cycle.clone()).collect()
}

/// Sample the y coordinate of every cubic segment of `path`.
fn cubic_segments(path: &[PathCommand]) -> Vec<((f64, f64), [f64; 4], (f64, f64))> {
    let mut segments = Vec::new();
    let mut cursor = (0.0, 0.0);
    for cmd in path {
        match *cmd {
            PathCommand::MoveTo { x, y } | PathCommand::LineTo { x, y } => cursor = (x, y),
            PathCommand::CubicTo {
                c1y, c2y, x, y, ..
            } => {
                segments.push((cursor, [cursor.1, c1y, c2y, y], (x, y)));
                cursor = (x, y);
            }
            PathCommand::Close => {}
        }
    }
    segments
}

fn bezier(ys: [f64; 4], t: f64) -> f64 {
    let u = 1.0 - t;
    u * u * u * ys[0] + 3.0 * u * u * t * ys[1] + 3.0 * u * t * t * ys[2] + t * t * t * ys[3]
}

fn assert_no_overshoot(layout: &ChartLayout) {
    for (start, ys, end) in cubic_segments(&layout.line) {
        let lo = start.1.min(end.1) - 1e-9;
        let hi = start.1.max(end.1) + 1e-9;
        for step in 0..=50 {
            let y = bezier(ys, step as f64 / 50.0);
            assert!(
                (lo..=hi).contains(&y),
                "segment {start:?} -> {end:?} leaves its range at y={y}"
            );
        }
    }
}

#[test]
fn test_three_points_in_dataset_order() {
    let layout = layout(584.0, 240.0);

    assert_eq!(cycles(&layout), vec!["Baseline", "PDSA 1", "PDSA 2"]);
    let labels: Vec<&str> = layout.points.iter().map(|p| p.label.as_str()).collect();
    assert_eq!(labels, vec!["23.9%", "21.4%", "22.6%"]);
    let ticks: Vec<&str> = layout.x_ticks.iter().map(|t| t.label.as_str()).collect();
    assert_eq!(ticks, vec!["Baseline", "PDSA 1", "PDSA 2"]);
}

#[test]
fn test_tooltips_show_percentages() {
    let layout = layout(584.0, 240.0);
    let tooltips: Vec<(String, String)> = layout
        .points
        .iter()
        .map(|p| {
            let t = layout.tooltip_at(p.x, p.y).unwrap();
            (t.title, t.value)
        })
        .collect();

    assert_eq!(
        tooltips,
        vec![
            ("Cycle: Baseline".to_string(), "23.9%".to_string()),
            ("Cycle: PDSA 1".to_string(), "21.4%".to_string()),
            ("Cycle: PDSA 2".to_string(), "22.6%".to_string()),
        ]
    );
}

#[test]
fn test_curve_passes_through_every_point() {
    let layout = layout(584.0, 240.0);
    let mut ends = Vec::new();
    for cmd in &layout.line {
        match *cmd {
            PathCommand::MoveTo { x, y } | PathCommand::CubicTo { x, y, .. } => ends.push((x, y)),
            _ => {}
        }
    }
    let points: Vec<(f64, f64)> = layout.points.iter().map(|p| (p.x, p.y)).collect();
    assert_eq!(ends, points);
}

#[test]
fn test_uptake_curve_never_overshoots() {
    assert_no_overshoot(&layout(584.0, 240.0));
    assert_no_overshoot(&layout(584.0, 190.0));
}

#[test_case(&[19.0, 25.0, 25.0, 31.0, 20.0] ; "plateau then drop")]
#[test_case(&[18.0, 32.0, 18.0, 32.0] ; "zig zag")]
#[test_case(&[20.0, 21.0, 23.0, 30.0, 31.0] ; "rising")]
fn test_monotone_curve_on_other_series(values: &[f64]) {
    let dataset = ChartDataset::new(
        values
            .iter()
            .enumerate()
            .map(|(i, v)| ChartPoint::new(format!("C{i}"), *v))
            .collect(),
    );
    let layout = ChartLayout::compute(&dataset, 600.0, 300.0, &ChartStyle::default());
    assert_eq!(layout.points.len(), values.len());
    assert_no_overshoot(&layout);
}

#[test]
fn test_resize_always_recomputes() {
    let mut h = harness(uptake_dataset(), RenderKey::Screen);
    h.chart.resize(584.0, 240.0, 2.0).unwrap();
    h.chart.resize(584.0, 240.0, 2.0).unwrap();

    assert_eq!(h.chart.layout_passes(), 2);
    assert_eq!(h.frames.borrow().len(), 2);
    assert_eq!(h.chart.surface().width(), 584.0);
}

#[test]
fn test_resize_tracks_container() {
    let mut h = harness(uptake_dataset(), RenderKey::Screen);
    h.chart.resize(584.0, 240.0, 1.0).unwrap();
    let wide = h.chart.layout().points[2].x;
    h.chart.resize(400.0, 240.0, 1.0).unwrap();
    let narrow = h.chart.layout().points[2].x;

    assert!(narrow < wide);
    assert_eq!(h.frames.borrow().last().unwrap().width, 400.0);
}

#[test]
fn test_rekey_rebuilds_surface_and_keeps_data() {
    let mut h = harness(uptake_dataset(), RenderKey::Screen);
    h.chart.resize(584.0, 240.0, 1.0).unwrap();
    let before = cycles(h.chart.layout());

    assert!(h.chart.rekey(RenderKey::Print).unwrap());
    assert_eq!(h.surfaces.get(), 2);
    assert_eq!(h.chart.generation(), 2);
    assert_eq!(h.chart.key(), RenderKey::Print);
    assert_eq!(h.frames.borrow().last().unwrap().key, RenderKey::Print);

    // Print layout is re-measured by the deferred resize
    h.chart.resize(584.0, 190.0, 1.0).unwrap();
    assert!(h.chart.rekey(RenderKey::Screen).unwrap());
    h.chart.resize(584.0, 240.0, 1.0).unwrap();

    assert_eq!(cycles(h.chart.layout()), before);
    assert_eq!(h.chart.dataset(), &uptake_dataset());
    assert_eq!(h.surfaces.get(), 3);
}

#[test]
fn test_rekey_to_same_key_is_a_no_op() {
    let mut h = harness(uptake_dataset(), RenderKey::Screen);
    assert!(!h.chart.rekey(RenderKey::Screen).unwrap());
    assert_eq!(h.surfaces.get(), 1);
    assert_eq!(h.chart.generation(), 1);
}

#[test]
fn test_rekey_clears_hover() {
    let mut h = harness(uptake_dataset(), RenderKey::Screen);
    h.chart.resize(584.0, 240.0, 1.0).unwrap();
    let p = h.chart.layout().points[0].clone();
    h.chart.hover(p.x, p.y).unwrap();
    assert_eq!(h.chart.active(), Some(0));

    h.chart.rekey(RenderKey::Print).unwrap();
    assert_eq!(h.chart.active(), None);
}

#[test]
fn test_hover_redraws_only_on_change() {
    let mut h = harness(uptake_dataset(), RenderKey::Screen);
    h.chart.resize(584.0, 240.0, 1.0).unwrap();
    let p = h.chart.layout().points[1].clone();

    let tooltip = h.chart.hover(p.x, p.y).unwrap().unwrap();
    assert_eq!(tooltip.value, "21.4%");
    assert_eq!(tooltip.series, "Uptake");
    h.chart.hover(p.x + 1.0, p.y).unwrap();
    assert_eq!(h.frames.borrow().len(), 2);
    assert_eq!(h.frames.borrow().last().unwrap().active, Some(1));

    h.chart.leave().unwrap();
    h.chart.leave().unwrap();
    assert_eq!(h.frames.borrow().len(), 3);
    assert_eq!(h.chart.active(), None);
}

#[test]
fn test_hover_outside_plot_has_no_tooltip() {
    let mut h = harness(uptake_dataset(), RenderKey::Screen);
    h.chart.resize(584.0, 240.0, 1.0).unwrap();
    assert!(h.chart.hover(1.0, 1.0).unwrap().is_none());
}

#[test_case(0.0, 0.0 ; "zero")]
#[test_case(60.0, 300.0 ; "narrower than margins")]
#[test_case(-5.0, 100.0 ; "negative")]
fn test_degenerate_container_draws_empty_frame(width: f64, height: f64) {
    let mut h = harness(uptake_dataset(), RenderKey::Screen);
    h.chart.resize(width, height, 1.0).unwrap();

    assert!(h.chart.layout().is_empty());
    assert_eq!(h.frames.borrow().last().unwrap().points, 0);
    assert!(h.chart.hover(10.0, 10.0).unwrap().is_none());
}

#[test]
fn test_layout_serializes_camel_case() {
    let json = serde_json::to_value(layout(584.0, 240.0)).unwrap();
    assert!(json.get("axisTitle").is_some());
    assert_eq!(json["points"][0]["cycle"], "Baseline");
    assert_eq!(json["line"][0]["op"], "moveTo");
}

#[test]
fn test_failed_rekey_keeps_the_live_surface() {
    let frames = Rc::new(RefCell::new(Vec::new()));
    let mut chart = {
        let frames = Rc::clone(&frames);
        ChartRenderer::new(
            uptake_dataset(),
            ChartStyle::default(),
            RenderKey::Screen,
            Box::new(move |key| match key {
                RenderKey::Screen => Ok(RecordingSurface {
                    frames: Rc::clone(&frames),
                    ..RecordingSurface::default()
                }),
                RenderKey::Print => Err(qiposter::PosterError::Dom("no canvas".into())),
            }),
        )
        .unwrap()
    };
    chart.resize(584.0, 240.0, 1.0).unwrap();

    assert!(chart.rekey(RenderKey::Print).is_err());
    assert_eq!(chart.key(), RenderKey::Screen);
    assert_eq!(chart.generation(), 1);

    // The old surface still takes redraws
    chart.resize(584.0, 240.0, 1.0).unwrap();
    assert_eq!(frames.borrow().len(), 2);
    assert_eq!(frames.borrow().last().unwrap().key, RenderKey::Screen);
}

#[test]
fn test_labels_are_not_rounded() {
    let dataset = ChartDataset::new(vec![
        ChartPoint::new("Baseline", 23.456),
        ChartPoint::new("PDSA 1", 20.0),
    ]);
    let layout = ChartLayout::compute(&dataset, 584.0, 240.0, &ChartStyle::default());
    let p = &layout.points[0];

    assert_eq!(p.label, "23.456%");
    assert_eq!(layout.tooltip_at(p.x, p.y).unwrap().value, "23.456%");
    assert_eq!(layout.points[1].label, "20%");
}
