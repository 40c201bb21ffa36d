//! Layout engine for the uptake chart.
//!
//! This module handles:
//! - Value and category scales for a measured container
//! - Tick, marker and label placement
//! - The monotone curve and the filled area beneath it
//! - Nearest-point hit testing for the tooltip

mod chart_layout;

pub use chart_layout::{
    monotone_x_path, AxisTick, ChartLayout, ChartMargins, ChartStyle, PathCommand, PlotPoint,
    Rect, Tooltip,
};
