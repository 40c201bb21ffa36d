//! The chart renderer: dataset + surface + render key.
//!
//! The renderer recomputes its geometry on every container-resize signal and
//! rebuilds its surface from scratch whenever the render key changes. Those
//! two entry points are all the view-state synchronizer relies on.

use tracing::debug;

use crate::error::Result;
use crate::layout::{ChartLayout, ChartStyle, Tooltip};
use crate::render::backend::{ChartParams, ChartSurface};
use crate::types::{ChartDataset, RenderKey};

/// Builds a fresh surface for a render key.
pub type SurfaceFactory<S> = Box<dyn FnMut(RenderKey) -> Result<S>>;

pub struct ChartRenderer<S: ChartSurface> {
    dataset: ChartDataset,
    style: ChartStyle,
    key: RenderKey,
    surface: S,
    factory: SurfaceFactory<S>,
    layout: ChartLayout,
    /// Last measured container (CSS px) and device pixel ratio
    container: (f64, f64),
    dpr: f64,
    active: Option<usize>,
    /// Surfaces created so far, including the first
    generation: u32,
    layout_passes: u64,
}

impl<S: ChartSurface> ChartRenderer<S> {
    pub fn new(
        dataset: ChartDataset,
        style: ChartStyle,
        key: RenderKey,
        mut factory: SurfaceFactory<S>,
    ) -> Result<Self> {
        let mut surface = factory(key)?;
        surface.init()?;
        Ok(Self {
            dataset,
            style,
            key,
            surface,
            factory,
            layout: ChartLayout::default(),
            container: (0.0, 0.0),
            dpr: 1.0,
            active: None,
            generation: 1,
            layout_passes: 0,
        })
    }

    pub fn dataset(&self) -> &ChartDataset {
        &self.dataset
    }

    pub fn key(&self) -> RenderKey {
        self.key
    }

    pub fn layout(&self) -> &ChartLayout {
        &self.layout
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn generation(&self) -> u32 {
        self.generation
    }

    /// Number of geometry recomputations so far.
    pub fn layout_passes(&self) -> u64 {
        self.layout_passes
    }

    pub fn active(&self) -> Option<usize> {
        self.active
    }

    /// Container-resize signal: recompute geometry for the new size and redraw.
    ///
    /// Runs even when the size is unchanged, since the surface may have been
    /// rebuilt or print styles may have changed what the caller measured.
    pub fn resize(&mut self, width: f64, height: f64, dpr: f64) -> Result<()> {
        self.container = (width.max(0.0), height.max(0.0));
        self.dpr = if dpr.is_finite() && dpr > 0.0 { dpr } else { 1.0 };
        self.relayout()
    }

    /// Switch rendering context. Tears the surface down and builds a new one.
    ///
    /// Returns `Ok(false)` without touching anything when the key is unchanged.
    pub fn rekey(&mut self, key: RenderKey) -> Result<bool> {
        if key == self.key {
            return Ok(false);
        }
        let mut surface = (self.factory)(key)?;
        surface.init()?;
        self.surface = surface;
        self.key = key;
        self.generation += 1;
        self.active = None;
        debug!(key = key.as_str(), generation = self.generation, "chart re-keyed");
        self.relayout()?;
        Ok(true)
    }

    /// Pointer moved to (x, y) in container coordinates.
    pub fn hover(&mut self, x: f64, y: f64) -> Result<Option<Tooltip>> {
        let tooltip = self.layout.tooltip_at(x, y);
        let active = tooltip.as_ref().map(|t| t.index);
        if active != self.active {
            self.active = active;
            self.draw()?;
        }
        Ok(tooltip)
    }

    /// Pointer left the chart.
    pub fn leave(&mut self) -> Result<()> {
        if self.active.take().is_some() {
            self.draw()?;
        }
        Ok(())
    }

    fn relayout(&mut self) -> Result<()> {
        let (width, height) = self.container;
        self.surface.resize(width, height, self.dpr);
        self.layout = ChartLayout::compute(&self.dataset, width, height, &self.style);
        self.layout_passes += 1;
        if self.active.is_some_and(|i| i >= self.layout.points.len()) {
            self.active = None;
        }
        self.draw()
    }

    fn draw(&mut self) -> Result<()> {
        self.surface.draw(&ChartParams {
            layout: &self.layout,
            active: self.active,
            key: self.key,
        })
    }
}
