use serde::{Deserialize, Serialize};

/// Physical paper size of the printed page.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
pub enum PaperSize {
    #[default]
    A3,
    A4,
}

impl PaperSize {
    /// Portrait (width, height) in millimetres.
    pub fn portrait_mm(self) -> (f64, f64) {
        match self {
            Self::A3 => (297.0, 420.0),
            Self::A4 => (210.0, 297.0),
        }
    }

    pub fn css_name(self) -> &'static str {
        match self {
            Self::A3 => "A3",
            Self::A4 => "A4",
        }
    }
}

/// Page orientation
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub enum Orientation {
    Portrait,
    #[default]
    Landscape,
}

impl Orientation {
    pub fn css_name(self) -> &'static str {
        match self {
            Self::Portrait => "portrait",
            Self::Landscape => "landscape",
        }
    }
}

/// Print page configuration. Defaults to A3 landscape with an 8 mm margin.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct PageSetup {
    pub paper_size: PaperSize,
    pub orientation: Orientation,
    /// Uniform page margin in millimetres
    pub margin_mm: f64,
    /// Zoom applied to the design canvas when printing
    pub print_scale: f64,
}

impl Default for PageSetup {
    fn default() -> Self {
        Self {
            paper_size: PaperSize::A3,
            orientation: Orientation::Landscape,
            margin_mm: 8.0,
            print_scale: 0.8,
        }
    }
}

impl PageSetup {
    /// Page (width, height) in millimetres after applying orientation.
    pub fn page_mm(&self) -> (f64, f64) {
        let (w, h) = self.paper_size.portrait_mm();
        match self.orientation {
            Orientation::Portrait => (w, h),
            Orientation::Landscape => (h, w),
        }
    }

    /// Printable (width, height) in millimetres inside the margins.
    pub fn printable_mm(&self) -> (f64, f64) {
        let (w, h) = self.page_mm();
        let inset = self.margin_mm * 2.0;
        ((w - inset).max(0.0), (h - inset).max(0.0))
    }
}

/// Rendering context the document is laid out for.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub enum ViewContext {
    #[default]
    Screen,
    Print,
}

impl ViewContext {
    pub fn from_print_mode(print_mode: bool) -> Self {
        if print_mode {
            Self::Print
        } else {
            Self::Screen
        }
    }

    /// Chart identity token for this context.
    pub fn render_key(self) -> super::RenderKey {
        match self {
            Self::Screen => super::RenderKey::Screen,
            Self::Print => super::RenderKey::Print,
        }
    }
}
