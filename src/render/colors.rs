//! Poster colour palette and small colour helpers.
//!
//! The same constants feed the stylesheet's `:root` custom properties and
//! the chart surfaces, since Canvas 2D cannot resolve `var(--accent)`.

/// RGB color with u8 components.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Convert to CSS hex string (#RRGGBB).
    pub fn to_hex(self) -> String {
        format!("#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }

    /// CSS `rgba()` with the given alpha, clamped to 0..=1.
    pub fn to_rgba(self, alpha: f64) -> String {
        let a = alpha.clamp(0.0, 1.0);
        format!("rgba({}, {}, {}, {})", self.r, self.g, self.b, a)
    }
}

/// Poster theme colours.
pub mod palette {
    use super::Rgb;

    pub const INK: &str = "#0b1020";
    /// Section headings
    pub const HEADING: &str = "#0B6B3A";
    /// Chart line, area gradient, secondary button
    pub const ACCENT: Rgb = Rgb::new(0x14, 0x7D, 0x52);
    pub const MUTED: &str = "#5b6475";
    pub const PANEL: &str = "#F7FBF5";
    pub const PAGE: &str = "#ECF8EE";
    pub const LINE: &str = "#DCE8D6";
    pub const WHITE: &str = "#ffffff";
    pub const LOGO_BLUE: &str = "#005EB8";

    /// (custom property, value) pairs for the stylesheet's `:root` block.
    /// `--accent` is written from [`ACCENT`].
    pub const CSS_VARIABLES: [(&str, &str); 7] = [
        ("--ink", INK),
        ("--heading", HEADING),
        ("--muted", MUTED),
        ("--panel", PANEL),
        ("--page", PAGE),
        ("--line", LINE),
        ("--white", WHITE),
    ];
}
