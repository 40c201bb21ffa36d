use serde::{Deserialize, Serialize};

/// One record of the uptake dataset: a QI cycle and its percentage.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ChartPoint {
    /// Category label shown on the x axis ("Baseline", "PDSA 1", ...)
    pub cycle: String,
    /// Uptake percentage (0-100)
    pub value: f64,
}

impl ChartPoint {
    pub fn new(cycle: impl Into<String>, value: f64) -> Self {
        Self {
            cycle: cycle.into(),
            value,
        }
    }

    /// Value formatted the way labels and tooltips show it, e.g. `23.9%`.
    pub fn percent_label(&self) -> String {
        format_percent(self.value)
    }
}

/// Ordered, immutable chart data. Position is the only identity a record has.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
#[serde(transparent)]
pub struct ChartDataset {
    points: Vec<ChartPoint>,
}

impl ChartDataset {
    pub fn new(points: Vec<ChartPoint>) -> Self {
        Self { points }
    }

    pub fn points(&self) -> &[ChartPoint] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Category labels in x-axis order.
    pub fn cycles(&self) -> impl Iterator<Item = &str> {
        self.points.iter().map(|p| p.cycle.as_str())
    }
}

/// Identity token of the chart's rendering context.
///
/// The surface is rebuilt from scratch whenever the key changes, so no
/// geometry measured for the screen survives into print and vice versa.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "camelCase")]
pub enum RenderKey {
    #[default]
    Screen,
    Print,
}

impl RenderKey {
    pub fn from_print_mode(print_mode: bool) -> Self {
        if print_mode {
            Self::Print
        } else {
            Self::Screen
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Screen => "screen",
            Self::Print => "print",
        }
    }
}

/// Percentage label showing the value as given: `23.9` -> `23.9%`, `22.0` -> `22%`,
/// `23.456` -> `23.456%`. Uses the shortest round-trip form, without rounding.
pub fn format_percent(value: f64) -> String {
    let number = if value.is_infinite() {
        if value.is_sign_negative() {
            "-Infinity".to_string()
        } else {
            "Infinity".to_string()
        }
    } else {
        let shortest = value.to_string();
        if shortest == "-0" {
            "0".to_string()
        } else {
            shortest
        }
    };
    format!("{number}%")
}

/// Shortest decimal rendering of `value` with at most two fraction digits.
pub fn format_number(value: f64) -> String {
    let fixed = format!("{value:.2}");
    let trimmed = fixed.trim_end_matches('0').trim_end_matches('.');
    if trimmed == "-0" {
        "0".to_string()
    } else {
        trimmed.to_string()
    }
}
