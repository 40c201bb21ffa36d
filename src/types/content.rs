use serde::{Deserialize, Serialize};

/// The whole poster: header, panels in grid order, and the reference list.
#[derive(Debug, Serialize, Deserialize, Clone, Default)]
#[serde(rename_all = "camelCase")]
pub struct Poster {
    pub title: String,
    pub authors: Vec<String>,
    pub panels: Vec<PanelGroup>,
    pub references: Vec<Reference>,
}

/// Named grid area of the content layout.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum GridArea {
    Intro,
    AimMethod,
    ResultsDiscussion,
    MenuRecommendations,
    References,
}

impl GridArea {
    /// CSS class carrying the `grid-area` declaration.
    pub fn class_name(self) -> &'static str {
        match self {
            Self::Intro => "intro",
            Self::AimMethod => "aimethod",
            Self::ResultsDiscussion => "resdisc",
            Self::MenuRecommendations => "menurecs",
            Self::References => "references",
        }
    }
}

/// A grid cell. Stacks hold several panels; single areas hold exactly one.
#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct PanelGroup {
    pub area: GridArea,
    /// True when the area is a flex column wrapping several panels.
    pub stacked: bool,
    pub panels: Vec<Panel>,
}

/// A rounded card with a heading.
#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct Panel {
    /// Extra CSS class next to `panel`
    pub class: String,
    pub heading: String,
    pub blocks: Vec<Block>,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(rename_all = "camelCase", tag = "kind")]
pub enum Block {
    Paragraph {
        inlines: Vec<Inline>,
        #[serde(default)]
        class: Option<String>,
    },
    Subheading {
        text: String,
    },
    List {
        items: Vec<ListItem>,
    },
    /// Placeholder for the uptake chart
    Figure,
    Image {
        src: String,
        alt: String,
        class: String,
    },
    /// The numbered reference list
    References,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct ListItem {
    pub inlines: Vec<Inline>,
    #[serde(default)]
    pub class: Option<String>,
}

/// Inline run of text.
#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(rename_all = "camelCase", tag = "kind", content = "value")]
pub enum Inline {
    Text(String),
    Strong(String),
    Emphasis(String),
    /// Superscript reference marker `[n]`
    Cite(u32),
    Link { href: String, text: String },
    LineBreak,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct Reference {
    /// Citation lead-in, e.g. "EAT-Lancet Commission."
    pub source: String,
    /// Italicised title
    pub title: String,
    /// Trailing text after the title (journal, year)
    #[serde(default)]
    pub suffix: Option<String>,
    pub url: String,
}
