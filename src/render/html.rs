//! HTML document writer.
//!
//! Turns the typed [`Poster`] into markup. Interactive controls are tagged
//! with `data-action` attributes so the browser view can bind them without
//! relying on text or position.

use crate::logo::LogoSource;
use crate::types::{Block, Inline, Panel, PanelGroup, Poster, Reference, RenderKey};

/// `data-action` of the PNG export button
pub const ACTION_EXPORT: &str = "export-png";
/// `data-action` of the print button
pub const ACTION_PRINT: &str = "print";
/// `data-action` of the logo file picker
pub const ACTION_PICK_LOGO: &str = "pick-logo";
/// Element id of the poster root (the export target)
pub const POSTER_ID: &str = "poster";
/// `data-chart` marker on the figure container
pub const FIGURE_MARKER: &str = "uptake";

/// Escape text for use in element content and double-quoted attributes.
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Inputs of one document render.
pub struct DocumentParts<'a> {
    pub poster: &'a Poster,
    pub stylesheet: &'a str,
    pub logo: &'a LogoSource,
    /// Pre-rendered chart markup placed inside the figure
    pub chart: &'a str,
    pub key: RenderKey,
}

/// A complete standalone HTML document.
pub fn render_document(parts: &DocumentParts) -> String {
    let mut out = String::from("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n");
    out.push_str("<meta charset=\"utf-8\">\n");
    out.push_str("<meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n");
    out.push_str("<title>");
    out.push_str(&escape(&parts.poster.title));
    out.push_str("</title>\n</head>\n<body>\n");
    out.push_str(&render_fragment(parts));
    out.push_str("\n</body>\n</html>\n");
    out
}

/// Stylesheet plus poster markup, for mounting into an existing element.
pub fn render_fragment(parts: &DocumentParts) -> String {
    let mut out = String::from("<style>\n");
    out.push_str(parts.stylesheet);
    out.push_str("</style>\n");
    write_poster(&mut out, parts);
    out
}

fn write_poster(out: &mut String, parts: &DocumentParts) {
    let poster = parts.poster;
    out.push_str("<div class=\"page\">");
    out.push_str(&format!(
        "<div class=\"a3\" id=\"{POSTER_ID}\" data-render-key=\"{}\">",
        parts.key.as_str()
    ));

    out.push_str("<div class=\"header\"><div><h1 class=\"title\">");
    out.push_str(&escape(&poster.title));
    out.push_str("</h1><div class=\"authors\">");
    for author in &poster.authors {
        out.push_str("<div>");
        out.push_str(&escape(author));
        out.push_str("</div>");
    }
    out.push_str("</div></div><div class=\"nhsBox\">");
    out.push_str(&logo_markup(parts.logo));
    out.push_str(&format!(
        "<div class=\"toolbar\"><input type=\"file\" accept=\"image/*\" title=\"Add NHS logo\" data-action=\"{ACTION_PICK_LOGO}\"></div>"
    ));
    out.push_str("</div></div>");

    out.push_str("<div class=\"content\">");
    for group in &poster.panels {
        write_group(out, group, parts);
    }
    out.push_str("</div>");

    out.push_str(&format!(
        "<div class=\"footer\"><button class=\"btn secondary\" data-action=\"{ACTION_EXPORT}\">Download PNG</button><button class=\"btn\" data-action=\"{ACTION_PRINT}\">Print / Save as PDF</button></div>"
    ));
    out.push_str("</div></div>");
}

/// Logo image, or the text placeholder when no source is set.
pub fn logo_markup(logo: &LogoSource) -> String {
    match logo.src() {
        Some(src) => format!(
            "<img src=\"{}\" alt=\"NHS\" class=\"nhsLogo\" style=\"object-fit:contain\">",
            escape(src)
        ),
        None => "<div class=\"nhsLogo\">NHS</div>".to_string(),
    }
}

fn write_group(out: &mut String, group: &PanelGroup, parts: &DocumentParts) {
    let area = group.area.class_name();
    if group.stacked {
        out.push_str(&format!("<div class=\"{area} stack\">"));
        for panel in &group.panels {
            write_panel(out, panel, None, parts);
        }
        out.push_str("</div>");
    } else {
        for panel in &group.panels {
            write_panel(out, panel, Some(area), parts);
        }
    }
}

fn write_panel(out: &mut String, panel: &Panel, area: Option<&str>, parts: &DocumentParts) {
    let mut class = String::from("panel");
    for extra in [area.unwrap_or(""), panel.class.as_str()] {
        if !extra.is_empty() {
            class.push(' ');
            class.push_str(extra);
        }
    }
    out.push_str(&format!("<div class=\"{}\"><h2>", escape(&class)));
    out.push_str(&escape(&panel.heading));
    out.push_str("</h2>");
    for block in &panel.blocks {
        write_block(out, block, parts);
    }
    out.push_str("</div>");
}

fn class_attr(class: Option<&String>) -> String {
    match class {
        Some(c) => format!(" class=\"{}\"", escape(c)),
        None => String::new(),
    }
}

fn write_block(out: &mut String, block: &Block, parts: &DocumentParts) {
    match block {
        Block::Paragraph { inlines, class } => {
            out.push_str(&format!("<p{}>", class_attr(class.as_ref())));
            write_inlines(out, inlines);
            out.push_str("</p>");
        }
        Block::Subheading { text } => {
            out.push_str("<h3>");
            out.push_str(&escape(text));
            out.push_str("</h3>");
        }
        Block::List { items } => {
            out.push_str("<ul>");
            for item in items {
                out.push_str(&format!("<li{}>", class_attr(item.class.as_ref())));
                write_inlines(out, &item.inlines);
                out.push_str("</li>");
            }
            out.push_str("</ul>");
        }
        Block::Figure => {
            out.push_str(&format!(
                "<div class=\"figure\" data-chart=\"{FIGURE_MARKER}\">"
            ));
            out.push_str(parts.chart);
            out.push_str("</div>");
        }
        Block::Image { src, alt, class } => {
            out.push_str(&format!(
                "<img src=\"{}\" alt=\"{}\" class=\"{}\">",
                escape(src),
                escape(alt),
                escape(class)
            ));
        }
        Block::References => write_references(out, &parts.poster.references),
    }
}

fn write_inlines(out: &mut String, inlines: &[Inline]) {
    for inline in inlines {
        match inline {
            Inline::Text(t) => out.push_str(&escape(t)),
            Inline::Strong(t) => {
                out.push_str("<strong>");
                out.push_str(&escape(t));
                out.push_str("</strong>");
            }
            Inline::Emphasis(t) => {
                out.push_str("<em>");
                out.push_str(&escape(t));
                out.push_str("</em>");
            }
            Inline::Cite(n) => {
                out.push_str(&format!("<span class=\"refnote\"><sup>[{n}]</sup></span>"));
            }
            Inline::Link { href, text } => {
                out.push_str(&format!(
                    "<a href=\"{}\" target=\"_blank\" rel=\"noreferrer\">{}</a>",
                    escape(href),
                    escape(text)
                ));
            }
            Inline::LineBreak => out.push_str("<br/>"),
        }
    }
}

fn write_references(out: &mut String, references: &[Reference]) {
    out.push_str("<ol class=\"refs\">");
    for r in references {
        out.push_str("<li>");
        out.push_str(&escape(&r.source));
        out.push_str(" <em>");
        out.push_str(&escape(&r.title));
        out.push_str("</em>");
        if let Some(suffix) = &r.suffix {
            out.push_str(&escape(suffix));
        }
        out.push_str("<br/>");
        write_inlines(
            out,
            &[Inline::Link {
                href: r.url.clone(),
                text: r.url.clone(),
            }],
        );
        out.push_str("</li>");
    }
    out.push_str("</ol>");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape() {
        assert_eq!(escape(r#"<a href="x">&'"#), "&lt;a href=&quot;x&quot;&gt;&amp;&#39;");
        assert_eq!(escape("King’s"), "King’s");
    }

    #[test]
    fn test_logo_placeholder() {
        assert_eq!(
            logo_markup(&LogoSource::Placeholder),
            "<div class=\"nhsLogo\">NHS</div>"
        );
    }

    #[test]
    fn test_logo_image_escapes_src() {
        let markup = logo_markup(&LogoSource::Bundled("a\"b.png".into()));
        assert!(markup.starts_with("<img src=\"a&quot;b.png\""));
        assert!(markup.contains("object-fit:contain"));
    }
}
