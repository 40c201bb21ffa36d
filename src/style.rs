//! The poster stylesheet.
//!
//! Screen rules are fixed; the `@media print` block is generated from the
//! configured [`PageSetup`].

use crate::page_setup::print_css;
use crate::render::colors::palette;
use crate::types::PageSetup;

const SCREEN_CSS: &str = r#"*{box-sizing:border-box}
body{margin:0; background:var(--page); font-family:Inter,system-ui,Segoe UI,Roboto,Arial,sans-serif; color:var(--ink)}
.page{ display:flex; justify-content:center; padding:20px 0; }
.a3{ width:1984px; height:1400px; margin:20px auto; background:var(--white); border:1px solid var(--line); box-shadow:0 10px 30px rgba(0,0,0,.06); display:flex; flex-direction:column; overflow:hidden; }
.header{ padding:22px 36px 12px 36px; border-bottom:1px solid var(--line); display:grid; grid-template-columns:1fr auto; align-items:start; gap:16px; }
.title{ margin:0; font-size:36px; line-height:1.1; color:var(--ink); }
.authors{ margin:10px 0 2px 0; font-size:18px; color:#1f2937; font-weight:600; white-space:normal; line-height:1.35; }
.nhsBox{ display:flex; flex-direction:column; align-items:flex-end; gap:8px; }
.nhsLogo{ width:130px; height:50px; background:#fff; border-radius:8px; display:grid; place-items:center; border:1px solid var(--line); font-weight:800; color:var(--logo-blue); letter-spacing:.6px; padding:4px; }
.toolbar{ display:flex; gap:8px; align-items:center; }
.content{ flex:1; padding:12px 32px; display:grid; grid-template-columns:repeat(3, minmax(0, 1fr)); grid-template-areas: "intro intro intro" "aimethod resdisc menurecs" "aimethod resdisc references"; grid-auto-rows:min-content; gap:12px; }
.intro{ grid-area:intro; }
.aimethod{ grid-area:aimethod; }
.resdisc{ grid-area:resdisc; }
.menurecs{ grid-area:menurecs; }
.references{ grid-area:references; display:flex; flex-direction:column; gap:8px; align-self:start; }
.stack{ display:flex; flex-direction:column; gap:16px; align-self:start; }
.stack .panel{ margin:0; }
.panel{ background:var(--panel); border:1px solid var(--line); border-radius:14px; padding:12px 14px; break-inside:avoid; page-break-inside:avoid; }
h2{ margin:0 0 8px 0; font-size:21px; color:var(--heading) }
h3{ margin:8px 0 6px; font-size:14px; color:#1f2937; text-transform:uppercase; letter-spacing:.35px }
p{ margin:5px 0; font-size:14px }
ul{ margin:6px 0 0 18px; padding:0 }
li{ margin:4px 0; font-size:14px }
.muted{ color:var(--muted) }
.figure{ position:relative; width:100%; height:clamp(200px, 16vw, 280px); background:#fff; border:1px solid var(--line); border-radius:12px; padding:8px; margin-bottom:4px; }
.figure canvas, .figure svg{ display:block; width:100%; height:100%; }
.chartTooltip{ position:absolute; pointer-events:none; background:#fff; border:1px solid var(--line); border-radius:10px; box-shadow:0 6px 18px rgba(11,16,32,0.08); font-size:13px; padding:6px 10px; white-space:nowrap; }
.menuImg{ width:100%; max-width:900px; height:auto; border-radius:12px; border:1px solid var(--line); background:#fff; box-shadow:0 10px 28px rgba(0,0,0,.08); }
.footer{ padding:10px 36px 14px; border-top:1px solid var(--line); display:flex; justify-content:flex-end; align-items:center; gap:10px; background:#fff; }
.btn{ background:var(--heading); color:#fff; border:none; padding:10px 14px; border-radius:10px; font-weight:600; cursor:pointer; }
.btn.secondary{ background:var(--accent); }
.btn:active{ transform:translateY(1px) }
.refnote sup{ font-weight:700 }
.refs{ font-size:14px; line-height:1.4; margin:0; padding-left:20px; }
.refs li{ margin:4px 0 }
"#;

/// Full stylesheet: custom properties, screen rules, then the print block.
pub fn stylesheet(page: &PageSetup) -> String {
    let mut css = String::from(":root{\n");
    for (name, value) in palette::CSS_VARIABLES {
        css.push_str("  ");
        css.push_str(name);
        css.push(':');
        css.push_str(value);
        css.push_str(";\n");
    }
    css.push_str("  --accent:");
    css.push_str(&palette::ACCENT.to_hex());
    css.push_str(";\n  --logo-blue:");
    css.push_str(palette::LOGO_BLUE);
    css.push_str(";\n  --print-scale:1;\n}\n");
    css.push_str(SCREEN_CSS);
    css.push_str(&print_css(page));
    css
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_print_block_comes_last() {
        let css = stylesheet(&PageSetup::default());
        let print_at = css.find("@media print").unwrap_or(0);
        assert!(print_at > css.find(".btn{").unwrap_or(usize::MAX));
        assert!(css.starts_with(":root{"));
        assert!(css.contains("--accent:#147D52;"));
    }
}
