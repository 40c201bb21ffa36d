//! Data types for the poster, its chart and its printed page.

mod chart;
mod content;
mod page;

pub use chart::*;
pub use content::*;
pub use page::*;
