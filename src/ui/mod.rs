//! Terminal rendering of the report
//!
//! - `render` - Report layout
//! - `utils` - Shared formatting helpers

mod render;
mod utils;

pub use render::render_report;
