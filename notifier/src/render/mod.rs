//! Render module
//!
//! HTML documents for the free-game image cards.

pub mod html;

pub use html::{build_html, NOW_FREE_TITLE, UPCOMING_TITLE};
