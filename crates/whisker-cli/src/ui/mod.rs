//! # CLI UI Module
//!
//! Styling and formatting layer for `whisker` output.
//!
//! - `color`: color mode selection and terminal capability checks
//! - `style`: message prefixes and styling functions
//! - `format`: text formatters (truncation, scores, metadata)
//! - `table`: fact tables rendered with comfy-table
//! - `progress`: spinner for calls to the text generator

pub mod color;
pub mod format;
pub mod progress;
pub mod style;
pub mod table;

pub use color::ColorMode;
pub use progress::Spinner;
pub use style::{MessageType, Style};
