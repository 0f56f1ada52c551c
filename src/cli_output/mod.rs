//! Line-based terminal output.
//!
//! [`boxes`] prints headers, sections and status lines; [`render`] turns
//! API records into display text.

mod boxes;
pub mod render;

pub use boxes::*;
