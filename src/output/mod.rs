//! Output encoders.
//!
//! SVG is the handoff format: a rendered panel or layout becomes one
//! standalone document.

mod svg;

pub use svg::{SvgElement, SvgEncoder, TextAnchor};
