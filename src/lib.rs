//! # figure-grammar
//!
//! A Grammar of Graphics pipeline for example figures.
//!
//! Named datasets are mapped onto geometries through aesthetic channels,
//! rendered into panels, and composed into multi-panel layouts. The SVG
//! encoder turns a panel or layout into the document a slide is built from.
//!
//! ## Quick Start
//!
//! ```rust
//! use figure_grammar::prelude::*;
//!
//! let provider = DatasetProvider::new();
//! let mpg = provider.load("mpg")?;
//!
//! let scatter = (Figure::new(mpg.clone()) + Aes::new().x("displ").y("hwy") + Geom::point()).render()?;
//! let bars = (Figure::new(mpg) + Aes::new().x("class") + Geom::bar()).render()?;
//!
//! let spec = LayoutSpec::new().tags(Tags::sequential(TagStyle::UpperAlpha));
//! let layout = compose(vec![scatter, bars], &spec)?;
//! assert_eq!(layout.tag_for(1), Some("B"));
//!
//! let svg = SvgEncoder::new(400, 300).encode_layout(&layout);
//! assert!(svg.starts_with("<svg"));
//! # Ok::<(), figure_grammar::Error>(())
//! ```
//!
//! ## Pipeline
//!
//! 1. [`grammar::DatasetProvider`] serves immutable, shared datasets.
//! 2. [`grammar::resolve`] validates an [`grammar::Aes`] against a
//!    [`grammar::Geom`] and a dataset schema.
//! 3. [`grammar::Renderer`] draws the resolved mapping into a [`grammar::Panel`].
//! 4. [`compose::compose`] arranges panels into a [`compose::Layout`].
//! 5. [`output::SvgEncoder`] serializes panels and layouts.
//!
//! ## Academic References
//!
//! - Wilkinson, L. (2005). *The Grammar of Graphics*. Springer.
//! - Wickham, H. (2010). "A Layered Grammar of Graphics." Journal of
//!   Computational and Graphical Statistics.

#![cfg_attr(docsrs, feature(doc_cfg))]
#![warn(missing_docs)]
// Allow unwrap() in tests only - banned in production code
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::many_single_char_names)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::similar_names)]
#![allow(clippy::doc_markdown)]

// ============================================================================
// Core Modules
// ============================================================================

/// Color types and palettes.
pub mod color;

/// Scale functions for data-to-visual mappings.
pub mod scale;

// ============================================================================
// Pipeline Modules
// ============================================================================

/// Datasets, aesthetics, geometries, rendering and figures.
pub mod grammar;

/// Multi-panel layout composition.
pub mod compose;

/// Output encoders.
pub mod output;

// ============================================================================
// Configuration and Errors
// ============================================================================

/// YAML render configuration.
pub mod config;

/// Error types for figure-grammar operations.
pub mod error;

pub use error::{Error, Result};

// ============================================================================
// Prelude
// ============================================================================

/// Commonly used types and traits for convenient imports.
///
/// ```rust
/// use figure_grammar::prelude::*;
/// ```
pub mod prelude {
    pub use crate::color::{Hsla, Rgba};
    pub use crate::compose::{compose, CellRef, Grid, GuideCollection, Layout, LayoutItem, LayoutSpec, TagStyle, Tags};
    pub use crate::config::RenderConfig;
    pub use crate::error::{Error, Result};
    pub use crate::grammar::{
        Aes, Channel, Coord, Dataset, DatasetProvider, Facet, Figure, Geom, Labels, Panel, Position, Renderer,
        Stat, Theme,
    };
    pub use crate::output::SvgEncoder;
    pub use crate::scale::{ColorScale, DiscreteScale, LinearScale, Scale};
}

// ============================================================================
// Re-exports
// ============================================================================

/// Re-export trueno for direct access to SIMD operations.
pub use trueno;
