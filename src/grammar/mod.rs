//! Grammar of Graphics implementation.
//!
//! The example-figure pipeline, leaf to root:
//!
//! - **Datasets**: tidy, immutable record tables served by name
//!   ([`DatasetProvider`]).
//! - **Aesthetics**: channel-to-variable mappings ([`Aes`]), validated against
//!   a geometry and a schema by [`resolve`].
//! - **Geometries**: the closed set of mark kinds ([`Geom`]), drawn into a
//!   [`Panel`] by a [`Renderer`].
//! - **Coordinates, facets, themes, labels**: the rest of a [`Figure`].
//!
//! # Example
//!
//! ```rust
//! use figure_grammar::grammar::*;
//!
//! let provider = DatasetProvider::new();
//! let mpg = provider.load("mpg").unwrap();
//! let mapping = resolve(&Geom::point(), &Aes::new().x("displ").y("hwy"), &mpg).unwrap();
//! let panel = render(&mapping, &mpg).unwrap();
//! assert_eq!(panel.mark_count(), mpg.nrow());
//! ```
//!
//! # References
//!
//! - Wilkinson, L. (2005). *The Grammar of Graphics*. Springer.
//! - Wickham, H. (2010). "A Layered Grammar of Graphics." Journal of Computational
//!   and Graphical Statistics.

mod aes;
mod coord;
mod data;
mod datasets;
mod facet;
mod figure;
mod geom;
mod panel;
mod render;
mod resolve;
mod stat;
mod theme;

pub use aes::{Aes, Channel, Constant, MappingValue};
pub use coord::Coord;
pub use data::{Column, DataValue, Dataset, DatasetBuilder, Field, Record, Schema, VariableKind};
pub use datasets::{builtin, load_csv, DatasetProvider, BUILTIN_DATASETS};
pub use facet::Facet;
pub use figure::{Figure, Labels};
pub use geom::{ChannelRule, Domain, Geom, GeomType, PointShape, Position};
pub use panel::{Axis, Guide, LegendEntry, LegendKey, Mark, Panel, PanelLayer};
pub use render::{render, Renderer};
pub use resolve::{resolve, ResolvedChannel, ResolvedMapping};
pub use stat::{ContourLine, DensityEstimator, Stat};
pub use theme::Theme;
