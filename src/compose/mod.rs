//! Multi-panel composition.
//!
//! Arranges rendered panels into a grid, the way `patchwork::wrap_plots`
//! does: an automatic grid, fixed dimensions, or a text template of named
//! areas.
//!
//! # Example
//!
//! ```rust
//! use figure_grammar::compose::{compose, Grid, LayoutSpec};
//! use figure_grammar::grammar::Panel;
//!
//! let spec = LayoutSpec::new().grid(Grid::Template("AB\nCC".into()));
//! let layout = compose(vec![Panel::empty(), Panel::empty()], &spec).unwrap();
//! assert_eq!(layout.cells().count(), 3);
//! ```

mod grid;
mod layout;

pub use grid::{Area, Grid, GridShape};
pub use layout::{compose, Cell, CellRef, GuideCollection, Layout, LayoutItem, LayoutSpec, TagStyle, Tags};
