//! The figure builder.
//!
//! Combines a dataset, a default mapping, geometry layers, coordinates,
//! facets, labels and a theme. Every step returns a new figure, so figures
//! can be built with `+` the way ggplot2 plots are:
//!
//! ```rust
//! use figure_grammar::grammar::{Aes, Dataset, Figure, Geom, Labels};
//!
//! let data = Dataset::from_xy(&[1.0, 2.0, 3.0], &[4.0, 5.0, 6.0]);
//! let figure = Figure::new(data)
//!     + Aes::new().x("x").y("y")
//!     + Geom::point()
//!     + Labels::new().title("Three points");
//! let panel = figure.render().unwrap();
//! assert_eq!(panel.mark_count(), 3);
//! ```

use std::ops::Add;
use std::sync::Arc;

use log::debug;

use super::aes::Aes;
use super::coord::Coord;
use super::data::Dataset;
use super::datasets::DatasetProvider;
use super::facet::Facet;
use super::geom::Geom;
use super::panel::Panel;
use super::render::Renderer;
use super::resolve::resolve;
use super::theme::Theme;
use crate::compose::{compose, Layout, LayoutSpec};
use crate::error::{Error, Result};

/// Title and axis titles that override the defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Labels {
    /// Figure title.
    pub title: Option<String>,
    /// Horizontal axis title.
    pub x: Option<String>,
    /// Vertical axis title.
    pub y: Option<String>,
}

impl Labels {
    /// No overrides.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the title.
    #[must_use]
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Set the x-axis title.
    #[must_use]
    pub fn x(mut self, label: impl Into<String>) -> Self {
        self.x = Some(label.into());
        self
    }

    /// Set the y-axis title.
    #[must_use]
    pub fn y(mut self, label: impl Into<String>) -> Self {
        self.y = Some(label.into());
        self
    }

    /// Overrides from `other` win where set.
    #[must_use]
    pub fn merge(&self, other: &Labels) -> Labels {
        Labels {
            title: other.title.clone().or_else(|| self.title.clone()),
            x: other.x.clone().or_else(|| self.x.clone()),
            y: other.y.clone().or_else(|| self.y.clone()),
        }
    }
}

/// Grammar of Graphics figure builder.
#[derive(Debug, Clone)]
pub struct Figure {
    data: Arc<Dataset>,
    aes: Aes,
    layers: Vec<Geom>,
    coord: Coord,
    facet: Option<Facet>,
    theme: Theme,
    labels: Labels,
    renderer: Renderer,
}

impl Figure {
    /// Start a figure over `data`.
    #[must_use]
    pub fn new(data: impl Into<Arc<Dataset>>) -> Self {
        Self {
            data: data.into(),
            aes: Aes::new(),
            layers: Vec::new(),
            coord: Coord::cartesian(),
            facet: None,
            theme: Theme::default(),
            labels: Labels::new(),
            renderer: Renderer::default(),
        }
    }

    /// Start a figure over a named dataset.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DatasetNotFound`] if the provider does not know `name`.
    pub fn from_dataset(provider: &DatasetProvider, name: &str) -> Result<Self> {
        Ok(Self::new(provider.load(name)?))
    }

    /// Merge `aes` into the default mapping.
    #[must_use]
    pub fn aes(mut self, aes: Aes) -> Self {
        self.aes = self.aes.merge(&aes);
        self
    }

    /// Add a geometry layer.
    #[must_use]
    pub fn geom(mut self, geom: Geom) -> Self {
        self.layers.push(geom);
        self
    }

    /// Set the coordinate system.
    #[must_use]
    pub fn coord(mut self, coord: Coord) -> Self {
        self.coord = coord;
        self
    }

    /// Facet into one panel per level of a variable.
    #[must_use]
    pub fn facet(mut self, facet: Facet) -> Self {
        self.facet = Some(facet);
        self
    }

    /// Set the theme.
    #[must_use]
    pub fn theme(mut self, theme: Theme) -> Self {
        self.theme = theme;
        self
    }

    /// Override title and axis titles.
    #[must_use]
    pub fn labs(mut self, labels: Labels) -> Self {
        self.labels = self.labels.merge(&labels);
        self
    }

    /// Use a configured renderer.
    #[must_use]
    pub fn renderer(mut self, renderer: Renderer) -> Self {
        self.renderer = renderer;
        self
    }

    /// The figure's dataset.
    #[must_use]
    pub fn dataset(&self) -> &Arc<Dataset> {
        &self.data
    }

    /// Geometry layers in drawing order.
    #[must_use]
    pub fn layers(&self) -> &[Geom] {
        &self.layers
    }

    /// The default mapping.
    #[must_use]
    pub fn mapping(&self) -> &Aes {
        &self.aes
    }

    /// The theme the figure is drawn with.
    #[must_use]
    pub fn appearance(&self) -> &Theme {
        &self.theme
    }

    /// Render every layer into a single panel, ignoring any facet.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Rendering`] for a figure without layers, and any
    /// resolution or rendering error of a layer.
    pub fn render(&self) -> Result<Panel> {
        let panel = self.render_on(&self.data)?;
        Ok(match &self.labels.title {
            Some(title) => panel.with_title(title.clone()),
            None => panel,
        })
    }

    /// Render into a layout: one panel per facet level, or the single panel
    /// when the figure is not faceted. A facet's grid replaces `spec.grid`.
    pub fn render_layout(&self, spec: &LayoutSpec) -> Result<Layout> {
        let Some(facet) = &self.facet else {
            return compose(vec![self.render()?], spec);
        };

        let panels = facet
            .split(&self.data)?
            .into_iter()
            .map(|(level, subset)| Ok(self.render_on(&subset)?.with_title(level)))
            .collect::<Result<Vec<Panel>>>()?;
        let spec = spec.clone().grid(facet.grid(panels.len()));
        debug!("rendered {} facet panels over '{}'", panels.len(), facet.var());
        compose(panels, &spec)
    }

    fn render_on(&self, data: &Dataset) -> Result<Panel> {
        if self.layers.is_empty() {
            return Err(Error::Rendering("figure has no geometry layers".to_string()));
        }
        let mappings = self
            .layers
            .iter()
            .map(|geom| resolve(geom, &self.aes, data))
            .collect::<Result<Vec<_>>>()?;
        let panel = self
            .renderer
            .render_layers(&mappings, data)?
            .with_labels(self.labels.x.clone(), self.labels.y.clone());
        Ok(self.coord.apply(panel))
    }
}

impl Add<Geom> for Figure {
    type Output = Figure;

    fn add(self, geom: Geom) -> Figure {
        self.geom(geom)
    }
}

impl Add<Aes> for Figure {
    type Output = Figure;

    fn add(self, aes: Aes) -> Figure {
        self.aes(aes)
    }
}

impl Add<Coord> for Figure {
    type Output = Figure;

    fn add(self, coord: Coord) -> Figure {
        self.coord(coord)
    }
}

impl Add<Facet> for Figure {
    type Output = Figure;

    fn add(self, facet: Facet) -> Figure {
        self.facet(facet)
    }
}

impl Add<Theme> for Figure {
    type Output = Figure;

    fn add(self, theme: Theme) -> Figure {
        self.theme(theme)
    }
}

impl Add<Labels> for Figure {
    type Output = Figure;

    fn add(self, labels: Labels) -> Figure {
        self.labs(labels)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grammar::{Axis, Channel, Mark};

    fn mpg() -> Arc<Dataset> {
        DatasetProvider::new().load("mpg").unwrap()
    }

    #[test]
    fn test_add_builds_new_figures() {
        let base = Figure::new(mpg()) + Aes::new().x("displ").y("hwy");
        let points = base.clone() + Geom::point();
        assert!(base.layers().is_empty());
        assert_eq!(points.layers().len(), 1);
        assert_eq!(points.mapping().variable(Channel::X), Some("displ"));
    }

    #[test]
    fn test_render_layers_overlay() {
        let figure = Figure::new(mpg()) + Aes::new().x("displ").y("hwy") + Geom::point() + Geom::line();
        let panel = figure.render().unwrap();
        assert_eq!(panel.layers().len(), 2);
        assert_eq!(panel.layers()[0].marks.len(), mpg().nrow());
        assert_eq!(panel.x_label(), Some("displ"));
    }

    #[test]
    fn test_layers_share_discrete_positions() {
        let data = Dataset::builder()
            .categorical("a", &["p", "q"])
            .categorical("b", &["q", "r"])
            .numeric("y", &[1.0, 2.0])
            .build()
            .unwrap();
        let figure = Figure::new(data)
            + Aes::new().x("a").y("y")
            + Geom::point()
            + Geom::point().aes(Aes::new().x("b"));
        let panel = figure.render().unwrap();

        assert_eq!(
            panel.x_axis(),
            &Axis::Discrete { levels: vec!["p".into(), "q".into(), "r".into()] }
        );
        let xs = |layer: usize| -> Vec<f32> {
            panel.layers()[layer].marks.iter().flat_map(Mark::coordinates).map(|(x, _)| x).collect()
        };
        assert_eq!(xs(0), vec![1.0, 2.0]);
        // "q" lines up with the first layer's "q"
        assert_eq!(xs(1), vec![2.0, 3.0]);
    }

    #[test]
    fn test_no_layers_is_error() {
        let figure = Figure::new(mpg()) + Aes::new().x("displ").y("hwy");
        assert!(matches!(figure.render(), Err(Error::Rendering(_))));
    }

    #[test]
    fn test_labels_and_title() {
        let figure = Figure::new(mpg())
            + Aes::new().x("displ").y("hwy")
            + Geom::point()
            + Labels::new().x("Displacement").title("Highway mileage")
            + Labels::new().y("mpg");
        let panel = figure.render().unwrap();
        assert_eq!(panel.x_label(), Some("Displacement"));
        assert_eq!(panel.y_label(), Some("mpg"));
        assert_eq!(panel.title(), Some("Highway mileage"));
    }

    #[test]
    fn test_coord_flip_bar() {
        let figure = Figure::new(mpg()) + Aes::new().x("class") + Geom::bar() + Coord::flipped();
        let panel = figure.render().unwrap();
        assert!(matches!(panel.y_axis(), Axis::Discrete { .. }));
        assert_eq!(panel.x_label(), Some("count"));
        assert!(panel.marks().all(|m| matches!(m, Mark::Rect { .. })));
    }

    #[test]
    fn test_facet_layout() {
        let figure = Figure::new(mpg())
            + Aes::new().x("displ").y("hwy")
            + Geom::point()
            + Facet::wrap("drv").ncol(3);
        let layout = figure.render_layout(&LayoutSpec::new()).unwrap();
        let levels = mpg().levels("drv");
        assert_eq!(layout.panel_count(), levels.len());
        assert_eq!(layout.cols(), 3);
        let total: usize = layout.cells().filter_map(|c| c.panel.as_ref()).map(Panel::mark_count).sum();
        assert_eq!(total, mpg().nrow());
        assert_eq!(layout.panel(0).and_then(Panel::title), Some(levels[0].as_str()));
    }

    #[test]
    fn test_unfaceted_layout() {
        let figure = Figure::new(mpg()) + Aes::new().x("displ").y("hwy") + Geom::point();
        let layout = figure.render_layout(&LayoutSpec::new()).unwrap();
        assert_eq!((layout.rows(), layout.cols()), (1, 1));
    }

    #[test]
    fn test_theme_added() {
        let figure = Figure::new(mpg()) + Theme::classic();
        assert_eq!(figure.appearance().name, "classic");
    }

    #[test]
    fn test_from_dataset() {
        assert!(Figure::from_dataset(&DatasetProvider::new(), "faithful").is_ok());
        assert!(matches!(
            Figure::from_dataset(&DatasetProvider::new(), "iris"),
            Err(Error::DatasetNotFound(_))
        ));
    }
}
