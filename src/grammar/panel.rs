//! Rendered panels.
//!
//! A [`Panel`] is the immutable result of rendering one or more geometry
//! layers: marks in data coordinates, axis descriptors and legend guides.
//! Discrete axes place their levels at 1, 2, 3, ...

use log::warn;

use super::aes::Channel;
use super::geom::PointShape;
use crate::color::Rgba;
use crate::scale::extent;

/// One drawn mark, in data coordinates.
#[derive(Debug, Clone, PartialEq)]
pub enum Mark {
    /// A point symbol.
    Point {
        /// X position.
        x: f32,
        /// Y position.
        y: f32,
        /// Stroke color.
        color: Rgba,
        /// Symbol.
        shape: PointShape,
        /// Diameter in points.
        size: f32,
    },
    /// A text string, optionally on a filled box.
    Text {
        /// X position.
        x: f32,
        /// Y position.
        y: f32,
        /// The text.
        text: String,
        /// Text color.
        color: Rgba,
        /// Font size in points.
        size: f32,
        /// Whether to draw a box behind the text.
        boxed: bool,
    },
    /// An open polyline.
    Path {
        /// Vertices in drawing order.
        points: Vec<(f32, f32)>,
        /// Stroke color.
        color: Rgba,
        /// Stroke width.
        width: f32,
    },
    /// An axis-aligned rectangle.
    Rect {
        /// Left edge.
        xmin: f32,
        /// Right edge.
        xmax: f32,
        /// Bottom edge.
        ymin: f32,
        /// Top edge.
        ymax: f32,
        /// Fill color.
        fill: Rgba,
        /// Outline color, if any.
        outline: Option<Rgba>,
    },
    /// A closed filled region.
    Polygon {
        /// Vertices; the last connects back to the first.
        points: Vec<(f32, f32)>,
        /// Fill color.
        fill: Rgba,
        /// Outline color, if any.
        outline: Option<Rgba>,
    },
}

impl Mark {
    /// Every (x, y) coordinate the mark touches.
    #[must_use]
    pub fn coordinates(&self) -> Vec<(f32, f32)> {
        match self {
            Mark::Point { x, y, .. } | Mark::Text { x, y, .. } => vec![(*x, *y)],
            Mark::Path { points, .. } | Mark::Polygon { points, .. } => points.clone(),
            Mark::Rect { xmin, xmax, ymin, ymax, .. } => vec![(*xmin, *ymin), (*xmax, *ymax)],
        }
    }

    /// Height of a rectangle mark.
    #[must_use]
    pub fn height(&self) -> Option<f32> {
        match self {
            Mark::Rect { ymin, ymax, .. } => Some(ymax - ymin),
            _ => None,
        }
    }

    /// The mark with x and y swapped.
    #[must_use]
    pub fn flipped(&self) -> Mark {
        let swap = |points: &[(f32, f32)]| points.iter().map(|&(x, y)| (y, x)).collect();
        match self.clone() {
            Mark::Point { x, y, color, shape, size } => Mark::Point { x: y, y: x, color, shape, size },
            Mark::Text { x, y, text, color, size, boxed } => {
                Mark::Text { x: y, y: x, text, color, size, boxed }
            }
            Mark::Path { points, color, width } => Mark::Path { points: swap(&points), color, width },
            Mark::Rect { xmin, xmax, ymin, ymax, fill, outline } => Mark::Rect {
                xmin: ymin,
                xmax: ymax,
                ymin: xmin,
                ymax: xmax,
                fill,
                outline,
            },
            Mark::Polygon { points, fill, outline } => {
                Mark::Polygon { points: swap(&points), fill, outline }
            }
        }
    }
}

/// An axis descriptor.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Axis {
    /// Nothing drawn on this axis.
    #[default]
    Empty,
    /// A numeric range.
    Continuous {
        /// Lower limit.
        min: f32,
        /// Upper limit.
        max: f32,
    },
    /// Ordered levels at positions 1, 2, 3, ...
    Discrete {
        /// Level labels.
        levels: Vec<String>,
    },
}

impl Axis {
    /// Continuous axis over the extent of `values`, or empty.
    #[must_use]
    pub fn spanning(values: &[f32]) -> Axis {
        extent(values).map_or(Axis::Empty, |(min, max)| Axis::Continuous { min, max })
    }

    /// Combine two axes of overlaid layers.
    #[must_use]
    pub fn union(&self, other: &Axis) -> Axis {
        match (self, other) {
            (Axis::Empty, a) | (a, Axis::Empty) => a.clone(),
            (Axis::Continuous { min: a0, max: a1 }, Axis::Continuous { min: b0, max: b1 }) => {
                Axis::Continuous { min: a0.min(*b0), max: a1.max(*b1) }
            }
            (Axis::Discrete { levels: a }, Axis::Discrete { levels: b }) => {
                let mut levels = a.clone();
                levels.extend(b.iter().filter(|l| !a.contains(l)).cloned());
                Axis::Discrete { levels }
            }
            (kept, _) => {
                warn!("cannot combine continuous and discrete axes; keeping the first");
                kept.clone()
            }
        }
    }

    /// The span of the axis in data coordinates.
    ///
    /// Discrete axes span `0.5 ..= n + 0.5`.
    #[must_use]
    pub fn limits(&self) -> Option<(f32, f32)> {
        match self {
            Axis::Empty => None,
            Axis::Continuous { min, max } => Some((*min, *max)),
            Axis::Discrete { levels } => Some((0.5, levels.len() as f32 + 0.5)),
        }
    }
}

/// What a legend key shows.
#[derive(Debug, Clone, PartialEq)]
pub enum LegendKey {
    /// A color swatch.
    Color(Rgba),
    /// A point symbol.
    Shape(PointShape),
    /// A point of the given size.
    Size(f32),
}

/// One row of a legend.
#[derive(Debug, Clone, PartialEq)]
pub struct LegendEntry {
    /// Label text.
    pub label: String,
    /// Key drawn next to the label.
    pub key: LegendKey,
}

/// A legend for one mapped channel.
#[derive(Debug, Clone, PartialEq)]
pub struct Guide {
    /// The channel the legend explains.
    pub channel: Channel,
    /// Legend title (the mapped variable's name).
    pub title: String,
    /// Entries in level order.
    pub entries: Vec<LegendEntry>,
}

impl Guide {
    /// Whether two guides describe the same scale and may be merged.
    #[must_use]
    pub fn same_scale(&self, other: &Guide) -> bool {
        self.channel == other.channel && self.title == other.title
    }

    /// Add the entries of `other` this guide does not yet have.
    pub(crate) fn absorb(&mut self, other: &Guide) {
        for entry in &other.entries {
            if !self.entries.iter().any(|e| e.label == entry.label) {
                self.entries.push(entry.clone());
            }
        }
    }
}

/// The marks of one geometry layer.
#[derive(Debug, Clone, PartialEq)]
pub struct PanelLayer {
    /// Mark kind that produced the layer.
    pub geom: &'static str,
    /// Marks in drawing order.
    pub marks: Vec<Mark>,
}

/// One rendered sub-figure.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Panel {
    layers: Vec<PanelLayer>,
    x_axis: Axis,
    y_axis: Axis,
    x_label: Option<String>,
    y_label: Option<String>,
    title: Option<String>,
    guides: Vec<Guide>,
}

impl Panel {
    /// A panel holding a single layer.
    #[must_use]
    pub fn new(layer: PanelLayer, x_axis: Axis, y_axis: Axis) -> Self {
        Self { layers: vec![layer], x_axis, y_axis, ..Self::default() }
    }

    /// A panel with nothing drawn.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Layers in drawing order.
    #[must_use]
    pub fn layers(&self) -> &[PanelLayer] {
        &self.layers
    }

    /// All marks across layers.
    pub fn marks(&self) -> impl Iterator<Item = &Mark> + '_ {
        self.layers.iter().flat_map(|l| l.marks.iter())
    }

    /// Number of marks across layers.
    #[must_use]
    pub fn mark_count(&self) -> usize {
        self.layers.iter().map(|l| l.marks.len()).sum()
    }

    /// Whether nothing is drawn.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.mark_count() == 0
    }

    /// Horizontal axis.
    #[must_use]
    pub fn x_axis(&self) -> &Axis {
        &self.x_axis
    }

    /// Vertical axis.
    #[must_use]
    pub fn y_axis(&self) -> &Axis {
        &self.y_axis
    }

    /// Horizontal axis title.
    #[must_use]
    pub fn x_label(&self) -> Option<&str> {
        self.x_label.as_deref()
    }

    /// Vertical axis title.
    #[must_use]
    pub fn y_label(&self) -> Option<&str> {
        self.y_label.as_deref()
    }

    /// Panel title.
    #[must_use]
    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    /// Legends in channel order.
    #[must_use]
    pub fn guides(&self) -> &[Guide] {
        &self.guides
    }

    /// Copy with legends replaced.
    #[must_use]
    pub fn with_guides(mut self, guides: Vec<Guide>) -> Self {
        self.guides = guides;
        self
    }

    /// Copy with axis titles set where given.
    #[must_use]
    pub fn with_labels(mut self, x: Option<String>, y: Option<String>) -> Self {
        if x.is_some() {
            self.x_label = x;
        }
        if y.is_some() {
            self.y_label = y;
        }
        self
    }

    /// Copy with a title.
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Copy with the given axes.
    #[must_use]
    pub fn with_axes(mut self, x_axis: Axis, y_axis: Axis) -> Self {
        self.x_axis = x_axis;
        self.y_axis = y_axis;
        self
    }

    /// Draw `other`'s layers on top of this panel's.
    ///
    /// Axes are unioned, guides with the same scale merged, and axis titles
    /// and title kept from `self` when present.
    #[must_use]
    pub fn overlay(mut self, other: Panel) -> Panel {
        self.x_axis = self.x_axis.union(&other.x_axis);
        self.y_axis = self.y_axis.union(&other.y_axis);
        self.x_label = self.x_label.or(other.x_label);
        self.y_label = self.y_label.or(other.y_label);
        self.title = self.title.or(other.title);
        for guide in other.guides {
            match self.guides.iter_mut().find(|g| g.same_scale(&guide)) {
                Some(existing) => existing.absorb(&guide),
                None => self.guides.push(guide),
            }
        }
        self.layers.extend(other.layers);
        self
    }

    /// The panel with x and y swapped.
    #[must_use]
    pub fn flipped(&self) -> Panel {
        Panel {
            layers: self
                .layers
                .iter()
                .map(|l| PanelLayer { geom: l.geom, marks: l.marks.iter().map(Mark::flipped).collect() })
                .collect(),
            x_axis: self.y_axis.clone(),
            y_axis: self.x_axis.clone(),
            x_label: self.y_label.clone(),
            y_label: self.x_label.clone(),
            title: self.title.clone(),
            guides: self.guides.clone(),
        }
    }
}
