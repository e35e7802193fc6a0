//! Geometry types for Grammar of Graphics.
//!
//! Defines the closed set of mark kinds and, for each, which channels it
//! understands and which of those it requires.

use super::aes::{Aes, Channel};
use super::stat::Stat;

/// Shape types for point geometries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum PointShape {
    /// Filled circle.
    #[default]
    Circle,
    /// Filled triangle.
    Triangle,
    /// Filled square.
    Square,
    /// Diamond shape.
    Diamond,
    /// Cross (+).
    Cross,
    /// X shape.
    X,
}

impl PointShape {
    /// Shapes in the order a discrete shape scale hands them out.
    pub const PALETTE: [PointShape; 6] = [
        PointShape::Circle,
        PointShape::Triangle,
        PointShape::Square,
        PointShape::Diamond,
        PointShape::Cross,
        PointShape::X,
    ];
}

/// How overlapping bars or areas of several groups share a position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Position {
    /// Pile groups on top of each other.
    #[default]
    Stack,
    /// Place groups side by side within the slot.
    Dodge,
    /// Draw every group from the baseline, overlapping.
    Identity,
}

/// What kind of data a channel accepts for a given geometry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Domain {
    /// Numeric or discrete.
    Any,
    /// Numeric only.
    Continuous,
    /// Categorical or text only.
    Discrete,
}

impl Domain {
    /// Human-readable name used in type-mismatch errors.
    #[must_use]
    pub fn describe(self) -> &'static str {
        match self {
            Domain::Any => "any",
            Domain::Continuous => "continuous",
            Domain::Discrete => "discrete",
        }
    }
}

/// One channel a geometry understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChannelRule {
    /// The channel.
    pub channel: Channel,
    /// Whether resolution fails without it.
    pub required: bool,
    /// Accepted data.
    pub domain: Domain,
}

const fn required(channel: Channel, domain: Domain) -> ChannelRule {
    ChannelRule { channel, required: true, domain }
}

const fn optional(channel: Channel, domain: Domain) -> ChannelRule {
    ChannelRule { channel, required: false, domain }
}

/// Geometry type specification.
#[derive(Debug, Clone, PartialEq)]
pub enum GeomType {
    /// Points.
    Point {
        /// Point shape when none is mapped.
        shape: PointShape,
    },
    /// Text at each position.
    Text,
    /// Text on a filled box at each position.
    Label,
    /// Lines connecting points in x order.
    Line {
        /// Line width.
        width: f32,
    },
    /// Lines connecting points in record order.
    Path {
        /// Line width.
        width: f32,
    },
    /// Stairstep lines (horizontal, then vertical).
    Step {
        /// Line width.
        width: f32,
    },
    /// One bar per x category; height from a statistic.
    Bar {
        /// Bar width (0-1 fraction of a category slot).
        width: f32,
    },
    /// One bar per record; height is y.
    Col {
        /// Bar width (0-1 fraction of a category slot).
        width: f32,
    },
    /// Area between 0 and y.
    Area {
        /// Fill alpha.
        alpha: f32,
    },
    /// Area between ymin and ymax.
    Ribbon {
        /// Fill alpha.
        alpha: f32,
    },
    /// Iso-lines of a 2D density estimate.
    Contour {
        /// Number of contour levels.
        bins: usize,
    },
}

impl GeomType {
    /// Lowercase name of the mark kind.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            GeomType::Point { .. } => "point",
            GeomType::Text => "text",
            GeomType::Label => "label",
            GeomType::Line { .. } => "line",
            GeomType::Path { .. } => "path",
            GeomType::Step { .. } => "step",
            GeomType::Bar { .. } => "bar",
            GeomType::Col { .. } => "col",
            GeomType::Area { .. } => "area",
            GeomType::Ribbon { .. } => "ribbon",
            GeomType::Contour { .. } => "contour",
        }
    }

    /// Whether this geometry can draw the output of `stat`.
    ///
    /// Bars and columns reduce slots with identity, count, sum or mean.
    /// Contours only take a density estimate. Every other geometry draws
    /// records as they are.
    #[must_use]
    pub fn supports(&self, stat: Stat) -> bool {
        match self {
            GeomType::Bar { .. } | GeomType::Col { .. } => {
                matches!(stat, Stat::Identity | Stat::Count | Stat::Sum | Stat::Mean)
            }
            GeomType::Contour { .. } => stat == Stat::Density2d,
            _ => stat == Stat::Identity,
        }
    }
}

/// A geometry layer.
#[derive(Debug, Clone, PartialEq)]
pub struct Geom {
    /// The geometry type.
    pub geom_type: GeomType,
    /// Layer-specific aesthetics.
    pub aes: Option<Aes>,
    /// Statistical transformation.
    pub stat: Stat,
    /// Multi-group position adjustment.
    pub position: Position,
}

impl Geom {
    fn with(geom_type: GeomType, stat: Stat) -> Self {
        Self { geom_type, aes: None, stat, position: Position::default() }
    }

    /// Create a point geometry.
    #[must_use]
    pub fn point() -> Self {
        Self::with(GeomType::Point { shape: PointShape::Circle }, Stat::Identity)
    }

    /// Create a text geometry.
    #[must_use]
    pub fn text() -> Self {
        Self::with(GeomType::Text, Stat::Identity)
    }

    /// Create a label geometry.
    #[must_use]
    pub fn label() -> Self {
        Self::with(GeomType::Label, Stat::Identity)
    }

    /// Create a line geometry.
    #[must_use]
    pub fn line() -> Self {
        Self::with(GeomType::Line { width: 1.0 }, Stat::Identity)
    }

    /// Create a path geometry.
    #[must_use]
    pub fn path() -> Self {
        Self::with(GeomType::Path { width: 1.0 }, Stat::Identity)
    }

    /// Create a step geometry.
    #[must_use]
    pub fn step() -> Self {
        Self::with(GeomType::Step { width: 1.0 }, Stat::Identity)
    }

    /// Create a bar geometry (counts by default).
    #[must_use]
    pub fn bar() -> Self {
        Self::with(GeomType::Bar { width: 0.9 }, Stat::Count)
    }

    /// Create a column geometry (heights are y).
    #[must_use]
    pub fn col() -> Self {
        Self::with(GeomType::Col { width: 0.9 }, Stat::Identity)
    }

    /// Create an area geometry.
    #[must_use]
    pub fn area() -> Self {
        Self::with(GeomType::Area { alpha: 1.0 }, Stat::Identity)
    }

    /// Create a ribbon geometry.
    #[must_use]
    pub fn ribbon() -> Self {
        Self::with(GeomType::Ribbon { alpha: 0.5 }, Stat::Identity)
    }

    /// Create a contour geometry over a 2D density estimate.
    #[must_use]
    pub fn contour() -> Self {
        Self::with(GeomType::Contour { bins: 10 }, Stat::Density2d)
    }

    /// Set the point shape.
    #[must_use]
    pub fn shape(mut self, shape: PointShape) -> Self {
        if let GeomType::Point { shape: ref mut s } = self.geom_type {
            *s = shape;
        }
        self
    }

    /// Set the line/bar width.
    #[must_use]
    pub fn width(mut self, width: f32) -> Self {
        match &mut self.geom_type {
            GeomType::Line { width: w }
            | GeomType::Path { width: w }
            | GeomType::Step { width: w }
            | GeomType::Bar { width: w }
            | GeomType::Col { width: w } => *w = width,
            _ => {}
        }
        self
    }

    /// Set the area/ribbon alpha.
    #[must_use]
    pub fn alpha(mut self, alpha: f32) -> Self {
        match &mut self.geom_type {
            GeomType::Area { alpha: a } | GeomType::Ribbon { alpha: a } => {
                *a = alpha.clamp(0.0, 1.0);
            }
            _ => {}
        }
        self
    }

    /// Set the number of contour levels.
    #[must_use]
    pub fn bins(mut self, bins: usize) -> Self {
        if let GeomType::Contour { bins: ref mut b } = self.geom_type {
            *b = bins.max(1);
        }
        self
    }

    /// Add layer-specific aesthetics.
    #[must_use]
    pub fn aes(mut self, aes: Aes) -> Self {
        self.aes = Some(aes);
        self
    }

    /// Set statistical transformation.
    #[must_use]
    pub fn stat(mut self, stat: Stat) -> Self {
        self.stat = stat;
        self
    }

    /// Set the multi-group position adjustment.
    #[must_use]
    pub fn position(mut self, position: Position) -> Self {
        self.position = position;
        self
    }

    /// The channels this geometry understands, given its statistic.
    #[must_use]
    pub fn channels(&self) -> Vec<ChannelRule> {
        use Channel::{Alpha, Color, Fill, Group, Label, Shape, Size, Ymax, Ymin, X, Y};
        use Domain::{Any, Continuous, Discrete};

        match &self.geom_type {
            GeomType::Point { .. } => vec![
                required(X, Any),
                required(Y, Any),
                optional(Color, Any),
                optional(Shape, Discrete),
                optional(Size, Continuous),
                optional(Alpha, Continuous),
                optional(Group, Discrete),
            ],
            GeomType::Text | GeomType::Label => vec![
                required(X, Any),
                required(Y, Any),
                required(Label, Any),
                optional(Color, Any),
                optional(Size, Continuous),
                optional(Alpha, Continuous),
            ],
            GeomType::Line { .. } | GeomType::Path { .. } | GeomType::Step { .. } => vec![
                required(X, Any),
                required(Y, Any),
                optional(Color, Discrete),
                optional(Size, Continuous),
                optional(Alpha, Continuous),
                optional(Group, Discrete),
            ],
            GeomType::Bar { .. } => {
                let mut rules = vec![required(X, Any)];
                if self.stat.needs_y() {
                    rules.push(required(Y, Continuous));
                }
                rules.extend([
                    optional(Fill, Discrete),
                    optional(Color, Discrete),
                    optional(Alpha, Continuous),
                    optional(Group, Discrete),
                ]);
                rules
            }
            GeomType::Col { .. } => vec![
                required(X, Any),
                required(Y, Continuous),
                optional(Fill, Discrete),
                optional(Color, Discrete),
                optional(Alpha, Continuous),
                optional(Group, Discrete),
            ],
            GeomType::Area { .. } => vec![
                required(X, Continuous),
                required(Y, Continuous),
                optional(Fill, Discrete),
                optional(Color, Discrete),
                optional(Alpha, Continuous),
                optional(Group, Discrete),
            ],
            GeomType::Ribbon { .. } => vec![
                required(X, Continuous),
                required(Ymin, Continuous),
                required(Ymax, Continuous),
                optional(Fill, Discrete),
                optional(Color, Discrete),
                optional(Alpha, Continuous),
                optional(Group, Discrete),
            ],
            GeomType::Contour { .. } => vec![
                required(X, Continuous),
                required(Y, Continuous),
                optional(Color, Discrete),
                optional(Group, Discrete),
            ],
        }
    }
}
