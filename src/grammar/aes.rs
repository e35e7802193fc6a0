//! Aesthetic mappings for Grammar of Graphics.
//!
//! Maps dataset variables (or constants) to visual channels.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use super::geom::PointShape;
use crate::color::Rgba;
use crate::error::Error;

/// A visual channel data can be mapped onto.
///
/// The declaration order is the canonical order used in error messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Channel {
    /// Horizontal position.
    X,
    /// Vertical position.
    Y,
    /// Lower vertical bound (ribbons).
    Ymin,
    /// Upper vertical bound (ribbons).
    Ymax,
    /// Stroke / point color.
    Color,
    /// Fill color.
    Fill,
    /// Point shape.
    Shape,
    /// Point size or line width.
    Size,
    /// Opacity.
    Alpha,
    /// Text for text/label marks.
    Label,
    /// Grouping without a legend.
    Group,
}

impl Channel {
    /// Every channel, in canonical order.
    pub const ALL: [Channel; 11] = [
        Channel::X,
        Channel::Y,
        Channel::Ymin,
        Channel::Ymax,
        Channel::Color,
        Channel::Fill,
        Channel::Shape,
        Channel::Size,
        Channel::Alpha,
        Channel::Label,
        Channel::Group,
    ];

    /// The channel's name as written in mappings.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Channel::X => "x",
            Channel::Y => "y",
            Channel::Ymin => "ymin",
            Channel::Ymax => "ymax",
            Channel::Color => "color",
            Channel::Fill => "fill",
            Channel::Shape => "shape",
            Channel::Size => "size",
            Channel::Alpha => "alpha",
            Channel::Label => "label",
            Channel::Group => "group",
        }
    }
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Channel {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "colour" => Ok(Channel::Color),
            _ => Channel::ALL
                .into_iter()
                .find(|c| c.name() == s)
                .ok_or_else(|| Error::UnknownChannel(s.to_string())),
        }
    }
}

/// A fixed (not data-mapped) channel value.
#[derive(Debug, Clone, PartialEq)]
pub enum Constant {
    /// A number (position, size, alpha).
    Number(f32),
    /// A color.
    Color(Rgba),
    /// Literal text.
    Text(String),
    /// A point shape.
    Shape(PointShape),
}

impl Constant {
    /// Short description used in type-mismatch errors.
    #[must_use]
    pub fn describe(&self) -> String {
        match self {
            Constant::Number(n) => format!("constant {n}"),
            Constant::Color(c) => format!("constant {}", c.to_hex()),
            Constant::Text(t) => format!("constant \"{t}\""),
            Constant::Shape(s) => format!("constant {s:?}"),
        }
    }
}

/// What a channel is bound to.
#[derive(Debug, Clone, PartialEq)]
pub enum MappingValue {
    /// A dataset variable, by name.
    Variable(String),
    /// A fixed value.
    Constant(Constant),
}

/// Aesthetic mapping specification.
///
/// Immutable builder: every method returns a new mapping.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Aes {
    bindings: BTreeMap<Channel, MappingValue>,
}

impl Aes {
    /// Create an empty mapping.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from `(channel name, variable name)` pairs.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownChannel`] for an unrecognized channel name.
    pub fn from_pairs(pairs: &[(&str, &str)]) -> Result<Self, Error> {
        pairs
            .iter()
            .try_fold(Self::new(), |aes, (channel, var)| Ok(aes.map(channel.parse()?, var)))
    }

    /// Map a channel to a variable.
    #[must_use]
    pub fn map(mut self, channel: Channel, variable: &str) -> Self {
        self.bindings.insert(channel, MappingValue::Variable(variable.to_string()));
        self
    }

    /// Set a channel to a constant.
    #[must_use]
    pub fn set(mut self, channel: Channel, value: Constant) -> Self {
        self.bindings.insert(channel, MappingValue::Constant(value));
        self
    }

    /// Map x position to a column.
    #[must_use]
    pub fn x(self, column: &str) -> Self {
        self.map(Channel::X, column)
    }

    /// Map y position to a column.
    #[must_use]
    pub fn y(self, column: &str) -> Self {
        self.map(Channel::Y, column)
    }

    /// Map the lower ribbon bound to a column.
    #[must_use]
    pub fn ymin(self, column: &str) -> Self {
        self.map(Channel::Ymin, column)
    }

    /// Map the upper ribbon bound to a column.
    #[must_use]
    pub fn ymax(self, column: &str) -> Self {
        self.map(Channel::Ymax, column)
    }

    /// Map color to a column.
    #[must_use]
    pub fn color(self, column: &str) -> Self {
        self.map(Channel::Color, column)
    }

    /// Map fill color to a column.
    #[must_use]
    pub fn fill(self, column: &str) -> Self {
        self.map(Channel::Fill, column)
    }

    /// Map shape to a column.
    #[must_use]
    pub fn shape(self, column: &str) -> Self {
        self.map(Channel::Shape, column)
    }

    /// Map size to a column.
    #[must_use]
    pub fn size(self, column: &str) -> Self {
        self.map(Channel::Size, column)
    }

    /// Map alpha/opacity to a column.
    #[must_use]
    pub fn alpha(self, column: &str) -> Self {
        self.map(Channel::Alpha, column)
    }

    /// Map label to a column.
    #[must_use]
    pub fn label(self, column: &str) -> Self {
        self.map(Channel::Label, column)
    }

    /// Map group to a column.
    #[must_use]
    pub fn group(self, column: &str) -> Self {
        self.map(Channel::Group, column)
    }

    /// Set a fixed color value.
    #[must_use]
    pub fn color_value(self, color: Rgba) -> Self {
        self.set(Channel::Color, Constant::Color(color))
    }

    /// Set a fixed fill value.
    #[must_use]
    pub fn fill_value(self, color: Rgba) -> Self {
        self.set(Channel::Fill, Constant::Color(color))
    }

    /// Set a fixed size value.
    #[must_use]
    pub fn size_value(self, size: f32) -> Self {
        self.set(Channel::Size, Constant::Number(size))
    }

    /// Set a fixed alpha value, clamped to 0.0-1.0.
    #[must_use]
    pub fn alpha_value(self, alpha: f32) -> Self {
        self.set(Channel::Alpha, Constant::Number(alpha.clamp(0.0, 1.0)))
    }

    /// Set a fixed point shape.
    #[must_use]
    pub fn shape_value(self, shape: PointShape) -> Self {
        self.set(Channel::Shape, Constant::Shape(shape))
    }

    /// What a channel is bound to, if anything.
    #[must_use]
    pub fn get(&self, channel: Channel) -> Option<&MappingValue> {
        self.bindings.get(&channel)
    }

    /// The variable a channel maps, if it maps one.
    #[must_use]
    pub fn variable(&self, channel: Channel) -> Option<&str> {
        match self.bindings.get(&channel) {
            Some(MappingValue::Variable(v)) => Some(v.as_str()),
            _ => None,
        }
    }

    /// Whether a channel is bound.
    #[must_use]
    pub fn contains(&self, channel: Channel) -> bool {
        self.bindings.contains_key(&channel)
    }

    /// Iterate bindings in canonical channel order.
    pub fn iter(&self) -> impl Iterator<Item = (Channel, &MappingValue)> + '_ {
        self.bindings.iter().map(|(c, v)| (*c, v))
    }

    /// Whether nothing is bound.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    /// Merge another Aes, with other taking precedence.
    #[must_use]
    pub fn merge(&self, other: &Aes) -> Aes {
        let mut bindings = self.bindings.clone();
        bindings.extend(other.bindings.iter().map(|(c, v)| (*c, v.clone())));
        Aes { bindings }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_aes_builder() {
        let aes = Aes::new().x("xvar").y("yvar").color("category").size_value(5.0);

        assert_eq!(aes.variable(Channel::X), Some("xvar"));
        assert_eq!(aes.variable(Channel::Y), Some("yvar"));
        assert_eq!(aes.variable(Channel::Color), Some("category"));
        assert_eq!(
            aes.get(Channel::Size),
            Some(&MappingValue::Constant(Constant::Number(5.0)))
        );
        assert_eq!(aes.variable(Channel::Size), None);
    }

    #[test]
    fn test_builder_does_not_mutate_original() {
        let base = Aes::new().x("x");
        let extended = base.clone().y("y");
        assert!(!base.contains(Channel::Y));
        assert!(extended.contains(Channel::Y));
    }

    #[test]
    fn test_aes_merge() {
        let base = Aes::new().x("x").y("y").color_value(Rgba::RED);
        let override_aes = Aes::new().y("y2").size_value(3.0);

        let merged = base.merge(&override_aes);
        assert_eq!(merged.variable(Channel::X), Some("x"));
        assert_eq!(merged.variable(Channel::Y), Some("y2"));
        assert_eq!(
            merged.get(Channel::Color),
            Some(&MappingValue::Constant(Constant::Color(Rgba::RED)))
        );
        assert!(merged.contains(Channel::Size));
    }

    #[test]
    fn test_alpha_value_clamp() {
        let aes = Aes::new().alpha_value(1.5);
        assert_eq!(
            aes.get(Channel::Alpha),
            Some(&MappingValue::Constant(Constant::Number(1.0)))
        );
    }

    #[test]
    fn test_channel_parse() {
        assert_eq!("x".parse::<Channel>().unwrap(), Channel::X);
        assert_eq!("colour".parse::<Channel>().unwrap(), Channel::Color);
        assert!(matches!(
            "depth".parse::<Channel>(),
            Err(Error::UnknownChannel(name)) if name == "depth"
        ));
    }

    #[test]
    fn test_from_pairs() {
        let aes = Aes::from_pairs(&[("x", "displ"), ("y", "hwy"), ("colour", "class")]).unwrap();
        assert_eq!(aes.variable(Channel::Color), Some("class"));
        assert!(Aes::from_pairs(&[("z", "a")]).is_err());
    }

    #[test]
    fn test_iter_canonical_order() {
        let aes = Aes::new().label("l").y("y").x("x");
        let order: Vec<Channel> = aes.iter().map(|(c, _)| c).collect();
        assert_eq!(order, vec![Channel::X, Channel::Y, Channel::Label]);
    }
}
