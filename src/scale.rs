//! Scale functions for data-to-visual mappings.
//!
//! Scales transform data values to visual properties (position, color, size).
//! Based on the Grammar of Graphics [Wilkinson 2005].

use trueno::Vector;

use crate::color::Rgba;
use crate::error::{Error, Result};
use crate::grammar::{DataValue, Dataset, VariableKind};

/// Trait for scale functions that map domain values to range values.
pub trait Scale<D, R> {
    /// Transform a domain value to a range value.
    fn scale(&self, value: D) -> R;

    /// Get the domain extent.
    fn domain(&self) -> (D, D);

    /// Get the range extent.
    fn range(&self) -> (R, R);
}

/// Minimum and maximum of the finite values, or `None` if there are none.
///
/// Uses trueno's SIMD reductions.
#[must_use]
pub fn extent(values: &[f32]) -> Option<(f32, f32)> {
    let finite: Vec<f32> = values.iter().copied().filter(|v| v.is_finite()).collect();
    if finite.is_empty() {
        return None;
    }
    let first = finite[0];
    let vec = Vector::from_vec(finite);
    Some((vec.min().unwrap_or(first), vec.max().unwrap_or(first)))
}

/// Linear scale for continuous-to-continuous mapping.
#[derive(Debug, Clone, Copy)]
pub struct LinearScale {
    domain_min: f32,
    domain_max: f32,
    range_min: f32,
    range_max: f32,
}

impl LinearScale {
    /// Create a new linear scale.
    ///
    /// # Errors
    ///
    /// Returns an error if domain_min equals domain_max.
    pub fn new(domain: (f32, f32), range: (f32, f32)) -> Result<Self> {
        if (domain.0 - domain.1).abs() < f32::EPSILON {
            return Err(Error::Rendering("Domain min and max cannot be equal".to_string()));
        }

        Ok(Self {
            domain_min: domain.0,
            domain_max: domain.1,
            range_min: range.0,
            range_max: range.1,
        })
    }

    /// Create a scale over `domain`, widening a degenerate domain by one
    /// unit each side so a single value lands mid-range.
    #[must_use]
    pub fn padded(domain: (f32, f32), range: (f32, f32)) -> Self {
        let (lo, hi) = if (domain.1 - domain.0).abs() < f32::EPSILON {
            (domain.0 - 1.0, domain.1 + 1.0)
        } else {
            domain
        };
        Self { domain_min: lo, domain_max: hi, range_min: range.0, range_max: range.1 }
    }
}

impl Scale<f32, f32> for LinearScale {
    fn scale(&self, value: f32) -> f32 {
        let t = (value - self.domain_min) / (self.domain_max - self.domain_min);
        self.range_min + t * (self.range_max - self.range_min)
    }

    fn domain(&self) -> (f32, f32) {
        (self.domain_min, self.domain_max)
    }

    fn range(&self) -> (f32, f32) {
        (self.range_min, self.range_max)
    }
}

/// Color scale for mapping continuous values to a gradient.
#[derive(Debug, Clone)]
pub struct ColorScale {
    colors: Vec<Rgba>,
    domain_min: f32,
    domain_max: f32,
}

impl ColorScale {
    /// Create a new color scale.
    ///
    /// A degenerate domain maps every value to the first color.
    ///
    /// # Errors
    ///
    /// Returns an error if colors is empty.
    pub fn new(colors: Vec<Rgba>, domain: (f32, f32)) -> Result<Self> {
        if colors.is_empty() {
            return Err(Error::Rendering("Color scale requires at least one color".to_string()));
        }
        Ok(Self { colors, domain_min: domain.0, domain_max: domain.1 })
    }

    /// The default continuous gradient, dark to light blue.
    #[must_use]
    pub fn gradient(domain: (f32, f32)) -> Self {
        Self {
            colors: vec![Rgba::rgb(19, 43, 67), Rgba::rgb(86, 177, 247)],
            domain_min: domain.0,
            domain_max: domain.1,
        }
    }
}

impl Scale<f32, Rgba> for ColorScale {
    fn scale(&self, value: f32) -> Rgba {
        let span = self.domain_max - self.domain_min;
        if self.colors.len() == 1 || span.abs() < f32::EPSILON {
            return self.colors[0];
        }
        let t = ((value - self.domain_min) / span).clamp(0.0, 1.0);

        let segment_count = self.colors.len() - 1;
        let segment = ((t * segment_count as f32).floor() as usize).min(segment_count - 1);
        let local_t = t * segment_count as f32 - segment as f32;

        self.colors[segment].lerp(self.colors[segment + 1], local_t)
    }

    fn domain(&self) -> (f32, f32) {
        (self.domain_min, self.domain_max)
    }

    fn range(&self) -> (Rgba, Rgba) {
        (*self.colors.first().unwrap_or(&Rgba::BLACK), *self.colors.last().unwrap_or(&Rgba::WHITE))
    }
}

/// Maps values to ordered discrete levels.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DiscreteScale {
    levels: Vec<String>,
}

impl DiscreteScale {
    /// A scale over the given levels, in order.
    #[must_use]
    pub fn new(levels: Vec<String>) -> Self {
        Self { levels }
    }

    /// The levels of a dataset variable, first-appearance order.
    #[must_use]
    pub fn from_variable(dataset: &Dataset, name: &str) -> Self {
        Self::new(dataset.levels(name))
    }

    /// Levels in order.
    #[must_use]
    pub fn levels(&self) -> &[String] {
        &self.levels
    }

    /// Append the levels not already present, keeping the existing order.
    pub fn extend(&mut self, levels: impl IntoIterator<Item = String>) {
        for level in levels {
            if !self.levels.contains(&level) {
                self.levels.push(level);
            }
        }
    }

    /// Zero-based index of a value's level.
    #[must_use]
    pub fn index_of(&self, value: &DataValue) -> Option<usize> {
        if value.is_null() {
            return None;
        }
        let key = value.to_string();
        self.levels.iter().position(|l| *l == key)
    }

    /// Position of a value on a discrete axis: levels sit at 1, 2, 3, ...
    #[must_use]
    pub fn position(&self, value: &DataValue) -> Option<f32> {
        self.index_of(value).map(|i| (i + 1) as f32)
    }
}

/// How a position channel turns record values into coordinates.
#[derive(Debug, Clone, PartialEq)]
pub enum PositionScale {
    /// Numbers are used as-is.
    Continuous,
    /// Levels map to 1, 2, 3, ...
    Discrete(DiscreteScale),
}

impl PositionScale {
    /// Choose the scale for a variable of the given kind.
    #[must_use]
    pub fn for_variable(dataset: &Dataset, name: &str, kind: VariableKind) -> Self {
        if kind.is_discrete() {
            PositionScale::Discrete(DiscreteScale::from_variable(dataset, name))
        } else {
            PositionScale::Continuous
        }
    }

    /// Map one value.
    #[must_use]
    pub fn map(&self, value: &DataValue) -> Option<f32> {
        match self {
            PositionScale::Continuous => value.as_f32(),
            PositionScale::Discrete(scale) => scale.position(value),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_linear_scale() {
        let scale = LinearScale::new((0.0, 100.0), (0.0, 1.0)).expect("operation should succeed");
        assert_relative_eq!(scale.scale(0.0), 0.0);
        assert_relative_eq!(scale.scale(50.0), 0.5);
        assert_relative_eq!(scale.scale(100.0), 1.0);
        assert_eq!(scale.domain(), (0.0, 100.0));
    }

    #[test]
    fn test_linear_scale_degenerate() {
        assert!(LinearScale::new((2.0, 2.0), (0.0, 1.0)).is_err());
        let padded = LinearScale::padded((2.0, 2.0), (0.0, 10.0));
        assert_relative_eq!(padded.scale(2.0), 5.0);
    }

    #[test]
    fn test_extent() {
        assert_eq!(extent(&[3.0, 1.0, 5.0]), Some((1.0, 5.0)));
        assert_eq!(extent(&[f32::NAN, 2.0]), Some((2.0, 2.0)));
        assert_eq!(extent(&[]), None);
    }

    #[test]
    fn test_color_scale_gradient() {
        let scale = ColorScale::gradient((0.0, 10.0));
        assert_eq!(scale.scale(0.0), Rgba::rgb(19, 43, 67));
        assert_eq!(scale.scale(99.0), Rgba::rgb(86, 177, 247));
        assert_eq!(ColorScale::gradient((1.0, 1.0)).scale(1.0), Rgba::rgb(19, 43, 67));
        assert!(ColorScale::new(Vec::new(), (0.0, 1.0)).is_err());
    }

    #[test]
    fn test_discrete_positions() {
        let scale = DiscreteScale::new(vec!["a".into(), "b".into()]);
        assert_eq!(scale.position(&"b".into()), Some(2.0));
        assert_eq!(scale.position(&"z".into()), None);
        assert_eq!(scale.position(&DataValue::Null), None);
    }

    #[test]
    fn test_discrete_extend_keeps_order() {
        let mut scale = DiscreteScale::new(vec!["p".into(), "q".into()]);
        scale.extend(vec!["q".to_string(), "r".to_string()]);
        assert_eq!(scale.levels(), ["p", "q", "r"]);
        assert_eq!(scale.position(&"r".into()), Some(3.0));
    }

    #[test]
    fn test_position_scale_for_numeric_levels() {
        let ds = Dataset::builder()
            .column("n", VariableKind::Categorical, vec![4.0f32.into(), 6.0f32.into(), 4.0f32.into()])
            .build()
            .unwrap();
        let scale = PositionScale::for_variable(&ds, "n", VariableKind::Categorical);
        assert_eq!(scale.map(&DataValue::Number(6.0)), Some(2.0));
        assert_eq!(PositionScale::Continuous.map(&DataValue::Null), None);
    }
}
