//! Statistical transformations for Grammar of Graphics.
//!
//! Transforms data before visualization. 2D density estimation is not done
//! here: contour layers hand their positions to a [`DensityEstimator`]
//! supplied by the caller.

use std::fmt;

use trueno::Vector;

use crate::error::{Error, Result};

/// Statistical transformation type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stat {
    /// No transformation; values sharing a bar slot stack.
    Identity,
    /// Count records per slot.
    Count,
    /// Sum y per slot.
    Sum,
    /// Mean y per slot.
    Mean,
    /// 2D kernel density estimate, computed externally.
    Density2d,
}

impl Stat {
    /// Create an identity stat (no transformation).
    #[must_use]
    pub fn identity() -> Self {
        Stat::Identity
    }

    /// Create a count stat.
    #[must_use]
    pub fn count() -> Self {
        Stat::Count
    }

    /// Create a sum stat.
    #[must_use]
    pub fn sum() -> Self {
        Stat::Sum
    }

    /// Create a mean stat.
    #[must_use]
    pub fn mean() -> Self {
        Stat::Mean
    }

    /// Lowercase name used in messages.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Stat::Identity => "identity",
            Stat::Count => "count",
            Stat::Sum => "sum",
            Stat::Mean => "mean",
            Stat::Density2d => "density_2d",
        }
    }

    /// Whether the statistic reads the y channel.
    #[must_use]
    pub fn needs_y(self) -> bool {
        matches!(self, Stat::Identity | Stat::Sum | Stat::Mean)
    }

    /// Reduce the y values of one slot to a bar height.
    ///
    /// `records` is the number of records in the slot, including those
    /// whose y is missing. A density estimate has no per-slot value and
    /// fails with [`Error::StatUnavailable`].
    pub fn reduce(self, values: &[f32], records: usize) -> Result<f32> {
        match self {
            Stat::Count => Ok(records as f32),
            Stat::Identity | Stat::Sum => Ok(values.iter().sum()),
            Stat::Mean if values.is_empty() => Ok(0.0),
            Stat::Mean => Ok(Vector::from_vec(values.to_vec()).mean().unwrap_or(0.0)),
            Stat::Density2d => {
                Err(Error::StatUnavailable("density_2d does not reduce to a bar height".to_string()))
            }
        }
    }
}

/// One iso-line of a density surface.
#[derive(Debug, Clone, PartialEq)]
pub struct ContourLine {
    /// Density level of the line.
    pub level: f32,
    /// Vertices in data coordinates.
    pub points: Vec<(f32, f32)>,
}

/// Computes iso-lines of a 2D density estimate over (x, y) positions.
pub trait DensityEstimator: Send + Sync + fmt::Debug {
    /// Return up to `levels` contour lines for the positions.
    fn contours(&self, x: &[f32], y: &[f32], levels: usize) -> Result<Vec<ContourLine>>;
}
