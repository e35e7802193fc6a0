//! Error types for figure-grammar operations.

use std::io;
use thiserror::Error;

use crate::grammar::VariableKind;

/// Result type alias using [`Error`].
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while loading data, resolving mappings,
/// rendering panels or composing layouts.
///
/// Every variant is a deterministic configuration error: retrying the same
/// call with the same input fails the same way.
#[derive(Error, Debug)]
pub enum Error {
    /// No dataset is known under the requested name.
    #[error("dataset not found: {0}")]
    DatasetNotFound(String),

    /// One or more channels required by the geometry are not mapped.
    #[error("missing required channel(s): {}", .channels.join(", "))]
    MissingRequiredChannel {
        /// Names of every missing channel, in canonical channel order.
        channels: Vec<String>,
    },

    /// A channel name is not recognized.
    #[error("unknown channel '{0}'")]
    UnknownChannel(String),

    /// A channel is mapped to a variable the dataset does not have.
    #[error("channel '{channel}' maps unknown variable '{variable}'")]
    UnknownVariable {
        /// The channel carrying the mapping.
        channel: String,
        /// The variable name that was not found.
        variable: String,
    },

    /// A mapped variable (or constant) does not fit the channel's domain.
    #[error("channel '{channel}' expects {expected} data but '{variable}' is {found}")]
    TypeMismatch {
        /// The channel carrying the mapping.
        channel: String,
        /// The variable name, or a description of the constant.
        variable: String,
        /// What the channel accepts.
        expected: String,
        /// What was supplied.
        found: String,
    },

    /// Two panels claimed the same layout cell.
    #[error("layout cell {cell} claimed by more than one panel")]
    LayoutCellConflict {
        /// The contested cell, as written by the caller.
        cell: String,
    },

    /// More panels were supplied than the layout has cells.
    #[error("layout has {cells} cell(s) but {panels} panel(s) were supplied")]
    LayoutPanelCountMismatch {
        /// Number of panels supplied.
        panels: usize,
        /// Number of cells available.
        cells: usize,
    },

    /// A named-cell layout template is malformed.
    #[error("invalid layout template: {0}")]
    InvalidTemplate(String),

    /// Dataset columns have different lengths.
    #[error("column '{column}' has {len} values, expected {expected}")]
    RaggedColumns {
        /// The offending column.
        column: String,
        /// Its length.
        len: usize,
        /// Length of the columns before it.
        expected: usize,
    },

    /// A variable name appears twice in one dataset.
    #[error("duplicate variable '{0}'")]
    DuplicateVariable(String),

    /// A statistic needs an external collaborator that was not supplied.
    #[error("statistic unavailable: {0}")]
    StatUnavailable(String),

    /// Invalid dimensions for a panel or layout.
    #[error("Invalid dimensions: {width}x{height}")]
    InvalidDimensions {
        /// Width value.
        width: u32,
        /// Height value.
        height: u32,
    },

    /// I/O error (file operations, etc.).
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// CSV parsing error.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Configuration parsing or validation error.
    #[error("configuration error: {0}")]
    Config(String),

    /// Rendering error.
    #[error("Rendering error: {0}")]
    Rendering(String),
}

impl Error {
    /// Build a [`Error::TypeMismatch`] for a variable of the given kind.
    pub(crate) fn type_mismatch(
        channel: &str,
        variable: &str,
        expected: &str,
        found: VariableKind,
    ) -> Self {
        Error::TypeMismatch {
            channel: channel.to_string(),
            variable: variable.to_string(),
            expected: expected.to_string(),
            found: found.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_channels_lists_all() {
        let err = Error::MissingRequiredChannel {
            channels: vec!["x".into(), "y".into()],
        };
        assert_eq!(err.to_string(), "missing required channel(s): x, y");
    }

    #[test]
    fn test_count_mismatch_display() {
        let err = Error::LayoutPanelCountMismatch { panels: 4, cells: 3 };
        assert!(err.to_string().contains('4'));
        assert!(err.to_string().contains('3'));
    }

    #[test]
    fn test_type_mismatch_helper() {
        let err = Error::type_mismatch("shape", "hwy", "discrete", VariableKind::Numeric);
        assert_eq!(
            err.to_string(),
            "channel 'shape' expects discrete data but 'hwy' is numeric"
        );
    }

    #[test]
    fn test_io_from() {
        let err: Error = io::Error::new(io::ErrorKind::NotFound, "gone").into();
        assert!(matches!(err, Error::Io(_)));
    }
}
