//! Faceting for Grammar of Graphics.
//!
//! `facet_wrap`: one panel per level of a variable, wrapped into a grid.

use log::debug;

use super::data::Dataset;
use crate::compose::Grid;
use crate::error::{Error, Result};

/// Wrap facets over one variable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Facet {
    var: String,
    ncol: Option<usize>,
}

impl Facet {
    /// Facet by `var`, with an automatic number of columns.
    #[must_use]
    pub fn wrap(var: &str) -> Self {
        Self { var: var.to_string(), ncol: None }
    }

    /// Fix the number of columns.
    #[must_use]
    pub fn ncol(mut self, ncol: usize) -> Self {
        self.ncol = Some(ncol.max(1));
        self
    }

    /// The faceting variable.
    #[must_use]
    pub fn var(&self) -> &str {
        &self.var
    }

    /// Split `dataset` into one subset per level of the variable, in level
    /// order. Records with a missing value are dropped.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownVariable`] if the variable is not in the dataset.
    pub fn split(&self, dataset: &Dataset) -> Result<Vec<(String, Dataset)>> {
        let values = dataset.get(&self.var).ok_or_else(|| Error::UnknownVariable {
            channel: "facet".to_string(),
            variable: self.var.clone(),
        })?;

        let subsets: Vec<(String, Dataset)> = dataset
            .levels(&self.var)
            .into_iter()
            .map(|level| {
                let rows: Vec<usize> = values
                    .iter()
                    .enumerate()
                    .filter(|(_, v)| !v.is_null() && v.to_string() == level)
                    .map(|(i, _)| i)
                    .collect();
                let subset = dataset.select_rows(&rows);
                (level, subset)
            })
            .collect();
        debug!("facet '{}' split {} records into {} panels", self.var, dataset.nrow(), subsets.len());
        Ok(subsets)
    }

    /// The grid for `panels` facet panels.
    #[must_use]
    pub fn grid(&self, panels: usize) -> Grid {
        match self.ncol {
            Some(cols) => Grid::Dims { rows: panels.div_ceil(cols), cols },
            None => Grid::Auto,
        }
    }
}
