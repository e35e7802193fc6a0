//! Grid specifications and template parsing.

use serde::Deserialize;

use crate::error::{Error, Result};

/// How a layout's grid is shaped.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Grid {
    /// `ceil(sqrt(n))` columns and as many rows as needed.
    #[default]
    Auto,
    /// A fixed number of rows and columns, filled row by row.
    Dims {
        /// Number of rows.
        rows: usize,
        /// Number of columns.
        cols: usize,
    },
    /// Named cells drawn as text: one line per row, one character per
    /// column, `#` for an empty spot. A name repeated over a rectangle makes
    /// one cell spanning it.
    Template(String),
}

/// One placeable cell of a grid, possibly spanning several rows/columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Area {
    /// Template name, if the grid came from a template.
    pub name: Option<char>,
    /// Top row (0-based).
    pub row: usize,
    /// Left column (0-based).
    pub col: usize,
    /// Rows spanned.
    pub row_span: usize,
    /// Columns spanned.
    pub col_span: usize,
}

impl Area {
    fn single(row: usize, col: usize) -> Self {
        Self { name: None, row, col, row_span: 1, col_span: 1 }
    }

    /// Whether the area covers grid position `(row, col)`.
    #[must_use]
    pub fn covers(&self, row: usize, col: usize) -> bool {
        (self.row..self.row + self.row_span).contains(&row)
            && (self.col..self.col + self.col_span).contains(&col)
    }
}

/// A grid resolved to concrete dimensions and placement areas.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GridShape {
    /// Number of rows.
    pub rows: usize,
    /// Number of columns.
    pub cols: usize,
    /// Areas in placement order.
    pub areas: Vec<Area>,
}

impl Grid {
    /// Parse a template. Leading and trailing blank lines and surrounding
    /// whitespace on each line are ignored.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidTemplate`] for an empty template, ragged rows or
    /// a non-rectangular area.
    pub fn template(text: &str) -> Result<Self> {
        parse_template(text)?;
        Ok(Grid::Template(text.to_string()))
    }

    /// Resolve to concrete areas for `panels` panels.
    pub fn shape(&self, panels: usize) -> Result<GridShape> {
        match self {
            Grid::Auto => {
                let cols = (panels as f64).sqrt().ceil().max(1.0) as usize;
                let rows = panels.div_ceil(cols);
                Ok(dims(rows, cols))
            }
            Grid::Dims { rows, cols } => Ok(dims(*rows, *cols)),
            Grid::Template(text) => parse_template(text),
        }
    }
}

fn dims(rows: usize, cols: usize) -> GridShape {
    let areas = (0..rows).flat_map(|r| (0..cols).map(move |c| Area::single(r, c))).collect();
    GridShape { rows, cols, areas }
}

fn parse_template(text: &str) -> Result<GridShape> {
    let lines: Vec<Vec<char>> = text
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .map(|l| l.chars().collect())
        .collect();

    let cols = lines.first().map_or(0, Vec::len);
    if cols == 0 {
        return Err(Error::InvalidTemplate("template has no cells".to_string()));
    }
    if let Some(row) = lines.iter().position(|l| l.len() != cols) {
        return Err(Error::InvalidTemplate(format!(
            "row {} has {} cells, expected {cols}",
            row + 1,
            lines[row].len()
        )));
    }

    let mut names: Vec<char> = lines.iter().flatten().copied().filter(|c| *c != '#').collect();
    names.sort_unstable();
    names.dedup();

    let mut areas = Vec::with_capacity(names.len());
    for name in names {
        let spots: Vec<(usize, usize)> = lines
            .iter()
            .enumerate()
            .flat_map(|(r, line)| {
                line.iter().enumerate().filter(move |(_, c)| **c == name).map(move |(c, _)| (r, c))
            })
            .collect();
        let top = spots.iter().map(|s| s.0).min().unwrap_or(0);
        let bottom = spots.iter().map(|s| s.0).max().unwrap_or(0);
        let left = spots.iter().map(|s| s.1).min().unwrap_or(0);
        let right = spots.iter().map(|s| s.1).max().unwrap_or(0);
        let area = Area {
            name: Some(name),
            row: top,
            col: left,
            row_span: bottom - top + 1,
            col_span: right - left + 1,
        };
        if spots.len() != area.row_span * area.col_span {
            return Err(Error::InvalidTemplate(format!("area '{name}' is not rectangular")));
        }
        areas.push(area);
    }

    Ok(GridShape { rows: lines.len(), cols, areas })
}
