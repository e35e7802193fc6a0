//! Dataset provider.
//!
//! Resolves dataset names to immutable [`Dataset`]s: caller registrations
//! first, then the built-in teaching datasets, then `<dir>/<name>.csv` when a
//! directory is configured. Loads are memoized per provider so that one
//! rendering pass sees a single shared copy of each dataset.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use log::debug;

use super::data::{DataValue, Dataset, VariableKind};
use crate::error::{Error, Result};

/// Names of the datasets compiled into the crate.
pub const BUILTIN_DATASETS: &[&str] = &["diamonds", "economics", "faithful", "heights", "mpg"];

/// Named dataset lookup with per-provider memoization.
#[derive(Debug, Default)]
pub struct DatasetProvider {
    registered: HashMap<String, Arc<Dataset>>,
    directory: Option<PathBuf>,
    memo: Mutex<HashMap<String, Arc<Dataset>>>,
}

impl DatasetProvider {
    /// A provider serving the built-in datasets.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Also look up unknown names as `<dir>/<name>.csv`.
    #[must_use]
    pub fn with_directory(mut self, dir: impl Into<PathBuf>) -> Self {
        self.directory = Some(dir.into());
        self
    }

    /// Register a caller-supplied dataset. Registrations shadow built-ins.
    pub fn register(&mut self, name: &str, dataset: Dataset) {
        self.registered.insert(name.to_string(), Arc::new(dataset));
    }

    /// Every name this provider can resolve without touching the filesystem.
    #[must_use]
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.registered.keys().cloned().collect();
        for builtin in BUILTIN_DATASETS {
            if !self.registered.contains_key(*builtin) {
                names.push((*builtin).to_string());
            }
        }
        names.sort();
        names
    }

    /// Load a dataset by name.
    ///
    /// Repeated loads of the same name return the same allocation.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DatasetNotFound`] if no source knows the name, or a
    /// CSV/I/O error if the backing file is unreadable.
    pub fn load(&self, name: &str) -> Result<Arc<Dataset>> {
        let mut memo = self
            .memo
            .lock()
            .map_err(|_| Error::Rendering("dataset memo lock poisoned".into()))?;
        if let Some(hit) = memo.get(name) {
            return Ok(Arc::clone(hit));
        }

        let dataset = if let Some(registered) = self.registered.get(name) {
            Arc::clone(registered)
        } else if let Ok(builtin) = builtin(name) {
            Arc::new(builtin)
        } else if let Some(path) = self.csv_path(name) {
            Arc::new(load_csv(&path)?)
        } else {
            return Err(Error::DatasetNotFound(name.to_string()));
        };

        debug!(
            "loaded dataset '{name}': {} records x {} variables",
            dataset.nrow(),
            dataset.ncol()
        );
        memo.insert(name.to_string(), Arc::clone(&dataset));
        Ok(dataset)
    }

    fn csv_path(&self, name: &str) -> Option<PathBuf> {
        let dir = self.directory.as_ref()?;
        let path = dir.join(format!("{name}.csv"));
        path.is_file().then_some(path)
    }
}

/// Build one of the compiled-in datasets.
///
/// # Errors
///
/// Returns [`Error::DatasetNotFound`] for names outside [`BUILTIN_DATASETS`].
pub fn builtin(name: &str) -> Result<Dataset> {
    match name {
        "mpg" => mpg(),
        "economics" => economics(),
        "faithful" => faithful(),
        "diamonds" => diamonds(),
        "heights" => heights(),
        _ => Err(Error::DatasetNotFound(name.to_string())),
    }
}

/// Read a CSV file with a header row into a dataset.
///
/// A column is numeric when every non-missing cell parses as a number,
/// otherwise categorical. Empty cells and `NA` are missing values.
///
/// # Errors
///
/// Returns a CSV or I/O error if the file cannot be read.
pub fn load_csv(path: &Path) -> Result<Dataset> {
    let mut reader = csv::ReaderBuilder::new().has_headers(true).from_path(path)?;
    let headers: Vec<String> = reader.headers()?.iter().map(str::to_string).collect();

    let mut cells: Vec<Vec<String>> = vec![Vec::new(); headers.len()];
    for row in reader.records() {
        let row = row?;
        for (column, cell) in cells.iter_mut().zip(row.iter()) {
            column.push(cell.trim().to_string());
        }
    }

    let mut builder = Dataset::builder();
    for (name, column) in headers.iter().zip(cells) {
        let missing = |s: &str| s.is_empty() || s == "NA";
        let numeric = column
            .iter()
            .filter(|s| !missing(s))
            .all(|s| s.parse::<f32>().is_ok());
        let kind = if numeric { VariableKind::Numeric } else { VariableKind::Categorical };
        let values = column
            .iter()
            .map(|s| {
                if missing(s) {
                    DataValue::Null
                } else if numeric {
                    s.parse::<f32>().map_or(DataValue::Null, DataValue::Number)
                } else {
                    DataValue::Text(s.clone())
                }
            })
            .collect();
        builder = builder.column(name, kind, values);
    }
    debug!("read {} columns from {}", headers.len(), path.display());
    builder.build()
}

fn mpg() -> Result<Dataset> {
    Dataset::builder()
        .numeric("displ", &[1.8, 1.8, 2.0, 2.8, 3.1, 5.7, 5.3, 2.4, 3.3, 4.7, 2.0, 2.5])
        .numeric("year", &[1999.0, 1999.0, 2008.0, 1999.0, 2008.0, 1999.0, 2008.0, 1999.0, 2008.0, 2008.0, 2008.0, 2008.0])
        .categorical("drv", &["f", "f", "f", "4", "4", "r", "r", "f", "f", "4", "f", "4"])
        .numeric("cty", &[18.0, 21.0, 20.0, 16.0, 17.0, 16.0, 14.0, 19.0, 17.0, 14.0, 21.0, 19.0])
        .numeric("hwy", &[29.0, 29.0, 31.0, 26.0, 25.0, 26.0, 20.0, 27.0, 24.0, 19.0, 29.0, 25.0])
        .categorical(
            "class",
            &[
                "compact", "compact", "compact", "compact", "compact", "2seater", "suv",
                "midsize", "minivan", "pickup", "subcompact", "subcompact",
            ],
        )
        .build()
}

fn economics() -> Result<Dataset> {
    Dataset::builder()
        .numeric("month", &[1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 9.0, 10.0, 11.0, 12.0])
        .numeric("unemploy", &[2944.0, 2945.0, 2958.0, 3143.0, 3066.0, 3018.0, 2878.0, 3001.0, 2877.0, 2709.0, 2740.0, 2938.0])
        .numeric("psavert", &[12.6, 12.6, 11.9, 12.9, 12.8, 11.8, 11.7, 12.3, 11.7, 12.3, 12.0, 11.7])
        .numeric("pop", &[198.7, 198.9, 199.1, 199.3, 199.5, 199.7, 199.9, 200.2, 200.4, 200.6, 200.8, 201.0])
        .build()
}

fn faithful() -> Result<Dataset> {
    Dataset::builder()
        .numeric("eruptions", &[3.6, 1.8, 3.333, 2.283, 4.533, 2.883, 4.7, 3.6, 1.95, 4.35, 1.833, 3.917])
        .numeric("waiting", &[79.0, 54.0, 74.0, 62.0, 85.0, 55.0, 88.0, 85.0, 51.0, 85.0, 54.0, 84.0])
        .build()
}

fn diamonds() -> Result<Dataset> {
    Dataset::builder()
        .numeric("carat", &[0.23, 0.21, 0.23, 0.29, 0.31, 0.24, 0.24, 0.26, 0.22, 0.23])
        .categorical(
            "cut",
            &["Ideal", "Premium", "Good", "Premium", "Good", "Very Good", "Very Good", "Very Good", "Fair", "Very Good"],
        )
        .categorical("color", &["E", "E", "E", "I", "J", "J", "I", "H", "E", "H"])
        .numeric("price", &[326.0, 326.0, 327.0, 334.0, 335.0, 336.0, 336.0, 337.0, 337.0, 338.0])
        .build()
}

fn heights() -> Result<Dataset> {
    Dataset::builder()
        .categorical("sex", &["female", "male", "female", "male", "female", "male", "female", "male"])
        .numeric("height", &[162.0, 178.0, 158.0, 183.0, 170.0, 175.0, 165.0, 180.0])
        .numeric("weight", &[58.0, 80.0, 52.0, 88.0, 66.0, 74.0, 61.0, 83.0])
        .build()
}
