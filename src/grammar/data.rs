//! Tidy datasets for Grammar of Graphics.
//!
//! A [`Dataset`] is an ordered sequence of records that all share one
//! [`Schema`]. Storage is column-major; [`Dataset::records`] gives the
//! record view.

use std::fmt;

use crate::error::{Error, Result};

/// A value in a dataset.
#[derive(Debug, Clone, PartialEq)]
pub enum DataValue {
    /// A numeric value.
    Number(f32),
    /// A text or category value.
    Text(String),
    /// A missing value.
    Null,
}

impl DataValue {
    /// Get as f32, or None if not a finite number.
    #[must_use]
    pub fn as_f32(&self) -> Option<f32> {
        match self {
            DataValue::Number(n) if n.is_finite() => Some(*n),
            _ => None,
        }
    }

    /// Get as string.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            DataValue::Text(s) => Some(s.as_str()),
            _ => None,
        }
    }

    /// Whether this is a missing value.
    #[must_use]
    pub fn is_null(&self) -> bool {
        matches!(self, DataValue::Null)
    }
}

impl fmt::Display for DataValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DataValue::Number(n) => write!(f, "{n}"),
            DataValue::Text(s) => f.write_str(s),
            DataValue::Null => f.write_str("NA"),
        }
    }
}

impl From<f32> for DataValue {
    fn from(v: f32) -> Self {
        DataValue::Number(v)
    }
}

impl From<&str> for DataValue {
    fn from(s: &str) -> Self {
        DataValue::Text(s.to_string())
    }
}

impl From<String> for DataValue {
    fn from(s: String) -> Self {
        DataValue::Text(s)
    }
}

impl<T: Into<DataValue>> From<Option<T>> for DataValue {
    fn from(v: Option<T>) -> Self {
        v.map_or(DataValue::Null, Into::into)
    }
}

/// The kind of data a variable holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VariableKind {
    /// Continuous numbers.
    Numeric,
    /// Ordered discrete levels (first-appearance order).
    Categorical,
    /// Free text; discrete, but not meant for legends.
    Text,
}

impl VariableKind {
    /// Whether values of this kind map onto a discrete scale.
    #[must_use]
    pub fn is_discrete(self) -> bool {
        !matches!(self, VariableKind::Numeric)
    }
}

impl fmt::Display for VariableKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            VariableKind::Numeric => "numeric",
            VariableKind::Categorical => "categorical",
            VariableKind::Text => "text",
        })
    }
}

/// One named, typed variable of a schema.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field {
    /// Variable name.
    pub name: String,
    /// Variable kind.
    pub kind: VariableKind,
}

/// The ordered variable set shared by every record of a dataset.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Schema {
    fields: Vec<Field>,
}

impl Schema {
    /// Fields in declaration order.
    #[must_use]
    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    /// Look up the kind of a variable.
    #[must_use]
    pub fn kind_of(&self, name: &str) -> Option<VariableKind> {
        self.fields.iter().find(|f| f.name == name).map(|f| f.kind)
    }

    /// Whether the schema has a variable.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.kind_of(name).is_some()
    }

    /// Number of variables.
    #[must_use]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Whether the schema has no variables.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

/// A single named column.
#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    name: String,
    kind: VariableKind,
    values: Vec<DataValue>,
}

impl Column {
    /// Column name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Column kind.
    #[must_use]
    pub fn kind(&self) -> VariableKind {
        self.kind
    }

    /// Column values in record order.
    #[must_use]
    pub fn values(&self) -> &[DataValue] {
        &self.values
    }
}

/// An immutable tidy dataset.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dataset {
    columns: Vec<Column>,
    n_rows: usize,
}

impl Dataset {
    /// Start building a dataset.
    #[must_use]
    pub fn builder() -> DatasetBuilder {
        DatasetBuilder::default()
    }

    /// An empty dataset with no variables and no records.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Create from x and y arrays.
    ///
    /// Arrays of different length are truncated to the shorter one.
    #[must_use]
    pub fn from_xy(x: &[f32], y: &[f32]) -> Self {
        let n = x.len().min(y.len());
        let number =
            |v: &[f32]| -> Vec<DataValue> { v[..n].iter().map(|&v| DataValue::Number(v)).collect() };
        Self {
            columns: vec![
                Column { name: "x".into(), kind: VariableKind::Numeric, values: number(x) },
                Column { name: "y".into(), kind: VariableKind::Numeric, values: number(y) },
            ],
            n_rows: n,
        }
    }

    /// The dataset's schema.
    #[must_use]
    pub fn schema(&self) -> Schema {
        Schema {
            fields: self
                .columns
                .iter()
                .map(|c| Field { name: c.name.clone(), kind: c.kind })
                .collect(),
        }
    }

    /// Get a column.
    #[must_use]
    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name == name)
    }

    /// Get a column's values.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&[DataValue]> {
        self.column(name).map(Column::values)
    }

    /// Get a column as f32 values, skipping non-numeric entries.
    #[must_use]
    pub fn get_f32(&self, name: &str) -> Option<Vec<f32>> {
        self.get(name)
            .map(|col| col.iter().filter_map(DataValue::as_f32).collect())
    }

    /// Distinct values of a column in first-appearance order, nulls excluded.
    #[must_use]
    pub fn levels(&self, name: &str) -> Vec<String> {
        let mut levels: Vec<String> = Vec::new();
        for value in self.get(name).unwrap_or_default() {
            if value.is_null() {
                continue;
            }
            let key = value.to_string();
            if !levels.contains(&key) {
                levels.push(key);
            }
        }
        levels
    }

    /// Get number of records.
    #[must_use]
    pub fn nrow(&self) -> usize {
        self.n_rows
    }

    /// Get number of variables.
    #[must_use]
    pub fn ncol(&self) -> usize {
        self.columns.len()
    }

    /// Whether the dataset has no records.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.n_rows == 0
    }

    /// Check if a variable exists.
    #[must_use]
    pub fn has_column(&self, name: &str) -> bool {
        self.column(name).is_some()
    }

    /// Variable names in schema order.
    #[must_use]
    pub fn columns(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.name.as_str()).collect()
    }

    /// The record at `index`.
    #[must_use]
    pub fn record(&self, index: usize) -> Option<Record<'_>> {
        (index < self.n_rows).then_some(Record { dataset: self, index })
    }

    /// Iterate records in order.
    pub fn records(&self) -> impl Iterator<Item = Record<'_>> + '_ {
        (0..self.n_rows).map(move |index| Record { dataset: self, index })
    }

    /// A new dataset holding only the given records, in the given order.
    /// Out-of-range indices are ignored.
    #[must_use]
    pub fn select_rows(&self, indices: &[usize]) -> Dataset {
        let keep: Vec<usize> = indices.iter().copied().filter(|&i| i < self.n_rows).collect();
        Dataset {
            columns: self
                .columns
                .iter()
                .map(|c| Column {
                    name: c.name.clone(),
                    kind: c.kind,
                    values: keep.iter().map(|&i| c.values[i].clone()).collect(),
                })
                .collect(),
            n_rows: keep.len(),
        }
    }
}

/// A borrowed view of one record.
#[derive(Debug, Clone, Copy)]
pub struct Record<'a> {
    dataset: &'a Dataset,
    index: usize,
}

impl<'a> Record<'a> {
    /// Position of the record in its dataset.
    #[must_use]
    pub fn index(&self) -> usize {
        self.index
    }

    /// Value of a variable in this record.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&'a DataValue> {
        self.dataset.get(name).map(|col| &col[self.index])
    }
}

/// Builder for [`Dataset`], validating shape on [`DatasetBuilder::build`].
#[derive(Debug, Clone, Default)]
pub struct DatasetBuilder {
    columns: Vec<Column>,
}

impl DatasetBuilder {
    /// Add a numeric column.
    #[must_use]
    pub fn numeric(self, name: &str, data: &[f32]) -> Self {
        let values = data.iter().map(|&v| DataValue::Number(v)).collect();
        self.column(name, VariableKind::Numeric, values)
    }

    /// Add a categorical column.
    #[must_use]
    pub fn categorical(self, name: &str, data: &[&str]) -> Self {
        let values = data.iter().map(|&s| DataValue::from(s)).collect();
        self.column(name, VariableKind::Categorical, values)
    }

    /// Add a free-text column.
    #[must_use]
    pub fn text(self, name: &str, data: &[&str]) -> Self {
        let values = data.iter().map(|&s| DataValue::from(s)).collect();
        self.column(name, VariableKind::Text, values)
    }

    /// Add a column of arbitrary values.
    #[must_use]
    pub fn column(mut self, name: &str, kind: VariableKind, values: Vec<DataValue>) -> Self {
        self.columns.push(Column { name: name.to_string(), kind, values });
        self
    }

    /// Validate and build the dataset.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DuplicateVariable`] if a name repeats, or
    /// [`Error::RaggedColumns`] if column lengths differ.
    pub fn build(self) -> Result<Dataset> {
        let n_rows = self.columns.first().map_or(0, |c| c.values.len());
        for (i, column) in self.columns.iter().enumerate() {
            if self.columns[..i].iter().any(|c| c.name == column.name) {
                return Err(Error::DuplicateVariable(column.name.clone()));
            }
            if column.values.len() != n_rows {
                return Err(Error::RaggedColumns {
                    column: column.name.clone(),
                    len: column.values.len(),
                    expected: n_rows,
                });
            }
        }
        Ok(Dataset { columns: self.columns, n_rows })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Dataset {
        Dataset::builder()
            .numeric("x", &[3.0, 1.0, 5.0])
            .categorical("g", &["b", "a", "b"])
            .build()
            .unwrap()
    }

    #[test]
    fn test_from_xy_truncates() {
        let df = Dataset::from_xy(&[1.0, 2.0, 3.0], &[4.0, 5.0]);
        assert_eq!(df.nrow(), 2);
        assert_eq!(df.get_f32("x").unwrap(), vec![1.0, 2.0]);
    }

    #[test]
    fn test_schema_order_and_kinds() {
        let schema = sample().schema();
        let names: Vec<&str> = schema.fields().iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, vec!["x", "g"]);
        assert_eq!(schema.kind_of("g"), Some(VariableKind::Categorical));
        assert!(!schema.contains("missing"));
    }

    #[test]
    fn test_ragged_columns_rejected() {
        let err = Dataset::builder()
            .numeric("x", &[1.0, 2.0])
            .numeric("y", &[1.0])
            .build()
            .unwrap_err();
        assert!(matches!(err, Error::RaggedColumns { len: 1, expected: 2, .. }));
    }

    #[test]
    fn test_duplicate_variable_rejected() {
        let err = Dataset::builder()
            .numeric("x", &[1.0])
            .numeric("x", &[2.0])
            .build()
            .unwrap_err();
        assert!(matches!(err, Error::DuplicateVariable(name) if name == "x"));
    }

    #[test]
    fn test_levels_first_appearance() {
        assert_eq!(sample().levels("g"), vec!["b", "a"]);
        assert!(sample().levels("nope").is_empty());
    }

    #[test]
    fn test_levels_skip_null() {
        let df = Dataset::builder()
            .column(
                "c",
                VariableKind::Categorical,
                vec![DataValue::Null, "z".into(), DataValue::Null],
            )
            .build()
            .unwrap();
        assert_eq!(df.levels("c"), vec!["z"]);
    }

    #[test]
    fn test_records_view() {
        let df = sample();
        let second = df.record(1).unwrap();
        assert_eq!(second.get("x"), Some(&DataValue::Number(1.0)));
        assert_eq!(second.get("g").and_then(DataValue::as_str), Some("a"));
        assert!(df.record(3).is_none());
        assert_eq!(df.records().count(), 3);
    }

    #[test]
    fn test_select_rows() {
        let subset = sample().select_rows(&[2, 0, 9]);
        assert_eq!(subset.nrow(), 2);
        assert_eq!(subset.get_f32("x").unwrap(), vec![5.0, 3.0]);
        assert_eq!(subset.schema(), sample().schema());
    }

    #[test]
    fn test_empty_dataset() {
        let df = Dataset::empty();
        assert!(df.is_empty());
        assert_eq!(df.ncol(), 0);
    }

    #[test]
    fn test_data_value_display() {
        assert_eq!(DataValue::Number(3.0).to_string(), "3");
        assert_eq!(DataValue::Number(2.5).to_string(), "2.5");
        assert_eq!(DataValue::Null.to_string(), "NA");
        assert_eq!(DataValue::from(None::<f32>), DataValue::Null);
    }

    #[test]
    fn test_non_finite_is_not_numeric() {
        assert_eq!(DataValue::Number(f32::NAN).as_f32(), None);
    }
}
