use std::fmt;
use std::sync::Arc;

use crate::column::{ColumnPath, DataColumn, ValueColumn};
use crate::dataframe::{ColumnSelector, DataFrame};
use crate::error::{Error, Result};
use crate::value::Value;

type ValueFilter = Arc<dyn Fn(&Value) -> bool + Send + Sync>;
type KeyTransform = Arc<dyn Fn(&str) -> Value + Send + Sync>;
type ValueTransform = Arc<dyn Fn(&Value) -> Value + Send + Sync>;

impl DataFrame {
    /// Starts folding the selected columns into key/value pairs
    pub fn gather(&self, selector: impl Into<ColumnSelector>) -> Gather {
        Gather {
            df: self.clone(),
            selector: selector.into(),
            filter: None,
            explode_lists: false,
            map_keys: None,
            map_values: None,
        }
    }
}

/// Pending gather.
///
/// Every (row, column) cell becomes one output row holding the column name as key and the
/// cell as value, next to the unselected columns of the original row. Cells rejected by the
/// filter are skipped, and rows left without any pair are dropped.
#[derive(Clone)]
pub struct Gather {
    df: DataFrame,
    selector: ColumnSelector,
    filter: Option<ValueFilter>,
    explode_lists: bool,
    map_keys: Option<KeyTransform>,
    map_values: Option<ValueTransform>,
}

impl fmt::Debug for Gather {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Gather")
            .field("selector", &self.selector)
            .field("filtered", &self.filter.is_some())
            .field("explode_lists", &self.explode_lists)
            .finish()
    }
}

impl Gather {
    /// Keeps only values matching `predicate`; repeated calls must all match
    pub fn filter<F>(mut self, predicate: F) -> Self
    where
        F: Fn(&Value) -> bool + Send + Sync + 'static,
    {
        let combined: ValueFilter = match self.filter.take() {
            Some(previous) => Arc::new(move |v: &Value| previous(v) && predicate(v)) as ValueFilter,
            None => Arc::new(predicate) as ValueFilter,
        };
        self.filter = Some(combined);
        self
    }

    /// Skips null values
    pub fn not_null(self) -> Self {
        self.filter(|v| !v.is_null())
    }

    /// Emits one pair per list element instead of one per list. Filters see the elements.
    pub fn explode_lists(mut self) -> Self {
        self.explode_lists = true;
        self
    }

    /// Transforms column names into keys
    pub fn map_keys<F>(mut self, transform: F) -> Self
    where
        F: Fn(&str) -> Value + Send + Sync + 'static,
    {
        self.map_keys = Some(Arc::new(transform));
        self
    }

    /// Transforms the emitted values
    pub fn map_values<F>(mut self, transform: F) -> Self
    where
        F: Fn(&Value) -> Value + Send + Sync + 'static,
    {
        self.map_values = Some(Arc::new(transform));
        self
    }

    /// Appends a `key` column with the keys and a `value` column with the values
    pub fn into(self, key: &str, value: &str) -> Result<DataFrame> {
        self.materialize(Some(key), Some(value))
    }

    /// Appends only the key column
    pub fn keys_into(self, key: &str) -> Result<DataFrame> {
        self.materialize(Some(key), None)
    }

    /// Appends only the value column
    pub fn values_into(self, value: &str) -> Result<DataFrame> {
        self.materialize(None, Some(value))
    }

    fn materialize(&self, key_name: Option<&str>, value_name: Option<&str>) -> Result<DataFrame> {
        let selected = self.df.resolve_columns(&self.selector)?;
        if selected.is_empty() {
            return Err(Error::InvalidInput("gather needs at least one column".to_string()));
        }
        let paths: Vec<ColumnPath> = selected.iter().map(|(path, _)| path.clone()).collect();
        let columns: Vec<&DataColumn> = selected.iter().map(|(_, column)| *column).collect();
        let keys: Vec<Value> = columns
            .iter()
            .map(|column| match &self.map_keys {
                Some(transform) => transform(column.name()),
                None => Value::from(column.name()),
            })
            .collect();

        let mut rows = Vec::new();
        let mut out_keys = Vec::new();
        let mut out_values = Vec::new();
        for row in 0..self.df.row_count() {
            for (column, key) in columns.iter().zip(&keys) {
                let cell = column.value_at(row);
                let items = match cell {
                    Value::List(items) if self.explode_lists => items,
                    other => vec![other],
                };
                for item in items {
                    if self.filter.as_ref().map_or(false, |keep| !keep(&item)) {
                        continue;
                    }
                    rows.push(row);
                    out_keys.push(key.clone());
                    out_values.push(match &self.map_values {
                        Some(transform) => transform(&item),
                        None => item,
                    });
                }
            }
        }

        let (remaining, _) = self.df.remove_paths(&paths, true)?;
        let mut df = remaining.pick_rows(&rows);
        if let Some(name) = key_name {
            df = df.add(ValueColumn::new(name, out_keys))?;
        }
        if let Some(name) = value_name {
            df = df.add(ValueColumn::new(name, out_values))?;
        }
        log::debug!(
            "gathered {} columns over {} rows into {} rows",
            paths.len(),
            self.df.row_count(),
            df.row_count()
        );
        Ok(df)
    }
}
