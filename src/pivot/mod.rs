//! Pivot and gather
//!
//! A pivot turns the distinct values of key columns into result columns. [`Pivot`] works on
//! a whole frame and yields one row; [`PivotGroupBy`] works per group and yields one row per
//! group next to the group keys. Each result cell is computed from the rows that share its
//! key, by one of the terminal operations.
//!
//! Keys become columns in the order they are first encountered. With several key columns,
//! every key column adds one level of column groups. With `inward`, the pivoted columns are
//! additionally nested under a group named after their key column.
//!
//! [`Gather`] is the inverse: it folds columns into key/value column pairs.

mod gather;

pub use gather::Gather;

use std::collections::{HashMap, HashSet};

use crate::aggregation::Aggregator;
use crate::column::{ColumnPath, DataColumn, FrameColumn, ValueColumn};
use crate::dataframe::{ColumnSelector, DataFrame, DataRow};
use crate::error::{Error, Result};
use crate::groupby::GroupBy;
use crate::value::Value;

impl DataFrame {
    /// Starts a pivot of the selected key columns over the whole frame
    pub fn pivot(&self, selector: impl Into<ColumnSelector>) -> Pivot {
        Pivot {
            df: self.clone(),
            selector: selector.into(),
            inward: None,
            default: None,
        }
    }
}

/// Pending pivot of a whole frame
#[derive(Debug, Clone)]
pub struct Pivot {
    df: DataFrame,
    selector: ColumnSelector,
    inward: Option<bool>,
    default: Option<Value>,
}

impl Pivot {
    /// Whether to nest the pivoted columns under their key column name; off by default
    pub fn inward(mut self, inward: bool) -> Self {
        self.inward = Some(inward);
        self
    }

    /// Value used for key combinations that have no rows
    pub fn default(mut self, value: impl Into<Value>) -> Self {
        self.default = Some(value.into());
        self
    }

    /// Groups the rows first, giving one result row per group
    pub fn group_by(self, selector: impl Into<ColumnSelector>) -> Result<PivotGroupBy> {
        Ok(PivotGroupBy {
            grouped: self.df.group_by(selector)?,
            selector: self.selector,
            inward: self.inward,
            default: self.default,
        })
    }

    fn plan(&self) -> PivotPlan<'_> {
        PivotPlan {
            base: DataFrame::empty(1),
            template: &self.df,
            frames: std::slice::from_ref(&self.df),
            selector: &self.selector,
            inward: self.inward.unwrap_or(false),
            default: self.default.as_ref(),
        }
    }

    /// Computes every cell with `body`
    pub fn aggregate<F>(&self, body: F) -> Result<DataFrame>
    where
        F: Fn(&DataFrame) -> Result<Value>,
    {
        self.plan().aggregate(body)
    }

    /// Reduces the column at `path` within every cell
    pub fn aggregate_stat(
        &self,
        path: impl Into<ColumnPath>,
        aggregator: &dyn Aggregator,
    ) -> Result<DataFrame> {
        self.plan().aggregate_stat(&path.into(), aggregator)
    }

    /// `true` where a key has rows, `false` elsewhere
    pub fn matches(&self) -> Result<DataFrame> {
        self.plan().matches()
    }

    /// Number of rows per key
    pub fn count(&self) -> Result<DataFrame> {
        self.plan().count()
    }

    /// Rows per key, as frame columns
    pub fn frames(&self) -> Result<DataFrame> {
        self.plan().frames()
    }

    /// Values of the column at `path`: the value itself for a single row, a list otherwise
    pub fn values(&self, path: impl Into<ColumnPath>) -> Result<DataFrame> {
        self.plan().values(&path.into())
    }

    /// Values of `expression` per row, collected like [`Pivot::values`]
    pub fn with<F>(&self, expression: F) -> Result<DataFrame>
    where
        F: Fn(&DataRow<'_>) -> Value,
    {
        self.plan().with(expression)
    }
}

/// Pending pivot within every group of a [`GroupBy`]
#[derive(Debug, Clone)]
pub struct PivotGroupBy {
    grouped: GroupBy,
    selector: ColumnSelector,
    inward: Option<bool>,
    default: Option<Value>,
}

impl PivotGroupBy {
    pub(crate) fn new(grouped: GroupBy, selector: ColumnSelector) -> Self {
        Self {
            grouped,
            selector,
            inward: None,
            default: None,
        }
    }

    /// Whether to nest the pivoted columns under their key column name; on by default
    pub fn inward(mut self, inward: bool) -> Self {
        self.inward = Some(inward);
        self
    }

    /// Value used for key combinations that have no rows in a group
    pub fn default(mut self, value: impl Into<Value>) -> Self {
        self.default = Some(value.into());
        self
    }

    fn plan(&self) -> PivotPlan<'_> {
        PivotPlan {
            base: self.grouped.keys().clone(),
            template: self.grouped.template(),
            frames: self.grouped.groups().frames(),
            selector: &self.selector,
            inward: self.inward.unwrap_or(true),
            default: self.default.as_ref(),
        }
    }

    pub fn aggregate<F>(&self, body: F) -> Result<DataFrame>
    where
        F: Fn(&DataFrame) -> Result<Value>,
    {
        self.plan().aggregate(body)
    }

    pub fn aggregate_stat(
        &self,
        path: impl Into<ColumnPath>,
        aggregator: &dyn Aggregator,
    ) -> Result<DataFrame> {
        self.plan().aggregate_stat(&path.into(), aggregator)
    }

    pub fn matches(&self) -> Result<DataFrame> {
        self.plan().matches()
    }

    pub fn count(&self) -> Result<DataFrame> {
        self.plan().count()
    }

    pub fn frames(&self) -> Result<DataFrame> {
        self.plan().frames()
    }

    pub fn values(&self, path: impl Into<ColumnPath>) -> Result<DataFrame> {
        self.plan().values(&path.into())
    }

    pub fn with<F>(&self, expression: F) -> Result<DataFrame>
    where
        F: Fn(&DataRow<'_>) -> Value,
    {
        self.plan().with(expression)
    }
}

/// One pivot evaluation: result row `i` is computed from `frames[i]` and appended to row `i`
/// of `base`
struct PivotPlan<'a> {
    base: DataFrame,
    /// Frame the key selector is checked against before any rows are bucketed
    template: &'a DataFrame,
    frames: &'a [DataFrame],
    selector: &'a ColumnSelector,
    inward: bool,
    default: Option<&'a Value>,
}

/// Rows of one frame, bucketed by key
struct Buckets {
    key_names: Vec<String>,
    keys: Vec<Vec<Value>>,
    rows: Vec<HashMap<usize, Vec<usize>>>,
}

impl PivotPlan<'_> {
    fn aggregate<F>(&self, body: F) -> Result<DataFrame>
    where
        F: Fn(&DataFrame) -> Result<Value>,
    {
        self.build(|cell| match cell {
            Some(rows) => body(rows),
            None => Ok(Value::Null),
        })
    }

    fn aggregate_stat(&self, path: &ColumnPath, aggregator: &dyn Aggregator) -> Result<DataFrame> {
        self.build(|cell| match cell {
            Some(rows) => {
                let column = rows.column_at_path(path)?.expect_values()?;
                aggregator.aggregate_columns(&[column])
            }
            None => Ok(Value::Null),
        })
    }

    fn matches(&self) -> Result<DataFrame> {
        self.build(|cell| Ok(Value::Boolean(cell.is_some())))
    }

    fn count(&self) -> Result<DataFrame> {
        self.build(|cell| {
            let count = cell.map_or(0, DataFrame::row_count);
            Ok(Value::Int(i32::try_from(count).unwrap_or(i32::MAX)))
        })
    }

    fn frames(&self) -> Result<DataFrame> {
        self.build(|cell| {
            Ok(Value::Frame(match cell {
                Some(rows) => rows.clone(),
                None => DataFrame::new(),
            }))
        })
    }

    fn values(&self, path: &ColumnPath) -> Result<DataFrame> {
        self.build(|cell| match cell {
            Some(rows) => Ok(one_or_many(rows.column_at_path(path)?.values())),
            None => Ok(Value::Null),
        })
    }

    fn with<F>(&self, expression: F) -> Result<DataFrame>
    where
        F: Fn(&DataRow<'_>) -> Value,
    {
        self.build(|cell| match cell {
            Some(rows) => Ok(one_or_many(rows.rows().map(|row| expression(&row)).collect())),
            None => Ok(Value::Null),
        })
    }

    fn bucket(&self) -> Result<Buckets> {
        let key_names: Vec<String> = self
            .template
            .resolve_columns(self.selector)?
            .iter()
            .map(|(_, column)| column.name().to_string())
            .collect();
        if key_names.is_empty() {
            return Err(Error::InvalidInput("pivot needs at least one key column".to_string()));
        }

        let mut index: HashMap<Vec<Value>, usize> = HashMap::new();
        let mut keys: Vec<Vec<Value>> = Vec::new();
        let mut rows = Vec::with_capacity(self.frames.len());

        for frame in self.frames {
            let resolved = frame.resolve_columns(self.selector)?;
            let columns: Vec<&DataColumn> = resolved.iter().map(|(_, column)| *column).collect();

            let mut by_key: HashMap<usize, Vec<usize>> = HashMap::new();
            for row in 0..frame.row_count() {
                let key = DataFrame::key_at(&columns, row);
                let position = match index.get(&key) {
                    Some(&position) => position,
                    None => {
                        index.insert(key.clone(), keys.len());
                        keys.push(key);
                        keys.len() - 1
                    }
                };
                by_key.entry(position).or_default().push(row);
            }
            rows.push(by_key);
        }

        Ok(Buckets {
            key_names,
            keys,
            rows,
        })
    }

    /// Result path of `key`. Key values name the columns; values that print alike under the
    /// same parent get a `_2`, `_3`, ... suffix.
    fn column_path(
        &self,
        names: &mut ColumnNames,
        key_names: &[String],
        key: &[Value],
    ) -> ColumnPath {
        let mut path = Vec::with_capacity(key.len() * 2);
        for (name, value) in key_names.iter().zip(key) {
            if self.inward {
                path.push(name.clone());
            }
            let unique = names.name_for(&path, value);
            path.push(unique);
        }
        ColumnPath::new(path)
    }

    /// Evaluates `cell` for every (result row, key) pair; `None` marks a key without rows
    fn build<F>(&self, cell: F) -> Result<DataFrame>
    where
        F: Fn(Option<&DataFrame>) -> Result<Value>,
    {
        let buckets = self.bucket()?;
        let mut result = self.base.clone();
        let mut names = ColumnNames::new(&result);

        for (position, key) in buckets.keys.iter().enumerate() {
            let mut cells = Vec::with_capacity(self.frames.len());
            for (frame, by_key) in self.frames.iter().zip(&buckets.rows) {
                let value = match (by_key.get(&position), self.default) {
                    (Some(rows), _) => cell(Some(&frame.pick_rows(rows)))?,
                    (None, Some(default)) => default.clone(),
                    (None, None) => cell(None)?,
                };
                cells.push(value);
            }

            let path = self.column_path(&mut names, &buckets.key_names, key);
            let column = if !cells.is_empty() && cells.iter().all(|v| v.as_frame().is_some()) {
                let frames = cells
                    .into_iter()
                    .filter_map(|v| match v {
                        Value::Frame(frame) => Some(frame),
                        _ => None,
                    })
                    .collect();
                DataColumn::Frame(FrameColumn::new("", frames))
            } else {
                DataColumn::Value(ValueColumn::new("", cells))
            };
            result = result.insert_at_path(column, path)?;
        }

        log::debug!(
            "pivot over {} key columns produced {} columns for {} rows",
            buckets.key_names.len(),
            buckets.keys.len(),
            result.row_count()
        );
        Ok(result)
    }
}

/// Unique column names for key values, per parent group
struct ColumnNames {
    assigned: HashMap<(Vec<String>, Value), String>,
    used: HashMap<Vec<String>, HashSet<String>>,
}

impl ColumnNames {
    fn new(base: &DataFrame) -> Self {
        let top = base.column_names().into_iter().map(str::to_string).collect();
        Self {
            assigned: HashMap::new(),
            used: HashMap::from([(Vec::new(), top)]),
        }
    }

    fn name_for(&mut self, parent: &[String], value: &Value) -> String {
        let slot = (parent.to_vec(), value.clone());
        if let Some(name) = self.assigned.get(&slot) {
            return name.clone();
        }
        let used = self.used.entry(parent.to_vec()).or_default();
        let preferred = value.to_string();
        let mut name = preferred.clone();
        let mut k = 2;
        while used.contains(&name) {
            name = format!("{}_{}", preferred, k);
            k += 1;
        }
        used.insert(name.clone());
        self.assigned.insert(slot, name.clone());
        name
    }
}

fn one_or_many(mut values: Vec<Value>) -> Value {
    if values.len() == 1 {
        values.swap_remove(0)
    } else {
        Value::List(values)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn visits() -> DataFrame {
        DataFrame::from_columns(vec![
            DataColumn::value("name", vec!["Alice", "Bob", "Alice", "Alice"]),
            DataColumn::value("city", vec!["Moscow", "Paris", "Paris", "Moscow"]),
            DataColumn::value("days", vec![3, 5, 2, 4]),
        ])
        .unwrap()
    }

    #[test]
    fn keys_become_columns_in_encounter_order() {
        let counts = visits().pivot("city").count().unwrap();
        assert_eq!(counts.row_count(), 1);
        assert_eq!(counts.column_names(), vec!["Moscow", "Paris"]);
        assert_eq!(counts.column("Moscow").unwrap().get(0).unwrap(), Value::Int(2));
    }

    #[test]
    fn inward_nests_under_key_name() {
        let counts = visits().pivot("city").inward(true).count().unwrap();
        assert_eq!(counts.column_names(), vec!["city"]);
        let path = ColumnPath::from(["city", "Paris"]);
        assert_eq!(counts.column_at_path(&path).unwrap().get(0).unwrap(), Value::Int(2));
    }

    #[test]
    fn missing_combinations_use_the_default() {
        let grouped = visits().group_by("name").unwrap();
        let days = grouped
            .pivot("city")
            .inward(false)
            .default(0)
            .values("days")
            .unwrap();
        assert_eq!(days.column_names(), vec!["name", "Moscow", "Paris"]);
        assert_eq!(
            days.column("Moscow").unwrap().values(),
            vec![Value::List(vec![Value::Int(3), Value::Int(4)]), Value::Int(0)]
        );
    }
}
