//! Grouping rows by key columns
//!
//! A [`GroupBy`] pairs a frame of distinct keys with a frame column of the matching rows.
//! Groups appear in the order their key first appears in the source frame.

use std::collections::HashMap;

use crate::aggregation::{Aggregator, Stat};
use crate::column::{ColumnPath, DataColumn, FrameColumn, ValueColumn};
use crate::dataframe::{concat, ColumnSelector, DataFrame, DataRow};
use crate::error::{Error, Result};
use crate::pivot::PivotGroupBy;
use crate::value::Value;

/// Name of the frame column holding the groups
pub const GROUP_COLUMN: &str = "group";

/// Rows partitioned by key
#[derive(Debug, Clone, PartialEq)]
pub struct GroupBy {
    keys: DataFrame,
    groups: FrameColumn,
    /// Zero-row frame with the columns of the groups
    template: DataFrame,
}

impl DataFrame {
    /// Partitions the rows by the values of the selected columns.
    ///
    /// Key equality is structural. Key columns become top-level columns of
    /// [`GroupBy::keys`].
    pub fn group_by(&self, selector: impl Into<ColumnSelector>) -> Result<GroupBy> {
        let keys = self.key_columns(selector)?;
        if keys.is_empty() {
            return Err(Error::InvalidInput("group_by needs at least one key column".to_string()));
        }

        let mut index: HashMap<Vec<Value>, usize> = HashMap::new();
        let mut buckets: Vec<Vec<usize>> = Vec::new();
        for row in 0..self.row_count() {
            let key = DataFrame::key_at(&keys, row);
            match index.get(&key) {
                Some(&group) => buckets[group].push(row),
                None => {
                    index.insert(key, buckets.len());
                    buckets.push(vec![row]);
                }
            }
        }

        let first_rows: Vec<usize> = buckets.iter().map(|rows| rows[0]).collect();
        let key_frame = DataFrame::with_row_count(
            keys.iter().map(|c| c.pick(&first_rows)).collect(),
            buckets.len(),
        )?;
        let groups = buckets.iter().map(|rows| self.pick_rows(rows)).collect();
        log::debug!(
            "grouped {} rows into {} groups",
            self.row_count(),
            buckets.len()
        );
        Ok(GroupBy {
            keys: key_frame,
            groups: FrameColumn::new(GROUP_COLUMN, groups),
            template: self.take(0),
        })
    }
}

impl GroupBy {
    /// Pairs keys with groups; both must have the same length
    pub fn new(keys: DataFrame, groups: FrameColumn) -> Result<Self> {
        if keys.row_count() != groups.len() {
            return Err(Error::InconsistentRowCount {
                expected: keys.row_count(),
                found: groups.len(),
            });
        }
        let template = groups
            .frames()
            .first()
            .map_or_else(DataFrame::new, |group| group.take(0));
        Ok(Self {
            keys,
            groups,
            template,
        })
    }

    /// One row per distinct key
    pub fn keys(&self) -> &DataFrame {
        &self.keys
    }

    pub fn groups(&self) -> &FrameColumn {
        &self.groups
    }

    /// Zero-row frame shaped like the groups, used to check selectors up front
    pub(crate) fn template(&self) -> &DataFrame {
        &self.template
    }

    /// Number of groups
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Key row and rows of group `index`
    pub fn get(&self, index: usize) -> Result<(DataRow<'_>, &DataFrame)> {
        Ok((self.keys.row(index)?, self.groups.get(index)?))
    }

    pub fn iter(&self) -> impl Iterator<Item = (DataRow<'_>, &DataFrame)> + '_ {
        self.keys.rows().zip(self.groups.iter())
    }

    /// Keys plus a `count` column with the size of each group
    pub fn size(&self) -> Result<DataFrame> {
        let counts = self
            .groups
            .iter()
            .map(|g| Value::Int(i32::try_from(g.row_count()).unwrap_or(i32::MAX)))
            .collect();
        self.keys.add(ValueColumn::new("count", counts))
    }

    /// Alias of [`GroupBy::size`]
    pub fn count(&self) -> Result<DataFrame> {
        self.size()
    }

    /// Groups for which `predicate` holds
    pub fn filter<F>(&self, predicate: F) -> GroupBy
    where
        F: Fn(&DataRow<'_>, &DataFrame) -> bool,
    {
        let kept: Vec<usize> = self
            .iter()
            .enumerate()
            .filter(|(_, (key, group))| predicate(key, *group))
            .map(|(i, _)| i)
            .collect();
        self.pick(&kept)
    }

    /// Groups ordered by their keys
    pub fn sort_by_keys(&self) -> Result<GroupBy> {
        let columns: Vec<&DataColumn> = self.keys.columns().iter().collect();
        let mut order: Vec<usize> = (0..self.len()).collect();
        order.sort_by(|&a, &b| {
            crate::dataframe::compare_keys(
                &DataFrame::key_at(&columns, a),
                &DataFrame::key_at(&columns, b),
            )
        });
        Ok(self.pick(&order))
    }

    fn pick(&self, indices: &[usize]) -> GroupBy {
        GroupBy {
            keys: self.keys.pick_rows(indices),
            groups: self.groups.pick(indices),
            template: self.template.clone(),
        }
    }

    /// All groups stacked back into one frame, in group order
    pub fn concat(&self) -> Result<DataFrame> {
        concat(self.groups.frames())
    }

    /// Keys plus the groups as a frame column called `name`
    pub fn to_data_frame(&self, name: &str) -> Result<DataFrame> {
        self.keys.add(self.groups.rename(name))
    }

    /// Runs `body` on every group and appends the named results to the keys.
    ///
    /// Result names may differ between groups; a name missing from a group yields null.
    pub fn aggregate<F>(&self, body: F) -> Result<DataFrame>
    where
        F: Fn(&DataFrame) -> Result<Vec<(String, Value)>>,
    {
        let mut names: Vec<String> = Vec::new();
        let mut rows: Vec<Vec<(String, Value)>> = Vec::with_capacity(self.len());
        for group in self.groups.iter() {
            let results = body(group)?;
            for (name, _) in &results {
                if !names.contains(name) {
                    names.push(name.clone());
                }
            }
            rows.push(results);
        }

        let mut df = self.keys.clone();
        for name in names {
            let values = rows
                .iter()
                .map(|results| {
                    results
                        .iter()
                        .find(|(n, _)| *n == name)
                        .map_or(Value::Null, |(_, v)| v.clone())
                })
                .collect();
            df = df.add(ValueColumn::new(name, values))?;
        }
        Ok(df)
    }

    /// Reduces the selected columns within every group and appends them to the keys
    pub fn aggregate_for(
        &self,
        selector: impl Into<ColumnSelector>,
        aggregator: &dyn Aggregator,
    ) -> Result<DataFrame> {
        let selector = selector.into();
        if self.groups.is_empty() {
            let empty = self.template.aggregate_for(&selector, aggregator)?.take(0);
            return self.append_results(std::slice::from_ref(&empty));
        }
        self.template.resolve(&selector)?;
        let per_group = self
            .groups
            .iter()
            .map(|group| group.aggregate_for(&selector, aggregator))
            .collect::<Result<Vec<_>>>()?;
        self.append_results(&per_group)
    }

    fn append_results(&self, per_group: &[DataFrame]) -> Result<DataFrame> {
        let results = concat(per_group)?;
        let mut df = self.keys.clone();
        for column in results.columns() {
            df = df.add(column.clone())?;
        }
        Ok(df)
    }

    pub fn mean_for(&self, selector: impl Into<ColumnSelector>) -> Result<DataFrame> {
        self.aggregate_for(selector, &Stat::mean())
    }

    pub fn sum_for(&self, selector: impl Into<ColumnSelector>) -> Result<DataFrame> {
        self.aggregate_for(selector, &Stat::sum())
    }

    pub fn min_for(&self, selector: impl Into<ColumnSelector>) -> Result<DataFrame> {
        self.aggregate_for(selector, &Stat::min())
    }

    pub fn max_for(&self, selector: impl Into<ColumnSelector>) -> Result<DataFrame> {
        self.aggregate_for(selector, &Stat::max())
    }

    pub fn std_for(&self, selector: impl Into<ColumnSelector>, ddof: u32) -> Result<DataFrame> {
        self.aggregate_for(selector, &Stat::std(ddof))
    }

    pub fn median_for(&self, selector: impl Into<ColumnSelector>) -> Result<DataFrame> {
        self.aggregate_for(selector, &Stat::median())
    }

    /// Mean of every number column outside the keys
    pub fn mean(&self) -> Result<DataFrame> {
        self.aggregate_non_keys(&Stat::mean())
    }

    /// Sum of every number column outside the keys
    pub fn sum(&self) -> Result<DataFrame> {
        self.aggregate_non_keys(&Stat::sum())
    }

    /// Minimum of every comparable column outside the keys
    pub fn min(&self) -> Result<DataFrame> {
        self.aggregate_non_keys(&Stat::min())
    }

    /// Maximum of every comparable column outside the keys
    pub fn max(&self) -> Result<DataFrame> {
        self.aggregate_non_keys(&Stat::max())
    }

    fn aggregate_non_keys(&self, aggregator: &dyn Aggregator) -> Result<DataFrame> {
        let paths: Vec<ColumnPath> = self
            .template
            .accepted_paths(aggregator)?
            .into_iter()
            .filter(|p| {
                p.names()
                    .first()
                    .map_or(true, |top| !self.keys.contains_column(top))
            })
            .collect();
        self.aggregate_for(paths, aggregator)
    }

    /// Starts a pivot of the selected columns within every group
    pub fn pivot(&self, selector: impl Into<ColumnSelector>) -> PivotGroupBy {
        PivotGroupBy::new(self.clone(), selector.into())
    }
}
