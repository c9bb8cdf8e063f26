use crate::column::{ColumnPath, ValueColumn};
use crate::dataframe::{ColumnSelector, DataFrame, DataRow};
use crate::error::Result;
use crate::types::ColumnType;
use crate::value::Value;

use super::{Aggregator, Stat};

impl DataFrame {
    /// Reduces every selected column on its own.
    ///
    /// The result has one row and mirrors the selected paths, so nested selections stay
    /// nested.
    pub fn aggregate_for(
        &self,
        selector: impl Into<ColumnSelector>,
        aggregator: &dyn Aggregator,
    ) -> Result<DataFrame> {
        let mut result = DataFrame::empty(1);
        for (path, column) in self.resolve_columns(selector)? {
            let value = aggregator.aggregate_columns(&[column.expect_values()?])?;
            result = result.insert_at_path(ValueColumn::new(column.name(), vec![value]), path)?;
        }
        Ok(result)
    }

    /// Reduces the selected columns together, as one sequence
    pub fn aggregate_all(
        &self,
        selector: impl Into<ColumnSelector>,
        aggregator: &dyn Aggregator,
    ) -> Result<Value> {
        let selected = self.resolve_columns(selector)?;
        let columns = selected
            .iter()
            .map(|(_, column)| column.expect_values())
            .collect::<Result<Vec<_>>>()?;
        aggregator.aggregate_columns(&columns)
    }

    /// Evaluates `expression` per row and reduces the results
    pub fn aggregate_of<F>(&self, expression: F, aggregator: &dyn Aggregator) -> Result<Value>
    where
        F: Fn(&DataRow<'_>) -> Value,
    {
        let values: Vec<Value> = self.rows().map(|row| expression(&row)).collect();
        aggregator.aggregate(&values, &ColumnType::infer(&values))
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

    /// Mean of every number column, at any depth
    pub fn mean(&self) -> Result<DataFrame> {
        self.aggregate_accepted(&Stat::mean())
    }

    /// Sum of every number column, at any depth
    pub fn sum(&self) -> Result<DataFrame> {
        self.aggregate_accepted(&Stat::sum())
    }

    /// Minimum of every comparable column, at any depth
    pub fn min(&self) -> Result<DataFrame> {
        self.aggregate_accepted(&Stat::min())
    }

    /// Maximum of every comparable column, at any depth
    pub fn max(&self) -> Result<DataFrame> {
        self.aggregate_accepted(&Stat::max())
    }

    /// Sample standard deviation of every number column, at any depth
    pub fn std(&self) -> Result<DataFrame> {
        self.aggregate_accepted(&Stat::std(1))
    }

    /// Mean of `expression` over all rows
    pub fn mean_of<F>(&self, expression: F) -> Result<f64>
    where
        F: Fn(&DataRow<'_>) -> Value,
    {
        Ok(self
            .aggregate_of(expression, &Stat::mean())?
            .as_f64()
            .unwrap_or(f64::NAN))
    }

    pub fn sum_of<F>(&self, expression: F) -> Result<Value>
    where
        F: Fn(&DataRow<'_>) -> Value,
    {
        self.aggregate_of(expression, &Stat::sum())
    }

    pub fn max_of<F>(&self, expression: F) -> Result<Option<Value>>
    where
        F: Fn(&DataRow<'_>) -> Value,
    {
        let result = self.aggregate_of(expression, &Stat::max())?;
        Ok((!result.is_null()).then_some(result))
    }

    pub fn min_of<F>(&self, expression: F) -> Result<Option<Value>>
    where
        F: Fn(&DataRow<'_>) -> Value,
    {
        let result = self.aggregate_of(expression, &Stat::min())?;
        Ok((!result.is_null()).then_some(result))
    }

    /// Paths of value columns at any depth that `aggregator` accepts
    pub(crate) fn accepted_paths(&self, aggregator: &dyn Aggregator) -> Result<Vec<ColumnPath>> {
        Ok(self
            .resolve_columns(ColumnSelector::leaves())?
            .into_iter()
            .filter(|(_, column)| {
                column
                    .as_value_column()
                    .map_or(false, |c| aggregator.accepts(c.column_type()))
            })
            .map(|(path, _)| path)
            .collect())
    }

    fn aggregate_accepted(&self, aggregator: &dyn Aggregator) -> Result<DataFrame> {
        let paths = self.accepted_paths(aggregator)?;
        self.aggregate_for(paths, aggregator)
    }
}

impl DataRow<'_> {
    /// Reduces the cells of the top-level value columns accepted by `aggregator`
    pub fn row_aggregate(&self, aggregator: &dyn Aggregator) -> Result<Value> {
        self.reduce_cells(aggregator, false)
    }

    fn reduce_cells(&self, aggregator: &dyn Aggregator, numbers_only: bool) -> Result<Value> {
        let mut values = Vec::new();
        let mut column_type: Option<ColumnType> = None;
        for column in self.frame().columns() {
            let Some(column) = column.as_value_column() else {
                continue;
            };
            let accepted = aggregator.accepts(column.column_type())
                && (!numbers_only || column.column_type().data_type.is_number());
            if !accepted {
                continue;
            }
            values.push(column.values()[self.index()].clone());
            column_type = Some(match column_type {
                Some(t) => t.common_supertype(column.column_type()),
                None => column.column_type().clone(),
            });
        }
        let column_type = column_type.unwrap_or_else(|| ColumnType::infer(&values));
        aggregator.aggregate(&values, &column_type)
    }

    pub fn row_mean(&self) -> Result<f64> {
        Ok(self.row_aggregate(&Stat::mean())?.as_f64().unwrap_or(f64::NAN))
    }

    pub fn row_std(&self) -> Result<f64> {
        Ok(self.row_aggregate(&Stat::std(1))?.as_f64().unwrap_or(f64::NAN))
    }

    pub fn row_sum(&self) -> Result<Value> {
        self.row_aggregate(&Stat::sum())
    }

    /// Smallest number in the row
    pub fn row_min(&self) -> Result<Option<Value>> {
        let result = self.reduce_cells(&Stat::min(), true)?;
        Ok((!result.is_null()).then_some(result))
    }

    /// Largest number in the row
    pub fn row_max(&self) -> Result<Option<Value>> {
        let result = self.reduce_cells(&Stat::max(), true)?;
        Ok((!result.is_null()).then_some(result))
    }
}
