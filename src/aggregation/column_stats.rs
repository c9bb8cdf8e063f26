use crate::column::ValueColumn;
use crate::config::AggregateOptions;
use crate::error::{Error, Result};
use crate::value::Value;

use super::{Aggregator, Stat};

impl ValueColumn {
    /// Reduces this column with any aggregator
    pub fn aggregate(&self, aggregator: &dyn Aggregator) -> Result<Value> {
        aggregator.aggregate(self.values(), self.column_type())
    }

    /// Smallest value; fails with [`Error::EmptyResult`] when there is none
    pub fn min(&self) -> Result<Value> {
        self.min_with(&AggregateOptions::default())
    }

    pub fn min_with(&self, options: &AggregateOptions) -> Result<Value> {
        self.min_or_none_with(options)?
            .ok_or_else(|| self.empty_result("min"))
    }

    pub fn min_or_none(&self) -> Result<Option<Value>> {
        self.min_or_none_with(&AggregateOptions::default())
    }

    pub fn min_or_none_with(&self, options: &AggregateOptions) -> Result<Option<Value>> {
        self.present(Stat::min().with_options(options))
    }

    /// Largest value; fails with [`Error::EmptyResult`] when there is none
    pub fn max(&self) -> Result<Value> {
        self.max_with(&AggregateOptions::default())
    }

    pub fn max_with(&self, options: &AggregateOptions) -> Result<Value> {
        self.max_or_none_with(options)?
            .ok_or_else(|| self.empty_result("max"))
    }

    pub fn max_or_none(&self) -> Result<Option<Value>> {
        self.max_or_none_with(&AggregateOptions::default())
    }

    pub fn max_or_none_with(&self, options: &AggregateOptions) -> Result<Option<Value>> {
        self.present(Stat::max().with_options(options))
    }

    /// Sum in the widest number kind of the column; zero when empty
    pub fn sum(&self) -> Result<Value> {
        self.sum_with(&AggregateOptions::default())
    }

    pub fn sum_with(&self, options: &AggregateOptions) -> Result<Value> {
        self.aggregate(&Stat::sum().with_options(options))
    }

    /// Arithmetic mean; NaN when empty
    pub fn mean(&self) -> Result<f64> {
        self.mean_with(&AggregateOptions::default())
    }

    pub fn mean_with(&self, options: &AggregateOptions) -> Result<f64> {
        self.double(Stat::mean().with_options(options))
    }

    /// Standard deviation with `ddof = 1`; NaN when fewer than two values
    pub fn std(&self) -> Result<f64> {
        self.std_with(&AggregateOptions::default())
    }

    pub fn std_with(&self, options: &AggregateOptions) -> Result<f64> {
        self.double(Stat::std(options.ddof).with_options(options))
    }

    pub fn median(&self) -> Result<Option<Value>> {
        self.median_with(&AggregateOptions::default())
    }

    pub fn median_with(&self, options: &AggregateOptions) -> Result<Option<Value>> {
        self.present(Stat::median().with_options(options))
    }

    pub fn percentile(&self, percentile: f64) -> Result<Option<Value>> {
        self.percentile_with(percentile, &AggregateOptions::default())
    }

    pub fn percentile_with(&self, percentile: f64, options: &AggregateOptions) -> Result<Option<Value>> {
        self.present(Stat::percentile(percentile).with_options(options))
    }

    /// Number of non-null values
    pub fn count(&self) -> usize {
        self.iter().filter(|v| !v.is_null()).count()
    }

    fn present(&self, stat: Stat) -> Result<Option<Value>> {
        let result = self.aggregate(&stat)?;
        Ok((!result.is_null()).then_some(result))
    }

    fn double(&self, stat: Stat) -> Result<f64> {
        Ok(self.aggregate(&stat)?.as_f64().unwrap_or(f64::NAN))
    }

    fn empty_result(&self, stat: &str) -> Error {
        Error::EmptyResult(format!("{}() of column '{}' without values", stat, self.name()))
    }
}
