use std::collections::HashSet;
use std::fmt;
use std::sync::Arc;

use regex::Regex;

use crate::column::{ColumnKind, ColumnPath, DataColumn};
use crate::error::{Error, Result};
use crate::types::ColumnType;

use super::DataFrame;

type ResolveFn = dyn Fn(&DataFrame) -> Result<Vec<ColumnPath>> + Send + Sync;

/// A column selection: a function from a frame to an ordered list of column paths.
///
/// Every way of naming columns converges on this one form. Plain names, arrays of names and
/// [`ColumnPath`]s convert into a selector, so most operations accept `"a"`, `["a", "b"]` or
/// a composed selector alike.
#[derive(Clone)]
pub struct ColumnSelector {
    resolve: Arc<ResolveFn>,
}

impl ColumnSelector {
    pub fn new<F>(resolve: F) -> Self
    where
        F: Fn(&DataFrame) -> Result<Vec<ColumnPath>> + Send + Sync + 'static,
    {
        Self {
            resolve: Arc::new(resolve),
        }
    }

    /// Runs the selection without validating the result
    pub fn select_paths(&self, df: &DataFrame) -> Result<Vec<ColumnPath>> {
        (self.resolve)(df)
    }

    /// Every top-level column
    pub fn all() -> Self {
        Self::by_predicate(|_| true)
    }

    /// Top-level columns by name, in the given order
    pub fn names<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let paths: Vec<ColumnPath> = names.into_iter().map(|n| ColumnPath::of(n)).collect();
        Self::new(move |_| Ok(paths.clone()))
    }

    pub fn paths<I, P>(paths: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<ColumnPath>,
    {
        let paths: Vec<ColumnPath> = paths.into_iter().map(Into::into).collect();
        Self::new(move |_| Ok(paths.clone()))
    }

    /// Top-level columns matching `predicate`
    pub fn by_predicate<F>(predicate: F) -> Self
    where
        F: Fn(&DataColumn) -> bool + Send + Sync + 'static,
    {
        Self::new(move |df| {
            Ok(df
                .columns()
                .iter()
                .filter(|c| predicate(c))
                .map(|c| ColumnPath::of(c.name()))
                .collect())
        })
    }

    pub fn value_cols() -> Self {
        Self::by_predicate(|c| c.kind() == ColumnKind::Value)
    }

    pub fn col_groups() -> Self {
        Self::by_predicate(|c| c.kind() == ColumnKind::Group)
    }

    pub fn frame_cols() -> Self {
        Self::by_predicate(|c| c.kind() == ColumnKind::Frame)
    }

    /// Top-level value columns whose type is a subtype of `column_type`
    pub fn of_type(column_type: ColumnType) -> Self {
        Self::by_predicate(move |c| c.is_value_column() && c.is_subtype_of(&column_type))
    }

    /// Top-level columns whose name matches `pattern`
    pub fn name_matches(pattern: &str) -> Result<Self> {
        let regex = Regex::new(pattern)?;
        Ok(Self::by_predicate(move |c| regex.is_match(c.name())))
    }

    pub fn name_contains(text: impl Into<String>) -> Self {
        let text = text.into();
        Self::by_predicate(move |c| c.name().contains(text.as_str()))
    }

    /// Siblings from `from` to `to`, both inclusive, in frame order
    pub fn range(from: impl Into<ColumnPath>, to: impl Into<ColumnPath>) -> Self {
        let from = from.into();
        let to = to.into();
        Self::new(move |df| {
            if from.parent_names() != to.parent_names() {
                return Err(Error::ParentMismatch {
                    first: from.to_string(),
                    second: to.to_string(),
                });
            }
            let parent = df.frame_at(from.parent_names())?;
            let position = |path: &ColumnPath| {
                path.name()
                    .and_then(|name| parent.position_of(name))
                    .ok_or_else(|| Error::ColumnNotFound(path.to_string()))
            };
            let (a, b) = (position(&from)?, position(&to)?);
            let (start, end) = if a <= b { (a, b) } else { (b, a) };
            let base = ColumnPath::new(from.parent_names().to_vec());
            Ok(parent.columns()[start..=end]
                .iter()
                .map(|c| base.child(c.name()))
                .collect())
        })
    }

    /// Children of the group at `group`
    pub fn children_of(group: impl Into<ColumnPath>) -> Self {
        let group = group.into();
        Self::new(move |df| {
            let frame = df.frame_at(group.names())?;
            Ok(frame.columns().iter().map(|c| group.child(c.name())).collect())
        })
    }

    /// Value and frame columns at any depth, depth-first in frame order
    pub fn leaves() -> Self {
        Self::new(|df| {
            let mut paths = Vec::new();
            collect_leaves(df, &ColumnPath::root(), &mut paths);
            Ok(paths)
        })
    }

    /// Paths of `self` followed by paths of `other`
    pub fn and(self, other: impl Into<ColumnSelector>) -> Self {
        let other = other.into();
        Self::new(move |df| {
            let mut paths = self.select_paths(df)?;
            paths.extend(other.select_paths(df)?);
            Ok(paths)
        })
    }

    /// Paths of `self` that are neither in `other` nor underneath one of its paths
    pub fn except(self, other: impl Into<ColumnSelector>) -> Self {
        let other = other.into();
        Self::new(move |df| {
            let excluded = other.select_paths(df)?;
            Ok(self
                .select_paths(df)?
                .into_iter()
                .filter(|p| !excluded.iter().any(|e| p.starts_with(e)))
                .collect())
        })
    }

    /// Drops repeated paths, keeping the first occurrence
    pub fn distinct(self) -> Self {
        Self::new(move |df| {
            let mut seen = HashSet::new();
            Ok(self
                .select_paths(df)?
                .into_iter()
                .filter(|p| seen.insert(p.clone()))
                .collect())
        })
    }
}

fn collect_leaves(df: &DataFrame, base: &ColumnPath, out: &mut Vec<ColumnPath>) {
    for column in df.columns() {
        let path = base.child(column.name());
        match column {
            DataColumn::Group(group) => collect_leaves(group.frame(), &path, out),
            _ => out.push(path),
        }
    }
}

impl fmt::Debug for ColumnSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ColumnSelector")
    }
}

impl From<&str> for ColumnSelector {
    fn from(name: &str) -> Self {
        ColumnSelector::names([name])
    }
}

impl From<String> for ColumnSelector {
    fn from(name: String) -> Self {
        ColumnSelector::names([name])
    }
}

impl From<ColumnPath> for ColumnSelector {
    fn from(path: ColumnPath) -> Self {
        ColumnSelector::paths([path])
    }
}

impl From<Vec<ColumnPath>> for ColumnSelector {
    fn from(paths: Vec<ColumnPath>) -> Self {
        ColumnSelector::paths(paths)
    }
}

impl<const N: usize> From<[&str; N]> for ColumnSelector {
    fn from(names: [&str; N]) -> Self {
        ColumnSelector::names(names)
    }
}

impl From<Vec<&str>> for ColumnSelector {
    fn from(names: Vec<&str>) -> Self {
        ColumnSelector::names(names)
    }
}

impl From<&[&str]> for ColumnSelector {
    fn from(names: &[&str]) -> Self {
        ColumnSelector::names(names.iter().copied())
    }
}

impl From<&ColumnSelector> for ColumnSelector {
    fn from(selector: &ColumnSelector) -> Self {
        selector.clone()
    }
}

impl DataFrame {
    /// Resolves `selector` against this frame.
    ///
    /// Every path must exist, and no path may appear twice unless the selector was made
    /// [`distinct`](ColumnSelector::distinct).
    pub fn resolve(&self, selector: impl Into<ColumnSelector>) -> Result<Vec<ColumnPath>> {
        let paths = selector.into().select_paths(self)?;
        let mut seen = HashSet::with_capacity(paths.len());
        for path in &paths {
            self.column_at_path(path)?;
            if !seen.insert(path) {
                return Err(Error::DuplicateColumnPath(path.to_string()));
            }
        }
        Ok(paths)
    }

    /// Resolved columns, in selection order
    pub fn resolve_columns(
        &self,
        selector: impl Into<ColumnSelector>,
    ) -> Result<Vec<(ColumnPath, &DataColumn)>> {
        self.resolve(selector)?
            .into_iter()
            .map(|path| {
                let column = self.column_at_path(&path)?;
                Ok((path, column))
            })
            .collect()
    }
}
