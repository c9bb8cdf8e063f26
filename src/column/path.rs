use std::fmt;

use serde::{Deserialize, Serialize};

/// Ordered list of names locating a column through nested column groups.
///
/// The empty path addresses the root frame itself.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ColumnPath(Vec<String>);

impl ColumnPath {
    pub fn new(names: Vec<String>) -> Self {
        ColumnPath(names)
    }

    /// Path of the root frame
    pub fn root() -> Self {
        ColumnPath(Vec::new())
    }

    /// Single-name path of a top-level column
    pub fn of(name: impl Into<String>) -> Self {
        ColumnPath(vec![name.into()])
    }

    pub fn names(&self) -> &[String] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Name of the addressed column, `None` for the root path
    pub fn name(&self) -> Option<&str> {
        self.0.last().map(String::as_str)
    }

    /// Names of the enclosing groups
    pub fn parent_names(&self) -> &[String] {
        match self.0.split_last() {
            Some((_, parent)) => parent,
            None => &[],
        }
    }

    /// Path of the enclosing group, `None` for the root path
    pub fn parent(&self) -> Option<ColumnPath> {
        if self.0.is_empty() {
            None
        } else {
            Some(ColumnPath(self.parent_names().to_vec()))
        }
    }

    pub fn child(&self, name: impl Into<String>) -> ColumnPath {
        let mut names = self.0.clone();
        names.push(name.into());
        ColumnPath(names)
    }

    /// Whether `self` equals `prefix` or lies underneath it
    pub fn starts_with(&self, prefix: &ColumnPath) -> bool {
        self.0.starts_with(&prefix.0)
    }
}

impl fmt::Display for ColumnPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.join("/"))
    }
}

impl From<&str> for ColumnPath {
    fn from(name: &str) -> Self {
        ColumnPath::of(name)
    }
}

impl From<String> for ColumnPath {
    fn from(name: String) -> Self {
        ColumnPath::of(name)
    }
}

impl From<&String> for ColumnPath {
    fn from(name: &String) -> Self {
        ColumnPath::of(name.clone())
    }
}

impl From<Vec<String>> for ColumnPath {
    fn from(names: Vec<String>) -> Self {
        ColumnPath(names)
    }
}

impl From<Vec<&str>> for ColumnPath {
    fn from(names: Vec<&str>) -> Self {
        ColumnPath(names.into_iter().map(str::to_string).collect())
    }
}

impl From<&[&str]> for ColumnPath {
    fn from(names: &[&str]) -> Self {
        ColumnPath(names.iter().map(|s| s.to_string()).collect())
    }
}

impl<const N: usize> From<[&str; N]> for ColumnPath {
    fn from(names: [&str; N]) -> Self {
        ColumnPath(names.iter().map(|s| s.to_string()).collect())
    }
}

impl From<&ColumnPath> for ColumnPath {
    fn from(path: &ColumnPath) -> Self {
        path.clone()
    }
}
