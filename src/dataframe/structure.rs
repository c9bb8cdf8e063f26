//! Operations that reshape the column tree without touching row data

use crate::column::{ColumnGroup, ColumnPath, DataColumn, Origin};
use crate::error::{Error, Result};

use super::tree::check_disjoint;
use super::{ColumnSelector, DataFrame};

impl DataFrame {
    /// Selected columns as top-level columns, in selection order
    pub fn select(&self, selector: impl Into<ColumnSelector>) -> Result<DataFrame> {
        let columns = self
            .resolve_columns(selector)?
            .into_iter()
            .map(|(_, column)| column.clone())
            .collect();
        DataFrame::with_row_count(columns, self.row_count)
    }

    /// Frame without the selected columns. Groups left empty are removed too.
    pub fn remove(&self, selector: impl Into<ColumnSelector>) -> Result<DataFrame> {
        let paths = self.resolve(selector)?;
        // a path under another selected path goes away with its ancestor
        let outermost: Vec<ColumnPath> = paths
            .iter()
            .filter(|p| !paths.iter().any(|q| q != *p && p.starts_with(q)))
            .cloned()
            .collect();
        let (df, _) = self.remove_paths(&outermost, true)?;
        Ok(df)
    }

    /// Renames the column at `path`, keeping its position
    pub fn rename(&self, path: impl Into<ColumnPath>, name: impl Into<String>) -> Result<DataFrame> {
        let path = path.into();
        let name = name.into();
        let column = self.column_at_path(&path)?;
        if column.name() == name {
            return Ok(self.clone());
        }
        if self.frame_at(path.parent_names())?.contains_column(&name) {
            let taken = ColumnPath::new(path.parent_names().to_vec()).child(&name);
            return Err(Error::DuplicateColumnName(taken.to_string()));
        }
        let renamed = column.rename(name);
        self.replace_column(&path, renamed)
    }

    /// Starts a move of the selected columns
    pub fn move_columns(&self, selector: impl Into<ColumnSelector>) -> MoveClause<'_> {
        MoveClause {
            df: self,
            selector: selector.into(),
        }
    }

    /// Starts wrapping the selected sibling columns into a new group
    pub fn group(&self, selector: impl Into<ColumnSelector>) -> GroupClause<'_> {
        GroupClause {
            df: self,
            selector: selector.into(),
        }
    }

    /// Splices the children of the selected groups into each group's position
    pub fn ungroup(&self, selector: impl Into<ColumnSelector>) -> Result<DataFrame> {
        let mut paths = self.resolve(selector)?;
        for path in &paths {
            if !self.column_at_path(path)?.is_column_group() {
                return Err(Error::NotAColumnGroup(path.to_string()));
            }
        }
        // inner groups first, so outer paths stay valid
        paths.sort_by_key(|p| std::cmp::Reverse(p.len()));

        let mut df = self.clone();
        for path in &paths {
            let name = path.name().unwrap_or_default().to_string();
            df = df.edit_columns(path.parent_names(), |columns| {
                let width = columns.len();
                let mut spliced = Vec::with_capacity(width);
                let mut returning = None;
                for column in columns {
                    match column {
                        DataColumn::Group(group) if group.name() == name => {
                            match group.origin() {
                                Some(origin)
                                    if origin.width == width - 1 + origin.positions.len() =>
                                {
                                    returning = Some(group);
                                }
                                _ => spliced.extend(group.frame().columns().iter().cloned()),
                            }
                        }
                        other => spliced.push(other),
                    }
                }
                // children go back to the sibling positions they were grouped from
                if let Some(group) = returning {
                    if let Some(origin) = group.origin() {
                        let children = group.frame().columns().iter().cloned();
                        for (&position, child) in origin.positions.iter().zip(children) {
                            spliced.insert(position, child);
                        }
                    }
                }
                Ok(spliced)
            })?;
        }
        Ok(df)
    }

    /// Starts inserting `column`
    pub fn insert(&self, column: impl Into<DataColumn>) -> InsertClause<'_> {
        InsertClause {
            df: self,
            column: column.into(),
        }
    }

    /// Inserts `column` under the name and groups given by `path`, creating missing groups
    pub fn insert_at_path(
        &self,
        column: impl Into<DataColumn>,
        path: impl Into<ColumnPath>,
    ) -> Result<DataFrame> {
        let path = path.into();
        let name = path
            .name()
            .ok_or_else(|| Error::InvalidInput("insert path is empty".to_string()))?;
        let column = column.into().rename(name);
        self.insert_column(path.parent_names(), None, column)
    }
}

/// Pending move of a column selection
#[derive(Debug, Clone)]
pub struct MoveClause<'a> {
    df: &'a DataFrame,
    selector: ColumnSelector,
}

enum Target {
    Position(Vec<String>, usize),
    After(ColumnPath),
    Before(ColumnPath),
}

impl MoveClause<'_> {
    /// Moves the columns to the top level, starting at `index`
    pub fn to(self, index: usize) -> Result<DataFrame> {
        self.apply(Target::Position(Vec::new(), index))
    }

    pub fn to_start(self) -> Result<DataFrame> {
        self.to(0)
    }

    pub fn to_end(self) -> Result<DataFrame> {
        self.to(usize::MAX)
    }

    /// Moves the columns right after `column`, into its parent
    pub fn after(self, column: impl Into<ColumnPath>) -> Result<DataFrame> {
        self.apply(Target::After(column.into()))
    }

    /// Moves the columns right before `column`, into its parent
    pub fn before(self, column: impl Into<ColumnPath>) -> Result<DataFrame> {
        self.apply(Target::Before(column.into()))
    }

    /// Moves the columns to the end of the group at `group`, creating it when missing
    pub fn under(self, group: impl Into<ColumnPath>) -> Result<DataFrame> {
        let group = group.into();
        self.apply(Target::Position(group.names().to_vec(), usize::MAX))
    }

    fn apply(self, target: Target) -> Result<DataFrame> {
        let paths = self.df.resolve(self.selector)?;
        check_disjoint(&paths)?;
        if let Target::After(anchor) | Target::Before(anchor) = &target {
            self.df.column_at_path(anchor)?;
            if paths.iter().any(|p| anchor.starts_with(p)) {
                return Err(Error::InvalidInput(format!(
                    "cannot move columns relative to moved column '{}'",
                    anchor
                )));
            }
        }
        if let Target::Position(parent, _) = &target {
            let parent = ColumnPath::new(parent.clone());
            if paths.iter().any(|p| parent.starts_with(p)) {
                return Err(Error::InvalidInput(format!(
                    "cannot move a column into itself: '{}'",
                    parent
                )));
            }
        }

        let (mut df, columns) = self.df.remove_paths(&paths, true)?;
        let (parent, start) = match target {
            Target::Position(parent, index) => (parent, index),
            Target::After(anchor) => {
                let index = sibling_index(&df, &anchor)?;
                (anchor.parent_names().to_vec(), index + 1)
            }
            Target::Before(anchor) => {
                let index = sibling_index(&df, &anchor)?;
                (anchor.parent_names().to_vec(), index)
            }
        };
        for (offset, column) in columns.into_iter().enumerate() {
            df = df.insert_column(&parent, Some(start.saturating_add(offset)), column)?;
        }
        Ok(df)
    }
}

fn sibling_index(df: &DataFrame, path: &ColumnPath) -> Result<usize> {
    let parent = df.frame_at(path.parent_names())?;
    path.name()
        .and_then(|name| parent.position_of(name))
        .ok_or_else(|| Error::ColumnNotFound(path.to_string()))
}

/// Pending grouping of sibling columns
#[derive(Debug, Clone)]
pub struct GroupClause<'a> {
    df: &'a DataFrame,
    selector: ColumnSelector,
}

impl GroupClause<'_> {
    /// Wraps the selected columns into a group called `name`.
    ///
    /// The group takes the position of the first selected column; its children keep their
    /// relative frame order. The group remembers where its children came from, so
    /// [`DataFrame::ungroup`] puts them back in place.
    pub fn into(self, name: impl Into<String>) -> Result<DataFrame> {
        let name = name.into();
        let mut paths = self.df.resolve(self.selector)?;
        let Some(first) = paths.first().cloned() else {
            return Err(Error::InvalidInput("no columns selected to group".to_string()));
        };
        if let Some(other) = paths.iter().find(|p| p.parent_names() != first.parent_names()) {
            return Err(Error::ParentMismatch {
                first: first.to_string(),
                second: other.to_string(),
            });
        }
        let parent = self.df.frame_at(first.parent_names())?;
        let position = |p: &ColumnPath| p.name().and_then(|n| parent.position_of(n)).unwrap_or(0);
        paths.sort_by_key(|p| position(p));
        let positions: Vec<usize> = paths.iter().map(|p| position(p)).collect();
        let index = positions.first().copied().unwrap_or(0);
        let origin = Origin {
            positions,
            width: parent.column_count(),
        };

        let (df, columns) = self.df.remove_paths(&paths, false)?;
        let group = ColumnGroup::new(name, DataFrame::with_row_count(columns, self.df.row_count)?)
            .with_origin(origin);
        df.insert_column(first.parent_names(), Some(index), DataColumn::Group(group))
    }
}

/// Pending insertion of one column
#[derive(Debug, Clone)]
pub struct InsertClause<'a> {
    df: &'a DataFrame,
    column: DataColumn,
}

impl InsertClause<'_> {
    /// Inserts at top-level position `index`
    pub fn at(self, index: usize) -> Result<DataFrame> {
        self.df.insert_column(&[], Some(index), self.column)
    }

    /// Appends to the top level
    pub fn at_end(self) -> Result<DataFrame> {
        self.df.insert_column(&[], None, self.column)
    }

    /// Inserts right after `column`, as its sibling
    pub fn after(self, column: impl Into<ColumnPath>) -> Result<DataFrame> {
        let anchor = column.into();
        let index = sibling_index(self.df, &anchor)?;
        self.df
            .insert_column(anchor.parent_names(), Some(index + 1), self.column)
    }

    /// Inserts right before `column`, as its sibling
    pub fn before(self, column: impl Into<ColumnPath>) -> Result<DataFrame> {
        let anchor = column.into();
        let index = sibling_index(self.df, &anchor)?;
        self.df
            .insert_column(anchor.parent_names(), Some(index), self.column)
    }

    /// Appends to the group at `group`, creating missing groups
    pub fn under(self, group: impl Into<ColumnPath>) -> Result<DataFrame> {
        let group = group.into();
        self.df.insert_column(group.names(), None, self.column)
    }

    /// Inserts under the name and groups given by `path`
    pub fn at_path(self, path: impl Into<ColumnPath>) -> Result<DataFrame> {
        self.df.insert_at_path(self.column, path)
    }
}
