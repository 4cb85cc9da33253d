//! Partial UPDATE fragments.
//!
//! Each candidate field is described by an [`Updatable`] value that reports
//! whether the field changed. Only changed fields contribute a column and a
//! positional argument, and the two always stay in lockstep.

use crate::columns::column_list;
use crate::value::{SqlValue, ToSqlValue};

/// A field that may or may not be part of an UPDATE.
pub trait Updatable {
    /// Returns whether this field is being updated.
    fn is_updating(&self) -> bool;

    /// Returns the new value as an untyped SQL value.
    fn value(&self) -> SqlValue;
}

/// An optional update of a single field carrying a value of type `T`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FieldUpdate<T> {
    /// Whether the field is being updated.
    pub updating: bool,
    /// The new value; ignored unless `updating` is set.
    pub new_val: T,
}

/// Optional update of a text column.
pub type StringUpdate = FieldUpdate<String>;
/// Optional update of a boolean column.
pub type BoolUpdate = FieldUpdate<bool>;
/// Optional update of a 64-bit integer column.
pub type Int64Update = FieldUpdate<i64>;
/// Optional update of a 64-bit float column.
pub type Float64Update = FieldUpdate<f64>;

impl<T> FieldUpdate<T> {
    /// Marks the field as updated to `value`.
    #[must_use]
    pub const fn set(value: T) -> Self {
        Self {
            updating: true,
            new_val: value,
        }
    }
}

impl<T: Default> FieldUpdate<T> {
    /// A field that is left untouched.
    #[must_use]
    pub fn unchanged() -> Self {
        Self::default()
    }
}

impl<T: Default> From<Option<T>> for FieldUpdate<T> {
    fn from(value: Option<T>) -> Self {
        value.map_or_else(Self::unchanged, Self::set)
    }
}

impl<T: ToSqlValue + Clone> Updatable for FieldUpdate<T> {
    fn is_updating(&self) -> bool {
        self.updating
    }

    fn value(&self) -> SqlValue {
        self.new_val.clone().to_sql_value()
    }
}

/// Appends `column` to `columns` and the value of `update` to `args` if
/// `update` is updating.
///
/// The accumulated column list and argument list are returned respectively.
/// A field that is not updating returns both inputs unmodified.
///
/// ```rust
/// use crdb_sql::{append_update, Int64Update, StringUpdate};
///
/// let (columns, args) = append_update(&StringUpdate::set("bob".into()), "name", String::new(), Vec::new());
/// let (columns, args) = append_update(&Int64Update::unchanged(), "age", columns, args);
/// assert_eq!(columns, "name");
/// assert_eq!(args.len(), 1);
/// ```
#[must_use]
pub fn append_update<U: Updatable + ?Sized>(
    update: &U,
    column: &str,
    columns: String,
    mut args: Vec<SqlValue>,
) -> (String, Vec<SqlValue>) {
    if !update.is_updating() {
        return (columns, args);
    }
    let columns = if columns.is_empty() {
        String::from(column)
    } else {
        column_list(&[columns.as_str(), column])
    };
    args.push(update.value());
    (columns, args)
}

/// Accumulates the changed columns of a partial UPDATE and their arguments.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UpdateSet {
    columns: Vec<String>,
    args: Vec<SqlValue>,
}

impl UpdateSet {
    /// Creates an empty set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `column` if `update` is updating.
    pub fn push<U: Updatable + ?Sized>(&mut self, column: &str, update: &U) -> &mut Self {
        if update.is_updating() {
            self.columns.push(String::from(column));
            self.args.push(update.value());
        }
        self
    }

    /// Builder-style variant of [`UpdateSet::push`].
    #[must_use]
    pub fn with<U: Updatable + ?Sized>(mut self, column: &str, update: &U) -> Self {
        self.push(column, update);
        self
    }

    /// Number of columns being updated.
    #[must_use]
    pub fn len(&self) -> usize {
        self.columns.len()
    }

    /// Returns whether no column is being updated.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// The columns being updated, in the order they were pushed.
    #[must_use]
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// The bound arguments, positionally matching [`UpdateSet::columns`].
    #[must_use]
    pub fn args(&self) -> &[SqlValue] {
        &self.args
    }

    /// The comma-joined column list.
    #[must_use]
    pub fn column_list(&self) -> String {
        column_list(&self.columns)
    }

    /// Renders `col = $n, ...` with placeholders numbered from `first`.
    #[must_use]
    pub fn set_clause(&self, first: usize) -> String {
        self.columns
            .iter()
            .enumerate()
            .map(|(i, column)| format!("{column} = ${}", first + i))
            .collect::<Vec<_>>()
            .join(", ")
    }

    /// Builds `UPDATE table SET ... WHERE key_column = $n` and its arguments.
    ///
    /// Returns `None` when no column is being updated.
    #[must_use]
    pub fn build<K: ToSqlValue>(
        self,
        table: &str,
        key_column: &str,
        key: K,
    ) -> Option<(String, Vec<SqlValue>)> {
        if self.is_empty() {
            return None;
        }
        let set = self.set_clause(1);
        let key_placeholder = self.len() + 1;
        let mut args = self.args;
        args.push(key.to_sql_value());
        Some((
            format!("UPDATE {table} SET {set} WHERE {key_column} = ${key_placeholder}"),
            args,
        ))
    }
}
