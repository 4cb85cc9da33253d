//! Comma-separated column lists.

/// Joins column names with `", "`.
///
/// ```rust
/// use crdb_sql::column_list;
///
/// assert_eq!(column_list(&["name", "unit_price", "quantity"]), "name, unit_price, quantity");
/// ```
#[must_use]
pub fn column_list<S: AsRef<str>>(names: &[S]) -> String {
    names
        .iter()
        .map(AsRef::as_ref)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Joins column names qualified with `table` (`table.name`) with `", "`.
///
/// ```rust
/// use crdb_sql::qualified_column_list;
///
/// assert_eq!(
///     qualified_column_list("items", &["name", "quantity"]),
///     "items.name, items.quantity"
/// );
/// ```
#[must_use]
pub fn qualified_column_list<S: AsRef<str>>(table: &str, names: &[S]) -> String {
    names
        .iter()
        .map(|name| format!("{table}.{}", name.as_ref()))
        .collect::<Vec<_>>()
        .join(", ")
}
