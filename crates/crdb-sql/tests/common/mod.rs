#![allow(dead_code)]

use crdb_sql::{append_update, SqlValue, Updatable};

/// Threads an accumulator through `append_update` for every `(column, update)`.
pub fn accumulate(fields: &[(&str, &dyn Updatable)]) -> (String, Vec<SqlValue>) {
    fields
        .iter()
        .fold((String::new(), Vec::new()), |(columns, args), (column, update)| {
            append_update(*update, column, columns, args)
        })
}

/// Number of entries in a comma-joined column list.
pub fn column_count(columns: &str) -> usize {
    if columns.is_empty() {
        0
    } else {
        columns.split(", ").count()
    }
}
