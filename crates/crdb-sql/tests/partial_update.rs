//! Tests for building partial UPDATE statements from optional field updates.

mod common;
use common::*;

use crdb_sql::{
    qualified_column_list, BoolUpdate, Float64Update, Int64Update, SqlValue, StringUpdate,
    Updatable, UpdateSet,
};

// ===================================================================
// append_update
// ===================================================================

#[test]
fn nothing_updating_yields_empty_fragment() {
    let name = StringUpdate::unchanged();
    let price = Float64Update::unchanged();
    let (columns, args) = accumulate(&[("name", &name), ("unit_price", &price)]);
    assert_eq!(columns, "");
    assert!(args.is_empty());
}

#[test]
fn only_changed_fields_are_appended() {
    let name = StringUpdate::set(String::from("washer"));
    let price = Float64Update::unchanged();
    let quantity = Int64Update::set(40);
    let active = BoolUpdate::set(true);

    let (columns, args) = accumulate(&[
        ("name", &name),
        ("unit_price", &price),
        ("quantity", &quantity),
        ("active", &active),
    ]);

    assert_eq!(columns, "name, quantity, active");
    assert_eq!(
        args,
        vec![
            SqlValue::Text(String::from("washer")),
            SqlValue::Int(40),
            SqlValue::Bool(true),
        ]
    );
}

#[test]
fn columns_and_args_stay_in_lockstep() {
    let updates: Vec<Box<dyn Updatable>> = vec![
        Box::new(StringUpdate::set(String::from("a"))),
        Box::new(BoolUpdate::unchanged()),
        Box::new(Int64Update::set(2)),
        Box::new(Float64Update::unchanged()),
        Box::new(Float64Update::set(0.25)),
    ];
    let names = ["c1", "c2", "c3", "c4", "c5"];
    let fields: Vec<(&str, &dyn Updatable)> = names
        .iter()
        .copied()
        .zip(updates.iter().map(|update| &**update))
        .collect();

    let (columns, args) = accumulate(&fields);
    assert_eq!(column_count(&columns), args.len());
    assert_eq!(columns, "c1, c3, c5");
}

// ===================================================================
// UpdateSet
// ===================================================================

#[test]
fn update_set_matches_append_update() {
    let name = StringUpdate::set(String::from("nut"));
    let quantity = Int64Update::unchanged();
    let price = Float64Update::set(0.1);

    let (columns, args) = accumulate(&[("name", &name), ("quantity", &quantity), ("price", &price)]);

    let mut set = UpdateSet::new();
    set.push("name", &name)
        .push("quantity", &quantity)
        .push("price", &price);

    assert_eq!(set.column_list(), columns);
    assert_eq!(set.args(), args.as_slice());
}

#[test]
fn update_statement_uses_positional_placeholders() {
    let (sql, args) = UpdateSet::new()
        .with("name", &StringUpdate::set(String::from("bolt")))
        .with("quantity", &Int64Update::set(5))
        .with("unit_price", &Float64Update::unchanged())
        .build("items", "id", "0f1e")
        .unwrap();

    assert_eq!(sql, "UPDATE items SET name = $1, quantity = $2 WHERE id = $3");
    assert_eq!(args.len(), 3);
    assert_eq!(args[2], SqlValue::Text(String::from("0f1e")));
}

#[test]
fn qualified_columns_for_joins() {
    assert_eq!(
        qualified_column_list("items", &["name", "unit_price", "quantity"]),
        "items.name, items.unit_price, items.quantity"
    );
}
