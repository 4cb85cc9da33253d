//! Classification of expected driver errors.
//!
//! The driver reports "object does not exist" and "object already exists"
//! only through message text at this boundary, so these predicates match on
//! the messages of the error and all of its sources. A [`CrdbError`] only
//! contributes its source: its own message quotes caller input such as
//! statement text. A change in the server's wording breaks the
//! classification.

use std::error::Error;

use crate::error::CrdbError;

const NOT_FOUND_PHRASES: &[&str] = &["not found", "does not exist"];
const ALREADY_EXISTS_PHRASES: &[&str] = &["already exists"];

/// Returns whether `err` reports a missing database, table or other object.
#[must_use]
pub fn is_not_found(err: &(dyn Error + 'static)) -> bool {
    chain_mentions(err, NOT_FOUND_PHRASES)
}

/// Returns whether `err` reports an object that already exists.
#[must_use]
pub fn is_already_exists(err: &(dyn Error + 'static)) -> bool {
    chain_mentions(err, ALREADY_EXISTS_PHRASES)
}

/// Converts a "not found" failure into `Ok(None)`.
///
/// Success is passed through as `Ok(Some(value))`; every other error is
/// returned unchanged. Useful for teardown that must not care whether the
/// object was ever created.
pub fn ignore_not_found<T, E>(result: Result<T, E>) -> Result<Option<T>, E>
where
    E: Error + 'static,
{
    ignore_if(result, is_not_found)
}

/// Converts an "already exists" failure into `Ok(None)`.
pub fn ignore_already_exists<T, E>(result: Result<T, E>) -> Result<Option<T>, E>
where
    E: Error + 'static,
{
    ignore_if(result, is_already_exists)
}

fn ignore_if<T, E>(
    result: Result<T, E>,
    predicate: fn(&(dyn Error + 'static)) -> bool,
) -> Result<Option<T>, E>
where
    E: Error + 'static,
{
    match result {
        Ok(value) => Ok(Some(value)),
        Err(err) if predicate(&err) => Ok(None),
        Err(err) => Err(err),
    }
}

fn chain_mentions(err: &(dyn Error + 'static), phrases: &[&str]) -> bool {
    std::iter::successors(Some(err), |&e| e.source())
        .filter(|e| !e.is::<CrdbError>())
        .any(|e| {
            let message = e.to_string().to_lowercase();
            phrases.iter().any(|phrase| message.contains(phrase))
        })
}
