//! Model to entity mappers
//!
//! Rows carry enums as text; a value the domain does not know is reported as a
//! database error rather than silently defaulted.

mod conversation;
mod engagement;
mod profile;
mod user;

use rextrix_core::DomainError;
use std::str::FromStr;

pub(crate) fn parse_column<T: FromStr>(column: &str, raw: &str) -> Result<T, DomainError> {
    raw.parse()
        .map_err(|_| DomainError::DatabaseError(format!("unexpected {column} value: {raw}")))
}
