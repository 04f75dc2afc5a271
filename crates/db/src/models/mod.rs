//! Domain model structs and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` + `Serialize` entity struct matching the database row
//! - A `Deserialize` + `Validate` create DTO for inserts
//! - A `Deserialize` update DTO (all `Option` fields) for partial updates,
//!   where nullable columns use `Option<Option<T>>` so `null` clears them
//! - A `Deserialize` list filter built from query parameters

pub mod contact;
pub mod origin;
pub mod project;
pub mod skill;
pub mod user;
pub mod visit;

use folio_core::error::CoreError;
use validator::Validate;

/// Run `validator` rules on a DTO and flatten failures into a
/// [`CoreError::Validation`] with one `field: message` entry per failure.
pub fn validate_input<T: Validate>(input: &T) -> Result<(), CoreError> {
    let Err(errors) = input.validate() else {
        return Ok(());
    };

    let mut messages: Vec<String> = errors
        .field_errors()
        .into_iter()
        .flat_map(|(field, failures)| {
            failures.iter().map(move |failure| match &failure.message {
                Some(message) => format!("{field}: {message}"),
                None => format!("{field}: invalid value"),
            })
        })
        .collect();
    messages.sort();

    Err(CoreError::Validation(messages.join("; ")))
}

/// Treat an empty query-string value (`?status=`) as "no filter".
pub(crate) fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}
