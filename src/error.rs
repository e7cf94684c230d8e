//! Engine error type.

use crate::validation::ValidationError;

/// Errors reported synchronously by the dispatcher.
///
/// None of these mutate scheduler state. Timing out is not an error; it is
/// a modelled terminal state of an order.
#[derive(Debug, thiserror::Error)]
pub enum DispatchError {
    /// Malformed input; nothing was created.
    #[error("Validation failed: {}", join_messages(.0))]
    Validation(Vec<ValidationError>),

    /// Unknown barista or order id.
    #[error("{entity} with id {id} not found")]
    NotFound { entity: &'static str, id: u64 },

    /// The request is well-formed but the entity is in the wrong state.
    #[error("Conflict: {0}")]
    StateConflict(String),
}

impl From<Vec<ValidationError>> for DispatchError {
    fn from(errors: Vec<ValidationError>) -> Self {
        Self::Validation(errors)
    }
}

fn join_messages(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(|e| e.message.as_str())
        .collect::<Vec<_>>()
        .join("; ")
}
