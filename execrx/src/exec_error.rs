use thiserror::Error;

/// Represents a failed executor invocation.
///
/// This is the only error kind the crate produces. It is created when an item
/// emitted by an executor's production converts to a failed [`Outcome`](crate::Outcome),
/// either because the item was an `Err` or because it was `None`.
#[derive(Error, Debug, Clone, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ExecError {
    /// The production raised an error, carrying its message.
    #[error("{0}")]
    Error(String),

    /// The production emitted None when a value was expected.
    #[error("Executor returned None!")]
    None,
}

impl ExecError {
    /// Returns true if this error represents a None item.
    pub fn is_none(&self) -> bool {
        matches!(self, ExecError::None)
    }

    /// Returns true if this error is a raised error with a message.
    pub fn is_error(&self) -> bool {
        matches!(self, ExecError::Error(_))
    }

    /// Returns the message of a raised error.
    pub fn message(&self) -> Option<&str> {
        match self {
            ExecError::Error(message) => Some(message),
            ExecError::None => None,
        }
    }
}
