use crate::ExecError;

/// Result of one item of an executor's production.
///
/// Failures travel through pipelines as `Fail` values instead of terminating
/// them, so sinks pattern-match on the variant they care about.
#[derive(Debug, Clone, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Outcome<T> {
    Success { value: T },
    Fail { error: ExecError },
}

impl<T> Outcome<T> {
    pub fn success(value: T) -> Self {
        Outcome::Success { value }
    }

    pub fn fail(error: ExecError) -> Self {
        Outcome::Fail { error }
    }

    pub fn fail_with_message(message: impl Into<String>) -> Self {
        Outcome::Fail {
            error: ExecError::Error(message.into()),
        }
    }

    pub fn fail_with_none() -> Self {
        Outcome::Fail {
            error: ExecError::None,
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Outcome::Success { .. })
    }

    pub fn is_fail(&self) -> bool {
        matches!(self, Outcome::Fail { .. })
    }

    pub fn value_ref(&self) -> Option<&T> {
        match self {
            Outcome::Success { value } => Some(value),
            Outcome::Fail { .. } => None,
        }
    }

    pub fn value(self) -> Option<T> {
        match self {
            Outcome::Success { value } => Some(value),
            Outcome::Fail { .. } => None,
        }
    }

    pub fn error(&self) -> Option<&ExecError> {
        match self {
            Outcome::Success { .. } => None,
            Outcome::Fail { error } => Some(error),
        }
    }

    pub fn into_result(self) -> Result<T, ExecError> {
        self.into()
    }
}

impl<T> From<Outcome<T>> for Result<T, ExecError> {
    fn from(outcome: Outcome<T>) -> Self {
        match outcome {
            Outcome::Success { value } => Ok(value),
            Outcome::Fail { error } => Err(error),
        }
    }
}
