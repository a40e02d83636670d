use crate::Outcome;

/// Conversion from an item emitted by an executor's production into an [`Outcome`].
pub trait ExecutionResult<T> {
    fn into_outcome(self) -> Outcome<T>;
}

impl<T> ExecutionResult<T> for Outcome<T> {
    fn into_outcome(self) -> Outcome<T> {
        self
    }
}

impl<T, E> ExecutionResult<T> for Result<T, E>
where
    E: ToString,
{
    fn into_outcome(self) -> Outcome<T> {
        match self {
            Ok(value) => Outcome::success(value),
            Err(error) => Outcome::fail_with_message(error.to_string()),
        }
    }
}

impl<T> ExecutionResult<T> for Option<T> {
    fn into_outcome(self) -> Outcome<T> {
        match self {
            Some(value) => Outcome::success(value),
            None => Outcome::fail_with_none(),
        }
    }
}
