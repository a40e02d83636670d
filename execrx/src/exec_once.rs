use crate::{exec_and_forward, Executor, ExecutionResult, State, StateCell};

/// Runs `executor` exactly once, eagerly, and returns the container it feeds.
///
/// The container holds `initial_value` until the first item lands. Subscribers get the
/// current value, then every later one in order. The executor is called with no
/// arguments and is never invoked again.
pub fn exec_once<T, A, E>(executor: E, initial_value: T) -> StateCell<T>
where
    T: State,
    E: Executor<A>,
    E::Output: ExecutionResult<T>,
{
    let state = StateCell::new(initial_value);
    exec_and_forward(&executor, &state, None);
    state
}
