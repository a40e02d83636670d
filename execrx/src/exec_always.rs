use crate::{exec_and_forward, ExecRxStreamExt, Executor, ExecutionResult, State, StateCell};
use futures::stream::{self, Stream, StreamExt};
use std::marker::PhantomData;

/// A live value production that re-runs its executor for every subscriber.
///
/// All subscribers share one state: each [`subscribe`](ExecAlways::subscribe) starts a
/// fresh invocation whose output lands in that shared state, and every subscriber sees
/// the same de-duplicated stream of values. N subscriptions mean N invocations.
pub struct ExecAlways<T, A, E> {
    executor: E,
    state: StateCell<T>,
    initial_value: T,
    _args: PhantomData<fn(A)>,
}

/// Creates an [`ExecAlways`] seeded with `initial_value`.
pub fn exec_always<T, A, E>(executor: E, initial_value: T) -> ExecAlways<T, A, E>
where
    T: State + PartialEq,
    E: Executor<A>,
    E::Output: ExecutionResult<T>,
{
    ExecAlways {
        executor,
        state: StateCell::new(initial_value.clone()),
        initial_value,
        _args: PhantomData,
    }
}

impl<T, A, E> ExecAlways<T, A, E>
where
    T: State + PartialEq,
    A: 'static,
    E: Executor<A>,
    E::Output: ExecutionResult<T>,
{
    /// Subscribes to the shared state and invokes the executor with no arguments.
    ///
    /// While no item has landed yet the stream starts with the initial value. After
    /// that it yields every change of the shared state that differs from the previous
    /// one, skipping values equal to the initial one.
    pub fn subscribe(&self) -> impl Stream<Item = T> + Send + 'static {
        let initial_value = self.initial_value.clone();
        let (current, updates) = self.state.observe();
        let replay = (current == initial_value).then(|| initial_value.clone());

        exec_and_forward(&self.executor, &self.state, None);

        stream::iter(replay).chain(
            stream::iter([current])
                .chain(updates)
                .distinct_except(initial_value),
        )
    }

    /// Returns the latest value of the shared state.
    pub fn get(&self) -> T {
        self.state.get_cloned()
    }
}
