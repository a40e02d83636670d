use crate::{exec_and_forward, Executor, ExecutionResult, State, StateCell};
use std::marker::PhantomData;
use std::sync::Arc;
use tokio::task::JoinHandle;
use tracing::trace;

/// Handle that re-runs an executor into the container created by [`exec_controlled`].
///
/// Cheap to clone; it can be moved into timers, event handlers or other tasks and
/// invoked any number of times.
pub struct ExecTrigger<T, A, E> {
    executor: Arc<E>,
    target: StateCell<T>,
    _args: PhantomData<fn(A)>,
}

impl<T, A, E> Clone for ExecTrigger<T, A, E> {
    fn clone(&self) -> Self {
        ExecTrigger {
            executor: self.executor.clone(),
            target: self.target.clone(),
            _args: PhantomData,
        }
    }
}

impl<T, A, E> ExecTrigger<T, A, E>
where
    T: State,
    E: Executor<A>,
    E::Output: ExecutionResult<T>,
{
    /// Invokes the executor with `args` and forwards its output into the container.
    pub fn trigger(&self, args: Option<A>) -> JoinHandle<()> {
        trace!("controlled execution triggered");
        exec_and_forward(self.executor.as_ref(), &self.target, args)
    }
}

/// Creates a container whose re-execution policy lives entirely in `control`.
///
/// `control` receives an [`ExecTrigger`] and registers it against whatever source
/// should drive re-execution; its return value is ignored. When
/// `execute_immediately` is true the executor runs once, with no arguments, before
/// this function returns.
///
/// ```no_run
/// use execrx::exec_controlled;
/// use futures::stream;
/// use std::time::Duration;
///
/// # async fn demo() {
/// let clock = exec_controlled(
///     |_: Option<()>| stream::once(async { Ok::<_, String>(chrono_like_now()) }),
///     |trigger| {
///         tokio::spawn(async move {
///             let mut interval = tokio::time::interval(Duration::from_secs(1));
///             loop {
///                 interval.tick().await;
///                 trigger.trigger(None);
///             }
///         })
///     },
///     0,
///     true,
/// );
/// # let _ = clock;
/// # }
/// # fn chrono_like_now() -> u64 { 0 }
/// ```
pub fn exec_controlled<T, A, E, C, R>(
    executor: E,
    control: C,
    initial_value: T,
    execute_immediately: bool,
) -> StateCell<T>
where
    T: State,
    E: Executor<A>,
    E::Output: ExecutionResult<T>,
    C: FnOnce(ExecTrigger<T, A, E>) -> R,
{
    let state = StateCell::new(initial_value);
    let trigger = ExecTrigger {
        executor: Arc::new(executor),
        target: state.clone(),
        _args: PhantomData,
    };

    let _ = control(trigger.clone());

    if execute_immediately {
        trigger.trigger(None);
    }
    state
}
