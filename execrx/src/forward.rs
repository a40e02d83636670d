use crate::{Executor, ExecutionResult, Outcome, State, StateCell};
use futures::StreamExt;
use tokio::task::JoinHandle;
use tracing::{debug, trace};

/// Invokes `executor` once and forwards every successful item into `target`, in order.
///
/// The executor is called synchronously; its production is polled on a spawned task,
/// so this must be called from within a Tokio runtime. Completion is not forwarded.
/// Failures are not caught: the first failed item ends forwarding and the remaining
/// items are never polled.
///
/// The returned handle can be awaited to observe the end of forwarding, or dropped to
/// leave the task running to natural completion.
pub fn exec_and_forward<T, A, E>(
    executor: &E,
    target: &StateCell<T>,
    args: Option<A>,
) -> JoinHandle<()>
where
    T: State,
    E: Executor<A> + ?Sized,
    E::Output: ExecutionResult<T>,
{
    let production = executor.execute(args);
    let target = target.clone();
    trace!("executor invoked, forwarding production");

    tokio::spawn(async move {
        let mut production = Box::pin(production);
        while let Some(item) = production.next().await {
            match item.into_outcome() {
                Outcome::Success { value } => target.set(value),
                Outcome::Fail { error } => {
                    debug!("executor production failed, forwarding stopped: {error}");
                    return;
                }
            }
        }
        trace!("executor production completed");
    })
}
