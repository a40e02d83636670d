use futures_core::stream::Stream;

/// An asynchronous, possibly multi-valued unit of work.
///
/// `execute` only builds the production: nothing runs until the returned stream
/// is polled, and every call yields an independent production. Each item is
/// converted into an [`Outcome`](crate::Outcome) through
/// [`ExecutionResult`](crate::ExecutionResult), so productions may emit plain
/// `Result<T, E>`, `Option<T>` or `Outcome<T>` items.
///
/// Any `Fn(Option<A>) -> impl Stream` closure is an executor:
///
/// ```
/// use execrx::Executor;
/// use futures::stream;
///
/// let double = |n: Option<i32>| stream::once(async move { Ok::<_, String>(n.unwrap_or(0) * 2) });
/// let _production = double.execute(Some(3));
/// ```
pub trait Executor<A>: Send + Sync + 'static {
    type Output: Send + 'static;
    type Production: Stream<Item = Self::Output> + Send + 'static;

    /// Builds a new production. `None` means the call carries no arguments.
    fn execute(&self, args: Option<A>) -> Self::Production;
}

impl<A, F, P> Executor<A> for F
where
    F: Fn(Option<A>) -> P + Send + Sync + 'static,
    P: Stream + Send + 'static,
    P::Item: Send + 'static,
{
    type Output = P::Item;
    type Production = P;

    fn execute(&self, args: Option<A>) -> P {
        self(args)
    }
}
