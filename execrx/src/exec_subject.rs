use crate::{ExecError, Executor, ExecutionResult, Outcome, State, StateCell};
use futures::stream::{Stream, StreamExt};
use futures_signals::signal::{Mutable, MutableSignalCloned, SignalExt, SignalStream};
use std::pin::Pin;
use tokio::sync::mpsc::{UnboundedReceiver, UnboundedSender};
use tokio_util::sync::CancellationToken;
use tracing::{debug, trace};

/// Optional side channels an [`ExecSubject`] writes to.
///
/// Both containers are owned by the caller. The subject only writes them: `error`
/// receives the latest caught failure and is never cleared, `loading` is true while
/// the latest execution is in flight.
#[derive(Clone, Default)]
pub struct ExecChannels {
    pub error: Option<Mutable<Option<ExecError>>>,
    pub loading: Option<Mutable<bool>>,
}

impl ExecChannels {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_error(self, error: Mutable<Option<ExecError>>) -> Self {
        Self {
            error: Some(error),
            ..self
        }
    }

    pub fn with_loading(self, loading: Mutable<bool>) -> Self {
        Self {
            loading: Some(loading),
            ..self
        }
    }

    fn set_loading(&self, loading: bool) {
        if let Some(channel) = &self.loading {
            channel.set(loading);
        }
    }

    fn set_error(&self, error: ExecError) {
        if let Some(channel) = &self.error {
            channel.set(Some(error));
        }
    }
}

struct Trigger<A> {
    args: Option<A>,
    token: CancellationToken,
}

struct InFlight<P> {
    production: Pin<Box<P>>,
    token: CancellationToken,
}

/// A container of the latest executor result with explicit, repeatable triggering.
///
/// Every [`exec`](ExecSubject::exec) supersedes the execution still in flight: the
/// previous production is dropped and whatever it emits afterwards never reaches the
/// value. Failures are caught and routed to the error channel; they never update the
/// value and never stop the subject from accepting further calls.
///
/// Clones share the same value and pipeline. The pipeline task ends once every clone
/// has been dropped and the last production has settled.
pub struct ExecSubject<T, A> {
    state: StateCell<T>,
    channels: ExecChannels,
    in_flight: Mutable<CancellationToken>,
    trigger_tx: UnboundedSender<Trigger<A>>,
}

impl<T, A> Clone for ExecSubject<T, A> {
    fn clone(&self) -> Self {
        ExecSubject {
            state: self.state.clone(),
            channels: self.channels.clone(),
            in_flight: self.in_flight.clone(),
            trigger_tx: self.trigger_tx.clone(),
        }
    }
}

/// Creates an [`ExecSubject`] with optional error and loading channels.
pub fn exec<T, A, E>(
    executor: E,
    initial_value: T,
    error: Option<Mutable<Option<ExecError>>>,
    loading: Option<Mutable<bool>>,
) -> ExecSubject<T, A>
where
    T: State,
    A: Send + 'static,
    E: Executor<A>,
    E::Output: ExecutionResult<T>,
{
    ExecSubject::with_channels(executor, initial_value, ExecChannels { error, loading })
}

impl<T, A> ExecSubject<T, A>
where
    T: State,
    A: Send + 'static,
{
    /// Creates a subject without side channels.
    pub fn new<E>(executor: E, initial_value: T) -> Self
    where
        E: Executor<A>,
        E::Output: ExecutionResult<T>,
    {
        Self::with_channels(executor, initial_value, ExecChannels::default())
    }

    /// Creates a subject writing to `channels`. Must be called within a Tokio runtime.
    pub fn with_channels<E>(executor: E, initial_value: T, channels: ExecChannels) -> Self
    where
        E: Executor<A>,
        E::Output: ExecutionResult<T>,
    {
        let state = StateCell::new(initial_value);
        let in_flight = Mutable::new(CancellationToken::new());
        let (trigger_tx, trigger_rx) = tokio::sync::mpsc::unbounded_channel::<Trigger<A>>();

        let state_clone = state.clone();
        let channels_clone = channels.clone();
        let in_flight_clone = in_flight.clone();

        tokio::spawn(async move {
            Self::process_triggers(
                executor,
                state_clone,
                channels_clone,
                in_flight_clone,
                trigger_rx,
            )
            .await;
        });

        ExecSubject {
            state,
            channels,
            in_flight,
            trigger_tx,
        }
    }

    async fn process_triggers<E>(
        executor: E,
        state: StateCell<T>,
        channels: ExecChannels,
        in_flight: Mutable<CancellationToken>,
        mut trigger_rx: UnboundedReceiver<Trigger<A>>,
    ) where
        E: Executor<A>,
        E::Output: ExecutionResult<T>,
    {
        let mut current: Option<InFlight<E::Production>> = None;
        let mut closed = false;

        loop {
            tokio::select! {
                biased;
                trigger = trigger_rx.recv(), if !closed => match trigger {
                    Some(Trigger { args, token }) => {
                        if current.is_some() {
                            debug!("execution superseded by a newer trigger");
                        }
                        current = Some(InFlight {
                            production: Box::pin(executor.execute(args)),
                            token,
                        });
                    }
                    None => closed = true,
                },
                item = Self::next_item(&mut current), if current.is_some() => {
                    if !Self::apply_item(item, &current, &state, &channels, &in_flight) {
                        current = None;
                    }
                }
                else => break,
            }
        }
        debug!("exec subject pipeline finished");
    }

    async fn next_item<P: Stream>(
        current: &mut Option<InFlight<P>>,
    ) -> Option<P::Item> {
        match current {
            Some(in_flight) => in_flight.production.next().await,
            None => None,
        }
    }

    /// Applies one polled item of the current production. Returns false once that
    /// production is done and should be dropped.
    fn apply_item<P, R>(
        item: Option<R>,
        current: &Option<InFlight<P>>,
        state: &StateCell<T>,
        channels: &ExecChannels,
        latest: &Mutable<CancellationToken>,
    ) -> bool
    where
        R: ExecutionResult<T>,
    {
        let Some(in_flight) = current else {
            return false;
        };
        // `exec` and `cancel` take the write lock, so an execution cannot be superseded
        // between the check and the writes below.
        let _latest = latest.lock_ref();
        if in_flight.token.is_cancelled() {
            trace!("discarding item of a cancelled execution");
            return false;
        }

        match item.map(<R as ExecutionResult<T>>::into_outcome) {
            Some(Outcome::Success { value }) => {
                state.set(value);
                channels.set_loading(false);
                true
            }
            Some(Outcome::Fail { error }) => {
                debug!("execution failed: {error}");
                channels.set_loading(false);
                channels.set_error(error);
                false
            }
            None => {
                trace!("execution completed");
                channels.set_loading(false);
                false
            }
        }
    }

    /// Runs the executor with `args`, superseding any execution still in flight.
    ///
    /// Once this returns, the superseded execution can no longer write the value, the
    /// loading channel or the error channel.
    pub fn exec(&self, args: A) {
        let token = CancellationToken::new();
        let mut latest = self.in_flight.lock_mut();
        latest.cancel();
        *latest = token.clone();
        self.channels.set_loading(true);
        trace!("execution triggered");
        if self
            .trigger_tx
            .send(Trigger {
                args: Some(args),
                token,
            })
            .is_err()
        {
            debug!("exec subject pipeline is gone, trigger dropped");
        }
    }

    /// Supersedes the execution in flight without starting a new one.
    pub fn cancel(&self) {
        let latest = self.in_flight.lock_mut();
        latest.cancel();
        self.channels.set_loading(false);
    }

    pub fn get(&self) -> T {
        self.state.get_cloned()
    }

    pub fn signal(&self) -> MutableSignalCloned<T> {
        self.state.signal_cloned()
    }

    /// Latest-value stream; intermediate values may be skipped.
    pub fn to_stream(&self) -> SignalStream<MutableSignalCloned<T>> {
        self.state.signal_cloned().to_stream()
    }

    /// The current value followed by every later successful value, in order.
    pub fn subscribe(&self) -> impl Stream<Item = T> + Send + 'static {
        self.state.subscribe()
    }

    /// The container holding the latest successful value.
    pub fn state(&self) -> &Mutable<T> {
        self.state.as_mutable()
    }

    /// Returns true once the pipeline task has stopped accepting triggers.
    pub fn is_closed(&self) -> bool {
        self.trigger_tx.is_closed()
    }
}
