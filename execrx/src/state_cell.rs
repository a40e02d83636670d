use crate::State;
use futures::channel::mpsc::{self, UnboundedReceiver, UnboundedSender};
use futures::stream::{self, Stream, StreamExt};
use futures_signals::signal::{Mutable, MutableSignalCloned};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// Latest-value container with lossless observers.
///
/// The current value lives in a [`Mutable`], so it can be read synchronously and
/// observed as a signal. Signals only report the latest value, so every
/// [`subscribe`](StateCell::subscribe) call also registers a dedicated unbounded
/// channel: the observer first receives the current value, then every later value
/// in the order it was set, with nothing skipped.
pub struct StateCell<T> {
    state: Mutable<T>,
    observers: Arc<Mutex<Vec<UnboundedSender<T>>>>,
}

impl<T> Clone for StateCell<T> {
    fn clone(&self) -> Self {
        StateCell {
            state: self.state.clone(),
            observers: self.observers.clone(),
        }
    }
}

impl<T: State> StateCell<T> {
    pub fn new(initial_value: T) -> Self {
        StateCell {
            state: Mutable::new(initial_value),
            observers: Arc::new(Mutex::new(Vec::new())),
        }
    }

    fn observers(&self) -> MutexGuard<'_, Vec<UnboundedSender<T>>> {
        self.observers.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Publishes `value` to the signal and to every observer. Observers whose
    /// receiver was dropped are unregistered.
    pub fn set(&self, value: T) {
        let mut observers = self.observers();
        observers.retain(|observer| observer.unbounded_send(value.clone()).is_ok());
        self.state.set(value);
    }

    /// Registers an observer and returns the value current at registration.
    ///
    /// No value set after the snapshot can be missing from the receiver.
    pub(crate) fn observe(&self) -> (T, UnboundedReceiver<T>) {
        let mut observers = self.observers();
        let (observer, receiver) = mpsc::unbounded();
        observers.push(observer);
        (self.state.get_cloned(), receiver)
    }

    /// The current value followed by every later value, in order.
    pub fn subscribe(&self) -> impl Stream<Item = T> + Send + 'static {
        let (current, receiver) = self.observe();
        stream::iter([current]).chain(receiver)
    }

    pub fn get_cloned(&self) -> T {
        self.state.get_cloned()
    }

    /// Latest-value signal; intermediate values may be skipped.
    pub fn signal_cloned(&self) -> MutableSignalCloned<T> {
        self.state.signal_cloned()
    }

    /// The underlying container, for signal combinators and waiting.
    pub fn as_mutable(&self) -> &Mutable<T> {
        &self.state
    }

    /// Number of observers still registered.
    pub fn observer_count(&self) -> usize {
        self.observers().len()
    }
}

impl<T: State + Copy> StateCell<T> {
    pub fn get(&self) -> T {
        self.state.get()
    }
}
