#![allow(dead_code)]

use futures_signals::signal::{Mutable, SignalExt};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::time::timeout;

pub const WAIT: Duration = Duration::from_secs(2);

/// Waits until `state` holds `expected`, failing the test after [`WAIT`].
pub async fn wait_for_value<T>(state: &Mutable<T>, expected: T)
where
    T: Clone + PartialEq + std::fmt::Debug,
{
    let reached = timeout(WAIT, state.signal_cloned().wait_for(expected.clone())).await;
    assert!(
        matches!(reached, Ok(Some(_))),
        "expected {:?}, state is {:?}",
        expected,
        state.get_cloned()
    );
}

/// Waits until `test` holds for the value of `state`.
pub async fn wait_until<T, F>(state: &Mutable<T>, test: F)
where
    F: FnMut(&T) -> bool,
{
    let reached = timeout(WAIT, state.signal_ref(test).wait_for(true)).await;
    assert!(matches!(reached, Ok(Some(true))), "condition never held");
}

#[derive(Clone, Default)]
pub struct CallCounter(Arc<AtomicUsize>);

impl CallCounter {
    pub fn hit(&self) {
        self.0.fetch_add(1, Ordering::SeqCst);
    }

    pub fn count(&self) -> usize {
        self.0.load(Ordering::SeqCst)
    }
}
