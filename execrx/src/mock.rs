//! A scriptable [`Executor`] for tests.
//!
//! Each invocation of a [`MockExecutor`] consumes the next scripted response from a
//! queue and records the arguments it was called with. Clones share the queue and the
//! call history, so a test can keep one handle while passing another to a constructor.

use crate::{Executor, Outcome};
use futures::stream::{self, BoxStream, StreamExt};
use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;
use tokio::time::sleep;

/// One scripted invocation.
enum MockedResult<T> {
    /// Emits every outcome in order, each after the delay.
    Emit {
        outcomes: Vec<Outcome<T>>,
        delay: Option<Duration>,
    },
    /// Never emits and never completes.
    Pending,
}

pub struct MockExecutor<T, A> {
    calls: Arc<Mutex<Vec<Option<A>>>>,
    mocked_results: Arc<Mutex<VecDeque<MockedResult<T>>>>,
    delay: Option<Duration>,
}

impl<T, A> Clone for MockExecutor<T, A> {
    fn clone(&self) -> Self {
        MockExecutor {
            calls: self.calls.clone(),
            mocked_results: self.mocked_results.clone(),
            delay: self.delay,
        }
    }
}

impl<T, A> Default for MockExecutor<T, A> {
    fn default() -> Self {
        MockExecutor {
            calls: Arc::new(Mutex::new(Vec::new())),
            mocked_results: Arc::new(Mutex::new(VecDeque::new())),
            delay: None,
        }
    }
}

fn lock<V>(mutex: &Mutex<V>) -> MutexGuard<'_, V> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

impl<T, A> MockExecutor<T, A> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the delay applied before each emitted item, unless a response sets its own.
    pub fn set_delay(&mut self, delay: Duration) {
        self.delay = Some(delay);
    }

    /// Scripts an invocation emitting a single outcome.
    pub fn mock_result(&self, result: Outcome<T>) {
        self.push(MockedResult::Emit {
            outcomes: vec![result],
            delay: None,
        });
    }

    /// Scripts an invocation emitting a single outcome after `delay`.
    pub fn mock_result_after(&self, result: Outcome<T>, delay: Duration) {
        self.push(MockedResult::Emit {
            outcomes: vec![result],
            delay: Some(delay),
        });
    }

    /// Scripts an invocation emitting every outcome in `results`, then completing.
    pub fn mock_sequence_results(&self, results: Vec<Outcome<T>>) {
        self.push(MockedResult::Emit {
            outcomes: results,
            delay: None,
        });
    }

    /// Scripts an invocation that never settles.
    pub fn mock_pending(&self) {
        self.push(MockedResult::Pending);
    }

    fn push(&self, result: MockedResult<T>) {
        lock(&self.mocked_results).push_back(result);
    }

    /// Number of times the executor has been invoked.
    pub fn call_count(&self) -> usize {
        lock(&self.calls).len()
    }

    /// Arguments of every invocation, oldest first.
    pub fn calls(&self) -> Vec<Option<A>>
    where
        A: Clone,
    {
        lock(&self.calls).clone()
    }

    pub fn clear_calls(&self) {
        lock(&self.calls).clear();
    }

    /// Number of scripted responses not consumed yet.
    pub fn remaining(&self) -> usize {
        lock(&self.mocked_results).len()
    }
}

impl<T, A> Executor<A> for MockExecutor<T, A>
where
    T: Send + 'static,
    A: Send + 'static,
{
    type Output = Outcome<T>;
    type Production = BoxStream<'static, Outcome<T>>;

    fn execute(&self, args: Option<A>) -> Self::Production {
        lock(&self.calls).push(args);

        let next = lock(&self.mocked_results).pop_front();
        match next {
            Some(MockedResult::Emit { outcomes, delay }) => {
                let delay = delay.or(self.delay);
                stream::iter(outcomes)
                    .then(move |outcome| async move {
                        if let Some(delay) = delay {
                            sleep(delay).await;
                        }
                        outcome
                    })
                    .boxed()
            }
            Some(MockedResult::Pending) => stream::pending().boxed(),
            None => stream::once(async { Outcome::fail_with_message("No mocked result") }).boxed(),
        }
    }
}
