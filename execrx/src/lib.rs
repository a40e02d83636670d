//! Composition patterns exposing the results of async executors as observable state.
//!
//! An [`Executor`] builds a cold stream of results. The constructors in this crate decide
//! when it runs and how its results land in a [`StateCell`]:
//!
//! - [`exec_always`]: every subscription re-runs the executor into one shared, de-duplicated state.
//! - [`exec_once`]: runs the executor once and replays its latest value.
//! - [`exec_controlled`]: hands a trigger to caller code that decides when to re-run.
//! - [`exec`] / [`ExecSubject`]: explicit, parameterized runs with switch-to-latest
//!   cancellation and optional loading and error channels.

mod exec_always;
mod exec_controlled;
mod exec_error;
mod exec_once;
mod exec_subject;
mod execution_result;
mod executor;
mod forward;
mod outcome;
mod state_cell;
mod stream_ext;
pub mod mock;

pub use exec_always::*;
pub use exec_controlled::*;
pub use exec_error::*;
pub use exec_once::*;
pub use exec_subject::*;
pub use execution_result::*;
pub use executor::*;
pub use forward::*;
pub use outcome::*;
pub use state_cell::*;
pub use stream_ext::*;

/// Values held by the containers of this crate.
pub trait State: Clone + Send + Sync + 'static {}

impl<T: Clone + Send + Sync + 'static> State for T {}
