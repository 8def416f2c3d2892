//! Core state model and reducer for the liftlog workout tracker.
//!
//! Presentation layers drive a [`WorkoutStore`] with [`Action`]s; the store
//! runs the pure [`reduce`] function and persists through a
//! [`StateRepository`](state::StateRepository).

pub mod action;
pub mod environment;
pub mod error;
pub mod query;
pub mod reducer;
pub mod session_start;
pub mod state;
pub mod store;

pub use action::{Action, SetField};
pub use environment::{Clock, Environment, IdGenerator};
pub use error::{LiftlogError, Result};
pub use reducer::reduce;
pub use store::{SubscriptionId, WorkoutStore};
