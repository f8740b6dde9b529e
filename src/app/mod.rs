//! App layer - central state management and command processing
//!
//! The App actor receives UI events, store snapshots and store responses,
//! updates state, and emits store commands and render state.

pub mod state;
pub mod actor;
pub mod commands;

pub use state::AppState;
pub use actor::AppActor;
