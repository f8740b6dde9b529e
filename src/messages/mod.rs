//! Message types for inter-layer communication in the actor-based architecture.
//!
//! This module defines all messages that flow between the UI, App, and Store layers.

pub mod ui_events;
pub mod store;
pub mod render;

pub use ui_events::UiEvent;
pub use store::{StoreCommand, StoreOperation, StoreResponse};
pub use render::RenderState;
