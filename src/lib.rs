//! # QuickSave TUI
//!
//! A terminal status saver: browse image and video statuses, preview them,
//! save them to a collection and manage what has been saved.
//!
//! ## Features
//! - Two-column status grid with refresh and loading placeholders
//! - Detail viewer with save action
//! - Saved collection with delete confirmation and storage usage
//! - Share links and the saved list through the terminal clipboard
//! - Light / Dark / System themes persisted across sessions
//!
//! ## Architecture
//! Actor-based with channels:
//! - UI Layer (Ratatui) - synchronous
//! - App Layer (State machine)
//! - Store Layer (Tokio) - owns the status store and its media collaborators

pub mod constants;
pub mod models;
pub mod clipboard;
pub mod format;
pub mod preferences;
pub mod ui;
pub mod media;
pub mod store;
pub mod messages;
pub mod app;

// Re-export commonly used types
pub use models::{MediaType, Status, Theme};
pub use preferences::{PreferenceStore, Preferences};
pub use media::{MediaDiscovery, MediaStorage, MockDiscovery, SimulatedStorage};
pub use store::{DiscoveryError, StatusStore, StorageError, StoreActor, StoreError, StoreSnapshot};
pub use messages::{RenderState, StoreCommand, StoreResponse, UiEvent};
pub use app::{AppActor, AppState};
