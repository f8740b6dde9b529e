//! Application constants
//!
//! Centralized location for magic strings and configuration defaults.

/// Application name
pub const APP_NAME: &str = "QuickSave";

/// Application version
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Build number shown in the About section
pub const BUILD_NUMBER: &str = "1";

/// Number of statuses the mock discovery produces per fetch
pub const MOCK_BATCH_SIZE: usize = 20;

/// Simulated discovery latency in milliseconds
pub const FETCH_DELAY_MS: u64 = 1000;

/// Simulated save (copy) latency in milliseconds
pub const SAVE_DELAY_MS: u64 = 500;

/// Simulated delete latency in milliseconds
pub const DELETE_DELAY_MS: u64 = 300;

/// How long a toast stays on screen, in milliseconds
pub const TOAST_LIFETIME_MS: u64 = 3000;

/// Placeholder cards drawn while a fetch is in flight
pub const SKELETON_CARDS: usize = 8;

/// Columns in the status grid
pub const GRID_COLUMNS: usize = 2;

/// Directory under the home directory holding preferences
pub const CONFIG_DIR_NAME: &str = ".quicksave";

/// Preferences file name inside the config directory
pub const PREFERENCES_FILE: &str = "preferences.yaml";
