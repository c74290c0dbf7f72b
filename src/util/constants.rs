// MainStreet - util/constants.rs
//
// Single source of truth for all named constants, limits, and defaults.

// =============================================================================
// Application metadata
// =============================================================================

/// Application display name.
pub const APP_NAME: &str = "MainStreet";

/// Application identifier used for config/data directories.
pub const APP_ID: &str = "MainStreet";

/// Current application version (updated by release script).
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

// =============================================================================
// Catalog limits
// =============================================================================

/// Maximum number of listings held in memory (built-in + user catalogs).
///
/// The directory is a small-town dataset; the cap exists so a runaway user
/// catalog file cannot balloon the card panel into the thousands. Listings
/// past the cap are dropped with a warning.
pub const MAX_LISTINGS: usize = 500;

/// Smallest configurable listing cap.
pub const MIN_MAX_LISTINGS: usize = 1;

/// Largest configurable listing cap.
pub const ABSOLUTE_MAX_LISTINGS: usize = 5_000;

/// Maximum size of a single catalog TOML file in bytes.
pub const MAX_CATALOG_FILE_SIZE: u64 = 256 * 1024; // 256 KB

/// Maximum number of tags a single listing may carry.
pub const MAX_TAGS_PER_LISTING: usize = 12;

/// Maximum listing description length in characters. Longer descriptions
/// are truncated at load so a single card cannot dominate the panel.
pub const MAX_DESCRIPTION_CHARS: usize = 600;

// =============================================================================
// Filtering
// =============================================================================

/// Debounce window in milliseconds for the search boxes (main and
/// claim wizard). Keystrokes inside the window collapse into one
/// trailing recompute.
pub const DEFAULT_SEARCH_DEBOUNCE_MS: u64 = 300;

/// Minimum user-configurable search debounce (ms).
pub const MIN_SEARCH_DEBOUNCE_MS: u64 = 0;

/// Maximum user-configurable search debounce (ms).
pub const MAX_SEARCH_DEBOUNCE_MS: u64 = 2_000;

// =============================================================================
// Announcements
// =============================================================================

/// Maximum announcements retained in the announcer history.
pub const MAX_ANNOUNCEMENT_HISTORY: usize = 50;

// =============================================================================
// UI defaults
// =============================================================================

/// Default UI body font size in points.
pub const DEFAULT_FONT_SIZE: f32 = 14.5;

/// Minimum user-configurable UI font size (points).
pub const MIN_FONT_SIZE: f32 = 10.0;

/// Maximum user-configurable UI font size (points).
pub const MAX_FONT_SIZE: f32 = 24.0;

// =============================================================================
// Export
// =============================================================================

/// Maximum number of listings that can be exported in a single operation.
/// Matches MAX_LISTINGS today; kept separate so the caps can diverge.
pub const MAX_EXPORT_LISTINGS: usize = 500;

// =============================================================================
// Logging
// =============================================================================

/// Default log level.
pub const DEFAULT_LOG_LEVEL: &str = "info";

// =============================================================================
// Configuration
// =============================================================================

/// Configuration file name.
pub const CONFIG_FILE_NAME: &str = "config.toml";

/// User catalog subdirectory name (under the platform config root).
pub const LISTINGS_DIR_NAME: &str = "listings";
