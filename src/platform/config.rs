// MainStreet - platform/config.rs
//
// Platform-specific configuration, data directory resolution, and
// config.toml loading with startup validation.
//
// Uses the `directories` crate for XDG (Linux), AppData (Windows),
// Library (macOS) compliance.

use crate::util::constants;
use directories::ProjectDirs;
use std::path::{Path, PathBuf};

/// Resolved platform paths for MainStreet data and configuration.
#[derive(Debug, Clone)]
pub struct PlatformPaths {
    /// Configuration directory (e.g. ~/.config/mainstreet/ or %APPDATA%\MainStreet\)
    pub config_dir: PathBuf,

    /// User catalog directory (e.g. ~/.config/mainstreet/listings/)
    pub user_listings_dir: PathBuf,

    /// Data directory for logs, caches, etc.
    pub data_dir: PathBuf,
}

impl PlatformPaths {
    /// Resolve platform-appropriate paths.
    ///
    /// Falls back to current directory if platform dirs cannot be determined.
    pub fn resolve() -> Self {
        if let Some(proj_dirs) = ProjectDirs::from("", "", constants::APP_ID) {
            let config_dir = proj_dirs.config_dir().to_path_buf();
            // User catalogs live one level above config/ so the user-visible
            // path is %APPDATA%\MainStreet\listings\ rather than the deeper
            // %APPDATA%\MainStreet\config\listings\.
            let user_listings_dir = config_dir
                .parent()
                .unwrap_or(&config_dir)
                .join(constants::LISTINGS_DIR_NAME);
            let data_dir = proj_dirs.data_dir().to_path_buf();

            tracing::debug!(
                config = %config_dir.display(),
                listings = %user_listings_dir.display(),
                data = %data_dir.display(),
                "Platform paths resolved"
            );

            Self {
                config_dir,
                user_listings_dir,
                data_dir,
            }
        } else {
            tracing::warn!("Could not determine platform directories, using current directory");
            let fallback = PathBuf::from(".");
            Self {
                config_dir: fallback.clone(),
                user_listings_dir: fallback.join(constants::LISTINGS_DIR_NAME),
                data_dir: fallback,
            }
        }
    }
}

// =============================================================================
// config.toml loading and validation
// =============================================================================

/// Raw deserialisable shape of config.toml.
///
/// Unknown keys are silently ignored for forward compatibility -- a newer
/// config file can be used with an older binary without crashing.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct RawConfig {
    /// `[ui]` section.
    pub ui: UiSection,
    /// `[catalog]` section.
    pub catalog: CatalogSection,
    /// `[logging]` section.
    pub logging: LoggingSection,
}

/// `[ui]` config section.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct UiSection {
    /// Theme: "dark" or "light".
    pub theme: Option<String>,
    /// Search debounce window in ms.
    pub search_debounce_ms: Option<u64>,
    /// Body font size in points.
    pub font_size: Option<f32>,
}

/// `[catalog]` config section.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct CatalogSection {
    /// Override for the user catalog directory.
    pub user_listings_directory: Option<String>,
    /// Cap on total loaded listings.
    pub max_listings: Option<usize>,
}

/// `[logging]` config section.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct LoggingSection {
    /// Log level: "error", "warn", "info", "debug", "trace".
    pub level: Option<String>,
    /// Log file path (empty = stderr only).
    pub file: Option<String>,
}

/// Validated application configuration derived from `config.toml`.
///
/// All values are validated against named constants at load time.
/// Invalid values produce actionable warnings and fall back to defaults.
#[derive(Debug, Clone)]
pub struct AppConfig {
    // -- UI --
    /// Dark mode (true) or light mode (false).
    pub dark_mode: bool,
    /// Search debounce window in milliseconds.
    pub search_debounce_ms: u64,
    /// Body font size in points.
    pub font_size: f32,

    // -- Catalog --
    /// Override for the user catalog directory.
    pub user_listings_dir: Option<PathBuf>,
    /// Cap on total loaded listings.
    pub max_listings: usize,

    // -- Logging --
    /// Logging level string (for init before tracing is available).
    pub log_level: Option<String>,
    /// Log file path.
    pub log_file: Option<String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            dark_mode: true,
            search_debounce_ms: constants::DEFAULT_SEARCH_DEBOUNCE_MS,
            font_size: constants::DEFAULT_FONT_SIZE,
            user_listings_dir: None,
            max_listings: constants::MAX_LISTINGS,
            log_level: None,
            log_file: None,
        }
    }
}

/// Load and validate `config.toml` from the given config directory.
///
/// Returns `AppConfig` with validated values and a list of non-fatal warnings.
/// If the file does not exist, returns defaults with no warnings (first-run).
/// If the file is unparseable, returns defaults with an error warning --
/// the application still starts but the user is informed.
pub fn load_config(config_dir: &Path) -> (AppConfig, Vec<String>) {
    let config_path = config_dir
        .parent()
        .unwrap_or(config_dir)
        .join(constants::CONFIG_FILE_NAME);

    let mut warnings: Vec<String> = Vec::new();

    if !config_path.exists() {
        tracing::debug!(path = %config_path.display(), "No config.toml found; using defaults");
        return (AppConfig::default(), warnings);
    }

    let content = match std::fs::read_to_string(&config_path) {
        Ok(c) => c,
        Err(e) => {
            let msg = format!(
                "Could not read config file '{}': {e}. Using defaults.",
                config_path.display()
            );
            tracing::warn!("{}", msg);
            warnings.push(msg);
            return (AppConfig::default(), warnings);
        }
    };

    let raw: RawConfig = match toml::from_str(&content) {
        Ok(r) => r,
        Err(e) => {
            let msg = format!(
                "Failed to parse config file '{}': {e}. Using defaults. \
                 See config.example.toml for the expected format.",
                config_path.display()
            );
            tracing::warn!("{}", msg);
            warnings.push(msg);
            return (AppConfig::default(), warnings);
        }
    };

    tracing::info!(path = %config_path.display(), "Loaded config.toml");

    // Validate each field against named constants, accumulating all warnings.
    let mut config = AppConfig::default();

    // -- UI: theme --
    if let Some(ref theme) = raw.ui.theme {
        match theme.to_lowercase().as_str() {
            "dark" => config.dark_mode = true,
            "light" => config.dark_mode = false,
            other => {
                warnings.push(format!(
                    "[ui] theme = \"{other}\" is not recognised. Expected \"dark\" or \"light\". Using default (dark).",
                ));
            }
        }
    }

    // -- UI: search_debounce_ms --
    if let Some(ms) = raw.ui.search_debounce_ms {
        if (constants::MIN_SEARCH_DEBOUNCE_MS..=constants::MAX_SEARCH_DEBOUNCE_MS).contains(&ms) {
            config.search_debounce_ms = ms;
        } else {
            warnings.push(format!(
                "[ui] search_debounce_ms = {ms} is out of range ({}-{}). Using default ({}).",
                constants::MIN_SEARCH_DEBOUNCE_MS,
                constants::MAX_SEARCH_DEBOUNCE_MS,
                constants::DEFAULT_SEARCH_DEBOUNCE_MS,
            ));
        }
    }

    // -- UI: font_size --
    if let Some(size) = raw.ui.font_size {
        if (constants::MIN_FONT_SIZE..=constants::MAX_FONT_SIZE).contains(&size) {
            config.font_size = size;
        } else {
            warnings.push(format!(
                "[ui] font_size = {size} is out of range ({}-{}). Using default ({}).",
                constants::MIN_FONT_SIZE,
                constants::MAX_FONT_SIZE,
                constants::DEFAULT_FONT_SIZE,
            ));
        }
    }

    // -- Catalog: user_listings_directory --
    if let Some(ref dir) = raw.catalog.user_listings_directory {
        if !dir.is_empty() {
            config.user_listings_dir = Some(PathBuf::from(dir));
        }
    }

    // -- Catalog: max_listings --
    if let Some(max) = raw.catalog.max_listings {
        if (constants::MIN_MAX_LISTINGS..=constants::ABSOLUTE_MAX_LISTINGS).contains(&max) {
            config.max_listings = max;
        } else {
            warnings.push(format!(
                "[catalog] max_listings = {max} is out of range ({}-{}). Using default ({}).",
                constants::MIN_MAX_LISTINGS,
                constants::ABSOLUTE_MAX_LISTINGS,
                constants::MAX_LISTINGS,
            ));
        }
    }

    // -- Logging: level --
    if let Some(ref level) = raw.logging.level {
        let valid = ["error", "warn", "info", "debug", "trace"];
        if valid.contains(&level.to_lowercase().as_str()) {
            config.log_level = Some(level.clone());
        } else {
            warnings.push(format!(
                "[logging] level = \"{level}\" is not recognised. \
                 Valid values: error, warn, info, debug, trace. Using default (info).",
            ));
        }
    }

    // -- Logging: file --
    if let Some(ref file) = raw.logging.file {
        if !file.is_empty() {
            config.log_file = Some(file.clone());
        }
    }

    if !warnings.is_empty() {
        tracing::warn!(
            count = warnings.len(),
            "Config validation produced warnings"
        );
    }

    (config, warnings)
}
