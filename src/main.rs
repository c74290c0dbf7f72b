// MainStreet - main.rs
//
// Application entry point. Handles:
// 1. CLI argument parsing
// 2. Configuration and logging initialisation
// 3. Catalog loading (built-in + user-defined)
// 4. eframe GUI launch

#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

mod gui;

// Re-export modules from the library crate so that `gui.rs` and other
// binary-side code can still use `crate::app::...`, `crate::core::...` etc.
pub use mainstreet::app;

pub use mainstreet::core;
pub use mainstreet::platform;
pub use mainstreet::ui;
pub use mainstreet::util;

use clap::Parser;
use std::path::PathBuf;

/// Configure fonts for the egui context.
///
/// On Windows, loads Segoe UI, Segoe UI Emoji, and Segoe UI Symbol from the
/// system font directory and sets them as the primary proportional fonts.
/// These fonts have much broader Unicode coverage than the egui built-ins,
/// preventing square-glyph rendering for ticks, badges, and other symbols.
/// The built-in egui fonts are kept as final fallbacks so no glyph is ever lost.
///
/// On non-Windows platforms the egui defaults are used unchanged.
fn configure_fonts(ctx: &egui::Context) {
    #[cfg(target_os = "windows")]
    {
        let mut fonts = egui::FontDefinitions::default();

        // Load Windows system fonts in priority order.
        // Segoe UI covers most Latin and common UI symbols.
        // Segoe UI Emoji adds Unicode emoji and many pictographic symbols.
        // Segoe UI Symbol covers Mathematical, Braille, and other specialist blocks.
        let candidates: &[(&str, &str)] = &[
            ("Segoe UI", r"C:\Windows\Fonts\segoeui.ttf"),
            ("Segoe UI Emoji", r"C:\Windows\Fonts\seguiemj.ttf"),
            ("Segoe UI Symbol", r"C:\Windows\Fonts\seguisym.ttf"),
        ];

        let mut loaded_names: Vec<&str> = Vec::new();
        for (name, path) in candidates {
            match std::fs::read(path) {
                Ok(data) => {
                    fonts
                        .font_data
                        .insert((*name).to_owned(), egui::FontData::from_owned(data).into());
                    loaded_names.push(name);
                    tracing::debug!(font = name, "Loaded Windows system font");
                }
                Err(e) => {
                    tracing::warn!(
                        font = name,
                        error = %e,
                        "Failed to load Windows system font; some symbols may render as squares"
                    );
                }
            }
        }

        if !loaded_names.is_empty() {
            // Proportional: place Windows fonts first so they take priority over
            // the egui default (NotoSans), while keeping it as a final fallback.
            if let Some(proportional) = fonts.families.get_mut(&egui::FontFamily::Proportional) {
                for (i, name) in loaded_names.iter().enumerate() {
                    proportional.insert(i, (*name).to_owned());
                }
            }

            // Monospace: append Windows fonts as symbol fallbacks after the
            // primary monospace font (Hack) so path displays keep their
            // alignment while symbols outside the monospace range still
            // render correctly.
            if let Some(monospace) = fonts.families.get_mut(&egui::FontFamily::Monospace) {
                for name in &loaded_names {
                    monospace.push((*name).to_owned());
                }
            }

            ctx.set_fonts(fonts);
            tracing::info!(fonts = ?loaded_names, "Windows system fonts configured");
        }
    }

    // On non-Windows platforms the egui built-in fonts are used unchanged.
    #[cfg(not(target_os = "windows"))]
    let _ = ctx;
}

/// MainStreet - Local business directory for the Smoky Mountain foothills.
///
/// Browse, search, and filter local listings; contact a business or start
/// a claim on your own listing. Drop TOML catalog files into the user
/// listings directory to add or override entries.
#[derive(Parser, Debug)]
#[command(name = "MainStreet", version, about)]
struct Cli {
    /// Directory containing user catalog (.toml) files.
    /// Overrides both config.toml and the platform default.
    #[arg(short = 'l', long = "listings-dir")]
    listings_dir: Option<PathBuf>,

    /// Start with this category filter applied (e.g. "restaurants").
    #[arg(short = 'c', long = "category")]
    category: Option<String>,

    /// Enable debug logging (equivalent to RUST_LOG=debug).
    #[arg(short = 'd', long = "debug")]
    debug: bool,
}

fn main() {
    let cli = Cli::parse();

    // Resolve paths and configuration before building the subscriber so
    // the [logging] section of config.toml can shape it. Trace events
    // emitted before init (inside resolve/load) are dropped; the config
    // warnings are carried in `config_warnings` and re-logged below.
    let platform_paths = platform::config::PlatformPaths::resolve();
    let (config, config_warnings) = platform::config::load_config(&platform_paths.config_dir);

    util::logging::init(
        cli.debug,
        config.log_level.as_deref(),
        config.log_file.as_deref(),
    );

    tracing::info!(
        version = util::constants::APP_VERSION,
        debug = cli.debug,
        "MainStreet starting"
    );

    for warning in &config_warnings {
        tracing::warn!("{warning}");
    }

    // User catalog directory: CLI override > config override > platform default.
    let user_listings_dir: PathBuf = cli
        .listings_dir
        .clone()
        .or_else(|| config.user_listings_dir.clone())
        .unwrap_or_else(|| platform_paths.user_listings_dir.clone());

    let loaded =
        app::catalog_mgr::load_all_listings(Some(&user_listings_dir), config.max_listings);

    tracing::info!(listings = loaded.listings.len(), "Ready to launch GUI");

    // Create application state
    let mut state = app::state::AppState::new(
        loaded,
        std::time::Duration::from_millis(config.search_debounce_ms),
    );
    state.dark_mode = config.dark_mode;
    state.ui_font_size = config.font_size;
    state.user_listings_dir = Some(user_listings_dir);
    state.max_listings = config.max_listings;
    state.load_warnings.extend(config_warnings);

    // Apply the initial category filter, if any. An unknown id is refused
    // by set_category; fall through to an unfiltered view either way.
    match cli.category {
        Some(ref category) => {
            if !state.set_category(category) {
                tracing::warn!(
                    category = %category,
                    "Unknown category on the command line (ignored)"
                );
                state.refresh_filters();
            }
        }
        None => state.refresh_filters(),
    }

    // Launch the GUI
    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title(format!(
                "{} v{}",
                util::constants::APP_NAME,
                util::constants::APP_VERSION
            ))
            .with_inner_size([1200.0, 800.0])
            .with_min_inner_size([800.0, 500.0]),
        ..Default::default()
    };

    let result = eframe::run_native(
        util::constants::APP_NAME,
        native_options,
        Box::new(move |cc| {
            configure_fonts(&cc.egui_ctx);
            Ok(Box::new(gui::MainStreetApp::new(state)))
        }),
    );

    if let Err(e) = result {
        tracing::error!(error = %e, "Failed to launch GUI");
        eprintln!("Error: Failed to launch MainStreet GUI: {e}");
        std::process::exit(1);
    }
}
