// MainStreet - ui/panels/options.rs
//
// Options dialog: runtime-configurable application settings.
// Shown when the user opens View > Options... from the menu bar.
//
// Sections:
//   1. Appearance    - colour scheme and font size
//   2. Search        - debounce window for the search boxes
//   3. User Catalogs - where user listing files live, reload action
//
// Appearance and search settings take effect immediately. Catalog
// changes on disk are picked up by the Reload action. All values are
// clamped against bounds from util::constants.

use crate::app::state::AppState;
use crate::ui::theme;
use crate::util::constants::{
    DEFAULT_FONT_SIZE, DEFAULT_SEARCH_DEBOUNCE_MS, MAX_FONT_SIZE, MAX_SEARCH_DEBOUNCE_MS,
    MIN_FONT_SIZE, MIN_SEARCH_DEBOUNCE_MS,
};

/// Render the Options dialog (if `state.show_options` is true).
pub fn render(ctx: &egui::Context, state: &mut AppState) {
    if !state.show_options {
        return;
    }

    let mut open = true;
    egui::Window::new("Options")
        .open(&mut open)
        .collapsible(false)
        .resizable(false)
        .default_width(420.0)
        .show(ctx, |ui| {
            // =========================================================
            // Section 1: Appearance
            // =========================================================
            ui.heading("Appearance");
            ui.add_space(4.0);

            ui.checkbox(&mut state.dark_mode, "Dark mode");
            ui.add_space(4.0);

            ui.horizontal(|ui| {
                ui.label("Font size:");
                let mut v = state.ui_font_size as f64;
                if ui
                    .add(
                        egui::Slider::new(
                            &mut v,
                            (MIN_FONT_SIZE as f64)..=(MAX_FONT_SIZE as f64),
                        )
                        .step_by(0.5)
                        .suffix(" pt"),
                    )
                    .changed()
                {
                    state.ui_font_size = (v as f32).clamp(MIN_FONT_SIZE, MAX_FONT_SIZE);
                }
                if (state.ui_font_size - DEFAULT_FONT_SIZE).abs() > 0.1
                    && ui
                        .small_button("Reset")
                        .on_hover_text(format!(
                            "Reset to the built-in default ({DEFAULT_FONT_SIZE} pt)"
                        ))
                        .clicked()
                {
                    state.ui_font_size = DEFAULT_FONT_SIZE;
                }
            });
            ui.add_space(4.0);
            ui.label(
                egui::RichText::new(
                    "Scales all text in the application. Takes effect immediately.",
                )
                .small()
                .weak(),
            );

            ui.add_space(10.0);
            ui.separator();
            ui.add_space(6.0);

            // =========================================================
            // Section 2: Search
            // =========================================================
            ui.heading("Search");
            ui.add_space(2.0);
            ui.label(
                egui::RichText::new(
                    "How long after the last keystroke before the directory re-filters. \
                     Applies to the main search box and the claim wizard search. \
                     Zero disables debouncing entirely.",
                )
                .small()
                .weak(),
            );
            ui.add_space(8.0);

            ui.horizontal(|ui| {
                ui.label("Debounce window:");
                let mut v = state.search_debounce_ms as f64;
                if ui
                    .add(
                        egui::Slider::new(
                            &mut v,
                            (MIN_SEARCH_DEBOUNCE_MS as f64)..=(MAX_SEARCH_DEBOUNCE_MS as f64),
                        )
                        .integer()
                        .suffix(" ms"),
                    )
                    .changed()
                {
                    let ms =
                        (v as u64).clamp(MIN_SEARCH_DEBOUNCE_MS, MAX_SEARCH_DEBOUNCE_MS);
                    state.set_debounce_ms(ms);
                }
            });
            ui.add_space(2.0);
            ui.horizontal(|ui| {
                ui.label(
                    egui::RichText::new(format!(
                        "Default: {} ms  |  Range: {} \u{2013} {} ms",
                        DEFAULT_SEARCH_DEBOUNCE_MS,
                        MIN_SEARCH_DEBOUNCE_MS,
                        MAX_SEARCH_DEBOUNCE_MS
                    ))
                    .small()
                    .weak(),
                );
                if state.search_debounce_ms != DEFAULT_SEARCH_DEBOUNCE_MS
                    && ui
                        .small_button("Reset")
                        .on_hover_text("Reset to the built-in default")
                        .clicked()
                {
                    state.set_debounce_ms(DEFAULT_SEARCH_DEBOUNCE_MS);
                }
            });

            ui.add_space(10.0);
            ui.separator();
            ui.add_space(6.0);

            // =========================================================
            // Section 3: User Catalogs
            // =========================================================
            ui.heading("User Catalogs");
            ui.add_space(2.0);
            ui.label(
                egui::RichText::new(
                    "Place .toml catalog files here to add your own listings. A user \
                     listing with the same id as a built-in one replaces it. See \
                     listings/eat_drink.toml in the repository for the format.",
                )
                .small()
                .weak(),
            );
            ui.add_space(8.0);

            ui.horizontal(|ui| {
                ui.label("Catalog folder:");
                if let Some(ref dir) = state.user_listings_dir {
                    ui.monospace(dir.display().to_string()).on_hover_text(
                        "Scanned for .toml catalogs on startup and on Reload",
                    );
                } else {
                    ui.label(egui::RichText::new("(not configured)").weak());
                }
            });
            ui.add_space(4.0);

            let summary = &state.catalog_summary;
            ui.label(
                egui::RichText::new(format!(
                    "{} user listings loaded,  {} overriding built-in entries",
                    summary.user_listings, summary.overridden
                ))
                .small()
                .weak(),
            );
            if summary.files_with_errors > 0 {
                ui.colored_label(
                    theme::ERROR_TEXT,
                    egui::RichText::new(format!(
                        "{} catalog file(s) had load errors:",
                        summary.files_with_errors
                    ))
                    .small(),
                );
            }
            if !state.load_warnings.is_empty() {
                const SHOWN: usize = 6;
                for warning in state.load_warnings.iter().take(SHOWN) {
                    ui.colored_label(
                        theme::ERROR_TEXT,
                        egui::RichText::new(warning.as_str()).small(),
                    );
                }
                let hidden = state.load_warnings.len().saturating_sub(SHOWN);
                if hidden > 0 {
                    ui.label(
                        egui::RichText::new(format!("(+{hidden} more in the log)"))
                            .small()
                            .weak(),
                    );
                }
            }
            ui.add_space(8.0);

            ui.horizontal(|ui| {
                let has_dir = state.user_listings_dir.is_some();
                if ui
                    .add_enabled(has_dir, egui::Button::new("Open Folder"))
                    .on_hover_text("Open the user catalog folder in your file manager")
                    .clicked()
                {
                    state.pending_open_dir = state.user_listings_dir.clone();
                }
                ui.add_space(4.0);
                if ui
                    .button("Reload Catalogs")
                    .on_hover_text(
                        "Re-scan the catalog folder and merge user listings with the \
                         built-in set. Takes effect immediately.",
                    )
                    .clicked()
                {
                    state.request_reload_catalogs = true;
                }
            });

            ui.add_space(10.0);
            ui.separator();
            ui.add_space(6.0);

            // =========================================================
            // Footer
            // =========================================================
            ui.label(
                egui::RichText::new(
                    "Changes here apply to this session. To make them permanent, set \
                     them in config.toml next to the catalog folder \
                     (see config.example.toml in the repository).",
                )
                .small()
                .italics()
                .weak(),
            );
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                if ui.button("Close").clicked() {
                    state.show_options = false;
                }
            });
        });

    if !open {
        state.show_options = false;
    }
}
