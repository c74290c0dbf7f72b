// MainStreet - gui.rs
//
// Top-level eframe::App implementation.
// Wires together all UI panels, pumps the debounce timers, and consumes
// the action flags panels set (website opens, folder reveals, reloads).

use crate::app::catalog_mgr;
use crate::app::leads::LogLeadSink;
use crate::app::state::{ActiveModal, AppState};
use crate::core::export::ExportFormat;
use crate::platform;
use crate::ui;
use std::time::Instant;

/// The MainStreet application.
pub struct MainStreetApp {
    pub state: AppState,
    lead_sink: LogLeadSink,
}

impl MainStreetApp {
    /// Create a new application instance with the given state.
    pub fn new(state: AppState) -> Self {
        Self {
            state,
            lead_sink: LogLeadSink,
        }
    }

    /// Ask for a destination and export the visible listings there.
    fn export_via_dialog(&mut self, format: ExportFormat) {
        let Some(dest) = rfd::FileDialog::new()
            .add_filter(format.label(), &[format.extension()])
            .set_file_name(format!("mainstreet.{}", format.extension()))
            .save_file()
        else {
            return;
        };

        if let Err(e) = self.state.export_visible(&dest, format) {
            tracing::warn!(error = %e, "Export failed");
            self.state
                .announcer
                .announce(format!("Export failed: {e}"));
        }
    }
}

impl eframe::App for MainStreetApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let now = Instant::now();

        // Fire any debounce deadline that has passed. A fired timer means
        // the filter set just changed, so this frame already paints the
        // new results.
        self.state.tick(now);

        apply_theme(ctx, &self.state);

        // Escape dismisses whichever modal is open.
        if !matches!(self.state.active_modal, ActiveModal::None)
            && ctx.input(|i| i.key_pressed(egui::Key::Escape))
        {
            self.state.close_modal();
        }

        // ---- Consume flags set by panels on the previous frame ----
        // pending_website: a directory card's Website button was clicked.
        if let Some(url) = self.state.pending_website.take() {
            platform::fs::open_in_browser(&url);
        }
        // pending_open_dir: Options asked to reveal the catalog folder.
        // Created on demand so first-time users land in a real directory.
        if let Some(dir) = self.state.pending_open_dir.take() {
            if let Err(e) = std::fs::create_dir_all(&dir) {
                tracing::warn!(
                    dir = %dir.display(),
                    error = %e,
                    "Failed to create catalog directory"
                );
                self.state
                    .announcer
                    .announce(format!("Cannot create catalog folder: {e}"));
            } else {
                platform::fs::open_directory(&dir);
            }
        }
        // request_reload_catalogs: re-scan user catalogs and re-merge.
        if self.state.request_reload_catalogs {
            self.state.request_reload_catalogs = false;
            let loaded = catalog_mgr::load_all_listings(
                self.state.user_listings_dir.as_deref(),
                self.state.max_listings,
            );
            self.state.replace_catalog(loaded);
        }

        // Top menu bar
        egui::TopBottomPanel::top("menu_bar").show(ctx, |ui| {
            egui::menu::bar(ui, |ui| {
                ui.menu_button("File", |ui| {
                    let has_visible = !self.state.filtered_indices.is_empty();
                    ui.add_enabled_ui(has_visible, |ui| {
                        if ui.button("Export CSV\u{2026}").clicked() {
                            self.export_via_dialog(ExportFormat::Csv);
                            ui.close_menu();
                        }
                        if ui.button("Export JSON\u{2026}").clicked() {
                            self.export_via_dialog(ExportFormat::Json);
                            ui.close_menu();
                        }
                    });
                    ui.separator();
                    if ui.button("Exit").clicked() {
                        ctx.send_viewport_cmd(egui::ViewportCommand::Close);
                    }
                });
                ui.menu_button("View", |ui| {
                    if ui.button("Options\u{2026}").clicked() {
                        self.state.show_options = true;
                        ui.close_menu();
                    }
                    if ui.button("About MainStreet").clicked() {
                        self.state.show_about = true;
                        ui.close_menu();
                    }
                });
            });
        });

        // Status bar: latest announcement on the left, counts on the right.
        egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.label(self.state.announcer.live().unwrap_or("Ready."));
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    ui.label(format!(
                        "{} of {} businesses",
                        self.state.visible_count(),
                        self.state.total_count()
                    ));
                });
            });
        });

        // Left sidebar: search box and filter groups.
        egui::SidePanel::left("sidebar")
            .default_width(ui::theme::SIDEBAR_WIDTH)
            .resizable(true)
            .show(ctx, |ui| {
                egui::ScrollArea::vertical()
                    .id_salt("sidebar_filters")
                    .auto_shrink([false; 2])
                    .show(ui, |ui| {
                        ui::panels::filters::render(ui, &mut self.state);
                    });
            });

        // Central panel: active-filter chips above the card list.
        egui::CentralPanel::default().show(ctx, |ui| {
            ui::panels::chips::render(ui, &mut self.state);
            ui::panels::directory::render(ui, &mut self.state);
        });

        // Modals last so they draw over everything else.
        ui::panels::contact::render(ctx, &mut self.state, &mut self.lead_sink);
        ui::panels::claim::render(ctx, &mut self.state);
        ui::panels::about::render(ctx, &mut self.state);
        ui::panels::options::render(ctx, &mut self.state);

        // Wake up exactly when the earliest debounce deadline is due, so
        // a pending search commits even if no input event arrives.
        if let Some(wait) = self.state.next_wakeup(now) {
            ctx.request_repaint_after(wait);
        }
    }
}

/// Apply the current colour scheme and font scale to the egui style.
fn apply_theme(ctx: &egui::Context, state: &AppState) {
    use egui::{FontFamily, FontId, TextStyle};

    let mut style = (*ctx.style()).clone();
    style.visuals = if state.dark_mode {
        egui::Visuals::dark()
    } else {
        egui::Visuals::light()
    };

    let base = state.ui_font_size;
    style.text_styles = [
        (
            TextStyle::Heading,
            FontId::new(base * 1.6, FontFamily::Proportional),
        ),
        (TextStyle::Body, FontId::new(base, FontFamily::Proportional)),
        (
            TextStyle::Monospace,
            FontId::new(base * 0.95, FontFamily::Monospace),
        ),
        (
            TextStyle::Button,
            FontId::new(base, FontFamily::Proportional),
        ),
        (
            TextStyle::Small,
            FontId::new(base * 0.8, FontFamily::Proportional),
        ),
    ]
    .into();

    ctx.set_style(style);
}
