// MainStreet - ui/panels/directory.rs
//
// The card list: one card per visible listing, plus the empty-state
// panel when nothing matches. Scrolling is disabled while a modal is
// open (page scroll lock).

use crate::app::state::AppState;
use crate::core::model::{category_label, tag_label};
use crate::ui::theme;

/// Render the listing cards for the current filter state.
pub fn render(ui: &mut egui::Ui, state: &mut AppState) {
    if state.filtered_indices.is_empty() {
        render_empty_state(ui, state);
        return;
    }

    // Card buttons cannot mutate state mid-iteration (the listings are
    // borrowed), so clicks land in these and are applied afterwards.
    let mut contact_target: Option<String> = None;
    let mut website_target: Option<String> = None;

    let scroll_enabled = !state.scroll_locked();
    egui::ScrollArea::vertical()
        .id_salt("directory_cards")
        .auto_shrink([false; 2])
        .enable_scrolling(scroll_enabled)
        .show(ui, |ui| {
            for &idx in &state.filtered_indices {
                let listing = &state.listings[idx];

                ui.group(|ui| {
                    ui.set_width(ui.available_width());

                    ui.horizontal(|ui| {
                        ui.label(egui::RichText::new(&listing.name).size(17.0).strong());
                        ui.with_layout(
                            egui::Layout::right_to_left(egui::Align::Center),
                            |ui| {
                                ui.label(
                                    egui::RichText::new(category_label(&listing.category))
                                        .color(theme::category_colour(&listing.category))
                                        .small()
                                        .strong(),
                                );
                            },
                        );
                    });

                    if !listing.tags.is_empty() {
                        let tag_line = listing
                            .tags
                            .iter()
                            .map(|t| tag_label(t))
                            .collect::<Vec<_>>()
                            .join("  \u{00b7}  ");
                        ui.label(egui::RichText::new(tag_line).small().weak());
                    }

                    ui.add_space(4.0);
                    ui.label(&listing.description);
                    ui.add_space(4.0);
                    ui.label(
                        egui::RichText::new(format!(
                            "{}  \u{00b7}  {}",
                            listing.address, listing.phone
                        ))
                        .small(),
                    );

                    ui.add_space(6.0);
                    ui.horizontal(|ui| {
                        if ui.button("Contact").clicked() {
                            contact_target = Some(listing.name.clone());
                        }
                        if let Some(ref url) = listing.website {
                            if ui
                                .button("Website \u{2197}")
                                .on_hover_text(url)
                                .clicked()
                            {
                                website_target = Some(url.clone());
                            }
                        }
                    });
                });
                ui.add_space(theme::CARD_SPACING);
            }
        });

    if let Some(name) = contact_target {
        state.open_contact(&name);
    }
    if let Some(url) = website_target {
        state.pending_website = Some(url);
    }
}

/// Zero-result fallback. Offers clear-all when filters caused it; an
/// empty catalog gets a plainer message.
fn render_empty_state(ui: &mut egui::Ui, state: &mut AppState) {
    ui.vertical_centered(|ui| {
        ui.add_space(48.0);
        ui.label(egui::RichText::new("No businesses found").size(20.0).strong());
        if state.filter_state.is_empty() {
            ui.add_space(4.0);
            ui.label("The catalog is empty. Add listing files to your catalog folder.");
        } else {
            ui.add_space(4.0);
            ui.label("Try removing a filter or broadening your search.");
            ui.add_space(10.0);
            if ui.button("Clear all filters").clicked() {
                state.clear_filters();
            }
        }
    });
}
