// MainStreet - ui/panels/filters.rs
//
// Filter controls sidebar: search box, category picker, ownership and
// tag checkboxes, clear-all, and the claim-your-listing entry point.

use crate::app::state::AppState;
use crate::core::model::{category_label, tag_label, OwnershipFlag};
use std::time::Instant;

/// Render the filter controls.
pub fn render(ui: &mut egui::Ui, state: &mut AppState) {
    ui.heading("Find a business");
    ui.separator();

    // Search box. Keystrokes only schedule the debounce; the filter
    // itself is committed when the window closes or on Enter.
    ui.label("Search:");
    let response = ui.text_edit_singleline(&mut state.search_input);
    if response.changed() {
        state.search_edited(Instant::now());
    }
    if response.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter)) {
        state.commit_search();
    }

    ui.add_space(6.0);

    // Category picker: a single category or none.
    ui.label("Category:");
    let selected_label = state
        .filter_state
        .category
        .as_deref()
        .map(category_label)
        .unwrap_or_else(|| "All categories".to_string());
    let categories = state.categories.clone();
    let mut category_changed = false;
    egui::ComboBox::from_id_salt("category_filter")
        .selected_text(selected_label)
        .width(180.0)
        .show_ui(ui, |ui| {
            if ui
                .selectable_label(state.filter_state.category.is_none(), "All categories")
                .clicked()
            {
                state.filter_state.category = None;
                category_changed = true;
            }
            for category in &categories {
                let is_selected = state.filter_state.category.as_deref() == Some(category);
                if ui
                    .selectable_label(is_selected, category_label(category))
                    .clicked()
                {
                    state.filter_state.category = Some(category.clone());
                    category_changed = true;
                }
            }
        });
    if category_changed {
        state.refresh_filters();
    }

    ui.add_space(6.0);

    // Ownership checkboxes (OR within the group).
    ui.label("Ownership:");
    let mut ownership_changed = false;
    for flag in OwnershipFlag::all() {
        let mut checked = state.filter_state.ownership.contains(flag);
        if ui.checkbox(&mut checked, flag.label()).changed() {
            if checked {
                state.filter_state.ownership.insert(*flag);
            } else {
                state.filter_state.ownership.remove(flag);
            }
            ownership_changed = true;
        }
    }
    if ownership_changed {
        state.refresh_filters();
    }

    ui.add_space(6.0);

    // Tag checkboxes (AND within the group).
    ui.label("Features:");
    let tags = state.tag_vocabulary.clone();
    let mut tags_changed = false;
    for tag in &tags {
        let mut checked = state.filter_state.tags.contains(tag);
        if ui.checkbox(&mut checked, tag_label(tag)).changed() {
            if checked {
                state.filter_state.tags.insert(tag.clone());
            } else {
                state.filter_state.tags.remove(tag);
            }
            tags_changed = true;
        }
    }
    if tags_changed {
        state.refresh_filters();
    }

    // Clear-all only appears while something is filtered.
    if !state.filter_state.is_empty() {
        ui.add_space(8.0);
        if ui.button("Clear all filters").clicked() {
            state.clear_filters();
        }
    }

    ui.add_space(12.0);
    ui.separator();

    ui.label(egui::RichText::new("Own a business here?").strong());
    if ui.button("Claim your listing\u{2026}").clicked() {
        state.open_claim();
    }
}
