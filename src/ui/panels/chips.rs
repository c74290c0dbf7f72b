// MainStreet - ui/panels/chips.rs
//
// Active-filter summary row: one removable chip per active criterion
// plus a clear-all action. Hidden entirely when no filter is active.

use crate::app::state::AppState;
use crate::core::filter::{active_chips, ChipKind};

/// Render the chip row above the card list.
pub fn render(ui: &mut egui::Ui, state: &mut AppState) {
    let chips = active_chips(&state.filter_state);
    if chips.is_empty() {
        return;
    }

    let mut removed: Option<ChipKind> = None;
    let mut clear_all = false;

    ui.horizontal_wrapped(|ui| {
        ui.label(egui::RichText::new("Filters:").small().weak());
        for chip in &chips {
            if ui
                .small_button(format!("{} \u{2715}", chip.label))
                .on_hover_text("Remove this filter")
                .clicked()
            {
                removed = Some(chip.kind.clone());
            }
        }
        ui.add_space(4.0);
        if ui.small_button("Clear all").clicked() {
            clear_all = true;
        }
    });
    ui.add_space(4.0);

    if let Some(kind) = removed {
        state.remove_chip(&kind);
    } else if clear_all {
        state.clear_filters();
    }
}
