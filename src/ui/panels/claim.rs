// MainStreet - ui/panels/claim.rs
//
// Three-step claim wizard modal. Step 1 searches the claim registry
// (debounced), step 2 picks a verification method, step 3 confirms.
// All transition rules live in core::claim; this panel only renders the
// current step and forwards actions.

use crate::app::state::{ActiveModal, AppState};
use crate::core::claim::{ClaimWizard, VerificationMethod};
use crate::ui::theme;
use std::time::Instant;

/// Render the claim wizard (if it is open).
pub fn render(ctx: &egui::Context, state: &mut AppState) {
    let mut open = true;
    let mut dismiss_clicked = false;
    let mut query_edited = false;
    let mut selection: Option<String> = None;

    {
        let ActiveModal::Claim(wizard) = &mut state.active_modal else {
            return;
        };

        egui::Window::new("Claim your listing")
            .open(&mut open)
            .collapsible(false)
            .resizable(false)
            .min_width(theme::MODAL_MIN_WIDTH)
            .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
            .show(ctx, |ui| {
                step_indicator(ui, wizard);
                ui.separator();
                ui.add_space(6.0);

                match wizard.step {
                    1 => {
                        ui.label("Search for your business:");
                        if ui.text_edit_singleline(&mut wizard.query).changed() {
                            query_edited = true;
                        }
                        ui.add_space(6.0);

                        let results = wizard.results();
                        if !wizard.has_committed_query() {
                            ui.label(
                                egui::RichText::new(
                                    "Start typing your business name to search the registry.",
                                )
                                .weak(),
                            );
                        } else if results.is_empty() {
                            ui.label(egui::RichText::new("No businesses match that name.").strong());
                            ui.label(
                                egui::RichText::new(
                                    "Not listed yet? Email listings@mainstreet.example \
                                     to add your business to the directory.",
                                )
                                .small()
                                .weak(),
                            );
                        } else {
                            for record in results {
                                let is_selected =
                                    wizard.selected.as_deref() == Some(record.name.as_str());
                                ui.horizontal(|ui| {
                                    if ui.selectable_label(is_selected, &record.name).clicked() {
                                        selection = Some(record.name.clone());
                                    }
                                    ui.with_layout(
                                        egui::Layout::right_to_left(egui::Align::Center),
                                        |ui| {
                                            if record.claimed {
                                                ui.colored_label(
                                                    theme::CLAIMED_BADGE,
                                                    egui::RichText::new("Already claimed").small(),
                                                );
                                            } else {
                                                ui.colored_label(
                                                    theme::AVAILABLE_BADGE,
                                                    egui::RichText::new("Available").small(),
                                                );
                                            }
                                        },
                                    );
                                });
                                ui.label(
                                    egui::RichText::new(&record.address).small().weak(),
                                );
                                ui.add_space(2.0);
                            }
                        }

                        if let Some(ref selected) = wizard.selected {
                            ui.add_space(4.0);
                            ui.label(
                                egui::RichText::new(format!("Selected: {selected}")).small(),
                            );
                        }
                    }
                    2 => {
                        let business = wizard
                            .selected
                            .as_deref()
                            .unwrap_or("your business")
                            .to_string();
                        ui.label(format!("How should we verify that you own {business}?"));
                        ui.add_space(6.0);

                        for method in VerificationMethod::all() {
                            ui.radio_value(&mut wizard.method, Some(*method), method.label());
                            ui.indent(method.label(), |ui| {
                                ui.label(
                                    egui::RichText::new(method.detail()).small().weak(),
                                );
                            });
                            ui.add_space(2.0);
                        }
                    }
                    _ => {
                        ui.vertical_centered(|ui| {
                            ui.label(
                                egui::RichText::new("\u{2713} Claim submitted")
                                    .size(18.0)
                                    .strong()
                                    .color(theme::SUCCESS_TEXT),
                            );
                        });
                        ui.add_space(8.0);

                        egui::Grid::new("claim_confirmation")
                            .num_columns(2)
                            .spacing([12.0, 4.0])
                            .show(ui, |ui| {
                                ui.label("Business:");
                                ui.label(wizard.selected.as_deref().unwrap_or("(none)"));
                                ui.end_row();

                                ui.label("Verification:");
                                ui.label(wizard.method.map(|m| m.label()).unwrap_or("(none)"));
                                ui.end_row();
                            });

                        ui.add_space(6.0);
                        ui.label(
                            egui::RichText::new(
                                "Our team reviews claims within two business days.",
                            )
                            .small()
                            .weak(),
                        );
                    }
                }

                ui.add_space(8.0);
                ui.separator();
                ui.horizontal(|ui| {
                    if wizard.back_visible() && ui.button("Back").clicked() {
                        wizard.back();
                    }
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        let primary = ui.add_enabled(
                            wizard.can_advance(),
                            egui::Button::new(wizard.primary_label()),
                        );
                        if primary.clicked() {
                            if wizard.is_terminal() {
                                dismiss_clicked = true;
                            } else {
                                wizard.advance();
                            }
                        }
                    });
                });
            });
    }

    if query_edited {
        state.claim_query_edited(Instant::now());
    }
    if let Some(name) = selection {
        state.select_claim_result(&name);
    }
    if !open || dismiss_clicked {
        state.close_modal();
    }
}

/// Compact step indicator: completed steps get a tick, the current step
/// is emphasised, future steps are dimmed.
fn step_indicator(ui: &mut egui::Ui, wizard: &ClaimWizard) {
    ui.horizontal(|ui| {
        for (step, label) in [(1u8, "Find"), (2, "Verify"), (3, "Confirm")] {
            if step > 1 {
                ui.label(egui::RichText::new("\u{00b7}").weak());
            }
            let text = if wizard.step_completed(step) {
                egui::RichText::new(format!("\u{2713} {label}"))
                    .color(theme::SUCCESS_TEXT)
                    .small()
            } else if wizard.step == step {
                egui::RichText::new(format!("{step}. {label}")).strong()
            } else {
                egui::RichText::new(format!("{step}. {label}")).weak().small()
            };
            ui.label(text);
        }
    });
}
