// MainStreet - ui/panels/contact.rs
//
// Contact-the-owner modal. Two views: the form, and the post-submit
// confirmation. Rendered as a centred, non-resizable window; Escape and
// the window close button both dismiss it via the app's close path.

use crate::app::leads::LeadSink;
use crate::app::state::{ActiveModal, AppState};
use crate::core::contact::ContactView;
use crate::ui::theme;

/// Render the contact modal (if one is open).
pub fn render(ctx: &egui::Context, state: &mut AppState, sink: &mut dyn LeadSink) {
    let mut open = true;
    let mut submit_clicked = false;
    let mut dismiss_clicked = false;

    {
        let ActiveModal::Contact(form) = &mut state.active_modal else {
            return;
        };
        let business = form.business.clone();

        egui::Window::new(format!("Contact {business}"))
            .open(&mut open)
            .collapsible(false)
            .resizable(false)
            .min_width(theme::MODAL_MIN_WIDTH)
            .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
            .show(ctx, |ui| match form.view {
                ContactView::Form => {
                    ui.label(
                        egui::RichText::new(format!(
                            "Your message goes straight to {business}."
                        ))
                        .small()
                        .weak(),
                    );
                    ui.add_space(8.0);

                    egui::Grid::new("contact_fields")
                        .num_columns(2)
                        .spacing([10.0, 6.0])
                        .show(ui, |ui| {
                            ui.label("Name:");
                            ui.text_edit_singleline(&mut form.name);
                            ui.end_row();

                            ui.label("Email:");
                            ui.text_edit_singleline(&mut form.email);
                            ui.end_row();

                            ui.label("Phone:");
                            ui.text_edit_singleline(&mut form.phone);
                            ui.end_row();

                            ui.label("Subject:");
                            ui.text_edit_singleline(&mut form.subject);
                            ui.end_row();
                        });

                    ui.add_space(4.0);
                    ui.label("Message:");
                    ui.add(
                        egui::TextEdit::multiline(&mut form.message)
                            .desired_rows(4)
                            .desired_width(f32::INFINITY),
                    );

                    if let Some(ref reason) = form.delivery_error {
                        ui.add_space(4.0);
                        ui.colored_label(theme::ERROR_TEXT, reason);
                    }

                    ui.add_space(8.0);
                    ui.separator();
                    ui.horizontal(|ui| {
                        let missing = form.missing_required();
                        let send = ui
                            .add_enabled(missing.is_empty(), egui::Button::new("Send message"))
                            .on_disabled_hover_text(format!(
                                "Required: {}",
                                missing.join(", ")
                            ));
                        if send.clicked() {
                            submit_clicked = true;
                        }
                        if ui.button("Cancel").clicked() {
                            dismiss_clicked = true;
                        }
                    });
                }
                ContactView::Submitted => {
                    ui.add_space(8.0);
                    ui.vertical_centered(|ui| {
                        ui.label(
                            egui::RichText::new("\u{2713} Message sent")
                                .size(18.0)
                                .strong()
                                .color(theme::SUCCESS_TEXT),
                        );
                        ui.add_space(4.0);
                        ui.label(format!(
                            "Thanks! {business} usually replies within a couple of days."
                        ));
                    });
                    ui.add_space(10.0);
                    ui.separator();
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        if ui.button("Done").clicked() {
                            dismiss_clicked = true;
                        }
                    });
                }
            });
    }

    if submit_clicked {
        state.submit_contact(sink);
    }
    if !open || dismiss_clicked {
        state.close_modal();
    }
}
