//! Auth gate — login and sign-up forms shown while nobody is signed in.

use egui::{self, RichText, Vec2};
use crate::auth_form::{AuthForm, AuthMode, AuthRequest};
use crate::theme::*;

/// Render the auth card. Returns a request when the form validates.
pub fn auth_panel(ui: &mut egui::Ui, form: &mut AuthForm) -> Option<AuthRequest> {
    let mut request = None;

    ui.vertical_centered(|ui| {
        ui.add_space(48.0);
        egui::Frame::default()
            .fill(BG_SECONDARY)
            .corner_radius(PANEL_ROUNDING)
            .inner_margin(PANEL_PADDING * 2.0)
            .show(ui, |ui| {
                ui.set_max_width(AUTH_CARD_WIDTH);
                ui.heading(RichText::new(form.mode.heading()).color(TEXT_PRIMARY));
                ui.add_space(8.0);

                if let Some(error) = &form.error {
                    ui.label(RichText::new(error).color(ERROR));
                    ui.add_space(4.0);
                }

                ui.add_enabled_ui(!form.loading, |ui| {
                    field_label(ui, "Email");
                    ui.add(
                        egui::TextEdit::singleline(&mut form.email)
                            .hint_text("you@example.com")
                            .desired_width(f32::INFINITY),
                    );

                    field_label(ui, "Password");
                    let password = ui.add(
                        egui::TextEdit::singleline(&mut form.password)
                            .password(true)
                            .desired_width(f32::INFINITY),
                    );
                    let mut enter_pressed =
                        password.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter));

                    if form.mode == AuthMode::SignUp {
                        field_label(ui, "Confirm Password");
                        let confirm = ui.add(
                            egui::TextEdit::singleline(&mut form.confirm_password)
                                .password(true)
                                .desired_width(f32::INFINITY),
                        );
                        enter_pressed = confirm.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter));
                    }

                    ui.add_space(8.0);
                    let submit = ui.add(
                        egui::Button::new(
                            RichText::new(form.mode.submit_label(form.loading)).color(TEXT_PRIMARY),
                        )
                        .fill(ACCENT)
                        .corner_radius(PANEL_ROUNDING)
                        .min_size(Vec2::new(AUTH_CARD_WIDTH, 32.0)),
                    );
                    if submit.clicked() || enter_pressed {
                        request = form.submit();
                    }
                });

                if form.loading {
                    ui.spinner();
                }

                ui.add_space(4.0);
                let switch = ui.add_enabled(
                    !form.loading,
                    egui::Button::new(RichText::new(form.mode.switch_label()).color(ACCENT)).frame(false),
                );
                if switch.clicked() {
                    form.toggle_mode();
                }
            });
    });

    request
}

/// Placeholder shown until the identity provider reports its initial state
pub fn loading_panel(ui: &mut egui::Ui) {
    ui.centered_and_justified(|ui| {
        ui.heading(RichText::new("Loading...").color(TEXT_SECONDARY));
    });
}

fn field_label(ui: &mut egui::Ui, text: &str) {
    ui.label(RichText::new(text).color(TEXT_SECONDARY).small());
}
