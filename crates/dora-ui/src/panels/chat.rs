//! Chat panel — transcript, pending marker, and the auto-sizing input.

use egui::{self, Align, Key, Layout, RichText, ScrollArea, Vec2};
use dora_core::input::{classify_key, KeyAction};
use dora_types::message::{Message, Role};
use dora_types::session::SessionSnapshot;
use crate::state::UiState;
use crate::theme::*;

const INPUT_ID: &str = "chat_input";
const SEND_BUTTON_WIDTH: f32 = 60.0;

/// What the user asked for this frame
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChatAction {
    Submit(String),
    SignOut,
}

/// Render the chat panel. Returns an action when the user submits or signs out.
pub fn chat_panel(
    ui: &mut egui::Ui,
    state: &mut UiState,
    session: &SessionSnapshot,
    title: &str,
) -> Option<ChatAction> {
    let mut action = None;
    let input_id = egui::Id::new(INPUT_ID);

    egui::Frame::default()
        .fill(BG_PRIMARY)
        .inner_margin(PANEL_PADDING)
        .show(ui, |ui| {
            ui.vertical(|ui| {
                // Header
                ui.horizontal(|ui| {
                    ui.heading(RichText::new(title).color(TEXT_PRIMARY).strong());
                    ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
                        if ui.button("Sign out").clicked() {
                            action = Some(ChatAction::SignOut);
                        }
                        if let Some(identity) = &state.identity {
                            ui.label(
                                RichText::new(identity.display_name())
                                    .color(TEXT_SECONDARY)
                                    .small(),
                            );
                        }
                        let status_color = if session.pending { WARNING } else { SUCCESS };
                        ui.label(RichText::new(&state.status_text).color(status_color).small());
                    });
                });

                ui.separator();

                // Transcript
                let input_height = state.input.height();
                let transcript_height = (ui.available_height() - input_height - 24.0).max(0.0);
                let scroll_to_latest = state.take_scroll(session.revision);
                let pending_index = session.pending_index();
                ScrollArea::vertical()
                    .max_height(transcript_height)
                    .auto_shrink([false, false])
                    .stick_to_bottom(true)
                    .show(ui, |ui| {
                        for (index, message) in session.messages.iter().enumerate() {
                            render_message(ui, message, pending_index == Some(index));
                            ui.add_space(4.0);
                        }
                        if scroll_to_latest {
                            ui.scroll_to_cursor(Some(Align::BOTTOM));
                        }
                    });

                ui.add_space(8.0);

                // Input area, inert while an exchange is pending
                ui.horizontal(|ui| {
                    let enabled = !session.pending;
                    let width = (ui.available_width() - SEND_BUTTON_WIDTH - 10.0).max(0.0);

                    // Consume Enter before the text edit turns it into a newline.
                    // Only Shift continues the line; any other modifier still submits.
                    let submit_key = enabled
                        && ui.memory(|m| m.has_focus(input_id))
                        && ui.input_mut(|i| {
                            let modifiers = i.modifiers;
                            classify_key(i.key_pressed(Key::Enter), modifiers.shift)
                                == KeyAction::Submit
                                && i.consume_key(modifiers, Key::Enter)
                        });

                    let output = ui
                        .add_enabled_ui(enabled, |ui| {
                            ScrollArea::vertical()
                                .id_salt("chat_input_scroll")
                                .max_height(input_height)
                                .show(ui, |ui| {
                                    egui::TextEdit::multiline(&mut state.input_text)
                                        .id(input_id)
                                        .hint_text("Type your message...")
                                        .desired_width(width)
                                        .desired_rows(1)
                                        .min_size(Vec2::new(width, input_height))
                                        .font(egui::FontId::proportional(14.0))
                                        .show(ui)
                                })
                                .inner
                        })
                        .inner;

                    if output.response.changed() {
                        state.input.on_change(output.galley.size().y);
                    }
                    // A disabled edit drops focus, so hold the request until pending clears.
                    if enabled && state.take_focus_request() {
                        output.response.request_focus();
                    }

                    let send_enabled = enabled && !state.input_text.trim().is_empty();
                    let send_btn = ui.add_enabled(
                        send_enabled,
                        egui::Button::new(RichText::new("Send").color(TEXT_PRIMARY))
                            .fill(if send_enabled { ACCENT } else { BG_SURFACE })
                            .corner_radius(PANEL_ROUNDING)
                            .min_size(Vec2::new(SEND_BUTTON_WIDTH, 0.0)),
                    );

                    if submit_key || send_btn.clicked() {
                        action = Some(ChatAction::Submit(state.input_text.clone()));
                    }
                });
            });
        });

    action
}

fn render_message(ui: &mut egui::Ui, message: &Message, pending: bool) {
    let (label_color, bg, layout) = match message.role {
        Role::User => (ACCENT, BG_SURFACE, Layout::top_down(Align::Max)),
        Role::Assistant => (SUCCESS, BG_SECONDARY, Layout::top_down(Align::Min)),
    };
    let time = message
        .created_at
        .with_timezone(&chrono::Local)
        .format("%H:%M")
        .to_string();

    ui.with_layout(layout, |ui| {
        egui::Frame::default()
            .fill(bg)
            .corner_radius(BUBBLE_ROUNDING)
            .inner_margin(8.0)
            .show(ui, |ui| {
                ui.horizontal(|ui| {
                    ui.label(RichText::new(message.role.label()).color(label_color).strong().small());
                    ui.label(RichText::new(time).color(TEXT_SECONDARY).small());
                });
                ui.label(RichText::new(&message.content).color(TEXT_PRIMARY));
                if pending {
                    ui.horizontal(|ui| {
                        ui.spinner();
                        ui.label(RichText::new("...").color(TEXT_SECONDARY));
                    });
                }
            });
    });
}
