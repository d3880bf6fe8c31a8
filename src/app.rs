use crate::assistant::AssistantClient;
use crate::board::{Board, CELL_COUNT};
use crate::event::AppEvent;
use crate::session::{AssistantSession, Role};
use crate::theme::Theme;
use eframe::egui::{self, Align, Align2, CornerRadius, Id, Layout, RichText, ScrollArea};
use std::sync::mpsc::{Receiver, TryRecvError};
use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

const BUSY_REPAINT_INTERVAL: Duration = Duration::from_millis(100);
const CHAT_INPUT_ID: &str = "chat_input";

pub struct TicTacApp {
    rx: Receiver<AppEvent>,
    assistant: AssistantClient,
    theme: Theme,
    board: Board,
    session: AssistantSession,
    chat_open: bool,
    diagnostics_log: Vec<String>,
    scroll_to_bottom: bool,
}

impl TicTacApp {
    pub fn new(rx: Receiver<AppEvent>, assistant: AssistantClient, theme: Theme) -> Self {
        let mut app = Self {
            rx,
            assistant,
            theme,
            board: Board::new(),
            session: AssistantSession::new(),
            chat_open: false,
            diagnostics_log: Vec::new(),
            scroll_to_bottom: false,
        };
        let model = app.assistant.model().to_string();
        app.log_diagnostic(format!("assistant model: {model}"));
        app
    }

    fn timestamp() -> String {
        match SystemTime::now().duration_since(UNIX_EPOCH) {
            Ok(duration) => duration.as_secs().to_string(),
            Err(_) => "0".to_string(),
        }
    }

    fn log_diagnostic(&mut self, message: impl Into<String>) {
        self.diagnostics_log
            .push(format!("[{}] {}", Self::timestamp(), message.into()));
    }

    fn submit_prompt(&mut self, ctx: &egui::Context) {
        let Some(conversation) = self.session.submit_draft() else {
            return;
        };
        self.log_diagnostic(format!(
            "sending {} message(s) to the assistant",
            conversation.len()
        ));
        self.assistant.send(conversation);
        self.scroll_to_bottom = true;
        ctx.request_repaint();
    }

    fn drain_events(&mut self, ctx: &egui::Context) {
        loop {
            match self.rx.try_recv() {
                Ok(event) => self.apply_event(event, ctx),
                Err(TryRecvError::Empty) => break,
                Err(TryRecvError::Disconnected) => {
                    self.log_diagnostic("event channel disconnected");
                    break;
                }
            }
        }
    }

    fn apply_event(&mut self, event: AppEvent, ctx: &egui::Context) {
        let now = Instant::now();
        match event {
            AppEvent::ReplyReceived(reply) => {
                self.log_diagnostic("assistant replied");
                self.session.resolve(Ok(reply), now);
            }
            AppEvent::RequestFailed(err) => {
                tracing::error!(error = %err, "assistant request failed");
                self.log_diagnostic(format!("assistant error: {err}"));
                self.session.resolve(Err(err), now);
            }
        }
        self.scroll_to_bottom = true;
        ctx.request_repaint();
    }

    fn render_top_bar(&mut self, ctx: &egui::Context) {
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.heading("Tic Tac Toe");
                ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
                    ui.label(RichText::new("Ocean Professional").color(self.theme.primary));
                });
            });
            ui.label(
                RichText::new("Centralized 3x3 board layout with minimal controls.")
                    .color(self.theme.text_muted),
            );
        });
    }

    fn render_board(&mut self, ctx: &egui::Context) {
        let theme = &self.theme;
        let mut clicked: Option<usize> = None;
        let mut reset = false;

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.vertical_centered(|ui| {
                theme.card_frame().show(ui, |ui| {
                    ui.label(format!("Next: {}", self.board.next_mark()));
                    egui::Grid::new("board_grid")
                        .spacing([theme.spacing_12, theme.spacing_12])
                        .show(ui, |ui| {
                            for index in 0..CELL_COUNT {
                                let label = self
                                    .board
                                    .cell(index)
                                    .map(|mark| mark.to_string())
                                    .unwrap_or_default();
                                let button = egui::Button::new(RichText::new(label).size(28.0))
                                    .fill(theme.surface)
                                    .corner_radius(CornerRadius::same(theme.radius_12));
                                if ui
                                    .add_sized([theme.cell_size, theme.cell_size], button)
                                    .clicked()
                                {
                                    clicked = Some(index);
                                }
                                if index % 3 == 2 {
                                    ui.end_row();
                                }
                            }
                        });
                    ui.add_space(theme.spacing_16);
                    reset = ui.button("Reset Game").clicked();
                });
            });

            ui.add_space(theme.spacing_16);
            egui::CollapsingHeader::new("Diagnostics")
                .default_open(false)
                .show(ui, |ui| {
                    ScrollArea::vertical()
                        .id_salt("diagnostics_log")
                        .max_height(90.0)
                        .stick_to_bottom(true)
                        .show(ui, |ui| {
                            for entry in &self.diagnostics_log {
                                ui.label(entry);
                            }
                        });
                });
        });

        if let Some(index) = clicked {
            self.board.apply_move(index);
        }
        if reset {
            self.board.reset();
            self.log_diagnostic("board reset");
        }
    }

    fn render_chat_toggle(&mut self, ctx: &egui::Context) {
        let theme = &self.theme;
        let (label, hover) = if self.chat_open {
            ("×", "Close chat")
        } else {
            ("💬", "Open chat")
        };

        egui::Area::new(Id::new("chat_toggle"))
            .anchor(Align2::RIGHT_BOTTOM, [-20.0, -20.0])
            .order(egui::Order::Foreground)
            .show(ctx, |ui| {
                let button = egui::Button::new(
                    RichText::new(label).size(22.0).color(theme.text_on_accent),
                )
                .fill(theme.primary)
                .corner_radius(CornerRadius::same(28));
                let response = ui
                    .add_sized([theme.toggle_size, theme.toggle_size], button)
                    .on_hover_text(hover);
                if response.clicked() {
                    self.chat_open = !self.chat_open;
                }
            });
    }

    fn render_chat_window(&mut self, ctx: &egui::Context) {
        if !self.chat_open {
            return;
        }

        let input_id = Id::new(CHAT_INPUT_ID);
        let enter_pressed = ctx.memory(|mem| mem.has_focus(input_id))
            && ctx.input_mut(|i| {
                // Shift+Enter falls through to the text edit as a newline.
                !i.modifiers.shift && i.consume_key(egui::Modifiers::NONE, egui::Key::Enter)
            });

        let theme = &self.theme;
        let mut send_now = enter_pressed;

        egui::Window::new("Tic Tac Toe Assistant")
            .anchor(Align2::RIGHT_BOTTOM, [-20.0, -88.0])
            .collapsible(false)
            .resizable(false)
            .default_width(340.0)
            .show(ctx, |ui| {
                ui.label(
                    RichText::new("Ask about rules, openings, forks, and blocks.")
                        .small()
                        .color(theme.text_muted),
                );
                ui.separator();

                theme.transcript_frame().show(ui, |ui| {
                    ScrollArea::vertical()
                        .id_salt("chat_transcript")
                        .max_height(320.0)
                        .auto_shrink([false, true])
                        .stick_to_bottom(true)
                        .show(ui, |ui| {
                            for message in self.session.history() {
                                let from_user = message.role == Role::User;
                                let layout = if from_user {
                                    Layout::right_to_left(Align::Min)
                                } else {
                                    Layout::left_to_right(Align::Min)
                                };
                                ui.with_layout(layout, |ui| {
                                    theme.bubble_frame(from_user).show(ui, |ui| {
                                        ui.set_max_width(240.0);
                                        ui.add(
                                            egui::Label::new(
                                                RichText::new(&message.content)
                                                    .color(theme.bubble_text_color(from_user)),
                                            )
                                            .wrap(),
                                        );
                                    });
                                });
                            }

                            if self.session.is_busy() {
                                ui.label(RichText::new("Thinking...").small().color(theme.text_muted));
                            }

                            if self.scroll_to_bottom {
                                ui.scroll_to_cursor(Some(Align::BOTTOM));
                            }
                        });
                });
                self.scroll_to_bottom = false;

                ui.separator();
                theme.composer_frame().show(ui, |ui| {
                    ui.horizontal(|ui| {
                        let can_send = self.session.can_send();
                        let send_width = 64.0;
                        ui.add(
                            egui::TextEdit::multiline(&mut self.session.draft)
                                .id(input_id)
                                .desired_rows(1)
                                .desired_width(ui.available_width() - send_width)
                                .hint_text("Type a message..."),
                        );
                        send_now |= ui
                            .add_enabled(can_send, egui::Button::new("Send"))
                            .clicked();
                    });
                    ui.label(
                        RichText::new("Keep your API key secure.")
                            .small()
                            .color(theme.text_muted),
                    );
                });
            });

        if send_now {
            self.submit_prompt(ctx);
        }
    }

    fn render_toast(&mut self, ctx: &egui::Context, now: Instant) {
        self.session.expire_notification(now);
        let Some(notification) = self.session.notification(now) else {
            return;
        };

        let theme = &self.theme;
        egui::Area::new(Id::new("toast"))
            .anchor(Align2::CENTER_BOTTOM, [0.0, -20.0])
            .order(egui::Order::Tooltip)
            .interactable(false)
            .show(ctx, |ui| {
                theme.toast_frame(notification.kind).show(ui, |ui| {
                    ui.label(RichText::new(&notification.text).color(theme.text_on_accent));
                });
            });

        if let Some(remaining) = self.session.notification_remaining(now) {
            ctx.request_repaint_after(remaining);
        }
    }
}

impl eframe::App for TicTacApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.drain_events(ctx);
        self.render_top_bar(ctx);
        self.render_board(ctx);
        self.render_chat_toggle(ctx);
        self.render_chat_window(ctx);
        self.render_toast(ctx, Instant::now());

        if self.session.is_busy() {
            ctx.request_repaint_after(BUSY_REPAINT_INTERVAL);
        }
    }
}
