//! egui shell around the controller. Backend results are drained at the start of every frame.

use std::{
    collections::VecDeque,
    path::{Path, PathBuf},
    time::{Duration, Instant},
};

use crossbeam_channel::Receiver;

use crate::controller::{
    events::{UiError, UiErrorContext, UiEvent},
    reducer::{AskPhase, Notification, NotificationLevel, SelectedFile, UploadPhase},
    Controller,
};
use crate::picker::{choose_pdf, pick_pdf, PickError};
use crate::ui::render::{
    ask_phase_label, document_line, health_line, render_notification, selection_line,
    upload_limit_hint, upload_phase_label,
};

const TOAST_LIFETIME: Duration = Duration::from_secs(5);
const MAX_TOASTS: usize = 4;

struct Toast {
    notification: Notification,
    expires_at: Instant,
}

pub struct PdfQaApp {
    controller: Controller,
    ui_rx: Receiver<UiEvent>,
    backend_url: String,
    question: String,
    toasts: VecDeque<Toast>,
}

impl PdfQaApp {
    pub fn new(
        controller: Controller,
        ui_rx: Receiver<UiEvent>,
        backend_url: impl Into<String>,
    ) -> Self {
        Self {
            controller,
            ui_rx,
            backend_url: backend_url.into(),
            question: String::new(),
            toasts: VecDeque::new(),
        }
    }

    fn process_ui_events(&mut self) {
        while let Ok(event) = self.ui_rx.try_recv() {
            self.controller.handle_event(event);
        }
    }

    fn collect_toasts(&mut self, now: Instant) {
        for notification in self.controller.take_notifications() {
            self.toasts.push_back(Toast {
                notification,
                expires_at: now + TOAST_LIFETIME,
            });
        }
        while self.toasts.len() > MAX_TOASTS {
            self.toasts.pop_front();
        }
        self.toasts.retain(|toast| toast.expires_at > now);
    }

    fn apply_pick(&mut self, picked: Result<SelectedFile, PickError>) {
        match picked {
            Ok(file) => {
                self.controller.select_file(file);
            }
            Err(err) => self.controller.report_error(UiError::validation(
                UiErrorContext::SelectFile,
                err.to_string(),
            )),
        }
    }

    fn select_path(&mut self, path: &Path) {
        self.apply_pick(pick_pdf(path));
    }

    fn submit_question(&mut self) {
        let question = self.question.clone();
        self.controller.ask(&question);
    }

    fn handle_dropped_files(&mut self, ctx: &egui::Context) {
        let dropped: Option<PathBuf> = ctx.input(|i| {
            i.raw
                .dropped_files
                .iter()
                .find_map(|file| file.path.clone())
        });
        if let Some(path) = dropped {
            self.select_path(&path);
        }
    }

    fn show_header(&mut self, ctx: &egui::Context) {
        let state = self.controller.state();
        let checking = state.is_checking_health();
        let clearing = state.is_clearing_collection();
        let health = state
            .health()
            .map(|report| (report.is_healthy(), health_line(report)));

        let mut check_health = false;
        let mut clear_collection = false;
        egui::TopBottomPanel::top("header").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.heading("PDF Q&A");
                ui.label(egui::RichText::new(&self.backend_url).weak());
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    if ui
                        .add_enabled(!clearing, egui::Button::new("Clear documents"))
                        .on_hover_text("Delete every document stored by the backend")
                        .clicked()
                    {
                        clear_collection = true;
                    }
                    if ui
                        .add_enabled(!checking, egui::Button::new("Check health"))
                        .clicked()
                    {
                        check_health = true;
                    }
                    if let Some((healthy, text)) = &health {
                        let color = if *healthy {
                            egui::Color32::from_rgb(87, 171, 90)
                        } else {
                            egui::Color32::from_rgb(214, 92, 92)
                        };
                        ui.colored_label(color, text);
                    }
                });
            });
        });

        if check_health {
            self.controller.check_health();
        }
        if clear_collection {
            self.controller.clear_collection();
        }
    }

    fn show_status_bar(&self, ctx: &egui::Context) {
        let state = self.controller.state();
        egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                if state.is_busy() {
                    ui.spinner();
                }
                ui.label(egui::RichText::new(state.status()).weak());
            });
        });
    }

    fn show_main(&mut self, ctx: &egui::Context) {
        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::vertical()
                .auto_shrink([false, false])
                .show(ui, |ui| {
                    self.show_upload_section(ui);
                    ui.add_space(12.0);
                    ui.separator();
                    ui.add_space(12.0);
                    self.show_ask_section(ui);
                });
        });
    }

    fn show_upload_section(&mut self, ui: &mut egui::Ui) {
        let state = self.controller.state();
        let upload_enabled = state.upload_enabled();
        let uploading = state.upload_phase() == UploadPhase::Uploading;
        let phase_label = upload_phase_label(state.upload_phase());
        let selection = selection_line(state);
        let hint = upload_limit_hint(state);
        let document = document_line(state);

        let mut choose = false;
        let mut upload = false;
        ui.heading("1. Upload a PDF");
        ui.label(egui::RichText::new(hint).weak());
        ui.horizontal(|ui| {
            if ui.button("Choose PDF...").clicked() {
                choose = true;
            }
            ui.label(selection);
        });
        ui.horizontal(|ui| {
            let label = if uploading { "Uploading..." } else { "Upload" };
            if ui
                .add_enabled(upload_enabled, egui::Button::new(label))
                .clicked()
            {
                upload = true;
            }
            if uploading {
                ui.spinner();
            }
            ui.label(egui::RichText::new(phase_label).weak());
        });
        if let Some(document) = document {
            ui.label(egui::RichText::new(format!("Active document: {document}")).strong());
        }

        if choose {
            if let Some(picked) = choose_pdf() {
                self.apply_pick(picked);
            }
        }
        if upload {
            self.controller.upload();
        }
    }

    fn show_ask_section(&mut self, ui: &mut egui::Ui) {
        let ask_enabled = self.controller.state().ask_enabled();

        let mut submit = false;
        ui.heading("2. Ask a question");
        ui.horizontal(|ui| {
            let response = ui.add(
                egui::TextEdit::singleline(&mut self.question)
                    .hint_text("What is this document about?")
                    .desired_width(ui.available_width() - 80.0),
            );
            if response.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter)) {
                submit = ask_enabled;
            }
            if ui
                .add_enabled(ask_enabled, egui::Button::new("Ask"))
                .clicked()
            {
                submit = true;
            }
        });
        if submit {
            self.submit_question();
        }

        let state = self.controller.state();
        if let Some(question) = state.last_question() {
            ui.add_space(8.0);
            ui.label(egui::RichText::new(format!("Q: {question}")).italics());
        }
        if state.ask_phase() == AskPhase::Asking {
            ui.horizontal(|ui| {
                ui.spinner();
                ui.label(ask_phase_label(AskPhase::Asking));
            });
        }
        if let Some(answer) = state.answer() {
            ui.add_space(8.0);
            egui::Frame::group(ui.style())
                .inner_margin(egui::Margin::symmetric(10, 8))
                .show(ui, |ui| {
                    ui.add(egui::Label::new(answer).selectable(true).wrap());
                });
        }
    }

    fn show_toasts(&self, ctx: &egui::Context) {
        if self.toasts.is_empty() {
            return;
        }
        egui::Area::new(egui::Id::new("toasts"))
            .anchor(egui::Align2::RIGHT_BOTTOM, [-12.0, -40.0])
            .order(egui::Order::Foreground)
            .show(ctx, |ui| {
                for toast in &self.toasts {
                    let (fill, stroke) = toast_colors(toast.notification.level);
                    egui::Frame::NONE
                        .fill(fill)
                        .stroke(egui::Stroke::new(1.0, stroke))
                        .corner_radius(8.0)
                        .inner_margin(egui::Margin::symmetric(10, 8))
                        .show(ui, |ui| {
                            ui.label(
                                egui::RichText::new(render_notification(&toast.notification))
                                    .color(egui::Color32::WHITE),
                            );
                        });
                    ui.add_space(6.0);
                }
            });
    }
}

fn toast_colors(level: NotificationLevel) -> (egui::Color32, egui::Color32) {
    match level {
        NotificationLevel::Success => (
            egui::Color32::from_rgb(46, 94, 58),
            egui::Color32::from_rgb(87, 171, 90),
        ),
        NotificationLevel::Error => (
            egui::Color32::from_rgb(111, 53, 53),
            egui::Color32::from_rgb(175, 96, 96),
        ),
        NotificationLevel::Info => (
            egui::Color32::from_rgb(52, 58, 70),
            egui::Color32::from_rgb(98, 108, 128),
        ),
    }
}

impl eframe::App for PdfQaApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.process_ui_events();
        self.handle_dropped_files(ctx);

        self.show_header(ctx);
        self.show_status_bar(ctx);
        self.show_main(ctx);

        self.collect_toasts(Instant::now());
        self.show_toasts(ctx);

        if self.controller.state().is_busy() || !self.toasts.is_empty() {
            ctx.request_repaint_after(Duration::from_millis(50));
        } else {
            ctx.request_repaint_after(Duration::from_millis(250));
        }
    }
}

#[cfg(test)]
#[path = "tests/app_tests.rs"]
mod tests;
