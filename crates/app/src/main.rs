//! Resume Studio - egui-based UI
//!
//! Desktop front-end for the résumé scoring service: upload a résumé PDF
//! and a job-listing URL, fetch a score, request an enhanced PDF, and mark
//! it up in a minimal annotation viewer.

use std::path::Path;
use std::sync::mpsc::{channel, Receiver, Sender};

use eframe::egui;
use resume_studio_api::{ScoreData, ScoringClient};
use resume_studio_core::{
    AnnotationStore, CanvasController, ResumeFile, ToolSettings, UploadForm, ViewerState,
    PDF_MEDIA_TYPE,
};
use resume_studio_render::PdfDocument;

mod editor;
mod net;

use net::NetMessage;

const DEFAULT_API_BASE: &str = "http://127.0.0.1:8000";

/// Scoring service base URL, overridable for non-local deployments
fn api_base_url() -> String {
    std::env::var("RESUME_STUDIO_API_URL").unwrap_or_else(|_| DEFAULT_API_BASE.to_string())
}

fn main() -> eframe::Result {
    env_logger::init();

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1200.0, 800.0])
            .with_min_inner_size([900.0, 600.0])
            .with_title("Resume Studio"),
        ..Default::default()
    };

    eframe::run_native(
        "Resume Studio",
        options,
        Box::new(|cc| Ok(Box::new(ResumeStudioApp::new(cc)))),
    )
}

/// Error dialog state
struct ErrorDialogState {
    severity: ErrorSeverity,
    title: String,
    message: String,
}

#[derive(Clone, Copy, PartialEq)]
enum ErrorSeverity {
    Error,
    Info,
}

impl ErrorSeverity {
    fn icon(&self) -> &'static str {
        match self {
            ErrorSeverity::Error => "❌",
            ErrorSeverity::Info => "ℹ️",
        }
    }

    fn title(&self) -> &'static str {
        match self {
            ErrorSeverity::Error => "Error",
            ErrorSeverity::Info => "Notice",
        }
    }
}

struct ResumeStudioApp {
    // Scoring service
    client: Option<ScoringClient>,

    // Upload form
    form: UploadForm,
    url_input: String,

    // Score state
    score: Option<ScoreData>,
    session_id: Option<String>,
    loading: bool,
    enhancing: bool,

    // Enhanced document and editor state
    document: Option<PdfDocument>,
    viewer: ViewerState,
    store: AnnotationStore,
    controller: CanvasController,
    tool_settings: ToolSettings,
    editing: bool,
    text_input: String,

    // Dialogs
    error_dialog: Option<ErrorDialogState>,

    // Background request results
    net_tx: Sender<NetMessage>,
    net_rx: Receiver<NetMessage>,
}

impl ResumeStudioApp {
    fn new(_cc: &eframe::CreationContext<'_>) -> Self {
        let (net_tx, net_rx) = channel();

        let base = api_base_url();
        let (client, error_dialog) = match ScoringClient::new(&base) {
            Ok(client) => (Some(client), None),
            Err(e) => {
                log::error!("failed to build scoring client for {base}: {e}");
                (
                    None,
                    Some(ErrorDialogState {
                        severity: ErrorSeverity::Error,
                        title: ErrorSeverity::Error.title().to_string(),
                        message: format!("Could not initialize the scoring client: {e}"),
                    }),
                )
            }
        };

        Self {
            client,
            form: UploadForm::new(),
            url_input: String::new(),
            score: None,
            session_id: None,
            loading: false,
            enhancing: false,
            document: None,
            viewer: ViewerState::new(),
            store: AnnotationStore::new(),
            controller: CanvasController::new(),
            tool_settings: ToolSettings::default(),
            editing: false,
            text_input: String::new(),
            error_dialog,
            net_tx,
            net_rx,
        }
    }

    fn show_error(&mut self, severity: ErrorSeverity, message: impl Into<String>) {
        self.error_dialog = Some(ErrorDialogState {
            severity,
            title: severity.title().to_string(),
            message: message.into(),
        });
    }

    /// Pick a résumé file and offer it to the form
    ///
    /// The declared media type comes from the picked file's extension; the
    /// form only accepts `application/pdf`.
    fn pick_resume(&mut self) {
        let Some(path) = rfd::FileDialog::new()
            .add_filter("PDF", &["pdf"])
            .pick_file()
        else {
            return;
        };

        match std::fs::read(&path) {
            Ok(bytes) => {
                let file = ResumeFile {
                    name: file_name_of(&path),
                    media_type: media_type_for(&path),
                    bytes,
                };
                // Rejections surface through the form's field error
                let _ = self.form.set_resume(file);
            }
            Err(e) => {
                self.show_error(
                    ErrorSeverity::Error,
                    format!("Could not read {}: {e}", path.display()),
                );
            }
        }
    }

    /// Submit the form to the evaluation endpoint
    fn request_score(&mut self, ctx: &egui::Context) {
        if !self.form.can_submit() || self.loading {
            return;
        }
        let Some(client) = self.client.clone() else {
            return;
        };
        let Some(resume) = self.form.resume() else {
            return;
        };

        self.loading = true;
        net::spawn_evaluate(
            client,
            resume.name.clone(),
            resume.bytes.clone(),
            self.form.job_url().to_string(),
            self.net_tx.clone(),
            ctx.clone(),
        );
    }

    /// Request the enhanced PDF for the current session
    fn request_enhance(&mut self, ctx: &egui::Context) {
        if self.enhancing {
            return;
        }
        let Some(client) = self.client.clone() else {
            return;
        };
        let Some(session_id) = self.session_id.clone() else {
            return;
        };

        self.enhancing = true;
        net::spawn_enhance(client, session_id, self.net_tx.clone(), ctx.clone());
    }

    /// Apply completed background requests
    fn drain_network_messages(&mut self) {
        while let Ok(message) = self.net_rx.try_recv() {
            match message {
                NetMessage::Evaluated(Ok(response)) => {
                    self.loading = false;
                    self.score = Some(response.score);
                    self.session_id = Some(response.session_id);
                }
                NetMessage::Evaluated(Err(e)) => {
                    self.loading = false;
                    log::error!("evaluate failed: {e}");
                    self.show_error(ErrorSeverity::Error, format!("Scoring failed: {e}"));
                }
                NetMessage::Enhanced(Ok(response)) => {
                    self.enhancing = false;
                    self.adopt_enhanced_pdf(response.pdf_bytes, response.updated_score);
                }
                NetMessage::Enhanced(Err(e)) => {
                    self.enhancing = false;
                    log::error!("enhance failed: {e}");
                    self.show_error(ErrorSeverity::Error, format!("Enhancement failed: {e}"));
                }
            }
        }
    }

    /// Swap in a freshly enhanced document
    ///
    /// Resets the viewer and the annotation store: annotations never carry
    /// over between documents.
    fn adopt_enhanced_pdf(&mut self, pdf_bytes: Vec<u8>, updated_score: Option<ScoreData>) {
        match PdfDocument::from_bytes(pdf_bytes) {
            Ok(document) => {
                self.viewer.load_document(document.page_count());
                self.store.clear();
                self.controller.reset();
                self.editing = false;
                self.text_input.clear();
                self.document = Some(document);

                if let Some(score) = updated_score {
                    self.score = Some(score);
                }
            }
            Err(e) => {
                log::error!("enhanced PDF could not be parsed: {e}");
                self.show_error(
                    ErrorSeverity::Error,
                    format!("The enhanced PDF could not be opened: {e}"),
                );
            }
        }
    }

    /// Write the fetched PDF bytes to a user-chosen path
    ///
    /// Used by both Download and Save: the bytes go out exactly as fetched,
    /// annotations are an overlay only and are not baked into the file.
    fn save_pdf_as(&mut self, suggested_name: &str) {
        let Some(document) = &self.document else {
            return;
        };

        let Some(path) = rfd::FileDialog::new()
            .add_filter("PDF", &["pdf"])
            .set_file_name(suggested_name)
            .save_file()
        else {
            return;
        };

        match std::fs::write(&path, document.bytes()) {
            Ok(()) => {
                self.show_error(
                    ErrorSeverity::Info,
                    format!("Saved to {}", path.display()),
                );
            }
            Err(e) => {
                log::error!("failed to write {}: {e}", path.display());
                self.show_error(
                    ErrorSeverity::Error,
                    format!("Could not save the PDF: {e}"),
                );
            }
        }
    }
}

impl eframe::App for ResumeStudioApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.drain_network_messages();
        self.draw_top_bar(ctx);
        self.draw_side_panel(ctx);
        self.draw_central_panel(ctx);
        self.draw_error_dialog(ctx);
    }
}

impl ResumeStudioApp {
    fn draw_top_bar(&mut self, ctx: &egui::Context) {
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.add_space(8.0);
                ui.heading("Resume Studio");
                ui.label("score and enhance your résumé against a job listing");

                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    if self.document.is_some() && ui.button("⬇ Download").clicked() {
                        self.save_pdf_as("enhanced-resume.pdf");
                    }
                });
            });
        });
    }

    fn draw_side_panel(&mut self, ctx: &egui::Context) {
        egui::SidePanel::left("upload_and_score")
            .default_width(320.0)
            .resizable(true)
            .show(ctx, |ui| {
                self.draw_upload_form(ui, ctx);
                ui.separator();
                self.draw_score_panel(ui, ctx);
            });
    }

    fn draw_upload_form(&mut self, ui: &mut egui::Ui, ctx: &egui::Context) {
        ui.heading("Upload");
        ui.add_space(4.0);

        if ui.button("📄 Choose résumé (PDF)").clicked() {
            self.pick_resume();
        }
        match self.form.resume() {
            Some(file) => {
                ui.label(
                    egui::RichText::new(format!("✔ {}", file.name))
                        .color(egui::Color32::from_rgb(0x10, 0xB9, 0x81)),
                );
            }
            None => {
                ui.weak("PDF files only");
            }
        }
        if let Some(error) = self.form.resume_error() {
            ui.colored_label(egui::Color32::from_rgb(0xEF, 0x44, 0x44), error.to_string());
        }

        ui.add_space(8.0);
        ui.label("Job listing URL (Naukri.com)");
        let response = ui.add(
            egui::TextEdit::singleline(&mut self.url_input)
                .hint_text("https://www.naukri.com/job-listings-...")
                .desired_width(f32::INFINITY),
        );
        if response.changed() {
            self.form.set_job_url(&self.url_input);
        }
        if let Some(error) = self.form.url_error() {
            ui.colored_label(egui::Color32::from_rgb(0xEF, 0x44, 0x44), error.to_string());
        } else if !self.url_input.is_empty() && self.form.url_error().is_none() {
            ui.label(
                egui::RichText::new("Valid Naukri.com URL detected")
                    .color(egui::Color32::from_rgb(0x10, 0xB9, 0x81)),
            );
        }

        ui.add_space(8.0);
        let can_score = self.form.can_submit() && !self.loading && self.client.is_some();
        if ui
            .add_enabled(can_score, egui::Button::new("🎯 Get Resume Score"))
            .clicked()
        {
            self.request_score(ctx);
        }
        if self.loading {
            ui.horizontal(|ui| {
                ui.spinner();
                ui.label("Analyzing résumé...");
            });
        }
    }

    fn draw_score_panel(&mut self, ui: &mut egui::Ui, ctx: &egui::Context) {
        ui.heading("Score");
        ui.add_space(4.0);

        let Some(score) = self.score.clone() else {
            if !self.loading {
                ui.weak("Upload your résumé and job URL to get started");
            }
            return;
        };

        let percentage = score.final_score.round() as i32;
        ui.label(
            egui::RichText::new(format!("{percentage}%"))
                .size(40.0)
                .strong()
                .color(score_color(percentage)),
        );

        let (badge, badge_color) = if score.eligible {
            ("Eligible", egui::Color32::from_rgb(0x10, 0xB9, 0x81))
        } else {
            ("Not Eligible", egui::Color32::from_rgb(0xEF, 0x44, 0x44))
        };
        ui.label(egui::RichText::new(badge).color(badge_color));

        if let Some(reason) = &score.reason {
            ui.add_space(4.0);
            ui.label(reason);
        }

        ui.add_space(8.0);
        let can_enhance = score.eligible && self.session_id.is_some() && !self.enhancing;
        if ui
            .add_enabled(can_enhance, egui::Button::new("✨ Enhance Resume"))
            .clicked()
        {
            self.request_enhance(ctx);
        }
        if self.enhancing {
            ui.horizontal(|ui| {
                ui.spinner();
                ui.label("Enhancing résumé...");
            });
        }
    }

    fn draw_central_panel(&mut self, ctx: &egui::Context) {
        egui::CentralPanel::default().show(ctx, |ui| {
            if self.document.is_none() {
                ui.centered_and_justified(|ui| {
                    ui.heading("Enhance a résumé to open it here");
                });
                return;
            }
            self.draw_editor(ui);
        });
    }

    fn draw_error_dialog(&mut self, ctx: &egui::Context) {
        let Some(dialog) = &self.error_dialog else {
            return;
        };

        let title = format!("{} {}", dialog.severity.icon(), dialog.title);
        let message = dialog.message.clone();

        let mut should_close = false;
        egui::Window::new(title)
            .collapsible(false)
            .resizable(false)
            .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
            .show(ctx, |ui| {
                ui.label(&message);
                ui.add_space(12.0);
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Min), |ui| {
                    if ui.button("OK").clicked() {
                        should_close = true;
                    }
                });
            });

        if should_close {
            self.error_dialog = None;
        }
    }
}

/// Score band colors matching the original gauge
fn score_color(percentage: i32) -> egui::Color32 {
    match percentage {
        i32::MIN..=35 => egui::Color32::from_rgb(0xEF, 0x44, 0x44),
        36..=50 => egui::Color32::from_rgb(0xF9, 0x73, 0x16),
        51..=80 => egui::Color32::from_rgb(0xFA, 0xCC, 0x15),
        _ => egui::Color32::from_rgb(0x10, 0xB9, 0x81),
    }
}

fn file_name_of(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| "resume.pdf".to_string())
}

/// Declared media type for a picked file, judged by extension
fn media_type_for(path: &Path) -> String {
    let is_pdf = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("pdf"));
    if is_pdf {
        PDF_MEDIA_TYPE.to_string()
    } else {
        "application/octet-stream".to_string()
    }
}
