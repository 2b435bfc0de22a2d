//! Annotation editor for the enhanced PDF
//!
//! Toolbar, view controls, and the page canvas with its annotation
//! overlay. Annotations live in page-local pixel coordinates; every
//! pointer event re-derives them from the canvas rect rather than caching
//! screen positions.

use eframe::egui;
use resume_studio_core::{Annotation, AnnotationKind, Color, Tool, MAX_SCALE, MIN_SCALE};
use resume_studio_render::DEFAULT_PAGE_SIZE;

use crate::ResumeStudioApp;

const STROKE_WIDTH: f32 = 2.0;

impl ResumeStudioApp {
    pub(crate) fn draw_editor(&mut self, ui: &mut egui::Ui) {
        self.draw_editor_toolbar(ui);
        ui.separator();
        self.draw_view_controls(ui);
        ui.separator();
        self.draw_canvas(ui);
    }

    fn draw_editor_toolbar(&mut self, ui: &mut egui::Ui) {
        ui.horizontal_wrapped(|ui| {
            let was_editing = self.editing;
            if ui.selectable_label(self.editing, "✏ Edit").clicked() {
                self.editing = !self.editing;
            }
            // Leaving edit mode abandons any in-progress interaction
            if was_editing && !self.editing {
                self.controller.reset();
                self.text_input.clear();
            }

            if self.editing {
                ui.separator();

                for tool in Tool::ALL {
                    self.tool_button(ui, tool);
                }

                ui.separator();

                for color in Color::PALETTE {
                    self.color_swatch(ui, color);
                }

                if self.tool_settings.tool == Tool::Text {
                    ui.separator();
                    ui.label("Size");
                    ui.add(
                        egui::Slider::new(
                            &mut self.tool_settings.font_size,
                            resume_studio_core::MIN_FONT_SIZE..=resume_studio_core::MAX_FONT_SIZE,
                        )
                        .fixed_decimals(0),
                    );
                }

                ui.separator();

                if ui
                    .add_enabled(self.store.can_undo(), egui::Button::new("↶ Undo"))
                    .clicked()
                {
                    self.store.undo();
                }
                if ui
                    .add_enabled(self.store.can_redo(), egui::Button::new("↷ Redo"))
                    .clicked()
                {
                    self.store.redo();
                }

                ui.separator();

                if ui
                    .button("💾 Save")
                    .on_hover_text("Saves the PDF as fetched; annotations are on-screen only")
                    .clicked()
                {
                    self.save_pdf_as("edited-resume.pdf");
                }
            }
        });
    }

    fn tool_button(&mut self, ui: &mut egui::Ui, tool: Tool) {
        let is_selected = self.tool_settings.tool == tool;
        if ui.selectable_label(is_selected, tool.kind().label()).clicked() {
            self.tool_settings.tool = tool;
            // Switching tools drops a pending text placement
            self.controller.cancel_text();
            self.text_input.clear();
        }
    }

    fn color_swatch(&mut self, ui: &mut egui::Ui, color: Color) {
        let is_selected = self.tool_settings.color == color;
        let response = ui.add(
            egui::Button::new("")
                .fill(color32(color))
                .min_size(egui::vec2(18.0, 18.0)),
        );
        if is_selected {
            ui.painter().rect_stroke(
                response.rect.expand(2.0),
                3.0,
                egui::Stroke::new(2.0, ui.visuals().selection.stroke.color),
                egui::StrokeKind::Outside,
            );
        }
        if response.clicked() {
            self.tool_settings.color = color;
        }
    }

    fn draw_view_controls(&mut self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            if ui
                .add_enabled(
                    self.viewer.scale() > MIN_SCALE,
                    egui::Button::new("−"),
                )
                .clicked()
            {
                self.viewer.zoom_out();
            }
            ui.label(format!("{:.0}%", self.viewer.scale() * 100.0));
            if ui
                .add_enabled(
                    self.viewer.scale() < MAX_SCALE,
                    egui::Button::new("+"),
                )
                .clicked()
            {
                self.viewer.zoom_in();
            }

            ui.separator();

            if ui.button("⟳ Rotate").clicked() {
                self.viewer.rotate();
            }

            ui.separator();

            if ui
                .add_enabled(self.viewer.has_previous(), egui::Button::new("◀ Prev"))
                .clicked()
            {
                self.viewer.previous_page();
            }
            ui.label(format!(
                "Page {} / {}",
                self.viewer.current_page(),
                self.viewer.total_pages()
            ));
            if ui
                .add_enabled(self.viewer.has_next(), egui::Button::new("Next ▶"))
                .clicked()
            {
                self.viewer.next_page();
            }
        });
    }

    fn draw_canvas(&mut self, ui: &mut egui::Ui) {
        let page = self.viewer.current_page();
        let page_size = self
            .document
            .as_ref()
            .and_then(|doc| doc.page_size(page).ok())
            .unwrap_or(DEFAULT_PAGE_SIZE);

        let scale = self.viewer.scale();
        let rotated = matches!(self.viewer.rotation(), 90 | 270);
        let (width_pt, height_pt) = if rotated {
            (page_size.height_pt, page_size.width_pt)
        } else {
            (page_size.width_pt, page_size.height_pt)
        };
        let desired = egui::vec2(width_pt * scale, height_pt * scale);

        egui::ScrollArea::both()
            .auto_shrink([false, false])
            .show(ui, |ui| {
                // Center the page in the viewport
                let available = ui.available_size();
                let padding_x = ((available.x - desired.x) / 2.0).max(0.0);
                let padding_y = ((available.y - desired.y) / 2.0).max(0.0);

                ui.add_space(padding_y);
                ui.horizontal(|ui| {
                    ui.add_space(padding_x);

                    let sense = if self.editing {
                        egui::Sense::click_and_drag()
                    } else {
                        egui::Sense::hover()
                    };
                    let (rect, response) = ui.allocate_exact_size(desired, sense);

                    let painter = ui.painter_at(rect);
                    painter.rect_filled(rect, 0.0, egui::Color32::WHITE);
                    painter.rect_stroke(
                        rect,
                        0.0,
                        egui::Stroke::new(1.0, ui.visuals().widgets.inactive.bg_stroke.color),
                        egui::StrokeKind::Outside,
                    );
                    painter.text(
                        rect.center(),
                        egui::Align2::CENTER_CENTER,
                        format!("Page {page}"),
                        egui::FontId::proportional(14.0),
                        egui::Color32::from_gray(200),
                    );

                    if self.editing {
                        self.handle_canvas_input(rect, &response, page);
                    }

                    for annotation in self.controller.visible(&self.store, page) {
                        paint_annotation(&painter, rect.min, annotation);
                    }

                    self.draw_text_editor(ui.ctx(), rect.min);
                });
            });
    }

    fn handle_canvas_input(&mut self, rect: egui::Rect, response: &egui::Response, page: u16) {
        let local = |pos: egui::Pos2| (pos.x - rect.min.x, pos.y - rect.min.y);

        if self.tool_settings.tool == Tool::Text {
            if response.clicked() {
                if let Some(pos) = response.interact_pointer_pos() {
                    self.controller
                        .pointer_down(local(pos), &self.tool_settings, page);
                }
            }
            return;
        }

        if response.drag_started() {
            if let Some(pos) = response.interact_pointer_pos() {
                self.controller
                    .pointer_down(local(pos), &self.tool_settings, page);
            }
        } else if response.dragged() {
            if let Some(pos) = response.interact_pointer_pos() {
                self.controller.pointer_move(local(pos));
            }
        }
        if response.drag_stopped() {
            self.controller.pointer_up(&mut self.store);
        }
    }

    /// Inline editor shown next to a pending text placement
    fn draw_text_editor(&mut self, ctx: &egui::Context, canvas_origin: egui::Pos2) {
        let Some(anchor) = self.controller.awaiting_text() else {
            return;
        };
        let pos = canvas_origin + egui::vec2(anchor.0, anchor.1 + 8.0);

        let mut confirm = false;
        let mut cancel = false;
        egui::Window::new("annotation_text_editor")
            .title_bar(false)
            .collapsible(false)
            .resizable(false)
            .current_pos(pos)
            .show(ctx, |ui| {
                let response = ui.add(
                    egui::TextEdit::singleline(&mut self.text_input)
                        .hint_text("Enter text...")
                        .desired_width(180.0),
                );
                if self.text_input.is_empty() && !response.has_focus() {
                    response.request_focus();
                }
                if response.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter)) {
                    confirm = true;
                }
                if ui.input(|i| i.key_pressed(egui::Key::Escape)) {
                    cancel = true;
                }

                ui.horizontal(|ui| {
                    let has_text = !self.text_input.trim().is_empty();
                    if ui.add_enabled(has_text, egui::Button::new("Add")).clicked() {
                        confirm = true;
                    }
                    if ui.button("Cancel").clicked() {
                        cancel = true;
                    }
                });
            });

        if confirm {
            let text = std::mem::take(&mut self.text_input);
            self.controller
                .confirm_text(&text, &self.tool_settings, &mut self.store);
        } else if cancel {
            self.text_input.clear();
            self.controller.cancel_text();
        }
    }
}

fn color32(color: Color) -> egui::Color32 {
    egui::Color32::from_rgb(color.r, color.g, color.b)
}

/// Paint one annotation at its page-local position
///
/// Extents are signed (anchor to current corner); `Rect::from_two_pos`
/// normalizes them for painting without touching the stored values.
fn paint_annotation(painter: &egui::Painter, origin: egui::Pos2, annotation: &Annotation) {
    let color = color32(annotation.color());
    let (x, y) = annotation.position();
    let p = origin + egui::vec2(x, y);
    let stroke = egui::Stroke::new(STROKE_WIDTH, color);

    match annotation.kind() {
        AnnotationKind::Text => {
            painter.text(
                p,
                egui::Align2::LEFT_TOP,
                annotation.text_content().unwrap_or_default(),
                egui::FontId::proportional(annotation.font_size().unwrap_or(12.0)),
                color,
            );
        }
        AnnotationKind::Rectangle => {
            let (dx, dy) = annotation.extent().unwrap_or_default();
            let rect = egui::Rect::from_two_pos(p, p + egui::vec2(dx, dy));
            painter.rect_stroke(rect, 0.0, stroke, egui::StrokeKind::Middle);
        }
        AnnotationKind::Circle => {
            let (dx, dy) = annotation.extent().unwrap_or_default();
            let bounds = egui::Rect::from_two_pos(p, p + egui::vec2(dx, dy));
            painter.add(egui::epaint::EllipseShape {
                center: bounds.center(),
                radius: bounds.size() / 2.0,
                fill: egui::Color32::TRANSPARENT,
                stroke,
            });
        }
        AnnotationKind::Line => {
            let (dx, dy) = annotation.extent().unwrap_or_default();
            painter.line_segment([p, p + egui::vec2(dx, dy)], stroke);
        }
    }
}
