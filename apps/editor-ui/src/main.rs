use std::path::PathBuf;
use std::time::Duration;

use eframe::egui::{self, Color32};
use rateposter_common::clock::{SystemClock, WallClock};
use rateposter_common::AppConfig;
use rateposter_editor::{Editor, EditorEvent, Notice};
use rateposter_model::{DatePart, FieldId, Style, TextColor, FONT_CHOICES};
use rateposter_render::{export_poster, Compositor, FontBook};

mod canvas;
mod upload;

use canvas::PreviewCanvas;
use upload::{PendingUpload, UploadSource};

fn main() -> anyhow::Result<()> {
    let config = AppConfig::load();
    rateposter_common::logging::init_logging(&config.logging);

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .worker_threads(2)
        .enable_all()
        .build()
        .map_err(|e| anyhow::anyhow!("Failed to create runtime: {e}"))?;

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("Exchange Rate Poster")
            .with_inner_size([1280.0, 800.0])
            .with_drag_and_drop(true),
        ..Default::default()
    };

    eframe::run_native(
        "RatePoster",
        options,
        Box::new(move |cc| Box::new(PosterApp::new(cc, config, runtime))),
    )
    .map_err(|e| anyhow::anyhow!("editor launch failed: {e}"))
}

struct PosterApp {
    runtime: tokio::runtime::Runtime,
    config: AppConfig,
    clock: SystemClock,
    editor: Editor,
    compositor: Compositor,
    canvas: PreviewCanvas,
    upload: Option<PendingUpload>,
    upload_path: String,
    color_hex: String,
    notice: Option<Notice>,
    status: String,
}

impl PosterApp {
    fn new(cc: &eframe::CreationContext<'_>, config: AppConfig, runtime: tokio::runtime::Runtime) -> Self {
        let clock = SystemClock;
        let style = Style::new(
            config.style.text_color.clone(),
            config.style.font_family.clone(),
        );
        let mut compositor = Compositor::new(FontBook::from_config(&config.fonts));
        install_control_font(&cc.egui_ctx, &mut compositor, &style.font_family);

        Self {
            runtime,
            color_hex: style.color.clone(),
            editor: Editor::new(clock.now(), style),
            compositor,
            canvas: PreviewCanvas::default(),
            upload: None,
            upload_path: String::new(),
            notice: None,
            status: "Ready".to_string(),
            clock,
            config,
        }
    }

    fn apply(&mut self, event: EditorEvent) {
        let applied = self.editor.apply(event);
        if let Some(notice) = applied.notice {
            self.notice = Some(notice);
        }
    }

    fn start_upload(&mut self, ctx: &egui::Context, source: UploadSource) {
        if self.upload.is_some() {
            self.status = "An upload is already being decoded".to_string();
            return;
        }
        self.editor.begin_upload();
        self.status = "Loading image...".to_string();
        self.upload = Some(PendingUpload::start(&self.runtime, ctx, source));
    }

    fn poll_upload(&mut self) {
        let Some(event) = self.upload.as_ref().and_then(PendingUpload::poll) else {
            return;
        };
        self.upload = None;
        self.status = match &event {
            EditorEvent::ImageDecoded(image) => {
                format!("Image loaded ({}x{})", image.width(), image.height())
            }
            _ => "Upload failed".to_string(),
        };
        self.apply(event);
    }

    fn download(&mut self) {
        match export_poster(
            &self.editor,
            &mut self.compositor,
            &self.config.export.directory,
            self.clock.now_utc(),
        ) {
            Ok(path) => self.status = format!("Saved {}", path.display()),
            Err(e) => match Notice::from_error(&e) {
                Some(notice) => self.notice = Some(notice),
                None => {
                    tracing::error!(error = %e, "Export failed");
                    self.status = format!("Export failed: {e}");
                }
            },
        }
    }

    fn controls_ui(&mut self, ui: &mut egui::Ui) {
        ui.heading("Exchange Rate Poster");
        ui.separator();

        ui.label("Background image");
        ui.horizontal(|ui| {
            ui.text_edit_singleline(&mut self.upload_path);
            let ready = !self.upload_path.trim().is_empty() && self.upload.is_none();
            if ui.add_enabled(ready, egui::Button::new("Upload")).clicked() {
                let path = PathBuf::from(self.upload_path.trim());
                self.start_upload(ui.ctx(), UploadSource::Path(path));
            }
            if self.editor.is_loading() {
                ui.spinner();
            }
        });

        let download = egui::Button::new("Download PNG").fill(Color32::from_rgb(37, 99, 235));
        if ui.add(download).clicked() {
            self.download();
        }
        ui.label(egui::RichText::new(&self.status).small().color(Color32::GRAY));

        ui.add_space(8.0);
        ui.separator();
        self.values_ui(ui);

        ui.add_space(8.0);
        ui.separator();
        self.style_ui(ui);

        ui.add_space(8.0);
        ui.separator();
        self.sizes_ui(ui);

        ui.add_space(8.0);
        ui.separator();
        self.positions_ui(ui);
    }

    fn values_ui(&mut self, ui: &mut egui::Ui) {
        ui.strong("Khmer date");
        for id in [FieldId::Day, FieldId::Month, FieldId::Year] {
            self.text_row(ui, id);
        }

        ui.strong("International date");
        let parts = self.editor.poster().date_parts().cloned().unwrap_or_default();
        for part in [DatePart::Month, DatePart::Day, DatePart::Year] {
            let mut value = parts.get(part).to_string();
            ui.horizontal(|ui| {
                ui.label(format!("{part:?}"));
                if ui.text_edit_singleline(&mut value).changed() {
                    self.apply(EditorEvent::SetDatePart { part, value });
                }
            });
        }

        ui.strong("Time");
        for id in [FieldId::EnglishTime, FieldId::KhmerTime, FieldId::KhmerPeriod] {
            self.text_row(ui, id);
        }

        ui.strong("Rates");
        for id in [FieldId::Currency, FieldId::BuyingRate, FieldId::SellingRate] {
            self.text_row(ui, id);
        }
    }

    fn text_row(&mut self, ui: &mut egui::Ui, id: FieldId) {
        let mut text = self.editor.poster().raw_text(id);
        ui.horizontal(|ui| {
            ui.label(id.label());
            if ui.text_edit_singleline(&mut text).changed() {
                self.apply(EditorEvent::SetText { field: id, text });
            }
        });
    }

    fn style_ui(&mut self, ui: &mut egui::Ui) {
        ui.strong("Style");
        let current = self.editor.poster().style.clone();

        ui.horizontal(|ui| {
            ui.label("Colour");
            let mut rgb = current.text_color().to_rgb();
            if ui.color_edit_button_srgb(&mut rgb).changed() {
                let hex = TextColor::rgb(rgb[0], rgb[1], rgb[2]).to_string();
                self.color_hex = hex.clone();
                self.apply(EditorEvent::SetColor(hex));
            }
            let response = ui.add(egui::TextEdit::singleline(&mut self.color_hex).desired_width(90.0));
            if response.changed() {
                self.apply(EditorEvent::SetColor(self.color_hex.trim().to_string()));
            }
        });

        let mut chosen = None;
        egui::ComboBox::from_label("Font")
            .selected_text(current.font_family.as_str())
            .show_ui(ui, |ui| {
                for family in FONT_CHOICES {
                    if ui
                        .selectable_label(current.font_family == family, family)
                        .clicked()
                    {
                        chosen = Some(family.to_string());
                    }
                }
            });
        if let Some(family) = chosen {
            self.apply(EditorEvent::SetFont(family));
        }
    }

    fn sizes_ui(&mut self, ui: &mut egui::Ui) {
        ui.strong("Font sizes");
        for id in FieldId::ALL {
            let range = id.size_range();
            let mut px = self.editor.poster().size(id);
            let slider = egui::Slider::new(&mut px, range.min..=range.max)
                .suffix("px")
                .text(id.label());
            if ui.add(slider).changed() {
                self.apply(EditorEvent::SetSize { field: id, px });
            }
        }
    }

    fn positions_ui(&self, ui: &mut egui::Ui) {
        ui.strong("Positions");
        if let Some((field, live)) = self.editor.drag_feedback() {
            ui.colored_label(
                Color32::from_rgb(255, 80, 80),
                format!("Dragging {}: {:.2}%, {:.2}%", field.label(), live.x(), live.y()),
            );
        }
        egui::Grid::new("positions").striped(true).show(ui, |ui| {
            for (id, state) in self.editor.poster().iter() {
                ui.label(id.label());
                ui.monospace(format!("{:6.2}%", state.position.x()));
                ui.monospace(format!("{:6.2}%", state.position.y()));
                ui.end_row();
            }
        });
    }

    fn notice_ui(&mut self, ctx: &egui::Context) {
        let Some(notice) = self.notice.clone() else {
            return;
        };
        egui::Window::new("Notice")
            .collapsible(false)
            .resizable(false)
            .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
            .show(ctx, |ui| {
                ui.label(egui::RichText::new(notice.message()).size(16.0));
                if let Notice::UploadFailed { detail } = &notice {
                    ui.label(egui::RichText::new(detail).small().color(Color32::GRAY));
                }
                ui.add_space(6.0);
                if ui.button("OK").clicked() {
                    self.notice = None;
                }
            });
    }
}

impl eframe::App for PosterApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        ctx.request_repaint_after(Duration::from_secs(1));
        self.poll_upload();
        self.apply(EditorEvent::Tick(self.clock.now()));

        let dropped = ctx.input(|i| i.raw.dropped_files.first().and_then(UploadSource::from_dropped));
        if let Some(source) = dropped {
            self.start_upload(ctx, source);
        }

        egui::SidePanel::left("controls")
            .resizable(true)
            .default_width(360.0)
            .show(ctx, |ui| {
                egui::ScrollArea::vertical().show(ui, |ui| self.controls_ui(ui));
            });

        self.canvas.refresh(ctx, &self.editor, &mut self.compositor);

        let interactive = self.notice.is_none();
        let events = egui::CentralPanel::default()
            .show(ctx, |ui| self.canvas.show(ui, &self.editor, interactive))
            .inner;
        for event in events {
            self.apply(event);
        }

        self.notice_ui(ctx);
    }
}

/// Let the control panel display Khmer text by falling back to the poster's
/// own font after egui's built-in ones.
fn install_control_font(ctx: &egui::Context, compositor: &mut Compositor, family: &str) {
    let Some(font) = compositor.fonts().resolve(family) else {
        return;
    };
    let mut data = egui::FontData::from_owned(font.data().to_vec());
    data.index = font.index();

    let mut fonts = egui::FontDefinitions::default();
    fonts.font_data.insert("poster".to_string(), data);
    for list in fonts.families.values_mut() {
        list.push("poster".to_string());
    }
    ctx.set_fonts(fonts);
}
