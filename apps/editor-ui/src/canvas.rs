//! The live preview and its pointer handling.

use eframe::egui::{self, Color32, ColorImage, CursorIcon, Sense, TextureHandle, TextureOptions};
use rateposter_editor::{hit_test, Editor, EditorEvent};
use rateposter_model::CanvasRect;
use rateposter_render::Compositor;

/// Texture cache for the composed preview.
#[derive(Default)]
pub struct PreviewCanvas {
    texture: Option<TextureHandle>,
    rendered_revision: Option<u64>,
}

impl PreviewCanvas {
    /// Re-compose the preview if the editor changed since the last upload.
    pub fn refresh(&mut self, ctx: &egui::Context, editor: &Editor, compositor: &mut Compositor) {
        if self.rendered_revision == Some(editor.revision()) {
            return;
        }
        self.rendered_revision = Some(editor.revision());

        let Some(composed) = compositor.preview(editor) else {
            self.texture = None;
            return;
        };
        let size = [composed.width() as usize, composed.height() as usize];
        let image = ColorImage::from_rgba_unmultiplied(size, composed.as_raw());
        match &mut self.texture {
            Some(texture) => texture.set(image, TextureOptions::LINEAR),
            None => {
                self.texture = Some(ctx.load_texture("poster-preview", image, TextureOptions::LINEAR))
            }
        }
    }

    /// Paint the preview and translate pointer input into editor events.
    ///
    /// `interactive` is false while a notice is open.
    pub fn show(&self, ui: &mut egui::Ui, editor: &Editor, interactive: bool) -> Vec<EditorEvent> {
        let Some(texture) = &self.texture else {
            ui.centered_and_justified(|ui| {
                let hint = if editor.is_loading() {
                    "Loading image..."
                } else {
                    "Upload an image or drop one here"
                };
                ui.label(egui::RichText::new(hint).color(Color32::GRAY).size(18.0));
            });
            return Vec::new();
        };

        let size = fit(texture.size_vec2(), ui.available_size());
        let (rect, _response) = ui.allocate_exact_size(size, Sense::click_and_drag());
        ui.painter().image(
            texture.id(),
            rect,
            egui::Rect::from_min_max(egui::pos2(0.0, 0.0), egui::pos2(1.0, 1.0)),
            Color32::WHITE,
        );

        if !interactive {
            return Vec::new();
        }

        let canvas = CanvasRect::new(
            rect.left() as f64,
            rect.top() as f64,
            rect.width() as f64,
            rect.height() as f64,
        );
        let (pressed, released, moving, hover) = ui.input(|i| {
            (
                i.pointer.primary_pressed(),
                i.pointer.primary_released(),
                i.pointer.is_moving(),
                i.pointer.hover_pos(),
            )
        });
        let inside = hover
            .map(|pos| canvas.contains(pos.x as f64, pos.y as f64))
            .unwrap_or(false);
        let percent = hover.and_then(|pos| canvas.to_percent(pos.x as f64, pos.y as f64));

        let mut events = Vec::new();
        if pressed && inside {
            if let Some((x, y)) = percent {
                events.push(EditorEvent::PointerDown { x, y });
            }
        }

        if editor.drag().is_some() || pressed {
            if inside {
                if let (true, Some((x, y))) = (moving, percent) {
                    events.push(EditorEvent::PointerMove { x, y });
                }
            } else if editor.drag().is_some() {
                events.push(EditorEvent::PointerLeave);
            }
        }

        if released {
            events.push(EditorEvent::PointerUp);
        }

        let cursor = if editor.drag().is_some() {
            Some(CursorIcon::Grabbing)
        } else if inside {
            percent
                .and_then(|(x, y)| hit_test(editor.poster(), x, y))
                .map(|_| CursorIcon::Grab)
        } else {
            None
        };
        if let Some(icon) = cursor {
            ui.output_mut(|o| o.cursor_icon = icon);
        }

        events
    }
}

/// Largest size with `image`'s aspect ratio that fits in `available`.
fn fit(image: egui::Vec2, available: egui::Vec2) -> egui::Vec2 {
    if image.x <= 0.0 || image.y <= 0.0 {
        return egui::Vec2::ZERO;
    }
    let scale = (available.x / image.x).min(available.y / image.y).max(0.0);
    image * scale
}
