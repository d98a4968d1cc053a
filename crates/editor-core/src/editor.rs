//! Event-driven editor state.
//!
//! All mutation goes through [`Editor::apply`], one event at a time. Every
//! change bumps [`Editor::revision`]; the caller redraws the whole surface
//! whenever the revision differs from the one it last rendered.

use chrono::NaiveDateTime;
use rateposter_common::PosterError;
use rateposter_model::locale::{derive_date_fields, derive_time_fields};
use rateposter_model::{DatePart, FieldId, Position, Poster, SourceImage, Style};

use crate::drag::DragSession;
use crate::hit_test::hit_test;
use crate::refresh::RefreshSchedule;

/// A discrete input to the editor.
#[derive(Debug, Clone)]
pub enum EditorEvent {
    /// Primary button pressed over the canvas, in canvas percent.
    PointerDown { x: f64, y: f64 },
    /// Pointer moved over the canvas, in canvas percent.
    PointerMove { x: f64, y: f64 },
    /// Primary button released.
    PointerUp,
    /// Pointer left the canvas.
    PointerLeave,
    SetText { field: FieldId, text: String },
    SetDatePart { part: DatePart, value: String },
    SetSize { field: FieldId, px: u32 },
    /// Place a field directly, bypassing hit-testing.
    SetPosition { field: FieldId, position: Position },
    SetColor(String),
    SetFont(String),
    /// Background decode finished.
    ImageDecoded(SourceImage),
    /// Background decode failed.
    ImageFailed(String),
    /// Wall-clock tick; drives date/time refresh.
    Tick(NaiveDateTime),
}

/// A blocking, user-visible notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    /// The uploaded file could not be read or decoded.
    UploadFailed { detail: String },
    /// Export was requested before any image was loaded.
    NoImage,
}

impl Notice {
    /// Text shown to the user.
    pub fn message(&self) -> &'static str {
        match self {
            Self::UploadFailed { .. } => "Error reading file",
            Self::NoImage => "Please upload an image first!",
        }
    }

    /// Map a user-facing error to its notice.
    pub fn from_error(err: &PosterError) -> Option<Self> {
        match err {
            PosterError::Decode { message } => Some(Self::UploadFailed {
                detail: message.clone(),
            }),
            PosterError::NoImage => Some(Self::NoImage),
            _ => None,
        }
    }
}

/// Outcome of applying one event.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Applied {
    /// The surface must be redrawn.
    pub redraw: bool,
    /// A notice to show, if any.
    pub notice: Option<Notice>,
}

impl Applied {
    fn changed() -> Self {
        Self {
            redraw: true,
            notice: None,
        }
    }

    fn unchanged() -> Self {
        Self::default()
    }

    fn notice(notice: Notice) -> Self {
        Self {
            redraw: false,
            notice: Some(notice),
        }
    }
}

/// The whole editable state of the poster editor.
#[derive(Debug, Clone)]
pub struct Editor {
    poster: Poster,
    image: Option<SourceImage>,
    drag: Option<DragSession>,
    loading: bool,
    revision: u64,
    schedule: RefreshSchedule,
}

impl Editor {
    /// A fresh editor whose fields were derived at `now`.
    pub fn new(now: NaiveDateTime, style: Style) -> Self {
        Self {
            poster: Poster::with_style(now, style),
            image: None,
            drag: None,
            loading: false,
            revision: 0,
            schedule: RefreshSchedule::new(now),
        }
    }

    pub fn poster(&self) -> &Poster {
        &self.poster
    }

    pub fn image(&self) -> Option<&SourceImage> {
        self.image.as_ref()
    }

    pub fn image_loaded(&self) -> bool {
        self.image.is_some()
    }

    pub fn drag(&self) -> Option<&DragSession> {
        self.drag.as_ref()
    }

    /// Dragged field and its live position, once the pointer has moved.
    pub fn drag_feedback(&self) -> Option<(FieldId, Position)> {
        self.drag
            .and_then(|drag| drag.live.map(|live| (drag.field, live)))
    }

    /// Whether an upload is being decoded.
    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// Monotonic counter bumped on every visible change.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Mark an upload as started. Decoding itself happens elsewhere and
    /// reports back with [`EditorEvent::ImageDecoded`] or
    /// [`EditorEvent::ImageFailed`].
    pub fn begin_upload(&mut self) {
        self.loading = true;
    }

    /// The image to export, or the notice to show when there is none.
    pub fn export_source(&self) -> Result<&SourceImage, Notice> {
        self.image.as_ref().ok_or(Notice::NoImage)
    }

    /// Apply one event.
    pub fn apply(&mut self, event: EditorEvent) -> Applied {
        let applied = match event {
            EditorEvent::PointerDown { x, y } => self.pointer_down(x, y),
            EditorEvent::PointerMove { x, y } => self.pointer_move(x, y),
            EditorEvent::PointerUp | EditorEvent::PointerLeave => self.release(),
            EditorEvent::SetText { field, text } => {
                self.poster.set_text(field, text);
                Applied::changed()
            }
            EditorEvent::SetDatePart { part, value } => {
                self.poster.set_date_part(part, value);
                Applied::changed()
            }
            EditorEvent::SetSize { field, px } => {
                self.poster.set_size(field, px);
                Applied::changed()
            }
            EditorEvent::SetPosition { field, position } => {
                self.poster.set_position(field, position);
                Applied::changed()
            }
            EditorEvent::SetColor(color) => {
                self.poster.style.color = color;
                Applied::changed()
            }
            EditorEvent::SetFont(family) => {
                self.poster.style.font_family = family;
                Applied::changed()
            }
            EditorEvent::ImageDecoded(image) => {
                tracing::info!(
                    width = image.width(),
                    height = image.height(),
                    "Source image loaded"
                );
                self.image = Some(image);
                self.loading = false;
                self.drag = None;
                Applied::changed()
            }
            EditorEvent::ImageFailed(detail) => {
                tracing::warn!(error = %detail, "Source image failed to load");
                self.loading = false;
                Applied::notice(Notice::UploadFailed { detail })
            }
            EditorEvent::Tick(now) => self.tick(now),
        };

        if applied.redraw {
            self.revision += 1;
        }
        applied
    }

    fn pointer_down(&mut self, x: f64, y: f64) -> Applied {
        if self.image.is_none() {
            return Applied::unchanged();
        }
        match hit_test(&self.poster, x, y) {
            Some(field) => {
                tracing::debug!(%field, x, y, "Drag started");
                self.drag = Some(DragSession::begin(field));
                Applied::changed()
            }
            None => Applied::unchanged(),
        }
    }

    fn pointer_move(&mut self, x: f64, y: f64) -> Applied {
        let Some(drag) = self.drag.as_mut() else {
            return Applied::unchanged();
        };
        let position = drag.update(x, y);
        self.poster.set_position(drag.field, position);
        Applied::changed()
    }

    fn release(&mut self) -> Applied {
        match self.drag.take() {
            Some(drag) => {
                tracing::debug!(
                    field = %drag.field,
                    x = self.poster.position(drag.field).x(),
                    y = self.poster.position(drag.field).y(),
                    "Drag finished"
                );
                Applied::changed()
            }
            None => Applied::unchanged(),
        }
    }

    fn tick(&mut self, now: NaiveDateTime) -> Applied {
        let due = self.schedule.poll(now);
        if due.date {
            tracing::debug!(%now, "Refreshing date fields");
            self.poster.apply_date(&derive_date_fields(now));
        }
        if due.time {
            self.poster.apply_time(&derive_time_fields(now));
        }
        if due.any() {
            Applied::changed()
        } else {
            Applied::unchanged()
        }
    }
}
