//! Font discovery and loading.
//!
//! Families are looked up by name in a `fontdb` database (system fonts plus
//! any configured directories). A missing family is not an error: the lookup
//! falls back to sans-serif, then to any face at all, and text is skipped
//! only when the database is empty.

use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

use fontdb::{Database, Family, Query, Stretch, Style, Weight};
use rateposter_common::config::FontConfig;
use rateposter_common::error::{PosterError, PosterResult};

/// Weight every field is drawn with (CSS `600`).
pub const TEXT_WEIGHT: Weight = Weight::SEMIBOLD;

/// Raw font bytes plus the face index within a collection.
#[derive(Debug, Clone)]
pub struct LoadedFont {
    family: String,
    data: Arc<Vec<u8>>,
    index: u32,
}

impl LoadedFont {
    /// Wrap font bytes, checking that both the shaper and the rasteriser can
    /// read them.
    pub fn from_bytes(family: impl Into<String>, data: Vec<u8>, index: u32) -> PosterResult<Self> {
        let family = family.into();
        if rustybuzz::Face::from_slice(&data, index).is_none() {
            return Err(PosterError::font(format!("{family}: unreadable face {index}")));
        }
        ab_glyph::FontRef::try_from_slice_and_index(&data, index)
            .map_err(|e| PosterError::font(format!("{family}: {e}")))?;
        Ok(Self {
            family,
            data: Arc::new(data),
            index,
        })
    }

    /// Family name the face was resolved as.
    pub fn family(&self) -> &str {
        &self.family
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn index(&self) -> u32 {
        self.index
    }
}

/// Family-name to face resolver with a per-family cache.
pub struct FontBook {
    db: Database,
    cache: HashMap<String, Option<LoadedFont>>,
}

impl FontBook {
    /// A book with no faces at all.
    pub fn empty() -> Self {
        Self {
            db: Database::new(),
            cache: HashMap::new(),
        }
    }

    /// A book seeded with the system's installed fonts.
    pub fn system() -> Self {
        let mut book = Self::empty();
        book.db.load_system_fonts();
        tracing::debug!(faces = book.db.len(), "Loaded system fonts");
        book
    }

    /// System fonts plus every configured extra directory.
    pub fn from_config(config: &FontConfig) -> Self {
        let mut book = Self::system();
        for dir in &config.extra_dirs {
            book.load_dir(dir);
        }
        book
    }

    /// Scan a directory for font files.
    pub fn load_dir(&mut self, dir: &Path) {
        let before = self.db.len();
        self.db.load_fonts_dir(dir);
        tracing::debug!(
            dir = %dir.display(),
            faces = self.db.len() - before,
            "Loaded font directory"
        );
        self.cache.clear();
    }

    /// Number of faces known to the book.
    pub fn face_count(&self) -> usize {
        self.db.len()
    }

    /// Whether a face with exactly this family name is installed.
    pub fn has_family(&self, family: &str) -> bool {
        self.db.faces().any(|face| {
            face.families
                .iter()
                .any(|(name, _)| name.eq_ignore_ascii_case(family))
        })
    }

    /// Resolve `family` at [`TEXT_WEIGHT`], falling back to sans-serif and
    /// then to any available face. Logs once per family that cannot be
    /// resolved at all.
    pub fn resolve(&mut self, family: &str) -> Option<LoadedFont> {
        if let Some(cached) = self.cache.get(family) {
            return cached.clone();
        }

        let resolved = self.lookup(family);
        match &resolved {
            Some(font) if !font.family().eq_ignore_ascii_case(family) => {
                tracing::info!(requested = family, using = font.family(), "Font fallback");
            }
            Some(_) => {}
            None => tracing::warn!(family, "No usable font face, text will not be drawn"),
        }
        self.cache.insert(family.to_string(), resolved.clone());
        resolved
    }

    fn lookup(&self, family: &str) -> Option<LoadedFont> {
        let query = Query {
            families: &[Family::Name(family), Family::SansSerif],
            weight: TEXT_WEIGHT,
            stretch: Stretch::Normal,
            style: Style::Normal,
        };
        let id = self
            .db
            .query(&query)
            .or_else(|| self.db.faces().next().map(|face| face.id))?;

        let face_family = self
            .db
            .face(id)
            .and_then(|face| face.families.first().map(|(name, _)| name.clone()))
            .unwrap_or_else(|| family.to_string());

        let (data, index) = self
            .db
            .with_face_data(id, |data, index| (data.to_vec(), index))?;

        match LoadedFont::from_bytes(face_family, data, index) {
            Ok(font) => Some(font),
            Err(e) => {
                tracing::warn!(error = %e, "Skipping unreadable font face");
                None
            }
        }
    }
}

impl Default for FontBook {
    fn default() -> Self {
        Self::system()
    }
}
