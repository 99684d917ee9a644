//! Output payloads and the storage boundary.
//!
//! The engine hands finished annotations to an [`AnnotationStore`]; what the
//! store does with them (key-value records, files, uploads) is its own
//! business. [`DirectoryStore`] is the reference implementation used by the
//! CLI and tests.

pub mod store;

pub use store::{DirectoryStore, PayloadFile, StoreError, read_payload_file};

use crate::draw::{DrawingElement, FontDescriptor, RasterSurface, SurfaceError, render};
use crate::live::{LiveSession, ReplayRenderer};
use serde::{Deserialize, Serialize};

/// Annotation drawn on a paused frame.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StaticAnnotation {
    pub elements: Vec<DrawingElement>,
    pub canvas_width: i32,
    pub canvas_height: i32,
}

/// Named live capture.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LiveSessionRecord {
    pub name: String,
    pub session: LiveSession,
}

/// Either payload kind, as stored on disk.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Payload {
    Static(StaticAnnotation),
    Live(LiveSessionRecord),
}

impl Payload {
    /// Elements in paint order, regardless of payload kind.
    pub fn elements(&self) -> Vec<&DrawingElement> {
        match self {
            Payload::Static(annotation) => annotation.elements.iter().collect(),
            Payload::Live(record) => record.session.elements().collect(),
        }
    }

    pub fn canvas_size(&self) -> (i32, i32) {
        match self {
            Payload::Static(a) => (a.canvas_width, a.canvas_height),
            Payload::Live(r) => (r.session.canvas_width, r.session.canvas_height),
        }
    }

    /// Text content for search indexing.
    pub fn text(&self) -> String {
        join_text(self.elements().into_iter())
    }
}

/// Joins the text of every Text element with single spaces, in paint order.
pub fn extract_text(elements: &[DrawingElement]) -> String {
    join_text(elements.iter())
}

fn join_text<'a>(elements: impl Iterator<Item = &'a DrawingElement>) -> String {
    elements
        .filter_map(DrawingElement::text_content)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Result of handing a payload to a store.
#[derive(Debug, Clone, PartialEq)]
pub enum SaveOutcome {
    /// Store accepted the payload under this identifier
    Saved(String),
    Failed(String),
}

impl SaveOutcome {
    pub fn is_saved(&self) -> bool {
        matches!(self, SaveOutcome::Saved(_))
    }
}

/// Persistence collaborator.
///
/// Implementations receive the payload, its extracted text and a PNG
/// thumbnail, and return an identifier for the stored record.
pub trait AnnotationStore {
    fn save_static(
        &mut self,
        annotation: &StaticAnnotation,
        text: &str,
        thumbnail_png: &[u8],
    ) -> Result<String, StoreError>;

    fn save_live(
        &mut self,
        record: &LiveSessionRecord,
        text: &str,
        thumbnail_png: &[u8],
    ) -> Result<String, StoreError>;
}

/// Renders `annotation` at canvas size and encodes a bounded PNG thumbnail.
pub fn static_thumbnail(
    annotation: &StaticAnnotation,
    font: &FontDescriptor,
    max_width: i32,
    max_height: i32,
) -> Result<Vec<u8>, SurfaceError> {
    let surface = RasterSurface::new(annotation.canvas_width, annotation.canvas_height);
    if let Some(ctx) = surface.context() {
        render::render_elements(&ctx, &annotation.elements, font);
    }
    surface.thumbnail(max_width, max_height)
}

/// Renders the final frame of a live session and encodes a thumbnail.
pub fn live_thumbnail(
    session: &LiveSession,
    font: &FontDescriptor,
    max_width: i32,
    max_height: i32,
) -> Result<Vec<u8>, SurfaceError> {
    let surface = RasterSurface::new(session.canvas_width, session.canvas_height);
    let duration = session.duration;
    ReplayRenderer::new(session.clone(), font.clone()).render_frame(&surface, duration);
    surface.thumbnail(max_width, max_height)
}

/// Thumbnails and stores a live session, turning every failure into
/// [`SaveOutcome::Failed`]. The caller keeps `session` either way.
pub fn save_live_session(
    store: &mut dyn AnnotationStore,
    name: &str,
    session: &LiveSession,
    font: &FontDescriptor,
    thumbnail_bounds: (i32, i32),
) -> SaveOutcome {
    let thumbnail = match live_thumbnail(session, font, thumbnail_bounds.0, thumbnail_bounds.1) {
        Ok(png) => png,
        Err(err) => {
            log::warn!("Live session thumbnail failed: {err}");
            return SaveOutcome::Failed(err.to_string());
        }
    };
    let record = LiveSessionRecord {
        name: name.to_string(),
        session: session.clone(),
    };
    let text = join_text(record.session.elements());
    match store.save_live(&record, &text, &thumbnail) {
        Ok(id) => {
            log::info!("Saved live session '{name}' as {id}");
            SaveOutcome::Saved(id)
        }
        Err(err) => {
            log::warn!("Failed to save live session '{name}': {err}");
            SaveOutcome::Failed(err.to_string())
        }
    }
}
