use crate::config::ThumbnailConfig;
use crate::persist::{self, AnnotationStore, SaveOutcome, StaticAnnotation};

use super::AnnotationSession;

impl AnnotationSession {
    /// Snapshot of the committed elements as a static payload.
    pub fn static_annotation(&self) -> StaticAnnotation {
        StaticAnnotation {
            elements: self.frame.elements.clone(),
            canvas_width: self.canvas_width,
            canvas_height: self.canvas_height,
        }
    }

    /// Hands the static annotation to `store` with its text and thumbnail.
    ///
    /// Never touches the collection or history; on failure the user can keep
    /// editing and retry.
    pub fn save_static(
        &self,
        store: &mut dyn AnnotationStore,
        thumbnail: &ThumbnailConfig,
    ) -> SaveOutcome {
        let annotation = self.static_annotation();
        let png = match persist::static_thumbnail(
            &annotation,
            &self.font,
            thumbnail.max_width,
            thumbnail.max_height,
        ) {
            Ok(png) => png,
            Err(err) => {
                log::warn!("Annotation thumbnail failed: {err}");
                return SaveOutcome::Failed(err.to_string());
            }
        };

        let text = persist::extract_text(&annotation.elements);
        match store.save_static(&annotation, &text, &png) {
            Ok(id) => {
                log::info!(
                    "Saved annotation with {} elements as {id}",
                    annotation.elements.len()
                );
                SaveOutcome::Saved(id)
            }
            Err(err) => {
                log::warn!("Failed to save annotation: {err}");
                SaveOutcome::Failed(err.to_string())
            }
        }
    }

    /// Ends live capture and stores the session under `name`.
    ///
    /// Returns `None` when no capture was running. Capture only ends once the
    /// store accepts the session; after a failure the captured elements stay
    /// in place and the save can be retried.
    pub fn stop_and_save_live(
        &mut self,
        name: &str,
        store: &mut dyn AnnotationStore,
        thumbnail: &ThumbnailConfig,
    ) -> Option<SaveOutcome> {
        let recorder = self.recorder.clone()?;
        let session = recorder.finish(self.video_time, self.canvas_width, self.canvas_height);
        let outcome = persist::save_live_session(
            store,
            name,
            &session,
            &self.font,
            (thumbnail.max_width, thumbnail.max_height),
        );
        if outcome.is_saved() {
            self.cancel_gesture();
            self.recorder = None;
            self.needs_redraw = true;
        }
        Some(outcome)
    }
}
