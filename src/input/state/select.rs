use crate::geometry::{self, Point, ResizeAnchor};
use crate::input::hit::{self, Handle, SelectionHandles};

use super::{AnnotationSession, DrawingState};

impl AnnotationSession {
    /// Select-tool press: grab a handle of the current selection, pick the
    /// topmost element under the pointer, or clear the selection.
    pub(super) fn select_press(&mut self, p: Point) {
        if let Some(index) = self.selection {
            if let Some(element) = self.frame.get(index) {
                let handles = SelectionHandles::for_element(element, &self.selection_config);
                match handles.handle_at(p) {
                    Some(Handle::Resize) => {
                        self.state = DrawingState::Resizing {
                            index,
                            original: element.clone(),
                            origin: p,
                            preview: element.clone(),
                        };
                        return;
                    }
                    Some(Handle::Rotate) => {
                        self.state = DrawingState::Rotating {
                            index,
                            original: element.clone(),
                            preview: element.clone(),
                        };
                        return;
                    }
                    None => {}
                }
            }
        }

        match hit::topmost_hit(&self.frame, p, &self.tolerance) {
            Some(index) => {
                let element = self.frame.elements[index].clone();
                self.selection = Some(index);
                self.state = DrawingState::Dragging {
                    index,
                    original: element.clone(),
                    origin: p,
                    preview: element,
                };
            }
            None => {
                if self.selection.take().is_some() {
                    log::debug!("Selection cleared");
                }
            }
        }
    }

    /// Recomputes the transform preview from the original element and the
    /// total pointer delta, so repeated moves never accumulate error.
    pub(super) fn select_move(&mut self, p: Point) {
        match &mut self.state {
            DrawingState::Dragging {
                original,
                origin,
                preview,
                ..
            } => {
                *preview = original.translated(p.x - origin.x, p.y - origin.y);
            }
            DrawingState::Resizing {
                original,
                origin,
                preview,
                ..
            } => {
                let target = geometry::scale_bounding_box(
                    original.bounds(),
                    (p.x - origin.x, p.y - origin.y),
                    ResizeAnchor::BottomRight,
                );
                *preview = original.resized(target);
            }
            DrawingState::Rotating {
                original, preview, ..
            } => {
                let degrees = hit::rotation_for_pointer(original.center(), p);
                if let Some(rotated) = original.rotated_to(degrees) {
                    *preview = rotated;
                }
            }
            _ => {}
        }
    }

    /// Writes the preview back and pushes history, unless nothing changed.
    pub(super) fn select_release(&mut self, transform: DrawingState) {
        let (index, original, preview) = match transform {
            DrawingState::Dragging {
                index,
                original,
                preview,
                ..
            }
            | DrawingState::Resizing {
                index,
                original,
                preview,
                ..
            }
            | DrawingState::Rotating {
                index,
                original,
                preview,
            } => (index, original, preview),
            _ => return,
        };

        if preview == original {
            return;
        }
        if self.frame.replace(index, preview) {
            self.push_history();
            log::debug!("Transformed element {index}");
        }
    }
}
