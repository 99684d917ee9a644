use crate::input::events::Key;

use super::AnnotationSession;

impl AnnotationSession {
    /// Processes a key press event.
    ///
    /// - `Delete` / `Backspace`: delete the selected element
    /// - `Escape`: clear the selection and cancel any gesture in progress
    /// - `Ctrl+Z`: undo; `Ctrl+Shift+Z` or `Ctrl+Y`: redo
    /// - Modifier keys update the tracked modifier state
    pub fn on_key_press(&mut self, key: Key) {
        if self.modifiers.set(key, true) {
            return;
        }

        match key {
            Key::Delete | Key::Backspace => {
                self.delete_selection();
            }
            Key::Escape => self.escape(),
            Key::Char(c) if self.modifiers.ctrl => match c.to_ascii_lowercase() {
                'z' if self.modifiers.shift => {
                    self.redo();
                }
                'z' => {
                    self.undo();
                }
                'y' => {
                    self.redo();
                }
                _ => {}
            },
            _ => {}
        }
    }

    /// Processes a key release event.
    pub fn on_key_release(&mut self, key: Key) {
        self.modifiers.set(key, false);
    }

    /// Clears the selection and drops any gesture without committing it.
    pub fn escape(&mut self) {
        self.cancel_gesture();
        if self.selection.take().is_some() {
            self.needs_redraw = true;
        }
    }

    /// Removes the selected element as a committed mutation.
    ///
    /// Returns `false` when nothing is selected.
    pub fn delete_selection(&mut self) -> bool {
        if !self.state.is_idle() {
            return false;
        }
        let Some(index) = self.selection.take() else {
            return false;
        };
        if self.frame.remove(index).is_none() {
            return false;
        }
        self.push_history();
        self.needs_redraw = true;
        log::debug!("Deleted element {index}");
        true
    }

    /// Steps back one committed mutation.
    ///
    /// While capturing live, drops the most recently captured element instead.
    pub fn undo(&mut self) -> bool {
        self.cancel_gesture();
        if let Some(recorder) = self.recorder.as_mut() {
            let popped = recorder.pop_last().is_some();
            self.needs_redraw |= popped;
            return popped;
        }

        match self.history.undo() {
            Some(snapshot) => {
                self.frame = snapshot.clone();
                self.after_history_move();
                true
            }
            None => false,
        }
    }

    /// Re-applies the next committed mutation, if any.
    pub fn redo(&mut self) -> bool {
        if self.recorder.is_some() {
            return false;
        }
        self.cancel_gesture();
        match self.history.redo() {
            Some(snapshot) => {
                self.frame = snapshot.clone();
                self.after_history_move();
                true
            }
            None => false,
        }
    }

    /// Empties the collection as a committed mutation.
    pub fn clear(&mut self) {
        self.cancel_gesture();
        self.selection = None;
        if self.frame.is_empty() {
            return;
        }
        self.frame.clear();
        self.push_history();
        self.needs_redraw = true;
    }

    fn after_history_move(&mut self) {
        self.selection = None;
        self.needs_redraw = true;
    }
}
