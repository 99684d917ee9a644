//! Linear undo/redo over element-collection snapshots.

use crate::draw::Frame;

/// Snapshot history with a movable cursor.
///
/// `snapshots[0..=step]` is the valid past; anything after `step` is the redo
/// tail, discarded by the next commit. There is always at least one snapshot.
#[derive(Debug, Clone)]
pub struct History {
    snapshots: Vec<Frame>,
    step: usize,
    max_depth: usize,
}

impl Default for History {
    fn default() -> Self {
        Self::new(0)
    }
}

impl History {
    /// Starts with a single empty snapshot. `max_depth == 0` keeps everything.
    pub fn new(max_depth: usize) -> Self {
        Self::with_initial(Frame::new(), max_depth)
    }

    /// Starts from `initial`, which undo can never go past.
    pub fn with_initial(initial: Frame, max_depth: usize) -> Self {
        Self {
            snapshots: vec![initial],
            step: 0,
            max_depth,
        }
    }

    /// Records `snapshot` as the new present, dropping any redo tail.
    pub fn commit(&mut self, snapshot: Frame) {
        self.snapshots.truncate(self.step + 1);
        self.snapshots.push(snapshot);
        self.step = self.snapshots.len() - 1;

        if self.max_depth > 0 && self.snapshots.len() > self.max_depth {
            let excess = self.snapshots.len() - self.max_depth;
            self.snapshots.drain(..excess);
            self.step -= excess;
            log::debug!("History trimmed {excess} oldest snapshot(s)");
        }
    }

    /// Steps back, returning the snapshot to restore. `None` at the oldest entry.
    pub fn undo(&mut self) -> Option<&Frame> {
        if !self.can_undo() {
            return None;
        }
        self.step -= 1;
        log::debug!("Undo to step {}", self.step);
        self.snapshots.get(self.step)
    }

    /// Steps forward, returning the snapshot to restore. `None` at the newest entry.
    pub fn redo(&mut self) -> Option<&Frame> {
        if !self.can_redo() {
            return None;
        }
        self.step += 1;
        log::debug!("Redo to step {}", self.step);
        self.snapshots.get(self.step)
    }

    pub fn current(&self) -> &Frame {
        &self.snapshots[self.step]
    }

    pub fn can_undo(&self) -> bool {
        self.step > 0
    }

    pub fn can_redo(&self) -> bool {
        self.step + 1 < self.snapshots.len()
    }

    pub fn step(&self) -> usize {
        self.step
    }

    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    pub fn max_depth(&self) -> usize {
        self.max_depth
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::draw::color::RED;
    use crate::draw::element::{DrawingElement, Symbol};
    use crate::draw::symbol::{Glyph, SizeTier};
    use crate::geometry::Point;

    fn frame_with(count: usize) -> Frame {
        Frame::from_elements(
            (0..count)
                .map(|i| {
                    DrawingElement::Symbol(Symbol {
                        anchor: Point::new(i as f64, 0.0),
                        glyph: Glyph::Checkmark,
                        size: SizeTier::Medium,
                        rotation: 0.0,
                        color: RED,
                    })
                })
                .collect(),
        )
    }

    #[test]
    fn starts_with_one_empty_snapshot() {
        let history = History::default();
        assert_eq!(history.len(), 1);
        assert!(history.current().is_empty());
        assert!(!history.can_undo());
        assert!(!history.can_redo());
    }

    #[test]
    fn undo_then_redo_n_times_restores_collection() {
        let mut history = History::new(0);
        for n in 1..=4 {
            history.commit(frame_with(n));
        }
        let latest = history.current().clone();

        for _ in 0..3 {
            assert!(history.undo().is_some());
        }
        assert_eq!(history.current().len(), 1);
        for _ in 0..3 {
            assert!(history.redo().is_some());
        }
        assert_eq!(history.current(), &latest);
    }

    #[test]
    fn undo_and_redo_stop_at_the_ends() {
        let mut history = History::new(0);
        history.commit(frame_with(1));
        assert!(history.undo().is_some());
        assert!(history.undo().is_none());
        assert_eq!(history.step(), 0);
        assert!(history.redo().is_some());
        assert!(history.redo().is_none());
        assert_eq!(history.step(), 1);
    }

    #[test]
    fn commit_after_undo_drops_redo_tail() {
        let mut history = History::new(0);
        history.commit(frame_with(1));
        history.commit(frame_with(2));
        history.undo();
        history.commit(frame_with(5));

        assert!(!history.can_redo());
        assert_eq!(history.len(), 3);
        assert_eq!(history.current().len(), 5);
    }

    #[test]
    fn depth_cap_drops_oldest() {
        let mut history = History::new(3);
        for n in 1..=5 {
            history.commit(frame_with(n));
        }
        assert_eq!(history.len(), 3);
        assert_eq!(history.current().len(), 5);
        history.undo();
        history.undo();
        assert!(!history.can_undo());
        assert_eq!(history.current().len(), 3);
    }
}
