//! Stamps elements committed during live capture with video-relative times.

use crate::draw::{DrawingElement, TimeWindow};
use serde::{Deserialize, Serialize};

/// One element captured during playback.
///
/// Times are seconds relative to the session's capture origin.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LiveStroke {
    pub element: DrawingElement,
    pub start_time: f64,
    pub end_time: f64,
}

impl LiveStroke {
    pub fn window(&self) -> TimeWindow {
        TimeWindow::new(self.start_time, self.end_time)
    }
}

/// A finished live capture. Immutable once produced.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LiveSession {
    pub strokes: Vec<LiveStroke>,
    /// Seconds from the capture origin to the end of capture
    pub duration: f64,
    pub canvas_width: i32,
    pub canvas_height: i32,
    /// Video time at which capture began
    pub capture_origin: f64,
}

impl LiveSession {
    pub fn elements(&self) -> impl Iterator<Item = &DrawingElement> {
        self.strokes.iter().map(|stroke| &stroke.element)
    }

    /// Converts an absolute video time into session-relative time.
    pub fn relative_time(&self, video_time: f64) -> f64 {
        video_time - self.capture_origin
    }
}

/// Accumulates elements while capture is running.
#[derive(Debug, Clone)]
pub struct LiveRecorder {
    capture_origin: f64,
    strokes: Vec<LiveStroke>,
}

impl LiveRecorder {
    /// Begins a capture anchored at `video_time`.
    pub fn start(video_time: f64) -> Self {
        log::info!("Live capture started at video time {video_time:.3}s");
        Self {
            capture_origin: video_time,
            strokes: Vec::new(),
        }
    }

    pub fn capture_origin(&self) -> f64 {
        self.capture_origin
    }

    pub fn len(&self) -> usize {
        self.strokes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.strokes.is_empty()
    }

    /// Captured elements in commit order.
    pub fn elements(&self) -> impl Iterator<Item = &DrawingElement> {
        self.strokes.iter().map(|stroke| &stroke.element)
    }

    /// Stamps and stores an element whose gesture ran from `gesture_start` to
    /// `gesture_end` (absolute video times).
    ///
    /// Strokes also carry the window in their own `timing` field.
    pub fn record(&mut self, mut element: DrawingElement, gesture_start: f64, gesture_end: f64) {
        let start_time = gesture_start - self.capture_origin;
        let end_time = (gesture_end - self.capture_origin).max(start_time);
        if let DrawingElement::Stroke(stroke) = &mut element {
            stroke.timing = Some(TimeWindow::new(start_time, end_time));
        }
        log::debug!("Captured element at {start_time:.3}s..{end_time:.3}s");
        self.strokes.push(LiveStroke {
            element,
            start_time,
            end_time,
        });
    }

    /// Drops the most recently captured element.
    pub fn pop_last(&mut self) -> Option<LiveStroke> {
        self.strokes.pop()
    }

    /// Ends the capture at video time `video_time`.
    ///
    /// The duration never ends before the last captured element.
    pub fn finish(self, video_time: f64, canvas_width: i32, canvas_height: i32) -> LiveSession {
        let last_end = self
            .strokes
            .iter()
            .map(|stroke| stroke.end_time)
            .fold(0.0_f64, f64::max);
        let duration = (video_time - self.capture_origin).max(last_end);
        log::info!(
            "Live capture finished: {} element(s), {duration:.3}s",
            self.strokes.len()
        );
        LiveSession {
            strokes: self.strokes,
            duration,
            canvas_width,
            canvas_height,
            capture_origin: self.capture_origin,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::draw::{Glyph, RED, SizeTier, Stroke, StrokeTool, Symbol};
    use crate::geometry::Point;

    fn pen() -> DrawingElement {
        DrawingElement::Stroke(Stroke {
            tool: StrokeTool::Pen,
            points: vec![Point::new(0.0, 0.0), Point::new(4.0, 4.0)],
            color: RED,
            width: 2.0,
            opacity: 1.0,
            timing: None,
        })
    }

    #[test]
    fn record_stamps_relative_window() {
        let mut recorder = LiveRecorder::start(10.0);
        recorder.record(pen(), 11.0, 13.0);

        let session = recorder.finish(15.0, 640, 360);
        let stroke = &session.strokes[0];
        assert_eq!((stroke.start_time, stroke.end_time), (1.0, 3.0));
        assert_eq!(stroke.element.timing(), Some(TimeWindow::new(1.0, 3.0)));
        assert_eq!(session.duration, 5.0);
        assert_eq!(session.capture_origin, 10.0);
    }

    #[test]
    fn placement_has_zero_duration() {
        let mut recorder = LiveRecorder::start(0.0);
        let symbol = DrawingElement::Symbol(Symbol {
            anchor: Point::new(1.0, 1.0),
            glyph: Glyph::Pin,
            size: SizeTier::Small,
            rotation: 0.0,
            color: RED,
        });
        recorder.record(symbol, 2.5, 2.5);
        let session = recorder.finish(3.0, 100, 100);
        assert!(session.strokes[0].window().is_instantaneous());
    }

    #[test]
    fn duration_covers_last_element_after_backward_seek() {
        let mut recorder = LiveRecorder::start(5.0);
        recorder.record(pen(), 6.0, 9.0);
        let session = recorder.finish(7.0, 100, 100);
        assert_eq!(session.duration, 4.0);
    }
}
