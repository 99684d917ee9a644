//! Gesture state machine and annotation session state.

use crate::config::{Config, SelectionConfig};
use crate::draw::{Color, DrawingElement, FontDescriptor, Frame, ShapeKind, SizeTier, StrokeTool};
use crate::geometry::Point;
use crate::history::History;
use crate::input::{hit::HitTolerance, modifiers::Modifiers, tool::Tool};
use crate::live::{LiveRecorder, LiveSession};

/// Asks the host for text to place at an anchor.
///
/// Called synchronously when the text tool is pressed. `None` cancels.
pub trait TextPrompt {
    fn prompt(&mut self, anchor: Point) -> Option<String>;
}

impl<F> TextPrompt for F
where
    F: FnMut(Point) -> Option<String>,
{
    fn prompt(&mut self, anchor: Point) -> Option<String> {
        self(anchor)
    }
}

/// Current gesture.
///
/// Every gesture starts on `Down` and ends on `Up` or `Leave`; `Escape` drops
/// it without committing. `started_at` is the video time of the `Down` event.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawingState {
    /// Waiting for a pointer press
    Idle,
    /// Freehand stroke in progress
    Freehand {
        tool: StrokeTool,
        points: Vec<Point>,
        started_at: f64,
    },
    /// Anchor tool pressed, pointer not moved yet
    Anchored {
        kind: ShapeKind,
        start: Point,
        started_at: f64,
    },
    /// Anchor tool being dragged; `current` is the live end anchor
    Previewing {
        kind: ShapeKind,
        start: Point,
        current: Point,
        started_at: f64,
    },
    /// Selected element being moved
    Dragging {
        index: usize,
        original: DrawingElement,
        origin: Point,
        preview: DrawingElement,
    },
    /// Selected element being resized from its bottom-right handle
    Resizing {
        index: usize,
        original: DrawingElement,
        origin: Point,
        preview: DrawingElement,
    },
    /// Selected element being rotated around its center
    Rotating {
        index: usize,
        original: DrawingElement,
        preview: DrawingElement,
    },
}

impl DrawingState {
    pub fn is_idle(&self) -> bool {
        matches!(self, DrawingState::Idle)
    }

    /// Index and preview of an element under transform.
    pub fn transform_preview(&self) -> Option<(usize, &DrawingElement)> {
        match self {
            DrawingState::Dragging { index, preview, .. }
            | DrawingState::Resizing { index, preview, .. }
            | DrawingState::Rotating { index, preview, .. } => Some((*index, preview)),
            _ => None,
        }
    }
}

/// Style applied to newly created elements.
#[derive(Debug, Clone, PartialEq)]
pub struct ToolStyle {
    pub color: Color,
    pub thickness: f64,
    pub font_size: f64,
    pub filled: bool,
    pub symbol_size: SizeTier,
    pub highlighter_opacity: f64,
}

impl Default for ToolStyle {
    fn default() -> Self {
        Self::from_config(&Config::default())
    }
}

impl ToolStyle {
    pub fn from_config(config: &Config) -> Self {
        Self {
            color: config.drawing.default_color.to_color(),
            thickness: config.drawing.default_thickness,
            font_size: config.drawing.default_font_size,
            filled: false,
            symbol_size: config.drawing.default_symbol_size.to_tier(),
            highlighter_opacity: config.drawing.highlighter_opacity,
        }
    }
}

/// One annotation session: the element collection plus everything needed to
/// edit it through pointer and key events.
///
/// Single-threaded; the host feeds events and calls `render` on its own
/// schedule.
pub struct AnnotationSession {
    /// Committed elements in paint order
    pub(crate) frame: Frame,
    pub(crate) history: History,
    pub tool: Tool,
    pub style: ToolStyle,
    pub font: FontDescriptor,
    pub modifiers: Modifiers,
    pub state: DrawingState,
    /// Index of the selected element in `frame`
    pub(crate) selection: Option<usize>,
    pub(crate) selection_config: SelectionConfig,
    pub(crate) tolerance: HitTolerance,
    /// Maximum elements in the frame (0 = unlimited)
    pub max_elements: usize,
    /// Last video time reported by the host
    pub(crate) video_time: f64,
    pub(crate) recorder: Option<LiveRecorder>,
    pub(crate) text_prompt: Option<Box<dyn TextPrompt>>,
    /// Whether the display needs to be redrawn
    pub needs_redraw: bool,
    pub canvas_width: i32,
    pub canvas_height: i32,
}

impl Default for AnnotationSession {
    fn default() -> Self {
        Self::from_config(&Config::default())
    }
}

impl std::fmt::Debug for AnnotationSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AnnotationSession")
            .field("elements", &self.frame.len())
            .field("tool", &self.tool)
            .field("state", &self.state)
            .field("selection", &self.selection)
            .field("capturing", &self.recorder.is_some())
            .finish_non_exhaustive()
    }
}

impl AnnotationSession {
    /// Creates an empty session using the config's defaults.
    ///
    /// Canvas dimensions default to 0 and should be set by the host once its
    /// surface size is known (see `update_canvas_dimensions`).
    pub fn from_config(config: &Config) -> Self {
        Self {
            frame: Frame::new(),
            history: History::new(config.history.max_depth),
            tool: Tool::default(),
            style: ToolStyle::from_config(config),
            font: config.font_descriptor(),
            modifiers: Modifiers::new(),
            state: DrawingState::Idle,
            selection: None,
            tolerance: HitTolerance::from(&config.selection),
            selection_config: config.selection.clone(),
            max_elements: config.drawing.max_elements,
            video_time: 0.0,
            recorder: None,
            text_prompt: None,
            needs_redraw: true,
            canvas_width: 0,
            canvas_height: 0,
        }
    }

    /// Starts from previously saved elements; they become the undo floor.
    pub fn with_elements(config: &Config, elements: Vec<DrawingElement>) -> Self {
        let mut session = Self::from_config(config);
        session.frame = Frame::from_elements(elements);
        session.history = History::with_initial(session.frame.clone(), config.history.max_depth);
        session
    }

    pub fn update_canvas_dimensions(&mut self, width: i32, height: i32) {
        self.canvas_width = width;
        self.canvas_height = height;
        self.needs_redraw = true;
    }

    pub fn set_text_prompt(&mut self, prompt: Box<dyn TextPrompt>) {
        self.text_prompt = Some(prompt);
    }

    /// Switches tool, dropping any gesture in progress.
    pub fn set_tool(&mut self, tool: Tool) {
        if self.tool != tool {
            self.cancel_gesture();
            if tool != Tool::Select {
                self.selection = None;
            }
            self.tool = tool;
            self.needs_redraw = true;
        }
    }

    pub fn elements(&self) -> &[DrawingElement] {
        &self.frame.elements
    }

    pub fn frame(&self) -> &Frame {
        &self.frame
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn selection(&self) -> Option<usize> {
        self.selection
    }

    pub fn selected_element(&self) -> Option<&DrawingElement> {
        self.selection.and_then(|index| self.frame.get(index))
    }

    pub fn video_time(&self) -> f64 {
        self.video_time
    }

    /// Records the host's current video time.
    pub fn set_video_time(&mut self, seconds: f64) {
        self.video_time = seconds;
    }

    pub fn is_capturing(&self) -> bool {
        self.recorder.is_some()
    }

    /// Elements captured so far in the running live capture.
    pub fn captured_elements(&self) -> impl Iterator<Item = &DrawingElement> {
        self.recorder.iter().flat_map(|recorder| recorder.elements())
    }

    /// Starts live capture anchored at the current video time.
    ///
    /// Elements committed while capturing go to the recorder instead of the
    /// static collection. Restarting discards the running capture.
    pub fn start_live_capture(&mut self) {
        if self.recorder.is_some() {
            log::warn!("Live capture restarted; discarding previous capture");
        }
        self.cancel_gesture();
        self.selection = None;
        self.recorder = Some(LiveRecorder::start(self.video_time));
        self.needs_redraw = true;
    }

    /// Ends live capture at the current video time.
    pub fn stop_live_capture(&mut self) -> Option<LiveSession> {
        self.cancel_gesture();
        let recorder = self.recorder.take()?;
        self.needs_redraw = true;
        Some(recorder.finish(self.video_time, self.canvas_width, self.canvas_height))
    }

    /// Drops the current gesture without committing anything.
    pub(crate) fn cancel_gesture(&mut self) {
        if !self.state.is_idle() {
            log::debug!("Gesture cancelled");
            self.state = DrawingState::Idle;
            self.needs_redraw = true;
        }
    }

    /// Commits a newly created element.
    ///
    /// During live capture the element is stamped and handed to the recorder;
    /// otherwise it joins the collection and a history snapshot is pushed.
    pub(crate) fn commit_new_element(&mut self, element: DrawingElement, started_at: f64) {
        if !element.is_committable() {
            log::debug!("Discarding incomplete element");
            return;
        }

        if let Some(recorder) = self.recorder.as_mut() {
            recorder.record(element, started_at, self.video_time);
            self.needs_redraw = true;
            return;
        }

        if self.frame.try_add_element(element, self.max_elements) {
            self.push_history();
        } else {
            log::warn!(
                "Element limit ({}) reached; discarding new element",
                self.max_elements
            );
        }
        self.needs_redraw = true;
    }

    /// Snapshots the collection as a committed mutation.
    pub(crate) fn push_history(&mut self) {
        self.history.commit(self.frame.clone());
    }
}
