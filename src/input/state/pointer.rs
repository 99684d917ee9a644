use crate::draw::{DrawingElement, Glyph, Shape, ShapeKind, Stroke, StrokeTool, Symbol, Text};
use crate::geometry::Point;
use crate::input::events::{PointerEvent, PointerPhase};
use crate::input::tool::Tool;

use super::{AnnotationSession, DrawingState};

impl AnnotationSession {
    /// Processes one pointer event.
    ///
    /// `Leave` ends the gesture exactly like `Up`, so a pointer escaping the
    /// surface mid-drag still commits what was drawn.
    pub fn on_pointer(&mut self, event: PointerEvent) {
        let p = event.point();
        match event.phase {
            PointerPhase::Down => self.on_pointer_down(p),
            PointerPhase::Move => self.on_pointer_move(p),
            PointerPhase::Up | PointerPhase::Leave => self.on_pointer_up(p),
        }
    }

    fn on_pointer_down(&mut self, p: Point) {
        if !self.state.is_idle() {
            // A second press without a release; finish the first gesture
            self.on_pointer_up(p);
        }

        let started_at = self.video_time;
        match self.tool {
            Tool::Pen | Tool::Eraser | Tool::Highlighter => {
                if let Some(tool) = self.tool.stroke_tool() {
                    self.state = DrawingState::Freehand {
                        tool,
                        points: vec![p],
                        started_at,
                    };
                }
            }
            Tool::Shape(kind) => {
                self.state = DrawingState::Anchored {
                    kind,
                    start: p,
                    started_at,
                };
            }
            Tool::Symbol(glyph) => self.place_symbol(glyph, p),
            Tool::Text => self.place_text(p),
            Tool::Select => self.select_press(p),
        }
        self.needs_redraw = true;
    }

    fn on_pointer_move(&mut self, p: Point) {
        if self.state.transform_preview().is_some() {
            self.select_move(p);
            self.needs_redraw = true;
            return;
        }

        match &mut self.state {
            DrawingState::Idle => return,
            DrawingState::Freehand { points, .. } => {
                if points.last() != Some(&p) {
                    points.push(p);
                }
            }
            DrawingState::Anchored {
                kind,
                start,
                started_at,
            } => {
                let (kind, start, started_at) = (*kind, *start, *started_at);
                self.state = DrawingState::Previewing {
                    kind,
                    start,
                    current: p,
                    started_at,
                };
            }
            DrawingState::Previewing { current, .. } => *current = p,
            DrawingState::Dragging { .. }
            | DrawingState::Resizing { .. }
            | DrawingState::Rotating { .. } => {}
        }
        self.needs_redraw = true;
    }

    fn on_pointer_up(&mut self, p: Point) {
        if self.state.transform_preview().is_some() {
            self.select_move(p);
        }
        let state = std::mem::replace(&mut self.state, DrawingState::Idle);
        match state {
            DrawingState::Idle => return,
            DrawingState::Freehand {
                tool,
                mut points,
                started_at,
            } => {
                if points.last() != Some(&p) {
                    points.push(p);
                }
                if points.len() < 2 {
                    log::debug!("Discarding single-point stroke");
                } else {
                    let stroke = self.build_stroke(tool, points);
                    self.commit_new_element(stroke, started_at);
                }
            }
            DrawingState::Anchored {
                kind,
                start,
                started_at,
            }
            | DrawingState::Previewing {
                kind,
                start,
                started_at,
                ..
            } => {
                if start == p {
                    log::debug!("Discarding zero-size {kind:?}");
                } else {
                    let shape = self.build_shape(kind, start, p);
                    self.commit_new_element(shape, started_at);
                }
            }
            transform @ (DrawingState::Dragging { .. }
            | DrawingState::Resizing { .. }
            | DrawingState::Rotating { .. }) => self.select_release(transform),
        }
        self.needs_redraw = true;
    }

    pub(crate) fn build_stroke(&self, tool: StrokeTool, points: Vec<Point>) -> DrawingElement {
        let opacity = match tool {
            StrokeTool::Highlighter => self.style.highlighter_opacity,
            StrokeTool::Pen | StrokeTool::Eraser => 1.0,
        };
        DrawingElement::Stroke(Stroke {
            tool,
            points,
            color: self.style.color,
            width: self.style.thickness,
            opacity,
            timing: None,
        })
    }

    pub(crate) fn build_shape(&self, kind: ShapeKind, start: Point, end: Point) -> DrawingElement {
        DrawingElement::Shape(Shape {
            kind,
            start,
            end,
            color: self.style.color,
            width: self.style.thickness,
            filled: self.style.filled && kind.is_fillable(),
            rotation: None,
        })
    }

    fn place_symbol(&mut self, glyph: Glyph, anchor: Point) {
        let symbol = DrawingElement::Symbol(Symbol {
            anchor,
            glyph,
            size: self.style.symbol_size,
            rotation: 0.0,
            color: self.style.color,
        });
        let at = self.video_time;
        self.commit_new_element(symbol, at);
    }

    fn place_text(&mut self, anchor: Point) {
        let Some(prompt) = self.text_prompt.as_mut() else {
            log::warn!("Text tool used without a text prompt; ignoring");
            return;
        };
        let at = self.video_time;
        match prompt.prompt(anchor) {
            Some(text) if !text.trim().is_empty() => {
                let element = DrawingElement::Text(Text {
                    anchor,
                    text,
                    font_size: self.style.font_size,
                    color: self.style.color,
                    rotation: None,
                });
                self.commit_new_element(element, at);
            }
            _ => log::debug!("Text prompt cancelled"),
        }
    }
}
