use crate::draw::color::SELECTION_ACCENT;
use crate::draw::{DrawingElement, RasterSurface, render};
use crate::input::hit::SelectionHandles;

use super::{AnnotationSession, DrawingState};

impl AnnotationSession {
    /// Returns the element currently being drawn, for live preview.
    ///
    /// Freehand strokes are not returned here; `render` draws them straight
    /// from the gesture's point buffer to avoid cloning it every frame.
    pub fn provisional_element(&self) -> Option<DrawingElement> {
        match &self.state {
            DrawingState::Previewing {
                kind,
                start,
                current,
                ..
            } if start != current => Some(self.build_shape(*kind, *start, *current)),
            _ => None,
        }
    }

    /// Draws committed elements, captured live elements, the gesture preview
    /// and the selection overlay.
    ///
    /// Does nothing when the surface has no pixels yet.
    pub fn render(&mut self, surface: &RasterSurface) {
        let Some(ctx) = surface.context() else {
            return;
        };
        surface.clear();

        let transform = self.state.transform_preview();
        for (index, element) in self.frame.elements.iter().enumerate() {
            match transform {
                Some((active, preview)) if active == index => {
                    render::render_element(&ctx, preview, &self.font)
                }
                _ => render::render_element(&ctx, element, &self.font),
            }
        }
        for element in self.captured_elements() {
            render::render_element(&ctx, element, &self.font);
        }

        self.render_provisional(&ctx);
        self.render_selection_overlay(&ctx);
        self.needs_redraw = false;
    }

    /// Draws only the committed elements; used for thumbnails and export.
    pub fn render_static(&self, surface: &RasterSurface) {
        let Some(ctx) = surface.context() else {
            return;
        };
        surface.clear();
        render::render_elements(&ctx, &self.frame.elements, &self.font);
    }

    fn render_provisional(&self, ctx: &cairo::Context) {
        if let DrawingState::Freehand { tool, points, .. } = &self.state {
            if let DrawingElement::Stroke(style) = self.build_stroke(*tool, Vec::new()) {
                render::render_stroke_points(ctx, &style, points);
            }
            return;
        }
        if let Some(element) = self.provisional_element() {
            render::render_element(ctx, &element, &self.font);
        }
    }

    fn render_selection_overlay(&self, ctx: &cairo::Context) {
        let Some(index) = self.selection else {
            return;
        };
        let element = match self.state.transform_preview() {
            Some((active, preview)) if active == index => preview,
            _ => match self.frame.get(index) {
                Some(element) => element,
                None => return,
            },
        };
        let handles = SelectionHandles::for_element(element, &self.selection_config);
        let b = handles.bounds;

        let _ = ctx.save();
        ctx.set_operator(cairo::Operator::Over);
        SELECTION_ACCENT.apply(ctx);
        ctx.set_line_width(1.5);

        // Dashed selection box
        ctx.set_dash(&[6.0, 4.0], 0.0);
        ctx.rectangle(b.x, b.y, b.w, b.h);
        let _ = ctx.stroke();
        ctx.set_dash(&[], 0.0);

        let r = handles.resize;
        ctx.rectangle(r.x, r.y, r.w, r.h);
        let _ = ctx.fill();

        if let Some(knob) = handles.rotate {
            ctx.move_to(b.center().x, b.y);
            ctx.line_to(knob.x, knob.y);
            let _ = ctx.stroke();
            ctx.arc(
                knob.x,
                knob.y,
                handles.handle_size / 2.0,
                0.0,
                std::f64::consts::TAU,
            );
            let _ = ctx.fill();
        }
        let _ = ctx.restore();
    }
}
