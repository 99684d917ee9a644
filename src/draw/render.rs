//! Cairo-based rendering functions for drawing elements.
//!
//! Rendering is a pure function of element data: calling any of these twice
//! with the same input produces the same pixels, which live preview and replay
//! both rely on since they redraw every frame.

use super::color::Color;
use super::element::{DrawingElement, Shape, Stroke, StrokeTool, Symbol, Text};
use super::font::FontDescriptor;
use super::path::{self, Path, PathCommand};
use crate::geometry::Point;

/// Renders a collection in paint order (first element = bottom layer).
pub fn render_elements(ctx: &cairo::Context, elements: &[DrawingElement], font: &FontDescriptor) {
    for element in elements {
        render_element(ctx, element, font);
    }
}

/// Renders one element in full.
pub fn render_element(ctx: &cairo::Context, element: &DrawingElement, font: &FontDescriptor) {
    render_element_partial(ctx, element, 1.0, font);
}

/// Renders one element at a draw fraction in `[0, 1]`.
///
/// Strokes draw only the prefix of points implied by the fraction; every other
/// element kind is drawn whole.
pub fn render_element_partial(
    ctx: &cairo::Context,
    element: &DrawingElement,
    fraction: f64,
    font: &FontDescriptor,
) {
    match element {
        DrawingElement::Stroke(stroke) => {
            let visible = stroke.visible_point_count(fraction);
            render_stroke_points(ctx, stroke, &stroke.points[..visible]);
        }
        DrawingElement::Shape(shape) => render_shape(ctx, shape),
        DrawingElement::Symbol(symbol) => render_symbol(ctx, symbol, font),
        DrawingElement::Text(text) => render_text(ctx, text, font),
    }
}

/// Renders a freehand stroke through `points` using the stroke's style.
///
/// Takes the points as a borrowed slice so in-progress strokes and replay
/// prefixes render without cloning. Eraser strokes clear pixels underneath.
pub fn render_stroke_points(ctx: &cairo::Context, stroke: &Stroke, points: &[Point]) {
    let Some((first, rest)) = points.split_first() else {
        return;
    };
    if rest.is_empty() {
        return;
    }

    let _ = ctx.save();
    match stroke.tool {
        StrokeTool::Eraser => {
            ctx.set_operator(cairo::Operator::Clear);
        }
        StrokeTool::Pen | StrokeTool::Highlighter => {
            ctx.set_operator(cairo::Operator::Over);
            stroke.color.with_alpha(stroke.opacity).apply(ctx);
        }
    }
    ctx.set_line_width(stroke.width);
    ctx.set_line_cap(cairo::LineCap::Round);
    ctx.set_line_join(cairo::LineJoin::Round);

    ctx.move_to(first.x, first.y);
    for p in rest {
        ctx.line_to(p.x, p.y);
    }
    let _ = ctx.stroke();
    let _ = ctx.restore();
}

/// Renders a shape, applying its rotation about the anchor-box center.
pub fn render_shape(ctx: &cairo::Context, shape: &Shape) {
    let outline = path::shape_outline(shape);

    let _ = ctx.save();
    ctx.set_operator(cairo::Operator::Over);
    if let Some(degrees) = shape.rotation.filter(|d| *d != 0.0) {
        rotate_about(ctx, shape.bounds().center(), degrees);
    }

    shape.color.apply(ctx);
    ctx.set_line_width(shape.width);
    ctx.set_line_cap(cairo::LineCap::Round);
    ctx.set_line_join(cairo::LineJoin::Round);

    if let Some([on, off]) = shape.kind.dash_pattern() {
        ctx.set_dash(&[on * shape.width, off * shape.width], 0.0);
    }
    paint_path(ctx, &outline.body, shape.filled);
    ctx.set_dash(&[], 0.0);
    paint_path(ctx, &outline.auxiliary, shape.filled);

    let _ = ctx.restore();
}

/// Renders a symbol glyph centered on its anchor.
pub fn render_symbol(ctx: &cairo::Context, symbol: &Symbol, font: &FontDescriptor) {
    let glyph = symbol.glyph.as_char().to_string();
    render_centered_layout(
        ctx,
        symbol.anchor,
        &glyph,
        symbol.size.pixels(),
        symbol.color,
        symbol.rotation,
        font,
        false,
    );
}

/// Renders text centered on its anchor with a contrasting outline.
///
/// Multi-line text is laid out by Pango; the whole block is centered.
pub fn render_text(ctx: &cairo::Context, text: &Text, font: &FontDescriptor) {
    if text.text.is_empty() {
        return;
    }
    render_centered_layout(
        ctx,
        text.anchor,
        &text.text,
        text.font_size,
        text.color,
        text.rotation.unwrap_or(0.0),
        font,
        true,
    );
}

#[allow(clippy::too_many_arguments)]
fn render_centered_layout(
    ctx: &cairo::Context,
    anchor: Point,
    content: &str,
    size: f64,
    color: Color,
    rotation: f64,
    font: &FontDescriptor,
    outlined: bool,
) {
    let _ = ctx.save();
    ctx.set_operator(cairo::Operator::Over);
    ctx.set_antialias(cairo::Antialias::Best);
    if rotation != 0.0 {
        rotate_about(ctx, anchor, rotation);
    }

    let layout = pangocairo::functions::create_layout(ctx);
    let desc = pango::FontDescription::from_string(&font.to_pango_string(size));
    layout.set_font_description(Some(&desc));
    layout.set_alignment(pango::Alignment::Center);
    layout.set_text(content);

    let (width, height) = layout.pixel_size();
    ctx.move_to(anchor.x - width as f64 / 2.0, anchor.y - height as f64 / 2.0);

    if outlined {
        // Dark outline for light text and vice versa
        let brightness = color.r * 0.299 + color.g * 0.587 + color.b * 0.114;
        let contrast = if brightness > 0.5 { 0.0 } else { 1.0 };
        pangocairo::functions::layout_path(ctx, &layout);
        ctx.set_source_rgba(contrast, contrast, contrast, color.a);
        ctx.set_line_width(size * 0.06);
        ctx.set_line_join(cairo::LineJoin::Round);
        let _ = ctx.stroke_preserve();
        color.apply(ctx);
        let _ = ctx.fill();
    } else {
        color.apply(ctx);
        pangocairo::functions::show_layout(ctx, &layout);
    }

    let _ = ctx.restore();
}

/// Rotates the context by `degrees` around `center`.
fn rotate_about(ctx: &cairo::Context, center: Point, degrees: f64) {
    ctx.translate(center.x, center.y);
    ctx.rotate(degrees.to_radians());
    ctx.translate(-center.x, -center.y);
}

/// Replays `path` and strokes it, filling first when requested and closed.
fn paint_path(ctx: &cairo::Context, path: &Path, filled: bool) {
    if path.is_empty() {
        return;
    }
    ctx.new_path();
    trace_path(ctx, path);
    if filled && path.closed {
        let _ = ctx.fill_preserve();
    }
    let _ = ctx.stroke();
}

fn trace_path(ctx: &cairo::Context, path: &Path) {
    for cmd in &path.commands {
        match *cmd {
            PathCommand::MoveTo(p) => ctx.move_to(p.x, p.y),
            PathCommand::LineTo(p) => ctx.line_to(p.x, p.y),
            PathCommand::CurveTo(a, b, c) => ctx.curve_to(a.x, a.y, b.x, b.y, c.x, c.y),
            PathCommand::Arc {
                center,
                radius,
                start,
                end,
                negative,
            } => {
                if negative {
                    ctx.arc_negative(center.x, center.y, radius, start, end);
                } else {
                    ctx.arc(center.x, center.y, radius, start, end);
                }
            }
            PathCommand::Close => ctx.close_path(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::draw::color::{RED, WHITE};
    use crate::draw::shape_kind::ShapeKind;
    use crate::draw::surface::RasterSurface;

    fn pen(points: Vec<Point>) -> Stroke {
        Stroke {
            tool: StrokeTool::Pen,
            points,
            color: RED,
            width: 4.0,
            opacity: 1.0,
            timing: None,
        }
    }

    fn render_to(surface: &RasterSurface, element: &DrawingElement) {
        let ctx = surface.context().expect("surface available");
        render_element(&ctx, element, &FontDescriptor::default());
    }

    #[test]
    fn two_point_stroke_draws_straight_segment() {
        let mut surface = RasterSurface::new(40, 20);
        let stroke = pen(vec![Point::new(5.0, 10.0), Point::new(35.0, 10.0)]);
        render_to(&surface, &DrawingElement::Stroke(stroke));

        assert_ne!(surface.pixel(20, 10).unwrap()[3], 0, "segment midpoint inked");
        assert_eq!(surface.pixel(20, 2).unwrap()[3], 0, "off-line pixel clean");
    }

    #[test]
    fn eraser_clears_existing_ink() {
        let mut surface = RasterSurface::new(40, 20);
        render_to(
            &surface,
            &DrawingElement::Stroke(pen(vec![Point::new(0.0, 10.0), Point::new(40.0, 10.0)])),
        );
        assert_ne!(surface.pixel(20, 10).unwrap()[3], 0);

        let mut eraser = pen(vec![Point::new(15.0, 10.0), Point::new(25.0, 10.0)]);
        eraser.tool = StrokeTool::Eraser;
        eraser.width = 10.0;
        render_to(&surface, &DrawingElement::Stroke(eraser));
        assert_eq!(surface.pixel(20, 10).unwrap()[3], 0);
        assert_ne!(surface.pixel(5, 10).unwrap()[3], 0);
    }

    #[test]
    fn rendering_is_idempotent() {
        let element = DrawingElement::Shape(Shape {
            kind: ShapeKind::Star,
            start: Point::new(4.0, 4.0),
            end: Point::new(60.0, 50.0),
            color: WHITE,
            width: 3.0,
            filled: true,
            rotation: Some(20.0),
        });
        let mut first = RasterSurface::new(64, 64);
        let mut second = RasterSurface::new(64, 64);
        render_to(&first, &element);
        render_to(&second, &element);
        assert_eq!(first.pixels(), second.pixels());
    }

    #[test]
    fn filled_flag_controls_interior() {
        let mut shape = Shape {
            kind: ShapeKind::Rectangle,
            start: Point::new(5.0, 5.0),
            end: Point::new(55.0, 55.0),
            color: RED,
            width: 2.0,
            filled: false,
            rotation: None,
        };
        let mut outline_only = RasterSurface::new(60, 60);
        render_to(&outline_only, &DrawingElement::Shape(shape.clone()));
        assert_eq!(outline_only.pixel(30, 30).unwrap()[3], 0);

        shape.filled = true;
        let mut filled = RasterSurface::new(60, 60);
        render_to(&filled, &DrawingElement::Shape(shape));
        assert_ne!(filled.pixel(30, 30).unwrap()[3], 0);
    }

    #[test]
    fn zero_fraction_stroke_draws_nothing() {
        let mut surface = RasterSurface::new(40, 20);
        let stroke = pen(vec![
            Point::new(5.0, 10.0),
            Point::new(20.0, 10.0),
            Point::new(35.0, 10.0),
        ]);
        let ctx = surface.context().unwrap();
        render_element_partial(
            &ctx,
            &DrawingElement::Stroke(stroke),
            0.0,
            &FontDescriptor::default(),
        );
        drop(ctx);
        assert!(!surface.has_ink());
    }
}
