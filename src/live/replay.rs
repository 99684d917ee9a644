//! Replay of a live session as a pure function of relative time.

use super::recorder::LiveSession;
use crate::draw::{DrawingElement, FontDescriptor, RasterSurface, render};

/// One element visible in a replay frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReplayItem<'a> {
    pub element: &'a DrawingElement,
    /// Draw fraction in `[0, 1]`
    pub fraction: f64,
}

/// Renders any instant of a [`LiveSession`].
///
/// Holds no playback state: the same `relative_time` always yields the same
/// frame, so seeking backwards regresses correctly.
#[derive(Debug, Clone)]
pub struct ReplayRenderer {
    session: LiveSession,
    font: FontDescriptor,
}

impl ReplayRenderer {
    pub fn new(session: LiveSession, font: FontDescriptor) -> Self {
        Self { session, font }
    }

    pub fn session(&self) -> &LiveSession {
        &self.session
    }

    /// Elements visible at `relative_time`, in paint order.
    ///
    /// Strokes inside their window are partially drawn; everything else is
    /// either hidden (not started) or full.
    pub fn frame_at(&self, relative_time: f64) -> Vec<ReplayItem<'_>> {
        self.session
            .strokes
            .iter()
            .filter_map(|live| {
                let progress = live.window().progress(relative_time)?;
                let fraction = match live.element {
                    DrawingElement::Stroke(_) => progress,
                    _ => 1.0,
                };
                Some(ReplayItem {
                    element: &live.element,
                    fraction,
                })
            })
            .collect()
    }

    /// Clears `surface` and draws the frame at `relative_time`.
    ///
    /// Coordinates are scaled from the session canvas to the surface size.
    /// A surface without pixels is left alone.
    pub fn render_frame(&self, surface: &RasterSurface, relative_time: f64) {
        let Some(ctx) = surface.context() else {
            return;
        };
        surface.clear();

        let (sx, sy) = self.scale_for(surface);
        ctx.scale(sx, sy);
        for item in self.frame_at(relative_time) {
            render::render_element_partial(&ctx, item.element, item.fraction, &self.font);
        }
    }

    fn scale_for(&self, surface: &RasterSurface) -> (f64, f64) {
        let axis = |target: i32, source: i32| {
            if source > 0 {
                target as f64 / source as f64
            } else {
                1.0
            }
        };
        (
            axis(surface.width(), self.session.canvas_width),
            axis(surface.height(), self.session.canvas_height),
        )
    }
}

/// Host-driven replay loop.
///
/// The host forwards its current video time; the driver redraws only while
/// active and only when the time actually changed.
#[derive(Debug)]
pub struct ReplayDriver {
    renderer: ReplayRenderer,
    surface: Option<RasterSurface>,
    active: bool,
    last_rendered: Option<f64>,
}

impl ReplayDriver {
    pub fn new(renderer: ReplayRenderer, surface: RasterSurface) -> Self {
        Self {
            renderer,
            surface: Some(surface),
            active: false,
            last_rendered: None,
        }
    }

    pub fn activate(&mut self) {
        if self.surface.is_some() {
            self.active = true;
            self.last_rendered = None;
        }
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn surface(&self) -> Option<&RasterSurface> {
        self.surface.as_ref()
    }

    pub fn renderer(&self) -> &ReplayRenderer {
        &self.renderer
    }

    /// Swaps in a surface of a new size and forces the next frame to redraw.
    pub fn resize(&mut self, width: i32, height: i32) {
        if self.surface.is_some() {
            self.surface = Some(RasterSurface::new(width, height));
            self.last_rendered = None;
        }
    }

    /// Renders the frame for absolute `video_time`. Returns `true` if it drew.
    pub fn on_video_time(&mut self, video_time: f64) -> bool {
        if !self.active || self.last_rendered == Some(video_time) {
            return false;
        }
        let Some(surface) = self.surface.as_ref() else {
            return false;
        };
        if !surface.is_available() {
            // Retry once the host reports a real size
            return false;
        }
        let relative = self.renderer.session().relative_time(video_time);
        self.renderer.render_frame(surface, relative);
        self.last_rendered = Some(video_time);
        true
    }

    /// Stops rendering, then releases the surface.
    pub fn close(&mut self) {
        self.active = false;
        self.surface = None;
        log::debug!("Replay closed");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::draw::{Glyph, RED, SizeTier, Stroke, StrokeTool, Symbol};
    use crate::geometry::Point;
    use crate::live::recorder::LiveStroke;

    fn stroke(points: usize, window: (f64, f64)) -> LiveStroke {
        LiveStroke {
            element: DrawingElement::Stroke(Stroke {
                tool: StrokeTool::Pen,
                points: (0..points)
                    .map(|i| Point::new(10.0 + i as f64 * 10.0, 20.0))
                    .collect(),
                color: RED,
                width: 4.0,
                opacity: 1.0,
                timing: None,
            }),
            start_time: window.0,
            end_time: window.1,
        }
    }

    fn session(strokes: Vec<LiveStroke>) -> LiveSession {
        LiveSession {
            strokes,
            duration: 10.0,
            canvas_width: 100,
            canvas_height: 40,
            capture_origin: 0.0,
        }
    }

    fn visible_points(renderer: &ReplayRenderer, t: f64) -> Vec<usize> {
        renderer
            .frame_at(t)
            .iter()
            .map(|item| match item.element {
                DrawingElement::Stroke(s) => s.visible_point_count(item.fraction),
                _ => 1,
            })
            .collect()
    }

    #[test]
    fn stroke_reveals_points_over_its_window() {
        let renderer = ReplayRenderer::new(
            session(vec![stroke(3, (1.0, 3.0))]),
            FontDescriptor::default(),
        );
        assert!(renderer.frame_at(0.5).is_empty());
        assert_eq!(visible_points(&renderer, 2.0), vec![2]);
        assert_eq!(visible_points(&renderer, 3.5), vec![3]);
    }

    #[test]
    fn midway_through_window_draws_one_segment() {
        let mut item = stroke(0, (2.0, 4.0));
        if let DrawingElement::Stroke(s) = &mut item.element {
            s.points = vec![
                Point::new(0.0, 0.0),
                Point::new(10.0, 0.0),
                Point::new(20.0, 0.0),
            ];
        }
        let renderer = ReplayRenderer::new(session(vec![item]), FontDescriptor::default());
        assert_eq!(visible_points(&renderer, 3.0), vec![2]);
    }

    #[test]
    fn visible_prefix_never_shrinks_as_time_advances() {
        let renderer = ReplayRenderer::new(
            session(vec![stroke(17, (0.25, 4.75))]),
            FontDescriptor::default(),
        );
        let mut previous = 0;
        for step in 0..=60 {
            let t = step as f64 * 0.1;
            let count = visible_points(&renderer, t).first().copied().unwrap_or(0);
            assert!(count >= previous, "t={t}: {count} < {previous}");
            previous = count;
        }
        assert_eq!(previous, 17);
    }

    #[test]
    fn zero_duration_window_is_full_at_start() {
        let renderer = ReplayRenderer::new(
            session(vec![stroke(5, (2.0, 2.0))]),
            FontDescriptor::default(),
        );
        assert!(renderer.frame_at(1.99).is_empty());
        assert_eq!(visible_points(&renderer, 2.0), vec![5]);
    }

    #[test]
    fn placements_appear_whole_at_start_time() {
        let symbol = LiveStroke {
            element: DrawingElement::Symbol(Symbol {
                anchor: Point::new(50.0, 20.0),
                glyph: Glyph::Target,
                size: SizeTier::Small,
                rotation: 0.0,
                color: RED,
            }),
            start_time: 4.0,
            end_time: 4.0,
        };
        let renderer = ReplayRenderer::new(session(vec![symbol]), FontDescriptor::default());
        assert!(renderer.frame_at(3.0).is_empty());
        assert_eq!(renderer.frame_at(4.0)[0].fraction, 1.0);
    }

    #[test]
    fn seeking_backwards_matches_fresh_render() {
        let renderer = ReplayRenderer::new(
            session(vec![stroke(8, (0.0, 4.0))]),
            FontDescriptor::default(),
        );
        let mut seeked = RasterSurface::new(100, 40);
        renderer.render_frame(&seeked, 4.0);
        renderer.render_frame(&seeked, 1.0);

        let mut fresh = RasterSurface::new(100, 40);
        renderer.render_frame(&fresh, 1.0);
        assert_eq!(seeked.pixels(), fresh.pixels());
    }

    #[test]
    fn driver_renders_only_on_change_while_active() {
        let renderer = ReplayRenderer::new(
            session(vec![stroke(3, (0.0, 1.0))]),
            FontDescriptor::default(),
        );
        let mut driver = ReplayDriver::new(renderer, RasterSurface::new(100, 40));
        assert!(!driver.on_video_time(0.5), "inactive driver must not draw");

        driver.activate();
        assert!(driver.on_video_time(0.5));
        assert!(!driver.on_video_time(0.5));
        assert!(driver.on_video_time(0.6));

        driver.close();
        assert!(!driver.is_active());
        assert!(driver.surface().is_none());
        assert!(!driver.on_video_time(0.7));
    }

    #[test]
    fn driver_waits_for_real_surface() {
        let renderer = ReplayRenderer::new(session(Vec::new()), FontDescriptor::default());
        let mut driver = ReplayDriver::new(renderer, RasterSurface::new(0, 0));
        driver.activate();
        assert!(!driver.on_video_time(1.0));
        driver.resize(100, 40);
        assert!(driver.on_video_time(1.0));
    }
}
