use vidscribe::Config;
use vidscribe::draw::{DrawingElement, FontDescriptor, RED, RasterSurface, Stroke, StrokeTool};
use vidscribe::geometry::Point;
use vidscribe::input::{AnnotationSession, PointerEvent, Tool};
use vidscribe::live::{LiveSession, LiveStroke, ReplayDriver, ReplayRenderer};

fn horizontal_session() -> LiveSession {
    let points = (1..=9).map(|i| Point::new(i as f64 * 10.0, 50.0)).collect();
    LiveSession {
        strokes: vec![LiveStroke {
            element: DrawingElement::Stroke(Stroke {
                tool: StrokeTool::Pen,
                points,
                color: RED,
                width: 3.0,
                opacity: 1.0,
                timing: None,
            }),
            start_time: 0.0,
            end_time: 2.0,
        }],
        duration: 2.0,
        canvas_width: 100,
        canvas_height: 100,
        capture_origin: 5.0,
    }
}

fn inked(surface: &mut RasterSurface, x: i32, y: i32) -> bool {
    surface.pixel(x, y).is_some_and(|px| px[3] > 0)
}

#[test]
fn session_render_shows_committed_and_erased_strokes() {
    let mut session = AnnotationSession::from_config(&Config::default());
    session.update_canvas_dimensions(120, 80);
    let mut surface = RasterSurface::new(120, 80);

    session.on_pointer(PointerEvent::down(10.0, 40.0));
    session.on_pointer(PointerEvent::moved(60.0, 40.0));
    session.on_pointer(PointerEvent::up(110.0, 40.0));
    session.render(&surface);
    assert!(inked(&mut surface, 30, 40));
    assert!(inked(&mut surface, 90, 40));

    session.set_tool(Tool::Eraser);
    session.style.thickness = 20.0;
    session.on_pointer(PointerEvent::down(30.0, 20.0));
    session.on_pointer(PointerEvent::up(30.0, 60.0));
    session.render(&surface);
    assert!(!inked(&mut surface, 30, 40));
    assert!(inked(&mut surface, 90, 40));
}

#[test]
fn replay_reveals_stroke_progressively_and_scales() {
    let renderer = ReplayRenderer::new(horizontal_session(), FontDescriptor::default());
    let mut surface = RasterSurface::new(200, 200);

    renderer.render_frame(&surface, 1.0);
    // Half way: points up to x=50 (canvas) are visible, doubled on the surface
    assert!(inked(&mut surface, 60, 100));
    assert!(!inked(&mut surface, 160, 100));

    renderer.render_frame(&surface, 2.0);
    assert!(inked(&mut surface, 160, 100));
}

#[test]
fn replay_seek_backwards_matches_fresh_render() {
    let renderer = ReplayRenderer::new(horizontal_session(), FontDescriptor::default());

    let mut fresh = RasterSurface::new(100, 100);
    renderer.render_frame(&fresh, 0.5);

    let mut seeked = RasterSurface::new(100, 100);
    renderer.render_frame(&seeked, 2.0);
    renderer.render_frame(&seeked, 0.5);

    assert_eq!(fresh.pixels(), seeked.pixels());
}

#[test]
fn driver_follows_video_time() {
    let renderer = ReplayRenderer::new(horizontal_session(), FontDescriptor::default());
    let mut driver = ReplayDriver::new(renderer, RasterSurface::new(100, 100));
    driver.activate();

    // Video time 4.0 is before the capture origin; nothing visible yet
    assert!(driver.on_video_time(4.0));
    assert!(!driver.on_video_time(4.0));

    assert!(driver.on_video_time(7.0));
    driver.close();
    assert!(!driver.is_active());
    assert!(!driver.on_video_time(7.5));
}
