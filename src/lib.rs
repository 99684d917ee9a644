//! Library exports for the vidscribe annotation engine.
//!
//! Hosts embed [`input::AnnotationSession`] to draw on a paused frame or to
//! capture strokes during playback, then hand the result to a
//! [`persist::AnnotationStore`]. Live captures replay through
//! [`live::ReplayRenderer`] as a pure function of video time.

pub mod config;
pub mod draw;
pub mod geometry;
pub mod history;
pub mod input;
pub mod live;
pub mod persist;

pub use config::Config;
