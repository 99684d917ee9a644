//! Live capture during playback and time-synchronized replay.

pub mod recorder;
pub mod replay;

pub use recorder::{LiveRecorder, LiveSession, LiveStroke};
pub use replay::{ReplayDriver, ReplayItem, ReplayRenderer};
