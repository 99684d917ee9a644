mod actions;
mod core;
mod pointer;
mod render;
mod save;
mod select;

pub use core::{AnnotationSession, DrawingState, TextPrompt, ToolStyle};
