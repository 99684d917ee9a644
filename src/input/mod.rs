//! Input handling and the gesture state machine.
//!
//! This module translates host pointer and key events into drawing actions.
//! It tracks the current tool and style, hit-tests the selection, and drives
//! [`AnnotationSession`] through its gestures (idle, drawing, transforming).

pub mod events;
pub mod hit;
pub mod modifiers;
pub mod state;
pub mod tool;

// Re-export commonly used types at module level
pub use events::{Key, PointerEvent, PointerPhase};
pub use modifiers::Modifiers;
pub use state::{AnnotationSession, DrawingState, TextPrompt, ToolStyle};
pub use tool::Tool;
