//! Element model and Cairo rendering.
//!
//! - [`DrawingElement`]: strokes, shapes, symbols and text
//! - [`Frame`]: ordered element collection (paint order = index order)
//! - [`path`]: backend-independent outlines for every [`ShapeKind`]
//! - [`render`]: pure rendering of elements onto a Cairo context
//! - [`RasterSurface`]: ARGB32 target with PNG and thumbnail encoding

pub mod color;
pub mod element;
pub mod font;
pub mod frame;
pub mod path;
pub mod render;
pub mod shape_kind;
pub mod surface;
pub mod symbol;

pub use color::Color;
pub use element::{DrawingElement, Shape, Stroke, StrokeTool, Symbol, Text, TimeWindow};
pub use font::FontDescriptor;
pub use frame::Frame;
pub use render::{render_element, render_element_partial, render_elements};
pub use shape_kind::{ShapeFamily, ShapeKind};
pub use surface::{RasterSurface, SurfaceError};
pub use symbol::{Glyph, SizeTier};

pub use color::{BLACK, BLUE, GREEN, ORANGE, PINK, RED, WHITE, YELLOW};
