//! BlitBuffer - pixel-surface compositing for e-ink and framebuffer UIs
//!
//! This crate composites rectangular regions between pixel surfaces of five
//! fixed formats, with quarter-turn rotation as a view transform, fixed-point
//! blending and ordered dithering to a 16-level gray palette.
//!
//! ```
//! use blitbuffer::{BlitBuffer, PixelFormat, Rect, Rotation};
//!
//! let mut screen = BlitBuffer::alloc(100, 50, PixelFormat::Gray8).with_rotation(Rotation::Clockwise);
//! screen.fill(0xFF);
//! screen.fill_rect(Rect::new(0, 0, 10, 10), 0x00);
//! assert_eq!((screen.width(), screen.height()), (50, 100));
//! ```

#[macro_use]
mod macros;

pub mod buffer;
pub mod cli;
pub mod color;
pub mod dither;
pub mod error;
pub mod export;
pub mod format;
pub mod geometry;
mod ops;
pub mod rotation;
pub mod scene;
pub mod tracing;

// Re-export commonly used types
pub use buffer::BlitBuffer;
pub use color::{Color8, Color8A, ColorRgb16, ColorRgb24, ColorRgb32, Pixel};
pub use error::BlitError;
pub use format::PixelFormat;
pub use geometry::Rect;
pub use rotation::Rotation;
pub use scene::{Scene, SceneError};
