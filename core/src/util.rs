//! Various utility types and functions.

pub mod buf;

/// The dimensions, width and height, of a rectangular region such as
/// a framebuffer or a window, in pixels.
pub type Dims = (u32, u32);
