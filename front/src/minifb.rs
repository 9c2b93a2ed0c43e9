//! Native windowing backend built on the [`minifb`] crate.
//!
//! [`Window`] owns a minifb window and implements [`Presenter`], so the
//! shared frame loop in the crate root can drive it.

use std::ops::ControlFlow;

use minifb::{Key, WindowOptions};

use redfin_core::render::ctx::Context;
use redfin_core::util::Dims;

use crate::{Frame, Framebuf, Presenter, dims::SVGA_800_600};

/// A native window that displays rendered frames.
pub struct Window {
    /// The underlying minifb window handle.
    pub imp: minifb::Window,
    /// Current width and height in pixels.
    pub dims: Dims,
    /// Render context handed to each frame.
    pub ctx: Context,
}

/// Configures and opens a [`Window`].
pub struct Builder<'title> {
    pub dims: Dims,
    pub title: &'title str,
    pub target_fps: Option<u32>,
    pub opts: WindowOptions,
}

//
// Inherent impls
//

impl Window {
    /// Returns a builder with default settings.
    pub fn builder() -> Builder<'static> {
        Builder::default()
    }

    /// Hands control to the frame loop, invoking `frame_fn` once per
    /// frame until the window is closed, Esc is pressed, or the
    /// callback breaks out of the loop.
    ///
    /// Prints the accumulated render stats on return.
    pub fn run<F>(&mut self, frame_fn: F)
    where
        F: FnMut(&mut Frame<Self, Framebuf>) -> ControlFlow<()>,
    {
        let ctx = self.ctx.clone();
        let ctx = crate::run(self, ctx, frame_fn);
        println!("{}", ctx.stats.borrow());
    }
}

impl<'t> Builder<'t> {
    /// Sets the initial window dimensions.
    pub fn dims(self, dims: Dims) -> Self {
        Self { dims, ..self }
    }
    /// Sets the window title.
    pub fn title(self, title: &'t str) -> Self {
        Self { title, ..self }
    }
    /// Caps the frame rate, or uncaps it if `target_fps` is `None`.
    pub fn target_fps(self, target_fps: Option<u32>) -> Self {
        Self { target_fps, ..self }
    }
    /// Passes additional options through to minifb.
    pub fn options(self, opts: WindowOptions) -> Self {
        Self { opts, ..self }
    }

    /// Opens the window.
    pub fn build(self) -> minifb::Result<Window> {
        let (w, h) = (self.dims.0 as usize, self.dims.1 as usize);
        let mut imp = minifb::Window::new(self.title, w, h, self.opts)?;
        if let Some(fps) = self.target_fps {
            imp.set_target_fps(fps as usize);
        }
        Ok(Window {
            imp,
            dims: self.dims,
            ctx: Context::default(),
        })
    }
}

//
// Trait impls
//

impl Default for Builder<'_> {
    fn default() -> Self {
        Self {
            dims: SVGA_800_600,
            title: "// redfin application //",
            target_fps: Some(60),
            opts: WindowOptions::default(),
        }
    }
}

impl Presenter for Window {
    /// Returns the window's current size, tracking live resizes.
    fn dims(&mut self) -> Dims {
        let (w, h) = self.imp.get_size();
        self.dims = (w as u32, h as u32);
        self.dims
    }

    fn should_quit(&self) -> bool {
        self.imp.is_key_down(Key::Escape) || !self.imp.is_open()
    }

    /// Copies `fb`, a buffer of `0xAA_RR_GG_BB` colors, to the window.
    fn present(&mut self, fb: &[u32]) {
        let (w, h) = (self.dims.0 as usize, self.dims.1 as usize);
        self.imp.update_with_buffer(fb, w, h).unwrap();
    }
}
