//! Frontends for creating simple applications with `redfin`.

use std::ops::ControlFlow::{self, Break};
use std::time::{Duration, Instant};

use redfin_core::render::{ctx::Context, target};
use redfin_core::util::Dims;
use redfin_core::util::buf::{AsMutSlice2, Buf2, MutSlice2};

#[cfg(feature = "minifb")]
pub mod minifb;

#[cfg(feature = "wasm")]
pub mod wasm;

/// Common window dimensions.
pub mod dims {
    use redfin_core::util::Dims;

    pub const VGA_640_480: Dims = (640, 480);
    pub const SVGA_800_600: Dims = (800, 600);
    pub const HD_1280_720: Dims = (1280, 720);
    pub const FHD_1920_1080: Dims = (1920, 1080);
}

/// Framebuffer type passed to the frame callback.
pub type Framebuf<'a> =
    target::Framebuf<MutSlice2<'a, u32>, MutSlice2<'a, f32>>;

/// Per-frame state. The main loop passes an instance of `Frame` to the
/// callback function on every iteration.
pub struct Frame<'a, Win, Buf> {
    /// Elapsed time since the start of the first frame.
    pub t: Duration,
    /// Elapsed time since the start of the previous frame.
    pub dt: Duration,
    /// Framebuffer in which to draw.
    pub buf: Buf,
    /// Reference to the window object.
    pub win: &'a mut Win,
    /// Rendering context and config.
    pub ctx: &'a mut Context,
}

/// Interface between the main loop and a display surface.
///
/// Implemented by the windowing backends; tests can drive the loop
/// headless with a mock implementation.
pub trait Presenter {
    /// Returns the current width and height of the surface.
    ///
    /// Polled on every frame. If the returned value changes, the
    /// framebuffer is reallocated to match before the callback runs.
    fn dims(&mut self) -> Dims;

    /// Returns whether the main loop should stop before the next frame.
    fn should_quit(&self) -> bool;

    /// Displays `fb`, a row-major buffer of colors in `0xAA_RR_GG_BB`
    /// format, sized according to the latest [`dims`][Self::dims] call.
    fn present(&mut self, fb: &[u32]);
}

/// Runs a main loop, invoking the callback on each iteration to compute
/// and draw the next frame and `pres` to display it.
///
/// Before each frame the dimensions of `pres` are polled, the framebuffer
/// is reallocated if they have changed, and the color and depth buffers
/// are cleared to the clear values of `ctx`.
///
/// The loop stops, returning the final context, if `pres` requests a quit
/// or the callback returns `ControlFlow::Break`.
pub fn run<P, F>(pres: &mut P, mut ctx: Context, mut frame_fn: F) -> Context
where
    P: Presenter,
    F: FnMut(&mut Frame<P, Framebuf>) -> ControlFlow<()>,
{
    let mut dims = pres.dims();
    let mut cbuf = Buf2::new(dims);
    let mut zbuf = Buf2::new(dims);

    let start = Instant::now();
    let mut last = start;
    loop {
        if pres.should_quit() {
            break;
        }
        let new_dims = pres.dims();
        if new_dims != dims {
            dims = new_dims;
            cbuf = Buf2::new(dims);
            zbuf = Buf2::new(dims);
        }
        let frame = &mut Frame {
            t: start.elapsed(),
            dt: last.elapsed(),
            buf: Framebuf {
                color_buf: cbuf.as_mut_slice2(),
                depth_buf: zbuf.as_mut_slice2(),
            },
            win: pres,
            ctx: &mut ctx,
        };
        frame.clear();

        last = Instant::now();
        if let Break(_) = frame_fn(frame) {
            break;
        }
        pres.present(cbuf.data());

        ctx.stats.borrow_mut().frames += 1.0;
    }
    ctx
}

impl<Win> Frame<'_, Win, Framebuf<'_>> {
    /// Clears the color and depth buffers to the clear values of
    /// `self.ctx`, if set.
    pub fn clear(&mut self) {
        if let Some(c) = self.ctx.color_clear {
            self.buf.color_buf.fill(c.to_argb_u32());
        }
        if let Some(z) = self.ctx.depth_clear {
            self.buf.depth_buf.fill(z);
        }
    }
}
