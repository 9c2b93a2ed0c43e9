//! Browser canvas backend for `wasm32` targets.
//!
//! [`Window`] wraps an HTML canvas element and schedules frames with
//! `requestAnimationFrame`. Unlike the native backend, the browser owns
//! the main loop: [`Window::run`] registers a callback and returns, and
//! the callback keeps rescheduling itself until it breaks.

use std::cell::RefCell;
use std::ops::ControlFlow::{self, Break, Continue};
use std::rc::Rc;
use std::time::Duration;

use wasm_bindgen::prelude::*;
use wasm_bindgen::{Clamped, JsCast};

use web_sys::{
    CanvasRenderingContext2d as Context2d, Document,
    HtmlCanvasElement as Canvas, ImageData,
};

use redfin_core::render::ctx::Context;
use redfin_core::util::Dims;
use redfin_core::util::buf::{AsMutSlice2, Buf2};

use crate::{Frame, Framebuf, dims::SVGA_800_600};

#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(js_namespace = console)]
    pub fn log(msg: &str);

    #[wasm_bindgen(js_namespace = console)]
    pub fn error(msg: &str);

    #[wasm_bindgen]
    fn requestAnimationFrame(cb: &Closure<dyn FnMut(f32)>);
}

/// A canvas element that displays rendered frames.
#[derive(Debug)]
pub struct Window {
    /// The width and height of the canvas.
    pub dims: Dims,
    /// The 2D drawing context of the canvas.
    pub ctx2d: Context2d,
    /// Render context handed to each frame.
    pub ctx: Context,
}

/// Configures and creates a [`Window`].
#[derive(Debug)]
pub struct Builder {
    dims: Dims,
}

//
// Inherent impls
//

impl Builder {
    /// Sets the canvas dimensions.
    pub fn dims(self, dims: Dims) -> Self {
        Self { dims }
    }

    /// Creates the canvas and appends it to the document body.
    pub fn build(self) -> Result<Window, &'static str> {
        Window::new(self.dims)
    }
}

impl Window {
    /// Returns a builder with default settings.
    pub fn builder() -> Builder {
        Builder::default()
    }

    /// Creates a canvas of size `dims` under the document body and
    /// acquires its 2D drawing context.
    pub fn new(dims: Dims) -> Result<Self, &'static str> {
        let doc = Self::document().ok_or("no document object")?;
        let cvs = Self::attach_canvas(&doc, dims)
            .ok_or("could not create a canvas element")?;
        let ctx2d = Self::context2d(&cvs) //
            .ok_or("could not acquire a 2d context")?;

        log("redfin: canvas ready");
        Ok(Self { dims, ctx2d, ctx: Context::default() })
    }

    /// Registers `frame_fn` to run on every animation frame and returns.
    ///
    /// The callback keeps scheduling itself until it returns
    /// `ControlFlow::Break`; the frame that breaks is still presented.
    pub fn run<F>(mut self, mut frame_fn: F)
    where
        F: FnMut(&mut Frame<Self, Framebuf>) -> ControlFlow<()> + 'static,
    {
        let mut ctx = self.ctx.clone();
        let mut cbuf = Buf2::new(self.dims);
        let mut zbuf = Buf2::new(self.dims);
        let mut prev = Duration::default();

        // The cell owns the closure; the closure holds a second handle
        // to the cell so it can reschedule itself, or drop itself to
        // end the loop.
        let cell: Rc<RefCell<Option<_>>> = Rc::default();
        let handle = Rc::clone(&cell);
        *cell.borrow_mut() = Some(Closure::new(move |ms: f32| {
            let t = Duration::from_secs_f32(ms / 1e3);
            let mut frame = Frame {
                t,
                dt: t - prev,
                buf: Framebuf {
                    color_buf: cbuf.as_mut_slice2(),
                    depth_buf: zbuf.as_mut_slice2(),
                },
                win: &mut self,
                ctx: &mut ctx,
            };
            frame.clear();
            let flow = frame_fn(&mut frame);

            if let Err(msg) = self.blit(cbuf.data()) {
                error(msg);
            }
            ctx.stats.borrow_mut().frames += 1.0;
            prev = t;

            match flow {
                Continue(_) => {
                    requestAnimationFrame(handle.borrow().as_ref().unwrap())
                }
                Break(_) => drop(handle.borrow_mut().take()),
            }
        }));
        requestAnimationFrame(cell.borrow().as_ref().unwrap());
    }

    /// Returns the DOM document, if any.
    pub fn document() -> Option<Document> {
        web_sys::window()?.document()
    }

    // Creates a canvas of the given size and appends it to the body.
    fn attach_canvas(doc: &Document, (w, h): Dims) -> Option<Canvas> {
        let cvs: Canvas =
            doc.create_element("canvas").ok()?.dyn_into().ok()?;
        cvs.set_width(w);
        cvs.set_height(h);
        doc.body()?.append_child(&cvs).ok()?;
        Some(cvs)
    }

    fn context2d(cvs: &Canvas) -> Option<Context2d> {
        cvs.get_context("2d").ok().flatten()?.dyn_into().ok()
    }

    /// Draws `data`, a row-major buffer of `0xAA_RR_GG_BB` colors, onto
    /// the canvas.
    fn blit(&self, data: &[u32]) -> Result<(), &'static str> {
        // ImageData wants RGBA byte order
        let mut rgba = Vec::with_capacity(4 * data.len());
        for &px in data {
            let [a, r, g, b] = px.to_be_bytes();
            rgba.extend([r, g, b, a]);
        }
        let img =
            ImageData::new_with_u8_clamped_array(Clamped(&rgba), self.dims.0)
                .map_err(|_| "ImageData creation failed")?;
        self.ctx2d
            .put_image_data(&img, 0.0, 0.0)
            .map_err(|_| "canvas blit failed")
    }
}

//
// Trait impls
//

impl Default for Builder {
    fn default() -> Self {
        Self { dims: SVGA_800_600 }
    }
}
