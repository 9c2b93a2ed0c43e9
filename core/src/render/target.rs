//! Render targets.
//!
//! The typical render target is a framebuffer, comprising a color (pixel)
//! buffer and a depth buffer. A bare color buffer can also be used as a
//! target if hidden surface removal is not needed.

use crate::math::Vary;
use crate::util::buf::AsMutSlice2;

use super::ctx::Context;
use super::raster::{Frag, Scanline};
use super::shader::FragmentShader;
use super::stats::Throughput;

/// Trait for types that can be used as render targets.
pub trait Target {
    /// Writes a single scanline into `self`.
    ///
    /// Returns the count of fragments input and output.
    fn rasterize<V, Fs>(
        &mut self,
        scanline: Scanline<V>,
        frag_shader: &Fs,
        ctx: &Context,
    ) -> Throughput
    where
        V: Vary,
        Fs: FragmentShader<Frag<V>>;
}

/// Framebuffer, combining a color (pixel) buffer and a depth buffer.
#[derive(Clone)]
pub struct Framebuf<Col, Dep> {
    pub color_buf: Col,
    pub depth_buf: Dep,
}

impl<Col, Dep> Target for Framebuf<Col, Dep>
where
    Col: AsMutSlice2<u32>,
    Dep: AsMutSlice2<f32>,
{
    /// Rasterizes `scanline` into this framebuffer.
    ///
    /// Each fragment is depth tested against the depth buffer as specified
    /// by `ctx`. For fragments that pass the test and are not discarded by
    /// the fragment shader, the color returned by the shader is written to
    /// the color buffer and the fragment's depth to the depth buffer.
    fn rasterize<V, Fs>(
        &mut self,
        mut sl: Scanline<V>,
        fs: &Fs,
        ctx: &Context,
    ) -> Throughput
    where
        V: Vary,
        Fs: FragmentShader<Frag<V>>,
    {
        let x0 = sl.xs.start;
        let x1 = sl.xs.end.max(sl.xs.start);
        let mut cbuf = self.color_buf.as_mut_slice2();
        let mut zbuf = self.depth_buf.as_mut_slice2();
        let cbuf_span = &mut cbuf[sl.y][x0..x1];
        let zbuf_span = &mut zbuf[sl.y][x0..x1];

        let mut io = Throughput { i: x1 - x0, o: 0 };
        sl.fragments()
            .zip(cbuf_span)
            .zip(zbuf_span)
            .for_each(|((frag, c), z)| {
                let new_z = frag.pos.z();
                if ctx.depth_test(new_z, *z) {
                    if let Some(new_c) = fs.shade_fragment(frag) {
                        if ctx.color_write {
                            // TODO Alpha blending goes here
                            io.o += 1;
                            *c = new_c.to_argb_u32();
                        }
                        if ctx.depth_write {
                            *z = new_z;
                        }
                    }
                }
            });
        io
    }
}

impl<Buf: AsMutSlice2<u32>> Target for Buf {
    /// Rasterizes `scanline` into this `u32` color buffer.
    /// Does no depth testing.
    fn rasterize<V, Fs>(
        &mut self,
        mut sl: Scanline<V>,
        fs: &Fs,
        ctx: &Context,
    ) -> Throughput
    where
        V: Vary,
        Fs: FragmentShader<Frag<V>>,
    {
        let x0 = sl.xs.start;
        let x1 = sl.xs.end.max(sl.xs.start);
        let mut cbuf = self.as_mut_slice2();
        let cbuf_span = &mut cbuf[sl.y][x0..x1];

        let mut io = Throughput { i: x1 - x0, o: 0 };
        sl.fragments()
            .zip(cbuf_span)
            .for_each(|(frag, pix)| {
                if let Some(color) = fs.shade_fragment(frag) {
                    if ctx.color_write {
                        io.o += 1;
                        *pix = color.to_argb_u32();
                    }
                }
            });
        io
    }
}

#[cfg(test)]
mod tests {
    use crate::math::{Color4, Vary, pt3, rgba};
    use crate::util::buf::Buf2;

    use super::*;

    // A 4-pixel scanline with constant reciprocal depth 0.5
    fn scanline() -> Scanline<f32> {
        Scanline {
            y: 0,
            xs: 0..4,
            vs: Vary::vary_to(
                (pt3(0.0, 0.5, 0.5), 1.0f32),
                (pt3(4.0, 0.5, 0.5), 1.0),
                4,
            ),
        }
    }

    fn framebuf() -> Framebuf<Buf2<u32>, Buf2<f32>> {
        Framebuf {
            color_buf: Buf2::new((4, 1)),
            depth_buf: Buf2::new((4, 1)),
        }
    }

    #[test]
    fn framebuf_writes_color_and_depth() {
        let mut fb = framebuf();
        let io = fb.rasterize(
            scanline(),
            &|_: Frag<f32>| rgba(0xFF, 0, 0, 0xFF),
            &Context::default(),
        );

        assert_eq!(io.i, 4);
        assert_eq!(io.o, 4);
        assert_eq!(fb.color_buf.data(), &[0xFF_FF_00_00; 4]);
        assert_eq!(fb.depth_buf.data(), &[0.5; 4]);
    }

    #[test]
    fn framebuf_depth_test_rejects_farther_fragment() {
        let mut fb = framebuf();
        // Fill with a reciprocal depth closer than the scanline's
        fb.depth_buf.fill(1.0);

        let io = fb.rasterize(
            scanline(),
            &|_: Frag<f32>| rgba(0xFF, 0, 0, 0xFF),
            &Context::default(),
        );

        assert_eq!(io.o, 0);
        assert_eq!(fb.color_buf.data(), &[0; 4]);
        assert_eq!(fb.depth_buf.data(), &[1.0; 4]);
    }

    #[test]
    fn framebuf_discarded_fragment_writes_nothing() {
        let mut fb = framebuf();
        let io = fb.rasterize(
            scanline(),
            &|_: Frag<f32>| None::<Color4>,
            &Context::default(),
        );

        assert_eq!(io.o, 0);
        assert_eq!(fb.color_buf.data(), &[0; 4]);
        assert_eq!(fb.depth_buf.data(), &[0.0; 4]);
    }

    #[test]
    fn color_buf_alone_as_target() {
        let mut buf: Buf2<u32> = Buf2::new((4, 1));
        let io = buf.rasterize(
            scanline(),
            &|_: Frag<f32>| rgba(0, 0xFF, 0, 0xFF),
            &Context::default(),
        );

        assert_eq!(io.o, 4);
        assert_eq!(buf.data(), &[0xFF_00_FF_00; 4]);
    }
}
