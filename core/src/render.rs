//! Turning 3D geometry into raster images.
//!
//! This module constitutes the core 3D rendering pipeline of `redfin`.
//! It contains code for [clipping][clip], [transforming, shading][shader],
//! [rasterizing][raster], and [outputting][target] triangle meshes.

use alloc::{vec, vec::Vec};

use crate::geom::{Tri, Vertex, vertex};
use crate::math::{Apply, Mat4, Vary, ZDiv, mat::RealToReal, pt3};

#[cfg(feature = "fp")]
pub use self::cam::LookAt;
pub use self::{
    cam::{Camera, Fov, Transform},
    clip::Clip,
    ctx::{Context, FaceCull},
    raster::{Frag, Scanline},
    shader::{FragmentShader, Shader, VertexShader},
    stats::Stats,
    target::{Framebuf, Target},
};

use clip::{ClipVec, ClipVert, view_frustum};
use raster::{ScreenPt, tri_fill};

pub mod cam;
pub mod clip;
pub mod ctx;
pub mod raster;
pub mod shader;
pub mod stats;
pub mod target;

/// Model space coordinate basis.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub struct Model;

/// World space coordinate basis.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub struct World;

/// View (camera) space coordinate basis.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub struct View;

/// NDC space coordinate basis (normalized device coordinates).
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub struct Ndc;

/// Screen space coordinate basis.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub struct Screen;

/// Mapping from model space to world space.
pub type ModelToWorld = RealToReal<3, Model, World>;

/// Mapping from world space to view space.
pub type WorldToView = RealToReal<3, World, View>;

/// Mapping from model space to view space.
pub type ModelToView = RealToReal<3, Model, View>;

/// Mapping from NDC space to screen space.
pub type NdcToScreen = RealToReal<3, Ndc, Screen>;

/// Renders the given triangles into `target`.
///
/// The indices in `tris` refer to the vertices in `verts`. Each vertex is
/// first transformed by the vertex shader of `shader`, after which the
/// triangles are clipped against the view frustum, perspective divided,
/// mapped to screen space by `viewport_tf`, and rasterized, invoking the
/// fragment shader of `shader` for every fragment drawn.
pub fn render<Vtx, Var, Uni, Shd, Tgt>(
    tris: &[Tri<usize>],
    verts: &[Vtx],
    shader: &Shd,
    uniform: Uni,
    viewport_tf: Mat4<Ndc, Screen>,
    target: &mut Tgt,
    ctx: &Context,
) where
    Vtx: Clone,
    Var: Vary,
    Uni: Copy,
    Shd: VertexShader<Vtx, Uni, Output = Vertex<ClipVec, Var>>
        + FragmentShader<Frag<Var>>,
    Tgt: Target,
{
    let mut stats = Stats::start();
    stats.calls = 1.0;
    stats.prims.i += tris.len();
    stats.verts.i += verts.len();

    // Vertex shader
    let verts: Vec<_> = verts
        .iter()
        // TODO Shade vertices by reference to avoid the clone
        .map(|v| ClipVert::new(shader.shade_vertex(v.clone(), uniform)))
        .collect();

    let tris: Vec<_> = tris
        .iter()
        .map(|Tri(vs)| Tri(vs.map(|i| verts[i].clone())))
        .collect();

    // View frustum clipping
    let mut clipped = vec![];
    view_frustum::clip(&tris[..], &mut clipped);

    for Tri(vs) in clipped {
        let vs = vs.map(|v| {
            let w = v.pos.w();
            // Perspective divide. The z coordinate keeps the reciprocal
            // of the view depth, and varyings are divided by the depth
            // so that they can be interpolated perspective correctly.
            // The division is undone once per fragment when rasterizing.
            let pos = pt3(v.pos.x() / w, v.pos.y() / w, w.recip());
            // Viewport transform
            vertex(viewport_tf.apply(&pos), v.attrib.z_div(w))
        });

        if ctx.face_cull(is_backface(&vs)) {
            continue;
        }
        stats.prims.o += 1;

        // Rasterization and fragment shader
        tri_fill(vs, |scanline| {
            stats.frags += target.rasterize(scanline, shader, ctx);
        });
    }
    *ctx.stats.borrow_mut() += stats.finish();
}

/// Returns whether a screen-space triangle faces away from the viewer.
///
/// Counterclockwise-wound faces end up with positive signed area in screen
/// space after the y-flipping viewport transform, so a face is considered
/// a backface if its signed area is negative. Degenerate triangles with
/// zero area are also treated as backfaces so that they can be culled.
fn is_backface<V>(vs: &[Vertex<ScreenPt, V>; 3]) -> bool {
    let e1 = vs[1].pos - vs[0].pos;
    let e2 = vs[2].pos - vs[0].pos;
    e1.x() * e2.y() - e1.y() * e2.x() <= 0.0
}

#[cfg(test)]
mod tests {
    use crate::geom::{Tri, Vertex3, vertex};
    use crate::math::{pt2, pt3, rgba, viewport};
    use crate::util::buf::Buf2;

    use super::*;

    // Maps x and y to clip space as is, with w = 1
    fn vertex_shader(v: Vertex3<()>, _: ()) -> Vertex<ClipVec, ()> {
        vertex(ClipVec::new([v.pos.x(), v.pos.y(), 0.0, 1.0]), ())
    }

    fn do_render(tri: Tri<usize>) -> Buf2<u32> {
        let verts = [
            vertex(pt3(-1.0, 1.0, 0.0), ()),
            vertex(pt3(1.0, 1.0, 0.0), ()),
            vertex(pt3(-1.0, -1.0, 0.0), ()),
        ];
        let shader =
            Shader::new(vertex_shader, |_: Frag<()>| {
                rgba(0xFF, 0xFF, 0xFF, 0xFF)
            });

        let mut buf = Buf2::new((4, 4));
        render(
            &[tri],
            &verts,
            &shader,
            (),
            viewport(pt2(0, 0)..pt2(4, 4)),
            &mut buf,
            &Context::default(),
        );
        buf
    }

    #[test]
    fn renders_front_face() {
        let buf = do_render(Tri([0, 1, 2]));
        // The vertices map to the top-left, top-right, and bottom-left
        // corners, so the top-left half of the buffer should be drawn
        assert_eq!(buf[[0u32, 0]], 0xFF_FF_FF_FF);
        assert_eq!(buf[[1u32, 1]], 0xFF_FF_FF_FF);
        assert_eq!(buf[[3u32, 3]], 0);
        assert!(buf.iter().any(|&px| px != 0));
    }

    #[test]
    fn culls_back_face() {
        // Same triangle with the winding reversed
        let buf = do_render(Tri([0, 2, 1]));
        assert!(buf.iter().all(|&px| px == 0));
    }

    #[test]
    fn culls_nothing_if_face_cull_disabled() {
        let verts = [
            vertex(pt3(-1.0, 1.0, 0.0), ()),
            vertex(pt3(1.0, 1.0, 0.0), ()),
            vertex(pt3(-1.0, -1.0, 0.0), ()),
        ];
        let shader =
            Shader::new(vertex_shader, |_: Frag<()>| {
                rgba(0xFF, 0xFF, 0xFF, 0xFF)
            });

        let ctx = Context { face_cull: None, ..Context::default() };
        let mut buf = Buf2::new((4, 4));
        render(
            &[Tri([0, 2, 1])],
            &verts,
            &shader,
            (),
            viewport(pt2(0, 0)..pt2(4, 4)),
            &mut buf,
            &ctx,
        );
        assert!(buf.iter().any(|&px| px != 0));
    }

    #[test]
    fn collects_stats() {
        let ctx = Context::default();
        let verts = [
            vertex(pt3(-1.0, 1.0, 0.0), ()),
            vertex(pt3(1.0, 1.0, 0.0), ()),
            vertex(pt3(-1.0, -1.0, 0.0), ()),
        ];
        let shader =
            Shader::new(vertex_shader, |_: Frag<()>| {
                rgba(0xFF, 0xFF, 0xFF, 0xFF)
            });
        let mut buf = Buf2::new((4, 4));
        render(
            &[Tri([0, 1, 2])],
            &verts,
            &shader,
            (),
            viewport(pt2(0, 0)..pt2(4, 4)),
            &mut buf,
            &ctx,
        );

        let stats = ctx.stats.borrow();
        assert_eq!(stats.calls, 1.0);
        assert_eq!(stats.prims.i, 1);
        assert_eq!(stats.prims.o, 1);
        assert_eq!(stats.verts.i, 3);
        assert!(stats.frags.o > 0);
    }
}
