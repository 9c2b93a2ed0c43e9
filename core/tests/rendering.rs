use redfin_core::prelude::*;

use redfin_core::geom::Vertex3;
use redfin_core::render::{Context, Framebuf, Model, View, render, shader};

const DIMS: (u32, u32) = (64, 64);

const FACES: [Tri<usize>; 1] = [tri(0, 1, 2)];

/// Returns a front-facing triangle at depth `z`, covering the center
/// of the frame when rendered with [`model_to_clip`].
fn tri_at(z: f32) -> [Vertex3<()>; 3] {
    [
        vertex(pt3(-2.0, -2.0, z), ()),
        vertex(pt3(0.0, 2.0, z), ()),
        vertex(pt3(2.0, -2.0, z), ()),
    ]
}

fn model_to_clip() -> ProjMat3<Model> {
    let mv: Mat4<Model, View> = translate(vec3(0.0, 0.0, 3.0)).to();
    let proj: ProjMat3<View> = perspective(1.0, 1.0, 0.1..1000.0);
    mv.then(&proj)
}

fn framebuf() -> Framebuf<Buf2<u32>, Buf2<f32>> {
    Framebuf {
        color_buf: Buf2::new(DIMS),
        depth_buf: Buf2::new(DIMS),
    }
}

#[test]
fn triangle_fills_the_center_of_the_frame() {
    let shader = shader::new(
        |v: Vertex<_, ()>, mvp: &ProjMat3<Model>| {
            vertex(mvp.apply(&v.pos), ())
        },
        |_: Frag<()>| rgba(0xFF, 0xFF, 0xFF, 0xFF),
    );

    let mvp = model_to_clip();
    let vp = viewport(pt2(0, 0)..pt2(64, 64));
    let mut fb = framebuf();
    let ctx = Context::default();

    render(&FACES, &tri_at(0.0), &shader, &mvp, vp, &mut fb, &ctx);

    assert_eq!(fb.color_buf[32][32], 0xFF_FF_FF_FF);
    assert_eq!(fb.color_buf[0][0], 0);
    assert_eq!(fb.color_buf[0][63], 0);

    let stats = ctx.stats.borrow();
    assert_eq!(stats.calls, 1.0);
    assert_eq!(stats.prims.i, 1);
    assert_eq!(stats.prims.o, 1);
    assert_eq!(stats.verts.i, 3);
    assert!(stats.frags.o > 0);
}

#[test]
fn depth_test_keeps_the_nearest_surface() {
    let vs = |v: Vertex<_, ()>, mvp: &ProjMat3<Model>| {
        vertex(mvp.apply(&v.pos), ())
    };
    let red = shader::new(vs, |_: Frag<()>| rgba(0xFF, 0, 0, 0xFF));
    let green = shader::new(vs, |_: Frag<()>| rgba(0, 0xFF, 0, 0xFF));

    let mvp = model_to_clip();
    let vp = viewport(pt2(0, 0)..pt2(64, 64));
    let mut fb = framebuf();
    let ctx = Context::default();

    // Nearer geometry wins no matter the draw order.
    render(&FACES, &tri_at(0.0), &red, &mvp, vp, &mut fb, &ctx);
    render(&FACES, &tri_at(-1.0), &green, &mvp, vp, &mut fb, &ctx);
    render(&FACES, &tri_at(0.0), &red, &mvp, vp, &mut fb, &ctx);

    assert_eq!(fb.color_buf[32][32], 0xFF_00_FF_00);
}

#[test]
fn geometry_behind_the_camera_is_clipped() {
    let shader = shader::new(
        |v: Vertex<_, ()>, mvp: &ProjMat3<Model>| {
            vertex(mvp.apply(&v.pos), ())
        },
        |_: Frag<()>| rgba(0xFF, 0xFF, 0xFF, 0xFF),
    );

    let mvp = model_to_clip();
    let vp = viewport(pt2(0, 0)..pt2(64, 64));
    let mut fb = framebuf();
    let ctx = Context::default();

    // The triangle lies behind the near plane in view space.
    render(&FACES, &tri_at(-10.0), &shader, &mvp, vp, &mut fb, &ctx);

    let stats = ctx.stats.borrow();
    assert_eq!(stats.prims.i, 1);
    assert_eq!(stats.prims.o, 0);
    assert_eq!(stats.frags.i, 0);
    assert!(fb.color_buf.data().iter().all(|&px| px == 0));
}
