use criterion::*;

use re::prelude::*;
use re::render::{Context, Framebuf, Model, View, render, shader};

use re_geom::solids::{Build, Icosphere};

const W: u32 = 128;

fn icosphere(c: &mut Criterion) {
    for level in [2, 4, 6] {
        c.bench_function(&format!("icosphere-{level}"), |b| {
            b.iter(|| {
                Icosphere { center: pt3(0.0, 0.0, 0.0), radius: 1.0, level }
                    .build()
            })
        });
    }
}

fn sphere_render(c: &mut Criterion) {
    let mesh =
        Icosphere { center: pt3(0.0, 0.0, 0.0), radius: 1.0, level: 4 }
            .build();

    let light = vec3(0.4, 1.0, 0.6).normalize();
    let mv: Mat4<Model, View> = translate(vec3(0.0, 0.0, 3.0)).to();
    let proj: ProjMat3<View> = perspective(1.0, 1.0, 0.1..1000.0);
    let mvp = mv.then(&proj);
    let vp = viewport(pt2(0, 0)..pt2(W, W));

    let sh = shader::new(
        |v: Vertex<_, Normal3>, mvp: &ProjMat3<Model>| {
            vertex(mvp.apply(&v.pos), v.attrib)
        },
        |frag: Frag<Normal3>| {
            let shade = frag.var.normalize().dot(&light).max(0.0);
            rgba(1.0, 1.0, 1.0, 1.0).mul(shade).to_color4()
        },
    );

    let mut buf = Framebuf {
        color_buf: Buf2::new((W, W)),
        depth_buf: Buf2::new((W, W)),
    };
    let ctx = Context::default();

    c.bench_function("sphere-render", |b| {
        b.iter(|| {
            render(&mesh.faces, &mesh.verts, &sh, &mvp, vp, &mut buf, &ctx)
        })
    });
}

criterion_group!(benches, icosphere, sphere_render);
criterion_main!(benches);
