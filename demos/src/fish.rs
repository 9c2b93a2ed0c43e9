//! The fish scene.
//!
//! A swimming fish put together from deformed icospheres. The body is a
//! unit sphere flattened sideways and swept by a traveling wave, with a
//! dorsal fin raised above the fin start line; the eyes are two more
//! spheres fore and aft of the body, deformed the same way so that they
//! follow the motion. All animation happens in the vertex shaders, driven
//! by the [`Controls`] values collected into [`Uniforms`] once per frame.

use re::prelude::*;

use re::render::{Camera, Context, Fov, LookAt, Model, Target, World, shader};
use re::util::Dims;

use re_geom::solids::{Build, Cube, Icosphere, Square};

use crate::controls::Controls;

/// The geometry of the fish scene.
#[derive(Clone, Debug)]
pub struct Scene {
    /// The fish body, a unit sphere at the origin.
    pub body: Mesh<Normal3>,
    /// The back and front eyes, spheres aft and fore of the body.
    pub eyes: [Mesh<Normal3>; 2],
    /// Extra shapes that are built but not currently drawn.
    pub props: (Mesh<Normal3>, Mesh<Normal3>),
    level: u32,
}

/// The per-frame inputs of the vertex and fragment shaders.
///
/// Both render passes receive the full set, whether or not they use
/// every value.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Uniforms {
    /// Base color of the body, components in 0.0..=1.0.
    pub base: Color4f,
    /// Accent color of the fin and the eyes, components in 0.0..=1.0.
    pub edge: Color4f,
    /// Frames rendered so far, the time input of the animation.
    pub frame: u32,
    /// Height above which body vertices grow a fin.
    pub fin_start: f32,
    /// Depth from which the sway of the tail builds up.
    pub tail_start: f32,
    /// Multiplier of the swimming speed.
    pub speed: f32,
}

//
// Inherent impls
//

impl Scene {
    /// Builds the scene geometry at the tessellation level in `ctl`.
    pub fn load(ctl: &Controls) -> Self {
        let level = ctl.tessellation;
        Self {
            body: sphere(pt3(0.0, 0.0, 0.0), level),
            eyes: [
                sphere(pt3(0.0, 0.0, -4.0), level),
                sphere(pt3(0.0, 0.0, 4.0), level),
            ],
            props: (
                Square { center: pt3(0.0, 0.0, 0.0) }.build(),
                Cube { center: pt3(1.0, 0.0, 0.0) }.build(),
            ),
            level,
        }
    }

    /// Rebuilds the body and eye meshes if the tessellation level in `ctl`
    /// differs from the one they were last built at.
    ///
    /// Returns whether a rebuild took place. The props are not rebuilt.
    pub fn refresh(&mut self, ctl: &Controls) -> bool {
        if ctl.tessellation == self.level {
            return false;
        }
        self.level = ctl.tessellation;
        self.body = sphere(pt3(0.0, 0.0, 0.0), self.level);
        self.eyes = [
            sphere(pt3(0.0, 0.0, -4.0), self.level),
            sphere(pt3(0.0, 0.0, 4.0), self.level),
        ];
        true
    }

    /// Renders the scene in two passes.
    ///
    /// The body is drawn with diffuse shading, blending towards the accent
    /// color where the fin rises; the eyes are drawn unshaded in the plain
    /// accent color. Drawn in submission order, with the depth test
    /// resolving visibility.
    pub fn draw(
        &self,
        cam: &Camera<LookAt>,
        ctl: &Controls,
        frame: u32,
        target: &mut impl Target,
        ctx: &Context,
    ) {
        let u = Uniforms::new(ctl, frame);
        let light = vec3(0.4, 1.0, 0.6).normalize();

        let body = shader::new(
            |v: Vertex<_, _>, (mvp, u): (&ProjMat3<Model>, Uniforms)| {
                let p = deform(v.pos, &u);
                let fin = (p.y() - u.fin_start).max(0.0);
                let p = pt3(p.x(), p.y() + 4.0 * fin, p.z());
                vertex(mvp.apply(&p), (v.attrib, (8.0 * fin).min(1.0)))
            },
            |frag: Frag<(Normal3, f32)>| {
                let (n, fin) = frag.var;
                let shade = 0.3 + 0.7 * n.normalize().dot(&light).max(0.0);
                let col = u.base.lerp(&u.edge, fin).mul(shade).to_color4();
                rgba(col.r(), col.g(), col.b(), 0xFF)
            },
        );
        let flat = shader::new(
            |v: Vertex<_, _>, (mvp, u): (&ProjMat3<Model>, Uniforms)| {
                vertex(mvp.apply(&deform(v.pos, &u)), ())
            },
            |_: Frag<()>| u.edge.to_color4(),
        );

        let to_world: Mat4<Model, World> = Mat4::identity();
        cam.render(
            &self.body.faces,
            &self.body.verts,
            &to_world,
            &body,
            u,
            target,
            ctx,
        );
        for eye in &self.eyes {
            cam.render(
                &eye.faces,
                &eye.verts,
                &to_world,
                &flat,
                u,
                target,
                ctx,
            );
        }
    }
}

impl Uniforms {
    /// Collects the shader inputs for one frame.
    pub fn new(ctl: &Controls, frame: u32) -> Self {
        Self {
            base: ctl.base_color.to_color4f(),
            edge: ctl.edge_color.to_color4f(),
            frame,
            fin_start: ctl.fin_start,
            tail_start: ctl.tail_start,
            speed: ctl.speed,
        }
    }
}

//
// Free fns
//

/// Creates the camera viewing the fish: a 45° vertical field of view,
/// looking at the origin from five units away along the positive z axis.
pub fn camera(dims: Dims) -> Camera<LookAt> {
    Camera::new(dims)
        .perspective(Fov::Vertical(degs(45.0)), 0.1..1000.0)
        .look_at(pt3(0.0, 0.0, 5.0), pt3(0.0, 0.0, 0.0))
}

/// Applies the swimming deformation to the model-space point `p`.
///
/// The z axis runs from tail (negative) to head (positive). The body is
/// flattened sideways into a fish cross section and lengthened along z,
/// and a sine wave travels tailwards through every point below the tail
/// start line, its sway growing with the distance from the line. The wave
/// advances with the frame count, scaled by the speed control.
pub fn deform(p: Point3<Model>, u: &Uniforms) -> Point3<Model> {
    let phase = u.frame as f32 * 0.06 * u.speed;
    let z = 1.45 * p.z() / (1.0 + 0.45 * p.z().abs());
    let sway = 0.3 * (u.tail_start - z).clamp(0.0, 1.5);
    let x = 0.55 * p.x() + sway * (3.0 * z + phase).sin();
    pt3(x, p.y(), z)
}

fn sphere(center: Point3, level: u32) -> Mesh<Normal3> {
    Icosphere { center, radius: 1.0, level }.build()
}

#[cfg(test)]
mod tests {
    use re::render::Framebuf;

    use super::*;

    #[test]
    fn refresh_rebuilds_only_on_level_change() {
        let mut ctl = Controls::default();
        let mut scene = Scene::load(&ctl);
        assert!(!scene.refresh(&ctl));

        ctl.tessellation = 0;
        assert!(scene.refresh(&ctl));
        assert_eq!(scene.body.faces.len(), 20);
        assert_eq!(scene.body.verts.len(), 12);
        for eye in &scene.eyes {
            assert_eq!(eye.faces.len(), 20);
            assert_eq!(eye.verts.len(), 12);
        }
        assert!(!scene.refresh(&ctl));

        // The props are left as loaded
        assert_eq!(scene.props.0.faces.len(), 2);
        assert_eq!(scene.props.1.faces.len(), 12);
    }

    #[test]
    fn projection_matches_aspect_ratio_exactly() {
        let mut cam = camera((640, 480));
        cam.set_size((512, 256));
        let m = cam.project;
        assert_eq!(m.0[1][1] / m.0[0][0], 2.0);
    }

    #[test]
    fn draw_submits_body_and_eyes() {
        let dims = (64, 64);
        let mut ctl = Controls::default();
        ctl.tessellation = 2;
        let scene = Scene::load(&ctl);
        assert_eq!(scene.body.faces.len(), 320);

        let cam = camera(dims);
        let mut fb = Framebuf {
            color_buf: Buf2::new(dims),
            depth_buf: Buf2::new(dims),
        };
        let ctx = Context::default();
        scene.draw(&cam, &ctl, 0, &mut fb, &ctx);

        let stats = ctx.stats.borrow();
        assert_eq!(stats.calls, 3.0);
        assert_eq!(stats.prims.i, 3 * 320);
        assert!(stats.frags.o > 0);
    }
}
