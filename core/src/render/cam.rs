//! Cameras and camera transforms.

use core::ops::Range;

#[cfg(feature = "fp")]
use crate::math::{Angle, Point3, Vec3, translate};
use crate::math::{Mat4, Vary, mat::ProjMat3, perspective, pt2, viewport};

use crate::geom::{Tri, Vertex};
use crate::util::Dims;

use super::{
    Context, Frag, FragmentShader, Ndc, Screen, Target, VertexShader, View,
    World, clip::ClipVec,
};

/// A camera's world-to-view mapping, however the motion is parameterized.
pub trait Transform {
    /// Returns the world-to-view matrix for the current state.
    fn world_to_view(&self) -> Mat4<World, View>;
}

/// Camera field of view.
///
/// The field of view fixes how much of the scene fits in the image:
/// narrow it down and the image zooms in, widen it and more of the scene
/// squeezes into view.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum Fov {
    /// Focal length divided by aperture size.
    ///
    /// In photographic terms, the 𝑓-number of the lens. A ratio of 1.0
    /// gives a 90° horizontal angle of view; larger ratios zoom in,
    /// smaller ones widen the view out.
    FocalRatio(f32),
    /// Focal length of an equivalent [35mm-film lens][1], in mm.
    ///
    /// A scale familiar from photography: 28.0 is a moderate wide-angle
    /// view, 50.0 a "normal" one.
    ///
    /// [1]: https://en.wikipedia.org/wiki/35_mm_equivalent_focal_length
    Equiv35mm(f32),
    /// Angle of view from the left edge of the image to the right.
    #[cfg(feature = "fp")]
    Horizontal(Angle),
    /// Angle of view from the top edge of the image to the bottom.
    #[cfg(feature = "fp")]
    Vertical(Angle),
    /// Angle of view across the diagonal of the image.
    #[cfg(feature = "fp")]
    Diagonal(Angle),
}

/// Maps world-space geometry onto a viewport.
///
/// Holds the inputs its matrices are derived from, so that the transform,
/// field of view, aspect ratio, and viewport can be changed independently
/// and the matrices recomputed as needed.
#[derive(Clone, Debug)]
pub struct Camera<Tf> {
    /// World-to-view transform.
    pub transform: Tf,
    /// Viewport width and height.
    pub dims: Dims,
    /// Field of view.
    pub fov: Fov,
    /// Distances of the near and far clipping planes.
    pub near_far: Range<f32>,
    /// Width-to-height ratio of the projected image.
    aspect: f32,
    /// View matrix, refreshed from `transform` by [`update`][Self::update].
    view: Mat4<World, View>,
    /// Matrix projecting view space to clip space.
    pub project: ProjMat3<View>,
    /// Matrix mapping NDC space to screen space.
    pub viewport: Mat4<Ndc, Screen>,
}

/// Look-at camera transform.
///
/// Keeps the camera at a fixed position, oriented so that a given
/// **world-space** point is centered in the view.
#[cfg(feature = "fp")]
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct LookAt {
    /// The camera's position in **world** space.
    pub pos: Point3<World>,
    /// The point the camera is looking at, in **world** space.
    pub target: Point3<World>,
    /// The approximate up direction, in **world** space.
    ///
    /// Must not be parallel to the view direction.
    pub up: Vec3<World>,
}

//
// Inherent impls
//

impl Fov {
    /// Returns `self` converted into a focal ratio.
    ///
    /// `aspect_ratio` is the width-to-height ratio of the image. It is
    /// needed to convert vertical and diagonal angles of view.
    pub fn focal_ratio(self, aspect_ratio: f32) -> f32 {
        // A focal ratio r relates to a horizontal angle of view a
        // by r = 1 / tan(a / 2)
        #[cfg(feature = "fp")]
        let ratio = |a: Angle| 1.0 / (a / 2.0).tan();

        match self {
            Fov::FocalRatio(r) => r,
            // A full 35mm film frame is 36 mm wide
            Fov::Equiv35mm(mm) => mm / (36.0 / 2.0),

            #[cfg(feature = "fp")]
            Fov::Horizontal(a) => ratio(a),
            #[cfg(feature = "fp")]
            Fov::Vertical(a) => ratio(a) / aspect_ratio,
            #[cfg(feature = "fp")]
            Fov::Diagonal(a) => {
                use crate::math::float::f32;
                let diag = f32::sqrt(1.0 + 1.0 / aspect_ratio / aspect_ratio);
                ratio(a) * diag
            }
        }
    }
}

impl Camera<()> {
    /// Creates a camera with the given resolution.
    ///
    /// The camera has a focal ratio of 1.0 and a near–far range of
    /// 0.1..1000.0 until changed with [`perspective`][Self::perspective],
    /// and no world-to-view transform until one is set with
    /// [`transform`][Self::transform] or [`look_at`][Self::look_at].
    pub fn new(dims: Dims) -> Self {
        let mut cam = Self {
            transform: (),
            dims,
            fov: Fov::FocalRatio(1.0),
            near_far: 0.1..1000.0,
            aspect: dims.0 as f32 / dims.1 as f32,
            view: Mat4::identity(),
            project: ProjMat3::default(),
            viewport: viewport(pt2(0, 0)..pt2(dims.0, dims.1)),
        };
        cam.update_projection();
        cam
    }

    /// Sets the world-to-view transform of this camera.
    pub fn transform<T: Transform>(self, tf: T) -> Camera<T> {
        let Self {
            dims, fov, near_far, aspect, project, viewport, ..
        } = self;
        Camera {
            view: tf.world_to_view(),
            transform: tf,
            dims,
            fov,
            near_far,
            aspect,
            project,
            viewport,
        }
    }

    /// Places the camera at `pos`, oriented so that `target` is centered
    /// in the view, with the y axis as the up direction.
    #[cfg(feature = "fp")]
    pub fn look_at(
        self,
        pos: Point3<World>,
        target: Point3<World>,
    ) -> Camera<LookAt> {
        self.transform(LookAt::new(pos, target))
    }
}

impl<T> Camera<T> {
    /// Sets up perspective projection with the given field of view
    /// and near–far range.
    ///
    /// The endpoints of `near_far` give the distances of the near and far
    /// clipping planes.
    ///
    /// # Panics
    /// * If any parameter value is non-positive.
    /// * If `near_far` is an empty range.
    pub fn perspective(mut self, fov: Fov, near_far: Range<f32>) -> Self {
        self.fov = fov;
        self.near_far = near_far;
        self.update_projection();
        self
    }

    /// Resizes the viewport.
    ///
    /// Rebuilds the viewport matrix, sets the aspect ratio to the
    /// width-to-height ratio of `dims`, and rebuilds the projection matrix.
    pub fn set_size(&mut self, dims: Dims) {
        self.dims = dims;
        self.viewport = viewport(pt2(0, 0)..pt2(dims.0, dims.1));
        self.set_aspect_ratio(dims.0 as f32 / dims.1 as f32);
        self.update_projection();
    }

    /// Sets the aspect ratio of the projected image.
    ///
    /// Takes effect when the projection matrix is next rebuilt with
    /// [`update_projection`][Self::update_projection].
    pub fn set_aspect_ratio(&mut self, ratio: f32) {
        self.aspect = ratio;
    }

    /// Rebuilds the projection matrix from the current field of view,
    /// aspect ratio, and near–far range.
    pub fn update_projection(&mut self) {
        self.project = perspective(
            self.fov.focal_ratio(self.aspect),
            self.aspect,
            self.near_far.clone(),
        );
    }
}

impl<T: Transform> Camera<T> {
    /// Recomputes the view matrix from the current transform.
    ///
    /// Changes to `self.transform` take effect on the next call;
    /// [`world_to_project`][Self::world_to_project] uses the matrix
    /// computed by the latest one.
    pub fn update(&mut self) {
        self.view = self.transform.world_to_view();
    }

    /// Returns the composed camera and projection matrix.
    pub fn world_to_project(&self) -> ProjMat3<World> {
        self.view.then(&self.project)
    }

    /// Renders the given geometry from the viewpoint of this camera.
    pub fn render<B, Vtx: Clone, Var: Vary, Uni: Copy, Shd>(
        &self,
        tris: impl AsRef<[Tri<usize>]>,
        verts: impl AsRef<[Vtx]>,
        to_world: &Mat4<B, World>,
        shader: &Shd,
        uniform: Uni,
        target: &mut impl Target,
        ctx: &Context,
    ) where
        Shd: for<'a> VertexShader<
                Vtx,
                (&'a ProjMat3<B>, Uni),
                Output = Vertex<ClipVec, Var>,
            > + FragmentShader<Frag<Var>>,
    {
        let tf = to_world.then(&self.world_to_project());

        super::render(
            tris.as_ref(),
            verts.as_ref(),
            shader,
            (&tf, uniform),
            self.viewport,
            target,
            ctx,
        );
    }
}

#[cfg(feature = "fp")]
impl LookAt {
    /// Creates a look-at transform with the y-axis as the up direction.
    pub fn new(pos: Point3<World>, target: Point3<World>) -> Self {
        Self { pos, target, up: Vec3::Y }
    }
}

//
// Local trait impls
//

#[cfg(feature = "fp")]
impl Transform for LookAt {
    fn world_to_view(&self) -> Mat4<World, View> {
        let fwd = (self.target - self.pos).normalize();
        let right = self.up.cross(&fwd).normalize();
        let up = fwd.cross(&right);

        // World-to-view is the inverse of the camera's world transform;
        // the orientation part is orthogonal so its inverse is the transpose
        let transl = translate(-self.pos.to_vec().to());
        let orient =
            Mat4::from_linear(right.to(), up.to(), fwd.to()).transpose();

        transl.then(&orient).to()
    }
}

impl Transform for Mat4<World, View> {
    fn world_to_view(&self) -> Mat4<World, View> {
        *self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use Fov::*;

    #[test]
    fn focal_ratio_ignores_aspect_ratio() {
        assert_eq!(FocalRatio(2.345).focal_ratio(1.0), 2.345);
        assert_eq!(FocalRatio(2.345).focal_ratio(2.0), 2.345);
    }

    #[test]
    fn equiv_35mm_scales_by_half_frame_width() {
        assert_eq!(Equiv35mm(18.0).focal_ratio(1.0), 1.0);
        assert_eq!(Equiv35mm(36.0).focal_ratio(1.5), 2.0);
    }

    #[cfg(feature = "fp")]
    #[test]
    fn angle_of_view_focal_ratios() {
        use crate::assert_approx_eq;
        use crate::math::degs;
        use core::f32::consts::SQRT_2;
        const SQRT_3: f32 = 1.7320508;

        // At 1:1 aspect the horizontal and vertical ratios coincide
        assert_approx_eq!(Horizontal(degs(60.0)).focal_ratio(1.0), SQRT_3);
        assert_approx_eq!(Vertical(degs(60.0)).focal_ratio(1.0), SQRT_3);
        assert_approx_eq!(
            Diagonal(degs(60.0)).focal_ratio(1.0),
            SQRT_3 * SQRT_2
        );

        // A wider frame fits the same vertical angle with a shorter lens
        assert_approx_eq!(Horizontal(degs(60.0)).focal_ratio(SQRT_3), SQRT_3);
        assert_approx_eq!(Vertical(degs(60.0)).focal_ratio(SQRT_3), 1.0);
        assert_approx_eq!(Diagonal(degs(60.0)).focal_ratio(SQRT_3), 2.0);
    }

    #[test]
    fn camera_perspective_uses_dims_aspect_ratio() {
        let cam = Camera::new((800, 400))
            .perspective(Fov::FocalRatio(1.0), 1.0..10.0);

        let m = &cam.project;
        assert_eq!(m.0[0][0], 1.0);
        assert_eq!(m.0[1][1] / m.0[0][0], 2.0);
    }

    #[test]
    fn aspect_ratio_applies_on_projection_update() {
        let mut cam = Camera::new((100, 100))
            .perspective(Fov::FocalRatio(1.0), 1.0..10.0);
        cam.set_aspect_ratio(1.5);

        // Not rebuilt yet
        assert_eq!(cam.project.0[1][1] / cam.project.0[0][0], 1.0);

        cam.update_projection();
        assert_eq!(cam.project.0[1][1] / cam.project.0[0][0], 1.5);
    }

    #[test]
    fn set_size_rederives_viewport_and_projection() {
        let mut cam = Camera::new((640, 480))
            .perspective(Fov::FocalRatio(1.0), 1.0..10.0);
        cam.set_size((512, 256));

        assert_eq!(cam.dims, (512, 256));
        assert_eq!(cam.project.0[1][1] / cam.project.0[0][0], 2.0);

        // Half extents and y flip of the new viewport
        let v = &cam.viewport;
        assert_eq!(v.0[0][0], 256.0);
        assert_eq!(v.0[1][1], -128.0);
    }

    #[cfg(feature = "fp")]
    #[test]
    fn view_matrix_refreshes_on_update() {
        use crate::math::pt3;

        let mut cam = Camera::new((100, 100))
            .perspective(FocalRatio(1.0), 1.0..10.0)
            .look_at(pt3(0.0, 0.0, 5.0), Point3::origin());
        let before = cam.world_to_project();

        // Stale until the next update call
        cam.transform.pos = pt3(0.0, 0.0, 8.0);
        assert_eq!(cam.world_to_project().0, before.0);

        cam.update();
        assert_ne!(cam.world_to_project().0, before.0);
    }

    #[cfg(feature = "fp")]
    #[test]
    fn look_at_view_matrix() {
        use crate::assert_approx_eq;
        use crate::math::{Apply, pt3};

        // Camera on the positive z-axis, looking at the origin
        let look = LookAt::new(pt3(0.0, 0.0, 5.0), Point3::origin());
        let m = look.world_to_view();

        // The origin is straight ahead at depth 5
        assert_approx_eq!(m.apply(&pt3(0.0, 0.0, 0.0)), pt3(0.0, 0.0, 5.0));
        // World +x appears on the left
        assert_approx_eq!(m.apply(&pt3(1.0, 0.0, 0.0)), pt3(-1.0, 0.0, 5.0));
        // World +y appears up
        assert_approx_eq!(m.apply(&pt3(0.0, 1.0, 4.0)), pt3(0.0, 1.0, 1.0));
    }
}
