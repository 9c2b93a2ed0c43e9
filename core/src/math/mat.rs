//! Matrices and linear transforms between spaces.
//!
//! Matrices are tagged with the map they represent: the source and
//! destination spaces are part of the type. Composing or applying matrices
//! with mismatched spaces is a type error, which catches transform-order
//! bugs at compile time rather than as visual glitches.

use core::{
    array,
    fmt::{Debug, Formatter},
    marker::PhantomData as Pd,
    ops::Range,
};

use crate::math::{
    approx::ApproxEq,
    point::{Point2u, Point3, pt3},
    space::{Proj4, Real},
    vec::{ProjVec3, Vec3},
};
use crate::render::{Ndc, Screen};

/// A generic matrix type. Represents a linear map from one space to
/// another, tagged with the type of the map.
///
/// # Type parameters
/// * `Repr`: Representation of the elements of the matrix, typically a
///   nested array such as `[[f32; 4]; 4]`.
/// * `Map`: The map that the matrix represents, such as
///   [`RealToReal`] or [`RealToProj`].
#[repr(transparent)]
pub struct Matrix<Repr, Map>(pub Repr, Pd<Map>);

/// A 4×4 matrix representing an affine transform from one real 3-space to
/// another.
///
/// Constructors uphold the invariant that the bottom row is `[0, 0, 0, 1]`,
/// so applying a `Mat4` never requires a perspective divide.
pub type Mat4<FromBasis = (), ToBasis = FromBasis> =
    Matrix<[[f32; 4]; 4], RealToReal<3, FromBasis, ToBasis>>;

/// A 4×4 matrix representing a perspective projection from a real 3-space
/// to the projective 4-space.
pub type ProjMat3<FromBasis = ()> =
    Matrix<[[f32; 4]; 4], RealToProj<FromBasis>>;

/// Trait for tag types representing a linear map between two spaces.
pub trait LinearMap {
    /// The source space of the map.
    type Source;
    /// The destination space of the map.
    type Dest;
}

/// Trait for sequential composition of linear maps.
///
/// `Self: Compose<Next>` means that a map of type `Self` can be followed by
/// a map of type `Next`, and names the type of the composite map. The trait
/// is only implemented for pairs of maps where the destination space of the
/// first matches the source space of the second.
pub trait Compose<Next>: LinearMap {
    /// The composite map equal to `Self` followed by `Next`.
    type Result: LinearMap;
}

/// Tag type for affine maps between real spaces of dimension `DIM`,
/// from basis `SrcBasis` to basis `DstBasis`.
#[derive(Copy, Clone, Default, Eq, PartialEq)]
pub struct RealToReal<const DIM: usize, SrcBasis = (), DstBasis = ()>(
    Pd<(SrcBasis, DstBasis)>,
);

/// Tag type for projective maps from a real 3-space with basis `SrcBasis`
/// to the projective 4-space.
#[derive(Copy, Clone, Default, Eq, PartialEq)]
pub struct RealToProj<SrcBasis = ()>(Pd<SrcBasis>);

/// Trait for applying a transform to a value.
///
/// The associated output type lets the same transform act differently on
/// different operands: an affine matrix translates points but not vectors,
/// and a projective matrix takes a point to a homogeneous coordinate vector.
pub trait Apply<Operand> {
    /// The result of the transformation.
    type Output;

    /// Applies this transform to `operand`.
    fn apply(&self, operand: &Operand) -> Self::Output;
}

//
// Inherent impls
//

impl<R, M> Matrix<R, M> {
    /// Returns a new matrix with representation `repr`.
    #[inline]
    pub const fn new(repr: R) -> Self {
        Self(repr, Pd)
    }

    /// Returns a matrix with elements equal to `self` but representing a
    /// map of type `N`.
    ///
    /// This method can be used to coerce a matrix to a different map type
    /// in the rare cases where this is needed.
    #[inline]
    pub fn to<N>(self) -> Matrix<R, N> {
        Matrix(self.0, Pd)
    }
}

impl<M: LinearMap> Matrix<[[f32; 4]; 4], M> {
    /// Returns the 4×4 identity matrix.
    pub const fn identity() -> Self {
        Self::new([
            [1.0, 0.0, 0.0, 0.0],
            [0.0, 1.0, 0.0, 0.0],
            [0.0, 0.0, 1.0, 0.0],
            [0.0, 0.0, 0.0, 1.0],
        ])
    }

    /// Returns the composite transform equal to `self` followed by `next`.
    ///
    /// Only defined if the destination space of `self` is the source space
    /// of `next`.
    #[must_use]
    pub fn then<N>(
        &self,
        next: &Matrix<[[f32; 4]; 4], N>,
    ) -> Matrix<[[f32; 4]; 4], M::Result>
    where
        M: Compose<N>,
    {
        // Composite = next · self, so that self is applied first
        let mut res = [[0.0; 4]; 4];
        for i in 0..4 {
            for j in 0..4 {
                for k in 0..4 {
                    res[i][j] += next.0[i][k] * self.0[k][j];
                }
            }
        }
        Matrix::new(res)
    }
}

impl Mat4 {
    /// Returns the affine transform that takes the standard basis vectors
    /// to `i`, `j`, and `k`, which become the columns of the matrix.
    pub const fn from_linear(i: Vec3, j: Vec3, k: Vec3) -> Self {
        let [ix, iy, iz] = i.0;
        let [jx, jy, jz] = j.0;
        let [kx, ky, kz] = k.0;
        Self::new([
            [ix, jx, kx, 0.0],
            [iy, jy, ky, 0.0],
            [iz, jz, kz, 0.0],
            [0.0, 0.0, 0.0, 1.0],
        ])
    }
}

impl<F, T> Mat4<F, T> {
    /// Returns the transpose of `self`.
    ///
    /// If `self` is orthogonal, such as a rotation, the transpose equals
    /// the inverse, representing the opposite map.
    #[must_use]
    pub fn transpose(&self) -> Mat4<T, F> {
        Matrix::new(array::from_fn(|i| array::from_fn(|j| self.0[j][i])))
    }
}

//
// Free functions
//

/// Returns a matrix applying a translation by `t`.
pub const fn translate(t: Vec3) -> Mat4 {
    let [x, y, z] = t.0;
    Matrix::new([
        [1.0, 0.0, 0.0, x],
        [0.0, 1.0, 0.0, y],
        [0.0, 0.0, 1.0, z],
        [0.0, 0.0, 0.0, 1.0],
    ])
}

/// Returns a matrix applying a non-uniform scale by `s`.
pub const fn scale(s: Vec3) -> Mat4 {
    let [x, y, z] = s.0;
    Matrix::new([
        [x, 0.0, 0.0, 0.0],
        [0.0, y, 0.0, 0.0],
        [0.0, 0.0, z, 0.0],
        [0.0, 0.0, 0.0, 1.0],
    ])
}

/// Returns a perspective projection matrix.
///
/// The parameters define a view frustum opening towards positive z, the
/// view-space forward direction:
/// * `focal_ratio`: Focal length to aperture ratio, controlling the
///   horizontal field of view.
/// * `aspect_ratio`: Viewport width to height ratio. The vertical field of
///   view is derived from the horizontal one so that the image is not
///   stretched: the element at row 1, column 1 always equals the element
///   at row 0, column 0 multiplied by `aspect_ratio`.
/// * `near_far`: Depth range between the near and far clipping planes.
///
/// After the perspective divide, z maps to [-1, 1] between the near and
/// far planes, and the w coordinate holds the view-space depth.
///
/// # Panics
/// If a parameter value is invalid:
/// * `focal_ratio` must be positive.
/// * `aspect_ratio` must be positive.
/// * `near_far` must be nonempty and positive.
pub fn perspective<B>(
    focal_ratio: f32,
    aspect_ratio: f32,
    near_far: Range<f32>,
) -> ProjMat3<B> {
    let (r, a) = (focal_ratio, aspect_ratio);
    let Range { start: n, end: f } = near_far;
    assert!(r > 0.0, "focal ratio must be positive, was {r}");
    assert!(a > 0.0, "aspect ratio must be positive, was {a}");
    assert!(n > 0.0, "near plane must be positive, was {n}");
    assert!(f > n, "far plane must be farther than near, was {f}");

    Matrix::new([
        [r, 0.0, 0.0, 0.0],
        [0.0, r * a, 0.0, 0.0],
        [0.0, 0.0, (f + n) / (f - n), -2.0 * f * n / (f - n)],
        [0.0, 0.0, 1.0, 0.0],
    ])
}

/// Returns a viewport transform matrix mapping NDC to screen space.
///
/// A viewport matrix scales and translates the NDC x and y coordinates to
/// the rectangle given by `bounds`, flipping y so that NDC +y (up) maps to
/// decreasing screen rows. The z coordinate is passed through unchanged.
pub fn viewport(bounds: Range<Point2u>) -> Mat4<Ndc, Screen> {
    let (l, t) = (bounds.start.x() as f32, bounds.start.y() as f32);
    let (r, b) = (bounds.end.x() as f32, bounds.end.y() as f32);
    let (hw, hh) = ((r - l) / 2.0, (b - t) / 2.0);
    Matrix::new([
        [hw, 0.0, 0.0, l + hw],
        [0.0, -hh, 0.0, t + hh],
        [0.0, 0.0, 1.0, 0.0],
        [0.0, 0.0, 0.0, 1.0],
    ])
}

//
// Local trait impls
//

impl<const DIM: usize, F, T> LinearMap for RealToReal<DIM, F, T> {
    type Source = Real<DIM, F>;
    type Dest = Real<DIM, T>;
}

impl<F> LinearMap for RealToProj<F> {
    type Source = Real<3, F>;
    type Dest = Proj4;
}

impl<const DIM: usize, F, T, U> Compose<RealToReal<DIM, T, U>>
    for RealToReal<DIM, F, T>
{
    type Result = RealToReal<DIM, F, U>;
}

impl<F, T> Compose<RealToProj<T>> for RealToReal<3, F, T> {
    type Result = RealToProj<F>;
}

impl<F, T> Apply<Point3<F>> for Mat4<F, T> {
    type Output = Point3<T>;

    /// Maps the point `p` from space `F` to space `T`.
    fn apply(&self, p: &Point3<F>) -> Point3<T> {
        let [x, y, z] = p.0;
        let m = &self.0;
        pt3(
            m[0][0] * x + m[0][1] * y + m[0][2] * z + m[0][3],
            m[1][0] * x + m[1][1] * y + m[1][2] * z + m[1][3],
            m[2][0] * x + m[2][1] * y + m[2][2] * z + m[2][3],
        )
    }
}

impl<F, T> Apply<Vec3<F>> for Mat4<F, T> {
    type Output = Vec3<T>;

    /// Maps the vector `v` from space `F` to space `T`.
    ///
    /// Vectors are directions, not positions, so the translation component
    /// of `self` does not take part.
    fn apply(&self, v: &Vec3<F>) -> Vec3<T> {
        let [x, y, z] = v.0;
        let m = &self.0;
        [
            m[0][0] * x + m[0][1] * y + m[0][2] * z,
            m[1][0] * x + m[1][1] * y + m[1][2] * z,
            m[2][0] * x + m[2][1] * y + m[2][2] * z,
        ]
        .into()
    }
}

impl<F> Apply<Point3<F>> for ProjMat3<F> {
    type Output = ProjVec3;

    /// Projects the point `p` into the projective 4-space.
    fn apply(&self, p: &Point3<F>) -> ProjVec3 {
        let [x, y, z] = p.0;
        let m = &self.0;
        [
            m[0][0] * x + m[0][1] * y + m[0][2] * z + m[0][3],
            m[1][0] * x + m[1][1] * y + m[1][2] * z + m[1][3],
            m[2][0] * x + m[2][1] * y + m[2][2] * z + m[2][3],
            m[3][0] * x + m[3][1] * y + m[3][2] * z + m[3][3],
        ]
        .into()
    }
}

impl<M> ApproxEq<Self, f32> for Matrix<[[f32; 4]; 4], M> {
    fn approx_eq_eps(&self, other: &Self, eps: &f32) -> bool {
        self.0
            .iter()
            .zip(&other.0)
            .all(|(a, b)| a.approx_eq_eps(b, eps))
    }
    fn default_eps() -> f32 {
        f32::default_eps()
    }
}

//
// Foreign trait impls
//

// Manual impls of Copy, Clone, Eq, and PartialEq to avoid
// superfluous where M: Trait bound

impl<R: Copy, M> Copy for Matrix<R, M> {}

impl<R: Clone, M> Clone for Matrix<R, M> {
    fn clone(&self) -> Self {
        Self(self.0.clone(), Pd)
    }
}

impl<R: Default, M> Default for Matrix<R, M> {
    fn default() -> Self {
        Self(R::default(), Pd)
    }
}

impl<R: Debug, M: Debug + Default> Debug for Matrix<R, M> {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        write!(f, "Matrix<{:?}>", M::default())?;
        Debug::fmt(&self.0, f)
    }
}

impl<R: Eq, M> Eq for Matrix<R, M> {}

impl<R: PartialEq, M> PartialEq for Matrix<R, M> {
    fn eq(&self, other: &Self) -> bool {
        self.0 == other.0
    }
}

impl<const DIM: usize, F, T> Debug for RealToReal<DIM, F, T>
where
    F: Debug + Default,
    T: Debug + Default,
{
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        write!(f, "R{DIM}<{:?}>->R{DIM}<{:?}>", F::default(), T::default())
    }
}

impl<F: Debug + Default> Debug for RealToProj<F> {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        write!(f, "R3<{:?}>->Proj4", F::default())
    }
}

#[cfg(test)]
mod tests {
    use crate::assert_approx_eq;
    use crate::math::{pt2, pt3, vec3};

    use super::*;

    #[test]
    fn identity_maps_values_to_themselves() {
        let m = Mat4::identity();
        let p = pt3(1.0, -2.0, 3.0);
        let v = vec3(1.0, -2.0, 3.0);
        assert_eq!(m.apply(&p), p);
        assert_eq!(m.apply(&v), v);
    }

    #[test]
    fn translation_moves_points_but_not_vectors() {
        let m = translate(vec3(1.0, 2.0, 3.0));
        assert_eq!(m.apply(&pt3(1.0, 0.0, -1.0)), pt3(2.0, 2.0, 2.0));
        assert_eq!(m.apply(&vec3(1.0, 0.0, -1.0)), vec3(1.0, 0.0, -1.0));
    }

    #[test]
    fn scaling_a_point() {
        let m = scale(vec3(2.0, 0.5, -1.0));
        assert_eq!(m.apply(&pt3(1.0, 4.0, 3.0)), pt3(2.0, 2.0, -3.0));
    }

    #[test]
    fn composition_applies_self_first() {
        let t = translate(vec3(1.0, 0.0, 0.0));
        let s = scale(vec3(2.0, 2.0, 2.0));

        // Translate then scale
        assert_eq!(t.then(&s).apply(&pt3(0.0, 1.0, 0.0)), pt3(2.0, 2.0, 0.0));
        // Scale then translate
        assert_eq!(s.then(&t).apply(&pt3(0.0, 1.0, 0.0)), pt3(1.0, 2.0, 0.0));
    }

    #[test]
    fn composition_equals_applying_in_turn() {
        let t = translate(vec3(1.0, -2.0, 3.0));
        let s = scale(vec3(2.0, 0.5, -1.0));
        let p = pt3(0.5, 2.0, -1.5);
        assert_approx_eq!(t.then(&s).apply(&p), s.apply(&t.apply(&p)));
    }

    #[test]
    fn transpose_swaps_rows_and_columns() {
        let m: Mat4 = Matrix::new([
            [0.0, 1.0, 2.0, 3.0],
            [10.0, 11.0, 12.0, 13.0],
            [20.0, 21.0, 22.0, 23.0],
            [30.0, 31.0, 32.0, 33.0],
        ]);
        let t: Mat4 = m.transpose();
        assert_eq!(
            t,
            Matrix::new([
                [0.0, 10.0, 20.0, 30.0],
                [1.0, 11.0, 21.0, 31.0],
                [2.0, 12.0, 22.0, 32.0],
                [3.0, 13.0, 23.0, 33.0],
            ])
        );
    }

    #[test]
    fn from_linear_basis_vectors_become_columns() {
        let m = Mat4::from_linear(
            vec3(0.0, 1.0, 0.0),
            vec3(0.0, 0.0, 1.0),
            vec3(1.0, 0.0, 0.0),
        );
        assert_eq!(m.apply(&vec3(1.0, 0.0, 0.0)), vec3(0.0, 1.0, 0.0));
        assert_eq!(m.apply(&vec3(0.0, 1.0, 0.0)), vec3(0.0, 0.0, 1.0));
        assert_eq!(m.apply(&vec3(0.0, 0.0, 1.0)), vec3(1.0, 0.0, 0.0));
    }

    #[test]
    fn perspective_vertical_fov_scales_with_aspect() {
        let m: ProjMat3 = perspective(1.0, 16.0 / 9.0, 0.1..100.0);
        assert_eq!(m.0[1][1], m.0[0][0] * (16.0 / 9.0));

        let m: ProjMat3 = perspective(2.5, 0.75, 0.1..100.0);
        assert_eq!(m.0[1][1], m.0[0][0] * 0.75);
    }

    #[test]
    fn perspective_maps_near_and_far_to_unit_range() {
        let m: ProjMat3 = perspective(1.0, 1.0, 1.0..3.0);

        let near = m.apply(&pt3(0.0, 0.0, 1.0));
        assert_eq!(near.z() / near.w(), -1.0);

        let far = m.apply(&pt3(0.0, 0.0, 3.0));
        assert_eq!(far.z() / far.w(), 1.0);
    }

    #[test]
    fn perspective_w_equals_view_depth() {
        let m: ProjMat3 = perspective(1.0, 1.0, 0.1..100.0);
        assert_eq!(m.apply(&pt3(3.0, -4.0, 2.5)).w(), 2.5);
    }

    #[test]
    #[should_panic]
    fn perspective_rejects_nonpositive_near() {
        perspective::<()>(1.0, 1.0, 0.0..100.0);
    }

    #[test]
    fn viewport_maps_ndc_corners_and_flips_y() {
        let m = viewport(pt2(10, 20)..pt2(110, 220));

        // NDC top left maps to the top left of the bounds
        assert_eq!(m.apply(&pt3(-1.0, 1.0, 0.0)), pt3(10.0, 20.0, 0.0));
        // NDC bottom right maps to the bottom right of the bounds
        assert_eq!(m.apply(&pt3(1.0, -1.0, 0.0)), pt3(110.0, 220.0, 0.0));
        // z is passed through
        assert_eq!(m.apply(&pt3(0.0, 0.0, 0.5)), pt3(60.0, 120.0, 0.5));
    }
}
