//! Vectors in affine and projective spaces.
//!
//! Vectors are tagged with the space they are embedded in, so that vectors
//! in unrelated spaces, a model-space direction and a screen-space offset
//! for instance, cannot be combined without an explicit transformation.

use core::{
    array,
    fmt::{Debug, Formatter},
    marker::PhantomData as Pd,
    ops::{
        Add, AddAssign, Div, DivAssign, Index, Mul, MulAssign, Neg, Sub,
        SubAssign,
    },
};

use crate::math::{
    approx::ApproxEq,
    point::Point,
    space::{Affine, Linear, Proj4, Real},
};

/// A generic vector type. Represents an element of a vector space or a
/// module, a generalization of a vector space where the scalars can be
/// integers (technically, the scalar type can be any *ring*).
///
/// # Type parameters
/// * `Repr`: Representation of the components of the vector, typically an
///   array such as `[f32; 3]`.
/// * `Space`: The space that the vector is an element of. A tag type used
///   to prevent mixing up vectors in different spaces.
#[repr(transparent)]
pub struct Vector<Repr, Space = ()>(pub Repr, Pd<Space>);

/// A 2-vector with `f32` components.
pub type Vec2<Basis = ()> = Vector<[f32; 2], Real<2, Basis>>;
/// A 3-vector with `f32` components.
pub type Vec3<Basis = ()> = Vector<[f32; 3], Real<3, Basis>>;

/// A 2-vector with `i32` components.
pub type Vec2i<Basis = ()> = Vector<[i32; 2], Real<2, Basis>>;
/// A 2-vector with `u32` components.
pub type Vec2u<Basis = ()> = Vector<[u32; 2], Real<2, Basis>>;

/// A vector in the projective 4-space over the reals, with `f32` components.
/// Used to represent homogeneous coordinates in clip space.
pub type ProjVec3 = Vector<[f32; 4], Proj4>;

/// Returns a real 2-vector with `x` and `y` components.
pub const fn vec2<Sc, B>(x: Sc, y: Sc) -> Vector<[Sc; 2], Real<2, B>> {
    Vector([x, y], Pd)
}
/// Returns a real 3-vector with `x`, `y`, and `z` components.
pub const fn vec3<Sc, B>(x: Sc, y: Sc, z: Sc) -> Vector<[Sc; 3], Real<3, B>> {
    Vector([x, y, z], Pd)
}

//
// Inherent impls
//

impl<R, Sp> Vector<R, Sp> {
    /// Returns a new vector with representation `repr`.
    #[inline]
    pub const fn new(repr: R) -> Self {
        Self(repr, Pd)
    }

    /// Returns a vector with value equal to `self` but in space `S`.
    ///
    /// This method can be used to coerce a vector from one space to another
    /// in the rare cases where this is needed, for example, to cast away the
    /// basis of a typed direction before passing it to a generic transform.
    #[inline]
    pub fn to<S>(self) -> Vector<R, S> {
        Vector(self.0, Pd)
    }

    /// Returns the point at the offset `self` from the origin.
    #[inline]
    pub fn to_pt(self) -> Point<R, Sp> {
        Point::new(self.0)
    }
}

impl<const N: usize, B> Vector<[f32; N], Real<N, B>> {
    /// Returns the length (magnitude) of `self`.
    #[cfg(feature = "fp")]
    #[inline]
    pub fn len(&self) -> f32 {
        crate::math::float::f32::sqrt(self.len_sqr())
    }

    /// Returns the square of the length of `self`.
    ///
    /// Faster to compute than [`len`][Self::len], and available even
    /// without the `fp` feature.
    #[inline]
    pub fn len_sqr(&self) -> f32 {
        self.dot(self)
    }

    /// Returns `self` scaled to unit length.
    ///
    /// The result is unspecified if `self` is the zero vector.
    #[cfg(feature = "fp")]
    #[inline]
    pub fn normalize(&self) -> Self {
        self.mul(self.len().recip())
    }

    /// Returns the dot product of `self` and `other`.
    #[inline]
    pub fn dot(&self, other: &Self) -> f32 {
        let mut res = 0.0;
        for i in 0..N {
            res += self.0[i] * other.0[i];
        }
        res
    }
}

impl<R, Sc, B> Vector<R, Real<2, B>>
where
    R: Index<usize, Output = Sc>,
    Sc: Copy,
{
    /// Returns the x component of `self`.
    #[inline]
    pub fn x(&self) -> Sc {
        self.0[0]
    }
    /// Returns the y component of `self`.
    #[inline]
    pub fn y(&self) -> Sc {
        self.0[1]
    }
}

impl<R, Sc, B> Vector<R, Real<3, B>>
where
    R: Index<usize, Output = Sc>,
    Sc: Copy,
{
    /// Returns the x component of `self`.
    #[inline]
    pub fn x(&self) -> Sc {
        self.0[0]
    }
    /// Returns the y component of `self`.
    #[inline]
    pub fn y(&self) -> Sc {
        self.0[1]
    }
    /// Returns the z component of `self`.
    #[inline]
    pub fn z(&self) -> Sc {
        self.0[2]
    }
}

impl<B> Vector<[f32; 3], Real<3, B>> {
    /// Unit vector codirectional with the positive x-axis.
    pub const X: Self = vec3(1.0, 0.0, 0.0);
    /// Unit vector codirectional with the positive y-axis.
    pub const Y: Self = vec3(0.0, 1.0, 0.0);
    /// Unit vector codirectional with the positive z-axis.
    pub const Z: Self = vec3(0.0, 0.0, 1.0);
}

impl<Sc, B> Vector<[Sc; 3], Real<3, B>>
where
    Sc: Copy + Mul<Output = Sc> + Sub<Output = Sc>,
{
    /// Returns the cross product of `self` and `other`.
    ///
    /// The result is orthogonal to both input vectors, with length equal
    /// to the area of the parallelogram spanned by them.
    pub fn cross(&self, other: &Self) -> Self {
        let x = self.0[1] * other.0[2] - self.0[2] * other.0[1];
        let y = self.0[2] * other.0[0] - self.0[0] * other.0[2];
        let z = self.0[0] * other.0[1] - self.0[1] * other.0[0];
        [x, y, z].into()
    }
}

impl ProjVec3 {
    /// Returns the x component of `self`.
    #[inline]
    pub fn x(&self) -> f32 {
        self.0[0]
    }
    /// Returns the y component of `self`.
    #[inline]
    pub fn y(&self) -> f32 {
        self.0[1]
    }
    /// Returns the z component of `self`.
    #[inline]
    pub fn z(&self) -> f32 {
        self.0[2]
    }
    /// Returns the w component of `self`.
    #[inline]
    pub fn w(&self) -> f32 {
        self.0[3]
    }

    /// Returns the dot product of `self` and `other`.
    #[inline]
    pub fn dot(&self, other: &Self) -> f32 {
        let mut res = 0.0;
        for i in 0..4 {
            res += self.0[i] * other.0[i];
        }
        res
    }
}

//
// Local trait impls
//

impl<Sc, Sp, const N: usize> Affine for Vector<[Sc; N], Sp>
where
    Sc: Linear<Scalar = Sc> + Copy,
{
    type Space = Sp;
    type Diff = Self;
    const DIM: usize = N;

    #[inline]
    fn add(&self, other: &Self) -> Self {
        Self(array::from_fn(|i| self.0[i].add(&other.0[i])), Pd)
    }
    #[inline]
    fn sub(&self, other: &Self) -> Self {
        Self(array::from_fn(|i| self.0[i].sub(&other.0[i])), Pd)
    }
}

impl<Sc, Sp, const N: usize> Linear for Vector<[Sc; N], Sp>
where
    Sc: Linear<Scalar = Sc> + Copy,
{
    type Scalar = Sc;

    #[inline]
    fn zero() -> Self {
        Self(array::from_fn(|_| Sc::zero()), Pd)
    }
    #[inline]
    fn neg(&self) -> Self {
        Self(array::from_fn(|i| self.0[i].neg()), Pd)
    }
    #[inline]
    fn mul(&self, scalar: Sc) -> Self {
        Self(array::from_fn(|i| self.0[i].mul(scalar)), Pd)
    }
}

impl<Sc: ApproxEq, Sp, const N: usize> ApproxEq<Self, Sc>
    for Vector<[Sc; N], Sp>
{
    fn approx_eq_eps(&self, other: &Self, eps: &Sc) -> bool {
        self.0.approx_eq_eps(&other.0, eps)
    }
    fn default_eps() -> Sc {
        Sc::default_eps()
    }
}

//
// Foreign trait impls
//

// Manual impls of Copy, Clone, Eq, and PartialEq to avoid
// superfluous where S: Trait bound

impl<R: Copy, S> Copy for Vector<R, S> {}

impl<R: Clone, S> Clone for Vector<R, S> {
    fn clone(&self) -> Self {
        Self(self.0.clone(), Pd)
    }
}

impl<R: Default, S> Default for Vector<R, S> {
    fn default() -> Self {
        Self(R::default(), Pd)
    }
}

impl<R: Debug, Sp: Debug + Default> Debug for Vector<R, Sp> {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        write!(f, "Vec<{:?}>", Sp::default())?;
        Debug::fmt(&self.0, f)
    }
}

impl<R: Eq, S> Eq for Vector<R, S> {}

impl<R: PartialEq, S> PartialEq for Vector<R, S> {
    fn eq(&self, other: &Self) -> bool {
        self.0 == other.0
    }
}

impl<R, Sp> From<R> for Vector<R, Sp> {
    #[inline]
    fn from(repr: R) -> Self {
        Self(repr, Pd)
    }
}

impl<Sc, Sp, const N: usize> Index<usize> for Vector<[Sc; N], Sp> {
    type Output = Sc;
    #[inline]
    fn index(&self, i: usize) -> &Sc {
        &self.0[i]
    }
}

impl<R, Sp> Neg for Vector<R, Sp>
where
    Self: Linear,
{
    type Output = Self;
    #[inline]
    fn neg(self) -> Self {
        Linear::neg(&self)
    }
}

impl<R, Sp> AddAssign for Vector<R, Sp>
where
    Self: Linear,
{
    #[inline]
    fn add_assign(&mut self, rhs: Self) {
        *self = Affine::add(self, &rhs);
    }
}

impl<R, Sp> SubAssign for Vector<R, Sp>
where
    Self: Linear,
{
    #[inline]
    fn sub_assign(&mut self, rhs: Self) {
        *self = Affine::sub(self, &rhs);
    }
}

impl<R, Sp> MulAssign<f32> for Vector<R, Sp>
where
    Self: Linear<Scalar = f32>,
{
    #[inline]
    fn mul_assign(&mut self, rhs: f32) {
        *self = Linear::mul(self, rhs);
    }
}

impl<R, Sp> DivAssign<f32> for Vector<R, Sp>
where
    Self: Linear<Scalar = f32>,
{
    #[inline]
    fn div_assign(&mut self, rhs: f32) {
        *self = Linear::mul(self, rhs.recip());
    }
}

impl_op!(Add::add, Vector, Self, +=);
impl_op!(Sub::sub, Vector, Self, -=);
impl_op!(Mul::mul, Vector, f32, *=, bound = Linear<Scalar = f32>);
impl_op!(Div::div, Vector, f32, /=, bound = Linear<Scalar = f32>);

#[cfg(test)]
mod tests {
    use crate::assert_approx_eq;

    use super::*;

    mod f32 {
        use super::*;

        #[cfg(feature = "fp")]
        #[test]
        fn length() {
            let v: Vec2 = vec2(3.0, 4.0);
            assert_eq!(v.len(), 5.0);
            assert_eq!(v.len_sqr(), 25.0);
        }

        #[cfg(feature = "fp")]
        #[test]
        fn normalization() {
            let v: Vec3 = vec3(2.0, -2.0, 1.0);
            assert_approx_eq!(v.normalize().len(), 1.0, eps = 1e-3);
        }

        #[test]
        fn vector_addition() {
            let v: Vec2 = vec2(1.0, 2.0);
            assert_eq!(v + vec2(-2.0, 1.0), vec2(-1.0, 3.0));

            let v: Vec3 = vec3(1.0, 2.0, 0.0);
            assert_eq!(v + vec3(-2.0, 1.0, -1.0), vec3(-1.0, 3.0, -1.0));
        }

        #[test]
        fn vector_subtraction() {
            let v: Vec3 = vec3(1.0, 2.0, 0.0);
            assert_eq!(v - vec3(-2.0, 1.0, -1.0), vec3(3.0, 1.0, 1.0));
        }

        #[test]
        fn scalar_multiplication() {
            let v: Vec3 = vec3(1.0, -2.0, 3.0);
            assert_eq!(v * 3.0, vec3(3.0, -6.0, 9.0));
            assert_eq!(v * 0.0, vec3(0.0, 0.0, 0.0));
        }

        #[test]
        fn scalar_division() {
            let v: Vec2 = vec2(1.0, -2.0);
            assert_eq!(v / 0.5, vec2(2.0, -4.0));
        }

        #[test]
        fn negation() {
            let v: Vec2 = vec2(1.0, -2.0);
            assert_eq!(-v, vec2(-1.0, 2.0));
        }

        #[test]
        fn from_array() {
            assert_eq!(Vec2::from([1.0, -2.0]), vec2(1.0, -2.0));
            assert_eq!(Vec3::from([1.0, -2.0, 4.0]), vec3(1.0, -2.0, 4.0));
        }
    }

    mod i32 {
        use super::*;

        #[test]
        fn vector_addition() {
            let v: Vec2i = vec2(1, -2);
            assert_eq!(v + vec2(-2, 1), vec2(-1, -1));
        }

        #[test]
        fn from_array() {
            assert_eq!(Vec2i::from([1, -2]), vec2(1, -2));
        }
    }

    #[test]
    fn dot_product() {
        let v: Vec2 = vec2(0.5, 0.5);
        assert_eq!(v.dot(&vec2(-2.0, 2.0)), 0.0);
        assert_eq!(v.dot(&vec2(-4.0, -4.0)), -4.0);
        let w: Vec2 = vec2(3.0, 1.0);
        assert_eq!(w.dot(&w), 10.0);
    }

    #[test]
    fn cross_product() {
        let x: Vec3 = vec3(1.0, 0.0, 0.0);
        let y: Vec3 = vec3(0.0, 1.0, 0.0);
        let z: Vec3 = vec3(0.0, 0.0, 1.0);
        assert_eq!(x.cross(&y), z);
        assert_eq!(z.cross(&y), -x);
    }

    #[test]
    fn projective_components() {
        let v = ProjVec3::new([1.0, -2.0, 3.0, 4.0]);
        assert_eq!(v.x(), 1.0);
        assert_eq!(v.y(), -2.0);
        assert_eq!(v.z(), 3.0);
        assert_eq!(v.w(), 4.0);
    }

    #[test]
    fn debug() {
        let v: Vec2 = vec2(1.0, -2.0);
        assert_eq!(alloc::format!("{v:?}"), "Vec<R2<()>>[1.0, -2.0]");
        let v: Vec3 = vec3(1.0, -2.0, 3.0);
        assert_eq!(alloc::format!("{v:?}"), "Vec<R3<()>>[1.0, -2.0, 3.0]");
    }
}
