//! Strongly typed mathematical primitives.
//!
//! Home of the [vector][vec], [point], [matrix][mat], [color] and
//! [angle][self::angle] types, along with [approximate equality][approx]
//! comparisons and the [interpolation][Lerp] machinery used by the render
//! pipeline.
//!
//! Unlike in many general-purpose math libraries, values here are branded
//! with the coordinate space they inhabit. A vector in model space and a
//! vector in view space have different types, and a matrix maps from one
//! specific space to another. Mixing up spaces, or applying a transform to
//! a value it was not meant for, is then a type error rather than a visual
//! glitch hunted down at runtime. Angles likewise carry no implicit unit;
//! conversions between radians, degrees, and turns are always explicit.

/// Implements an operator trait by delegating to its op-assign form.
macro_rules! impl_op {
    ($tr:ident :: $f:ident, $ty:ident, $rhs:ty, $op:tt) => {
        impl_op!($tr::$f, $ty, $rhs, $op, bound=Linear);
    };
    ($tr:ident :: $f:ident, $ty:ident, $rhs:ty, $op:tt, bound=$req:path) => {
        impl<R, Sp> $tr<$rhs> for $ty<R, Sp>
        where
            Self: $req,
        {
            type Output = Self;
            #[inline]
            fn $f(mut self, rhs: $rhs) -> Self {
                self $op rhs;
                self
            }
        }
    };
}

pub mod angle;
pub mod approx;
pub mod color;
pub mod float;
pub mod mat;
pub mod point;
pub mod space;
pub mod vary;
pub mod vec;

pub use angle::{Angle, degs, rads, turns};
pub use approx::ApproxEq;
pub use color::{Color, Color4, Color4f, rgba};
pub use mat::{
    Apply, Mat4, Matrix, ProjMat3, perspective, scale, translate, viewport,
};
pub use point::{Point, Point2, Point2u, Point3, pt2, pt3};
pub use space::{Affine, Linear};
pub use vary::{Vary, ZDiv};
pub use vec::{ProjVec3, Vec2, Vec2i, Vec2u, Vec3, Vector, vec2, vec3};

/// Linear interpolation between two values.
pub trait Lerp: Sized {
    /// Returns the affine combination
    /// ```text
    /// self * (1 - t) + other * t
    /// ```
    ///
    /// The endpoints are exact: `t` = 0 yields a copy of `self` and
    /// `t` = 1 a copy of `other`. A `t` outside 0..=1 extrapolates past the
    /// endpoints. The result is unspecified, but the method does not panic,
    /// if `t` is `NaN`.
    ///
    /// # Examples
    /// ```
    /// use redfin_core::math::Lerp;
    ///
    /// assert_eq!(0.0f32.lerp(&8.0, 0.75), 6.0);
    /// ```
    fn lerp(&self, other: &Self, t: f32) -> Self;

    /// Returns the value halfway between `self` and `other`.
    ///
    /// # Examples
    /// ```
    /// use redfin_core::math::{Lerp, Point3, pt3};
    ///
    /// let a: Point3 = pt3(0.0, 4.0, -2.0);
    /// assert_eq!(a.midpoint(&pt3(2.0, 0.0, 0.0)), pt3(1.0, 2.0, -1.0));
    /// ```
    fn midpoint(&self, other: &Self) -> Self {
        self.lerp(other, 0.5)
    }
}

impl<T> Lerp for T
where
    T: Affine<Diff: Linear<Scalar = f32>>,
{
    /// Interpolates by offsetting `self` with a scaled difference:
    /// ```text
    /// self + (other - self) * t
    /// ```
    ///
    /// # Examples
    /// ```
    /// use redfin_core::math::{Lerp, Vec2, vec2};
    ///
    /// let v: Vec2 = vec2(1.0, 0.0);
    /// assert_eq!(v.lerp(&vec2(3.0, -4.0), 0.5), vec2(2.0, -2.0));
    /// ```
    fn lerp(&self, other: &Self, t: f32) -> Self {
        self.add(&other.sub(self).mul(t))
    }
}

/// The no-op interpolation of attributeless vertices.
impl Lerp for () {
    fn lerp(&self, _: &Self, _: f32) {}
}

/// Pairs of interpolees interpolate componentwise.
impl<U: Lerp, V: Lerp> Lerp for (U, V) {
    fn lerp(&self, other: &Self, t: f32) -> Self {
        (self.0.lerp(&other.0, t), self.1.lerp(&other.1, t))
    }
}
