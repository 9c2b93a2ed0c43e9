//! Affine and linear spaces, and tag types for labeling them.
//!
//! The vector, point, color, and matrix types in this crate carry a marker
//! type denoting the space the value belongs to. Type-level tagging makes it
//! a compile-time error to mix up values from unrelated spaces, for instance
//! to add a screen-space vector to a point in world space, even though the
//! representations of the values are identical.

use core::fmt::{Debug, Formatter};
use core::marker::PhantomData;

/// Trait for types representing elements of an affine space.
///
/// An affine space is a set of points such that the *difference* of two
/// points is well-defined, as is adding a difference to a point, but points
/// themselves cannot be added, negated, or scaled. Positions are affine:
/// the displacement between two positions is meaningful, but the sum of two
/// positions is not. The differences form a linear space, given by the
/// associated type [`Diff`][Self::Diff].
pub trait Affine: Sized {
    /// The space that `Self` is an element of.
    type Space;
    /// The type of the (signed) difference of two values of `Self`.
    ///
    /// `Diff` must have the same dimension as `Self`.
    type Diff: Linear;

    /// The dimension (number of components) of `Self`.
    const DIM: usize;

    /// Adds `diff` to `self` component-wise.
    fn add(&self, diff: &Self::Diff) -> Self;

    /// Subtracts `other` from `self`, returning the difference.
    ///
    /// `sub` is anti-commutative: `v.sub(w) == w.sub(v).neg()`.
    fn sub(&self, other: &Self) -> Self::Diff;
}

/// Trait for types representing elements of a linear space (vector space).
///
/// A `Linear` type is an `Affine` type that additionally satisfies:
///
/// * The difference type [`Diff`][Affine::Diff] is `Self`
/// * There is an additive identity, returned by [`zero`][Self::zero]
/// * Every value has an additive inverse, returned by [`neg`][Self::neg]
/// * Values can be multiplied by a [scalar][Self::Scalar].
///
/// Scalar multiplication distributes over addition and subtraction
/// (up to rounding errors):
/// ```
/// # use redfin_core::math::space::{Affine, Linear};
/// # let [v, w, a] = [1.0f32, 2.0, 4.0];
/// assert_eq!(v.mul(a).add(&w.mul(a)), v.add(&w).mul(a));
/// assert_eq!(v.mul(a).sub(&w.mul(a)), v.sub(&w).mul(a));
/// ```
pub trait Linear: Affine<Diff = Self> {
    /// The scalar type associated with `Self`.
    type Scalar: Sized;

    /// Returns the additive identity of `Self`.
    fn zero() -> Self;

    /// Returns the additive inverse of `self`.
    fn neg(&self) -> Self;

    /// Multiplies all components of `self` by `scalar`.
    fn mul(&self, scalar: Self::Scalar) -> Self;
}

/// Tag type for real vector spaces (Euclidean spaces) of dimension `DIM`.
///
/// The `Basis` parameter distinguishes spaces of the same dimension from
/// one another, such as model space from view space.
#[derive(Copy, Clone, Default, Eq, PartialEq)]
pub struct Real<const DIM: usize, Basis = ()>(PhantomData<Basis>);

/// Tag type for the projective 4-space over the reals, 𝗣<sub>4</sub>(ℝ).
///
/// The homogeneous coordinates of this space make perspective projection
/// expressible as a linear transform. Clipping is also done in projective
/// space, before the perspective divide.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub struct Proj4;

impl<const DIM: usize, B: Debug + Default> Debug for Real<DIM, B> {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        write!(f, "R{}<{:?}>", DIM, B::default())
    }
}

macro_rules! impl_affine_linear {
    ($($sc:ty)+) => { $(
        impl Affine for $sc {
            type Space = ();
            type Diff = Self;
            const DIM: usize = 1;

            #[inline]
            fn add(&self, other: &Self) -> Self {
                self + other
            }
            #[inline]
            fn sub(&self, other: &Self) -> Self {
                self - other
            }
        }
        impl Linear for $sc {
            type Scalar = Self;

            #[inline]
            fn zero() -> Self {
                0 as $sc
            }
            #[inline]
            fn neg(&self) -> Self {
                -*self
            }
            #[inline]
            fn mul(&self, scalar: Self) -> Self {
                self * scalar
            }
        }
    )+ };
}

impl_affine_linear!(f32 i32);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn f32_affine() {
        assert_eq!(2.0.add(&3.0), 5.0);
        assert_eq!(2.0.sub(&3.0), -1.0);
        assert_eq!(3.0.sub(&2.0), 2.0.sub(&3.0).neg());
    }

    #[test]
    fn i32_linear() {
        assert_eq!(i32::zero(), 0);
        assert_eq!(2.mul(-3), -6);
        assert_eq!(2.neg(), -2);
    }

    #[test]
    fn real_debug() {
        assert_eq!(alloc::format!("{:?}", Real::<2>::default()), "R2<()>");
        assert_eq!(alloc::format!("{:?}", Real::<3>::default()), "R3<()>");
    }
}
