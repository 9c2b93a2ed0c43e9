//! Points, the positional counterparts of vectors.
//!
//! A point denotes a location, a vector a displacement. The only arithmetic
//! defined between points is the affine kind: subtracting two points gives
//! the vector between them, and adding a vector to a point moves it. Scaling
//! or adding points directly is a type error, which rules out a family of
//! bugs where positions and directions get mixed up.

use core::fmt::{Debug, Formatter};
use core::marker::PhantomData as Pd;
use core::ops::{Add, Index, Sub};

use crate::math::approx::ApproxEq;
use crate::math::space::{Affine, Linear, Real};
use crate::math::vec::Vector;

/// A location in the space `Space`, stored as `Repr`.
#[repr(transparent)]
pub struct Point<Repr, Space = ()>(pub Repr, Pd<Space>);

/// A point in the plane, with `f32` components.
pub type Point2<Basis = ()> = Point<[f32; 2], Real<2, Basis>>;
/// A point in 3-space, with `f32` components.
pub type Point3<Basis = ()> = Point<[f32; 3], Real<3, Basis>>;
/// A point with `u32` components, used for pixel coordinates.
pub type Point2u<Basis = ()> = Point<[u32; 2], Real<2, Basis>>;

/// Returns a real 2-point with the given components.
pub const fn pt2<Sc, B>(x: Sc, y: Sc) -> Point<[Sc; 2], Real<2, B>> {
    Point([x, y], Pd)
}

/// Returns a real 3-point with the given components.
pub const fn pt3<Sc, B>(x: Sc, y: Sc, z: Sc) -> Point<[Sc; 3], Real<3, B>> {
    Point([x, y, z], Pd)
}

//
// Inherent impls
//

impl<R, Sp> Point<R, Sp> {
    /// Returns a point wrapping `repr`.
    #[inline]
    pub const fn new(repr: R) -> Self {
        Self(repr, Pd)
    }

    /// Returns the origin of the space, with every component zero.
    #[inline]
    pub fn origin() -> Self
    where
        R: Default,
    {
        Self::new(R::default())
    }

    /// Returns the displacement of `self` from the origin.
    #[inline]
    pub fn to_vec(self) -> Vector<R, Sp> {
        Vector::new(self.0)
    }

    /// Reinterprets `self` as a point of the space `S`.
    ///
    /// An escape hatch for when a value is known to be in a given space but
    /// the type system cannot deduce it, such as after applying a transform
    /// expressed in untyped coordinates.
    #[inline]
    pub fn to<S>(self) -> Point<R, S> {
        Point::new(self.0)
    }
}

impl<R, Sc, B> Point<R, Real<2, B>>
where
    Sc: Copy,
    R: Index<usize, Output = Sc>,
{
    /// The x component of `self`.
    #[inline]
    pub fn x(&self) -> Sc {
        self.0[0]
    }
    /// The y component of `self`.
    #[inline]
    pub fn y(&self) -> Sc {
        self.0[1]
    }
}

impl<R, Sc, B> Point<R, Real<3, B>>
where
    Sc: Copy,
    R: Index<usize, Output = Sc>,
{
    /// The x component of `self`.
    #[inline]
    pub fn x(&self) -> Sc {
        self.0[0]
    }
    /// The y component of `self`.
    #[inline]
    pub fn y(&self) -> Sc {
        self.0[1]
    }
    /// The z component of `self`.
    #[inline]
    pub fn z(&self) -> Sc {
        self.0[2]
    }
}

//
// Local trait impls
//

impl<Sc, Sp, const N: usize> Affine for Point<[Sc; N], Sp>
where
    Sc: Linear<Scalar = Sc> + Copy,
{
    type Space = Sp;
    type Diff = Vector<[Sc; N], Sp>;
    const DIM: usize = N;

    #[inline]
    fn add(&self, delta: &Self::Diff) -> Self {
        let mut repr = self.0;
        for (c, d) in repr.iter_mut().zip(&delta.0) {
            *c = c.add(d);
        }
        Self::new(repr)
    }
    #[inline]
    fn sub(&self, other: &Self) -> Self::Diff {
        let mut repr = self.0;
        for (c, o) in repr.iter_mut().zip(&other.0) {
            *c = c.sub(o);
        }
        Vector::new(repr)
    }
}

impl<Sc: ApproxEq, Sp, const N: usize> ApproxEq<Self, Sc>
    for Point<[Sc; N], Sp>
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

// Implemented by hand so the space tag needs no trait bounds of its own

impl<R: Copy, S> Copy for Point<R, S> {}

impl<R: Clone, S> Clone for Point<R, S> {
    fn clone(&self) -> Self {
        Self::new(self.0.clone())
    }
}

impl<R: Default, S> Default for Point<R, S> {
    fn default() -> Self {
        Self::new(R::default())
    }
}

impl<R: Eq, S> Eq for Point<R, S> {}

impl<R: PartialEq, S> PartialEq for Point<R, S> {
    fn eq(&self, other: &Self) -> bool {
        self.0 == other.0
    }
}

impl<R: Debug, Sp: Debug + Default> Debug for Point<R, Sp> {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        write!(f, "Point<{:?}>{:?}", Sp::default(), self.0)
    }
}

impl<R, Sp> From<R> for Point<R, Sp> {
    #[inline]
    fn from(repr: R) -> Self {
        Self::new(repr)
    }
}

impl<R, Sp> Add<<Self as Affine>::Diff> for Point<R, Sp>
where
    Self: Affine,
{
    type Output = Self;

    fn add(self, delta: <Self as Affine>::Diff) -> Self {
        Affine::add(&self, &delta)
    }
}

impl<R, Sp> Sub for Point<R, Sp>
where
    Self: Affine,
{
    type Output = <Self as Affine>::Diff;

    fn sub(self, rhs: Self) -> Self::Output {
        Affine::sub(&self, &rhs)
    }
}
