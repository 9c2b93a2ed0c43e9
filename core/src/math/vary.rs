//! Varyings: values that can be interpolated across a polygon's face.

use core::mem;

use crate::math::Lerp;
use crate::math::point::Point;
use crate::math::space::{Affine, Linear};
use crate::math::vec::Vector;

/// A trait for types that can be linearly interpolated and distributed
/// between two endpoints.
///
/// This trait is especially designed for *varyings:* types that are
/// meant to be interpolated across the face of a polygon when rendering,
/// but the methods are of course useful for a multitude of purposes.
pub trait Vary: Lerp + ZDiv + Sized + Clone {
    /// The iterator returned by the [vary][Self::vary] method.
    type Iter: Iterator<Item = Self>;
    /// The difference type of `Self`.
    type Diff: Clone;

    /// Returns an iterator that yields values such that the first value
    /// equals `self`, and each subsequent value is offset by `step` from its
    /// predecessor using the [step][Self::step] method. If `max` is `Some(n)`,
    /// stops after `n` steps, otherwise infinite.
    ///
    /// # Examples
    /// ```
    /// # use redfin_core::math::vary::Vary;
    /// let mut iter = 0.0f32.vary(0.2, Some(5));
    /// assert_eq!(iter.next(), Some(0.0));
    /// assert_eq!(iter.next(), Some(0.2));
    /// assert_eq!(iter.next(), Some(0.4));
    /// assert_eq!(iter.next(), Some(0.6));
    /// assert_eq!(iter.next(), Some(0.8));
    /// assert_eq!(iter.next(), None);
    /// ```
    fn vary(self, step: Self::Diff, max: Option<u32>) -> Self::Iter;

    /// Returns an iterator that yields `n` values evenly distributed
    /// between `self` and `other`, inclusive of both endpoints.
    ///
    /// # Examples
    /// ```
    /// # use redfin_core::math::vary::Vary;
    /// let vals: Vec<_> = 0.0f32.vary_to(1.0, 5).collect();
    /// assert_eq!(vals, [0.0, 0.25, 0.5, 0.75, 1.0]);
    /// ```
    fn vary_to(self, other: Self, n: u32) -> Self::Iter {
        let step = self.dv_dt(&other, ((n.max(2) - 1) as f32).recip());
        self.vary(step, Some(n))
    }

    /// Returns the difference between `other` and `self` scaled by
    /// `recip_dt`. Equal to the average rate of change between `self`
    /// and `other` over a time interval of `1.0 / recip_dt`.
    fn dv_dt(&self, other: &Self, recip_dt: f32) -> Self::Diff;

    /// Returns the result of offsetting `self` by `delta`.
    /// For normal arithmetic types this is simply addition.
    fn step(&self, delta: &Self::Diff) -> Self;
}

/// A trait for values that can be divided by a depth coordinate.
///
/// Used to implement perspective-correct interpolation: varyings are
/// divided by the depth of the corresponding vertex before screen-space
/// interpolation, and the reciprocal division is applied fragment by
/// fragment to recover the perspective-correct value.
///
/// The default implementation is a no-op, suitable for values that are
/// not perspective-dependent, such as screen-space coordinates.
pub trait ZDiv: Sized {
    #[inline]
    fn z_div(self, _z: f32) -> Self {
        self
    }
}

/// The iterator type returned by the [`Vary::vary`] method.
#[derive(Clone)]
pub struct Iter<T: Vary> {
    pub val: T,
    pub step: T::Diff,
    pub n: Option<u32>,
}

//
// Local trait impls
//

impl Vary for () {
    type Iter = Iter<()>;
    type Diff = ();

    fn vary(self, _: (), max: Option<u32>) -> Self::Iter {
        Iter { val: (), step: (), n: max }
    }
    fn dv_dt(&self, _: &Self, _: f32) {}
    fn step(&self, _: &Self::Diff) {}
}
impl ZDiv for () {}

impl Vary for f32 {
    type Iter = Iter<Self>;
    type Diff = Self;

    fn vary(self, step: Self::Diff, max: Option<u32>) -> Self::Iter {
        Iter { val: self, step, n: max }
    }
    #[inline]
    fn dv_dt(&self, other: &Self, recip_dt: f32) -> Self::Diff {
        (other - self) * recip_dt
    }
    #[inline]
    fn step(&self, delta: &Self::Diff) -> Self {
        self + delta
    }
}
impl ZDiv for f32 {
    #[inline]
    fn z_div(self, z: f32) -> Self {
        self / z
    }
}

impl<Sp, const N: usize> Vary for Vector<[f32; N], Sp> {
    type Iter = Iter<Self>;
    type Diff = Self;

    fn vary(self, step: Self::Diff, max: Option<u32>) -> Self::Iter {
        Iter { val: self, step, n: max }
    }
    #[inline]
    fn dv_dt(&self, other: &Self, recip_dt: f32) -> Self::Diff {
        other.sub(self).mul(recip_dt)
    }
    #[inline]
    fn step(&self, delta: &Self::Diff) -> Self {
        self.add(delta)
    }
}
impl<Sp, const N: usize> ZDiv for Vector<[f32; N], Sp> {
    #[inline]
    fn z_div(self, z: f32) -> Self {
        self.mul(z.recip())
    }
}

impl<Sp, const N: usize> Vary for Point<[f32; N], Sp> {
    type Iter = Iter<Self>;
    type Diff = Vector<[f32; N], Sp>;

    fn vary(self, step: Self::Diff, max: Option<u32>) -> Self::Iter {
        Iter { val: self, step, n: max }
    }
    #[inline]
    fn dv_dt(&self, other: &Self, recip_dt: f32) -> Self::Diff {
        other.sub(self).mul(recip_dt)
    }
    #[inline]
    fn step(&self, delta: &Self::Diff) -> Self {
        self.add(delta)
    }
}
// Screen-space positions are already divided by depth
impl<Sp, const N: usize> ZDiv for Point<[f32; N], Sp> {}

impl<T: Vary, U: Vary> Vary for (T, U) {
    type Iter = Iter<Self>;
    type Diff = (T::Diff, U::Diff);

    fn vary(self, step: Self::Diff, max: Option<u32>) -> Self::Iter {
        Iter { val: self, step, n: max }
    }
    #[inline]
    fn dv_dt(&self, (u, v): &Self, recip_dt: f32) -> Self::Diff {
        (self.0.dv_dt(u, recip_dt), self.1.dv_dt(v, recip_dt))
    }
    #[inline]
    fn step(&self, (du, dv): &Self::Diff) -> Self {
        (self.0.step(du), self.1.step(dv))
    }
}
impl<T: ZDiv, U: ZDiv> ZDiv for (T, U) {
    #[inline]
    fn z_div(self, z: f32) -> Self {
        (self.0.z_div(z), self.1.z_div(z))
    }
}

//
// Foreign trait impls
//

impl<T: Vary> Iterator for Iter<T> {
    type Item = T;

    #[inline]
    fn next(&mut self) -> Option<T> {
        match &mut self.n {
            Some(0) => return None,
            Some(n) => *n -= 1,
            None => (),
        }
        let new = self.val.step(&self.step);
        Some(mem::replace(&mut self.val, new))
    }
}

#[cfg(test)]
mod tests {
    use alloc::vec::Vec;

    use crate::assert_approx_eq;
    use crate::math::vec::{Vec2, vec2};

    use super::*;

    #[test]
    fn vary_f32() {
        let varying = (-6.0f32).vary(1.2, Some(10));
        assert_approx_eq!(
            varying.collect::<Vec<_>>()[..],
            [-6.0, -4.8, -3.6, -2.4, -1.2, 0.0, 1.2, 2.4, 3.6, 4.8]
        );
    }

    #[test]
    fn vary_to_is_inclusive() {
        let varying = 0.0f32.vary_to(8.0, 5);
        assert_approx_eq!(
            varying.collect::<Vec<_>>()[..],
            [0.0, 2.0, 4.0, 6.0, 8.0]
        );
    }

    #[test]
    fn vary_vec2() {
        let a: Vec2 = vec2(0.0, 0.0);
        let b = vec2(3.0, -3.0);
        let vals: Vec<_> = a.vary_to(b, 4).collect();
        assert_approx_eq!(vals[1], vec2(1.0, -1.0));
        assert_approx_eq!(vals[3], b);
    }

    #[test]
    fn vary_pair() {
        let mut iter = (0.0f32, 10.0f32).vary((1.0, -1.0), None);
        assert_eq!(iter.next(), Some((0.0, 10.0)));
        assert_eq!(iter.next(), Some((1.0, 9.0)));
        assert_eq!(iter.next(), Some((2.0, 8.0)));
    }

    #[test]
    fn z_div() {
        assert_eq!(4.0f32.z_div(2.0), 2.0);
        assert_eq!(vec2::<f32, ()>(2.0, 4.0).z_div(2.0), vec2(1.0, 2.0));
    }
}
