//! Angles as a distinct scalar type.

use core::f32::consts::{PI, TAU};
use core::fmt;
use core::ops::{Add, Div, Mul, Neg, Sub};

use crate::math::approx::ApproxEq;

#[cfg(feature = "fp")]
use crate::math::float::f32 as fp;

/// An angular quantity with the unit abstracted away.
///
/// A plain `f32` angle parameter invites passing degrees where radians are
/// expected. `Angle` closes that hole: values are created with [`rads`],
/// [`degs`], or [`turns`] and read back with the matching `to_*` method, so
/// the unit is always spelled out at both ends.
#[derive(Copy, Clone, Default, PartialEq)]
#[repr(transparent)]
pub struct Angle(f32);

/// One full turn is 2π radians, or 360 degrees.
const DEG: f32 = PI / 180.0;
const TURN: f32 = TAU;

/// Returns an angle measuring `a` radians.
pub const fn rads(a: f32) -> Angle {
    Angle(a)
}

/// Returns an angle measuring `a` degrees.
pub const fn degs(a: f32) -> Angle {
    Angle(a * DEG)
}

/// Returns an angle measuring `a` full turns.
pub const fn turns(a: f32) -> Angle {
    Angle(a * TURN)
}

impl Angle {
    /// Returns the measure of `self` in radians.
    pub const fn to_rads(self) -> f32 {
        self.0
    }

    /// Returns the measure of `self` in degrees.
    ///
    /// # Examples
    /// ```
    /// # use redfin_core::math::rads;
    /// assert_eq!(rads(core::f32::consts::PI).to_degs(), 180.0);
    /// ```
    pub fn to_degs(self) -> f32 {
        self.0 / DEG
    }

    /// Returns the measure of `self` in full turns.
    pub fn to_turns(self) -> f32 {
        self.0 / TURN
    }
}

#[cfg(feature = "fp")]
impl Angle {
    /// The sine of `self`.
    pub fn sin(self) -> f32 {
        fp::sin(self.0)
    }

    /// The cosine of `self`.
    pub fn cos(self) -> f32 {
        fp::cos(self.0)
    }

    /// The tangent of `self`.
    ///
    /// # Examples
    /// ```
    /// # use redfin_core::math::degs;
    /// assert_eq!(degs(45.0).tan(), 1.0);
    /// ```
    pub fn tan(self) -> f32 {
        fp::tan(self.0)
    }
}

impl ApproxEq for Angle {
    fn approx_eq_eps(&self, other: &Self, eps: &Self) -> bool {
        self.0.approx_eq_eps(&other.0, &eps.0)
    }
    fn default_eps() -> Self {
        Self(f32::default_eps())
    }
}

impl fmt::Debug for Angle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Angle({:?}°)", self.to_degs())
    }
}

// Angles add and subtract like any 1D quantity and scale by plain
// numbers; an angle-times-angle product has no meaning here.
macro_rules! impl_angle_op {
    ($($tr:ident::$f:ident($rhs:ty) => |$a:ident, $b:ident| $e:expr;)+) => {$(
        impl $tr<$rhs> for Angle {
            type Output = Angle;
            #[inline]
            fn $f(self, rhs: $rhs) -> Angle {
                let ($a, $b) = (self.0, rhs);
                Angle($e)
            }
        }
    )+};
}

impl_angle_op! {
    Add::add(Angle) => |a, b| a + b.0;
    Sub::sub(Angle) => |a, b| a - b.0;
    Mul::mul(f32) => |a, b| a * b;
    Div::div(f32) => |a, b| a / b;
}

impl Neg for Angle {
    type Output = Self;
    fn neg(self) -> Self {
        Self(-self.0)
    }
}

#[cfg(test)]
mod tests {
    use crate::assert_approx_eq;

    use super::*;

    #[test]
    fn unit_conversions() {
        assert_eq!(degs(360.0).to_rads(), TAU);
        assert_eq!(degs(90.0).to_turns(), 0.25);
        assert_eq!(rads(PI / 2.0).to_degs(), 90.0);
        assert_eq!(rads(TAU).to_turns(), 1.0);
        assert_eq!(turns(0.5).to_rads(), PI);
        assert_eq!(turns(2.0).to_degs(), 720.0);
    }

    #[test]
    fn arithmetic() {
        assert_eq!(degs(90.0) + degs(45.0), degs(135.0));
        assert_eq!(degs(90.0) - degs(45.0), degs(45.0));
        assert_eq!(-degs(45.0), degs(-45.0));
        assert_eq!(degs(45.0) * 2.0, degs(90.0));
        assert_eq!(degs(90.0) / 2.0, degs(45.0));
    }

    #[cfg(feature = "fp")]
    #[test]
    fn trigonometry() {
        assert_eq!(rads(0.0).sin(), 0.0);
        assert_eq!(rads(0.0).cos(), 1.0);
        assert_approx_eq!(degs(150.0).sin(), 0.5);
        assert_approx_eq!(degs(120.0).cos(), -0.5);
        assert_approx_eq!(degs(315.0).tan(), -1.0);
        assert_approx_eq!(turns(0.125).tan(), 1.0);
    }
}
