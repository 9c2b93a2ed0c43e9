//! Approximate equality comparisons for floating-point types.

use core::iter::zip;

/// Trait for comparing values for approximate equality.
///
/// Exact comparison of floats is brittle: rounding makes expressions such as
/// `0.1 + 0.2 == 0.3` evaluate to `false` even though the same computation on
/// real numbers would be exact. Tests and geometric predicates instead want to
/// know whether two values agree *to within some tolerance*.
///
/// The tolerance, or epsilon, is applied relative to the magnitude of the
/// left-hand operand, with an absolute floor of one. Near zero this behaves
/// like a plain absolute comparison; for large values it scales up so that
/// quantities like 1e7 and 1e7+1 still compare equal.
pub trait ApproxEq<Rhs: ?Sized = Self, Eps = Self> {
    /// Returns whether `self` equals `other` to within [`default_eps`]
    /// [Self::default_eps].
    fn approx_eq(&self, other: &Rhs) -> bool {
        self.approx_eq_eps(other, &Self::default_eps())
    }

    /// Returns whether `self` equals `other` to within the relative
    /// tolerance `eps`.
    fn approx_eq_eps(&self, other: &Rhs, eps: &Eps) -> bool;

    /// Returns the tolerance used by [`approx_eq`][Self::approx_eq].
    fn default_eps() -> Eps;
}

impl ApproxEq for f32 {
    fn approx_eq_eps(&self, other: &Self, eps: &Self) -> bool {
        use super::float::f32;
        let scale = f32::abs(*self).max(1.0);
        f32::abs(self - other) <= eps * scale
    }

    fn default_eps() -> Self {
        // The micromath backend is only accurate to a few per mille
        if cfg!(any(feature = "std", feature = "libm")) {
            1e-6
        } else {
            5e-3
        }
    }
}

impl<T, E> ApproxEq<Self, E> for [T]
where
    T: Sized + ApproxEq<T, E>,
{
    fn approx_eq_eps(&self, other: &Self, eps: &E) -> bool {
        self.len() == other.len()
            && zip(self, other).all(|(a, b)| a.approx_eq_eps(b, eps))
    }
    fn default_eps() -> E {
        T::default_eps()
    }
}

impl<T, E, const N: usize> ApproxEq<Self, E> for [T; N]
where
    T: Sized + ApproxEq<T, E>,
{
    fn approx_eq_eps(&self, other: &Self, eps: &E) -> bool {
        self[..].approx_eq_eps(&other[..], eps)
    }
    fn default_eps() -> E {
        T::default_eps()
    }
}

impl<T: ApproxEq<T, E>, E> ApproxEq<Self, E> for Option<T> {
    fn approx_eq_eps(&self, other: &Self, eps: &E) -> bool {
        match (self, other) {
            (Some(a), Some(b)) => a.approx_eq_eps(b, eps),
            (None, None) => true,
            _ => false,
        }
    }
    fn default_eps() -> E {
        T::default_eps()
    }
}

/// Asserts that two values are approximately equal.
///
/// The left operand must have a suitable [`ApproxEq`] impl. Both operands
/// must impl `Debug` unless a custom panic message is supplied. An explicit
/// tolerance may be given with `eps = ...` after the operands; a custom
/// message, if any, comes last, as in `assert_eq`.
///
/// # Panics
/// If the values are not approximately equal.
///
/// # Examples
/// ```
/// # use redfin_core::assert_approx_eq;
/// // Fails with assert_eq! due to rounding:
/// assert_approx_eq!(0.1 + 0.2, 0.3);
/// // Tolerance scales with magnitude:
/// assert_approx_eq!(3e8, 3e8 + 30.0);
/// // Explicit tolerance:
/// assert_approx_eq!(9.9, 10.0, eps = 0.02);
/// ```
/// ```should_panic
/// # use redfin_core::assert_approx_eq;
/// assert_approx_eq!(3.14, 0.0, "pi is nowhere near {}", 0.0);
/// ```
#[macro_export]
macro_rules! assert_approx_eq {
    ($a:expr, $b:expr) => {
        match (&$a, &$b) {
            (a, b) => $crate::assert_approx_eq!(
                *a, *b,
                "approximate equality failed: {a:?} vs. {b:?}"
            )
        }
    };
    ($a:expr, $b:expr, eps = $eps:literal) => {
        match (&$a, &$b) {
            (a, b) => $crate::assert_approx_eq!(
                *a, *b, eps = $eps,
                "approximate equality failed: {a:?} vs. {b:?} (eps {})",
                $eps
            )
        }
    };
    ($a:expr, $b:expr, $fmt:literal $(, $args:expr)*) => {{
        use $crate::math::approx::ApproxEq;
        match (&$a, &$b) {
            (a, b) => assert!(a.approx_eq(b), $fmt $(, $args)*)
        }
    }};
    ($a:expr, $b:expr, eps = $eps:literal, $fmt:literal $(, $args:expr)*) => {{
        use $crate::math::approx::ApproxEq;
        match (&$a, &$b) {
            (a, b) => assert!(a.approx_eq_eps(b, &$eps), $fmt $(, $args)*)
        }
    }};
}
