//! Math backends for `f32`.
//!
//! On `no_std` targets the intrinsic-backed float methods of `std` are not
//! available, so the functions the crate needs are routed through one of
//! several backends. The `std` feature aliases [`f32`] to the primitive type
//! and resolves calls like `f32::sqrt(x)` to the inherent methods; `libm`
//! and `mm` substitute a module of free functions backed by the crate of the
//! same name. Without any of these, a bit-twiddling fallback covers the
//! handful of functions the non-trig code paths require.

/// Software implementations used when no other backend is enabled.
pub mod fallback {
    /// Returns the absolute value of `x`.
    #[inline]
    pub fn abs(x: f32) -> f32 {
        f32::from_bits(x.to_bits() & (u32::MAX >> 1))
    }

    /// Returns `x` rounded towards negative infinity.
    #[inline]
    pub fn floor(x: f32) -> f32 {
        let t = x as i64 as f32;
        t - (x < t) as u32 as f32
    }

    /// Returns an approximation of the square root of `x`.
    ///
    /// Computed as the reciprocal of [`recip_sqrt`], with relative error
    /// within about 0.2%.
    #[inline]
    pub fn sqrt(x: f32) -> f32 {
        recip_sqrt(x).recip()
    }

    /// Returns an approximation of 1/√`x` using the classic bit trick.
    #[inline]
    pub fn recip_sqrt(x: f32) -> f32 {
        // Initial guess from the exponent bits, then one Newton round
        const SEED: u32 = 0x5f37_5a86;
        let y = f32::from_bits(SEED.saturating_sub(x.to_bits() >> 1));
        y * (1.5 - 0.5 * x * y * y)
    }
}

#[cfg(feature = "libm")]
pub mod libm {
    pub use libm::{
        cosf as cos, fabsf as abs, floorf as floor, sinf as sin,
        sqrtf as sqrt, tanf as tan,
    };
}

#[cfg(feature = "mm")]
pub mod mm {
    use micromath::F32Ext;

    macro_rules! fwd {
        ($($f:ident)+) => {
            $(#[inline]
            pub fn $f(x: f32) -> f32 {
                F32Ext::$f(x)
            })+
        };
    }

    fwd!(abs floor sin cos tan);

    /// Returns the square root of `x`, polished to full `f32` precision.
    #[inline]
    pub fn sqrt(x: f32) -> f32 {
        // The micromath estimate alone is off by up to 0.1%
        let mut y = F32Ext::sqrt(x);
        y = 0.5 * (y + x / y);
        0.5 * (y + x / y)
    }
}

// Backend selection, in order of precedence: the std intrinsics whenever
// available, then libm, then micromath, then the fallback.

#[cfg(feature = "std")]
#[allow(non_camel_case_types)]
pub type f32 = core::primitive::f32;

#[cfg(all(feature = "libm", not(feature = "std")))]
pub use libm as f32;

#[cfg(all(feature = "mm", not(feature = "std"), not(feature = "libm")))]
pub use mm as f32;

#[cfg(not(feature = "fp"))]
pub use fallback as f32;

#[cfg(test)]
mod tests {
    use crate::assert_approx_eq;

    use super::*;

    #[test]
    fn fallback_abs_and_floor_are_exact() {
        use fallback as fb;

        assert_eq!(fb::abs(-123.25), 123.25);
        assert_eq!(fb::abs(0.5), 0.5);
        assert_eq!(fb::abs(-0.0), 0.0);

        assert_eq!(fb::floor(2.75), 2.0);
        assert_eq!(fb::floor(-2.75), -3.0);
        assert_eq!(fb::floor(-0.25), -1.0);
        assert_eq!(fb::floor(8.0), 8.0);
        assert_eq!(fb::floor(-0.0), 0.0);
    }

    #[test]
    fn fallback_sqrt_is_close() {
        use fallback as fb;

        assert_approx_eq!(fb::sqrt(25.0), 5.0, eps = 1e-2);
        assert_approx_eq!(fb::sqrt(2.0), 1.4142135, eps = 1e-2);
        assert_approx_eq!(fb::recip_sqrt(16.0), 0.25, eps = 1e-3);
    }

    #[cfg(feature = "libm")]
    #[test]
    fn libm_backend() {
        use core::f32::consts::FRAC_PI_3;

        assert_eq!(libm::abs(-4.5), 4.5);
        assert_eq!(libm::floor(-1.25), -2.0);
        assert_eq!(libm::sqrt(144.0), 12.0);
        assert!(libm::sqrt(-4.0).is_nan());
        assert_approx_eq!(libm::cos(FRAC_PI_3), 0.5);
        assert_approx_eq!(libm::tan(FRAC_PI_3 / 2.0), 0.57735026);
    }

    #[cfg(feature = "mm")]
    #[test]
    fn mm_backend() {
        use core::f32::consts::FRAC_PI_3;

        assert_eq!(mm::abs(-4.5), 4.5);
        assert_eq!(mm::floor(-1.25), -2.0);
        assert_approx_eq!(mm::sqrt(144.0), 12.0);
        assert!(mm::sqrt(-4.0).is_nan());
        assert_approx_eq!(mm::cos(FRAC_PI_3), 0.5);
        assert_approx_eq!(mm::sin(FRAC_PI_3), 0.8660254);
    }

    #[cfg(feature = "std")]
    #[test]
    fn std_backend() {
        // Dispatched to the inherent methods via the type alias
        assert_eq!(f32::abs(-4.5), 4.5);
        assert_eq!(f32::floor(-1.25), -2.0);
        assert_eq!(f32::sqrt(144.0), 12.0);
        assert!(f32::sqrt(-4.0).is_nan());
    }
}
