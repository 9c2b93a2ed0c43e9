//! RGBA colors with 8-bit or float channels.

use core::{
    fmt::{self, Debug, Formatter},
    marker::PhantomData,
    ops::Index,
};

use crate::math::{
    approx::ApproxEq,
    space::{Affine, Linear},
};

/// A color, generic over its channel representation.
///
/// The `Space` tag names the color space, in the same way that
/// [`Vector`](crate::math::vec::Vector) is tagged by the space its basis
/// spans. Only [`Rgba`] is currently implemented.
#[repr(transparent)]
#[derive(Copy, Clone, Default, Eq, PartialEq)]
pub struct Color<Repr, Space>(pub Repr, PhantomData<Space>);

/// Tag for the sRGB color space with an alpha channel.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub struct Rgba;

/// An RGBA color with `u8` channels, one byte per channel.
pub type Color4<Space = Rgba> = Color<[u8; 4], Space>;

/// An RGBA color with `f32` channels, nominally in 0.0..=1.0.
pub type Color4f<Space = Rgba> = Color<[f32; 4], Space>;

/// Returns an RGBA color with the given channel values.
pub const fn rgba<Ch>(r: Ch, g: Ch, b: Ch, a: Ch) -> Color<[Ch; 4], Rgba> {
    Color([r, g, b, a], PhantomData)
}

impl Color4 {
    /// Packs the channel bytes of `self` into a `u32` in `0xAA_RR_GG_BB`
    /// order, the layout expected by the color framebuffer.
    #[inline]
    pub const fn to_argb_u32(self) -> u32 {
        let [r, g, b, a] = self.0;
        u32::from_be_bytes([a, r, g, b])
    }

    /// Converts `self` to float channels, dividing each by 255.
    #[inline]
    pub fn to_color4f(self) -> Color4f {
        self.0.map(|ch| ch as f32 / 255.0).into()
    }
}

impl Color4f {
    /// Converts `self` to `u8` channels.
    ///
    /// Channel values are clamped to 0.0..=1.0 first, so out-of-range
    /// results of shading arithmetic saturate instead of wrapping.
    #[inline]
    pub fn to_color4(self) -> Color4 {
        self.0
            .map(|ch| (ch.clamp(0.0, 1.0) * 255.0) as u8)
            .into()
    }
}

impl<R, Ch> Color<R, Rgba>
where
    R: Index<usize, Output = Ch>,
    Ch: Copy,
{
    /// Returns the red channel of `self`.
    pub fn r(&self) -> Ch {
        self.0[0]
    }
    /// Returns the green channel of `self`.
    pub fn g(&self) -> Ch {
        self.0[1]
    }
    /// Returns the blue channel of `self`.
    pub fn b(&self) -> Ch {
        self.0[2]
    }
    /// Returns the alpha channel of `self`.
    pub fn a(&self) -> Ch {
        self.0[3]
    }
}

//
// Local trait impls
//

impl<Sp> Affine for Color<[f32; 4], Sp> {
    type Space = Sp;
    type Diff = Self;

    const DIM: usize = 4;

    #[inline]
    fn add(&self, other: &Self) -> Self {
        let mut ch = self.0;
        for (c, o) in ch.iter_mut().zip(&other.0) {
            *c += o;
        }
        Self(ch, PhantomData)
    }
    #[inline]
    fn sub(&self, other: &Self) -> Self {
        let mut ch = self.0;
        for (c, o) in ch.iter_mut().zip(&other.0) {
            *c -= o;
        }
        Self(ch, PhantomData)
    }
}

impl<Sp> Linear for Color<[f32; 4], Sp> {
    type Scalar = f32;

    /// Returns transparent black.
    fn zero() -> Self {
        Self([0.0; 4], PhantomData)
    }
    #[inline]
    fn neg(&self) -> Self {
        self.mul(-1.0)
    }
    #[inline]
    fn mul(&self, scalar: f32) -> Self {
        self.0.map(|ch| ch * scalar).into()
    }
}

impl<Sp> ApproxEq<Self, f32> for Color<[f32; 4], Sp> {
    fn approx_eq_eps(&self, other: &Self, eps: &f32) -> bool {
        self.0.approx_eq_eps(&other.0, eps)
    }
    fn default_eps() -> f32 {
        f32::default_eps()
    }
}

//
// Foreign trait impls
//

impl<R: Debug> Debug for Color<R, Rgba> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "rgba{:?}", self.0)
    }
}

impl<R, Sp> From<R> for Color<R, Sp> {
    #[inline]
    fn from(channels: R) -> Self {
        Self(channels, PhantomData)
    }
}

#[cfg(test)]
mod tests {
    use crate::math::Lerp;

    use super::*;

    #[test]
    fn channel_accessors() {
        let c = rgba(1, 2, 3, 4);
        assert_eq!((c.r(), c.g(), c.b(), c.a()), (1, 2, 3, 4));

        let c = rgba(0.75, 0.5, 0.25, 1.0);
        assert_eq!(c.b(), 0.25);
    }

    #[test]
    fn argb_packing_swaps_alpha_first() {
        assert_eq!(rgba(0xAB, 0xCD, 0xEF, 0x42).to_argb_u32(), 0x42_AB_CD_EF);
        assert_eq!(rgba(0, 0, 0, 0xFF).to_argb_u32(), 0xFF_00_00_00);
    }

    #[test]
    fn u8_to_float_channels() {
        let c = rgba(255, 51, 0, 102).to_color4f();
        assert_eq!(c, rgba(1.0, 0.2, 0.0, 0.4));
    }

    #[test]
    fn float_to_u8_saturates() {
        let c = rgba(1.25, 0.6, -0.5, 1.0).to_color4();
        assert_eq!(c, rgba(255, 153, 0, 255));
    }

    #[test]
    fn float_color_arithmetic() {
        let red = rgba(1.0, 0.0, 0.0, 1.0);
        let blue = rgba(0.0, 0.0, 1.0, 1.0);

        assert_eq!(red.lerp(&blue, 0.25), rgba(0.75, 0.0, 0.25, 1.0));
        assert_eq!(red.mul(0.5), rgba(0.5, 0.0, 0.0, 0.5));
    }
}
