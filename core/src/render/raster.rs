//! Scanline rasterization of triangles.
//!
//! The rasterizer decomposes each triangle into [scanlines][Scanline], one
//! per covered pixel row, and each scanline into [fragments][Frag], one per
//! covered pixel. Vertex attributes are interpolated twice, down the edges
//! and then along each scanline, with a perspective correction applied per
//! fragment. The fragments then run through the depth test and the fragment
//! shader at the render target.
//!
//! Coverage follows the pixel-center rule: a pixel belongs to a triangle
//! exactly when its center point lies inside it. Two triangles sharing an
//! edge therefore never both draw a boundary pixel, and never leave a gap
//! between them either.

use core::{
    fmt::{Debug, Formatter},
    ops::Range,
};

use crate::{
    geom::Vertex,
    math::{Lerp, Vary, point::Point3},
    render::Screen,
};

/// A single candidate pixel of a rasterized primitive.
#[derive(Clone, Debug)]
pub struct Frag<V> {
    pub pos: ScreenPt,
    pub var: V,
}

/// One pixel row of a primitive being rasterized.
pub struct Scanline<V: Vary> {
    /// The pixel row.
    pub y: usize,
    /// The covered columns.
    pub xs: Range<usize>,
    /// Interpolated values across the covered columns.
    pub vs: <Varyings<V> as Vary>::Iter,
}

/// Iterator yielding the scanlines of a trapezoid from top to bottom.
pub struct ScanlineIter<V: Vary> {
    y: f32,
    left: <Varyings<V> as Vary>::Iter,
    right: <f32 as Vary>::Iter,
    dv_dx: <Varyings<V> as Vary>::Diff,
    n: u32,
}

/// Point in screen space.
///
/// `x` and `y` are pixel coordinates; `z` is reciprocal depth.
pub type ScreenPt = Point3<Screen>;

/// The values interpolated across a primitive: screen position plus the
/// user's varying.
pub type Varyings<V> = (ScreenPt, V);

impl<V: Vary> Scanline<V> {
    /// Returns the fragments of this scanline, perspective corrected.
    pub fn fragments(&mut self) -> impl Iterator<Item = Frag<V>> + '_ {
        self.vs.by_ref().map(|(pos, var)| {
            // Linear interpolation happened on attrib/w values; dividing by
            // 1/w (stored in pos.z) restores the perspective-correct value
            let var = var.z_div(pos.z());
            Frag { pos, var }
        })
    }
}

impl<V: Vary> Debug for Scanline<V> {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Scanline")
            .field("y", &self.y)
            .field("xs", &self.xs)
            .finish_non_exhaustive()
    }
}

impl<V: Vary> Iterator for ScanlineIter<V> {
    type Item = Scanline<V>;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        if self.n == 0 {
            return None;
        }
        let left = self.left.next()?;
        let right = self.right.next()?;

        // Snap both endpoints rightwards to pixel centers. A column is
        // covered if its center is strictly right of the left edge and at
        // or left of the right edge.
        let x0 = next_pixel_center(left.0.x());
        let x1 = next_pixel_center(right);

        // Move the varyings from the exact edge to the first covered center
        let v0 = left.lerp(&left.step(&self.dv_dx), x0 - left.0.x());

        let vs = v0.vary(self.dv_dx.clone(), Some((x1 - x0) as u32));

        let sl = Scanline {
            y: self.y as usize,
            xs: x0 as usize..x1 as usize,
            vs,
        };
        self.y += 1.0;
        self.n -= 1;
        Some(sl)
    }
}

/// Rasterizes a filled triangle, invoking `scanline_fn` for every scanline.
///
/// The scanlines cover exactly the pixels whose centers are inside the
/// triangle; see [`scan`] for the precise rule. The triangle is split at
/// its middle vertex into two flat-based halves, each rasterized as a
/// trapezoid:
/// ```text
///  top  x_____
///       \·····``--..__
///        \············x  mid (the other half of the split
///         \·······__/         may also be on the left)
///          \··__/
///           x
///         bot
/// ```
pub fn tri_fill<V, F>(mut verts: [Vertex<ScreenPt, V>; 3], mut scanline_fn: F)
where
    V: Vary,
    F: FnMut(Scanline<V>),
{
    // Order the vertices top to bottom
    verts.sort_by(|a, b| a.pos.y().total_cmp(&b.pos.y()));
    let [top, mid_a, bot] = verts.map(|v| (v.pos, v.attrib));

    let (top_y, mid_y, bot_y) = (top.0.y(), mid_a.0.y(), bot.0.y());

    // The split point, level with mid_a on the long edge
    let mid_b = top.lerp(&bot, (mid_y - top_y) / (bot_y - top_y));

    let (left, right) = if mid_a.0.x() < mid_b.0.x() {
        (mid_a, mid_b)
    } else {
        (mid_b, mid_a)
    };

    let upper = scan(top_y..mid_y, &top..&left, &top..&right);
    upper.for_each(&mut scanline_fn);

    let lower = scan(mid_y..bot_y, &left..&bot, &right..&bot);
    lower.for_each(&mut scanline_fn);
}

/// Converts a trapezoid with horizontal bases into scanlines.
///
/// The trapezoid spans the rows `y0..y1`; its left edge interpolates the
/// varyings from `l0` to `l1` and its right edge from `r0` to `r1`. With
/// `l0 == r0` or `l1 == r1` the trapezoid degenerates to a triangle, and
/// any convex polygon can be rasterized as a stack of such trapezoids:
/// ```text
///        l0 _________ r0
/// y0       /·········\          scanline
///         /···········\         scanline
///        /·············\          ...
/// y1    l1..............r1
/// ```
/// A pixel is included exactly when the shape covers its center, the point
/// offset (0.5, 0.5) from its top-left corner. A center lying exactly on a
/// boundary belongs to the shape on the edge's left or top side, which is
/// what makes adjoining shapes tile without seams.
pub fn scan<V: Vary>(
    Range { start: y0, end: y1 }: Range<f32>,
    Range { start: l0, end: l1 }: Range<&Varyings<V>>,
    Range { start: r0, end: r1 }: Range<&Varyings<V>>,
) -> ScanlineIter<V> {
    let dy_recip = (y1 - y0).recip();

    // Per-row steps along the two edges
    let dl_dy = l0.dv_dt(l1, dy_recip);
    let dr_dy = r0.dv_dt(r1, dy_recip);

    // The horizontal gradient is shared by the whole polygon. Measure it
    // one row down, where the edges are guaranteed to have separated even
    // if the top is a single point.
    let dv_dx = {
        let (l, r) = (l0.step(&dl_dy), r0.step(&dr_dy));
        let dx = r.0.x() - l.0.x();
        l.dv_dt(&r, dx.recip())
    };

    // Rasterization proper happens on the half-integer grid of pixel
    // centers. Rows y0_mid..y1_mid are the ones whose centers fall within
    // y0..y1, and the varyings are advanced from y0 to the first of them
    // before iteration starts.
    let y0_mid = next_pixel_center(y0);
    let y1_mid = next_pixel_center(y1);
    let y_adjust = y0_mid - y0;

    let l0 = l0.lerp(&l0.step(&dl_dy), y_adjust);
    let r0 = r0.0.x() + dr_dy.0.x() * y_adjust;

    ScanlineIter {
        y: y0_mid,
        left: l0.vary(dl_dy, None),
        // Only x is needed for the right edge
        right: r0.vary(dr_dy.0.x(), None),
        dv_dx,
        n: (y1_mid - y0_mid) as u32, // negative saturates to 0
    }
}

/// Returns the coordinate of the first pixel center strictly after `x`,
/// where centers lie at half-integer coordinates.
#[inline]
fn next_pixel_center(x: f32) -> f32 {
    crate::math::float::f32::floor(x + 0.5) + 0.5
}
