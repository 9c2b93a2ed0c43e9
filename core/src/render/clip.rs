//! Clipping of primitives against the view frustum.
//!
//! A primitive that pokes out of the visible volume cannot be rasterized
//! as-is: coordinates behind the camera make no sense after the perspective
//! divide, and pixels outside the viewport must not be written. This module
//! cuts each triangle with the six frustum planes beforehand, so that the
//! raster stage only ever sees geometry that is fully visible. Cutting once
//! per triangle is cheaper than range-checking every scanline.
//!
//! The planes are given in clip space, where each one has the trivial form
//! ±x, ±y, or ±z ≤ w, and the same code clips against any number of planes,
//! so the module works for arbitrary convex volumes as well.

use alloc::vec::Vec;
use core::{iter::zip, mem::swap};

use view_frustum::{outcode, status};

use crate::geom::{Tri, Vertex, vertex};
use crate::math::{Lerp, vec::ProjVec3};

/// Trait for shapes that can be clipped against a convex volume.
///
/// Implemented for slices of primitives rather than single ones, so that a
/// whole batch is clipped per call and scratch buffers can be reused.
///
/// Implementations should not emit degenerate primitives, such as triangles
/// whose vertices are collinear.
pub trait Clip {
    /// The type of the primitives produced, for a slice the element type.
    type Item;

    /// Clips `self` against every plane in `planes`, appending the surviving
    /// geometry to `out`.
    ///
    /// A primitive entirely inside the volume is emitted unchanged and one
    /// entirely outside is dropped. A primitive crossing the boundary is cut
    /// so that only its inside part remains, which may split it into several
    /// output primitives.
    ///
    /// `out` should be empty; if not, the result is unspecified.
    fn clip(&self, planes: &[ClipPlane], out: &mut Vec<Self::Item>);
}

/// A vector in clip space.
pub type ClipVec = ProjVec3;

/// A clip-space vertex, tagged with its precomputed outcode.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct ClipVert<A> {
    pub pos: ClipVec,
    pub attrib: A,
    outcode: u8,
}

/// How a primitive relates to the view frustum.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Status {
    /// Entirely inside; no clipping needed.
    Visible,
    /// Crosses the boundary, or inconclusive; must be clipped.
    Clipped,
    /// Entirely outside; can be dropped.
    Hidden,
}

/// A half-space boundary, with the outcode bit identifying it.
///
/// The stored vector holds the plane normal in xyz and the negated offset
/// in w, so the signed distance of a point is a single dot product.
#[derive(Debug, Copy, Clone)]
pub struct ClipPlane(ClipVec, u8);

impl ClipPlane {
    /// Returns the plane with unit normal (x, y, z), offset `off` from the
    /// origin, and outcode bit `bit`.
    const fn new(x: f32, y: f32, z: f32, off: f32, bit: u8) -> Self {
        Self(ClipVec::new([x, y, z, -off]), bit)
    }

    /// Returns the signed distance of `pt` from the plane.
    ///
    /// Positive on the side the normal points to, which is taken to be the
    /// outside, negative on the other side, zero on the plane itself:
    /// ```text
    ///             ^ n       • d > 0
    ///             |
    ///  ───────•───+────────────────  d = 0
    ///
    ///                 • d < 0
    /// ```
    #[inline]
    pub fn signed_dist(&self, pt: &ClipVec) -> f32 {
        self.0.dot(pt)
    }

    /// Returns the outcode bit of this plane for `pt`.
    ///
    /// The bit is set if `pt` is strictly outside the plane. A point on the
    /// plane counts as inside.
    #[inline]
    pub fn outcode(&self, pt: &ClipVec) -> u8 {
        if self.signed_dist(pt) > 0.0 { self.1 } else { 0 }
    }

    /// Returns whether `v`'s cached outcode puts it inside this plane.
    #[inline]
    pub fn is_inside<A>(&self, v: &ClipVert<A>) -> bool {
        self.1 & v.outcode == 0
    }

    /// Returns the vertex where the edge from `v0` to `v1` pierces the
    /// plane, or `None` if the edge lies entirely on one side.
    ///
    /// The attribute of the new vertex is interpolated along the edge.
    pub fn intersect<A: Lerp>(
        &self,
        [v0, v1]: [&ClipVert<A>; 2],
    ) -> Option<ClipVert<A>> {
        // Signed distances rather than outcodes, because an endpoint exactly
        // on the plane must not produce an extra vertex
        let d0 = self.signed_dist(&v0.pos);
        let d1 = self.signed_dist(&v1.pos);
        (d0 * d1 < 0.0).then(|| {
            // The strict inequality above makes d1 - d0 nonzero
            let t = -d0 / (d1 - d0);
            ClipVert::new(vertex(
                v0.pos.lerp(&v1.pos, t),
                v0.attrib.lerp(&v1.attrib, t),
            ))
        })
    }

    /// Clips a convex polygon against this plane alone, appending the
    /// resulting vertices to `dst`.
    ///
    /// Walks the edges of the polygon in order, keeping the vertices on the
    /// inside and replacing each boundary-crossing edge with a vertex on the
    /// plane. Clipping the triangle below yields the quad a-b-q-p:
    /// ```text
    ///                 c            outside
    ///               .   .
    ///  ──────────p───────q───────────────
    ///           .          .       inside
    ///          a . . . . . . b
    /// ```
    pub fn clip_polygon<A: Lerp + Clone>(
        &self,
        src: &[ClipVert<A>],
        dst: &mut Vec<ClipVert<A>>,
    ) {
        for (i, v0) in src.iter().enumerate() {
            let v1 = &src[(i + 1) % src.len()];
            if self.is_inside(v0) {
                dst.push(v0.clone());
            }
            if let Some(v) = self.intersect([v0, v1]) {
                dst.push(v);
            }
        }
    }
}

/// The volume of space visible through the viewport.
///
/// In view space the frustum is a truncated pyramid: the four side planes
/// meet at the camera position and pass through the viewport edges, while
/// the near and far planes bound the visible depth range. The near plane
/// must sit at a strictly positive depth, and its distance also governs how
/// depth buffer precision is distributed over the depth range.
///
/// The projection transform maps the frustum to an axis-aligned cube in
/// clip space, scaled by the w coordinate: a point is visible exactly when
/// −w ≤ x, y, z ≤ w with w > 0. That makes the plane tests here independent
/// of the camera's field of view and depth range.
pub mod view_frustum {
    use super::*;

    /// The frustum planes in the order left, right, bottom, top, near, far.
    #[rustfmt::skip]
    pub const PLANES: [ClipPlane; 6] = [
        ClipPlane::new(-1.0,  0.0,  0.0, 1.0, 0x01), // Left:   -x <= w
        ClipPlane::new( 1.0,  0.0,  0.0, 1.0, 0x02), // Right:   x <= w
        ClipPlane::new( 0.0, -1.0,  0.0, 1.0, 0x04), // Bottom: -y <= w
        ClipPlane::new( 0.0,  1.0,  0.0, 1.0, 0x08), // Top:     y <= w
        ClipPlane::new( 0.0,  0.0, -1.0, 1.0, 0x10), // Near:   -z <= w
        ClipPlane::new( 0.0,  0.0,  1.0, 1.0, 0x20), // Far:     z <= w
    ];

    /// Clips `geom` against the view frustum, appending the result to `out`.
    pub fn clip<G: Clip + ?Sized>(geom: &G, out: &mut Vec<G::Item>) {
        geom.clip(&PLANES, out);
    }

    /// Returns the outcode of `pt`: one bit per frustum plane that `pt`
    /// is outside of.
    #[inline]
    pub fn outcode(pt: &ClipVec) -> u8 {
        PLANES.iter().fold(0, |code, p| code | p.outcode(pt))
    }

    /// Classifies the convex hull of `vs` against the frustum.
    pub fn status<A>(vs: &[ClipVert<A>]) -> Status {
        // Planes that every vertex is outside of
        let all = vs.iter().fold(!0, |code, v| code & v.outcode);
        // Planes that some vertex is outside of
        let any = vs.iter().fold(0, |code, v| code | v.outcode);

        if all != 0 {
            // Every vertex beyond one and the same plane: nothing visible.
            // Sharing some plane is essential; a hull whose vertices are
            // outside different planes may still cross the frustum.
            Status::Hidden
        } else if any == 0 {
            Status::Visible
        } else {
            // Straddles at least one plane, though possibly still entirely
            // outside; clipping decides
            Status::Clipped
        }
    }
}

/// Clips a convex polygon against every plane in `planes`.
///
/// The polygon is handed from plane to plane: the output of one pass is the
/// input of the next, ping-ponging between the two buffers to avoid
/// allocation. On return `src` is empty and `dst` holds the final vertices,
/// none if the polygon was entirely outside. `dst` should be empty on
/// entry; if not, the result is unspecified.
///
/// This is the Sutherland–Hodgman algorithm [^1].
///
/// [^1]: Ivan Sutherland, Gary W. Hodgman: Reentrant Polygon Clipping.
///        Communications of the ACM, vol. 17, pp. 32–42, 1974
pub fn clip_polygon<'a, A: Lerp + Clone>(
    planes: &[ClipPlane],
    src: &'a mut Vec<ClipVert<A>>,
    dst: &'a mut Vec<ClipVert<A>>,
) {
    debug_assert!(dst.is_empty());

    for (i, p) in zip(0.., planes) {
        p.clip_polygon(src, dst);
        src.clear();
        if dst.is_empty() {
            // Nothing survived this plane
            return;
        }
        if i < planes.len() - 1 {
            swap(src, dst);
        }
    }
}

impl<A> ClipVert<A> {
    /// Wraps `v`, computing and caching its outcode.
    #[inline]
    pub fn new(v: Vertex<ClipVec, A>) -> Self {
        Self {
            outcode: outcode(&v.pos),
            pos: v.pos,
            attrib: v.attrib,
        }
    }
}

impl<A: Lerp + Clone> Clip for [Tri<ClipVert<A>>] {
    type Item = Tri<ClipVert<A>>;

    fn clip(&self, planes: &[ClipPlane], out: &mut Vec<Self::Item>) {
        debug_assert!(out.is_empty());

        // Scratch space shared by all triangles of the batch
        let mut src = Vec::with_capacity(8);
        let mut dst = Vec::with_capacity(8);

        for tri @ Tri(vs) in self {
            match status(vs) {
                Status::Visible => {
                    out.push(tri.clone());
                    continue;
                }
                Status::Hidden => continue,
                Status::Clipped => {}
            }

            src.extend(vs.iter().cloned());
            clip_polygon(planes, &mut src, &mut dst);

            // The clipped polygon has up to 3 + planes.len() vertices, one
            // extra per plane crossed. Triangulate it as a fan around its
            // first vertex:
            //
            //        1---2
            //       / \ / \
            //      0---+---3        0-1-2, 0-2-3, 0-3-4
            //       \  |  /
            //        \ | /
            //          4
            //
            if let [first, rest @ ..] = &dst[..] {
                for pair in rest.windows(2) {
                    out.push(Tri([
                        first.clone(),
                        pair[0].clone(),
                        pair[1].clone(),
                    ]));
                }
            }
            dst.clear();
        }
    }
}
