//! Geometric primitives: vertices, triangles, and triangle meshes.
//!
//! The primitives are deliberately minimal. A [`Vertex`] is a position plus
//! whatever attribute payload a shader wants carried along, and a [`Tri`] is
//! just three of those. Everything richer, such as surface construction and
//! normal computation, lives in [`mesh`].

use crate::math::{Lerp, Point3, Vec3};
use crate::render::Model;

pub mod mesh;

pub use mesh::Mesh;

/// A position with an attached vertex attribute.
///
/// The attribute `A` flows through the pipeline unchanged in meaning: it is
/// interpolated across each triangle and handed to the fragment shader.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct Vertex<P, A> {
    pub pos: P,
    pub attrib: A,
}

/// A vertex positioned in 3-space.
pub type Vertex3<A, B = Model> = Vertex<Point3<B>, A>;

/// A triangle, by its three corner vertices.
///
/// `V` is commonly an index into a separate vertex list rather than a
/// vertex value, as in [`Mesh`].
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[repr(transparent)]
pub struct Tri<V>(pub [V; 3]);

/// A surface normal in 3-space.
pub type Normal3 = Vec3;

/// Returns a vertex with the given position and attribute.
pub const fn vertex<P, A>(pos: P, attrib: A) -> Vertex<P, A> {
    Vertex { pos, attrib }
}

/// Returns a triangle with the given vertices.
pub const fn tri<V>(a: V, b: V, c: V) -> Tri<V> {
    Tri([a, b, c])
}

impl<P: Lerp, A: Lerp> Lerp for Vertex<P, A> {
    fn lerp(&self, other: &Self, t: f32) -> Self {
        Vertex {
            pos: self.pos.lerp(&other.pos, t),
            attrib: self.attrib.lerp(&other.attrib, t),
        }
    }
}
