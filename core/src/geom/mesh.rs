//! Indexed triangle meshes.
//!
//! A mesh stores each vertex once and lets any number of faces refer to it
//! by index. Shared vertices are what make smooth shading work: a vertex on
//! the seam of two faces carries a single normal, so interpolation across
//! the seam is continuous.

use core::fmt::{Debug, Formatter};

use alloc::vec::Vec;

use crate::math::Point3;
use crate::render::Model;

use super::{Tri, vertex};

/// The vertex type stored by meshes.
pub type Vertex<A, B = Model> = super::Vertex<Point3<B>, A>;

/// A triangle mesh with indexed faces.
///
/// Approximates a surface by a set of flat triangles. Every face is a
/// triplet of indices into the shared vertex list, so vertices on a seam
/// between faces are stored only once.
#[derive(Clone)]
pub struct Mesh<Attrib, Basis = Model> {
    /// Faces as triplets of indices into `verts`.
    pub faces: Vec<Tri<usize>>,
    /// The shared vertex list.
    pub verts: Vec<Vertex<Attrib, Basis>>,
}

/// Accumulates vertices and faces of a [`Mesh`] under construction.
#[derive(Clone, Debug)]
pub struct Builder<Attrib = ()> {
    pub mesh: Mesh<Attrib>,
}

//
// Inherent impls
//

impl<A, B> Mesh<A, B> {
    /// Returns a mesh with the given faces and vertices.
    ///
    /// Every index in `faces` must refer to an element of `verts`.
    ///
    /// # Examples
    /// ```
    /// # use redfin_core::geom::{Tri, Mesh, vertex};
    /// # use redfin_core::math::pt3;
    /// // A tetrahedron: four vertices, four faces
    /// let verts = [
    ///     pt3(0.0, 0.0, 0.0),
    ///     pt3(1.0, 0.0, 0.0),
    ///     pt3(0.0, 1.0, 0.0),
    ///     pt3(0.0, 0.0, 1.0),
    /// ]
    /// .map(|p| vertex(p, ()));
    ///
    /// let faces = [
    ///     Tri([0, 2, 1]),
    ///     Tri([0, 1, 3]),
    ///     Tri([0, 3, 2]),
    ///     Tri([1, 2, 3]),
    /// ];
    ///
    /// let tetra: Mesh<()> = Mesh::new(faces, verts);
    /// ```
    ///
    /// # Panics
    /// If a face refers to an index ≥ `verts.len()`.
    pub fn new<F, V>(faces: F, verts: V) -> Self
    where
        F: IntoIterator<Item = Tri<usize>>,
        V: IntoIterator<Item = Vertex<A, B>>,
    {
        let faces: Vec<_> = faces.into_iter().collect();
        let verts: Vec<_> = verts.into_iter().collect();

        for (i, Tri(vs)) in faces.iter().enumerate() {
            for &v in vs {
                assert!(
                    v < verts.len(),
                    "face {i} refers to a nonexistent vertex {v}"
                );
            }
        }
        Self { faces, verts }
    }
}

impl<A> Mesh<A> {
    /// Returns an empty mesh builder.
    pub fn builder() -> Builder<A> {
        Builder::default()
    }
}

impl<A> Builder<A> {
    /// Appends a face referring to the vertices at indices `a`, `b`, `c`.
    pub fn push_face(&mut self, a: usize, b: usize, c: usize) {
        self.mesh.faces.push(Tri([a, b, c]));
    }

    /// Appends every face yielded by `faces`.
    pub fn push_faces<Fs>(&mut self, faces: Fs)
    where
        Fs: IntoIterator<Item = [usize; 3]>,
    {
        self.mesh.faces.extend(faces.into_iter().map(Tri));
    }

    /// Appends a vertex and returns its index.
    pub fn push_vert(&mut self, pos: Point3, attrib: A) -> usize {
        self.mesh.verts.push(vertex(pos.to(), attrib));
        self.mesh.verts.len() - 1
    }

    /// Appends every vertex yielded by `verts`.
    pub fn push_verts<Vs>(&mut self, verts: Vs)
    where
        Vs: IntoIterator<Item = (Point3, A)>,
    {
        let vs = verts.into_iter().map(|(p, a)| vertex(p.to(), a));
        self.mesh.verts.extend(vs);
    }

    /// Consumes `self` and returns the completed mesh.
    ///
    /// # Panics
    /// If a pushed face refers to an index with no vertex.
    pub fn build(self) -> Mesh<A> {
        // Index validation happens in new()
        Mesh::new(self.mesh.faces, self.mesh.verts)
    }
}

//
// Foreign trait impls
//

impl<A: Debug, B: Debug + Default> Debug for Mesh<A, B> {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Mesh")
            .field("faces", &self.faces)
            .field("verts", &self.verts)
            .finish()
    }
}

impl<A, B> Default for Mesh<A, B> {
    fn default() -> Self {
        Self { faces: Vec::new(), verts: Vec::new() }
    }
}

impl<A> Default for Builder<A> {
    fn default() -> Self {
        Self { mesh: Mesh::default() }
    }
}

#[cfg(test)]
mod tests {
    use crate::geom::vertex;
    use crate::math::pt3;

    use super::*;

    #[test]
    fn builder_collects_faces_and_verts() {
        let mut b = Mesh::builder();
        let i = b.push_vert(pt3(0.0, 0.0, 0.0), ());
        b.push_verts([(pt3(1.0, 0.0, 0.0), ()), (pt3(0.0, 1.0, 0.0), ())]);
        b.push_face(i, 1, 2);

        let mesh = b.build();
        assert_eq!(i, 0);
        assert_eq!(mesh.faces, [Tri([0, 1, 2])]);
        assert_eq!(mesh.verts.len(), 3);
    }

    #[test]
    #[should_panic]
    fn new_rejects_out_of_bounds_index() {
        _ = Mesh::<(), Model>::new(
            [Tri([0, 1, 3])],
            [
                vertex(pt3(0.0, 0.0, 0.0), ()),
                vertex(pt3(1.0, 0.0, 0.0), ()),
                vertex(pt3(0.0, 1.0, 0.0), ()),
            ],
        );
    }

    #[test]
    #[should_panic]
    fn build_rejects_out_of_bounds_index() {
        let mut b = Mesh::builder();
        b.push_faces([[0, 1, 2], [2, 3, 4]]);
        b.push_verts([
            (pt3(0.0, 0.0, 0.0), ()),
            (pt3(1.0, 0.0, 0.0), ()),
            (pt3(0.0, 1.0, 0.0), ()),
        ]);
        _ = b.build();
    }
}
