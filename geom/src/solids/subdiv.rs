//! Subdivision surfaces.

use alloc::{collections::BTreeMap, vec::Vec};

use re::geom::{mesh::Builder, Mesh, Normal3};
use re::math::{Lerp, Point3};

use super::{Build, Icosahedron};

/// Spherical mesh created by iteratively subdividing an icosahedron.
///
/// Subdivision level `n` yields a mesh with 20·4<sup>*n*</sup> faces
/// and 10·4<sup>*n*</sup>+2 vertices. The mesh is smooth shaded, with
/// the vertex normals pointing away from the center.
pub struct Icosphere {
    /// The center point of the sphere.
    pub center: Point3,
    /// The radius of the sphere.
    pub radius: f32,
    /// The number of times the icosahedron is subdivided.
    pub level: u32,
}

impl Build<Normal3> for Icosphere {
    /// Builds the spherical mesh.
    ///
    /// # Panics
    /// If `self.level` exceeds 8.
    fn build(self) -> Mesh<Normal3> {
        let Self { center, radius, level } = self;
        assert!(
            level <= 8,
            "subdivision level must be at most 8, was {level}"
        );

        let mut bld = Mesh::builder();
        bld.push_verts(Icosahedron::COORDS.map(|c| {
            let n = c.normalize();
            (n.to_pt(), n)
        }));
        let mut faces: Vec<_> = Icosahedron::FACES.to_vec();

        // HashMap not available in `alloc` :(
        let mut midpoints = BTreeMap::new();
        for _ in 0..level {
            faces = subdivide(&faces, &mut bld, &mut midpoints);
        }
        bld.push_faces(faces);

        for v in &mut bld.mesh.verts {
            v.pos = (center + v.pos.to_vec().to() * radius).to();
        }
        bld.build()
    }
}

/// Splits each of `faces` into four smaller triangles by creating a new
/// vertex at the midpoint of each edge, projected onto the unit sphere.
///
/// ```text
///             a
///            /\
///          /   \
///     ab /______\ ac
///      / \      /\
///    /    \   /   \
///  /_______\/______\
/// b        bc       c
/// ```
///
/// The vertex indices in `faces` must be valid indices into
/// `bld.mesh.verts`. Returns the faces of the subdivided mesh.
fn subdivide(
    faces: &[[usize; 3]],
    bld: &mut Builder<Normal3>,
    midpoints: &mut BTreeMap<[usize; 2], usize>,
) -> Vec<[usize; 3]> {
    let mut result = Vec::with_capacity(4 * faces.len());
    for &[i, j, k] in faces {
        let mut get = |i: usize, j: usize| {
            // Adjacent faces traverse a shared edge in opposite
            // directions, so the cache key has to be sorted
            *midpoints.entry([i.min(j), i.max(j)]).or_insert_with(|| {
                let a = bld.mesh.verts[i];
                let b = bld.mesh.verts[j];
                let n = a.midpoint(&b).pos.to_vec().normalize().to();
                bld.push_vert(n.to_pt(), n)
            })
        };
        let [ij, ik, jk] = [get(i, j), get(i, k), get(j, k)];
        result.extend([[i, ij, ik], [j, jk, ij], [k, ik, jk], [ij, jk, ik]]);
    }
    result
}
