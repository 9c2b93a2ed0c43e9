//! Platonic solids and other fixed shapes.

use re::geom::{Mesh, Normal3};
use re::math::{Point3, Vec3, vec3};

use super::Build;

/// Regular icosahedron.
///
/// The Platonic solid with the most faces: twenty equilateral triangles,
/// five of which meet at each of the twelve vertices. Its near-spherical
/// shape makes it the usual starting point for sphere tessellation; see
/// [`Icosphere`][super::Icosphere].
///
/// The vertices lie at (±1, 0, ±φ), (±φ, ±1, 0), and (0, ±φ, ±1), where
/// φ ≈ 1.618 is the golden ratio.
#[derive(Copy, Clone, Debug, Default)]
pub struct Icosahedron;

/// An axis-aligned cube with a side length of 2.
///
/// Each side consists of two coplanar triangles. Corner vertices are
/// duplicated once per adjoining side, each copy carrying that side's
/// normal, so the mesh shades flat.
#[derive(Copy, Clone, Debug)]
pub struct Cube {
    /// The center point of the cube.
    pub center: Point3,
}

/// A 2×2 square in the z = 0 plane, facing the positive z direction.
#[derive(Copy, Clone, Debug)]
pub struct Square {
    /// The center point of the square.
    pub center: Point3,
}

/// The golden ratio, (1 + √5) / 2.
const PHI: f32 = 1.618_034;

impl Icosahedron {
    // Corners of three mutually orthogonal golden rectangles, one in
    // each coordinate plane
    #[rustfmt::skip]
    pub(crate) const COORDS: [Vec3; 12] = [
        // y = 0
        vec3(-PHI, 0.0, -1.0),
        vec3(-PHI, 0.0,  1.0),
        vec3( PHI, 0.0, -1.0),
        vec3( PHI, 0.0,  1.0),
        // z = 0
        vec3(-1.0, -PHI, 0.0),
        vec3( 1.0, -PHI, 0.0),
        vec3(-1.0,  PHI, 0.0),
        vec3( 1.0,  PHI, 0.0),
        // x = 0
        vec3(0.0, -1.0, -PHI),
        vec3(0.0,  1.0, -PHI),
        vec3(0.0, -1.0,  PHI),
        vec3(0.0,  1.0,  PHI),
    ];
    // The first twelve faces flank the short edges of the rectangles,
    // two per edge; the last eight have a vertex in every rectangle.
    // All faces wind counterclockwise seen from outside.
    #[rustfmt::skip]
    pub(crate) const FACES: [[usize; 3]; 20] = [
        [4, 1, 0], [1, 6, 0], [3, 5, 2], [7, 3, 2],
        [8, 5, 4], [5, 10, 4], [7, 9, 6], [11, 7, 6],
        [0, 9, 8], [9, 2, 8], [11, 1, 10], [3, 11, 10],

        [8, 4, 0], [4, 10, 1], [6, 9, 0], [11, 6, 1],
        [5, 8, 2], [10, 5, 3], [9, 7, 2], [7, 11, 3],
    ];
}

impl Build<Normal3> for Icosahedron {
    /// Builds the icosahedral mesh with flat shading.
    fn build(self) -> Mesh<Normal3> {
        let mut b = Mesh::builder();
        for (i, vs) in Self::FACES.iter().enumerate() {
            // Corners projected onto the unit sphere
            let [p0, p1, p2] = vs.map(|vi| Self::COORDS[vi].normalize());
            let n = (p1 - p0).cross(&(p2 - p0)).normalize();
            b.push_face(3 * i, 3 * i + 1, 3 * i + 2);
            for p in [p0, p1, p2] {
                b.push_vert(p.to_pt(), n);
            }
        }
        b.build()
    }
}

impl Cube {
    // Corner i of the cube has coordinates (±1, ±1, ±1), with the sign
    // of each axis taken from one bit of i: x from the highest bit,
    // z from the lowest
    #[rustfmt::skip]
    const COORDS: [Vec3; 8] = [
        vec3(-1.0, -1.0, -1.0), vec3(-1.0, -1.0,  1.0), // 0b000, 0b001
        vec3(-1.0,  1.0, -1.0), vec3(-1.0,  1.0,  1.0), // 0b010, 0b011
        vec3( 1.0, -1.0, -1.0), vec3( 1.0, -1.0,  1.0), // 0b100, 0b101
        vec3( 1.0,  1.0, -1.0), vec3( 1.0,  1.0,  1.0), // 0b110, 0b111
    ];
    // One row per side: the outward normal and the four corners,
    // in counterclockwise order as seen from outside the cube
    #[rustfmt::skip]
    const SIDES: [(Normal3, [usize; 4]); 6] = [
        (vec3(-1.0, 0.0, 0.0), [0b011, 0b010, 0b000, 0b001]),
        (vec3( 1.0, 0.0, 0.0), [0b110, 0b111, 0b101, 0b100]),
        (vec3(0.0, -1.0, 0.0), [0b000, 0b100, 0b101, 0b001]),
        (vec3(0.0,  1.0, 0.0), [0b011, 0b111, 0b110, 0b010]),
        (vec3(0.0, 0.0, -1.0), [0b010, 0b110, 0b100, 0b000]),
        (vec3(0.0, 0.0,  1.0), [0b111, 0b011, 0b001, 0b101]),
    ];
}

impl Build<Normal3> for Cube {
    /// Builds the cube mesh.
    fn build(self) -> Mesh<Normal3> {
        let c = self.center.to_vec();
        let mut b = Mesh::builder();
        for (i, (n, corners)) in Self::SIDES.iter().enumerate() {
            let v = 4 * i;
            b.push_face(v, v + 1, v + 2);
            b.push_face(v, v + 2, v + 3);
            for &ci in corners {
                b.push_vert((Self::COORDS[ci] + c).to_pt(), *n);
            }
        }
        b.build()
    }
}

impl Square {
    const COORDS: [Vec3; 4] = [
        vec3(-1.0, -1.0, 0.0),
        vec3(1.0, -1.0, 0.0),
        vec3(1.0, 1.0, 0.0),
        vec3(-1.0, 1.0, 0.0),
    ];
    const FACES: [[usize; 3]; 2] = [[0, 1, 2], [0, 2, 3]];
}

impl Build<Normal3> for Square {
    /// Builds the square mesh.
    fn build(self) -> Mesh<Normal3> {
        let c = self.center.to_vec();
        let mut b = Mesh::builder();
        b.push_faces(Self::FACES);
        for p in Self::COORDS {
            b.push_vert((p + c).to_pt(), Vec3::Z);
        }
        b.build()
    }
}

#[cfg(test)]
mod tests {
    use re::assert_approx_eq;
    use re::math::pt3;

    use super::*;

    #[test]
    fn icosahedron_counts() {
        let m = Icosahedron.build();
        // Flat shading, so each face has its own three vertices
        assert_eq!(m.faces.len(), 20);
        assert_eq!(m.verts.len(), 60);
    }

    #[test]
    fn icosahedron_face_normals_point_outward() {
        let m = Icosahedron.build();
        for v in &m.verts {
            // The faces of a convex solid centered on the origin
            // always face away from the origin
            assert!(v.attrib.dot(&v.pos.to_vec().to()) > 0.0);
            assert_approx_eq!(v.attrib.len(), 1.0);
        }
    }

    #[test]
    fn cube_counts_and_translation() {
        let m = Cube { center: pt3(1.0, 0.0, 0.0) }.build();
        assert_eq!(m.faces.len(), 12);
        assert_eq!(m.verts.len(), 24);
        for v in &m.verts {
            assert_eq!((v.pos.x() - 1.0).abs(), 1.0);
            assert_eq!(v.pos.y().abs(), 1.0);
            assert_eq!(v.pos.z().abs(), 1.0);
            // Each vertex lies on the side its normal points out of
            assert_eq!(v.attrib.dot(&(v.pos - pt3(1.0, 0.0, 0.0)).to()), 1.0);
        }
    }

    #[test]
    fn cube_faces_wind_counterclockwise() {
        let m = Cube { center: pt3(0.0, 0.0, 0.0) }.build();
        for f in &m.faces {
            let [a, b, c] = f.0.map(|i| m.verts[i].pos);
            let n = m.verts[f.0[0]].attrib;
            assert!(n.dot(&(b - a).cross(&(c - a)).to()) > 0.0);
        }
    }

    #[test]
    fn square_lies_in_z_plane() {
        let m = Square { center: pt3(0.0, 2.0, 0.0) }.build();
        assert_eq!(m.faces.len(), 2);
        assert_eq!(m.verts.len(), 4);
        for v in &m.verts {
            assert_eq!(v.pos.z(), 0.0);
            assert_eq!(v.attrib, Vec3::Z);
            assert_eq!((v.pos.y() - 2.0).abs(), 1.0);
        }
    }
}
