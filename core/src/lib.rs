//! ```text
//!  ____   _____  ____   _____  ___   _   _
//! |  _ \ | ____||  _ \ |  ___||_ _| | \ | |
//! | |_) ||  _|  | | | || |_    | |  |  \| |   ><(((º>
//! |  _ < | |___ | |_| ||  _|   | |  | |\  |
//! |_| \_\|_____||____/ |_|     |___||_| \_|
//! ```
//!
//! Core functionality of the `redfin` project.
//!
//! Includes a strongly typed math library with vectors, points, matrices,
//! colors, and angles; triangle mesh geometry; and a software 3D renderer
//! with customizable vertex and fragment shaders.
//!
//! # Crate features
//!
//! * `std`:
//!   Enables items that need I/O, timekeeping, or floating-point functions
//!   missing from `core`, such as the trigonometric and transcendental
//!   functions. Without it the crate depends only on `alloc`.
//!
//! * `libm`:
//!   Uses the [libm](https://crates.io/crates/libm) crate for portable
//!   software implementations of the floating-point functions.
//!
//! * `mm`:
//!   Uses the [micromath](https://crates.io/crates/micromath) crate for
//!   fast approximate floating-point functions.
//!
//! All features are disabled by default.

#![no_std]

extern crate alloc;
extern crate core;
#[cfg(feature = "std")]
extern crate std;

pub mod geom;
pub mod math;
pub mod render;
pub mod util;

pub mod prelude {
    //! The most commonly used items, re-exported in a flat namespace.

    pub use crate::{
        geom::{Mesh, Normal3, Tri, Vertex, tri, vertex},
        math::{
            Lerp,
            angle::{Angle, degs, rads, turns},
            color::{Color4, Color4f, rgba},
            mat::{
                Apply, Mat4, Matrix, ProjMat3, perspective, scale,
                translate, viewport,
            },
            point::{Point2, Point3, pt2, pt3},
            space::{Affine, Linear},
            vary::Vary,
            vec::{Vec2, Vec2i, Vec2u, Vec3, Vector, vec2, vec3},
        },
        render::{raster::Frag, shader::Shader},
        util::buf::{AsMutSlice2, AsSlice2, Buf2, MutSlice2, Slice2},
    };
}
