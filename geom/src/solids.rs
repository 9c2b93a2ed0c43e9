//! Mesh approximations of various geometric shapes.

use re::geom::Mesh;

mod platonic;
mod subdiv;

pub use platonic::*;
pub use subdiv::*;

/// Trait for shapes that can be approximated by a triangle mesh.
pub trait Build<A> {
    /// Builds the mesh approximation of `self`.
    fn build(self) -> Mesh<A>;
}
