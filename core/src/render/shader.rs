//! Programmable vertex and fragment stages.
//!
//! The fixed parts of the pipeline, clipping and rasterization, are
//! parameterized by two user-supplied functions. The vertex stage maps each
//! input vertex to clip space and attaches whatever attributes the fragment
//! stage will need, typically by applying a model-view-projection matrix and
//! evaluating per-vertex lighting terms. The fragment stage then turns each
//! rasterized fragment, with those attributes interpolated across the
//! triangle, into a color, or discards it.
//!
//! Any `Fn` with a matching signature works as a shader, so closures
//! capturing their environment are the common case.

use crate::geom::Vertex;
use crate::math::{Color4, vec::ProjVec3};
use crate::render::raster::Frag;

/// The per-vertex stage of a shader.
///
/// Maps an input vertex of type `In` to an output vertex, given uniform
/// data of type `Uni` shared by every vertex of a draw call.
pub trait VertexShader<In, Uni> {
    /// The output vertex type, position in clip space.
    type Output;

    /// Transforms a single vertex.
    ///
    /// Must not panic; the pipeline calls this for every input vertex
    /// without catching unwinds.
    fn shade_vertex(&self, vertex: In, uniform: Uni) -> Self::Output;
}

/// The per-fragment stage of a shader.
///
/// `F` is the fragment type, usually [`Frag<V>`] with `V` the attribute
/// payload interpolated from the triangle's vertices.
pub trait FragmentShader<F> {
    /// Returns the color of `frag`, or `None` to discard it.
    ///
    /// Must not panic; the pipeline calls this for every covered pixel
    /// without catching unwinds.
    fn shade_fragment(&self, frag: F) -> Option<Color4>;
}

/// A vertex and a fragment stage packaged as one value.
#[derive(Copy, Clone)]
pub struct Shader<Vs, Fs> {
    pub vertex_shader: Vs,
    pub fragment_shader: Fs,
}

/// Returns a shader made of the stages `vs` and `fs`.
///
/// Like [`Shader::new`] but constrains the vertex output position to clip
/// space, which helps type inference when the stages are closures.
pub fn new<Vs, Fs, In, Var, Uni>(vs: Vs, fs: Fs) -> Shader<Vs, Fs>
where
    Vs: VertexShader<In, Uni, Output = Vertex<ProjVec3, Var>>,
    Fs: FragmentShader<Frag<Var>>,
{
    Shader::new(vs, fs)
}

impl<Vs, Fs> Shader<Vs, Fs> {
    /// Returns a shader made of the stages `vs` and `fs`.
    pub const fn new<Vtx, Uni, Pos, Attr>(vs: Vs, fs: Fs) -> Self
    where
        Vs: VertexShader<Vtx, Uni, Output = Vertex<Pos, Attr>>,
        Fs: FragmentShader<Frag<Attr>>,
    {
        Self {
            vertex_shader: vs,
            fragment_shader: fs,
        }
    }
}

//
// Local trait impls
//

// Plain functions and closures work as vertex shaders

impl<F, In, Uni, Out> VertexShader<In, Uni> for F
where
    F: Fn(In, Uni) -> Out,
{
    type Output = Out;

    fn shade_vertex(&self, vertex: In, uniform: Uni) -> Self::Output {
        self(vertex, uniform)
    }
}

// Likewise as fragment shaders; returning a bare Color4 shades
// unconditionally, returning an Option allows discarding

impl<F, Frg, Out> FragmentShader<Frg> for F
where
    F: Fn(Frg) -> Out,
    Out: Into<Option<Color4>>,
{
    fn shade_fragment(&self, frag: Frg) -> Option<Color4> {
        self(frag).into()
    }
}

impl<Vs, Fs, In, Uni> VertexShader<In, Uni> for Shader<Vs, Fs>
where
    Vs: VertexShader<In, Uni>,
{
    type Output = Vs::Output;

    fn shade_vertex(&self, vertex: In, uniform: Uni) -> Self::Output {
        self.vertex_shader.shade_vertex(vertex, uniform)
    }
}

impl<Vs, Fs, Frg> FragmentShader<Frg> for Shader<Vs, Fs>
where
    Fs: FragmentShader<Frg>,
{
    fn shade_fragment(&self, frag: Frg) -> Option<Color4> {
        self.fragment_shader.shade_fragment(frag)
    }
}
