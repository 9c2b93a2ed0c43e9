//! Rendering context and parameters.

use core::{cell::RefCell, cmp::Ordering};

use crate::math::{Color4, rgba};

use super::Stats;

/// Settings and bookkeeping shared by draw calls.
///
/// A `Context` bundles the fixed-function switches of the pipeline, what to
/// clear, what to cull, how to depth test, together with the [`Stats`]
/// accumulator. Draw calls borrow it immutably; the stats cell makes the
/// counters updatable regardless.
#[derive(Clone, Debug)]
pub struct Context {
    /// Color used to clear the color buffer, or `None` to skip clearing.
    ///
    /// Skipping is safe when the drawn geometry is known to cover every
    /// pixel of the frame.
    pub color_clear: Option<Color4>,

    /// Value used to clear the depth buffer, or `None` to skip clearing.
    ///
    /// The depth buffer holds *reciprocal* depth, so the farthest possible
    /// value is 0.0 rather than infinity.
    pub depth_clear: Option<f32>,

    /// Which faces to discard based on their winding, if any.
    ///
    /// For closed meshes every back-facing triangle is covered by some
    /// front-facing one, so culling backfaces skips work without changing
    /// the image.
    pub face_cull: Option<FaceCull>,

    /// The depth test predicate, or `None` to disable depth testing.
    ///
    /// With `Some(Ordering::Less)`, the default, a fragment passes only if
    /// it is nearer than the value already in the depth buffer. Ignored by
    /// render targets without a depth buffer.
    pub depth_test: Option<Ordering>,

    /// Whether passing fragments write their color.
    ///
    /// With `false` the rest of fragment processing still runs. Ignored by
    /// render targets without color output.
    pub color_write: bool,

    /// Whether passing fragments write their depth.
    ///
    /// With `false` the rest of fragment processing still runs. Ignored by
    /// render targets without a depth buffer.
    pub depth_write: bool,

    /// Accumulated performance counters.
    pub stats: RefCell<Stats>,
}

/// Whether to cull front faces or backfaces.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum FaceCull {
    Front,
    Back,
}

impl Context {
    /// Returns whether the reciprocal depth value `new` passes the depth
    /// test against the stored value `curr`.
    ///
    /// Always returns `true` if depth testing is disabled.
    #[inline]
    pub fn depth_test(&self, new: f32, curr: f32) -> bool {
        // The operands are reciprocals, so the comparison is flipped
        self.depth_test.is_none() || self.depth_test == curr.partial_cmp(&new)
    }

    /// Returns whether a face with the given orientation should be culled.
    #[inline]
    pub fn face_cull(&self, is_backface: bool) -> bool {
        match self.face_cull {
            Some(FaceCull::Back) if is_backface => true,
            Some(FaceCull::Front) if !is_backface => true,
            _ => false,
        }
    }
}

impl Default for Context {
    /// Returns a context with the standard settings:
    ///
    /// * Clear color to opaque black, depth to 0.0 (farthest)
    /// * Cull backfaces
    /// * Depth test passes if closer; color and depth writes on
    fn default() -> Self {
        Self {
            color_clear: Some(rgba(0, 0, 0, 0xFF)),
            depth_clear: Some(0.0),
            face_cull: Some(FaceCull::Back),
            color_write: true,
            depth_test: Some(Ordering::Less),
            depth_write: true,
            stats: Default::default(),
        }
    }
}
