//! Triangle-mesh approximations of geometric shapes.
//!
//! The solids here are built procedurally, with the tessellation detail
//! chosen at build time where the shape supports it.

#![no_std]

extern crate alloc;
extern crate core;
#[cfg(feature = "std")]
extern crate std;

pub mod solids;
