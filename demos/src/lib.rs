//! Demo programs showcasing redfin features.
//!
//! The animated fish scene lives in [`fish`] and its GUI-adjustable
//! parameters in [`controls`]. The native window binary is `bin/fish`;
//! the browser variant is the `redfin-wasm-demo` crate.

pub mod controls;
pub mod fish;
