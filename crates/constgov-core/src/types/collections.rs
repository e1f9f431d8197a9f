//! Fast hash collections used by the index-building validators.
//!
//! Iteration order of these maps is unspecified; callers sort before rendering.

pub use rustc_hash::FxHashMap;
