//! Core domain types for routes, presets, variants, and collections.

pub mod collection;
pub mod preset;
pub mod route;
pub mod variant;
