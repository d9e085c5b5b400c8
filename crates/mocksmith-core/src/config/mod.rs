//! Definition file loading.

pub mod error;
pub mod parser;
