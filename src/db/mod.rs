//! Database access for shared models

pub mod queries;

pub use queries::*;
