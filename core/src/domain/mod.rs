//! Domain layer: entities of the verification lifecycle.

pub mod entities;

pub use entities::*;
