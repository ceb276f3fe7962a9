//! Business services built on the domain layer.

pub mod verification;

pub use verification::*;
