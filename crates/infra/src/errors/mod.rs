//! Infrastructure error plumbing

mod conversions;

pub use conversions::{describe, InfraError};
