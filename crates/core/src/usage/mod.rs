//! Metered usage reporting domain

pub mod builder;
pub mod classifier;
pub mod options;
pub mod policy;
pub mod ports;
pub mod service;

pub use ports::*;
pub use service::*;
