//! Domain types and models

pub mod credentials;
pub mod outcome;
pub mod usage;

pub use credentials::Credentials;
pub use outcome::{ApiResult, RawResponse, ResponseBody};
pub use usage::{UsageItem, UsageRequest};
