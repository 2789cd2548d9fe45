//! Request signing

pub mod oauth1;

pub use oauth1::{signature_base_string, OAuth1Signer};
