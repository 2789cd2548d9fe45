//! HTTP client primitives

pub mod client;

pub use client::{HttpClient, HttpClientBuilder};
