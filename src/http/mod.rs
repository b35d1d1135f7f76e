//! HTTP client module for function probing
//!
//! Provides the request helper every probe goes through.

mod client;

pub use client::{HttpClient, HttpResponse, ABSENT};
