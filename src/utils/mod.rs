//! Utility modules supporting the server.
//!
//! - [`HttpClient`]: shared reqwest client with timeouts and a user agent

mod http;

pub use http::{HttpClient, DEFAULT_USER_AGENT};
