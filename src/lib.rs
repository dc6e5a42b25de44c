//! Pageserver - minimal concurrent file server
//!
//! Serves files beneath a single document root, one request per connection.

pub mod config;
pub mod error;
pub mod http;
pub mod server;
