//! Request handling for the page server.
//!
//! # Architecture
//!
//! - **`connection`**: drives one connection from read to close
//! - **`parser`**: decodes request bytes and extracts method and path
//! - **`request`**: the parsed request line
//! - **`resolver`**: maps a request path to a file under the document root
//! - **`response`**: status vocabulary and response bodies
//! - **`writer`**: sends a response, retrying partial writes
//!
//! # Connection State Machine
//!
//! ```text
//!        ┌─────────────┐
//!        │   Reading   │ ← one read of at most 1024 bytes
//!        └──────┬──────┘
//!               │ bytes received (EOF → Closed)
//!               ▼
//!        ┌──────────────────┐
//!        │   Processing     │ ← parse, resolve, load file
//!        └──────┬───────────┘     (malformed → straight to Writing)
//!               ▼
//!        ┌──────────────────┐
//!        │    Writing       │ ← status line, then body
//!        └──────┬───────────┘
//!               ▼
//!            Closed          ← shutdown, drop
//! ```

pub mod connection;
pub mod parser;
pub mod request;
pub mod resolver;
pub mod response;
pub mod writer;
