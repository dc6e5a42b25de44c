use crate::error::ServerError;
use crate::http::request::{Method, Request};

/// Decodes the raw bytes read from a connection as UTF-8.
///
/// Invalid input becomes [`ServerError::MalformedRequest`] carrying a lossy
/// decoding of the bytes, so the caller can still echo it back.
pub fn decode_request(buf: &[u8]) -> Result<&str, ServerError> {
    std::str::from_utf8(buf)
        .map_err(|_| ServerError::MalformedRequest(String::from_utf8_lossy(buf).into_owned()))
}

/// Splits request text on whitespace and takes the first two tokens as
/// method and resource path. Returns `None` when fewer than two tokens exist.
///
/// Headers and the protocol version are ignored, and the path is not
/// required to start with `/`.
pub fn parse_request(text: &str) -> Option<Request> {
    let mut tokens = text.split_whitespace();

    let method = tokens.next()?;
    let path = tokens.next()?;

    Some(Request::new(Method::from_token(method), path))
}
