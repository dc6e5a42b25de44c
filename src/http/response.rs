use bytes::Bytes;

const HTTP_VERSION: &str = "HTTP/1.0";

const FORBIDDEN_BODY: &str = "\nRequest paths may not start with /.. or /~ or leave the document root.\n";
const NOT_FOUND_BODY: &str = "\nThe requested page does not exist.\n";
const INTERNAL_ERROR_BODY: &str = "\nThe requested page could not be read.\n";

/// Status vocabulary of the page server.
///
/// - `Ok` (200): file found and sent
/// - `NotImplemented` (401): unparsable or non-GET request
/// - `Forbidden` (403): illegal path syntax or path escapes the document root
/// - `NotFound` (404): nothing exists at the requested path
/// - `InternalServerError` (500): the file exists but could not be read
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusCode {
    /// 200 OK
    Ok,
    /// 401 Not Implemented
    NotImplemented,
    /// 403 Forbidden
    Forbidden,
    /// 404 Not Found
    NotFound,
    /// 500 Internal Server Error
    InternalServerError,
}

impl StatusCode {
    /// Returns the numeric status code sent on the wire.
    ///
    /// "Not implemented" goes out as 401, not 501; existing clients of this
    /// server match on that code.
    ///
    /// # Example
    ///
    /// ```
    /// # use pageserver::http::response::StatusCode;
    /// assert_eq!(StatusCode::Ok.as_u16(), 200);
    /// assert_eq!(StatusCode::NotImplemented.as_u16(), 401);
    /// ```
    pub fn as_u16(&self) -> u16 {
        match self {
            StatusCode::Ok => 200,
            StatusCode::NotImplemented => 401,
            StatusCode::Forbidden => 403,
            StatusCode::NotFound => 404,
            StatusCode::InternalServerError => 500,
        }
    }

    pub fn reason_phrase(&self) -> &'static str {
        match self {
            StatusCode::Ok => "OK",
            StatusCode::NotImplemented => "Not Implemented",
            StatusCode::Forbidden => "Forbidden",
            StatusCode::NotFound => "Not Found",
            StatusCode::InternalServerError => "Internal Server Error",
        }
    }

    /// The full status line including the blank line that ends it,
    /// e.g. `"HTTP/1.0 200 OK\n\n"`.
    pub fn status_line(&self) -> String {
        format!(
            "{} {} {}\n\n",
            HTTP_VERSION,
            self.as_u16(),
            self.reason_phrase()
        )
    }
}

/// A response ready to be transmitted: a status line, then the body.
/// No headers are ever sent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response {
    pub status: StatusCode,
    pub body: Bytes,
}

impl Response {
    pub fn new(status: StatusCode, body: impl Into<Bytes>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    /// 200 with the file contents as body.
    pub fn ok(body: impl Into<Bytes>) -> Self {
        Self::new(StatusCode::Ok, body)
    }

    pub fn forbidden() -> Self {
        Self::new(StatusCode::Forbidden, FORBIDDEN_BODY)
    }

    pub fn not_found() -> Self {
        Self::new(StatusCode::NotFound, NOT_FOUND_BODY)
    }

    /// 401 echoing the request text that could not be handled.
    pub fn not_implemented(raw_request: &str) -> Self {
        Self::new(
            StatusCode::NotImplemented,
            format!("\nI don't handle this request: {}\n", raw_request),
        )
    }

    pub fn internal_error() -> Self {
        Self::new(StatusCode::InternalServerError, INTERNAL_ERROR_BODY)
    }

    pub fn status_line(&self) -> String {
        self.status.status_line()
    }
}
