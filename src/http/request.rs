use std::fmt;

/// Request method, taken verbatim from the first token of the request line.
///
/// Only `GET` is served. Anything else is kept as [`Method::Other`] so the
/// handler can still answer with "not implemented".
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Method {
    /// GET - Retrieve a resource
    Get,
    /// Any other token, case preserved
    Other(String),
}

impl Method {
    /// Maps a method token to a [`Method`]. Matching is case-sensitive.
    ///
    /// # Example
    ///
    /// ```
    /// # use pageserver::http::request::Method;
    /// assert_eq!(Method::from_token("GET"), Method::Get);
    /// assert_eq!(Method::from_token("get"), Method::Other("get".to_string()));
    /// ```
    pub fn from_token(token: &str) -> Self {
        match token {
            "GET" => Method::Get,
            other => Method::Other(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Method::Get => "GET",
            Method::Other(token) => token,
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A parsed request line. Lives only for the duration of one connection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Request {
    /// The request method
    pub method: Method,
    /// The resource path, exactly as sent (e.g. "/index.html")
    pub path: String,
}

impl Request {
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
        }
    }

    pub fn is_get(&self) -> bool {
        self.method == Method::Get
    }
}
