//! Received HTTP responses.

use crate::body::ActionBody;

/// One response header, in the order the transport received it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Header {
    pub name: String,
    pub value: String,
}

impl Header {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

/// A response as handed to a helper's `on_response`.
///
/// ## Examples
///
/// ```
/// use tether_runtime::{ActionBody, Response};
///
/// let response = Response::new(404, ActionBody::empty()).with_header("ETag", "\"v1\"");
/// assert!(!response.is_successful());
/// assert_eq!(response.headers.len(), 1);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Response {
    pub status: u16,
    pub headers: Vec<Header>,
    pub body: ActionBody,
}

impl Response {
    pub fn new(status: u16, body: ActionBody) -> Self {
        Self {
            status,
            headers: Vec::new(),
            body,
        }
    }

    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push(Header::new(name, value));
        self
    }

    /// True for 2xx statuses.
    pub fn is_successful(&self) -> bool {
        (200..300).contains(&self.status)
    }
}
