//! Field markers: the declarative role of a field in a request or response.
//!
//! The marker vocabulary is `Path`, `Query`, `Field`, `RequestHeader`, `Body`,
//! `Part`, `Response(status)`, `ResponseHeader` and `Status`. Each field
//! carries exactly one [`Marker`].

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

/// Default MIME encoding for multipart parts.
pub const DEFAULT_PART_ENCODING: &str = "binary";

/// Status value meaning "apply for any status".
pub const ANY_STATUS: u16 = 0;

/// The marker attached to an action field, with its parameters.
///
/// ## Examples
///
/// ```
/// use tether_define::{Marker, MarkerKind};
///
/// let marker = Marker::query("sort");
/// assert_eq!(marker.kind(), MarkerKind::Query);
/// assert_eq!(marker.kind().to_string(), "Query");
///
/// let catch_all = Marker::response();
/// assert!(catch_all.is_catch_all());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Marker {
    /// Substitutes a `{name}` placeholder of the path template.
    Path { name: String, encode: bool },
    /// Appends a query parameter.
    Query {
        name: String,
        encode_name: bool,
        encode_value: bool,
    },
    /// Adds a url-encoded form field.
    Field { name: String },
    /// Adds a request header from the field value.
    RequestHeader { name: String },
    /// The whole request body.
    Body,
    /// Adds a multipart part.
    Part { name: String, encoding: String },
    /// Receives the converted response body when the status matches
    /// (`0` matches any status).
    Response { status: u16 },
    /// Receives a response header value.
    ResponseHeader { name: String },
    /// Receives a projection of the response status.
    Status,
}

/// The kind of a [`Marker`], without parameters.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumIter, EnumString,
)]
pub enum MarkerKind {
    Path,
    Query,
    Field,
    RequestHeader,
    Body,
    Part,
    Response,
    ResponseHeader,
    Status,
}

impl Marker {
    /// `Path` with a name (empty means "use the field name") and encoding on.
    pub fn path(name: impl Into<String>) -> Self {
        Marker::Path {
            name: name.into(),
            encode: true,
        }
    }

    /// `Query` with name and value encoding on.
    pub fn query(name: impl Into<String>) -> Self {
        Marker::Query {
            name: name.into(),
            encode_name: true,
            encode_value: true,
        }
    }

    pub fn field(name: impl Into<String>) -> Self {
        Marker::Field { name: name.into() }
    }

    pub fn request_header(name: impl Into<String>) -> Self {
        Marker::RequestHeader { name: name.into() }
    }

    /// `Part` with the default encoding.
    pub fn part(name: impl Into<String>) -> Self {
        Marker::Part {
            name: name.into(),
            encoding: DEFAULT_PART_ENCODING.to_string(),
        }
    }

    /// Catch-all `Response`.
    pub fn response() -> Self {
        Marker::Response { status: ANY_STATUS }
    }

    pub fn response_status(status: u16) -> Self {
        Marker::Response { status }
    }

    pub fn response_header(name: impl Into<String>) -> Self {
        Marker::ResponseHeader { name: name.into() }
    }

    pub fn kind(&self) -> MarkerKind {
        match self {
            Marker::Path { .. } => MarkerKind::Path,
            Marker::Query { .. } => MarkerKind::Query,
            Marker::Field { .. } => MarkerKind::Field,
            Marker::RequestHeader { .. } => MarkerKind::RequestHeader,
            Marker::Body => MarkerKind::Body,
            Marker::Part { .. } => MarkerKind::Part,
            Marker::Response { .. } => MarkerKind::Response,
            Marker::ResponseHeader { .. } => MarkerKind::ResponseHeader,
            Marker::Status => MarkerKind::Status,
        }
    }

    /// True for a `Response` marker with status `0`.
    pub fn is_catch_all(&self) -> bool {
        matches!(self, Marker::Response { status } if *status == ANY_STATUS)
    }

    /// The declared name parameter, if this kind has one.
    pub fn declared_name(&self) -> Option<&str> {
        match self {
            Marker::Path { name, .. }
            | Marker::Query { name, .. }
            | Marker::Field { name }
            | Marker::RequestHeader { name }
            | Marker::Part { name, .. }
            | Marker::ResponseHeader { name } => Some(name),
            Marker::Body | Marker::Response { .. } | Marker::Status => None,
        }
    }
}

impl MarkerKind {
    /// Whether the marker contributes to request assembly (as opposed to
    /// response extraction).
    pub fn is_request_side(self) -> bool {
        matches!(
            self,
            MarkerKind::Path
                | MarkerKind::Query
                | MarkerKind::Field
                | MarkerKind::RequestHeader
                | MarkerKind::Body
                | MarkerKind::Part
        )
    }
}
