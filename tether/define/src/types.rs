//! Core request-shape types for action definitions.
//!
//! - [`HttpMethod`] - HTTP method enumeration
//! - [`RequestVariant`] - Request transport variant (simple, form, multipart)

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

/// HTTP methods an action may declare.
///
/// ## Examples
///
/// Parse from string:
///
/// ```
/// use std::str::FromStr;
/// use tether_define::HttpMethod;
///
/// let method = HttpMethod::from_str("GET").unwrap();
/// assert_eq!(method, HttpMethod::Get);
/// ```
///
/// Display as uppercase:
///
/// ```
/// use tether_define::HttpMethod;
///
/// assert_eq!(HttpMethod::Post.to_string(), "POST");
/// ```
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumIter, EnumString,
)]
#[serde(rename_all = "UPPERCASE")]
#[strum(serialize_all = "UPPERCASE")]
pub enum HttpMethod {
    /// HTTP GET - Retrieve a resource
    Get,
    /// HTTP POST - Create a new resource
    Post,
    /// HTTP PUT - Replace a resource entirely
    Put,
    /// HTTP PATCH - Partially update a resource
    Patch,
    /// HTTP DELETE - Remove a resource
    Delete,
    /// HTTP HEAD - Get headers only (no body)
    Head,
    /// HTTP OPTIONS - Get allowed methods for a resource
    Options,
}

impl HttpMethod {
    /// The variant identifier as it appears in generated code (`Get`, `Post`, ...).
    pub fn variant_name(self) -> &'static str {
        match self {
            HttpMethod::Get => "Get",
            HttpMethod::Post => "Post",
            HttpMethod::Put => "Put",
            HttpMethod::Patch => "Patch",
            HttpMethod::Delete => "Delete",
            HttpMethod::Head => "Head",
            HttpMethod::Options => "Options",
        }
    }
}

/// How the request body is transported.
///
/// `FormField` markers are only legal with [`RequestVariant::FormUrlEncoded`]
/// and `Part` markers only with [`RequestVariant::Multipart`].
///
/// ```
/// use std::str::FromStr;
/// use tether_define::RequestVariant;
///
/// assert_eq!(RequestVariant::from_str("multipart").unwrap(), RequestVariant::Multipart);
/// assert_eq!(RequestVariant::from_str("form").unwrap(), RequestVariant::FormUrlEncoded);
/// assert_eq!(RequestVariant::default(), RequestVariant::Simple);
/// ```
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumIter,
    EnumString,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum RequestVariant {
    /// Plain request; the body (if any) is passed through to the converter.
    #[default]
    Simple,
    /// `application/x-www-form-urlencoded` fields.
    #[strum(to_string = "form_url_encoded", serialize = "form")]
    FormUrlEncoded,
    /// `multipart/form-data` parts.
    Multipart,
}

impl RequestVariant {
    /// The variant identifier as it appears in generated code.
    pub fn variant_name(self) -> &'static str {
        match self {
            RequestVariant::Simple => "Simple",
            RequestVariant::FormUrlEncoded => "FormUrlEncoded",
            RequestVariant::Multipart => "Multipart",
        }
    }
}
