//! Tether Action Model
//!
//! This crate provides the types describing an HTTP *action*: a data object
//! whose fields collectively describe one HTTP request and the slots its
//! response is projected into. Descriptors built from these types are
//! consumed by `tether-gen`, which lowers them into helper implementations.
//!
//! ## Core Types
//!
//! - [`ActionDescriptor`] - One action: target type, owner chain, method, variant, path, fields
//! - [`FieldBinding`] - A marked field, with its enclosing type and declared type
//! - [`Marker`] / [`MarkerKind`] - The role of a field (`Path`, `Query`, `Body`, `Status`, ...)
//! - [`FieldType`] / [`TypeKind`] - Classification of a field's static type
//! - [`HttpMethod`] - HTTP methods (GET, POST, PUT, etc.)
//! - [`RequestVariant`] - Request transport (simple, form url-encoded, multipart)
//!
//! ## Examples
//!
//! ```
//! use tether_define::{ActionDescriptor, FieldType, HttpMethod, Marker, MarkerKind, RequestVariant};
//!
//! let login = ActionDescriptor::new("crate::auth::LoginAction", HttpMethod::Post, "/login")
//!     .with_variant(RequestVariant::FormUrlEncoded)
//!     .with_field("user", FieldType::optional("String"), Marker::field("u"))
//!     .with_field("pass", FieldType::optional("String"), Marker::field("p"))
//!     .with_field("code", FieldType::required("i32"), Marker::Status);
//!
//! assert_eq!(login.helper_name(), "LoginActionHelper");
//! assert_eq!(login.annotated_fields(MarkerKind::Field).len(), 2);
//! ```

pub mod action;
pub mod field;
pub mod marker;
pub mod prelude;
pub mod types;

// Re-export main types at crate root
pub use action::{ActionDescriptor, FieldBinding, HELPER_SUFFIX, simple_name_of};
pub use field::{FieldType, TypeKind};
pub use marker::{ANY_STATUS, DEFAULT_PART_ENCODING, Marker, MarkerKind};
pub use types::{HttpMethod, RequestVariant};
