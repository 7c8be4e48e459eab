//! Convenient re-exports for building action descriptors.
//!
//! ```
//! use tether_define::prelude::*;
//!
//! let action = ActionDescriptor::new("crate::Ping", HttpMethod::Head, "/ping")
//!     .with_field("ok", FieldType::required("bool"), Marker::Status);
//! assert_eq!(action.annotated_fields(MarkerKind::Status).len(), 1);
//! ```

pub use crate::action::{ActionDescriptor, FieldBinding};
pub use crate::field::{FieldType, TypeKind};
pub use crate::marker::{Marker, MarkerKind};
pub use crate::types::{HttpMethod, RequestVariant};
