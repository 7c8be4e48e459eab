//! Runtime contracts for tether action helpers.
//!
//! Helpers produced by `tether-gen` implement [`ActionHelper`] for one action
//! type and are written purely against the capabilities in this crate:
//!
//! - [`RequestBuilder`] - the mutable request under construction
//! - [`Response`] / [`Header`] - a received response
//! - [`Converter`] - body (de)serialisation, with [`JsonConverter`] as the default
//! - [`HeaderMap`] / [`FromHeader`] - the header mapping response-header extraction reads from
//! - [`ActionBody`] - request parts and response bodies
//!
//! The transport that executes built requests is not part of this crate;
//! [`RecordingBuilder`] stands in for it in tests.

pub mod body;
pub mod builder;
pub mod converter;
pub mod headers;
pub mod helper;
pub mod response;

pub use body::ActionBody;
pub use builder::{BuilderCall, RecordingBuilder, RequestBuilder};
pub use converter::{ConvertError, Converter, JsonConverter};
pub use headers::{FromHeader, HeaderMap};
pub use helper::ActionHelper;
pub use response::{Header, Response};
pub use tether_define::{HttpMethod, RequestVariant};
