//! Derives for tether HTTP actions.
//!
//! The derives register the marker attributes with the compiler and check
//! them while the crate builds, so a malformed binding fails at the struct
//! instead of when `tether-gen` runs. They expand to nothing; helpers are
//! still produced by the generator.
//!
//! - [`HttpAction`] - an action struct carrying `#[http_action(...)]`
//! - [`ActionBase`] - an ancestor struct carrying `#[action_base]`
//!
//! ## Examples
//!
//! ```ignore
//! use tether_macros::{ActionBase, HttpAction};
//!
//! #[derive(ActionBase)]
//! #[action_base]
//! pub struct ApiAction {
//!     #[http(status)]
//!     pub status: i32,
//! }
//!
//! #[derive(HttpAction)]
//! #[http_action(method = "GET", path = "/users/{user}/repos", extends = "ApiAction")]
//! pub struct UsersRepoAction {
//!     pub base: ApiAction,
//!     #[http(path)]
//!     pub user: Option<String>,
//! }
//! ```

use proc_macro::TokenStream;

mod derive_action;

/// Checks the markers of an action struct.
///
/// ## Attributes
///
/// - `#[http_action(method = "..", path = "..", variant = "..", extends = "..")]` on the struct
/// - `#[http(...)]` on fields: `path`, `query`, `field`, `request_header`,
///   `body`, `part`, `response`, `response_header`, `status`
#[proc_macro_derive(HttpAction, attributes(http_action, action_base, http))]
pub fn derive_http_action(input: TokenStream) -> TokenStream {
    derive_action::derive_impl(input.into(), derive_action::Expected::Action).into()
}

/// Checks the markers of an ancestor struct.
///
/// Accepts `#[action_base]` or `#[action_base(extends = "..")]` and the same
/// field markers as [`HttpAction`].
#[proc_macro_derive(ActionBase, attributes(http_action, action_base, http))]
pub fn derive_action_base(input: TokenStream) -> TokenStream {
    derive_action::derive_impl(input.into(), derive_action::Expected::Base).into()
}
