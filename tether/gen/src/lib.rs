//! Tether helper generator library.
//!
//! This crate turns action descriptors from `tether-define` into helpers
//! that bind an action to the request/response runtime ahead of time. Each
//! generated helper implements `tether_runtime::ActionHelper` with:
//!
//! - `fill_request` - populates a request builder from the action
//! - `on_response` - hydrates the action from a received response
//!
//! ## Modules
//!
//! - [`scanner`] - Finds marked action structs in Rust sources
//! - [`attrs`] - Parses the marker attributes (shared with `tether-macros`)
//! - [`validation`] - Structural checks run before planning
//! - [`planner`] - Lowers a descriptor into ordered binding steps
//! - [`codegen`] - Renders a plan into helper tokens
//! - [`output`] - Validation, formatting, file sinks and the generation pass
//! - [`parser`] - Path template utilities
//! - [`errors`] - Error types for the generator
//!
//! ## Example Usage
//!
//! ```
//! use tether_define::{ActionDescriptor, FieldType, HttpMethod, Marker};
//! use tether_gen::codegen::EmitterConfig;
//! use tether_gen::output::{FailureMode, MemorySink, generate_all};
//!
//! let action = ActionDescriptor::new("crate::api::UsersRepoAction", HttpMethod::Get, "/users/{user}/repos")
//!     .with_field("user", FieldType::optional("String"), Marker::path(""))
//!     .with_field("sort", FieldType::optional("String"), Marker::query("sort"));
//!
//! let mut sink = MemorySink::new();
//! let report = generate_all(&[action], &EmitterConfig::default(), &mut sink, FailureMode::FailFast).unwrap();
//!
//! assert_eq!(report.emitted, vec!["UsersRepoActionHelper"]);
//! assert!(sink.artifacts()[0].source.contains("impl ::tether_runtime::ActionHelper<crate::api::UsersRepoAction>"));
//! ```
//!
//! ## Generated Code Structure
//!
//! The file is a child module of the action's module
//! (`src/api/users_repo_action_helper.rs` for `crate::api`, declared there as
//! `mod users_repo_action_helper;`):
//!
//! ```text
//! // This code was automatically generated by tether-gen. Do not edit manually.
//! #[allow(unused_imports)]
//! use super::*;
//! /// Tether compile time, autogenerated helper which fills `UsersRepoAction`.
//! pub struct UsersRepoActionHelper;
//! impl ::tether_runtime::ActionHelper<crate::api::UsersRepoAction> for UsersRepoActionHelper {
//!     fn fill_request<'b, B: ::tether_runtime::RequestBuilder>(&self, request_builder: &'b mut B, action: &crate::api::UsersRepoAction) -> &'b mut B { .. }
//!     fn on_response<C: ::tether_runtime::Converter>(&self, mut action: crate::api::UsersRepoAction, response: &::tether_runtime::Response, converter: &C) -> ::core::result::Result<crate::api::UsersRepoAction, C::Error> { .. }
//! }
//! ```

pub mod attrs;
pub mod codegen;
pub mod errors;
pub mod output;
pub mod parser;
pub mod planner;
pub mod scanner;
pub mod validation;

#[cfg(test)]
pub(crate) mod test_utils;

pub use codegen::EmitterConfig;
pub use errors::GeneratorError;
pub use output::{FailureMode, FileSink, GenerationReport, generate_all, render_helper};
pub use planner::{BindingPlan, plan};
