//! Helper emission: renders a [`BindingPlan`] into Rust tokens.
//!
//! Each plan step becomes exactly one statement; nothing is reordered or
//! optimised away.
//!
//! ## Submodules
//!
//! - [`fill_request`] - Renders request steps into `fill_request`
//! - [`on_response`] - Renders response steps into `on_response`
//! - [`helper`] - Assembles the helper struct and its `ActionHelper` impl
//!
//! ## Output Format
//!
//! All generators return `proc_macro2::TokenStream`, which is then:
//! - Validated with `syn::parse2` to ensure correctness
//! - Formatted with `prettyplease` for consistent style
//!
//! See [`crate::output`] for validation, formatting and sinks.
//!
//! [`BindingPlan`]: crate::planner::BindingPlan

pub mod fill_request;
pub mod helper;
pub mod on_response;

use proc_macro2::TokenStream;
use quote::{ToTokens, quote};

use crate::errors::GeneratorError;
use crate::planner::{FieldAddress, FieldRef};
use crate::validation::validate_helper_suffix;

pub use fill_request::generate_fill_request;
pub use helper::generate_helper;
pub use on_response::generate_on_response;
pub use tether_define::HELPER_SUFFIX;

/// Default path generated helpers use to reach the runtime crate.
pub const DEFAULT_RUNTIME_PATH: &str = "::tether_runtime";

/// Naming and path settings for emitted helpers.
///
/// ## Examples
///
/// ```
/// use tether_gen::codegen::EmitterConfig;
///
/// let config = EmitterConfig::default().with_suffix("Binder");
/// assert_eq!(config.helper_suffix, "Binder");
/// assert_eq!(config.runtime_path, "::tether_runtime");
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmitterConfig {
    /// Appended to the action's simple name to form the helper name.
    pub helper_suffix: String,
    /// Path of the runtime crate as seen from the generated code.
    pub runtime_path: String,
}

impl Default for EmitterConfig {
    fn default() -> Self {
        Self {
            helper_suffix: HELPER_SUFFIX.to_string(),
            runtime_path: DEFAULT_RUNTIME_PATH.to_string(),
        }
    }
}

impl EmitterConfig {
    pub fn with_suffix(mut self, suffix: impl Into<String>) -> Self {
        self.helper_suffix = suffix.into();
        self
    }

    pub fn with_runtime_path(mut self, path: impl Into<String>) -> Self {
        self.runtime_path = path.into();
        self
    }

    /// Checks the suffix and the runtime path.
    ///
    /// ## Errors
    ///
    /// - `GeneratorError::InvalidHelperSuffix` for an empty or non-alphanumeric suffix
    /// - `GeneratorError::ConfigError` when the runtime path is not a Rust path
    pub fn validate(&self) -> Result<(), GeneratorError> {
        validate_helper_suffix(&self.helper_suffix)?;
        self.runtime_tokens().map(|_| ())
    }

    pub(crate) fn runtime_tokens(&self) -> Result<TokenStream, GeneratorError> {
        syn::parse_str::<syn::Path>(&self.runtime_path)
            .map(|path| path.to_token_stream())
            .map_err(|e| {
                GeneratorError::ConfigError(format!(
                    "runtime path '{}' is not a valid Rust path: {e}",
                    self.runtime_path
                ))
            })
    }
}

/// Parses a type path or type text into tokens.
pub(crate) fn type_tokens(ty: &str) -> Result<TokenStream, GeneratorError> {
    syn::parse_str::<syn::Type>(ty)
        .map(|ty| ty.to_token_stream())
        .map_err(|e| GeneratorError::CodeGenError(format!("'{ty}' is not a valid Rust type: {e}")))
}

/// Parses a field name (raw identifiers included) into an identifier.
pub(crate) fn field_ident(name: &str) -> Result<syn::Ident, GeneratorError> {
    syn::parse_str::<syn::Ident>(name).map_err(|e| {
        GeneratorError::CodeGenError(format!("'{name}' is not a valid field name: {e}"))
    })
}

/// The expression reading a field from `action: &A`.
pub(crate) fn read_expr(field: &FieldRef) -> Result<TokenStream, GeneratorError> {
    let ident = field_ident(&field.name)?;
    Ok(match &field.address {
        FieldAddress::Direct => quote! { action.#ident },
        FieldAddress::Ancestor(owner) => {
            let owner = type_tokens(owner)?;
            quote! { ::core::convert::AsRef::<#owner>::as_ref(action).#ident }
        }
    })
}

/// The place expression writing a field of `mut action: A`.
pub(crate) fn write_expr(field: &FieldRef) -> Result<TokenStream, GeneratorError> {
    let ident = field_ident(&field.name)?;
    Ok(match &field.address {
        FieldAddress::Direct => quote! { action.#ident },
        FieldAddress::Ancestor(owner) => {
            let owner = type_tokens(owner)?;
            quote! { ::core::convert::AsMut::<#owner>::as_mut(&mut action).#ident }
        }
    })
}
