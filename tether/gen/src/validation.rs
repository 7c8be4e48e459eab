//! Structural validation of action descriptors.
//!
//! Runs before planning so a malformed action never reaches the emitter.
//! Type-level problems (a marker on a type it cannot lower) are reported by
//! the planner instead, as [`GeneratorError::UnsupportedFieldType`].
//!
//! ## Validation Checks
//!
//! - **Path template**: braces balanced and not nested
//! - **Owner chain**: every field is declared on the target or an ancestor
//! - **Body**: at most one, and never together with `Field` or `Part`
//! - **Variant**: `Field` needs form url-encoded, `Part` needs multipart
//! - **Names**: `Query`, `Field`, `RequestHeader`, `ResponseHeader` need one
//!
//! Actions without markers and `Path` markers with no matching placeholder
//! only produce warnings.
//!
//! ## Examples
//!
//! ```
//! use tether_define::{ActionDescriptor, FieldType, HttpMethod, Marker};
//! use tether_gen::validation::validate_action;
//!
//! let action = ActionDescriptor::new("crate::A", HttpMethod::Post, "/a")
//!     .with_field("first", FieldType::optional("Payload"), Marker::Body)
//!     .with_field("second", FieldType::optional("Payload"), Marker::Body);
//!
//! assert!(validate_action(&action).is_err());
//! ```

use tether_define::{ActionDescriptor, FieldBinding, Marker, MarkerKind, RequestVariant};
use tracing::warn;

use crate::errors::GeneratorError;
use crate::parser::{check_path_template, has_placeholder};

/// Validates an action descriptor before planning.
///
/// ## Errors
///
/// Returns `GeneratorError::InvalidBinding` for the first structural problem
/// found, naming the action and (where applicable) the field.
pub fn validate_action(action: &ActionDescriptor) -> Result<(), GeneratorError> {
    check_path_template(&action.path_template).map_err(|reason| invalid(action, None, reason))?;

    if !action.has_markers() {
        warn!(action = %action.target_type, "action has no marked fields");
    }

    for field in &action.fields {
        if action.depth_of(&field.enclosing_type).is_none() {
            return Err(invalid(
                action,
                Some(field),
                format!(
                    "declared on '{}', which is not in the owner chain",
                    field.enclosing_type
                ),
            ));
        }
    }

    let bodies = action.annotated_fields(MarkerKind::Body);
    if let Some(duplicate) = bodies.get(1) {
        return Err(invalid(
            action,
            Some(duplicate),
            format!(
                "duplicate Body; '{}' is already the request body",
                bodies[0].field_name
            ),
        ));
    }

    if let Some(body) = bodies.first() {
        let conflicting = action
            .annotated_fields(MarkerKind::Field)
            .into_iter()
            .chain(action.annotated_fields(MarkerKind::Part))
            .next();
        if let Some(conflict) = conflicting {
            return Err(invalid(
                action,
                Some(body),
                format!(
                    "Body cannot be combined with {} field '{}'",
                    conflict.marker.kind(),
                    conflict.field_name
                ),
            ));
        }
    }

    for field in action.annotated_fields(MarkerKind::Field) {
        if action.request_variant != RequestVariant::FormUrlEncoded {
            return Err(invalid(
                action,
                Some(field),
                format!(
                    "Field requires the form_url_encoded variant, action is {}",
                    action.request_variant
                ),
            ));
        }
    }

    for field in action.annotated_fields(MarkerKind::Part) {
        if action.request_variant != RequestVariant::Multipart {
            return Err(invalid(
                action,
                Some(field),
                format!(
                    "Part requires the multipart variant, action is {}",
                    action.request_variant
                ),
            ));
        }
    }

    for field in &action.fields {
        if let Marker::Query { name, .. }
        | Marker::Field { name }
        | Marker::RequestHeader { name }
        | Marker::ResponseHeader { name } = &field.marker
            && name.is_empty()
        {
            return Err(invalid(
                action,
                Some(field),
                format!("{} requires a non-empty name", field.marker.kind()),
            ));
        }
    }

    for field in action.annotated_fields(MarkerKind::Path) {
        let name = field.bound_name();
        if !has_placeholder(&action.path_template, name) {
            warn!(
                action = %action.target_type,
                field = %field.field_name,
                "path param '{}' has no placeholder in '{}'",
                name,
                action.path_template
            );
        }
    }

    Ok(())
}

/// Validates a helper suffix.
///
/// ## Errors
///
/// Returns `GeneratorError::InvalidHelperSuffix` when the suffix is empty or
/// contains anything but letters and numbers.
///
/// ```
/// use tether_gen::validation::validate_helper_suffix;
///
/// assert!(validate_helper_suffix("Helper").is_ok());
/// assert!(validate_helper_suffix("Helper-2").is_err());
/// ```
pub fn validate_helper_suffix(suffix: &str) -> Result<(), GeneratorError> {
    if suffix.is_empty() {
        return Err(GeneratorError::InvalidHelperSuffix {
            suffix: suffix.to_string(),
            reason: "suffix cannot be empty".to_string(),
        });
    }

    if !suffix.chars().all(|c| c.is_alphanumeric()) {
        return Err(GeneratorError::InvalidHelperSuffix {
            suffix: suffix.to_string(),
            reason: "suffix must contain only alphanumeric characters (letters and numbers)"
                .to_string(),
        });
    }

    Ok(())
}

fn invalid(
    action: &ActionDescriptor,
    field: Option<&FieldBinding>,
    reason: String,
) -> GeneratorError {
    GeneratorError::InvalidBinding {
        action: action.target_type.clone(),
        field: field.map(|f| f.field_name.clone()),
        marker: field.map(|f| f.marker.kind()),
        reason,
    }
}
