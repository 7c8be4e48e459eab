//! Binding planner: lowers one action descriptor into ordered steps.
//!
//! The planner is a pure function. [`plan`] validates the descriptor, then
//! walks the marker groups in their fixed order and produces a
//! [`BindingPlan`] whose two step lists the emitter renders one statement at
//! a time, without reordering.
//!
//! ## Request order
//!
//! method, variant, path, then path params, parts, request headers, form
//! fields, query params and the body, then the builder is returned.
//!
//! ## Response order
//!
//! status projections, response bodies, the header map (only when needed),
//! header extractions, then the action is returned.
//!
//! Response bodies with a specific status become the branches of a single
//! [`ResponseStep::DispatchBody`], in declaration order. Catch-all bodies
//! form its fallback and therefore only run when no branch matched. Without
//! any specific status the catch-alls are emitted unconditionally.
//!
//! ## Optionality
//!
//! A step is wrapped in [`RequestStep::IfPresent`] exactly when its field is
//! an `Option`. Non-optional fields can never be absent, so their steps are
//! unconditional; this covers primitive query params as a special case.

use tether_define::{
    ActionDescriptor, FieldBinding, HttpMethod, Marker, MarkerKind, RequestVariant, TypeKind,
};
use tracing::debug;

use crate::errors::GeneratorError;
use crate::validation::validate_action;

/// How a field is reached from the action value.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum FieldAddress {
    /// Declared on the action type itself: `action.field`.
    Direct,
    /// Declared on the named ancestor, reached through `AsRef`/`AsMut`.
    Ancestor(String),
}

/// A field plus the address rule used to read or write it.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FieldRef {
    pub name: String,
    pub address: FieldAddress,
}

impl FieldRef {
    fn of(action: &ActionDescriptor, field: &FieldBinding) -> Self {
        let address = if action.is_inherited(field) {
            FieldAddress::Ancestor(field.enclosing_type.clone())
        } else {
            FieldAddress::Direct
        };
        Self {
            name: field.field_name.clone(),
            address,
        }
    }
}

/// How a multipart part body is built from the field value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PartBody {
    /// File-backed body from a `PathBuf`.
    File,
    /// Bytes-backed body from a `Vec<u8>`.
    Bytes,
    /// Bytes-backed body from the UTF-8 bytes of a `String`.
    StringBytes,
    /// The value converts into a body itself.
    AsIs,
}

/// One statement of `fill_request`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum RequestStep {
    SetMethod(HttpMethod),
    SetRequestVariant(RequestVariant),
    SetPath(String),
    /// Runs `step` only when the optional `field` holds a value.
    IfPresent {
        field: FieldRef,
        step: Box<RequestStep>,
    },
    AddPathParam {
        field: FieldRef,
        name: String,
        encode: bool,
    },
    AddPart {
        field: FieldRef,
        name: String,
        body: PartBody,
        encoding: String,
    },
    AddHeader {
        field: FieldRef,
        name: String,
    },
    AddField {
        field: FieldRef,
        name: String,
    },
    AddQueryParam {
        field: FieldRef,
        name: String,
        encode_name: bool,
        encode_value: bool,
    },
    /// Passes the body through, absent or not.
    SetBody { field: FieldRef, optional: bool },
    /// Hands an `ActionBody` field to the builder untouched.
    SetRawBody { field: FieldRef, optional: bool },
    ReturnBuilder,
}

/// Projection of `response.status` into a `Status` field.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum StatusProjection {
    /// `response.is_successful()`
    Successful,
    /// Narrowing cast to the named integer type.
    Integral(String),
    /// Lossless widening into the named integer type.
    Long(String),
    /// Decimal text of the status.
    Decimal,
}

/// How a response body is turned into a field value.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum BodyConversion {
    /// The body itself.
    Raw,
    /// The body rendered as text.
    Text,
    /// Decoded through the converter into the named type.
    Convert(String),
}

/// One statement of `on_response`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ResponseStep {
    AssignStatus {
        target: FieldRef,
        projection: StatusProjection,
        optional: bool,
    },
    /// Runs the first branch whose status equals the response status, or
    /// the fallback when none does.
    DispatchBody {
        branches: Vec<StatusBranch>,
        fallback: Vec<ResponseStep>,
    },
    AssignBody {
        target: FieldRef,
        conversion: BodyConversion,
        optional: bool,
    },
    BuildHeaderMap,
    AssignHeader { target: FieldRef, name: String },
    ReturnAction,
}

/// Body assignments that run for one specific response status.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct StatusBranch {
    pub status: u16,
    pub steps: Vec<ResponseStep>,
}

/// The compiled binding of one action.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct BindingPlan {
    /// Full path of the action type.
    pub target_type: String,
    /// Simple name of the action type.
    pub simple_name: String,
    pub request: Vec<RequestStep>,
    pub response: Vec<ResponseStep>,
}

impl BindingPlan {
    /// Request steps excluding the fixed preamble and the trailing return.
    pub fn request_body_steps(&self) -> &[RequestStep] {
        let end = self.request.len().saturating_sub(1);
        self.request.get(3..end).unwrap_or_default()
    }
}

/// Compiles an action descriptor into a binding plan.
///
/// ## Errors
///
/// - `GeneratorError::InvalidBinding` for structural problems
/// - `GeneratorError::UnsupportedFieldType` when a marker sits on a type it
///   has no lowering for
///
/// ## Examples
///
/// ```
/// use tether_define::{ActionDescriptor, FieldType, HttpMethod, Marker};
/// use tether_gen::planner::{plan, RequestStep};
///
/// let action = ActionDescriptor::new("crate::UsersRepoAction", HttpMethod::Get, "/users/{user}/repos")
///     .with_field("user", FieldType::optional("String"), Marker::path(""));
///
/// let plan = plan(&action).unwrap();
/// assert_eq!(plan.request[0], RequestStep::SetMethod(HttpMethod::Get));
/// assert!(matches!(plan.request[3], RequestStep::IfPresent { .. }));
/// assert_eq!(plan.request.last(), Some(&RequestStep::ReturnBuilder));
/// ```
pub fn plan(action: &ActionDescriptor) -> Result<BindingPlan, GeneratorError> {
    validate_action(action)?;

    let request = plan_request(action)?;
    let response = plan_response(action)?;

    debug!(
        action = %action.target_type,
        request_steps = request.len(),
        response_steps = response.len(),
        "planned action"
    );

    Ok(BindingPlan {
        target_type: action.target_type.clone(),
        simple_name: action.simple_name().to_string(),
        request,
        response,
    })
}

fn plan_request(action: &ActionDescriptor) -> Result<Vec<RequestStep>, GeneratorError> {
    let mut steps = vec![
        RequestStep::SetMethod(action.method),
        RequestStep::SetRequestVariant(action.request_variant),
        RequestStep::SetPath(action.path_template.clone()),
    ];

    for field in action.annotated_fields(MarkerKind::Path) {
        reject_kinds(action, field, &[TypeKind::ByteArray, TypeKind::FileHandle], "has no text form")?;
        let Marker::Path { encode, .. } = field.marker else {
            continue;
        };
        let step = RequestStep::AddPathParam {
            field: FieldRef::of(action, field),
            name: field.bound_name().to_string(),
            encode,
        };
        steps.push(guarded(action, field, step));
    }

    for field in action.annotated_fields(MarkerKind::Part) {
        let Marker::Part { encoding, .. } = &field.marker else {
            continue;
        };
        let body = match field.field_type.kind {
            TypeKind::FileHandle => PartBody::File,
            TypeKind::ByteArray => PartBody::Bytes,
            TypeKind::String => PartBody::StringBytes,
            kind if kind.is_scalar() => {
                return Err(unsupported(action, field, "cannot be sent as a multipart part"));
            }
            _ => PartBody::AsIs,
        };
        let step = RequestStep::AddPart {
            field: FieldRef::of(action, field),
            name: field.bound_name().to_string(),
            body,
            encoding: encoding.clone(),
        };
        steps.push(guarded(action, field, step));
    }

    for field in action.annotated_fields(MarkerKind::RequestHeader) {
        reject_kinds(action, field, &[TypeKind::ByteArray, TypeKind::FileHandle], "has no text form")?;
        let step = RequestStep::AddHeader {
            field: FieldRef::of(action, field),
            name: field.bound_name().to_string(),
        };
        steps.push(guarded(action, field, step));
    }

    for field in action.annotated_fields(MarkerKind::Field) {
        reject_kinds(action, field, &[TypeKind::ByteArray, TypeKind::FileHandle], "has no text form")?;
        let step = RequestStep::AddField {
            field: FieldRef::of(action, field),
            name: field.bound_name().to_string(),
        };
        steps.push(guarded(action, field, step));
    }

    for field in action.annotated_fields(MarkerKind::Query) {
        reject_kinds(action, field, &[TypeKind::ByteArray, TypeKind::FileHandle], "has no text form")?;
        let Marker::Query {
            encode_name,
            encode_value,
            ..
        } = field.marker
        else {
            continue;
        };
        let step = RequestStep::AddQueryParam {
            field: FieldRef::of(action, field),
            name: field.bound_name().to_string(),
            encode_name,
            encode_value,
        };
        steps.push(guarded(action, field, step));
    }

    if let Some(field) = action.annotated_fields(MarkerKind::Body).first() {
        let field_ref = FieldRef::of(action, field);
        let optional = field.field_type.optional;
        steps.push(match field.field_type.kind {
            TypeKind::ActionBody => RequestStep::SetRawBody {
                field: field_ref,
                optional,
            },
            _ => RequestStep::SetBody {
                field: field_ref,
                optional,
            },
        });
    }

    steps.push(RequestStep::ReturnBuilder);
    Ok(steps)
}

fn plan_response(action: &ActionDescriptor) -> Result<Vec<ResponseStep>, GeneratorError> {
    let mut steps = Vec::new();

    for field in action.annotated_fields(MarkerKind::Status) {
        let projection = match field.field_type.kind {
            TypeKind::Boolean => StatusProjection::Successful,
            TypeKind::Integral if is_narrow_status(&field.field_type.ty) => {
                return Err(unsupported(
                    action,
                    field,
                    "is too narrow for a status code; use i16 or wider",
                ));
            }
            TypeKind::Integral => StatusProjection::Integral(field.field_type.ty.clone()),
            TypeKind::Long => StatusProjection::Long(field.field_type.ty.clone()),
            TypeKind::String => StatusProjection::Decimal,
            _ => {
                return Err(unsupported(
                    action,
                    field,
                    "cannot hold a status; use bool, an integer type or String",
                ));
            }
        };
        steps.push(ResponseStep::AssignStatus {
            target: FieldRef::of(action, field),
            projection,
            optional: field.field_type.optional,
        });
    }

    let mut branches: Vec<StatusBranch> = Vec::new();
    let mut fallback = Vec::new();
    for field in action.annotated_fields(MarkerKind::Response) {
        let conversion = match field.field_type.kind {
            TypeKind::ActionBody => BodyConversion::Raw,
            TypeKind::String => BodyConversion::Text,
            TypeKind::FileHandle => {
                return Err(unsupported(action, field, "cannot receive a response body"));
            }
            _ => BodyConversion::Convert(field.field_type.ty.clone()),
        };
        let assign = ResponseStep::AssignBody {
            target: FieldRef::of(action, field),
            conversion,
            optional: field.field_type.optional,
        };
        match field.marker {
            Marker::Response { status } if !field.marker.is_catch_all() => {
                match branches.iter_mut().find(|branch| branch.status == status) {
                    Some(branch) => branch.steps.push(assign),
                    None => branches.push(StatusBranch {
                        status,
                        steps: vec![assign],
                    }),
                }
            }
            _ => fallback.push(assign),
        }
    }
    if branches.is_empty() {
        steps.extend(fallback);
    } else {
        steps.push(ResponseStep::DispatchBody { branches, fallback });
    }

    let headers = action.annotated_fields(MarkerKind::ResponseHeader);
    if !headers.is_empty() {
        steps.push(ResponseStep::BuildHeaderMap);
    }
    for field in headers {
        reject_kinds(
            action,
            field,
            &[TypeKind::ByteArray, TypeKind::FileHandle, TypeKind::ActionBody],
            "cannot be read from a header",
        )?;
        steps.push(ResponseStep::AssignHeader {
            target: FieldRef::of(action, field),
            name: field.bound_name().to_string(),
        });
    }

    steps.push(ResponseStep::ReturnAction);
    Ok(steps)
}

/// Integer types that cannot represent every HTTP status code.
const NARROW_STATUS_TYPES: &[&str] = &["i8", "u8"];

fn is_narrow_status(ty: &str) -> bool {
    let last = ty.rsplit("::").next().unwrap_or(ty);
    NARROW_STATUS_TYPES.contains(&last)
}

/// Wraps `step` in a presence check when the field is optional.
fn guarded(action: &ActionDescriptor, field: &FieldBinding, step: RequestStep) -> RequestStep {
    if field.field_type.optional {
        RequestStep::IfPresent {
            field: FieldRef::of(action, field),
            step: Box::new(step),
        }
    } else {
        step
    }
}

fn reject_kinds(
    action: &ActionDescriptor,
    field: &FieldBinding,
    kinds: &[TypeKind],
    reason: &str,
) -> Result<(), GeneratorError> {
    if kinds.contains(&field.field_type.kind) {
        return Err(unsupported(action, field, reason));
    }
    Ok(())
}

fn unsupported(action: &ActionDescriptor, field: &FieldBinding, reason: &str) -> GeneratorError {
    GeneratorError::UnsupportedFieldType {
        action: action.target_type.clone(),
        field: field.field_name.clone(),
        marker: field.marker.kind(),
        ty: field.field_type.rust_type(),
        reason: reason.to_string(),
    }
}
