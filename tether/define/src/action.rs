//! The action model: one descriptor per action type.
//!
//! An [`ActionDescriptor`] captures everything the planner needs to bind an
//! action: its type path, the ancestor chain used to resolve inherited
//! fields, the HTTP method, request variant, path template, and the marked
//! fields in declaration order.

use serde::{Deserialize, Serialize};

use crate::field::FieldType;
use crate::marker::{Marker, MarkerKind};
use crate::types::{HttpMethod, RequestVariant};

/// Suffix appended to the action's simple name to form the helper name.
pub const HELPER_SUFFIX: &str = "Helper";

/// One marked field of an action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldBinding {
    /// Field identifier on the action struct.
    pub field_name: String,
    /// Full path of the type that physically declares the field.
    pub enclosing_type: String,
    /// Declared type of the field.
    pub field_type: FieldType,
    /// The field's role.
    pub marker: Marker,
}

impl FieldBinding {
    pub fn new(
        enclosing_type: impl Into<String>,
        field_name: impl Into<String>,
        field_type: FieldType,
        marker: Marker,
    ) -> Self {
        Self {
            field_name: field_name.into(),
            enclosing_type: enclosing_type.into(),
            field_type,
            marker,
        }
    }

    /// The name the marker binds to, falling back to the field name when the
    /// marker's name is empty.
    ///
    /// ```
    /// use tether_define::{FieldBinding, FieldType, Marker};
    ///
    /// let field = FieldBinding::new("crate::A", "user", FieldType::required("String"), Marker::path(""));
    /// assert_eq!(field.bound_name(), "user");
    ///
    /// let field = FieldBinding::new("crate::A", "user", FieldType::required("String"), Marker::path("login"));
    /// assert_eq!(field.bound_name(), "login");
    /// ```
    pub fn bound_name(&self) -> &str {
        match self.marker.declared_name() {
            Some(name) if !name.is_empty() => name,
            _ => &self.field_name,
        }
    }
}

/// Description of one action type.
///
/// ## Examples
///
/// ```
/// use tether_define::{ActionDescriptor, FieldType, HttpMethod, Marker, MarkerKind};
///
/// let action = ActionDescriptor::new("crate::api::UsersRepoAction", HttpMethod::Get, "/users/{user}/repos")
///     .with_field("user", FieldType::optional("String"), Marker::path(""))
///     .with_field("sort", FieldType::optional("String"), Marker::query("sort"));
///
/// assert_eq!(action.simple_name(), "UsersRepoAction");
/// assert_eq!(action.package_name(), "crate::api");
/// assert_eq!(action.helper_name(), "UsersRepoActionHelper");
/// assert_eq!(action.annotated_fields(MarkerKind::Query).len(), 1);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionDescriptor {
    /// Full path of the action type (e.g. `crate::api::UsersRepoAction`).
    pub target_type: String,
    /// `target_type` followed by its ancestors, nearest first.
    pub owner_chain: Vec<String>,
    pub method: HttpMethod,
    pub request_variant: RequestVariant,
    /// Path template, possibly containing `{name}` placeholders.
    pub path_template: String,
    /// Marked fields: the target's own in declaration order, then each
    /// ancestor's.
    pub fields: Vec<FieldBinding>,
}

impl ActionDescriptor {
    /// Creates a simple-variant descriptor with no ancestors and no fields.
    pub fn new(target_type: impl Into<String>, method: HttpMethod, path: impl Into<String>) -> Self {
        let target_type = target_type.into();
        Self {
            owner_chain: vec![target_type.clone()],
            target_type,
            method,
            request_variant: RequestVariant::Simple,
            path_template: path.into(),
            fields: Vec::new(),
        }
    }

    pub fn with_variant(mut self, variant: RequestVariant) -> Self {
        self.request_variant = variant;
        self
    }

    /// Appends the next ancestor to the owner chain.
    pub fn with_ancestor(mut self, ancestor: impl Into<String>) -> Self {
        self.owner_chain.push(ancestor.into());
        self
    }

    /// Adds a field declared on the target type itself.
    pub fn with_field(
        mut self,
        field_name: impl Into<String>,
        field_type: FieldType,
        marker: Marker,
    ) -> Self {
        let binding = FieldBinding::new(self.target_type.clone(), field_name, field_type, marker);
        self.fields.push(binding);
        self
    }

    /// Adds a field declared on an ancestor type.
    pub fn with_inherited_field(
        mut self,
        enclosing_type: impl Into<String>,
        field_name: impl Into<String>,
        field_type: FieldType,
        marker: Marker,
    ) -> Self {
        self.fields
            .push(FieldBinding::new(enclosing_type, field_name, field_type, marker));
        self
    }

    /// The last path segment of the target type.
    pub fn simple_name(&self) -> &str {
        simple_name_of(&self.target_type)
    }

    /// The module the helper is emitted into: the target's own module.
    ///
    /// Empty when the target type path has no module qualifier.
    pub fn package_name(&self) -> &str {
        self.target_type
            .rsplit_once("::")
            .map(|(package, _)| package)
            .unwrap_or("")
    }

    /// `<SimpleName>Helper`.
    pub fn helper_name(&self) -> String {
        self.helper_name_with_suffix(HELPER_SUFFIX)
    }

    pub fn helper_name_with_suffix(&self, suffix: &str) -> String {
        format!("{}{}", self.simple_name(), suffix)
    }

    /// Position of `ty` in the owner chain (0 for the target itself).
    pub fn depth_of(&self, ty: &str) -> Option<usize> {
        self.owner_chain.iter().position(|owner| owner == ty)
    }

    /// Whether the field is declared on an ancestor rather than the target.
    pub fn is_inherited(&self, field: &FieldBinding) -> bool {
        field.enclosing_type != self.target_type
    }

    /// Fields carrying a marker of the given kind.
    ///
    /// Order is stable: nearer owners first, declaration order within an
    /// owner. Fields whose enclosing type is outside the owner chain sort last.
    pub fn annotated_fields(&self, kind: MarkerKind) -> Vec<&FieldBinding> {
        let mut fields: Vec<&FieldBinding> = self
            .fields
            .iter()
            .filter(|field| field.marker.kind() == kind)
            .collect();
        fields.sort_by_key(|field| self.depth_of(&field.enclosing_type).unwrap_or(usize::MAX));
        fields
    }

    /// True when at least one field carries a marker.
    pub fn has_markers(&self) -> bool {
        !self.fields.is_empty()
    }
}

/// The last `::` segment of a type path.
pub fn simple_name_of(type_path: &str) -> &str {
    type_path.rsplit("::").next().unwrap_or(type_path)
}
