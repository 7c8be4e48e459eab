//! Parsing of the marker attributes on action structs.
//!
//! Shared by the source scanner and the `tether-macros` derives, so a
//! marker that compiles is exactly a marker the generator understands.
//!
//! ```text
//! #[http_action(method = "GET", path = "/users/{user}", variant = "simple", extends = "Base")]
//! #[action_base(extends = "Root")]
//! #[http(path)] #[http(query = "sort")] #[http(response = 200)] ...
//! ```

use std::str::FromStr;

use quote::ToTokens;
use syn::{
    Attribute, Error, Fields, Generics, Ident, LitBool, LitInt, LitStr, Meta, Result, Token,
    meta::ParseNestedMeta, spanned::Spanned, token,
};
use tether_define::{
    ActionDescriptor, DEFAULT_PART_ENCODING, FieldType, HttpMethod, Marker, RequestVariant,
};

/// Attribute on action structs.
pub const ACTION_ATTR: &str = "http_action";
/// Attribute on ancestor structs.
pub const BASE_ATTR: &str = "action_base";
/// Attribute on fields.
pub const FIELD_ATTR: &str = "http";

/// Parsed `#[http_action(...)]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionAttr {
    pub method: HttpMethod,
    pub path: String,
    pub variant: RequestVariant,
    pub extends: Option<String>,
}

/// Whether a marked struct is an action or an ancestor of one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StructRole {
    Action(ActionAttr),
    Base { extends: Option<String> },
}

impl StructRole {
    pub fn extends(&self) -> Option<&str> {
        match self {
            StructRole::Action(attr) => attr.extends.as_deref(),
            StructRole::Base { extends } => extends.as_deref(),
        }
    }
}

/// A field carrying an `#[http(...)]` marker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarkedField {
    pub name: String,
    pub field_type: FieldType,
    pub marker: Marker,
}

/// A struct carrying `#[http_action]` or `#[action_base]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarkedStruct {
    pub ident: String,
    pub role: StructRole,
    /// Marked fields in declaration order.
    pub fields: Vec<MarkedField>,
}

impl MarkedStruct {
    /// A descriptor covering only this struct's own fields, addressed as
    /// `<module>::<ident>`. `None` for ancestors.
    pub fn own_descriptor(&self, module: &str) -> Option<ActionDescriptor> {
        let StructRole::Action(attr) = &self.role else {
            return None;
        };
        let target = qualify(module, &self.ident);
        let mut action = ActionDescriptor::new(target, attr.method, attr.path.clone())
            .with_variant(attr.variant);
        for field in &self.fields {
            action = action.with_field(field.name.clone(), field.field_type.clone(), field.marker.clone());
        }
        Some(action)
    }
}

/// Joins a module path and a name; an empty module yields the bare name.
pub fn qualify(module: &str, name: &str) -> String {
    if module.is_empty() {
        name.to_string()
    } else {
        format!("{module}::{name}")
    }
}

/// Parses a struct's marker attributes.
///
/// Returns `Ok(None)` when the struct has neither `#[http_action]` nor
/// `#[action_base]`.
///
/// ## Errors
///
/// Both role attributes on one struct, a tuple or generic struct, and any
/// malformed marker.
pub fn parse_marked_struct(
    attrs: &[Attribute],
    ident: &Ident,
    generics: &Generics,
    fields: &Fields,
) -> Result<Option<MarkedStruct>> {
    let action = attrs.iter().find(|a| a.path().is_ident(ACTION_ATTR));
    let base = attrs.iter().find(|a| a.path().is_ident(BASE_ATTR));

    let role = match (action, base) {
        (None, None) => return Ok(None),
        (Some(_), Some(base)) => {
            return Err(Error::new(
                base.span(),
                format!("`{ident}` cannot be both #[{ACTION_ATTR}] and #[{BASE_ATTR}]"),
            ));
        }
        (Some(action), None) => StructRole::Action(parse_action_attr(action)?),
        (None, Some(base)) => StructRole::Base {
            extends: parse_base_attr(base)?,
        },
    };

    if !generics.params.is_empty() {
        return Err(Error::new(
            generics.span(),
            format!("`{ident}` must not be generic to carry http markers"),
        ));
    }

    let Fields::Named(named) = fields else {
        return Err(Error::new(
            ident.span(),
            format!("`{ident}` must have named fields to carry http markers"),
        ));
    };

    let mut marked = Vec::new();
    for field in &named.named {
        let Some(marker) = field_marker(field)? else {
            continue;
        };
        let name = field
            .ident
            .as_ref()
            .map(ToString::to_string)
            .unwrap_or_default();
        marked.push(MarkedField {
            name,
            field_type: FieldType::parse(&field.ty.to_token_stream().to_string()),
            marker,
        });
    }

    Ok(Some(MarkedStruct {
        ident: ident.to_string(),
        role,
        fields: marked,
    }))
}

/// Parses `#[http_action(method = "..", path = "..", variant = "..", extends = "..")]`.
pub fn parse_action_attr(attr: &Attribute) -> Result<ActionAttr> {
    let mut method = None;
    let mut path = String::new();
    let mut variant = RequestVariant::default();
    let mut extends = None;

    attr.parse_nested_meta(|meta| {
        if meta.path.is_ident("method") {
            let value: LitStr = meta.value()?.parse()?;
            method = Some(HttpMethod::from_str(&value.value().to_uppercase()).map_err(|_| {
                Error::new(
                    value.span(),
                    format!(
                        "unknown HTTP method: `{}`. Expected one of: GET, POST, PUT, PATCH, DELETE, HEAD, OPTIONS",
                        value.value()
                    ),
                )
            })?);
        } else if meta.path.is_ident("path") {
            let value: LitStr = meta.value()?.parse()?;
            path = value.value();
        } else if meta.path.is_ident("variant") {
            let value: LitStr = meta.value()?.parse()?;
            variant = RequestVariant::from_str(&value.value().to_lowercase()).map_err(|_| {
                Error::new(
                    value.span(),
                    format!(
                        "unknown request variant: `{}`. Expected one of: simple, form_url_encoded, multipart",
                        value.value()
                    ),
                )
            })?;
        } else if meta.path.is_ident("extends") {
            let value: LitStr = meta.value()?.parse()?;
            extends = Some(value.value());
        } else {
            return Err(unknown(&meta, ACTION_ATTR));
        }
        Ok(())
    })?;

    let method = method.ok_or_else(|| {
        Error::new(
            attr.span(),
            format!("missing required `method`: #[{ACTION_ATTR}(method = \"GET\", ...)]"),
        )
    })?;

    Ok(ActionAttr {
        method,
        path,
        variant,
        extends,
    })
}

/// Parses `#[action_base]` or `#[action_base(extends = "..")]`.
pub fn parse_base_attr(attr: &Attribute) -> Result<Option<String>> {
    if matches!(attr.meta, Meta::Path(_)) {
        return Ok(None);
    }

    let mut extends = None;
    attr.parse_nested_meta(|meta| {
        if meta.path.is_ident("extends") {
            let value: LitStr = meta.value()?.parse()?;
            extends = Some(value.value());
            Ok(())
        } else {
            Err(unknown(&meta, BASE_ATTR))
        }
    })?;
    Ok(extends)
}

/// The marker of a field, if it has an `#[http(...)]` attribute.
///
/// ## Errors
///
/// More than one `#[http]` attribute, or a malformed one. Messages name the
/// field.
pub fn field_marker(field: &syn::Field) -> Result<Option<Marker>> {
    let name = field
        .ident
        .as_ref()
        .map(ToString::to_string)
        .unwrap_or_default();
    let mut attrs = field.attrs.iter().filter(|a| a.path().is_ident(FIELD_ATTR));

    let Some(attr) = attrs.next() else {
        return Ok(None);
    };
    if let Some(extra) = attrs.next() {
        return Err(Error::new(
            extra.span(),
            format!("field `{name}`: a field carries exactly one marker"),
        ));
    }

    parse_marker(attr)
        .map(Some)
        .map_err(|e| Error::new(e.span(), format!("field `{name}`: {e}")))
}

/// Parses the single marker inside `#[http(...)]`.
pub fn parse_marker(attr: &Attribute) -> Result<Marker> {
    let mut marker = None;

    attr.parse_nested_meta(|meta| {
        if marker.is_some() {
            return Err(meta.error("a field carries exactly one marker"));
        }
        let key = meta
            .path
            .get_ident()
            .map(ToString::to_string)
            .unwrap_or_default();

        let parsed = match key.as_str() {
            "path" => {
                let mut name = String::new();
                let mut encode = true;
                if meta.input.peek(Token![=]) {
                    name = string_value(&meta)?;
                } else if meta.input.peek(token::Paren) {
                    meta.parse_nested_meta(|arg| {
                        if arg.path.is_ident("name") {
                            name = string_value(&arg)?;
                        } else if arg.path.is_ident("encode") {
                            encode = bool_value(&arg)?;
                        } else {
                            return Err(unknown(&arg, "path"));
                        }
                        Ok(())
                    })?;
                }
                Marker::Path { name, encode }
            }
            "query" => {
                let mut name = String::new();
                let mut encode_name = true;
                let mut encode_value = true;
                if meta.input.peek(Token![=]) {
                    name = string_value(&meta)?;
                } else if meta.input.peek(token::Paren) {
                    meta.parse_nested_meta(|arg| {
                        if arg.path.is_ident("name") {
                            name = string_value(&arg)?;
                        } else if arg.path.is_ident("encode_name") {
                            encode_name = bool_value(&arg)?;
                        } else if arg.path.is_ident("encode_value") {
                            encode_value = bool_value(&arg)?;
                        } else {
                            return Err(unknown(&arg, "query"));
                        }
                        Ok(())
                    })?;
                } else {
                    return Err(meta.error("expected `query = \"name\"`"));
                }
                Marker::Query {
                    name,
                    encode_name,
                    encode_value,
                }
            }
            "field" => Marker::Field {
                name: string_value(&meta)?,
            },
            "request_header" => Marker::RequestHeader {
                name: string_value(&meta)?,
            },
            "body" => Marker::Body,
            "part" => {
                let mut name = String::new();
                let mut encoding = DEFAULT_PART_ENCODING.to_string();
                if meta.input.peek(Token![=]) {
                    name = string_value(&meta)?;
                } else if meta.input.peek(token::Paren) {
                    meta.parse_nested_meta(|arg| {
                        if arg.path.is_ident("name") {
                            name = string_value(&arg)?;
                        } else if arg.path.is_ident("encoding") {
                            encoding = string_value(&arg)?;
                        } else {
                            return Err(unknown(&arg, "part"));
                        }
                        Ok(())
                    })?;
                }
                Marker::Part { name, encoding }
            }
            "response" => {
                let mut status = 0;
                if meta.input.peek(Token![=]) {
                    status = status_value(&meta)?;
                } else if meta.input.peek(token::Paren) {
                    meta.parse_nested_meta(|arg| {
                        if arg.path.is_ident("status") {
                            status = status_value(&arg)?;
                            Ok(())
                        } else {
                            Err(unknown(&arg, "response"))
                        }
                    })?;
                }
                Marker::Response { status }
            }
            "response_header" => Marker::ResponseHeader {
                name: string_value(&meta)?,
            },
            "status" => Marker::Status,
            _ => {
                return Err(meta.error(format!(
                    "unknown marker: `{}`. Expected one of: path, query, field, request_header, body, part, response, response_header, status",
                    meta.path.to_token_stream()
                )));
            }
        };
        marker = Some(parsed);
        Ok(())
    })?;

    marker.ok_or_else(|| Error::new(attr.span(), format!("expected a marker inside #[{FIELD_ATTR}(...)]")))
}

fn string_value(meta: &ParseNestedMeta) -> Result<String> {
    let value: LitStr = meta.value()?.parse()?;
    Ok(value.value())
}

fn bool_value(meta: &ParseNestedMeta) -> Result<bool> {
    let value: LitBool = meta.value()?.parse()?;
    Ok(value.value)
}

fn status_value(meta: &ParseNestedMeta) -> Result<u16> {
    let value: LitInt = meta.value()?.parse()?;
    value.base10_parse()
}

fn unknown(meta: &ParseNestedMeta, attr: &str) -> Error {
    meta.error(format!(
        "unknown {attr} argument: `{}`",
        meta.path.to_token_stream()
    ))
}
