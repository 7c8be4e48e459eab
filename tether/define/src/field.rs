//! Static type classification for action fields.
//!
//! The generator only needs to know which of a small, closed set of shapes a
//! field has in order to pick a lowering: [`TypeKind`] is that set, and
//! [`FieldType`] pairs it with the verbatim Rust type text and whether the
//! field is nullable (`Option<T>`).

use serde::{Deserialize, Serialize};
use strum::Display;

/// Classification of a field's static type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display)]
pub enum TypeKind {
    /// `bool`
    Boolean,
    /// `i8`, `i16`, `i32`, `u8`, `u16`, `u32`, `isize`, `usize`
    Integral,
    /// `i64`, `u64`, `i128`, `u128`
    Long,
    /// `f32`, `f64`
    Float,
    /// `char`
    Char,
    /// `String`
    String,
    /// `Vec<u8>`
    ByteArray,
    /// `PathBuf`, a handle to a file on disk
    FileHandle,
    /// The runtime `ActionBody` type
    ActionBody,
    /// Anything else; converted through the runtime converter
    Other,
}

impl TypeKind {
    /// Classifies a compact, whitespace-free type text.
    ///
    /// Leading path qualifiers are ignored, so `std::path::PathBuf` and
    /// `PathBuf` classify the same way.
    ///
    /// ```
    /// use tether_define::TypeKind;
    ///
    /// assert_eq!(TypeKind::classify("u64"), TypeKind::Long);
    /// assert_eq!(TypeKind::classify("Vec<u8>"), TypeKind::ByteArray);
    /// assert_eq!(TypeKind::classify("std::path::PathBuf"), TypeKind::FileHandle);
    /// assert_eq!(TypeKind::classify("Vec<User>"), TypeKind::Other);
    /// ```
    pub fn classify(ty: &str) -> TypeKind {
        let ty = compact_type(ty);
        match ty.as_str() {
            "Vec<u8>" | "std::vec::Vec<u8>" | "alloc::vec::Vec<u8>" => return TypeKind::ByteArray,
            _ => {}
        }
        if ty.contains('<') {
            return TypeKind::Other;
        }
        match ty.rsplit("::").next().unwrap_or_default() {
            "bool" => TypeKind::Boolean,
            "i8" | "i16" | "i32" | "u8" | "u16" | "u32" | "isize" | "usize" => TypeKind::Integral,
            "i64" | "u64" | "i128" | "u128" => TypeKind::Long,
            "f32" | "f64" => TypeKind::Float,
            "char" => TypeKind::Char,
            "String" => TypeKind::String,
            "PathBuf" => TypeKind::FileHandle,
            "ActionBody" => TypeKind::ActionBody,
            _ => TypeKind::Other,
        }
    }

    /// True for the scalar kinds (`bool`, integers, floats, `char`).
    pub fn is_scalar(self) -> bool {
        matches!(
            self,
            TypeKind::Boolean | TypeKind::Integral | TypeKind::Long | TypeKind::Float | TypeKind::Char
        )
    }
}

/// The declared type of an action field.
///
/// `ty` holds the Rust type text; when the field is an `Option<T>` it holds
/// `T` and `optional` is set.
///
/// ## Examples
///
/// ```
/// use tether_define::{FieldType, TypeKind};
///
/// let ty = FieldType::parse("Option<String>");
/// assert!(ty.optional);
/// assert_eq!(ty.kind, TypeKind::String);
/// assert_eq!(ty.ty, "String");
/// assert_eq!(ty.rust_type(), "Option<String>");
///
/// let page = FieldType::parse("u32");
/// assert!(page.is_primitive());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FieldType {
    /// Rust type text (inner type for optional fields).
    pub ty: String,
    /// Classification of `ty`.
    pub kind: TypeKind,
    /// Whether the field is declared as `Option<ty>`.
    pub optional: bool,
}

impl FieldType {
    /// Parses and classifies a Rust type text.
    pub fn parse(text: &str) -> Self {
        let compact = compact_type(text);
        match strip_option(&compact) {
            Some(inner) => Self {
                kind: TypeKind::classify(inner),
                ty: inner.to_string(),
                optional: true,
            },
            None => Self {
                kind: TypeKind::classify(&compact),
                ty: compact,
                optional: false,
            },
        }
    }

    /// A non-optional field of the given type.
    pub fn required(ty: impl Into<String>) -> Self {
        let ty = compact_type(&ty.into());
        Self {
            kind: TypeKind::classify(&ty),
            ty,
            optional: false,
        }
    }

    /// An `Option<ty>` field.
    pub fn optional(ty: impl Into<String>) -> Self {
        Self {
            optional: true,
            ..Self::required(ty)
        }
    }

    /// Primitive means a scalar that can never be absent.
    pub fn is_primitive(&self) -> bool {
        !self.optional && self.kind.is_scalar()
    }

    /// The full declared type, re-wrapping optional fields.
    pub fn rust_type(&self) -> String {
        if self.optional {
            format!("Option<{}>", self.ty)
        } else {
            self.ty.clone()
        }
    }
}

/// Returns `T` for `Option<T>` (optionally path-qualified), `None` otherwise.
fn strip_option(ty: &str) -> Option<&str> {
    let rest = ty
        .strip_prefix("Option<")
        .or_else(|| ty.strip_prefix("std::option::Option<"))
        .or_else(|| ty.strip_prefix("core::option::Option<"))?;
    rest.strip_suffix('>')
}

/// Drops whitespace from a type text except where it separates two words.
///
/// Token streams render `Vec<u8>` as `Vec < u8 >`; this folds it back.
///
/// ```
/// use tether_define::field::compact_type;
///
/// assert_eq!(compact_type("Vec < u8 >"), "Vec<u8>");
/// assert_eq!(compact_type("Box < dyn Error >"), "Box<dyn Error>");
/// ```
pub fn compact_type(ty: &str) -> String {
    let chars: Vec<char> = ty.trim().chars().collect();
    let mut out = String::with_capacity(chars.len());
    for (idx, c) in chars.iter().enumerate() {
        if c.is_whitespace() {
            let prev = out.chars().last();
            let next = chars[idx + 1..].iter().find(|c| !c.is_whitespace());
            let wordish = |c: char| c.is_alphanumeric() || c == '_' || c == '\'';
            if let (Some(prev), Some(next)) = (prev, next) {
                if wordish(prev) && wordish(*next) {
                    out.push(' ');
                }
            }
        } else {
            out.push(*c);
        }
    }
    out
}
