//! Descriptor source: finds marked action structs in Rust source files.
//!
//! Files under the source root are visited in sorted order. Each file's
//! module path comes from its location (`lib.rs` is `crate`, `a/mod.rs` is
//! `crate::a`, `a/b.rs` is `crate::a::b`) and inline `mod x { .. }` blocks
//! extend it.
//!
//! Once every file is read, `extends` links are resolved into owner chains
//! and each action's fields are collected: its own first, then each
//! ancestor's, nearest first.

use std::collections::HashMap;
use std::fs;
use std::path::{Component, Path};

use syn::Item;
use tether_define::{ActionDescriptor, FieldBinding};
use tracing::{debug, info};
use walkdir::WalkDir;

use crate::attrs::{MarkedStruct, StructRole, parse_marked_struct, qualify};
use crate::errors::GeneratorError;

/// A marked struct plus where it was found.
#[derive(Debug, Clone)]
struct Located {
    module: String,
    full_path: String,
    marked: MarkedStruct,
}

/// Marked structs collected from one or more sources.
///
/// ## Examples
///
/// ```
/// use tether_gen::scanner::Registry;
///
/// let mut registry = Registry::default();
/// registry
///     .add_source(
///         "crate::api",
///         r#"
///             #[http_action(method = "GET", path = "/users/{user}")]
///             pub struct UserAction {
///                 #[http(path)]
///                 pub user: Option<String>,
///             }
///         "#,
///         "api.rs",
///     )
///     .unwrap();
///
/// let actions = registry.resolve().unwrap();
/// assert_eq!(actions[0].target_type, "crate::api::UserAction");
/// ```
#[derive(Debug, Default)]
pub struct Registry {
    structs: Vec<Located>,
    index: HashMap<String, usize>,
}

impl Registry {
    /// Parses one source text whose items live in `module`.
    ///
    /// ## Errors
    ///
    /// - `GeneratorError::ParseError` when the text is not valid Rust
    /// - `GeneratorError::InvalidBinding` for malformed markers
    pub fn add_source(&mut self, module: &str, source: &str, origin: &str) -> Result<(), GeneratorError> {
        let file = syn::parse_file(source).map_err(|e| GeneratorError::ParseError {
            path: origin.to_string(),
            message: e.to_string(),
        })?;
        self.add_items(module, &file.items)
    }

    fn add_items(&mut self, module: &str, items: &[Item]) -> Result<(), GeneratorError> {
        for item in items {
            match item {
                Item::Struct(item) => {
                    let marked = parse_marked_struct(&item.attrs, &item.ident, &item.generics, &item.fields)
                        .map_err(|e| GeneratorError::InvalidBinding {
                            action: qualify(module, &item.ident.to_string()),
                            field: None,
                            marker: None,
                            reason: e.to_string(),
                        })?;
                    if let Some(marked) = marked {
                        self.insert(module, marked);
                    }
                }
                Item::Mod(inner) => {
                    if let Some((_, items)) = &inner.content {
                        self.add_items(&qualify(module, &inner.ident.to_string()), items)?;
                    }
                }
                _ => {}
            }
        }
        Ok(())
    }

    fn insert(&mut self, module: &str, marked: MarkedStruct) {
        let full_path = qualify(module, &marked.ident);
        debug!(path = %full_path, fields = marked.fields.len(), "found marked struct");
        self.index.insert(full_path.clone(), self.structs.len());
        self.structs.push(Located {
            module: module.to_string(),
            full_path,
            marked,
        });
    }

    /// Number of marked structs (actions and ancestors) collected.
    pub fn len(&self) -> usize {
        self.structs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.structs.is_empty()
    }

    /// Builds a descriptor for every action, in discovery order.
    ///
    /// ## Errors
    ///
    /// Returns `GeneratorError::InvalidBinding` for an `extends` that names
    /// no marked struct or that forms a cycle.
    pub fn resolve(&self) -> Result<Vec<ActionDescriptor>, GeneratorError> {
        self.structs
            .iter()
            .filter_map(|located| match &located.marked.role {
                StructRole::Action(_) => Some(self.describe(located)),
                StructRole::Base { .. } => None,
            })
            .collect()
    }

    fn describe(&self, located: &Located) -> Result<ActionDescriptor, GeneratorError> {
        let Some(mut action) = located.marked.own_descriptor(&located.module) else {
            return Err(GeneratorError::InvalidBinding {
                action: located.full_path.clone(),
                field: None,
                marker: None,
                reason: "not an action".to_string(),
            });
        };

        let mut current = located;
        while let Some(extends) = current.marked.role.extends() {
            let parent_path = resolve_type_path(&current.module, extends);
            if action.depth_of(&parent_path).is_some() {
                return Err(GeneratorError::InvalidBinding {
                    action: action.target_type.clone(),
                    field: None,
                    marker: None,
                    reason: format!("cyclic extends through '{parent_path}'"),
                });
            }
            let parent = self
                .index
                .get(&parent_path)
                .map(|&idx| &self.structs[idx])
                .ok_or_else(|| GeneratorError::InvalidBinding {
                    action: action.target_type.clone(),
                    field: None,
                    marker: None,
                    reason: format!(
                        "'{}' extends '{extends}', but no #[http_action] or #[action_base] struct '{parent_path}' was found",
                        current.full_path
                    ),
                })?;

            action = action.with_ancestor(parent_path.clone());
            for field in &parent.marked.fields {
                action.fields.push(FieldBinding::new(
                    parent_path.clone(),
                    field.name.clone(),
                    field.field_type.clone(),
                    field.marker.clone(),
                ));
            }
            current = parent;
        }

        Ok(action)
    }
}

/// Resolves an `extends` name against the declaring module.
///
/// `crate::` paths are absolute, `super::` and `self::` are relative, and
/// anything else is looked up in the declaring module.
///
/// ```
/// use tether_gen::scanner::resolve_type_path;
///
/// assert_eq!(resolve_type_path("crate::api", "Base"), "crate::api::Base");
/// assert_eq!(resolve_type_path("crate::api", "crate::base::Root"), "crate::base::Root");
/// assert_eq!(resolve_type_path("crate::api::v1", "super::Base"), "crate::api::Base");
/// ```
pub fn resolve_type_path(module: &str, name: &str) -> String {
    if name.starts_with("crate::") {
        return name.to_string();
    }

    let mut segments: Vec<&str> = module.split("::").filter(|s| !s.is_empty()).collect();
    let mut rest = name;
    loop {
        if let Some(tail) = rest.strip_prefix("super::") {
            segments.pop();
            rest = tail;
        } else if let Some(tail) = rest.strip_prefix("self::") {
            rest = tail;
        } else {
            break;
        }
    }
    qualify(&segments.join("::"), rest)
}

/// Module path of a source file relative to the source root.
///
/// ```
/// use std::path::Path;
/// use tether_gen::scanner::module_path_for;
///
/// assert_eq!(module_path_for(Path::new("lib.rs")), "crate");
/// assert_eq!(module_path_for(Path::new("api/mod.rs")), "crate::api");
/// assert_eq!(module_path_for(Path::new("api/users.rs")), "crate::api::users");
/// ```
pub fn module_path_for(relative: &Path) -> String {
    let mut segments = vec!["crate".to_string()];
    let components: Vec<_> = relative
        .components()
        .filter_map(|c| match c {
            Component::Normal(part) => Some(part.to_string_lossy().into_owned()),
            _ => None,
        })
        .collect();

    if let Some((file, dirs)) = components.split_last() {
        segments.extend(dirs.iter().cloned());
        let stem = file.strip_suffix(".rs").unwrap_or(file);
        if !matches!(stem, "lib" | "main" | "mod") {
            segments.push(stem.to_string());
        }
    }
    segments.join("::")
}

/// Scans every `.rs` file under `src_root` and returns the action descriptors.
///
/// ## Errors
///
/// - `GeneratorError::ReadError` for unreadable files or directories
/// - `GeneratorError::ParseError` for files that are not valid Rust
/// - `GeneratorError::InvalidBinding` for malformed markers or `extends`
pub fn scan_dir(src_root: &Path) -> Result<Vec<ActionDescriptor>, GeneratorError> {
    let mut registry = Registry::default();
    let mut files = 0usize;

    for entry in WalkDir::new(src_root).sort_by_file_name() {
        let entry = entry.map_err(|e| GeneratorError::ReadError {
            path: e
                .path()
                .unwrap_or(src_root)
                .display()
                .to_string(),
            source: e.into(),
        })?;
        let path = entry.path();
        if !entry.file_type().is_file() || path.extension().is_none_or(|ext| ext != "rs") {
            continue;
        }

        let source = fs::read_to_string(path).map_err(|source| GeneratorError::ReadError {
            path: path.display().to_string(),
            source,
        })?;
        let relative = path.strip_prefix(src_root).unwrap_or(path);
        registry.add_source(&module_path_for(relative), &source, &path.display().to_string())?;
        files += 1;
    }

    let actions = registry.resolve()?;
    info!(
        files,
        marked = registry.len(),
        actions = actions.len(),
        "scanned {}",
        src_root.display()
    );
    Ok(actions)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;
    use tether_define::{FieldType, HttpMethod, Marker, MarkerKind, RequestVariant};

    fn scan(module: &str, source: &str) -> Result<Vec<ActionDescriptor>, GeneratorError> {
        let mut registry = Registry::default();
        registry.add_source(module, source, "test.rs")?;
        registry.resolve()
    }

    #[test]
    fn builds_descriptor_from_source() {
        let actions = scan(
            "crate::api",
            r#"
                #[http_action(method = "POST", path = "/login", variant = "form")]
                pub struct LoginAction {
                    #[http(field = "u")]
                    pub user: Option<String>,
                    #[http(field = "p")]
                    pub pass: Option<String>,
                    pub note: String,
                }
            "#,
        )
        .unwrap();

        assert_eq!(actions.len(), 1);
        let action = &actions[0];
        assert_eq!(action.target_type, "crate::api::LoginAction");
        assert_eq!(action.method, HttpMethod::Post);
        assert_eq!(action.request_variant, RequestVariant::FormUrlEncoded);
        assert_eq!(action.fields.len(), 2);
        assert_eq!(action.fields[0].marker, Marker::field("u"));
        assert_eq!(action.fields[0].field_type, FieldType::optional("String"));
    }

    #[test]
    fn inline_modules_extend_the_path() {
        let actions = scan(
            "crate",
            r#"
                mod api {
                    pub mod v1 {
                        #[http_action(method = "GET", path = "/ping")]
                        pub struct PingAction {}
                    }
                }
            "#,
        )
        .unwrap();
        assert_eq!(actions[0].target_type, "crate::api::v1::PingAction");
    }

    #[test]
    fn ancestors_form_the_owner_chain() {
        let actions = scan(
            "crate::api",
            r#"
                #[action_base(extends = "crate::api::RootAction")]
                pub struct ParentAction {
                    #[http(status)]
                    pub code: i32,
                }

                #[action_base]
                pub struct RootAction {
                    #[http(request_header = "X-Root")]
                    pub root: Option<String>,
                }

                #[http_action(method = "GET", path = "/child", extends = "ParentAction")]
                pub struct ChildAction {
                    #[http(request_header = "X-Own")]
                    pub own: Option<String>,
                }
            "#,
        )
        .unwrap();

        assert_eq!(actions.len(), 1);
        let child = &actions[0];
        assert_eq!(
            child.owner_chain,
            vec![
                "crate::api::ChildAction",
                "crate::api::ParentAction",
                "crate::api::RootAction"
            ]
        );
        let status = child.annotated_fields(MarkerKind::Status);
        assert_eq!(status[0].enclosing_type, "crate::api::ParentAction");
        let headers: Vec<_> = child
            .annotated_fields(MarkerKind::RequestHeader)
            .iter()
            .map(|f| f.field_name.as_str())
            .collect();
        assert_eq!(headers, vec!["own", "root"]);
    }

    #[test]
    fn unresolved_extends_is_invalid() {
        let result = scan(
            "crate",
            r#"
                #[http_action(method = "GET", extends = "Missing")]
                pub struct A {}
            "#,
        );
        match result {
            Err(GeneratorError::InvalidBinding { action, reason, .. }) => {
                assert_eq!(action, "crate::A");
                assert!(reason.contains("crate::Missing"));
            }
            other => panic!("expected InvalidBinding, got {other:?}"),
        }
    }

    #[test]
    fn cyclic_extends_is_invalid() {
        let result = scan(
            "crate",
            r#"
                #[action_base(extends = "B")]
                pub struct A {}
                #[action_base(extends = "A")]
                pub struct B {}
                #[http_action(method = "GET", extends = "A")]
                pub struct C {}
            "#,
        );
        assert!(matches!(
            result,
            Err(GeneratorError::InvalidBinding { reason, .. }) if reason.contains("cyclic")
        ));
    }

    #[test]
    fn malformed_marker_names_the_struct() {
        let result = scan(
            "crate::api",
            r#"
                #[http_action(method = "GET")]
                pub struct A {
                    #[http(query)]
                    pub q: Option<String>,
                }
            "#,
        );
        match result {
            Err(GeneratorError::InvalidBinding { action, reason, .. }) => {
                assert_eq!(action, "crate::api::A");
                assert!(reason.contains("field `q`"));
            }
            other => panic!("expected InvalidBinding, got {other:?}"),
        }
    }

    #[test]
    fn invalid_rust_is_a_parse_error() {
        assert!(matches!(
            scan("crate", "pub struct {"),
            Err(GeneratorError::ParseError { .. })
        ));
    }

    #[test]
    fn scans_directory_in_sorted_order() {
        let dir = TempDir::new().unwrap();
        fs::create_dir_all(dir.path().join("api")).unwrap();
        fs::write(dir.path().join("lib.rs"), "pub mod api;\n").unwrap();
        fs::write(
            dir.path().join("api/mod.rs"),
            r#"
                pub mod users;
                #[action_base]
                pub struct Base {
                    #[http(status)]
                    pub code: u16,
                }
            "#,
        )
        .unwrap();
        fs::write(
            dir.path().join("api/users.rs"),
            r#"
                #[http_action(method = "GET", path = "/users", extends = "super::Base")]
                pub struct ListUsers {}

                #[http_action(method = "DELETE", path = "/users/{id}")]
                pub struct DeleteUser {
                    #[http(path)]
                    pub id: u64,
                }
            "#,
        )
        .unwrap();
        fs::write(dir.path().join("notes.txt"), "not rust").unwrap();

        let actions = scan_dir(dir.path()).unwrap();
        let names: Vec<_> = actions.iter().map(|a| a.target_type.as_str()).collect();
        assert_eq!(names, vec!["crate::api::users::ListUsers", "crate::api::users::DeleteUser"]);
        assert_eq!(actions[0].owner_chain[1], "crate::api::Base");
    }

    #[test]
    fn module_paths() {
        assert_eq!(module_path_for(Path::new("main.rs")), "crate");
        assert_eq!(module_path_for(Path::new("a/b/c.rs")), "crate::a::b::c");
        assert_eq!(resolve_type_path("crate::a", "self::B"), "crate::a::B");
    }
}
