//! Output assembly, file sinks and the generation pass.
//!
//! This module handles the final phase of generation: rendering a helper to
//! text, validating and formatting it, and handing it to a [`FileSink`].
//!
//! ## Output Structure
//!
//! A helper is a child module of its action's module: the file starts with
//! `use super::*;` and is mounted next to the action with
//! `mod users_repo_action_helper;`. [`DirSink`] mirrors the action's module
//! path under its root, so rooted at the crate's `src/` every file lands
//! exactly where that `mod` declaration looks for it:
//! ```text
//! src/
//! ├── api.rs                            # crate::api, declares the mods below
//! ├── api/
//! │   ├── users_repo_action_helper.rs   # crate::api::users_repo_action_helper
//! │   └── upload_action_helper.rs
//! └── ping_action_helper.rs             # crate::ping_action_helper
//! ```
//!
//! ## Safety Guarantees
//!
//! - **Validation**: All generated code is validated with `syn` before writing
//! - **Formatting**: Output is formatted with `prettyplease` for consistent style
//! - **Atomic writes**: Uses temp file + rename pattern to prevent partial writes
//! - **All or nothing per action**: a sink only ever sees a fully rendered helper

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use convert_case::{Case, Casing};
use proc_macro2::TokenStream;
use tether_define::ActionDescriptor;
use tracing::{info, warn};

use crate::codegen::{EmitterConfig, generate_helper};
use crate::errors::GeneratorError;
use crate::planner::plan;

/// First line of every generated file.
pub const GENERATED_NOTICE: &str =
    "// This code was automatically generated by tether-gen. Do not edit manually.";

/// Validates that generated code is syntactically correct Rust.
///
/// ## Errors
///
/// Returns `GeneratorError::CodeGenError` with the parse error.
pub fn validate_code(tokens: &TokenStream) -> Result<syn::File, GeneratorError> {
    syn::parse2(tokens.clone())
        .map_err(|e| GeneratorError::CodeGenError(format!("Generated code is invalid: {}", e)))
}

/// Formats a parsed file with prettyplease, prepending [`GENERATED_NOTICE`].
pub fn format_code(file: &syn::File) -> String {
    let formatted = prettyplease::unparse(file);
    format!("{GENERATED_NOTICE}\n\n{formatted}")
}

/// Plans, emits, validates and formats the helper for one action.
///
/// Deterministic: the same descriptor and config always yield the same text.
///
/// ## Errors
///
/// Any planning, configuration or code generation error for the action.
///
/// ## Examples
///
/// ```
/// use tether_define::{ActionDescriptor, HttpMethod};
/// use tether_gen::codegen::EmitterConfig;
/// use tether_gen::output::render_helper;
///
/// let action = ActionDescriptor::new("crate::PingAction", HttpMethod::Get, "/ping");
/// let source = render_helper(&action, &EmitterConfig::default()).unwrap();
/// assert!(source.contains("pub struct PingActionHelper;"));
/// ```
pub fn render_helper(action: &ActionDescriptor, config: &EmitterConfig) -> Result<String, GeneratorError> {
    let plan = plan(action)?;
    let tokens = generate_helper(&plan, config)?;
    let file = validate_code(&tokens)?;
    Ok(format_code(&file))
}

/// Writes content to a file atomically using temp file + rename.
///
/// Parent directories are created as needed. Readers see either the old
/// content or the new, never a partial file.
///
/// ## Errors
///
/// Returns the underlying I/O error; the temp file is removed on failure.
pub fn write_atomic(path: &Path, content: &str) -> io::Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent)?;
    }

    let temp_path = path.with_extension("rs.tmp");
    fs::write(&temp_path, content)?;

    if let Err(e) = fs::rename(&temp_path, path) {
        let _ = fs::remove_file(&temp_path);
        return Err(e);
    }

    Ok(())
}

/// Destination for rendered helpers.
pub trait FileSink {
    /// Persists one helper. `package` is the action's module path and
    /// `class_name` the helper name.
    fn save(&mut self, package: &str, class_name: &str, source: &str) -> io::Result<()>;
}

/// Writes each helper to `<root>/<module segments>/<snake_case name>.rs`,
/// the file of a child module named after the helper.
#[derive(Debug, Clone)]
pub struct DirSink {
    root: PathBuf,
}

impl DirSink {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Where a helper lands. A leading `crate` segment is dropped.
    ///
    /// ```
    /// use std::path::Path;
    /// use tether_gen::output::DirSink;
    ///
    /// let sink = DirSink::new("out");
    /// assert_eq!(
    ///     sink.path_for("crate::api::users", "UsersRepoActionHelper"),
    ///     Path::new("out/api/users/users_repo_action_helper.rs")
    /// );
    /// ```
    pub fn path_for(&self, package: &str, class_name: &str) -> PathBuf {
        let mut path = self.root.clone();
        package
            .split("::")
            .filter(|segment| !segment.is_empty())
            .skip_while(|segment| *segment == "crate")
            .for_each(|segment| path.push(segment));
        path.push(format!("{}.rs", class_name.to_case(Case::Snake)));
        path
    }
}

impl FileSink for DirSink {
    fn save(&mut self, package: &str, class_name: &str, source: &str) -> io::Result<()> {
        let path = self.path_for(package, class_name);
        write_atomic(&path, source)?;
        info!(path = %path.display(), "wrote {class_name}");
        Ok(())
    }
}

/// A helper held by a [`MemorySink`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artifact {
    pub package: String,
    pub class_name: String,
    pub source: String,
}

/// Keeps helpers in memory, in the order they were saved.
#[derive(Debug, Clone, Default)]
pub struct MemorySink {
    artifacts: Vec<Artifact>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn artifacts(&self) -> &[Artifact] {
        &self.artifacts
    }

    pub fn into_artifacts(self) -> Vec<Artifact> {
        self.artifacts
    }

    /// The artifact saved under `class_name`, if any.
    pub fn get(&self, class_name: &str) -> Option<&Artifact> {
        self.artifacts.iter().find(|a| a.class_name == class_name)
    }
}

impl FileSink for MemorySink {
    fn save(&mut self, package: &str, class_name: &str, source: &str) -> io::Result<()> {
        self.artifacts.push(Artifact {
            package: package.to_string(),
            class_name: class_name.to_string(),
            source: source.to_string(),
        });
        Ok(())
    }
}

/// What a generation pass does when one action fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FailureMode {
    /// Stop at the first failing action.
    #[default]
    FailFast,
    /// Skip failing actions and report every error at the end.
    KeepGoing,
}

/// Outcome of a generation pass.
#[derive(Debug, Default)]
pub struct GenerationReport {
    /// Helper names handed to the sink, in order.
    pub emitted: Vec<String>,
    /// Errors of skipped actions (only in [`FailureMode::KeepGoing`]).
    pub errors: Vec<GeneratorError>,
}

impl GenerationReport {
    pub fn is_success(&self) -> bool {
        self.errors.is_empty()
    }

    /// Turns collected errors into a single `GeneratorError::Failed`.
    pub fn into_result(self) -> Result<Vec<String>, GeneratorError> {
        if self.errors.is_empty() {
            Ok(self.emitted)
        } else {
            Err(GeneratorError::Failed(self.errors))
        }
    }
}

/// Renders every action and saves each helper to `sink`.
///
/// Actions are processed one at a time in the given order. An action either
/// reaches the sink fully rendered or not at all.
///
/// ## Errors
///
/// Configuration errors always abort. In [`FailureMode::FailFast`] the first
/// action error is returned as-is; in [`FailureMode::KeepGoing`] action
/// errors are collected in the report instead.
pub fn generate_all(
    actions: &[ActionDescriptor],
    config: &EmitterConfig,
    sink: &mut dyn FileSink,
    mode: FailureMode,
) -> Result<GenerationReport, GeneratorError> {
    config.validate()?;

    let mut report = GenerationReport::default();
    for action in actions {
        match emit_one(action, config, sink) {
            Ok(helper) => report.emitted.push(helper),
            Err(e) if mode == FailureMode::KeepGoing => {
                warn!(action = %action.target_type, "skipping action: {e}");
                report.errors.push(e);
            }
            Err(e) => return Err(e),
        }
    }

    info!(
        emitted = report.emitted.len(),
        failed = report.errors.len(),
        "generation pass finished"
    );
    Ok(report)
}

fn emit_one(
    action: &ActionDescriptor,
    config: &EmitterConfig,
    sink: &mut dyn FileSink,
) -> Result<String, GeneratorError> {
    let source = render_helper(action, config)?;
    let helper = action.helper_name_with_suffix(&config.helper_suffix);
    sink.save(action.package_name(), &helper, &source)
        .map_err(|source| GeneratorError::EmissionFailure {
            action: action.target_type.clone(),
            helper: helper.clone(),
            source,
        })?;
    Ok(helper)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{etag_action, users_repo_action};
    use quote::quote;
    use tempfile::TempDir;
    use tether_define::{FieldType, HttpMethod, Marker};

    struct RejectingSink;

    impl FileSink for RejectingSink {
        fn save(&mut self, _: &str, _: &str, _: &str) -> io::Result<()> {
            Err(io::Error::new(io::ErrorKind::PermissionDenied, "read-only"))
        }
    }

    fn broken_action() -> ActionDescriptor {
        ActionDescriptor::new("crate::api::Broken", HttpMethod::Post, "/b")
            .with_field("a", FieldType::optional("Payload"), Marker::Body)
            .with_field("b", FieldType::optional("Payload"), Marker::Body)
    }

    #[test]
    fn validate_code_rejects_invalid_code() {
        let tokens = quote! { fn broken() -> };
        assert!(matches!(
            validate_code(&tokens),
            Err(GeneratorError::CodeGenError(_))
        ));
    }

    #[test]
    fn format_code_prepends_notice() {
        let file = validate_code(&quote! { pub struct A; }).unwrap();
        let code = format_code(&file);
        assert!(code.starts_with(GENERATED_NOTICE));
        assert!(code.contains("pub struct A;"));
    }

    #[test]
    fn render_is_byte_identical_across_runs() {
        let config = EmitterConfig::default();
        let first = render_helper(&users_repo_action(), &config).unwrap();
        let second = render_helper(&users_repo_action(), &config).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn write_atomic_creates_parents_and_leaves_no_temp() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("a/b/helper.rs");
        write_atomic(&path, "// x").unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "// x");
        assert!(!path.with_extension("rs.tmp").exists());
    }

    #[test]
    fn dir_sink_mirrors_module_path() {
        let dir = TempDir::new().unwrap();
        let mut sink = DirSink::new(dir.path());
        let report = generate_all(
            &[users_repo_action()],
            &EmitterConfig::default(),
            &mut sink,
            FailureMode::FailFast,
        )
        .unwrap();

        assert_eq!(report.emitted, vec!["UsersRepoActionHelper"]);
        let written = fs::read_to_string(dir.path().join("api/users_repo_action_helper.rs")).unwrap();
        assert!(written.starts_with(GENERATED_NOTICE));
        assert!(written.contains("use super::*;"));
    }

    #[test]
    fn unqualified_package_lands_at_root() {
        let sink = DirSink::new("out");
        assert_eq!(sink.path_for("", "PingHelper"), Path::new("out/ping_helper.rs"));
        assert_eq!(sink.path_for("crate", "PingHelper"), Path::new("out/ping_helper.rs"));
    }

    #[test]
    fn fail_fast_stops_at_first_error() {
        let mut sink = MemorySink::new();
        let result = generate_all(
            &[broken_action(), users_repo_action()],
            &EmitterConfig::default(),
            &mut sink,
            FailureMode::FailFast,
        );
        assert!(matches!(result, Err(GeneratorError::InvalidBinding { .. })));
        assert!(sink.artifacts().is_empty());
    }

    #[test]
    fn keep_going_collects_errors_and_emits_the_rest() {
        let mut sink = MemorySink::new();
        let report = generate_all(
            &[broken_action(), users_repo_action(), etag_action()],
            &EmitterConfig::default(),
            &mut sink,
            FailureMode::KeepGoing,
        )
        .unwrap();

        assert_eq!(report.emitted, vec!["UsersRepoActionHelper", "EtagActionHelper"]);
        assert_eq!(report.errors.len(), 1);
        assert_eq!(report.errors[0].action(), Some("crate::api::Broken"));
        assert!(sink.get("BrokenHelper").is_none());
        assert!(matches!(report.into_result(), Err(GeneratorError::Failed(errors)) if errors.len() == 1));
    }

    #[test]
    fn sink_rejection_is_emission_failure() {
        let result = generate_all(
            &[users_repo_action()],
            &EmitterConfig::default(),
            &mut RejectingSink,
            FailureMode::FailFast,
        );
        match result {
            Err(GeneratorError::EmissionFailure { action, helper, .. }) => {
                assert_eq!(action, "crate::api::UsersRepoAction");
                assert_eq!(helper, "UsersRepoActionHelper");
            }
            other => panic!("expected EmissionFailure, got {other:?}"),
        }
    }

    #[test]
    fn invalid_suffix_aborts_before_any_action() {
        let mut sink = MemorySink::new();
        let result = generate_all(
            &[users_repo_action()],
            &EmitterConfig::default().with_suffix("-"),
            &mut sink,
            FailureMode::KeepGoing,
        );
        assert!(matches!(result, Err(GeneratorError::InvalidHelperSuffix { .. })));
        assert!(sink.artifacts().is_empty());
    }

    #[test]
    fn memory_sink_keeps_package_and_order() {
        let mut sink = MemorySink::new();
        generate_all(
            &[etag_action(), users_repo_action()],
            &EmitterConfig::default(),
            &mut sink,
            FailureMode::FailFast,
        )
        .unwrap();

        let names: Vec<_> = sink.artifacts().iter().map(|a| a.class_name.as_str()).collect();
        assert_eq!(names, vec!["EtagActionHelper", "UsersRepoActionHelper"]);
        assert_eq!(sink.artifacts()[0].package, "crate::api");
    }
}
