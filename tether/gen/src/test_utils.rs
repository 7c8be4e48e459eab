//! Shared test fixtures for tether-gen tests.
//!
//! One descriptor per end-to-end scenario, plus helpers for asserting on
//! formatted output.

use proc_macro2::TokenStream;
use tether_define::{ActionDescriptor, FieldType, HttpMethod, Marker, RequestVariant};

/// `GET /users/{user}/repos` with an optional path param and query param.
pub fn users_repo_action() -> ActionDescriptor {
    ActionDescriptor::new("crate::api::UsersRepoAction", HttpMethod::Get, "/users/{user}/repos")
        .with_field("user", FieldType::optional("String"), Marker::path(""))
        .with_field("sort", FieldType::optional("String"), Marker::query("sort"))
}

/// Form-encoded `POST /login` with two fields.
pub fn login_action() -> ActionDescriptor {
    ActionDescriptor::new("crate::api::LoginAction", HttpMethod::Post, "/login")
        .with_variant(RequestVariant::FormUrlEncoded)
        .with_field("user", FieldType::optional("String"), Marker::field("u"))
        .with_field("pass", FieldType::optional("String"), Marker::field("p"))
}

/// Multipart upload with a file part and a string part.
pub fn upload_action() -> ActionDescriptor {
    ActionDescriptor::new("crate::api::UploadAction", HttpMethod::Post, "/upload")
        .with_variant(RequestVariant::Multipart)
        .with_field(
            "file",
            FieldType::optional("PathBuf"),
            Marker::Part {
                name: "f".into(),
                encoding: "application/octet-stream".into(),
            },
        )
        .with_field("note", FieldType::optional("String"), Marker::part("note"))
}

/// A `200` body plus a catch-all error body.
pub fn status_bodies_action() -> ActionDescriptor {
    ActionDescriptor::new("crate::api::FetchUserAction", HttpMethod::Get, "/user")
        .with_field("ok", FieldType::optional("User"), Marker::response_status(200))
        .with_field("err", FieldType::optional("ApiError"), Marker::response())
}

/// Extracts the `ETag` response header.
pub fn etag_action() -> ActionDescriptor {
    ActionDescriptor::new("crate::api::EtagAction", HttpMethod::Get, "/resource")
        .with_field("etag", FieldType::optional("String"), Marker::response_header("ETag"))
}

/// An action whose `Status` field lives on its parent.
pub fn child_action() -> ActionDescriptor {
    ActionDescriptor::new("crate::ChildAction", HttpMethod::Get, "/child")
        .with_ancestor("crate::ParentAction")
        .with_inherited_field(
            "crate::ParentAction",
            "code",
            FieldType::required("i32"),
            Marker::Status,
        )
}

/// Validates and formats tokens as a Rust file.
pub fn format_generated_code(tokens: &TokenStream) -> Result<String, String> {
    let file = syn::parse2::<syn::File>(tokens.clone()).map_err(|e| e.to_string())?;
    Ok(prettyplease::unparse(&file))
}

/// Drops all whitespace so assertions survive line wrapping.
pub fn squash(code: &str) -> String {
    code.chars().filter(|c| !c.is_whitespace()).collect()
}

#[track_caller]
pub fn assert_code_contains(code: &str, needle: &str) {
    assert!(
        squash(code).contains(&squash(needle)),
        "expected `{needle}` in generated code:\n{code}"
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::planner::plan;

    #[test]
    fn every_fixture_plans() {
        for action in [
            users_repo_action(),
            login_action(),
            upload_action(),
            status_bodies_action(),
            etag_action(),
            child_action(),
        ] {
            assert!(plan(&action).is_ok(), "{} failed to plan", action.target_type);
        }
    }

    #[test]
    fn squash_ignores_layout() {
        assert_code_contains("foo(\n    a,\n    b)", "foo(a, b)");
    }
}
