//! Drives the helpers `build.rs` generated for `src/api.rs` through the
//! runtime's recording builder and JSON converter.

use std::path::PathBuf;

use tether_fixtures::api::*;
use tether_runtime::{
    ActionBody, ActionHelper, BuilderCall, ConvertError, HttpMethod, JsonConverter, RecordingBuilder,
    RequestVariant, Response,
};

fn json(text: &str) -> ActionBody {
    ActionBody::bytes("application/json", text.as_bytes().to_vec())
}

fn fill<A, H: ActionHelper<A>>(helper: H, action: &A) -> Vec<BuilderCall> {
    let mut builder = RecordingBuilder::default();
    helper.fill_request(&mut builder, action);
    builder.into_calls()
}

fn query(name: &str, value: &str) -> BuilderCall {
    BuilderCall::AddQueryParam {
        name: name.into(),
        value: value.into(),
        encode_name: true,
        encode_value: true,
    }
}

#[test]
fn get_with_path_and_query_in_binding_order() {
    let mut action = UsersRepoAction::default();
    action.base = ApiAction {
        token: Some("Bearer t".into()),
        ..Default::default()
    };
    action.user = Some("octocat".into());
    action.sort = Some("updated".into());
    action.page = 2;

    assert_eq!(
        fill(UsersRepoActionHelper, &action),
        vec![
            BuilderCall::SetMethod(HttpMethod::Get),
            BuilderCall::SetRequestVariant(RequestVariant::Simple),
            BuilderCall::SetPath("/users/{user}/repos".into()),
            BuilderCall::AddPathParam {
                name: "user".into(),
                value: "octocat".into(),
                encode: true,
            },
            BuilderCall::AddHeader {
                name: "Authorization".into(),
                value: "Bearer t".into(),
            },
            query("sort", "updated"),
            query("page", "2"),
        ]
    );
}

#[test]
fn absent_optionals_make_no_calls_but_primitives_always_do() {
    let calls = fill(UsersRepoActionHelper, &UsersRepoAction::default());

    assert_eq!(
        calls,
        vec![
            BuilderCall::SetMethod(HttpMethod::Get),
            BuilderCall::SetRequestVariant(RequestVariant::Simple),
            BuilderCall::SetPath("/users/{user}/repos".into()),
            query("page", "0"),
        ]
    );
}

#[test]
fn form_fields_in_declaration_order() {
    let action = LoginAction {
        user: Some("me".into()),
        pass: Some("secret".into()),
        ..Default::default()
    };

    assert_eq!(
        fill(LoginActionHelper, &action),
        vec![
            BuilderCall::SetMethod(HttpMethod::Post),
            BuilderCall::SetRequestVariant(RequestVariant::FormUrlEncoded),
            BuilderCall::SetPath("/login".into()),
            BuilderCall::AddField {
                name: "u".into(),
                value: "me".into(),
            },
            BuilderCall::AddField {
                name: "p".into(),
                value: "secret".into(),
            },
        ]
    );
}

#[test]
fn multipart_parts_carry_their_bodies() {
    let action = UploadAction {
        file: Some(PathBuf::from("/tmp/report.bin")),
        note: Some("hi".into()),
        raw: vec![1, 2],
        ..Default::default()
    };

    let parts: Vec<_> = fill(UploadActionHelper, &action)
        .into_iter()
        .filter_map(|call| match call {
            BuilderCall::AddPart { name, body, encoding } => Some((name, body, encoding)),
            _ => None,
        })
        .collect();

    assert_eq!(parts.len(), 3);
    assert_eq!(parts[0].0, "f");
    assert_eq!(parts[0].1.path(), Some(PathBuf::from("/tmp/report.bin").as_path()));
    assert_eq!(parts[0].2, "application/octet-stream");
    assert_eq!(parts[1], ("note".to_string(), ActionBody::bytes("binary", b"hi".to_vec()), "binary".to_string()));
    assert_eq!(parts[2].1.content(), Some(&[1u8, 2][..]));
}

#[test]
fn serialisable_body_is_set_as_a_value() {
    let action = UpdateItem {
        id: 7,
        item: Some(Item { label: "x".into() }),
        ..Default::default()
    };
    let calls = fill(UpdateItemHelper, &action);

    assert_eq!(
        calls[3],
        BuilderCall::AddPathParam {
            name: "id".into(),
            value: "7".into(),
            encode: false,
        }
    );
    assert_eq!(
        calls.last(),
        Some(&BuilderCall::SetBody(Some(serde_json::json!({ "label": "x" }))))
    );

    let calls = fill(UpdateItemHelper, &UpdateItem::default());
    assert_eq!(calls.last(), Some(&BuilderCall::SetBody(None)));
}

#[test]
fn action_body_is_sent_raw() {
    let action = PutBlob {
        name: "notes.txt".into(),
        content: ActionBody::bytes("text/plain", b"hi".to_vec()),
        ..Default::default()
    };

    let calls = fill(PutBlobHelper, &action);
    assert_eq!(
        calls.last(),
        Some(&BuilderCall::SetRawBody(Some(ActionBody::bytes("text/plain", b"hi".to_vec()))))
    );
    assert!(!calls.iter().any(|call| matches!(call, BuilderCall::SetBody(_))));
}

#[test]
fn specific_status_body_wins_over_catch_all() {
    let response = Response::new(200, json(r#"{"items":[{"name":"tether"}]}"#))
        .with_header("ETag", "v1")
        .with_header("ETag", "v2");
    let action = UsersRepoActionHelper
        .on_response(UsersRepoAction::default(), &response, &JsonConverter)
        .unwrap();

    assert!(action.ok);
    assert_eq!(action.base.status, 200);
    assert_eq!(
        action.repos.as_ref().map(|page| &page.items),
        Some(&vec![Repo { name: "tether".into() }])
    );
    assert!(action.error.is_none());
    assert_eq!(action.etag(), Some("v2"));
}

#[test]
fn catch_all_body_runs_for_other_statuses() {
    let response = Response::new(404, json(r#"{"message":"nope"}"#));
    let action = UsersRepoActionHelper
        .on_response(UsersRepoAction::default(), &response, &JsonConverter)
        .unwrap();

    assert!(!action.ok);
    assert_eq!(action.base.status, 404);
    assert!(action.repos.is_none());
    assert_eq!(action.error, Some(ApiError { message: "nope".into() }));
    assert!(action.etag().is_none());
}

#[test]
fn undecodable_branch_body_is_a_converter_error() {
    let response = Response::new(200, json(r#"{"message":"wrong shape"}"#));
    let result = UsersRepoActionHelper.on_response(UsersRepoAction::default(), &response, &JsonConverter);

    assert!(matches!(result, Err(ConvertError::Decode(_))));
}

#[test]
fn status_projections_and_header_extraction() {
    let login = LoginActionHelper
        .on_response(LoginAction::default(), &Response::new(401, ActionBody::empty()), &JsonConverter)
        .unwrap();
    assert_eq!(login.code, 401);

    let response = Response::new(204, ActionBody::empty()).with_header("X-Count", "12");
    let update = UpdateItemHelper
        .on_response(UpdateItem::default(), &response, &JsonConverter)
        .unwrap();
    assert_eq!(update.status_text, "204");
    assert_eq!(update.count, 12);
}

#[test]
fn raw_and_text_bodies_skip_the_converter() {
    let echo = ActionBody::bytes("text/plain", b"stored".to_vec());
    let blob = PutBlobHelper
        .on_response(PutBlob::default(), &Response::new(201, echo.clone()), &JsonConverter)
        .unwrap();
    assert_eq!(blob.echo, echo);

    let upload = UploadActionHelper
        .on_response(UploadAction::default(), &Response::new(500, echo), &JsonConverter)
        .unwrap();
    assert_eq!(upload.receipt, "stored");
}
