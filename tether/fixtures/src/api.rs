//! Actions against a small repository-hosting API.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use tether_macros::{ActionBase, HttpAction};
use tether_runtime::ActionBody;

#[derive(Debug, Default, ActionBase)]
#[action_base]
pub struct ApiAction {
    #[http(request_header = "Authorization")]
    pub token: Option<String>,
    #[http(status)]
    pub status: i32,
}

#[derive(Debug, Default, HttpAction)]
#[http_action(method = "GET", path = "/users/{user}/repos", extends = "ApiAction")]
pub struct UsersRepoAction {
    pub base: ApiAction,
    #[http(path)]
    pub user: Option<String>,
    #[http(query = "sort")]
    pub sort: Option<String>,
    #[http(query = "page")]
    pub page: u32,
    #[http(response = 200)]
    pub repos: Option<RepoPage>,
    #[http(response)]
    pub error: Option<ApiError>,
    #[http(response_header = "ETag")]
    etag: Option<String>,
    #[http(status)]
    pub ok: bool,
}

impl UsersRepoAction {
    pub fn etag(&self) -> Option<&str> {
        self.etag.as_deref()
    }
}

impl AsRef<ApiAction> for UsersRepoAction {
    fn as_ref(&self) -> &ApiAction {
        &self.base
    }
}

impl AsMut<ApiAction> for UsersRepoAction {
    fn as_mut(&mut self) -> &mut ApiAction {
        &mut self.base
    }
}

#[derive(Debug, Default, HttpAction)]
#[http_action(method = "POST", path = "/login", variant = "form_url_encoded")]
pub struct LoginAction {
    #[http(field = "u")]
    pub user: Option<String>,
    #[http(field = "p")]
    pub pass: Option<String>,
    #[http(status)]
    pub code: u16,
}

#[derive(Debug, Default, HttpAction)]
#[http_action(method = "POST", path = "/upload", variant = "multipart")]
pub struct UploadAction {
    #[http(part(name = "f", encoding = "application/octet-stream"))]
    pub file: Option<PathBuf>,
    #[http(part = "note")]
    pub note: Option<String>,
    #[http(part = "raw")]
    pub raw: Vec<u8>,
    #[http(response)]
    pub receipt: String,
}

#[derive(Debug, Default, HttpAction)]
#[http_action(method = "PUT", path = "/items/{id}")]
pub struct UpdateItem {
    #[http(path(encode = false))]
    pub id: u64,
    #[http(body)]
    pub item: Option<Item>,
    #[http(response_header = "X-Count")]
    pub count: i64,
    #[http(status)]
    pub status_text: String,
}

#[derive(Debug, Default, HttpAction)]
#[http_action(method = "PUT", path = "/blobs/{name}")]
pub struct PutBlob {
    #[http(path)]
    pub name: String,
    #[http(body)]
    pub content: ActionBody,
    #[http(response)]
    pub echo: ActionBody,
}

#[derive(Debug, Deserialize, PartialEq)]
pub struct RepoPage {
    pub items: Vec<Repo>,
}

#[derive(Debug, Deserialize, PartialEq)]
pub struct Repo {
    pub name: String,
}

#[derive(Debug, Deserialize, PartialEq)]
pub struct ApiError {
    pub message: String,
}

#[derive(Debug, Serialize)]
pub struct Item {
    pub label: String,
}

mount_helper!(users_repo_action_helper, UsersRepoActionHelper, "/api/users_repo_action_helper.rs");
mount_helper!(login_action_helper, LoginActionHelper, "/api/login_action_helper.rs");
mount_helper!(upload_action_helper, UploadActionHelper, "/api/upload_action_helper.rs");
mount_helper!(update_item_helper, UpdateItemHelper, "/api/update_item_helper.rs");
mount_helper!(put_blob_helper, PutBlobHelper, "/api/put_blob_helper.rs");
