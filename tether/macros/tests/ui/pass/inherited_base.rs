//! Test: an action extending a base struct.

use tether_macros::{ActionBase, HttpAction};

#[derive(ActionBase)]
#[action_base]
pub struct ApiAction {
    #[http(request_header = "Authorization")]
    pub token: Option<String>,
    #[http(status)]
    pub status: i32,
}

#[derive(HttpAction)]
#[http_action(method = "POST", path = "/upload", variant = "multipart", extends = "ApiAction")]
pub struct UploadAction {
    pub base: ApiAction,
    #[http(part(name = "f", encoding = "application/octet-stream"))]
    pub file: Option<std::path::PathBuf>,
    #[http(part = "note")]
    pub note: Option<String>,
}

fn main() {}
