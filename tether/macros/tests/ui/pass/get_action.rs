//! Test: a GET action with path, query and response markers.

use tether_macros::HttpAction;

#[derive(HttpAction)]
#[http_action(method = "GET", path = "/users/{user}/repos")]
pub struct UsersRepoAction {
    #[http(path)]
    pub user: Option<String>,
    #[http(query(name = "sort", encode_value = false))]
    pub sort: Option<String>,
    #[http(response = 200)]
    pub repos: Option<Vec<String>>,
    #[http(response_header = "ETag")]
    pub etag: Option<String>,
    #[http(status)]
    pub ok: bool,
    pub untouched: u8,
}

fn main() {}
