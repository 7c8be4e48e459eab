//! Test: a form action with fields.

use tether_macros::HttpAction;

#[derive(HttpAction)]
#[http_action(method = "post", path = "/login", variant = "form")]
pub struct LoginAction {
    #[http(field = "u")]
    pub user: Option<String>,
    #[http(field = "p")]
    pub pass: Option<String>,
}

fn main() {}
