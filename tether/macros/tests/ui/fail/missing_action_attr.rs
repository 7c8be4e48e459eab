use tether_macros::HttpAction;

#[derive(HttpAction)]
pub struct NoRole {
    pub user: Option<String>,
}

fn main() {}
