use tether_macros::ActionBase;

#[derive(ActionBase)]
#[http_action(method = "GET", path = "/ping")]
pub struct Ping {
    #[http(status)]
    pub ok: bool,
}

fn main() {}
