#![allow(dead_code)]
// There is no fallback value; a missing variable fails the member

use envbind::EnvBind;

#[derive(Default, EnvBind)]
struct Config {
    #[env(name = "PORT", default = 8080)]
    pub port: i32,
}

fn main() {}
