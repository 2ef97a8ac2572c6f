#![allow(dead_code)]
// A wildcard only describes collection elements

use envbind::EnvBind;

#[derive(Default, EnvBind)]
struct Config {
    #[env(name = "PORT", wildcard = "Number")]
    pub port: i32,
}

fn main() {}
