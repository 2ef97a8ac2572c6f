#![allow(dead_code)]
// A raw collection has no element type to bound

use envbind::EnvBind;

#[derive(Default, EnvBind)]
struct Config {
    #[env(raw, wildcard = "Number")]
    pub ids: Vec<String>,
}

fn main() {}
