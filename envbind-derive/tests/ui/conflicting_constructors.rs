#![allow(dead_code)]
// Only one constructor choice is allowed

use envbind::EnvBind;

#[derive(EnvBind)]
#[env(constructor = "Config::empty", no_constructor)]
struct Config {
    #[env(name = "PORT")]
    pub port: i32,
}

fn main() {}
