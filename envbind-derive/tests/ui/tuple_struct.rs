#![allow(dead_code)]
// Members are bound by field, so tuple structs are rejected

use envbind::EnvBind;

#[derive(EnvBind)]
struct Config(i32);

fn main() {}
