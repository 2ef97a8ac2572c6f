//! Compile-fail tests for `#[derive(EnvBind)]`
//!
//! Unsupported targets and conflicting `#[env]` attributes must be reported
//! at the offending token.

#[test]
fn ui_tests() {
    let t = trybuild::TestCases::new();
    t.compile_fail("tests/ui/*.rs");
}
