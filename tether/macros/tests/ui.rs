//! UI tests for tether-macros using trybuild.
//!
//! Pass cases carry well-formed markers; fail cases must be rejected with
//! the recorded diagnostics.

#[test]
fn ui_tests() {
    let t = trybuild::TestCases::new();

    t.pass("tests/ui/pass/*.rs");
    t.compile_fail("tests/ui/fail/*.rs");
}
