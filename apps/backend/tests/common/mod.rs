#![allow(dead_code)]

// Logging is auto-installed for every test binary that declares `mod common;`
#[ctor::ctor]
fn init_logging() {
    backend_test_support::logging::init();
}

pub const CALLER_HEADER: &str = "x-caller-id";

pub fn units(names: &[&str]) -> Vec<String> {
    names.iter().map(|s| s.to_string()).collect()
}

pub fn default_units() -> Vec<String> {
    units(&["knight", "archer", "mage"])
}
