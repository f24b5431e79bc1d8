//! Environment overrides for Settings.
//!
//! Kept in its own test binary with a single test: the process environment is
//! shared between threads, so other config tests must not observe these vars.

use std::env;

use anemia_flow::application::Mode;
use anemia_flow::config::Settings;

const VARS: [&str; 3] = ["ANEMIA_MODE", "ANEMIA_PRETTY", "ANEMIA_KEYWORD"];

fn clear_vars() {
    for var in VARS {
        env::remove_var(var);
    }
}

#[test]
fn given_anemia_env_vars_when_load_then_override_defaults() {
    clear_vars();

    // Arrange
    env::set_var("ANEMIA_MODE", "labs");
    env::set_var("ANEMIA_PRETTY", "true");
    env::set_var("ANEMIA_KEYWORD", "hb");

    // Act
    let settings = Settings::load(None);

    // Invalid mode is a config error
    env::set_var("ANEMIA_MODE", "guess");
    let invalid = Settings::load(None);

    clear_vars();

    // Assert
    let settings = settings.expect("load settings");
    assert_eq!(settings.mode, Mode::Labs);
    assert!(settings.pretty);
    assert_eq!(settings.keyword, "hb");

    let err = invalid.unwrap_err();
    assert!(err.to_string().starts_with("config error: ANEMIA_MODE"), "{}", err);
}
