//! Environment overrides for `KrausConfig`.
//!
//! Everything lives in one test function: the process environment is shared
//! by all tests in a binary, and this file is its own binary.

use arvak_kraus::config::{ENV_ATOL, ENV_RTOL};
use arvak_kraus::{KrausConfig, KrausError};

fn set(key: &str, value: &str) {
    // SAFETY: only this binary's single test touches the environment.
    unsafe { std::env::set_var(key, value) };
}

fn clear() {
    // SAFETY: see `set`.
    unsafe {
        std::env::remove_var(ENV_ATOL);
        std::env::remove_var(ENV_RTOL);
    }
}

#[test]
fn env_overrides_follow_precedence_and_validation() {
    clear();

    // Override applied.
    set(ENV_ATOL, "1e-6");
    let config = KrausConfig::from_env().unwrap();
    assert_eq!(config.tolerance.atol, 1e-6);
    assert_eq!(config.tolerance.rtol, 1e-5);

    // Environment beats file; unset keys keep the file's value.
    let path = std::env::temp_dir().join(format!("arvak-kraus-env-{}.yaml", std::process::id()));
    std::fs::write(&path, "tolerance:\n  atol: 1.0e-10\n  rtol: 1.0e-3\n").unwrap();
    let config = KrausConfig::load(Some(&path)).unwrap();
    assert_eq!(config.tolerance.atol, 1e-6);
    assert_eq!(config.tolerance.rtol, 1e-3);

    // Unparsable values are ignored.
    set(ENV_ATOL, "tiny");
    set(ENV_RTOL, "");
    assert_eq!(KrausConfig::from_env().unwrap(), KrausConfig::default());
    let config = KrausConfig::load(Some(&path)).unwrap();
    assert_eq!(config.tolerance.atol, 1e-10);

    // Values that parse but are not usable tolerances are rejected.
    for bad in ["NaN", "inf", "-1"] {
        set(ENV_ATOL, bad);
        assert!(
            matches!(KrausConfig::from_env(), Err(KrausError::Config(_))),
            "atol={bad}"
        );
        assert!(
            matches!(KrausConfig::load(Some(&path)), Err(KrausError::Config(_))),
            "atol={bad}"
        );
    }

    std::fs::remove_file(&path).ok();
    clear();
}
