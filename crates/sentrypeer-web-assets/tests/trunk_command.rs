//! The nested trunk build must not share the outer cargo's target directory
//! or build-script environment

#[path = "../build_support/trunk.rs"]
mod trunk;

use std::ffi::OsStr;
use std::path::Path;

fn vars(pairs: &[(&str, &str)]) -> Vec<(String, String)> {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

#[test]
fn uses_its_own_target_dir() {
    let out_dir = Path::new("/tmp/target/release/build/sentrypeer-web-assets-1a2b/out");
    let command = trunk::trunk_build_command(Path::new("../sentrypeer-web-gui"), out_dir, Vec::new());

    let target_dir = command
        .get_envs()
        .find(|(k, _)| *k == OsStr::new("CARGO_TARGET_DIR"))
        .and_then(|(_, v)| v)
        .expect("CARGO_TARGET_DIR is set");
    assert_eq!(Path::new(target_dir), out_dir.join("gui-target"));

    assert_eq!(command.get_program(), OsStr::new("trunk"));
    let args: Vec<_> = command.get_args().collect();
    assert_eq!(args, vec![OsStr::new("build"), OsStr::new("--release")]);
    assert_eq!(command.get_current_dir(), Some(Path::new("../sentrypeer-web-gui")));
}

#[test]
fn clears_build_script_environment() {
    let command = trunk::trunk_build_command(
        Path::new("gui"),
        Path::new("out"),
        vars(&[
            ("CARGO_MANIFEST_DIR", "/src/crates/sentrypeer-web-assets"),
            ("CARGO_FEATURE_BUNDLE", "1"),
            ("CARGO_ENCODED_RUSTFLAGS", ""),
            ("CARGO_TARGET_DIR", "/src/target"),
            ("OUT_DIR", "/src/target/release/build/x/out"),
            ("TARGET", "x86_64-unknown-linux-gnu"),
            ("PROFILE", "release"),
            ("CARGO_HOME", "/home/u/.cargo"),
            ("PATH", "/usr/bin"),
        ]),
    );

    let removed: Vec<_> = command
        .get_envs()
        .filter(|(_, v)| v.is_none())
        .map(|(k, _)| k.to_string_lossy().into_owned())
        .collect();
    for key in [
        "CARGO_MANIFEST_DIR",
        "CARGO_FEATURE_BUNDLE",
        "CARGO_ENCODED_RUSTFLAGS",
        "OUT_DIR",
        "TARGET",
        "PROFILE",
    ] {
        assert!(removed.contains(&key.to_string()), "{key} leaks into trunk");
    }
    assert!(!removed.contains(&"CARGO_HOME".to_string()));
    assert!(!removed.contains(&"PATH".to_string()));
}

#[test]
fn inherited_var_classification() {
    assert!(trunk::is_inherited_build_var("CARGO_PKG_NAME"));
    assert!(trunk::is_inherited_build_var("RUSTC"));
    assert!(!trunk::is_inherited_build_var("CARGO"));
    assert!(!trunk::is_inherited_build_var("CARGO_HOME"));
    assert!(!trunk::is_inherited_build_var("HOME"));
}
