//! The `trunk build` invocation used by the build script.
//!
//! trunk runs its own `cargo build` for the GUI crate, which lives in this
//! workspace. Sharing the outer build's target directory would make that
//! inner cargo wait on the lock the outer cargo holds, so the child gets a
//! target directory of its own and none of the variables cargo sets for
//! build scripts.

use std::path::{Path, PathBuf};
use std::process::Command;

/// Variables cargo sets for build scripts that must not leak into a nested
/// cargo invocation
const BUILD_SCRIPT_VARS: &[&str] = &[
    "DEBUG", "HOST", "NUM_JOBS", "OPT_LEVEL", "OUT_DIR", "PROFILE", "RUSTC", "RUSTC_LINKER",
    "RUSTDOC", "TARGET",
];

/// Target directory of the nested GUI build
pub fn gui_target_dir(out_dir: &Path) -> PathBuf {
    out_dir.join("gui-target")
}

/// Whether `key` was set by the outer cargo for this build script
pub fn is_inherited_build_var(key: &str) -> bool {
    // CARGO_HOME locates the registry cache; CARGO is the cargo binary
    (key.starts_with("CARGO_") && key != "CARGO_HOME") || BUILD_SCRIPT_VARS.contains(&key)
}

/// `trunk build --release` for the GUI crate at `gui_dir`, isolated from the
/// outer cargo process
pub fn trunk_build_command<I>(gui_dir: &Path, out_dir: &Path, vars: I) -> Command
where
    I: IntoIterator<Item = (String, String)>,
{
    let mut command = Command::new("trunk");
    command.args(["build", "--release"]).current_dir(gui_dir);
    for (key, _) in vars {
        if is_inherited_build_var(&key) {
            command.env_remove(&key);
        }
    }
    command.env("CARGO_TARGET_DIR", gui_target_dir(out_dir));
    command
}
