//! Build script for sentrypeer-web-gui
//!
//! Injects the source revision and the copyright line into the compiled
//! bundle so the running dashboard can show them without a network
//! round-trip.
//!
//! `SENTRYPEER_GIT_REV` may be set explicitly (release tarballs have no
//! `.git`); otherwise `git rev-parse --short HEAD` is used, falling back to
//! "unknown". The copyright comes from `[package.metadata.sentrypeer]` in
//! this crate's manifest.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

#[path = "build_support/metadata.rs"]
mod metadata;

fn main() {
    println!("cargo:rerun-if-env-changed=SENTRYPEER_GIT_REV");
    println!("cargo:rerun-if-changed=Cargo.toml");

    if let Some(git_dir) = git_dir() {
        let head = fs::read_to_string(git_dir.join("HEAD")).unwrap_or_default();
        for path in metadata::git_rerun_paths(&git_dir, &head) {
            println!("cargo:rerun-if-changed={}", path.display());
        }
    }

    let rev = env::var("SENTRYPEER_GIT_REV")
        .ok()
        .filter(|rev| !rev.trim().is_empty())
        .or_else(git_short_rev)
        .unwrap_or_else(|| "unknown".to_string());
    println!("cargo:rustc-env=SENTRYPEER_GUI_GIT_REV={}", rev.trim());

    let manifest_dir = env::var("CARGO_MANIFEST_DIR").expect("CARGO_MANIFEST_DIR is set by cargo");
    let manifest = fs::read_to_string(Path::new(&manifest_dir).join("Cargo.toml"))
        .expect("failed to read Cargo.toml");
    if let Some(copyright) = metadata::copyright_from_manifest(&manifest) {
        println!("cargo:rustc-env=SENTRYPEER_GUI_COPYRIGHT={}", copyright);
    }
}

fn git_short_rev() -> Option<String> {
    git(&["rev-parse", "--short", "HEAD"])
}

fn git_dir() -> Option<PathBuf> {
    git(&["rev-parse", "--absolute-git-dir"]).map(PathBuf::from)
}

fn git(args: &[&str]) -> Option<String> {
    Command::new("git")
        .args(args)
        .output()
        .ok()
        .filter(|o| o.status.success())
        .map(|o| String::from_utf8_lossy(&o.stdout).trim().to_owned())
        .filter(|out| !out.is_empty())
}
