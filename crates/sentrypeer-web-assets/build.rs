//! Build script for sentrypeer-web-assets
//!
//! Builds the Web GUI bundle when the `bundle` feature is enabled. The GUI
//! source lives in `../sentrypeer-web-gui` and is compiled to WASM with
//! trunk, whose `Trunk.toml` writes into this crate's `http_static/`.
//!
//! A bundle that is already present (from a release tarball or a previous
//! build) is used as is.

use std::env;
use std::path::Path;
use std::process::Command;

#[path = "build_support/trunk.rs"]
mod trunk;

// Keep in sync with OUTPUT_DIR / ENTRY_DOCUMENT in src/lib.rs
const OUTPUT_DIR: &str = "http_static";
const ENTRY_DOCUMENT: &str = "http_index_route.html";

fn main() {
    println!("cargo:rerun-if-changed={}", OUTPUT_DIR);

    if env::var("CARGO_FEATURE_BUNDLE").is_ok() {
        build_bundle();
    }
}

fn build_bundle() {
    let manifest_dir = env::var("CARGO_MANIFEST_DIR").expect("CARGO_MANIFEST_DIR is set by cargo");
    let manifest_path = Path::new(&manifest_dir);
    let entry = manifest_path.join(OUTPUT_DIR).join(ENTRY_DOCUMENT);
    let gui_dir = manifest_path.join("..").join("sentrypeer-web-gui");

    println!("cargo:rerun-if-changed=../sentrypeer-web-gui/src");
    println!("cargo:rerun-if-changed=../sentrypeer-web-gui/index.html");
    println!("cargo:rerun-if-changed=../sentrypeer-web-gui/Trunk.toml");

    if entry.exists() {
        return;
    }

    if !gui_dir.join("Trunk.toml").exists() {
        panic!(
            "\n\
            ========================================================================\n\
              Web GUI bundle not found!\n\
            \n\
              Neither a pre-built {}/{} nor the GUI sources were found.\n\
              Expected: ../sentrypeer-web-gui/Trunk.toml\n\
            ========================================================================\n",
            OUTPUT_DIR, ENTRY_DOCUMENT
        );
    }

    println!("cargo:warning=Building SentryPeer Web GUI with trunk...");

    let trunk_ok = Command::new("trunk")
        .arg("--version")
        .output()
        .map(|o| o.status.success())
        .unwrap_or(false);
    if !trunk_ok {
        panic!(
            "\n\
            ========================================================================\n\
              Bundling the Web GUI requires 'trunk' but it's not installed.\n\
            \n\
              Install trunk with:\n\
                cargo install trunk\n\
            \n\
              Or build without the bundle feature:\n\
                cargo build -p sentrypeer-web-assets --no-default-features\n\
            ========================================================================\n"
        );
    }

    if let Ok(output) = Command::new("rustup")
        .args(["target", "list", "--installed"])
        .output()
    {
        let installed = String::from_utf8_lossy(&output.stdout);
        if !installed.contains("wasm32-unknown-unknown") {
            panic!(
                "\n\
                ========================================================================\n\
                  Bundling the Web GUI requires the 'wasm32-unknown-unknown' target.\n\
                \n\
                  Install it with:\n\
                    rustup target add wasm32-unknown-unknown\n\
                ========================================================================\n"
            );
        }
    }

    let out_dir = env::var("OUT_DIR").expect("OUT_DIR is set by cargo");
    let status = trunk::trunk_build_command(&gui_dir, Path::new(&out_dir), env::vars())
        .status()
        .expect("failed to execute trunk build");

    if !status.success() {
        panic!(
            "\n\
            ========================================================================\n\
              Web GUI build failed!\n\
            \n\
              Try building manually:\n\
                cd crates/sentrypeer-web-gui && trunk build --release\n\
            ========================================================================\n"
        );
    }

    if !entry.exists() {
        panic!(
            "\n\
            ========================================================================\n\
              Web GUI build completed but {}/{} not found!\n\
            \n\
              Check the dist directory and post_build hook in Trunk.toml.\n\
            ========================================================================\n",
            OUTPUT_DIR, ENTRY_DOCUMENT
        );
    }

    println!("cargo:warning=Web GUI bundled successfully!");
}
