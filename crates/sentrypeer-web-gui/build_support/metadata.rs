//! Build metadata lookups shared by the build script and its tests

use std::path::{Path, PathBuf};

/// Files whose change means `HEAD` may point at a different commit.
///
/// `HEAD` itself only changes when switching branches; a new commit moves
/// the branch ref, which lives either in its own file or in `packed-refs`.
pub fn git_rerun_paths(git_dir: &Path, head: &str) -> Vec<PathBuf> {
    let mut paths = vec![git_dir.join("HEAD")];
    if let Some(reference) = head.trim().strip_prefix("ref:") {
        paths.push(git_dir.join(reference.trim()));
        paths.push(git_dir.join("packed-refs"));
    }
    paths
}

/// `package.metadata.sentrypeer.copyright` of a crate manifest
pub fn copyright_from_manifest(manifest: &str) -> Option<String> {
    let table = manifest.parse::<toml::Table>().ok()?;
    table
        .get("package")?
        .get("metadata")?
        .get("sentrypeer")?
        .get("copyright")?
        .as_str()
        .map(str::trim)
        .filter(|c| !c.is_empty())
        .map(str::to_string)
}
