//! Build metadata compiled into the bundle

/// Version, revision and descriptive text, fixed at compile time
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BuildInfo {
    pub version: &'static str,
    pub git_rev: &'static str,
    pub description: &'static str,
    pub copyright: &'static str,
}

/// Metadata of this build
pub const BUILD_INFO: BuildInfo = BuildInfo {
    version: env!("CARGO_PKG_VERSION"),
    git_rev: match option_env!("SENTRYPEER_GUI_GIT_REV") {
        Some(rev) => rev,
        None => "unknown",
    },
    description: env!("CARGO_PKG_DESCRIPTION"),
    copyright: match option_env!("SENTRYPEER_GUI_COPYRIGHT") {
        Some(copyright) => copyright,
        None => concat!("Copyright (c) ", env!("CARGO_PKG_AUTHORS")),
    },
};

impl BuildInfo {
    pub fn current() -> &'static BuildInfo {
        &BUILD_INFO
    }

    /// "v0.1.0 (abc1234)"
    pub fn version_label(&self) -> String {
        format!("v{} ({})", self.version, self.git_rev)
    }
}
