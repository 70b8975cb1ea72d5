use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::errors::{ContextError, Result};
use crate::version::resolve_minor_version;

/// Target environment that build constraints are checked against.
///
/// A value of this type always carries a valid release list: the newest
/// supported minor version is resolved once, when the context is built.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawBuildContext", into = "RawBuildContext")]
pub struct BuildContext {
    goos: String,
    goarch: String,
    build_tags: HashSet<String>,
    release_tags: Vec<String>,
    minor_version: u32,
}

/// Unvalidated form used for (de)serialization.
#[derive(Clone, Debug, Serialize, Deserialize)]
struct RawBuildContext {
    goos: String,
    goarch: String,
    #[serde(default)]
    build_tags: Vec<String>,
    release_tags: Vec<String>,
}

impl BuildContext {
    pub fn new<I, S>(
        goos: impl Into<String>,
        goarch: impl Into<String>,
        build_tags: I,
        release_tags: Vec<String>,
    ) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let minor_version = resolve_minor_version(&release_tags)?;
        Ok(Self {
            goos: goos.into(),
            goarch: goarch.into(),
            build_tags: build_tags.into_iter().map(Into::into).collect(),
            release_tags,
            minor_version,
        })
    }

    /// Context supporting every release from `go1.1` up to `go1.<minor>`.
    /// A minor of 0 yields the single release `go1.0`.
    pub fn release(goos: impl Into<String>, goarch: impl Into<String>, minor: u32) -> Self {
        let release_tags = match minor {
            0 => vec!["go1.0".to_string()],
            _ => (1..=minor).map(|m| format!("go1.{m}")).collect(),
        };
        Self {
            goos: goos.into(),
            goarch: goarch.into(),
            build_tags: HashSet::new(),
            release_tags,
            minor_version: minor,
        }
    }

    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.build_tags.extend(tags.into_iter().map(Into::into));
        self
    }

    pub fn goos(&self) -> &str {
        &self.goos
    }

    pub fn goarch(&self) -> &str {
        &self.goarch
    }

    pub fn build_tags(&self) -> &HashSet<String> {
        &self.build_tags
    }

    pub fn has_tag(&self, tag: &str) -> bool {
        self.build_tags.contains(tag)
    }

    pub fn release_tags(&self) -> &[String] {
        &self.release_tags
    }

    /// Newest supported minor version (`21` for `go1.21`).
    pub fn minor_version(&self) -> u32 {
        self.minor_version
    }
}

impl TryFrom<RawBuildContext> for BuildContext {
    type Error = ContextError;

    fn try_from(raw: RawBuildContext) -> Result<Self> {
        BuildContext::new(raw.goos, raw.goarch, raw.build_tags, raw.release_tags)
    }
}

impl From<BuildContext> for RawBuildContext {
    fn from(ctx: BuildContext) -> Self {
        let mut build_tags: Vec<String> = ctx.build_tags.into_iter().collect();
        build_tags.sort();
        Self {
            goos: ctx.goos,
            goarch: ctx.goarch,
            build_tags,
            release_tags: ctx.release_tags,
        }
    }
}

/// Toolchain name of the operating system this binary runs on.
pub fn host_goos() -> &'static str {
    match std::env::consts::OS {
        "macos" => "darwin",
        other => other,
    }
}

/// Toolchain name of the architecture this binary runs on.
pub fn host_goarch() -> &'static str {
    match std::env::consts::ARCH {
        "x86" => "386",
        "x86_64" => "amd64",
        "aarch64" => "arm64",
        "powerpc64" => "ppc64",
        "wasm32" => "wasm",
        other => other,
    }
}
