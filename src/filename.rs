use std::collections::HashSet;
use std::sync::LazyLock;

use itertools::Itertools;
use tracing::trace;

use crate::context::BuildContext;

const SOURCE_EXT: &str = ".go";

static KNOWN_OS: LazyLock<HashSet<&'static str>> = LazyLock::new(|| {
    HashSet::from([
        "aix",
        "android",
        "darwin",
        "dragonfly",
        "freebsd",
        "js",
        "linux",
        "nacl",
        "netbsd",
        "openbsd",
        "plan9",
        "solaris",
        "windows",
    ])
});

static KNOWN_ARCH: LazyLock<HashSet<&'static str>> = LazyLock::new(|| {
    HashSet::from([
        "386",
        "amd64",
        "amd64p32",
        "arm",
        "arm64",
        "mips",
        "mips64",
        "mips64le",
        "mipsle",
        "ppc64",
        "ppc64le",
        "s390x",
        "wasm",
    ])
});

pub fn is_known_os(name: &str) -> bool {
    KNOWN_OS.contains(name)
}

pub fn is_known_arch(name: &str) -> bool {
    KNOWN_ARCH.contains(name)
}

/// Whether the file at `path` is left out of the build because of its name:
/// not a `.go` file, a `_test` file, or a `_GOOS`/`_GOARCH` suffix that does
/// not fit `ctx`. Paths are slash-separated.
pub fn should_skip_by_name(ctx: &BuildContext, path: &str) -> bool {
    let Some(stem) = path.strip_suffix(SOURCE_EXT) else {
        return true;
    };
    let base = stem.rsplit('/').next().unwrap_or(stem);
    if base.ends_with("_test") {
        return true;
    }
    let Some((_, suffix)) = base.split_once('_') else {
        return false;
    };

    let segments: Vec<&str> = suffix.split('_').collect();
    if let Some((arch, os)) = segments.iter().rev().next_tuple() {
        if *os == ctx.goos() && *arch == ctx.goarch() {
            return false;
        }
    }

    // Two independent conditions; the OS guard does not apply to the arch check.
    let last = segments.last().copied().unwrap_or_default();
    let arch_suffix = is_known_arch(last);
    let foreign_os_suffix = is_known_os(last) && last != ctx.goos() && last != ctx.goarch();
    trace!(path, last, arch_suffix, foreign_os_suffix, "filename suffix");

    arch_suffix || foreign_os_suffix
}
