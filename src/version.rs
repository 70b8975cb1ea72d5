use crate::errors::{ContextError, Result};

const VERSION_PREFIX: &str = "go1.";

/// Minor version of the newest release in `release_tags`, e.g. `21` for
/// `[.., "go1.20", "go1.21"]`.
///
/// The list is ordered oldest first; only its last element is read.
pub fn resolve_minor_version(release_tags: &[String]) -> Result<u32> {
    let current = release_tags.last().ok_or(ContextError::EmptyReleaseTags)?;
    let unsupported = || ContextError::UnsupportedVersion {
        tag: current.clone(),
    };

    let mut parts = current.split('.');
    let _major = parts.next();
    let minor = parts.next().ok_or_else(unsupported)?;
    minor.parse::<u32>().map_err(|_| unsupported())
}

/// Minimum minor version required by a `go1.N` tag, or `None` when the tag
/// is not a well-formed version predicate.
pub fn parse_minor_predicate(tag: &str) -> Option<u32> {
    if tag.len() <= VERSION_PREFIX.len() {
        return None;
    }
    tag.strip_prefix(VERSION_PREFIX)?.parse::<u32>().ok()
}
