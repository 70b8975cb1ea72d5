//! Evaluation of legacy `// +build` constraint comments.
//!
//! A file is built when every constraint line holds. Within a line the
//! space-separated options are OR'ed, within an option the comma-separated
//! tags are AND'ed, and a tag may be negated with a leading `!`.

use tracing::{debug, trace};

use crate::context::BuildContext;
use crate::header::parse_header;
use crate::version::parse_minor_predicate;

const CONSTRAINT_MARKER: &str = "+build ";

/// Whether a single tag holds, e.g. `linux`, `!cgo` or `go1.18`.
pub fn tag_satisfied(ctx: &BuildContext, tag: &str) -> bool {
    let (negated, name) = match tag.strip_prefix('!') {
        Some(rest) => (true, rest),
        None => (false, tag),
    };

    let matched = ctx.has_tag(name)
        || name == ctx.goos()
        || name == ctx.goarch()
        || parse_minor_predicate(name).is_some_and(|min| ctx.minor_version() >= min);

    matched != negated
}

/// AND of the comma-separated tags in `option`.
pub fn option_satisfied(ctx: &BuildContext, option: &str) -> bool {
    option.split(',').all(|tag| tag_satisfied(ctx, tag))
}

/// Whether `line` lets the file build. Lines that are not `+build`
/// constraints always do.
pub fn line_satisfied(ctx: &BuildContext, line: &str) -> bool {
    let Some(rest) = line.strip_prefix(CONSTRAINT_MARKER) else {
        return true;
    };
    let options = rest.trim();
    if options.is_empty() {
        return false;
    }
    options.split(' ').any(|o| option_satisfied(ctx, o))
}

/// Whether the constraint comments in the header of `src` allow the file
/// to be built under `ctx`. A header that cannot be parsed excludes the file.
pub fn file_constraints_satisfied(ctx: &BuildContext, file_name: &str, src: &str) -> bool {
    let header = match parse_header(src) {
        Ok(header) => header,
        Err(err) => {
            debug!(file = file_name, error = %err, "excluded: unreadable header");
            return false;
        }
    };

    for group in &header.comments {
        for line in group.text().lines().map(str::trim) {
            let ok = line_satisfied(ctx, line);
            trace!(file = file_name, line, ok, "constraint line");
            if !ok {
                debug!(file = file_name, line, "excluded by build constraint");
                return false;
            }
        }
    }
    true
}
