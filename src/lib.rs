pub mod errors;
pub mod context;
pub mod version;
pub mod header;
pub mod constraint;
pub mod filename;
mod parser;

use itertools::Itertools;
use tracing::debug;

pub use constraint::{file_constraints_satisfied, line_satisfied, option_satisfied, tag_satisfied};
pub use context::BuildContext;
pub use errors::{ContextError, HeaderError, Result};
pub use filename::should_skip_by_name;
pub use version::resolve_minor_version;

/// Both file predicates against one context: a file is included only if
/// neither its name nor its constraint comments rule it out.
#[derive(Clone, Copy, Debug)]
pub struct BuildFilter<'a> {
    ctx: &'a BuildContext,
}

impl<'a> BuildFilter<'a> {
    pub fn new(ctx: &'a BuildContext) -> Self {
        debug!(
            goos = ctx.goos(),
            goarch = ctx.goarch(),
            tags = %ctx.build_tags().iter().sorted().join(","),
            minor = ctx.minor_version(),
            "build filter"
        );
        Self { ctx }
    }

    pub fn context(&self) -> &'a BuildContext {
        self.ctx
    }

    pub fn includes(&self, path: &str, src: &str) -> bool {
        !should_skip_by_name(self.ctx, path) && file_constraints_satisfied(self.ctx, path, src)
    }

    /// Keeps the paths whose names alone do not exclude them.
    pub fn retain_names<I, S>(&self, paths: I) -> impl Iterator<Item = S> + 'a
    where
        I: IntoIterator<Item = S>,
        I::IntoIter: 'a,
        S: AsRef<str>,
    {
        let ctx = self.ctx;
        paths
            .into_iter()
            .filter(move |p| !should_skip_by_name(ctx, p.as_ref()))
    }
}
