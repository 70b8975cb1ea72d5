use thiserror::Error; // Import the `Error` derive macro from the `thiserror` crate

// Fatal: the build context itself is malformed, nothing downstream can be trusted
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ContextError {
    // The release list must name at least one version
    #[error("release tag list is empty")]
    EmptyReleaseTags,

    // The last release tag does not look like `go1.<minor>`
    #[error("unsupported Go version: {tag}")]
    UnsupportedVersion { tag: String },
}

// Recoverable: the file header could not be read, the file is simply excluded
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HeaderError {
    #[error("comment not terminated (opened at byte {offset})")]
    UnterminatedComment { offset: usize },

    #[error("expected 'package' at byte {offset}")]
    MissingPackageClause { offset: usize },

    #[error("expected package name at byte {offset}")]
    MissingPackageName { offset: usize },

    #[error("expected ';' after package clause at byte {offset}")]
    ExpectedSemicolon { offset: usize },

    #[error("invalid package name _")]
    BlankPackageName,
}

// Type alias for results that use `ContextError` as the error type
pub type Result<T> = std::result::Result<T, ContextError>;
