//! Errors raised while turning a source file into a post

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ContentError {
    #[error("post {path:?} has no title in its front-matter")]
    MissingTitle { path: PathBuf },

    #[error("cannot derive a slug for {path:?}")]
    MissingSlug { path: PathBuf },

    #[error("invalid slug {slug:?} for {path:?}: slugs must be a single non-empty path segment")]
    InvalidSlug { path: PathBuf, slug: String },
}

/// A slug must be usable verbatim as one URL path segment
pub fn validate_slug(slug: &str) -> bool {
    !slug.is_empty()
        && slug != "."
        && slug != ".."
        && !slug.chars().any(|c| c == '/' || c == '\\' || c.is_whitespace())
}
