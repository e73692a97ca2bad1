//! Content module - handles posts and markdown processing

mod error;
mod frontmatter;
pub mod loader;
mod markdown;
mod post;

pub use error::{validate_slug, ContentError};
pub use frontmatter::FrontMatter;
pub use markdown::{strip_indent, substitute_code_delimiter, MarkdownRenderer, CODE_DELIMITER};
pub use post::{directory_slug, post_path, thread_url, Post};
