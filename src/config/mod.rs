//! Configuration module

mod site;

pub use site::CommentProvider;
pub use site::CommentsConfig;
pub use site::HighlightConfig;
pub use site::LayoutConfig;
pub use site::MarkdownConfig;
pub use site::SiteConfig;
pub use site::CONFIG_FILES;
