//! Post model

use chrono::{DateTime, Local};
use std::path::{Path, PathBuf};

use crate::config::SiteConfig;
use crate::helpers::encode_segment;

/// A blog post
#[derive(Debug, Clone)]
pub struct Post {
    /// Post title, also the comment thread identifier
    pub title: String,

    /// URL-friendly name, normally the post's directory name
    pub slug: String,

    /// Publication date
    pub date: Option<DateTime<Local>>,

    /// Rendered HTML content
    pub content: String,

    /// Short summary for the feed and meta tags
    pub description: Option<String>,

    /// Listed on the post index and as feed categories
    pub tags: Vec<String>,

    /// Whether the comment widget is mounted
    pub comments: bool,

    pub published: bool,

    /// Source file path (relative to the source dir)
    pub source: String,

    /// Full source file path
    pub full_source: PathBuf,

    /// URL path (with root)
    pub path: String,

    /// Full permalink URL
    pub permalink: String,
}

impl Post {
    /// Create a post with its URLs derived from the slug
    pub fn new(title: String, slug: String, config: &SiteConfig) -> Self {
        let path = post_path(config, &slug);
        let permalink = format!("{}{}", config.origin(), path);
        Self {
            title,
            slug,
            date: None,
            content: String::new(),
            description: None,
            tags: Vec::new(),
            comments: true,
            published: true,
            source: String::new(),
            full_source: PathBuf::new(),
            path,
            permalink,
        }
    }

    /// Canonical URL of this post's comment thread
    pub fn thread_url(&self, config: &SiteConfig) -> String {
        thread_url(config, &self.slug)
    }
}

/// Comment thread URL of a post: its permalink without the trailing slash
///
/// # Examples
/// ```ignore
/// thread_url(&config, "my-post") // -> "https://kentcdodds.com/post/my-post"
/// ```
pub fn thread_url(config: &SiteConfig, slug: &str) -> String {
    let path = post_path(config, slug);
    format!("{}{}", config.origin(), path.trim_end_matches('/'))
}

/// Site-relative path of a post page, e.g. `/post/my-post/`
pub fn post_path(config: &SiteConfig, slug: &str) -> String {
    format!(
        "{}/{}/{}/",
        config.root.trim_end_matches('/'),
        config.post_segment(),
        encode_segment(slug)
    )
}

/// Slug implied by where a post lives on disk
///
/// `post/<name>/index.md` yields the directory name, `post/<name>.md` the stem.
pub fn directory_slug(path: &Path) -> Option<String> {
    let stem = path.file_stem()?.to_str()?;
    if stem == "index" {
        path.parent()?
            .file_name()?
            .to_str()
            .map(|s| s.to_string())
    } else {
        Some(stem.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kcd_config() -> SiteConfig {
        SiteConfig {
            url: "https://kentcdodds.com".to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_thread_url_from_directory_name() {
        let path = Path::new("source/post/maintainable-workarounds-with-codegen/index.md");
        let slug = directory_slug(path).unwrap();
        let post = Post::new("Make maintainable workarounds".to_string(), slug, &kcd_config());
        assert_eq!(
            post.thread_url(&kcd_config()),
            "https://kentcdodds.com/post/maintainable-workarounds-with-codegen"
        );
    }

    #[test]
    fn test_thread_url_is_structural() {
        let mut config = kcd_config();
        config.url = "https://kentcdodds.com/".to_string();
        for name in ["a", "with-dashes", "MixedCase", "2017-09-25", "snake_case"] {
            assert_eq!(
                thread_url(&config, name),
                format!("https://kentcdodds.com/post/{}", name)
            );
        }
    }

    #[test]
    fn test_thread_url_encodes_directory_name() {
        let config = kcd_config();
        assert_eq!(thread_url(&config, "q&a"), "https://kentcdodds.com/post/q%26a");
        assert_eq!(
            thread_url(&config, "x\"onmouseover=\"alert(1)"),
            "https://kentcdodds.com/post/x%22onmouseover%3D%22alert%281%29"
        );
        assert_eq!(thread_url(&config, "ünïcode"), "https://kentcdodds.com/post/%C3%BCn%C3%AFcode");
    }

    #[test]
    fn test_thread_url_follows_root() {
        let config = SiteConfig {
            url: "https://x.io".to_string(),
            root: "/blog/".to_string(),
            ..Default::default()
        };
        let post = Post::new("T".to_string(), "a".to_string(), &config);
        assert_eq!(post.permalink, "https://x.io/blog/post/a/");
        assert_eq!(post.thread_url(&config), "https://x.io/blog/post/a");
    }

    #[test]
    fn test_directory_slug_flat_file() {
        assert_eq!(
            directory_slug(Path::new("source/post/hello.md")).as_deref(),
            Some("hello")
        );
        assert_eq!(directory_slug(Path::new("index.md")), None);
    }

    #[test]
    fn test_post_paths() {
        let mut config = kcd_config();
        config.root = "/blog/".to_string();
        let post = Post::new("T".to_string(), "slug".to_string(), &config);
        assert_eq!(post.path, "/blog/post/slug/");
        assert_eq!(post.permalink, "https://kentcdodds.com/blog/post/slug/");
    }
}
