//! Site configuration (_config.yml / _config.toml)

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

/// Config file names, in lookup order
pub const CONFIG_FILES: [&str; 2] = ["_config.yml", "_config.toml"];

/// Main site configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    // Site
    pub title: String,
    pub description: String,
    pub author: String,
    pub language: String,

    // URL
    /// Site origin, used for permalinks and comment thread URLs
    pub url: String,
    pub root: String,
    /// URL segment (and source folder) that holds posts
    pub post_dir: String,

    // Directory
    pub source_dir: String,
    pub public_dir: String,

    // Writing
    #[serde(default)]
    pub markdown: MarkdownConfig,
    #[serde(default)]
    pub highlight: HighlightConfig,

    // Post page
    #[serde(default)]
    pub layout: LayoutConfig,
    #[serde(default)]
    pub comments: CommentsConfig,

    // Feed
    pub feed: bool,
    pub feed_limit: usize,

    // Meta
    pub meta_generator: bool,
    pub date_format: String,

    // Store any additional fields
    #[serde(flatten)]
    pub extra: HashMap<String, serde_yaml::Value>,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            title: "Blog".to_string(),
            description: String::new(),
            author: String::new(),
            language: "en".to_string(),

            url: "http://example.com".to_string(),
            root: "/".to_string(),
            post_dir: "post".to_string(),

            source_dir: "source".to_string(),
            public_dir: "public".to_string(),

            markdown: MarkdownConfig::default(),
            highlight: HighlightConfig::default(),

            layout: LayoutConfig::default(),
            comments: CommentsConfig::default(),

            feed: true,
            feed_limit: 20,

            meta_generator: true,
            date_format: "%B %d, %Y".to_string(),

            extra: HashMap::new(),
        }
    }
}

impl SiteConfig {
    /// Load configuration from a file, picking the format by extension
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config {:?}", path))?;

        let config: SiteConfig = match path.extension().and_then(|e| e.to_str()) {
            Some("toml") => toml::from_str(&content)
                .with_context(|| format!("Failed to parse TOML config {:?}", path))?,
            _ => serde_yaml::from_str(&content)
                .with_context(|| format!("Failed to parse YAML config {:?}", path))?,
        };

        Ok(config)
    }

    /// Find the first existing config file in a site directory
    pub fn locate<P: AsRef<Path>>(base_dir: P) -> Option<PathBuf> {
        CONFIG_FILES
            .iter()
            .map(|name| base_dir.as_ref().join(name))
            .find(|p| p.exists())
    }

    /// Site origin without a trailing slash
    pub fn origin(&self) -> &str {
        self.url.trim_end_matches('/')
    }

    /// Post folder name without surrounding slashes
    pub fn post_segment(&self) -> &str {
        self.post_dir.trim_matches('/')
    }
}

/// Markdown preprocessing options
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MarkdownConfig {
    /// Stand-in for the code-span backtick; `null` disables substitution
    pub code_sentinel: Option<char>,
    /// Remove indentation shared by every body line before rendering
    pub strip_indent: bool,
    pub smart_punctuation: bool,
}

impl Default for MarkdownConfig {
    fn default() -> Self {
        Self {
            code_sentinel: Some('~'),
            strip_indent: true,
            smart_punctuation: true,
        }
    }
}

/// Syntax highlighting configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HighlightConfig {
    pub enable: bool,
    pub theme: String,
    pub line_number: bool,
}

impl Default for HighlightConfig {
    fn default() -> Self {
        Self {
            enable: true,
            theme: "base16-ocean.dark".to_string(),
            line_number: false,
        }
    }
}

/// Post page presentation
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    /// Container max width in pixels
    pub max_width: u32,
    pub font_size: String,
    pub heading_size: String,
    /// Text in front of the link back to the post index
    pub more_posts_text: String,
    pub more_posts_link_text: String,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            max_width: 800,
            font_size: "22px".to_string(),
            heading_size: "1.4em".to_string(),
            more_posts_text: "See more blogposts from me".to_string(),
            more_posts_link_text: "here".to_string(),
        }
    }
}

/// Third-party comment providers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CommentProvider {
    Disqus,
    None,
}

/// Comment widget configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CommentsConfig {
    pub provider: CommentProvider,
    /// Disqus forum shortname
    pub shortname: String,
    /// Space above the widget in pixels
    pub margin_top: u32,
}

impl Default for CommentsConfig {
    fn default() -> Self {
        Self {
            provider: CommentProvider::Disqus,
            shortname: String::new(),
            margin_top: 50,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = SiteConfig::default();
        assert_eq!(config.post_dir, "post");
        assert_eq!(config.layout.max_width, 800);
        assert_eq!(config.layout.font_size, "22px");
        assert_eq!(config.comments.margin_top, 50);
        assert_eq!(config.markdown.code_sentinel, Some('~'));
    }

    #[test]
    fn test_parse_yaml_config() {
        let yaml = r#"
title: Kent C. Dodds
url: https://kentcdodds.com/
comments:
  provider: disqus
  shortname: kentcdodds
markdown:
  code_sentinel: null
"#;
        let config: SiteConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.title, "Kent C. Dodds");
        assert_eq!(config.origin(), "https://kentcdodds.com");
        assert_eq!(config.comments.shortname, "kentcdodds");
        assert_eq!(config.comments.margin_top, 50);
        assert_eq!(config.markdown.code_sentinel, None);
        assert!(config.markdown.strip_indent);
    }

    #[test]
    fn test_load_toml_config() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("_config.toml");
        fs::write(
            &path,
            r#"
title = "Notes"
post_dir = "/writing/"

[comments]
provider = "none"
"#,
        )
        .unwrap();

        assert_eq!(SiteConfig::locate(dir.path()), Some(path.clone()));
        let config = SiteConfig::load(&path).unwrap();
        assert_eq!(config.title, "Notes");
        assert_eq!(config.post_segment(), "writing");
        assert_eq!(config.comments.provider, CommentProvider::None);
    }

    #[test]
    fn test_locate_prefers_yaml() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("_config.toml"), "").unwrap();
        fs::write(dir.path().join("_config.yml"), "").unwrap();
        assert_eq!(
            SiteConfig::locate(dir.path()),
            Some(dir.path().join("_config.yml"))
        );
    }
}
