//! postpage: a small static blog generator
//!
//! Each post is a markdown file under `source/post/<slug>/index.md`. It is
//! rendered into a centered page with its title, body, a link back to the
//! post index and a comment thread keyed by the post's title and URL.

pub mod commands;
pub mod comments;
pub mod config;
pub mod content;
pub mod generator;
pub mod helpers;
pub mod server;
pub mod templates;
pub mod view;

use anyhow::Result;
use std::path::{Path, PathBuf};

/// A site rooted at a directory
#[derive(Clone)]
pub struct Site {
    /// Site configuration
    pub config: config::SiteConfig,
    /// Base directory
    pub base_dir: PathBuf,
    /// Source directory
    pub source_dir: PathBuf,
    /// Public (output) directory
    pub public_dir: PathBuf,
}

impl Site {
    /// Open the site in `base_dir`, reading its config if one exists
    pub fn new<P: AsRef<Path>>(base_dir: P) -> Result<Self> {
        let base_dir = base_dir.as_ref().to_path_buf();

        let config = match config::SiteConfig::locate(&base_dir) {
            Some(path) => {
                tracing::debug!("Loading config from {:?}", path);
                config::SiteConfig::load(&path)?
            }
            None => config::SiteConfig::default(),
        };

        let source_dir = base_dir.join(&config.source_dir);
        let public_dir = base_dir.join(&config.public_dir);

        Ok(Self {
            config,
            base_dir,
            source_dir,
            public_dir,
        })
    }

    /// Directory holding one folder (or file) per post
    pub fn posts_dir(&self) -> PathBuf {
        self.source_dir.join(self.config.post_segment())
    }

    /// Generate the static site
    pub fn generate(&self) -> Result<()> {
        commands::generate::run(self)
    }

    /// Clean the public directory
    pub fn clean(&self) -> Result<()> {
        commands::clean::run(self)
    }

    /// Create a new post
    pub fn new_post(&self, title: &str, slug: Option<&str>) -> Result<PathBuf> {
        commands::new::create_post(self, title, slug)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_site_defaults_without_config() {
        let dir = tempfile::tempdir().unwrap();
        let site = Site::new(dir.path()).unwrap();
        assert_eq!(site.posts_dir(), dir.path().join("source/post"));
        assert_eq!(site.public_dir, dir.path().join("public"));
    }

    #[test]
    fn test_site_reads_config_dirs() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("_config.yml"),
            "source_dir: content\npublic_dir: dist\npost_dir: writing\n",
        )
        .unwrap();
        let site = Site::new(dir.path()).unwrap();
        assert_eq!(site.posts_dir(), dir.path().join("content/writing"));
        assert_eq!(site.public_dir, dir.path().join("dist"));
    }
}
