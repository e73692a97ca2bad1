//! Content loader - loads posts from the source directory

use anyhow::{Context, Result};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use super::{
    directory_slug, strip_indent, substitute_code_delimiter, validate_slug, ContentError,
    FrontMatter, MarkdownRenderer, Post,
};
use crate::Site;

/// Loads posts from `<source_dir>/<post_dir>`
pub struct ContentLoader<'a> {
    site: &'a Site,
    renderer: MarkdownRenderer,
}

impl<'a> ContentLoader<'a> {
    /// Create a new content loader
    pub fn new(site: &'a Site) -> Self {
        let renderer =
            MarkdownRenderer::with_options(&site.config.highlight, &site.config.markdown);
        Self { site, renderer }
    }

    /// Load every published post, newest first
    ///
    /// Files are visited in name order. When two posts claim the same slug
    /// the later one is skipped, since both would share a page and a thread.
    pub fn load_posts(&self) -> Result<Vec<Post>> {
        let posts_dir = self.site.posts_dir();
        if !posts_dir.exists() {
            tracing::warn!("No post directory at {:?}", posts_dir);
            return Ok(Vec::new());
        }

        let mut posts = Vec::new();
        let mut claimed: HashMap<String, PathBuf> = HashMap::new();

        for entry in WalkDir::new(&posts_dir)
            .follow_links(true)
            .sort_by_file_name()
            .into_iter()
            .filter_map(|e| e.ok())
        {
            let path = entry.path();
            if !path.is_file() || !is_markdown_file(path) {
                continue;
            }

            match self.load_post(path) {
                Ok(post) if post.published => {
                    if let Some(first) = claimed.get(&post.slug) {
                        tracing::warn!(
                            "Skipping {:?}: slug {:?} is already used by {:?}",
                            path,
                            post.slug,
                            first
                        );
                        continue;
                    }
                    claimed.insert(post.slug.clone(), path.to_path_buf());
                    posts.push(post);
                }
                Ok(post) => tracing::debug!("Skipping unpublished post {:?}", post.source),
                Err(e) => tracing::warn!("Failed to load post {:?}: {:#}", path, e),
            }
        }

        posts.sort_by(|a, b| b.date.cmp(&a.date).then_with(|| a.title.cmp(&b.title)));

        Ok(posts)
    }

    /// Load a single post from a file
    pub fn load_post(&self, path: &Path) -> Result<Post> {
        let content =
            fs::read_to_string(path).with_context(|| format!("Failed to read {:?}", path))?;
        let (fm, body) = FrontMatter::parse(&content);

        let title = fm.title.clone().ok_or_else(|| ContentError::MissingTitle {
            path: path.to_path_buf(),
        })?;

        let slug = match fm.slug.clone() {
            Some(slug) => slug,
            None => directory_slug(path).ok_or_else(|| ContentError::MissingSlug {
                path: path.to_path_buf(),
            })?,
        };
        if !validate_slug(&slug) {
            return Err(ContentError::InvalidSlug {
                path: path.to_path_buf(),
                slug,
            }
            .into());
        }

        let markdown = self.prepare_body(body, &fm);
        let content_html = self.renderer.render(&markdown)?;

        let source = path
            .strip_prefix(&self.site.source_dir)
            .unwrap_or(path)
            .to_string_lossy()
            .to_string();

        let mut post = Post::new(title, slug, &self.site.config);
        post.date = fm.parse_date();
        post.content = content_html;
        post.description = fm.description;
        post.tags = fm.tags;
        post.comments = fm.comments;
        post.published = fm.published;
        post.source = source;
        post.full_source = path.to_path_buf();

        tracing::debug!("Loaded post {:?} -> {}", post.source, post.path);

        Ok(post)
    }

    /// Dedent and normalize code delimiters before rendering
    fn prepare_body(&self, body: &str, fm: &FrontMatter) -> String {
        let markdown_config = &self.site.config.markdown;
        let body = if markdown_config.strip_indent {
            strip_indent(body)
        } else {
            body.to_string()
        };
        let sentinel = fm.code_sentinel.or(markdown_config.code_sentinel);
        substitute_code_delimiter(&body, sentinel)
    }
}

/// Check if a file is a markdown file
fn is_markdown_file(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| e == "md" || e == "markdown")
        .unwrap_or(false)
}
