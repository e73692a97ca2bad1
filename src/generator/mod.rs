//! Generator module - writes post pages, the post index and the feed

use anyhow::{Context as _, Result};
use std::fs;
use std::path::{Path, PathBuf};

use tera::Context;
use walkdir::WalkDir;

use crate::comments::{self, CommentWidget};
use crate::content::Post;
use crate::helpers::{full_url_for, meta_generator, open_graph, post_index_url, summarize};
use crate::templates::{PostSummary, TemplateRenderer};
use crate::view::PostView;
use crate::Site;

/// Characters of plain text kept for summaries
const SUMMARY_LENGTH: usize = 280;

/// Static site generator
pub struct Generator<'a> {
    site: &'a Site,
    renderer: TemplateRenderer,
    comments: Option<Box<dyn CommentWidget>>,
}

impl<'a> Generator<'a> {
    /// Create a new generator
    pub fn new(site: &'a Site) -> Result<Self> {
        let renderer = TemplateRenderer::new()?;
        let comments = comments::from_config(&site.config.comments);
        if let Some(widget) = &comments {
            tracing::debug!("Comment widget: {}", widget.name());
        }

        Ok(Self {
            site,
            renderer,
            comments,
        })
    }

    /// Generate every page for the given posts
    pub fn generate(&self, posts: &[Post]) -> Result<()> {
        fs::create_dir_all(&self.site.public_dir)?;

        for post in posts {
            self.generate_post_page(post)?;
            self.copy_post_assets(post)?;
        }

        self.generate_index_page(posts)?;

        if self.site.config.feed {
            self.generate_atom_feed(posts)?;
        }

        Ok(())
    }

    /// Where a post's page is written
    pub fn post_output_dir(&self, post: &Post) -> PathBuf {
        self.site
            .public_dir
            .join(self.site.config.post_segment())
            .join(&post.slug)
    }

    /// Render the full HTML document for one post
    pub fn render_post_page(&self, post: &Post) -> Result<String> {
        let body = PostView::new(post, &self.site.config)
            .with_comments(self.comments.as_deref())
            .render()
            .to_html();

        let description = post
            .description
            .clone()
            .unwrap_or_else(|| summarize(&post.content, 160));

        let mut context = self.base_context(&post.permalink);
        context.insert("page_title", &post.title);
        context.insert("description", &description);
        context.insert(
            "open_graph",
            &open_graph(
                &post.title,
                &description,
                &post.permalink,
                &self.site.config.title,
                "article",
            ),
        );
        context.insert("body", &body);

        self.renderer.render("post.html", &context)
    }

    fn generate_post_page(&self, post: &Post) -> Result<()> {
        let html = self.render_post_page(post)?;
        let output_path = self.post_output_dir(post).join("index.html");
        write_file(&output_path, &html)?;
        tracing::debug!("Generated post: {:?}", output_path);
        Ok(())
    }

    /// Post index, written to `/<post_dir>/` and the site root
    fn generate_index_page(&self, posts: &[Post]) -> Result<()> {
        let config = &self.site.config;
        let summaries: Vec<PostSummary> = posts
            .iter()
            .map(|p| PostSummary {
                title: p.title.clone(),
                path: p.path.clone(),
                date: p.date.map(|d| d.format(&config.date_format).to_string()),
                tags: p.tags.clone(),
                summary: p
                    .description
                    .clone()
                    .or_else(|| Some(summarize(&p.content, SUMMARY_LENGTH))),
            })
            .collect();

        let index_url = post_index_url(config);
        let mut context = self.base_context(&full_url_for(config, &index_url));
        context.insert("heading", &config.title);
        context.insert("description", &config.description);
        context.insert("posts", &summaries);

        let html = self.renderer.render("index.html", &context)?;

        for dir in [
            self.site.public_dir.join(config.post_segment()),
            self.site.public_dir.clone(),
        ] {
            write_file(&dir.join("index.html"), &html)?;
        }
        tracing::info!("Generated index with {} posts", summaries.len());

        Ok(())
    }

    /// Generate Atom feed
    fn generate_atom_feed(&self, posts: &[Post]) -> Result<()> {
        let config = &self.site.config;
        let origin = config.origin();
        let updated = posts
            .iter()
            .filter_map(|p| p.date)
            .max()
            .map(|d| d.to_rfc3339())
            .unwrap_or_else(|| chrono::Local::now().to_rfc3339());

        let mut feed = String::new();
        feed.push_str("<?xml version=\"1.0\" encoding=\"utf-8\"?>\n");
        feed.push_str("<feed xmlns=\"http://www.w3.org/2005/Atom\">\n");
        feed.push_str(&format!("  <title>{}</title>\n", escape_xml(&config.title)));
        feed.push_str(&format!(
            "  <link href=\"{}\" rel=\"self\"/>\n",
            full_url_for(config, "atom.xml")
        ));
        feed.push_str(&format!("  <link href=\"{}\"/>\n", full_url_for(config, "")));
        feed.push_str(&format!("  <updated>{}</updated>\n", updated));
        feed.push_str(&format!("  <id>{}/</id>\n", origin));
        if !config.author.is_empty() {
            feed.push_str(&format!(
                "  <author><name>{}</name></author>\n",
                escape_xml(&config.author)
            ));
        }

        for post in posts.iter().take(config.feed_limit) {
            feed.push_str("  <entry>\n");
            feed.push_str(&format!("    <title>{}</title>\n", escape_xml(&post.title)));
            let permalink = escape_xml(&post.permalink);
            feed.push_str(&format!("    <link href=\"{}\"/>\n", permalink));
            feed.push_str(&format!("    <id>{}</id>\n", permalink));
            if let Some(date) = post.date {
                feed.push_str(&format!("    <published>{}</published>\n", date.to_rfc3339()));
                feed.push_str(&format!("    <updated>{}</updated>\n", date.to_rfc3339()));
            }
            for tag in &post.tags {
                feed.push_str(&format!("    <category term=\"{}\"/>\n", escape_xml(tag)));
            }
            let content = absolutize_urls(&post.content, origin);
            feed.push_str(&format!(
                "    <content type=\"html\"><![CDATA[{}]]></content>\n",
                content.replace("]]>", "]]]]><![CDATA[>")
            ));
            feed.push_str("  </entry>\n");
        }

        feed.push_str("</feed>\n");

        write_file(&self.site.public_dir.join("atom.xml"), &feed)?;
        tracing::info!("Generated atom.xml");

        Ok(())
    }

    /// Copy images and other files that sit next to a post's index.md
    fn copy_post_assets(&self, post: &Post) -> Result<()> {
        if post.full_source.file_stem().and_then(|s| s.to_str()) != Some("index") {
            return Ok(());
        }
        let Some(post_dir) = post.full_source.parent() else {
            return Ok(());
        };
        let dest_dir = self.post_output_dir(post);

        for entry in WalkDir::new(post_dir)
            .follow_links(true)
            .into_iter()
            .filter_map(|e| e.ok())
        {
            let path = entry.path();
            if !path.is_file() || is_markdown(path) {
                continue;
            }

            let relative = path.strip_prefix(post_dir)?;
            let dest = dest_dir.join(relative);
            if let Some(parent) = dest.parent() {
                fs::create_dir_all(parent)?;
            }
            fs::copy(path, &dest)
                .with_context(|| format!("Failed to copy {:?} to {:?}", path, dest))?;
            tracing::debug!("Copied asset: {:?}", dest);
        }

        Ok(())
    }

    /// Context shared by every page
    fn base_context(&self, canonical: &str) -> Context {
        let config = &self.site.config;
        let mut context = Context::new();
        context.insert("config", config);
        context.insert("canonical", canonical);
        if config.meta_generator {
            context.insert("generator", &meta_generator());
        }
        if config.feed {
            context.insert("feed_url", &full_url_for(config, "atom.xml"));
        }
        context
    }
}

fn write_file(path: &Path, content: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create dir {:?}", parent))?;
    }
    fs::write(path, content).with_context(|| format!("Failed to write {:?}", path))
}

fn is_markdown(path: &Path) -> bool {
    matches!(
        path.extension().and_then(|e| e.to_str()),
        Some("md") | Some("markdown")
    )
}

/// Escape XML special characters
fn escape_xml(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}

/// Root-relative `href`/`src` values become absolute, for feed readers
fn absolutize_urls(content: &str, origin: &str) -> String {
    content
        .replace("href=\"/", &format!("href=\"{}/", origin))
        .replace("src=\"/", &format!("src=\"{}/", origin))
}
