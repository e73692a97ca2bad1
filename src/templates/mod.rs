//! Built-in site templates using the Tera template engine
//!
//! The document shell and the post index are embedded in the binary; the
//! post body itself comes from [`crate::view::PostView`].

use anyhow::Result;
use serde::Serialize;
use std::collections::HashMap;
use tera::{Context, Tera};

use crate::helpers::truncate;

/// Template renderer with the embedded site templates
pub struct TemplateRenderer {
    tera: Tera,
}

impl TemplateRenderer {
    /// Create a new renderer with all templates loaded
    pub fn new() -> Result<Self> {
        let mut tera = Tera::default();

        // Bodies arrive as finished HTML; templates escape text explicitly
        tera.autoescape_on(vec![]);

        tera.add_raw_templates(vec![
            ("layout.html", include_str!("site/layout.html")),
            ("post.html", include_str!("site/post.html")),
            ("index.html", include_str!("site/index.html")),
        ])?;

        tera.register_filter("truncate_chars", truncate_chars_filter);

        Ok(Self { tera })
    }

    /// Render a template with given context
    pub fn render(&self, template_name: &str, context: &Context) -> Result<String> {
        Ok(self.tera.render(template_name, context)?)
    }
}

/// Tera filter: truncate by character count
fn truncate_chars_filter(
    value: &tera::Value,
    args: &HashMap<String, tera::Value>,
) -> tera::Result<tera::Value> {
    let s = tera::try_get_value!("truncate_chars", "value", String, value);
    let length = match args.get("length") {
        Some(val) => tera::try_get_value!("truncate_chars", "length", usize, val),
        None => 150,
    };
    Ok(tera::Value::String(truncate(&s, length, None)))
}

/// One entry on the post index page
#[derive(Debug, Clone, Serialize)]
pub struct PostSummary {
    pub title: String,
    pub path: String,
    pub date: Option<String>,
    pub tags: Vec<String>,
    pub summary: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SiteConfig;

    fn base_context() -> Context {
        let mut context = Context::new();
        context.insert("config", &SiteConfig::default());
        context.insert("canonical", "https://example.com/post/");
        context
    }

    #[test]
    fn test_post_template_wraps_body() {
        let renderer = TemplateRenderer::new().unwrap();
        let mut context = base_context();
        context.insert("page_title", "A <b>title</b>");
        context.insert("body", "<div class=\"post\">x</div>");

        let html = renderer.render("post.html", &context).unwrap();
        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains("<title>A &lt;b&gt;title&lt;&#x2F;b&gt; | Blog</title>"));
        assert!(html.contains("<div class=\"post\">x</div>"));
    }

    #[test]
    fn test_index_template_lists_posts() {
        let renderer = TemplateRenderer::new().unwrap();
        let mut context = base_context();
        context.insert("heading", "Posts");
        context.insert(
            "posts",
            &vec![PostSummary {
                title: "Codegen".to_string(),
                path: "/post/codegen/".to_string(),
                date: Some("September 25, 2017".to_string()),
                tags: vec!["babel".to_string(), "a&b".to_string()],
                summary: Some("x".repeat(400)),
            }],
        );

        let html = renderer.render("index.html", &context).unwrap();
        assert!(html.contains(r#"<a href="/post/codegen/">Codegen</a>"#));
        assert!(html.contains("September 25, 2017"));
        assert!(html.contains(r#"<span class="tag">babel</span>"#));
        assert!(html.contains(r#"<span class="tag">a&amp;b</span>"#));
        assert!(!html.contains(&"x".repeat(200)));
    }
}
