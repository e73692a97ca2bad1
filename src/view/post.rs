//! The post page: heading, rendered body, index link and comment thread

use crate::comments::{CommentWidget, Thread};
use crate::config::SiteConfig;
use crate::content::Post;
use crate::helpers::post_index_url;

use super::{Element, Node, Style};

/// Renders one post into the page body
pub struct PostView<'a> {
    post: &'a Post,
    config: &'a SiteConfig,
    comments: Option<&'a dyn CommentWidget>,
}

impl<'a> PostView<'a> {
    pub fn new(post: &'a Post, config: &'a SiteConfig) -> Self {
        Self {
            post,
            config,
            comments: None,
        }
    }

    /// Mount `widget` below the post
    pub fn with_comments(mut self, widget: Option<&'a dyn CommentWidget>) -> Self {
        self.comments = widget;
        self
    }

    /// The thread this post's comments live in
    pub fn thread(&self) -> Thread {
        Thread {
            id: self.post.title.clone(),
            url: self.post.thread_url(self.config),
        }
    }

    /// Build the page tree; the same post always yields the same tree
    pub fn render(&self) -> Node {
        let layout = &self.config.layout;

        let container = Element::new("div")
            .attr("class", "post")
            .style(
                Style::new()
                    .set("max-width", format!("{}px", layout.max_width))
                    .set("margin", "auto")
                    .set("font-size", layout.font_size.as_str()),
            )
            .child(
                Element::new("h1")
                    .style(
                        Style::new()
                            .set("text-align", "center")
                            .set("font-size", layout.heading_size.as_str()),
                    )
                    .text(self.post.title.as_str()),
            )
            .child(
                Element::new("div")
                    .child(
                        Element::new("div")
                            .attr("class", "markdown")
                            .child(Node::Raw(self.post.content.clone())),
                    )
                    .child(self.more_posts_link()),
            );

        match self.comments {
            Some(widget) if self.post.comments => {
                let style = Style::new().set(
                    "margin-top",
                    format!("{}px", self.config.comments.margin_top),
                );
                container.child(widget.mount(&self.thread(), style)).into()
            }
            _ => container.into(),
        }
    }

    fn more_posts_link(&self) -> Element {
        let layout = &self.config.layout;
        Element::new("small")
            .text(format!("{} ", layout.more_posts_text))
            .child(
                Element::new("a")
                    .attr("href", post_index_url(self.config))
                    .text(layout.more_posts_link_text.as_str()),
            )
            .text(".")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::comments::Disqus;
    use crate::content::{substitute_code_delimiter, MarkdownRenderer};

    const TITLE: &str = "Make maintainable workarounds with codegen";
    const SLUG: &str = "maintainable-workarounds-with-codegen";

    fn config() -> SiteConfig {
        SiteConfig {
            url: "https://kentcdodds.com".to_string(),
            ..Default::default()
        }
    }

    fn post(config: &SiteConfig) -> Post {
        let body = substitute_code_delimiter(
            "What ~codegen~ does is run ~PropTypes = require('prop-types')~.\n",
            Some('~'),
        );
        let mut post = Post::new(TITLE.to_string(), SLUG.to_string(), config);
        post.content = MarkdownRenderer::new().render(&body).unwrap();
        post
    }

    #[test]
    fn test_single_heading_with_title() {
        let config = config();
        let post = post(&config);
        let tree = PostView::new(&post, &config).render();

        let headings = tree.find_all("h1");
        assert_eq!(headings.len(), 1);
        assert_eq!(Node::Element(headings[0].clone()).text_content(), TITLE);
    }

    #[test]
    fn test_body_has_no_sentinels() {
        let config = config();
        let post = post(&config);
        let html = PostView::new(&post, &config).render().to_html();
        assert!(!html.contains('~'));
        assert!(html.contains("<code>codegen</code>"));
    }

    #[test]
    fn test_render_is_idempotent() {
        let config = config();
        let post = post(&config);
        let disqus = Disqus::new("kentcdodds");
        let view = PostView::new(&post, &config).with_comments(Some(&disqus));
        assert_eq!(view.render(), view.render());
    }

    #[test]
    fn test_layout_and_index_link() {
        let config = config();
        let post = post(&config);
        let html = PostView::new(&post, &config).render().to_html();

        assert!(html.starts_with(
            r#"<div class="post" style="max-width: 800px; margin: auto; font-size: 22px;">"#
        ));
        assert!(html.contains(r#"<h1 style="text-align: center; font-size: 1.4em;">"#));
        assert!(html.contains(r#"<small>See more blogposts from me <a href="/post">here</a>.</small>"#));
    }

    #[test]
    fn test_comment_thread_identity() {
        let config = config();
        let post = post(&config);
        let disqus = Disqus::new("kentcdodds");
        let view = PostView::new(&post, &config).with_comments(Some(&disqus));

        let thread = view.thread();
        assert_eq!(thread.id, TITLE);
        assert_eq!(
            thread.url,
            "https://kentcdodds.com/post/maintainable-workarounds-with-codegen"
        );

        let tree = view.render();
        assert!(tree.find_by_id("disqus_thread").is_some());
        assert!(tree.to_html().contains(r#"style="margin-top: 50px;""#));
    }

    #[test]
    fn test_comments_disabled_per_post() {
        let config = config();
        let mut post = post(&config);
        post.comments = false;
        let disqus = Disqus::new("kentcdodds");
        let tree = PostView::new(&post, &config)
            .with_comments(Some(&disqus))
            .render();
        assert!(tree.find_by_id("disqus_thread").is_none());
    }
}
