//! Third-party comment threads mounted under a post

use crate::config::{CommentProvider, CommentsConfig};
use crate::view::{Element, Node, Style};

/// Identity of one discussion thread
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Thread {
    /// Unique thread key, the post title
    pub id: String,
    /// Canonical page URL the thread belongs to
    pub url: String,
}

/// Produces the markup that embeds a discussion thread
pub trait CommentWidget: Send + Sync {
    /// Provider name, for logs
    fn name(&self) -> &'static str;

    /// Mount point for `thread`, with the caller's presentation hints
    fn mount(&self, thread: &Thread, style: Style) -> Node;
}

/// Disqus universal embed
#[derive(Debug, Clone)]
pub struct Disqus {
    shortname: String,
}

impl Disqus {
    pub fn new(shortname: &str) -> Self {
        Self {
            shortname: shortname.to_string(),
        }
    }

    fn embed_src(&self) -> String {
        format!("https://{}.disqus.com/embed.js", self.shortname)
    }

    fn config_script(&self, thread: &Thread) -> String {
        format!(
            r#"var disqus_config = function () {{
  this.page.identifier = {id};
  this.page.url = {url};
  this.page.title = {id};
}};
(function () {{
  var d = document, s = d.createElement('script');
  s.src = {src};
  s.setAttribute('data-timestamp', +new Date());
  (d.head || d.body).appendChild(s);
}})();"#,
            id = js_string(&thread.id),
            url = js_string(&thread.url),
            src = js_string(&self.embed_src()),
        )
    }
}

impl CommentWidget for Disqus {
    fn name(&self) -> &'static str {
        "disqus"
    }

    fn mount(&self, thread: &Thread, style: Style) -> Node {
        Element::new("div")
            .attr("class", "comments")
            .style(style)
            .child(Element::new("div").attr("id", "disqus_thread"))
            .child(Element::new("script").child(Node::Raw(self.config_script(thread))))
            .child(
                Element::new("noscript")
                    .text("Please enable JavaScript to view the comments powered by Disqus."),
            )
            .into()
    }
}

/// Build the configured widget, if comments are enabled and usable
pub fn from_config(config: &CommentsConfig) -> Option<Box<dyn CommentWidget>> {
    match config.provider {
        CommentProvider::None => None,
        CommentProvider::Disqus if config.shortname.is_empty() => {
            tracing::debug!("Disqus comments disabled: no shortname configured");
            None
        }
        CommentProvider::Disqus if !is_valid_shortname(&config.shortname) => {
            tracing::warn!(
                "Disqus comments disabled: invalid shortname {:?}",
                config.shortname
            );
            None
        }
        CommentProvider::Disqus => Some(Box::new(Disqus::new(&config.shortname))),
    }
}

/// Disqus shortnames are lowercase letters, digits and dashes
fn is_valid_shortname(shortname: &str) -> bool {
    !shortname.is_empty()
        && shortname
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-')
}

/// JSON string literal that cannot close the surrounding script tag
fn js_string(s: &str) -> String {
    serde_json::to_string(s)
        .unwrap_or_else(|_| "\"\"".to_string())
        .replace("</", "<\\/")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn thread() -> Thread {
        Thread {
            id: "Make maintainable workarounds with codegen".to_string(),
            url: "https://kentcdodds.com/post/maintainable-workarounds-with-codegen".to_string(),
        }
    }

    #[test]
    fn test_disqus_mount() {
        let node = Disqus::new("kentcdodds").mount(&thread(), Style::new().set("margin-top", "50px"));
        let html = node.to_html();

        assert!(node.find_by_id("disqus_thread").is_some());
        assert!(html.contains(r#"style="margin-top: 50px;""#));
        assert!(html.contains(
            r#"this.page.identifier = "Make maintainable workarounds with codegen";"#
        ));
        assert!(html.contains(
            r#"this.page.url = "https://kentcdodds.com/post/maintainable-workarounds-with-codegen";"#
        ));
        assert!(html.contains(r#"s.src = "https://kentcdodds.disqus.com/embed.js";"#));
    }

    #[test]
    fn test_script_breakout_is_escaped() {
        let thread = Thread {
            id: "</script><script>alert(1)</script>".to_string(),
            url: "https://example.com/post/x".to_string(),
        };
        let html = Disqus::new("site").mount(&thread, Style::new()).to_html();
        assert!(!html.contains("</script><script>alert"));
        assert!(html.contains(r#"<\/script>"#));
    }

    #[test]
    fn test_from_config() {
        let mut config = CommentsConfig::default();
        assert!(from_config(&config).is_none());

        config.shortname = "kentcdodds".to_string();
        assert_eq!(from_config(&config).unwrap().name(), "disqus");

        config.shortname = "Bad Name".to_string();
        assert!(from_config(&config).is_none());

        config.shortname = "kentcdodds".to_string();
        config.provider = CommentProvider::None;
        assert!(from_config(&config).is_none());
    }
}
