//! URL helper functions

use percent_encoding::{percent_decode_str, utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

use crate::config::SiteConfig;

/// Bytes escaped in a single path segment; unreserved marks stay readable
const SEGMENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~');

/// Generate a URL with the root path
///
/// # Examples
/// ```ignore
/// url_for(&config, "/css/style.css") // -> "/blog/css/style.css"
/// ```
pub fn url_for(config: &SiteConfig, path: &str) -> String {
    if is_external(path) {
        return path.to_string();
    }

    let root = config.root.trim_end_matches('/');
    let path = path.trim_start_matches('/');

    if path.is_empty() {
        format!("{}/", root)
    } else {
        format!("{}/{}", root, path)
    }
}

/// Generate a full URL including the site origin
///
/// # Examples
/// ```ignore
/// full_url_for(&config, "/post/") // -> "https://example.com/blog/post/"
/// ```
pub fn full_url_for(config: &SiteConfig, path: &str) -> String {
    if is_external(path) {
        return path.to_string();
    }
    format!("{}{}", config.origin(), url_for(config, path))
}

/// Link target of the post index page, e.g. `/post`
pub fn post_index_url(config: &SiteConfig) -> String {
    url_for(config, config.post_segment())
}

/// Encode one URL path segment, e.g. a post directory name
///
/// # Examples
/// ```ignore
/// encode_segment("q&a") // -> "q%26a"
/// ```
pub fn encode_segment(segment: &str) -> String {
    utf8_percent_encode(segment, SEGMENT).to_string()
}

/// Decode a request path back to the file system names it was built from
pub fn decode_path(path: &str) -> String {
    percent_decode_str(path).decode_utf8_lossy().into_owned()
}

/// Whether a link leaves the site
pub fn is_external(path: &str) -> bool {
    path.starts_with("http://") || path.starts_with("https://") || path.starts_with("//")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config() -> SiteConfig {
        SiteConfig {
            url: "https://example.com/".to_string(),
            root: "/blog/".to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_url_for() {
        let config = test_config();
        assert_eq!(url_for(&config, "/css/style.css"), "/blog/css/style.css");
        assert_eq!(url_for(&config, "about/"), "/blog/about/");
        assert_eq!(url_for(&config, ""), "/blog/");
        assert_eq!(url_for(&config, "https://x.io/a"), "https://x.io/a");
    }

    #[test]
    fn test_full_url_for() {
        let config = test_config();
        assert_eq!(
            full_url_for(&config, "/atom.xml"),
            "https://example.com/blog/atom.xml"
        );
    }

    #[test]
    fn test_encode_segment() {
        assert_eq!(
            encode_segment("maintainable-workarounds-with-codegen"),
            "maintainable-workarounds-with-codegen"
        );
        assert_eq!(encode_segment("q&a"), "q%26a");
        assert_eq!(encode_segment("x\"y<z>#?%"), "x%22y%3Cz%3E%23%3F%25");
        assert_eq!(encode_segment("ü"), "%C3%BC");
        assert_eq!(decode_path("/post/q%26a/"), "/post/q&a/");
    }

    #[test]
    fn test_post_index_url() {
        assert_eq!(post_index_url(&SiteConfig::default()), "/post");
        assert_eq!(post_index_url(&test_config()), "/blog/post");
    }
}
