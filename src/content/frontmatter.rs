//! Front-matter parsing

use chrono::{DateTime, Local, NaiveDateTime};
use serde::{Deserialize, Deserializer};

/// Accepts both `tags: rust` and `tags: [rust, blog]`
fn string_or_vec<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::{self, SeqAccess, Visitor};
    use std::fmt;

    struct StringOrVec;

    impl<'de> Visitor<'de> for StringOrVec {
        type Value = Vec<String>;

        fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
            formatter.write_str("a string or a list of strings")
        }

        fn visit_str<E>(self, value: &str) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(vec![value.to_string()])
        }

        fn visit_seq<S>(self, mut seq: S) -> Result<Self::Value, S::Error>
        where
            S: SeqAccess<'de>,
        {
            let mut vec = Vec::new();
            while let Some(item) = seq.next_element::<String>()? {
                vec.push(item);
            }
            Ok(vec)
        }

        fn visit_unit<E>(self) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(Vec::new())
        }
    }

    deserializer.deserialize_any(StringOrVec)
}

/// Front-matter block at the top of a post
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct FrontMatter {
    pub title: Option<String>,
    pub date: Option<String>,
    /// Overrides the directory-derived slug
    pub slug: Option<String>,
    pub description: Option<String>,
    #[serde(deserialize_with = "string_or_vec")]
    pub tags: Vec<String>,
    pub comments: bool,
    pub published: bool,
    /// Per-post override of `markdown.code_sentinel`
    pub code_sentinel: Option<char>,
}

impl Default for FrontMatter {
    fn default() -> Self {
        Self {
            title: None,
            date: None,
            slug: None,
            description: None,
            tags: Vec::new(),
            comments: true,
            published: true,
            code_sentinel: None,
        }
    }
}

impl FrontMatter {
    /// Split a post file into (front_matter, body)
    pub fn parse(content: &str) -> (Self, &str) {
        let trimmed = content.trim_start();
        let Some(rest) = trimmed.strip_prefix("---") else {
            return (FrontMatter::default(), content);
        };
        let rest = rest.trim_start_matches([' ', '\t']);
        let Some(rest) = rest.strip_prefix('\n').or_else(|| rest.strip_prefix("\r\n")) else {
            return (FrontMatter::default(), content);
        };

        // The closing delimiter may follow the opening one directly
        let (yaml_content, after) = match rest.strip_prefix("---") {
            Some(after) => ("", after),
            None => match rest.find("\n---") {
                Some(end_pos) => (&rest[..end_pos], &rest[end_pos + 4..]),
                None => return (FrontMatter::default(), content),
            },
        };
        let body = after.trim_start_matches(['\n', '\r']);

        if yaml_content.trim().is_empty() {
            return (FrontMatter::default(), body);
        }

        // A leading thematic break followed by prose is not front matter
        if !yaml_content.lines().any(looks_like_yaml_key) {
            return (FrontMatter::default(), content);
        }

        match serde_yaml::from_str::<FrontMatter>(yaml_content) {
            Ok(fm) => (fm, body),
            Err(e) => {
                tracing::warn!(
                    "Failed to parse YAML front-matter, treating as content: {}",
                    e
                );
                (FrontMatter::default(), content)
            }
        }
    }

    /// Parse the date string into a DateTime
    pub fn parse_date(&self) -> Option<DateTime<Local>> {
        self.date.as_deref().and_then(parse_date_string)
    }
}

/// `key: value` or `key:` with a plain identifier key (not `https:`)
fn looks_like_yaml_key(line: &str) -> bool {
    let trimmed = line.trim();
    if trimmed.is_empty() || trimmed.starts_with('#') {
        return false;
    }
    let Some(colon_pos) = trimmed.find(':') else {
        return false;
    };
    let key = &trimmed[..colon_pos];
    let after = &trimmed[colon_pos + 1..];
    !key.is_empty()
        && key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
        && !matches!(key, "http" | "https" | "ftp")
        && (after.is_empty() || after.starts_with(' '))
}

/// Parse a date string in the formats posts commonly use
fn parse_date_string(s: &str) -> Option<DateTime<Local>> {
    let s = s.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Local));
    }

    let datetime_formats = [
        "%Y-%m-%d %H:%M:%S",
        "%Y/%m/%d %H:%M:%S",
        "%Y-%m-%d %H:%M",
        "%Y-%m-%dT%H:%M:%S",
    ];
    for fmt in datetime_formats {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return dt.and_local_timezone(Local).earliest();
        }
    }

    for fmt in ["%Y-%m-%d", "%Y/%m/%d"] {
        if let Ok(d) = chrono::NaiveDate::parse_from_str(s, fmt) {
            return d.and_hms_opt(0, 0, 0)?.and_local_timezone(Local).earliest();
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_yaml_frontmatter() {
        let content = r#"---
title: Make maintainable workarounds with codegen
date: 2017-09-25
tags:
  - babel
  - rollup
---

This last week...
"#;

        let (fm, body) = FrontMatter::parse(content);
        assert_eq!(
            fm.title.as_deref(),
            Some("Make maintainable workarounds with codegen")
        );
        assert_eq!(fm.tags, vec!["babel", "rollup"]);
        assert!(fm.comments);
        assert!(fm.published);
        assert!(body.starts_with("This last week"));
    }

    #[test]
    fn test_single_string_tag_and_overrides() {
        let content = "---\ntitle: T\ntags: notes\nslug: custom\ncode_sentinel: '^'\ncomments: false\n---\nbody";
        let (fm, body) = FrontMatter::parse(content);
        assert_eq!(fm.tags, vec!["notes"]);
        assert_eq!(fm.slug.as_deref(), Some("custom"));
        assert_eq!(fm.code_sentinel, Some('^'));
        assert!(!fm.comments);
        assert_eq!(body, "body");
    }

    #[test]
    fn test_no_frontmatter() {
        let content = "# Just markdown\n\ntext";
        let (fm, body) = FrontMatter::parse(content);
        assert_eq!(fm.title, None);
        assert_eq!(body, content);
    }

    #[test]
    fn test_empty_frontmatter_block() {
        let (fm, body) = FrontMatter::parse("---\n---\nbody");
        assert_eq!(fm.title, None);
        assert!(fm.comments);
        assert_eq!(body, "body");

        let (_, body) = FrontMatter::parse("---\r\n---\r\n\r\nbody");
        assert_eq!(body, "body");
    }

    #[test]
    fn test_thematic_break_not_yaml() {
        let content = "---\n\nSee https://example.com for details\n\n---\nMore.";
        let (fm, body) = FrontMatter::parse(content);
        assert_eq!(fm.title, None);
        assert!(body.contains("https://example.com"));
    }

    #[test]
    fn test_parse_date() {
        let fm = FrontMatter {
            date: Some("2017-09-25 10:30:00".to_string()),
            ..Default::default()
        };
        let dt = fm.parse_date().unwrap();
        assert_eq!(dt.format("%Y-%m-%d").to_string(), "2017-09-25");

        let fm = FrontMatter {
            date: Some("2017/09/25".to_string()),
            ..Default::default()
        };
        assert!(fm.parse_date().is_some());
    }
}
