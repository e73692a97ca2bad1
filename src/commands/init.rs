//! Initialize a new site

use anyhow::{bail, Result};
use std::fs;
use std::path::Path;

const CONFIG: &str = r#"# Site
title: My Blog
description: ''
author: ''
language: en

# URL
## Comment threads live at <url>/<post_dir>/<slug>
url: http://example.com
root: /
post_dir: post

# Directory
source_dir: source
public_dir: public

# Writing
markdown:
  ## Written in place of backticks, replaced before rendering
  code_sentinel: '~'
  strip_indent: true
  smart_punctuation: true
highlight:
  enable: true
  theme: base16-ocean.dark
  line_number: false

# Post page
layout:
  max_width: 800
  font_size: 22px
  heading_size: 1.4em
  more_posts_text: See more blogposts from me
  more_posts_link_text: here

comments:
  provider: disqus
  shortname: ''
  margin_top: 50

# Feed
feed: true
feed_limit: 20

meta_generator: true
date_format: '%B %d, %Y'
"#;

/// Initialize a new site in the given directory
pub fn init_site(target_dir: &Path) -> Result<()> {
    let config_path = target_dir.join("_config.yml");
    if config_path.exists() {
        bail!("A site already exists in {:?}", target_dir);
    }

    let post_dir = target_dir.join("source/post/hello-world");
    fs::create_dir_all(&post_dir)?;
    fs::write(&config_path, CONFIG)?;

    let now = chrono::Local::now();
    let sample_post = format!(
        r#"---
title: Hello World
date: {}
---

Welcome! This post lives in ~source/post/hello-world/index.md~, so it is
published at ~/post/hello-world/~ and its comment thread uses that URL.

Write a tilde wherever markdown wants a backtick; tildes are swapped
for backticks before rendering:

~~~bash
$ postpage new "My New Post"
$ postpage server
~~~
"#,
        now.format("%Y-%m-%d %H:%M:%S")
    );
    fs::write(post_dir.join("index.md"), sample_post)?;

    tracing::info!("Initialized site in {:?}", target_dir);
    Ok(())
}
