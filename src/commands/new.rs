//! Create a new post

use anyhow::{bail, Result};
use std::fs;
use std::path::PathBuf;

use crate::content::validate_slug;
use crate::Site;

/// Create `<posts_dir>/<slug>/index.md` and return its path
pub fn create_post(site: &Site, title: &str, slug: Option<&str>) -> Result<PathBuf> {
    let slug = match slug {
        Some(s) => s.to_string(),
        None => slug::slugify(title),
    };
    if !validate_slug(&slug) {
        bail!("Cannot use {:?} as a post slug", slug);
    }

    let post_dir = site.posts_dir().join(&slug);
    let file_path = post_dir.join("index.md");
    if file_path.exists() {
        bail!("Post already exists: {:?}", file_path);
    }

    let now = chrono::Local::now();
    let content = format!(
        "---\ntitle: {}\ndate: {}\ntags:\n---\n\nWrite with ~inline code~ and fenced blocks:\n\n~~~rust\nfn main() {{}}\n~~~\n",
        yaml_string(title),
        now.format("%Y-%m-%d %H:%M:%S")
    );

    fs::create_dir_all(&post_dir)?;
    fs::write(&file_path, content)?;
    tracing::info!("Created post {:?}", file_path);

    Ok(file_path)
}

/// Quote a title so YAML keeps it a plain string
fn yaml_string(s: &str) -> String {
    serde_json::to_string(s).unwrap_or_else(|_| format!("'{}'", s.replace('\'', "''")))
}
