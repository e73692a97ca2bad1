//! List posts

use anyhow::Result;

use crate::content::loader::ContentLoader;
use crate::Site;

/// Print every post with the URL of its comment thread
pub fn run(site: &Site) -> Result<()> {
    let posts = ContentLoader::new(site).load_posts()?;

    println!("Posts ({}):", posts.len());
    for post in &posts {
        let date = post
            .date
            .map(|d| d.format("%Y-%m-%d").to_string())
            .unwrap_or_else(|| "----------".to_string());
        println!("  {} - {} [{}]", date, post.title, post.source);
        if post.comments {
            println!("      thread: {}", post.thread_url(&site.config));
        }
    }

    Ok(())
}
