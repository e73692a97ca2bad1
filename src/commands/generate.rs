//! Generate static files

use anyhow::Result;
use notify::RecursiveMode;
use notify_debouncer_mini::new_debouncer;
use std::sync::mpsc::channel;
use std::time::Duration;

use crate::config::CONFIG_FILES;
use crate::content::loader::ContentLoader;
use crate::generator::Generator;
use crate::Site;

/// Generate the static site
pub fn run(site: &Site) -> Result<()> {
    let start = std::time::Instant::now();

    let posts = ContentLoader::new(site).load_posts()?;
    tracing::info!("Loaded {} posts", posts.len());

    Generator::new(site)?.generate(&posts)?;

    tracing::info!("Generated in {:.2}s", start.elapsed().as_secs_f64());
    Ok(())
}

/// Watch sources and config, regenerating on change
pub async fn watch(site: &Site) -> Result<()> {
    let site = site.clone();
    tokio::task::spawn_blocking(move || watch_blocking(&site)).await?
}

fn watch_blocking(site: &Site) -> Result<()> {
    let (tx, rx) = channel();
    let mut debouncer = new_debouncer(Duration::from_millis(500), tx)?;

    if site.source_dir.exists() {
        debouncer
            .watcher()
            .watch(&site.source_dir, RecursiveMode::Recursive)?;
    }
    for name in CONFIG_FILES {
        let path = site.base_dir.join(name);
        if path.exists() {
            debouncer
                .watcher()
                .watch(&path, RecursiveMode::NonRecursive)?;
        }
    }

    tracing::info!("Watching for changes. Press Ctrl+C to stop.");

    for result in rx {
        match result {
            Ok(events) if events.iter().any(|e| is_relevant(&e.path)) => {
                tracing::info!("File changed, regenerating...");
                // Reload so config edits take effect
                match Site::new(&site.base_dir).and_then(|site| run(&site)) {
                    Ok(()) => {}
                    Err(e) => tracing::error!("Generation failed: {:#}", e),
                }
            }
            Ok(_) => {}
            Err(e) => tracing::error!("Watch error: {:?}", e),
        }
    }

    Ok(())
}

/// Editor droppings and VCS metadata do not trigger rebuilds
pub(crate) fn is_relevant(path: &std::path::Path) -> bool {
    let path_str = path.to_string_lossy();
    !path_str.contains(".git")
        && !path_str.contains(".DS_Store")
        && !path_str.ends_with('~')
        && !path_str.ends_with(".swp")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    #[test]
    fn test_is_relevant() {
        assert!(is_relevant(Path::new("source/post/a/index.md")));
        assert!(!is_relevant(Path::new("source/post/a/index.md~")));
        assert!(!is_relevant(Path::new(".git/HEAD")));
        assert!(!is_relevant(Path::new("source/post/a/.index.md.swp")));
    }

    #[test]
    fn test_run_on_empty_site() {
        let dir = tempfile::tempdir().unwrap();
        let site = Site::new(dir.path()).unwrap();
        run(&site).unwrap();
        assert!(site.public_dir.join("post/index.html").exists());
        assert!(site.public_dir.join("atom.xml").exists());
    }

    #[test]
    fn test_demo_site_post() {
        let base = Path::new(env!("CARGO_MANIFEST_DIR")).join("demos/site");
        let site = Site::new(&base).unwrap();
        let posts = ContentLoader::new(&site).load_posts().unwrap();
        let post = posts
            .iter()
            .find(|p| p.slug == "maintainable-workarounds-with-codegen")
            .unwrap();

        assert_eq!(post.title, "Make maintainable workarounds with codegen");
        assert_eq!(
            post.thread_url(&site.config),
            "https://kentcdodds.com/post/maintainable-workarounds-with-codegen"
        );
        assert!(!post.content.contains('~'));
        assert!(post.content.contains("<code>glamorous</code>"));

        let html = Generator::new(&site)
            .unwrap()
            .render_post_page(post)
            .unwrap();
        assert_eq!(html.matches("<h1").count(), 1);
        assert!(html.contains(r#"<a href="/post">here</a>"#));
    }
}
