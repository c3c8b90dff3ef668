//! Subcommand implementations

use crate::clipboard::SystemClipboard;
use anyhow::{bail, Context, Result};
use emoji_data::Dataset;
use emoji_finder::{EmojiFinder, FinderConfig, NodeId};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

pub const DATA_FILE: &str = "emoji-data.json";
pub const MARKUP_FILE: &str = "emoji-html.html";

/// `fetch`: download, process and write the build artifacts
pub fn fetch(out_dir: &Path, url: &str) -> Result<()> {
    let dataset = emoji_data::fetch(url).with_context(|| format!("Failed to fetch emoji data from {}", url))?;
    let (data, markup) = write_artifacts(&dataset, out_dir)?;
    tracing::info!("Wrote {} and {}", data.display(), markup.display());
    Ok(())
}

/// Write the processed dataset and its pre-rendered markup into `out_dir`
pub fn write_artifacts(dataset: &Dataset, out_dir: &Path) -> Result<(PathBuf, PathBuf)> {
    std::fs::create_dir_all(out_dir)
        .with_context(|| format!("Failed to create {}", out_dir.display()))?;

    let data_path = out_dir.join(DATA_FILE);
    let json = dataset.to_json_pretty().context("Failed to serialize emoji data")?;
    std::fs::write(&data_path, json).with_context(|| format!("Failed to write {}", data_path.display()))?;

    let markup_path = out_dir.join(MARKUP_FILE);
    let markup = emoji_html::results_markup(dataset.pairs());
    std::fs::write(&markup_path, markup).with_context(|| format!("Failed to write {}", markup_path.display()))?;

    tracing::debug!("Processed {} emojis", dataset.len());
    Ok((data_path, markup_path))
}

/// `inject`: insert pre-rendered markup into a page template
///
/// A missing markup file leaves the template unchanged.
pub fn inject(template: &Path, markup: &Path, out: &Path) -> Result<()> {
    let page = std::fs::read_to_string(template)
        .with_context(|| format!("Failed to read template {}", template.display()))?;

    let output = match std::fs::read_to_string(markup) {
        Ok(markup) => emoji_html::inject_markup(&page, &markup),
        Err(e) if e.kind() == ErrorKind::NotFound => {
            tracing::warn!("{} not found, run `emoji-finder fetch` first", markup.display());
            page
        }
        Err(e) => return Err(e).with_context(|| format!("Failed to read markup {}", markup.display())),
    };

    std::fs::write(out, output).with_context(|| format!("Failed to write {}", out.display()))?;
    tracing::info!("Wrote {}", out.display());
    Ok(())
}

/// `search`: render headlessly, type the keyword and report the matches
pub fn search(config: FinderConfig, keyword: &str, data: Option<&Path>, copy: Option<usize>) -> Result<()> {
    let dataset = match data {
        Some(path) => emoji_data::load(path).with_context(|| format!("Failed to load {}", path.display()))?,
        None => emoji_data::fetch(emoji_data::DEFAULT_SOURCE_URL).context("Failed to fetch emoji data")?,
    };

    let mut finder = EmojiFinder::open(dataset, config)
        .context("Failed to open page")?
        .with_clipboard(SystemClipboard::new());
    let frames = run_search(&mut finder, keyword);
    tracing::debug!("Rendered in {} frames", frames);

    let visible = finder.page().visible_emojis();
    println!("{} result(s) for {:?}", visible.len(), keyword.trim());
    if !visible.is_empty() {
        println!("{}", visible.join(" "));
    }

    if let Some(n) = copy {
        let emoji = copy_nth(&mut finder, n)?;
        println!("Copied {}", emoji);
    }
    Ok(())
}

/// Boot, render every frame and type `keyword`; returns the frame count
pub fn run_search(finder: &mut EmojiFinder, keyword: &str) -> usize {
    finder.boot();
    let frames = finder.run_until_idle();
    finder.type_search(keyword);
    frames
}

/// Click the n-th (1-based) visible result
pub fn copy_nth(finder: &mut EmojiFinder, n: usize) -> Result<String> {
    let visible: Vec<NodeId> = finder
        .page()
        .results()
        .into_iter()
        .filter(|&id| !finder.page().tree().is_hidden(id))
        .collect();

    let Some(&target) = n.checked_sub(1).and_then(|i| visible.get(i)) else {
        bail!("No result #{} (only {} visible)", n, visible.len());
    };

    let alerts = finder.page().alerts().len();
    finder.click(target);
    if finder.page().alerts().len() == alerts {
        bail!("Copy to clipboard failed");
    }
    emoji_finder::interaction::emoji_at(finder.page().tree(), target).context("Result has no emoji")
}

#[cfg(test)]
mod tests {
    use super::*;
    use emoji_finder::{EmojiEntry, MemoryClipboard};

    fn sample() -> Dataset {
        [EmojiEntry::new("😀", "grinning face happy"), EmojiEntry::new("🐱", "cat face")]
            .into_iter()
            .collect()
    }

    #[test]
    fn test_write_artifacts() {
        let dir = tempfile::tempdir().unwrap();
        let (data, markup) = write_artifacts(&sample(), &dir.path().join("public")).unwrap();

        let json = std::fs::read_to_string(data).unwrap();
        assert!(json.starts_with("{\n  \"😀\": \"grinning face happy\""));
        assert_eq!(emoji_data::load(&dir.path().join("public").join(DATA_FILE)).unwrap(), sample());

        let html = std::fs::read_to_string(markup).unwrap();
        assert_eq!(html.matches("js-emoji-char").count(), 2);
    }

    #[test]
    fn test_inject_file() {
        let dir = tempfile::tempdir().unwrap();
        let template = dir.path().join("index.html");
        let markup = dir.path().join(MARKUP_FILE);
        let out = dir.path().join("out.html");
        std::fs::write(&template, emoji_html::PAGE_SHELL).unwrap();
        std::fs::write(&markup, emoji_html::results_markup(sample().pairs())).unwrap();

        inject(&template, &markup, &out).unwrap();
        let page = std::fs::read_to_string(&out).unwrap();
        assert!(page.contains("data-emoji=\"🐱\""));
    }

    #[test]
    fn test_inject_missing_markup() {
        let dir = tempfile::tempdir().unwrap();
        let template = dir.path().join("index.html");
        let out = dir.path().join("out.html");
        std::fs::write(&template, emoji_html::PAGE_SHELL).unwrap();

        inject(&template, &dir.path().join("missing.html"), &out).unwrap();
        assert_eq!(std::fs::read_to_string(&out).unwrap(), emoji_html::PAGE_SHELL);
    }

    #[test]
    fn test_inject_missing_template() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("none.html");
        assert!(inject(&missing, &missing, &dir.path().join("out.html")).is_err());
    }

    #[test]
    fn test_search_and_copy() {
        let clipboard = MemoryClipboard::new();
        let mut finder = EmojiFinder::open(sample(), FinderConfig::default())
            .unwrap()
            .with_clipboard(clipboard.clone());

        run_search(&mut finder, "face");
        assert_eq!(finder.page().visible_emojis(), vec!["😀", "🐱"]);

        assert_eq!(copy_nth(&mut finder, 2).unwrap(), "🐱");
        assert_eq!(clipboard.contents().as_deref(), Some("🐱"));
        assert!(copy_nth(&mut finder, 3).is_err());
        assert!(copy_nth(&mut finder, 0).is_err());
    }
}
