//! Entry discovery and indexing
//!
//! Walks the compendium root for markdown files and publishes a title-sorted
//! list. `refresh` re-scans on a worker thread, inserting entries as they are
//! found so the list fills in while a large tree is still being walked;
//! readers only ever see the published snapshot.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::thread;

use lore_core::Document;
use parking_lot::RwLock;
use walkdir::WalkDir;

/// Display title for entries with no usable heading or file name.
pub const UNTITLED: &str = "Untitled";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntrySummary {
    pub path: PathBuf,
    pub title: String,
}

#[derive(Clone)]
pub struct EntryStore {
    root: PathBuf,
    entries: Arc<RwLock<Vec<EntrySummary>>>,
}

impl EntryStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            entries: Arc::new(RwLock::new(Vec::new())),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Re-scan the root on a worker thread.
    pub fn refresh(&self) {
        let root = self.root.clone();
        let entries = Arc::clone(&self.entries);
        entries.write().clear();
        thread::spawn(move || scan(&root, &entries));
    }

    /// Synchronous scan, for startup and tests.
    pub fn refresh_blocking(&self) {
        self.entries.write().clear();
        scan(&self.root, &self.entries);
    }

    /// Current published list, title-sorted.
    pub fn snapshot(&self) -> Vec<EntrySummary> {
        self.entries.read().clone()
    }

    /// Case-insensitive substring filter over titles.
    pub fn filtered(&self, needle: &str) -> Vec<EntrySummary> {
        let needle = needle.to_lowercase();
        self.entries
            .read()
            .iter()
            .filter(|e| e.title.to_lowercase().contains(&needle))
            .cloned()
            .collect()
    }

    /// Read and parse one entry.
    pub fn load(&self, path: &Path) -> std::io::Result<Document> {
        let source = std::fs::read_to_string(path)?;
        Ok(Document::parse(&source))
    }

    /// Resolve a relative destination against the current entry's directory,
    /// falling back to the root; only existing paths resolve.
    pub fn resolve_relative(&self, current: Option<&Path>, relative: &str) -> Option<PathBuf> {
        let base = current.and_then(Path::parent).unwrap_or(&self.root);
        let joined = base.join(relative);
        joined.exists().then_some(joined)
    }
}

fn scan(root: &Path, entries: &RwLock<Vec<EntrySummary>>) {
    let mut count = 0usize;
    for file in WalkDir::new(root).into_iter().filter_map(Result::ok) {
        if !file.file_type().is_file() {
            continue;
        }
        let path = file.path();
        if path.extension().and_then(|e| e.to_str()) != Some("md") {
            continue;
        }
        let Ok(summary) = summarize(path) else {
            continue;
        };
        let mut list = entries.write();
        let index = list
            .binary_search_by(|e| {
                e.title
                    .cmp(&summary.title)
                    .then_with(|| e.path.cmp(&summary.path))
            })
            .unwrap_or_else(|i| i);
        list.insert(index, summary);
        count += 1;
    }
    tracing::info!("indexed {count} entries under {}", root.display());
}

fn summarize(path: &Path) -> std::io::Result<EntrySummary> {
    let source = std::fs::read_to_string(path)?;
    let doc = Document::parse(&source);
    Ok(EntrySummary {
        path: path.to_path_buf(),
        title: doc.title.unwrap_or_else(|| title_from_path(path)),
    })
}

/// Display title for a document at `path`: its first heading, else a title
/// derived from the file name.
pub fn display_title(doc: &Document, path: &Path) -> String {
    doc.title.clone().unwrap_or_else(|| title_from_path(path))
}

/// `ancient_rune-lore.md` becomes `Ancient rune lore`.
pub fn title_from_path(path: &Path) -> String {
    let stem = path.file_stem().and_then(|s| s.to_str()).unwrap_or("");
    let words = stem.replace(['_', '-'], " ");
    let trimmed = words.trim();
    if trimmed.is_empty() {
        return UNTITLED.to_string();
    }
    let mut chars = trimmed.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => UNTITLED.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write(dir: &Path, name: &str, body: &str) {
        std::fs::write(dir.join(name), body).expect("write test entry");
    }

    #[test]
    fn scan_sorts_by_title_with_fallbacks() {
        let dir = tempfile::tempdir().expect("tempdir");
        write(dir.path(), "zzz.md", "# Aardvark\n\nfirst by title\n");
        write(dir.path(), "beta_notes.md", "no heading here\n");
        write(dir.path(), "ignored.txt", "not markdown\n");

        let store = EntryStore::new(dir.path());
        store.refresh_blocking();
        let titles: Vec<String> = store.snapshot().into_iter().map(|e| e.title).collect();
        assert_eq!(titles, vec!["Aardvark", "Beta notes"]);
    }

    #[test]
    fn filter_is_case_insensitive() {
        let dir = tempfile::tempdir().expect("tempdir");
        write(dir.path(), "a.md", "# Dragon Taxonomy\n");
        write(dir.path(), "b.md", "# Herb Gardens\n");

        let store = EntryStore::new(dir.path());
        store.refresh_blocking();
        let hits = store.filtered("dragon");
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].title, "Dragon Taxonomy");
        assert!(store.filtered("zeppelin").is_empty());
    }

    #[test]
    fn resolve_relative_prefers_current_directory() {
        let dir = tempfile::tempdir().expect("tempdir");
        let sub = dir.path().join("sub");
        std::fs::create_dir(&sub).expect("mkdir");
        write(&sub, "near.md", "# Near\n");
        write(dir.path(), "far.md", "# Far\n");

        let store = EntryStore::new(dir.path());
        let current = sub.join("current.md");
        write(&sub, "current.md", "# Current\n");

        let near = store.resolve_relative(Some(&current), "near.md");
        assert_eq!(near, Some(sub.join("near.md")));
        assert_eq!(store.resolve_relative(None, "far.md"), Some(dir.path().join("far.md")));
        assert_eq!(store.resolve_relative(Some(&current), "missing.md"), None);
    }

    #[test]
    fn title_from_path_normalizes_separators() {
        assert_eq!(
            title_from_path(Path::new("ancient_rune-lore.md")),
            "Ancient rune lore"
        );
        assert_eq!(title_from_path(Path::new("___.md")), UNTITLED);
    }
}
