//! Link destination resolution
//!
//! Implements the core's `LinkOpener` capability with a fallback chain:
//! another entry opens in-viewer, an existing relative file goes to the
//! system opener, anything that parses as a URL goes to the browser, and the
//! rest is reported as unresolved. Entry navigation is deferred through
//! `pending_entry` so the opener never re-enters the viewport that is
//! dispatching the click.

use std::path::{Path, PathBuf};

use lore_core::{LinkOpener, OpenError};
use once_cell::sync::Lazy;
use regex::Regex;
use url::Url;

use super::entries::EntryStore;

/// Destinations that refer to another entry: a relative `name.md` path, or a
/// forge URL ending in `/blob/<ref>/name.md`.
static ENTRY_LINK: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?:https?://.+?/blob/.+?/)?(?P<relative>[A-Za-z0-9_\-. ]+\.md)$")
        .expect("entry link pattern")
});

pub struct LinkResolver<'a> {
    store: &'a EntryStore,
    current: Option<&'a Path>,
    /// Entry navigation requested by the last open; the app applies it after
    /// dispatch returns.
    pub pending_entry: Option<PathBuf>,
}

impl<'a> LinkResolver<'a> {
    pub fn new(store: &'a EntryStore, current: Option<&'a Path>) -> Self {
        Self {
            store,
            current,
            pending_entry: None,
        }
    }

    fn try_entry(&self, destination: &str) -> Option<PathBuf> {
        let captures = ENTRY_LINK.captures(destination)?;
        let relative = captures.name("relative")?.as_str();
        // For a forge URL only the file name is usable; a plain path keeps
        // any subdirectories it names.
        let candidate = if destination.starts_with("http") {
            relative
        } else {
            destination
        };
        self.store.resolve_relative(self.current, candidate)
    }
}

impl LinkOpener for LinkResolver<'_> {
    fn open(&mut self, destination: &str) -> Result<(), OpenError> {
        if let Some(path) = self.try_entry(destination) {
            tracing::info!("navigating to entry {}", path.display());
            self.pending_entry = Some(path);
            return Ok(());
        }
        if let Some(path) = self.store.resolve_relative(self.current, destination) {
            tracing::info!("opening {} with the system handler", path.display());
            open::that(path)?;
            return Ok(());
        }
        if Url::parse(destination).is_ok() {
            tracing::info!("opening {destination} in the browser");
            webbrowser::open(destination).map_err(|e| OpenError::External(e.to_string()))?;
            return Ok(());
        }
        Err(OpenError::Unresolved(destination.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store_with(files: &[(&str, &str)]) -> (tempfile::TempDir, EntryStore) {
        let dir = tempfile::tempdir().expect("tempdir");
        for (name, body) in files {
            let path = dir.path().join(name);
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent).expect("mkdir");
            }
            std::fs::write(path, body).expect("write");
        }
        let store = EntryStore::new(dir.path());
        (dir, store)
    }

    #[test]
    fn relative_markdown_becomes_pending_entry() {
        let (_dir, store) = store_with(&[("other.md", "# Other\n")]);
        let mut resolver = LinkResolver::new(&store, None);
        resolver.open("./other.md").expect("resolves");
        assert_eq!(
            resolver.pending_entry.as_deref(),
            Some(store.root().join("./other.md").as_path())
        );
    }

    #[test]
    fn forge_url_resolves_by_file_name() {
        let (_dir, store) = store_with(&[("guide.md", "# Guide\n")]);
        let mut resolver = LinkResolver::new(&store, None);
        resolver
            .open("https://example.com/repo/blob/main/guide.md")
            .expect("resolves");
        assert!(resolver.pending_entry.is_some());
    }

    #[test]
    fn subdirectory_paths_survive_resolution() {
        let (_dir, store) = store_with(&[
            ("current.md", "# Current\n"),
            ("sub/deep.md", "# Deep\n"),
        ]);
        let current = store.root().join("current.md");
        let mut resolver = LinkResolver::new(&store, Some(&current));
        resolver.open("sub/deep.md").expect("resolves");
        assert_eq!(
            resolver.pending_entry,
            Some(store.root().join("sub/deep.md"))
        );
    }

    #[test]
    fn missing_target_is_unresolved() {
        let (_dir, store) = store_with(&[]);
        let mut resolver = LinkResolver::new(&store, None);
        let err = resolver.open("no.such.file").expect_err("cannot resolve");
        assert!(matches!(err, OpenError::Unresolved(_)));
        assert!(resolver.pending_entry.is_none());
    }

    #[test]
    fn entry_pattern_shapes() {
        assert!(ENTRY_LINK.is_match("notes.md"));
        assert!(ENTRY_LINK.is_match("./my notes.md"));
        assert!(ENTRY_LINK.is_match("https://host/repo/blob/main/page.md"));
        assert!(!ENTRY_LINK.is_match("https://host/page.html"));
        assert!(!ENTRY_LINK.is_match("notes.txt"));
    }
}
