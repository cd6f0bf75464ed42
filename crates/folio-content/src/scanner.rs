//! Content discovery by filesystem walking.
//!
//! Discovery is split from reading: [`Scanner`] only walks directories and
//! returns lightweight [`PageRef`]s. Reading front matter happens afterwards,
//! in parallel, in [`FsContentIndex`](crate::FsContentIndex).

use std::fs;
use std::path::{Path, PathBuf};

use glob::{MatchOptions, Pattern};

/// Page file extensions recognised as content.
pub(crate) const PAGE_EXTENSIONS: [&str; 2] = ["md", "mdx"];

/// Reference to a page source file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct PageRef {
    /// Path relative to the content root, `/`-separated (e.g. "guides/setup.md").
    pub rel_path: String,
    /// Absolute path to the file.
    pub abs_path: PathBuf,
}

/// Walks a content directory collecting page files.
pub(crate) struct Scanner<'a> {
    root: &'a Path,
    exclude: &'a [Pattern],
}

const MATCH_OPTIONS: MatchOptions = MatchOptions {
    case_sensitive: true,
    require_literal_separator: true,
    require_literal_leading_dot: false,
};

impl<'a> Scanner<'a> {
    pub(crate) fn new(root: &'a Path, exclude: &'a [Pattern]) -> Self {
        Self { root, exclude }
    }

    /// Collect page references, sorted by relative path.
    pub(crate) fn scan(&self) -> Vec<PageRef> {
        let mut refs = Vec::new();
        self.scan_directory(self.root, "", &mut refs);
        refs.sort_by(|a, b| a.rel_path.cmp(&b.rel_path));
        refs
    }

    fn scan_directory(&self, dir: &Path, rel_prefix: &str, refs: &mut Vec<PageRef>) {
        let entries = match fs::read_dir(dir) {
            Ok(entries) => entries,
            Err(e) => {
                tracing::warn!(dir = %dir.display(), error = %e, "Skipping unreadable directory");
                return;
            }
        };

        for entry in entries.filter_map(Result::ok) {
            let name = entry.file_name().to_string_lossy().into_owned();
            if name.starts_with('.') {
                continue;
            }

            let rel_path = if rel_prefix.is_empty() {
                name
            } else {
                format!("{rel_prefix}/{name}")
            };
            if self.is_excluded(&rel_path) {
                tracing::debug!(path = %rel_path, "Excluded from content index");
                continue;
            }

            let path = entry.path();
            let is_dir = entry.file_type().is_ok_and(|t| t.is_dir());
            if is_dir {
                self.scan_directory(&path, &rel_path, refs);
            } else if is_page(&path) {
                refs.push(PageRef {
                    rel_path,
                    abs_path: path,
                });
            }
        }
    }

    fn is_excluded(&self, rel_path: &str) -> bool {
        self.exclude
            .iter()
            .any(|pattern| pattern.matches_with(rel_path, MATCH_OPTIONS))
    }
}

fn is_page(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| PAGE_EXTENSIONS.contains(&ext))
}

/// Convert a relative page path to its default document id.
///
/// The extension is dropped; directory segments are kept, including `index`:
/// - `intro.md` -> `intro`
/// - `getting-started/index.md` -> `getting-started/index`
/// - `api/contracts/overview.mdx` -> `api/contracts/overview`
///
/// If `id_override` is set (front matter `id:`), it replaces the file stem.
pub(crate) fn document_id(rel_path: &str, id_override: Option<&str>) -> String {
    let (dir, file) = match rel_path.rsplit_once('/') {
        Some((dir, file)) => (Some(dir), file),
        None => (None, rel_path),
    };
    let stem = id_override.unwrap_or_else(|| {
        file.rsplit_once('.')
            .map_or(file, |(stem, _extension)| stem)
    });

    match dir {
        Some(dir) => format!("{dir}/{stem}"),
        None => stem.to_owned(),
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn patterns(globs: &[&str]) -> Vec<Pattern> {
        globs.iter().map(|g| Pattern::new(g).unwrap()).collect()
    }

    fn rel_paths(root: &Path, exclude: &[Pattern]) -> Vec<String> {
        Scanner::new(root, exclude)
            .scan()
            .into_iter()
            .map(|r| r.rel_path)
            .collect()
    }

    #[test]
    fn test_document_id() {
        assert_eq!(document_id("intro.md", None), "intro");
        assert_eq!(
            document_id("getting-started/index.md", None),
            "getting-started/index"
        );
        assert_eq!(document_id("a/b/c.mdx", None), "a/b/c");
        assert_eq!(document_id("a/b/c.md", Some("custom")), "a/b/custom");
        assert_eq!(document_id("c.md", Some("custom")), "custom");
        assert_eq!(document_id("v1.2/notes.md", None), "v1.2/notes");
    }

    #[test]
    fn test_scan_finds_md_and_mdx() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("intro.md"), "# Intro").unwrap();
        fs::create_dir(dir.path().join("guides")).unwrap();
        fs::write(dir.path().join("guides/setup.mdx"), "# Setup").unwrap();
        fs::write(dir.path().join("guides/diagram.png"), "").unwrap();

        assert_eq!(
            rel_paths(dir.path(), &[]),
            vec!["guides/setup.mdx", "intro.md"]
        );
    }

    #[test]
    fn test_scan_skips_hidden() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join(".draft.md"), "").unwrap();
        fs::create_dir(dir.path().join(".git")).unwrap();
        fs::write(dir.path().join(".git/notes.md"), "").unwrap();
        fs::write(dir.path().join("visible.md"), "").unwrap();

        assert_eq!(rel_paths(dir.path(), &[]), vec!["visible.md"]);
    }

    #[test]
    fn test_scan_applies_exclude_patterns_to_files_and_dirs() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("_partial.md"), "").unwrap();
        fs::create_dir(dir.path().join("_shared")).unwrap();
        fs::write(dir.path().join("_shared/snippet.md"), "").unwrap();
        fs::create_dir(dir.path().join("guides")).unwrap();
        fs::write(dir.path().join("guides/_inc.md"), "").unwrap();
        fs::write(dir.path().join("guides/page.md"), "").unwrap();

        assert_eq!(
            rel_paths(dir.path(), &patterns(&["**/_*"])),
            vec!["guides/page.md"]
        );
    }

    #[test]
    fn test_exclude_star_does_not_cross_directories() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir(dir.path().join("drafts")).unwrap();
        fs::write(dir.path().join("drafts/page.md"), "").unwrap();
        fs::write(dir.path().join("draft-notes.md"), "").unwrap();

        assert_eq!(
            rel_paths(dir.path(), &patterns(&["draft-*"])),
            vec!["drafts/page.md"]
        );
    }
}
