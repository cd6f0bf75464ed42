//! Filesystem content index for Folio.
//!
//! [`FsContentIndex`] scans a docs directory for `.md` and `.mdx` pages and
//! answers [`ContentIndex::exists`] lookups for the navigation resolver.
//!
//! # Document ids
//!
//! A page's id is its path relative to the docs root without extension,
//! using `/` separators (`getting-started/index`). A front matter `id:` field
//! replaces the file-name part:
//!
//! ```text
//! guides/setup.md           -> guides/setup
//! guides/setup.md (id: cfg) -> guides/cfg
//! ```
//!
//! Hidden entries are always skipped. Entries matching an exclude pattern
//! (default: `**/_*`, i.e. partials and underscore directories) are skipped too.
//!
//! # Example
//!
//! ```ignore
//! use folio_content::FsContentIndex;
//! use folio_nav::{ContentIndex, DocumentId};
//!
//! let index = FsContentIndex::scan("docs/ats")?;
//! assert!(index.exists(&DocumentId::from("intro")));
//! ```

mod front_matter;
mod scanner;

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use folio_nav::{ContentIndex, DocumentId, DocumentLinks, SidebarRegistry};
use glob::Pattern;
use rayon::prelude::*;

use scanner::{PageRef, Scanner, document_id};

/// Exclude patterns applied when none are configured.
///
/// Excluded directories are not descended into, so `**/_*` also covers
/// everything below an underscore directory.
pub const DEFAULT_EXCLUDE: &[&str] = &["**/_*"];

/// Error returned when scanning content.
#[derive(Debug, thiserror::Error)]
pub enum ContentError {
    /// Content root does not exist or is not a directory.
    #[error("Content directory not found: {}", .0.display())]
    NotFound(PathBuf),
    /// Two pages resolve to the same document id.
    #[error("Duplicate document id '{id}': {} and {}", first.display(), second.display())]
    DuplicateId {
        /// Conflicting id.
        id: DocumentId,
        /// First source file (relative to the root).
        first: PathBuf,
        /// Second source file (relative to the root).
        second: PathBuf,
    },
    /// Invalid exclude pattern.
    #[error("Invalid exclude pattern '{pattern}': {source}")]
    Pattern {
        /// Pattern as written.
        pattern: String,
        /// Parse error.
        #[source]
        source: glob::PatternError,
    },
}

/// Scan options.
#[derive(Debug, Clone)]
pub struct ScanOptions {
    exclude: Vec<Pattern>,
}

impl ScanOptions {
    /// Options with the given exclude globs (matched against `/`-separated
    /// paths relative to the content root).
    ///
    /// # Errors
    ///
    /// Returns [`ContentError::Pattern`] for an invalid glob.
    pub fn with_exclude<S: AsRef<str>>(patterns: &[S]) -> Result<Self, ContentError> {
        let exclude = patterns
            .iter()
            .map(|p| {
                Pattern::new(p.as_ref()).map_err(|source| ContentError::Pattern {
                    pattern: p.as_ref().to_owned(),
                    source,
                })
            })
            .collect::<Result<_, _>>()?;
        Ok(Self { exclude })
    }
}

impl Default for ScanOptions {
    fn default() -> Self {
        Self {
            exclude: DEFAULT_EXCLUDE
                .iter()
                .filter_map(|p| Pattern::new(p).ok())
                .collect(),
        }
    }
}

/// One content page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentEntry {
    /// Document id.
    pub id: DocumentId,
    /// Source file relative to the content root.
    pub source: PathBuf,
    /// Front matter `title`.
    pub title: Option<String>,
    /// Front matter `sidebar_label`.
    pub sidebar_label: Option<String>,
}

impl ContentEntry {
    /// Label to show in navigation: `sidebar_label`, then `title`.
    #[must_use]
    pub fn label(&self) -> Option<&str> {
        self.sidebar_label.as_deref().or(self.title.as_deref())
    }
}

/// Content index backed by a directory scan.
///
/// The scan happens once at construction; the index is immutable afterwards.
#[derive(Debug, Clone)]
pub struct FsContentIndex {
    root: PathBuf,
    entries: BTreeMap<DocumentId, ContentEntry>,
}

impl FsContentIndex {
    /// Scan a directory with default options.
    ///
    /// # Errors
    ///
    /// See [`scan_with`](Self::scan_with).
    pub fn scan(root: impl Into<PathBuf>) -> Result<Self, ContentError> {
        Self::scan_with(root, &ScanOptions::default())
    }

    /// Scan a directory.
    ///
    /// # Errors
    ///
    /// Returns [`ContentError::NotFound`] if `root` is not a directory and
    /// [`ContentError::DuplicateId`] if two pages share an id.
    pub fn scan_with(root: impl Into<PathBuf>, options: &ScanOptions) -> Result<Self, ContentError> {
        let root = root.into();
        if !root.is_dir() {
            return Err(ContentError::NotFound(root));
        }

        let refs = Scanner::new(&root, &options.exclude).scan();
        let built: Vec<ContentEntry> = refs.par_iter().map(build_entry).collect();

        let mut entries: BTreeMap<DocumentId, ContentEntry> = BTreeMap::new();
        for entry in built {
            if let Some(existing) = entries.get(&entry.id) {
                return Err(ContentError::DuplicateId {
                    id: entry.id,
                    first: existing.source.clone(),
                    second: entry.source,
                });
            }
            entries.insert(entry.id.clone(), entry);
        }

        tracing::debug!(
            root = %root.display(),
            pages = entries.len(),
            "Scanned content directory"
        );
        Ok(Self { root, entries })
    }

    /// Content root.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Entry by id.
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&ContentEntry> {
        self.entries.get(id)
    }

    /// Entries ordered by id.
    pub fn iter(&self) -> impl Iterator<Item = &ContentEntry> {
        self.entries.values()
    }

    /// Number of pages.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True if no pages were found.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Pages not referenced by any sidebar in `registry`, as a leaf or a
    /// category landing. Ordered by id.
    #[must_use]
    pub fn unlisted_documents(&self, registry: &SidebarRegistry) -> Vec<&ContentEntry> {
        let referenced = registry.referenced_documents();
        self.entries
            .values()
            .filter(|entry| !referenced.contains(&entry.id))
            .collect()
    }
}

impl ContentIndex for FsContentIndex {
    fn exists(&self, id: &DocumentId) -> bool {
        self.entries.contains_key(id)
    }
}

impl DocumentLinks for FsContentIndex {
    fn title(&self, id: &DocumentId) -> Option<String> {
        self.entries.get(id)?.label().map(str::to_owned)
    }
}

fn build_entry(page: &PageRef) -> ContentEntry {
    let front_matter = match fs::read_to_string(&page.abs_path) {
        Ok(content) => front_matter::parse(&content),
        Err(e) => {
            tracing::warn!(
                path = %page.abs_path.display(),
                error = %e,
                "Failed to read page, indexing without front matter"
            );
            None
        }
    }
    .unwrap_or_default();

    ContentEntry {
        id: DocumentId::new(document_id(&page.rel_path, front_matter.id.as_deref())),
        source: PathBuf::from(&page.rel_path),
        title: front_matter.title,
        sidebar_label: front_matter.sidebar_label,
    }
}
