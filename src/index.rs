//! Content tree walking for the index document.
//!
//! Chapters are Markdown files. Most documents are a single file, but a
//! document can carry sub-chapters (or assets such as diagrams) in a
//! directory with the same base name:
//!
//! ```text
//! text/
//! ├── 0123-my-awesome-feature.md
//! └── 0123-my-awesome-feature/
//!     ├── extra-material.md      # listed one level deeper
//!     └── diagram.svg            # ignored, only linked
//! ```
//!
//! ## Walk Order
//!
//! The walk is depth-first, siblings in ascending filename order. A directory
//! is sorted as if it were named `NAME.md` and placed right after that file,
//! so every document is immediately followed by its own sub-chapters. A
//! directory without a companion document is never entered, and a plain file
//! named like a document's base name is not a sub-chapter directory.
//!
//! Anything named `*.md` is a document, whatever it is on disk: a directory
//! called `notes.md` is listed as `notes` (its contents are not), and a
//! dangling link called `gone.md` is listed by name. Dangling links with any
//! other name are ignored.

use serde::Serialize;
use std::cmp::Ordering;
use std::ffi::{OsStr, OsString};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use walkdir::{DirEntry, FilterEntry, WalkDir};

pub const MARKDOWN_SUFFIX: &str = ".md";

#[derive(Error, Debug)]
pub enum IndexError {
    #[error("Failed to walk content tree: {0}")]
    Walk(#[from] walkdir::Error),
}

/// One line of the index: a document at a nesting depth.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IndexEntry {
    /// Nesting level, 0 for documents directly in the content root.
    pub depth: usize,
    /// Filename without the `.md` suffix. Names that are not valid UTF-8 are
    /// converted lossily.
    pub name: String,
    /// Path relative to the content root, `/`-separated.
    pub link: String,
}

impl IndexEntry {
    /// `depth` is the walk depth, 1 for entries directly in the content root.
    fn from_path(root: &Path, path: &Path, depth: usize) -> Self {
        let file_name = path
            .file_name()
            .map(OsStr::to_string_lossy)
            .unwrap_or_default();
        let name = file_name
            .strip_suffix(MARKDOWN_SUFFIX)
            .unwrap_or(&*file_name)
            .to_string();
        let relative = path.strip_prefix(root).unwrap_or(path);
        let link = relative
            .components()
            .map(|c| c.as_os_str().to_string_lossy())
            .collect::<Vec<_>>()
            .join("/");
        Self {
            depth: depth.saturating_sub(1),
            name,
            link,
        }
    }
}

type Listed = FilterEntry<walkdir::IntoIter, fn(&DirEntry) -> bool>;

/// Lazy depth-first iterator over the documents of a content tree.
pub struct Entries {
    root: PathBuf,
    walk: Listed,
}

impl Iterator for Entries {
    type Item = Result<IndexEntry, IndexError>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let entry = match self.walk.next()? {
                Ok(entry) => entry,
                Err(e) => match dangling_link(&e) {
                    Some(path) if is_document_name(path.as_os_str()) => {
                        let entry = IndexEntry::from_path(&self.root, &path, e.depth());
                        return Some(Ok(entry));
                    }
                    Some(_) => continue,
                    None => return Some(Err(e.into())),
                },
            };
            if entry.file_type().is_dir() {
                // Sub-chapter directories only steer the walk
                if !is_document_name(entry.file_name()) {
                    continue;
                }
                self.walk.skip_current_dir();
            }
            let depth = entry.depth();
            return Some(Ok(IndexEntry::from_path(&self.root, entry.path(), depth)));
        }
    }
}

/// Walk `content_root`, yielding every document in index order.
///
/// Links are followed; a link cycle surfaces as an error rather than
/// endless recursion.
pub fn entries(content_root: &Path) -> Entries {
    let walk = WalkDir::new(content_root)
        .min_depth(1)
        .follow_links(true)
        .sort_by(compare_entries)
        .into_iter()
        .filter_entry(is_listed as fn(&DirEntry) -> bool);
    Entries {
        root: content_root.to_path_buf(),
        walk,
    }
}

/// Eager form of [`entries`].
pub fn collect_entries(content_root: &Path) -> Result<Vec<IndexEntry>, IndexError> {
    entries(content_root).collect()
}

/// Plain files named like a document's base name (`foo` next to `foo.md`).
///
/// They do not hold sub-chapters, which is probably not what the author
/// meant. Reported relative to the content root.
pub fn stray_siblings(content_root: &Path) -> Result<Vec<String>, IndexError> {
    let mut strays = Vec::new();
    for entry in entries(content_root) {
        let entry = entry?;
        let Some(base) = entry.link.strip_suffix(MARKDOWN_SUFFIX) else {
            continue;
        };
        let sibling = content_root.join(base);
        if fs::symlink_metadata(&sibling).is_ok() && !sibling.is_dir() {
            strays.push(base.to_string());
        }
    }
    Ok(strays)
}

/// The path of a link whose target is missing, if that is what `error` is
/// about. Link cycles are not dangling links.
fn dangling_link(error: &walkdir::Error) -> Option<PathBuf> {
    if error.loop_ancestor().is_some() {
        return None;
    }
    let path = error.path()?;
    let is_link = fs::symlink_metadata(path).is_ok_and(|meta| meta.file_type().is_symlink());
    (is_link && fs::metadata(path).is_err()).then(|| path.to_path_buf())
}

/// Documents sort by name; sub-chapter directories sort as `NAME.md`, right
/// after the document they belong to.
fn compare_entries(a: &DirEntry, b: &DirEntry) -> Ordering {
    sort_key(a).cmp(&sort_key(b))
}

fn sort_key(entry: &DirEntry) -> (OsString, bool) {
    let mut key = entry.file_name().to_os_string();
    let steers = !is_document_name(entry.file_name()) && is_dir(entry);
    if steers {
        key.push(MARKDOWN_SUFFIX);
    }
    (key, steers)
}

/// Links are sorted before walkdir follows them, so check the target.
fn is_dir(entry: &DirEntry) -> bool {
    entry.file_type().is_dir() || (entry.path_is_symlink() && entry.path().is_dir())
}

fn is_document_name(name: &OsStr) -> bool {
    name.as_encoded_bytes().ends_with(MARKDOWN_SUFFIX.as_bytes())
}

fn is_listed(entry: &DirEntry) -> bool {
    if entry.depth() == 0 || is_document_name(entry.file_name()) {
        return true;
    }
    entry.file_type().is_dir() && has_companion_document(entry.path())
}

fn has_companion_document(dir: &Path) -> bool {
    let mut document = dir.as_os_str().to_os_string();
    document.push(MARKDOWN_SUFFIX);
    fs::symlink_metadata(PathBuf::from(document)).is_ok()
}
