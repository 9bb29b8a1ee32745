//! Staging tree mirroring.
//!
//! The staging tree is a disposable view of the project: every immediate entry
//! of the content tree plus the auxiliary documents, each as a symbolic link
//! back to its source. Nothing is copied, so the content tree stays the single
//! source of truth and the staging tree can be deleted at any time.
//!
//! ```text
//! src/
//! ├── 0001-private-items.md  → ../text/0001-private-items.md
//! ├── 3446-store.md          → ../text/3446-store.md
//! ├── 3446-store             → ../text/3446-store
//! ├── compiler_changes.md    → ../compiler_changes.md
//! ├── lang_changes.md        → ../lang_changes.md
//! ├── libs_changes.md        → ../libs_changes.md
//! └── introduction.md        → ../README.md
//! ```
//!
//! Link targets are relative, so the project can be moved or checked out
//! elsewhere without regenerating.

use crate::layout::Layout;
use std::ffi::OsString;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum MirrorError {
    #[error("Failed to reset staging directory {path}: {source}")]
    Reset { path: PathBuf, source: io::Error },
    #[error("Failed to read content directory {path}: {source}")]
    ReadContent { path: PathBuf, source: io::Error },
    #[error("Failed to link {link} → {target}: {source}")]
    Link {
        link: PathBuf,
        target: PathBuf,
        source: io::Error,
    },
}

/// Result of one link request.
#[derive(Debug, Clone, PartialEq)]
pub struct LinkOutcome {
    /// Link name inside the staging directory.
    pub name: String,
    /// Relative target the link points at.
    pub target: PathBuf,
    /// False when something already occupied the link path.
    pub created: bool,
    /// Whether the target resolves to an existing file or directory.
    pub target_exists: bool,
}

/// All links created for one staging run, content entries first.
#[derive(Debug, Default)]
pub struct MirrorReport {
    pub links: Vec<LinkOutcome>,
}

impl MirrorReport {
    pub fn created(&self) -> usize {
        self.links.iter().filter(|l| l.created).count()
    }

    pub fn skipped(&self) -> impl Iterator<Item = &LinkOutcome> {
        self.links.iter().filter(|l| !l.created)
    }

    /// Links whose source document does not exist (dangling).
    pub fn dangling(&self) -> impl Iterator<Item = &LinkOutcome> {
        self.links.iter().filter(|l| l.created && !l.target_exists)
    }
}

/// Reset the staging tree and populate it with links.
pub fn mirror(layout: &Layout) -> Result<MirrorReport, MirrorError> {
    reset_staging(&layout.staging_root())?;
    let mut links = mirror_content(layout)?;
    links.extend(link_auxiliary(layout)?);
    Ok(MirrorReport { links })
}

/// Remove whatever is at `staging` and create an empty directory there.
///
/// There is no merge mode: a previous staging tree or a link at that path is
/// removed. Removal never follows links, so the sources they point at are
/// untouched. A regular file at that path is refused, since it is more
/// likely a source document than leftover output.
pub fn reset_staging(staging: &Path) -> Result<(), MirrorError> {
    let reset = || -> io::Result<()> {
        match fs::symlink_metadata(staging) {
            Ok(meta) if meta.is_dir() => fs::remove_dir_all(staging)?,
            Ok(meta) if meta.file_type().is_symlink() => fs::remove_file(staging)?,
            Ok(_) => {
                return Err(io::Error::new(
                    io::ErrorKind::AlreadyExists,
                    "a file that is not a staging directory is in the way",
                ));
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => {}
            Err(e) => return Err(e),
        }
        fs::create_dir_all(staging)
    };
    reset().map_err(|source| MirrorError::Reset {
        path: staging.to_path_buf(),
        source,
    })
}

/// Create a symbolic link at `link` pointing to `target` unless the path is taken.
///
/// Returns `Ok(false)` when any entry, including a dangling link, already
/// exists at `link`.
pub fn symlink_if_absent(target: &Path, link: &Path) -> Result<bool, MirrorError> {
    match create_symlink(target, link) {
        Ok(()) => Ok(true),
        Err(e) if e.kind() == io::ErrorKind::AlreadyExists => Ok(false),
        Err(source) => Err(MirrorError::Link {
            link: link.to_path_buf(),
            target: target.to_path_buf(),
            source,
        }),
    }
}

/// Link every immediate entry of the content tree into the staging root.
///
/// Entries are processed in filename order so reports are stable.
pub fn mirror_content(layout: &Layout) -> Result<Vec<LinkOutcome>, MirrorError> {
    let content_root = layout.content_root();
    let mut names = read_names(&content_root).map_err(|source| MirrorError::ReadContent {
        path: content_root.clone(),
        source,
    })?;
    names.sort();

    let staging = layout.staging_root();
    let mut outcomes = Vec::with_capacity(names.len());
    for name in names {
        let target = layout.content_target(&name);
        let created = symlink_if_absent(&target, &staging.join(&name))?;
        outcomes.push(LinkOutcome {
            name: name.to_string_lossy().into_owned(),
            target,
            created,
            target_exists: true,
        });
    }
    Ok(outcomes)
}

/// Link the guideline documents and the introduction into the staging root.
///
/// A missing source still gets its (dangling) link; the outcome records it.
pub fn link_auxiliary(layout: &Layout) -> Result<Vec<LinkOutcome>, MirrorError> {
    let staging = layout.staging_root();
    let up = layout.up_to_root();

    layout
        .auxiliary_links()
        .into_iter()
        .map(|aux| {
            let target = up.join(&aux.source);
            let created = symlink_if_absent(&target, &staging.join(&aux.name))?;
            Ok(LinkOutcome {
                target_exists: layout.root.join(&aux.source).exists(),
                name: aux.name,
                target,
                created,
            })
        })
        .collect()
}

fn read_names(dir: &Path) -> io::Result<Vec<OsString>> {
    fs::read_dir(dir)?
        .map(|entry| entry.map(|e| e.file_name()))
        .collect()
}

#[cfg(unix)]
fn create_symlink(target: &Path, link: &Path) -> io::Result<()> {
    std::os::unix::fs::symlink(target, link)
}

#[cfg(windows)]
fn create_symlink(target: &Path, link: &Path) -> io::Result<()> {
    use std::os::windows::fs::{symlink_dir, symlink_file};

    // Windows needs to know the kind of the target up front.
    let resolved = match link.parent() {
        Some(parent) => parent.join(target),
        None => target.to_path_buf(),
    };
    if resolved.is_dir() {
        symlink_dir(target, link)
    } else {
        symlink_file(target, link)
    }
}
