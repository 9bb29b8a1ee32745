//! Index document rendering.
//!
//! The index document (`SUMMARY.md`) is what the book builder reads to learn
//! the chapter structure. Its layout is fixed:
//!
//! ```text
//! [Introduction](introduction.md)
//!
//! - [Guidelines for compiler changes](compiler_changes.md)
//! - [Guidelines for language changes](lang_changes.md)
//! - [Guidelines for library changes](libs_changes.md)
//! - [0001-private-items](0001-private-items.md)
//! - [3446-store](3446-store.md)
//!     - [motivation](3446-store/motivation.md)
//! ```
//!
//! Rendering is pure; [`write_summary`] is the only function here that
//! touches the filesystem.

use crate::config::BookConfig;
use crate::index::IndexEntry;
use std::fs;
use std::io;
use std::path::Path;

/// Render the complete index document.
pub fn render_summary(config: &BookConfig, entries: &[IndexEntry]) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "[{}]({})\n\n",
        config.introduction.title, config.introduction.link
    ));
    for guideline in &config.guidelines {
        out.push_str(&format!("- [{}]({})\n", guideline.title, guideline.file));
    }
    for entry in entries {
        out.push_str(&render_entry(entry, config.indent_width));
        out.push('\n');
    }
    out
}

/// One list item, indented `indent_width` spaces per depth level.
pub fn render_entry(entry: &IndexEntry, indent_width: usize) -> String {
    format!(
        "{}- [{}]({})",
        " ".repeat(indent_width * entry.depth),
        entry.name,
        entry.link
    )
}

/// Write the index document, replacing any link already at `path`.
///
/// If the content tree holds a file with the index's name, the staging tree
/// has a link to it at `path`; writing through that link would overwrite the
/// source, so the link is removed first. Returns whether a link was replaced.
pub fn write_summary(path: &Path, text: &str) -> io::Result<bool> {
    let replaced = match fs::symlink_metadata(path) {
        Ok(meta) if meta.file_type().is_symlink() => {
            fs::remove_file(path)?;
            true
        }
        _ => false,
    };
    fs::write(path, text)?;
    Ok(replaced)
}
