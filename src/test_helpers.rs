//! Shared test utilities.
//!
//! ```rust
//! use crate::test_helpers::*;
//!
//! let tmp = setup_fixtures();
//! let entries = collect_entries(&tmp.path().join("text")).unwrap();
//! assert_index_shape(&entries, &[(0, "0000-template"), (0, "0001-private-items")]);
//! ```

use std::fs;
use std::path::Path;
use tempfile::TempDir;
use walkdir::WalkDir;

use crate::index::IndexEntry;

// =========================================================================
// Fixture setup
// =========================================================================

#[path = "../tests/common/mod.rs"]
mod common;

/// Copy `fixtures/book/` to a temp directory and return it.
pub fn setup_fixtures() -> TempDir {
    common::copy_book_fixture()
}

/// Create an empty file, along with any missing parent directories.
pub fn touch(path: &Path) {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(path, "").unwrap();
}

// =========================================================================
// Directory listings
// =========================================================================

/// Immediate entry names of a directory, sorted.
pub fn list_names(dir: &Path) -> Vec<String> {
    let mut names: Vec<String> = fs::read_dir(dir)
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    names
}

/// Every file under `dir` with its contents, as `(relative path, bytes)`.
pub fn list_tree(dir: &Path) -> Vec<(String, Vec<u8>)> {
    WalkDir::new(dir)
        .sort_by_file_name()
        .into_iter()
        .map(|e| e.unwrap())
        .filter(|e| e.file_type().is_file())
        .map(|e| {
            let rel = e.path().strip_prefix(dir).unwrap();
            (rel.to_string_lossy().into_owned(), fs::read(e.path()).unwrap())
        })
        .collect()
}

// =========================================================================
// Index assertions
// =========================================================================

/// Assert the index matches `(depth, name)` pairs in order.
pub fn assert_index_shape(entries: &[IndexEntry], expected: &[(usize, &str)]) {
    let actual: Vec<(usize, &str)> = entries.iter().map(|e| (e.depth, e.name.as_str())).collect();
    assert_eq!(actual, expected.to_vec(), "index shape mismatch");
}
