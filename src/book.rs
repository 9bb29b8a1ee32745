//! The staging pipeline: mirror, index, write.
//!
//! [`stage`] performs everything up to the builder invocation and reports
//! what it did. [`plan`] computes the same index without touching the
//! filesystem beyond reading the content tree.

use crate::index::{self, IndexEntry, IndexError};
use crate::layout::Layout;
use crate::mirror::{self, MirrorError, MirrorReport};
use crate::summary;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum BookError {
    #[error("Mirror error: {0}")]
    Mirror(#[from] MirrorError),
    #[error("Index error: {0}")]
    Index(#[from] IndexError),
    #[error("Failed to write {path}: {source}")]
    WriteSummary {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// The index of a content tree and its rendered document.
#[derive(Debug)]
pub struct Plan {
    pub entries: Vec<IndexEntry>,
    pub text: String,
}

/// Everything one staging run produced.
#[derive(Debug)]
pub struct StageReport {
    pub mirror: MirrorReport,
    pub entries: Vec<IndexEntry>,
    pub summary_path: PathBuf,
    /// A content link at the summary path was removed before writing.
    pub replaced_summary_link: bool,
    /// Plain files shadowing a document's sub-chapter directory name.
    pub stray_siblings: Vec<String>,
}

/// Walk the content tree and render the index without writing anything.
pub fn plan(layout: &Layout) -> Result<Plan, BookError> {
    let entries = index::collect_entries(&layout.content_root())?;
    let text = summary::render_summary(&layout.config, &entries);
    Ok(Plan { entries, text })
}

/// Reset the staging tree, link sources into it and write the index document.
pub fn stage(layout: &Layout) -> Result<StageReport, BookError> {
    let mirror = mirror::mirror(layout)?;
    let Plan { entries, text } = plan(layout)?;

    let summary_path = layout.summary_path();
    let replaced_summary_link =
        summary::write_summary(&summary_path, &text).map_err(|source| {
            BookError::WriteSummary {
                path: summary_path.clone(),
                source,
            }
        })?;

    let stray_siblings = index::stray_siblings(&layout.content_root())?;

    Ok(StageReport {
        mirror,
        entries,
        summary_path,
        replaced_summary_link,
        stray_siblings,
    })
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use crate::config::BookConfig;
    use crate::test_helpers::*;
    use std::fs;
    use tempfile::TempDir;

    fn layout_for(tmp: &TempDir) -> Layout {
        Layout::new(tmp.path(), BookConfig::default())
    }

    #[test]
    fn stage_writes_fixture_summary() {
        let tmp = setup_fixtures();
        let layout = layout_for(&tmp);

        let report = stage(&layout).unwrap();

        assert_eq!(report.summary_path, tmp.path().join("src/SUMMARY.md"));
        assert_eq!(
            fs::read_to_string(&report.summary_path).unwrap(),
            "[Introduction](introduction.md)\n\
             \n\
             - [Guidelines for compiler changes](compiler_changes.md)\n\
             - [Guidelines for language changes](lang_changes.md)\n\
             - [Guidelines for library changes](libs_changes.md)\n\
             - [0000-template](0000-template.md)\n\
             - [0001-private-items](0001-private-items.md)\n\
             - [0003-stray](0003-stray.md)\n\
             - [3446-store](3446-store.md)\n\
             \x20   - [design](3446-store/design.md)\n\
             \x20       - [alternatives](3446-store/design/alternatives.md)\n\
             \x20   - [motivation](3446-store/motivation.md)\n"
        );
    }

    #[test]
    fn every_summary_link_resolves_in_staging() {
        let tmp = setup_fixtures();
        let layout = layout_for(&tmp);

        let report = stage(&layout).unwrap();

        let staging = layout.staging_root();
        for entry in &report.entries {
            assert!(
                staging.join(&entry.link).is_file(),
                "{} should resolve through the staging tree",
                entry.link
            );
        }
        assert!(staging.join("introduction.md").is_file());
    }

    #[test]
    fn stage_twice_is_byte_identical() {
        let tmp = setup_fixtures();
        let layout = layout_for(&tmp);

        stage(&layout).unwrap();
        let first = fs::read(layout.summary_path()).unwrap();
        stage(&layout).unwrap();
        let second = fs::read(layout.summary_path()).unwrap();

        assert_eq!(first, second);
    }

    #[test]
    fn stage_removes_stale_links() {
        let tmp = setup_fixtures();
        let layout = layout_for(&tmp);

        stage(&layout).unwrap();
        fs::remove_file(tmp.path().join("text/0000-template.md")).unwrap();
        let report = stage(&layout).unwrap();

        assert!(fs::symlink_metadata(layout.staging_root().join("0000-template.md")).is_err());
        assert!(!report.entries.iter().any(|e| e.name == "0000-template"));
    }

    #[test]
    fn stage_leaves_content_tree_untouched() {
        let tmp = setup_fixtures();
        let layout = layout_for(&tmp);
        let before = list_tree(&layout.content_root());

        stage(&layout).unwrap();

        assert_eq!(list_tree(&layout.content_root()), before);
    }

    #[test]
    fn summary_in_content_tree_is_not_overwritten() {
        let tmp = setup_fixtures();
        fs::write(tmp.path().join("text/SUMMARY.md"), "hand written").unwrap();
        let layout = layout_for(&tmp);

        let report = stage(&layout).unwrap();

        assert!(report.replaced_summary_link);
        assert_eq!(
            fs::read_to_string(tmp.path().join("text/SUMMARY.md")).unwrap(),
            "hand written"
        );
        let generated = fs::read_to_string(layout.summary_path()).unwrap();
        assert!(generated.starts_with("[Introduction](introduction.md)\n"));
        // The content tree's own SUMMARY.md is still a document
        assert!(generated.contains("- [SUMMARY](SUMMARY.md)\n"));
    }

    #[test]
    fn stage_reports_stray_siblings() {
        let tmp = setup_fixtures();
        let report = stage(&layout_for(&tmp)).unwrap();
        assert_eq!(report.stray_siblings, vec!["0003-stray"]);
    }

    #[test]
    fn stage_without_content_dir_fails() {
        let tmp = TempDir::new().unwrap();
        let result = stage(&layout_for(&tmp));
        assert!(matches!(result, Err(BookError::Mirror(_))));
    }

    #[test]
    fn plan_does_not_create_staging() {
        let tmp = setup_fixtures();
        let layout = layout_for(&tmp);

        let plan = plan(&layout).unwrap();

        assert_eq!(plan.entries.len(), 7);
        assert!(plan.text.contains("- [3446-store](3446-store.md)\n"));
        assert!(!layout.staging_root().exists());
    }

    #[test]
    fn plan_matches_staged_summary() {
        let tmp = setup_fixtures();
        let layout = layout_for(&tmp);

        let planned = plan(&layout).unwrap().text;
        stage(&layout).unwrap();

        assert_eq!(fs::read_to_string(layout.summary_path()).unwrap(), planned);
    }
}
