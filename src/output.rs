//! CLI output formatting.
//!
//! Each report has a `format_*` function returning `Vec<String>` so it can be
//! tested without capturing stdout, and a `print_*`/`eprint_*` wrapper that
//! writes it out.
//!
//! ## Stage
//!
//! ```text
//! Links
//!     0001-private-items.md → ../text/0001-private-items.md
//!     introduction.md → ../README.md
//! Index → src/SUMMARY.md (7 chapters)
//!     0001-private-items
//!     3446-store
//!         motivation
//! ```
//!
//! ## Warnings
//!
//! ```text
//! warning: lang_changes.md → ../lang_changes.md does not resolve
//! warning: introduction.md already exists in the staging tree, not linked
//! warning: text/0003-stray is a file, so 0003-stray.md has no sub-chapters
//! ```

use crate::book::StageReport;
use crate::index::IndexEntry;
use std::path::Path;

/// Return indentation string: 4 spaces per depth level.
fn indent(depth: usize) -> String {
    "    ".repeat(depth)
}

fn chapter_count(n: usize) -> String {
    match n {
        1 => "1 chapter".to_string(),
        n => format!("{n} chapters"),
    }
}

/// Format the staging report: links created, then the chapter tree.
pub fn format_stage_output(report: &StageReport, root: &Path) -> Vec<String> {
    let mut lines = vec!["Links".to_string()];
    for link in report.mirror.links.iter().filter(|l| l.created) {
        lines.push(format!(
            "{}{} → {}",
            indent(1),
            link.name,
            link.target.display()
        ));
    }

    let summary = report
        .summary_path
        .strip_prefix(root)
        .unwrap_or(&report.summary_path);
    lines.push(format!(
        "Index → {} ({})",
        summary.display(),
        chapter_count(report.entries.len())
    ));
    lines.extend(format_chapters(&report.entries));
    lines
}

/// Chapter names as an indented tree.
pub fn format_chapters(entries: &[IndexEntry]) -> Vec<String> {
    entries
        .iter()
        .map(|e| format!("{}{}", indent(e.depth + 1), e.name))
        .collect()
}

/// Conditions worth a second look that do not stop the run.
pub fn format_warnings(report: &StageReport, content_dir: &str) -> Vec<String> {
    let mut lines = Vec::new();
    for link in report.mirror.dangling() {
        lines.push(format!(
            "warning: {} → {} does not resolve",
            link.name,
            link.target.display()
        ));
    }
    for link in report.mirror.skipped() {
        lines.push(format!(
            "warning: {} already exists in the staging tree, not linked",
            link.name
        ));
    }
    if report.replaced_summary_link {
        lines.push(format!(
            "warning: {content_dir} has its own {}, the generated index replaces it in staging",
            report
                .summary_path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default()
        ));
    }
    for stray in &report.stray_siblings {
        let document = Path::new(stray)
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        lines.push(format!(
            "warning: {content_dir}/{stray} is a file, so {document}.md has no sub-chapters"
        ));
    }
    lines
}

pub fn print_stage_output(report: &StageReport, root: &Path) {
    for line in format_stage_output(report, root) {
        println!("{}", line);
    }
}

pub fn eprint_warnings(report: &StageReport, content_dir: &str) {
    for line in format_warnings(report, content_dir) {
        eprintln!("{}", line);
    }
}
