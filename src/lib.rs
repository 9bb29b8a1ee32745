//! # generate-book
//!
//! Lays out a directory of Markdown documents as an mdBook source tree and
//! builds it. The filesystem is the table of contents: documents are chapters
//! in filename order, and a document `NAME.md` can carry sub-chapters in a
//! sibling directory `NAME/`.
//!
//! # Pipeline
//!
//! ```text
//! 1. Mirror   text/ + root docs  →  src/ (symbolic links, recreated every run)
//! 2. Index    text/              →  src/SUMMARY.md
//! 3. Build    src/               →  mdbook build
//! ```
//!
//! The staging tree `src/` is a derived artifact. It only holds links back to
//! the sources plus the generated index, so it can be deleted at any time and
//! switching branches never leaves stale chapters behind.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`config`] | Optional `generate-book.toml`: paths, preamble, builder command |
//! | [`layout`] | Resolved paths of one run, derived from root + config |
//! | [`mirror`] | Staging reset and idempotent link creation |
//! | [`index`] | Depth-first content walk producing `(depth, name, link)` entries |
//! | [`summary`] | Index document rendering and writing |
//! | [`book`] | Mirror + index + write as one staging run |
//! | [`builder`] | External builder invocation |
//! | [`output`] | CLI output formatting |

pub mod book;
pub mod builder;
pub mod config;
pub mod index;
pub mod layout;
pub mod mirror;
pub mod output;
pub mod summary;

#[cfg(test)]
pub(crate) mod test_helpers;
