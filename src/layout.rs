//! Resolved paths for one generation run.
//!
//! A [`Layout`] pairs a project root with its [`BookConfig`], so every stage
//! takes its locations as parameters instead of relying on the process's
//! working directory. Tests point it at a temp directory.

use crate::config::BookConfig;
use std::path::{Path, PathBuf};

/// An auxiliary document linked into the staging root.
#[derive(Debug, Clone, PartialEq)]
pub struct AuxiliaryLink {
    /// Link name inside the staging tree.
    pub name: String,
    /// Source path relative to the project root.
    pub source: PathBuf,
}

#[derive(Debug, Clone)]
pub struct Layout {
    pub root: PathBuf,
    pub config: BookConfig,
}

impl Layout {
    pub fn new(root: impl Into<PathBuf>, config: BookConfig) -> Self {
        Self {
            root: root.into(),
            config,
        }
    }

    pub fn content_root(&self) -> PathBuf {
        self.root.join(&self.config.content_dir)
    }

    pub fn staging_root(&self) -> PathBuf {
        self.root.join(&self.config.staging_dir)
    }

    pub fn summary_path(&self) -> PathBuf {
        self.staging_root().join(&self.config.summary_file)
    }

    /// Relative prefix leading from the staging directory back to the project root.
    ///
    /// One `..` per component: `src` → `..`, `build/src` → `../..`.
    pub fn up_to_root(&self) -> PathBuf {
        Path::new(&self.config.staging_dir)
            .components()
            .map(|_| Path::new(".."))
            .collect()
    }

    /// Link target for a content entry, as seen from the staging directory.
    pub fn content_target(&self, name: impl AsRef<Path>) -> PathBuf {
        self.up_to_root()
            .join(&self.config.content_dir)
            .join(name)
    }

    /// Guideline documents followed by the introduction mapping, in link order.
    pub fn auxiliary_links(&self) -> Vec<AuxiliaryLink> {
        let mut links: Vec<AuxiliaryLink> = self
            .config
            .guidelines
            .iter()
            .map(|g| AuxiliaryLink {
                name: g.file.clone(),
                source: PathBuf::from(&g.file),
            })
            .collect();
        links.push(AuxiliaryLink {
            name: self.config.introduction.link.clone(),
            source: PathBuf::from(&self.config.introduction.source),
        });
        links
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_paths() {
        let layout = Layout::new("/book", BookConfig::default());
        assert_eq!(layout.content_root(), PathBuf::from("/book/text"));
        assert_eq!(layout.staging_root(), PathBuf::from("/book/src"));
        assert_eq!(layout.summary_path(), PathBuf::from("/book/src/SUMMARY.md"));
    }

    #[test]
    fn content_target_climbs_one_level() {
        let layout = Layout::new("/book", BookConfig::default());
        assert_eq!(
            layout.content_target("0001-foo.md"),
            PathBuf::from("../text/0001-foo.md")
        );
    }

    #[test]
    fn content_target_for_nested_staging() {
        let config = BookConfig {
            staging_dir: "build/src".to_string(),
            ..BookConfig::default()
        };
        let layout = Layout::new("/book", config);
        assert_eq!(layout.up_to_root(), PathBuf::from("../.."));
        assert_eq!(
            layout.content_target("0001-foo.md"),
            PathBuf::from("../../text/0001-foo.md")
        );
    }

    #[test]
    fn auxiliary_links_end_with_introduction() {
        let layout = Layout::new("/book", BookConfig::default());
        let names: Vec<String> = layout
            .auxiliary_links()
            .into_iter()
            .map(|l| l.name)
            .collect();
        assert_eq!(
            names,
            vec![
                "compiler_changes.md",
                "lang_changes.md",
                "libs_changes.md",
                "introduction.md"
            ]
        );

        let intro = layout.auxiliary_links().pop().unwrap();
        assert_eq!(intro.source, PathBuf::from("README.md"));
    }
}
