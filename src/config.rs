//! Book layout configuration.
//!
//! Everything the generator needs to know about the project lives in an
//! optional `generate-book.toml` at the project root. With no file present the
//! stock defaults describe the classic RFC book layout:
//!
//! ```text
//! project/
//! ├── generate-book.toml       # Optional, overrides the defaults below
//! ├── README.md                # → src/introduction.md
//! ├── compiler_changes.md      # → src/compiler_changes.md
//! ├── lang_changes.md          # → src/lang_changes.md
//! ├── libs_changes.md          # → src/libs_changes.md
//! ├── text/                    # Content tree (read-only input)
//! │   ├── 0001-private-items.md
//! │   ├── 3446-store.md
//! │   └── 3446-store/          # Sub-chapters of 3446-store.md
//! │       └── motivation.md
//! └── src/                     # Staging tree (recreated on every run)
//! ```
//!
//! ## Configuration Options
//!
//! ```toml
//! content_dir = "text"
//! staging_dir = "src"
//! summary_file = "SUMMARY.md"
//! indent_width = 4
//! builder = ["mdbook", "build"]
//!
//! [introduction]
//! title = "Introduction"
//! source = "README.md"
//! link = "introduction.md"
//!
//! [[guidelines]]
//! title = "Guidelines for compiler changes"
//! file = "compiler_changes.md"
//! ```
//!
//! Unknown keys are rejected to catch typos early.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Component, Path};
use thiserror::Error;

/// Name of the optional config file in the project root.
pub const CONFIG_FILE: &str = "generate-book.toml";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("TOML serialize error: {0}")]
    Serialize(#[from] toml::ser::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Layout configuration loaded from `generate-book.toml`.
///
/// All fields have defaults; a config file only needs the keys it changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BookConfig {
    /// Content tree, relative to the project root.
    pub content_dir: String,
    /// Staging tree, relative to the project root. Deleted on every run.
    pub staging_dir: String,
    /// Index document written inside the staging tree.
    pub summary_file: String,
    /// Spaces per nesting level in the index document.
    pub indent_width: usize,
    /// External builder, program followed by its arguments.
    pub builder: Vec<String>,
    pub introduction: IntroductionConfig,
    /// Fixed guideline chapters listed after the introduction.
    pub guidelines: Vec<GuidelineConfig>,
}

impl Default for BookConfig {
    fn default() -> Self {
        Self {
            content_dir: "text".to_string(),
            staging_dir: "src".to_string(),
            summary_file: "SUMMARY.md".to_string(),
            indent_width: 4,
            builder: vec!["mdbook".to_string(), "build".to_string()],
            introduction: IntroductionConfig::default(),
            guidelines: vec![
                GuidelineConfig::new("Guidelines for compiler changes", "compiler_changes.md"),
                GuidelineConfig::new("Guidelines for language changes", "lang_changes.md"),
                GuidelineConfig::new("Guidelines for library changes", "libs_changes.md"),
            ],
        }
    }
}

/// The introduction chapter: a root document linked under a different name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct IntroductionConfig {
    /// Link text in the index header.
    pub title: String,
    /// Source document, relative to the project root.
    pub source: String,
    /// Link name inside the staging tree.
    pub link: String,
}

impl Default for IntroductionConfig {
    fn default() -> Self {
        Self {
            title: "Introduction".to_string(),
            source: "README.md".to_string(),
            link: "introduction.md".to_string(),
        }
    }
}

/// A guideline chapter. The file is linked into the staging tree under its own name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GuidelineConfig {
    pub title: String,
    pub file: String,
}

impl GuidelineConfig {
    pub fn new(title: &str, file: &str) -> Self {
        Self {
            title: title.to_string(),
            file: file.to_string(),
        }
    }
}

impl BookConfig {
    /// Validate paths and values.
    ///
    /// The staging tree is removed recursively on every run, so it must stay
    /// strictly inside the project root and disjoint from the content tree.
    pub fn validate(&self) -> Result<(), ConfigError> {
        check_relative("content_dir", &self.content_dir)?;
        check_relative("staging_dir", &self.staging_dir)?;
        let content = Path::new(&self.content_dir);
        let staging = Path::new(&self.staging_dir);
        if content.starts_with(staging) || staging.starts_with(content) {
            return Err(ConfigError::Validation(format!(
                "content_dir ({}) and staging_dir ({}) must not contain one another",
                self.content_dir, self.staging_dir
            )));
        }

        check_file_name("summary_file", &self.summary_file)?;
        check_relative("introduction.source", &self.introduction.source)?;
        check_file_name("introduction.link", &self.introduction.link)?;
        for guideline in &self.guidelines {
            check_file_name("guidelines.file", &guideline.file)?;
        }
        let root_documents = std::iter::once(("introduction.source", &self.introduction.source))
            .chain(self.guidelines.iter().map(|g| ("guidelines.file", &g.file)));
        for (key, document) in root_documents {
            let document = Path::new(document);
            if document.starts_with(staging) || staging.starts_with(document) {
                return Err(ConfigError::Validation(format!(
                    "staging_dir ({}) overlaps {key} ({})",
                    self.staging_dir,
                    document.display()
                )));
            }
        }

        if self.indent_width == 0 {
            return Err(ConfigError::Validation(
                "indent_width must be at least 1".into(),
            ));
        }
        if self.builder.first().is_none_or(|program| program.is_empty()) {
            return Err(ConfigError::Validation(
                "builder must name a program".into(),
            ));
        }
        Ok(())
    }

    /// Apply command-line overrides on top of the loaded values and revalidate.
    pub fn with_overrides(
        mut self,
        content_dir: Option<&str>,
        staging_dir: Option<&str>,
    ) -> Result<Self, ConfigError> {
        if let Some(dir) = content_dir {
            self.content_dir = dir.to_string();
        }
        if let Some(dir) = staging_dir {
            self.staging_dir = dir.to_string();
        }
        self.validate()?;
        Ok(self)
    }
}

fn check_relative(key: &str, value: &str) -> Result<(), ConfigError> {
    let path = Path::new(value);
    let normal = path.components().all(|c| matches!(c, Component::Normal(_)));
    if value.is_empty() || !normal {
        return Err(ConfigError::Validation(format!(
            "{key} must be a relative path without `.` or `..` components, got {value:?}"
        )));
    }
    Ok(())
}

fn check_file_name(key: &str, value: &str) -> Result<(), ConfigError> {
    check_relative(key, value)?;
    if Path::new(value).components().count() != 1 {
        return Err(ConfigError::Validation(format!(
            "{key} must be a plain file name, got {value:?}"
        )));
    }
    Ok(())
}

// =============================================================================
// Config loading, merging, and validation
// =============================================================================

/// Returns the stock defaults as a `toml::Value::Table`, the base layer that
/// a config file is merged onto.
pub fn stock_defaults_value() -> Result<toml::Value, ConfigError> {
    Ok(toml::Value::try_from(BookConfig::default())?)
}

/// Recursively merge `overlay` on top of `base`.
///
/// - Tables are merged key-by-key (overlay keys override base keys).
/// - Non-table values in overlay replace base values entirely, so a
///   `[[guidelines]]` list replaces the stock list.
/// - Keys in base that are not in overlay are preserved.
pub fn merge_toml(base: toml::Value, overlay: toml::Value) -> toml::Value {
    match (base, overlay) {
        (toml::Value::Table(mut base_table), toml::Value::Table(overlay_table)) => {
            for (key, overlay_val) in overlay_table {
                let merged = match base_table.remove(&key) {
                    Some(base_val) => merge_toml(base_val, overlay_val),
                    None => overlay_val,
                };
                base_table.insert(key, merged);
            }
            toml::Value::Table(base_table)
        }
        (_, overlay) => overlay,
    }
}

/// Load `generate-book.toml` from the project root as a raw TOML value.
///
/// Returns `Ok(None)` when the file is absent and `Err` when it is not
/// valid TOML.
pub fn load_raw_config(root: &Path) -> Result<Option<toml::Value>, ConfigError> {
    let config_path = root.join(CONFIG_FILE);
    if !config_path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(&config_path)?;
    let value: toml::Value = toml::from_str(&content)?;
    Ok(Some(value))
}

/// Merge an optional overlay onto a base value, then deserialize and validate.
///
/// Unknown keys survive the merge and are rejected on deserialization.
pub fn resolve_config(
    base: toml::Value,
    overlay: Option<toml::Value>,
) -> Result<BookConfig, ConfigError> {
    let merged = match overlay {
        Some(ov) => merge_toml(base, ov),
        None => base,
    };
    let config: BookConfig = merged.try_into()?;
    config.validate()?;
    Ok(config)
}

/// Load config from `generate-book.toml` in the project root.
///
/// Merges user values on top of stock defaults, rejects unknown keys,
/// and validates the result.
pub fn load_config(root: &Path) -> Result<BookConfig, ConfigError> {
    let base = stock_defaults_value()?;
    let overlay = load_raw_config(root)?;
    resolve_config(base, overlay)
}

/// Returns a fully-commented stock `generate-book.toml`.
///
/// Used by the `gen-config` CLI command.
pub fn stock_config_toml() -> &'static str {
    r##"# generate-book configuration
# ===========================
#
# Every key is optional. Omitted keys keep the values shown here.

# Directory of Markdown documents, relative to the project root.
# A document `NAME.md` may have sub-chapters in a sibling directory `NAME/`.
content_dir = "text"

# Directory handed to the builder. It is deleted and recreated on every run,
# so never point it at anything you want to keep.
staging_dir = "src"

# Index document written inside the staging directory.
summary_file = "SUMMARY.md"

# Spaces per nesting level in the index document.
indent_width = 4

# External builder run from the project root once staging is done.
builder = ["mdbook", "build"]

# Root document shown first, linked into staging under a different name.
[introduction]
title = "Introduction"
source = "README.md"
link = "introduction.md"

# Fixed chapters listed right after the introduction. Each file lives in the
# project root and is linked into staging under the same name.
[[guidelines]]
title = "Guidelines for compiler changes"
file = "compiler_changes.md"

[[guidelines]]
title = "Guidelines for language changes"
file = "lang_changes.md"

[[guidelines]]
title = "Guidelines for library changes"
file = "libs_changes.md"
"##
}
