// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! PR template store and recommender
//!
//! Templates are markdown files in a single directory. Listing returns the
//! labelled stock templates first, in table order, followed by any other
//! `*.md` files found on disk (labelled by file stem, sorted by filename).

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

/// Stock templates and their human labels, in listing order
pub const TEMPLATE_LABELS: &[(&str, &str)] = &[
    ("bug.md", "Bug Fix"),
    ("feature.md", "Feature"),
    ("docs.md", "Documentation"),
    ("refactor.md", "Refactor"),
    ("test.md", "Test"),
    ("performance.md", "Performance"),
    ("security.md", "Security"),
];

/// Change-type synonyms and the template each maps to
pub const CHANGE_TYPES: &[(&str, &str)] = &[
    ("bug", "bug.md"),
    ("fix", "bug.md"),
    ("feature", "feature.md"),
    ("enhancement", "feature.md"),
    ("docs", "docs.md"),
    ("documentation", "docs.md"),
    ("refactor", "refactor.md"),
    ("cleanup", "refactor.md"),
    ("test", "test.md"),
    ("testing", "test.md"),
    ("performance", "performance.md"),
    ("optimization", "performance.md"),
    ("security", "security.md"),
];

/// Template recommended when the change type is not recognised
pub const DEFAULT_TEMPLATE: &str = "feature.md";

const USAGE_HINT: &str =
    "Claude can help you fill out this template based on the specific changes in your PR.";

/// Template store errors
#[derive(Debug, Error)]
pub enum TemplateError {
    /// A template file or the directory could not be read
    #[error("Failed to read templates from {path}: {source}")]
    Io {
        /// Path being read
        path: PathBuf,
        /// Underlying I/O error
        source: std::io::Error,
    },

    /// The directory holds no templates at all
    #[error("No PR templates found in {0}")]
    Empty(PathBuf),
}

/// A PR template read from disk
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Template {
    /// File name, unique within the store
    pub filename: String,
    /// Human label (file stem for unlabelled files)
    #[serde(rename = "type")]
    pub label: String,
    /// Markdown content
    pub content: String,
}

/// A template suggestion for a described change
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recommendation {
    /// The selected template
    pub recommended_template: Template,
    /// One-line justification echoing the caller's analysis
    pub reasoning: String,
    /// Content of the selected template
    pub template_content: String,
    /// What to do next with the template
    pub usage_hint: String,
    /// Why the fallback template was chosen, if it was
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// Every template, for manual selection after a fallback
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub templates: Option<Vec<Template>>,
}

/// Map a free-text change type to a template filename
#[must_use]
pub fn template_for_change_type(change_type: &str) -> Option<&'static str> {
    let key = change_type.trim().to_lowercase();
    CHANGE_TYPES
        .iter()
        .find(|(synonym, _)| *synonym == key)
        .map(|(_, file)| *file)
}

/// Human label for a template filename
#[must_use]
pub fn label_for(filename: &str) -> Option<&'static str> {
    TEMPLATE_LABELS
        .iter()
        .find(|(file, _)| *file == filename)
        .map(|(_, label)| *label)
}

/// Read-only view of a template directory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateStore {
    dir: PathBuf,
}

impl TemplateStore {
    /// Create a store over `dir`
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Get the template directory
    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn read(&self, filename: &str) -> Result<Template, TemplateError> {
        let path = self.dir.join(filename);
        let content =
            std::fs::read_to_string(&path).map_err(|source| TemplateError::Io { path, source })?;
        let label = label_for(filename).map_or_else(
            || {
                Path::new(filename)
                    .file_stem()
                    .map_or_else(|| filename.to_string(), |s| s.to_string_lossy().into_owned())
            },
            str::to_string,
        );
        Ok(Template {
            filename: filename.to_string(),
            label,
            content,
        })
    }

    /// Read one template by filename, `None` if it is not on disk
    ///
    /// # Errors
    ///
    /// Returns `TemplateError::Io` if the file exists but cannot be read.
    pub fn get(&self, filename: &str) -> Result<Option<Template>, TemplateError> {
        if !self.dir.join(filename).is_file() {
            return Ok(None);
        }
        self.read(filename).map(Some)
    }

    /// Markdown files on disk that are not in the label table, sorted
    fn unlabelled_files(&self) -> Result<Vec<String>, TemplateError> {
        let entries = std::fs::read_dir(&self.dir).map_err(|source| TemplateError::Io {
            path: self.dir.clone(),
            source,
        })?;

        let mut extra = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|source| TemplateError::Io {
                path: self.dir.clone(),
                source,
            })?;
            let path = entry.path();
            if !path.is_file() || path.extension().is_none_or(|ext| ext != "md") {
                continue;
            }
            let name = entry.file_name().to_string_lossy().into_owned();
            if label_for(&name).is_none() {
                extra.push(name);
            }
        }
        extra.sort();
        Ok(extra)
    }

    /// List every template in the store
    ///
    /// Labelled templates missing from disk are skipped with a warning.
    ///
    /// # Errors
    ///
    /// Returns `TemplateError::Io` if the directory or a file cannot be read,
    /// and `TemplateError::Empty` if no templates are found.
    pub fn list(&self) -> Result<Vec<Template>, TemplateError> {
        let mut templates = Vec::new();

        for (filename, _) in TEMPLATE_LABELS {
            match self.get(filename)? {
                Some(template) => templates.push(template),
                None => warn!(
                    template = *filename,
                    dir = %self.dir.display(),
                    "Stock template missing from template directory"
                ),
            }
        }

        for filename in self.unlabelled_files()? {
            templates.push(self.read(&filename)?);
        }

        if templates.is_empty() {
            return Err(TemplateError::Empty(self.dir.clone()));
        }

        debug!(count = templates.len(), "Listed PR templates");
        Ok(templates)
    }

    /// Recommend a template for a described change
    ///
    /// A recognised change type selects its mapped template. Otherwise the
    /// default template is returned with an explanatory `error` and the full
    /// template listing.
    ///
    /// # Errors
    ///
    /// Returns `TemplateError` if the templates cannot be listed.
    pub fn recommend(
        &self,
        changes_summary: &str,
        change_type: &str,
    ) -> Result<Recommendation, TemplateError> {
        let templates = self.list()?;
        let reasoning = format!(
            "Based on your analysis: '{changes_summary}', this appears to be a {change_type} change."
        );

        let find = |filename: &str| templates.iter().find(|t| t.filename == filename).cloned();

        let (selected, error) = match template_for_change_type(change_type) {
            Some(filename) => match find(filename) {
                Some(template) => (template, None),
                None => (
                    fallback(&templates, find(DEFAULT_TEMPLATE)),
                    Some(format!(
                        "Template '{filename}' not found in {}. Returning all templates.",
                        self.dir.display()
                    )),
                ),
            },
            None => (
                fallback(&templates, find(DEFAULT_TEMPLATE)),
                Some(format!(
                    "Unknown change_type '{change_type}'. Returning all templates."
                )),
            ),
        };

        debug!(
            change_type,
            template = %selected.filename,
            fallback = error.is_some(),
            "Recommended PR template"
        );

        Ok(Recommendation {
            template_content: selected.content.clone(),
            recommended_template: selected,
            reasoning,
            usage_hint: USAGE_HINT.to_string(),
            templates: error.as_ref().map(|_| templates.clone()),
            error,
        })
    }
}

/// The default template if present, otherwise the first listed one
fn fallback(templates: &[Template], default: Option<Template>) -> Template {
    default.unwrap_or_else(|| templates[0].clone())
}
