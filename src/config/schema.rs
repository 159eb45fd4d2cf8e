use crate::patcher::TextPatch;
use serde::Deserialize;
use std::fmt;
use std::path::{Path, PathBuf};

#[derive(Debug, Deserialize, Clone)]
pub struct PatchFile {
    #[serde(default)]
    pub meta: Metadata,
    pub patch: PatchDefinition,
}

impl PatchFile {
    pub fn validate(&self) -> Result<(), ValidationError> {
        let mut issues = Vec::new();
        let patch = &self.patch;

        if patch.file.trim().is_empty() {
            issues.push(ValidationIssue::MissingField { field: "patch.file" });
        }
        if patch.search.is_empty() {
            issues.push(ValidationIssue::MissingField {
                field: "patch.search",
            });
        }
        // The replacement must not re-introduce the search text, or every
        // run would patch again instead of reporting not found.
        if !patch.search.is_empty() && patch.replace.contains(&patch.search) {
            issues.push(ValidationIssue::InvalidCombo {
                message: "replace contains the search text".to_string(),
            });
        }

        if issues.is_empty() {
            Ok(())
        } else {
            Err(ValidationError { issues })
        }
    }

    /// Name shown in status lines: `meta.name`, falling back to the target file.
    pub fn display_name(&self) -> String {
        if self.meta.name.trim().is_empty() {
            self.patch.file.clone()
        } else {
            self.meta.name.clone()
        }
    }

    pub fn to_text_patch(&self) -> TextPatch {
        TextPatch::new(
            self.display_name(),
            self.patch.search.clone(),
            self.patch.replace.clone(),
        )
    }

    /// Resolve the target file against `base` when it is relative.
    pub fn target(&self, base: &Path) -> PathBuf {
        let file = Path::new(&self.patch.file);
        if file.is_absolute() {
            file.to_path_buf()
        } else {
            base.join(file)
        }
    }
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct Metadata {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct PatchDefinition {
    pub file: String,
    /// The exact text to search for
    pub search: String,
    /// Text substituted for the first occurrence of `search`
    pub replace: String,
}

#[derive(Debug, Clone)]
pub struct ValidationError {
    pub issues: Vec<ValidationIssue>,
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (idx, issue) in self.issues.iter().enumerate() {
            if idx > 0 {
                writeln!(f)?;
            }
            write!(f, "{issue}")?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationError {}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationIssue {
    MissingField { field: &'static str },
    InvalidCombo { message: String },
}

impl fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationIssue::MissingField { field } => {
                write!(f, "patch missing required field '{field}'")
            }
            ValidationIssue::InvalidCombo { message } => {
                write!(f, "invalid patch configuration: {message}")
            }
        }
    }
}
