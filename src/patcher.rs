//! The text patcher: read an artifact, swap the first occurrence of a known
//! block, write it back.
//!
//! A run ends in one of two outcomes:
//! - [`PatchOutcome::Patched`] - the pattern was found and the artifact was
//!   overwritten once
//! - [`PatchOutcome::NotFound`] - the pattern is absent and nothing was written
//!
//! A missing pattern is not an error. Re-running after a successful patch
//! reports `NotFound`, which is how re-application shows up as a no-op.

use crate::edit::Edit;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// A named pair of pattern and replacement blocks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextPatch {
    pub name: String,
    pub pattern: String,
    pub replacement: String,
}

impl TextPatch {
    pub fn new(
        name: impl Into<String>,
        pattern: impl Into<String>,
        replacement: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            pattern: pattern.into(),
            replacement: replacement.into(),
        }
    }

    /// Apply this patch to `artifact`. See [`patch`].
    pub fn apply(&self, artifact: impl AsRef<Path>) -> Result<PatchOutcome, PatchError> {
        patch(artifact, &self.pattern, &self.replacement)
    }

    /// Compute the result without writing. See [`plan`].
    pub fn plan(&self, artifact: impl AsRef<Path>) -> Result<Plan, PatchError> {
        plan(artifact, &self.pattern, &self.replacement)
    }

    /// Classify the artifact without writing. See [`inspect`].
    pub fn inspect(&self, artifact: impl AsRef<Path>) -> Result<PatchStatus, PatchError> {
        inspect(artifact, &self.pattern, &self.replacement)
    }
}

/// Terminal outcome of a successful run.
#[derive(Debug, Clone, PartialEq, Eq)]
#[must_use = "PatchOutcome should be checked for patched/not-found"]
pub enum PatchOutcome {
    /// The first occurrence was replaced and the artifact rewritten
    Patched {
        file: PathBuf,
        /// Byte offset of the replaced span in the original content
        offset: usize,
        /// Size of the content written back
        bytes_written: usize,
        /// Pattern occurrences present before the write
        occurrences: usize,
    },
    /// The pattern block is absent; no write happened
    NotFound { file: PathBuf },
}

impl PatchOutcome {
    pub fn is_patched(&self) -> bool {
        matches!(self, PatchOutcome::Patched { .. })
    }

    pub fn file(&self) -> &Path {
        match self {
            PatchOutcome::Patched { file, .. } | PatchOutcome::NotFound { file } => file,
        }
    }
}

impl fmt::Display for PatchOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PatchOutcome::Patched { file, offset, .. } => {
                write!(f, "Patched {} at byte {}", file.display(), offset)
            }
            PatchOutcome::NotFound { file } => {
                write!(f, "Pattern not found in {}", file.display())
            }
        }
    }
}

/// Read-only classification of an artifact against a patch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PatchStatus {
    /// The pattern block is present; applying would rewrite the artifact
    Pending,
    /// The pattern block is gone and the replacement block is present (or empty)
    Applied,
    /// Neither block is present
    Missing,
}

impl fmt::Display for PatchStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            PatchStatus::Pending => "pending",
            PatchStatus::Applied => "applied",
            PatchStatus::Missing => "missing",
        };
        f.write_str(label)
    }
}

#[derive(Error, Debug)]
pub enum PatchError {
    #[error("cannot read {}: {source}", .path.display())]
    NotFound {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{} is not valid UTF-8: {source}", .path.display())]
    Encoding {
        path: PathBuf,
        #[source]
        source: std::str::Utf8Error,
    },

    #[error("cannot write {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("pattern block is empty")]
    EmptyPattern,
}

/// Result of an in-memory replacement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Replaced {
    pub content: String,
    /// Byte offset of the replaced occurrence
    pub offset: usize,
    /// Pattern occurrences in the input, including the replaced one
    pub occurrences: usize,
}

/// Original and would-be content of an artifact.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Plan {
    pub file: PathBuf,
    pub original: String,
    /// `None` when the pattern is absent
    pub patched: Option<String>,
}

/// Replace the first occurrence of `pattern` in `content`.
///
/// Returns `None` when `pattern` does not occur. An empty `pattern` never
/// matches.
pub fn apply_to_str(content: &str, pattern: &str, replacement: &str) -> Option<Replaced> {
    if pattern.is_empty() {
        return None;
    }

    let mut occurrences = content.match_indices(pattern);
    let (offset, _) = occurrences.next()?;
    let occurrences = 1 + occurrences.count();

    let edit = Edit::new(offset, offset + pattern.len(), replacement, pattern);
    let content = edit
        .splice(content)
        .expect("span from match_indices is in range, on char boundaries and equal to pattern");

    Some(Replaced {
        content,
        offset,
        occurrences,
    })
}

/// Replace the first occurrence of `pattern` in the artifact at `artifact`.
///
/// The artifact is read fully as UTF-8. When the pattern is present the new
/// content overwrites the artifact in a single write. No temporary file or
/// backup is created.
pub fn patch(
    artifact: impl AsRef<Path>,
    pattern: &str,
    replacement: &str,
) -> Result<PatchOutcome, PatchError> {
    let path = artifact.as_ref();
    let content = read_artifact(path, pattern)?;

    let Some(replaced) = apply_to_str(&content, pattern, replacement) else {
        tracing::debug!(file = %path.display(), "pattern absent, skipping write");
        return Ok(PatchOutcome::NotFound {
            file: path.to_path_buf(),
        });
    };

    if replaced.occurrences > 1 {
        tracing::warn!(
            file = %path.display(),
            occurrences = replaced.occurrences,
            "pattern occurs more than once, replacing the first occurrence only"
        );
    }

    fs::write(path, replaced.content.as_bytes()).map_err(|source| PatchError::Write {
        path: path.to_path_buf(),
        source,
    })?;
    tracing::debug!(
        file = %path.display(),
        offset = replaced.offset,
        bytes = replaced.content.len(),
        "artifact rewritten"
    );

    Ok(PatchOutcome::Patched {
        file: path.to_path_buf(),
        offset: replaced.offset,
        bytes_written: replaced.content.len(),
        occurrences: replaced.occurrences,
    })
}

/// Compute what [`patch`] would write, without writing.
pub fn plan(
    artifact: impl AsRef<Path>,
    pattern: &str,
    replacement: &str,
) -> Result<Plan, PatchError> {
    let path = artifact.as_ref();
    let original = read_artifact(path, pattern)?;
    let patched = apply_to_str(&original, pattern, replacement).map(|r| r.content);

    Ok(Plan {
        file: path.to_path_buf(),
        original,
        patched,
    })
}

/// Classify the artifact as pending, applied or missing.
pub fn inspect(
    artifact: impl AsRef<Path>,
    pattern: &str,
    replacement: &str,
) -> Result<PatchStatus, PatchError> {
    let path = artifact.as_ref();
    let content = read_artifact(path, pattern)?;

    let status = if content.contains(pattern) {
        PatchStatus::Pending
    } else if replacement.is_empty() || content.contains(replacement) {
        // An empty replacement is a deletion, present in any content.
        PatchStatus::Applied
    } else {
        PatchStatus::Missing
    };
    tracing::debug!(file = %path.display(), %status, "inspected artifact");
    Ok(status)
}

fn read_artifact(path: &Path, pattern: &str) -> Result<String, PatchError> {
    if pattern.is_empty() {
        return Err(PatchError::EmptyPattern);
    }

    let bytes = fs::read(path).map_err(|source| PatchError::NotFound {
        path: path.to_path_buf(),
        source,
    })?;
    tracing::debug!(file = %path.display(), bytes = bytes.len(), "read artifact");

    String::from_utf8(bytes).map_err(|e| PatchError::Encoding {
        path: path.to_path_buf(),
        source: e.utf8_error(),
    })
}
