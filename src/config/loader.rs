//! Reading `[meta]` + `[patch]` definitions from TOML.

use crate::config::schema::{PatchFile, ValidationError};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Where a definition's text came from, for error messages.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Origin {
    Inline,
    File(PathBuf),
}

impl fmt::Display for Origin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Origin::Inline => f.write_str("<inline definition>"),
            Origin::File(path) => write!(f, "{}", path.display()),
        }
    }
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("cannot open patch definition {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{origin}: not a patch definition: {source}")]
    Toml {
        origin: Origin,
        #[source]
        source: toml_edit::de::Error,
    },

    #[error("{origin}: patch '{name}' rejected: {source}")]
    Validation {
        origin: Origin,
        name: String,
        #[source]
        source: ValidationError,
    },
}

fn parse(input: &str, origin: Origin) -> Result<PatchFile, ConfigError> {
    let definition: PatchFile = match toml_edit::de::from_str(input) {
        Ok(definition) => definition,
        Err(source) => return Err(ConfigError::Toml { origin, source }),
    };

    if let Err(source) = definition.validate() {
        return Err(ConfigError::Validation {
            name: definition.display_name(),
            origin,
            source,
        });
    }
    Ok(definition)
}

/// Parse and validate a definition held in memory.
pub fn load_from_str(input: &str) -> Result<PatchFile, ConfigError> {
    parse(input, Origin::Inline)
}

/// Read, parse and validate the definition at `path`.
pub fn load_from_path(path: impl AsRef<Path>) -> Result<PatchFile, ConfigError> {
    let path = path.as_ref();
    let input = fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let definition = parse(&input, Origin::File(path.to_path_buf()))?;
    tracing::debug!(
        path = %path.display(),
        patch = %definition.display_name(),
        "loaded patch definition"
    );
    Ok(definition)
}
