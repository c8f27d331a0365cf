//! Error types for catalog loading, validation and formatter registration.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Errors that abort a catalog load.
///
/// Only the file being loaded directly can produce a `LoadError`. Failures
/// inside included files are downgraded to [`IncludeError`]s.
#[derive(Debug, Error)]
pub enum LoadError {
    /// File I/O error when reading the catalog file.
    #[error("failed to read '{path}': {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The file is not valid YAML.
    #[error("failed to parse '{path}': {source}")]
    Syntax {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    /// The YAML is valid but not shaped as `key -> language -> lines`.
    #[error("{path}: {message}")]
    Shape { path: PathBuf, message: String },

    /// A translation entry is neither a string nor a list of strings.
    #[error("{path}: invalid translation for '{key}' in '{language}': {source}")]
    Decode {
        path: PathBuf,
        key: String,
        language: String,
        #[source]
        source: DecodeError,
    },
}

/// A raw YAML value that cannot be turned into translation lines.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    /// The value is a mapping where a string or a list was expected.
    #[error("expected a string or a list of strings, found a mapping")]
    Mapping,

    /// A list element is not a scalar.
    #[error("list element {index} is not a string")]
    NonScalarElement { index: usize },

    /// The value carries an explicit YAML tag (`!tag value`).
    #[error("tagged values are not supported")]
    Tagged,
}

/// An included file that could not be merged into its parent catalog.
///
/// Include failures never abort the parent load: the include is skipped,
/// logged, and recorded on the catalog.
#[derive(Debug, Error)]
pub enum IncludeError {
    /// The included file failed to load.
    #[error("include '{path}' failed: {source}")]
    Load {
        path: PathBuf,
        #[source]
        source: Box<LoadError>,
    },

    /// The included file is already being loaded further up the chain.
    #[error("include '{path}' forms a cycle: {}", display_chain(chain))]
    Cycle { path: PathBuf, chain: Vec<PathBuf> },

    /// The include chain is deeper than the configured limit.
    #[error("include '{path}' exceeds the maximum include depth of {max_depth}")]
    DepthExceeded { path: PathBuf, max_depth: usize },
}

/// A completeness problem found by validation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A key lacks a translation for a language used elsewhere in the catalog.
    #[error("missing '{language}' translation for '{key}'")]
    MissingTranslation { language: String, key: String },
}

/// Errors from attaching a custom formatter to a language.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormatterError {
    /// The language never appeared in the loaded catalog.
    #[error("no such language '{language}' to attach a formatter to{}", display_suggestions(suggestions))]
    UnknownLanguage {
        language: String,
        suggestions: Vec<String>,
    },
}

fn display_chain(chain: &[PathBuf]) -> String {
    chain
        .iter()
        .map(|p| p.display().to_string())
        .collect::<Vec<_>>()
        .join(" -> ")
}

fn display_suggestions(suggestions: &[String]) -> String {
    if suggestions.is_empty() {
        String::new()
    } else {
        format!(" (did you mean: {}?)", suggestions.join(", "))
    }
}
