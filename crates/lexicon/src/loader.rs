//! Catalog loading: YAML decoding, includes and normalization.
//!
//! A catalog file maps keys to languages to translation lines:
//!
//! ```yaml
//! include:
//!   common: [common.yml]
//! hello:
//!   en: Hello
//!   LV: Sveiki
//! plural.demo:
//!   en: [One item, "%d items"]
//! Same text as the key:
//!   en: ^
//! ```
//!
//! Included files are loaded depth-first, in document order, and their keys
//! replace same-named keys of the including file. An include that fails is
//! logged and skipped; only the top-level file can fail a load.

use std::collections::BTreeMap;
use std::collections::btree_map::Entry;
use std::fs;
use std::path::{Path, PathBuf};

use bon::Builder;
use serde_yaml::{Mapping, Value as Yaml};
use tracing::{debug, warn};

use crate::catalog::Entries;
use crate::error::{IncludeError, LoadError};
use crate::types::{TranslationLines, scalar_text};

/// Reserved top-level key whose entries name files to merge in.
pub const INCLUDE_KEY: &str = "include";

/// A first variant equal to this token is replaced by the key itself.
pub const SELF_REFERENCE: &str = "^";

/// Default limit on nested includes.
pub const DEFAULT_MAX_INCLUDE_DEPTH: usize = 16;

/// Path shown in errors for catalogs loaded from a string.
const STRING_SOURCE: &str = "<string>";

/// Options controlling how catalogs are loaded.
///
/// # Example
///
/// ```
/// use lexicon::LoadOptions;
///
/// let options = LoadOptions::builder().max_include_depth(2).build();
/// assert_eq!(options.max_include_depth(), 2);
/// assert_eq!(LoadOptions::default().max_include_depth(), 16);
/// ```
#[derive(Debug, Clone, Builder)]
pub struct LoadOptions {
    /// How many levels of nested includes are followed. Zero disables
    /// includes entirely.
    #[builder(default = DEFAULT_MAX_INCLUDE_DEPTH)]
    max_include_depth: usize,
}

impl Default for LoadOptions {
    fn default() -> Self {
        LoadOptions::builder().build()
    }
}

impl LoadOptions {
    /// Maximum include nesting depth.
    pub fn max_include_depth(&self) -> usize {
        self.max_include_depth
    }
}

/// Result of a successful load, before validation.
pub(crate) struct Loaded {
    pub entries: Entries,
    pub include_errors: Vec<IncludeError>,
}

/// Load a catalog file and everything it includes.
pub(crate) fn load_file(path: &Path, options: &LoadOptions) -> Result<Loaded, LoadError> {
    let mut loader = Loader::new(options);
    let entries = loader.load_file(path)?;
    Ok(loader.finish(entries))
}

/// Load a catalog from YAML text, resolving includes against `base_dir`.
pub(crate) fn load_str(
    content: &str,
    base_dir: &Path,
    options: &LoadOptions,
) -> Result<Loaded, LoadError> {
    let mut loader = Loader::new(options);
    let entries = loader.load_document(content, Path::new(STRING_SOURCE), base_dir)?;
    Ok(loader.finish(entries))
}

/// Decoded document in source order: key -> [(language, lines)].
type Document = Vec<(String, Vec<(String, TranslationLines)>)>;

/// Depth-first include resolver.
struct Loader<'a> {
    options: &'a LoadOptions,
    /// Canonical paths of the files currently being loaded, outermost first.
    chain: Vec<PathBuf>,
    /// Include nesting level of the document being processed.
    depth: usize,
    include_errors: Vec<IncludeError>,
}

impl<'a> Loader<'a> {
    fn new(options: &'a LoadOptions) -> Self {
        Self {
            options,
            chain: Vec::new(),
            depth: 0,
            include_errors: Vec::new(),
        }
    }

    fn finish(self, entries: Entries) -> Loaded {
        Loaded {
            entries,
            include_errors: self.include_errors,
        }
    }

    fn load_file(&mut self, path: &Path) -> Result<Entries, LoadError> {
        let content = fs::read_to_string(path).map_err(|source| LoadError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        let base_dir = path.parent().unwrap_or_else(|| Path::new(""));
        self.chain.push(identity(path));
        let result = self.load_document(&content, path, base_dir);
        self.chain.pop();

        if let Ok(entries) = &result {
            debug!(path = %path.display(), keys = entries.len(), depth = self.depth, "loaded catalog file");
        }
        result
    }

    fn load_document(
        &mut self,
        content: &str,
        path: &Path,
        base_dir: &Path,
    ) -> Result<Entries, LoadError> {
        let document = parse_document(content, path)?;

        let mut entries = Entries::new();
        let mut includes = Vec::new();
        for (key, languages) in document {
            if key == INCLUDE_KEY {
                includes = languages;
            } else {
                let languages = normalize_languages(&key, languages);
                entries.insert(key, languages);
            }
        }

        for (name, lines) in includes {
            let Some(relative) = lines.single() else {
                debug!(include = %name, "include entry has no path, skipping");
                continue;
            };
            let target = base_dir.join(relative);
            match self.include(&target) {
                Ok(included) => entries.extend(included),
                Err(err) => {
                    warn!(from = %path.display(), error = %err, "include failed, skipping");
                    self.include_errors.push(err);
                }
            }
        }

        for (key, languages) in &mut entries {
            for lines in languages.values_mut() {
                lines.replace_leading(SELF_REFERENCE, key);
            }
        }

        Ok(entries)
    }

    fn include(&mut self, path: &Path) -> Result<Entries, IncludeError> {
        let id = identity(path);
        if self.chain.contains(&id) {
            let mut chain = self.chain.clone();
            chain.push(id);
            return Err(IncludeError::Cycle {
                path: path.to_path_buf(),
                chain,
            });
        }

        let max_depth = self.options.max_include_depth();
        if self.depth >= max_depth {
            return Err(IncludeError::DepthExceeded {
                path: path.to_path_buf(),
                max_depth,
            });
        }

        self.depth += 1;
        let result = self.load_file(path);
        self.depth -= 1;

        result.map_err(|source| IncludeError::Load {
            path: path.to_path_buf(),
            source: Box::new(source),
        })
    }
}

/// Stable identity for cycle detection; falls back to the path as given
/// when it cannot be canonicalized.
fn identity(path: &Path) -> PathBuf {
    fs::canonicalize(path).unwrap_or_else(|_| path.to_path_buf())
}

/// Lowercase language tags. When two tags of one key differ only by case,
/// the first in document order is kept.
fn normalize_languages(
    key: &str,
    languages: Vec<(String, TranslationLines)>,
) -> BTreeMap<String, TranslationLines> {
    let mut normalized = BTreeMap::new();
    for (language, lines) in languages {
        match normalized.entry(language.to_lowercase()) {
            Entry::Vacant(slot) => {
                slot.insert(lines);
            }
            Entry::Occupied(slot) => {
                debug!(key, dropped = %language, kept = %slot.key(), "duplicate language tag");
            }
        }
    }
    normalized
}

fn parse_document(content: &str, path: &Path) -> Result<Document, LoadError> {
    if content.trim().is_empty() {
        return Ok(Document::new());
    }

    let root: Yaml = serde_yaml::from_str(content).map_err(|source| LoadError::Syntax {
        path: path.to_path_buf(),
        source,
    })?;

    let mapping = match root {
        Yaml::Mapping(mapping) => mapping,
        Yaml::Null => return Ok(Document::new()),
        other => {
            return Err(shape_error(
                path,
                format!("expected a mapping of keys, found {}", kind(&other)),
            ));
        }
    };

    mapping
        .into_iter()
        .map(|(key, languages)| {
            let key = scalar_text(&key)
                .ok_or_else(|| shape_error(path, format!("unsupported key of type {}", kind(&key))))?;
            let languages = match languages {
                Yaml::Mapping(languages) => languages,
                Yaml::Null => Mapping::new(),
                other => {
                    return Err(shape_error(
                        path,
                        format!("'{key}' must map languages to translations, found {}", kind(&other)),
                    ));
                }
            };
            let languages = decode_languages(&key, languages, path)?;
            Ok((key, languages))
        })
        .collect()
}

fn decode_languages(
    key: &str,
    languages: Mapping,
    path: &Path,
) -> Result<Vec<(String, TranslationLines)>, LoadError> {
    languages
        .into_iter()
        .map(|(language, value)| {
            let language = scalar_text(&language).ok_or_else(|| {
                shape_error(
                    path,
                    format!("'{key}' has a language tag of type {}", kind(&language)),
                )
            })?;
            let lines = TranslationLines::decode(&value).map_err(|source| LoadError::Decode {
                path: path.to_path_buf(),
                key: key.to_string(),
                language: language.clone(),
                source,
            })?;
            Ok((language, lines))
        })
        .collect()
}

fn shape_error(path: &Path, message: String) -> LoadError {
    LoadError::Shape {
        path: path.to_path_buf(),
        message,
    }
}

fn kind(value: &Yaml) -> &'static str {
    match value {
        Yaml::Null => "null",
        Yaml::Bool(_) => "a boolean",
        Yaml::Number(_) => "a number",
        Yaml::String(_) => "a string",
        Yaml::Sequence(_) => "a list",
        Yaml::Mapping(_) => "a mapping",
        Yaml::Tagged(_) => "a tagged value",
    }
}
