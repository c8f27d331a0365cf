//! Completeness check across languages.

use std::collections::BTreeSet;

use crate::catalog::Entries;
use crate::error::ValidationError;

/// Report every key that lacks a translation for a language used anywhere
/// else in the catalog.
///
/// Diagnostics are ordered by key, then by language.
pub fn validate(entries: &Entries) -> Vec<ValidationError> {
    let languages: BTreeSet<String> = entries
        .values()
        .flat_map(|langs| langs.keys())
        .map(|language| language.to_lowercase())
        .collect();

    let mut errors = Vec::new();
    for (key, langs) in entries {
        for language in &languages {
            if !langs.contains_key(language) {
                errors.push(ValidationError::MissingTranslation {
                    language: language.clone(),
                    key: key.clone(),
                });
            }
        }
    }
    errors
}
