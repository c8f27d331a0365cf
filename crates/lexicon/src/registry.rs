//! Per-language formatter registry.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use strsim::levenshtein;

use crate::error::FormatterError;
use crate::types::Value;

/// Most "did you mean" candidates offered for an unknown language.
const MAX_SUGGESTIONS: usize = 3;

/// Custom formatting function for one language.
///
/// Receives the raw template selected for the lookup and all lookup
/// arguments, and returns the final text. It fully replaces the default
/// printf-style substitution, including for lookups without arguments.
pub type FormatFn = Arc<dyn Fn(&str, &[Value]) -> String + Send + Sync>;

/// Registry of languages seen in a catalog and their optional formatters.
///
/// A language becomes known as soon as any key declares a translation for
/// it. Formatters can only be attached to known languages.
///
/// Not synchronized: attach formatters before sharing the catalog.
#[derive(Clone, Default)]
pub struct LanguageRegistry {
    languages: BTreeMap<String, Option<FormatFn>>,
}

impl LanguageRegistry {
    /// Create a new empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a language without a formatter. Existing entries are kept.
    pub fn register(&mut self, language: &str) {
        self.languages
            .entry(language.to_lowercase())
            .or_insert(None);
    }

    /// Returns true if the language has been registered.
    pub fn contains(&self, language: &str) -> bool {
        self.languages.contains_key(&language.to_lowercase())
    }

    /// Attach a formatter to a known language, replacing any previous one.
    pub fn set_formatter(&mut self, language: &str, formatter: FormatFn) -> Result<(), FormatterError> {
        let slot = self.slot_mut(language)?;
        *slot = Some(formatter);
        Ok(())
    }

    /// Detach the formatter from a known language.
    pub fn clear_formatter(&mut self, language: &str) -> Result<(), FormatterError> {
        let slot = self.slot_mut(language)?;
        *slot = None;
        Ok(())
    }

    /// The formatter attached to a language, if any.
    pub fn formatter(&self, language: &str) -> Option<&FormatFn> {
        self.languages
            .get(&language.to_lowercase())
            .and_then(Option::as_ref)
    }

    /// Known language tags in sorted order.
    pub fn languages(&self) -> impl Iterator<Item = &str> {
        self.languages.keys().map(String::as_str)
    }

    /// Number of known languages.
    pub fn len(&self) -> usize {
        self.languages.len()
    }

    /// Returns true if no language is known.
    pub fn is_empty(&self) -> bool {
        self.languages.is_empty()
    }

    fn slot_mut(&mut self, language: &str) -> Result<&mut Option<FormatFn>, FormatterError> {
        let language = language.to_lowercase();
        if !self.languages.contains_key(&language) {
            let suggestions = self.similar_languages(&language);
            return Err(FormatterError::UnknownLanguage {
                language,
                suggestions,
            });
        }
        Ok(self.languages.entry(language).or_insert(None))
    }

    /// Known tags within a small edit distance of `language`, closest
    /// first. Short tags allow one edit, longer ones two.
    fn similar_languages(&self, language: &str) -> Vec<String> {
        let max_distance = if language.chars().count() <= 3 { 1 } else { 2 };
        let mut candidates: Vec<(usize, &String)> = self
            .languages
            .keys()
            .map(|known| (levenshtein(language, known), known))
            .filter(|(distance, _)| (1..=max_distance).contains(distance))
            .collect();
        // Stable, so equally close tags stay alphabetical.
        candidates.sort_by_key(|(distance, _)| *distance);
        candidates
            .into_iter()
            .take(MAX_SUGGESTIONS)
            .map(|(_, known)| known.clone())
            .collect()
    }
}

impl fmt::Debug for LanguageRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map()
            .entries(
                self.languages
                    .iter()
                    .map(|(language, formatter)| (language, formatter.is_some())),
            )
            .finish()
    }
}
