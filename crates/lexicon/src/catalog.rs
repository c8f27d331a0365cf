//! The loaded translation catalog and lookups against it.

use std::collections::BTreeMap;
use std::fmt::{Display, Formatter, Result as FmtResult};
use std::path::Path;
use std::process;
use std::sync::Arc;

use tracing::{debug, error};

use crate::error::{FormatterError, IncludeError, LoadError, ValidationError};
use crate::loader::{self, LoadOptions, Loaded};
use crate::printf::sprintf;
use crate::registry::LanguageRegistry;
use crate::types::{TranslationLines, Value};
use crate::validate::validate;

/// key -> language -> lines.
pub(crate) type Entries = BTreeMap<String, BTreeMap<String, TranslationLines>>;

/// A loaded set of translations.
///
/// The catalog owns the translations, the registry of languages with their
/// optional custom formatters, and the diagnostics produced while loading.
/// Lookups never fail: a missing key, language or variant resolves to the
/// placeholder `"(lang.key)"` so gaps stay visible without crashing.
///
/// A catalog is not internally synchronized. Attach formatters first, then
/// share it read-only.
///
/// # Example
///
/// ```
/// use lexicon::{Catalog, args};
///
/// let catalog = Catalog::load_str(
///     r#"
/// hello:
///   en: Hello
///   lv: Sveiki
/// plural.demo:
///   en: [One item, "%d items"]
/// "#,
///     ".",
/// )
/// .unwrap();
///
/// assert_eq!(catalog.get("en", "hello", &[]), "Hello");
/// assert_eq!(catalog.get("LV", "hello", &[]), "Sveiki");
/// assert_eq!(catalog.get("en", "plural.demo", &[]), "One item");
/// assert_eq!(catalog.get("en", "plural.demo", &args![5]), "5 items");
/// assert_eq!(catalog.get("en", "missing", &[]), "(en.missing)");
/// ```
#[derive(Debug, Default)]
pub struct Catalog {
    entries: Entries,
    languages: LanguageRegistry,
    errors: Vec<ValidationError>,
    include_errors: Vec<IncludeError>,
}

impl Catalog {
    // =========================================================================
    // Loading
    // =========================================================================

    /// Load a catalog file with default options.
    ///
    /// Only problems with `path` itself are returned as errors. Failing
    /// includes are skipped and listed in [`include_errors`](Self::include_errors);
    /// missing translations are listed in [`errors`](Self::errors).
    pub fn load(path: impl AsRef<Path>) -> Result<Catalog, LoadError> {
        Self::load_with(path, &LoadOptions::default())
    }

    /// Load a catalog file with explicit options.
    pub fn load_with(path: impl AsRef<Path>, options: &LoadOptions) -> Result<Catalog, LoadError> {
        let path = path.as_ref();
        let loaded = loader::load_file(path, options)?;
        let catalog = Self::from_loaded(loaded);
        debug!(
            path = %path.display(),
            keys = catalog.len(),
            languages = catalog.languages.len(),
            errors = catalog.errors.len(),
            "catalog loaded"
        );
        Ok(catalog)
    }

    /// Load a catalog from YAML text. Includes are resolved against `base_dir`.
    pub fn load_str(content: &str, base_dir: impl AsRef<Path>) -> Result<Catalog, LoadError> {
        Self::load_str_with(content, base_dir, &LoadOptions::default())
    }

    /// Load a catalog from YAML text with explicit options.
    pub fn load_str_with(
        content: &str,
        base_dir: impl AsRef<Path>,
        options: &LoadOptions,
    ) -> Result<Catalog, LoadError> {
        let loaded = loader::load_str(content, base_dir.as_ref(), options)?;
        Ok(Self::from_loaded(loaded))
    }

    /// Load a catalog file or terminate the process.
    ///
    /// For programs that cannot start without their translations. The error
    /// is logged and printed to stderr before exiting with status 1.
    pub fn load_or_abort(path: impl AsRef<Path>) -> Catalog {
        match Self::load(path) {
            Ok(catalog) => catalog,
            Err(err) => {
                error!(error = %err, "failed to load translation catalog");
                eprintln!("{err}");
                process::exit(1);
            }
        }
    }

    fn from_loaded(loaded: Loaded) -> Catalog {
        let Loaded {
            entries,
            include_errors,
        } = loaded;

        let mut languages = LanguageRegistry::new();
        for language in entries.values().flat_map(BTreeMap::keys) {
            languages.register(language);
        }

        let mut catalog = Catalog {
            entries,
            languages,
            errors: Vec::new(),
            include_errors,
        };
        catalog.validate();
        catalog
    }

    // =========================================================================
    // Diagnostics
    // =========================================================================

    /// Missing-translation diagnostics from the last validation.
    pub fn errors(&self) -> &[ValidationError] {
        &self.errors
    }

    /// Includes that were skipped during loading.
    pub fn include_errors(&self) -> &[IncludeError] {
        &self.include_errors
    }

    /// Recompute the missing-translation diagnostics, replacing the stored
    /// ones.
    pub fn validate(&mut self) -> &[ValidationError] {
        self.errors = validate(&self.entries);
        &self.errors
    }

    /// Human-readable summary: languages, key count and error count.
    pub fn describe(&self) -> String {
        self.to_string()
    }

    // =========================================================================
    // Contents
    // =========================================================================

    /// Number of keys.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if the catalog has no keys.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// All keys in sorted order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// All known language tags in sorted order.
    pub fn languages(&self) -> impl Iterator<Item = &str> {
        self.languages.languages()
    }

    /// Returns true if the key exists.
    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Raw translation lines for a key in a language.
    pub fn lines(&self, lang: &str, key: &str) -> Option<&TranslationLines> {
        self.entries.get(key)?.get(&lang.to_lowercase())
    }

    // =========================================================================
    // Lookup
    // =========================================================================

    /// Look up a translation, choosing singular or plural from the arguments.
    ///
    /// The plural variant is used when the entry has one and any argument is
    /// a number greater than one. Text arguments never select the plural.
    pub fn get(&self, lang: &str, key: &str, args: &[Value]) -> String {
        let lang = lang.to_lowercase();
        let has_plural = self
            .lines(&lang, key)
            .is_some_and(|lines| lines.len() > TranslationLines::MANY);
        let index = if has_plural && args.iter().any(Value::exceeds_one) {
            TranslationLines::MANY
        } else {
            TranslationLines::SINGLE
        };
        self.resolve(&lang, key, index, args)
    }

    /// Look up the singular variant regardless of the arguments.
    pub fn get_single(&self, lang: &str, key: &str, args: &[Value]) -> String {
        self.resolve(&lang.to_lowercase(), key, TranslationLines::SINGLE, args)
    }

    /// Look up the plural variant regardless of the arguments.
    ///
    /// Entries without a plural variant resolve to the placeholder, never to
    /// the singular text.
    pub fn get_plural(&self, lang: &str, key: &str, args: &[Value]) -> String {
        self.resolve(&lang.to_lowercase(), key, TranslationLines::MANY, args)
    }

    /// Resolve one variant. `lang` is already lowercased.
    fn resolve(&self, lang: &str, key: &str, index: usize, args: &[Value]) -> String {
        let Some(template) = self.lines(lang, key).and_then(|lines| lines.get(index)) else {
            debug!(lang, key, index, "translation missing");
            return placeholder(lang, key);
        };

        if let Some(formatter) = self.languages.formatter(lang) {
            return formatter(template, args);
        }
        if !args.is_empty() {
            return sprintf(template, args);
        }
        template.to_string()
    }

    // =========================================================================
    // Formatters
    // =========================================================================

    /// Attach a custom formatter to a language.
    ///
    /// From then on every lookup in that language hands the raw template and
    /// the arguments to `formatter` and returns its result unchanged, even
    /// when there are no arguments.
    ///
    /// # Example
    ///
    /// ```
    /// use lexicon::{Catalog, FormatterError, Value};
    ///
    /// let mut catalog = Catalog::load_str("hello:\n  en: Hello {0}\n", ".").unwrap();
    /// catalog
    ///     .set_formatter("en", |template: &str, args: &[Value]| {
    ///         args.iter()
    ///             .enumerate()
    ///             .fold(template.to_string(), |text, (i, arg)| {
    ///                 text.replace(&format!("{{{i}}}"), &arg.to_string())
    ///             })
    ///     })
    ///     .unwrap();
    /// assert_eq!(catalog.get("en", "hello", &["World".into()]), "Hello World");
    ///
    /// let err = catalog.set_formatter("de", |t: &str, _: &[Value]| t.to_string());
    /// assert!(matches!(err, Err(FormatterError::UnknownLanguage { .. })));
    /// ```
    pub fn set_formatter<F>(&mut self, lang: &str, formatter: F) -> Result<(), FormatterError>
    where
        F: Fn(&str, &[Value]) -> String + Send + Sync + 'static,
    {
        self.languages.set_formatter(lang, Arc::new(formatter))
    }

    /// Remove a language's custom formatter, restoring default substitution.
    pub fn clear_formatter(&mut self, lang: &str) -> Result<(), FormatterError> {
        self.languages.clear_formatter(lang)
    }

    /// Returns true if the language has a custom formatter.
    pub fn has_formatter(&self, lang: &str) -> bool {
        self.languages.formatter(lang).is_some()
    }
}

impl Display for Catalog {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        let rule = "-".repeat(10);
        let languages: Vec<&str> = self.languages().collect();
        writeln!(f, "{rule}")?;
        writeln!(
            f,
            "Languages:     {} [{}]",
            languages.len(),
            languages.join(", ")
        )?;
        writeln!(f, "Translations:  {}", self.entries.len())?;
        writeln!(f, "Errors:        {}", self.errors.len())?;
        if !self.include_errors.is_empty() {
            writeln!(f, "Includes failed: {}", self.include_errors.len())?;
        }
        writeln!(f, "{rule}")
    }
}

/// Text returned for any lookup that cannot be satisfied.
fn placeholder(lang: &str, key: &str) -> String {
    format!("({lang}.{key})")
}
