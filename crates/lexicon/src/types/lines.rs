use serde::de::Error as _;
use serde::{Deserialize, Deserializer};
use serde_yaml::Value as Yaml;

use crate::error::DecodeError;

/// Ordered text variants for one (key, language) pair.
///
/// Index [`SINGLE`](Self::SINGLE) holds the singular form and index
/// [`MANY`](Self::MANY) the plural form. Further entries are kept but never
/// selected.
///
/// In YAML a single string and a list of strings are both accepted:
///
/// ```
/// use lexicon::TranslationLines;
///
/// let one: TranslationLines = serde_yaml::from_str("Hello").unwrap();
/// assert_eq!(one.as_slice(), ["Hello"]);
///
/// let two: TranslationLines = serde_yaml::from_str("[One item, '%d items']").unwrap();
/// assert_eq!(two.plural(), Some("%d items"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TranslationLines(Vec<String>);

impl TranslationLines {
    /// Index of the singular variant.
    pub const SINGLE: usize = 0;

    /// Index of the plural variant.
    pub const MANY: usize = 1;

    /// Create lines from an ordered list of variants.
    pub fn new(lines: Vec<String>) -> Self {
        Self(lines)
    }

    /// Decode a raw YAML value.
    ///
    /// Scalars become a single variant (numbers and booleans use their
    /// textual form, null becomes the empty string). Sequences of scalars
    /// are taken verbatim.
    pub fn decode(value: &Yaml) -> Result<Self, DecodeError> {
        match value {
            Yaml::Sequence(items) => items
                .iter()
                .enumerate()
                .map(|(index, item)| {
                    scalar_text(item).ok_or(DecodeError::NonScalarElement { index })
                })
                .collect::<Result<Vec<_>, _>>()
                .map(Self),
            Yaml::Mapping(_) => Err(DecodeError::Mapping),
            Yaml::Tagged(_) => Err(DecodeError::Tagged),
            scalar => scalar_text(scalar)
                .map(|text| Self(vec![text]))
                .ok_or(DecodeError::Mapping),
        }
    }

    /// Number of variants.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns true if there are no variants.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Variant at `index`, if present.
    pub fn get(&self, index: usize) -> Option<&str> {
        self.0.get(index).map(String::as_str)
    }

    /// The singular variant.
    pub fn single(&self) -> Option<&str> {
        self.get(Self::SINGLE)
    }

    /// The plural variant.
    pub fn plural(&self) -> Option<&str> {
        self.get(Self::MANY)
    }

    /// All variants in order.
    pub fn as_slice(&self) -> &[String] {
        &self.0
    }

    /// Replace the first variant if it equals `token`.
    pub(crate) fn replace_leading(&mut self, token: &str, replacement: &str) {
        if let Some(first) = self.0.first_mut().filter(|first| first.as_str() == token) {
            *first = replacement.to_string();
        }
    }
}

impl From<Vec<String>> for TranslationLines {
    fn from(lines: Vec<String>) -> Self {
        Self(lines)
    }
}

impl From<&str> for TranslationLines {
    fn from(line: &str) -> Self {
        Self(vec![line.to_string()])
    }
}

impl<'de> Deserialize<'de> for TranslationLines {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Yaml::deserialize(deserializer)?;
        Self::decode(&value).map_err(D::Error::custom)
    }
}

/// Text of a scalar YAML value, or None for collections and tagged values.
pub(crate) fn scalar_text(value: &Yaml) -> Option<String> {
    match value {
        Yaml::String(s) => Some(s.clone()),
        Yaml::Number(n) => Some(n.to_string()),
        Yaml::Bool(b) => Some(b.to_string()),
        Yaml::Null => Some(String::new()),
        Yaml::Sequence(_) | Yaml::Mapping(_) | Yaml::Tagged(_) => None,
    }
}
