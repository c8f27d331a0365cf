//! YAML translation catalogs.
//!
//! A catalog maps keys to languages to one or two text variants (singular
//! and plural). Files can include other files, language tags are
//! case-insensitive, and `^` stands for "same text as the key". Lookups
//! pick the plural variant when any numeric argument exceeds one, then
//! substitute arguments printf-style or through a per-language formatter.
//! Missing translations resolve to a visible `(lang.key)` placeholder.

mod catalog;
pub mod error;
pub mod loader;
pub mod printf;
pub mod registry;
pub mod types;
mod validate;

pub use catalog::Catalog;
pub use error::{DecodeError, FormatterError, IncludeError, LoadError, ValidationError};
pub use loader::LoadOptions;
pub use registry::{FormatFn, LanguageRegistry};
pub use types::{TranslationLines, Value};

/// Creates a `Vec<Value>` of lookup arguments.
///
/// Each argument is converted via `Into<Value>`, so integers, floats,
/// booleans and strings can be mixed freely.
///
/// # Example
///
/// ```
/// use lexicon::{args, Value};
///
/// let a = args![3, 2.5, "Alice"];
/// assert_eq!(a.len(), 3);
/// assert_eq!(a[0], Value::Integer(3));
/// assert_eq!(a[2].as_text(), Some("Alice"));
/// ```
#[macro_export]
macro_rules! args {
    () => {
        ::std::vec::Vec::<$crate::Value>::new()
    };
    ($($value:expr),+ $(,)?) => {
        ::std::vec![$(::std::convert::Into::<$crate::Value>::into($value)),+]
    };
}
