mod lines;
mod value;

pub(crate) use lines::scalar_text;
pub use lines::TranslationLines;
pub use value::Value;
