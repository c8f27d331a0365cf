//! Default printf-style substitution.
//!
//! Used for every language without a custom formatter. Directives follow
//! the familiar `%[flags][width][.precision]verb` shape, with `%[n]` to
//! pick an argument explicitly. Misuse never panics; it shows up inline in
//! the output instead (`%!d(MISSING)`, `%!d(string=x)`, `%!(EXTRA int=4)`).

mod parser;
mod render;

pub use parser::{ArgRef, Directive, Flags, MAX_SIZE, Piece, parse_format};

pub(crate) use render::shortest_float;

use crate::types::Value;

/// Substitute `args` into `template`.
///
/// # Example
///
/// ```
/// use lexicon::{Value, printf::sprintf};
///
/// let args = [Value::from(1), Value::from(2.02), Value::from("three")];
/// assert_eq!(sprintf("1=%d, 2=%v 3=%s", &args), "1=1, 2=2.02 3=three");
/// ```
pub fn sprintf(template: &str, args: &[Value]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut next = 0;
    let mut reordered = false;

    for piece in parse_format(template) {
        let directive = match piece {
            Piece::Literal(text) => {
                out.push_str(&text);
                continue;
            }
            Piece::NoVerb => {
                out.push_str("%!(NOVERB)");
                continue;
            }
            Piece::Directive(directive) => directive,
        };

        if directive.bad_width {
            out.push_str("%!(BADWIDTH)");
        }
        if directive.bad_precision {
            out.push_str("%!(BADPREC)");
        }

        match directive.arg {
            ArgRef::Next => {}
            ArgRef::At(n) if n <= args.len() => {
                next = n - 1;
                reordered = true;
            }
            ArgRef::At(_) | ArgRef::Bad => {
                reordered = true;
                out.push_str(&format!("%!{}(BADINDEX)", directive.verb));
                continue;
            }
        }

        match args.get(next) {
            Some(arg) => {
                out.push_str(&render::render(&directive, arg));
                next += 1;
            }
            None => out.push_str(&format!("%!{}(MISSING)", directive.verb)),
        }
    }

    if !reordered && next < args.len() {
        let extra: Vec<String> = args[next..]
            .iter()
            .map(|arg| format!("{}={arg}", arg.type_name()))
            .collect();
        out.push_str(&format!("%!(EXTRA {})", extra.join(", ")));
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(values: &[Value]) -> Vec<Value> {
        values.to_vec()
    }

    #[test]
    fn template_without_directives_is_unchanged() {
        assert_eq!(sprintf("Hello", &[]), "Hello");
    }

    #[test]
    fn mixed_verbs() {
        let a = args(&[1.into(), 2.02.into(), "three".into()]);
        assert_eq!(sprintf("1=%d, 2=%v 3=%s", &a), "1=1, 2=2.02 3=three");
    }

    #[test]
    fn plural_count() {
        assert_eq!(sprintf("%d items", &[5.into()]), "5 items");
    }

    #[test]
    fn missing_argument_is_marked() {
        assert_eq!(sprintf("%d and %s", &[1.into()]), "1 and %!s(MISSING)");
    }

    #[test]
    fn extra_arguments_are_listed() {
        assert_eq!(
            sprintf("%d", &[1.into(), 4.into(), "x".into()]),
            "1%!(EXTRA int=4, string=x)"
        );
        assert_eq!(sprintf("Hello", &[7.into()]), "Hello%!(EXTRA int=7)");
        assert_eq!(sprintf("x", &[1e21.into()]), "x%!(EXTRA float64=1e+21)");
    }

    #[test]
    fn wrong_type_is_marked() {
        assert_eq!(sprintf("%d", &["three".into()]), "%!d(string=three)");
        assert_eq!(sprintf("%s", &[5.into()]), "%!s(int=5)");
        assert_eq!(sprintf("%z", &[5.into()]), "%!z(int=5)");
    }

    #[test]
    fn trailing_percent_has_no_verb() {
        assert_eq!(sprintf("100%", &[]), "100%!(NOVERB)");
        assert_eq!(sprintf("100%%", &[]), "100%");
    }

    #[test]
    fn explicit_indexes_reorder() {
        let a = args(&["a".into(), "b".into()]);
        assert_eq!(sprintf("%[2]s %[1]s", &a), "b a");
        assert_eq!(sprintf("%[1]s %s", &a), "a b");
        assert_eq!(sprintf("%[3]s", &a), "%!s(BADINDEX)");
    }

    #[test]
    fn width_and_flags() {
        assert_eq!(sprintf("[%5d]", &[42.into()]), "[   42]");
        assert_eq!(sprintf("[%-5d]", &[42.into()]), "[42   ]");
        assert_eq!(sprintf("[%05d]", &[(-42).into()]), "[-0042]");
        assert_eq!(sprintf("[%+d]", &[42.into()]), "[+42]");
        assert_eq!(sprintf("[%6s]", &["ab".into()]), "[    ab]");
        assert_eq!(sprintf("[%.2s]", &["abcdef".into()]), "[ab]");
    }

    #[test]
    fn trailing_flags_without_verb() {
        assert_eq!(sprintf("[%-", &[]), "[%!(NOVERB)");
        assert_eq!(sprintf("%d %5.", &[1.into()]), "1 %!(NOVERB)");
    }

    #[test]
    fn oversized_width_is_dropped_and_marked() {
        assert_eq!(
            sprintf("[%1000000000000000000d]", &[5.into()]),
            "[%!(BADWIDTH)5]"
        );
        assert_eq!(sprintf("[%-1000001s]", &["ab".into()]), "[%!(BADWIDTH)ab]");
    }

    #[test]
    fn oversized_precision_is_dropped_and_marked() {
        assert_eq!(
            sprintf("%.1000000000000000000f", &[1.5.into()]),
            "%!(BADPREC)1.500000"
        );
        assert_eq!(sprintf("%.99999999999d", &[7.into()]), "%!(BADPREC)7");
        assert_eq!(sprintf("%4.9999999e", &[1.0.into()]), "%!(BADPREC)1.000000e+00");
    }

    #[test]
    fn width_at_the_limit_is_honoured() {
        let padded = sprintf("%1000000d", &[1.into()]);
        assert_eq!(padded.len(), MAX_SIZE);
        assert!(padded.ends_with(" 1"));
    }

    #[test]
    fn integer_radixes() {
        assert_eq!(sprintf("%x %X %o %b", &[255.into(), 255.into(), 8.into(), 5.into()]), "ff FF 10 101");
        assert_eq!(sprintf("%#x %#o", &[255.into(), 8.into()]), "0xff 010");
        assert_eq!(sprintf("%.3d", &[7.into()]), "007");
    }

    #[test]
    fn floats() {
        assert_eq!(sprintf("%f", &[3.5.into()]), "3.500000");
        assert_eq!(sprintf("%.2f", &[3.14159.into()]), "3.14");
        assert_eq!(sprintf("%8.3f", &[3.14159.into()]), "   3.142");
        assert_eq!(sprintf("%e", &[1234.5678.into()]), "1.234568e+03");
        assert_eq!(sprintf("%E", &[0.00012.into()]), "1.200000E-04");
        assert_eq!(sprintf("%v", &[1_000_000.0.into()]), "1e+06");
        assert_eq!(sprintf("%g", &[100_000.0.into()]), "100000");
        assert_eq!(sprintf("%.3g", &[3.14159.into()]), "3.14");
        assert_eq!(sprintf("%v", &[f64::INFINITY.into()]), "+Inf");
        assert_eq!(sprintf("%f", &[5.into()]), "%!f(int=5)");
    }

    #[test]
    fn text_and_bool_verbs() {
        assert_eq!(sprintf("%q", &["hi".into()]), "\"hi\"");
        assert_eq!(sprintf("%x", &["hi".into()]), "6869");
        assert_eq!(sprintf("%t %v", &[true.into(), false.into()]), "true false");
        assert_eq!(sprintf("%c", &[65.into()]), "A");
    }
}
