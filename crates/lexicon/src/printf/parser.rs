//! Format string parser using winnow.
//!
//! Splits a template into literal text and `%` directives. The grammar is
//! total: every input parses, and anything that does not form a directive
//! degrades to a [`Piece::NoVerb`] marker or plain text.

use winnow::combinator::{alt, delimited, opt, preceded, repeat};
use winnow::prelude::*;
use winnow::token::{any, one_of, take_till, take_while};

/// Largest accepted width or precision. Anything above renders a
/// `%!(BADWIDTH)` or `%!(BADPREC)` marker instead.
pub const MAX_SIZE: usize = 1_000_000;

/// One parsed chunk of a format string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Piece {
    /// Text copied to the output as-is (`%%` is already unescaped).
    Literal(String),
    /// A conversion consuming one argument.
    Directive(Directive),
    /// A `%` (with any flags, width or precision) and no verb after it.
    NoVerb,
}

/// Flags that may follow the `%`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Flags {
    /// `-`: left-justify within the width.
    pub minus: bool,
    /// `+`: always print a sign for numbers.
    pub plus: bool,
    /// ` `: leave a space for the sign of positive numbers.
    pub space: bool,
    /// `0`: pad numbers with leading zeros.
    pub zero: bool,
    /// `#`: alternate form (`0x` for hex, etc).
    pub sharp: bool,
}

/// Which argument a directive consumes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArgRef {
    /// The argument after the previously consumed one.
    Next,
    /// Explicit 1-based index, as in `%[2]d`.
    At(usize),
    /// An explicit index that is not a positive integer.
    Bad,
}

/// A single `%[flags][width][.precision]verb` conversion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Directive {
    pub flags: Flags,
    pub width: Option<usize>,
    pub precision: Option<usize>,
    /// The width exceeded [`MAX_SIZE`] and was dropped.
    pub bad_width: bool,
    /// The precision exceeded [`MAX_SIZE`] and was dropped.
    pub bad_precision: bool,
    pub arg: ArgRef,
    pub verb: char,
}

/// Parse a format string into pieces.
pub fn parse_format(input: &str) -> Vec<Piece> {
    let mut remaining = input;
    let parsed: ModalResult<Vec<Piece>> = repeat(0.., piece).parse_next(&mut remaining);
    let Ok(mut pieces) = parsed else {
        return vec![Piece::Literal(input.to_string())];
    };
    if !remaining.is_empty() {
        pieces.push(Piece::Literal(remaining.to_string()));
    }
    pieces
}

fn piece(input: &mut &str) -> ModalResult<Piece> {
    alt((literal, escaped_percent, directive)).parse_next(input)
}

fn literal(input: &mut &str) -> ModalResult<Piece> {
    take_till(1.., '%')
        .map(|text: &str| Piece::Literal(text.to_string()))
        .parse_next(input)
}

fn escaped_percent(input: &mut &str) -> ModalResult<Piece> {
    "%%".value(Piece::Literal("%".to_string()))
        .parse_next(input)
}

fn directive(input: &mut &str) -> ModalResult<Piece> {
    '%'.parse_next(input)?;
    let flags = flags(input)?;
    let leading_index = opt(arg_index).parse_next(input)?;
    let width = opt(number).parse_next(input)?;
    let precision = opt(preceded('.', opt(number))).parse_next(input)?;
    let trailing_index = opt(arg_index).parse_next(input)?;
    let Some(verb) = opt(any).parse_next(input)? else {
        return Ok(Piece::NoVerb);
    };

    // A bare `.` means precision zero.
    let precision = precision.map(|p| p.unwrap_or(Some(0)));
    Ok(Piece::Directive(Directive {
        flags,
        width: width.flatten(),
        precision: precision.flatten(),
        bad_width: matches!(width, Some(None)),
        bad_precision: matches!(precision, Some(None)),
        arg: trailing_index.or(leading_index).unwrap_or(ArgRef::Next),
        verb,
    }))
}

fn flags(input: &mut &str) -> ModalResult<Flags> {
    let chars: Vec<char> = repeat(0.., one_of(['-', '+', ' ', '0', '#'])).parse_next(input)?;
    let mut flags = Flags::default();
    for c in chars {
        match c {
            '-' => flags.minus = true,
            '+' => flags.plus = true,
            ' ' => flags.space = true,
            '0' => flags.zero = true,
            _ => flags.sharp = true,
        }
    }
    Ok(flags)
}

/// A run of digits; `None` when the value is above [`MAX_SIZE`].
fn number(input: &mut &str) -> ModalResult<Option<usize>> {
    take_while(1.., |c: char| c.is_ascii_digit())
        .map(|digits: &str| digits.parse::<usize>().ok().filter(|n| *n <= MAX_SIZE))
        .parse_next(input)
}

fn arg_index(input: &mut &str) -> ModalResult<ArgRef> {
    delimited('[', take_till(0.., ']'), ']')
        .map(|inner: &str| match inner.parse::<usize>() {
            Ok(n) if n > 0 => ArgRef::At(n),
            _ => ArgRef::Bad,
        })
        .parse_next(input)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn directive_of(input: &str) -> Directive {
        match parse_format(input).as_slice() {
            [Piece::Directive(d)] => *d,
            other => panic!("expected a single directive, got {other:?}"),
        }
    }

    #[test]
    fn plain_text_is_one_literal() {
        assert_eq!(
            parse_format("Hello, world"),
            vec![Piece::Literal("Hello, world".to_string())]
        );
    }

    #[test]
    fn empty_input_has_no_pieces() {
        assert!(parse_format("").is_empty());
    }

    #[test]
    fn escaped_percent_is_literal() {
        assert_eq!(
            parse_format("100%%"),
            vec![
                Piece::Literal("100".to_string()),
                Piece::Literal("%".to_string()),
            ]
        );
    }

    #[test]
    fn parses_flags_width_and_precision() {
        let d = directive_of("%-+08.3f");
        assert!(d.flags.minus);
        assert!(d.flags.plus);
        assert!(d.flags.zero);
        assert_eq!(d.width, Some(8));
        assert_eq!(d.precision, Some(3));
        assert_eq!(d.verb, 'f');
        assert_eq!(d.arg, ArgRef::Next);
    }

    #[test]
    fn bare_dot_is_zero_precision() {
        assert_eq!(directive_of("%.f").precision, Some(0));
    }

    #[test]
    fn parses_explicit_index() {
        assert_eq!(directive_of("%[2]d").arg, ArgRef::At(2));
        assert_eq!(directive_of("%[0]d").arg, ArgRef::Bad);
        assert_eq!(directive_of("%[x]d").arg, ArgRef::Bad);
    }

    #[test]
    fn trailing_percent_has_no_verb() {
        assert_eq!(
            parse_format("50%"),
            vec![Piece::Literal("50".to_string()), Piece::NoVerb]
        );
    }

    #[test]
    fn trailing_flags_belong_to_the_missing_verb() {
        assert_eq!(
            parse_format("50%-08."),
            vec![Piece::Literal("50".to_string()), Piece::NoVerb]
        );
    }

    #[test]
    fn oversized_width_and_precision_are_flagged() {
        let d = directive_of("%99999999999999999999999d");
        assert!(d.bad_width);
        assert_eq!(d.width, None);

        let d = directive_of("%5.1000001f");
        assert!(!d.bad_width);
        assert_eq!(d.width, Some(5));
        assert!(d.bad_precision);
        assert_eq!(d.precision, None);

        let d = directive_of("%1000000.1000000f");
        assert_eq!(d.width, Some(MAX_SIZE));
        assert_eq!(d.precision, Some(MAX_SIZE));
    }

    #[test]
    fn multibyte_text_around_directives() {
        let pieces = parse_format("Šis ir %s — labi");
        assert_eq!(pieces.len(), 3);
        assert_eq!(pieces[0], Piece::Literal("Šis ir ".to_string()));
        assert_eq!(pieces[2], Piece::Literal(" — labi".to_string()));
    }
}
