//! Rendering of single directives against typed arguments.

use crate::printf::parser::Directive;
use crate::types::Value;

const DEFAULT_FLOAT_PRECISION: usize = 6;

/// Render one argument for a directive.
///
/// Verb/type mismatches and unknown verbs render as `%!verb(type=value)`.
pub fn render(directive: &Directive, arg: &Value) -> String {
    let d = directive;
    match (d.verb, arg) {
        ('v' | 's', Value::Text(s)) => pad(truncate(s, d.precision), d),
        ('q', Value::Text(s)) => pad(format!("{s:?}"), d),
        ('x' | 'X', Value::Text(s)) => pad(hex_bytes(s, d.verb == 'X'), d),
        ('v' | 't', Value::Bool(b)) => pad(b.to_string(), d),
        ('v' | 'd' | 'x' | 'X' | 'o' | 'O' | 'b', Value::Integer(n)) => {
            integer(i128::from(*n), d)
        }
        ('v' | 'd' | 'x' | 'X' | 'o' | 'O' | 'b', Value::Unsigned(n)) => {
            integer(i128::from(*n), d)
        }
        ('c', Value::Integer(_) | Value::Unsigned(_)) => pad(code_point(arg).to_string(), d),
        ('v' | 'g' | 'G' | 'e' | 'E' | 'f' | 'F', Value::Float(f)) => float(*f, d),
        (verb, arg) => bad_verb(verb, arg),
    }
}

/// Marker for a verb that cannot format the given argument.
pub fn bad_verb(verb: char, arg: &Value) -> String {
    format!("%!{verb}({}={arg})", arg.type_name())
}

fn truncate(s: &str, precision: Option<usize>) -> String {
    match precision {
        Some(p) => s.chars().take(p).collect(),
        None => s.to_string(),
    }
}

fn hex_bytes(s: &str, upper: bool) -> String {
    s.bytes()
        .map(|b| {
            if upper {
                format!("{b:02X}")
            } else {
                format!("{b:02x}")
            }
        })
        .collect()
}

fn code_point(arg: &Value) -> char {
    let n = match arg {
        Value::Integer(n) => u32::try_from(*n).ok(),
        Value::Unsigned(n) => u32::try_from(*n).ok(),
        _ => None,
    };
    n.and_then(char::from_u32).unwrap_or(char::REPLACEMENT_CHARACTER)
}

fn integer(n: i128, d: &Directive) -> String {
    let magnitude = n.unsigned_abs();
    let mut digits = match d.verb {
        'x' => format!("{magnitude:x}"),
        'X' => format!("{magnitude:X}"),
        'o' | 'O' => format!("{magnitude:o}"),
        'b' => format!("{magnitude:b}"),
        _ => magnitude.to_string(),
    };

    if let Some(precision) = d.precision {
        if precision == 0 && magnitude == 0 {
            digits.clear();
        } else if digits.len() < precision {
            digits = format!("{}{digits}", "0".repeat(precision - digits.len()));
        }
    }

    let prefix = match d.verb {
        'x' if d.flags.sharp => "0x",
        'X' if d.flags.sharp => "0X",
        'b' if d.flags.sharp => "0b",
        'o' if d.flags.sharp && !digits.starts_with('0') => "0",
        'O' => "0o",
        _ => "",
    };

    // Precision disables zero padding for integers.
    number(n < 0, prefix, &digits, d, d.precision.is_none())
}

fn float(f: f64, d: &Directive) -> String {
    if f.is_nan() {
        return pad("NaN".to_string(), d);
    }
    if f.is_infinite() {
        let sign = if f < 0.0 { "-" } else { "+" };
        return pad(format!("{sign}Inf"), d);
    }

    let magnitude = f.abs();
    let digits = match d.verb {
        'f' | 'F' => {
            let precision = d.precision.unwrap_or(DEFAULT_FLOAT_PRECISION);
            format!("{magnitude:.precision$}")
        }
        'e' | 'E' => {
            let precision = d.precision.unwrap_or(DEFAULT_FLOAT_PRECISION);
            scientific(&format!("{magnitude:.precision$e}"), d.verb == 'E')
        }
        'G' => general(magnitude, d.precision, true),
        _ => general(magnitude, d.precision, false),
    };
    let negative = f.is_sign_negative() && f != 0.0;
    number(negative, "", &digits, d, true)
}

/// Default `%v` text of a float: shortest `%g` form, `NaN`, `+Inf`, `-Inf`.
pub(crate) fn shortest_float(f: f64) -> String {
    if f.is_nan() {
        return "NaN".to_string();
    }
    if f.is_infinite() {
        let sign = if f < 0.0 { "-" } else { "+" };
        return format!("{sign}Inf");
    }
    let digits = general(f.abs(), None, false);
    if f.is_sign_negative() && f != 0.0 {
        format!("-{digits}")
    } else {
        digits
    }
}

/// Shortest-or-precision `%g` formatting of a non-negative finite float.
///
/// Uses scientific notation when the exponent is below -4 or at least the
/// precision (6 for the shortest form), fixed notation otherwise, and never
/// keeps trailing zeros.
fn general(magnitude: f64, precision: Option<usize>, upper: bool) -> String {
    let rendered = match precision {
        Some(p) => {
            let p = p.max(1) - 1;
            format!("{magnitude:.p$e}")
        }
        None => format!("{magnitude:e}"),
    };
    let Some((mantissa, exponent)) = rendered.split_once('e') else {
        return rendered;
    };
    let exponent: i64 = exponent.parse().unwrap_or(0);
    let mantissa = trim_fraction(mantissa);
    let significant = mantissa.chars().filter(char::is_ascii_digit).count();
    let significant = i64::try_from(significant).unwrap_or(i64::MAX);
    let decimal_point = exponent + 1;

    let eprec = match precision {
        None => 6,
        Some(p) => {
            let p = i64::try_from(p.max(1)).unwrap_or(i64::MAX);
            if p > significant && significant >= decimal_point {
                significant
            } else {
                p
            }
        }
    };

    if exponent < -4 || exponent >= eprec {
        let mark = if upper { 'E' } else { 'e' };
        let sign = if exponent < 0 { '-' } else { '+' };
        return format!("{mantissa}{mark}{sign}{:02}", exponent.abs());
    }

    let decimals = usize::try_from((significant - decimal_point).max(0)).unwrap_or(0);
    format!("{magnitude:.decimals$}")
}

/// Rewrite Rust's `1.5e3` exponent form as `1.5e+03`.
fn scientific(rendered: &str, upper: bool) -> String {
    let Some((mantissa, exponent)) = rendered.split_once('e') else {
        return rendered.to_string();
    };
    let exponent: i64 = exponent.parse().unwrap_or(0);
    let mark = if upper { 'E' } else { 'e' };
    let sign = if exponent < 0 { '-' } else { '+' };
    format!("{mantissa}{mark}{sign}{:02}", exponent.abs())
}

fn trim_fraction(mantissa: &str) -> &str {
    if mantissa.contains('.') {
        mantissa.trim_end_matches('0').trim_end_matches('.')
    } else {
        mantissa
    }
}

/// Assemble sign, prefix and digits, then apply width padding.
fn number(negative: bool, prefix: &str, digits: &str, d: &Directive, zero_pad: bool) -> String {
    let sign = if negative {
        "-"
    } else if d.flags.plus {
        "+"
    } else if d.flags.space {
        " "
    } else {
        ""
    };

    let len = sign.len() + prefix.len() + digits.chars().count();
    match d.width {
        Some(width) if zero_pad && d.flags.zero && !d.flags.minus && width > len => {
            let zeros = "0".repeat(width - len);
            format!("{sign}{prefix}{zeros}{digits}")
        }
        _ => pad(format!("{sign}{prefix}{digits}"), d),
    }
}

/// Pad with spaces to the directive's width.
fn pad(body: String, d: &Directive) -> String {
    let len = body.chars().count();
    match d.width {
        Some(width) if width > len => {
            let fill = " ".repeat(width - len);
            if d.flags.minus {
                format!("{body}{fill}")
            } else {
                format!("{fill}{body}")
            }
        }
        _ => body,
    }
}
