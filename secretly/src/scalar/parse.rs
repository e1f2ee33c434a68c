//! Text parsers for numeric and boolean scalars.

use std::borrow::Cow;
use std::num::IntErrorKind;

use crate::ConvertError;

fn syntax(text: &str) -> ConvertError {
    ConvertError::InvalidSyntax(text.to_owned())
}

fn range(text: &str) -> ConvertError {
    ConvertError::OutOfRange(text.to_owned())
}

/// Parse a boolean using the usual spellings: `1 t T TRUE true True` and
/// `0 f F FALSE false False`.
#[must_use]
pub fn parse_bool(text: &str) -> Option<bool> {
    match text {
        "1" | "t" | "T" | "TRUE" | "true" | "True" => Some(true),
        "0" | "f" | "F" | "FALSE" | "false" | "False" => Some(false),
        _ => None,
    }
}

/// Parse a signed integer, honouring base prefixes, into `T`.
pub(crate) fn parse_signed<T: TryFrom<i128>>(text: &str) -> Result<T, ConvertError> {
    let (negative, digits) = text
        .strip_prefix('-')
        .map_or_else(|| (false, text.strip_prefix('+').unwrap_or(text)), |rest| (true, rest));
    let magnitude = i128::from(parse_magnitude(digits, text)?);
    let value = if negative { -magnitude } else { magnitude };
    T::try_from(value).map_err(|_| range(text))
}

/// Parse an unsigned integer, honouring base prefixes, into `T`.
///
/// Sign prefixes are rejected.
pub(crate) fn parse_unsigned<T: TryFrom<u64>>(text: &str) -> Result<T, ConvertError> {
    let magnitude = parse_magnitude(text, text)?;
    T::try_from(magnitude).map_err(|_| range(text))
}

/// Parse a float sized by `T`, reporting finite overflow as out of range.
pub(crate) fn parse_float<T>(text: &str) -> Result<T, ConvertError>
where
    T: std::str::FromStr + FloatLike,
{
    let value = text.parse::<T>().map_err(|_| syntax(text))?;
    let spelled_infinite = text
        .trim_start_matches(['+', '-'])
        .to_ascii_lowercase()
        .starts_with("inf");
    if value.is_infinite_value() && !spelled_infinite {
        return Err(range(text));
    }
    Ok(value)
}

/// The one float property the parser needs.
pub(crate) trait FloatLike {
    fn is_infinite_value(&self) -> bool;
}

impl FloatLike for f32 {
    fn is_infinite_value(&self) -> bool {
        self.is_infinite()
    }
}

impl FloatLike for f64 {
    fn is_infinite_value(&self) -> bool {
        self.is_infinite()
    }
}

fn parse_magnitude(digits: &str, original: &str) -> Result<u64, ConvertError> {
    let (radix, body, prefixed) = split_radix(digits);
    if !underscores_ok(body, prefixed) {
        return Err(syntax(original));
    }
    let cleaned: Cow<'_, str> = if body.contains('_') {
        Cow::Owned(body.replace('_', ""))
    } else {
        Cow::Borrowed(body)
    };
    if cleaned.is_empty() || cleaned.starts_with(['+', '-']) {
        return Err(syntax(original));
    }
    u64::from_str_radix(&cleaned, radix).map_err(|err| match err.kind() {
        IntErrorKind::PosOverflow => range(original),
        _ => syntax(original),
    })
}

/// Split off a `0x`, `0o`, `0b` or leading-`0` octal prefix.
fn split_radix(digits: &str) -> (u32, &str, bool) {
    const PREFIXES: [(&str, &str, u32); 3] = [("0x", "0X", 16), ("0o", "0O", 8), ("0b", "0B", 2)];
    for (lower, upper, radix) in PREFIXES {
        if let Some(body) = digits.strip_prefix(lower).or_else(|| digits.strip_prefix(upper)) {
            return (radix, body, true);
        }
    }
    if digits.len() > 1 {
        if let Some(body) = digits.strip_prefix('0') {
            return (8, body, true);
        }
    }
    (10, digits, false)
}

/// Underscores may only separate digits; a prefix may be followed by one.
fn underscores_ok(body: &str, prefixed: bool) -> bool {
    !body.contains("__") && !body.ends_with('_') && (prefixed || !body.starts_with('_'))
}
