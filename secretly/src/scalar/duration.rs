//! Duration syntax such as `300ms`, `1h30m` or `1.5h`.
//!
//! A duration is a sequence of decimal numbers, each with an optional
//! fraction and a mandatory unit. Valid units are `ns`, `us` (or `µs`/`μs`),
//! `ms`, `s`, `m` and `h`. A bare `0` needs no unit.

use std::time::Duration;

use crate::ConvertError;

const NANOS_PER_MICRO: u128 = 1_000;
const NANOS_PER_MILLI: u128 = 1_000_000;
const NANOS_PER_SECOND: u128 = 1_000_000_000;
const NANOS_PER_MINUTE: u128 = 60 * NANOS_PER_SECOND;
const NANOS_PER_HOUR: u128 = 60 * NANOS_PER_MINUTE;

/// Longest fraction that is honoured; later digits are below a nanosecond
/// for every unit.
const MAX_FRACTION_DIGITS: usize = 18;

/// Largest representable duration, matching a signed 64-bit nanosecond count.
const MAX_NANOS: u128 = i64::MAX.unsigned_abs() as u128;

/// Parse duration text into a [`Duration`].
///
/// # Errors
///
/// Returns [`ConvertError::InvalidSyntax`] for malformed text and
/// [`ConvertError::OutOfRange`] for negative or oversized durations.
///
/// # Examples
///
/// ```
/// use std::time::Duration;
/// use secretly::parse_duration;
///
/// assert_eq!(parse_duration("1h30m"), Ok(Duration::from_secs(5400)));
/// assert_eq!(parse_duration("1.5s"), Ok(Duration::from_millis(1500)));
/// ```
pub fn parse_duration(text: &str) -> Result<Duration, ConvertError> {
    let syntax = || ConvertError::InvalidSyntax(text.to_owned());
    let range = || ConvertError::OutOfRange(text.to_owned());

    let (negative, mut rest) = text
        .strip_prefix('-')
        .map_or_else(|| (false, text.strip_prefix('+').unwrap_or(text)), |r| (true, r));
    if rest == "0" {
        return Ok(Duration::ZERO);
    }
    if rest.is_empty() {
        return Err(syntax());
    }

    let mut total: u128 = 0;
    while !rest.is_empty() {
        let (whole, after_whole) = take_while(rest, |c| c.is_ascii_digit());
        let (fraction, after_fraction) = after_whole
            .strip_prefix('.')
            .map_or(("", after_whole), |tail| take_while(tail, |c| c.is_ascii_digit()));
        if whole.is_empty() && fraction.is_empty() {
            return Err(syntax());
        }
        let (unit, tail) = take_while(after_fraction, |c| c != '.' && !c.is_ascii_digit());
        let scale = unit_nanos(unit).ok_or_else(syntax)?;

        let whole_value = if whole.is_empty() {
            0
        } else {
            whole.parse::<u128>().map_err(|_| range())?
        };
        total = whole_value
            .checked_mul(scale)
            .and_then(|nanos| total.checked_add(nanos))
            .ok_or_else(range)?;
        total = total
            .checked_add(fraction_nanos(fraction, scale))
            .ok_or_else(range)?;
        if total > MAX_NANOS {
            return Err(range());
        }
        rest = tail;
    }

    if negative && total != 0 {
        return Err(range());
    }
    u64::try_from(total)
        .map(Duration::from_nanos)
        .map_err(|_| range())
}

fn unit_nanos(unit: &str) -> Option<u128> {
    match unit {
        "ns" => Some(1),
        "us" | "\u{b5}s" | "\u{3bc}s" => Some(NANOS_PER_MICRO),
        "ms" => Some(NANOS_PER_MILLI),
        "s" => Some(NANOS_PER_SECOND),
        "m" => Some(NANOS_PER_MINUTE),
        "h" => Some(NANOS_PER_HOUR),
        _ => None,
    }
}

/// Nanoseconds contributed by `.fraction` of a unit worth `scale` nanoseconds.
fn fraction_nanos(fraction: &str, scale: u128) -> u128 {
    let (kept, _) = fraction.split_at(fraction.len().min(MAX_FRACTION_DIGITS));
    if kept.is_empty() {
        return 0;
    }
    let Ok(numerator) = kept.parse::<u128>() else {
        return 0;
    };
    let denominator = (0..kept.len()).fold(1_u128, |acc, _| acc * 10);
    numerator * scale / denominator
}

/// Split `s` after the longest prefix whose characters satisfy `pred`.
fn take_while(s: &str, pred: impl Fn(char) -> bool) -> (&str, &str) {
    let end = s
        .char_indices()
        .find(|&(_, c)| !pred(c))
        .map_or(s.len(), |(idx, _)| idx);
    s.split_at(end)
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case("5s", Duration::from_secs(5))]
    #[case("300ms", Duration::from_millis(300))]
    #[case("1h30m", Duration::from_secs(5400))]
    #[case("1.5h", Duration::from_secs(5400))]
    #[case(".5s", Duration::from_millis(500))]
    #[case("1.s", Duration::from_secs(1))]
    #[case("2us", Duration::from_micros(2))]
    #[case("2µs", Duration::from_micros(2))]
    #[case("7ns", Duration::from_nanos(7))]
    #[case("0", Duration::ZERO)]
    #[case("-0", Duration::ZERO)]
    #[case("+10m", Duration::from_secs(600))]
    #[case("1m0.000000001s", Duration::new(60, 1))]
    fn parses_durations(#[case] text: &str, #[case] expected: Duration) {
        assert_eq!(parse_duration(text), Ok(expected));
    }

    #[rstest]
    #[case("")]
    #[case("5")]
    #[case("s")]
    #[case("5x")]
    #[case("1.2.3s")]
    #[case(".s")]
    fn rejects_malformed_durations(#[case] text: &str) {
        assert_eq!(
            parse_duration(text),
            Err(ConvertError::InvalidSyntax(text.to_owned()))
        );
    }

    #[rstest]
    #[case("-5s")]
    #[case("2562048h")]
    fn rejects_unrepresentable_durations(#[case] text: &str) {
        assert_eq!(
            parse_duration(text),
            Err(ConvertError::OutOfRange(text.to_owned()))
        );
    }
}
