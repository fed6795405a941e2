//! Numeric operand parsing with C-literal base detection: `0x` prefix is
//! hexadecimal, a leading `0` is octal, anything else is decimal.

use crate::error::NumError;

/// Parses a signed 64-bit value from `text`, consuming it entirely.
///
/// An optional `-` or `+` sign may precede the digits. The leading zero of
/// an octal operand counts as a parsed digit, so `08` fails with
/// [`NumError::TrailingGarbage`] rather than [`NumError::NotANumber`], and
/// a bare `0x` reads as a zero with the `x` left over.
pub(crate) fn parse_long(text: &str) -> Result<i64, NumError> {
    let (negative, body) = match text.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, text.strip_prefix('+').unwrap_or(text)),
    };

    let (base, digits, hex_prefixed) =
        if let Some(rest) = body.strip_prefix("0x").or_else(|| body.strip_prefix("0X")) {
            (16, rest, true)
        } else if body.starts_with('0') {
            (8, body, false)
        } else {
            (10, body, false)
        };

    let end = digits.find(|c: char| !c.is_digit(base)).unwrap_or(digits.len());
    let (span, rest) = digits.split_at(end);

    if span.is_empty() {
        return Err(if hex_prefixed {
            NumError::TrailingGarbage
        } else {
            NumError::NotANumber
        });
    }
    if !rest.is_empty() {
        return Err(NumError::TrailingGarbage);
    }

    // Accumulate in i128 so i64::MIN parses and overflow maps to OutOfRange.
    let magnitude = i128::from_str_radix(span, base).map_err(|_| NumError::OutOfRange)?;
    let value = if negative { -magnitude } else { magnitude };
    i64::try_from(value).map_err(|_| NumError::OutOfRange)
}

/// Parses a buffer length: like [`parse_long`], but the value must also be
/// non-negative and fit in `usize`.
pub(crate) fn parse_len(text: &str) -> Result<usize, NumError> {
    let value = parse_long(text)?;
    usize::try_from(value).map_err(|_| NumError::OutOfRange)
}
