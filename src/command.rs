use std::io::{self, Read, Seek, Write};

use crate::{
    Result,
    error::SessionError,
    num,
    session::FileSession,
};

/// A single parsed instruction against the open file.
///
/// Commands exist only for the duration of their own execution; the first
/// character of a token selects the operation and the remainder is its
/// operand.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// `r<length>`: read bytes at the cursor, displayed as text.
    ReadText(usize),
    /// `R<length>`: read bytes at the cursor, displayed in hex.
    ReadHex(usize),
    /// `w<string>`: write the string verbatim at the cursor.
    WriteLiteral(Vec<u8>),
    /// `s<offset>`: move the cursor to an absolute offset.
    SeekAbsolute(i64),
}

impl Command {
    /// Parses one command token. Case is significant.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::UnknownCommand` if the token does not start
    /// with `r`, `R`, `w`, or `s`, and `SessionError::BadOperand` if a
    /// numeric operand is malformed.
    pub fn parse(token: &str) -> Result<Self> {
        let Some(first) = token.chars().next() else {
            return Err(SessionError::UnknownCommand(String::new()));
        };
        let operand = &token[first.len_utf8()..];

        match first {
            'r' => Ok(Command::ReadText(parse_len(operand, token)?)),
            'R' => Ok(Command::ReadHex(parse_len(operand, token)?)),
            'w' => Ok(Command::WriteLiteral(operand.as_bytes().to_vec())),
            's' => {
                let offset = num::parse_long(operand)
                    .map_err(|reason| SessionError::BadOperand { arg: token.to_string(), reason })?;
                Ok(Command::SeekAbsolute(offset))
            }
            _ => Err(SessionError::UnknownCommand(token.to_string())),
        }
    }

    /// Executes the command against `session`, writing one report line to
    /// `out`. `token` is the original command text, echoed back as the
    /// report prefix.
    pub fn execute<F, W>(&self, token: &str, session: &mut FileSession<F>, out: &mut W) -> Result<()>
    where
        F: Read + Write + Seek,
        W: io::Write,
    {
        match self {
            Command::ReadText(len) | Command::ReadHex(len) => {
                let bytes = session.read(*len)?;
                if bytes.is_empty() {
                    report(out, format_args!("{token}: end-of-file"))
                } else if matches!(self, Command::ReadText(_)) {
                    report(out, format_args!("{token}: {}", render_text(&bytes)))
                } else {
                    report(out, format_args!("{token}: {}", render_hex(&bytes)))
                }
            }
            Command::WriteLiteral(data) => {
                let written = session.write(data)?;
                report(out, format_args!("{token}: wrote {written} bytes"))
            }
            Command::SeekAbsolute(offset) => {
                session.seek(*offset)?;
                report(out, format_args!("{token}: seek succeeded"))
            }
        }
    }
}

fn parse_len(operand: &str, token: &str) -> Result<usize> {
    num::parse_len(operand)
        .map_err(|reason| SessionError::BadOperand { arg: token.to_string(), reason })
}

fn report<W: io::Write>(out: &mut W, line: std::fmt::Arguments<'_>) -> Result<()> {
    writeln!(out, "{line}").map_err(|e| SessionError::Io { op: "report", source: e })
}

/// Printable ASCII passes through; every other byte becomes `?`.
fn render_text(bytes: &[u8]) -> String {
    bytes
        .iter()
        .map(|&b| if (b' '..=b'~').contains(&b) { b as char } else { '?' })
        .collect()
}

/// Two lowercase hex digits per byte, bytes separated by single spaces.
fn render_hex(bytes: &[u8]) -> String {
    bytes
        .iter()
        .map(|b| format!("{b:02x}"))
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use crate::error::NumError;

    use super::*;

    #[test]
    fn test_parse_dispatch() -> Result<()> {
        assert_eq!(Command::parse("r10")?, Command::ReadText(10));
        assert_eq!(Command::parse("R0x20")?, Command::ReadHex(32));
        assert_eq!(Command::parse("whello")?, Command::WriteLiteral(b"hello".to_vec()));
        assert_eq!(Command::parse("s100")?, Command::SeekAbsolute(100));
        assert_eq!(Command::parse("s-1")?, Command::SeekAbsolute(-1));
        Ok(())
    }

    #[test]
    fn test_parse_empty_write_is_legal() -> Result<()> {
        assert_eq!(Command::parse("w")?, Command::WriteLiteral(Vec::new()));
        Ok(())
    }

    #[test]
    fn test_parse_unknown_prefix() {
        let result = Command::parse("q5");
        assert!(matches!(result, Err(SessionError::UnknownCommand(token)) if token == "q5"));

        let result = Command::parse("");
        assert!(matches!(result, Err(SessionError::UnknownCommand(_))));
    }

    #[test]
    fn test_parse_malformed_operand() {
        let result = Command::parse("r12x");
        assert!(matches!(
            result,
            Err(SessionError::BadOperand { reason: NumError::TrailingGarbage, .. })
        ));

        let result = Command::parse("r-5");
        assert!(matches!(
            result,
            Err(SessionError::BadOperand { reason: NumError::OutOfRange, .. })
        ));

        let result = Command::parse("s");
        assert!(matches!(
            result,
            Err(SessionError::BadOperand { reason: NumError::NotANumber, .. })
        ));
    }

    #[test]
    fn test_render_text_replaces_unprintable() {
        assert_eq!(render_text(b"hello"), "hello");
        assert_eq!(render_text(b"a b~"), "a b~");
        assert_eq!(render_text(&[0x00, 0x07, b'A', 0x7f, 0xff]), "??A??");
    }

    #[test]
    fn test_render_hex_lowercase_pairs() {
        assert_eq!(render_hex(&[0x00]), "00");
        assert_eq!(render_hex(&[0xde, 0xad, 0x0f]), "de ad 0f");
        assert_eq!(render_hex(b"hi"), "68 69");
    }
}
