use std::io::{self, Read, Seek, Write};

pub mod error;

mod command;
mod num;
mod session;

pub use command::Command;
pub use session::FileSession;

pub type Result<T> = std::result::Result<T, error::SessionError>;

/// Runs every command token in order against `session`, writing one
/// report line per command to `out`.
///
/// The first failure stops the run and is returned; commands after it are
/// not parsed or executed, and the effects of earlier commands are kept.
///
/// # Examples
///
/// ```rust
/// use std::io::Cursor;
/// use fpoke::FileSession;
///
/// fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let mut session = FileSession::with_backing(Cursor::new(Vec::new()));
///     let mut out = Vec::new();
///
///     let tokens = ["whello".to_string(), "s0".to_string(), "r5".to_string()];
///     fpoke::run(&mut session, &tokens, &mut out)?;
///
///     let report = String::from_utf8(out)?;
///     assert_eq!(report, "whello: wrote 5 bytes\ns0: seek succeeded\nr5: hello\n");
///
///     Ok(())
/// }
/// ```
pub fn run<F, W>(session: &mut FileSession<F>, tokens: &[String], out: &mut W) -> Result<()>
where
    F: Read + Write + Seek,
    W: io::Write,
{
    for token in tokens {
        let command = Command::parse(token)?;
        log::debug!("executing {token}");
        command.execute(token, session, out)?;
    }
    Ok(())
}
