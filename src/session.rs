use std::{
    fs::{File, OpenOptions},
    io::{self, Read, Seek, SeekFrom, Write},
    path::Path,
};

use log::debug;

use crate::{Result, error::SessionError};

/// A random-access session over a single open file.
///
/// The session owns the file handle and tracks the implicit cursor that
/// every read and write advances and every seek repositions. It is
/// generic over the backing store, so tests can run against an in-memory
/// `io::Cursor<Vec<u8>>` instead of a real file.
///
/// # Examples
///
/// ```rust
/// use std::io::Cursor;
/// use fpoke::FileSession;
///
/// fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let mut session = FileSession::with_backing(Cursor::new(Vec::new()));
///
///     session.write(b"hello")?;
///     session.seek(0)?;
///
///     assert_eq!(session.read(5)?, b"hello");
///     assert_eq!(session.position(), 5);
///
///     Ok(())
/// }
/// ```
#[derive(Debug)]
pub struct FileSession<F> {
    file: F,
    cursor: u64,
}

impl FileSession<File> {
    /// Opens `path` for reading and writing, creating it if absent.
    ///
    /// Created files get mode `rw-rw-rw-` (before umask). Callers that
    /// need tighter permissions must chmod separately.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Io` if the file cannot be opened or created.
    pub fn open(path: &Path) -> Result<Self> {
        let mut options = OpenOptions::new();
        options.read(true).write(true).create(true);
        #[cfg(unix)]
        {
            use std::os::unix::fs::OpenOptionsExt;
            options.mode(0o666);
        }

        let file = options
            .open(path)
            .map_err(|e| SessionError::Io { op: "open", source: e })?;
        debug!("opened {} read-write", path.display());
        Ok(Self::with_backing(file))
    }
}

impl<F: Read + Write + Seek> FileSession<F> {
    /// Wraps an already-open backing store, with the cursor at zero.
    pub fn with_backing(file: F) -> Self { Self { file, cursor: 0 } }

    /// Current byte offset at which the next read or write begins.
    pub fn position(&self) -> u64 { self.cursor }

    /// Reads up to `len` bytes at the cursor and advances it by the
    /// number of bytes actually read.
    ///
    /// A single read is issued and its result is final: fewer than `len`
    /// bytes means the end of the file was reached mid-read, and an empty
    /// vector means the cursor was already at or past end-of-file.
    /// Neither is an error.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Io` if the underlying read fails.
    pub fn read(&mut self, len: usize) -> Result<Vec<u8>> {
        let mut buf = vec![0; len];
        let n = self
            .file
            .read(&mut buf)
            .map_err(|e| SessionError::Io { op: "read", source: e })?;
        buf.truncate(n);
        self.cursor += n as u64;
        debug!("read {n} of {len} bytes, cursor now {}", self.cursor);
        Ok(buf)
    }

    /// Writes `data` at the cursor and advances it by the number of bytes
    /// written.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Io` if the underlying write fails, and
    /// `SessionError::ShortWrite` if it persists fewer bytes than
    /// requested.
    pub fn write(&mut self, data: &[u8]) -> Result<usize> {
        let n = self
            .file
            .write(data)
            .map_err(|e| SessionError::Io { op: "write", source: e })?;
        self.cursor += n as u64;
        if n < data.len() {
            return Err(SessionError::ShortWrite { requested: data.len(), written: n });
        }
        debug!("wrote {n} bytes, cursor now {}", self.cursor);
        Ok(n)
    }

    /// Moves the cursor to an absolute offset from the start of the file.
    ///
    /// Seeking past end-of-file is legal; the gap reads back as zeros
    /// once something is written beyond it. Negative offsets are passed
    /// to the backing store's positioning layer, which rejects them.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Io` if the offset is negative or the
    /// underlying seek fails.
    pub fn seek(&mut self, offset: i64) -> Result<()> {
        let target = u64::try_from(offset).map_err(|_| SessionError::Io {
            op: "seek",
            source: io::Error::new(io::ErrorKind::InvalidInput, "negative offset"),
        })?;
        self.cursor = self
            .file
            .seek(SeekFrom::Start(target))
            .map_err(|e| SessionError::Io { op: "seek", source: e })?;
        debug!("cursor moved to {}", self.cursor);
        Ok(())
    }

    /// Flushes and closes the session, consuming it.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Io` if the backing store reports a failure
    /// while flushing.
    pub fn close(mut self) -> Result<()> {
        self.file
            .flush()
            .map_err(|e| SessionError::Io { op: "close", source: e })
    }
}
