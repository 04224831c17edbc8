//! SheetStream - an open output handle bound to its sheet

use std::io::{self, Write};
use std::path::{Path, PathBuf};

use crate::SheetName;

/// Writable handle returned by [`crate::OutputDispatcher::open_stream_for_sheet`].
///
/// Owned by the caller until it is handed back to
/// [`crate::OutputDispatcher::close_stream_for_sheet`]. Dropping it without
/// closing still releases the underlying writer, but skips the final flush
/// check.
#[derive(Debug)]
pub struct SheetStream<W> {
    sheet: SheetName,
    location: Option<PathBuf>,
    bytes_written: u64,
    inner: W,
}

impl<W: Write> SheetStream<W> {
    /// Wrap a writer for `sheet`.
    pub fn new(sheet: impl Into<SheetName>, inner: W) -> Self {
        Self {
            sheet: sheet.into(),
            location: None,
            bytes_written: 0,
            inner,
        }
    }

    /// Record where the stream's bytes end up on disk.
    pub fn with_location(mut self, location: impl Into<PathBuf>) -> Self {
        self.location = Some(location.into());
        self
    }

    /// Sheet this stream was opened for
    pub fn sheet_name(&self) -> &SheetName {
        &self.sheet
    }

    /// Backing file path, if the stream is file-backed
    pub fn location(&self) -> Option<&Path> {
        self.location.as_deref()
    }

    /// Bytes accepted by the writer so far
    pub fn bytes_written(&self) -> u64 {
        self.bytes_written
    }

    /// Release the writer, keeping the sheet name.
    pub fn into_parts(self) -> (SheetName, W) {
        (self.sheet, self.inner)
    }
}

impl<W: Write> Write for SheetStream<W> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let n = self.inner.write(buf)?;
        self.bytes_written += n as u64;
        Ok(n)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.inner.flush()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counts_written_bytes() {
        let mut stream = SheetStream::new("Revenue", Vec::new());
        stream.write_all(b"a,b\n").unwrap();
        stream.write_all(b"c,d\n").unwrap();
        assert_eq!(stream.bytes_written(), 8);

        let (sheet, buf) = stream.into_parts();
        assert_eq!(sheet, "Revenue");
        assert_eq!(buf, b"a,b\nc,d\n");
    }

    #[test]
    fn test_location_is_optional() {
        let stream = SheetStream::new("Revenue", Vec::new());
        assert!(stream.location().is_none());

        let stream = stream.with_location("/tmp/out/Revenue.csv");
        assert_eq!(
            stream.location(),
            Some(Path::new("/tmp/out/Revenue.csv"))
        );
    }
}
