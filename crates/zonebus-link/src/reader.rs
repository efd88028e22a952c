use std::io::{ErrorKind, Read};

use bytes::BytesMut;

use crate::codec::{decode_frame, CommandFrame};
use crate::error::{LinkError, Result};

const READ_CHUNK_SIZE: usize = 64;

/// Reads link traffic from any `Read` stream.
///
/// Handles partial reads internally: a frame split across reads is buffered
/// until complete, never dropped. EOF with a partial frame pending is
/// reported as `ConnectionClosed`.
pub struct LinkReader<T> {
    inner: T,
    buf: BytesMut,
}

impl<T: Read> LinkReader<T> {
    pub fn new(inner: T) -> Self {
        Self {
            inner,
            buf: BytesMut::with_capacity(READ_CHUNK_SIZE),
        }
    }

    /// Read the next complete 2-byte request frame (blocking).
    pub fn read_frame(&mut self) -> Result<CommandFrame> {
        loop {
            if let Some(frame) = decode_frame(&mut self.buf) {
                return Ok(frame);
            }
            self.fill()?;
        }
    }

    /// Read a single reply byte (blocking). Host side of the link.
    pub fn read_reply(&mut self) -> Result<u8> {
        loop {
            if !self.buf.is_empty() {
                return Ok(self.buf.split_to(1)[0]);
            }
            self.fill()?;
        }
    }

    fn fill(&mut self) -> Result<()> {
        let mut chunk = [0u8; READ_CHUNK_SIZE];
        let read = match self.inner.read(&mut chunk) {
            Ok(n) => n,
            Err(err) if err.kind() == ErrorKind::Interrupted => return Ok(()),
            Err(err) => return Err(LinkError::Io(err)),
        };

        if read == 0 {
            return Err(LinkError::ConnectionClosed);
        }

        self.buf.extend_from_slice(&chunk[..read]);
        Ok(())
    }

    /// Borrow the underlying stream.
    pub fn get_ref(&self) -> &T {
        &self.inner
    }

    /// Mutably borrow the underlying stream.
    pub fn get_mut(&mut self) -> &mut T {
        &mut self.inner
    }

    /// Consume the reader and return the inner stream.
    pub fn into_inner(self) -> T {
        self.inner
    }
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use super::*;

    #[test]
    fn read_single_frame() {
        let mut reader = LinkReader::new(Cursor::new(vec![5u8, 0x05]));
        let frame = reader.read_frame().unwrap();
        assert_eq!(frame, CommandFrame::new(5, 0x05));
    }

    #[test]
    fn read_back_to_back_frames() {
        let mut reader = LinkReader::new(Cursor::new(vec![1, 0xAA, 2, 0xBB, 3, 0xCC]));
        assert_eq!(reader.read_frame().unwrap(), CommandFrame::new(1, 0xAA));
        assert_eq!(reader.read_frame().unwrap(), CommandFrame::new(2, 0xBB));
        assert_eq!(reader.read_frame().unwrap(), CommandFrame::new(3, 0xCC));
    }

    #[test]
    fn frame_split_across_reads_is_not_dropped() {
        let reader = ByteByByteReader {
            bytes: vec![7, 0x42],
            pos: 0,
        };
        let mut reader = LinkReader::new(reader);
        assert_eq!(reader.read_frame().unwrap(), CommandFrame::new(7, 0x42));
    }

    #[test]
    fn eof_before_any_data() {
        let mut reader = LinkReader::new(Cursor::new(Vec::<u8>::new()));
        let err = reader.read_frame().unwrap_err();
        assert!(matches!(err, LinkError::ConnectionClosed));
    }

    #[test]
    fn eof_mid_frame() {
        let mut reader = LinkReader::new(Cursor::new(vec![5u8]));
        let err = reader.read_frame().unwrap_err();
        assert!(matches!(err, LinkError::ConnectionClosed));
    }

    #[test]
    fn read_reply_single_byte() {
        let mut reader = LinkReader::new(Cursor::new(vec![0x03u8]));
        assert_eq!(reader.read_reply().unwrap(), 0x03);
    }

    #[test]
    fn interrupted_read_retries() {
        let reader = InterruptedThenData {
            interrupted: false,
            bytes: vec![4, 0x10],
            pos: 0,
        };
        let mut reader = LinkReader::new(reader);
        assert_eq!(reader.read_frame().unwrap(), CommandFrame::new(4, 0x10));
    }

    #[test]
    fn timeout_propagates_as_io_error() {
        let mut reader = LinkReader::new(AlwaysTimedOut);
        let err = reader.read_reply().unwrap_err();
        assert!(matches!(err, LinkError::Io(ref e) if e.kind() == ErrorKind::TimedOut));
        assert!(err.is_silence());
    }

    struct ByteByByteReader {
        bytes: Vec<u8>,
        pos: usize,
    }

    impl Read for ByteByByteReader {
        fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
            if self.pos >= self.bytes.len() || buf.is_empty() {
                return Ok(0);
            }
            buf[0] = self.bytes[self.pos];
            self.pos += 1;
            Ok(1)
        }
    }

    struct InterruptedThenData {
        interrupted: bool,
        bytes: Vec<u8>,
        pos: usize,
    }

    impl Read for InterruptedThenData {
        fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
            if !self.interrupted {
                self.interrupted = true;
                return Err(std::io::Error::from(ErrorKind::Interrupted));
            }
            let remaining = self.bytes.len() - self.pos;
            let n = remaining.min(buf.len());
            buf[..n].copy_from_slice(&self.bytes[self.pos..self.pos + n]);
            self.pos += n;
            Ok(n)
        }
    }

    struct AlwaysTimedOut;

    impl Read for AlwaysTimedOut {
        fn read(&mut self, _buf: &mut [u8]) -> std::io::Result<usize> {
            Err(std::io::Error::from(ErrorKind::TimedOut))
        }
    }
}
