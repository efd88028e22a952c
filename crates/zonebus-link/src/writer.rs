use std::io::{ErrorKind, Write};

use bytes::BytesMut;

use crate::codec::{CommandFrame, FRAME_SIZE};
use crate::error::{LinkError, Result};

/// Writes link traffic to any `Write` stream.
pub struct LinkWriter<T> {
    inner: T,
    buf: BytesMut,
}

impl<T: Write> LinkWriter<T> {
    pub fn new(inner: T) -> Self {
        Self {
            inner,
            buf: BytesMut::with_capacity(FRAME_SIZE),
        }
    }

    /// Encode and send a request frame (blocking). Host side of the link.
    pub fn send_frame(&mut self, frame: &CommandFrame) -> Result<()> {
        self.buf.clear();
        frame.encode(&mut self.buf);
        self.write_buffered()
    }

    /// Send a single reply byte (blocking). Relay side of the link.
    pub fn send_reply(&mut self, reply: u8) -> Result<()> {
        self.buf.clear();
        self.buf.extend_from_slice(&[reply]);
        self.write_buffered()
    }

    fn write_buffered(&mut self) -> Result<()> {
        let mut offset = 0usize;
        while offset < self.buf.len() {
            match self.inner.write(&self.buf[offset..]) {
                Ok(0) => return Err(LinkError::ConnectionClosed),
                Ok(n) => offset += n,
                Err(err) if err.kind() == ErrorKind::Interrupted => continue,
                Err(err) if err.kind() == ErrorKind::WouldBlock => continue,
                Err(err) => return Err(LinkError::Io(err)),
            }
        }
        self.flush()
    }

    /// Flush the underlying stream.
    pub fn flush(&mut self) -> Result<()> {
        loop {
            match self.inner.flush() {
                Ok(()) => return Ok(()),
                Err(err) if err.kind() == ErrorKind::Interrupted => continue,
                Err(err) if err.kind() == ErrorKind::WouldBlock => continue,
                Err(err) => return Err(LinkError::Io(err)),
            }
        }
    }

    /// Borrow the underlying stream.
    pub fn get_ref(&self) -> &T {
        &self.inner
    }

    /// Mutably borrow the underlying stream.
    pub fn get_mut(&mut self) -> &mut T {
        &mut self.inner
    }

    /// Consume the writer and return the inner stream.
    pub fn into_inner(self) -> T {
        self.inner
    }
}
