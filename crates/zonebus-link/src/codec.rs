use bytes::{Buf, BufMut, BytesMut};

/// Wire size of a request frame: zone byte + command byte.
pub const FRAME_SIZE: usize = 2;

/// The host's request: which zone to target and the command byte to deliver.
///
/// The command byte is opaque at this layer; only the addressed peripheral
/// assigns it meaning.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommandFrame {
    /// Destination zone selector.
    pub zone: u8,
    /// Opaque command code, forwarded verbatim.
    pub command: u8,
}

impl CommandFrame {
    pub fn new(zone: u8, command: u8) -> Self {
        Self { zone, command }
    }

    /// Append this frame's wire form to `dst`.
    pub fn encode(&self, dst: &mut BytesMut) {
        dst.reserve(FRAME_SIZE);
        dst.put_u8(self.zone);
        dst.put_u8(self.command);
    }
}

/// Decode one frame from a buffer.
///
/// Returns `None` if the buffer doesn't hold a complete frame yet. There is
/// no invalid wire form (any two bytes are a frame), so decoding cannot
/// fail. On success, consumes the frame bytes from the buffer.
pub fn decode_frame(src: &mut BytesMut) -> Option<CommandFrame> {
    if src.len() < FRAME_SIZE {
        return None;
    }

    let zone = src.get_u8();
    let command = src.get_u8();
    Some(CommandFrame { zone, command })
}
