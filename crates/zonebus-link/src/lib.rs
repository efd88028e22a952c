//! Point-to-point host link framing.
//!
//! The link carries exactly two shapes: a fixed 2-byte request frame
//! `{zone, command}` from host to relay, and a single raw reply byte back.
//! No delimiters, no checksums, no length prefix; the frame size is the
//! protocol. [`LinkReader`] and [`LinkWriter`] handle partial reads and
//! interrupted syscalls so callers always see whole frames.

pub mod codec;
pub mod error;
pub mod reader;
pub mod writer;

pub use codec::{decode_frame, CommandFrame, FRAME_SIZE};
pub use error::{LinkError, Result};
pub use reader::LinkReader;
pub use writer::LinkWriter;
