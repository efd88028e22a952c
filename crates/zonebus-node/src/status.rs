/// The peripheral's one-byte "last command" status register.
///
/// Overwritten on every received command, never accumulated. The wire values
/// are part of the protocol: 0x00 doubles as the relay's CONFIRM code, and
/// 0x03 is numerically identical to the relay's address-error code. The
/// host tells them apart by context only.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Status {
    /// Last command was recognized and executed.
    #[default]
    Ok,
    /// Last command byte was not recognized.
    UnknownCommand,
}

impl Status {
    pub const OK_BYTE: u8 = 0x00;
    pub const UNKNOWN_COMMAND_BYTE: u8 = 0x03;

    /// Wire value served on a bus read.
    pub fn as_byte(self) -> u8 {
        match self {
            Status::Ok => Self::OK_BYTE,
            Status::UnknownCommand => Self::UNKNOWN_COMMAND_BYTE,
        }
    }

    /// Decode a wire value, if it is a defined status.
    pub fn from_byte(byte: u8) -> Option<Self> {
        match byte {
            Self::OK_BYTE => Some(Status::Ok),
            Self::UNKNOWN_COMMAND_BYTE => Some(Status::UnknownCommand),
            _ => None,
        }
    }
}
