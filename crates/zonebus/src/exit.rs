use std::fmt;
use std::io;

use zonebus_link::LinkError;

// Fixed CLI exit-code set, aligned with sysexits-style conventions.
pub const SUCCESS: i32 = 0;
pub const FAILURE: i32 = 1;
pub const TRANSPORT_ERROR: i32 = 3;
pub const USAGE: i32 = 64;
pub const TIMEOUT: i32 = 124;
pub const INTERNAL: i32 = 125;

pub type CliResult<T> = Result<T, CliError>;

#[derive(Debug)]
pub struct CliError {
    pub code: i32,
    pub message: String,
}

impl CliError {
    pub fn new(code: i32, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for CliError {}

pub fn io_error(context: &str, err: io::Error) -> CliError {
    let code = match err.kind() {
        io::ErrorKind::NotFound | io::ErrorKind::PermissionDenied => FAILURE,
        io::ErrorKind::TimedOut | io::ErrorKind::WouldBlock => TIMEOUT,
        _ => INTERNAL,
    };
    CliError::new(code, format!("{context}: {err}"))
}

pub fn link_error(context: &str, err: LinkError) -> CliError {
    match err {
        LinkError::Io(source) => io_error(context, source),
        LinkError::ConnectionClosed => CliError::new(TRANSPORT_ERROR, format!("{context}: {err}")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn timeouts_map_to_timeout_exit_code() {
        let err = io_error("read", io::Error::from(io::ErrorKind::TimedOut));
        assert_eq!(err.code, TIMEOUT);
    }

    #[test]
    fn closed_link_maps_to_transport_exit_code() {
        let err = link_error("serve", LinkError::ConnectionClosed);
        assert_eq!(err.code, TRANSPORT_ERROR);
    }
}
