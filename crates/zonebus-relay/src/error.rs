/// Errors that can occur while serving the link.
///
/// Bus failures never surface here: `process_command` maps them to reply
/// bytes, because the protocol reports every bus outcome to the host as
/// exactly one byte on the link.
#[derive(Debug, thiserror::Error)]
pub enum RelayError {
    /// Link-level error.
    #[error("link error: {0}")]
    Link(#[from] zonebus_link::LinkError),
}

pub type Result<T> = std::result::Result<T, RelayError>;
