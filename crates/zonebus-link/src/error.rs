/// Errors that can occur on the point-to-point link.
#[derive(Debug, thiserror::Error)]
pub enum LinkError {
    /// An I/O error occurred while reading or writing the link.
    #[error("link I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The link closed before a complete frame was received.
    #[error("link closed (incomplete frame)")]
    ConnectionClosed,
}

impl LinkError {
    /// Whether this error means the peer went silent (timed out or closed)
    /// rather than the link failing outright.
    pub fn is_silence(&self) -> bool {
        match self {
            LinkError::ConnectionClosed => true,
            LinkError::Io(err) => matches!(
                err.kind(),
                std::io::ErrorKind::TimedOut | std::io::ErrorKind::WouldBlock
            ),
        }
    }
}

pub type Result<T> = std::result::Result<T, LinkError>;
