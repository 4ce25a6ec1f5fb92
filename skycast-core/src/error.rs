/// Errors surfaced by the core library.
///
/// Every variant is non-fatal: the screen controller turns them into a
/// user-visible message and stays interactive.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// No API key could be resolved, or the config file is unreadable.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// The location provider refused to share the device position.
    #[error("Permission to access location was denied")]
    PermissionDenied,

    /// Any fetch failure: transport, non-success status, or a response
    /// that is missing the fields we need.
    #[error("Network error: {0}")]
    Network(String),
}

impl Error {
    pub(crate) fn network(msg: impl Into<String>) -> Self {
        Error::Network(msg.into())
    }
}
