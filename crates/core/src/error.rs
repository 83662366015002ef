use thiserror::Error;

/// Top-level error type used across the whole workspace.
///
/// The layout engine itself never fails; errors only come from the layers
/// around it (config files, the event stream).
#[derive(Debug, Error)]
pub enum PowerbarError {
    #[error("config error: {0}")]
    Config(String),

    #[error("protocol error: {0}")]
    Protocol(String),

    #[error("I/O error: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },
}

pub type Result<T, E = PowerbarError> = std::result::Result<T, E>;
