use thiserror::Error;

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, Error)]
pub enum Error {
    /// The output device is not running (suspended, or never resumed).
    #[error("audio output is unavailable")]
    AudioUnavailable,

    #[error("unknown timbre: {0}")]
    UnknownTimbre(String),

    #[error("unknown scale: {0}")]
    UnknownScale(String),

    #[error("unknown genre: {0}")]
    UnknownGenre(String),

    #[error("failed to encode bounce: {0}")]
    Export(#[from] hound::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
