use thiserror::Error as ThisError;

#[derive(ThisError, Debug)]
pub enum PanelError {
    #[error("Transport failure talking to the device: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Device rejected write with status {0}")]
    WriteRejected(u16),

    #[error("Invalid property href: {0}")]
    InvalidHref(#[from] url::ParseError),

    #[error(transparent)]
    SerdeJsonError(#[from] serde_json::Error),

    #[error(transparent)]
    IoError(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, PanelError>;
