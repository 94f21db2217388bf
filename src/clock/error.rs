use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClockError {
    #[error("invalid clock settings: {0}")]
    Settings(#[from] serde_json::Error),

    #[error("invalid hex color {0:?} (expected #rrggbb)")]
    InvalidColor(String),

    #[error("digit slot {0} out of range")]
    SlotOutOfRange(usize),
}

pub type Result<T, E = ClockError> = std::result::Result<T, E>;
