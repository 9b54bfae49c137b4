#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("{0}")]
    Validate(#[from] validator::ValidationErrors),

    #[error("fallback number `{0}` contains no digits")]
    InvalidFallbackNumber(String),
}

pub type Result<T> = std::result::Result<T, Error>;
