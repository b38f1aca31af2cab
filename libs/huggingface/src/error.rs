use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("prompt cannot be empty")]
    InvalidInput,

    #[error("Hugging Face token not found, set HF_TOKEN in .env or environment")]
    MissingCredential,

    #[error("failed to generate image after {attempts} attempts: {source}")]
    RequestFailed {
        attempts: u32,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}
