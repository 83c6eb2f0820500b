use thiserror::Error;

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("catalog backend unavailable: {0}")]
    Unavailable(String),

    #[error("catalog query failed: {0}")]
    Query(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, CatalogError>;
