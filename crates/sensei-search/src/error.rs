use thiserror::Error;

#[derive(Error, Debug)]
pub enum SearchError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Search backend returned {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Invalid search configuration: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, SearchError>;
