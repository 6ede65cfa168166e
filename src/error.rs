//! Error taxonomy for folio-tui.
//!
//! Content loading is the only fallible startup step; everything after
//! mount is terminal I/O. Animation and theme operations cannot fail and
//! take no `Result`.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("content parse error: {0}")]
    Content(#[from] toml::de::Error),
    #[error("invalid content: {0}")]
    InvalidContent(String),
}

pub type Result<T> = std::result::Result<T, Error>;
