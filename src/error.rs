//! Error types for speedread operations.

use thiserror::Error;

/// Errors that abort an EPUB parse.
///
/// Problems with individual chapters are never reported here; those chapters
/// are skipped and the parse continues.
#[derive(Error, Debug)]
pub enum Error {
    /// The input bytes are not a readable ZIP archive.
    #[error("Invalid container format: {0}")]
    ContainerFormat(#[from] zip::result::ZipError),

    /// `META-INF/container.xml` is missing or names no package document.
    #[error("Invalid EPUB: {0}")]
    InvalidContainer(String),

    /// The package document named by the descriptor cannot be read.
    #[error("Invalid EPUB package: {0}")]
    InvalidPackage(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
