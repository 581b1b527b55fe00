use std::{io, result};

use camino::Utf8PathBuf;
use zip::result::ZipError;

/// Pre-flight failures. Each variant names the offending path and is raised
/// before any archive or document object exists.
#[derive(Debug, thiserror::Error)]
pub enum ValidationError {
    #[error("source archive `{0}` does not exist")]
    SourceMissing(Utf8PathBuf),

    #[error("source `{0}` is not a comic book archive name (expected `.cbz`)")]
    SourceNotArchive(Utf8PathBuf),

    #[error("destination `{0}` is not a pdf file name (expected `.pdf`)")]
    DestinationNotPdf(Utf8PathBuf),

    #[error("source archive `{path}` cannot be read: {source}")]
    SourceUnreadable {
        path: Utf8PathBuf,
        source: io::Error,
    },

    #[error("destination `{0}` already exists")]
    DestinationExists(Utf8PathBuf),

    #[error("destination `{0}` cannot be written to")]
    DestinationReadOnly(Utf8PathBuf),
}

/// Everything the persister can trip over: creating the destination file or
/// serializing the document into it.
#[derive(Debug, thiserror::Error)]
pub enum PersistSource {
    #[error(transparent)]
    Io(#[from] io::Error),

    #[error(transparent)]
    Pdf(#[from] printpdf::Error),
}

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error("archive `{path}` cannot be read: {source}")]
    Archive {
        path: Utf8PathBuf,
        #[source]
        source: ZipError,
    },

    #[error("entry `{entry}` cannot be decoded: {source}")]
    Image {
        entry: String,
        #[source]
        source: image::ImageError,
    },

    #[error("document cannot be written to `{path}`: {source}")]
    Persist {
        path: Utf8PathBuf,
        #[source]
        source: PersistSource,
    },
}

pub type Result<T, E = Error> = result::Result<T, E>;
