#![deny(clippy::all)]
#![deny(clippy::pedantic)]

use camino::Utf8Path;
use tracing::info;

pub use crate::archive::PageArchive;
pub use crate::errors::{Error, Result, ValidationError};
pub use crate::pdf::DocumentBuilder;

pub mod archive;
pub mod errors;
pub mod pdf;
pub mod validate;

/// Case-insensitive file-name suffix identifying a comic book archive.
pub const ARCHIVE_SUFFIX: &str = ".cbz";

/// Case-insensitive file-name suffix identifying the output document.
pub const DOCUMENT_SUFFIX: &str = ".pdf";

/// Case-insensitive suffix an archive entry must carry to become a page.
pub const PAGE_SUFFIX: &str = ".jpg";

/// Success summary of one conversion call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConversionReport {
    /// Number of pages written to the destination document.
    pub pages: usize,
}

/// Converts the comic book archive at `source` into a pdf at `destination`,
/// one page per qualifying entry, pages in the archive's enumeration order,
/// each page sized to its image's pixel dimensions.
///
/// The conversion is strict: the first undecodable page image aborts the
/// whole call. Archive and document handles are scoped to this call and
/// released on every exit path; the destination file is only created once
/// every page has been assembled, so a failed conversion never leaves a
/// partial document behind.
///
/// ## Errors
///
/// Fails with the error kind matching the stage that broke: `Validation`
/// before anything is opened, `Archive` if the zip cannot be read, `Image`
/// if an entry does not decode, `Persist` if the document cannot be written
pub fn convert(
    source: impl AsRef<Utf8Path>,
    destination: impl AsRef<Utf8Path>,
    overwrite: bool,
) -> Result<ConversionReport> {
    let source = source.as_ref();
    let destination = destination.as_ref();

    validate::preflight(source, destination, overwrite)?;

    let mut archive = PageArchive::open(source)?;
    let mut doc = DocumentBuilder::new(destination.file_stem().unwrap_or("comic"));

    archive.try_for_each_page(|name, bytes| doc.append_page(name, &bytes))?;

    let pages = doc.page_count();
    info!("writing {pages} pages to `{destination}`");

    doc.save(destination)?;

    Ok(ConversionReport { pages })
}
