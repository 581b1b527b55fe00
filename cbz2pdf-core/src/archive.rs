use std::{fs::File, io::Read};

use bytes::Bytes;
use camino::{Utf8Path, Utf8PathBuf};
use tracing::debug;
use zip::{result::ZipError, ZipArchive};

use crate::{
    errors::{Error, Result},
    PAGE_SUFFIX,
};

/// A comic book archive opened for a single conversion pass. The underlying
/// file handle is released on drop, on every exit path.
#[derive(Debug)]
pub struct PageArchive {
    path: Utf8PathBuf,
    archive: ZipArchive<File>,
}

impl PageArchive {
    /// Opens the archive at `path` for reading.
    ///
    /// ## Errors
    ///
    /// Fails with `Error::Archive` if the file cannot be opened or is not a
    /// structurally valid zip
    pub fn open(path: impl AsRef<Utf8Path>) -> Result<Self> {
        let path = path.as_ref().to_owned();

        let file = File::open(&path).map_err(|err| Error::Archive {
            path: path.clone(),
            source: ZipError::Io(err),
        })?;

        let archive = ZipArchive::new(file).map_err(|err| Error::Archive {
            path: path.clone(),
            source: err,
        })?;

        Ok(Self { path, archive })
    }

    /// Total number of entries in the archive, qualifying or not.
    #[must_use]
    pub fn len(&self) -> usize {
        self.archive.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Walks the archive's entries in its own enumeration order (the order of
    /// the zip central directory, never re-sorted), skipping directories and
    /// entries whose name does not end in the page image suffix, and hands
    /// each qualifying entry's name and bytes to `f`.
    ///
    /// ## Errors
    ///
    /// Returns the closure's error immediately, or `Error::Archive` if an
    /// entry cannot be enumerated or read
    pub fn try_for_each_page<F>(&mut self, mut f: F) -> Result<()>
    where
        F: FnMut(&str, Bytes) -> Result<()>,
    {
        for index in 0..self.archive.len() {
            let mut entry = self.archive.by_index(index).map_err(|err| Error::Archive {
                path: self.path.clone(),
                source: err,
            })?;

            if !is_page_entry(entry.name(), entry.is_dir()) {
                debug!("skipping entry `{}`", entry.name());
                continue;
            }

            let name = entry.name().to_owned();

            let mut buf = Vec::with_capacity(usize::try_from(entry.size()).unwrap_or(0));
            entry.read_to_end(&mut buf).map_err(|err| Error::Archive {
                path: self.path.clone(),
                source: ZipError::Io(err),
            })?;

            drop(entry);

            f(&name, buf.into())?;
        }

        Ok(())
    }
}

fn is_page_entry(name: &str, is_dir: bool) -> bool {
    !is_dir && name.to_ascii_lowercase().ends_with(PAGE_SUFFIX)
}
