use std::fs::File;

use camino::Utf8Path;
use tracing::error;

use crate::{errors::ValidationError, ARCHIVE_SUFFIX, DOCUMENT_SUFFIX};

/// Runs every pre-flight check, short-circuiting on the first failure.
/// Emits one diagnostic record per failure; on success nothing is logged and
/// nothing has been opened or created.
///
/// ## Errors
///
/// Fails with the `ValidationError` variant matching the first failed check
pub fn preflight(
    source: &Utf8Path,
    destination: &Utf8Path,
    overwrite: bool,
) -> Result<(), ValidationError> {
    let checks = run_checks(source, destination, overwrite);

    if let Err(err) = &checks {
        error!("{err}");
    }

    checks
}

fn run_checks(
    source: &Utf8Path,
    destination: &Utf8Path,
    overwrite: bool,
) -> Result<(), ValidationError> {
    if !source.exists() {
        return Err(ValidationError::SourceMissing(source.to_owned()));
    }

    if !name_ends_with(source, ARCHIVE_SUFFIX) {
        return Err(ValidationError::SourceNotArchive(source.to_owned()));
    }

    if !name_ends_with(destination, DOCUMENT_SUFFIX) {
        return Err(ValidationError::DestinationNotPdf(destination.to_owned()));
    }

    // The readability check is an actual open attempt, closed right away.
    if let Err(source_err) = File::open(source) {
        return Err(ValidationError::SourceUnreadable {
            path: source.to_owned(),
            source: source_err,
        });
    }

    if destination.exists() {
        if !overwrite {
            return Err(ValidationError::DestinationExists(destination.to_owned()));
        }

        if let Ok(metadata) = destination.metadata() {
            if metadata.permissions().readonly() {
                return Err(ValidationError::DestinationReadOnly(
                    destination.to_owned(),
                ));
            }
        }
    }

    Ok(())
}

fn name_ends_with(path: &Utf8Path, suffix: &str) -> bool {
    path.file_name()
        .is_some_and(|name| name.to_ascii_lowercase().ends_with(suffix))
}
