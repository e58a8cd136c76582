pub mod config;
pub mod error;
pub mod ledger;
pub mod record;

use crate::error::SourceError;
use crate::record::RawRow;
use csv::ReaderBuilder;
use std::fs::File;
use std::io::ErrorKind;
use std::path::Path;

/// Rejects paths that do not exist or do not carry a `.csv` extension.
pub fn check_source_path(path: &Path) -> Result<(), SourceError> {
    if !path.exists() {
        return Err(SourceError::SourceFileNotFound(path.to_path_buf()));
    }

    let is_csv = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("csv"));

    if !is_csv {
        return Err(SourceError::NotACsvFile(path.to_path_buf()));
    }

    Ok(())
}

/// Lazily reads `path` one data line at a time. The header line supplies the
/// keys of every `RawRow`; short lines simply lack the trailing columns.
pub fn stream_rows(
    path: impl AsRef<Path>,
) -> Result<impl Iterator<Item = Result<RawRow, SourceError>>, SourceError> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|e| match e.kind() {
        ErrorKind::NotFound => SourceError::SourceFileNotFound(path.to_path_buf()),
        _ => SourceError::SourceFileUnreadable(e.into()),
    })?;

    let mut rdr = ReaderBuilder::new()
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(file);
    let headers = rdr.headers()?.clone();

    Ok(rdr.into_records().map(move |result| {
        let record = result?;
        Ok(headers.iter().zip(record.iter()).collect::<RawRow>())
    }))
}
