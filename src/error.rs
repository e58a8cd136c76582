use std::path::PathBuf;
use thiserror::Error;

/// Why a single row was turned away. Recoverable: the row is skipped.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RejectionReason {
    #[error("Invalid date format for \"Lånedato\": {0:?}")]
    InvalidDate(String),

    #[error("\"Låneperiode\" must be a non-negative integer, got {0:?}")]
    InvalidLoanPeriod(String),

    #[error("\"Forlenget\" must be a non-negative integer, got {0:?}")]
    InvalidExtension(String),

    #[error("\"Tilbakelevert\" must be in list: [\"Ja\", \"Nei\"], got {0:?}")]
    InvalidReturnedFlag(String),

    #[error("\"Sjanger\" must be in list: [\"fiksjon\", \"krim\", \"sakprosa\", \"fantasy\"], got {0:?}")]
    InvalidGenre(String),

    #[error("Missing column {0:?}")]
    MissingField(&'static str),
}

#[derive(Debug, Error)]
pub enum SourceError {
    #[error("File '{0}' does not exist")]
    SourceFileNotFound(PathBuf),

    #[error("File '{0}' is not a CSV file")]
    NotACsvFile(PathBuf),

    #[error("Could not read source file: {0}")]
    SourceFileUnreadable(#[from] csv::Error),
}

#[derive(Debug, Error)]
pub enum LedgerError {
    #[error(transparent)]
    Source(#[from] SourceError),

    #[error("Could not write rejected rows to '{path}': {source}")]
    ErrorLogWriteFailure {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ReportError {
    #[error("Ledger is empty, no average loan length to compute")]
    EmptyLedgerForAverage,
}
