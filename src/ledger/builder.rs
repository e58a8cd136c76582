use crate::error::{LedgerError, RejectionReason, SourceError};
use crate::ledger::LoanLedger;
use crate::record::{validate_row, LoanRecord, RawRow};

use std::fmt;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RejectionEntry {
    pub row: RawRow,
    pub reason: RejectionReason,
}

impl fmt::Display for RejectionEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} | {}", self.row, self.reason)
    }
}

/// Result of one full pass over the source.
#[derive(Debug, Default)]
pub struct BuildOutcome {
    pub ledger: LoanLedger,
    pub rejections: Vec<RejectionEntry>,
}

impl BuildOutcome {
    pub fn accepted(&self) -> usize {
        self.ledger.len()
    }

    pub fn rejected(&self) -> usize {
        self.rejections.len()
    }

    /// Console summary of the pass. The rejection lines only appear when
    /// something was rejected.
    pub fn summary(&self, source: &Path, error_log: &Path) -> Vec<String> {
        let mut lines = Vec::new();

        if self.rejected() > 0 {
            lines.push(format!(
                "Found [{}] rows with errors when creating objects with data from file [{}]",
                self.rejected(),
                source.display()
            ));
            lines.push(format!(
                "Row with data and error has been written to file [{}]",
                error_log.display()
            ));
        }
        lines.push(format!(
            "Created [{}] loan records, rejected [{}] rows",
            self.accepted(),
            self.rejected()
        ));

        lines
    }

    /// `Some` when nothing was accepted and every report has to be skipped.
    pub fn no_data_message(&self, source: &Path) -> Option<String> {
        self.ledger.is_empty().then(|| {
            format!(
                "No data: no valid loan records in [{}], skipping reports",
                source.display()
            )
        })
    }
}

#[derive(Default)]
pub struct LedgerBuilder {
    records: Vec<LoanRecord>,
    rejections: Vec<RejectionEntry>,
}

impl LedgerBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Validates one row and files it as a record or a rejection.
    pub fn push(&mut self, raw: RawRow) {
        match validate_row(&raw) {
            Ok(record) => {
                log::debug!("Accepted loan: {record}");
                self.records.push(record);
            }
            Err(reason) => {
                log::warn!("Rejected row {raw}: {reason}");
                self.rejections.push(RejectionEntry { row: raw, reason });
            }
        }
    }

    pub fn accepted(&self) -> usize {
        self.records.len()
    }

    pub fn rejected(&self) -> usize {
        self.rejections.len()
    }

    /// Writes the rejection log (only when something was rejected) and hands
    /// back the finished ledger.
    pub fn finish(self, error_log: &Path) -> Result<BuildOutcome, LedgerError> {
        if !self.rejections.is_empty() {
            let write_failure = |source: std::io::Error| LedgerError::ErrorLogWriteFailure {
                path: error_log.to_path_buf(),
                source,
            };

            let file = File::create(error_log).map_err(write_failure)?;
            let mut writer = BufWriter::new(file);
            write_rejections(&self.rejections, &mut writer).map_err(write_failure)?;
            writer.flush().map_err(write_failure)?;

            log::debug!(
                "Wrote {} rejected rows to {}",
                self.rejections.len(),
                error_log.display()
            );
        }

        Ok(BuildOutcome {
            ledger: LoanLedger {
                records: self.records,
            },
            rejections: self.rejections,
        })
    }
}

pub fn write_rejections<W: Write>(
    rejections: &[RejectionEntry],
    mut writer: W,
) -> std::io::Result<()> {
    for entry in rejections {
        writeln!(writer, "{entry}")?;
    }
    Ok(())
}

/// Drains `rows` completely, then finishes the ledger. A read error from the
/// source aborts the pass before anything is written.
pub fn build_ledger<I>(rows: I, error_log: &Path) -> Result<BuildOutcome, LedgerError>
where
    I: IntoIterator<Item = Result<RawRow, SourceError>>,
{
    let mut builder = LedgerBuilder::new();

    for row in rows {
        builder.push(row?);
    }

    builder.finish(error_log)
}
