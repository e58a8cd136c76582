pub mod builder;
pub mod reports;


pub use builder::{build_ledger, BuildOutcome, LedgerBuilder, RejectionEntry};

use crate::record::LoanRecord;

/// Every accepted loan of one source file, in source order. Read-only once built.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoanLedger {
    records: Vec<LoanRecord>,
}

impl LoanLedger {
    pub fn records(&self) -> &[LoanRecord] {
        &self.records
    }

    pub fn iter(&self) -> std::slice::Iter<'_, LoanRecord> {
        self.records.iter()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl FromIterator<LoanRecord> for LoanLedger {
    fn from_iter<I: IntoIterator<Item = LoanRecord>>(iter: I) -> Self {
        Self {
            records: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a LoanLedger {
    type Item = &'a LoanRecord;
    type IntoIter = std::slice::Iter<'a, LoanRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
