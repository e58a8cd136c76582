//! Read-only aggregations over a finished `LoanLedger`. Every report rescans
//! the full ledger and none of them mutate it, so they can run in any order.

use crate::error::ReportError;
use crate::ledger::LoanLedger;
use crate::record::Genre;

use rust_decimal::{Decimal, RoundingStrategy};
use std::collections::HashMap;

/// Sum of extension days over every loan. Zero for an empty ledger.
pub fn total_extension_days(ledger: &LoanLedger) -> u64 {
    ledger
        .iter()
        .map(|record| u64::from(record.extension_days()))
        .sum()
}

/// Loans that are not returned, counted per genre in first-seen genre order.
pub fn not_returned_by_genre(ledger: &LoanLedger) -> Vec<(Genre, usize)> {
    let mut counts: Vec<(Genre, usize)> = Vec::new();

    for record in ledger.iter().filter(|r| !r.returned_on_time()) {
        match counts.iter_mut().find(|(genre, _)| *genre == record.genre()) {
            Some((_, count)) => *count += 1,
            None => counts.push((record.genre(), 1)),
        }
    }

    counts
}

/// Mean effective loan length in days, rounded to two decimals.
pub fn average_loan_length(ledger: &LoanLedger) -> Result<Decimal, ReportError> {
    if ledger.is_empty() {
        return Err(ReportError::EmptyLedgerForAverage);
    }

    let total: u64 = ledger.iter().map(|r| r.effective_loan_days()).sum();
    let average = Decimal::from(total) / Decimal::from(ledger.len() as u64);

    Ok(average.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero))
}

/// `"<title>, <borrower full name>"` for every loan not returned, in ledger order.
pub fn not_returned_list(ledger: &LoanLedger) -> Vec<String> {
    ledger
        .iter()
        .filter(|r| !r.returned_on_time())
        .map(|r| format!("{}, {}", r.title(), r.borrower_full_name()))
        .collect()
}

/// Loan count per exact title, most loaned first. Equal counts are ordered by
/// title, ignoring case.
pub fn most_loaned_books(ledger: &LoanLedger) -> Vec<(String, usize)> {
    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut counts: Vec<(String, usize)> = Vec::new();

    for record in ledger.iter() {
        match index.get(record.title()) {
            Some(&i) => counts[i].1 += 1,
            None => {
                index.insert(record.title(), counts.len());
                counts.push((record.title().to_string(), 1));
            }
        }
    }

    counts.sort_by_cached_key(|(title, count)| (std::cmp::Reverse(*count), title.to_lowercase()));
    counts
}
