use crate::config::{
    COL_EXTENSION, COL_FIRST_NAME, COL_GENRE, COL_LAST_NAME, COL_LOAN_DATE, COL_LOAN_PERIOD,
    COL_RETURNED, COL_TITLE, DEFAULT_EXTENSION_DAYS, DEFAULT_LOAN_PERIOD_DAYS, GENRE_CRIME,
    GENRE_FANTASY, GENRE_FICTION, GENRE_NON_FICTION, LOAN_DATE_FORMAT, RETURNED_NO, RETURNED_YES,
};
use crate::error::RejectionReason;

use chrono::{Datelike, NaiveDate};
use std::fmt;
use std::str::FromStr;

/// One data line of the source file, keyed by header name in header order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawRow {
    fields: Vec<(String, String)>,
}

impl RawRow {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, column: impl Into<String>, value: impl Into<String>) {
        let column = column.into();
        let value = value.into();

        match self.fields.iter_mut().find(|(c, _)| *c == column) {
            Some((_, v)) => *v = value,
            None => self.fields.push((column, value)),
        }
    }

    /// `None` means the column is absent, which is not the same as an empty value.
    pub fn get(&self, column: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(c, _)| c == column)
            .map(|(_, v)| v.as_str())
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for RawRow {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut row = RawRow::new();
        for (column, value) in iter {
            row.insert(column, value);
        }
        row
    }
}

impl fmt::Display for RawRow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{")?;
        for (i, (column, value)) in self.fields.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            // Debug escapes embedded newlines so a row always stays on one line
            write!(f, "{}: {:?}", column, value)?;
        }
        write!(f, "}}")
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Genre {
    Fiction,
    Crime,
    NonFiction,
    Fantasy,
}

impl Genre {
    pub fn as_str(&self) -> &'static str {
        match self {
            Genre::Fiction => GENRE_FICTION,
            Genre::Crime => GENRE_CRIME,
            Genre::NonFiction => GENRE_NON_FICTION,
            Genre::Fantasy => GENRE_FANTASY,
        }
    }
}

impl FromStr for Genre {
    type Err = RejectionReason;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            GENRE_FICTION => Ok(Genre::Fiction),
            GENRE_CRIME => Ok(Genre::Crime),
            GENRE_NON_FICTION => Ok(Genre::NonFiction),
            GENRE_FANTASY => Ok(Genre::Fantasy),
            _ => Err(RejectionReason::InvalidGenre(s.to_string())),
        }
    }
}

impl fmt::Display for Genre {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A validated book loan. Only `validate_row` builds one, and nothing mutates it afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoanRecord {
    borrower_first_name: String,
    borrower_last_name: String,
    title: String,
    genre: Genre,
    loan_date: NaiveDate,
    loan_period_days: u32,
    extension_days: u32,
    returned_on_time: bool,
}

impl LoanRecord {
    pub fn borrower_first_name(&self) -> &str {
        &self.borrower_first_name
    }

    pub fn borrower_last_name(&self) -> &str {
        &self.borrower_last_name
    }

    pub fn borrower_full_name(&self) -> String {
        format!("{} {}", self.borrower_first_name, self.borrower_last_name)
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn genre(&self) -> Genre {
        self.genre
    }

    pub fn loan_date(&self) -> NaiveDate {
        self.loan_date
    }

    pub fn loan_period_days(&self) -> u32 {
        self.loan_period_days
    }

    pub fn extension_days(&self) -> u32 {
        self.extension_days
    }

    pub fn returned_on_time(&self) -> bool {
        self.returned_on_time
    }

    /// Base loan period plus extension days.
    pub fn effective_loan_days(&self) -> u64 {
        u64::from(self.loan_period_days) + u64::from(self.extension_days)
    }
}

impl fmt::Display for LoanRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} was loaned out to {} on date {}",
            self.title,
            self.borrower_full_name(),
            self.loan_date.format(LOAN_DATE_FORMAT)
        )
    }
}

impl TryFrom<&RawRow> for LoanRecord {
    type Error = RejectionReason;

    fn try_from(raw: &RawRow) -> Result<Self, Self::Error> {
        validate_row(raw)
    }
}

/// Turns one raw row into a `LoanRecord`. Field checks are reported in the
/// order date, loan period, extension, returned flag, genre.
pub fn validate_row(raw: &RawRow) -> Result<LoanRecord, RejectionReason> {
    let first_name = required(raw, COL_FIRST_NAME)?;
    let last_name = required(raw, COL_LAST_NAME)?;
    let title = required(raw, COL_TITLE)?;
    let genre = required(raw, COL_GENRE)?;
    let loan_date = required(raw, COL_LOAN_DATE)?;
    let returned = required(raw, COL_RETURNED)?;

    let loan_date = parse_loan_date(loan_date)?;
    let loan_period_days = parse_days(
        raw.get(COL_LOAN_PERIOD),
        DEFAULT_LOAN_PERIOD_DAYS,
        RejectionReason::InvalidLoanPeriod,
    )?;
    let extension_days = parse_days(
        raw.get(COL_EXTENSION),
        DEFAULT_EXTENSION_DAYS,
        RejectionReason::InvalidExtension,
    )?;
    let returned_on_time = parse_returned(returned)?;
    let genre = genre.parse::<Genre>()?;

    Ok(LoanRecord {
        borrower_first_name: first_name.to_string(),
        borrower_last_name: last_name.to_string(),
        title: title.to_string(),
        genre,
        loan_date,
        loan_period_days,
        extension_days,
        returned_on_time,
    })
}

fn required<'a>(raw: &'a RawRow, column: &'static str) -> Result<&'a str, RejectionReason> {
    raw.get(column).ok_or(RejectionReason::MissingField(column))
}

pub fn parse_loan_date(value: &str) -> Result<NaiveDate, RejectionReason> {
    let bytes = value.as_bytes();
    let well_shaped = bytes.len() == 10
        && bytes.iter().enumerate().all(|(i, b)| match i {
            2 | 5 => *b == b'/',
            _ => b.is_ascii_digit(),
        });

    if !well_shaped {
        return Err(RejectionReason::InvalidDate(value.to_string()));
    }

    let date = NaiveDate::parse_from_str(value, LOAN_DATE_FORMAT)
        .map_err(|_| RejectionReason::InvalidDate(value.to_string()))?;

    // chrono knows a year 0, the calendar in the source files does not
    if date.year() < 1 {
        return Err(RejectionReason::InvalidDate(value.to_string()));
    }

    Ok(date)
}

fn parse_days(
    value: Option<&str>,
    default: u32,
    reject: fn(String) -> RejectionReason,
) -> Result<u32, RejectionReason> {
    let Some(value) = value else {
        return Ok(default);
    };

    if value.is_empty() || !value.bytes().all(|b| b.is_ascii_digit()) {
        return Err(reject(value.to_string()));
    }

    value.parse::<u32>().map_err(|_| reject(value.to_string()))
}

fn parse_returned(value: &str) -> Result<bool, RejectionReason> {
    match value.to_lowercase().as_str() {
        RETURNED_YES => Ok(true),
        RETURNED_NO => Ok(false),
        _ => Err(RejectionReason::InvalidReturnedFlag(value.to_string())),
    }
}
