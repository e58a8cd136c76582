use bokutlan::error::{LedgerError, RejectionReason, ReportError};
use bokutlan::ledger::{build_ledger, reports};
use bokutlan::record::Genre;
use bokutlan::stream_rows;
use rust_decimal::Decimal;
use std::fs;
use std::path::PathBuf;
use std::str::FromStr;
use tempfile::TempDir;

const HEADER: &str =
    "Fornavn,Etternavn,Boktittel,Sjanger,Lånedato,Låneperiode,Forlenget,Tilbakelevert\n";

struct Fixture {
    dir: TempDir,
    source: PathBuf,
}

impl Fixture {
    fn new(body: &str) -> Self {
        let dir = TempDir::new().unwrap();
        let source = dir.path().join("bokutlån.csv");
        fs::write(&source, format!("{HEADER}{body}")).unwrap();
        Self { dir, source }
    }

    fn error_log(&self) -> PathBuf {
        self.dir.path().join("errors_from_csv.txt")
    }
}

#[test]
fn test_nominal_rows_yield_records_and_no_rejections() {
    let fixture = Fixture::new(
        "Ola,Nordmann,Dune,fantasy,01/03/2024,14,2,Ja
Kari,Hansen,Snømannen,krim,15/03/2024,21,0,Nei
Per,Olsen,Sult,fiksjon,20/03/2024,14,5,nei
",
    );

    let rows = stream_rows(&fixture.source).unwrap();
    let outcome = build_ledger(rows, &fixture.error_log()).unwrap();

    // Nothing rejected, so no error log is created
    assert_eq!(outcome.accepted(), 3);
    assert_eq!(outcome.rejected(), 0);
    assert!(!fixture.error_log().exists());

    // Run every report over the same ledger
    let ledger = &outcome.ledger;
    assert_eq!(reports::total_extension_days(ledger), 7);
    assert_eq!(
        reports::not_returned_by_genre(ledger),
        vec![(Genre::Crime, 1), (Genre::Fiction, 1)]
    );
    // (16 + 21 + 19) / 3
    assert_eq!(
        reports::average_loan_length(ledger),
        Ok(Decimal::from_str("18.67").unwrap())
    );
    assert_eq!(
        reports::not_returned_list(ledger),
        vec!["Snømannen, Kari Hansen", "Sult, Per Olsen"]
    );
}

#[test]
fn test_all_rejected_input_logs_every_row() {
    let fixture = Fixture::new(
        "Ola,Nordmann,Dune,krim,31/04/2024,14,0,Ja
Kari,Hansen,Sult,poesi,01/03/2024,14,0,Ja
Per,Olsen,Pan,fiksjon,01/03/2024,fjorten,0,Nei
Liv,Berg,Kon-Tiki,sakprosa,01/03/2024,14,-1,Nei
Eva,Lie,Terra,fantasy,01/03/2024,14,0,Kanskje
",
    );

    let rows = stream_rows(&fixture.source).unwrap();
    let outcome = build_ledger(rows, &fixture.error_log()).unwrap();

    assert!(outcome.ledger.is_empty());
    assert_eq!(outcome.rejected(), 5);

    // One reason per failed check, in row order
    let reasons: Vec<&RejectionReason> = outcome.rejections.iter().map(|r| &r.reason).collect();
    assert!(matches!(reasons[0], RejectionReason::InvalidDate(_)));
    assert!(matches!(reasons[1], RejectionReason::InvalidGenre(_)));
    assert!(matches!(reasons[2], RejectionReason::InvalidLoanPeriod(_)));
    assert!(matches!(reasons[3], RejectionReason::InvalidExtension(_)));
    assert!(matches!(reasons[4], RejectionReason::InvalidReturnedFlag(_)));

    // One log line per rejected row
    let log = fs::read_to_string(fixture.error_log()).unwrap();
    assert_eq!(log.lines().count(), 5);
    assert!(log.lines().all(|line| line.contains(" | ")));

    assert_eq!(
        reports::average_loan_length(&outcome.ledger),
        Err(ReportError::EmptyLedgerForAverage)
    );
}

#[test]
fn test_mixed_input_keeps_valid_rows_in_order() {
    let fixture = Fixture::new(
        "Ola,Nordmann,Dune,fantasy,01/03/2024,14,0,Ja
Kari,Hansen,Dune,fantasy,31/02/2024,14,0,Ja
Per,Olsen,Sult,fiksjon,02/03/2024,14,0,Ja
Liv,Berg,Dune,Fantasy,03/03/2024,14,0,Nei
",
    );

    let rows = stream_rows(&fixture.source).unwrap();
    let outcome = build_ledger(rows, &fixture.error_log()).unwrap();

    assert_eq!(outcome.accepted(), 3);
    assert_eq!(outcome.rejected(), 1);

    // Invalid 31/02 row is dropped, the rest keep their file order
    let titles: Vec<&str> = outcome.ledger.iter().map(|r| r.title()).collect();
    assert_eq!(titles, vec!["Dune", "Sult", "Dune"]);

    assert_eq!(
        reports::most_loaned_books(&outcome.ledger),
        vec![("Dune".to_string(), 2), ("Sult".to_string(), 1)]
    );

    let log = fs::read_to_string(fixture.error_log()).unwrap();
    assert_eq!(log.lines().count(), 1);
    assert!(log.contains("Kari"));
}

#[test]
fn test_missing_optional_columns_use_defaults() {
    // Header without Låneperiode and Forlenget
    let dir = TempDir::new().unwrap();
    let source = dir.path().join("bokutlån.csv");
    fs::write(
        &source,
        "Fornavn,Etternavn,Boktittel,Sjanger,Lånedato,Tilbakelevert
Ola,Nordmann,Dune,fantasy,01/03/2024,Ja
",
    )
    .unwrap();

    let rows = stream_rows(&source).unwrap();
    let outcome = build_ledger(rows, &dir.path().join("errors.txt")).unwrap();

    let record = &outcome.ledger.records()[0];
    assert_eq!(record.loan_period_days(), 14);
    assert_eq!(record.extension_days(), 0);
}

#[test]
fn test_unwritable_error_log_is_fatal() {
    let fixture = Fixture::new("Ola,Nordmann,Dune,krim,31/04/2024,14,0,Ja\n");
    let error_log = fixture.dir.path().join("no_such_dir").join("errors.txt");

    let rows = stream_rows(&fixture.source).unwrap();
    let result = build_ledger(rows, &error_log);

    assert!(matches!(
        result,
        Err(LedgerError::ErrorLogWriteFailure { .. })
    ));
}

#[test]
fn test_multi_line_title_stays_on_one_log_line() {
    // Quoted title spanning two lines, on a row with an invalid date
    let fixture = Fixture::new(
        "Ola,Nordmann,\"Line one\nLine two\",krim,31/04/2024,14,0,Ja
Kari,Hansen,Sult,fiksjon,31/04/2024,14,0,Nei
",
    );

    let rows = stream_rows(&fixture.source).unwrap();
    let outcome = build_ledger(rows, &fixture.error_log()).unwrap();

    assert_eq!(outcome.rejected(), 2);
    assert_eq!(
        outcome.rejections[0].row.get("Boktittel"),
        Some("Line one\nLine two")
    );

    // The embedded line break is escaped in the log
    let log = fs::read_to_string(fixture.error_log()).unwrap();
    let lines: Vec<&str> = log.lines().collect();
    assert_eq!(lines.len(), outcome.rejected());
    assert!(lines[0].contains(r#"Boktittel: "Line one\nLine two""#));
    assert!(lines[1].contains(r#"Boktittel: "Sult""#));
}
