use bokutlan::{
    check_source_path, config,
    error::SourceError,
    ledger::{build_ledger, reports, BuildOutcome, LoanLedger},
    record::RawRow,
    stream_rows,
};

use anyhow::{Context, Result};
use std::env;
use std::future::Future;
use std::iter;
use std::path::{Path, PathBuf};
use tokio::sync::mpsc;

const BUILD_TASK: &str = "\"Reading file and creating list with objects\"";

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let csv_path = parse_args();
    check_source_path(&csv_path)?;

    let outcome = run_task(BUILD_TASK, build_from_source(&csv_path)).await?;
    if let Some(message) = outcome.no_data_message(&csv_path) {
        println!("{message}");
        return Ok(());
    }
    let ledger = outcome.ledger;

    run_task("5A", async { print_total_extension(&ledger) }).await;
    run_task("5B", async { print_not_returned_by_genre(&ledger) }).await;
    run_task("5C", async { print_average_loan_length(&ledger) }).await;
    run_task("5D", async { print_not_returned(&ledger) }).await;
    run_task("5E", async { print_most_loaned(&ledger) }).await;

    Ok(())
}

fn parse_args() -> PathBuf {
    let args: Vec<String> = env::args().collect();

    match args.len() {
        1 => PathBuf::from(config::SOURCE_PATH),
        2 => PathBuf::from(&args[1]),
        _ => {
            eprintln!("Usage: {} [csv_file]", args[0]);
            eprintln!("  csv_file: Path to CSV file (default: {})", config::SOURCE_PATH);
            std::process::exit(1);
        }
    }
}

/// Announces `label`, runs the task, and leaves a blank line after its output.
async fn run_task<F: Future>(label: &str, task: F) -> F::Output {
    log::info!("Starting task {label}");
    println!("Now running task: {label}");
    let output = task.await;
    println!();
    output
}

/// Streams rows to a builder task and waits until the whole file is consumed
/// and the rejection log is written.
async fn build_from_source(csv_path: &Path) -> Result<BuildOutcome> {
    let rows = stream_rows(csv_path)?;
    let error_log = PathBuf::from(config::ERROR_LOG_PATH);

    let (row_channel, mut rx) = mpsc::channel::<Result<RawRow, SourceError>>(100);

    // build_ledger stops at the first read error, before writing the log
    let builder_task = tokio::task::spawn_blocking(move || {
        build_ledger(iter::from_fn(|| rx.blocking_recv()), &error_log)
    });

    for row in rows {
        let failed = row.is_err();
        if row_channel.send(row).await.is_err() || failed {
            break;
        }
    }
    drop(row_channel);

    let outcome = builder_task
        .await
        .context("Ledger builder task failed")?
        .with_context(|| format!("Failed building ledger from {}", csv_path.display()))?;
    log::debug!(
        "Built ledger: {} accepted, {} rejected",
        outcome.accepted(),
        outcome.rejected()
    );

    for line in outcome.summary(csv_path, Path::new(config::ERROR_LOG_PATH)) {
        println!("{line}");
    }

    Ok(outcome)
}

fn print_total_extension(ledger: &LoanLedger) {
    println!(
        "Total days all loaned out books were extended: {}",
        reports::total_extension_days(ledger)
    );
}

fn print_not_returned_by_genre(ledger: &LoanLedger) {
    let counts = reports::not_returned_by_genre(ledger);

    if counts.is_empty() {
        println!("No books are currently loaned out");
        return;
    }

    println!("Current amount of books loaned out per genre is: ");
    for (genre, count) in counts {
        println!("{genre}: {count}");
    }
}

fn print_average_loan_length(ledger: &LoanLedger) {
    match reports::average_loan_length(ledger) {
        Ok(average) => println!("Average loan length: {average:.2} days"),
        Err(e) => println!("No data: {e}"),
    }
}

fn print_not_returned(ledger: &LoanLedger) {
    let not_returned = reports::not_returned_list(ledger);

    if not_returned.is_empty() {
        println!("Every loaned book has been returned");
        return;
    }

    for line in not_returned {
        println!("{line}");
    }
}

fn print_most_loaned(ledger: &LoanLedger) {
    println!("Most loaned books:");
    for (idx, (title, count)) in reports::most_loaned_books(ledger).iter().enumerate() {
        println!("{}.\t\"{}\" | Amount: {}", idx + 1, title, count);
    }
}
