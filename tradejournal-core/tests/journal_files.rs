//! Loader + aggregator over real files on disk.

use std::io::Write;
use tradejournal_core::{
    load_trades, AggregateConfig, Aggregator, JournalConfig, LoadError, LoadOptions, RowIssue,
};

const EXPORT: &str = "\
Symbol,Entry Time,Exit Time,Size,P&L
EURUSD,2024-01-05 09:00:00,2024-01-05 15:30:00,1,$120.00
GBPUSD,2024-01-06 10:00:00,2024-01-06 11:00:00,2,-$40.00
EURUSD,2024-01-31 10:00:00,bad timestamp,1,$500.00
EURUSD,2024-02-01 08:00:00,2024-02-01 09:00:00,1,$60.00
";

fn write_file(dir: &tempfile::TempDir, name: &str, content: &str) -> std::path::PathBuf {
    let path = dir.path().join(name);
    let mut file = std::fs::File::create(&path).unwrap();
    file.write_all(content.as_bytes()).unwrap();
    path
}

#[test]
fn end_to_end_from_disk() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_file(&dir, "Trades.csv", EXPORT);

    let journal = load_trades(&path, &LoadOptions::default()).unwrap();
    assert_eq!(journal.source.as_deref(), Some(path.as_path()));
    assert_eq!(journal.records.len(), 3);
    assert_eq!(journal.skipped_count(), 1);
    assert_eq!(journal.skipped[0].line, 4);
    assert!(matches!(
        journal.skipped[0].issue,
        RowIssue::InvalidTimestamp(_)
    ));

    let report = Aggregator::default().aggregate(&journal.records);
    let curve: Vec<f64> = report.cumulative_pl.iter().map(|p| p.cumulative).collect();
    assert_eq!(curve, vec![120.0, 80.0, 140.0]);
    assert_eq!(report.stats.total_trades, 3);
    assert_eq!(report.size_summary.len(), 2);
}

#[test]
fn config_file_drives_loading_and_ranking() {
    let dir = tempfile::tempdir().unwrap();
    let data = "\
Closed;Pair;Net
05/01/2024 15:30;EURUSD;120
06/01/2024 11:00;GBPUSD;-40
01/02/2024 09:00;EURUSD;60
";
    let csv_path = write_file(&dir, "export.csv", data);
    let config_path = write_file(
        &dir,
        "journal.toml",
        r#"
[input]
delimiter = ";"
timestamp_column = "Closed"
pnl_column = "Net"
timestamp_formats = ["%d/%m/%Y %H:%M"]

[aggregate]
top_days = 2
top_instruments = 1
"#,
    );

    let config = JournalConfig::from_file(&config_path).unwrap();
    let journal = load_trades(&csv_path, &LoadOptions::from(&config.input)).unwrap();
    assert_eq!(journal.skipped_count(), 0);

    let report = Aggregator::new(&config.aggregate).aggregate(&journal.records);
    assert_eq!(report.monthly_pl.len(), 2);
    assert_eq!(report.best_days.len(), 2);
    assert_eq!(report.top_instruments.len(), 1);
    assert_eq!(report.top_instruments[0].instrument, "EURUSD");
    assert_eq!(report.top_instruments[0].profit_loss, 180.0);
}

#[test]
fn missing_file_is_not_malformed() {
    let dir = tempfile::tempdir().unwrap();
    let err = load_trades(&dir.path().join("Trades.csv"), &LoadOptions::default()).unwrap_err();
    assert!(matches!(err, LoadError::MissingInput { .. }));
    assert!(!err.is_malformed());
    assert!(err.to_string().contains("Trades.csv"));
}

#[test]
fn file_without_valid_rows_is_malformed() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_file(&dir, "Trades.csv", "Exit Time,P&L\nnever,10\n");
    let err = load_trades(&path, &LoadOptions::default()).unwrap_err();
    assert!(matches!(err, LoadError::NoValidRows { total: 1, skipped: 1 }));
    assert!(err.is_malformed());
}

#[test]
fn unknown_layout_is_malformed() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_file(&dir, "Trades.csv", "a,b,c\n1,2,3\n");
    let err = load_trades(&path, &LoadOptions::default()).unwrap_err();
    assert!(matches!(err, LoadError::MissingColumn { .. }));
    assert!(err.is_malformed());
}

#[test]
fn top_days_default_is_five() {
    let dir = tempfile::tempdir().unwrap();
    let mut data = String::from("Date,Symbol,Profit\n");
    for day in 1..=9 {
        data.push_str(&format!("2024-03-{day:02},EURUSD,{}\n", day * 10));
    }
    let path = write_file(&dir, "Trades.csv", &data);
    let journal = load_trades(&path, &LoadOptions::default()).unwrap();
    let report = Aggregator::new(&AggregateConfig::default()).aggregate(&journal.records);
    let best: Vec<f64> = report.best_days.iter().map(|d| d.profit_loss).collect();
    assert_eq!(best, vec![90.0, 80.0, 70.0, 60.0, 50.0]);
}
