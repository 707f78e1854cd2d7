//! Integration tests for the Sharadar bulk CSV source

use fundsheet_data::sharadar::SharadarCsvSource;
use fundsheet_data::{DataError, Dimension, fetch_indicators};
use std::io::Write;
use tempfile::NamedTempFile;

const EXPORT: &str = "\
ticker,dimension,calendardate,datekey,reportperiod,lastupdated,revenue,netinc,ncfdiv
AAPL,MRY,2021-12-31,2021-10-29,2021-09-25,2023-01-01,365817000000,94680000000,-14467000000
AAPL,MRQ,2022-03-31,2022-04-29,2022-03-26,2023-01-01,97278000000,25010000000,-3595000000
aapl,MRY,2022-12-31,2022-10-28,2022-09-24,2023-01-01,394328000000,99803000000,
MSFT,MRY,2022-12-31,2022-07-28,2022-06-30,2023-01-01,198270000000,72738000000,-18135000000
";

fn export(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file.flush().unwrap();
    file
}

#[tokio::test]
async fn test_filters_by_ticker_and_dimension() {
    let file = export(EXPORT);
    let source = SharadarCsvSource::new(file.path());

    let table = fetch_indicators(&source, "AAPL", Dimension::Mry, 5).await.unwrap();

    assert_eq!(table.periods(), 2);
    assert_eq!(table.fields(), vec!["ncfdiv", "netinc", "revenue"]);
    let dates: Vec<String> = table.dates().unwrap().iter().map(ToString::to_string).collect();
    assert_eq!(dates, vec!["2021-10-29", "2022-10-28"]);
}

#[test]
fn test_empty_cell_is_null() {
    let file = export(EXPORT);
    let rows = SharadarCsvSource::new(file.path()).read_rows("AAPL", Dimension::Mry).unwrap();

    let latest = rows.iter().find(|r| r.datekey.to_string() == "2022-10-28").unwrap();
    assert_eq!(latest.values.get("ncfdiv"), Some(&None));
    assert_eq!(latest.values.get("netinc"), Some(&Some(99803000000.0)));
}

#[test]
fn test_missing_ticker_is_not_found() {
    let file = export(EXPORT);
    let err = SharadarCsvSource::new(file.path()).read_rows("BOGUS", Dimension::Mry).unwrap_err();
    assert!(err.is_not_found());
}

#[test]
fn test_unparsable_number_is_parse_error() {
    let file = export("ticker,dimension,datekey,revenue\nAAPL,MRY,2022-10-28,lots\n");
    let err = SharadarCsvSource::new(file.path()).read_rows("AAPL", Dimension::Mry).unwrap_err();
    assert!(matches!(err, DataError::Parse(_)));
}

#[tokio::test]
async fn test_header_field_empty_in_every_row_is_kept() {
    let file = export("ticker,dimension,datekey,revenue,evebitda\nAAPL,MRY,2021-10-29,1.0,\nAAPL,MRY,2022-10-28,2.0,\n");
    let source = SharadarCsvSource::new(file.path());

    let table = fetch_indicators(&source, "AAPL", Dimension::Mry, 5).await.unwrap();

    assert_eq!(table.fields(), vec!["evebitda", "revenue"]);
}
