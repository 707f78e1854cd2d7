//! Per-ticker pipeline: fetch, partition, compute ratios, present and emit.

use fundsheet::TickerList;
use fundsheet::universe::UniverseError;
use fundsheet_data::{DataError, Dimension, FundamentalsSource, fetch_indicators};
use fundsheet_output::{
    OutputError, StockWorkbook, SummaryIndicator, SummaryTable, present, present_statement,
};
use fundsheet_ratios::{RatioEngine, RatioError, StatementKind, partition};
use indicatif::ProgressBar;
use std::path::PathBuf;
use tracing::{info, warn};

/// Blank rows after each raw statement block.
const STATEMENT_PADDING: u32 = 1;

/// Blank rows between the metrics block and the calculated ratios.
const RATIO_PADDING: u32 = 2;

/// Error type for pipeline runs.
#[derive(Debug, thiserror::Error)]
pub(crate) enum PipelineError {
    /// Data fetch error.
    #[error(transparent)]
    Data(#[from] DataError),
    /// Ratio computation error.
    #[error(transparent)]
    Ratio(#[from] RatioError),
    /// Presentation or workbook error.
    #[error(transparent)]
    Output(#[from] OutputError),
    /// Ticker list error.
    #[error(transparent)]
    Universe(#[from] UniverseError),
    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl PipelineError {
    const fn is_not_found(&self) -> bool {
        match self {
            Self::Data(e) => e.is_not_found(),
            _ => false,
        }
    }
}

/// Configuration for an xlsx run.
#[derive(Debug, Clone)]
pub(crate) struct RunConfig {
    /// Workbook path, written once at the end of the run.
    pub outfile: PathBuf,
    /// Reporting dimension.
    pub dimension: Dimension,
    /// Number of most recent periods per ticker.
    pub periods: usize,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            outfile: PathBuf::from("stocks.xlsx"),
            dimension: Dimension::default(),
            periods: 5,
        }
    }
}

/// Outcome of a run.
#[derive(Debug)]
pub(crate) struct RunReport {
    /// Tickers with a worksheet, in run order.
    pub processed: Vec<String>,
    /// Tickers the source had no data for.
    pub skipped: Vec<String>,
    /// Summary rows for the processed tickers.
    pub summary: SummaryTable,
}

/// Sequential run over a ticker list.
pub(crate) struct Pipeline<S> {
    source: S,
    engine: RatioEngine,
    summary_indicators: Vec<SummaryIndicator>,
}

impl<S: FundamentalsSource> Pipeline<S> {
    /// Create a pipeline reading from `source`.
    pub(crate) const fn new(source: S, engine: RatioEngine, summary_indicators: Vec<SummaryIndicator>) -> Self {
        Self {
            source,
            engine,
            summary_indicators,
        }
    }

    /// Run every ticker, render the summary sheet and save the workbook.
    ///
    /// Nothing is written to disk unless at least one ticker succeeds.
    pub(crate) async fn run(
        &self,
        tickers: &TickerList,
        config: &RunConfig,
        progress: Option<&ProgressBar>,
    ) -> Result<RunReport, PipelineError> {
        let mut workbook = StockWorkbook::new()?;
        let report = self.run_into(&mut workbook, tickers, config, progress).await?;
        workbook.write_summary_sheet(&report.summary)?;
        workbook.save(&config.outfile)?;
        info!(
            outfile = %config.outfile.display(),
            processed = report.processed.len(),
            skipped = report.skipped.len(),
            "saved workbook"
        );
        Ok(report)
    }

    /// Emit one worksheet per ticker into `workbook`.
    ///
    /// Tickers the source reports as not found are skipped with a warning;
    /// any other error aborts the run.
    pub(crate) async fn run_into(
        &self,
        workbook: &mut StockWorkbook,
        tickers: &TickerList,
        config: &RunConfig,
        progress: Option<&ProgressBar>,
    ) -> Result<RunReport, PipelineError> {
        let mut summary = SummaryTable::new(self.summary_indicators.clone());
        let mut processed = Vec::new();
        let mut skipped = Vec::new();

        for ticker in tickers.iter() {
            if let Some(pb) = progress {
                pb.set_message(ticker.to_string());
            }
            log(progress, || info!(ticker, "processing"));

            match self.write_ticker(workbook, &mut summary, ticker, config).await {
                Ok(()) => {
                    log(progress, || info!(ticker, "done"));
                    processed.push(ticker.to_string());
                }
                Err(e) if e.is_not_found() => {
                    log(progress, || warn!(ticker, error = %e, "skipping ticker"));
                    skipped.push(ticker.to_string());
                }
                Err(e) => return Err(e),
            }

            if let Some(pb) = progress {
                pb.inc(1);
            }
        }

        Ok(RunReport {
            processed,
            skipped,
            summary,
        })
    }

    async fn write_ticker(
        &self,
        workbook: &mut StockWorkbook,
        summary: &mut SummaryTable,
        ticker: &str,
        config: &RunConfig,
    ) -> Result<(), PipelineError> {
        let dimension = config.dimension;
        let raw = fetch_indicators(&self.source, ticker, dimension, config.periods).await?;
        let statements = partition(&raw)?;
        let ratios = self.engine.compute(&statements)?;

        let sheet = workbook.add_sheet(ticker)?;
        let mut row = 0;
        for (kind, frame) in statements.iter() {
            let table = present_statement(frame, kind, dimension)?;
            let padding = if kind == StatementKind::MetricsAndRatios {
                RATIO_PADDING
            } else {
                STATEMENT_PADDING
            };
            row += workbook.write_table(&sheet, &table, row, 0, dimension, true)? + padding;
        }

        let table = present(&ratios, &self.engine.specs(), StatementKind::Calculated.label(), dimension)?;
        workbook.write_table(&sheet, &table, row, 0, dimension, true)?;

        summary.add(ticker, &ratios, raw.frame())?;
        Ok(())
    }
}

/// Emit a log line without tearing the progress bar.
fn log(progress: Option<&ProgressBar>, f: impl FnOnce()) {
    match progress {
        Some(pb) => pb.suspend(f),
        None => f(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use fundsheet_data::RawRow;
    use fundsheet_output::default_indicators;
    use fundsheet_ratios::catalog::raw_fields;

    /// Every raw field populated, except `null_fields` which are reported
    /// empty in every period.
    struct MockSource {
        null_fields: &'static [&'static str],
    }

    const MOCK: MockSource = MockSource { null_fields: &[] };

    impl FundamentalsSource for MockSource {
        async fn fetch_rows(&self, ticker: &str, dimension: Dimension) -> fundsheet_data::Result<Vec<RawRow>> {
            if ticker == "BOGUS" {
                return Err(DataError::NotFound {
                    ticker: ticker.to_string(),
                    dimension: dimension.to_string(),
                });
            }
            Ok((2018..=2023)
                .map(|year| {
                    raw_fields().fold(RawRow::new(NaiveDate::from_ymd_opt(year, 12, 31).unwrap()), |row, field| {
                        if self.null_fields.contains(&field) {
                            row.with_null(field)
                        } else {
                            row.with(field, f64::from(year - 2000))
                        }
                    })
                })
                .collect())
        }
    }

    struct BrokenSource;

    impl FundamentalsSource for BrokenSource {
        async fn fetch_rows(&self, _ticker: &str, _dimension: Dimension) -> fundsheet_data::Result<Vec<RawRow>> {
            Err(DataError::Api {
                status: 500,
                message: "Internal Server Error".to_string(),
            })
        }
    }

    fn config(dir: &tempfile::TempDir) -> RunConfig {
        RunConfig {
            outfile: dir.path().join("stocks.xlsx"),
            ..RunConfig::default()
        }
    }

    #[tokio::test]
    async fn test_missing_ticker_is_skipped() {
        let dir = tempfile::tempdir().unwrap();
        let config = config(&dir);
        let pipeline = Pipeline::new(MOCK, RatioEngine::with_all_ratios().unwrap(), default_indicators());
        let tickers = TickerList::parse("VALID\nBOGUS\nVALID2\n");

        let report = pipeline.run(&tickers, &config, None).await.unwrap();

        assert_eq!(report.processed, vec!["VALID", "VALID2"]);
        assert_eq!(report.skipped, vec!["BOGUS"]);
        assert_eq!(report.summary.len(), 2);
        assert!(config.outfile.exists());
    }

    #[tokio::test]
    async fn test_run_into_adds_one_sheet_per_ticker() {
        let dir = tempfile::tempdir().unwrap();
        let pipeline = Pipeline::new(MOCK, RatioEngine::with_all_ratios().unwrap(), default_indicators());
        let mut workbook = StockWorkbook::new().unwrap();

        let report = pipeline
            .run_into(&mut workbook, &TickerList::parse("AAA\nBBB"), &config(&dir), None)
            .await
            .unwrap();

        assert_eq!(report.processed.len(), 2);
        assert_eq!(workbook.sheet_names(), vec!["Summary", "AAA", "BBB"]);
    }

    #[tokio::test]
    async fn test_nothing_processed_writes_no_file() {
        let dir = tempfile::tempdir().unwrap();
        let config = config(&dir);
        let pipeline = Pipeline::new(MOCK, RatioEngine::with_all_ratios().unwrap(), default_indicators());

        let err = pipeline.run(&TickerList::parse("BOGUS"), &config, None).await.unwrap_err();

        assert!(matches!(err, PipelineError::Output(OutputError::EmptySummary)));
        assert!(!config.outfile.exists());
    }

    #[tokio::test]
    async fn test_transport_error_aborts_run() {
        let dir = tempfile::tempdir().unwrap();
        let pipeline = Pipeline::new(BrokenSource, RatioEngine::with_all_ratios().unwrap(), default_indicators());

        let err = pipeline.run(&TickerList::parse("AAPL"), &config(&dir), None).await.unwrap_err();

        assert!(matches!(err, PipelineError::Data(DataError::Api { status: 500, .. })));
    }

    #[tokio::test]
    async fn test_field_empty_in_every_period_is_written_blank() {
        let source = MockSource {
            null_fields: &["evebitda", "prefdivis"],
        };
        let raw = fetch_indicators(&source, "AAPL", Dimension::Mry, 5).await.unwrap();
        let statements = partition(&raw).unwrap();
        let metrics = present_statement(&statements.metrics, StatementKind::MetricsAndRatios, Dimension::Mry).unwrap();
        assert_eq!(metrics.row("evebitda").unwrap().values, vec![None; 5]);

        let dir = tempfile::tempdir().unwrap();
        let config = config(&dir);
        let pipeline = Pipeline::new(source, RatioEngine::with_all_ratios().unwrap(), default_indicators());
        let report = pipeline.run(&TickerList::parse("AAPL"), &config, None).await.unwrap();

        assert_eq!(report.processed, vec!["AAPL"]);
        assert!(config.outfile.exists());
    }
}
