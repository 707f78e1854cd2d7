//! Statement partitioner: projects a raw table onto the four statement catalogs.

use crate::catalog::StatementKind;
use crate::error::{RatioError, Result};
use fundsheet_data::RawTable;
use fundsheet_data::frame::DATE_KEY;
use polars::prelude::*;
use tracing::debug;

/// One ticker's raw data split by statement.
///
/// Every frame carries [`DATE_KEY`] as its first column followed by the
/// statement's catalog fields in declaration order.
#[derive(Debug, Clone)]
pub struct Statements {
    /// Income statement
    pub income: DataFrame,
    /// Cash flow statement
    pub cash_flow: DataFrame,
    /// Balance sheet
    pub balance: DataFrame,
    /// Sharadar metrics and ratios
    pub metrics: DataFrame,
}

impl Statements {
    /// Frame for a raw statement; `None` for [`StatementKind::Calculated`].
    pub const fn frame(&self, kind: StatementKind) -> Option<&DataFrame> {
        match kind {
            StatementKind::Income => Some(&self.income),
            StatementKind::CashFlow => Some(&self.cash_flow),
            StatementKind::Balance => Some(&self.balance),
            StatementKind::MetricsAndRatios => Some(&self.metrics),
            StatementKind::Calculated => None,
        }
    }

    /// The four statements in workbook order.
    pub fn iter(&self) -> impl Iterator<Item = (StatementKind, &DataFrame)> {
        [
            (StatementKind::Income, &self.income),
            (StatementKind::CashFlow, &self.cash_flow),
            (StatementKind::Balance, &self.balance),
            (StatementKind::MetricsAndRatios, &self.metrics),
        ]
        .into_iter()
    }

    /// Number of reporting periods.
    pub fn periods(&self) -> usize {
        self.income.height()
    }
}

/// Split a raw table into per-statement frames.
///
/// # Errors
/// Returns [`RatioError::MissingField`] if any catalog field is absent.
pub fn partition(raw: &RawTable) -> Result<Statements> {
    let frame = raw.frame();
    let project = |kind: StatementKind| -> Result<DataFrame> {
        let mut names = Vec::with_capacity(kind.catalog().len() + 1);
        names.push(DATE_KEY);
        for spec in kind.catalog() {
            if frame.column(spec.code).is_err() {
                return Err(RatioError::MissingField {
                    statement: kind.label().to_string(),
                    field: spec.code.to_string(),
                });
            }
            names.push(spec.code);
        }
        let projected = frame.select(names)?;
        debug!(statement = %kind, shape = ?projected.shape(), "partitioned statement");
        Ok(projected)
    };

    Ok(Statements {
        income: project(StatementKind::Income)?,
        cash_flow: project(StatementKind::CashFlow)?,
        balance: project(StatementKind::Balance)?,
        metrics: project(StatementKind::MetricsAndRatios)?,
    })
}
