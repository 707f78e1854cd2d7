//! The ratio engine.

use crate::catalog::{IndicatorSpec, raw_fields};
use crate::error::{RatioError, Result};
use crate::partition::Statements;
use crate::plan::dependency_layers;
use crate::ratio::RatioKind;
use fundsheet_data::frame::{DATE_KEY, float_values};
use polars::prelude::*;
use std::collections::HashSet;
use tracing::debug;

/// Value written in place of `+inf`.
pub const POSITIVE_SENTINEL: f64 = 999_999_999.0;

/// Value written in place of `-inf`.
pub const NEGATIVE_SENTINEL: f64 = -999_999_999.0;

/// Computes a fixed catalog of ratios for one ticker at a time.
///
/// The engine holds no per-ticker state; [`RatioEngine::compute`] can be
/// called for any number of tickers.
#[derive(Debug, Clone)]
pub struct RatioEngine {
    catalog: Vec<RatioKind>,
    layers: Vec<Vec<RatioKind>>,
}

impl RatioEngine {
    /// Build an engine for `catalog`, in the order ratios should be emitted.
    ///
    /// # Errors
    /// [`RatioError::DependencyCycle`] if ratio dependencies loop, and
    /// [`RatioError::CodeCollision`] if a ratio code equals a raw field code.
    pub fn new(catalog: Vec<RatioKind>) -> Result<Self> {
        let layers = dependency_layers(&catalog, |kind| kind.dependencies().iter().copied())
            .map_err(|blocked| RatioError::DependencyCycle(blocked.iter().map(|k| k.code().to_string()).collect()))?;
        let evaluated: Vec<&str> = layers.iter().flatten().map(|kind| kind.code()).collect();
        ensure_distinct(&evaluated, raw_fields())?;

        debug!(ratios = catalog.len(), layers = layers.len(), "planned ratio evaluation");
        Ok(Self { catalog, layers })
    }

    /// Engine over every known ratio.
    pub fn with_all_ratios() -> Result<Self> {
        Self::new(RatioKind::ALL.to_vec())
    }

    /// Engine over ratios named by code.
    ///
    /// # Errors
    /// [`RatioError::Unimplemented`] for a code with no formula.
    pub fn from_codes<S: AsRef<str>>(codes: &[S]) -> Result<Self> {
        let catalog = codes
            .iter()
            .map(|code| code.as_ref().parse::<RatioKind>())
            .collect::<Result<Vec<_>>>()?;
        Self::new(catalog)
    }

    /// Ratios emitted, in order.
    pub fn catalog(&self) -> &[RatioKind] {
        &self.catalog
    }

    /// Emitted ratios as catalog entries, for presentation.
    pub fn specs(&self) -> Vec<IndicatorSpec> {
        self.catalog.iter().map(|kind| kind.spec()).collect()
    }

    /// Evaluation layers, including dependencies that are not emitted.
    pub fn layers(&self) -> &[Vec<RatioKind>] {
        &self.layers
    }

    /// Compute the ratio table for one ticker.
    ///
    /// The result holds [`DATE_KEY`] followed by one `Float64` column per
    /// catalog ratio. NaN is replaced by null and infinities by
    /// [`POSITIVE_SENTINEL`] / [`NEGATIVE_SENTINEL`].
    pub fn compute(&self, statements: &Statements) -> Result<DataFrame> {
        let mut merged = statements.income.clone();
        for (_, frame) in statements.iter().skip(1) {
            for column in frame.get_columns() {
                if column.name().as_str() != DATE_KEY {
                    merged.with_column(column.clone())?;
                }
            }
        }

        let mut lazy = merged.lazy();
        for layer in &self.layers {
            let exprs: Vec<Expr> = layer.iter().map(|kind| kind.expr().alias(kind.code())).collect();
            lazy = lazy.with_columns(exprs);
        }

        let mut selection = Vec::with_capacity(self.catalog.len() + 1);
        selection.push(col(DATE_KEY));
        selection.extend(self.catalog.iter().map(|kind| col(kind.code())));
        let computed = lazy.select(selection).collect()?;

        let ratios = clean(&computed, &self.catalog)?;
        debug!(shape = ?ratios.shape(), "computed ratios");
        Ok(ratios)
    }
}

/// Replace NaN with null and infinities with the sentinels, once, after the
/// full pass.
fn clean(frame: &DataFrame, catalog: &[RatioKind]) -> Result<DataFrame> {
    let mut columns = Vec::with_capacity(catalog.len() + 1);
    columns.push(frame.column(DATE_KEY)?.clone());
    for kind in catalog {
        let values: Vec<Option<f64>> = float_values(frame, kind.code())?
            .into_iter()
            .map(|value| value.and_then(normalize))
            .collect();
        columns.push(Series::new(kind.code().into(), values).into());
    }
    Ok(DataFrame::new(columns)?)
}

fn normalize(value: f64) -> Option<f64> {
    if value.is_nan() {
        None
    } else if value == f64::INFINITY {
        Some(POSITIVE_SENTINEL)
    } else if value == f64::NEG_INFINITY {
        Some(NEGATIVE_SENTINEL)
    } else {
        Some(value)
    }
}

fn ensure_distinct<'a>(codes: &[&str], raw: impl IntoIterator<Item = &'a str>) -> Result<()> {
    let raw: HashSet<&str> = raw.into_iter().collect();
    match codes.iter().find(|code| raw.contains(*code)) {
        Some(code) => Err(RatioError::CodeCollision((*code).to_string())),
        None => Ok(()),
    }
}
