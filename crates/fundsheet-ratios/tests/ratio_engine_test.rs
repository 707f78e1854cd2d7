//! Integration tests for the ratio engine

use approx::assert_relative_eq;
use chrono::NaiveDate;
use fundsheet_data::frame::{DATE_KEY, float_values};
use fundsheet_data::{RawRow, RawTable};
use fundsheet_ratios::catalog::raw_fields;
use fundsheet_ratios::engine::{NEGATIVE_SENTINEL, POSITIVE_SENTINEL};
use fundsheet_ratios::{RatioEngine, RatioKind, Statements, partition};
use polars::prelude::*;
use rstest::rstest;

/// Every raw field set to 1.0, with overrides.
fn row(year: i32, overrides: &[(&str, f64)]) -> RawRow {
    let mut row = raw_fields().fold(RawRow::new(NaiveDate::from_ymd_opt(year, 12, 31).unwrap()), |row, field| {
        row.with(field, 1.0)
    });
    for (field, value) in overrides {
        row.values.insert((*field).to_string(), Some(*value));
    }
    row
}

fn statements(rows: Vec<RawRow>) -> Statements {
    partition(&RawTable::from_rows("TEST", "MRY", rows).unwrap()).unwrap()
}

fn latest(frame: &DataFrame, kind: RatioKind) -> Option<f64> {
    float_values(frame, kind.code()).unwrap().last().copied().flatten()
}

#[test]
fn test_dividend_payout_is_positive() {
    let statements = statements(vec![row(2023, &[("ncfdiv", -50.0), ("netinc", 200.0)])]);
    let ratios = RatioEngine::with_all_ratios().unwrap().compute(&statements).unwrap();

    assert_relative_eq!(latest(&ratios, RatioKind::IncomeDividendPayoutRatio).unwrap(), 0.25);
}

#[test]
fn test_capital_employed_feeds_roce() {
    let statements = statements(vec![row(
        2023,
        &[
            ("opinc", 100.0),
            ("assets", 1000.0),
            ("payables", 200.0),
            ("deferredrev", 100.0),
            ("cashnequsd", 0.0),
        ],
    )]);
    let ratios = RatioEngine::with_all_ratios().unwrap().compute(&statements).unwrap();

    assert_relative_eq!(latest(&ratios, RatioKind::KjmCapitalEmployedSubCash).unwrap(), 700.0);
    assert_relative_eq!(latest(&ratios, RatioKind::KjmCapitalEmployedWithCash).unwrap(), 700.0);
    assert_relative_eq!(latest(&ratios, RatioKind::KjmRoceSubCash).unwrap(), 100.0 / 700.0, epsilon = 1e-12);
    assert_relative_eq!(latest(&ratios, RatioKind::KjmRoceSubCash).unwrap(), 0.142857, epsilon = 1e-6);
}

#[test]
fn test_roce_alone_computes_hidden_capital_employed() {
    let statements = statements(vec![row(
        2023,
        &[("opinc", 100.0), ("assets", 1000.0), ("payables", 200.0), ("deferredrev", 100.0)],
    )]);
    let engine = RatioEngine::new(vec![RatioKind::KjmRoceWithCash]).unwrap();
    let ratios = engine.compute(&statements).unwrap();

    assert_eq!(ratios.width(), 2);
    assert!(ratios.column("kjm_capital_employed_with_cash").is_err());
    assert_relative_eq!(latest(&ratios, RatioKind::KjmRoceWithCash).unwrap(), 100.0 / 700.0);
}

#[test]
fn test_output_columns_follow_catalog_order() {
    let catalog = vec![RatioKind::DebtEquityRatio, RatioKind::RoughFfo, RatioKind::OperatingMargin];
    let ratios = RatioEngine::new(catalog.clone())
        .unwrap()
        .compute(&statements(vec![row(2022, &[]), row(2023, &[])]))
        .unwrap();

    let names: Vec<String> = ratios.get_column_names().into_iter().map(|n| n.to_string()).collect();
    let mut expected = vec![DATE_KEY.to_string()];
    expected.extend(catalog.iter().map(|k| k.code().to_string()));
    assert_eq!(names, expected);
    assert_eq!(ratios.height(), 2);
    assert_eq!(ratios.column(DATE_KEY).unwrap().dtype(), &DataType::Date);
}

#[test]
fn test_compute_is_idempotent() {
    let statements = statements(vec![
        row(2021, &[("revenue", 90.0), ("opinc", 9.0)]),
        row(2022, &[("revenue", 100.0), ("opinc", 12.0), ("equity", 0.0)]),
        row(2023, &[("revenue", 110.0), ("opinc", 15.0)]),
    ]);
    let engine = RatioEngine::with_all_ratios().unwrap();

    let first = engine.compute(&statements).unwrap();
    let second = engine.compute(&statements).unwrap();
    assert!(first.equals_missing(&second));
}

#[test]
fn test_division_cleanup() {
    let statements = statements(vec![row(
        2023,
        &[("debt", 10.0), ("equity", 0.0), ("liabilities", -5.0), ("sgna", 0.0), ("gp", 0.0)],
    )]);
    let ratios = RatioEngine::with_all_ratios().unwrap().compute(&statements).unwrap();

    assert_eq!(latest(&ratios, RatioKind::DebtEquityRatio), Some(POSITIVE_SENTINEL));
    assert_eq!(latest(&ratios, RatioKind::LiabilitiesEquityRatio), Some(NEGATIVE_SENTINEL));
    assert_eq!(latest(&ratios, RatioKind::SgAndAGrossProfitRatio), None);
}

#[test]
fn test_missing_operand_is_null() {
    let mut latest_row = row(2023, &[]);
    latest_row.values.remove("ebitda");
    let ratios = RatioEngine::with_all_ratios()
        .unwrap()
        .compute(&statements(vec![row(2022, &[]), latest_row]))
        .unwrap();

    assert_eq!(latest(&ratios, RatioKind::DebtEbitdaRatio), None);
    assert_eq!(latest(&ratios, RatioKind::DebtEquityRatio), Some(1.0));
}

#[test]
fn test_year_over_year_change() {
    let statements = statements(vec![
        row(2021, &[("equity", 100.0), ("intangibles", 20.0)]),
        row(2022, &[("equity", 110.0), ("intangibles", 20.0)]),
    ]);
    let ratios = RatioEngine::with_all_ratios().unwrap().compute(&statements).unwrap();

    let bv = float_values(&ratios, RatioKind::KjmDeltaBvFds.code()).unwrap();
    assert_eq!(bv[0], None);
    assert_relative_eq!(bv[1].unwrap(), 0.1, epsilon = 1e-12);

    let tbv = float_values(&ratios, RatioKind::KjmDeltaTbvFds.code()).unwrap();
    assert_relative_eq!(tbv[1].unwrap(), 0.125, epsilon = 1e-12);
}

#[rstest]
#[case(RatioKind::DebtEbitdaMinusCapexRatio, &[("debt", 300.0), ("ebitda", 200.0), ("capex", -50.0)], 2.0)]
#[case(RatioKind::NetDebtEbitdaRatio, &[("debt", 300.0), ("cashnequsd", 100.0), ("ebitda", 100.0)], 2.0)]
#[case(RatioKind::EbitdaMinusCapexInterestCoverage, &[("ebitda", 120.0), ("capex", -20.0), ("intexp", 10.0)], 10.0)]
#[case(RatioKind::InterestToCfoPlusInterestCoverage, &[("intexp", 10.0), ("ncfo", 90.0)], 0.1)]
#[case(RatioKind::RoughFfo, &[("netinc", 80.0), ("depamor", 20.0)], 100.0)]
#[case(RatioKind::RoughAffo, &[("netinc", 80.0), ("depamor", 20.0), ("capex", -30.0)], 70.0)]
#[case(RatioKind::RoughFfoPs, &[("netinc", 80.0), ("depamor", 20.0), ("shareswa", 50.0)], 2.0)]
#[case(RatioKind::PriceRoughFfoPsRatio, &[("netinc", 80.0), ("depamor", 20.0), ("shareswa", 50.0), ("price", 30.0)], 15.0)]
#[case(RatioKind::RoughFfoDividendPayoutRatio, &[("netinc", 80.0), ("depamor", 20.0), ("ncfdiv", -40.0)], 0.4)]
#[case(RatioKind::RoughAffoDividendPayoutRatio, &[("netinc", 80.0), ("depamor", 20.0), ("capex", -20.0), ("ncfdiv", -40.0)], 0.5)]
#[case(RatioKind::DividendsFreeCashFlowRatio, &[("ncfdiv", -25.0), ("fcf", 100.0)], 0.25)]
#[case(RatioKind::ExcessCashMarginRatio, &[("ncfo", 30.0), ("opinc", 20.0), ("revenue", 200.0)], 5.0)]
#[case(RatioKind::ReturnOnInvestedCapital, &[("ebit", 15.0), ("invcapavg", 100.0)], 0.15)]
#[case(RatioKind::KjmFcfReturnOnCapitalEmployedSubCash, &[("fcf", 60.0), ("assets", 1000.0), ("cashnequsd", 100.0), ("payables", 200.0), ("deferredrev", 100.0)], 0.1)]
fn test_formula(#[case] kind: RatioKind, #[case] fields: &[(&str, f64)], #[case] expected: f64) {
    let ratios = RatioEngine::new(vec![kind]).unwrap().compute(&statements(vec![row(2023, fields)])).unwrap();
    assert_relative_eq!(latest(&ratios, kind).unwrap(), expected, epsilon = 1e-12);
}

/// A frame holding only a ratio's declared inputs and dependencies is enough
/// to evaluate it.
#[test]
fn test_formulas_read_only_declared_columns() {
    for kind in RatioKind::ALL {
        let mut columns: Vec<Column> = kind
            .inputs()
            .iter()
            .map(|field| Series::new((*field).into(), vec![1.0, 2.0]).into())
            .collect();
        columns.extend(
            kind.dependencies()
                .iter()
                .map(|dep| Series::new(dep.code().into(), vec![1.0, 2.0]).into()),
        );
        let frame = DataFrame::new(columns).unwrap();
        let result = frame.lazy().select([kind.expr().alias(kind.code())]).collect();
        assert!(result.is_ok(), "{kind} reads undeclared columns: {result:?}");
    }
}
