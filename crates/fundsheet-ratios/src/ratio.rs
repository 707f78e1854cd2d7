//! The closed set of calculated ratios.

use crate::catalog::IndicatorSpec;
use crate::error::RatioError;
use crate::formulas::{capital_employed, cash_flow, coverage, growth, leverage, payout, profitability};
use crate::registry::RatioCategory;
use polars::prelude::Expr;
use std::fmt;
use std::str::FromStr;

/// A calculated ratio.
///
/// `ALL` lists every ratio in default workbook order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum RatioKind {
    /// Capital employed, cash subtracted
    KjmCapitalEmployedSubCash,
    /// Capital employed, cash included
    KjmCapitalEmployedWithCash,
    /// Return on capital employed, cash subtracted
    KjmRoceSubCash,
    /// Return on capital employed, cash included
    KjmRoceWithCash,
    /// Free cash flow return on capital employed, cash included
    KjmFcfReturnOnCapitalEmployedWithCash,
    /// Free cash flow return on capital employed, cash subtracted
    KjmFcfReturnOnCapitalEmployedSubCash,
    /// Operating income per share
    OpincPs,
    /// Cash flow from operations per share
    CfoPs,
    /// Free cash flow per share
    FcfPs,
    /// Change in operating income per share
    KjmDeltaOiFds,
    /// Change in free cash flow per share
    KjmDeltaFcfFds,
    /// Change in book value
    KjmDeltaBvFds,
    /// Change in tangible book value
    KjmDeltaTbvFds,
    /// Total liabilities / equity
    LiabilitiesEquityRatio,
    /// Total debt / EBITDA
    DebtEbitdaRatio,
    /// Total debt / (EBITDA - capex)
    DebtEbitdaMinusCapexRatio,
    /// Net debt / EBITDA
    NetDebtEbitdaRatio,
    /// Net debt / (EBITDA - capex)
    NetDebtEbitdaMinusCapexRatio,
    /// Total debt / equity
    DebtEquityRatio,
    /// EBIT / interest
    EbitInterestCoverage,
    /// EBITDA / interest
    EbitdaInterestCoverage,
    /// (EBITDA - capex) / interest
    EbitdaMinusCapexInterestCoverage,
    /// Interest / (CFO + interest)
    InterestToCfoPlusInterestCoverage,
    /// Total debt / invested capital
    DebtToTotalCapital,
    /// Total debt / CFO
    DebtCfoRatio,
    /// Long term debt / CFO
    LtdebtCfoRatio,
    /// Long term debt / net income
    LtdebtEarningsRatio,
    /// Dividends / net income
    IncomeDividendPayoutRatio,
    /// Dividends / CFO
    DividendsCfoRatio,
    /// Preferred dividends / CFO
    PreferredCfoRatio,
    /// Dividends / free cash flow
    DividendsFreeCashFlowRatio,
    /// Preferred dividends / free cash flow
    PreferredFreeCashFlowRatio,
    /// Operating income / revenue
    OperatingMargin,
    /// SG&A / gross profit
    SgAndAGrossProfitRatio,
    /// Enterprise value / operating income
    EvOpincRatio,
    /// EBIT / invested capital
    ReturnOnInvestedCapital,
    /// Free cash flow / EBITDA
    FreeCashFlowConversionRatio,
    /// (CFO - operating income) * 100 / revenue
    ExcessCashMarginRatio,
    /// Depreciation / revenue
    DepreciationRevenueRatio,
    /// Depreciation / CFO
    DepreciationCfoRatio,
    /// Net income + depreciation
    RoughFfo,
    /// Rough FFO per share
    RoughFfoPs,
    /// Price / rough FFO per share
    PriceRoughFfoPsRatio,
    /// Dividends / rough FFO
    RoughFfoDividendPayoutRatio,
    /// Rough FFO + capex
    RoughAffo,
    /// Dividends / rough AFFO
    RoughAffoDividendPayoutRatio,
}

impl RatioKind {
    /// Every ratio, in default workbook order.
    pub const ALL: [Self; 46] = [
        Self::KjmCapitalEmployedSubCash,
        Self::KjmCapitalEmployedWithCash,
        Self::KjmRoceSubCash,
        Self::KjmRoceWithCash,
        Self::KjmFcfReturnOnCapitalEmployedWithCash,
        Self::KjmFcfReturnOnCapitalEmployedSubCash,
        Self::OpincPs,
        Self::CfoPs,
        Self::FcfPs,
        Self::KjmDeltaOiFds,
        Self::KjmDeltaFcfFds,
        Self::KjmDeltaBvFds,
        Self::KjmDeltaTbvFds,
        Self::LiabilitiesEquityRatio,
        Self::DebtEbitdaRatio,
        Self::DebtEbitdaMinusCapexRatio,
        Self::NetDebtEbitdaRatio,
        Self::NetDebtEbitdaMinusCapexRatio,
        Self::DebtEquityRatio,
        Self::EbitInterestCoverage,
        Self::EbitdaInterestCoverage,
        Self::EbitdaMinusCapexInterestCoverage,
        Self::InterestToCfoPlusInterestCoverage,
        Self::DebtToTotalCapital,
        Self::DebtCfoRatio,
        Self::LtdebtCfoRatio,
        Self::LtdebtEarningsRatio,
        Self::IncomeDividendPayoutRatio,
        Self::DividendsCfoRatio,
        Self::PreferredCfoRatio,
        Self::DividendsFreeCashFlowRatio,
        Self::PreferredFreeCashFlowRatio,
        Self::OperatingMargin,
        Self::SgAndAGrossProfitRatio,
        Self::EvOpincRatio,
        Self::ReturnOnInvestedCapital,
        Self::FreeCashFlowConversionRatio,
        Self::ExcessCashMarginRatio,
        Self::DepreciationRevenueRatio,
        Self::DepreciationCfoRatio,
        Self::RoughFfo,
        Self::RoughFfoPs,
        Self::PriceRoughFfoPsRatio,
        Self::RoughFfoDividendPayoutRatio,
        Self::RoughAffo,
        Self::RoughAffoDividendPayoutRatio,
    ];

    /// Column name of the ratio.
    pub const fn code(self) -> &'static str {
        match self {
            Self::KjmCapitalEmployedSubCash => "kjm_capital_employed_sub_cash",
            Self::KjmCapitalEmployedWithCash => "kjm_capital_employed_with_cash",
            Self::KjmRoceSubCash => "kjm_roce_sub_cash",
            Self::KjmRoceWithCash => "kjm_roce_with_cash",
            Self::KjmFcfReturnOnCapitalEmployedWithCash => "kjm_fcf_return_on_capital_employed_with_cash",
            Self::KjmFcfReturnOnCapitalEmployedSubCash => "kjm_fcf_return_on_capital_employed_sub_cash",
            Self::OpincPs => "opinc_ps",
            Self::CfoPs => "cfo_ps",
            Self::FcfPs => "fcf_ps",
            Self::KjmDeltaOiFds => "kjm_delta_oi_fds",
            Self::KjmDeltaFcfFds => "kjm_delta_fcf_fds",
            Self::KjmDeltaBvFds => "kjm_delta_bv_fds",
            Self::KjmDeltaTbvFds => "kjm_delta_tbv_fds",
            Self::LiabilitiesEquityRatio => "liabilities_equity_ratio",
            Self::DebtEbitdaRatio => "debt_ebitda_ratio",
            Self::DebtEbitdaMinusCapexRatio => "debt_ebitda_minus_capex_ratio",
            Self::NetDebtEbitdaRatio => "net_debt_ebitda_ratio",
            Self::NetDebtEbitdaMinusCapexRatio => "net_debt_ebitda_minus_capex_ratio",
            Self::DebtEquityRatio => "debt_equity_ratio",
            Self::EbitInterestCoverage => "ebit_interest_coverage",
            Self::EbitdaInterestCoverage => "ebitda_interest_coverage",
            Self::EbitdaMinusCapexInterestCoverage => "ebitda_minus_capex_interest_coverage",
            Self::InterestToCfoPlusInterestCoverage => "interest_to_cfo_plus_interest_coverage",
            Self::DebtToTotalCapital => "debt_to_total_capital",
            Self::DebtCfoRatio => "debt_cfo_ratio",
            Self::LtdebtCfoRatio => "ltdebt_cfo_ratio",
            Self::LtdebtEarningsRatio => "ltdebt_earnings_ratio",
            Self::IncomeDividendPayoutRatio => "income_dividend_payout_ratio",
            Self::DividendsCfoRatio => "dividends_cfo_ratio",
            Self::PreferredCfoRatio => "preferred_cfo_ratio",
            Self::DividendsFreeCashFlowRatio => "dividends_free_cash_flow_ratio",
            Self::PreferredFreeCashFlowRatio => "preferred_free_cash_flow_ratio",
            Self::OperatingMargin => "operating_margin",
            Self::SgAndAGrossProfitRatio => "sg_and_a_gross_profit_ratio",
            Self::EvOpincRatio => "ev_opinc_ratio",
            Self::ReturnOnInvestedCapital => "return_on_invested_capital",
            Self::FreeCashFlowConversionRatio => "free_cash_flow_conversion_ratio",
            Self::ExcessCashMarginRatio => "excess_cash_margin_ratio",
            Self::DepreciationRevenueRatio => "depreciation_revenue_ratio",
            Self::DepreciationCfoRatio => "depreciation_cfo_ratio",
            Self::RoughFfo => "rough_ffo",
            Self::RoughFfoPs => "rough_ffo_ps",
            Self::PriceRoughFfoPsRatio => "price_rough_ffo_ps_ratio",
            Self::RoughFfoDividendPayoutRatio => "rough_ffo_dividend_payout_ratio",
            Self::RoughAffo => "rough_affo",
            Self::RoughAffoDividendPayoutRatio => "rough_affo_dividend_payout_ratio",
        }
    }

    /// Description shown next to the ratio in the workbook.
    pub const fn description(self) -> &'static str {
        match self {
            Self::KjmCapitalEmployedSubCash => "Kenneth J Marshall Capital Employed Subtract Cash",
            Self::KjmCapitalEmployedWithCash => "Kenneth J Marshall Capital Employed With Cash",
            Self::KjmRoceSubCash => "KJM Return on Capital Employed Subtract Cash",
            Self::KjmRoceWithCash => "KJM Return on Capital Employed With Cash",
            Self::KjmFcfReturnOnCapitalEmployedWithCash => "KJM Free Cash Flow ROCE With Cash",
            Self::KjmFcfReturnOnCapitalEmployedSubCash => "KJM Free Cash Flow ROCE Subtract Cash",
            Self::OpincPs => "Operating Income Per Share",
            Self::CfoPs => "Cash Flow from Operations Per Share",
            Self::FcfPs => "Free Cash Flow per Share",
            Self::KjmDeltaOiFds => "YoY change in Operating Income per Fully Diluted Share",
            Self::KjmDeltaFcfFds => "YoY change in Free Cash Flow per Fully Diluted Share",
            Self::KjmDeltaBvFds => "YoY change in Book Value per Fully Diluted Share",
            Self::KjmDeltaTbvFds => "YoY change in Tangible Book Value per Fully Diluted Share",
            Self::LiabilitiesEquityRatio => "Total Liabilities / Shareholders Equity",
            Self::DebtEbitdaRatio => "Total Debt / ebitda",
            Self::DebtEbitdaMinusCapexRatio => "Total Debt / (ebitda - CapEx)",
            Self::NetDebtEbitdaRatio => "Net Debt / ebitda",
            Self::NetDebtEbitdaMinusCapexRatio => "Net Debt / (ebitda - CapEx)",
            Self::DebtEquityRatio => "Total Debt / Shareholders Equity",
            Self::EbitInterestCoverage => "ebit / Interest Expense",
            Self::EbitdaInterestCoverage => "ebitda / Interest Expense",
            Self::EbitdaMinusCapexInterestCoverage => "(ebitda - CapEx) / Interest Expense",
            Self::InterestToCfoPlusInterestCoverage => "Interest / (CFO + Interest)",
            Self::DebtToTotalCapital => "Total Debt / Invested Capital",
            Self::DebtCfoRatio => "Total Debt / Cash Flow From Operations",
            Self::LtdebtCfoRatio => "Long Term Debt / Cash Flow From Operations",
            Self::LtdebtEarningsRatio => "Long Term Debt / Income",
            Self::IncomeDividendPayoutRatio => "Dividends / Net Income",
            Self::DividendsCfoRatio => "Dividends / CFO",
            Self::PreferredCfoRatio => "Preferred Payments / CFO",
            Self::DividendsFreeCashFlowRatio => "Dividends / fcf",
            Self::PreferredFreeCashFlowRatio => "Preferred Payments / fcf",
            Self::OperatingMargin => "Operating Margin: (Gross Profit - Opex) / Revenue",
            Self::SgAndAGrossProfitRatio => "SG&A to Gross Profit Ratio",
            Self::EvOpincRatio => "Acquirers Multiple: Enterprise Value / Operating Income",
            Self::ReturnOnInvestedCapital => "Return on Invested Capital: ebit / Invested Capital",
            Self::FreeCashFlowConversionRatio => "Free Cash Flow Conversion Ratio",
            Self::ExcessCashMarginRatio => "Excess Cash Margin Ratio",
            Self::DepreciationRevenueRatio => "Depreciation / Revenue",
            Self::DepreciationCfoRatio => "Depreciation / Cash Flow From Operations",
            Self::RoughFfo => "Rough FFO: Net Income plus Depreciation (missing cap gain from RE sales adjust)",
            Self::RoughFfoPs => "Rough FFO per Share",
            Self::PriceRoughFfoPsRatio => "Price divided by rough_ffo_ps",
            Self::RoughFfoDividendPayoutRatio => "Dividends / rough_ffo",
            Self::RoughAffo => "Rough AFFO: Rough FFO less CapEx",
            Self::RoughAffoDividendPayoutRatio => "Dividends / rough_affo",
        }
    }

    /// Registry category.
    pub const fn category(self) -> RatioCategory {
        match self {
            Self::KjmCapitalEmployedSubCash
            | Self::KjmCapitalEmployedWithCash
            | Self::KjmRoceSubCash
            | Self::KjmRoceWithCash
            | Self::KjmFcfReturnOnCapitalEmployedWithCash
            | Self::KjmFcfReturnOnCapitalEmployedSubCash => RatioCategory::CapitalEmployed,
            Self::OpincPs
            | Self::CfoPs
            | Self::FcfPs
            | Self::RoughFfo
            | Self::RoughFfoPs
            | Self::PriceRoughFfoPsRatio
            | Self::RoughAffo => RatioCategory::CashFlow,
            Self::KjmDeltaOiFds | Self::KjmDeltaFcfFds | Self::KjmDeltaBvFds | Self::KjmDeltaTbvFds => {
                RatioCategory::Growth
            }
            Self::LiabilitiesEquityRatio
            | Self::DebtEbitdaRatio
            | Self::DebtEbitdaMinusCapexRatio
            | Self::NetDebtEbitdaRatio
            | Self::NetDebtEbitdaMinusCapexRatio
            | Self::DebtEquityRatio
            | Self::DebtToTotalCapital
            | Self::DebtCfoRatio
            | Self::LtdebtCfoRatio
            | Self::LtdebtEarningsRatio => RatioCategory::Leverage,
            Self::EbitInterestCoverage
            | Self::EbitdaInterestCoverage
            | Self::EbitdaMinusCapexInterestCoverage
            | Self::InterestToCfoPlusInterestCoverage => RatioCategory::Coverage,
            Self::IncomeDividendPayoutRatio
            | Self::DividendsCfoRatio
            | Self::PreferredCfoRatio
            | Self::DividendsFreeCashFlowRatio
            | Self::PreferredFreeCashFlowRatio
            | Self::RoughFfoDividendPayoutRatio
            | Self::RoughAffoDividendPayoutRatio => RatioCategory::Payout,
            Self::OperatingMargin
            | Self::SgAndAGrossProfitRatio
            | Self::EvOpincRatio
            | Self::ReturnOnInvestedCapital
            | Self::FreeCashFlowConversionRatio
            | Self::ExcessCashMarginRatio
            | Self::DepreciationRevenueRatio
            | Self::DepreciationCfoRatio => RatioCategory::Profitability,
        }
    }

    /// Other ratios this ratio's formula reads.
    pub const fn dependencies(self) -> &'static [Self] {
        match self {
            Self::KjmRoceSubCash | Self::KjmFcfReturnOnCapitalEmployedSubCash => {
                &[Self::KjmCapitalEmployedSubCash]
            }
            Self::KjmRoceWithCash | Self::KjmFcfReturnOnCapitalEmployedWithCash => {
                &[Self::KjmCapitalEmployedWithCash]
            }
            Self::KjmDeltaOiFds => &[Self::OpincPs],
            Self::KjmDeltaFcfFds => &[Self::FcfPs],
            Self::RoughFfoPs | Self::RoughAffo | Self::RoughFfoDividendPayoutRatio => &[Self::RoughFfo],
            Self::PriceRoughFfoPsRatio => &[Self::RoughFfoPs],
            Self::RoughAffoDividendPayoutRatio => &[Self::RoughAffo],
            _ => &[],
        }
    }

    /// Raw fields this ratio's formula reads.
    pub const fn inputs(self) -> &'static [&'static str] {
        match self {
            Self::KjmCapitalEmployedSubCash => &["assets", "cashnequsd", "payables", "deferredrev"],
            Self::KjmCapitalEmployedWithCash => &["assets", "payables", "deferredrev"],
            Self::KjmRoceSubCash | Self::KjmRoceWithCash => &["opinc"],
            Self::KjmFcfReturnOnCapitalEmployedWithCash | Self::KjmFcfReturnOnCapitalEmployedSubCash => &["fcf"],
            Self::OpincPs => &["opinc", "shareswa"],
            Self::CfoPs => &["ncfo", "shareswa"],
            Self::FcfPs => &["fcf", "shareswa"],
            Self::KjmDeltaOiFds | Self::KjmDeltaFcfFds => &[],
            Self::KjmDeltaBvFds => &["equity"],
            Self::KjmDeltaTbvFds => &["equity", "intangibles"],
            Self::LiabilitiesEquityRatio => &["liabilities", "equity"],
            Self::DebtEbitdaRatio => &["debt", "ebitda"],
            Self::DebtEbitdaMinusCapexRatio => &["debt", "ebitda", "capex"],
            Self::NetDebtEbitdaRatio => &["debt", "cashnequsd", "ebitda"],
            Self::NetDebtEbitdaMinusCapexRatio => &["debt", "cashnequsd", "ebitda", "capex"],
            Self::DebtEquityRatio => &["debt", "equity"],
            Self::EbitInterestCoverage => &["ebit", "intexp"],
            Self::EbitdaInterestCoverage => &["ebitda", "intexp"],
            Self::EbitdaMinusCapexInterestCoverage => &["ebitda", "capex", "intexp"],
            Self::InterestToCfoPlusInterestCoverage => &["intexp", "ncfo"],
            Self::DebtToTotalCapital => &["debt", "invcapavg"],
            Self::DebtCfoRatio => &["debt", "ncfo"],
            Self::LtdebtCfoRatio => &["debtnc", "ncfo"],
            Self::LtdebtEarningsRatio => &["debtnc", "netinc"],
            Self::IncomeDividendPayoutRatio => &["ncfdiv", "netinc"],
            Self::DividendsCfoRatio => &["ncfdiv", "ncfo"],
            Self::PreferredCfoRatio => &["prefdivis", "ncfo"],
            Self::DividendsFreeCashFlowRatio => &["ncfdiv", "fcf"],
            Self::PreferredFreeCashFlowRatio => &["prefdivis", "fcf"],
            Self::OperatingMargin => &["opinc", "revenue"],
            Self::SgAndAGrossProfitRatio => &["sgna", "gp"],
            Self::EvOpincRatio => &["ev", "opinc"],
            Self::ReturnOnInvestedCapital => &["ebit", "invcapavg"],
            Self::FreeCashFlowConversionRatio => &["fcf", "ebitda"],
            Self::ExcessCashMarginRatio => &["ncfo", "opinc", "revenue"],
            Self::DepreciationRevenueRatio => &["depamor", "revenue"],
            Self::DepreciationCfoRatio => &["depamor", "ncfo"],
            Self::RoughFfo => &["netinc", "depamor"],
            Self::RoughFfoPs => &["shareswa"],
            Self::PriceRoughFfoPsRatio => &["price"],
            Self::RoughFfoDividendPayoutRatio | Self::RoughAffoDividendPayoutRatio => &["ncfdiv"],
            Self::RoughAffo => &["capex"],
        }
    }

    /// The ratio's formula, before it is aliased to [`RatioKind::code`].
    pub fn expr(self) -> Expr {
        match self {
            Self::KjmCapitalEmployedSubCash => capital_employed::capital_employed_sub_cash(),
            Self::KjmCapitalEmployedWithCash => capital_employed::capital_employed_with_cash(),
            Self::KjmRoceSubCash => capital_employed::roce_sub_cash(),
            Self::KjmRoceWithCash => capital_employed::roce_with_cash(),
            Self::KjmFcfReturnOnCapitalEmployedWithCash => capital_employed::fcf_roce_with_cash(),
            Self::KjmFcfReturnOnCapitalEmployedSubCash => capital_employed::fcf_roce_sub_cash(),
            Self::OpincPs => cash_flow::opinc_ps(),
            Self::CfoPs => cash_flow::cfo_ps(),
            Self::FcfPs => cash_flow::fcf_ps(),
            Self::KjmDeltaOiFds => growth::delta_oi_fds(),
            Self::KjmDeltaFcfFds => growth::delta_fcf_fds(),
            Self::KjmDeltaBvFds => growth::delta_bv_fds(),
            Self::KjmDeltaTbvFds => growth::delta_tbv_fds(),
            Self::LiabilitiesEquityRatio => leverage::liabilities_equity_ratio(),
            Self::DebtEbitdaRatio => leverage::debt_ebitda_ratio(),
            Self::DebtEbitdaMinusCapexRatio => leverage::debt_ebitda_minus_capex_ratio(),
            Self::NetDebtEbitdaRatio => leverage::net_debt_ebitda_ratio(),
            Self::NetDebtEbitdaMinusCapexRatio => leverage::net_debt_ebitda_minus_capex_ratio(),
            Self::DebtEquityRatio => leverage::debt_equity_ratio(),
            Self::EbitInterestCoverage => coverage::ebit_interest_coverage(),
            Self::EbitdaInterestCoverage => coverage::ebitda_interest_coverage(),
            Self::EbitdaMinusCapexInterestCoverage => coverage::ebitda_minus_capex_interest_coverage(),
            Self::InterestToCfoPlusInterestCoverage => coverage::interest_to_cfo_plus_interest_coverage(),
            Self::DebtToTotalCapital => leverage::debt_to_total_capital(),
            Self::DebtCfoRatio => leverage::debt_cfo_ratio(),
            Self::LtdebtCfoRatio => leverage::ltdebt_cfo_ratio(),
            Self::LtdebtEarningsRatio => leverage::ltdebt_earnings_ratio(),
            Self::IncomeDividendPayoutRatio => payout::income_dividend_payout_ratio(),
            Self::DividendsCfoRatio => payout::dividends_cfo_ratio(),
            Self::PreferredCfoRatio => payout::preferred_cfo_ratio(),
            Self::DividendsFreeCashFlowRatio => payout::dividends_free_cash_flow_ratio(),
            Self::PreferredFreeCashFlowRatio => payout::preferred_free_cash_flow_ratio(),
            Self::OperatingMargin => profitability::operating_margin(),
            Self::SgAndAGrossProfitRatio => profitability::sg_and_a_gross_profit_ratio(),
            Self::EvOpincRatio => profitability::ev_opinc_ratio(),
            Self::ReturnOnInvestedCapital => profitability::return_on_invested_capital(),
            Self::FreeCashFlowConversionRatio => profitability::free_cash_flow_conversion_ratio(),
            Self::ExcessCashMarginRatio => profitability::excess_cash_margin_ratio(),
            Self::DepreciationRevenueRatio => profitability::depreciation_revenue_ratio(),
            Self::DepreciationCfoRatio => profitability::depreciation_cfo_ratio(),
            Self::RoughFfo => cash_flow::rough_ffo(),
            Self::RoughFfoPs => cash_flow::rough_ffo_ps(),
            Self::PriceRoughFfoPsRatio => cash_flow::price_rough_ffo_ps_ratio(),
            Self::RoughFfoDividendPayoutRatio => payout::rough_ffo_dividend_payout_ratio(),
            Self::RoughAffo => cash_flow::rough_affo(),
            Self::RoughAffoDividendPayoutRatio => payout::rough_affo_dividend_payout_ratio(),
        }
    }

    /// Code and description as a catalog entry.
    pub const fn spec(self) -> IndicatorSpec {
        IndicatorSpec {
            code: self.code(),
            description: self.description(),
        }
    }
}

impl fmt::Display for RatioKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for RatioKind {
    type Err = RatioError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let code = s.trim();
        Self::ALL
            .into_iter()
            .find(|kind| kind.code() == code)
            .ok_or_else(|| RatioError::Unimplemented(code.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::raw_fields;
    use std::collections::HashSet;

    #[test]
    fn test_codes_are_unique() {
        let codes: HashSet<_> = RatioKind::ALL.iter().map(|k| k.code()).collect();
        assert_eq!(codes.len(), RatioKind::ALL.len());
    }

    #[test]
    fn test_code_round_trip() {
        for kind in RatioKind::ALL {
            assert_eq!(kind.code().parse::<RatioKind>().unwrap(), kind);
        }
    }

    #[test]
    fn test_unknown_code_is_unimplemented() {
        let err = "free_cash_flow_levered".parse::<RatioKind>().unwrap_err();
        assert!(matches!(err, RatioError::Unimplemented(ref code) if code == "free_cash_flow_levered"));
    }

    #[test]
    fn test_inputs_are_catalog_fields() {
        let fields: HashSet<_> = raw_fields().collect();
        for kind in RatioKind::ALL {
            for input in kind.inputs() {
                assert!(fields.contains(input), "{kind} reads unknown field {input}");
            }
        }
    }

    #[test]
    fn test_ratio_codes_do_not_shadow_raw_fields() {
        let fields: HashSet<_> = raw_fields().collect();
        for kind in RatioKind::ALL {
            assert!(!fields.contains(kind.code()));
        }
    }
}
