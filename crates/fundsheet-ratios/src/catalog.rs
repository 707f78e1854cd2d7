//! Indicator catalogs
//!
//! Declaration order is the order rows appear in the workbook.

use serde::Serialize;
use std::fmt;

/// A raw or calculated indicator code with its human description.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct IndicatorSpec {
    /// Indicator code
    pub code: &'static str,
    /// Human readable description
    pub description: &'static str,
}

const fn spec(code: &'static str, description: &'static str) -> IndicatorSpec {
    IndicatorSpec { code, description }
}

/// The statement a table of indicators belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StatementKind {
    /// Income statement
    Income,
    /// Cash flow statement
    CashFlow,
    /// Balance sheet
    Balance,
    /// Sharadar's own metrics and ratios
    MetricsAndRatios,
    /// Ratios computed by the engine
    Calculated,
}

impl StatementKind {
    /// The four statements fetched from Sharadar, in workbook order.
    pub const RAW: [Self; 4] = [Self::Income, Self::CashFlow, Self::Balance, Self::MetricsAndRatios];

    /// Header label used in the presentation table.
    pub const fn label(self) -> &'static str {
        match self {
            Self::Income => "Sharadar Income",
            Self::CashFlow => "Sharadar Cash Flow",
            Self::Balance => "Sharadar Balance",
            Self::MetricsAndRatios => "Sharadar Metrics and Ratios",
            Self::Calculated => "Calculated Metrics and Ratios",
        }
    }

    /// Raw field catalog for the statement. Empty for [`StatementKind::Calculated`],
    /// whose catalog depends on the engine configuration.
    pub const fn catalog(self) -> &'static [IndicatorSpec] {
        match self {
            Self::Income => INCOME,
            Self::CashFlow => CASH_FLOW,
            Self::Balance => BALANCE,
            Self::MetricsAndRatios => METRICS_AND_RATIOS,
            Self::Calculated => &[],
        }
    }
}

impl fmt::Display for StatementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Income statement fields
pub const INCOME: &[IndicatorSpec] = &[
    spec("revenue", "Revenues"),
    spec("cor", "Cost of Revenue"),
    spec("gp", "Gross Profit"),
    spec("sgna", "Sales General and Admin"),
    spec("rnd", "Research and Development Expense"),
    spec("opex", "Operating Expenses"),
    spec("intexp", "Interest Expense"),
    spec("taxexp", "Tax Expense"),
    spec("netincdis", "Net Loss Income from Discontinued Operations"),
    spec("netincnci", "Net Income to Non-Controlling Interests"),
    spec("opinc", "Operating Income"),
    spec("ebit", "Earnings Before Interest and Taxes"),
    spec("netinc", "Net Income"),
    spec("prefdivis", "Preferred Dividends"),
    spec("netinccmn", "Net Income to Common (after prefs paid)"),
    spec("epsdil", "Earnings Per Share Diluted"),
    spec("price", "Price per Share"),
    spec("shareswadil", "Weighted Average Shares Diluted"),
    spec("dps", "Dividends per Basic Common Share"),
];

/// Cash flow statement fields. `capex` and `ncfdiv` are reported as negative numbers.
pub const CASH_FLOW: &[IndicatorSpec] = &[
    spec("depamor", "Depreciation and Amortization"),
    spec("ncfo", "Net Cash Flow From Operations"),
    spec("ncfi", "Net Cash Flow From Investing"),
    spec("capex", "Capital Expenditure"),
    spec("ncff", "Net Cash Flow From Financing"),
    spec("ncfdiv", "Payment of Dividends and Other Cash Distributions"),
];

/// Balance sheet fields
pub const BALANCE: &[IndicatorSpec] = &[
    spec("cashnequsd", "Cash and Equivalents (USD)"),
    spec("receivables", "Receivables"),
    spec("inventory", "Inventory"),
    spec("investmentsc", "Investments Current"),
    spec("assetsc", "Current Assets"),
    spec("intangibles", "Intangibles"),
    spec("ppnenet", "Property Plant and Equipment Net"),
    spec("investmentsnc", "Investments Non-Current"),
    spec("assetsnc", "Non Current Assets"),
    spec("assets", "Total Assets"),
    spec("deferredrev", "Deferred Revenue"),
    spec("payables", "Payables"),
    spec("liabilitiesc", "Current Liabilities"),
    spec("debtc", "Current Debt"),
    spec("taxliabilities", "Tax Liabilities"),
    spec("debtnc", "Non Current Debt"),
    spec("liabilitiesnc", "Non Current Liabilities"),
    spec("liabilities", "Total Liabilities"),
    spec("retearn", "Retained Earnings"),
    spec("equity", "Shareholders Equity"),
    spec("debt", "Total Debt"),
    spec("shareswa", "Weighted Average Shares"),
    spec("workingcapital", "Working Capital"),
];

/// Sharadar metrics and ratios
pub const METRICS_AND_RATIOS: &[IndicatorSpec] = &[
    spec("ev", "Enterprise Value"),
    spec("evebitda", "Enterprise Value divided by ebitda"),
    spec("pe", "Price Earnings Damodaran: Market Cap / Net Income"),
    spec("ps", "Price Sales Damodaran: Market Cap / Revenue"),
    spec("assetturnover", "Revenue / Assets average"),
    spec("roa", "Return on Assets: Net Income / Average Assets"),
    spec("roe", "Return on Equity: Net Income / Average Equity"),
    spec("ros", "Return on Sales: ebit / Revenue"),
    spec("ebitda", "Earnings Before Interest Taxes & Depreciation & Amortization"),
    spec("fcf", "Free Cash Flow: CFO - CapEx"),
    spec("invcapavg", "Invested Capital"),
    spec("roic", "Return On Invested Capital"),
    spec("grossmargin", "Gross Margin: Gross Profit/ Revenue"),
    spec("netmargin", "Net Margin: Net Income/ Revenue"),
];

/// Every raw field code across the four statements, in workbook order.
pub fn raw_fields() -> impl Iterator<Item = &'static str> {
    StatementKind::RAW
        .into_iter()
        .flat_map(|kind| kind.catalog().iter().map(|spec| spec.code))
}

/// Description of `code` within `catalog`, if declared.
pub fn describe(catalog: &[IndicatorSpec], code: &str) -> Option<&'static str> {
    catalog.iter().find(|spec| spec.code == code).map(|spec| spec.description)
}
