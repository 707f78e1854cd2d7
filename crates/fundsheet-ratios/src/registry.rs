//! Ratio Registry
//!
//! Lookup of the calculated ratios by code and by category, used for listing
//! and for validating user supplied ratio selections.

use crate::error::RatioError;
use crate::ratio::RatioKind;
use derive_more::Display;
use std::collections::HashMap;
use std::str::FromStr;

/// Ratio categories
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Display)]
pub enum RatioCategory {
    /// Debt relative to equity, earnings and cash flow
    Leverage,
    /// Ability to service interest
    Coverage,
    /// Cash earnings proxies and per-share figures
    #[display("Cash Flow")]
    CashFlow,
    /// Dividends and preferred payments relative to earnings and cash flow
    Payout,
    /// Margins and returns
    Profitability,
    /// Capital employed and returns on it
    #[display("Capital Employed")]
    CapitalEmployed,
    /// Period-over-period changes
    Growth,
}

impl RatioCategory {
    /// All categories, in listing order.
    pub const ALL: [Self; 7] = [
        Self::Leverage,
        Self::Coverage,
        Self::CashFlow,
        Self::Payout,
        Self::Profitability,
        Self::CapitalEmployed,
        Self::Growth,
    ];

    /// Human readable name.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Leverage => "Leverage",
            Self::Coverage => "Coverage",
            Self::CashFlow => "Cash Flow",
            Self::Payout => "Payout",
            Self::Profitability => "Profitability",
            Self::CapitalEmployed => "Capital Employed",
            Self::Growth => "Growth",
        }
    }
}

impl FromStr for RatioCategory {
    type Err = RatioError;

    /// Accepts the display name in any case, with spaces, hyphens or
    /// underscores between words, or none.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted: String = s
            .chars()
            .filter(|c| !matches!(c, ' ' | '-' | '_'))
            .collect::<String>()
            .to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|category| category.name().replace(' ', "").to_ascii_lowercase() == wanted)
            .ok_or_else(|| RatioError::UnknownCategory(s.to_string()))
    }
}

/// Ratio metadata
#[derive(Debug, Clone)]
pub struct RatioInfo {
    /// Ratio code (unique identifier)
    pub code: &'static str,
    /// Ratio category
    pub category: RatioCategory,
    /// Description shown in the workbook
    pub description: &'static str,
    /// Raw fields read by the formula
    pub inputs: &'static [&'static str],
    /// Codes of other ratios read by the formula
    pub depends_on: Vec<&'static str>,
}

impl From<RatioKind> for RatioInfo {
    fn from(kind: RatioKind) -> Self {
        Self {
            code: kind.code(),
            category: kind.category(),
            description: kind.description(),
            inputs: kind.inputs(),
            depends_on: kind.dependencies().iter().map(|dep| dep.code()).collect(),
        }
    }
}

/// Get all available ratio info
pub fn available_ratios() -> Vec<RatioInfo> {
    RatioKind::ALL.into_iter().map(RatioInfo::from).collect()
}

/// Get ratios by category
pub fn ratios_by_category(category: RatioCategory) -> Vec<RatioInfo> {
    available_ratios()
        .into_iter()
        .filter(|r| r.category == category)
        .collect()
}

/// Get ratio info by code
pub fn get_ratio_info(code: &str) -> Option<RatioInfo> {
    code.parse::<RatioKind>().ok().map(RatioInfo::from)
}

/// Count ratios by category
pub fn count_by_category() -> HashMap<RatioCategory, usize> {
    let mut counts = HashMap::new();
    for kind in RatioKind::ALL {
        *counts.entry(kind.category()).or_insert(0) += 1;
    }
    counts
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn test_available_ratios_count() {
        assert_eq!(available_ratios().len(), 46);
    }

    #[rstest]
    #[case(RatioCategory::Leverage, 10)]
    #[case(RatioCategory::Coverage, 4)]
    #[case(RatioCategory::CashFlow, 7)]
    #[case(RatioCategory::Payout, 7)]
    #[case(RatioCategory::Profitability, 8)]
    #[case(RatioCategory::CapitalEmployed, 6)]
    #[case(RatioCategory::Growth, 4)]
    fn test_ratios_by_category(#[case] category: RatioCategory, #[case] expected: usize) {
        assert_eq!(ratios_by_category(category).len(), expected);
        assert_eq!(count_by_category().get(&category), Some(&expected));
    }

    #[test]
    fn test_get_ratio_info() {
        let info = get_ratio_info("kjm_roce_sub_cash").unwrap();
        assert_eq!(info.category, RatioCategory::CapitalEmployed);
        assert_eq!(info.depends_on, vec!["kjm_capital_employed_sub_cash"]);
        assert_eq!(info.inputs, &["opinc"]);

        assert!(get_ratio_info("nonexistent_ratio").is_none());
    }

    #[rstest]
    #[case("leverage", RatioCategory::Leverage)]
    #[case("Cash Flow", RatioCategory::CashFlow)]
    #[case("capital-employed", RatioCategory::CapitalEmployed)]
    #[case("CAPITAL_EMPLOYED", RatioCategory::CapitalEmployed)]
    fn test_category_parse(#[case] input: &str, #[case] expected: RatioCategory) {
        assert_eq!(input.parse::<RatioCategory>().unwrap(), expected);
    }

    #[test]
    fn test_display_matches_name() {
        for category in RatioCategory::ALL {
            assert_eq!(category.to_string(), category.name());
        }
    }

    #[test]
    fn test_unknown_category() {
        assert!(matches!(
            "valuation".parse::<RatioCategory>(),
            Err(RatioError::UnknownCategory(_))
        ));
    }
}
