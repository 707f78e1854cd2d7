//! Reporting dimensions and database tiers.

use crate::error::DataError;
use derive_more::Display;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Statement period convention used by Sharadar.
///
/// The first letter selects as-reported (`A`) or most-recent restated (`M`)
/// figures; the last letter selects annual (`Y`), trailing twelve months (`T`)
/// or quarterly (`Q`) periods.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Display, Serialize, Deserialize)]
pub enum Dimension {
    /// Most-recent annual
    #[default]
    #[display("MRY")]
    Mry,
    /// As-reported annual
    #[display("ARY")]
    Ary,
    /// Most-recent trailing twelve months
    #[display("MRT")]
    Mrt,
    /// As-reported trailing twelve months
    #[display("ART")]
    Art,
    /// Most-recent quarterly
    #[display("MRQ")]
    Mrq,
    /// As-reported quarterly
    #[display("ARQ")]
    Arq,
}

impl Dimension {
    /// All dimensions, in the order they are documented.
    pub const ALL: [Self; 6] = [Self::Mry, Self::Ary, Self::Mrt, Self::Art, Self::Mrq, Self::Arq];

    /// Number of reporting periods per calendar year.
    ///
    /// Trailing dimensions are sampled every quarter, so they count four.
    pub const fn periods_per_year(self) -> usize {
        match self {
            Self::Mry | Self::Ary => 1,
            Self::Mrt | Self::Art | Self::Mrq | Self::Arq => 4,
        }
    }
}

impl FromStr for Dimension {
    type Err = DataError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "MRY" => Ok(Self::Mry),
            "ARY" => Ok(Self::Ary),
            "MRT" => Ok(Self::Mrt),
            "ART" => Ok(Self::Art),
            "MRQ" => Ok(Self::Mrq),
            "ARQ" => Ok(Self::Arq),
            _ => Err(DataError::InvalidDimension(s.to_string())),
        }
    }
}

/// Sharadar database tier.
///
/// Both tiers are served from the `SHARADAR/SF1` datatable. The tier is
/// enforced by the provider through the API key in use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Display, Serialize, Deserialize)]
pub enum Database {
    /// Free sample tier
    #[default]
    #[display("SF0")]
    Sf0,
    /// Subscription tier
    #[display("SF1")]
    Sf1,
}

impl Database {
    /// Environment variable holding the API key for this tier.
    pub const fn credential_variable(self) -> &'static str {
        match self {
            Self::Sf0 => "QUANDL_API_SF0_KEY",
            Self::Sf1 => "QUANDL_API_SF1_KEY",
        }
    }

    /// Read this tier's API key from the environment.
    pub fn api_key_from_env(self) -> crate::Result<String> {
        let variable = self.credential_variable();
        match std::env::var(variable) {
            Ok(key) if !key.trim().is_empty() => Ok(key.trim().to_string()),
            _ => Err(DataError::MissingCredentials {
                database: self.to_string(),
                variable: variable.to_string(),
            }),
        }
    }
}

impl FromStr for Database {
    type Err = DataError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "SF0" => Ok(Self::Sf0),
            "SF1" => Ok(Self::Sf1),
            _ => Err(DataError::InvalidDatabase(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("MRY", Dimension::Mry, 1)]
    #[case("ary", Dimension::Ary, 1)]
    #[case("MRT", Dimension::Mrt, 4)]
    #[case(" art ", Dimension::Art, 4)]
    #[case("MRQ", Dimension::Mrq, 4)]
    #[case("arq", Dimension::Arq, 4)]
    fn test_dimension_parse(#[case] input: &str, #[case] expected: Dimension, #[case] per_year: usize) {
        let dimension: Dimension = input.parse().unwrap();
        assert_eq!(dimension, expected);
        assert_eq!(dimension.periods_per_year(), per_year);
    }

    #[test]
    fn test_dimension_display_round_trips() {
        for dimension in Dimension::ALL {
            assert_eq!(dimension.to_string().parse::<Dimension>().unwrap(), dimension);
        }
    }

    #[test]
    fn test_invalid_dimension() {
        let err = "MRX".parse::<Dimension>().unwrap_err();
        assert!(matches!(err, DataError::InvalidDimension(ref s) if s == "MRX"));
    }

    #[test]
    fn test_database_credentials() {
        assert_eq!("sf0".parse::<Database>().unwrap(), Database::Sf0);
        assert_eq!(Database::Sf0.credential_variable(), "QUANDL_API_SF0_KEY");
        assert_eq!(Database::Sf1.credential_variable(), "QUANDL_API_SF1_KEY");
        assert!("SF2".parse::<Database>().is_err());
        assert_eq!(Database::default().to_string(), "SF0");
    }
}
