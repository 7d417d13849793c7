//! Metric module - the fixed set of tracked financial indicators

use std::collections::BTreeMap;
use std::fmt;

/// A US-GAAP-style financial indicator that guidance can be extracted for
///
/// Declaration order is the canonical column order used in every CSV the
/// pipeline writes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum FinancialMetric {
    /// Revenue growth projections (absolute or percentage)
    RevenueGrowth,
    /// Capital expenditure forecasts
    CapitalExpenditure,
    /// Earnings per share projections
    EarningsPerShare,
    /// Gross margin projections
    GrossMargin,
    /// Operating margin projections
    OperatingMargin,
    /// Net margin projections
    NetMargin,
    /// EBITDA projections
    Ebitda,
    /// Return on equity projections
    ReturnOnEquity,
    /// Return on assets projections
    ReturnOnAssets,
    /// Debt to equity ratio projections
    DebtToEquityRatio,
    /// Current ratio projections
    CurrentRatio,
    /// Quick ratio projections
    QuickRatio,
    /// Interest coverage ratio projections
    InterestCoverageRatio,
    /// Price to earnings ratio projections
    PriceToEarningsRatio,
    /// Dividend yield projections
    DividendYield,
}

/// How a metric's value is denominated in emitted strings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MetricUnit {
    /// Signed percentage, always carries a trailing `%`
    Percentage,
    /// Bare multiple such as `1.5` for "1.5 to 1"
    Ratio,
    /// Absolute number with units expanded (`150000000`)
    Amount,
    /// Either a percentage or an absolute amount
    Growth,
}

impl FinancialMetric {
    /// All metrics in canonical order
    pub const ALL: [FinancialMetric; 15] = [
        FinancialMetric::RevenueGrowth,
        FinancialMetric::CapitalExpenditure,
        FinancialMetric::EarningsPerShare,
        FinancialMetric::GrossMargin,
        FinancialMetric::OperatingMargin,
        FinancialMetric::NetMargin,
        FinancialMetric::Ebitda,
        FinancialMetric::ReturnOnEquity,
        FinancialMetric::ReturnOnAssets,
        FinancialMetric::DebtToEquityRatio,
        FinancialMetric::CurrentRatio,
        FinancialMetric::QuickRatio,
        FinancialMetric::InterestCoverageRatio,
        FinancialMetric::PriceToEarningsRatio,
        FinancialMetric::DividendYield,
    ];

    /// Get the snake_case identifier used in prompts and CSV headers
    pub fn as_str(&self) -> &'static str {
        match self {
            FinancialMetric::RevenueGrowth => "revenue_growth",
            FinancialMetric::CapitalExpenditure => "capital_expenditure",
            FinancialMetric::EarningsPerShare => "earnings_per_share",
            FinancialMetric::GrossMargin => "gross_margin",
            FinancialMetric::OperatingMargin => "operating_margin",
            FinancialMetric::NetMargin => "net_margin",
            FinancialMetric::Ebitda => "ebitda",
            FinancialMetric::ReturnOnEquity => "return_on_equity",
            FinancialMetric::ReturnOnAssets => "return_on_assets",
            FinancialMetric::DebtToEquityRatio => "debt_to_equity_ratio",
            FinancialMetric::CurrentRatio => "current_ratio",
            FinancialMetric::QuickRatio => "quick_ratio",
            FinancialMetric::InterestCoverageRatio => "interest_coverage_ratio",
            FinancialMetric::PriceToEarningsRatio => "price_to_earnings_ratio",
            FinancialMetric::DividendYield => "dividend_yield",
        }
    }

    /// Parse an identifier (case-insensitive, surrounding whitespace ignored)
    ///
    /// Anything that is not one of the 15 identifiers yields `None`; callers
    /// drop such statements rather than guessing a category.
    pub fn parse(s: &str) -> Option<Self> {
        let needle = s.trim().to_ascii_lowercase();
        Self::ALL.into_iter().find(|m| m.as_str() == needle)
    }

    /// Human-readable description used when listing targets in prompts
    pub fn description(&self) -> &'static str {
        match self {
            FinancialMetric::RevenueGrowth => "Revenue growth projections (absolute values and percentages)",
            FinancialMetric::CapitalExpenditure => "Capital expenditure forecasts",
            FinancialMetric::EarningsPerShare => "Earnings per share projections",
            FinancialMetric::GrossMargin => "Gross margin projections",
            FinancialMetric::OperatingMargin => "Operating margin projections",
            FinancialMetric::NetMargin => "Net margin projections",
            FinancialMetric::Ebitda => "EBITDA projections",
            FinancialMetric::ReturnOnEquity => "Return on equity projections",
            FinancialMetric::ReturnOnAssets => "Return on assets projections",
            FinancialMetric::DebtToEquityRatio => "Debt to equity ratio projections",
            FinancialMetric::CurrentRatio => "Current ratio projections",
            FinancialMetric::QuickRatio => "Quick ratio projections",
            FinancialMetric::InterestCoverageRatio => "Interest coverage ratio projections",
            FinancialMetric::PriceToEarningsRatio => "Price to earnings ratio projections",
            FinancialMetric::DividendYield => "Dividend yield projections",
        }
    }

    /// Denomination of this metric's values
    pub fn unit(&self) -> MetricUnit {
        match self {
            FinancialMetric::RevenueGrowth => MetricUnit::Growth,
            FinancialMetric::CapitalExpenditure
            | FinancialMetric::EarningsPerShare
            | FinancialMetric::Ebitda => MetricUnit::Amount,
            FinancialMetric::GrossMargin
            | FinancialMetric::OperatingMargin
            | FinancialMetric::NetMargin
            | FinancialMetric::ReturnOnEquity
            | FinancialMetric::ReturnOnAssets
            | FinancialMetric::DividendYield => MetricUnit::Percentage,
            FinancialMetric::DebtToEquityRatio
            | FinancialMetric::CurrentRatio
            | FinancialMetric::QuickRatio
            | FinancialMetric::InterestCoverageRatio
            | FinancialMetric::PriceToEarningsRatio => MetricUnit::Ratio,
        }
    }
}

impl fmt::Display for FinancialMetric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Values for any subset of the 15 metrics
///
/// Empty strings are never stored: a metric is either absent or carries a
/// non-empty value. Iteration follows canonical metric order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MetricValues {
    values: BTreeMap<FinancialMetric, String>,
}

impl MetricValues {
    /// Create an empty set of values
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a value; blank input is ignored and never clears an existing value
    pub fn set(&mut self, metric: FinancialMetric, value: impl Into<String>) {
        let value = value.into();
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return;
        }
        self.values.insert(metric, trimmed.to_string());
    }

    /// Get the value for a metric
    pub fn get(&self, metric: FinancialMetric) -> Option<&str> {
        self.values.get(&metric).map(String::as_str)
    }

    /// Get the value for a metric, or the empty string
    pub fn get_or_empty(&self, metric: FinancialMetric) -> &str {
        self.get(metric).unwrap_or("")
    }

    /// Whether a metric has a value
    pub fn contains(&self, metric: FinancialMetric) -> bool {
        self.values.contains_key(&metric)
    }

    /// Iterate populated metrics in canonical order
    pub fn iter(&self) -> impl Iterator<Item = (FinancialMetric, &str)> {
        self.values.iter().map(|(m, v)| (*m, v.as_str()))
    }

    /// Number of populated metrics
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether no metric is populated
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Fold another set into this one: every value in `other` overwrites
    pub fn merge_from(&mut self, other: &MetricValues) {
        for (metric, value) in other.iter() {
            self.values.insert(metric, value.to_string());
        }
    }
}

impl FromIterator<(FinancialMetric, String)> for MetricValues {
    fn from_iter<I: IntoIterator<Item = (FinancialMetric, String)>>(iter: I) -> Self {
        let mut values = MetricValues::new();
        for (metric, value) in iter {
            values.set(metric, value);
        }
        values
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_identifiers_are_unique_and_parse_back() {
        let mut seen = std::collections::HashSet::new();
        for metric in FinancialMetric::ALL {
            assert!(seen.insert(metric.as_str()));
            assert_eq!(FinancialMetric::parse(metric.as_str()), Some(metric));
        }
        assert_eq!(seen.len(), 15);
    }

    #[test]
    fn test_parse_is_lenient_on_case_and_whitespace() {
        assert_eq!(
            FinancialMetric::parse("  Gross_Margin "),
            Some(FinancialMetric::GrossMargin)
        );
        assert_eq!(FinancialMetric::parse("EBITDA"), Some(FinancialMetric::Ebitda));
    }

    #[test]
    fn test_parse_rejects_unknown_categories() {
        assert_eq!(FinancialMetric::parse("free_cash_flow"), None);
        assert_eq!(FinancialMetric::parse("gross margin"), None);
        assert_eq!(FinancialMetric::parse(""), None);
    }

    #[test]
    fn test_units() {
        assert_eq!(FinancialMetric::GrossMargin.unit(), MetricUnit::Percentage);
        assert_eq!(FinancialMetric::DividendYield.unit(), MetricUnit::Percentage);
        assert_eq!(FinancialMetric::CurrentRatio.unit(), MetricUnit::Ratio);
        assert_eq!(FinancialMetric::Ebitda.unit(), MetricUnit::Amount);
        assert_eq!(FinancialMetric::RevenueGrowth.unit(), MetricUnit::Growth);
    }

    #[test]
    fn test_canonical_order_matches_ordering() {
        let mut sorted = FinancialMetric::ALL;
        sorted.sort();
        assert_eq!(sorted, FinancialMetric::ALL);
        assert_eq!(FinancialMetric::ALL[0], FinancialMetric::RevenueGrowth);
        assert_eq!(FinancialMetric::ALL[14], FinancialMetric::DividendYield);
    }

    #[test]
    fn test_set_ignores_blank_values() {
        let mut values = MetricValues::new();
        values.set(FinancialMetric::GrossMargin, "20%");
        values.set(FinancialMetric::GrossMargin, "   ");
        values.set(FinancialMetric::Ebitda, "");
        assert_eq!(values.get(FinancialMetric::GrossMargin), Some("20%"));
        assert!(!values.contains(FinancialMetric::Ebitda));
        assert_eq!(values.get_or_empty(FinancialMetric::Ebitda), "");
    }

    #[test]
    fn test_iter_is_canonical_order() {
        let mut values = MetricValues::new();
        values.set(FinancialMetric::DividendYield, "2%");
        values.set(FinancialMetric::RevenueGrowth, "5%");
        values.set(FinancialMetric::Ebitda, "500000");
        let order: Vec<_> = values.iter().map(|(m, _)| m).collect();
        assert_eq!(
            order,
            vec![
                FinancialMetric::RevenueGrowth,
                FinancialMetric::Ebitda,
                FinancialMetric::DividendYield
            ]
        );
    }

    #[test]
    fn test_merge_overwrites_but_keeps_untouched_fields() {
        let mut base = MetricValues::new();
        base.set(FinancialMetric::GrossMargin, "20%");
        base.set(FinancialMetric::NetMargin, "8%");

        let mut later = MetricValues::new();
        later.set(FinancialMetric::NetMargin, "9%");
        later.set(FinancialMetric::Ebitda, "500000");

        base.merge_from(&later);
        assert_eq!(base.get(FinancialMetric::GrossMargin), Some("20%"));
        assert_eq!(base.get(FinancialMetric::NetMargin), Some("9%"));
        assert_eq!(base.get(FinancialMetric::Ebitda), Some("500000"));
    }

    fn arb_values() -> impl Strategy<Value = MetricValues> {
        proptest::collection::vec((0usize..15, "[0-9]{0,3}%?"), 0..10).prop_map(|pairs| {
            pairs
                .into_iter()
                .map(|(i, v)| (FinancialMetric::ALL[i], v))
                .collect()
        })
    }

    proptest! {
        #[test]
        fn prop_merge_never_loses_a_populated_field(a in arb_values(), b in arb_values()) {
            let mut merged = a.clone();
            merged.merge_from(&b);
            for metric in FinancialMetric::ALL {
                prop_assert_eq!(
                    merged.contains(metric),
                    a.contains(metric) || b.contains(metric)
                );
                if let Some(v) = b.get(metric) {
                    prop_assert_eq!(merged.get(metric), Some(v));
                }
            }
        }
    }
}
