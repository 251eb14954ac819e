//! Ticker notation translation and share-class filtering.
//!
//! Tiingo separates class shares from the base symbol with a `.` while the
//! internal notation uses `/` (`BRK.A` ↔ `BRK/A`). Warrants, units and
//! preferred shares are encoded in the raw ticker itself and are filtered
//! out before translation.

use regex::Regex;

/// Synthetic instruments reserved by the provider for connectivity tests.
const TEST_TICKER_PREFIXES: [&str; 3] = ["ATEST", "NTEST", "PTEST"];

/// Warrant/preferred/unit suffix behind an explicit `-` separator.
const SUFFIX_WITH_SEPARATOR: &str = r"^[A-Za-z0-9]+-[WPU].*$";

/// Warrant/preferred/unit suffix appended directly to a 4-character base.
const SUFFIX_NO_SEPARATOR: &str = r"^[A-Za-z0-9]{4}[WPU].*$";

/// Bidirectional mapping between provider and internal ticker notation.
///
/// The only transformation is the class-share separator substitution; case
/// and all other characters pass through untouched, so `to_provider` and
/// `to_internal` are exact inverses.
#[derive(Debug, Clone, Copy)]
pub struct SymbolTranslator {
    internal_separator: char,
    provider_separator: char,
}

impl Default for SymbolTranslator {
    fn default() -> Self {
        Self {
            internal_separator: '/',
            provider_separator: '.',
        }
    }
}

impl SymbolTranslator {
    /// Create a translator for a custom separator pair.
    #[must_use]
    pub const fn new(internal_separator: char, provider_separator: char) -> Self {
        Self {
            internal_separator,
            provider_separator,
        }
    }

    /// Translate an internal ticker to provider notation.
    #[must_use]
    pub fn to_provider(&self, ticker: &str) -> String {
        ticker.replace(self.internal_separator, &self.provider_separator.to_string())
    }

    /// Translate a provider ticker to internal notation.
    #[must_use]
    pub fn to_internal(&self, provider_ticker: &str) -> String {
        provider_ticker.replace(self.provider_separator, &self.internal_separator.to_string())
    }
}

/// Pattern-based filter for tickers the catalog should never carry.
///
/// Rules are evaluated against the raw provider-notation ticker, before any
/// translation. Any match excludes the instrument.
#[derive(Debug, Clone)]
pub struct TickerFilter {
    test_prefixes: Vec<String>,
    suffix_with_separator: Regex,
    suffix_no_separator: Regex,
}

impl TickerFilter {
    /// Build the filter with the provider's default rule set.
    ///
    /// # Errors
    ///
    /// Returns a [`regex::Error`] if a suffix pattern fails to compile.
    pub fn new() -> Result<Self, regex::Error> {
        Self::with_rules(
            &TEST_TICKER_PREFIXES,
            SUFFIX_WITH_SEPARATOR,
            SUFFIX_NO_SEPARATOR,
        )
    }

    /// Build the filter from explicit rule data.
    ///
    /// # Errors
    ///
    /// Returns a [`regex::Error`] if a suffix pattern fails to compile.
    pub fn with_rules(
        test_prefixes: &[&str],
        suffix_with_separator: &str,
        suffix_no_separator: &str,
    ) -> Result<Self, regex::Error> {
        Ok(Self {
            test_prefixes: test_prefixes.iter().map(ToString::to_string).collect(),
            suffix_with_separator: Regex::new(suffix_with_separator)?,
            suffix_no_separator: Regex::new(suffix_no_separator)?,
        })
    }

    /// Whether the raw provider ticker should be excluded from the catalog.
    #[must_use]
    pub fn is_ignored(&self, provider_ticker: &str) -> bool {
        self.test_prefixes
            .iter()
            .any(|prefix| provider_ticker.starts_with(prefix))
            || provider_ticker.contains(' ')
            || self.suffix_with_separator.is_match(provider_ticker)
            || self.suffix_no_separator.is_match(provider_ticker)
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;
    use test_case::test_case;

    use super::*;

    #[test]
    fn translator_maps_class_share_separator() {
        let translator = SymbolTranslator::default();

        assert_eq!(translator.to_internal("BRK.A"), "BRK/A");
        assert_eq!(translator.to_provider("BRK/A"), "BRK.A");
    }

    #[test]
    fn translator_leaves_plain_tickers_alone() {
        let translator = SymbolTranslator::default();

        assert_eq!(translator.to_internal("AAPL"), "AAPL");
        assert_eq!(translator.to_provider("aapl"), "aapl");
    }

    proptest! {
        #[test]
        fn translator_round_trips(base in "[A-Za-z0-9]{1,5}", class in "[A-Za-z]{1,2}") {
            let translator = SymbolTranslator::default();

            let internal = format!("{base}/{class}");
            prop_assert_eq!(translator.to_internal(&translator.to_provider(&internal)), internal);

            let provider = format!("{base}.{class}");
            prop_assert_eq!(translator.to_provider(&translator.to_internal(&provider)), provider);
        }
    }

    #[test_case("CLASSA-W1"; "warrant suffix behind separator")]
    #[test_case("CLASSA-P"; "preferred suffix behind separator")]
    #[test_case("CLASSA-U"; "unit suffix behind separator")]
    #[test_case("ABCDW"; "warrant suffix without separator")]
    #[test_case("CLAS U"; "embedded space")]
    #[test_case("ATEST-A"; "test instrument prefix")]
    #[test_case("NTEST"; "bare test instrument")]
    #[test_case("PTESTQ"; "test prefix with trailing characters")]
    fn filter_excludes(ticker: &str) {
        let filter = TickerFilter::new().unwrap();
        assert!(filter.is_ignored(ticker), "{ticker} should be ignored");
    }

    #[test_case("AAPL"; "plain common stock")]
    #[test_case("BRK-A"; "ordinary class share")]
    #[test_case("BRK.A"; "class share in provider notation")]
    #[test_case("ABCW"; "three character base with trailing W")]
    #[test_case("GOOGL"; "five character base")]
    fn filter_keeps(ticker: &str) {
        let filter = TickerFilter::new().unwrap();
        assert!(!filter.is_ignored(ticker), "{ticker} should be kept");
    }
}
