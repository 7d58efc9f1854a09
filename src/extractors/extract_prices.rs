use std::sync::LazyLock;

use regex::Regex;
use tracing::warn;

pub const DEFAULT_CURRENCY_SYMBOL: &str = "R";

static DEFAULT_EXTRACTOR: LazyLock<PriceExtractor> = LazyLock::new(|| {
    PriceExtractor::new(DEFAULT_CURRENCY_SYMBOL).expect("default price pattern is valid")
});

/// Finds currency-marked amounts such as `R 1,299.00` or `R499` in free text.
///
/// The match is lexical only: any marker followed by digits in thousands/decimal
/// grouping counts, so unrelated numbers that happen to follow the marker are kept,
/// and prices written without the marker are missed. Only ASCII digits are matched.
#[derive(Debug, Clone)]
pub struct PriceExtractor {
    regex: Regex,
}

impl Default for PriceExtractor {
    fn default() -> Self {
        DEFAULT_EXTRACTOR.clone()
    }
}

impl PriceExtractor {
    pub fn new(currency_symbol: &str) -> Result<Self, regex::Error> {
        let pattern = format!(
            r"{}\s?([0-9]{{1,3}}(?:,[0-9]{{3}})*(?:\.[0-9]{{1,2}})?)",
            regex::escape(currency_symbol)
        );

        Ok(Self {
            regex: Regex::new(&pattern)?,
        })
    }

    /// Reuses the process-wide extractor for the default `R` marker.
    pub fn for_symbol(currency_symbol: &str) -> Result<Self, regex::Error> {
        if currency_symbol == DEFAULT_CURRENCY_SYMBOL {
            Ok(Self::default())
        } else {
            Self::new(currency_symbol)
        }
    }

    /// Returns the amounts in the order they appear, duplicates included.
    /// Zero amounts are dropped.
    pub fn extract(&self, text: &str) -> Vec<f64> {
        self.regex
            .captures_iter(text)
            .filter_map(|caps| caps.get(1))
            .filter_map(|amount| {
                let digits = amount.as_str().replace(',', "");
                match digits.parse::<f64>() {
                    Ok(price) => Some(price),
                    Err(e) => {
                        warn!(amount = amount.as_str(), error = %e, "Matched amount did not parse");
                        None
                    }
                }
            })
            .filter(|price| *price > 0.0)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn extract_prices(text: &str) -> Vec<f64> {
        PriceExtractor::default().extract(text)
    }

    #[test]
    fn extracts_grouped_and_plain_amounts_in_order() {
        let prices = extract_prices("R 1,299.00 and also R499");
        assert_eq!(prices, vec![1299.0, 499.0]);
    }

    #[test]
    fn text_without_marker_yields_nothing() {
        assert!(extract_prices("no prices here").is_empty());
        assert!(extract_prices("").is_empty());
        assert!(extract_prices("1,299.00 499 12.50").is_empty());
    }

    #[test]
    fn keeps_duplicates_and_scan_order() {
        let prices = extract_prices("R50 R10 R50 R 10.5");
        assert_eq!(prices, vec![50.0, 10.0, 50.0, 10.5]);
    }

    #[test]
    fn drops_zero_amounts() {
        let prices = extract_prices("R0 R0.00 R 0,000 R7");
        assert_eq!(prices, vec![7.0]);
    }

    #[test]
    fn multiple_thousand_groups() {
        assert_eq!(extract_prices("now R1,234,567.89 only"), vec![1234567.89]);
    }

    #[test]
    fn fraction_limited_to_two_digits() {
        // the third fractional digit is not part of the match
        assert_eq!(extract_prices("R12.345"), vec![12.34]);
        assert_eq!(extract_prices("R12.3"), vec![12.3]);
    }

    #[test]
    fn at_most_one_space_after_marker() {
        assert_eq!(extract_prices("R 25"), vec![25.0]);
        assert!(extract_prices("R  25").is_empty());
    }

    #[test]
    fn marker_inside_words_still_matches() {
        // known false positive: any "R" followed by digits counts
        assert_eq!(extract_prices("BAR 5 stools"), vec![5.0]);
    }

    #[test]
    fn ungrouped_long_numbers_match_leading_digits_only() {
        assert_eq!(extract_prices("R12345"), vec![123.0]);
    }

    #[test]
    fn only_ascii_digits_are_matched() {
        assert!(extract_prices("R\u{ff11}\u{ff12}\u{ff13}").is_empty());
        assert!(extract_prices("R\u{664}\u{669}\u{669}").is_empty());
        assert_eq!(extract_prices("R1\u{663} and R 50"), vec![1.0, 50.0]);
    }

    #[test]
    fn default_marker_reuses_shared_extractor() {
        let extractor = PriceExtractor::for_symbol("R").unwrap();
        assert_eq!(extractor.extract("R 1,299.00 and also R499"), vec![1299.0, 499.0]);

        let extractor = PriceExtractor::for_symbol("\u{20ac}").unwrap();
        assert_eq!(extractor.extract("R 5 or \u{20ac}7.50"), vec![7.5]);
    }

    #[test]
    fn custom_marker_is_escaped() {
        let extractor = PriceExtractor::new("$").unwrap();
        assert_eq!(extractor.extract("was $1,000 now $ 799.99, R5"), vec![1000.0, 799.99]);
    }

    #[test]
    fn every_value_is_positive() {
        let text = "R0 R1 R 0.01 R0.0 R999,999.99 R 00 R,5";
        assert!(extract_prices(text).iter().all(|price| *price > 0.0));
    }

    #[test]
    fn extraction_is_repeatable() {
        let text = "Deals: R 2,499.00, R 1,999, R 2,499.00";
        assert_eq!(extract_prices(text), extract_prices(text));
    }
}
