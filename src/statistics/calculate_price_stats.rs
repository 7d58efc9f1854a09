use serde::Serialize;

/// Summary of a list of prices. All fields are zero when no prices were found.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct PriceStats {
    pub average: f64,
    pub median: f64,
    pub min: f64,
    pub max: f64,
    pub count: usize,
}

/// Average and median are rounded to two decimals (half away from zero).
/// Min and max are reported as found.
pub fn calculate_price_stats(prices: &[f64]) -> PriceStats {
    if prices.is_empty() {
        return PriceStats::default();
    }

    let count = prices.len();
    let average = prices.iter().sum::<f64>() / count as f64;

    let mut sorted = prices.to_vec();
    sorted.sort_by(f64::total_cmp);

    let middle = count / 2;
    let median = if count % 2 == 1 {
        sorted[middle]
    } else {
        (sorted[middle - 1] + sorted[middle]) / 2.0
    };

    PriceStats {
        average: round_to_cents(average),
        median: round_to_cents(median),
        min: sorted[0],
        max: sorted[count - 1],
        count,
    }
}

fn round_to_cents(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
