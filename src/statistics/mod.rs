pub mod calculate_price_stats;
