pub mod extract_prices;
pub mod extract_visible_text;
