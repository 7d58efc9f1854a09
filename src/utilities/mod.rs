pub mod build_search_url;
pub mod recognize_text;
