use urlencoding::encode;

/// Fills the `{search}` placeholder of the template with the percent-encoded term.
pub fn build_search_url(url_template: &str, search_term: &str) -> String {
    url_template.replace("{search}", &encode(search_term))
}
