use scraper::{Html, Node};

const HIDDEN_ELEMENTS: [&str; 4] = ["script", "style", "noscript", "template"];

/// Concatenates the text nodes of an HTML document, skipping script-like elements.
/// Each non-blank node is trimmed and the pieces are joined with single spaces.
pub fn extract_visible_text(html_content: &str) -> String {
    let document = Html::parse_document(html_content);

    document
        .root_element()
        .descendants()
        .filter_map(|node| {
            let text = match node.value() {
                Node::Text(text) => text,
                _ => return None,
            };

            let hidden = node
                .parent()
                .and_then(|parent| parent.value().as_element())
                .is_some_and(|element| HIDDEN_ELEMENTS.contains(&element.name()));

            if hidden {
                return None;
            }

            let trimmed = text.trim();
            (!trimmed.is_empty()).then_some(trimmed)
        })
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn joins_text_nodes_with_spaces() {
        let html = r#"
            <html>
              <head><title>Search</title></head>
              <body>
                <div class="price"><span>R</span><span>1,299</span></div>
                <p>Free delivery</p>
              </body>
            </html>"#;

        assert_eq!(extract_visible_text(html), "Search R 1,299 Free delivery");
    }

    #[test]
    fn skips_scripts_and_styles() {
        let html = r#"
            <html><body>
              <script>var price = "R 5";</script>
              <style>.r1 { color: red; }</style>
              <noscript>enable javascript</noscript>
              <p>R 10</p>
            </body></html>"#;

        assert_eq!(extract_visible_text(html), "R 10");
    }

    #[test]
    fn decodes_entities() {
        let html = "<p>Tom &amp; Jerry&nbsp;R&nbsp;20</p>";
        let text = extract_visible_text(html);

        assert!(text.starts_with("Tom & Jerry"));
        assert!(text.contains("R\u{a0}20"));
    }

    #[test]
    fn empty_document_gives_empty_text() {
        assert_eq!(extract_visible_text(""), "");
    }
}
