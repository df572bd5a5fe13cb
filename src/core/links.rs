use regex::Regex;
use std::sync::LazyLock;

static MARKDOWN_LINK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[.*?\]\((https?://.*?)\)").expect("markdown link pattern"));

/// All `[label](http[s]://...)` targets in order of appearance, duplicates kept.
pub fn extract_links(content: &str) -> Vec<String> {
    MARKDOWN_LINK
        .captures_iter(content)
        .filter_map(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
        .collect()
}

/// Search keyword for a broken link: the text after its last `/`.
pub fn derive_query(url: &str) -> &str {
    url.rsplit('/').next().unwrap_or(url)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extracts_in_order_with_duplicates() {
        let text = "See [A](https://a.example/x) and [B](http://b.example/y), \
                    then [A again](https://a.example/x).";
        assert_eq!(
            extract_links(text),
            vec![
                "https://a.example/x",
                "http://b.example/y",
                "https://a.example/x"
            ]
        );
    }

    #[test]
    fn test_ignores_non_http_targets() {
        let text = "[local](./notes.md) [mail](mailto:x@y.z) (https://bare.example) [x] (y)";
        assert!(extract_links(text).is_empty());
    }

    #[test]
    fn test_derive_query_uses_last_segment() {
        assert_eq!(
            derive_query("https://example.com/blog/ai-in-retail"),
            "ai-in-retail"
        );
        assert_eq!(derive_query("https://example.com/"), "");
        assert_eq!(derive_query("no-slashes"), "no-slashes");
    }
}
