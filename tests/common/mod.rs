#![allow(dead_code)]

use httpmock::prelude::*;
use slide_review::ReviewConfig;

/// 30 slides with 6 bullets each. `links` puts `[label](url)` into the first bullet of the given slide.
pub fn deck<S: AsRef<str>>(links: &[(usize, S)]) -> String {
    let mut out = String::from("# Presentation\n\n");
    for n in 1..=30 {
        out.push_str(&format!("### Slide {}: Section {}\n", n, n));
        for b in 1..=6 {
            match links.iter().find(|(slide, _)| *slide == n) {
                Some((_, url)) if b == 1 => {
                    out.push_str(&format!("- Case study: [read the story]({})\n", url.as_ref()))
                }
                _ => out.push_str(&format!("- Key point {} for section {}\n", b, n)),
            }
        }
        out.push('\n');
    }
    out
}

pub fn slide_count(content: &str) -> usize {
    content.matches("### Slide ").count()
}

pub fn config_for(server: &MockServer) -> ReviewConfig {
    ReviewConfig::from_toml_str(&format!(
        r#"
[search]
endpoint = "{}"
api_key = "test-key"

[link_check]
timeout_seconds = 2

[retry.search]
max_attempts = 3
multiplier_seconds = 0

[llm]
endpoint = "{}"
api_key = "sk-test"
model = "test-model"
"#,
        server.url("/search"),
        server.url("/v1/chat/completions")
    ))
    .unwrap()
}
