use crate::core::finder::ExampleFinder;
use crate::core::links::{derive_query, extract_links};
use crate::domain::model::{
    LinkAction, LinkStatus, Remediation, ReplacementExample, NO_VALID_SOURCE_FOUND,
};
use crate::domain::ports::{LinkVerifier, SearchProvider};
use crate::utils::error::Result;

/// Checks every link in a document and swaps dead ones for fresh examples.
///
/// Links are processed one at a time in extraction order. Only the first
/// occurrence of a broken URL is rewritten per pass.
pub struct Remediator<P: LinkVerifier, S: SearchProvider> {
    checker: P,
    finder: ExampleFinder<S>,
}

impl<P: LinkVerifier, S: SearchProvider> Remediator<P, S> {
    pub fn new(checker: P, finder: ExampleFinder<S>) -> Self {
        Self { checker, finder }
    }

    pub async fn remediate(&self, content: &str) -> Result<Remediation> {
        let mut document = content.to_string();
        let mut actions = Vec::new();

        for link in extract_links(content) {
            if LinkStatus::from(self.checker.is_alive(&link).await) == LinkStatus::Valid {
                actions.push(LinkAction::Alive { url: link });
                continue;
            }

            tracing::warn!("🔗 Broken link found: {}", link);
            match self.finder.find_replacement(derive_query(&link)).await? {
                Some(replacement) => {
                    tracing::info!(
                        "🔁 Replacing broken example {} with {}",
                        link,
                        replacement.url
                    );
                    document = document.replacen(&link, &replacement.url, 1);
                    document.push_str(&example_paragraph(&replacement));
                    actions.push(LinkAction::Replaced {
                        url: link,
                        replacement,
                    });
                }
                None => {
                    tracing::info!("No replacement found for {}; inserting placeholder", link);
                    document = document.replacen(&link, NO_VALID_SOURCE_FOUND, 1);
                    actions.push(LinkAction::Sentinel { url: link });
                }
            }
        }

        Ok(Remediation { document, actions })
    }
}

fn example_paragraph(example: &ReplacementExample) -> String {
    format!(
        "\n**New Example:** {} \n[Read More]({})",
        example.summary, example.url
    )
}
