use crate::domain::ports::LinkVerifier;
use crate::utils::error::Result;
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;

pub const DEFAULT_LINK_TIMEOUT: Duration = Duration::from_secs(5);

/// Single GET per URL; anything below 400 counts as alive.
#[derive(Debug, Clone)]
pub struct HttpLinkChecker {
    client: Client,
}

impl HttpLinkChecker {
    pub fn new(timeout: Duration) -> Result<Self> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self { client })
    }
}

#[async_trait]
impl LinkVerifier for HttpLinkChecker {
    async fn is_alive(&self, url: &str) -> bool {
        match self.client.get(url).send().await {
            Ok(response) => {
                let status = response.status();
                tracing::debug!("Link {} answered {}", url, status);
                status.as_u16() < 400
            }
            Err(e) => {
                tracing::debug!("Link {} unreachable: {}", url, e);
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;

    #[tokio::test]
    async fn test_status_below_400_is_alive() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/ok");
                then.status(200);
            })
            .await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/moved");
                then.status(304);
            })
            .await;

        let checker = HttpLinkChecker::new(DEFAULT_LINK_TIMEOUT).unwrap();
        assert!(checker.is_alive(&server.url("/ok")).await);
        assert!(checker.is_alive(&server.url("/moved")).await);
    }

    #[tokio::test]
    async fn test_client_and_server_errors_are_broken() {
        let server = MockServer::start_async().await;
        let missing = server
            .mock_async(|when, then| {
                when.method(GET).path("/missing");
                then.status(404);
            })
            .await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/boom");
                then.status(503);
            })
            .await;

        let checker = HttpLinkChecker::new(DEFAULT_LINK_TIMEOUT).unwrap();
        assert!(!checker.is_alive(&server.url("/missing")).await);
        assert!(!checker.is_alive(&server.url("/boom")).await);
        missing.assert_hits_async(1).await;
    }

    #[tokio::test]
    async fn test_network_failures_are_broken() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/slow");
                then.status(200).delay(Duration::from_millis(500));
            })
            .await;

        let checker = HttpLinkChecker::new(Duration::from_millis(50)).unwrap();
        assert!(!checker.is_alive(&server.url("/slow")).await);
        assert!(!checker.is_alive("http://").await);
        assert!(!checker.is_alive("not a url").await);
    }
}
