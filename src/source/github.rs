//! Corpus stored as a file in a GitHub repository, fetched through the contents API.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;

use super::{decode_utf8, split_lines, QuoteSource, SourceError};
use crate::config::SourceConfig;

/// Asks the contents API for the raw file body instead of base64 JSON.
const RAW_ACCEPT: &str = "application/vnd.github.raw+json";

/// Fetches the corpus with an authenticated GET against a GitHub contents URL.
pub struct GithubSource {
    client: Client,
    url: String,
    token: Option<String>,
    api_version: String,
}

impl GithubSource {
    pub fn new(config: &SourceConfig) -> Result<Self, SourceError> {
        if config.url.trim().is_empty() {
            return Err(SourceError::NotConfigured {
                source_name: "github",
                setting: "source.url",
            });
        }

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(concat!("quotebot/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            client,
            url: config.url.clone(),
            token: config.token.clone().filter(|t| !t.is_empty()),
            api_version: config.api_version.clone(),
        })
    }
}

#[async_trait]
impl QuoteSource for GithubSource {
    fn name(&self) -> &str {
        "github"
    }

    async fn fetch(&self) -> Result<Vec<String>, SourceError> {
        let mut request = self
            .client
            .get(&self.url)
            .header("Accept", RAW_ACCEPT)
            .header("X-GitHub-Api-Version", self.api_version.as_str());
        if let Some(token) = &self.token {
            request = request.header("Authorization", format!("Bearer {token}"));
        }

        let response = request.send().await?;
        if !response.status().is_success() {
            return Err(SourceError::Status {
                status: response.status().as_u16(),
                url: self.url.clone(),
            });
        }

        let body = decode_utf8(response.bytes().await?.to_vec())?;
        let lines = split_lines(&body);
        tracing::debug!(url = %self.url, lines = lines.len(), "fetched corpus from github");
        Ok(lines)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_url_is_a_config_error() {
        let err = GithubSource::new(&SourceConfig::default()).err().unwrap();
        assert!(matches!(
            err,
            SourceError::NotConfigured { setting: "source.url", .. }
        ));
    }

    #[test]
    fn empty_token_is_treated_as_absent() {
        let config = SourceConfig {
            url: "https://example.invalid/quotes.txt".into(),
            token: Some(String::new()),
            ..SourceConfig::default()
        };
        let source = GithubSource::new(&config).unwrap();
        assert!(source.token.is_none());
    }

    #[tokio::test]
    async fn unreachable_host_is_an_http_error() {
        let config = SourceConfig {
            url: "http://127.0.0.1:9/quotes.txt".into(),
            timeout_secs: 2,
            ..SourceConfig::default()
        };
        let source = GithubSource::new(&config).unwrap();
        let err = source.fetch().await.unwrap_err();
        assert!(matches!(err, SourceError::Http(_)));
    }
}
