//! Corpus sources.
//!
//! A [`QuoteSource`] returns the raw corpus as a list of lines. The store does not
//! care where they come from. Sources are created from configuration via
//! [`create_source`], keyed by a source identifier (`"github"`, `"file"`).

pub mod file;
pub mod github;

use async_trait::async_trait;

use crate::config::SourceConfig;

/// Errors raised while fetching a corpus or selecting a source.
#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    /// Network or transport failure (includes timeouts).
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The remote answered with a non-success status.
    #[error("quote source returned HTTP {status} for {url}")]
    Status { status: u16, url: String },

    /// A local corpus file could not be read.
    #[error("failed to read quote file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// The corpus was not valid UTF-8 text.
    #[error("quote source returned malformed data: {0}")]
    Malformed(String),

    /// A required setting for the selected source is empty.
    #[error("quote source `{source_name}` is missing required setting `{setting}`")]
    NotConfigured {
        source_name: &'static str,
        setting: &'static str,
    },

    /// The configured source identifier is unknown.
    #[error("unsupported quote source \"{0}\". Supported: github, file")]
    Unsupported(String),
}

impl SourceError {
    /// `true` for configuration problems that will not fix themselves on retry.
    pub fn is_config_error(&self) -> bool {
        matches!(self, Self::NotConfigured { .. } | Self::Unsupported(_))
    }
}

/// Something that can produce the raw quote corpus on demand.
#[async_trait]
pub trait QuoteSource: Send + Sync {
    /// Identifier used in logs.
    fn name(&self) -> &str;

    /// Fetch the full corpus, one entry per line.
    async fn fetch(&self) -> Result<Vec<String>, SourceError>;
}

/// Create a source from config. The identifier is matched case-insensitively.
pub fn create_source(config: &SourceConfig) -> Result<Box<dyn QuoteSource>, SourceError> {
    match config.kind.to_ascii_lowercase().as_str() {
        "github" => Ok(Box::new(github::GithubSource::new(config)?)),
        "file" => Ok(Box::new(file::FileSource::new(config)?)),
        _ => Err(SourceError::Unsupported(config.kind.clone())),
    }
}

/// Split a text blob into corpus lines.
pub(crate) fn split_lines(body: &str) -> Vec<String> {
    body.split('\n').map(str::to_string).collect()
}

/// Decode a response body, rejecting anything that is not UTF-8.
pub(crate) fn decode_utf8(bytes: Vec<u8>) -> Result<String, SourceError> {
    String::from_utf8(bytes).map_err(|e| SourceError::Malformed(e.to_string()))
}
