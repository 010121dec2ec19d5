//! Corpus read from a local text file.

use std::path::PathBuf;

use async_trait::async_trait;

use super::{decode_utf8, split_lines, QuoteSource, SourceError};
use crate::config::{expand_tilde, SourceConfig};

pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    pub fn new(config: &SourceConfig) -> Result<Self, SourceError> {
        if config.path.trim().is_empty() {
            return Err(SourceError::NotConfigured {
                source_name: "file",
                setting: "source.path",
            });
        }
        Ok(Self {
            path: expand_tilde(&config.path),
        })
    }
}

#[async_trait]
impl QuoteSource for FileSource {
    fn name(&self) -> &str {
        "file"
    }

    async fn fetch(&self) -> Result<Vec<String>, SourceError> {
        let bytes = tokio::fs::read(&self.path)
            .await
            .map_err(|source| SourceError::Io {
                path: self.path.display().to_string(),
                source,
            })?;
        Ok(split_lines(&decode_utf8(bytes)?))
    }
}
