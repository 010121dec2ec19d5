//! A single parsed quote line.
//!
//! A raw corpus line looks like `Author: what they said`. Everything before the
//! first `:` is the author, everything after it is the content. Lines without a
//! colon are authorless sayings. Parsing never fails.

use serde::Serialize;

use super::authors;

/// One quote from the corpus. Immutable once constructed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Quote {
    index: usize,
    #[serde(skip)]
    raw: String,
    author: String,
    content: String,
    #[serde(skip)]
    author_lowercase: String,
    #[serde(skip)]
    content_lowercase: String,
}

impl Quote {
    /// Parse a raw corpus line. `index` is the 1-based load position.
    pub fn parse(raw: &str, index: usize) -> Self {
        let (author, content) = match raw.split_once(':') {
            Some((author, content)) => (author.trim(), content.trim()),
            None => ("", raw.trim()),
        };

        Self {
            index,
            raw: raw.to_string(),
            author: author.to_string(),
            content: content.to_string(),
            author_lowercase: author.to_lowercase(),
            content_lowercase: content.to_lowercase(),
        }
    }

    pub fn index(&self) -> usize {
        self.index
    }

    /// The line exactly as it came from the source.
    pub fn raw(&self) -> &str {
        &self.raw
    }

    /// Trimmed author, empty for authorless quotes.
    pub fn author(&self) -> &str {
        &self.author
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn author_lowercase(&self) -> &str {
        &self.author_lowercase
    }

    pub fn has_author(&self) -> bool {
        !self.author.is_empty()
    }

    /// `true` if the lowercased content contains `query`. The caller lowercases
    /// the query once per lookup.
    pub fn matches_content(&self, query: &str) -> bool {
        self.content_lowercase.contains(query)
    }

    /// Lookup keys this quote is indexed under. See [`authors::derive_keys`].
    pub fn derived_author_keys(&self) -> Vec<String> {
        authors::derive_keys(&self.author)
    }

    /// Plain one-line form used in logs and list responses: `(#0007) Bob: Hi`.
    pub fn render_plain(&self) -> String {
        if self.author.is_empty() {
            return self.content.clone();
        }
        format!("(#{:04}) {}: {}", self.index, self.author, self.content)
    }

    /// Rich single-result form: block quote with the author in bold on its own line.
    pub fn render_rich(&self) -> String {
        if self.author.is_empty() {
            return format!(">>> {}", self.content);
        }
        format!(">>> **{}**:\n{}", self.author, self.content)
    }
}

impl std::fmt::Display for Quote {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.render_plain())
    }
}
