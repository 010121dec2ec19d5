//! Parameters for the subject lookup tools (`quote_about`, `quote_list_about`).

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct QuoteAboutParams {
    /// Text to look for in the quote itself.
    #[schemars(description = "Content of the quote. Matched as a case-insensitive substring.")]
    pub content: String,
}
