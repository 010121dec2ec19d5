//! Parameters for the author lookup tools (`quote_from`, `quote_list_from`).

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct QuoteFromParams {
    /// Name, nickname, or part of the name of the person who was quoted.
    #[schemars(description = "Name of person who was quoted. First names, nicknames and partial names work.")]
    pub name: String,
}
