//! In-memory quote corpus: parsing, author indexing, selection, and refresh.

pub mod authors;
pub mod quote;
pub mod refresh;
pub mod select;
pub mod store;

pub use quote::Quote;
pub use refresh::spawn_refresh_task;
pub use store::{Corpus, CorpusStats, LoadOptions, QuoteStore};
