//! Quote bot backend — serves quotations from a shared corpus to chat users.
//!
//! The corpus is a plain text file with one `Author: quote` per line, fetched from a
//! remote source and reloaded periodically. Quotes are indexed by author so users can
//! ask for a first name, nickname, or fused `CamelCase` name and still get a match,
//! and random picks avoid serving the same quote twice until every candidate has
//! had a turn.
//!
//! # Modules
//!
//! - [`config`] — Configuration loading from TOML files and environment variables
//! - [`quotes`] — Quote parsing, the author index, the store, and background refresh
//! - [`source`] — Corpus sources (GitHub contents API, local file)

pub mod config;
pub mod quotes;
pub mod source;
