//! Quote commands and how their results are rendered into a chat message.
//!
//! Shared by the MCP tools and the terminal CLI so both answer identically.

use std::sync::Arc;
use std::time::Instant;

use quotebot::quotes::{Quote, QuoteStore};

/// Longest message the chat transport accepts, minus room for the closing fence.
pub const MESSAGE_BUDGET: usize = 1969;

pub const NO_MATCH: &str = "I wasn't able to find a matching quote";

const TRUNCATED: &str = "And more that don't fit...\n";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuoteCommand {
    From,
    About,
    ListFrom,
    ListAbout,
    Random,
}

impl QuoteCommand {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::From => "from",
            Self::About => "about",
            Self::ListFrom => "listfrom",
            Self::ListAbout => "listabout",
            Self::Random => "random",
        }
    }

    pub fn is_list(&self) -> bool {
        matches!(self, Self::ListFrom | Self::ListAbout)
    }

    /// Run the lookup against `store`. `query` is ignored by [`QuoteCommand::Random`].
    pub fn run(&self, store: &QuoteStore, query: &str) -> Vec<Arc<Quote>> {
        let mut quotes: Vec<Arc<Quote>> = match self {
            Self::From => store.quote_by(query).into_iter().collect(),
            Self::About => store.quote_about(query).into_iter().collect(),
            Self::Random => store.random_quote().into_iter().collect(),
            Self::ListFrom => store.all_quotes_by(query),
            Self::ListAbout => store.all_quotes_about(query),
        };
        quotes.sort_by_key(|q| q.index());
        quotes
    }
}

impl std::fmt::Display for QuoteCommand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A rendered reply plus the short form written to the log.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reply {
    pub content: String,
    pub log_quote: String,
}

/// Render `quotes` as the reply to `command`.
pub fn render_reply(command: QuoteCommand, quotes: &[Arc<Quote>]) -> Reply {
    match quotes {
        [] => Reply {
            content: NO_MATCH.to_string(),
            log_quote: "no quotes".to_string(),
        },
        [quote] if !command.is_list() => Reply {
            content: quote.render_rich(),
            log_quote: quote.render_plain(),
        },
        _ => Reply {
            content: render_listing(quotes),
            log_quote: "multiple quotes".to_string(),
        },
    }
}

fn render_listing(quotes: &[Arc<Quote>]) -> String {
    let mut content = format!("I found {} quote(s):\n```\n", quotes.len());
    for quote in quotes {
        let line = quote.render_plain();
        if content.len() + line.len() + 1 > MESSAGE_BUDGET {
            content.push_str(TRUNCATED);
            break;
        }
        content.push_str(&line);
        content.push('\n');
    }
    content.push_str("\n```");
    content
}

/// Run `command`, render the reply, and log it.
pub fn handle(store: &QuoteStore, command: QuoteCommand, query: &str) -> Reply {
    let start = Instant::now();
    let quotes = command.run(store, query);
    let reply = render_reply(command, &quotes);

    tracing::info!(
        subcommand = %command,
        query,
        results = quotes.len(),
        duration_ms = start.elapsed().as_millis() as u64,
        quote = %reply.log_quote,
        "processed quote command"
    );

    reply
}
