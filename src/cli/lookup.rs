use anyhow::Result;

use crate::server::open_store;
use crate::tools::command::{self, QuoteCommand};
use quotebot::config::QuotebotConfig;

/// Run a single quote command from the terminal and print the reply.
pub async fn lookup(config: &QuotebotConfig, command: QuoteCommand, query: &str) -> Result<()> {
    let store = open_store(config).await?;
    let reply = command::handle(&store, command, query);
    println!("{}", reply.content);
    Ok(())
}
