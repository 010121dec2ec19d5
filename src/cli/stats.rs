use anyhow::Result;

use crate::server::open_store;
use quotebot::config::QuotebotConfig;

/// Display corpus statistics in the terminal.
pub async fn stats(config: &QuotebotConfig) -> Result<()> {
    let store = open_store(config).await?;
    let stats = store.stats();

    println!("Quote Corpus");
    println!("{}", "=".repeat(40));
    println!("  Source:              {}", stats.source);
    println!("  Total quotes:        {}", stats.total_quotes);
    println!("  With author:         {}", stats.authored_quotes);
    println!("  Authorless:          {}", stats.authorless_quotes);
    println!("  Author lookup keys:  {}", stats.author_keys);
    if let Some(loaded_at) = stats.loaded_at {
        println!("  Loaded at:           {}", loaded_at.to_rfc3339());
    }

    Ok(())
}
