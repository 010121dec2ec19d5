pub mod command;
pub mod quote_about;
pub mod quote_from;

use command::QuoteCommand;
use quote_about::QuoteAboutParams;
use quote_from::QuoteFromParams;
use quotebot::quotes::QuoteStore;
use rmcp::handler::server::tool::ToolRouter;
use rmcp::handler::server::wrapper::Parameters;
use rmcp::{tool, tool_handler, tool_router, ServerHandler};
use std::sync::Arc;

/// The quote command handler. Holds the shared store and exposes each quote
/// subcommand as an MCP tool via the `#[tool_router]` macro.
#[derive(Clone)]
pub struct QuoteTools {
    tool_router: ToolRouter<Self>,
    store: Arc<QuoteStore>,
}

#[tool_router]
impl QuoteTools {
    pub fn new(store: Arc<QuoteStore>) -> Self {
        Self {
            tool_router: Self::tool_router(),
            store,
        }
    }

    /// Show a quote from a specific person.
    #[tool(description = "Show a quote from a specific person. Avoids repeating recently shown quotes.")]
    async fn quote_from(
        &self,
        Parameters(params): Parameters<QuoteFromParams>,
    ) -> Result<String, String> {
        Ok(command::handle(&self.store, QuoteCommand::From, &params.name).content)
    }

    /// Show a quote about a specific subject.
    #[tool(description = "Show a quote whose text mentions a specific subject.")]
    async fn quote_about(
        &self,
        Parameters(params): Parameters<QuoteAboutParams>,
    ) -> Result<String, String> {
        Ok(command::handle(&self.store, QuoteCommand::About, &params.content).content)
    }

    /// List all quotes from a specific person.
    #[tool(description = "List all quotes from a specific person, oldest first.")]
    async fn quote_list_from(
        &self,
        Parameters(params): Parameters<QuoteFromParams>,
    ) -> Result<String, String> {
        Ok(command::handle(&self.store, QuoteCommand::ListFrom, &params.name).content)
    }

    /// List all quotes about a specific subject.
    #[tool(description = "List all quotes whose text mentions a specific subject, oldest first.")]
    async fn quote_list_about(
        &self,
        Parameters(params): Parameters<QuoteAboutParams>,
    ) -> Result<String, String> {
        Ok(command::handle(&self.store, QuoteCommand::ListAbout, &params.content).content)
    }

    /// Show a random quote.
    #[tool(description = "Show a random quote.")]
    async fn quote_random(&self) -> Result<String, String> {
        Ok(command::handle(&self.store, QuoteCommand::Random, "").content)
    }

    /// Corpus statistics.
    #[tool(description = "Get quote corpus statistics: quote counts, author keys, last load time.")]
    async fn quote_stats(&self) -> Result<String, String> {
        let stats = self.store.stats();
        tracing::info!(generation = stats.generation, "quote_stats called");
        serde_json::to_string(&stats).map_err(|e| format!("serialization failed: {e}"))
    }
}

#[tool_handler]
impl ServerHandler for QuoteTools {
    fn get_info(&self) -> rmcp::model::ServerInfo {
        rmcp::model::ServerInfo {
            instructions: Some(
                "Quotebot serves quotes from a shared corpus. Use quote_from for a quote by \
                 someone, quote_about for a quote on a subject, quote_random for anything, \
                 and the quote_list_* tools to see every match."
                    .into(),
            ),
            capabilities: rmcp::model::ServerCapabilities::builder()
                .enable_tools()
                .build(),
            ..Default::default()
        }
    }
}
