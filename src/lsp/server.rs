use anyhow::Result;
use tokio::io::{stdin, stdout};
use tower_lsp::{LspService, Server};

use crate::lsp::backend::Backend;
use crate::Config;

/// Start the LSP server on stdio with the given configuration
pub async fn serve(config: Config) -> Result<()> {
    log::info!(
        "Starting snip-doclint-ls with {} enabled rules",
        config.options.enabled_rules.len()
    );

    let (service, socket) = LspService::build(move |client| Backend::new(client, config.clone()))
        .finish();

    Server::new(stdin(), stdout(), socket).serve(service).await;

    Ok(())
}
