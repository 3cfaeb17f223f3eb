use std::thread;
use std::time::Duration;

use anyhow::Result;
use clap::Parser;

use snip_doclint::config::{Config, ServerArgs};
use snip_doclint::lsp::serve;

#[tokio::main]
async fn main() -> Result<()> {
    let args = ServerArgs::parse();
    snip_doclint::init_logging(&args.common.log_level);

    let config = Config::from_server_args(args)?;

    // If running under the integration test, exit after a short delay so the test can read stdout to EOF.
    if std::env::var("SNIP_DOCLINT_LS_TEST_EXIT").as_deref() == Ok("1") {
        thread::spawn(|| {
            thread::sleep(Duration::from_secs(1));
            std::process::exit(0);
        });
    }

    serve(config).await
}
