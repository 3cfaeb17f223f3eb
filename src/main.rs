use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;

use snip_doclint::config::{Args, Config};
use snip_doclint::lint::lint_paths;
use snip_doclint::report::{write_report, Reporter};
use snip_doclint::watch::{run_watch_loop, start_watching};

/// Exit code when findings reach the `--fail-on` threshold
const EXIT_FINDINGS: u8 = 1;
/// Exit code for configuration or I/O failures
const EXIT_ERROR: u8 = 2;

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let args = Args::parse();
    snip_doclint::init_logging(&args.common.log_level);

    match run(args).await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("error: {:#}", e);
            ExitCode::from(EXIT_ERROR)
        }
    }
}

async fn run(args: Args) -> Result<ExitCode> {
    let config = Config::from_args(args)?;
    for source in &config.sources {
        log::debug!("Loaded configuration from {}", source.display());
    }

    let run = lint_paths(&config);
    let reporter = Reporter::new(config.format);

    write_report(&mut std::io::stdout().lock(), &reporter.render(&run.reports))?;

    for error in &run.errors {
        eprintln!("error: {:#}", error);
    }

    if config.watch {
        let (_watcher, rx) = start_watching(&config)?;
        run_watch_loop(&config, rx, |output| {
            if let Err(e) = write_report(&mut std::io::stdout().lock(), &output) {
                log::warn!("Failed to write report: {}", e);
            }
        })
        .await;
        return Ok(ExitCode::SUCCESS);
    }

    if !run.errors.is_empty() {
        Ok(ExitCode::from(EXIT_ERROR))
    } else if config.fail_on.is_triggered(run.max_severity()) {
        Ok(ExitCode::from(EXIT_FINDINGS))
    } else {
        Ok(ExitCode::SUCCESS)
    }
}
