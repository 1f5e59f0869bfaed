use clap::Parser;
use stagecopy::commands::stage;
use stagecopy::config::Cli;
use stagecopy::logging::init_logging;
use stagecopy::{CancelToken, Config, TransferEngine};

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose, cli.log_format)?;

    // Convert CLI args to Config - this validates immediately
    let config = Config::try_from(&cli)?;
    tracing::debug!("stagecopy v{} with {:?}", stagecopy::VERSION, config);

    let cancel = CancelToken::new();
    if let Some(timeout) = cli.timeout()? {
        // Detached: the process exits once the copy returns
        let _watchdog = cancel.cancel_after(timeout);
    }

    let engine = TransferEngine::with_cancel(config, cancel);
    // The command already printed a readable summary on failure
    if stage::run(&engine, &cli.source, &cli.destination_folder).is_err() {
        std::process::exit(1);
    }
    Ok(())
}
