use clap::Parser;
use pkgsync::config::Cli;
use pkgsync::ui::ConsoleSink;
use pkgsync::{logging, Config, LogEvent, LogSink};

fn main() {
    let cli = Cli::parse();
    logging::init_logging(cli.log_level);

    if let Err(err) = run_main(cli) {
        // Error events render regardless of verbosity
        ConsoleSink::default().emit(LogEvent::error(err.to_string()));
        std::process::exit(1);
    }
}

fn run_main(cli: Cli) -> anyhow::Result<()> {
    // Convert CLI args to Config - this validates immediately
    let config = Config::try_from(cli)?;
    let sink = ConsoleSink::new(config.verbose);

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;
    runtime.block_on(pkgsync::commands::link::run(&config, &sink))?;

    Ok(())
}
