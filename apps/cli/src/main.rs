use clap::Parser;
use gdax_sdk::ExchangeClient;
use gdaxcli::cli::parse_error_message;
use gdaxcli::{
    AssumeYes, Cli, CliError, CliResult, Command, Config, Prompt, Session, SessionOptions,
    StdinPrompt,
};
use std::error::Error;
use std::io::IsTerminal;
use std::process::ExitCode;
use tracing::debug;
use tracing_subscriber::EnvFilter;

const ISSUE_TRACKER: &str = "https://github.com/sonph/gdaxcli/issues";

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    // Initialize logging
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            // --help and --version are not failures
            if !e.use_stderr() {
                let _ = e.print();
                return ExitCode::SUCCESS;
            }
            eprint!("{}", parse_error_message(&e));
            return ExitCode::FAILURE;
        }
    };

    match run(cli).await {
        Ok(output) => {
            if !output.is_empty() {
                println!("{}", output);
            }
            ExitCode::SUCCESS
        }
        Err(e) => {
            report(&e);
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> CliResult<String> {
    let command = cli.to_command()?;
    if command == Command::Help {
        return Ok(gdaxcli::cli::usage());
    }

    let config = Config::load(cli.config.as_deref())?;
    let credentials = config.credentials()?;
    let url = config.api_url(cli.sandbox);
    debug!("Using exchange at {}", url);

    let client = ExchangeClient::new(url, credentials).with_page_limit(config.exchange.page_limit);

    let mut options = SessionOptions::from_config(&config);
    options.color = options.color && !cli.no_color && std::io::stdout().is_terminal();

    let prompt: Box<dyn Prompt> = if cli.yes {
        Box::new(AssumeYes)
    } else {
        Box::new(StdinPrompt)
    };

    Session::new(client, options, prompt).run(command).await
}

fn report(error: &CliError) {
    eprintln!("Error: {}", error);
    match error {
        CliError::Usage(_) => eprintln!("Run 'gdaxcli help' for usage."),
        e if e.is_unexpected() => {
            let mut source = e.source();
            while let Some(cause) = source {
                eprintln!("  caused by: {}", cause);
                source = cause.source();
            }
            eprintln!("GETTING AN ERROR? File it at {}", ISSUE_TRACKER);
        }
        _ => {}
    }
}
