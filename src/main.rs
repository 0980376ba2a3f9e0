use clap::Parser;
use rma_steps::config::toml_config::LogFormat;
use rma_steps::utils::logger;
use rma_steps::{CliConfig, HttpService, LocalStorage, StepError, StepRunner};

#[tokio::main]
async fn main() {
    let config = CliConfig::parse();

    // The config file can pick the log format, so it is read before logging starts.
    let file = match config.load_file() {
        Ok(file) => file,
        Err(e) => {
            eprintln!("❌ {}", e.user_friendly_message());
            std::process::exit(e.exit_code());
        }
    };

    let verbose = config.verbose(file.as_ref());
    match config.log_format(file.as_ref()) {
        LogFormat::Json => logger::init_json_logger(verbose),
        LogFormat::Compact => logger::init_cli_logger(verbose),
    }

    if verbose {
        tracing::debug!("CLI config: {:?}", config);
    }

    if let Err(e) = run(config, file).await {
        tracing::error!(
            "❌ Step failed: {} (Category: {:?}, Severity: {:?})",
            e,
            e.category(),
            e.severity()
        );
        tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

        eprintln!("❌ {}", e.user_friendly_message());
        eprintln!("💡 {}", e.recovery_suggestion());
        std::process::exit(e.exit_code());
    }
}

async fn run(
    config: CliConfig,
    file: Option<rma_steps::config::TomlConfig>,
) -> Result<(), StepError> {
    let settings = config.settings(file.as_ref())?;
    tracing::debug!(
        "RMA service at {} (timeout: {:?})",
        settings.base_url,
        settings.timeout_seconds
    );

    let service = HttpService::new(&settings)?;
    let runner = StepRunner::new(service, LocalStorage::new());

    let (input, output_path) = config.command.into_input();
    let output = runner.run(input.as_ref(), &output_path).await?;

    // Stdout carries only the structured result.
    println!("{}", output.to_json());
    Ok(())
}
