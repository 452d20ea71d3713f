use anyhow::Context;
use clap::{Parser, Subcommand};
use moss_client::{ClientConfig, FormInput, PredictionClient};
use std::process::ExitCode;
use std::time::Duration;

/// Command-line stand-in for the mobile prediction form.
#[derive(Parser)]
#[command(name = "moss-client", version, about)]
struct Cli {
    /// Base URL of the prediction service
    #[arg(long, env = "MOSS_API_URL", default_value = moss_client::config::DEFAULT_BASE_URL)]
    endpoint: String,

    /// Seconds to wait for a prediction before giving up
    #[arg(long, default_value_t = 15)]
    timeout: u64,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Validate the readings and request a growth-days prediction
    Predict {
        /// Temperature in °C (18.0 - 35.0)
        #[arg(long, allow_hyphen_values = true)]
        temperature: String,
        /// Relative humidity in % (50.0 - 80.0)
        #[arg(long, allow_hyphen_values = true)]
        humidity: String,
        /// Total dissolved solids in ppm (400.0 - 800.0)
        #[arg(long, allow_hyphen_values = true)]
        tds: String,
        /// pH of the growing medium (6.0 - 7.0)
        #[arg(long, allow_hyphen_values = true)]
        ph: String,
    },
    /// Check whether the service is up and has its model loaded
    Health,
}

fn build_client(cli: &Cli) -> anyhow::Result<PredictionClient> {
    let config = ClientConfig::new(cli.endpoint.clone())
        .with_timeout(Duration::from_secs(cli.timeout));
    PredictionClient::new(config).context("Failed to create HTTP client")
}

#[tokio::main]
async fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"))
        .format_timestamp_millis()
        .format_module_path(false)
        .init();

    let cli = Cli::parse();
    let client = match build_client(&cli) {
        Ok(client) => client,
        Err(e) => {
            eprintln!("{:#}", e);
            return ExitCode::FAILURE;
        }
    };

    match cli.command {
        Command::Predict {
            temperature,
            humidity,
            tds,
            ph,
        } => {
            let form = FormInput::new(temperature, humidity, tds, ph);
            match client.submit_form(&form).await {
                Ok(prediction) => {
                    println!(
                        "Predicted growth: {:.2} days",
                        prediction.predicted_growth_days
                    );
                    println!("{}", prediction.interpretation);
                    println!("Model: {}", prediction.model_used);
                    ExitCode::SUCCESS
                }
                Err(e) => {
                    eprintln!("{}", e.user_message());
                    ExitCode::FAILURE
                }
            }
        }
        Command::Health => {
            if client.health().await {
                println!("Service at {} is healthy", client.config().base_url);
                ExitCode::SUCCESS
            } else {
                println!("Service at {} is unavailable", client.config().base_url);
                ExitCode::FAILURE
            }
        }
    }
}
