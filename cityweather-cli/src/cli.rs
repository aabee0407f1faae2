use std::{path::PathBuf, process::ExitCode, time::Duration};

use anyhow::{Context, Result};
use cityweather_core::{
    Config, DisplayText, ErrorKind, OpenWeatherClient, ViewState, WeatherDisplay, WeatherError,
    WeatherQuery, WeatherResult, config::API_KEY_VAR, load_dotenv, present,
};
use clap::{Parser, Subcommand};
use inquire::{InquireError, Text};
use serde::Serialize;
use tracing::debug;

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "cityweather", version, about = "Current weather for a city")]
pub struct Cli {
    /// Load environment variables from this file instead of `./.env`.
    #[arg(long, global = true, value_name = "PATH")]
    pub env_file: Option<PathBuf>,

    /// Request timeout in seconds, 0 for none. Overrides WEATHER_TIMEOUT_SECS.
    #[arg(long, global = true, value_name = "SECS")]
    pub timeout: Option<u64>,

    /// Weather endpoint URL. Overrides WEATHER_API_URL.
    #[arg(long, global = true, value_name = "URL")]
    pub endpoint: Option<String>,

    /// More log output on stderr (-v info, -vv debug).
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Show the current weather for one city and exit.
    Show {
        /// City name; several words are joined with spaces.
        #[arg(required = true, num_args = 1..)]
        city: Vec<String>,

        /// Print a JSON object instead of text.
        #[arg(long)]
        json: bool,
    },

    /// Ask for city names until cancelled (the default).
    Prompt,
}

impl Cli {
    pub async fn run(self) -> Result<ExitCode> {
        load_dotenv(self.env_file.as_deref()).context("Failed to load environment file")?;
        let client = self.build_client()?;

        match self.command.unwrap_or(Command::Prompt) {
            Command::Show { city, json } => show(&client, &city.join(" "), json).await,
            Command::Prompt => prompt(&client).await,
        }
    }

    fn build_client(&self) -> Result<OpenWeatherClient> {
        let mut config = Config::from_env().with_context(|| {
            format!(
                "Failed to read configuration.\n\
                 Hint: set {API_KEY_VAR} in the environment or in a .env file."
            )
        })?;

        if let Some(endpoint) = &self.endpoint {
            config = config
                .with_endpoint(endpoint)
                .context("Invalid --endpoint value")?;
        }
        if let Some(secs) = self.timeout {
            config = config.with_timeout((secs > 0).then_some(Duration::from_secs(secs)));
        }

        debug!(?config, "Resolved configuration");
        OpenWeatherClient::new(config).context("Failed to build HTTP client")
    }
}

async fn show(client: &OpenWeatherClient, city: &str, json: bool) -> Result<ExitCode> {
    let outcome = client.lookup(&WeatherQuery::new(city)).await;
    let code = if outcome.is_ok() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    };

    if json {
        let out = JsonOutput::new(city, &outcome);
        println!(
            "{}",
            serde_json::to_string_pretty(&out).context("Failed to serialize output")?
        );
    } else {
        print_state(&ViewState::resolve(outcome));
    }

    Ok(code)
}

async fn prompt(client: &OpenWeatherClient) -> Result<ExitCode> {
    loop {
        let city = match Text::new("Enter city name:").prompt() {
            Ok(city) => city,
            Err(InquireError::OperationCanceled | InquireError::OperationInterrupted) => break,
            Err(err) => return Err(err).context("Failed to read city name"),
        };

        print_state(&ViewState::submit(city.trim()));
        let outcome = client.lookup(&WeatherQuery::new(city)).await;
        print_state(&ViewState::resolve(outcome));
        println!();
    }

    Ok(ExitCode::SUCCESS)
}

/// Weather goes to stdout; progress and errors go to stderr.
fn print_state(state: &ViewState) {
    match state {
        ViewState::Weather(_) => {
            for line in state.lines() {
                println!("{line}");
            }
        }
        _ => {
            for line in state.lines() {
                eprintln!("{line}");
            }
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
enum JsonOutput<'a> {
    Ok {
        city: &'a str,
        temperature_celsius: f64,
        condition_code: i64,
        #[serde(flatten)]
        display: WeatherDisplay,
    },
    Error {
        city: &'a str,
        kind: ErrorKind,
        #[serde(flatten)]
        text: DisplayText,
    },
}

impl<'a> JsonOutput<'a> {
    fn new(city: &'a str, outcome: &Result<WeatherResult, WeatherError>) -> Self {
        match outcome {
            Ok(result) => JsonOutput::Ok {
                city,
                temperature_celsius: result.temperature_celsius,
                condition_code: result.condition_code,
                display: result.display(),
            },
            Err(err) => JsonOutput::Error {
                city,
                kind: err.kind,
                text: present(err),
            },
        }
    }
}
