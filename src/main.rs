//! CLI interface for air-search

use air_search::{
    AirportDirectory, ApiClient, AutocompleteField, ResultsView, SearchRequestBuilder,
    SearchSession, SearchState, DEFAULT_API_BASE,
};
use anyhow::{bail, Context};
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use std::fs;
use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Parser)]
#[command(name = "air-search")]
#[command(about = "Flight search over the airline API")]
#[command(version)]
pub struct Cli {
    /// Base URL of the flight API
    #[arg(long, default_value = DEFAULT_API_BASE, global = true)]
    pub api_base: String,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Search for itineraries between two airports
    Search {
        /// Origin airport display name
        #[arg(short, long)]
        from: String,
        /// Destination airport display name
        #[arg(short, long)]
        to: String,
        /// Travel date (YYYY-MM-DD)
        #[arg(short, long)]
        date: String,
        /// Pre-search delay in seconds shown as the loading phase
        #[arg(long, default_value = "2")]
        delay_secs: u64,
        /// Output file for JSON results
        #[arg(short, long)]
        output: Option<String>,
    },
    /// Print autocomplete matches for a partial airport name or code
    Suggest {
        /// Partial name or code to match
        text: String,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    let client = ApiClient::new(&cli.api_base)?;
    let directory = Arc::new(AirportDirectory::load(&client).await);

    match cli.command {
        Commands::Suggest { text } => {
            let matches = directory.filter(&text);
            if matches.is_empty() {
                println!("No matching airports");
            } else {
                for airport in matches {
                    println!("{}", airport.display_label());
                }
            }
        }
        Commands::Search {
            from,
            to,
            date,
            delay_secs,
            output,
        } => {
            validate_search_input(&from, &to, &date)?;

            let mut origin = AutocompleteField::new(Arc::clone(&directory));
            let mut destination = AutocompleteField::new(Arc::clone(&directory));
            origin.on_text_changed(&from);
            destination.on_text_changed(&to);

            // A lone suggestion is committed the way a user would click the
            // only dropdown row.
            commit_single_suggestion(&mut origin, &directory);
            commit_single_suggestion(&mut destination, &directory);

            let builder = SearchRequestBuilder::new(Arc::clone(&directory));
            let query = builder.build(origin.text(), destination.text(), &date);

            let mut session =
                SearchSession::with_delay(client, Duration::from_secs(delay_secs));
            session.on_state_change(|state| {
                if state.is_loading() {
                    println!("Buscando vuelos...");
                }
            });

            let origin_text = origin.text().to_string();
            let destination_text = destination.text().to_string();
            match session.submit(query).await? {
                SearchState::Succeeded(result) => {
                    if let Some(output_file) = output {
                        let json = serde_json::to_string_pretty(result)?;
                        fs::write(&output_file, &json)?;
                        println!("Results saved to {}", output_file);
                    }

                    let view = ResultsView::new(result.clone(), origin_text, destination_text);
                    println!("{}", view.render());
                }
                SearchState::Failed(message) => {
                    eprintln!("{}", message);
                    std::process::exit(1);
                }
                _ => unreachable!("submit always ends in a terminal state"),
            }
        }
    }

    Ok(())
}

/// The form's native `required`/`type=date` semantics: reject empty fields
/// or a malformed date before any session is constructed
fn validate_search_input(from: &str, to: &str, date: &str) -> anyhow::Result<()> {
    if from.is_empty() || to.is_empty() {
        bail!("origin and destination are required");
    }
    NaiveDate::parse_from_str(date, "%Y-%m-%d")
        .with_context(|| format!("invalid date '{}', expected YYYY-MM-DD", date))?;
    Ok(())
}

/// Auto-picks the only suggestion when the typed text is not already an
/// exact airport name. A convenience over the form behavior: in a browser
/// the user clicks the lone dropdown row, in a one-shot CLI nobody can.
fn commit_single_suggestion(field: &mut AutocompleteField, directory: &AirportDirectory) {
    if directory.resolve_code_by_name(field.text()).is_some() {
        return;
    }
    if let [only] = field.suggestions() {
        let picked = only.clone();
        field.pick(&picked);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parsing() {
        let cli = Cli::try_parse_from([
            "air-search",
            "search",
            "--from",
            "New York JFK",
            "--to",
            "Los Angeles",
            "--date",
            "2024-11-01",
        ]);

        assert!(cli.is_ok());

        if let Ok(Cli {
            command: Commands::Search { from, to, date, .. },
            ..
        }) = cli
        {
            assert_eq!(from, "New York JFK");
            assert_eq!(to, "Los Angeles");
            assert_eq!(date, "2024-11-01");
        }
    }

    #[test]
    fn test_suggest_parsing() {
        let cli = Cli::try_parse_from(["air-search", "suggest", "los"]);
        assert!(cli.is_ok());
    }

    #[test]
    fn malformed_date_is_rejected() {
        let err = validate_search_input("New York JFK", "Los Angeles", "2024-13-40").unwrap_err();
        assert!(err.to_string().contains("invalid date"));

        assert!(validate_search_input("New York JFK", "Los Angeles", "not-a-date").is_err());
        assert!(validate_search_input("New York JFK", "Los Angeles", "2024-11-01").is_ok());
    }

    #[test]
    fn empty_fields_are_rejected() {
        assert!(validate_search_input("", "Los Angeles", "2024-11-01").is_err());
        assert!(validate_search_input("New York JFK", "", "2024-11-01").is_err());
    }
}
