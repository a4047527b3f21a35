#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Command-line front end for city size comparisons.
//!
//! ```text
//! city_compare compare "Paris, France" "Madrid, Spain" [--output map.html] [--json]
//! city_compare serve [--bind 127.0.0.1] [--port 8080] [--interactive|-i]
//! ```
//!
//! Running with no subcommand enters interactive mode.
//!
//! Uses `indicatif-log-bridge` (via [`city_compare_cli_utils::init_logger`])
//! to route `log` output through `indicatif::MultiProgress` so that log
//! lines and spinners never fight for the terminal.

mod interactive;
mod report;

use std::path::PathBuf;

use city_compare_cli_utils::Spinner;
use city_compare_comparison::ComparisonSession;
use city_compare_comparison::styles::default_styles;
use city_compare_geocoder::NominatimClient;
use city_compare_server::ServerArgs;
use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "city_compare",
    about = "Compare the sizes of two cities on a map"
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Compare two cities once and print the result
    Compare {
        /// Reference city
        city_a: String,
        /// City to compare against the reference
        city_b: Option<String>,
        /// Write the standalone map document to this file
        #[arg(long)]
        output: Option<PathBuf>,
        /// Print the comparison as JSON instead of text
        #[arg(long)]
        json: bool,
    },
    /// Start the HTTP API server
    Serve(ServerArgs),
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let multi = city_compare_cli_utils::init_logger();
    let cli = Cli::parse();

    match cli.command {
        None => {
            let lookup = NominatimClient::from_registry()?;
            interactive::run(&lookup, &multi).await?;
        }
        Some(Commands::Compare {
            city_a,
            city_b,
            output,
            json,
        }) => {
            let lookup = NominatimClient::from_registry()?;
            let mut session = ComparisonSession::new();

            let spinner = Spinner::start(&multi, "Comparing...");
            session
                .compare(&lookup, city_a, city_b.unwrap_or_default())
                .await;
            spinner.finish_and_clear();

            if json {
                println!("{}", report::comparison_json(&session)?);
            } else if let Some(result) = session.last_result() {
                report::print_result(result);
            }

            if let (Some(path), Some(result)) = (output, session.last_result()) {
                report::save_map(result, &default_styles(), &path)?;
                if !json {
                    println!("Saved {}", path.display());
                }
            }
        }
        Some(Commands::Serve(args)) => {
            // The server uses actix-web's runtime, so it runs on its own
            // system in a blocking task instead of nesting inside tokio.
            tokio::task::spawn_blocking(move || actix_rt::System::new().block_on(args.run()))
                .await??;
        }
    }

    Ok(())
}
