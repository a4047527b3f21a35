#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Standalone city comparison API server.
//!
//! ```text
//! city_compare_server [--bind 127.0.0.1] [--port 8080] [--interactive]
//! ```
//!
//! Unset flags fall back to `BIND_ADDR` and `PORT`, then to
//! `127.0.0.1:8080`.

use city_compare_server::{ServerArgs, ServerError};
use clap::Parser;

#[derive(Parser)]
#[command(
    name = "city_compare_server",
    about = "Serve city size comparisons over HTTP"
)]
struct Cli {
    #[command(flatten)]
    server: ServerArgs,
}

#[actix_web::main]
async fn main() -> Result<(), ServerError> {
    pretty_env_logger::init_custom_env("RUST_LOG");
    let cli = Cli::parse();

    cli.server.run().await
}
