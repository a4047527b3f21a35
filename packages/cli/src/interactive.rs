//! Interactive comparison loop.
//!
//! Prompts for two cities, shows the result, then offers follow-up actions
//! until the user quits. One [`ComparisonSession`] (and so one boundary
//! cache) lives for the whole loop.

use std::path::PathBuf;

use city_compare_cli_utils::{MultiProgress, Spinner};
use city_compare_comparison::ComparisonSession;
use city_compare_comparison::styles::default_styles;
use city_compare_geocoder::BoundaryLookup;
use city_compare_map::DOWNLOAD_FILENAME;
use dialoguer::{Input, Select};

use crate::report;

/// What to do after a comparison is shown.
enum NextAction {
    CompareOther,
    Swap,
    SaveMap,
    Quit,
}

impl NextAction {
    const ALL: &[Self] = &[Self::CompareOther, Self::Swap, Self::SaveMap, Self::Quit];

    #[must_use]
    const fn label(&self) -> &'static str {
        match self {
            Self::CompareOther => "Compare other cities",
            Self::Swap => "Swap cities",
            Self::SaveMap => "Save map HTML",
            Self::Quit => "Quit",
        }
    }
}

/// Runs the interactive loop until the user quits.
///
/// # Errors
///
/// Returns an error if a prompt fails or the map cannot be saved.
pub async fn run(
    lookup: &dyn BoundaryLookup,
    multi: &MultiProgress,
) -> Result<(), Box<dyn std::error::Error>> {
    println!("City Size Comparison");
    println!();

    let styles = default_styles();
    let mut session = ComparisonSession::new();

    loop {
        let city_a: String = Input::new()
            .with_prompt("Enter the first city (e.g. Paris, France)")
            .interact_text()?;
        let city_b: String = Input::new()
            .with_prompt("Enter the second city (optional)")
            .allow_empty(true)
            .interact_text()?;

        session.set_inputs(city_a, city_b);
        run_with_spinner(&mut session, lookup, multi).await;

        let labels: Vec<&str> = NextAction::ALL.iter().map(NextAction::label).collect();

        loop {
            let idx = Select::new()
                .with_prompt("What next?")
                .items(&labels)
                .default(0)
                .interact()?;

            match NextAction::ALL[idx] {
                NextAction::CompareOther => break,
                NextAction::Swap => {
                    session.swap();
                    run_with_spinner(&mut session, lookup, multi).await;
                }
                NextAction::SaveMap => {
                    let path: String = Input::new()
                        .with_prompt("Save map to")
                        .default(DOWNLOAD_FILENAME.to_string())
                        .interact_text()?;
                    let path = PathBuf::from(path);

                    if let Some(result) = session.last_result() {
                        report::save_map(result, &styles, &path)?;
                        println!("Saved {}", path.display());
                    }
                }
                NextAction::Quit => return Ok(()),
            }
        }
    }
}

async fn run_with_spinner(
    session: &mut ComparisonSession,
    lookup: &dyn BoundaryLookup,
    multi: &MultiProgress,
) {
    let message = if session.city_b().trim().is_empty() {
        format!("Looking up {}...", session.city_a().trim())
    } else {
        format!(
            "Comparing {} and {}...",
            session.city_a().trim(),
            session.city_b().trim()
        )
    };
    let spinner = Spinner::start(multi, &message);

    let result = session.run(lookup).await;
    spinner.finish_and_clear();

    report::print_result(result);
}
