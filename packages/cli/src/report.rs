//! Terminal and file output for a finished comparison.

use std::path::Path;

use city_compare_comparison::ComparisonSession;
use city_compare_comparison_models::{ComparisonResult, StyleConfig};
use city_compare_map::{format_area, render_html, summary_sentence};
use city_compare_server_models::ApiComparison;
use console::style;

/// Plain lines describing `result`: one per resolved city, then the
/// summary sentence when there is one.
#[must_use]
pub fn summary_lines(result: &ComparisonResult) -> Vec<String> {
    let mut lines = Vec::new();

    for (label, city) in [("A", &result.city_a), ("B", &result.city_b)] {
        if let Some(city) = city {
            let resolved = city
                .display_name
                .as_deref()
                .map(|d| format!(" ({d})"))
                .unwrap_or_default();
            lines.push(format!(
                "{label}: {}{resolved}: {}",
                city.name,
                format_area(city.area_sq_km)
            ));
        }
    }

    if let Some(sentence) = summary_sentence(result) {
        lines.push(sentence);
    }

    lines
}

/// Prints `result` to stdout, warnings highlighted.
pub fn print_result(result: &ComparisonResult) {
    println!();
    if result.is_empty() && result.warnings.is_empty() {
        println!("Nothing to compare.");
    }
    for line in summary_lines(result) {
        println!("{line}");
    }
    for warning in &result.warnings {
        println!("{}", style(format!("warning: {warning}")).yellow());
    }
    println!();
}

/// The session's last comparison as pretty-printed API JSON.
///
/// # Errors
///
/// Returns an error if serialization fails.
pub fn comparison_json(session: &ComparisonSession) -> Result<String, serde_json::Error> {
    let empty = ComparisonResult::default();
    let result = session.last_result().unwrap_or(&empty);

    serde_json::to_string_pretty(&ApiComparison::new(
        session.city_a(),
        session.city_b(),
        session.stage(),
        result,
        summary_sentence(result),
    ))
}

/// Writes the standalone map document for `result` to `path`.
///
/// # Errors
///
/// Returns an error if rendering or writing the file fails.
pub fn save_map(
    result: &ComparisonResult,
    styles: &StyleConfig,
    path: &Path,
) -> Result<(), Box<dyn std::error::Error>> {
    let document = render_html(result, styles)?;
    std::fs::write(path, document)?;
    log::info!("Wrote map to {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use city_compare_comparison_models::CityMeasurement;
    use geo::MultiPolygon;

    use super::*;

    fn city(name: &str, display_name: Option<&str>, area_sq_km: f64) -> CityMeasurement {
        CityMeasurement {
            name: name.to_string(),
            display_name: display_name.map(ToString::to_string),
            boundary: MultiPolygon(vec![]),
            area_sq_km,
            centroid: None,
        }
    }

    #[test]
    fn lines_for_full_comparison() {
        let result = ComparisonResult {
            city_a: Some(city("Paris", Some("Paris, France"), 105.0)),
            city_b: Some(city("Madrid", None, 605.0)),
            percent_difference: Some(476.190_476),
            ..ComparisonResult::default()
        };

        assert_eq!(
            summary_lines(&result),
            vec![
                "A: Paris (Paris, France): 105.00 km²".to_string(),
                "B: Madrid: 605.00 km²".to_string(),
                "Madrid is 476.2% larger than Paris.".to_string(),
            ]
        );
    }

    #[test]
    fn lines_without_percentage() {
        let result = ComparisonResult {
            city_b: Some(city("Madrid", None, 605.0)),
            ..ComparisonResult::default()
        };
        assert_eq!(summary_lines(&result), vec!["B: Madrid: 605.00 km²".to_string()]);
    }

    #[test]
    fn json_for_fresh_session() {
        let session = ComparisonSession::new();
        let json: serde_json::Value =
            serde_json::from_str(&comparison_json(&session).unwrap()).unwrap();
        assert_eq!(json["stage"], "idle");
        assert!(json["sentence"].is_null());
    }

    #[test]
    fn map_is_written_to_disk() {
        let path = std::env::temp_dir().join(format!(
            "city_compare_report_test_{}.html",
            std::process::id()
        ));
        let styles = city_compare_comparison::styles::default_styles();

        save_map(&ComparisonResult::default(), &styles, &path).unwrap();
        let written = std::fs::read_to_string(&path).unwrap();
        std::fs::remove_file(&path).ok();

        assert!(written.starts_with("<!DOCTYPE html>"));
    }
}
