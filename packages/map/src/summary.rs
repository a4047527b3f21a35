//! Human-readable comparison sentences.

use city_compare_comparison_models::ComparisonResult;
use strum_macros::{AsRefStr, Display};

use crate::html::escape;

/// Whether city B is bigger or smaller than city A.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, AsRefStr)]
#[strum(serialize_all = "lowercase")]
pub enum SizeDirection {
    /// B is larger.
    Larger,
    /// B is smaller.
    Smaller,
    /// Areas are identical.
    Same,
}

/// The percentage sentence for a completed comparison.
#[derive(Debug, Clone, PartialEq)]
pub struct Summary {
    /// Reference city name.
    pub city_a: String,
    /// Compared city name.
    pub city_b: String,
    /// Absolute percentage difference.
    pub magnitude: f64,
    /// Sign of the difference.
    pub direction: SizeDirection,
}

impl Summary {
    /// Builds the summary, or `None` if the result has no percentage
    /// difference (a city is missing or degenerate).
    #[must_use]
    pub fn from_result(result: &ComparisonResult) -> Option<Self> {
        let pct = result.percent_difference?;
        let a = result.city_a.as_ref()?;
        let b = result.city_b.as_ref()?;

        let direction = if pct > 0.0 {
            SizeDirection::Larger
        } else if pct < 0.0 {
            SizeDirection::Smaller
        } else {
            SizeDirection::Same
        };

        Some(Self {
            city_a: a.name.clone(),
            city_b: b.name.clone(),
            magnitude: pct.abs(),
            direction,
        })
    }

    /// The sentence with city names and the figure in `<strong>` tags.
    #[must_use]
    pub fn to_html(&self) -> String {
        let a = escape(&self.city_a);
        let b = escape(&self.city_b);
        match self.direction {
            SizeDirection::Same => {
                format!("<strong>{b}</strong> is the same size as <strong>{a}</strong>.")
            }
            direction => format!(
                "<strong>{b}</strong> is <strong>{:.1}% {direction}</strong> than <strong>{a}</strong>.",
                self.magnitude
            ),
        }
    }
}

impl std::fmt::Display for Summary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.direction {
            SizeDirection::Same => {
                write!(f, "{} is the same size as {}.", self.city_b, self.city_a)
            }
            direction => write!(
                f,
                "{} is {:.1}% {direction} than {}.",
                self.city_b, self.magnitude, self.city_a
            ),
        }
    }
}

/// Plain-text percentage sentence, or `None` when no percentage exists.
#[must_use]
pub fn summary_sentence(result: &ComparisonResult) -> Option<String> {
    Summary::from_result(result).map(|s| s.to_string())
}

/// Formats an area for tooltips and listings (e.g. `"105.40 km²"`).
#[must_use]
pub fn format_area(area_sq_km: f64) -> String {
    format!("{area_sq_km:.2} km²")
}

#[cfg(test)]
mod tests {
    use city_compare_comparison_models::CityMeasurement;
    use geo::MultiPolygon;

    use super::*;

    fn city(name: &str, area_sq_km: f64) -> CityMeasurement {
        CityMeasurement {
            name: name.to_string(),
            display_name: None,
            boundary: MultiPolygon(vec![]),
            area_sq_km,
            centroid: None,
        }
    }

    fn result(pct: Option<f64>) -> ComparisonResult {
        ComparisonResult {
            city_a: Some(city("Paris, France", 105.0)),
            city_b: Some(city("Madrid, Spain", 605.0)),
            percent_difference: pct,
            ..ComparisonResult::default()
        }
    }

    #[test]
    fn larger_sentence() {
        assert_eq!(
            summary_sentence(&result(Some(476.190_476))).unwrap(),
            "Madrid, Spain is 476.2% larger than Paris, France."
        );
    }

    #[test]
    fn smaller_sentence_uses_magnitude() {
        assert_eq!(
            summary_sentence(&result(Some(-82.644_628))).unwrap(),
            "Madrid, Spain is 82.6% smaller than Paris, France."
        );
    }

    #[test]
    fn equal_areas() {
        assert_eq!(
            summary_sentence(&result(Some(0.0))).unwrap(),
            "Madrid, Spain is the same size as Paris, France."
        );
    }

    #[test]
    fn no_sentence_without_percentage() {
        assert!(summary_sentence(&result(None)).is_none());

        let only_a = ComparisonResult {
            city_a: Some(city("Paris, France", 105.0)),
            ..ComparisonResult::default()
        };
        assert!(summary_sentence(&only_a).is_none());
    }

    #[test]
    fn html_sentence_escapes_names() {
        let mut r = result(Some(10.0));
        if let Some(b) = r.city_b.as_mut() {
            b.name = "<b>Evil</b>".to_string();
        }
        let html = Summary::from_result(&r).unwrap().to_html();
        assert!(html.contains("&lt;b&gt;Evil&lt;/b&gt;"));
        assert!(html.contains("<strong>10.0% larger</strong>"));
    }

    #[test]
    fn area_has_two_decimals() {
        assert_eq!(format_area(105.4), "105.40 km²");
    }
}
