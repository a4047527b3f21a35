#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! The city size comparison pipeline.
//!
//! geocode → validate → project → measure → translate → compose.
//!
//! [`compare`] takes two place names, a [`BoundaryLookup`] and the caller's
//! [`BoundaryCache`], and returns a [`ComparisonResult`]. Lookup failures
//! never abort the pipeline: the failing city is dropped, a
//! [`ComparisonWarning`] is recorded, and the other city is still returned.
//! Updating the cache is the only side effect.
//!
//! [`ComparisonSession`] bundles the cache with the current inputs for
//! front ends that keep state between user actions.

pub mod session;
pub mod styles;

use city_compare_comparison_models::{
    CityMeasurement, CitySlot, ComparisonResult, ComparisonStage, ComparisonWarning,
};
use city_compare_geocoder::{BoundaryCache, BoundaryLookup, GeocodeError, ResolvedBoundary};

pub use session::ComparisonSession;

/// Signed size difference of `area_b` relative to `area_a`, in percent.
///
/// Positive when B is larger. `None` unless both areas are positive and
/// finite, so a degenerate boundary never produces NaN or infinity.
#[must_use]
pub fn percent_difference(area_a: f64, area_b: f64) -> Option<f64> {
    if !(area_a.is_finite() && area_b.is_finite()) || area_a <= 0.0 || area_b <= 0.0 {
        return None;
    }
    Some((area_b - area_a) / area_a * 100.0)
}

/// Measures a resolved boundary.
#[must_use]
pub fn measure_city(name: &str, resolved: &ResolvedBoundary) -> CityMeasurement {
    CityMeasurement {
        name: name.trim().to_string(),
        display_name: resolved.display_name.clone(),
        boundary: resolved.boundary.clone(),
        area_sq_km: city_compare_geometry::measure(&resolved.boundary),
        centroid: city_compare_geometry::centroid(&resolved.boundary),
    }
}

/// Packages whatever resolved into a [`ComparisonResult`].
///
/// With both cities present, city B is aligned onto city A and the
/// percentage difference is computed. With one or none, only the available
/// city is carried.
#[must_use]
pub fn compose(
    city_a: Option<CityMeasurement>,
    city_b: Option<CityMeasurement>,
    warnings: Vec<ComparisonWarning>,
) -> ComparisonResult {
    let (translated_b, percent_difference) = match (&city_a, &city_b) {
        (Some(a), Some(b)) => (
            city_compare_geometry::align(&a.boundary, &b.boundary),
            percent_difference(a.area_sq_km, b.area_sq_km),
        ),
        _ => (None, None),
    };

    ComparisonResult {
        city_a,
        city_b,
        translated_b,
        percent_difference,
        warnings,
    }
}

/// Outcome of resolving one non-blank input.
enum CityResolution {
    Resolved(CityMeasurement),
    Failed(ComparisonWarning),
}

async fn resolve_city(
    lookup: &dyn BoundaryLookup,
    cache: &mut BoundaryCache,
    slot: CitySlot,
    input: &str,
) -> CityResolution {
    let city = input.trim();
    match city_compare_geocoder::resolve(lookup, cache, input).await {
        Ok(resolved) => CityResolution::Resolved(measure_city(input, &resolved)),
        Err(GeocodeError::NotFound { .. } | GeocodeError::EmptyQuery) => {
            CityResolution::Failed(ComparisonWarning::NotFound {
                slot,
                city: city.to_string(),
            })
        }
        Err(e) => CityResolution::Failed(ComparisonWarning::LookupFailed {
            slot,
            city: city.to_string(),
            reason: e.to_string(),
        }),
    }
}

/// Compares two places by name. See [`compare_with`].
pub async fn compare(
    lookup: &dyn BoundaryLookup,
    cache: &mut BoundaryCache,
    city_a: &str,
    city_b: &str,
) -> ComparisonResult {
    compare_with(lookup, cache, city_a, city_b, &mut |_: ComparisonStage| {}).await
}

/// Compares two places by name, reporting each [`ComparisonStage`] to
/// `on_stage` as the pipeline advances.
///
/// Blank inputs are skipped without a warning. The final stage is
/// [`ComparisonStage::Composed`] when both cities resolved,
/// [`ComparisonStage::Idle`] when both inputs were blank, and
/// [`ComparisonStage::Partial`] otherwise.
pub async fn compare_with(
    lookup: &dyn BoundaryLookup,
    cache: &mut BoundaryCache,
    city_a: &str,
    city_b: &str,
    on_stage: &mut (dyn FnMut(ComparisonStage) + Send),
) -> ComparisonResult {
    let mut warnings = Vec::new();
    let mut resolved = [None, None];
    let mut attempted = 0;

    let steps = [
        (
            CitySlot::First,
            city_a,
            ComparisonStage::CityAEntered,
            ComparisonStage::CityAResolved,
            ComparisonStage::CityAFailed,
        ),
        (
            CitySlot::Second,
            city_b,
            ComparisonStage::CityBEntered,
            ComparisonStage::CityBResolved,
            ComparisonStage::CityBFailed,
        ),
    ];

    for (idx, (slot, input, entered, ok, failed)) in steps.into_iter().enumerate() {
        if input.trim().is_empty() {
            continue;
        }
        attempted += 1;
        on_stage(entered);

        match resolve_city(lookup, cache, slot, input).await {
            CityResolution::Resolved(city) => {
                if city.area_sq_km <= 0.0 {
                    warnings.push(ComparisonWarning::DegenerateArea {
                        slot,
                        city: city.name.clone(),
                    });
                }
                on_stage(ok);
                resolved[idx] = Some(city);
            }
            CityResolution::Failed(warning) => {
                log::warn!("{warning}");
                warnings.push(warning);
                on_stage(failed);
            }
        }
    }

    let [a, b] = resolved;
    let result = compose(a, b, warnings);

    let done = match (&result.city_a, &result.city_b) {
        (Some(_), Some(_)) => ComparisonStage::Composed,
        _ if attempted == 0 => ComparisonStage::Idle,
        _ => ComparisonStage::Partial,
    };
    on_stage(done);

    if let (Some(a), Some(b), Some(pct)) =
        (&result.city_a, &result.city_b, result.percent_difference)
    {
        log::info!(
            "Compared '{}' ({} km²) with '{}' ({} km²): {pct:+.1}%",
            a.name,
            a.area_sq_km,
            b.name,
            b.area_sq_km
        );
    }

    result
}
