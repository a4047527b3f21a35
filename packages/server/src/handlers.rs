//! HTTP handler functions for the city comparison API.

use actix_web::http::header;
use actix_web::{HttpRequest, HttpResponse, web};
use city_compare_comparison::ComparisonSession;
use city_compare_comparison_models::ComparisonResult;
use city_compare_map::{DOWNLOAD_FILENAME, render_html, summary_sentence};
use city_compare_server_models::{ApiComparison, ApiError, ApiHealth, CompareQueryParams};
use uuid::Uuid;

use crate::AppState;
use crate::sessions::{SESSION_HEADER, SharedSession, parse_session_id};

/// `GET /api/health`
pub async fn health() -> HttpResponse {
    HttpResponse::Ok().json(ApiHealth {
        healthy: true,
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// `GET /api/compare`
///
/// Stores `cityA`/`cityB` in the caller's session and returns the
/// comparison as JSON.
pub async fn compare(
    state: web::Data<AppState>,
    req: HttpRequest,
    params: web::Query<CompareQueryParams>,
) -> HttpResponse {
    let (id, session) = session_for(&state, &req);
    let params = params.into_inner();

    let mut session = session.lock().await;
    session
        .compare(
            state.lookup.as_ref(),
            params.city_a.unwrap_or_default(),
            params.city_b.unwrap_or_default(),
        )
        .await;

    HttpResponse::Ok()
        .insert_header((SESSION_HEADER, id.to_string()))
        .json(api_comparison(&session))
}

/// `GET /api/compare/map`
///
/// Like [`compare`], but returns the standalone map document as a download.
pub async fn compare_map(
    state: web::Data<AppState>,
    req: HttpRequest,
    params: web::Query<CompareQueryParams>,
) -> HttpResponse {
    let (id, session) = session_for(&state, &req);
    let params = params.into_inner();

    let mut session = session.lock().await;
    let result = session
        .compare(
            state.lookup.as_ref(),
            params.city_a.unwrap_or_default(),
            params.city_b.unwrap_or_default(),
        )
        .await;

    match render_html(result, &state.styles) {
        Ok(document) => HttpResponse::Ok()
            .insert_header((SESSION_HEADER, id.to_string()))
            .insert_header((
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{DOWNLOAD_FILENAME}\""),
            ))
            .content_type("text/html; charset=utf-8")
            .body(document),
        Err(e) => {
            log::error!("Failed to render comparison map: {e}");
            HttpResponse::InternalServerError()
                .insert_header((SESSION_HEADER, id.to_string()))
                .json(ApiError {
                    error: "Failed to render comparison map".to_string(),
                })
        }
    }
}

/// `POST /api/session/swap`
///
/// Exchanges the session's two inputs and re-runs the comparison.
pub async fn swap(state: web::Data<AppState>, req: HttpRequest) -> HttpResponse {
    let (id, session) = session_for(&state, &req);

    let mut session = session.lock().await;
    session.swap_and_run(state.lookup.as_ref()).await;

    HttpResponse::Ok()
        .insert_header((SESSION_HEADER, id.to_string()))
        .json(api_comparison(&session))
}

fn session_for(state: &AppState, req: &HttpRequest) -> (Uuid, SharedSession) {
    let requested = req
        .headers()
        .get(SESSION_HEADER)
        .and_then(|v| v.to_str().ok())
        .and_then(parse_session_id);

    state.sessions.get_or_create(requested)
}

fn api_comparison(session: &ComparisonSession) -> ApiComparison {
    let empty = ComparisonResult::default();
    let result = session.last_result().unwrap_or(&empty);

    ApiComparison::new(
        session.city_a(),
        session.city_b(),
        session.stage(),
        result,
        summary_sentence(result),
    )
}
