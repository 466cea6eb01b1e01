//! HTTP route handlers.

use askama::Template;
use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    response::{Html, IntoResponse},
    routing::{get, patch, post, put},
};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::board::Viewport;
use crate::domain::{Country, DomainError, Location, StationConfig, StationUpdate};
use crate::provider::StationBoard;
use crate::state::AppState;
use crate::wizard::{LineOption, MonitorView, PreferencesUpdate, SearchResults, WizardError};

use super::dto::*;
use super::state::WebState;
use super::templates::*;

/// Create the application router.
///
/// `static_dir` is the path to the static assets directory.
pub fn create_router(state: WebState, static_dir: &str) -> Router {
    Router::new()
        .route("/", get(index_page))
        .route("/monitor", get(monitor_page))
        .route("/health", get(health))
        .route("/api/locations", get(search_locations))
        .route("/api/board", get(station_board))
        .route("/api/state", get(get_state))
        .route("/api/country", put(set_country))
        .route("/api/station-count", put(set_station_count))
        .route("/api/preferences", put(set_preferences))
        .route("/api/wizard/next", post(wizard_next))
        .route("/api/wizard/back", post(wizard_back))
        .route("/api/search", get(search_results).put(search_input))
        .route("/api/stations/:index", patch(update_station))
        .route("/api/stations/:index/select", post(select_station))
        .route("/api/stations/:index/lines", get(station_lines))
        .route("/api/stations/:index/directions", post(toggle_direction))
        .route("/api/viewport", put(set_viewport))
        .route("/api/monitor", get(monitor_view))
        .route("/api/notices", get(notices))
        .nest_service("/static", ServeDir::new(static_dir))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Health check endpoint.
async fn health() -> &'static str {
    "ok"
}

/// Configuration page.
async fn index_page(State(state): State<WebState>) -> Result<Html<String>, AppError> {
    let app = state.controller.state().await;
    let notices = state.controller.take_notices();
    let html = IndexTemplate::new(&app, notices)
        .render()
        .map_err(|e| AppError::Internal {
            message: format!("Template error: {}", e),
        })?;
    Ok(Html(html))
}

/// Server-rendered departure board.
async fn monitor_page(State(state): State<WebState>) -> Result<Html<String>, AppError> {
    let view = state.controller.monitor_view().await;
    let html = MonitorTemplate::new(&view, state.refresh.as_secs().max(1))
        .render()
        .map_err(|e| AppError::Internal {
            message: format!("Template error: {}", e),
        })?;
    Ok(Html(html))
}

fn parse_country(input: &str) -> Result<Country, AppError> {
    Country::parse(input).map_err(|e| AppError::BadRequest {
        message: e.to_string(),
    })
}

/// Station search proxy. Upstream failures yield an empty list.
async fn search_locations(
    State(state): State<WebState>,
    Query(req): Query<LocationsQuery>,
) -> Result<Json<Vec<Location>>, AppError> {
    let country = parse_country(&req.country)?;
    Ok(Json(state.providers.search_stations(country, &req.query).await))
}

/// Station board proxy. Upstream failures yield `null`.
async fn station_board(
    State(state): State<WebState>,
    Query(req): Query<BoardQuery>,
) -> Result<Json<Option<StationBoard>>, AppError> {
    let country = parse_country(&req.country)?;
    let board = state
        .providers
        .get_station_board(country, &req.station)
        .await
        .map(|board| (*board).clone());
    Ok(Json(board))
}

async fn get_state(State(state): State<WebState>) -> Json<AppState> {
    Json(state.controller.state().await)
}

async fn set_country(
    State(state): State<WebState>,
    Json(req): Json<CountryRequest>,
) -> Result<Json<AppState>, AppError> {
    let country = parse_country(&req.country)?;
    Ok(Json(state.controller.set_country(country).await))
}

async fn set_station_count(
    State(state): State<WebState>,
    Json(req): Json<StationCountRequest>,
) -> Result<Json<AppState>, AppError> {
    Ok(Json(state.controller.set_station_count(req.count).await?))
}

async fn set_preferences(
    State(state): State<WebState>,
    Json(update): Json<PreferencesUpdate>,
) -> Json<AppState> {
    Json(state.controller.set_preferences(update).await)
}

async fn wizard_next(State(state): State<WebState>) -> Result<Json<AppState>, AppError> {
    Ok(Json(state.controller.advance().await?))
}

async fn wizard_back(State(state): State<WebState>) -> Json<AppState> {
    Json(state.controller.back().await)
}

/// Record a search keystroke. The search itself runs after the quiet period.
async fn search_input(
    State(state): State<WebState>,
    Json(req): Json<SearchInputRequest>,
) -> Json<SearchResults> {
    state.controller.search_input(&req.query).await;
    Json(state.controller.search_results())
}

async fn search_results(State(state): State<WebState>) -> Json<SearchResults> {
    Json(state.controller.search_results())
}

async fn select_station(
    State(state): State<WebState>,
    Path(index): Path<usize>,
    Json(location): Json<Location>,
) -> Result<Json<AppState>, AppError> {
    Ok(Json(state.controller.select_station(index, &location).await?))
}

async fn update_station(
    State(state): State<WebState>,
    Path(index): Path<usize>,
    Json(update): Json<StationUpdate>,
) -> Result<Json<StationConfig>, AppError> {
    Ok(Json(state.controller.update_station(index, update).await?))
}

async fn station_lines(
    State(state): State<WebState>,
    Path(index): Path<usize>,
) -> Result<Json<Vec<LineOption>>, AppError> {
    Ok(Json(state.controller.line_options(index).await?))
}

async fn toggle_direction(
    State(state): State<WebState>,
    Path(index): Path<usize>,
    Json(req): Json<DirectionToggleRequest>,
) -> Result<Json<StationConfig>, AppError> {
    let station = state
        .controller
        .toggle_direction(index, &req.line, &req.direction, req.shown)
        .await?;
    Ok(Json(station))
}

async fn set_viewport(
    State(state): State<WebState>,
    Json(viewport): Json<Viewport>,
) -> Json<ViewportResponse> {
    state.controller.set_viewport(viewport);
    Json(ViewportResponse {
        max_entries: state.controller.capacity(),
    })
}

async fn monitor_view(State(state): State<WebState>) -> Json<MonitorView> {
    Json(state.controller.monitor_view().await)
}

async fn notices(State(state): State<WebState>) -> Json<NoticesResponse> {
    Json(NoticesResponse {
        notices: state.controller.take_notices(),
    })
}

/// Application error type.
#[derive(Debug)]
pub enum AppError {
    BadRequest { message: String },
    NotFound { message: String },
    Internal { message: String },
}

impl From<WizardError> for AppError {
    fn from(e: WizardError) -> Self {
        match e {
            WizardError::Domain(DomainError::StationIndexOutOfRange { .. }) => AppError::NotFound {
                message: e.to_string(),
            },
            _ => AppError::BadRequest {
                message: e.to_string(),
            },
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let (status, message) = match self {
            AppError::BadRequest { message } => (StatusCode::BAD_REQUEST, message),
            AppError::NotFound { message } => (StatusCode::NOT_FOUND, message),
            AppError::Internal { message } => (StatusCode::INTERNAL_SERVER_ERROR, message),
        };

        if status.is_server_error() {
            tracing::error!(%status, %message, "request failed");
        } else {
            tracing::warn!(%status, %message, "request rejected");
        }

        let body = Json(ErrorResponse { error: message });
        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::MonitorConfig;
    use crate::provider::{Providers, ProvidersConfig};
    use crate::state::{Phase, StateStore};
    use crate::wizard::Controller;
    use axum::body::Body;
    use axum::http::{Request, Response, header};
    use std::time::Duration;
    use tempfile::TempDir;
    use tower::ServiceExt;

    const BOARD: &str = r#"{
        "station": { "id": "8507000", "name": "Bern" },
        "departures": [
            { "category": "IC", "number": "8", "to": "Brig", "stop": { "departure": "2024-03-15T10:05:00+0100" } }
        ]
    }"#;

    fn app() -> (TempDir, Router) {
        let dir = TempDir::new().unwrap();
        let fixtures = dir.path().join("fixtures");
        std::fs::create_dir(&fixtures).unwrap();
        std::fs::write(fixtures.join("8507000.json"), BOARD).unwrap();

        let providers = Providers::new(ProvidersConfig::new().with_fixture_dir(&fixtures)).unwrap();
        let controller = Controller::open(
            StateStore::new(dir.path().join("state.json")),
            providers.clone(),
            MonitorConfig::default(),
        );
        let state = WebState::new(controller, providers, Duration::from_secs(20));
        let router = create_router(state, dir.path().to_str().unwrap());
        (dir, router)
    }

    fn get(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    fn json(method: &str, uri: &str, body: &str) -> Request<Body> {
        Request::builder()
            .method(method)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    async fn body_json(response: Response<Body>) -> serde_json::Value {
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&body).unwrap()
    }

    #[tokio::test]
    async fn health_check() {
        let (_dir, app) = app();
        let response = app.oneshot(get("/health")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn locations_proxy() {
        let (_dir, app) = app();

        let response = app
            .clone()
            .oneshot(get("/api/locations?country=ch&query=bern"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body[0]["id"], "8507000");

        let response = app
            .oneshot(get("/api/locations?country=zz&query=bern"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_json(response).await["error"], "unknown country: zz");
    }

    #[tokio::test]
    async fn board_proxy_returns_null_for_unknown_station() {
        let (_dir, app) = app();

        let response = app
            .clone()
            .oneshot(get("/api/board?country=switzerland&station=8507000"))
            .await
            .unwrap();
        let body = body_json(response).await;
        assert_eq!(body["departures"][0]["to"], "Brig");

        let response = app
            .oneshot(get("/api/board?country=ch&station=nope"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert!(body_json(response).await.is_null());
    }

    #[tokio::test]
    async fn wizard_over_http() {
        let (_dir, app) = app();

        let response = app
            .clone()
            .oneshot(json("PUT", "/api/country", r#"{ "country": "ch" }"#))
            .await
            .unwrap();
        assert_eq!(body_json(response).await["country"], "switzerland");

        let response = app
            .clone()
            .oneshot(json("PUT", "/api/station-count", r#"{ "count": 7 }"#))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let response = app
            .clone()
            .oneshot(json(
                "POST",
                "/api/stations/3/select",
                r#"{ "id": "8507000", "name": "Bern" }"#,
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let response = app
            .clone()
            .oneshot(json(
                "POST",
                "/api/stations/0/select",
                r#"{ "id": "8507000", "name": "Bern" }"#,
            ))
            .await
            .unwrap();
        assert_eq!(body_json(response).await["stations"][0]["name"], "Bern");

        let response = app
            .clone()
            .oneshot(get("/api/stations/0/lines"))
            .await
            .unwrap();
        assert_eq!(body_json(response).await[0]["label"], "IC8");

        for expected in [Phase::StationCount, Phase::StationSearch, Phase::Customization] {
            let response = app
                .clone()
                .oneshot(json("POST", "/api/wizard/next", ""))
                .await
                .unwrap();
            let body = body_json(response).await;
            assert_eq!(body["phase"], serde_json::to_value(expected).unwrap());
        }

        let response = app
            .oneshot(json(
                "PATCH",
                "/api/stations/0",
                r#"{ "customName": "Home" }"#,
            ))
            .await
            .unwrap();
        assert_eq!(body_json(response).await["customName"], "Home");
    }

    #[tokio::test]
    async fn advance_rejected_while_incomplete() {
        let (_dir, app) = app();
        for _ in 0..2 {
            app.clone()
                .oneshot(json("POST", "/api/wizard/next", ""))
                .await
                .unwrap();
        }

        let response = app
            .oneshot(json("POST", "/api/wizard/next", ""))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            body_json(response).await["error"],
            "cannot leave StationSearch: 1 of 1 stations not selected"
        );
    }

    #[tokio::test]
    async fn pages_render() {
        let (_dir, app) = app();

        let response = app.clone().oneshot(get("/")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let response = app.clone().oneshot(get("/monitor")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let response = app.oneshot(get("/api/monitor")).await.unwrap();
        let body = body_json(response).await;
        assert_eq!(body["configurationComplete"], false);
        assert_eq!(body["maxEntries"], 10);
    }

    #[tokio::test]
    async fn viewport_and_notices() {
        let (_dir, app) = app();

        let response = app
            .clone()
            .oneshot(json("PUT", "/api/viewport", r#"{ "height": 900, "width": 1600 }"#))
            .await
            .unwrap();
        assert_eq!(body_json(response).await["maxEntries"], 10);

        let response = app.oneshot(get("/api/notices")).await.unwrap();
        assert_eq!(
            body_json(response).await["notices"],
            serde_json::json!([])
        );
    }
}
