//! # API REST
//!
//! REST API implementation for the tarot service.
//!
//! Handles:
//! - HTTP endpoints with axum
//! - OpenAPI/Swagger documentation
//! - REST-specific concerns (JSON shaping, status codes, CORS)
//!
//! Uses `api-shared` for wire types and `tarot-core` for the reading workflow.

#![warn(rust_2018_idioms)]

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::Json,
    routing::get,
    Router,
};
use tower_http::cors::CorsLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use api_shared::{
    DrawCardsQuery, DrawCardsRes, ErrorRes, HealthRes, HealthService, InterpretationRes, JsonCard,
};
use tarot_core::{DrawnCard, ReadingRequest, ReadingService, RequestId};

/// Application state shared across REST API handlers
#[derive(Clone)]
pub struct AppState {
    readings: ReadingService,
}

impl AppState {
    pub fn new(readings: ReadingService) -> Self {
        Self { readings }
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(health, draw_cards, get_interpretation),
    components(schemas(
        HealthRes,
        JsonCard,
        DrawCardsRes,
        InterpretationRes,
        ErrorRes,
    ))
)]
pub struct ApiDoc;

type ApiError = (StatusCode, Json<ErrorRes>);

/// Builds the REST router with all routes, Swagger UI and a permissive CORS layer.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/cards", get(draw_cards))
        .route("/cards/interpret/:request_id", get(get_interpretation))
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Health check response", body = HealthRes)
    )
)]
/// Health check endpoint for the REST API
///
/// Used for monitoring and load balancer health checks.
#[axum::debug_handler]
async fn health(State(_state): State<AppState>) -> Json<HealthRes> {
    Json(HealthService::check_health())
}

#[utoipa::path(
    get,
    path = "/cards",
    params(DrawCardsQuery),
    responses(
        (status = 200, description = "Three drawn cards and the request ID to poll", body = DrawCardsRes),
        (status = 500, description = "Deck could not be fetched or drawn from", body = ErrorRes)
    )
)]
/// Draw three cards and start interpreting them
///
/// Fetches the deck, draws a past/present/future spread and responds straight away.
/// The interpretation is produced in the background and can be fetched later from
/// `/cards/interpret/{request_id}` using the returned `requestID`.
///
/// # Errors
/// Returns `500 Internal Server Error` if:
/// - the card source cannot be reached or returns a malformed deck, or
/// - the deck holds fewer than three distinct cards.
#[axum::debug_handler]
async fn draw_cards(
    State(state): State<AppState>,
    Query(query): Query<DrawCardsQuery>,
) -> Result<Json<DrawCardsRes>, ApiError> {
    let spread = match state.readings.draw_spread().await {
        Ok(spread) => spread,
        Err(e) => {
            tracing::error!("Draw cards error: {:?}", e);
            return Err((
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorRes::new(e.to_string())),
            ));
        }
    };

    let request_id = RequestId::new();
    let cards = spread.iter().map(json_card).collect();

    let reading = ReadingRequest::new(
        &spread,
        query.userstory.unwrap_or_default(),
        query.name.unwrap_or_default(),
    );
    // Detached: the response does not wait for the interpretation.
    drop(state.readings.spawn_interpretation(request_id, reading));

    tracing::info!(request_id = %request_id, "drew tarot cards");
    Ok(Json(DrawCardsRes {
        cards,
        request_id: request_id.to_string(),
    }))
}

#[utoipa::path(
    get,
    path = "/cards/interpret/{request_id}",
    params(
        ("request_id" = String, Path, description = "Request ID returned by `/cards`")
    ),
    responses(
        (status = 200, description = "Interpretation is ready", body = InterpretationRes),
        (status = 404, description = "No interpretation (not ready, failed, unknown or malformed ID)", body = ErrorRes)
    )
)]
/// Fetch the interpretation for a previous draw
///
/// A missing interpretation cannot be told apart from one still being generated or one
/// that failed; clients poll until it appears.
#[axum::debug_handler]
async fn get_interpretation(
    State(state): State<AppState>,
    Path(request_id): Path<String>,
) -> Result<Json<InterpretationRes>, ApiError> {
    let request_id = match RequestId::parse(&request_id) {
        Ok(id) => id,
        Err(e) => {
            // Indistinguishable from an unknown ID for the caller.
            tracing::debug!("Invalid request ID: {}", e);
            return Err(not_found());
        }
    };

    match state.readings.interpretation(&request_id) {
        Some(interpretation) => Ok(Json(InterpretationRes { interpretation })),
        None => {
            tracing::debug!(request_id = %request_id, "no interpretation found");
            Err(not_found())
        }
    }
}

fn not_found() -> ApiError {
    (
        StatusCode::NOT_FOUND,
        Json(ErrorRes::new("No interpretation found for this request ID")),
    )
}

fn json_card(drawn: &DrawnCard) -> JsonCard {
    JsonCard {
        name: drawn.display_name(),
        card_type: drawn.card.arcana.clone(),
        meaning_up: drawn.card.meaning_up.clone(),
        meaning_rev: drawn.card.meaning_rev.clone(),
        desc: drawn.card.desc.clone(),
        image_file_name: drawn.image_file_name(),
        reversed: drawn.reversed,
    }
}
