// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all
)]
#![allow(clippy::multiple_crate_versions)]

mod live;

use axum::{
    Json, Router,
    extract::{FromRef, Path, Query, State as AxumState},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use clap::Parser;
use koekalenteri_api::{
    ApiError, CreateEventRequest, CreateEventResponse, CreateRegistrationRequest,
    CreateRegistrationResponse, EvaluateMoveRequest, EvaluateMoveResponse, GetAuditTrailResponse,
    GetEventResponse, GetSelectionResponse, ListRegistrationsResponse, SaveGroupsRequest,
    SaveGroupsResponse, SelectionRequest, create_event, create_registration, evaluate_move,
    get_audit_trail, get_event, get_selection, list_registrations, save_groups,
};
use koekalenteri_audit::{Actor, Cause};
use koekalenteri_domain::GroupChange;
use koekalenteri_persistence::Persistence;
use live::{LiveEvent, LiveEventBroadcaster, live_events_handler};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{error, info};

/// Koekalenteri server - registration group management for dog-show events
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the `SQLite` database file. If not provided, uses in-memory database.
    #[arg(short, long)]
    database: Option<String>,

    /// Port to bind the server to
    #[arg(short, long, default_value_t = 3000)]
    port: u16,

    /// Address to bind the server to
    #[arg(short, long, default_value = "0.0.0.0")]
    bind: String,
}

/// Application state shared across handlers.
#[derive(Clone)]
struct AppState {
    persistence: Arc<Mutex<Persistence>>,
    broadcaster: Arc<LiveEventBroadcaster>,
}

impl FromRef<AppState> for Arc<LiveEventBroadcaster> {
    fn from_ref(state: &AppState) -> Self {
        Arc::clone(&state.broadcaster)
    }
}

/// The operator making a change, and why.
#[derive(Debug, Clone, Deserialize, Serialize)]
struct Attribution {
    /// The actor ID performing this action.
    actor_id: String,
    /// The cause ID for this action.
    cause_id: String,
    /// The cause description.
    cause_description: String,
}

impl Attribution {
    fn into_parts(self) -> (Actor, Cause) {
        (
            Actor::new(self.actor_id, String::from("admin")),
            Cause::new(self.cause_id, self.cause_description),
        )
    }
}

/// API request for judging, and optionally committing, a move.
#[derive(Debug, Clone, Deserialize, Serialize)]
struct MoveApiRequest {
    #[serde(flatten)]
    attribution: Attribution,
    #[serde(flatten)]
    request: EvaluateMoveRequest,
}

/// API request for saving group changes.
#[derive(Debug, Clone, Deserialize, Serialize)]
struct SaveGroupsApiRequest {
    #[serde(flatten)]
    attribution: Attribution,
    /// The group reassignments.
    changes: Vec<GroupChange>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
struct AuditTrailQuery {
    /// Restrict the trail to one registration.
    registration_id: Option<String>,
}

/// Error response type.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct ErrorResponse {
    /// Error indicator.
    error: bool,
    /// Error message.
    message: String,
}

/// HTTP error wrapper that implements `IntoResponse`.
struct HttpError {
    /// The HTTP status code.
    status: StatusCode,
    /// The error message.
    message: String,
}

impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        let body: Json<ErrorResponse> = Json(ErrorResponse {
            error: true,
            message: self.message,
        });
        (self.status, body).into_response()
    }
}

impl From<ApiError> for HttpError {
    fn from(err: ApiError) -> Self {
        let status: StatusCode = match &err {
            ApiError::DomainRuleViolation { .. } => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::InvalidInput { .. } => StatusCode::BAD_REQUEST,
            ApiError::ResourceNotFound { .. } => StatusCode::NOT_FOUND,
            ApiError::Internal { .. } => {
                error!(error = %err, "Internal error");
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };
        Self {
            status,
            message: err.to_string(),
        }
    }
}

/// Handler for POST `/events`.
async fn handle_create_event(
    AxumState(app_state): AxumState<AppState>,
    Json(req): Json<CreateEventRequest>,
) -> Result<Json<CreateEventResponse>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let response: CreateEventResponse = create_event(&mut persistence, req)?;
    drop(persistence);

    app_state.broadcaster.broadcast(&LiveEvent::EventStored {
        event_id: response.event_id.clone(),
    });
    Ok(Json(response))
}

/// Handler for GET `/events/{event_id}`.
async fn handle_get_event(
    AxumState(app_state): AxumState<AppState>,
    Path(event_id): Path<String>,
) -> Result<Json<GetEventResponse>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    Ok(Json(get_event(&mut persistence, &event_id)?))
}

/// Handler for POST `/events/{event_id}/registrations`.
async fn handle_create_registration(
    AxumState(app_state): AxumState<AppState>,
    Path(event_id): Path<String>,
    Json(req): Json<CreateRegistrationRequest>,
) -> Result<Json<CreateRegistrationResponse>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let response: CreateRegistrationResponse =
        create_registration(&mut persistence, &event_id, req)?;
    drop(persistence);

    app_state
        .broadcaster
        .broadcast(&LiveEvent::RegistrationCreated {
            event_id,
            registration_id: response.registration_id.clone(),
        });
    Ok(Json(response))
}

/// Handler for GET `/events/{event_id}/registrations`.
async fn handle_list_registrations(
    AxumState(app_state): AxumState<AppState>,
    Path(event_id): Path<String>,
) -> Result<Json<ListRegistrationsResponse>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    Ok(Json(list_registrations(&mut persistence, &event_id)?))
}

/// Handler for GET `/events/{event_id}/selection`.
///
/// The class and reserve override come from the query string.
async fn handle_get_selection(
    AxumState(app_state): AxumState<AppState>,
    Path(event_id): Path<String>,
    Query(query): Query<SelectionRequest>,
) -> Result<Json<GetSelectionResponse>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    Ok(Json(get_selection(&mut persistence, &event_id, &query)?))
}

/// Handler for POST `/events/{event_id}/moves`.
async fn handle_evaluate_move(
    AxumState(app_state): AxumState<AppState>,
    Path(event_id): Path<String>,
    Json(req): Json<MoveApiRequest>,
) -> Result<Json<EvaluateMoveResponse>, HttpError> {
    info!(
        actor_id = %req.attribution.actor_id,
        event_id = %event_id,
        registration_id = %req.request.intent.registration_id,
        "Handling move request"
    );

    let (actor, cause) = req.attribution.into_parts();
    let mut persistence = app_state.persistence.lock().await;
    let response: EvaluateMoveResponse =
        evaluate_move(&mut persistence, &event_id, &req.request, actor, cause)?;
    drop(persistence);

    if let Some(saved) = &response.saved {
        app_state.broadcaster.broadcast(&LiveEvent::GroupsSaved {
            event_id,
            changed: saved.changed.clone(),
        });
    }
    Ok(Json(response))
}

/// Handler for POST `/events/{event_id}/groups`.
async fn handle_save_groups(
    AxumState(app_state): AxumState<AppState>,
    Path(event_id): Path<String>,
    Json(req): Json<SaveGroupsApiRequest>,
) -> Result<Json<SaveGroupsResponse>, HttpError> {
    info!(
        actor_id = %req.attribution.actor_id,
        event_id = %event_id,
        changes = req.changes.len(),
        "Handling save_groups request"
    );

    let (actor, cause) = req.attribution.into_parts();
    let request: SaveGroupsRequest = SaveGroupsRequest {
        changes: req.changes,
    };
    let mut persistence = app_state.persistence.lock().await;
    let response: SaveGroupsResponse =
        save_groups(&mut persistence, &event_id, request, actor, cause)?;
    drop(persistence);

    app_state.broadcaster.broadcast(&LiveEvent::GroupsSaved {
        event_id,
        changed: response.changed.clone(),
    });
    Ok(Json(response))
}

/// Handler for GET `/events/{event_id}/audit`.
async fn handle_get_audit_trail(
    AxumState(app_state): AxumState<AppState>,
    Path(event_id): Path<String>,
    Query(query): Query<AuditTrailQuery>,
) -> Result<Json<GetAuditTrailResponse>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    Ok(Json(get_audit_trail(
        &mut persistence,
        &event_id,
        query.registration_id.as_deref(),
    )?))
}

/// Builds the application router with all endpoints.
fn build_router(app_state: AppState) -> Router {
    Router::new()
        .route("/events", post(handle_create_event))
        .route("/events/{event_id}", get(handle_get_event))
        .route(
            "/events/{event_id}/registrations",
            get(handle_list_registrations).post(handle_create_registration),
        )
        .route("/events/{event_id}/selection", get(handle_get_selection))
        .route("/events/{event_id}/moves", post(handle_evaluate_move))
        .route("/events/{event_id}/groups", post(handle_save_groups))
        .route("/events/{event_id}/audit", get(handle_get_audit_trail))
        .route("/live", get(live_events_handler))
        .with_state(app_state)
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Args = Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    info!("Initializing Koekalenteri server");

    let persistence: Persistence = if let Some(db_path) = &args.database {
        info!("Using file-based database at: {}", db_path);
        Persistence::new_with_file(db_path)?
    } else {
        info!("Using in-memory database");
        Persistence::new_in_memory()?
    };

    let app_state: AppState = AppState {
        persistence: Arc::new(Mutex::new(persistence)),
        broadcaster: Arc::new(LiveEventBroadcaster::new()),
    };

    let app: Router = build_router(app_state);

    let addr: std::net::SocketAddr = format!("{}:{}", args.bind, args.port).parse()?;
    info!("Server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
