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

use axum::{
    Json, Router,
    extract::{Path, Query, State as AxumState},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use clap::Parser;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use time::Date;
use time::format_description::well_known::Rfc3339;
use tokio::sync::Mutex;
use tracing::{error, info};

use kerbside_api::{
    ApiError, AssignRunRequest, AuthenticatedActor, BulkReassignRequest, BulkReassignResponse,
    CheckPostcodeRequest, CheckPostcodeResponse, CreateSubscriptionRequest,
    CreateSubscriptionResponse, CsvImportSummary, CsvRowPreview, DailyRunInfo, DueCountResponse,
    EnsureRunRequest, IssueInfo, OpenIssueRequest, OpenIssueResponse, OverrideNextRequest,
    PauseSubscriptionRequest, RecordCollectionRequest, RecordCollectionResponse,
    ResolveIssueRequest, ResolveIssueResponse, Role, RouteAreaInfo, SubscriptionInfo,
    UndoCollectionResponse, authenticate_stub,
};
use kerbside_domain::{parse_ymd, today_in_operational_zone};
use kerbside_persistence::{Persistence, PersistenceError};

/// Kerbside Server - HTTP server for the Kerbside Collections engine
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the `SQLite` database file. If not provided, uses in-memory database.
    #[arg(short, long)]
    database: Option<String>,

    /// Port to bind the server to
    #[arg(short, long, default_value_t = 3000)]
    port: u16,
}

/// Application state shared across handlers.
///
/// The persistence layer is a single Diesel connection behind a Mutex;
/// the daily-run uniqueness invariant is still owned by the database's
/// unique index, so multi-process deployments stay correct.
#[derive(Clone)]
struct AppState {
    /// The persistence layer for the scheduling engine.
    persistence: Arc<Mutex<Persistence>>,
}

/// Actor fields common to every staff-initiated request.
#[derive(Debug, Clone, Deserialize, Serialize)]
struct ActorFields {
    /// The actor ID performing this action.
    actor_id: String,
    /// The role of the actor (`ops` or `driver`).
    actor_role: String,
}

/// API request for recording a collection.
#[derive(Debug, Clone, Deserialize, Serialize)]
struct RecordCollectionApiRequest {
    #[serde(flatten)]
    actor: ActorFields,
    /// The date the collection happened (`YYYY-MM-DD`).
    collected_date: String,
}

/// API request for staff actions that carry no other fields.
#[derive(Debug, Clone, Deserialize, Serialize)]
struct ActorOnlyApiRequest {
    #[serde(flatten)]
    actor: ActorFields,
}

/// API request for pausing a subscription.
#[derive(Debug, Clone, Deserialize, Serialize)]
struct PauseApiRequest {
    #[serde(flatten)]
    actor: ActorFields,
    /// The pause window start (inclusive).
    pause_from: String,
    /// The pause window end (inclusive).
    pause_to: String,
}

/// API request for overriding the next collection date.
#[derive(Debug, Clone, Deserialize, Serialize)]
struct OverrideNextApiRequest {
    #[serde(flatten)]
    actor: ActorFields,
    /// The new next collection date.
    next_collection_date: String,
}

/// API request for finding or creating a daily run.
#[derive(Debug, Clone, Deserialize, Serialize)]
struct EnsureRunApiRequest {
    #[serde(flatten)]
    actor: ActorFields,
    /// The date the run goes out.
    run_date: String,
    /// The route day (full English name).
    route_day: String,
    /// The route area name.
    route_area: String,
    /// The route slot; absent or empty means `ANY`.
    #[serde(default)]
    route_slot: String,
}

/// API request for attaching a vehicle and staff to a run.
#[derive(Debug, Clone, Deserialize, Serialize)]
struct AssignRunApiRequest {
    #[serde(flatten)]
    actor: ActorFields,
    /// The vehicle registration, if any.
    vehicle: Option<String>,
    /// The staff members on the run.
    staff: Vec<String>,
}

/// API request for a bulk reassignment batch.
#[derive(Debug, Clone, Deserialize, Serialize)]
struct BulkReassignApiRequest {
    #[serde(flatten)]
    actor: ActorFields,
    /// Maximum rows to scan; clamped to 500.
    #[serde(skip_serializing_if = "Option::is_none")]
    limit: Option<usize>,
    /// Report planned changes without writing anything.
    dry_run: bool,
    /// Overwrite rows that already have a route assigned.
    force: bool,
    /// Recompute the next collection date even on an unchanged route.
    recompute_next: bool,
    /// Status labels to include; defaults to active and trialing.
    #[serde(skip_serializing_if = "Option::is_none")]
    statuses: Option<Vec<String>>,
}

/// API request for raising an issue against a run.
#[derive(Debug, Clone, Deserialize, Serialize)]
struct OpenIssueApiRequest {
    #[serde(flatten)]
    actor: ActorFields,
    /// The subscription the stop belongs to, when known.
    #[serde(skip_serializing_if = "Option::is_none")]
    subscription_id: Option<i64>,
    /// The reason category.
    reason: String,
    /// Free-text details.
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<String>,
}

/// API request for resolving an issue.
#[derive(Debug, Clone, Deserialize, Serialize)]
struct ResolveIssueApiRequest {
    #[serde(flatten)]
    actor: ActorFields,
    /// The action taken (must be non-empty).
    action: String,
    /// The outcome of the resolution.
    outcome: String,
}

/// API request for previewing or importing a route catalogue sheet.
#[derive(Debug, Clone, Deserialize, Serialize)]
struct CatalogueSheetApiRequest {
    /// Actor fields; required for import, ignored for preview.
    #[serde(flatten)]
    actor: ActorFields,
    /// The CSV sheet contents.
    csv: String,
}

/// Query parameters for the postcode check endpoint.
#[derive(Debug, Deserialize)]
struct PostcodeQuery {
    /// The postcode to check.
    postcode: String,
}

/// Query parameters for date-scoped run endpoints.
#[derive(Debug, Deserialize)]
struct RunDateQuery {
    /// The run date (`YYYY-MM-DD`).
    date: String,
}

/// Query parameters for the route catalogue listing.
#[derive(Debug, Deserialize)]
struct CatalogueQuery {
    /// Whether deactivated routes are included.
    #[serde(default)]
    include_inactive: bool,
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
            ApiError::AuthenticationFailed { .. } => StatusCode::UNAUTHORIZED,
            ApiError::Unauthorized { .. } => StatusCode::FORBIDDEN,
            ApiError::InvalidInput { .. } => StatusCode::BAD_REQUEST,
            ApiError::ResourceNotFound { .. } => StatusCode::NOT_FOUND,
            ApiError::Conflict { .. } => StatusCode::CONFLICT,
            ApiError::DataIntegrity { .. } | ApiError::Internal { .. } => {
                error!(error = %err, "Internal API error");
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };
        Self {
            status,
            message: err.to_string(),
        }
    }
}

impl From<PersistenceError> for HttpError {
    fn from(err: PersistenceError) -> Self {
        error!(error = %err, "Persistence error");
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: format!("Persistence error: {err}"),
        }
    }
}

/// Parses a role string into a Role enum.
fn parse_role(role_str: &str) -> Result<Role, HttpError> {
    match role_str.to_lowercase().as_str() {
        "ops" => Ok(Role::Ops),
        "driver" => Ok(Role::Driver),
        _ => Err(HttpError {
            status: StatusCode::BAD_REQUEST,
            message: format!("Invalid role: '{role_str}'. Must be 'ops' or 'driver'"),
        }),
    }
}

/// Authenticates the actor fields on a staff request.
fn resolve_actor(fields: &ActorFields) -> Result<AuthenticatedActor, HttpError> {
    let role: Role = parse_role(&fields.actor_role)?;
    authenticate_stub(fields.actor_id.clone(), role).map_err(|e| HttpError {
        status: StatusCode::UNAUTHORIZED,
        message: e.to_string(),
    })
}

/// Resolves "today" in the operational timezone.
fn operational_today() -> Result<Date, HttpError> {
    today_in_operational_zone().map_err(|e| HttpError {
        status: StatusCode::INTERNAL_SERVER_ERROR,
        message: e.to_string(),
    })
}

/// Parses a `YYYY-MM-DD` query date.
fn parse_query_date(value: &str) -> Result<Date, HttpError> {
    parse_ymd(value).map_err(|e| HttpError {
        status: StatusCode::BAD_REQUEST,
        message: e.to_string(),
    })
}

/// Current timestamp in RFC 3339 form for resolution records.
fn now_rfc3339() -> Result<String, HttpError> {
    time::OffsetDateTime::now_utc()
        .format(&Rfc3339)
        .map_err(|e| HttpError {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: format!("Failed to format timestamp: {e}"),
        })
}

/// Handler for GET `/postcode/check` endpoint.
async fn handle_check_postcode(
    AxumState(app_state): AxumState<AppState>,
    Query(query): Query<PostcodeQuery>,
) -> Result<Json<CheckPostcodeResponse>, HttpError> {
    info!(postcode = %query.postcode, "Handling check_postcode request");

    let today: Date = operational_today()?;
    let request: CheckPostcodeRequest = CheckPostcodeRequest {
        postcode: query.postcode,
    };

    let mut persistence = app_state.persistence.lock().await;
    let response: CheckPostcodeResponse =
        kerbside_api::check_postcode(&mut persistence, &request, today)?;
    drop(persistence);

    Ok(Json(response))
}

/// Handler for POST `/subscriptions` endpoint.
async fn handle_create_subscription(
    AxumState(app_state): AxumState<AppState>,
    Json(req): Json<CreateSubscriptionRequest>,
) -> Result<Json<CreateSubscriptionResponse>, HttpError> {
    info!(postcode = %req.postcode, "Handling create_subscription request");

    let today: Date = operational_today()?;

    let mut persistence = app_state.persistence.lock().await;
    let response: CreateSubscriptionResponse =
        kerbside_api::create_subscription(&mut persistence, req, today)?;
    drop(persistence);

    info!(
        subscription_id = response.subscription_id,
        in_area = response.in_area,
        "Successfully created subscription"
    );
    Ok(Json(response))
}

/// Handler for GET `/subscriptions/{subscription_id}` endpoint.
async fn handle_get_subscription(
    AxumState(app_state): AxumState<AppState>,
    Path(subscription_id): Path<i64>,
) -> Result<Json<SubscriptionInfo>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let response: SubscriptionInfo =
        kerbside_api::get_subscription(&mut persistence, subscription_id)?;
    drop(persistence);

    Ok(Json(response))
}

/// Handler for POST `/subscriptions/{subscription_id}/collect` endpoint.
async fn handle_record_collection(
    AxumState(app_state): AxumState<AppState>,
    Path(subscription_id): Path<i64>,
    Json(req): Json<RecordCollectionApiRequest>,
) -> Result<Json<RecordCollectionResponse>, HttpError> {
    info!(
        subscription_id,
        actor_id = %req.actor.actor_id,
        collected_date = %req.collected_date,
        "Handling record_collection request"
    );

    let actor: AuthenticatedActor = resolve_actor(&req.actor)?;
    let request: RecordCollectionRequest = RecordCollectionRequest {
        collected_date: req.collected_date,
    };

    let mut persistence = app_state.persistence.lock().await;
    let response: RecordCollectionResponse =
        kerbside_api::record_collection(&mut persistence, subscription_id, &request, &actor)?;
    drop(persistence);

    Ok(Json(response))
}

/// Handler for POST `/subscriptions/{subscription_id}/undo_collection` endpoint.
async fn handle_undo_collection(
    AxumState(app_state): AxumState<AppState>,
    Path(subscription_id): Path<i64>,
    Json(req): Json<ActorOnlyApiRequest>,
) -> Result<Json<UndoCollectionResponse>, HttpError> {
    info!(
        subscription_id,
        actor_id = %req.actor.actor_id,
        "Handling undo_collection request"
    );

    let actor: AuthenticatedActor = resolve_actor(&req.actor)?;

    let mut persistence = app_state.persistence.lock().await;
    let response: UndoCollectionResponse =
        kerbside_api::undo_last_collection(&mut persistence, subscription_id, &actor)?;
    drop(persistence);

    Ok(Json(response))
}

/// Handler for POST `/subscriptions/{subscription_id}/pause` endpoint.
async fn handle_pause_subscription(
    AxumState(app_state): AxumState<AppState>,
    Path(subscription_id): Path<i64>,
    Json(req): Json<PauseApiRequest>,
) -> Result<Json<SubscriptionInfo>, HttpError> {
    let actor: AuthenticatedActor = resolve_actor(&req.actor)?;
    let request: PauseSubscriptionRequest = PauseSubscriptionRequest {
        pause_from: req.pause_from,
        pause_to: req.pause_to,
    };

    let mut persistence = app_state.persistence.lock().await;
    let response: SubscriptionInfo =
        kerbside_api::pause_subscription(&mut persistence, subscription_id, &request, &actor)?;
    drop(persistence);

    Ok(Json(response))
}

/// Handler for POST `/subscriptions/{subscription_id}/cancel` endpoint.
async fn handle_cancel_subscription(
    AxumState(app_state): AxumState<AppState>,
    Path(subscription_id): Path<i64>,
    Json(req): Json<ActorOnlyApiRequest>,
) -> Result<Json<SubscriptionInfo>, HttpError> {
    let actor: AuthenticatedActor = resolve_actor(&req.actor)?;

    let mut persistence = app_state.persistence.lock().await;
    let response: SubscriptionInfo =
        kerbside_api::cancel_subscription(&mut persistence, subscription_id, &actor)?;
    drop(persistence);

    Ok(Json(response))
}

/// Handler for POST `/subscriptions/{subscription_id}/override_next` endpoint.
async fn handle_override_next(
    AxumState(app_state): AxumState<AppState>,
    Path(subscription_id): Path<i64>,
    Json(req): Json<OverrideNextApiRequest>,
) -> Result<Json<SubscriptionInfo>, HttpError> {
    let actor: AuthenticatedActor = resolve_actor(&req.actor)?;
    let request: OverrideNextRequest = OverrideNextRequest {
        next_collection_date: req.next_collection_date,
    };

    let mut persistence = app_state.persistence.lock().await;
    let response: SubscriptionInfo = kerbside_api::override_next_collection(
        &mut persistence,
        subscription_id,
        &request,
        &actor,
    )?;
    drop(persistence);

    Ok(Json(response))
}

/// Handler for POST `/runs/ensure` endpoint.
async fn handle_ensure_run(
    AxumState(app_state): AxumState<AppState>,
    Json(req): Json<EnsureRunApiRequest>,
) -> Result<Json<DailyRunInfo>, HttpError> {
    info!(
        run_date = %req.run_date,
        route_area = %req.route_area,
        actor_id = %req.actor.actor_id,
        "Handling ensure_run request"
    );

    let actor: AuthenticatedActor = resolve_actor(&req.actor)?;
    let request: EnsureRunRequest = EnsureRunRequest {
        run_date: req.run_date,
        route_day: req.route_day,
        route_area: req.route_area,
        route_slot: req.route_slot,
    };

    let mut persistence = app_state.persistence.lock().await;
    let response: DailyRunInfo =
        kerbside_api::ensure_daily_run(&mut persistence, &request, &actor)?;
    drop(persistence);

    Ok(Json(response))
}

/// Handler for POST `/runs/{run_id}/assign` endpoint.
async fn handle_assign_run(
    AxumState(app_state): AxumState<AppState>,
    Path(run_id): Path<i64>,
    Json(req): Json<AssignRunApiRequest>,
) -> Result<Json<DailyRunInfo>, HttpError> {
    let actor: AuthenticatedActor = resolve_actor(&req.actor)?;
    let request: AssignRunRequest = AssignRunRequest {
        vehicle: req.vehicle,
        staff: req.staff,
    };

    let mut persistence = app_state.persistence.lock().await;
    let response: DailyRunInfo =
        kerbside_api::assign_run(&mut persistence, run_id, &request, &actor)?;
    drop(persistence);

    Ok(Json(response))
}

/// Handler for GET `/runs` endpoint.
async fn handle_list_runs(
    AxumState(app_state): AxumState<AppState>,
    Query(query): Query<RunDateQuery>,
) -> Result<Json<Vec<DailyRunInfo>>, HttpError> {
    let run_date: Date = parse_query_date(&query.date)?;

    let mut persistence = app_state.persistence.lock().await;
    let response: Vec<DailyRunInfo> = kerbside_api::list_runs(&mut persistence, run_date)?;
    drop(persistence);

    Ok(Json(response))
}

/// Handler for GET `/runs/due_count` endpoint.
async fn handle_due_count(
    AxumState(app_state): AxumState<AppState>,
    Query(query): Query<RunDateQuery>,
) -> Result<Json<DueCountResponse>, HttpError> {
    let run_date: Date = parse_query_date(&query.date)?;

    let mut persistence = app_state.persistence.lock().await;
    let response: DueCountResponse = kerbside_api::due_count(&mut persistence, run_date)?;
    drop(persistence);

    Ok(Json(response))
}

/// Handler for POST `/reassign` endpoint.
async fn handle_bulk_reassign(
    AxumState(app_state): AxumState<AppState>,
    Json(req): Json<BulkReassignApiRequest>,
) -> Result<Json<BulkReassignResponse>, HttpError> {
    info!(
        dry_run = req.dry_run,
        force = req.force,
        actor_id = %req.actor.actor_id,
        "Handling bulk_reassign request"
    );

    let actor: AuthenticatedActor = resolve_actor(&req.actor)?;
    let today: Date = operational_today()?;
    let request: BulkReassignRequest = BulkReassignRequest {
        limit: req.limit,
        dry_run: req.dry_run,
        force: req.force,
        recompute_next: req.recompute_next,
        statuses: req.statuses,
    };

    let mut persistence = app_state.persistence.lock().await;
    let response: BulkReassignResponse =
        kerbside_api::bulk_reassign(&mut persistence, &request, &actor, today)?;
    drop(persistence);

    Ok(Json(response))
}

/// Handler for POST `/runs/{run_id}/issues` endpoint.
async fn handle_open_issue(
    AxumState(app_state): AxumState<AppState>,
    Path(run_id): Path<i64>,
    Json(req): Json<OpenIssueApiRequest>,
) -> Result<Json<OpenIssueResponse>, HttpError> {
    let actor: AuthenticatedActor = resolve_actor(&req.actor)?;
    let request: OpenIssueRequest = OpenIssueRequest {
        subscription_id: req.subscription_id,
        reason: req.reason,
        details: req.details,
    };

    let mut persistence = app_state.persistence.lock().await;
    let response: OpenIssueResponse =
        kerbside_api::open_issue(&mut persistence, run_id, &request, &actor)?;
    drop(persistence);

    Ok(Json(response))
}

/// Handler for GET `/runs/{run_id}/issues` endpoint.
async fn handle_list_issues(
    AxumState(app_state): AxumState<AppState>,
    Path(run_id): Path<i64>,
) -> Result<Json<Vec<IssueInfo>>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let response: Vec<IssueInfo> = kerbside_api::list_issues_for_run(&mut persistence, run_id)?;
    drop(persistence);

    Ok(Json(response))
}

/// Handler for POST `/issues/{issue_id}/resolve` endpoint.
async fn handle_resolve_issue(
    AxumState(app_state): AxumState<AppState>,
    Path(issue_id): Path<i64>,
    Json(req): Json<ResolveIssueApiRequest>,
) -> Result<Json<ResolveIssueResponse>, HttpError> {
    let actor: AuthenticatedActor = resolve_actor(&req.actor)?;
    let resolved_at: String = now_rfc3339()?;
    let request: ResolveIssueRequest = ResolveIssueRequest {
        action: req.action,
        outcome: req.outcome,
    };

    let mut persistence = app_state.persistence.lock().await;
    let response: ResolveIssueResponse = kerbside_api::resolve_issue(
        &mut persistence,
        issue_id,
        &request,
        &actor,
        &resolved_at,
    )?;
    drop(persistence);

    Ok(Json(response))
}

/// Handler for GET `/route_areas` endpoint.
async fn handle_list_route_areas(
    AxumState(app_state): AxumState<AppState>,
    Query(query): Query<CatalogueQuery>,
) -> Result<Json<Vec<RouteAreaInfo>>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let response: Vec<RouteAreaInfo> =
        kerbside_api::list_route_areas(&mut persistence, query.include_inactive)?;
    drop(persistence);

    Ok(Json(response))
}

/// Handler for POST `/route_areas/preview` endpoint.
async fn handle_preview_catalogue(
    Json(req): Json<CatalogueSheetApiRequest>,
) -> Json<Vec<CsvRowPreview>> {
    Json(kerbside_api::preview_route_catalogue(&req.csv))
}

/// Handler for POST `/route_areas/import` endpoint.
async fn handle_import_catalogue(
    AxumState(app_state): AxumState<AppState>,
    Json(req): Json<CatalogueSheetApiRequest>,
) -> Result<Json<CsvImportSummary>, HttpError> {
    let actor: AuthenticatedActor = resolve_actor(&req.actor)?;

    let mut persistence = app_state.persistence.lock().await;
    let response: CsvImportSummary =
        kerbside_api::import_route_catalogue(&mut persistence, &req.csv, &actor)?;
    drop(persistence);

    Ok(Json(response))
}

/// Builds the application router with all endpoints.
fn build_router(app_state: AppState) -> Router {
    Router::new()
        .route("/postcode/check", get(handle_check_postcode))
        .route("/subscriptions", post(handle_create_subscription))
        .route("/subscriptions/{subscription_id}", get(handle_get_subscription))
        .route(
            "/subscriptions/{subscription_id}/collect",
            post(handle_record_collection),
        )
        .route(
            "/subscriptions/{subscription_id}/undo_collection",
            post(handle_undo_collection),
        )
        .route(
            "/subscriptions/{subscription_id}/pause",
            post(handle_pause_subscription),
        )
        .route(
            "/subscriptions/{subscription_id}/cancel",
            post(handle_cancel_subscription),
        )
        .route(
            "/subscriptions/{subscription_id}/override_next",
            post(handle_override_next),
        )
        .route("/runs", get(handle_list_runs))
        .route("/runs/ensure", post(handle_ensure_run))
        .route("/runs/due_count", get(handle_due_count))
        .route("/runs/{run_id}/assign", post(handle_assign_run))
        .route("/runs/{run_id}/issues", post(handle_open_issue))
        .route("/runs/{run_id}/issues", get(handle_list_issues))
        .route("/issues/{issue_id}/resolve", post(handle_resolve_issue))
        .route("/reassign", post(handle_bulk_reassign))
        .route("/route_areas", get(handle_list_route_areas))
        .route("/route_areas/preview", post(handle_preview_catalogue))
        .route("/route_areas/import", post(handle_import_catalogue))
        .with_state(app_state)
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Parse command-line arguments
    let args: Args = Args::parse();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    info!("Initializing Kerbside Server");

    // Initialize persistence (in-memory or file-based based on CLI argument)
    let persistence: Persistence = if let Some(db_path) = &args.database {
        info!("Using file-based database at: {}", db_path);
        Persistence::new_with_file(db_path)?
    } else {
        info!("Using in-memory database");
        Persistence::new_in_memory()?
    };

    let app_state: AppState = AppState {
        persistence: Arc::new(Mutex::new(persistence)),
    };

    // Build router
    let app: Router = build_router(app_state);

    // Bind to address
    let addr: std::net::SocketAddr = format!("127.0.0.1:{}", args.port).parse()?;
    info!("Server listening on {}", addr);

    // Run server
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
