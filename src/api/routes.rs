//! API Routes
//!
//! HTTP endpoint definitions. Each route runs one user action through the
//! shared `Dispatcher`.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;

use crate::actions::{Action, ActionOutcome, Dispatcher};
use crate::domain::ActivityEvent;
use crate::error::AppResult;

// =========================================================================
// Request/Response types
// =========================================================================

/// Body of a generic UI event
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct ActionRequest {
    /// Form inputs by element id, e.g. `{"ethAmount": "0.1"}`
    #[serde(default)]
    pub inputs: HashMap<String, String>,
    /// Shorthand for the amount input
    #[serde(default)]
    pub value: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct FundRequest {
    pub amount: String,
}

#[derive(Debug, Deserialize)]
pub struct ActivityQuery {
    #[serde(default = "default_limit")]
    pub limit: usize,
}

fn default_limit() -> usize {
    50
}

#[derive(Debug, Serialize)]
pub struct ActivityEntry {
    pub message: String,
    #[serde(flatten)]
    pub event: ActivityEvent,
}

#[derive(Debug, Serialize)]
pub struct ActivityResponse {
    pub entries: Vec<ActivityEntry>,
    pub total: usize,
}

type ActionResponse = (StatusCode, Json<ActionOutcome>);

// =========================================================================
// API Router
// =========================================================================

/// Create the API router
pub fn create_router() -> Router<Arc<Dispatcher>> {
    Router::new()
        .route("/actions/:element_id", post(dispatch_event))
        .route("/connect", post(connect))
        .route("/fund", post(fund))
        .route("/withdraw", post(withdraw))
        .route("/balance", get(balance))
        .route("/activity", get(activity))
}

/// A missing signing agent is a normal outcome, reported as 503
fn respond(outcome: ActionOutcome) -> ActionResponse {
    let status = if outcome.is_agent_missing() {
        StatusCode::SERVICE_UNAVAILABLE
    } else {
        StatusCode::OK
    };
    (status, Json(outcome))
}

// =========================================================================
// POST /actions/:element_id
// =========================================================================

async fn dispatch_event(
    State(dispatcher): State<Arc<Dispatcher>>,
    Path(element_id): Path<String>,
    request: Option<Json<ActionRequest>>,
) -> AppResult<ActionResponse> {
    let Json(request) = request.unwrap_or_default();

    let mut inputs = request.inputs;
    if let Some(value) = request.value {
        inputs.insert(dispatcher.bindings().amount_input().to_string(), value);
    }

    let outcome = dispatcher.dispatch_event(&element_id, &inputs).await?;
    Ok(respond(outcome))
}

// =========================================================================
// Direct action routes
// =========================================================================

async fn connect(State(dispatcher): State<Arc<Dispatcher>>) -> AppResult<ActionResponse> {
    Ok(respond(dispatcher.dispatch(Action::Connect).await?))
}

async fn fund(
    State(dispatcher): State<Arc<Dispatcher>>,
    Json(request): Json<FundRequest>,
) -> AppResult<ActionResponse> {
    let action = Action::Fund {
        amount: request.amount,
    };
    Ok(respond(dispatcher.dispatch(action).await?))
}

async fn withdraw(State(dispatcher): State<Arc<Dispatcher>>) -> AppResult<ActionResponse> {
    Ok(respond(dispatcher.dispatch(Action::Withdraw).await?))
}

async fn balance(State(dispatcher): State<Arc<Dispatcher>>) -> AppResult<ActionResponse> {
    Ok(respond(dispatcher.dispatch(Action::Balance).await?))
}

// =========================================================================
// GET /activity
// =========================================================================

async fn activity(
    State(dispatcher): State<Arc<Dispatcher>>,
    Query(query): Query<ActivityQuery>,
) -> Json<ActivityResponse> {
    let log = dispatcher.activity();
    let entries = log
        .recent(query.limit)
        .into_iter()
        .map(|event| ActivityEntry {
            message: event.message(),
            event,
        })
        .collect();

    Json(ActivityResponse {
        entries,
        total: log.len(),
    })
}
