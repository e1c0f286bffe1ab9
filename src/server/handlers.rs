//! Request handlers
//!
//! Every rejection from the core maps to the same 400 response; the specific
//! error is only logged.

use crate::entry::EntryRequest;
use crate::error::CookbookError;
use crate::name::canonicalize;
use crate::server::ServerState;
use axum::{
    Json,
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use tracing::{debug, error, info};

/// Request body for `POST /parse`
#[derive(Debug, Deserialize)]
pub struct ParseRequest {
    #[serde(default)]
    pub input: String,
}

/// Response for `POST /parse`
#[derive(Debug, Serialize)]
pub struct ParseResponse {
    pub msg: String,
}

/// Query for `GET /summary`
#[derive(Debug, Deserialize)]
pub struct SummaryQuery {
    pub name: Option<String>,
}

fn error_found() -> Response {
    (StatusCode::BAD_REQUEST, Json(json!({ "msg": "error found" }))).into_response()
}

fn rejected(what: &str, err: &CookbookError) -> Response {
    debug!("{} rejected: {}", what, err);
    error_found()
}

/// Canonicalize a name
///
/// POST /parse
pub async fn parse(Json(request): Json<ParseRequest>) -> Response {
    match canonicalize(&request.input) {
        Ok(name) => Json(ParseResponse {
            msg: name.into_string(),
        })
        .into_response(),
        Err(e) => {
            debug!("parse rejected: {}", e);
            (StatusCode::BAD_REQUEST, "this string is cooked").into_response()
        }
    }
}

/// Add an ingredient or recipe
///
/// POST /entry
pub async fn create_entry(
    State(state): State<ServerState>,
    Json(body): Json<Value>,
) -> Response {
    let request = match EntryRequest::from_json(&body) {
        Ok(request) => request,
        Err(e) => return rejected("entry", &e),
    };

    // Held across build and commit so two requests for the same name cannot
    // both pass the duplicate check.
    let mut store = state.store.write().await;
    let result = request.build(&store).and_then(|entry| {
        let name = entry.name().clone();
        let kind = entry.kind();
        store.commit(entry)?;
        Ok((name, kind))
    });

    match result {
        Ok((name, kind)) => {
            info!("Added {} {}", kind, name);
            (StatusCode::OK, Json(json!({}))).into_response()
        }
        Err(e) => rejected("entry", &e),
    }
}

/// Resolve a recipe into base ingredients and total cook time
///
/// GET /summary?name=
pub async fn summary(
    State(state): State<ServerState>,
    Query(query): Query<SummaryQuery>,
) -> Response {
    let Some(raw) = query.name else {
        debug!("summary rejected: missing name");
        return error_found();
    };
    let target = match canonicalize(&raw) {
        Ok(target) => target,
        Err(e) => return rejected("summary", &e),
    };

    // Resolution is CPU-bound and can run for up to `max_expansions` steps,
    // so it runs off the async workers with an owned read guard.
    let store = state.store.clone().read_owned().await;
    let resolver = state.resolver;
    let resolved = tokio::task::spawn_blocking(move || resolver.resolve(&target, &store)).await;

    match resolved {
        Ok(Ok(summary)) => (StatusCode::OK, Json(summary)).into_response(),
        Ok(Err(e)) => rejected("summary", &e),
        Err(e) => {
            error!("summary task failed: {}", e);
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}

/// Dump every entry, sorted by name
///
/// GET /entries
pub async fn list_entries(State(state): State<ServerState>) -> Response {
    let store = state.store.read().await;
    Json(store.entries()).into_response()
}
