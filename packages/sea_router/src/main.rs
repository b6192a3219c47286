use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::serve;
use axum::{Json, Router};
use sea_router::common::config::{
    CompareRequest, ServiceConfig, UserCompareQuery,
};
use sea_router::common::logging::{LoggingConfig, init_logging};
use sea_router::error::Error;
use sea_router::loading::load_network;
use sea_router::{ComparisonCache, Network};
use serde_json::json;
use std::time::Instant;
use tower_http::trace::TraceLayer;
use tracing::{error, info};

#[derive(Clone)]
struct AppState {
    network: Network,
    last_comparison: ComparisonCache,
}

/// Convert a query error into a JSON response with a matching status code
fn error_response(err: &Error) -> Response {
    let status = match err {
        Error::InvalidInput { .. } => StatusCode::BAD_REQUEST,
        Error::NotFound => StatusCode::SERVICE_UNAVAILABLE,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    };

    let json_response = json!({
        "status": "error",
        "kind": err.kind(),
        "message": err.to_string(),
    });

    (status, Json(json_response)).into_response()
}

async fn compare(
    State(state): State<AppState>,
    Query(query): Query<UserCompareQuery>,
) -> Response {
    let now = Instant::now();

    let request: CompareRequest = query.into();

    // Searches are CPU bound, keep them off the async worker threads. The
    // three algorithms still run one after another on the blocking thread
    let network = state.network.clone();
    let outcome = tokio::task::spawn_blocking(move || {
        network.compare_ports(&request)
    })
    .await;

    let response = match outcome {
        Ok(Ok(result)) => {
            state.last_comparison.replace(result.clone());
            (StatusCode::OK, Json(result)).into_response()
        }
        Ok(Err(err)) => error_response(&err),
        Err(join_err) => {
            error!(error = %join_err, "comparison task failed");
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    };

    info!(elapsed_ms = now.elapsed().as_millis() as u64, "compare handled");

    response
}

/// Time and memory figures from the most recent comparison, for charting
async fn analysis(State(state): State<AppState>) -> Response {
    match state.last_comparison.latest() {
        Some(result) => {
            let json_response = json!({
                "source": result.source,
                "destination": result.destination,
                "fastest": result.fastest,
                "metrics": result.metrics_table(),
            });
            (StatusCode::OK, Json(json_response)).into_response()
        }
        None => {
            let json_response = json!({
                "status": "error",
                "message": "No performance data available, run a comparison first",
            });
            (StatusCode::NOT_FOUND, Json(json_response)).into_response()
        }
    }
}

async fn ports(State(state): State<AppState>) -> impl IntoResponse {
    Json(state.network.ports().names().to_vec())
}

async fn health_check() -> impl IntoResponse {
    let json_response = json!({
        "status": "success",
        "message": "Hello World!"
    });

    Json(json_response)
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_logging(&LoggingConfig::from_env());

    let config = ServiceConfig::from_env()?;

    let network = match load_network(&config) {
        Ok(network) => network,
        Err(err) => {
            error!(error = %err, "failed to load the shipping network");
            return Err(err.into());
        }
    };

    let state = AppState {
        network,
        last_comparison: ComparisonCache::new(),
    };

    let router = Router::new()
        .route("/healthcheck", get(health_check))
        .route("/ports", get(ports))
        .route("/compare", get(compare))
        .route("/analysis", get(analysis))
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    info!(addr = %config.bind_addr, "listening");
    serve(listener, router).await?;

    Ok(())
}
