use std::net::SocketAddr;
use std::path::PathBuf;

use axum::extract::{Query, State};
use axum::http::{HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use clap::Parser;
use http::header::CONTENT_TYPE;
use incentives::endpoint::{validate_state, INCENTIVES_PATH};
use incentives::{ApiConfig, ApiError, IncentivesClient, PublicConfig};
use serde::Deserialize;
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

/// Serves the map page, its runtime config and an incentives API proxy.
#[derive(Debug, Parser)]
#[command(name = "map_server")]
struct Args {
    #[arg(long, env = "MAP_ADDR", default_value = "127.0.0.1:9200")]
    addr: SocketAddr,

    /// Directory holding index.html, the wasm package and the GeoJSON boundaries.
    #[arg(long, env = "ASSETS_ROOT", default_value = "crates/apps/viewer_web/assets")]
    assets_root: PathBuf,
}

#[derive(Clone)]
struct AppState {
    public: PublicConfig,
    client: IncentivesClient,
}

impl AppState {
    fn new(config: &ApiConfig) -> Self {
        Self {
            public: config.public(),
            client: IncentivesClient::new(config),
        }
    }
}

#[derive(Debug, Deserialize)]
struct IncentivesQuery {
    state: String,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let args = Args::parse();
    let config = match ApiConfig::from_env() {
        Ok(config) => config,
        Err(err) => {
            error!("configuration error: {err}");
            std::process::exit(1);
        }
    };

    let app = router(AppState::new(&config), &args.assets_root);

    info!(
        "map server listening on http://{} (api {})",
        args.addr,
        config.api_base()
    );
    let listener = match tokio::net::TcpListener::bind(args.addr).await {
        Ok(listener) => listener,
        Err(err) => {
            error!("bind {} failed: {err}", args.addr);
            std::process::exit(1);
        }
    };
    if let Err(err) = axum::serve(listener, app).await {
        error!("server stopped: {err}");
        std::process::exit(1);
    }
}

fn router(state: AppState, assets_root: &std::path::Path) -> Router {
    Router::new()
        .route("/healthz", get(healthz))
        .route("/config.json", get(get_config))
        .route(INCENTIVES_PATH, get(get_incentives))
        .fallback_service(ServeDir::new(assets_root))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn healthz() -> Response {
    (StatusCode::OK, "ok").into_response()
}

async fn get_config(State(state): State<AppState>) -> Json<PublicConfig> {
    Json(state.public)
}

async fn get_incentives(
    State(state): State<AppState>,
    Query(query): Query<IncentivesQuery>,
) -> Response {
    if let Err(err) = validate_state(&query.state) {
        warn!("rejected incentives request: {err}");
        return incentives_error(&err);
    }
    match state.client.fetch_raw(&query.state).await {
        Ok(upstream) => relay_incentives(&query.state, upstream).await,
        Err(err) => incentives_error(&err),
    }
}

/// Passes the incentives API answer through with its status and content type.
async fn relay_incentives(state: &str, upstream: reqwest::Response) -> Response {
    let status = upstream.status();
    if !status.is_success() {
        warn!(state, status = status.as_u16(), "incentives API rejected request");
    }
    let content_type = upstream
        .headers()
        .get(CONTENT_TYPE)
        .cloned()
        .unwrap_or_else(|| HeaderValue::from_static("application/json"));

    match upstream.bytes().await {
        Ok(body) => (status, [(CONTENT_TYPE, content_type)], body).into_response(),
        Err(err) => incentives_error(&ApiError::Transport(err.to_string())),
    }
}

fn incentives_error(err: &ApiError) -> Response {
    match err {
        ApiError::InvalidState(_) => (StatusCode::BAD_REQUEST, err.to_string()).into_response(),
        ApiError::Status { status, .. } => {
            let status = StatusCode::from_u16(*status).unwrap_or(StatusCode::BAD_GATEWAY);
            (status, err.to_string()).into_response()
        }
        ApiError::Transport(_) | ApiError::Decode(_) => {
            error!("incentives API unavailable: {err}");
            (StatusCode::BAD_GATEWAY, "incentives API unavailable").into_response()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn state_for(api_url: &str) -> AppState {
        let config = ApiConfig::from_lookup(|var| match var {
            "API_URL" => Some(api_url.to_string()),
            "MAPTILER_API_KEY" => Some("test-key".to_string()),
            _ => None,
        })
        .expect("config");
        AppState::new(&config)
    }

    fn test_state() -> AppState {
        state_for("http://127.0.0.1:9/")
    }

    async fn body_of(resp: Response) -> (StatusCode, Vec<u8>) {
        let status = resp.status();
        let body = axum::body::to_bytes(resp.into_body(), usize::MAX)
            .await
            .expect("body");
        (status, body.to_vec())
    }

    async fn incentives_for(state: &str) -> (StatusCode, Vec<u8>) {
        let query = IncentivesQuery {
            state: state.to_string(),
        };
        body_of(get_incentives(State(test_state()), Query(query)).await).await
    }

    #[tokio::test]
    async fn health_check_answers_ok() {
        let (status, body) = body_of(healthz().await).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, b"ok".to_vec());
    }

    #[tokio::test]
    async fn serves_public_config() {
        let Json(config) = get_config(State(test_state())).await;
        assert_eq!(
            config,
            PublicConfig {
                api_url: "http://127.0.0.1:9".to_string(),
                style_url: "https://api.maptiler.com/maps/streets-v2/style.json?key=test-key"
                    .to_string(),
            }
        );
    }

    #[tokio::test]
    async fn rejects_malformed_state_before_proxying() {
        let (status, body) = incentives_for("texas").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(
            String::from_utf8(body).expect("utf8"),
            "not a state abbreviation: \"texas\""
        );
    }

    #[tokio::test]
    async fn unreachable_upstream_is_bad_gateway() {
        let (status, body) = incentives_for("TX").await;
        assert_eq!(status, StatusCode::BAD_GATEWAY);
        assert_eq!(body, b"incentives API unavailable".to_vec());
    }

    /// Local stand-in for the incentives API: CA has an empty list, other states 404.
    async fn spawn_incentives_api() -> String {
        let app = Router::new().route(
            INCENTIVES_PATH,
            get(|Query(query): Query<IncentivesQuery>| async move {
                if query.state == "CA" {
                    (
                        [(CONTENT_TYPE, "application/json")],
                        r#"{"incentives":[]}"#,
                    )
                        .into_response()
                } else {
                    (StatusCode::NOT_FOUND, "unknown state").into_response()
                }
            }),
        );
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind");
        let addr = listener.local_addr().expect("addr");
        tokio::spawn(async move {
            axum::serve(listener, app).await.expect("serve");
        });
        format!("http://{addr}")
    }

    #[tokio::test]
    async fn relays_incentives_body_and_content_type() {
        let base = spawn_incentives_api().await;
        let query = IncentivesQuery {
            state: "CA".to_string(),
        };
        let resp = get_incentives(State(state_for(&base)), Query(query)).await;
        assert_eq!(
            resp.headers().get(CONTENT_TYPE),
            Some(&HeaderValue::from_static("application/json"))
        );
        let (status, body) = body_of(resp).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, br#"{"incentives":[]}"#.to_vec());
    }

    #[tokio::test]
    async fn relays_upstream_rejections() {
        let base = spawn_incentives_api().await;
        let query = IncentivesQuery {
            state: "TX".to_string(),
        };
        let (status, body) =
            body_of(get_incentives(State(state_for(&base)), Query(query)).await).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body, b"unknown state".to_vec());
    }

    #[test]
    fn router_builds_with_missing_assets_dir() {
        let _ = router(test_state(), std::path::Path::new("does-not-exist"));
    }
}
