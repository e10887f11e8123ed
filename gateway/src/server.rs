use async_graphql::http::GraphiQLSource;
use async_graphql_axum::{GraphQLRequest, GraphQLResponse, GraphQLSubscription};
use axum::{
    extract::{MatchedPath, Request, State},
    http::{
        header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE},
        HeaderValue, Method, StatusCode,
    },
    middleware::{self, Next},
    response::{Html, IntoResponse, Response},
    routing::get,
    Router,
};
use metrics_exporter_prometheus::PrometheusHandle;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::{
    config::GatewayConfig, context::RequestContext, error::GatewayError, metrics::GatewayMetrics,
    schema::GatewaySchema,
};

const GRAPHQL_PATH: &str = "/graphql";
const GRAPHQL_WS_PATH: &str = "/graphql/ws";
const GRAPHIQL_TITLE: &str = "Crypto Tracker GraphQL";

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub schema: GatewaySchema,
    pub metrics: GatewayMetrics,
    /// Set once the telemetry SDK has installed its recorder
    pub prometheus: Option<PrometheusHandle>,
}

pub fn router(state: AppState, config: &GatewayConfig) -> Result<Router, GatewayError> {
    let origin = HeaderValue::from_str(&config.app_url)
        .map_err(|_| GatewayError::InvalidOrigin(config.app_url.clone()))?;

    // credentials rule out wildcard methods and headers
    let cors = CorsLayer::new()
        .allow_origin(origin)
        .allow_credentials(true)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([CONTENT_TYPE, AUTHORIZATION, ACCEPT]);

    let app = Router::new()
        .route(GRAPHQL_PATH, get(graphiql).post(graphql_handler))
        .route_service(
            GRAPHQL_WS_PATH,
            GraphQLSubscription::new(state.schema.clone()),
        )
        .route("/health", get(health_check))
        .route("/metrics", get(metrics_handler))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            track_requests,
        ))
        .with_state(state)
        .layer(cors)
        .layer(TraceLayer::new_for_http());

    Ok(app)
}

async fn graphql_handler(State(state): State<AppState>, req: GraphQLRequest) -> GraphQLResponse {
    let request = req.into_inner().data(RequestContext::new());
    state.schema.execute(request).await.into()
}

async fn graphiql() -> impl IntoResponse {
    Html(
        GraphiQLSource::build()
            .endpoint(GRAPHQL_PATH)
            .subscription_endpoint(GRAPHQL_WS_PATH)
            .title(GRAPHIQL_TITLE)
            .finish(),
    )
}

async fn health_check() -> &'static str {
    "OK"
}

async fn metrics_handler(State(state): State<AppState>) -> Response {
    match &state.prometheus {
        Some(handle) => handle.render().into_response(),
        None => (StatusCode::SERVICE_UNAVAILABLE, "metrics recorder not installed").into_response(),
    }
}

/// Count every routed request by route, method and status
async fn track_requests(State(state): State<AppState>, req: Request, next: Next) -> Response {
    let route = req
        .extensions()
        .get::<MatchedPath>()
        .map(|path| path.as_str().to_string())
        .unwrap_or_else(|| req.uri().path().to_string());
    let method = req.method().clone();

    let response = next.run(req).await;
    state
        .metrics
        .record_http_request(&route, method.as_str(), response.status().as_u16());

    response
}

/// Serve until SIGINT or SIGTERM
pub async fn serve(config: &GatewayConfig, state: AppState) -> Result<(), GatewayError> {
    let app = router(state, config)?;

    let listener = tokio::net::TcpListener::bind(config.bind_address()).await?;
    tracing::info!(
        "GraphQL server running at http://{}{}",
        listener.local_addr()?,
        GRAPHQL_PATH
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server closed");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to listen for SIGINT");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => tracing::info!("SIGINT received, shutting down gracefully..."),
        _ = terminate => tracing::info!("SIGTERM received, shutting down gracefully..."),
    }
}
