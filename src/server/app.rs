use anyhow::{anyhow, Result};
use async_graphql::http::{playground_source, GraphQLPlaygroundConfig, ALL_WEBSOCKET_PROTOCOLS};
use async_graphql::Data;
use async_graphql_axum::{GraphQLProtocol, GraphQLRequest, GraphQLResponse, GraphQLWebSocket};
use axum::{
    extract::{State, WebSocketUpgrade},
    http::{HeaderMap, HeaderValue, Method},
    response::{Html, IntoResponse, Response},
    routing::get,
    Router,
};
use sea_orm::DatabaseConnection;
use serde_json::Value;
use tower::ServiceBuilder;
use tower_http::cors::{Any, CorsLayer};

use super::handlers::health;
use crate::auth::{bearer_token, BearerToken};
use crate::config::ServerConfig;
use crate::events::EventBus;
use crate::graphql::{build_schema, GraphQLContext, HackernewsSchema};

#[derive(Clone)]
pub struct AppState {
    pub graphql_schema: HackernewsSchema,
}

pub async fn create_app(db: DatabaseConnection, config: &ServerConfig) -> Result<Router> {
    let graphql_context = GraphQLContext::new(db, config.auth.clone(), EventBus::default());
    let state = AppState {
        graphql_schema: build_schema(graphql_context),
    };

    let cors = match config.cors_origin.as_deref() {
        Some(origin) => CorsLayer::new().allow_origin(
            origin
                .parse::<HeaderValue>()
                .map_err(|e| anyhow!("Invalid CORS origin: {}", e))?,
        ),
        None => CorsLayer::new().allow_origin(Any),
    }
    .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
    .allow_headers(Any)
    .allow_credentials(false);

    let app = Router::new()
        // Health check endpoint
        .route("/health", get(health::health_check))
        .route("/graphql", get(graphql_playground).post(graphql_handler))
        .route("/graphql/ws", get(graphql_ws_handler))
        .layer(ServiceBuilder::new().layer(cors))
        .with_state(state);

    Ok(app)
}

async fn graphql_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    req: GraphQLRequest,
) -> GraphQLResponse {
    let mut request = req.into_inner();
    if let Some(token) = bearer_token(&headers) {
        request = request.data(token);
    }

    tracing::debug!("GraphQL request received");
    state.graphql_schema.execute(request).await.into()
}

async fn graphql_playground() -> impl IntoResponse {
    Html(playground_source(
        GraphQLPlaygroundConfig::new("/graphql").subscription_endpoint("/graphql/ws"),
    ))
}

async fn graphql_ws_handler(
    State(state): State<AppState>,
    protocol: GraphQLProtocol,
    ws: WebSocketUpgrade,
) -> Response {
    let schema = state.graphql_schema.clone();

    ws.protocols(ALL_WEBSOCKET_PROTOCOLS)
        .on_upgrade(move |socket| {
            GraphQLWebSocket::new(socket, schema, protocol)
                .on_connection_init(on_connection_init)
                .serve()
        })
}

/// Subscriptions authenticate through the `connection_init` payload
async fn on_connection_init(payload: Value) -> async_graphql::Result<Data> {
    let mut data = Data::default();
    if let Some(token) = connection_token(&payload) {
        data.insert(token);
    }
    Ok(data)
}

fn connection_token(payload: &Value) -> Option<BearerToken> {
    ["Authorization", "authorization", "authToken"]
        .iter()
        .find_map(|key| payload.get(*key).and_then(Value::as_str))
        .and_then(BearerToken::parse)
}
