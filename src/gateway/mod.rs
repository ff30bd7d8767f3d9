//! HTTP gateway
//!
//! Axum router over the transfer engine and the backing stores. Every route
//! under `/api` requires basic-auth credentials from config; `/health` is
//! public.

pub mod handlers;
pub mod state;
pub mod types;

#[cfg(test)]
mod http_tests;

use std::sync::Arc;

use axum::{
    Router,
    body::Body,
    extract::State,
    http::{Request, StatusCode, header},
    middleware::{Next, from_fn_with_state},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64;
use tokio::net::TcpListener;
use tracing::{info, warn};

use state::AppState;
use types::{ApiError, error_codes};

fn unauthorized(code: i32, msg: &str) -> Response {
    let mut response = ApiError::new(StatusCode::UNAUTHORIZED, code, msg).into_response();
    response.headers_mut().insert(
        header::WWW_AUTHENTICATE,
        header::HeaderValue::from_static("Basic realm=\"stockroom\""),
    );
    response
}

/// Axum middleware enforcing `Authorization: Basic` credentials.
async fn basic_auth_middleware(
    State(state): State<Arc<AppState>>,
    request: Request<Body>,
    next: Next,
) -> Response {
    let Some(auth_header) = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
    else {
        return unauthorized(error_codes::MISSING_AUTH, "Missing Authorization header");
    };

    let Some(encoded) = auth_header.strip_prefix("Basic ") else {
        return unauthorized(error_codes::AUTH_FAILED, "Expected Basic authentication");
    };

    let credentials = BASE64
        .decode(encoded.trim())
        .ok()
        .and_then(|bytes| String::from_utf8(bytes).ok());
    let Some(credentials) = credentials else {
        return unauthorized(error_codes::AUTH_FAILED, "Malformed Basic credentials");
    };

    let Some((username, password)) = credentials.split_once(':') else {
        return unauthorized(error_codes::AUTH_FAILED, "Malformed Basic credentials");
    };

    if username != state.auth.username || password != state.auth.password {
        warn!(username, "Rejected API request with bad credentials");
        return unauthorized(error_codes::AUTH_FAILED, "Invalid credentials");
    }

    next.run(request).await
}

/// Build the full application router.
pub fn build_router(state: Arc<AppState>) -> Router {
    let transfer_routes = Router::new()
        .route(
            "/transfers",
            get(handlers::transfer::list_transfers).post(handlers::transfer::create_transfer),
        )
        .route(
            "/transfers/{id}",
            get(handlers::transfer::get_transfer)
                .put(handlers::transfer::update_transfer)
                .delete(handlers::transfer::delete_transfer),
        )
        .route(
            "/transfers/warehouse/{id}",
            get(handlers::transfer::list_by_warehouse),
        )
        .route(
            "/transfers/product/{id}",
            get(handlers::transfer::list_by_product),
        )
        .route(
            "/transfers/status/{status}",
            get(handlers::transfer::list_by_status),
        )
        .route("/transfers/{id}/start", post(handlers::transfer::start_transfer))
        .route(
            "/transfers/{id}/complete",
            post(handlers::transfer::complete_transfer),
        )
        .route(
            "/transfers/{id}/cancel",
            post(handlers::transfer::cancel_transfer),
        );

    let catalog_routes = Router::new()
        .route(
            "/warehouses",
            get(handlers::catalog::list_warehouses).post(handlers::catalog::create_warehouse),
        )
        .route("/warehouses/{id}", get(handlers::catalog::get_warehouse))
        .route(
            "/products",
            get(handlers::catalog::list_products).post(handlers::catalog::create_product),
        )
        .route("/products/{id}", get(handlers::catalog::get_product));

    let stock_routes = Router::new()
        .route(
            "/stocks",
            get(handlers::stock::list_stocks).post(handlers::stock::create_stock),
        )
        .route("/stocks/low", get(handlers::stock::list_low_stocks))
        .route(
            "/stocks/product/{product_id}/warehouse/{warehouse_id}",
            get(handlers::stock::get_stock),
        );

    let api = transfer_routes
        .merge(catalog_routes)
        .merge(stock_routes)
        .layer(from_fn_with_state(state.clone(), basic_auth_middleware));

    Router::new()
        .route("/health", get(handlers::health::health_check))
        .nest("/api", api)
        .with_state(state)
}

/// Bind and serve until the process is stopped.
pub async fn serve(state: Arc<AppState>, host: &str, port: u16) -> anyhow::Result<()> {
    let app = build_router(state);

    let addr = format!("{host}:{port}");
    let listener = TcpListener::bind(&addr).await?;
    info!("Gateway listening on http://{addr}");

    axum::serve(listener, app).await?;
    Ok(())
}
