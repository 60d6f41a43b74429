// src/routes/mod.rs
pub mod admin;
pub mod chat;
pub mod species;
pub mod visualization;

use crate::state::SharedState;
use axum::{
    Router,
    extract::{Request, State},
    http::StatusCode,
    middleware::{self, Next},
    response::Response,
    routing::{get, post},
};
use tower_http::trace::TraceLayer;

pub fn create_router(state: SharedState) -> Router {
    let admin_routes = Router::new()
        .route("/metrics", get(admin::get_metrics_handler))
        .layer(middleware::from_fn_with_state(state.clone(), auth_middleware));

    let api_routes = Router::new()
        .route("/chat", post(chat::chat_handler))
        .route("/species", get(species::search_species_handler))
        .route("/species/{id}", get(species::get_species_handler))
        .route("/users", get(species::list_users_handler))
        .route(
            "/visualization/animal-speeds",
            get(visualization::animal_speeds_handler),
        );

    Router::new()
        .nest("/api", api_routes)
        .nest("/admin", admin_routes)
        .route("/health", get(|| async { "OK" }))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn auth_middleware(
    State(state): State<SharedState>,
    req: Request,
    next: Next,
) -> Result<Response, StatusCode> {
    // No configured key keeps the admin routes closed.
    let Some(expected) = state.admin_api_key.as_deref() else {
        return Err(StatusCode::UNAUTHORIZED);
    };
    match req.headers().get("x-admin-key") {
        Some(val) if val.as_bytes() == expected.as_bytes() => Ok(next.run(req).await),
        _ => Err(StatusCode::UNAUTHORIZED),
    }
}
