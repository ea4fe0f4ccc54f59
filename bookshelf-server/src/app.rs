use axum::{
    Router,
    http::{Method, header},
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::{AppState, routes};

pub fn create_app(state: AppState) -> Router {
    // Permissive in dev, read/create only otherwise
    let cors_layer = if state.config().dev_mode {
        CorsLayer::permissive()
    } else {
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods([Method::GET, Method::POST])
            .allow_headers([header::CONTENT_TYPE, header::ACCEPT])
            .expose_headers([header::LOCATION])
    };

    routes::create_api_router()
        .layer(cors_layer)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
