use axum::{
    Router,
    routing::{get, patch, post},
};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

use super::handlers::{
    create_booking, decide_booking, get_booking, get_item_schedule, list_bookings,
    list_owner_bookings, AppState,
};

/// Creates the API router with all booking lifecycle endpoints
///
/// Command endpoints (Write operations):
/// - POST /bookings - Create a new booking
/// - PATCH /bookings/:id?approved= - Approve or reject a booking
///
/// Query endpoints (Read operations):
/// - GET /bookings - List the caller's bookings (as booker)
/// - GET /bookings/owner - List bookings on the caller's items
/// - GET /bookings/:id - Get booking details
/// - GET /items/:id/bookings - Last/next booking for an item
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        // Health check endpoint
        .route("/health", get(health_check))
        // Command endpoints (Write operations)
        .route("/bookings", post(create_booking).get(list_bookings))
        .route("/bookings/owner", get(list_owner_bookings))
        .route("/bookings/:id", patch(decide_booking).get(get_booking))
        // Item-detail composition
        .route("/items/:id/bookings", get(get_item_schedule))
        // Add tracing middleware
        .layer(TraceLayer::new_for_http())
        // Add application state
        .with_state(state)
}

/// Health check endpoint
async fn health_check() -> &'static str {
    "OK"
}
