use crate::{handlers, AppState};
use axum::{routing::get, Router};
use tower_http::trace::TraceLayer;

/// Build the `/users` API. The collection is reachable with and without the
/// trailing slash.
pub fn build_router(app_state: AppState) -> Router {
    Router::new()
        .route(
            "/users/",
            get(handlers::list_users_handler).post(handlers::create_user_handler),
        )
        .route(
            "/users",
            get(handlers::list_users_handler).post(handlers::create_user_handler),
        )
        .route(
            "/users/{id}",
            get(handlers::get_user_handler)
                .put(handlers::update_user_handler)
                .delete(handlers::delete_user_handler),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(app_state)
}
