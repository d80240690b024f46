// src/routes.rs

use axum::{
    Router,
    http::{HeaderValue, Method, header},
    middleware,
    routing::{get, post, put},
};
use tower_http::{cors::CorsLayer, set_header::SetResponseHeaderLayer, trace::TraceLayer};

use crate::{
    handlers::{auth, feed, messages, users},
    state::AppState,
    utils::jwt::session_middleware,
};

/// Assembles the main application router.
///
/// * Merges all sub-routers (auth, users, messages, feed).
/// * Applies global middleware (Session, Trace, CORS, no-store caching).
/// * Injects global state (Database Pool, Config).
pub fn create_router(state: AppState) -> Router {
    let origins = [
        HeaderValue::from_static("http://localhost:3000"),
        HeaderValue::from_static("http://127.0.0.1:3000"),
    ];

    let cors = CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE]);

    let auth_routes = Router::new()
        .route("/signup", post(auth::signup))
        .route("/login", post(auth::login))
        .route("/logout", post(auth::logout));

    let user_routes = Router::new()
        .route("/", get(users::list_users))
        .route("/profile", put(users::edit_profile))
        .route("/delete", post(users::delete_user))
        .route("/follow/{id}", post(users::start_following))
        .route("/stop-following/{id}", post(users::stop_following))
        .route("/{id}", get(users::show_user))
        .route("/{id}/messages", get(users::show_messages))
        .route("/{id}/following", get(users::show_following))
        .route("/{id}/followers", get(users::show_followers))
        .route("/{id}/likes", get(users::show_liked_messages));

    let message_routes = Router::new()
        .route("/", post(messages::add_message))
        .route(
            "/{id}",
            get(messages::show_message).delete(messages::delete_message),
        )
        .route("/{id}/like", post(messages::toggle_like));

    Router::new()
        .nest("/api/auth", auth_routes)
        .nest("/api/users", user_routes)
        .nest("/api/messages", message_routes)
        .route("/api/feed", get(feed::homepage))
        // Global Middleware (applied from outside in)
        .layer(middleware::from_fn_with_state(
            state.clone(),
            session_middleware,
        ))
        .layer(SetResponseHeaderLayer::overriding(
            header::CACHE_CONTROL,
            HeaderValue::from_static("no-store"),
        ))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
