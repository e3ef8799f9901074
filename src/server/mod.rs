//! Server initialization and routing

use crate::api;
use crate::config::Config;
use crate::jwt::TokenCodec;
use crate::middleware::{
    authenticate, handle_panic, rate_limit_middleware, AuthState, RateLimiter,
};
use crate::repository::UserRepositoryImpl;
use crate::service::{Argon2PasswordHasher, UserService};
use anyhow::Result;
use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use sqlx::mysql::MySqlPoolOptions;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tower_http::{
    catch_panic::CatchPanicLayer,
    cors::{Any, CorsLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};
use tracing::info;

const REQUEST_TIMEOUT_SECS: u64 = 30;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub user_service: Arc<UserService>,
    pub token_codec: Arc<TokenCodec>,
}

/// Build the full router. Layer order matters: the panic barrier is
/// outermost so that a panic anywhere below it still yields a well-formed
/// 500, and the rate limiter sits outside authentication so rejected
/// requests never touch token verification.
pub fn build_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let auth_state = AuthState::new(
        state.token_codec.clone(),
        &state.config.signature.secret,
    );
    let rate_limiter = Arc::new(RateLimiter::new(&state.config.rate_limit));

    let protected = Router::new()
        .route("/api/v1/users/me", get(api::user::current_user))
        .route(
            "/api/v1/users/{uuid}",
            get(api::user::get_user).put(api::user::update_user),
        )
        .route_layer(middleware::from_fn_with_state(auth_state, authenticate));

    Router::new()
        .route("/health", get(api::health::health))
        .route("/api/v1/auth/login", post(api::auth::login))
        .route("/api/v1/auth/register", post(api::auth::register))
        .merge(protected)
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .layer(TimeoutLayer::new(Duration::from_secs(REQUEST_TIMEOUT_SECS)))
        .layer(middleware::from_fn_with_state(
            rate_limiter,
            rate_limit_middleware,
        ))
        .layer(CatchPanicLayer::custom(handle_panic))
}

pub async fn run(config: Config) -> Result<()> {
    let db_pool = MySqlPoolOptions::new()
        .max_connections(config.database.max_connections)
        .min_connections(config.database.min_connections)
        .connect(&config.database.url)
        .await?;

    info!("Connected to database");

    let token_codec = Arc::new(TokenCodec::new(&config.jwt));
    let user_service = Arc::new(UserService::new(
        Arc::new(UserRepositoryImpl::new(db_pool)),
        Arc::new(Argon2PasswordHasher),
        token_codec.clone(),
    ));

    let http_addr = config.http_addr();
    let state = AppState {
        config: Arc::new(config),
        user_service,
        token_codec,
    };

    let app = build_router(state);

    let listener = TcpListener::bind(&http_addr).await?;
    info!("HTTP server started on {}", http_addr);
    axum::serve(listener, app).await?;

    Ok(())
}
