/// Application state and router builder
///
/// This module defines the shared application state and builds the Axum
/// router with all routes and middleware.
///
/// # Example
///
/// ```no_run
/// use draftforge_api::{app::AppState, config::Config, generate::GeminiGenerator};
/// use sqlx::PgPool;
/// use std::sync::Arc;
///
/// # async fn example() -> anyhow::Result<()> {
/// let config = Config::from_env()?;
/// let pool = PgPool::connect(&config.database.url).await?;
/// let generator = Arc::new(GeminiGenerator::new(&config.ai));
/// let state = AppState::new(pool, config, generator);
/// let app = draftforge_api::app::build_router(state);
/// # Ok(())
/// # }
/// ```

use crate::{config::Config, error::ApiError, generate::Generator, routes};
use axum::{
    extract::Request,
    middleware::Next,
    response::Response,
    routing::{get, post},
    Router,
};
use draftforge_shared::auth::token;
use sqlx::PgPool;
use std::sync::Arc;
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer},
};
use tracing::Level;

/// Identity of the authenticated caller, injected into request extensions
/// by the token middleware.
#[derive(Debug, Clone, Copy)]
pub struct CurrentUser {
    /// The verified user id from the token's subject claim
    pub user_id: i64,
}

/// Shared application state
///
/// Cloned for each request handler via Axum's `State` extractor. Everything
/// inside is read-only after startup.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool
    pub db: PgPool,

    /// Application configuration
    pub config: Arc<Config>,

    /// Content generation adapter
    pub generator: Arc<dyn Generator>,
}

impl AppState {
    /// Creates new application state.
    pub fn new(db: PgPool, config: Config, generator: Arc<dyn Generator>) -> Self {
        Self {
            db,
            config: Arc::new(config),
            generator,
        }
    }

    /// Gets the token signing secret.
    pub fn token_secret(&self) -> &str {
        &self.config.auth.token_secret
    }
}

/// Builds the complete Axum router with all routes and middleware
///
/// # Architecture
///
/// ```text
/// /
/// ├── /health                    # Health check (public)
/// ├── /auth/                     # Authentication (public)
/// │   ├── POST /register
/// │   └── POST /login
/// ├── /project/                  # Projects (token required)
/// │   ├── POST /create
/// │   ├── POST /:id/generate
/// │   ├── POST /:id/export
/// │   └── GET  /:id
/// └── /refine/                   # Refinement (token required)
///     ├── POST /
///     └── POST /feedback
/// ```
///
/// # Middleware Stack
///
/// Applied in order (bottom to top):
/// 1. Logging (tower-http TraceLayer)
/// 2. CORS (permissive; the frontend is served from a different origin)
/// 3. Token authentication (per-group, bare `token` header)
pub fn build_router(state: AppState) -> Router {
    // Health check (public, no auth)
    let health_routes = Router::new().route("/health", get(routes::health::health_check));

    // Auth routes (public, no auth required)
    let auth_routes = Router::new()
        .route("/register", post(routes::auth::register))
        .route("/login", post(routes::auth::login));

    // Project routes (require a valid token)
    let project_routes = Router::new()
        .route("/create", post(routes::project::create_project))
        .route("/:id/generate", post(routes::project::generate_all))
        .route("/:id/export", post(routes::project::export_project))
        .route("/:id", get(routes::project::get_project))
        .layer(axum::middleware::from_fn_with_state(
            state.clone(),
            token_auth_layer,
        ));

    // Refine routes (require a valid token)
    let refine_routes = Router::new()
        .route("/", post(routes::refine::refine))
        .route("/feedback", post(routes::refine::feedback))
        .layer(axum::middleware::from_fn_with_state(
            state.clone(),
            token_auth_layer,
        ));

    Router::new()
        .merge(health_routes)
        .nest("/auth", auth_routes)
        .nest("/project", project_routes)
        .nest("/refine", refine_routes)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Token authentication middleware layer
///
/// Reads the bare `token` header (no Bearer scheme), verifies it, and
/// injects [`CurrentUser`] into request extensions. Any verification
/// failure maps to the same 401.
async fn token_auth_layer(
    state: axum::extract::State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let token_value = req
        .headers()
        .get("token")
        .and_then(|v| v.to_str().ok())
        .ok_or_else(|| ApiError::Unauthorized("Missing token header".to_string()))?;

    let user_id = token::verify(token_value, state.token_secret())?;

    req.extensions_mut().insert(CurrentUser { user_id });

    Ok(next.run(req).await)
}
