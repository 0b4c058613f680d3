/// Application state and router builder
///
/// # Example
///
/// ```no_run
/// use teamreg_api::{app::{build_router, AppState}, config::Config};
/// use sqlx::PgPool;
///
/// # async fn example() -> anyhow::Result<()> {
/// let config = Config::from_env()?;
/// let pool = PgPool::connect(&config.database.url).await?;
/// let app = build_router(AppState::new(pool, config));
///
/// let listener = tokio::net::TcpListener::bind("0.0.0.0:8080").await?;
/// axum::serve(listener, app).await?;
/// # Ok(())
/// # }
/// ```

use crate::config::Config;
use axum::{
    http::{header, HeaderValue, Method},
    routing::{get, post},
    Router,
};
use sqlx::PgPool;
use std::sync::Arc;
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer},
};
use tracing::Level;

/// Shared application state
///
/// Cloned into every handler through Axum's `State` extractor. The pool is
/// the only shared resource; there is no in-process session state.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool
    pub db: PgPool,

    /// Application configuration
    pub config: Arc<Config>,
}

impl AppState {
    pub fn new(db: PgPool, config: Config) -> Self {
        Self {
            db,
            config: Arc::new(config),
        }
    }

    /// Whether identity cookies carry the `Secure` attribute
    pub fn secure_cookies(&self) -> bool {
        self.config.cookies.secure
    }
}

/// Builds the complete router
///
/// # Routes
///
/// ```text
/// /
/// ├── GET  /health
/// └── /api/
///     ├── POST /register
///     ├── POST /login
///     ├── POST /logout
///     ├── POST /get-id
///     ├── POST /create-team
///     ├── POST /get-teams
///     ├── POST /add-team-member
///     ├── POST /get-team-members
///     ├── POST /get-team-member-details
///     └── POST /upload-document?team_id=...
/// ```
///
/// Authentication is not a layer: every privileged handler reads the
/// identity cookies itself so it can report `logged_in=false` in its own
/// response shape.
pub fn build_router(state: AppState) -> Router {
    use crate::routes;

    let api_routes = Router::new()
        .route("/register", post(routes::auth::register))
        .route("/login", post(routes::auth::login))
        .route("/logout", post(routes::auth::logout))
        .route("/get-id", post(routes::auth::get_id))
        .route("/create-team", post(routes::teams::create_team))
        .route("/get-teams", post(routes::teams::get_teams))
        .route("/add-team-member", post(routes::teams::add_team_member))
        .route("/get-team-members", post(routes::teams::get_team_members))
        .route(
            "/get-team-member-details",
            post(routes::teams::get_team_member_details),
        )
        .route("/upload-document", post(routes::documents::upload_document));

    Router::new()
        .route("/health", get(routes::health::health_check))
        .nest("/api", api_routes)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(cors_layer(&state.config))
        .with_state(state)
}

/// `*` anywhere in `CORS_ORIGINS` allows every origin without credentials,
/// so browsers never attach identity cookies cross-origin. Credentials are
/// only allowed for explicitly listed origins.
fn cors_layer(config: &Config) -> CorsLayer {
    if config.api.cors_origins.iter().any(|origin| origin == "*") {
        return CorsLayer::permissive();
    }

    let origins: Vec<HeaderValue> = config
        .api
        .cors_origins
        .iter()
        .filter_map(|origin| origin.parse().ok())
        .collect();

    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE])
        .allow_credentials(true)
        .max_age(std::time::Duration::from_secs(3600))
}
