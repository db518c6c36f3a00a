use axum::{
    extract::DefaultBodyLimit,
    http::{header, HeaderValue, Method},
    middleware::from_fn_with_state,
    routing::get,
    Router,
};
use tower_http::{
    cors::{AllowOrigin, Any, CorsLayer},
    trace::TraceLayer,
};

pub mod api;
pub mod auth;
pub mod cli;
pub mod config;
pub mod database;
pub mod error;
pub mod filter;
pub mod handlers;
pub mod middleware;
pub mod services;
pub mod state;
pub mod types;

use config::SecurityConfig;
use state::AppState;

/// Builds the full router: public routes, token-protected routes and the
/// global layers selected by configuration
pub fn app(state: AppState) -> Router {
    let config = state.config.clone();

    let mut router = Router::new()
        .merge(public_routes())
        .merge(protected_routes(state.clone()))
        .layer(DefaultBodyLimit::max(config.api.max_request_size_bytes));

    if config.security.enable_cors {
        router = router.layer(cors_layer(&config.security));
    }
    if config.api.enable_request_logging {
        router = router.layer(TraceLayer::new_for_http());
    }

    router.with_state(state)
}

fn public_routes() -> Router<AppState> {
    use axum::routing::post;
    use handlers::public;

    Router::new()
        .route("/", get(public::root_get))
        .route("/health", get(public::health_get))
        .route("/api/auth/register", post(public::register_post))
        .route("/api/auth/login", post(public::login_post))
}

fn protected_routes(state: AppState) -> Router<AppState> {
    use handlers::protected;

    Router::new()
        .route("/api/projects", get(protected::projects_get).post(protected::projects_post))
        .route(
            "/api/projects/:project_id",
            get(protected::project_get)
                .put(protected::project_put)
                .delete(protected::project_delete),
        )
        .route(
            "/api/projects/:project_id/tasks",
            get(protected::tasks_get).post(protected::tasks_post),
        )
        // static segment wins over :task_id
        .route("/api/projects/:project_id/tasks/search", get(protected::search_get))
        .route(
            "/api/projects/:project_id/tasks/:task_id",
            get(protected::task_get)
                .put(protected::task_put)
                .delete(protected::task_delete),
        )
        .route("/api/tasks/search", get(protected::search_get))
        .route_layer(from_fn_with_state(state, middleware::jwt_auth_middleware))
}

/// Empty origin list means any origin
fn cors_layer(security: &SecurityConfig) -> CorsLayer {
    let layer = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE, Method::OPTIONS])
        .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE]);

    if security.cors_origins.is_empty() {
        return layer.allow_origin(Any);
    }

    let origins: Vec<HeaderValue> = security
        .cors_origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!("Ignoring invalid CORS origin: {}", origin);
                None
            }
        })
        .collect();

    layer.allow_origin(AllowOrigin::list(origins))
}
