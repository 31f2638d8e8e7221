pub mod api;
pub mod config;
pub mod error;
pub mod settings;
pub mod sse;
pub mod state;

use axum::Router;
use tower_http::services::ServeDir;

use huntwheel_core::session::Session;

use config::ServerConfig;
use state::AppState;

/// Build the Axum router and application state from a config, loading
/// persisted preferences onto a fresh session.
pub fn build_app(config: ServerConfig) -> (Router<()>, AppState) {
    let mut session = Session::new();
    if !config.settings_path.is_empty()
        && let Some(persisted) = settings::load(std::path::Path::new(&config.settings_path))
    {
        tracing::info!(path = %config.settings_path, "applying persisted preferences");
        persisted.apply(&mut session);
    }

    let web_root = config.web_root.clone();
    let state = AppState::new(config, session);

    let api_routes = Router::new()
        .route("/state", axum::routing::get(api::get_state))
        .route("/state/stream", axum::routing::get(sse::state_stream))
        .route("/catalog", axum::routing::get(api::get_catalog))
        .route("/players", axum::routing::post(api::post_player))
        .route(
            "/players/{id}",
            axum::routing::delete(api::delete_player).patch(api::rename_player),
        )
        .route("/players/{id}/reroll", axum::routing::post(api::post_reroll))
        .route("/policy", axum::routing::put(api::put_policy))
        .route("/pool", axum::routing::put(api::put_pool))
        .route("/mode", axum::routing::put(api::put_mode))
        .route("/assignment", axum::routing::post(api::post_assignment))
        .route("/spin", axum::routing::post(api::post_spin));

    let app = Router::new()
        .nest("/api/v1", api_routes)
        .fallback_service(ServeDir::new(&web_root))
        .with_state(state.clone());

    (app, state)
}
