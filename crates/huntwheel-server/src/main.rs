use tracing_subscriber::EnvFilter;

use huntwheel_server::config::ServerConfig;
use huntwheel_server::build_app;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let config = ServerConfig::load();
    let addr = config.listen_addr.clone();
    let (app, state) = build_app(config);

    let listener = match tokio::net::TcpListener::bind(&addr).await {
        Ok(listener) => listener,
        Err(e) => {
            tracing::error!(%addr, "failed to bind: {e}");
            std::process::exit(1);
        },
    };
    tracing::info!(%addr, "huntwheel server listening");

    if let Err(e) = axum::serve(listener, app).await {
        tracing::error!("server exited: {e}");
    }
    state.cancel.cancel();
}
