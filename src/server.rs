use std::net::SocketAddr;

use axum::{Extension, Router, routing::get};

use crate::{Res, api, api::AppState, config::Config, info, warning};

/// Builds the relay router with all routes and the shared state attached.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(api::index))
        .route("/health", get(api::health))
        .route("/login", get(api::login))
        .route("/callback", get(api::callback))
        .route("/spotify_list", get(api::spotify_list))
        .layer(Extension(state))
}

/// Browser-facing `/login` URL for a bound address.
///
/// Wildcard binds (`0.0.0.0`, `::`) are not browsable, so they are shown as
/// `localhost`.
pub fn login_url(addr: SocketAddr) -> String {
    if addr.ip().is_unspecified() {
        format!("http://localhost:{}/login", addr.port())
    } else {
        format!("http://{}/login", addr)
    }
}

/// Binds the configured address and serves the relay until the process is
/// stopped or the listener fails.
///
/// With `open_login` set, the login page is opened in the default browser
/// once the listener is bound.
pub async fn start_api_server(config: Config, open_login: bool) -> Res<()> {
    let addr = config.server_addr()?;
    let state = AppState::new(config)?;
    let app = build_router(state);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    let bound = listener.local_addr()?;
    info!("SoundTrip relay listening on http://{}", bound);

    if open_login {
        let url = login_url(bound);
        tokio::task::spawn_blocking(move || {
            if webbrowser::open(&url).is_err() {
                warning!(
                    "Failed to open browser. Please navigate to the following URL manually:\n{}",
                    url
                )
            }
        });
    }

    axum::serve(listener, app).await?;
    Ok(())
}
