mod client;
mod model;

#[cfg(feature = "server")]
mod server;

use client::App;

fn main() {
    #[cfg(not(feature = "server"))]
    dioxus::launch(App);

    #[cfg(feature = "server")]
    dioxus::serve(|| async move {
        use dioxus_logger::tracing;
        use tower_http::cors::CorsLayer;

        use crate::server::{config::Config, startup};

        dotenvy::dotenv().ok();
        let config = Config::from_env()?;

        let http_client = startup::setup_reqwest_client(&config)?;
        let state = startup::setup_app_state(&config, http_client);

        tracing::info!(
            "Starting server (CloudNet integration {})",
            if config.cloudnet.enabled {
                "enabled"
            } else {
                "disabled"
            }
        );

        // Begin periodic connectivity probing. The monitor does nothing
        // until started, and stop() would clear the timer again.
        state.monitor.clone().start().await?;

        let mut router = dioxus::server::router(App);
        let server_routes = server::router::router()
            .with_state(state)
            .layer(CorsLayer::permissive());
        router = router.merge(server_routes);

        Ok(router)
    })
}
