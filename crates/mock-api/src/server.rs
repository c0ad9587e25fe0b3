use std::{sync::Arc, time::Duration};

use poem::{listener::TcpListener, middleware::Tracing, Endpoint, EndpointExt, Server};

use crate::{routes::create_router, storage::MemStorage};

/// Default listen address.
pub const DEFAULT_ADDR: &str = "127.0.0.1:5000";

/// The API over seeded storage, with request tracing.
pub fn create_app() -> impl Endpoint {
    create_router(Arc::new(MemStorage::seeded())).with(Tracing)
}

/// Serve the API on `addr` until Ctrl-C.
pub async fn serve(addr: &str) -> crate::Result<()> {
    tracing::info!(%addr, "mock API listening");
    Server::new(TcpListener::bind(addr.to_string()))
        .run_with_graceful_shutdown(
            create_app(),
            async {
                let _ = tokio::signal::ctrl_c().await;
                tracing::info!("shutting down");
            },
            Some(Duration::from_secs(5)),
        )
        .await?;
    Ok(())
}
