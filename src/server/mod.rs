pub mod error;
pub mod routes;

use tokio::net::TcpListener;
use tracing::info;

use crate::context::AppContext;
use crate::error::AppResult;

pub use routes::create_router;

/// Serves the API on `bind` until Ctrl-C.
pub async fn serve(ctx: AppContext, bind: &str) -> AppResult<()> {
    let app = create_router(ctx);

    let listener = TcpListener::bind(bind).await?;
    info!("listening on {}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_ok() {
        info!("shutdown requested");
    }
}
