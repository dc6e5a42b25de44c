use pageserver::config::Config;
use pageserver::server::listener::Listener;
use pageserver::server::Server;
use tracing::Level;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cfg = Config::load()?;

    tracing_subscriber::fmt()
        .with_target(false)
        .with_level(true)
        .with_max_level(if cfg.debug { Level::DEBUG } else { Level::INFO })
        .init();

    if cfg.is_reserved_port() {
        tracing::warn!(
            port = cfg.port,
            "Ports 0..=1000 are reserved by the operating system"
        );
    }

    let listener = Listener::on_port(cfg.port)?;
    tracing::info!(
        port = cfg.port,
        root = %cfg.document_root.display(),
        "Listening"
    );

    let server = Server::new(cfg);
    server
        .run_until(listener, async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                tracing::error!(error = %e, "Cannot listen for shutdown signal");
                std::future::pending::<()>().await;
            }
        })
        .await;

    Ok(())
}
