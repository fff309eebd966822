use std::net::SocketAddr;
use std::sync::Arc;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let subscriber = tracing_subscriber::fmt().with_ansi(false).finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let config = match std::env::args().nth(1) {
        Some(path) => {
            tracing::info!("Loading config from {:?}", path);
            fragment_price::Config::load(path)?
        }
        None => fragment_price::Config::default(),
    };
    tracing::debug!("Config {:?}", config);

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;

    tracing::info!("Starting");

    let registry = prometheus::Registry::new();
    let metrics = fragment_price::Metrics::new(&registry)?;
    let client = fragment_price::fragment::Client::new(&config.fragment)?;

    let app = fragment_price::api::router(fragment_price::api::AppState {
        client: Arc::new(client),
        metrics,
        registry,
    });

    let addr: SocketAddr = config.listen.parse()?;

    runtime.block_on(async move {
        tracing::info!("Listening on {}", addr);

        axum::Server::try_bind(&addr)?
            .serve(app.into_make_service())
            .await
    })?;

    Ok(())
}
