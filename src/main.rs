use axum::ServiceExt;
use axum::extract::Request;
use clap::Parser; // for cli
use std::net::SocketAddr;
use tower_http::trace::TraceLayer;
use tracing::Level;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use httplog::config::Args;
use httplog::{AppState, Store, router, trim_trailing_slash};

// this is main async function with tokio
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // parse cli arguments
    let args = Args::parse();

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with(tracing_subscriber::fmt::layer())
        .init();

    // one connection for the whole process, schema is created if missing
    let store = Store::open(&args.database)?;
    let state = AppState::new(store, args.body_limit.unwrap_or(usize::MAX));

    let app = router(state).layer(TraceLayer::new_for_http().make_span_with(
        |request: &Request| {
            tracing::span!(
                Level::INFO,
                "http_request",
                method = %request.method(),
                path = %request.uri().path(),
            )
        },
    ));
    let app = trim_trailing_slash(app);

    let addr = args.bind_addr();
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    tracing::info!(
        addr = %addr,
        database = %args.database.display(),
        "server running"
    );

    axum::serve(
        listener,
        ServiceExt::<Request>::into_make_service_with_connect_info::<SocketAddr>(app),
    )
    .await?;

    Ok(())
}
