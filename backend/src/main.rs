use std::{net::SocketAddr, path::PathBuf, sync::Arc};

use backend::{AppState, create_router, fixtures::FixtureStore};
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Debug, Parser)]
#[command(author, version, about = "Serve canned trip plans over the route planner API")]
struct Args {
    /// Address to listen on
    #[arg(long, env = "BACKEND_ADDR", default_value = "0.0.0.0:8000")]
    addr: SocketAddr,

    /// JSON file holding the places and route to serve
    #[arg(long, env = "FIXTURE_JSON", default_value = "backend/data/sample_fixture.json")]
    fixture: PathBuf,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "backend=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args = Args::parse();
    let fixtures = FixtureStore::from_file(&args.fixture)?;
    tracing::info!(
        "loaded {} places and a {}-stop route from {:?}",
        fixtures.places().len(),
        fixtures.route().stops.len(),
        args.fixture
    );

    let app = create_router(AppState {
        fixtures: Arc::new(fixtures),
    });

    tracing::info!("starting backend on http://{}", args.addr);
    let listener = tokio::net::TcpListener::bind(args.addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}
