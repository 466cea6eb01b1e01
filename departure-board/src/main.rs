use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use departure_board::cache::CacheConfig;
use departure_board::config::MonitorConfig;
use departure_board::provider::{GermanConfig, Providers, ProvidersConfig, SwissConfig};
use departure_board::state::StateStore;
use departure_board::web::{WebState, create_router};
use departure_board::wizard::Controller;

/// Live public transport departure board.
#[derive(Debug, Parser)]
#[command(version, about)]
struct Args {
    /// Address to listen on
    #[arg(long, env = "DEPARTURE_BOARD_BIND", default_value = "127.0.0.1:3000")]
    bind: SocketAddr,

    /// Where the configuration is persisted
    #[arg(
        long,
        env = "DEPARTURE_BOARD_STATE_FILE",
        default_value = "departure-board-state.json"
    )]
    state_file: PathBuf,

    /// Static assets directory
    #[arg(long, env = "DEPARTURE_BOARD_STATIC_DIR", default_value = "departure-board/static")]
    static_dir: String,

    /// Serve boards from `{id}.json` files in this directory instead of live upstreams
    #[arg(long, env = "DEPARTURE_BOARD_FIXTURES")]
    fixtures: Option<PathBuf>,

    /// Base URL of the Swiss transport API
    #[arg(long, env = "SWISS_API_URL", default_value = "https://transport.opendata.ch/v1")]
    swiss_url: String,

    /// Base URL of the German transport API
    #[arg(long, env = "GERMAN_API_URL", default_value = "https://v6.db.transport.rest")]
    german_url: String,

    /// Upstream request timeout in seconds
    #[arg(long, env = "DEPARTURE_BOARD_TIMEOUT", default_value_t = 10)]
    timeout: u64,

    /// Seconds between board refreshes
    #[arg(long, env = "DEPARTURE_BOARD_POLL_INTERVAL", default_value_t = 20)]
    poll_interval: u64,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("departure_board=info,tower_http=info")),
        )
        .init();

    let args = Args::parse();

    let poll_interval = Duration::from_secs(args.poll_interval.max(1));
    let monitor_config = MonitorConfig::default().with_poll_interval(poll_interval);

    let mut providers_config = ProvidersConfig::new()
        .with_swiss(
            SwissConfig::new()
                .with_base_url(&args.swiss_url)
                .with_timeout(args.timeout)
                .with_board_limit(monitor_config.departures_per_station),
        )
        .with_german(
            GermanConfig::new()
                .with_base_url(&args.german_url)
                .with_timeout(args.timeout)
                .with_board_limit(monitor_config.departures_per_station),
        )
        // Expire just before the next poll so each cycle refetches.
        .with_cache(CacheConfig::default().with_ttl(poll_interval * 3 / 4))
        .with_search_limit(monitor_config.search_limit);
    if let Some(dir) = &args.fixtures {
        providers_config = providers_config.with_fixture_dir(dir);
    }

    let providers = Providers::new(providers_config).expect("Failed to create providers");

    let controller = Controller::open(
        StateStore::new(&args.state_file),
        providers.clone(),
        monitor_config,
    );
    let state = WebState::new(controller, providers, poll_interval);
    let controller = state.controller.clone();

    let app = create_router(state, &args.static_dir);

    let listener = tokio::net::TcpListener::bind(args.bind)
        .await
        .expect("Failed to bind");
    tracing::info!(addr = %args.bind, "departure board listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("Server error");

    controller.shutdown().await;
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for ctrl-c");
    }
    tracing::info!("shutting down");
}
