//! Sealed poker table server.
//!
//! Runs one table actor and exposes its command/query surface over HTTP.

use anyhow::Error;
use ctrlc::set_handler;
use log::info;
use pico_args::Arguments;
use sealed_poker::{JsonFileStore, TableActor, TableConfig};
use sp_server::{api, config::ServerConfig, metrics};

const HELP: &str = "\
Run a sealed poker table server

USAGE:
  sp_server [OPTIONS]

OPTIONS:
  --bind        IP:PORT    Server socket bind address   [default: env SERVER_BIND or 127.0.0.1:7070]
  --owner       IDENTITY   Table owner identity         [default: env TABLE_OWNER]
  --state-file  PATH       Durable snapshot file        [default: env STATE_FILE or in-memory]

FLAGS:
  -h, --help               Print help information

ENVIRONMENT:
  SERVER_BIND              Server bind address (e.g., 0.0.0.0:8080)
  TABLE_OWNER              Identity allowed to reset a finished game (required)
  TABLE_NAME               Table name used in logs
  TABLE_MAX_PLAYERS        Seat bound (2-6)
  TABLE_MIN_PLAYERS        Seats needed before a hand starts
  STATE_FILE               Path for the JSON snapshot store
  METRICS_BIND             Prometheus scrape address (disabled when unset)
  (See .env file for all configuration options)
";

struct Args {
    bind: Option<std::net::SocketAddr>,
    owner: Option<String>,
    state_file: Option<std::path::PathBuf>,
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    // Load .env file if it exists.
    let _ = dotenvy::dotenv();

    let mut pargs = Arguments::from_env();

    // Help has a higher priority and should be handled separately.
    if pargs.contains(["-h", "--help"]) {
        print!("{HELP}");
        std::process::exit(0);
    }

    let args = Args {
        bind: pargs.opt_value_from_str("--bind")?,
        owner: pargs.opt_value_from_str("--owner")?,
        state_file: pargs.opt_value_from_str("--state-file")?,
    };

    // Catching signals for exit.
    set_handler(|| std::process::exit(0))?;

    env_logger::builder().format_target(false).init();

    let config = ServerConfig::from_env(args.bind, args.owner, args.state_file)?;

    if let Some(metrics_bind) = config.metrics_bind {
        metrics::init_metrics(metrics_bind)
            .map_err(|e| anyhow::anyhow!("Failed to start metrics exporter: {e}"))?;
        info!("Metrics exporter listening at {metrics_bind}");
    }

    let table_config = TableConfig {
        name: config.table.name.clone(),
        owner: config.table.owner.clone(),
        max_players: config.table.max_players,
        min_players: config.table.min_players,
    };
    table_config
        .validate()
        .map_err(|e| anyhow::anyhow!("Invalid table configuration: {e}"))?;

    let (actor, handle) = match &config.state_file {
        Some(path) => {
            info!("Using snapshot store at {}", path.display());
            TableActor::with_store(table_config, Box::new(JsonFileStore::new(path)))
                .map_err(|e| anyhow::anyhow!("Failed to load snapshot store: {e}"))?
        }
        None => TableActor::new(table_config),
    };
    tokio::spawn(actor.run());

    let app = api::create_router(api::AppState { table: handle });

    info!(
        "Serving table '{}' (owner {}) at {}",
        config.table.name, config.table.owner, config.bind
    );
    let listener = tokio::net::TcpListener::bind(config.bind).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
