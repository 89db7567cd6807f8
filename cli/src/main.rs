//! CLI entrypoint for Connections Coach
//!
//! This is the main binary that wires together all layers using
//! dependency injection.

use anyhow::{Context, Result, anyhow};
use clap::Parser;
use coach_application::{
    GameRecorder, NoopEventSink, RecommendationCoordinator, ResponseRecorder, SessionEventSink,
    SessionStarter,
};
use coach_domain::Provider;
use coach_infrastructure::{
    ConfigLoader, FileConfig, GameResultClient, HttpConfig, JsonlEventLogger,
    RecommendationClient, ResponseClient, RoutingGateway, RuleBasedProvider, SetupClient,
};
use coach_presentation::{Cli, CoachRepl, ConsoleFormatter};
use std::sync::Arc;
use std::time::Duration;
use tracing::info;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let _log_guard = init_logging(cli.verbose);

    if cli.show_config {
        ConfigLoader::print_config_sources();
        return Ok(());
    }

    let config = if cli.no_config {
        ConfigLoader::load_defaults()
    } else {
        ConfigLoader::load(cli.config.as_ref()).context("Could not load configuration")?
    };

    info!("Starting Connections Coach");

    let provider = resolve_provider(&cli, &config)?;
    let delimiter = cli.delimiter.unwrap_or_else(|| config.delimiter());

    // === Dependency Injection ===
    let http_config = HttpConfig::new(config.service.base_url.clone())
        .with_request_timeout(Duration::from_secs(config.service.request_timeout_secs));
    let http = http_config
        .build_client()
        .context("Could not build the HTTP client")?;

    let setup = Arc::new(SetupClient::new(http.clone(), http_config.clone()));
    let response = Arc::new(ResponseClient::new(http.clone(), http_config.clone()));
    let results = Arc::new(GameResultClient::new(http.clone(), http_config.clone()));
    let remote = Arc::new(RecommendationClient::new(http, http_config));
    let gateway = Arc::new(RoutingGateway::new(Arc::new(RuleBasedProvider::new()), remote));

    let events: Arc<dyn SessionEventSink> = dirs::data_dir()
        .and_then(|base| {
            JsonlEventLogger::new(base.join("connections-coach").join("session.events.jsonl"))
        })
        .map(|logger| Arc::new(logger) as Arc<dyn SessionEventSink>)
        .unwrap_or_else(|| Arc::new(NoopEventSink));

    let coordinator = Arc::new(RecommendationCoordinator::new(
        gateway,
        Arc::clone(&events),
        &config.orchestration(),
    ));
    let recorder = Arc::new(ResponseRecorder::new(
        response,
        Arc::clone(&coordinator),
        Arc::clone(&events),
    ));
    let game_recorder = Arc::new(GameRecorder::new(results, Arc::clone(&events)));
    let starter = SessionStarter::new(setup);

    // Records listing mode
    if cli.records {
        let records = game_recorder
            .list()
            .await
            .context("Could not list game results")?;
        print!("{}", ConsoleFormatter::format_records(&records));
        return Ok(());
    }

    let mut repl = CoachRepl::new(
        starter,
        coordinator,
        recorder,
        game_recorder,
        events,
        provider,
    )
    .with_delimiter(delimiter)
    .with_quiet(cli.quiet);

    repl.run(cli.words.clone()).await?;

    Ok(())
}

/// CLI flags override the config file's provider selection.
fn resolve_provider(cli: &Cli, config: &FileConfig) -> Result<Provider> {
    match &cli.provider {
        Some(kind) => Provider::from_kind(
            kind,
            cli.model
                .as_deref()
                .or(config.recommendation.model.as_deref()),
        )
        .map_err(|e| anyhow!(e)),
        None => config.default_provider().map_err(|e| anyhow!(e)),
    }
}

/// Log to stderr at the verbosity the flags ask for, and mirror everything
/// into a daily file under the platform data directory.
fn init_logging(verbose: u8) -> Option<tracing_appender::non_blocking::WorkerGuard> {
    let filter = match verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"), // -vvv or more
    };

    let (file_layer, guard) = match dirs::data_dir() {
        Some(base) => {
            let appender = tracing_appender::rolling::daily(
                base.join("connections-coach").join("logs"),
                "coach.log",
            );
            let (writer, guard) = tracing_appender::non_blocking(appender);
            let layer = fmt::layer()
                .with_writer(writer)
                .with_ansi(false)
                .with_target(false);
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr).with_target(false))
        .with(file_layer)
        .init();

    guard
}
