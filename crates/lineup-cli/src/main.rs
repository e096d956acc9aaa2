//! football-lineup - latest match lineup sensor for API-Football.

/// Application configuration (TOML).
mod config;

use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use lineup_api::apifootball::FootballClient;
use lineup_sensor::{LineupSensor, RefreshOutcome};
use tokio::time::MissedTickBehavior;
use tracing::instrument;
use tracing_subscriber::filter::EnvFilter;
#[cfg(not(feature = "otel"))]
use tracing_subscriber::fmt;
#[cfg(feature = "otel")]
use tracing_subscriber::layer::SubscriberExt;
#[cfg(feature = "otel")]
use tracing_subscriber::util::SubscriberInitExt;

use crate::config::{API_KEY_ENV, AppConfig, resolve_config_path};

/// CLI argument parser.
#[derive(Parser)]
#[command(about, version)]
struct Cli {
    /// Override config directory.
    #[arg(long, global = true)]
    dir: Option<PathBuf>,

    /// Subcommand to run.
    #[command(subcommand)]
    command: Commands,
}

/// Available subcommands.
#[derive(Subcommand)]
enum Commands {
    /// Refresh the sensor on a fixed interval until interrupted.
    Run(RunArgs),
    /// Run one refresh and log the resulting sensor state.
    Update,
    /// Manage the config file.
    Config(ConfigCommand),
}

/// Arguments for the `run` subcommand.
#[derive(clap::Args)]
struct RunArgs {
    /// Minutes between refreshes (default: `scan_interval_minutes` from config).
    #[arg(long)]
    interval: Option<u64>,
}

/// Arguments for the `config` subcommand.
#[derive(clap::Args)]
struct ConfigCommand {
    /// Config subcommand to run.
    #[command(subcommand)]
    command: ConfigSubcommands,
}

/// Available config subcommands.
#[derive(Subcommand)]
enum ConfigSubcommands {
    /// Write a default config file.
    Init(ConfigInitArgs),
    /// Show the effective config (API key masked).
    Show,
}

/// Arguments for the `config init` subcommand.
#[derive(clap::Args)]
struct ConfigInitArgs {
    /// Overwrite an existing file.
    #[arg(long)]
    force: bool,
}

/// Loads the config file for `dir`.
fn load_config(dir: Option<&PathBuf>) -> Result<AppConfig> {
    let path = resolve_config_path(dir).context("failed to resolve config path")?;
    tracing::debug!(path = %path.display(), "loading config");
    AppConfig::load(&path).context("failed to load config")
}

/// Builds the sensor and its API client from config.
///
/// # Errors
///
/// Returns an error if no API key is available or the client fails to build.
#[instrument(skip_all)]
fn build_sensor(config: &AppConfig) -> Result<LineupSensor<FootballClient>> {
    let api_key = config.resolve_api_key(std::env::var(API_KEY_ENV).ok())?;

    let client = FootballClient::builder()
        .base_url(config.base_url()?)
        .api_key(api_key)
        .api_host(&config.api.host)
        .user_agent(concat!(
            env!("CARGO_PKG_NAME"),
            "/",
            env!("CARGO_PKG_VERSION")
        ))
        .build()
        .context("failed to build API-Football client")?;

    Ok(LineupSensor::new(
        client,
        &config.name,
        config.fixture,
        config.mode,
    ))
}

/// Runs one refresh and logs what happened.
///
/// Failures are logged and swallowed; the sensor keeps its last snapshot.
async fn refresh(sensor: &mut LineupSensor<FootballClient>) {
    match sensor.update().await {
        Ok(RefreshOutcome::Published) => log_state(sensor),
        Ok(outcome) => tracing::info!(
            ?outcome,
            state = sensor.state().unwrap_or("-"),
            "no new lineup this cycle"
        ),
        Err(e) => tracing::error!("refresh failed, keeping last snapshot: {e:#}"),
    }
}

/// Logs the host-facing state JSON.
fn log_state(sensor: &LineupSensor<FootballClient>) {
    match sensor.state_json() {
        Ok(view) => tracing::info!("{view}"),
        Err(e) => tracing::error!("failed to render sensor state: {e:#}"),
    }
}

/// Runs the `run` subcommand.
///
/// Refreshes immediately, then on every tick until Ctrl-C.
///
/// # Errors
///
/// Returns an error if the config is invalid or the signal handler fails.
#[instrument(skip_all)]
async fn run_sensor(args: &RunArgs, dir: Option<&PathBuf>) -> Result<()> {
    let config = load_config(dir)?;
    let minutes = args.interval.unwrap_or(config.scan_interval_minutes);
    let period = AppConfig::scan_interval(minutes)?;
    let mut sensor = build_sensor(&config)?;

    tracing::info!(
        name = sensor.name(),
        mode = %sensor.mode(),
        team = config.fixture.team,
        league = config.fixture.league,
        season = config.fixture.season,
        interval_minutes = minutes,
        "sensor started"
    );

    let mut ticker = tokio::time::interval(period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    let shutdown = tokio::signal::ctrl_c();
    tokio::pin!(shutdown);

    loop {
        tokio::select! {
            _ = ticker.tick() => refresh(&mut sensor).await,
            result = &mut shutdown => {
                result.context("failed to listen for Ctrl-C")?;
                tracing::info!("shutting down");
                return Ok(());
            }
        }
    }
}

/// Runs the `update` subcommand.
///
/// # Errors
///
/// Returns an error if the config is invalid or the refresh fails.
#[instrument(skip_all)]
async fn run_update(dir: Option<&PathBuf>) -> Result<()> {
    let config = load_config(dir)?;
    let mut sensor = build_sensor(&config)?;

    let outcome = sensor.update().await.context("refresh failed")?;
    tracing::info!(?outcome, "refresh finished");
    log_state(&sensor);

    Ok(())
}

/// Runs the `config init` subcommand.
///
/// # Errors
///
/// Returns an error if the file exists (without `--force`) or cannot be written.
fn run_config_init(args: &ConfigInitArgs, dir: Option<&PathBuf>) -> Result<()> {
    let path = resolve_config_path(dir).context("failed to resolve config path")?;
    if path.exists() && !args.force {
        bail!(
            "{} already exists (use --force to overwrite)",
            path.display()
        );
    }
    AppConfig::default().save(&path)?;
    tracing::info!("Wrote {}", path.display());
    tracing::info!("Set api_key there or export {API_KEY_ENV}");
    Ok(())
}

/// Runs the `config show` subcommand.
///
/// # Errors
///
/// Returns an error if the config cannot be loaded or serialized.
fn run_config_show(dir: Option<&PathBuf>) -> Result<()> {
    let path = resolve_config_path(dir).context("failed to resolve config path")?;
    let mut config = AppConfig::load(&path).context("failed to load config")?;
    if let Ok(env_key) = std::env::var(API_KEY_ENV) {
        config.api_key = Some(env_key.into());
    }
    let shown = toml::to_string_pretty(&config.redacted())
        .context("failed to serialize config to TOML")?;

    tracing::info!("# {}", path.display());
    for line in shown.lines() {
        tracing::info!("{line}");
    }
    Ok(())
}

/// Installs the global tracing subscriber.
fn init_tracing() {
    #[cfg(not(feature = "otel"))]
    {
        fmt()
            .with_env_filter(
                EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
            )
            .with_target(false)
            .init();
    }

    #[cfg(feature = "otel")]
    {
        let env_filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
        let fmt_layer = tracing_subscriber::fmt::layer().with_target(false);

        let otel_layer = std::env::var("OTEL_EXPORTER_OTLP_ENDPOINT")
            .ok()
            .and_then(|_| {
                let exporter = opentelemetry_otlp::SpanExporter::builder()
                    .with_http()
                    .build()
                    .ok()?;

                let tracer_provider = opentelemetry_sdk::trace::SdkTracerProvider::builder()
                    .with_simple_exporter(exporter)
                    .build();

                let tracer = opentelemetry::trace::TracerProvider::tracer(
                    &tracer_provider,
                    env!("CARGO_PKG_NAME"),
                );
                opentelemetry::global::set_tracer_provider(tracer_provider);

                Some(tracing_opentelemetry::layer().with_tracer(tracer))
            });

        tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt_layer)
            .with(otel_layer)
            .init();
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    init_tracing();

    let cli = Cli::parse();
    match cli.command {
        Commands::Run(args) => run_sensor(&args, cli.dir.as_ref()).await,
        Commands::Update => run_update(cli.dir.as_ref()).await,
        Commands::Config(cfg) => match cfg.command {
            ConfigSubcommands::Init(args) => run_config_init(&args, cli.dir.as_ref()),
            ConfigSubcommands::Show => run_config_show(cli.dir.as_ref()),
        },
    }
}
