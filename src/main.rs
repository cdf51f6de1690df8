use std::{net::SocketAddr, sync::Arc};

use clap::Parser;
use color_eyre::{
    Result,
    eyre::{Context, eyre},
};
use tracing::Instrument;
use urlshort::{
    adapters::{FileSystemAdapter, RedirectHandler},
    config::{
        ServerConfigValidator, load_config_or_default,
        models::{LogFormat, ServerConfig},
    },
    core::{ResolverStage, StageError},
    tracing_setup,
    utils::GracefulShutdown,
};

#[derive(Parser, Debug)]
#[clap(author, version, about, args_conflicts_with_subcommands = true)]
struct Args {
    #[clap(subcommand)]
    command: Option<Commands>,

    #[clap(flatten)]
    options: Options,
}

#[derive(clap::Subcommand, Debug)]
enum Commands {
    /// Start the redirect server (default)
    Serve {
        #[clap(flatten)]
        options: Options,
    },
    /// Build the redirect chain, print a summary and exit
    Check {
        #[clap(flatten)]
        options: Options,
    },
}

#[derive(clap::Args, Debug, Clone)]
struct Options {
    /// Settings file (TOML, YAML or JSON, chosen by extension)
    #[clap(short, long)]
    config: Option<String>,

    /// YAML file containing redirects
    #[clap(long)]
    yaml: Option<String>,

    /// JSON file containing redirects
    #[clap(long)]
    json: Option<String>,

    /// Address to listen on, e.g. 0.0.0.0:8080
    #[clap(short, long)]
    listen: Option<String>,

    /// Log output format
    #[clap(long, value_enum)]
    log_format: Option<LogFormat>,

    /// Log filter used when RUST_LOG is unset
    #[clap(long)]
    log_level: Option<String>,
}

impl Options {
    /// Command-line values win over the settings file.
    fn apply(&self, config: &mut ServerConfig) {
        if let Some(yaml) = &self.yaml {
            config.yaml_file = Some(yaml.clone());
        }
        if let Some(json) = &self.json {
            config.json_file = Some(json.clone());
        }
        if let Some(listen) = &self.listen {
            config.listen_addr = listen.clone();
        }
        if let Some(format) = self.log_format {
            config.logging.format = format;
        }
        if let Some(level) = &self.log_level {
            config.logging.level = level.clone();
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;

    let args = Args::parse();

    let (check_only, options) = match args.command {
        Some(Commands::Check { options }) => (true, options),
        Some(Commands::Serve { options }) => (false, options),
        None => (false, args.options),
    };

    let mut config = load_config_or_default(options.config.as_deref())
        .await
        .wrap_err("Failed to load settings")?;
    options.apply(&mut config);

    if check_only {
        return check_command(&config).await;
    }

    ServerConfigValidator::validate(&config).wrap_err("Invalid settings")?;

    tracing_setup::init_tracing(&config.logging)
        .map_err(|e| eyre!("Failed to initialize tracing: {}", e))?;

    serve(config).await
}

async fn build_chain(config: &ServerConfig) -> Result<ResolverStage, StageError> {
    config
        .chain_builder()
        .build(&FileSystemAdapter::new())
        .instrument(tracing_setup::configure_component_tracing("chain_builder"))
        .await
}

fn describe_stage(stage: &ResolverStage) -> String {
    match stage {
        ResolverStage::Map(map) => {
            format!("{} table ({} entries)", map.source(), map.mapping().len())
        }
        ResolverStage::Terminal(terminal) => {
            format!("default response ({} bytes)", terminal.body().len())
        }
    }
}

async fn serve(config: ServerConfig) -> Result<()> {
    tracing::info!(
        yaml_file = config.yaml_file.as_deref().unwrap_or("-"),
        json_file = config.json_file.as_deref().unwrap_or("-"),
        static_entries = config.redirects.len(),
        "Building redirect chain"
    );

    let chain = build_chain(&config)
        .await
        .wrap_err("Failed to build redirect chain")?;

    for (depth, stage) in chain.stages().enumerate() {
        tracing::info!("Stage {}: {}", depth + 1, describe_stage(stage));
    }

    let app = RedirectHandler::new(Arc::new(chain)).into_router();

    let addr: SocketAddr = config
        .listen_addr
        .parse()
        .context("Failed to parse listen address")?;

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind to {addr}"))?;

    let graceful_shutdown = Arc::new(GracefulShutdown::new());

    let signal_handler_shutdown = graceful_shutdown.clone();
    tokio::spawn(async move {
        if let Err(e) = signal_handler_shutdown.run_signal_handler().await {
            tracing::error!("Signal handler error: {}", e);
        }
    });

    tracing::info!("urlshort server starting on {}", addr);

    let shutdown_waiter = graceful_shutdown.clone();
    axum::serve(listener, app)
        .with_graceful_shutdown(async move {
            shutdown_waiter.wait_for_shutdown_signal().await;
        })
        .await
        .context("Server error")?;

    tracing::info!("Graceful shutdown completed");
    Ok(())
}

/// Build the chain from the given settings and report what it contains
async fn check_command(config: &ServerConfig) -> Result<()> {
    println!("🔍 Checking redirect configuration");

    if let Err(e) = ServerConfigValidator::validate(config) {
        eprintln!("❌ Settings validation failed:");
        eprintln!("{e}");
        std::process::exit(1);
    }
    println!("✅ Settings validation: OK");

    let chain = match build_chain(config).await {
        Ok(chain) => chain,
        Err(e) => {
            let kind = match &e {
                StageError::Read { .. } => "could not be read",
                StageError::Parse { .. } => "is malformed",
                _ => "failed to load",
            };
            eprintln!("❌ {} redirect file {kind}:", e.format());
            eprintln!("   {e}");
            std::process::exit(1);
        }
    };

    println!("✅ Redirect chain: OK");
    println!();
    println!("📋 Resolution order:");
    for (depth, stage) in chain.stages().enumerate() {
        println!("   {}. {}", depth + 1, describe_stage(stage));
    }
    println!();
    println!("   • Listen Address: {}", config.listen_addr);
    Ok(())
}
