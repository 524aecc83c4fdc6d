use std::io::{self, Read};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use clap::{Parser, Subcommand};
use serde_json::{json, Value};
use share_core::{route, validate, RawMessage, ShareConfig, SharePlugin};

mod host;
mod logging;

use host::{HttpFetcher, PrintingInvoker, StdoutCallback};
use logging::init_logging;

#[derive(Parser, Debug)]
#[command(name = "share-cli")]
#[command(about = "Validate and dispatch share bridge messages")]
#[command(version)]
struct Cli {
    /// YAML configuration file
    #[arg(long, short, env = "SHARE_CONFIG", global = true)]
    config: Option<PathBuf>,

    /// Enable debug mode
    #[arg(long, short, env = "DEBUG", default_value = "false", global = true)]
    debug: bool,

    /// Log level (overrides debug flag)
    #[arg(long, env = "RUST_LOG", global = true)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Validate a message and print the normalized share request
    Validate {
        /// Message file, or `-` for stdin
        message: PathBuf,
    },
    /// Validate a message and run it through the share plugin
    Dispatch {
        /// Message file, or `-` for stdin
        message: PathBuf,

        /// Content provider authority serving bundled resources
        #[arg(long, default_value = "io.kristal.shareplugin.SharePlugin")]
        authority: String,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    init_logging(cli.debug, cli.log_level.as_deref());

    let config = match &cli.config {
        Some(path) => ShareConfig::load(path)?,
        None => ShareConfig::default(),
    };
    log::debug!("configuration: {config:?}");

    match cli.command {
        Commands::Validate { message } => run_validate(&read_message(&message)?),
        Commands::Dispatch { message, authority } => {
            run_dispatch(config, &authority, &read_message(&message)?).await
        }
    }
}

fn read_message(path: &Path) -> anyhow::Result<Value> {
    let raw = if path == Path::new("-") {
        let mut buf = String::new();
        io::stdin()
            .read_to_string(&mut buf)
            .context("failed to read message from stdin")?;
        buf
    } else {
        std::fs::read_to_string(path)
            .with_context(|| format!("failed to read message {}", path.display()))?
    };

    serde_json::from_str(&raw).context("message is not valid JSON")
}

/// Share fields live in `data` when the message is a full bridge envelope.
fn share_fields(message: &Value) -> &Value {
    match message.get("data") {
        Some(data) if data.is_object() => data,
        _ => message,
    }
}

fn run_validate(message: &Value) -> anyhow::Result<()> {
    let request = validate(RawMessage::from_value(share_fields(message))?)?;
    let path = route(&request);
    let output = json!({ "request": request, "path": path });
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

async fn run_dispatch(
    config: ShareConfig,
    authority: &str,
    message: &Value,
) -> anyhow::Result<()> {
    let fetcher = HttpFetcher::new(Duration::from_secs(config.fetch_timeout_secs))?;
    let plugin = SharePlugin::new(
        config,
        Arc::new(PrintingInvoker::new(authority)),
        Arc::new(fetcher),
        Arc::new(StdoutCallback),
    );

    let outcome = plugin.on_message(message)?;
    if outcome.is_pending() {
        log::info!("waiting for remote resource");
    }
    outcome.wait().await?;
    Ok(())
}
