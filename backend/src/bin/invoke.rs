//! Answer one invocation event read from a file or stdin.
//!
//! Upstream and CDN settings come from `LOOKUP_*` variables and the config
//! file; the bot credential from `DISCORD_TOKEN` or `TOKEN`.
#![cfg_attr(not(any(test, doctest)), deny(clippy::unwrap_used))]
#![cfg_attr(not(any(test, doctest)), deny(clippy::expect_used))]

use std::ffi::OsString;
use std::io::{self, Read, Write};
use std::path::PathBuf;

use clap::Parser;
use lookup_gateway::bootstrap::build_gateway;
use lookup_gateway::inbound::invocation::invoke_json;
use lookup_gateway::settings::GatewaySettings;
use mockable::DefaultEnv;
use tokio::runtime::Builder;
use tracing::warn;
use tracing_subscriber::{EnvFilter, fmt};

/// `invoke` command arguments.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "invoke",
    about = "Answer a single {httpMethod, path} event through the lookup gateway",
    version
)]
struct CliArgs {
    /// Event JSON file. Reads stdin when omitted or `-`.
    #[arg(value_name = "path")]
    event: Option<PathBuf>,
}

fn main() -> io::Result<()> {
    if let Err(error) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .with_writer(io::stderr)
        .try_init()
    {
        warn!(%error, "tracing init failed");
    }

    let runtime = Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(|error| io::Error::other(format!("create Tokio runtime: {error}")))?;
    runtime.block_on(async_main())
}

async fn async_main() -> io::Result<()> {
    let args = CliArgs::try_parse().map_err(io::Error::other)?;
    let raw = read_event(args.event.as_ref())?;

    let settings = GatewaySettings::load_from_args([OsString::from("invoke")])
        .map_err(io::Error::other)?;
    let config = settings.resolve(&DefaultEnv::new()).map_err(io::Error::other)?;
    let gateway = build_gateway(&config).map_err(io::Error::other)?;

    let response = invoke_json(&gateway, &raw)
        .await
        .map_err(io::Error::other)?;
    let mut stdout = io::stdout().lock();
    writeln!(stdout, "{response}")
}

fn read_event(path: Option<&PathBuf>) -> io::Result<String> {
    match path {
        Some(path) if path.as_os_str() != "-" => std::fs::read_to_string(path).map_err(|error| {
            io::Error::new(
                error.kind(),
                format!("read event {}: {error}", path.display()),
            )
        }),
        _ => {
            let mut raw = String::new();
            io::stdin().read_to_string(&mut raw)?;
            Ok(raw)
        }
    }
}
