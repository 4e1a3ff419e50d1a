//! FreeDV Reporter Bridge Daemon
//!
//! Bridges a local line-oriented control socket to the FreeDV reporter
//! session. A radio front end (PTT controller, rig UI) sends plain text
//! commands; this daemon reports the resulting station status upstream
//! and tracks mode changes pushed back by the server.
//!
//! # Usage
//!
//! ```text
//! fdv-reporterd [OPTIONS]
//!
//! Options:
//!   --config   <PATH>  Flat key=value configuration file [default: config.ini]
//!   --endpoint <URL>   Reporting session endpoint [default: ws://qso.freedv.org/]
//!   --listen   <ADDR>  Local control socket address [default: 127.0.0.1:50007]
//! ```
//!
//! The process runs until ctrl-c or until the reporting session is
//! lost; it never reconnects on its own, leaving restart policy to the
//! service supervisor.

use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use tracing::info;

use tokio::sync::mpsc;

use fdv_link::{run_reactor, CommandServer, Config, ModeState, SessionClient};
use fdv_protocol::{Identity, OutboundEvent, SessionEvent};

#[derive(Debug, Parser)]
#[command(
    name = "fdv-reporterd",
    about = "Bridge between a local radio control socket and the FreeDV reporter session",
    version
)]
struct Cli {
    /// Flat key=value configuration file (callsign, grid_square,
    /// version, message, fdvmode).
    #[arg(long, default_value = "config.ini", env = "FDV_CONFIG")]
    config: PathBuf,

    /// Reporting session endpoint.
    #[arg(long, default_value = "ws://qso.freedv.org/", env = "FDV_ENDPOINT")]
    endpoint: String,

    /// Address for the local control socket.
    ///
    /// Keep this on loopback; the control protocol is unauthenticated.
    #[arg(long, default_value = "127.0.0.1:50007", env = "FDV_LISTEN")]
    listen: String,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "fdv_reporterd=info,fdv_link=info,fdv_protocol=info".into()),
        )
        .init();

    info!("Starting FreeDV reporter bridge");

    let config = Config::load(&cli.config)
        .with_context(|| format!("loading configuration from {}", cli.config.display()))?;
    let mode = ModeState::new(&config.initial_mode);
    info!(
        "station {} in {} starting in mode {}",
        config.callsign, config.grid_square, config.initial_mode
    );

    let identity = Identity::report_only(
        config.callsign.clone(),
        config.grid_square.clone(),
        config.version.clone(),
    );
    let (client, events) = SessionClient::connect(&cli.endpoint, identity)
        .await
        .with_context(|| format!("connecting to {}", cli.endpoint))?;

    // The session is live from here on. Everything that can still fail
    // (initial emits, the control socket bind, the serve loop itself)
    // runs behind a captured result so the session always comes down
    // with a close frame, error or not.
    let result = run_bridge(&cli, &config, mode, &client, events).await;
    client.close().await;
    result
}

async fn run_bridge(
    cli: &Cli,
    config: &Config,
    mode: ModeState,
    client: &SessionClient,
    events: mpsc::Receiver<SessionEvent>,
) -> anyhow::Result<()> {
    // Initial status: receiving in the configured mode, current message.
    let emitter = client.emitter();
    emitter
        .emit(OutboundEvent::TxReport {
            mode: mode.current(),
            transmitting: false,
        })
        .await?;
    emitter
        .emit(OutboundEvent::MessageUpdate {
            message: config.message.clone(),
        })
        .await?;

    let reactor = tokio::spawn(run_reactor(events, mode.clone()));

    let server = CommandServer::bind(&cli.listen)
        .await
        .with_context(|| format!("binding control socket {}", cli.listen))?;
    let serve = tokio::spawn(server.serve(mode, emitter));

    tokio::select! {
        _ = reactor => Err(anyhow::anyhow!("reporting session ended")),
        outcome = serve => match outcome {
            Ok(Ok(())) => Ok(()),
            Ok(Err(e)) => Err(e).context("control server failed"),
            Err(e) => Err(e).context("control server panicked"),
        },
        _ = tokio::signal::ctrl_c() => {
            info!("shutdown requested");
            Ok(())
        }
    }
}
