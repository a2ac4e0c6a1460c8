mod config;
mod data_aquisition;
mod error;
mod export;
mod output;
mod session;
mod topology;

use std::{path::PathBuf, process::ExitCode, time::Duration};

use clap::Parser;
use tracing::{debug, error, info};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use config::{ControllerConfig, DEFAULT_TIMEOUT_SECS, ProxyEndpoint, resolve_output_path};
use data_aquisition::restconf::HttpTransport;
use error::RunError;
use session::{PromptingCredentials, SessionManager};

/// Generate a containerlab topology file from an NSP's IETF L2 topology.
#[derive(Parser, Debug)]
#[command(name = "nsp2clab")]
#[command(version)]
struct Args {
    /// IP address or hostname of the NSP server
    #[arg(short, long)]
    server: String,

    /// Username used to access NSP (prompted for when omitted)
    #[arg(short, long)]
    username: Option<String>,

    /// Password for the NSP user (prompted for without echo when omitted)
    #[arg(short, long)]
    password: Option<String>,

    /// Output path for the generated topology file [default: ./data.clab.yaml]
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// HTTP proxy used to reach the NSP server (host:port or URL)
    #[arg(long)]
    proxy: Option<String>,

    /// Timeout in seconds for each request to the NSP server
    #[arg(long, default_value_t = DEFAULT_TIMEOUT_SECS)]
    timeout: u64,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info")]
    log_level: String,
}

async fn run(args: Args) -> Result<(), RunError> {
    let proxy = args.proxy.as_deref().map(ProxyEndpoint::parse).transpose()?;
    let config = ControllerConfig::new(&args.server, proxy, Duration::from_secs(args.timeout))?;
    let output = resolve_output_path(args.output);

    info!(server = %config.server, proxy = ?config.proxy.as_ref().map(|p| p.to_string()), "connecting to controller");
    let transport = HttpTransport::new(config).map_err(RunError::Client)?;
    let provider = PromptingCredentials::new(args.username, args.password);
    let mut session = SessionManager::new(transport, &provider)?;

    let summary = export::export(&mut session, &output).await?;
    debug!(state = session.state().name(), "controller session closed");
    info!(
        nodes = summary.nodes,
        links = summary.links,
        path = %summary.path.display(),
        "done"
    );
    Ok(())
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let args = Args::parse();
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&args.log_level));
    tracing_subscriber::registry().with(fmt::layer()).with(filter).init();

    match run(args).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(kind = e.kind(), "{e}");
            ExitCode::from(e.exit_code())
        }
    }
}
