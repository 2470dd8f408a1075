//! # Seekline Main Entry Point

use std::sync::Arc;

use anyhow::Result;
use tracing_subscriber::EnvFilter;

use seekline::client::io::TerminalEventStream;
use seekline::client::services::{FileIdentityStore, MemoryDraftStore, RequestGateway};
use seekline::client::views::TerminalRenderer;
use seekline::client::Session;
use seekline::cmd_args::CommandLineArgs;
use seekline::{config, AppController};

#[tokio::main]
async fn main() -> Result<()> {
    let args = CommandLineArgs::parse();

    let default_filter = if args.verbose() {
        "seekline=debug"
    } else {
        "seekline=info"
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)),
        )
        .with_writer(std::io::stderr)
        .init();

    let state_path = config::resolve_state_path(args.state_path());
    tracing::debug!("identity state path: {}", state_path.display());

    let gateway = Arc::new(RequestGateway::new(args.origin())?);
    let session = Session::new(
        Box::new(MemoryDraftStore::new()),
        Box::new(FileIdentityStore::new(state_path)),
    );

    let mut app = AppController::with_io(
        gateway,
        session,
        TerminalEventStream::new(),
        TerminalRenderer::new(std::io::stdout()),
    );
    app.run().await
}
