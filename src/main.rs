use std::path::PathBuf;

use clap::Parser;
use tokio::net::TcpListener;

use bracketwiki::{AppState, Config, WikiError, build_router, logger::Logger};

/// Command-line interface for the wiki server
#[derive(Parser)]
#[command(name = "bracketwiki", version, about = "A minimal wiki server")]
struct Cli {
    /// Directory holding one `{title}.txt` file per page
    #[arg(long, env = "WIKI_DATA_DIR")]
    data_dir: Option<PathBuf>,

    /// Directory containing edit.html and view.html
    #[arg(long, env = "WIKI_TEMPLATE_DIR")]
    template_dir: Option<PathBuf>,

    /// Directory served under /static/
    #[arg(long, env = "WIKI_STATIC_DIR")]
    static_dir: Option<PathBuf>,

    /// Address to bind
    #[arg(long, env = "WIKI_HOST")]
    host: Option<String>,

    /// Port to listen on
    #[arg(short, long, env = "WIKI_PORT")]
    port: Option<u16>,
}

#[tokio::main]
async fn main() -> Result<(), WikiError> {
    let cli = Cli::parse();
    Logger::init().map_err(|e| WikiError::Config(format!("logger: {e}")))?;

    let config = Config::with_custom(cli.data_dir, cli.template_dir, cli.static_dir, cli.port, cli.host);
    let state = AppState::from_config(&config).await?;
    let app = build_router(state);

    let addr = config.socket_addr();
    log::info!("Wiki listening on http://{}", addr);
    log::info!("Pages stored in {:?}", config.data_dir);
    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, app).await.map_err(WikiError::from)
}
