use clap::Parser;
use tokio::net::TcpListener;
use tracing::info;

#[derive(Debug, Parser)]
#[command(name = "mock-server", about = "In-memory users API for local development")]
struct Args {
    /// Port to listen on (loopback only).
    #[arg(long, env = "PORT", default_value_t = 3000)]
    port: u16,

    /// Preload the demo users.
    #[arg(long, env = "SEED_USERS")]
    seed: bool,
}

fn setup_tracing() {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .compact()
        .init();
}

#[tokio::main]
async fn main() -> Result<(), std::io::Error> {
    setup_tracing();
    let args = Args::parse();

    let addr = format!("127.0.0.1:{}", args.port);
    let listener = TcpListener::bind(&addr).await?;
    info!(%addr, seeded = args.seed, "listening");

    let app = if args.seed {
        mock_server::seeded_app()
    } else {
        mock_server::app()
    };
    mock_server::serve(listener, app).await
}
