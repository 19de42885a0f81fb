use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "transline")]
#[command(about = "LINE translation bot", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Show version
    Version,

    /// Run the webhook server. Credentials come from the environment
    /// (LINE_CHANNEL_ACCESS_TOKEN, LINE_CHANNEL_SECRET, BEDROCK_REGION,
    /// BEDROCK_MODEL_ID); when one is missing the server still starts but
    /// answers every webhook call with a configuration error.
    Serve {
        /// Bind address (default TRANSLINE_BIND or 127.0.0.1)
        #[arg(long)]
        bind: Option<String>,

        /// Port (default TRANSLINE_PORT or 8787)
        #[arg(long, short)]
        port: Option<u16>,
    },
}

#[tokio::main]
async fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Version) => {
            println!("transline {}", env!("CARGO_PKG_VERSION"));
        }
        Some(Commands::Serve { bind, port }) => {
            if let Err(e) = run_serve(bind, port).await {
                log::error!("serve failed: {}", e);
                std::process::exit(1);
            }
        }
        None => {
            println!("Run with --help for usage");
        }
    }
}

async fn run_serve(bind: Option<String>, port: Option<u16>) -> anyhow::Result<()> {
    let (state, mut server) = lib::server::AppState::from_env();
    if let Some(b) = bind {
        server.bind = b;
    }
    if let Some(p) = port {
        server.port = p;
    }
    log::info!("starting transline on {}:{}", server.bind, server.port);
    lib::server::run_server(&server, state).await
}
