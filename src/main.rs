//! CLI entry point for waypost

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "waypost")]
#[command(version = "0.1.0")]
#[command(about = "A blog front-end engine for cursor-paginated headless content APIs", long_about = None)]
struct Cli {
    /// Set the base directory (defaults to current directory)
    #[arg(short, long, global = true)]
    cwd: Option<PathBuf>,

    /// Enable debug output
    #[arg(short, long, global = true)]
    debug: bool,

    /// Serve posts from a local JSON fixture instead of the API
    #[arg(long, global = true)]
    fixture: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize a new waypost site
    Init {
        /// Directory to initialize (defaults to current directory)
        #[arg(default_value = ".")]
        folder: PathBuf,
    },

    /// List posts from the content source
    #[command(alias = "l")]
    List {
        /// Keep loading pages until the listing is exhausted
        #[arg(short, long)]
        all: bool,
    },

    /// Show a single post with reading time and neighbors
    Show {
        /// Post uid
        uid: String,
    },

    /// Start the front-end server
    #[command(alias = "s")]
    Server {
        /// Port to listen on
        #[arg(short, long, default_value = "4000")]
        port: u16,

        /// IP address to bind to
        #[arg(short, long, default_value = "localhost")]
        ip: String,
    },

    /// Display version information
    Version,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.debug {
        "waypost=debug,info"
    } else {
        "waypost=info"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Determine base directory
    let base_dir = cli.cwd.unwrap_or_else(|| std::env::current_dir().unwrap());

    match cli.command {
        Commands::Init { folder } => {
            let target_dir = if folder.is_absolute() {
                folder
            } else {
                base_dir.join(folder)
            };
            tracing::info!("Initializing waypost site in {:?}", target_dir);
            waypost::commands::init::run(&target_dir)?;
            println!("Initialized waypost site in {:?}", target_dir);
        }

        Commands::List { all } => {
            let app = load_app(&base_dir, cli.fixture)?;
            let source = app.source()?;
            waypost::commands::list::run(&app, source.as_ref(), all).await?;
        }

        Commands::Show { uid } => {
            let app = load_app(&base_dir, cli.fixture)?;
            let source = app.source()?;
            waypost::commands::show::run(&app, source.as_ref(), &uid).await?;
        }

        Commands::Server { port, ip } => {
            let app = load_app(&base_dir, cli.fixture)?;
            let source = app.source()?;

            tracing::info!("Starting server at http://{}:{}", ip, port);
            waypost::server::start(app.config.clone(), source, &ip, port).await?;
        }

        Commands::Version => {
            println!("waypost version {}", env!("CARGO_PKG_VERSION"));
        }
    }

    Ok(())
}

/// Load the app, letting `--fixture` override the configured source
fn load_app(base_dir: &Path, fixture: Option<PathBuf>) -> Result<waypost::Waypost> {
    let mut app = waypost::Waypost::new(base_dir)?;
    if fixture.is_some() {
        app.config.fixture = fixture;
    }
    Ok(app)
}
