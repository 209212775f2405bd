//! CLI entry point for landing-rs

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "landing-rs")]
#[command(version)]
#[command(about = "Marketing site server and static generator backed by a headless CMS", long_about = None)]
struct Cli {
    /// Set the base directory (defaults to current directory)
    #[arg(short, long, global = true)]
    cwd: Option<PathBuf>,

    /// Enable debug output
    #[arg(short, long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start a server that renders pages on request
    #[command(alias = "s")]
    Server {
        /// Port to listen on
        #[arg(short, long, default_value = "4000")]
        port: u16,

        /// IP address to bind to
        #[arg(short, long, default_value = "localhost")]
        ip: String,

        /// Open browser automatically
        #[arg(short, long)]
        open: bool,
    },

    /// Generate static files
    #[command(alias = "g")]
    Generate,

    /// Render one page to stdout
    Render {
        /// Page slug (defaults to the configured default page)
        slug: Option<String>,
    },

    /// List site information
    List {
        /// What to list (pages, variants, blocks)
        #[arg(default_value = "pages")]
        r#type: String,
    },

    /// Clean the public folder
    Clean,

    /// Display version information
    Version,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    if let Commands::Version = cli.command {
        println!("landing-rs version {}", env!("CARGO_PKG_VERSION"));
        return Ok(());
    }

    // Determine base directory
    let base_dir = match cli.cwd {
        Some(dir) => dir,
        None => std::env::current_dir().context("Failed to read current directory")?,
    };
    let app = landing_rs::Landing::new(&base_dir)?;

    // Initialize logging
    let filter = if cli.debug || app.config.verbose_logs {
        "landing_rs=debug,info"
    } else {
        "landing_rs=info"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    match cli.command {
        Commands::Server { port, ip, open } => {
            tracing::info!("Starting server at http://{}:{}", ip, port);
            landing_rs::server::start(&app, &ip, port, open).await?;
        }

        Commands::Generate => {
            tracing::info!("Generating static files...");
            let summary = app.generate().await?;
            println!(
                "Generated {} pages into {:?}",
                summary.pages, app.public_dir
            );
        }

        Commands::Render { slug } => {
            let html = landing_rs::commands::render::run(&app, slug.as_deref()).await?;
            println!("{}", html);
        }

        Commands::List { r#type } => {
            landing_rs::commands::list::run(&app, &r#type).await?;
        }

        Commands::Clean => {
            tracing::info!("Cleaning public folder...");
            app.clean()?;
            println!("Cleaned successfully!");
        }

        Commands::Version => {}
    }

    Ok(())
}
