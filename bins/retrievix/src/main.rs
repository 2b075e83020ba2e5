//! Retrievix - lost-and-found matching from the command line
//!
//! Works against a local JSON snapshot (`--data items.json`) or the live item
//! service (`--remote`).

use clap::{Parser, Subcommand, ValueEnum};
use owo_colors::OwoColorize;
use retrievix_api_client::Registration;
use retrievix_match::ItemType;
use std::path::PathBuf;
use std::process::ExitCode;

mod backend;
mod commands;
mod failure;

use backend::{Backend, Context};
use commands::Effect;

/// Output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

/// Match lost and found item reports
#[derive(Parser)]
#[command(name = "retrievix")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Enable debug logging on stderr (JSON lines with --format json)
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Output format
    #[arg(short, long, global = true, value_enum, default_value = "text")]
    format: OutputFormat,

    /// Configuration file (defaults to .retrievix.toml and friends)
    #[arg(short, long, global = true, env = "RETRIEVIX_CONFIG")]
    config: Option<PathBuf>,

    /// JSON snapshot to use as the item store
    #[arg(short, long, global = true, conflicts_with = "remote")]
    data: Option<PathBuf>,

    /// Use the remote item service (RETRIEVIX_API_URL)
    #[arg(short, long, global = true)]
    remote: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Score two items against each other
    Score {
        /// First item id
        a: String,
        /// Second item id
        b: String,
    },

    /// Ranked found items for a user's lost reports
    Suggest {
        /// User id
        #[arg(short, long)]
        user: String,
    },

    /// A user's reports and match suggestions
    Dashboard {
        /// User id
        #[arg(short, long)]
        user: String,

        /// Print collected metrics after the dashboard
        #[arg(long)]
        with_metrics: bool,
    },

    /// Items of the opposite type similar to one item
    Similar {
        /// Item id
        id: String,
    },

    /// List items with filters and pagination
    Browse {
        /// lost or found
        #[arg(short = 't', long = "type")]
        item_type: ItemType,

        /// Text in title, description or location (case-insensitive)
        #[arg(short, long)]
        search: Option<String>,

        /// Exact category label
        #[arg(long)]
        category: Option<String>,

        /// Text in the location (case-sensitive)
        #[arg(long)]
        location: Option<String>,

        /// Exact date, YYYY-MM-DD
        #[arg(long)]
        date: Option<String>,

        /// Page number, starting at 1
        #[arg(short, long, default_value = "1")]
        page: usize,
    },

    /// Report a lost or found item
    Report {
        /// lost or found
        #[arg(short = 't', long = "type")]
        item_type: ItemType,

        #[arg(long)]
        title: String,

        #[arg(long)]
        category: String,

        #[arg(long)]
        description: String,

        #[arg(long)]
        location: String,

        /// Date lost or found, YYYY-MM-DD
        #[arg(long)]
        date: String,

        /// How to reach the reporter
        #[arg(long)]
        contact: String,

        /// Image file to attach
        #[arg(long)]
        image: Option<PathBuf>,

        /// Reporting user id
        #[arg(short, long)]
        user: String,
    },

    /// Delete one of your reports
    Delete {
        id: String,
        #[arg(short, long)]
        user: String,
    },

    /// Mark one of your reports as resolved
    Resolve {
        id: String,
        #[arg(short, long)]
        user: String,
    },

    /// List item categories
    Categories,

    /// Create an account on the remote service and sign in
    Register {
        #[arg(long)]
        name: String,

        #[arg(long)]
        email: String,

        #[arg(long, default_value = "")]
        phone: String,

        #[arg(long, env = "RETRIEVIX_PASSWORD", hide_env_values = true)]
        password: String,
    },

    /// Sign in to the remote service and print the session
    Login {
        #[arg(long)]
        email: String,

        #[arg(long, env = "RETRIEVIX_PASSWORD", hide_env_values = true)]
        password: String,
    },
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let config = retrievix_core::config::Config::load(cli.config.as_deref())?;
    let ctx = Context::new(&config, cli.format, cli.remote);

    // Commands that need no item store
    match &cli.command {
        Commands::Categories => return commands::categories::run(&ctx),
        Commands::Login { email, password } => {
            let client = backend::remote_client(&config)?;
            return commands::login::run(&client, email, password, &ctx).await;
        }
        Commands::Register {
            name,
            email,
            phone,
            password,
        } => {
            let client = backend::remote_client(&config)?;
            let registration = Registration {
                name: name.clone(),
                email: email.clone(),
                phone: phone.clone(),
                password: password.clone(),
            };
            return commands::login::register(&client, &registration, &ctx).await;
        }
        _ => {}
    }

    match Backend::open(&config, cli.data.as_deref(), cli.remote).await? {
        Backend::Local { service, path } => {
            if commands::run(&cli.command, &service, &ctx).await? == Effect::Changed {
                service.store().save_json_file(&path).await?;
                tracing::debug!(path = %path.display(), "snapshot saved");
            }
        }
        Backend::Remote(service) => {
            commands::run(&cli.command, &service, &ctx).await?;
        }
    }
    Ok(())
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    if cli.verbose {
        let mut config = retrievix_telemetry::TelemetryConfig::verbose();
        if cli.format == OutputFormat::Json {
            config.format = retrievix_telemetry::LogFormat::Json;
        }
        if let Err(e) = retrievix_telemetry::init_with_config(config) {
            eprintln!("{} {e}", "Warning:".yellow());
        }
    }

    let format = cli.format;
    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            let error = failure::classify(e);
            match format {
                OutputFormat::Json => {
                    let report = serde_json::json!({ "error": error.to_report() });
                    eprintln!("{report}");
                }
                OutputFormat::Text => eprintln!("{} {}", "Error:".red().bold(), error),
            }
            ExitCode::from(u8::try_from(error.code.exit_code()).unwrap_or(1))
        }
    }
}
