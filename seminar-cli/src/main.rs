mod commands;
mod render;

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::Result;
use clap::{Parser, Subcommand};
use seminar_core::AppContext;
use seminar_core::config::Config;
use seminar_core::dashboard::DashboardTab;
use seminar_core::gateway::{FixtureGateway, HttpGateway};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "seminars")]
#[command(about = "Browse member seminars, register, rate them and export them to your calendar")]
struct Cli {
    /// Serve data from a fixture JSON file instead of the member API
    #[arg(long, global = true)]
    fixtures: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List seminars
    List {
        /// Show past seminars instead of upcoming ones
        #[arg(long)]
        past: bool,
    },
    /// Show the details of a seminar
    Show { id: u64 },
    /// Register for a seminar
    Register {
        id: u64,

        #[arg(long)]
        name: String,

        #[arg(long)]
        email: String,

        #[arg(long, default_value = "")]
        phone: String,

        #[arg(long, default_value = "")]
        company: String,

        /// Dietary requirements
        #[arg(long, default_value = "")]
        dietary: String,

        /// Special requests
        #[arg(long, default_value = "")]
        requests: String,
    },
    /// Cancel your registration for a seminar
    Cancel { id: u64 },
    /// Save a seminar as an .ics file in the download directory
    Export { id: u64 },
    /// Rate a seminar (each score 1-5)
    Rate {
        id: u64,

        #[arg(long)]
        skill: Option<u8>,

        #[arg(long)]
        quality: Option<u8>,

        #[arg(long)]
        usefulness: Option<u8>,
    },
    /// Show the membership dashboard
    Dashboard {
        /// overview, documents, notifications or settings
        #[arg(short, long, default_value = "overview", value_parser = parse_tab)]
        tab: DashboardTab,

        /// Filter documents by title or type
        #[arg(short, long)]
        search: Option<String>,
    },
    /// Show config paths, or write a default config file
    Config {
        #[command(subcommand)]
        action: Option<ConfigAction>,
    },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Write a commented default config file
    Init,
}

fn parse_tab(s: &str) -> Result<DashboardTab, String> {
    match s {
        "overview" => Ok(DashboardTab::Overview),
        "documents" => Ok(DashboardTab::Documents),
        "notifications" => Ok(DashboardTab::Notifications),
        "settings" => Ok(DashboardTab::Settings),
        _ => Err(format!(
            "unknown tab '{s}'. Expected overview, documents, notifications or settings"
        )),
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    if let Commands::Config { action } = cli.command {
        return match action {
            Some(ConfigAction::Init) => commands::config::init(),
            None => commands::config::run(),
        };
    }

    let config = Config::load()?;
    let ctx = start_session(config, cli.fixtures.as_deref()).await?;

    let result = match cli.command {
        Commands::List { past } => commands::list::run(&ctx, past).await,
        Commands::Show { id } => commands::show::run(&ctx, id.into()).await,
        Commands::Register {
            id,
            name,
            email,
            phone,
            company,
            dietary,
            requests,
        } => {
            let form = seminar_core::registration::RegistrationForm {
                name,
                email,
                phone,
                company,
                dietary_requirements: dietary,
                special_requests: requests,
            };
            commands::register::run(&ctx, id.into(), form).await
        }
        Commands::Cancel { id } => commands::cancel::run(&ctx, id.into()).await,
        Commands::Export { id } => commands::export::run(&ctx, id.into()).await,
        Commands::Rate {
            id,
            skill,
            quality,
            usefulness,
        } => commands::rate::run(&ctx, id.into(), skill, quality, usefulness).await,
        Commands::Dashboard { tab, search } => commands::dashboard::run(&ctx, tab, search).await,
        Commands::Config { .. } => unreachable!("handled before the session starts"),
    };

    ctx.logout();
    result
}

async fn start_session(config: Config, fixtures: Option<&Path>) -> Result<AppContext> {
    let ctx = match fixtures {
        Some(path) => {
            tracing::debug!(path = %path.display(), "using fixture data");
            let gateway = FixtureGateway::load(path)?;
            AppContext::start(config, Arc::new(gateway)).await
        }
        None => {
            let gateway = HttpGateway::new(&config)?;
            AppContext::start(config, Arc::new(gateway)).await
        }
    };
    Ok(ctx)
}
