//! Zoilist CLI - Command line interface for Zoilist
//!
//! Posts API review alerts and reminder digests to Slack.

mod commands;

use clap::{Parser, Subcommand};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};
use zoilist_core::{Config, Secrets};

use commands::{NotifyArgs, RemindArgs};

/// Zoilist: API review notifications for Slack
#[derive(Parser, Debug)]
#[command(name = "zoilist")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Print messages instead of posting them (no Slack token needed)
    #[arg(long, global = true, env = "ZOILIST_DRY_RUN")]
    dry_run: bool,

    /// Slack channel to post to (overrides config and env)
    #[arg(long, global = true)]
    channel: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Show version information
    Version,

    /// Handle one webhook delivery and alert if it needs API review
    #[command(visible_alias = "n")]
    Notify(NotifyArgs),

    /// Post a digest of pull requests still awaiting review
    #[command(visible_alias = "r")]
    Remind(RemindArgs),

    /// Show current configuration
    Config,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    if cli.verbose {
        tracing::info!("Verbose mode enabled");
    }

    // Load configuration with overrides
    let config = Config::load_with_overrides(cli.channel.clone())?;

    if cli.verbose {
        tracing::info!(
            channel = %config.slack.channel,
            team = %format!("{}/{}", config.team.org, config.team.slug),
            label = %config.review.label,
            queries = config.reminder.queries.len(),
            "Configuration loaded"
        );
    }

    match cli.command {
        Some(Commands::Version) => {
            println!("zoilist {}", env!("CARGO_PKG_VERSION"));
        }
        Some(Commands::Notify(args)) => {
            let secrets = Secrets::load()?;
            args.execute(config, &secrets, cli.dry_run).await?;
        }
        Some(Commands::Remind(args)) => {
            let secrets = Secrets::load()?;
            args.execute(config, &secrets, cli.dry_run).await?;
        }
        Some(Commands::Config) => {
            println!("Zoilist Configuration");
            println!("=====================");
            println!();
            println!("Slack:");
            println!("  channel: {}", config.slack.channel);
            println!();
            println!("Team:");
            println!("  github team: {}/{}", config.team.org, config.team.slug);
            println!("  mention id: {}", config.team.mention_id);
            println!("  display name: {}", config.team.display_name);
            println!();
            println!("Review label:");
            println!("  name: {}", config.review.label);
            match config.review.label_id {
                Some(id) => println!("  id: {}", id),
                None => println!("  id: (match by name)"),
            }
            println!();
            println!("Reminder queries:");
            for query in &config.reminder.queries {
                println!("  {} {}", query.repo, query.query);
            }
            println!();
            if let Some(path) = Config::default_config_path() {
                println!("Config file: {}", path.display());
                if path.exists() {
                    println!("  (exists)");
                } else {
                    println!("  (not found - using defaults)");
                }
            }
        }
        None => {
            println!("Zoilist - API review notifications for Slack");
            println!();
            println!("Use --help for usage information");
        }
    }

    Ok(())
}
