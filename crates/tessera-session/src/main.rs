mod autostart;
mod event_loop;
mod handoff;
mod session;

use anyhow::Result;
use clap::{Parser, Subcommand};
use handoff::Handoff;
use session::{ConfigSource, Session};
use std::path::PathBuf;
use tessera_config::Theme;
use tracing::info;

/// Assemble a themed window manager configuration and hand it to the host
#[derive(Debug, Parser)]
#[command(name = "tessera", version)]
struct Cli {
    /// Config file (default: ~/.config/tessera/config.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Theme to use instead of the one in the config file
    #[arg(long, global = true)]
    theme: Option<String>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Assemble once and report errors
    Check,
    /// Assemble once and write the result as JSON
    Dump {
        /// Write to a file instead of stdout
        #[arg(long, short)]
        output: Option<PathBuf>,
    },
    /// List selectable themes
    Themes,
    /// Start a session: run autostart, then reload on SIGHUP
    Run {
        #[arg(long, short)]
        output: Option<PathBuf>,
    },
    /// Write the default config file if there is none
    Init,
}

fn main() -> Result<()> {
    // Logs go to stderr, stdout carries the configuration
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let source = cli
        .config
        .clone()
        .map_or(ConfigSource::Default, ConfigSource::Path);
    let session = Session::new(source.clone(), cli.theme.clone());

    match cli.command.unwrap_or(Command::Run { output: None }) {
        Command::Check => {
            let config = session.build()?;
            info!(
                "Configuration OK: theme '{}', {} keys, {} groups",
                config.theme,
                config.keys.len(),
                config.groups.len()
            );
        }
        Command::Dump { output } => {
            let config = session.build()?;
            Handoff::new(output).write(&config)?;
        }
        Command::Themes => {
            let config = source.load()?;
            for name in config.theme_names() {
                let marker = if name == config.theme.name { "*" } else { " " };
                let kind = if name.parse::<Theme>().is_ok() && !config.palettes.contains_key(&name) {
                    "built-in"
                } else {
                    "user"
                };
                println!("{} {} ({})", marker, name, kind);
            }
        }
        Command::Run { output } => {
            info!("tessera session starting...");
            event_loop::run(session, Handoff::new(output))?;
        }
        Command::Init => source.init()?,
    }

    Ok(())
}
