//! invite-card: render server invite cards as SVG.
//!
//! `render` writes one card to stdout or a file; `serve` exposes
//! `GET /{code}` over HTTP; `config` prints the effective configuration.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::info;

use invite_card::server;
use invite_card::{Config, DiscordClient, FontSet, InviteRenderer, Locales, RenderRequest, logging, paths};

/// Server invite card renderer
#[derive(Parser, Debug)]
#[command(name = "invite-card", version, about = "Render server invite cards as SVG")]
struct Args {
    /// Configuration file (defaults to ~/.config/invite-card/config.toml)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render a single invite
    Render {
        /// Invite code, e.g. `rust-lang`
        code: String,

        /// Language for the card's strings
        #[arg(short, long, default_value = "en")]
        language: String,

        /// Embed animated icons as static images
        #[arg(long)]
        no_animation: bool,

        /// Write the SVG here instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Serve cards over HTTP
    Serve {
        /// Address to bind, overrides `server.bind`
        #[arg(short, long)]
        bind: Option<SocketAddr>,
    },
    /// Print the effective configuration as TOML
    Config,
}

fn main() -> Result<()> {
    let args = Args::parse();
    let _log_guard = logging::init();

    let config_path = args.config.clone().unwrap_or_else(paths::default_config_file);
    let config = Config::load(&config_path)
        .with_context(|| format!("loading {}", config_path.display()))?;

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .context("failed to create Tokio runtime")?;

    match args.command {
        Command::Render {
            code,
            language,
            no_animation,
            output,
        } => {
            let request = RenderRequest::new(code)
                .language(language)
                .animation(!no_animation);
            let renderer = build_renderer(&config)?;
            let svg = runtime.block_on(renderer.render(&request))?;
            match output {
                Some(path) => {
                    std::fs::write(&path, svg)
                        .with_context(|| format!("writing {}", path.display()))?;
                    info!(path = %path.display(), "card written");
                }
                None => println!("{svg}"),
            }
        }
        Command::Serve { bind } => {
            let addr = match bind {
                Some(addr) => addr,
                None => config
                    .server
                    .bind
                    .parse()
                    .with_context(|| format!("invalid server.bind '{}'", config.server.bind))?,
            };
            let renderer = build_renderer(&config)?;
            runtime.block_on(server::serve(addr, renderer))?;
        }
        Command::Config => print!("{}", config.to_toml()),
    }

    Ok(())
}

/// Load fonts, locales and the API client. Fonts are required for every
/// card, so a missing font stops the process here.
fn build_renderer(config: &Config) -> Result<Arc<InviteRenderer<DiscordClient, FontSet>>> {
    let fonts = FontSet::load(&config.fonts).context("card fonts are required")?;
    let locales = Locales::load(&config.locale)?;
    let source = DiscordClient::new(&config.discord)?;
    Ok(Arc::new(InviteRenderer::new(source, fonts, locales)))
}
