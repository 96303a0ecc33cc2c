//! invite-card: server invite cards as SVG.
//!
//! Given an invite code, fetches the invite record and guild icon, resolves
//! the locale strings and lays out a fixed 430x110 card: header, icon, server
//! name with an optional partnered/verified badge, online and member counts,
//! and a join button. Text is shaped into outlines with the card's own fonts
//! so the document renders identically everywhere.
//!
//! ```no_run
//! # async fn demo() -> invite_card::Result<()> {
//! use invite_card::{Config, DiscordClient, FontSet, InviteRenderer, Locales, RenderRequest};
//!
//! let config = Config::default();
//! let renderer = InviteRenderer::new(
//!     DiscordClient::new(&config.discord)?,
//!     FontSet::load(&config.fonts)?,
//!     Locales::load(&config.locale)?,
//! );
//! let svg = renderer.render(&RenderRequest::new("rust-lang").language("de")).await?;
//! # let _ = svg;
//! # Ok(())
//! # }
//! ```

pub mod badge;
pub mod compose;
pub mod config;
pub mod discord;
pub mod error;
pub mod format;
pub mod layout;
pub mod locale;
pub mod logging;
pub mod paths;
pub mod render;
pub mod server;
pub mod svg;
pub mod text;

pub use compose::{CARD_HEIGHT, CARD_WIDTH, Card, CardSpec, compose};
pub use config::Config;
pub use discord::{DiscordClient, Invite, InviteSource};
pub use error::{CardError, Result};
pub use locale::{LocaleCatalog, Locales};
pub use render::{InviteRenderer, RenderRequest};
pub use text::{Anchor, FontRole, FontSet, TextMetrics, TextShaper};
