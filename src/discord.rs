//! Invite metadata and icon retrieval.
//!
//! [`InviteSource`] is the seam between the renderer and the network. The
//! production implementation, [`DiscordClient`], talks to the Discord REST
//! API for invite records and to the CDN for icon bytes.

use std::future::Future;
use std::time::Duration;

use serde::Deserialize;
use tracing::{debug, warn};
use url::Url;

use crate::config::DiscordSettings;
use crate::error::{CardError, Result};

/// Icon hashes with this prefix belong to animated icons.
pub const ANIMATED_ICON_PREFIX: &str = "a_";

/// Invite record as returned by `GET /invites/{code}?with_counts=true`.
#[derive(Debug, Clone, Deserialize)]
pub struct Invite {
    pub code: Option<String>,
    pub guild: Option<Guild>,
    #[serde(default)]
    pub approximate_presence_count: u64,
    #[serde(default)]
    pub approximate_member_count: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Guild {
    pub id: String,
    pub name: Option<String>,
    pub icon: Option<String>,
    #[serde(default)]
    pub features: Vec<String>,
}

impl Guild {
    pub fn has_animated_icon(&self) -> bool {
        self.icon
            .as_deref()
            .is_some_and(|hash| hash.starts_with(ANIMATED_ICON_PREFIX))
    }
}

/// Where invite records and icons come from.
pub trait InviteSource: Send + Sync {
    fn get_invite(&self, code: &str) -> impl Future<Output = Result<Invite>> + Send;

    /// Encoded icon bytes; GIF when `animated`, JPEG otherwise.
    fn get_icon(
        &self,
        guild_id: &str,
        icon_hash: &str,
        animated: bool,
    ) -> impl Future<Output = Result<Vec<u8>>> + Send;
}

// ---------------------------------------------------------------------------
// DiscordClient
// ---------------------------------------------------------------------------

/// HTTP client for the Discord API and CDN.
#[derive(Debug, Clone)]
pub struct DiscordClient {
    http: reqwest::Client,
    api_base: Url,
    cdn_base: Url,
    icon_size: u32,
}

impl DiscordClient {
    pub fn new(settings: &DiscordSettings) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(settings.timeout_secs))
            .user_agent(settings.user_agent.clone())
            .build()
            .map_err(|e| CardError::Config(format!("http client: {e}")))?;
        Ok(Self {
            http,
            api_base: parse_base(&settings.api_base)?,
            cdn_base: parse_base(&settings.cdn_base)?,
            icon_size: settings.icon_size,
        })
    }

    pub fn invite_url(&self, code: &str) -> Result<Url> {
        let mut url = self.api_base.clone();
        url.path_segments_mut()
            .map_err(|_| CardError::Config(format!("api base '{}' cannot hold a path", self.api_base)))?
            .pop_if_empty()
            .push("invites")
            .push(code);
        url.query_pairs_mut().append_pair("with_counts", "true");
        Ok(url)
    }

    pub fn icon_url(&self, guild_id: &str, icon_hash: &str, animated: bool) -> Result<Url> {
        let ext = if animated { "gif" } else { "jpg" };
        let mut url = self.cdn_base.clone();
        url.path_segments_mut()
            .map_err(|_| CardError::Config(format!("cdn base '{}' cannot hold a path", self.cdn_base)))?
            .pop_if_empty()
            .push("icons")
            .push(guild_id)
            .push(&format!("{icon_hash}.{ext}"));
        url.query_pairs_mut()
            .append_pair("size", &self.icon_size.to_string());
        Ok(url)
    }
}

impl InviteSource for DiscordClient {
    async fn get_invite(&self, code: &str) -> Result<Invite> {
        let url = self.invite_url(code)?;
        debug!(%url, "fetching invite");

        let response = self.http.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            warn!(code, status = status.as_u16(), "invite lookup failed");
            return Err(CardError::DataUnavailable(format!(
                "invite '{code}' returned {status}"
            )));
        }
        Ok(response.json::<Invite>().await?)
    }

    async fn get_icon(&self, guild_id: &str, icon_hash: &str, animated: bool) -> Result<Vec<u8>> {
        let url = self.icon_url(guild_id, icon_hash, animated)?;
        debug!(%url, "fetching icon");

        let response = self.http.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            warn!(guild_id, status = status.as_u16(), "icon fetch failed");
            return Err(CardError::DataUnavailable(format!(
                "icon for guild {guild_id} returned {status}"
            )));
        }
        Ok(response.bytes().await?.to_vec())
    }
}

fn parse_base(raw: &str) -> Result<Url> {
    Url::parse(raw).map_err(|e| CardError::Config(format!("invalid base url '{raw}': {e}")))
}
