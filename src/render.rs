//! End-to-end rendering: fetch, resolve, compose, serialize.
//!
//! Fetching suspends on I/O; composition does not. Once both the invite and
//! its icon are in hand, the layout pass runs to completion synchronously and
//! is never abandoned halfway, so a caller either gets a complete document or
//! an error.

use tracing::{debug, info, instrument};

use crate::badge::badges_from_features;
use crate::compose::{Card, CardSpec, compose};
use crate::discord::{Invite, InviteSource};
use crate::error::{CardError, Result};
use crate::locale::Locales;
use crate::svg::to_svg;
use crate::text::TextShaper;

/// Options for one render request.
#[derive(Debug, Clone)]
pub struct RenderRequest {
    pub invite_code: String,
    pub language: String,
    /// Keep animated icons animated. When off, animated icons are fetched
    /// and embedded as static JPEG.
    pub animation: bool,
}

impl RenderRequest {
    pub fn new(invite_code: impl Into<String>) -> Self {
        Self {
            invite_code: invite_code.into(),
            language: "en".to_string(),
            animation: true,
        }
    }

    pub fn language(mut self, language: impl Into<String>) -> Self {
        self.language = language.into();
        self
    }

    pub fn animation(mut self, animation: bool) -> Self {
        self.animation = animation;
        self
    }
}

/// Owns the collaborators a render needs. Shared read-only between requests.
pub struct InviteRenderer<S, T> {
    source: S,
    shaper: T,
    locales: Locales,
}

impl<S: InviteSource, T: TextShaper> InviteRenderer<S, T> {
    pub fn new(source: S, shaper: T, locales: Locales) -> Self {
        Self {
            source,
            shaper,
            locales,
        }
    }

    pub fn locales(&self) -> &Locales {
        &self.locales
    }

    /// Render an invite to an SVG document.
    #[instrument(skip(self), fields(code = %request.invite_code))]
    pub async fn render(&self, request: &RenderRequest) -> Result<String> {
        let card = self.render_card(request).await?;
        let svg = to_svg(&card);
        info!(
            language = %request.language,
            bytes = svg.len(),
            "rendered invite card"
        );
        Ok(svg)
    }

    /// Fetch and compose without serializing.
    pub async fn render_card(&self, request: &RenderRequest) -> Result<Card> {
        let invite = self.source.get_invite(&request.invite_code).await?;
        let spec = self.card_spec(invite, request).await?;
        let catalog = self.locales.resolve(&spec.locale);
        compose(&spec, catalog, &self.shaper)
    }

    async fn card_spec(&self, invite: Invite, request: &RenderRequest) -> Result<CardSpec> {
        let guild = invite.guild.ok_or_else(|| {
            CardError::InvariantViolation(format!(
                "invite '{}' has no guild",
                request.invite_code
            ))
        })?;
        let server_name = guild.name.clone().ok_or_else(|| {
            CardError::InvariantViolation(format!("guild {} has no name", guild.id))
        })?;

        let animated = request.animation && guild.has_animated_icon();
        let icon = match guild.icon.as_deref() {
            Some(hash) => Some(self.source.get_icon(&guild.id, hash, animated).await?),
            None => {
                debug!(guild = %guild.id, "guild has no icon");
                None
            }
        };

        Ok(CardSpec {
            server_name,
            icon,
            icon_is_animated: animated,
            badges: badges_from_features(&guild.features),
            online_count: invite.approximate_presence_count,
            member_count: invite.approximate_member_count,
            locale: request.language.clone(),
        })
    }
}
