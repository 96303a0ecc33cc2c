//! Shared test doubles: a block-glyph shaper and an in-memory invite source.

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use invite_card::discord::{Guild, Invite, InviteSource};
use invite_card::{Anchor, CardError, FontRole, LocaleCatalog, Result, TextMetrics, TextShaper};
use peniko::kurbo::BezPath;

/// Width of every glyph block, in canvas units.
pub const GLYPH_WIDTH: f64 = 7.0;

/// Draws every character as a `GLYPH_WIDTH` x `size * 0.75` block.
///
/// All dimensions are exact binary fractions, so layout sums compare exactly.
#[derive(Default)]
pub struct BlockShaper {
    pub seen: Mutex<Vec<(String, FontRole)>>,
}

impl BlockShaper {
    pub fn width_of(text: &str) -> f64 {
        text.chars().count() as f64 * GLYPH_WIDTH
    }

    pub fn measured(&self) -> Vec<String> {
        self.seen.lock().unwrap().iter().map(|(t, _)| t.clone()).collect()
    }
}

impl TextShaper for BlockShaper {
    fn measure(&self, text: &str, role: FontRole, size: f32, anchor: Anchor) -> Result<TextMetrics> {
        self.seen.lock().unwrap().push((text.to_string(), role));
        let h = size as f64 * 0.75;
        let top = match anchor {
            Anchor::TopLeft => 0.0,
            Anchor::BaselineLeft => -h,
        };
        let mut path = BezPath::new();
        for (i, _) in text.chars().enumerate() {
            let x = i as f64 * GLYPH_WIDTH;
            path.move_to((x, top));
            path.line_to((x + GLYPH_WIDTH, top));
            path.line_to((x + GLYPH_WIDTH, top + h));
            path.line_to((x, top + h));
            path.close_path();
        }
        Ok(TextMetrics::new(path))
    }
}

/// Serves invites and icons from memory.
#[derive(Default)]
pub struct MemorySource {
    pub invites: HashMap<String, Invite>,
    pub icons: HashMap<String, Vec<u8>>,
    /// Shared so tests can inspect requests after the source moves into a renderer.
    pub icon_requests: Arc<Mutex<Vec<(String, bool)>>>,
}

impl MemorySource {
    pub fn with_invite(mut self, code: &str, invite: Invite) -> Self {
        self.invites.insert(code.to_string(), invite);
        self
    }

    pub fn with_icon(mut self, hash: &str, bytes: Vec<u8>) -> Self {
        self.icons.insert(hash.to_string(), bytes);
        self
    }
}

impl InviteSource for MemorySource {
    async fn get_invite(&self, code: &str) -> Result<Invite> {
        self.invites
            .get(code)
            .cloned()
            .ok_or_else(|| CardError::DataUnavailable(format!("unknown invite {code}")))
    }

    async fn get_icon(&self, _guild_id: &str, icon_hash: &str, animated: bool) -> Result<Vec<u8>> {
        self.icon_requests
            .lock()
            .unwrap()
            .push((icon_hash.to_string(), animated));
        self.icons
            .get(icon_hash)
            .cloned()
            .ok_or_else(|| CardError::DataUnavailable(format!("unknown icon {icon_hash}")))
    }
}

pub fn english() -> LocaleCatalog {
    LocaleCatalog {
        header: "You've been invited to join a server".into(),
        button: "Join".into(),
        online: "{{count}} Online".into(),
        members: "{{count}} Members".into(),
    }
}

pub fn invite(name: Option<&str>, icon: Option<&str>, features: &[&str], online: u64, members: u64) -> Invite {
    Invite {
        code: Some("test".into()),
        guild: Some(Guild {
            id: "1234".into(),
            name: name.map(str::to_string),
            icon: icon.map(str::to_string),
            features: features.iter().map(|f| f.to_string()).collect(),
        }),
        approximate_presence_count: online,
        approximate_member_count: members,
    }
}
