//! Partnered / verified badge resolution.
//!
//! Flags are evaluated in a fixed order and a later match replaces an earlier
//! one, so a guild that is both partnered and verified shows the verified
//! badge. Whether both flags should instead produce a combined badge is an
//! open product question; the replacement order is kept as observed.

use std::collections::BTreeSet;

use peniko::Color;
use peniko::kurbo::{BezPath, Shape};

use crate::error::{CardError, Result};

/// Gap between the badge and the server name.
pub const BADGE_MARGIN_RIGHT: f64 = 8.0;

/// Eight-point star drawn behind the badge icon, 16x16 units.
const FLOWER_STAR: &str = "M16 8 L13.913 10.449 L13.657 13.657 L10.449 13.913 L8 16 \
    L5.551 13.913 L2.343 13.657 L2.087 10.449 L0 8 L2.087 5.551 L2.343 2.343 \
    L5.551 2.087 L8 0 L10.449 2.087 L13.657 2.343 L13.913 5.551 Z";

const VERIFIED_ICON: &str = "M7.4 11.17 L4 7.77 L5.13 6.64 L7.4 8.9 L11.07 5.24 L12.2 6.37 Z";

const PARTNER_ICON: &str = "M8 4.2 L9.1 6.9 L11.8 8 L9.1 9.1 L8 11.8 L6.9 9.1 L4.2 8 L6.9 6.9 Z";

/// Guild feature flags that map to a badge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum BadgeKind {
    Partnered,
    Verified,
}

/// Order in which flags are checked; the last match wins.
const EVALUATION_ORDER: [BadgeKind; 2] = [BadgeKind::Partnered, BadgeKind::Verified];

impl BadgeKind {
    /// Map a guild feature string (`"PARTNERED"`, `"VERIFIED"`) to a badge.
    pub fn from_feature(feature: &str) -> Option<Self> {
        match feature {
            "PARTNERED" => Some(BadgeKind::Partnered),
            "VERIFIED" => Some(BadgeKind::Verified),
            _ => None,
        }
    }

    pub fn flower_color(self) -> Color {
        match self {
            BadgeKind::Partnered => Color::from_rgb8(0x40, 0x87, 0xed),
            BadgeKind::Verified => Color::from_rgb8(0x72, 0x89, 0xda),
        }
    }

    fn icon_svg(self) -> &'static str {
        match self {
            BadgeKind::Partnered => PARTNER_ICON,
            BadgeKind::Verified => VERIFIED_ICON,
        }
    }
}

/// A resolved badge, ready to draw at its own local origin.
#[derive(Debug, Clone, PartialEq)]
pub struct Badge {
    pub kind: BadgeKind,
    pub flower_color: Color,
    pub flower: BezPath,
    pub icon: BezPath,
}

impl Badge {
    fn build(kind: BadgeKind) -> Result<Self> {
        Ok(Self {
            kind,
            flower_color: kind.flower_color(),
            flower: parse_glyph(FLOWER_STAR)?,
            icon: parse_glyph(kind.icon_svg())?,
        })
    }

    /// Rendered width of the flower star.
    pub fn width(&self) -> f64 {
        self.flower.bounding_box().width()
    }

    /// Left padding the server name needs to clear this badge.
    pub fn name_padding(&self) -> f64 {
        self.width() + BADGE_MARGIN_RIGHT
    }
}

/// Pick the badge for a set of flags, if any.
pub fn resolve(badges: &BTreeSet<BadgeKind>) -> Result<Option<Badge>> {
    EVALUATION_ORDER
        .iter()
        .copied()
        .filter(|kind| badges.contains(kind))
        .last()
        .map(Badge::build)
        .transpose()
}

/// Same as [`resolve`], starting from raw guild feature strings.
pub fn resolve_features<S: AsRef<str>>(features: &[S]) -> Result<Option<Badge>> {
    resolve(&badges_from_features(features))
}

pub fn badges_from_features<S: AsRef<str>>(features: &[S]) -> BTreeSet<BadgeKind> {
    features
        .iter()
        .filter_map(|f| BadgeKind::from_feature(f.as_ref()))
        .collect()
}

fn parse_glyph(svg: &str) -> Result<BezPath> {
    BezPath::from_svg(svg)
        .map_err(|e| CardError::InvariantViolation(format!("built-in badge glyph: {e}")))
}
