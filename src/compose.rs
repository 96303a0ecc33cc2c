//! Card composition: turns a [`CardSpec`] into a positioned box tree.
//!
//! The recipe is a single synchronous pass. Every offset downstream depends
//! on the measured size of what was placed before it, so runs are measured
//! and placed strictly left to right, top to bottom:
//!
//! ```text
//! canvas 430x110
//! └─ main (16,16) 398x78
//!    ├─ header 398x16            HEADER TEXT
//!    └─ content (0,28) 398x50
//!       ├─ icon 50x50 (squircle clip)
//!       ├─ button (right, v-centered) 94.75x40
//!       └─ inner (66, v-centered) 227.25x38
//!          ├─ badge strip (0,2)
//!          ├─ server name (badge padding, centered in 20)
//!          └─ presence (0,22) ● 1,234 Online ● 5,678 Members
//! ```

use std::collections::BTreeSet;

use peniko::Color;
use peniko::kurbo::{Point, Rect, Size};
use tracing::debug;

use crate::badge::{self, Badge, BadgeKind};
use crate::error::Result;
use crate::layout::{
    Drawable, Element, ImageFormat, LayoutBox, Part, center_horizontal, center_vertical,
    right_align, stack_right,
};
use crate::locale::LocaleCatalog;
use crate::text::{Anchor, FontRole, TextShaper};

// --- Canvas ---

pub const CARD_WIDTH: f64 = 430.0;
pub const CARD_HEIGHT: f64 = 110.0;
const CARD_RADIUS: f64 = 3.0;
const PADDING: f64 = 16.0;

// --- Header ---

const HEADER_FONT_SIZE: f32 = 12.0;
const HEADER_LINE_HEIGHT: f64 = 16.0;
const HEADER_MARGIN_BOTTOM: f64 = 12.0;

// --- Icon ---

const ICON_SIZE: f64 = 50.0;
const ICON_RADIUS: f64 = 16.0;
const ACRONYM_FONT_SIZE: f32 = 16.0;

// --- Server name ---

const SERVER_NAME_SIZE: f32 = 16.0;
const SERVER_NAME_LINE_HEIGHT: f64 = 20.0;
const SERVER_NAME_MARGIN_BOTTOM: f64 = 2.0;

// --- Presence ---

const PRESENCE_FONT_SIZE: f32 = 14.0;
const PRESENCE_LINE_HEIGHT: f64 = 16.0;
const PRESENCE_TEXT_MARGIN_RIGHT: f64 = 8.0;
const PRESENCE_DOT_SIZE: f64 = 8.0;
const PRESENCE_DOT_MARGIN_RIGHT: f64 = 4.0;

// --- Button ---

const BUTTON_WIDTH: f64 = 94.75;
const BUTTON_HEIGHT: f64 = 40.0;
const BUTTON_MARGIN_LEFT: f64 = 10.0;
const BUTTON_RADIUS: f64 = 3.0;
const BUTTON_FONT_SIZE: f32 = 14.0;

// --- Badge ---

const BADGE_OFFSET_Y: f64 = 2.0;

// --- Palette ---

const BACKGROUND: Color = Color::from_rgb8(0x2f, 0x31, 0x36);
const MUTED: Color = Color::from_rgb8(0xb9, 0xbb, 0xbe);
const WHITE: Color = Color::from_rgb8(0xff, 0xff, 0xff);
const GREEN: Color = Color::from_rgb8(0x43, 0xb5, 0x81);
const MEMBER_GRAY: Color = Color::from_rgb8(0x74, 0x7f, 0x8d);
const PLACEHOLDER: Color = Color::from_rgb8(0x36, 0x39, 0x3f);
const ACRONYM: Color = Color::from_rgb8(0xdc, 0xdd, 0xde);

/// Everything the composer needs to know about one invite.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardSpec {
    pub server_name: String,
    /// Encoded icon bytes; `None` when the guild has no icon.
    pub icon: Option<Vec<u8>>,
    /// Embed the icon as GIF rather than JPEG.
    pub icon_is_animated: bool,
    pub badges: BTreeSet<BadgeKind>,
    pub online_count: u64,
    pub member_count: u64,
    pub locale: String,
}

/// A fully composed card. Immutable once built.
#[derive(Debug, Clone, PartialEq)]
pub struct Card {
    root: LayoutBox,
}

impl Card {
    pub fn root(&self) -> &LayoutBox {
        &self.root
    }

    pub fn width(&self) -> f64 {
        self.root.width
    }

    pub fn height(&self) -> f64 {
        self.root.height
    }

    /// Bounds of a part in absolute canvas coordinates.
    pub fn bounds(&self, part: Part) -> Option<Rect> {
        self.root.bounds_within(part)
    }

    /// Bounds of a part relative to the box that contains it.
    pub fn local_bounds(&self, part: Part) -> Option<Rect> {
        self.root.local_bounds(part)
    }

    /// Source string of a glyph run.
    pub fn text(&self, part: Part) -> Option<&str> {
        match self.root.find(part)? {
            Element::Shape {
                drawable: Drawable::Text { content, .. },
                ..
            } => Some(content),
            _ => None,
        }
    }
}

/// Lay out a card for `spec` using the strings in `catalog`.
pub fn compose(spec: &CardSpec, catalog: &LocaleCatalog, shaper: &impl TextShaper) -> Result<Card> {
    let mut canvas = LayoutBox::new(Part::Canvas, CARD_WIDTH, CARD_HEIGHT);
    canvas.draw(
        Part::Background,
        Drawable::Rect {
            rect: canvas.size().to_rect(),
            radius: CARD_RADIUS,
            fill: BACKGROUND,
        },
    );

    let mut main = canvas
        .nest(Part::Main, CARD_WIDTH - 2.0 * PADDING, CARD_HEIGHT - 2.0 * PADDING)
        .at(PADDING, PADDING);

    let header = header_row(&main, catalog, shaper)?;
    let content_y = header.height + HEADER_MARGIN_BOTTOM;
    main.push(header);

    let mut content = main
        .nest(Part::Content, main.width, main.height - content_y)
        .at(0.0, content_y);
    draw_icon(&mut content, spec, shaper)?;
    let button = join_button(&content, catalog, shaper)?;
    content.push(button);
    let inner = inner_block(&content, spec, catalog, shaper)?;
    content.push(inner);
    main.push(content);

    canvas.push(main);

    debug!(
        server = %spec.server_name,
        badges = ?spec.badges,
        online = spec.online_count,
        members = spec.member_count,
        "composed card"
    );
    Ok(Card { root: canvas })
}

fn header_row(
    main: &LayoutBox,
    catalog: &LocaleCatalog,
    shaper: &impl TextShaper,
) -> Result<LayoutBox> {
    let mut header = main.nest(Part::Header, main.width, HEADER_LINE_HEIGHT);
    let text = catalog.header.to_uppercase();
    let metrics = shaper.measure(&text, FontRole::Bold, HEADER_FONT_SIZE, Anchor::TopLeft)?;
    header.draw(Part::HeaderText, Drawable::anchored_text(text, metrics, MUTED));
    Ok(header)
}

fn draw_icon(content: &mut LayoutBox, spec: &CardSpec, shaper: &impl TextShaper) -> Result<()> {
    let slot = Rect::new(0.0, 0.0, ICON_SIZE, ICON_SIZE);
    match &spec.icon {
        Some(data) => {
            let format = if spec.icon_is_animated {
                ImageFormat::Gif
            } else {
                ImageFormat::Jpeg
            };
            content.draw(
                Part::Icon,
                Drawable::Image {
                    rect: slot,
                    clip_radius: ICON_RADIUS,
                    format,
                    data: data.clone(),
                },
            );
        }
        None => {
            content.draw(
                Part::IconPlaceholder,
                Drawable::Rect {
                    rect: slot,
                    radius: ICON_RADIUS,
                    fill: PLACEHOLDER,
                },
            );
            let letters = acronym(&spec.server_name);
            if !letters.is_empty() {
                let metrics =
                    shaper.measure(&letters, FontRole::Medium, ACRONYM_FONT_SIZE, Anchor::TopLeft)?;
                let origin = Point::new(
                    center_horizontal(metrics.size(), ICON_SIZE),
                    center_vertical(metrics.size(), ICON_SIZE),
                );
                content.draw(
                    Part::IconAcronym,
                    Drawable::placed_text(letters, metrics, origin, ACRONYM),
                );
            }
        }
    }
    Ok(())
}

fn join_button(
    content: &LayoutBox,
    catalog: &LocaleCatalog,
    shaper: &impl TextShaper,
) -> Result<LayoutBox> {
    let size = Size::new(BUTTON_WIDTH, BUTTON_HEIGHT);
    let mut button = content
        .nest(Part::Button, BUTTON_WIDTH, BUTTON_HEIGHT)
        .at(right_align(size, content.width), center_vertical(size, content.height));
    button.draw(
        Part::ButtonFace,
        Drawable::Rect {
            rect: size.to_rect(),
            radius: BUTTON_RADIUS,
            fill: GREEN,
        },
    );

    let label = shaper.measure(
        &catalog.button,
        FontRole::Medium,
        BUTTON_FONT_SIZE,
        Anchor::BaselineLeft,
    )?;
    let origin = Point::new(
        center_horizontal(label.size(), BUTTON_WIDTH),
        center_vertical(label.size(), BUTTON_HEIGHT),
    );
    button.draw(
        Part::ButtonLabel,
        Drawable::placed_text(catalog.button.clone(), label, origin, WHITE),
    );
    Ok(button)
}

fn inner_block(
    content: &LayoutBox,
    spec: &CardSpec,
    catalog: &LocaleCatalog,
    shaper: &impl TextShaper,
) -> Result<LayoutBox> {
    let width = content.width - ICON_SIZE - PADDING - BUTTON_WIDTH - BUTTON_MARGIN_LEFT;
    let height = SERVER_NAME_LINE_HEIGHT + SERVER_NAME_MARGIN_BOTTOM + PRESENCE_LINE_HEIGHT;
    let mut inner = content.nest(Part::Inner, width, height);
    let y = center_vertical(inner.size(), content.height);
    inner.move_to(ICON_SIZE + PADDING, y);

    let name_padding = match badge::resolve(&spec.badges)? {
        Some(badge) => {
            let (strip, padding) = badge_strip(&inner, badge);
            inner.push(strip);
            padding
        }
        None => 0.0,
    };

    let name = shaper.measure(
        &spec.server_name,
        FontRole::Semibold,
        SERVER_NAME_SIZE,
        Anchor::TopLeft,
    )?;
    let origin = Point::new(name_padding, center_vertical(name.size(), SERVER_NAME_LINE_HEIGHT));
    inner.draw(
        Part::ServerName,
        Drawable::placed_text(spec.server_name.clone(), name, origin, WHITE),
    );

    let presence = presence_line(&inner, spec, catalog, shaper)?;
    inner.push(presence);
    Ok(inner)
}

/// Badge strip plus the left padding the server name must leave for it.
fn badge_strip(inner: &LayoutBox, badge: Badge) -> (LayoutBox, f64) {
    let padding = badge.name_padding();
    let mut strip = inner
        .nest(Part::BadgeStrip, badge.width(), SERVER_NAME_LINE_HEIGHT)
        .at(0.0, BADGE_OFFSET_Y);
    strip.draw(
        Part::BadgeFlower,
        Drawable::Path {
            path: badge.flower,
            fill: badge.flower_color,
        },
    );
    strip.draw(
        Part::BadgeIcon,
        Drawable::Path {
            path: badge.icon,
            fill: WHITE,
        },
    );
    (strip, padding)
}

fn presence_line(
    inner: &LayoutBox,
    spec: &CardSpec,
    catalog: &LocaleCatalog,
    shaper: &impl TextShaper,
) -> Result<LayoutBox> {
    let mut line = inner
        .nest(Part::Presence, inner.width, PRESENCE_LINE_HEIGHT)
        .at(0.0, SERVER_NAME_LINE_HEIGHT + SERVER_NAME_MARGIN_BOTTOM);

    let dot = Size::new(PRESENCE_DOT_SIZE, PRESENCE_DOT_SIZE);
    let dot_y = center_vertical(dot, PRESENCE_LINE_HEIGHT);

    let online_dot = Rect::from_origin_size((0.0, dot_y), dot);
    line.draw(Part::OnlineDot, Drawable::dot(online_dot.origin(), PRESENCE_DOT_SIZE, GREEN));

    let online_text = catalog.online_text(spec.online_count);
    let online = shaper.measure(
        &online_text,
        FontRole::Semibold,
        PRESENCE_FONT_SIZE,
        Anchor::BaselineLeft,
    )?;
    let online_rect = Rect::from_origin_size(
        (
            stack_right(online_dot, PRESENCE_DOT_MARGIN_RIGHT),
            center_vertical(online.size(), PRESENCE_LINE_HEIGHT),
        ),
        online.size(),
    );
    line.draw(
        Part::OnlineCount,
        Drawable::placed_text(online_text, online, online_rect.origin(), MUTED),
    );

    let member_dot = Rect::from_origin_size(
        (stack_right(online_rect, PRESENCE_TEXT_MARGIN_RIGHT), dot_y),
        dot,
    );
    line.draw(
        Part::MemberDot,
        Drawable::dot(member_dot.origin(), PRESENCE_DOT_SIZE, MEMBER_GRAY),
    );

    let members_text = catalog.members_text(spec.member_count);
    let members = shaper.measure(
        &members_text,
        FontRole::Semibold,
        PRESENCE_FONT_SIZE,
        Anchor::BaselineLeft,
    )?;
    let origin = Point::new(
        stack_right(member_dot, PRESENCE_DOT_MARGIN_RIGHT),
        center_vertical(members.size(), PRESENCE_LINE_HEIGHT),
    );
    line.draw(
        Part::MemberCount,
        Drawable::placed_text(members_text, members, origin, MUTED),
    );
    Ok(line)
}

/// First character of every word, as shown in place of a missing icon.
pub fn acronym(name: &str) -> String {
    name.split_whitespace()
        .filter_map(|word| word.chars().next())
        .collect()
}
