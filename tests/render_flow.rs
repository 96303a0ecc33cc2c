//! End-to-end rendering against an in-memory invite source.
//!
//! Tested in this file:
//! - the full fetch, compose and serialize path
//! - locale selection and fallback
//! - the animation hint deciding icon format
//! - error propagation for missing invites, icons and names

mod common;

use invite_card::layout::{Drawable, Element, ImageFormat, Part};
use invite_card::{CardError, InviteRenderer, Locales, RenderRequest};

use common::{BlockShaper, MemorySource, invite};

fn renderer(source: MemorySource) -> InviteRenderer<MemorySource, BlockShaper> {
    InviteRenderer::new(source, BlockShaper::default(), Locales::builtin().unwrap())
}

fn icon_format(card: &invite_card::Card) -> Option<ImageFormat> {
    match card.root().find(Part::Icon)? {
        Element::Shape {
            drawable: Drawable::Image { format, .. },
            ..
        } => Some(*format),
        _ => None,
    }
}

// ---------------------------------------------------------------------------
// Happy path
// ---------------------------------------------------------------------------

#[tokio::test]
async fn renders_complete_card() {
    let source = MemorySource::default()
        .with_invite("test", invite(Some("Test Server"), Some("abc"), &[], 12345, 67890))
        .with_icon("abc", vec![0xff, 0xd8, 0xff]);
    let r = renderer(source);

    let card = r.render_card(&RenderRequest::new("test")).await.unwrap();
    assert_eq!(card.width(), 430.0);
    assert_eq!(card.height(), 110.0);
    assert_eq!(card.text(Part::ServerName), Some("Test Server"));
    assert_eq!(card.text(Part::OnlineCount), Some("12,345 Online"));
    assert_eq!(card.text(Part::MemberCount), Some("67,890 Members"));
    assert_eq!(card.local_bounds(Part::ServerName).unwrap().x0, 0.0);
    assert_eq!(icon_format(&card), Some(ImageFormat::Jpeg));

    let svg = r.render(&RenderRequest::new("test")).await.unwrap();
    assert!(svg.contains("viewBox=\"0 0 430 110\""));
    assert!(svg.contains("data:image/jpeg;base64,/9j/"));
}

#[tokio::test]
async fn language_selects_catalog() {
    let source = MemorySource::default()
        .with_invite("test", invite(Some("Test Server"), None, &[], 1, 2));
    let r = renderer(source);

    let de = r
        .render_card(&RenderRequest::new("test").language("de-AT"))
        .await
        .unwrap();
    assert_eq!(de.text(Part::ButtonLabel), Some("Beitreten"));

    let unknown = r
        .render_card(&RenderRequest::new("test").language("xx"))
        .await
        .unwrap();
    assert_eq!(unknown.text(Part::ButtonLabel), Some("Join"));
}

#[tokio::test]
async fn missing_icon_renders_acronym() {
    let source = MemorySource::default()
        .with_invite("test", invite(Some("Rust Lang"), None, &[], 1, 2));
    let requests = source.icon_requests.clone();
    let r = renderer(source);

    let card = r.render_card(&RenderRequest::new("test")).await.unwrap();
    assert!(card.root().find(Part::Icon).is_none());
    assert_eq!(card.text(Part::IconAcronym), Some("RL"));
    assert!(requests.lock().unwrap().is_empty());
}

// ---------------------------------------------------------------------------
// Animation hint
// ---------------------------------------------------------------------------

#[tokio::test]
async fn animated_icon_kept_when_hint_on() {
    let source = MemorySource::default()
        .with_invite("test", invite(Some("Test"), Some("a_f00"), &[], 1, 2))
        .with_icon("a_f00", b"GIF89a".to_vec());
    let requests = source.icon_requests.clone();
    let r = renderer(source);

    let card = r.render_card(&RenderRequest::new("test")).await.unwrap();
    assert_eq!(icon_format(&card), Some(ImageFormat::Gif));
    assert_eq!(*requests.lock().unwrap(), vec![("a_f00".to_string(), true)]);
}

#[tokio::test]
async fn animated_icon_flattened_when_hint_off() {
    let source = MemorySource::default()
        .with_invite("test", invite(Some("Test"), Some("a_f00"), &[], 1, 2))
        .with_icon("a_f00", vec![0xff, 0xd8]);
    let requests = source.icon_requests.clone();
    let r = renderer(source);

    let card = r
        .render_card(&RenderRequest::new("test").animation(false))
        .await
        .unwrap();
    assert_eq!(icon_format(&card), Some(ImageFormat::Jpeg));
    assert_eq!(*requests.lock().unwrap(), vec![("a_f00".to_string(), false)]);
}

#[tokio::test]
async fn static_hash_never_animated() {
    let source = MemorySource::default()
        .with_invite("test", invite(Some("Test"), Some("f00"), &[], 1, 2))
        .with_icon("f00", vec![0xff, 0xd8]);
    let requests = source.icon_requests.clone();
    let r = renderer(source);

    let card = r.render_card(&RenderRequest::new("test")).await.unwrap();
    assert_eq!(icon_format(&card), Some(ImageFormat::Jpeg));
    assert_eq!(*requests.lock().unwrap(), vec![("f00".to_string(), false)]);
}

// ---------------------------------------------------------------------------
// Badges from guild features
// ---------------------------------------------------------------------------

#[tokio::test]
async fn guild_features_drive_badge() {
    let source = MemorySource::default()
        .with_invite("plain", invite(Some("Test"), None, &["COMMUNITY"], 1, 2))
        .with_invite("both", invite(Some("Test"), None, &["PARTNERED", "VERIFIED"], 1, 2));
    let r = renderer(source);

    let plain = r.render_card(&RenderRequest::new("plain")).await.unwrap();
    assert!(plain.root().find(Part::BadgeStrip).is_none());
    assert_eq!(plain.local_bounds(Part::ServerName).unwrap().x0, 0.0);

    let both = r.render_card(&RenderRequest::new("both")).await.unwrap();
    assert!(both.root().find(Part::BadgeStrip).is_some());
    assert_eq!(both.local_bounds(Part::ServerName).unwrap().x0, 24.0);
}

// ---------------------------------------------------------------------------
// Failures
// ---------------------------------------------------------------------------

#[tokio::test]
async fn unknown_invite_is_unavailable() {
    let r = renderer(MemorySource::default());
    let err = r.render(&RenderRequest::new("nope")).await.unwrap_err();
    assert!(matches!(err, CardError::DataUnavailable(_)));
}

#[tokio::test]
async fn failed_icon_fetch_aborts_render() {
    let source = MemorySource::default()
        .with_invite("test", invite(Some("Test"), Some("gone"), &[], 1, 2));
    let r = renderer(source);
    let err = r.render(&RenderRequest::new("test")).await.unwrap_err();
    assert!(matches!(err, CardError::DataUnavailable(_)));
}

#[tokio::test]
async fn nameless_guild_is_rejected() {
    let source = MemorySource::default().with_invite("test", invite(None, None, &[], 1, 2));
    let r = renderer(source);
    let err = r.render(&RenderRequest::new("test")).await.unwrap_err();
    assert!(matches!(err, CardError::InvariantViolation(_)));
}

#[tokio::test]
async fn guildless_invite_is_rejected() {
    let mut record = invite(Some("Test"), None, &[], 1, 2);
    record.guild = None;
    let r = renderer(MemorySource::default().with_invite("test", record));
    let err = r.render(&RenderRequest::new("test")).await.unwrap_err();
    assert!(matches!(err, CardError::InvariantViolation(_)));
}
