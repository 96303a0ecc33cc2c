//! Text metrics: glyph outlines and bounding boxes for single-line runs.
//!
//! The three card fonts are loaded once at startup into a [`FontSet`] and
//! never mutated afterwards, so one `Arc<FontSet>` serves every concurrent
//! render without locking. Runs are laid out glyph by glyph using advance
//! widths from `skrifa`; outlines are flipped from the font's y-up space into
//! the card's y-down space while they are recorded.

use std::path::Path;

use peniko::FontData;
use peniko::kurbo::{BezPath, Point, Rect, Shape, Size};
use skrifa::instance::{LocationRef, Size as FontSize};
use skrifa::outline::{DrawSettings, OutlinePen};
use skrifa::{FontRef, MetadataProvider};
use tracing::{debug, info};

use crate::config::FontPaths;
use crate::error::{CardError, Result};

/// Which of the three card faces a run is set in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FontRole {
    Bold,
    Semibold,
    Medium,
}

/// Where the outline's origin sits relative to the run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Anchor {
    /// Baseline placed at the font ascent, so the em box starts at y = 0.
    TopLeft,
    /// Baseline at y = 0.
    BaselineLeft,
}

/// Outline and bounding box of one shaped run.
///
/// `width` and `height` are the dimensions of the outline's bounding box,
/// not of the advance box. A run with no ink (empty or all spaces) measures
/// zero in both directions.
#[derive(Debug, Clone, PartialEq)]
pub struct TextMetrics {
    pub outline: BezPath,
    pub bounds: Rect,
}

impl TextMetrics {
    pub fn new(outline: BezPath) -> Self {
        let bounds = if outline.elements().is_empty() {
            Rect::ZERO
        } else {
            outline.bounding_box()
        };
        Self { outline, bounds }
    }

    pub fn width(&self) -> f64 {
        self.bounds.width()
    }

    pub fn height(&self) -> f64 {
        self.bounds.height()
    }

    pub fn size(&self) -> Size {
        self.bounds.size()
    }
}

/// Produces outlines and metrics for a run of text.
///
/// Implementations must be pure: equal inputs yield equal metrics.
pub trait TextShaper {
    fn measure(&self, text: &str, role: FontRole, size: f32, anchor: Anchor) -> Result<TextMetrics>;
}

// ---------------------------------------------------------------------------
// FontSet
// ---------------------------------------------------------------------------

/// The bold, semibold and medium faces used by the card.
#[derive(Debug, Clone)]
pub struct FontSet {
    bold: FontData,
    semibold: FontData,
    medium: FontData,
}

impl FontSet {
    /// Read and validate all three fonts. Any failure is fatal for the process.
    pub fn load(paths: &FontPaths) -> Result<Self> {
        let set = Self {
            bold: load_face(FontRole::Bold, &paths.bold)?,
            semibold: load_face(FontRole::Semibold, &paths.semibold)?,
            medium: load_face(FontRole::Medium, &paths.medium)?,
        };
        info!(
            bold = %paths.bold.display(),
            semibold = %paths.semibold.display(),
            medium = %paths.medium.display(),
            "loaded card fonts"
        );
        Ok(set)
    }

    /// Build a set from in-memory font files.
    pub fn from_bytes(bold: Vec<u8>, semibold: Vec<u8>, medium: Vec<u8>) -> Result<Self> {
        Ok(Self {
            bold: validate_face(FontRole::Bold, Path::new("<memory>"), bold)?,
            semibold: validate_face(FontRole::Semibold, Path::new("<memory>"), semibold)?,
            medium: validate_face(FontRole::Medium, Path::new("<memory>"), medium)?,
        })
    }

    fn face(&self, role: FontRole) -> &FontData {
        match role {
            FontRole::Bold => &self.bold,
            FontRole::Semibold => &self.semibold,
            FontRole::Medium => &self.medium,
        }
    }
}

impl TextShaper for FontSet {
    fn measure(&self, text: &str, role: FontRole, size: f32, anchor: Anchor) -> Result<TextMetrics> {
        let face = self.face(role);
        let font = FontRef::from_index(face.data.as_ref(), face.index)
            .map_err(|e| CardError::Shaping(format!("{role:?} font unreadable: {e}")))?;

        let font_size = FontSize::new(size);
        let location = LocationRef::default();
        let charmap = font.charmap();
        let glyph_metrics = font.glyph_metrics(font_size, location);
        let outlines = font.outline_glyphs();

        let baseline = match anchor {
            Anchor::TopLeft => font.metrics(font_size, location).ascent as f64,
            Anchor::BaselineLeft => 0.0,
        };

        let mut pen = OutlineRecorder {
            path: BezPath::new(),
            origin: Point::new(0.0, baseline),
        };

        for ch in text.chars() {
            let gid = charmap.map(ch).unwrap_or_default();
            if let Some(glyph) = outlines.get(gid) {
                let settings = DrawSettings::unhinted(font_size, location);
                glyph
                    .draw(settings, &mut pen)
                    .map_err(|e| CardError::Shaping(format!("glyph {gid:?} of {text:?}: {e}")))?;
            }
            let advance = glyph_metrics.advance_width(gid).unwrap_or(size * 0.5) as f64;
            pen.origin.x += advance;
        }

        let metrics = TextMetrics::new(pen.path);
        debug!(
            text,
            ?role,
            size,
            width = metrics.width(),
            height = metrics.height(),
            "measured run"
        );
        Ok(metrics)
    }
}

/// Records skrifa outline commands into a kurbo path, flipping y.
struct OutlineRecorder {
    path: BezPath,
    origin: Point,
}

impl OutlineRecorder {
    fn point(&self, x: f32, y: f32) -> Point {
        Point::new(self.origin.x + x as f64, self.origin.y - y as f64)
    }
}

impl OutlinePen for OutlineRecorder {
    fn move_to(&mut self, x: f32, y: f32) {
        let p = self.point(x, y);
        self.path.move_to(p);
    }

    fn line_to(&mut self, x: f32, y: f32) {
        let p = self.point(x, y);
        self.path.line_to(p);
    }

    fn quad_to(&mut self, cx0: f32, cy0: f32, x: f32, y: f32) {
        let c = self.point(cx0, cy0);
        let p = self.point(x, y);
        self.path.quad_to(c, p);
    }

    fn curve_to(&mut self, cx0: f32, cy0: f32, cx1: f32, cy1: f32, x: f32, y: f32) {
        let c0 = self.point(cx0, cy0);
        let c1 = self.point(cx1, cy1);
        let p = self.point(x, y);
        self.path.curve_to(c0, c1, p);
    }

    fn close(&mut self) {
        self.path.close_path();
    }
}

// --- Font loading ---

fn load_face(role: FontRole, path: &Path) -> Result<FontData> {
    let data = std::fs::read(path).map_err(|e| CardError::FontLoad {
        role,
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;
    validate_face(role, path, data)
}

fn validate_face(role: FontRole, path: &Path, data: Vec<u8>) -> Result<FontData> {
    if let Err(e) = FontRef::from_index(&data, 0) {
        return Err(CardError::FontLoad {
            role,
            path: path.to_path_buf(),
            reason: e.to_string(),
        });
    }
    Ok(FontData::new(data.into(), 0))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_outline_measures_zero() {
        let m = TextMetrics::new(BezPath::new());
        assert_eq!(m.width(), 0.0);
        assert_eq!(m.height(), 0.0);
    }

    #[test]
    fn metrics_use_outline_bounds() {
        let mut path = BezPath::new();
        path.move_to((2.0, 3.0));
        path.line_to((12.0, 3.0));
        path.line_to((12.0, 10.0));
        path.close_path();
        let m = TextMetrics::new(path);
        assert_eq!(m.bounds, Rect::new(2.0, 3.0, 12.0, 10.0));
        assert_eq!(m.width(), 10.0);
        assert_eq!(m.height(), 7.0);
    }

    #[test]
    fn recorder_flips_y_around_origin() {
        let mut pen = OutlineRecorder {
            path: BezPath::new(),
            origin: Point::new(5.0, 10.0),
        };
        pen.move_to(0.0, 0.0);
        pen.line_to(1.0, 4.0);
        pen.close();
        let bounds = pen.path.bounding_box();
        assert_eq!(bounds, Rect::new(5.0, 6.0, 6.0, 10.0));
    }

    #[test]
    fn garbage_font_bytes_are_rejected() {
        let err = FontSet::from_bytes(vec![0; 16], vec![0; 16], vec![0; 16]).unwrap_err();
        assert!(matches!(
            err,
            CardError::FontLoad {
                role: FontRole::Bold,
                ..
            }
        ));
    }

    #[test]
    fn missing_font_file_is_fatal() {
        let paths = FontPaths {
            bold: "/nonexistent/bold.ttf".into(),
            semibold: "/nonexistent/semibold.ttf".into(),
            medium: "/nonexistent/medium.ttf".into(),
        };
        let err = FontSet::load(&paths).unwrap_err();
        assert!(err.to_string().contains("bold.ttf"));
    }
}
