//! Box layout primitives.
//!
//! A [`LayoutBox`] is a rectangle positioned in its parent's local space that
//! owns an ordered list of child boxes and drawables. Paint order is the
//! order in which elements are pushed. Nothing here knows about cards; the
//! recipe lives in `compose`.

use peniko::Color;
use peniko::kurbo::{Affine, BezPath, Circle, Point, Rect, Shape, Size, Vec2};

use crate::text::TextMetrics;

/// Role of a box or drawable within a card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Part {
    Canvas,
    Background,
    Main,
    Header,
    HeaderText,
    Content,
    Icon,
    IconPlaceholder,
    IconAcronym,
    Button,
    ButtonFace,
    ButtonLabel,
    Inner,
    BadgeStrip,
    BadgeFlower,
    BadgeIcon,
    ServerName,
    Presence,
    OnlineDot,
    OnlineCount,
    MemberDot,
    MemberCount,
}

/// Encoding of an embedded raster image.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageFormat {
    Gif,
    Jpeg,
}

impl ImageFormat {
    pub fn mime(self) -> &'static str {
        match self {
            ImageFormat::Gif => "image/gif",
            ImageFormat::Jpeg => "image/jpeg",
        }
    }

    pub fn extension(self) -> &'static str {
        match self {
            ImageFormat::Gif => "gif",
            ImageFormat::Jpeg => "jpg",
        }
    }
}

/// A filled primitive in its box's local coordinates.
#[derive(Debug, Clone, PartialEq)]
pub enum Drawable {
    Rect {
        rect: Rect,
        radius: f64,
        fill: Color,
    },
    Path {
        path: BezPath,
        fill: Color,
    },
    /// A shaped glyph run; `content` is the source string.
    Text {
        content: String,
        outline: BezPath,
        bounds: Rect,
        fill: Color,
    },
    Circle {
        circle: Circle,
        fill: Color,
    },
    /// A raster image clipped to a rounded rectangle of the same bounds.
    Image {
        rect: Rect,
        clip_radius: f64,
        format: ImageFormat,
        data: Vec<u8>,
    },
}

impl Drawable {
    /// A glyph run left where its anchor put it.
    pub fn anchored_text(content: impl Into<String>, metrics: TextMetrics, fill: Color) -> Self {
        Drawable::Text {
            content: content.into(),
            outline: metrics.outline,
            bounds: metrics.bounds,
            fill,
        }
    }

    /// A glyph run moved so that its bounding box starts at `origin`.
    pub fn placed_text(
        content: impl Into<String>,
        metrics: TextMetrics,
        origin: Point,
        fill: Color,
    ) -> Self {
        let delta = origin - metrics.bounds.origin();
        let size = metrics.size();
        let mut outline = metrics.outline;
        outline.apply_affine(Affine::translate(delta));
        Drawable::Text {
            content: content.into(),
            outline,
            bounds: Rect::from_origin_size(origin, size),
            fill,
        }
    }

    /// A circle of the given diameter whose bounding box starts at `origin`.
    pub fn dot(origin: Point, diameter: f64, fill: Color) -> Self {
        let radius = diameter / 2.0;
        Drawable::Circle {
            circle: Circle::new(origin + Vec2::new(radius, radius), radius),
            fill,
        }
    }

    pub fn bounds(&self) -> Rect {
        match self {
            Drawable::Rect { rect, .. } => *rect,
            Drawable::Path { path, .. } => path.bounding_box(),
            Drawable::Text { bounds, .. } => *bounds,
            Drawable::Circle { circle, .. } => circle.bounding_box(),
            Drawable::Image { rect, .. } => *rect,
        }
    }
}

/// Child of a [`LayoutBox`].
#[derive(Debug, Clone, PartialEq)]
pub enum Element {
    Box(LayoutBox),
    Shape { part: Part, drawable: Drawable },
}

/// An axis-aligned rectangle in its parent's local space.
#[derive(Debug, Clone, PartialEq)]
pub struct LayoutBox {
    pub part: Part,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub children: Vec<Element>,
}

impl LayoutBox {
    pub fn new(part: Part, width: f64, height: f64) -> Self {
        Self {
            part,
            x: 0.0,
            y: 0.0,
            width,
            height,
            children: Vec::new(),
        }
    }

    /// A child sized explicitly, sitting at this box's local origin until moved.
    pub fn nest(&self, part: Part, width: f64, height: f64) -> LayoutBox {
        LayoutBox::new(part, width, height)
    }

    pub fn move_to(&mut self, x: f64, y: f64) {
        self.x = x;
        self.y = y;
    }

    pub fn at(mut self, x: f64, y: f64) -> Self {
        self.move_to(x, y);
        self
    }

    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    /// Bounds in the parent's local space.
    pub fn rect(&self) -> Rect {
        Rect::new(self.x, self.y, self.x + self.width, self.y + self.height)
    }

    pub fn push(&mut self, child: LayoutBox) {
        self.children.push(Element::Box(child));
    }

    pub fn draw(&mut self, part: Part, drawable: Drawable) {
        self.children.push(Element::Shape { part, drawable });
    }

    /// First descendant with the given role, depth first in paint order.
    pub fn find(&self, part: Part) -> Option<&Element> {
        for child in &self.children {
            match child {
                Element::Shape { part: p, .. } if *p == part => return Some(child),
                Element::Box(b) if b.part == part => return Some(child),
                Element::Box(b) => {
                    if let Some(hit) = b.find(part) {
                        return Some(hit);
                    }
                }
                Element::Shape { .. } => {}
            }
        }
        None
    }

    /// Bounds of a descendant in the coordinate space of its own parent.
    pub fn local_bounds(&self, part: Part) -> Option<Rect> {
        self.search(part, Vec2::ZERO).map(|(rect, _)| rect)
    }

    /// Bounds of a descendant expressed in this box's content space.
    pub fn bounds_within(&self, part: Part) -> Option<Rect> {
        self.search(part, Vec2::ZERO).map(|(rect, offset)| rect + offset)
    }

    fn search(&self, part: Part, offset: Vec2) -> Option<(Rect, Vec2)> {
        for child in &self.children {
            match child {
                Element::Shape { part: p, drawable } if *p == part => {
                    return Some((drawable.bounds(), offset));
                }
                Element::Box(b) if b.part == part => return Some((b.rect(), offset)),
                Element::Box(b) => {
                    if let Some(hit) = b.search(part, offset + Vec2::new(b.x, b.y)) {
                        return Some(hit);
                    }
                }
                Element::Shape { .. } => {}
            }
        }
        None
    }
}

// ---------------------------------------------------------------------------
// Positioning helpers
// ---------------------------------------------------------------------------

/// y offset that centers `size` inside a container of the given height.
pub fn center_vertical(size: Size, container_height: f64) -> f64 {
    (container_height - size.height) / 2.0
}

/// x offset that centers `size` inside a container of the given width.
pub fn center_horizontal(size: Size, container_width: f64) -> f64 {
    (container_width - size.width) / 2.0
}

/// x offset that puts `size` flush against the container's right edge.
pub fn right_align(size: Size, container_width: f64) -> f64 {
    container_width - size.width
}

/// x offset of the element that follows `prev` after a gap of `margin`.
pub fn stack_right(prev: Rect, margin: f64) -> f64 {
    rightmost(prev) + margin
}

pub fn rightmost(rect: Rect) -> f64 {
    rect.x0 + rect.width()
}

pub fn lowermost(rect: Rect) -> f64 {
    rect.y0 + rect.height()
}
