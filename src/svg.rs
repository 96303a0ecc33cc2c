//! SVG serialization of a composed [`Card`].
//!
//! Boxes become nested `<svg>` elements so every child keeps its parent's
//! local coordinate space and is clipped to the box it was laid out in. Glyph runs are emitted as filled paths, which
//! makes the output independent of fonts installed on the viewer's side.

use std::fmt::Write as _;

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;
use peniko::Color;
use peniko::kurbo::{BezPath, PathEl, Rect};

use crate::compose::Card;
use crate::layout::{Drawable, Element, LayoutBox};

/// Serialize `card` as a standalone SVG document.
pub fn to_svg(card: &Card) -> String {
    let mut writer = SvgWriter::default();
    writer.document(card.root());
    writer.out
}

#[derive(Default)]
struct SvgWriter {
    out: String,
    clip_count: usize,
}

impl SvgWriter {
    fn document(&mut self, root: &LayoutBox) {
        let w = num(root.width);
        let h = num(root.height);
        let _ = write!(
            self.out,
            "<svg xmlns=\"http://www.w3.org/2000/svg\" xmlns:xlink=\"http://www.w3.org/1999/xlink\" \
             version=\"1.1\" viewBox=\"0 0 {w} {h}\" width=\"{w}\" height=\"{h}\">"
        );
        self.children(root);
        self.out.push_str("</svg>");
    }

    fn nested(&mut self, b: &LayoutBox) {
        let _ = write!(
            self.out,
            "<svg x=\"{}\" y=\"{}\" width=\"{}\" height=\"{}\">",
            num(b.x),
            num(b.y),
            num(b.width),
            num(b.height)
        );
        self.children(b);
        self.out.push_str("</svg>");
    }

    fn children(&mut self, b: &LayoutBox) {
        for child in &b.children {
            match child {
                Element::Box(inner) => self.nested(inner),
                Element::Shape { drawable, .. } => self.drawable(drawable),
            }
        }
    }

    fn drawable(&mut self, drawable: &Drawable) {
        match drawable {
            Drawable::Rect { rect, radius, fill } => {
                let _ = write!(self.out, "<rect {}{}/>", rect_attrs(*rect, *radius), fill_attrs(*fill));
            }
            Drawable::Path { path, fill } | Drawable::Text { outline: path, fill, .. } => {
                let _ = write!(self.out, "<path d=\"{}\"{}/>", path_data(path), fill_attrs(*fill));
            }
            Drawable::Circle { circle, fill } => {
                let _ = write!(
                    self.out,
                    "<circle cx=\"{}\" cy=\"{}\" r=\"{}\"{}/>",
                    num(circle.center.x),
                    num(circle.center.y),
                    num(circle.radius),
                    fill_attrs(*fill)
                );
            }
            Drawable::Image {
                rect,
                clip_radius,
                format,
                data,
            } => {
                self.clip_count += 1;
                let id = format!("clip-{}", self.clip_count);
                let _ = write!(
                    self.out,
                    "<defs><clipPath id=\"{id}\"><rect {}/></clipPath></defs>",
                    rect_attrs(*rect, *clip_radius)
                );
                let _ = write!(
                    self.out,
                    "<image x=\"{}\" y=\"{}\" width=\"{}\" height=\"{}\" preserveAspectRatio=\"none\" \
                     xlink:href=\"data:{};base64,{}\" clip-path=\"url(#{id})\"/>",
                    num(rect.x0),
                    num(rect.y0),
                    num(rect.width()),
                    num(rect.height()),
                    format.mime(),
                    BASE64.encode(data)
                );
            }
        }
    }
}

fn rect_attrs(rect: Rect, radius: f64) -> String {
    let mut attrs = format!(
        "x=\"{}\" y=\"{}\" width=\"{}\" height=\"{}\"",
        num(rect.x0),
        num(rect.y0),
        num(rect.width()),
        num(rect.height())
    );
    if radius > 0.0 {
        let r = num(radius);
        let _ = write!(attrs, " rx=\"{r}\" ry=\"{r}\"");
    }
    attrs
}

fn fill_attrs(color: Color) -> String {
    let c = color.to_rgba8();
    let mut attrs = format!(" fill=\"#{:02x}{:02x}{:02x}\"", c.r, c.g, c.b);
    if c.a != u8::MAX {
        let _ = write!(attrs, " fill-opacity=\"{}\"", num(c.a as f64 / 255.0));
    }
    attrs
}

/// Path data with coordinates rounded to three decimals.
pub fn path_data(path: &BezPath) -> String {
    let mut d = String::new();
    for el in path.elements() {
        if !d.is_empty() {
            d.push(' ');
        }
        match el {
            PathEl::MoveTo(p) => {
                let _ = write!(d, "M{} {}", num(p.x), num(p.y));
            }
            PathEl::LineTo(p) => {
                let _ = write!(d, "L{} {}", num(p.x), num(p.y));
            }
            PathEl::QuadTo(c, p) => {
                let _ = write!(d, "Q{} {} {} {}", num(c.x), num(c.y), num(p.x), num(p.y));
            }
            PathEl::CurveTo(c0, c1, p) => {
                let _ = write!(
                    d,
                    "C{} {} {} {} {} {}",
                    num(c0.x),
                    num(c0.y),
                    num(c1.x),
                    num(c1.y),
                    num(p.x),
                    num(p.y)
                );
            }
            PathEl::ClosePath => d.push('Z'),
        }
    }
    d
}

/// Shortest decimal form with at most three fractional digits.
fn num(v: f64) -> String {
    let mut s = format!("{v:.3}");
    if s.contains('.') {
        while s.ends_with('0') {
            s.pop();
        }
        if s.ends_with('.') {
            s.pop();
        }
    }
    if s == "-0" {
        s = "0".to_string();
    }
    s
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::{ImageFormat, Part};

    #[test]
    fn numbers_are_trimmed() {
        assert_eq!(num(16.0), "16");
        assert_eq!(num(94.75), "94.75");
        assert_eq!(num(0.1 + 0.2), "0.3");
        assert_eq!(num(-0.0001), "0");
        assert_eq!(num(303.25), "303.25");
    }

    #[test]
    fn path_data_format() {
        let mut p = BezPath::new();
        p.move_to((0.0, 0.0));
        p.line_to((10.5, 0.0));
        p.quad_to((12.0, 1.0), (12.0, 4.0));
        p.close_path();
        assert_eq!(path_data(&p), "M0 0 L10.5 0 Q12 1 12 4 Z");
    }

    #[test]
    fn fills_are_hex() {
        assert_eq!(fill_attrs(Color::from_rgb8(0x2f, 0x31, 0x36)), " fill=\"#2f3136\"");
    }

    #[test]
    fn nested_boxes_clip_to_their_size() {
        let mut root = LayoutBox::new(Part::Canvas, 100.0, 50.0);
        let mut inner = root.nest(Part::Inner, 40.0, 20.0).at(10.0, 5.0);
        inner.draw(
            Part::ServerName,
            Drawable::Rect {
                rect: Rect::new(0.0, 0.0, 80.0, 10.0),
                radius: 0.0,
                fill: Color::from_rgb8(0xff, 0xff, 0xff),
            },
        );
        root.push(inner);

        let mut writer = SvgWriter::default();
        writer.document(&root);
        assert!(writer.out.contains("<svg x=\"10\" y=\"5\" width=\"40\" height=\"20\">"));
        assert!(!writer.out.contains("overflow"));
    }

    #[test]
    fn images_use_xlink_href() {
        let mut root = LayoutBox::new(Part::Canvas, 50.0, 50.0);
        root.draw(
            Part::Icon,
            Drawable::Image {
                rect: Rect::new(0.0, 0.0, 50.0, 50.0),
                clip_radius: 16.0,
                format: ImageFormat::Gif,
                data: vec![1, 2, 3],
            },
        );

        let mut writer = SvgWriter::default();
        writer.document(&root);
        assert!(writer.out.contains("xmlns:xlink=\"http://www.w3.org/1999/xlink\""));
        assert!(writer.out.contains("xlink:href=\"data:image/gif;base64,AQID\""));
        assert!(writer.out.contains("clip-path=\"url(#clip-1)\""));
    }

    #[test]
    fn rounded_rect_attrs() {
        assert_eq!(
            rect_attrs(Rect::new(0.0, 0.0, 94.75, 40.0), 3.0),
            "x=\"0\" y=\"0\" width=\"94.75\" height=\"40\" rx=\"3\" ry=\"3\""
        );
        assert!(!rect_attrs(Rect::new(0.0, 0.0, 1.0, 1.0), 0.0).contains("rx"));
    }
}
