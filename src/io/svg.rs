//! Rect geometry extraction from SVG mask files.
//!
//! Overlay masks are authored as SVGs containing plain `<rect>` elements.
//! Only the rect geometry is read here; path data, transforms, and the rest
//! of the SVG vocabulary stay with the authoring tools.
use std::io::BufRead;
use std::path::Path;

use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};

use crate::error::{Error, Result};

/// Axis-aligned rectangle in canvas pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MaskRect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl MaskRect {
    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    /// Smallest rectangle covering both.
    pub fn union(&self, other: &MaskRect) -> MaskRect {
        let x = self.x.min(other.x);
        let y = self.y.min(other.y);
        MaskRect {
            x,
            y,
            width: self.right().max(other.right()) - x,
            height: self.bottom().max(other.bottom()) - y,
        }
    }
}

/// Union bounding box of a rect list, `None` when empty.
pub fn mask_bounds(rects: &[MaskRect]) -> Option<MaskRect> {
    let mut iter = rects.iter();
    let first = *iter.next()?;
    Some(iter.fold(first, |acc, r| acc.union(r)))
}

fn rect_from_element(e: &BytesStart) -> Result<MaskRect> {
    let mut rect = MaskRect {
        x: 0.0,
        y: 0.0,
        width: 0.0,
        height: 0.0,
    };
    for attr in e.attributes() {
        let attr = attr.map_err(|e| Error::Svg(e.to_string()))?;
        let value = attr
            .unescape_value()
            .map_err(|e| Error::Svg(e.to_string()))?;
        let parsed = value.trim().parse::<f64>();
        match attr.key.as_ref() {
            b"x" => rect.x = parsed.map_err(|_| bad_attr("x", &value))?,
            b"y" => rect.y = parsed.map_err(|_| bad_attr("y", &value))?,
            b"width" => rect.width = parsed.map_err(|_| bad_attr("width", &value))?,
            b"height" => rect.height = parsed.map_err(|_| bad_attr("height", &value))?,
            _ => {}
        }
    }
    Ok(rect)
}

fn bad_attr(name: &str, value: &str) -> Error {
    Error::Svg(format!("rect attribute {name}={value:?} is not numeric"))
}

fn parse_rects<R: BufRead>(mut reader: Reader<R>) -> Result<Vec<MaskRect>> {
    reader.trim_text(true);
    let mut buf = Vec::new();
    let mut rects = Vec::new();

    loop {
        match reader
            .read_event_into(&mut buf)
            .map_err(|e| Error::Svg(e.to_string()))?
        {
            Event::Start(ref e) | Event::Empty(ref e) if e.name().as_ref() == b"rect" => {
                rects.push(rect_from_element(e)?);
            }
            Event::Eof => break,
            _ => {}
        }
        buf.clear();
    }

    Ok(rects)
}

/// Read every `<rect>` from an SVG mask file.
pub fn read_mask_rects(path: &Path) -> Result<Vec<MaskRect>> {
    let reader = Reader::from_file(path).map_err(|e| Error::Svg(e.to_string()))?;
    parse_rects(reader)
}

/// Read every `<rect>` from SVG text.
pub fn parse_mask_rects(content: &str) -> Result<Vec<MaskRect>> {
    parse_rects(Reader::from_reader(content.as_bytes()))
}

#[cfg(test)]
mod tests {
    use super::*;

    const MASK: &str = r##"<svg width="4096" height="4096">
        <rect x="100" y="200" width="50" height="60"/>
        <rect x="400" y="80" width="20" height="30" fill="#fff"/>
    </svg>"##;

    #[test]
    fn extracts_self_closing_rects() {
        let rects = parse_mask_rects(MASK).unwrap();
        assert_eq!(rects.len(), 2);
        assert_eq!(
            rects[0],
            MaskRect {
                x: 100.0,
                y: 200.0,
                width: 50.0,
                height: 60.0
            }
        );
    }

    #[test]
    fn missing_position_defaults_to_origin() {
        let rects = parse_mask_rects(r#"<svg><rect width="10" height="10"/></svg>"#).unwrap();
        assert_eq!(rects[0].x, 0.0);
        assert_eq!(rects[0].y, 0.0);
    }

    #[test]
    fn union_covers_all_rects() {
        let rects = parse_mask_rects(MASK).unwrap();
        let bounds = mask_bounds(&rects).unwrap();
        assert_eq!(bounds.x, 100.0);
        assert_eq!(bounds.y, 80.0);
        assert_eq!(bounds.right(), 420.0);
        assert_eq!(bounds.bottom(), 260.0);
    }

    #[test]
    fn non_numeric_geometry_is_an_error() {
        let err = parse_mask_rects(r#"<svg><rect x="abc" width="1" height="1"/></svg>"#)
            .unwrap_err();
        assert!(matches!(err, Error::Svg(_)));
    }

    #[test]
    fn empty_mask_has_no_bounds() {
        assert!(mask_bounds(&[]).is_none());
    }
}
