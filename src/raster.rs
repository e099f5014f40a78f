use std::hash::Hasher;

use base64::{engine::general_purpose::STANDARD, Engine as _};
use fnv::FnvHasher;
use image::{codecs::png::PngEncoder, ColorType, ImageBuffer, ImageEncoder, Rgba, RgbaImage};

use crate::errors::*;
use crate::units::{Height, Width};

pub type Colour = Rgba<u8>;

/// A position in pixel space. Pixel `(x, y)` covers `[x, x + 1) * [y, y + 1)`, so its centre is
/// at `(x + 0.5, y + 0.5)`.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Point {
        Point { x, y }
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum LineCap {
    /// The stroke ends exactly at the end points.
    Butt,
    /// The stroke extends past each end point by half the line width.
    Square,
}

/// An RGBA pixel buffer that passages get stroked onto.
#[derive(Clone, Debug)]
pub struct Raster {
    image: RgbaImage,
}

impl Raster {
    /// A raster with every pixel set to `colour`.
    pub fn filled(width: Width, height: Height, colour: Colour) -> Raster {
        Raster { image: ImageBuffer::from_pixel(width.0, height.0, colour) }
    }

    #[inline]
    pub fn width(&self) -> Width {
        Width(self.image.width())
    }

    #[inline]
    pub fn height(&self) -> Height {
        Height(self.image.height())
    }

    #[inline]
    pub fn pixel(&self, x: u32, y: u32) -> Option<Colour> {
        if x < self.image.width() && y < self.image.height() {
            Some(*self.image.get_pixel(x, y))
        } else {
            None
        }
    }

    /// Paint a straight line of thickness `width` from `from` to `to`.
    ///
    /// A pixel is painted when its centre lies inside the stroked rectangle (boundary included).
    /// Anything outside the raster is clipped. A zero length line with square caps paints a
    /// `width * width` square, with butt caps it paints nothing.
    pub fn stroke_line(&mut self, from: Point, to: Point, colour: Colour, width: f64, cap: LineCap) {
        if !(width > 0.0) || self.image.width() == 0 || self.image.height() == 0 {
            return;
        }

        let half = width / 2.0;
        let (dx, dy) = (to.x - from.x, to.y - from.y);
        let length = (dx * dx + dy * dy).sqrt();
        if length == 0.0 && cap == LineCap::Butt {
            return;
        }
        // Unit vectors along and across the line
        let (ux, uy) = if length > 0.0 {
            (dx / length, dy / length)
        } else {
            (1.0, 0.0)
        };
        let (nx, ny) = (-uy, ux);
        let extension = match cap {
            LineCap::Butt => 0.0,
            LineCap::Square => half,
        };

        // Bounding box of the stroked rectangle
        let reach = half + extension;
        let min_x = from.x.min(to.x) - reach;
        let max_x = from.x.max(to.x) + reach;
        let min_y = from.y.min(to.y) - reach;
        let max_y = from.y.max(to.y) + reach;
        let (x_start, x_end) = match pixel_span(min_x, max_x, self.image.width()) {
            Some(span) => span,
            None => return,
        };
        let (y_start, y_end) = match pixel_span(min_y, max_y, self.image.height()) {
            Some(span) => span,
            None => return,
        };

        for py in y_start..y_end {
            for px in x_start..x_end {
                let cx = f64::from(px) + 0.5 - from.x;
                let cy = f64::from(py) + 0.5 - from.y;
                let along = cx * ux + cy * uy;
                let across = cx * nx + cy * ny;
                if along >= -extension && along <= length + extension && across.abs() <= half {
                    self.image.put_pixel(px, py, colour);
                }
            }
        }
    }

    /// The raw RGBA bytes, row major, 4 bytes per pixel.
    #[inline]
    pub fn as_raw(&self) -> &[u8] {
        self.image.as_raw()
    }

    #[inline]
    pub fn as_image(&self) -> &RgbaImage {
        &self.image
    }

    pub fn into_image(self) -> RgbaImage {
        self.image
    }

    /// Encode as a PNG file's bytes.
    pub fn encode_png(&self) -> Result<Vec<u8>> {
        let mut png = Vec::new();
        PngEncoder::new(&mut png).write_image(self.image.as_raw(),
                                              self.image.width(),
                                              self.image.height(),
                                              ColorType::Rgba8)?;
        Ok(png)
    }

    /// The PNG encoding as a `data:image/png;base64,...` URI.
    pub fn data_url(&self) -> Result<String> {
        let png = self.encode_png()?;
        Ok(format!("data:image/png;base64,{}", STANDARD.encode(&png)))
    }

    /// FNV-1a hash of the dimensions and raw pixels, for cheap raster comparisons.
    pub fn checksum(&self) -> u64 {
        let mut hasher = FnvHasher::default();
        hasher.write_u32(self.image.width());
        hasher.write_u32(self.image.height());
        hasher.write(self.image.as_raw());
        hasher.finish()
    }
}

/// Pixel indices whose centres may fall within `[min, max]`, clamped to `[0, limit)`.
/// None when the range misses the raster entirely.
fn pixel_span(min: f64, max: f64, limit: u32) -> Option<(u32, u32)> {
    // centre = p + 0.5 >= min  <=>  p >= min - 0.5
    let start = (min - 0.5).ceil().max(0.0);
    // centre = p + 0.5 <= max  <=>  p <= max - 0.5
    let end = ((max - 0.5).floor() + 1.0).min(f64::from(limit));
    if start < end {
        Some((start as u32, end as u32))
    } else {
        None
    }
}

#[cfg(test)]
mod tests {

    use super::*;

    const BLACK: Colour = Rgba([0, 0, 0, 255]);
    const WHITE: Colour = Rgba([255, 255, 255, 255]);

    fn painted(raster: &Raster) -> Vec<(u32, u32)> {
        let mut pixels = vec![];
        for y in 0..raster.height().0 {
            for x in 0..raster.width().0 {
                if raster.pixel(x, y) == Some(WHITE) {
                    pixels.push((x, y));
                }
            }
        }
        pixels
    }

    #[test]
    fn filled_raster() {
        let r = Raster::filled(Width(4), Height(3), BLACK);
        assert_eq!(r.width(), Width(4));
        assert_eq!(r.height(), Height(3));
        assert_eq!(r.as_raw().len(), 4 * 3 * 4);
        assert!(r.as_image().pixels().all(|p| *p == BLACK));
        assert_eq!(r.pixel(4, 0), None);
    }

    #[test]
    fn horizontal_square_capped_stroke() {
        let mut r = Raster::filled(Width(12), Height(6), BLACK);
        // width 2 line from x=3 to x=7 at y=3, caps reach x=2..8, y=2..4
        r.stroke_line(Point::new(3.0, 3.0), Point::new(7.0, 3.0), WHITE, 2.0, LineCap::Square);
        let expected = (2..4)
            .flat_map(|y| (2..8).map(move |x| (x, y)))
            .collect::<Vec<_>>();
        assert_eq!(painted(&r), expected);
    }

    #[test]
    fn butt_capped_stroke_stops_at_end_points() {
        let mut r = Raster::filled(Width(12), Height(6), BLACK);
        r.stroke_line(Point::new(3.0, 3.0), Point::new(7.0, 3.0), WHITE, 2.0, LineCap::Butt);
        let expected = (2..4)
            .flat_map(|y| (3..7).map(move |x| (x, y)))
            .collect::<Vec<_>>();
        assert_eq!(painted(&r), expected);
    }

    #[test]
    fn stroke_direction_does_not_matter() {
        let mut forwards = Raster::filled(Width(20), Height(20), BLACK);
        let mut backwards = forwards.clone();
        let (a, b) = (Point::new(4.5, 2.5), Point::new(4.5, 15.5));
        forwards.stroke_line(a, b, WHITE, 5.0, LineCap::Square);
        backwards.stroke_line(b, a, WHITE, 5.0, LineCap::Square);
        assert_eq!(forwards.as_raw(), backwards.as_raw());
        // odd widths centred on half pixels stay crisp: x in [2, 7), y in [0, 18)
        assert_eq!(painted(&forwards).len(), 5 * 18);
    }

    #[test]
    fn strokes_are_clipped_to_the_raster() {
        let mut r = Raster::filled(Width(4), Height(4), BLACK);
        r.stroke_line(Point::new(-10.0, 1.0), Point::new(10.0, 1.0), WHITE, 2.0, LineCap::Square);
        assert_eq!(painted(&r), vec![(0, 0), (1, 0), (2, 0), (3, 0), (0, 1), (1, 1), (2, 1), (3, 1)]);

        let mut untouched = Raster::filled(Width(4), Height(4), BLACK);
        untouched.stroke_line(Point::new(50.0, 50.0), Point::new(60.0, 50.0), WHITE, 2.0, LineCap::Square);
        assert!(painted(&untouched).is_empty());
    }

    #[test]
    fn zero_length_square_cap_is_a_square() {
        let mut r = Raster::filled(Width(8), Height(8), BLACK);
        r.stroke_line(Point::new(4.0, 4.0), Point::new(4.0, 4.0), WHITE, 4.0, LineCap::Square);
        assert_eq!(painted(&r).len(), 16);

        let mut butt = Raster::filled(Width(8), Height(8), BLACK);
        butt.stroke_line(Point::new(4.0, 4.0), Point::new(4.0, 4.0), WHITE, 4.0, LineCap::Butt);
        assert!(painted(&butt).is_empty());
    }

    #[test]
    fn png_and_data_url() {
        let r = Raster::filled(Width(3), Height(2), WHITE);
        let png = r.encode_png().unwrap();
        assert_eq!(&png[..8], &[0x89, b'P', b'N', b'G', 0x0d, 0x0a, 0x1a, 0x0a]);

        let decoded = image::load_from_memory(&png).unwrap().to_rgba8();
        assert_eq!(decoded.as_raw(), r.as_raw());

        assert!(r.data_url().unwrap().starts_with("data:image/png;base64,iVBORw0KGgo"));
    }

    #[test]
    fn checksum_tracks_pixels() {
        let a = Raster::filled(Width(3), Height(2), WHITE);
        let mut b = a.clone();
        assert_eq!(a.checksum(), b.checksum());
        b.stroke_line(Point::new(0.5, 0.5), Point::new(0.5, 0.5), BLACK, 1.0, LineCap::Square);
        assert_ne!(a.checksum(), b.checksum());
        assert_ne!(Raster::filled(Width(2), Height(3), WHITE).checksum(), a.checksum());
    }
}
