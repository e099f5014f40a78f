//! Heightfield sample grids derived from a maze raster.
//!
//! Renderers read the red channel as height: paths and walls end up at two different heights
//! depending on their colours.

use image::RgbaImage;

use crate::errors::*;
use crate::raster::Raster;
use crate::units::{ColumnsCount, RowsCount};

#[derive(Debug, Clone, PartialEq)]
pub struct Heightfield {
    image: RgbaImage,
}

impl Heightfield {
    pub fn from_raster(raster: &Raster) -> Heightfield {
        Heightfield { image: raster.as_image().clone() }
    }

    /// Decode an encoded image, e.g. an exported PNG.
    pub fn from_encoded(bytes: &[u8]) -> Result<Heightfield> {
        let image = image::load_from_memory(bytes)?.to_rgba8();
        Ok(Heightfield { image })
    }

    #[inline]
    pub fn rows(&self) -> RowsCount {
        RowsCount(self.image.height() as usize)
    }

    #[inline]
    pub fn columns(&self) -> ColumnsCount {
        ColumnsCount(self.image.width() as usize)
    }

    /// Red channel sample at a pixel, None outside the image.
    pub fn get(&self, column: u32, row: u32) -> Option<u8> {
        if column < self.image.width() && row < self.image.height() {
            Some(self.image.get_pixel(column, row).0[0])
        } else {
            None
        }
    }

    /// Row major red channel samples scaled to `[0, 1]`.
    pub fn to_matrix(&self) -> Vec<Vec<f32>> {
        self.image
            .rows()
            .map(|row| row.map(|pixel| f32::from(pixel.0[0]) / 255.0).collect())
            .collect()
    }

    /// Row major `[r, g, b, a]` quadruples, one per pixel.
    pub fn pixel_rows(&self) -> Vec<Vec<[u8; 4]>> {
        self.image
            .rows()
            .map(|row| row.map(|pixel| pixel.0).collect())
            .collect()
    }
}

#[cfg(test)]
mod tests {

    use super::*;
    use crate::raster::{LineCap, Point};
    use crate::units::{Height, Width};
    use image::Rgba;

    fn sample_raster() -> Raster {
        let mut raster = Raster::filled(Width(4), Height(2), Rgba([255, 255, 255, 255]));
        raster.stroke_line(Point::new(0.0, 0.5), Point::new(2.0, 0.5), Rgba([0, 10, 20, 255]), 1.0, LineCap::Butt);
        raster
    }

    #[test]
    fn red_channel_matrix() {
        let field = Heightfield::from_raster(&sample_raster());
        assert_eq!(field.rows(), RowsCount(2));
        assert_eq!(field.columns(), ColumnsCount(4));
        assert_eq!(field.to_matrix(),
                   vec![vec![0.0, 0.0, 1.0, 1.0], vec![1.0, 1.0, 1.0, 1.0]]);
        assert_eq!(field.get(1, 0), Some(0));
        assert_eq!(field.get(3, 1), Some(255));
        assert_eq!(field.get(4, 0), None);
    }

    #[test]
    fn pixel_quadruples() {
        let field = Heightfield::from_raster(&sample_raster());
        let rows = field.pixel_rows();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0][0], [0, 10, 20, 255]);
        assert_eq!(rows[1][3], [255, 255, 255, 255]);
    }

    #[test]
    fn decoded_png_matches_the_raster() {
        let raster = sample_raster();
        let png = raster.encode_png().unwrap();
        assert_eq!(Heightfield::from_encoded(&png).unwrap(), Heightfield::from_raster(&raster));
        assert!(Heightfield::from_encoded(b"not an image").is_err());
    }
}
