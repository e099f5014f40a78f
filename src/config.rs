use image::Rgba;

use crate::cells::Cartesian2DCoordinate;
use crate::errors::*;
use crate::raster::{Colour, Point};
use crate::units::{ColumnsCount, Height, OuterWallWidth, PathWidth, RowsCount, WallWidth, Width};

pub const DEFAULT_PATH_WIDTH: u32 = 10;
pub const DEFAULT_WALL_WIDTH: u32 = 2;
pub const DEFAULT_OUTER_WALL_WIDTH: u32 = 2;
pub const DEFAULT_COLUMNS: u32 = 25;
pub const DEFAULT_ROWS: u32 = 25;
pub const DEFAULT_SEED: &str = "1";
pub const DEFAULT_WALL_COLOUR: Colour = Rgba([0, 0, 0, 0xff]);
pub const DEFAULT_PATH_COLOUR: Colour = Rgba([0xff, 0xff, 0xff, 0xff]);

/// Fully resolved, immutable maze configuration.
///
/// Build one with `MazeConfigBuilder`. Changing anything means building a new config and a new
/// maze.
#[derive(Debug, Clone, PartialEq)]
pub struct MazeConfig {
    path_width: u32,
    wall_width: u32,
    outer_wall_width: u32,
    columns: u32,
    rows: u32,
    seed: String,
    wall_colour: Colour,
    path_colour: Colour,
    raster_width: u32,
    raster_height: u32,
}

impl Default for MazeConfig {
    fn default() -> MazeConfig {
        MazeConfig {
            path_width: DEFAULT_PATH_WIDTH,
            wall_width: DEFAULT_WALL_WIDTH,
            outer_wall_width: DEFAULT_OUTER_WALL_WIDTH,
            columns: DEFAULT_COLUMNS,
            rows: DEFAULT_ROWS,
            seed: DEFAULT_SEED.to_string(),
            wall_colour: DEFAULT_WALL_COLOUR,
            path_colour: DEFAULT_PATH_COLOUR,
            // 2*2 + 25*(10+2) - 2
            raster_width: 302,
            raster_height: 302,
        }
    }
}

impl MazeConfig {
    #[inline]
    pub fn path_width(&self) -> PathWidth {
        PathWidth(self.path_width)
    }

    #[inline]
    pub fn wall_width(&self) -> WallWidth {
        WallWidth(self.wall_width)
    }

    #[inline]
    pub fn outer_wall_width(&self) -> OuterWallWidth {
        OuterWallWidth(self.outer_wall_width)
    }

    #[inline]
    pub fn columns(&self) -> ColumnsCount {
        ColumnsCount(self.columns as usize)
    }

    #[inline]
    pub fn rows(&self) -> RowsCount {
        RowsCount(self.rows as usize)
    }

    #[inline]
    pub fn seed(&self) -> &str {
        &self.seed
    }

    #[inline]
    pub fn wall_colour(&self) -> Colour {
        self.wall_colour
    }

    #[inline]
    pub fn path_colour(&self) -> Colour {
        self.path_colour
    }

    #[inline]
    pub fn raster_width(&self) -> Width {
        Width(self.raster_width)
    }

    #[inline]
    pub fn raster_height(&self) -> Height {
        Height(self.raster_height)
    }

    /// The cell where carving starts: `(columns / 2, rows / 2)`.
    pub fn start_cell(&self) -> Cartesian2DCoordinate {
        Cartesian2DCoordinate::new(self.columns / 2, self.rows / 2)
    }

    /// Pixel space centre of a passage-cell, where its strokes start and end.
    pub fn cell_anchor(&self, coord: Cartesian2DCoordinate) -> Point {
        let offset = f64::from(self.path_width) / 2.0 + f64::from(self.outer_wall_width);
        let pitch = f64::from(self.path_width) + f64::from(self.wall_width);
        Point::new(offset + f64::from(coord.x) * pitch,
                   offset + f64::from(coord.y) * pitch)
    }
}

/// `2 * outer + cells * (path + wall) - wall`, None on overflow.
fn raster_length(cells: u32, path_width: u32, wall_width: u32, outer_wall_width: u32) -> Option<u32> {
    let pitch = u64::from(path_width) + u64::from(wall_width);
    let length = u64::from(cells)
        .checked_mul(pitch)?
        .checked_add(2 * u64::from(outer_wall_width))?
        .checked_sub(u64::from(wall_width))?;
    if length <= u64::from(u32::MAX) {
        Some(length as u32)
    } else {
        None
    }
}

/// Collects optional configuration values and resolves them into a validated `MazeConfig`.
///
/// Unset fields take the documented defaults: path width 10, wall width 2, outer wall width 2,
/// 25 columns, 25 rows, seed "1", black walls and white paths.
#[derive(Debug, Clone, Default)]
pub struct MazeConfigBuilder {
    path_width: Option<u32>,
    wall_width: Option<u32>,
    outer_wall_width: Option<u32>,
    columns: Option<u32>,
    rows: Option<u32>,
    seed: Option<String>,
    wall_colour: Option<Colour>,
    path_colour: Option<Colour>,
}

impl MazeConfigBuilder {
    pub fn new() -> MazeConfigBuilder {
        MazeConfigBuilder::default()
    }
    pub fn path_width(mut self, pixels: u32) -> MazeConfigBuilder {
        self.path_width = Some(pixels);
        self
    }
    pub fn wall_width(mut self, pixels: u32) -> MazeConfigBuilder {
        self.wall_width = Some(pixels);
        self
    }
    pub fn outer_wall_width(mut self, pixels: u32) -> MazeConfigBuilder {
        self.outer_wall_width = Some(pixels);
        self
    }
    pub fn columns(mut self, columns: u32) -> MazeConfigBuilder {
        self.columns = Some(columns);
        self
    }
    pub fn rows(mut self, rows: u32) -> MazeConfigBuilder {
        self.rows = Some(rows);
        self
    }
    pub fn seed<S: Into<String>>(mut self, seed: S) -> MazeConfigBuilder {
        self.seed = Some(seed.into());
        self
    }
    pub fn wall_colour(mut self, colour: Colour) -> MazeConfigBuilder {
        self.wall_colour = Some(colour);
        self
    }
    pub fn path_colour(mut self, colour: Colour) -> MazeConfigBuilder {
        self.path_colour = Some(colour);
        self
    }

    /// Apply defaults and validate.
    ///
    /// Fails with a `Configuration` error when columns, rows or the path width are zero, or the
    /// raster would not fit in `u32 * u32` pixels addressable in memory. An empty seed string
    /// falls back to the default seed.
    pub fn build(self) -> Result<MazeConfig> {
        let path_width = self.path_width.unwrap_or(DEFAULT_PATH_WIDTH);
        let wall_width = self.wall_width.unwrap_or(DEFAULT_WALL_WIDTH);
        let outer_wall_width = self.outer_wall_width.unwrap_or(DEFAULT_OUTER_WALL_WIDTH);
        let columns = self.columns.unwrap_or(DEFAULT_COLUMNS);
        let rows = self.rows.unwrap_or(DEFAULT_ROWS);
        let seed = match self.seed {
            Some(ref s) if !s.is_empty() => s.clone(),
            _ => DEFAULT_SEED.to_string(),
        };

        if columns == 0 {
            return configuration_error("columns must be greater than 0");
        }
        if rows == 0 {
            return configuration_error("rows must be greater than 0");
        }
        if path_width == 0 {
            return configuration_error("path width must be greater than 0 pixels");
        }

        let raster_width = raster_length(columns, path_width, wall_width, outer_wall_width);
        let raster_height = raster_length(rows, path_width, wall_width, outer_wall_width);
        let (raster_width, raster_height) = match (raster_width, raster_height) {
            (Some(w), Some(h)) if w > 0 && h > 0 => (w, h),
            _ => {
                return configuration_error(format!("raster size for {}x{} cells is not representable",
                                                   columns,
                                                   rows))
            }
        };
        let addressable = (raster_width as usize)
            .checked_mul(raster_height as usize)
            .and_then(|pixels| pixels.checked_mul(4))
            .is_some();
        if !addressable {
            return configuration_error(format!("raster of {}x{} pixels is too large",
                                               raster_width,
                                               raster_height));
        }

        Ok(MazeConfig {
            path_width,
            wall_width,
            outer_wall_width,
            columns,
            rows,
            seed,
            wall_colour: self.wall_colour.unwrap_or(DEFAULT_WALL_COLOUR),
            path_colour: self.path_colour.unwrap_or(DEFAULT_PATH_COLOUR),
            raster_width,
            raster_height,
        })
    }
}

/// Parse a CSS style hex colour, `#rgb` or `#rrggbb`, the leading `#` being optional.
/// The result is fully opaque.
pub fn parse_hex_colour(hex: &str) -> Result<Colour> {
    let digits = hex.trim();
    let digits = digits.strip_prefix('#').unwrap_or(digits);
    if !digits.chars().all(|c| c.is_ascii_hexdigit()) {
        return configuration_error(format!("'{}' is not a hex colour", hex));
    }

    let channel = |s: &str| u8::from_str_radix(s, 16).chain_err(|| format!("bad colour channel in '{}'", hex));
    match digits.len() {
        3 => {
            let mut rgb = [0u8; 3];
            for (n, c) in digits.char_indices() {
                // #abc is shorthand for #aabbcc
                let nibble = channel(&digits[n..n + c.len_utf8()])?;
                rgb[n] = nibble * 0x11;
            }
            Ok(Rgba([rgb[0], rgb[1], rgb[2], 0xff]))
        }
        6 => {
            Ok(Rgba([channel(&digits[0..2])?, channel(&digits[2..4])?, channel(&digits[4..6])?, 0xff]))
        }
        _ => configuration_error(format!("'{}' is not a 3 or 6 digit hex colour", hex)),
    }
}
