//! **seeded_mazes** generates reproducible perfect mazes from a text seed and renders them to an
//! RGBA raster, ready to be exported as PNG or used as a heightfield.
//!
//! ```no_run
//! use seeded_mazes::{MazeConfigBuilder, MazeEngine, RasterEncoding};
//!
//! # fn main() -> seeded_mazes::errors::Result<()> {
//! let config = MazeConfigBuilder::new().seed("hello.").columns(10).rows(10).build()?;
//! let maze = MazeEngine::create(config)?;
//! let png = maze.export_raster(RasterEncoding::Png)?;
//! # let _ = png;
//! # Ok(())
//! # }
//! ```

pub mod cells;
pub mod config;
pub mod errors;
pub mod generators;
pub mod grid;
pub mod heightfield;
pub mod random;
pub mod raster;
pub mod units;

pub use crate::config::{MazeConfig, MazeConfigBuilder};
pub use crate::generators::{MazeEngine, RasterEncoding};
