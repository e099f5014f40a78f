use std::cmp;

use log::{debug, trace};

use crate::cells::Cartesian2DCoordinate;
use crate::config::MazeConfig;
use crate::errors::*;
use crate::grid::ConnectivityGrid;
use crate::random::{Arc4Random, RandomSource};
use crate::raster::{LineCap, Point, Raster};

/// How `MazeEngine::export_raster` encodes the pixels.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum RasterEncoding {
    /// A complete PNG file.
    Png,
    /// Row major RGBA bytes, 4 per pixel, `raster_width * raster_height * 4` long.
    RawRgba,
}

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
enum GenerationState {
    Pending,
    Complete,
}

/// Where the next stroke starts from.
///
/// `path_broken` is set when the pen jumps back along the route after a dead end and cleared by
/// the next stroke.
#[derive(Copy, Clone, Debug)]
struct Pen {
    position: Point,
    path_broken: bool,
}

/// A generated maze: the connectivity grid plus the raster its passages were stroked onto.
///
/// Generation is a randomised depth first backtracker driven by an explicit route stack. Starting
/// from the centre cell it repeatedly steps into a random unvisited neighbour of the route's last
/// cell, opening the connector and stroking a line between the two cell anchors, and pops the
/// route at dead ends. It ends when the route is empty, leaving a perfect maze: a spanning tree
/// over every cell reachable from the start.
#[derive(Debug)]
pub struct MazeEngine {
    config: MazeConfig,
    grid: ConnectivityGrid,
    route: Vec<Cartesian2DCoordinate>,
    raster: Raster,
    pen: Pen,
    carve_order: Vec<Cartesian2DCoordinate>,
    longest_route: usize,
    state: GenerationState,
}

impl MazeEngine {
    /// Generate the maze described by `config`, drawing from an `Arc4Random` seeded with the
    /// config's seed. The same config always gives the same grid and the same pixels.
    pub fn create(config: MazeConfig) -> Result<MazeEngine> {
        let rng = Arc4Random::new(config.seed());
        MazeEngine::with_random_source(config, rng)
    }

    /// Generate the maze described by `config` with random draws taken from `source`. The
    /// config's seed is ignored.
    pub fn with_random_source<R: RandomSource>(config: MazeConfig, mut source: R) -> Result<MazeEngine> {
        let mut engine = MazeEngine::initialise(config)?;
        engine.generate(&mut source)?;
        Ok(engine)
    }

    /// Empty grid and wall coloured raster, with only the start cell visited and on the route.
    fn initialise(config: MazeConfig) -> Result<MazeEngine> {
        let mut grid = ConnectivityGrid::new(config.columns(), config.rows());
        let raster = Raster::filled(config.raster_width(), config.raster_height(), config.wall_colour());

        let start = config.start_cell();
        grid.visit(start)?;
        let pen = Pen {
            position: config.cell_anchor(start),
            path_broken: false,
        };

        let mut carve_order = Vec::with_capacity(grid.size().0);
        carve_order.push(start);

        Ok(MazeEngine {
            config,
            grid,
            route: vec![start],
            raster,
            pen,
            carve_order,
            longest_route: 1,
            state: GenerationState::Pending,
        })
    }

    fn generate<R: RandomSource>(&mut self, rng: &mut R) -> Result<()> {

        while let Some(&current) = self.route.last() {

            let alternatives = self.grid.unvisited_neighbours(current);

            if alternatives.is_empty() {
                // Dead end, back up one cell and continue carving from there
                let _ = self.route.pop();
                if let Some(&resume) = self.route.last() {
                    self.move_to(resume);
                }
                continue;
            }

            let (_, next) = alternatives[rng.next_index(alternatives.len())];
            self.route.push(next);
            self.grid.visit(next)?;
            self.grid.link(current, next)?;
            self.line_to(next);

            self.carve_order.push(next);
            self.longest_route = cmp::max(self.longest_route, self.route.len());
        }

        self.state = GenerationState::Complete;
        debug!("generated {}x{} maze with seed {:?}: {} cells visited, {} connectors open, {}x{} raster",
               self.config.columns().0,
               self.config.rows().0,
               self.config.seed(),
               self.grid.visited_count(),
               self.grid.links_count().0,
               self.raster.width().0,
               self.raster.height().0);
        Ok(())
    }

    fn move_to(&mut self, coord: Cartesian2DCoordinate) {
        self.pen = Pen {
            position: self.config.cell_anchor(coord),
            path_broken: true,
        };
    }

    fn line_to(&mut self, coord: Cartesian2DCoordinate) {
        let to = self.config.cell_anchor(coord);
        if self.pen.path_broken {
            trace!("resuming the stroke path at {:?}", self.pen.position);
        }
        self.raster.stroke_line(self.pen.position,
                                to,
                                self.config.path_colour(),
                                f64::from(self.config.path_width().0),
                                LineCap::Square);
        self.pen = Pen {
            position: to,
            path_broken: false,
        };
    }

    fn ensure_complete(&self) -> Result<()> {
        match self.state {
            GenerationState::Complete => Ok(()),
            GenerationState::Pending => Err(ErrorKind::NotReady.into()),
        }
    }

    #[inline]
    pub fn config(&self) -> &MazeConfig {
        &self.config
    }

    #[inline]
    pub fn grid(&self) -> &ConnectivityGrid {
        &self.grid
    }

    #[inline]
    pub fn is_complete(&self) -> bool {
        self.state == GenerationState::Complete
    }

    /// Cells in the order they were first visited, starting with the start cell.
    #[inline]
    pub fn carve_order(&self) -> &[Cartesian2DCoordinate] {
        &self.carve_order
    }

    /// The deepest the route stack got during generation, counting the start cell.
    #[inline]
    pub fn longest_route(&self) -> usize {
        self.longest_route
    }

    /// The finished raster.
    pub fn raster(&self) -> Result<&Raster> {
        self.ensure_complete()?;
        Ok(&self.raster)
    }

    pub fn into_raster(self) -> Result<Raster> {
        self.ensure_complete()?;
        Ok(self.raster)
    }

    /// The finished raster as bytes in the requested encoding.
    pub fn export_raster(&self, encoding: RasterEncoding) -> Result<Vec<u8>> {
        let raster = self.raster()?;
        match encoding {
            RasterEncoding::Png => raster.encode_png(),
            RasterEncoding::RawRgba => Ok(raster.as_raw().to_vec()),
        }
    }

    /// The finished raster as a PNG data URI.
    pub fn export_data_url(&self) -> Result<String> {
        self.raster()?.data_url()
    }
}
