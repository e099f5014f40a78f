use std::fmt;

use bit_set::BitSet;
use petgraph::graph::{Graph, NodeIndex};
use petgraph::Undirected;
use smallvec::SmallVec;

use crate::cells::{direction_between, offset_coordinate, Cartesian2DCoordinate, CompassPrimary,
                   CARVING_DIRECTIONS};
use crate::units::{ColumnsCount, EdgesCount, NodesCount, RowsCount};

pub type CoordinateSmallVec = SmallVec<[Cartesian2DCoordinate; 4]>;
pub type DirectionCoordinateSmallVec = SmallVec<[(CompassPrimary, Cartesian2DCoordinate); 4]>;

// Each connector is seen once when scanning only towards the east and south
static LINK_SCAN_DIRECTIONS: [CompassPrimary; 2] = [CompassPrimary::East, CompassPrimary::South];

/// The maze's logical state as a `(2 * rows) * (2 * columns)` boolean matrix.
///
/// Entry `(2r, 2c)` records whether passage-cell `(c, r)` has been visited. The entry half way
/// between two adjacent cells, `(r1 + r2, c1 + c2)`, records whether the connector joining them
/// is open. A connector is only ever opened between two visited cells.
#[derive(Clone, PartialEq)]
pub struct ConnectivityGrid {
    matrix: BitSet,
    columns: ColumnsCount,
    rows: RowsCount,
    visited_count: usize,
    links_count: usize,
}

#[derive(Eq, PartialEq, Copy, Clone, Debug)]
pub enum CellLinkError {
    InvalidGridCoordinate,
    SelfLink,
    NotAdjacent,
    UnvisitedCell,
}

impl fmt::Debug for ConnectivityGrid {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f,
               "ConnectivityGrid :: columns: {:?}, rows: {:?}, visited: {}, links: {}",
               self.columns,
               self.rows,
               self.visited_count,
               self.links_count)
    }
}

impl ConnectivityGrid {
    /// An all false matrix, no cell visited and no connector open.
    pub fn new(columns: ColumnsCount, rows: RowsCount) -> ConnectivityGrid {
        let matrix_size = (2 * columns.0) * (2 * rows.0);
        ConnectivityGrid {
            matrix: BitSet::with_capacity(matrix_size),
            columns,
            rows,
            visited_count: 0,
            links_count: 0,
        }
    }

    #[inline]
    pub fn columns(&self) -> ColumnsCount {
        self.columns
    }

    #[inline]
    pub fn rows(&self) -> RowsCount {
        self.rows
    }

    /// Number of passage-cells.
    #[inline]
    pub fn size(&self) -> NodesCount {
        NodesCount(self.columns.0 * self.rows.0)
    }

    #[inline]
    pub fn visited_count(&self) -> usize {
        self.visited_count
    }

    #[inline]
    pub fn links_count(&self) -> EdgesCount {
        EdgesCount(self.links_count)
    }

    /// `(rows, columns)` of the underlying boolean matrix.
    #[inline]
    pub fn matrix_dimensions(&self) -> (usize, usize) {
        (2 * self.rows.0, 2 * self.columns.0)
    }

    /// Raw matrix entry, None outside the matrix.
    pub fn matrix_entry(&self, row: usize, column: usize) -> Option<bool> {
        let (matrix_rows, matrix_columns) = self.matrix_dimensions();
        if row < matrix_rows && column < matrix_columns {
            Some(self.matrix.contains(row * matrix_columns + column))
        } else {
            None
        }
    }

    /// Is the grid coordinate valid for this grid - within the grid's dimensions
    #[inline]
    pub fn is_valid_coordinate(&self, coord: Cartesian2DCoordinate) -> bool {
        coord.is_within(self.columns, self.rows)
    }

    /// Convert a grid coordinate to a one dimensional index in the range 0...grid.size().
    /// Returns None if the grid coordinate is invalid.
    #[inline]
    pub fn grid_coordinate_to_index(&self, coord: Cartesian2DCoordinate) -> Option<usize> {
        if self.is_valid_coordinate(coord) {
            Some(coord.y as usize * self.columns.0 + coord.x as usize)
        } else {
            None
        }
    }

    #[inline]
    fn matrix_index(&self, matrix_row: usize, matrix_column: usize) -> usize {
        matrix_row * (2 * self.columns.0) + matrix_column
    }

    #[inline]
    fn cell_bit(&self, coord: Cartesian2DCoordinate) -> usize {
        self.matrix_index(2 * coord.y as usize, 2 * coord.x as usize)
    }

    #[inline]
    fn connector_bit(&self, a: Cartesian2DCoordinate, b: Cartesian2DCoordinate) -> usize {
        self.matrix_index(a.y as usize + b.y as usize, a.x as usize + b.x as usize)
    }

    pub fn is_visited(&self, coord: Cartesian2DCoordinate) -> bool {
        self.is_valid_coordinate(coord) && self.matrix.contains(self.cell_bit(coord))
    }

    /// Mark a cell visited. Returns true if it was not visited before.
    pub fn visit(&mut self, coord: Cartesian2DCoordinate) -> Result<bool, CellLinkError> {
        if !self.is_valid_coordinate(coord) {
            return Err(CellLinkError::InvalidGridCoordinate);
        }
        let bit = self.cell_bit(coord);
        let newly_visited = self.matrix.insert(bit);
        if newly_visited {
            self.visited_count += 1;
        }
        Ok(newly_visited)
    }

    /// Open the connector between two adjacent, visited cells.
    pub fn link(&mut self,
                a: Cartesian2DCoordinate,
                b: Cartesian2DCoordinate)
                -> Result<(), CellLinkError> {
        if a == b {
            return Err(CellLinkError::SelfLink);
        }
        if !self.is_valid_coordinate(a) || !self.is_valid_coordinate(b) {
            return Err(CellLinkError::InvalidGridCoordinate);
        }
        if direction_between(a, b).is_none() {
            return Err(CellLinkError::NotAdjacent);
        }
        if !self.is_visited(a) || !self.is_visited(b) {
            return Err(CellLinkError::UnvisitedCell);
        }

        let bit = self.connector_bit(a, b);
        if self.matrix.insert(bit) {
            self.links_count += 1;
        }
        Ok(())
    }

    /// Are two cells in the grid linked?
    pub fn is_linked(&self, a: Cartesian2DCoordinate, b: Cartesian2DCoordinate) -> bool {
        self.is_valid_coordinate(a) && self.is_valid_coordinate(b) &&
        direction_between(a, b).is_some() && self.matrix.contains(self.connector_bit(a, b))
    }

    pub fn is_neighbour_linked(&self, coord: Cartesian2DCoordinate, direction: CompassPrimary) -> bool {
        self.neighbour_at_direction(coord, direction)
            .map_or(false, |neighbour_coord| self.is_linked(coord, neighbour_coord))
    }

    pub fn neighbour_at_direction(&self,
                                  coord: Cartesian2DCoordinate,
                                  direction: CompassPrimary)
                                  -> Option<Cartesian2DCoordinate> {
        offset_coordinate(coord, direction).filter(|neighbour| self.is_valid_coordinate(*neighbour))
    }

    /// Cells to the East, West, South or North of a cell, but not necessarily linked by a passage.
    pub fn neighbours(&self, coord: Cartesian2DCoordinate) -> CoordinateSmallVec {
        CARVING_DIRECTIONS.iter()
            .filter_map(|dir| self.neighbour_at_direction(coord, *dir))
            .collect()
    }

    /// The in bounds neighbours that are still unvisited, with the direction leading to each, in
    /// carving order (+x, -x, +y, -y).
    pub fn unvisited_neighbours(&self, coord: Cartesian2DCoordinate) -> DirectionCoordinateSmallVec {
        CARVING_DIRECTIONS.iter()
            .filter_map(|dir| self.neighbour_at_direction(coord, *dir).map(|c| (*dir, c)))
            .filter(|&(_, c)| !self.is_visited(c))
            .collect()
    }

    /// Cells that are linked to a particular cell by a passage.
    pub fn links(&self, coord: Cartesian2DCoordinate) -> Option<CoordinateSmallVec> {
        if self.is_valid_coordinate(coord) {
            Some(self.neighbours(coord)
                .into_iter()
                .filter(|neighbour| self.is_linked(coord, *neighbour))
                .collect())
        } else {
            None
        }
    }

    /// Row major iteration over every passage-cell coordinate.
    pub fn iter(&self) -> impl Iterator<Item = Cartesian2DCoordinate> {
        let columns = self.columns;
        (0..self.size().0).map(move |index| Cartesian2DCoordinate::from_row_major_index(index, columns))
    }

    /// Every open connector as a pair of cells, each pair reported once, the first cell being
    /// west or north of the second.
    pub fn iter_links<'a>(&'a self) -> impl Iterator<Item = (Cartesian2DCoordinate, Cartesian2DCoordinate)> + 'a {
        self.iter().flat_map(move |coord| {
            LINK_SCAN_DIRECTIONS.iter()
                .filter_map(move |dir| self.neighbour_at_direction(coord, *dir))
                .filter(move |neighbour| self.is_linked(coord, *neighbour))
                .map(move |neighbour| (coord, neighbour))
        })
    }

    /// The passages as an undirected graph, node indices being row major cell indices.
    pub fn to_graph(&self) -> Graph<(), (), Undirected, u32> {
        let NodesCount(nodes) = self.size();
        let mut graph = Graph::with_capacity(nodes, self.links_count);
        for _ in 0..nodes {
            let _ = graph.add_node(());
        }
        for (a, b) in self.iter_links() {
            if let (Some(a_index), Some(b_index)) = (self.grid_coordinate_to_index(a),
                                                     self.grid_coordinate_to_index(b)) {
                let _ = graph.add_edge(NodeIndex::new(a_index), NodeIndex::new(b_index), ());
            }
        }
        graph
    }
}

impl fmt::Display for ConnectivityGrid {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {

        let ColumnsCount(columns_count) = self.columns;
        let RowsCount(rows_count) = self.rows;

        // North boundary
        let mut output = String::from("+");
        for _ in 0..columns_count {
            output.push_str("---+");
        }
        output.push('\n');

        for row in 0..rows_count {
            // West boundary, the top section of each cell was drawn by the previous row
            let mut row_middle_section_render = String::from("|");
            let mut row_bottom_section_render = String::from("+");

            for column in 0..columns_count {
                let cell_coord = Cartesian2DCoordinate::new(column as u32, row as u32);
                let render_cell_side = |direction, passage_clear_text, blocking_wall_text| {
                    if self.is_neighbour_linked(cell_coord, direction) {
                        passage_clear_text
                    } else {
                        blocking_wall_text
                    }
                };

                // Cells the maze never reached stay solid
                let body = if self.is_visited(cell_coord) {
                    "   "
                } else {
                    "###"
                };
                row_middle_section_render.push_str(body);
                row_middle_section_render.push_str(render_cell_side(CompassPrimary::East, " ", "|"));

                row_bottom_section_render.push_str(render_cell_side(CompassPrimary::South, "   ", "---"));
                row_bottom_section_render.push('+');
            }

            output.push_str(&row_middle_section_render);
            output.push('\n');
            output.push_str(&row_bottom_section_render);
            output.push('\n');
        }

        write!(f, "{}", output)
    }
}
