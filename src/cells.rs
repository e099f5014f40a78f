use std::convert::From;

use crate::units::{ColumnsCount, RowsCount};

/// A passage-cell position: `x` is the column, `y` the row, with row 0 at the top.
#[derive(Hash, Eq, PartialEq, Copy, Clone, Debug, Ord, PartialOrd)]
pub struct Cartesian2DCoordinate {
    pub x: u32,
    pub y: u32,
}

impl Cartesian2DCoordinate {
    pub fn new(x: u32, y: u32) -> Cartesian2DCoordinate {
        Cartesian2DCoordinate { x, y }
    }

    #[inline]
    pub fn from_row_major_index(index: usize, columns: ColumnsCount) -> Cartesian2DCoordinate {
        let ColumnsCount(width) = columns;
        Cartesian2DCoordinate::new((index % width) as u32, (index / width) as u32)
    }

    /// Is this coordinate inside a `columns * rows` grid?
    #[inline]
    pub fn is_within(&self, columns: ColumnsCount, rows: RowsCount) -> bool {
        (self.x as usize) < columns.0 && (self.y as usize) < rows.0
    }
}

impl From<(u32, u32)> for Cartesian2DCoordinate {
    fn from(x_y_pair: (u32, u32)) -> Cartesian2DCoordinate {
        Cartesian2DCoordinate::new(x_y_pair.0, x_y_pair.1)
    }
}

#[derive(Eq, PartialEq, Copy, Clone, Debug)]
pub enum CompassPrimary {
    North,
    South,
    East,
    West,
}

/// The directions tried when carving, in enumeration order: +x, -x, +y, -y.
///
/// The order only decides which alternative a given random index picks, every remaining
/// alternative is equally likely.
pub const CARVING_DIRECTIONS: [CompassPrimary; 4] = [CompassPrimary::East,
                                                     CompassPrimary::West,
                                                     CompassPrimary::South,
                                                     CompassPrimary::North];

impl CompassPrimary {
    /// Unit step `(dx, dy)` for this direction.
    #[inline]
    pub fn offset(self) -> (i64, i64) {
        match self {
            CompassPrimary::North => (0, -1),
            CompassPrimary::South => (0, 1),
            CompassPrimary::East => (1, 0),
            CompassPrimary::West => (-1, 0),
        }
    }

    pub fn opposite(self) -> CompassPrimary {
        match self {
            CompassPrimary::North => CompassPrimary::South,
            CompassPrimary::South => CompassPrimary::North,
            CompassPrimary::East => CompassPrimary::West,
            CompassPrimary::West => CompassPrimary::East,
        }
    }
}

/// Creates a new coordinate offset 1 cell away in the given direction.
/// Returns None if the coordinate is not representable, i.e. it would step past row or column 0.
/// Upper bounds are the grid's business.
pub fn offset_coordinate(coord: Cartesian2DCoordinate,
                         dir: CompassPrimary)
                         -> Option<Cartesian2DCoordinate> {

    let (x, y) = (coord.x, coord.y);
    match dir {
        CompassPrimary::North => {
            if y > 0 {
                Some(Cartesian2DCoordinate { x, y: y - 1 })
            } else {
                None
            }
        }
        CompassPrimary::South => y.checked_add(1).map(|y| Cartesian2DCoordinate { x, y }),
        CompassPrimary::East => x.checked_add(1).map(|x| Cartesian2DCoordinate { x, y }),
        CompassPrimary::West => {
            if x > 0 {
                Some(Cartesian2DCoordinate { x: x - 1, y })
            } else {
                None
            }
        }
    }
}

/// The direction that leads from `a` to an adjacent `b`, None if they are not adjacent.
pub fn direction_between(a: Cartesian2DCoordinate,
                         b: Cartesian2DCoordinate)
                         -> Option<CompassPrimary> {
    CARVING_DIRECTIONS.iter()
        .cloned()
        .find(|dir| offset_coordinate(a, *dir) == Some(b))
}

#[cfg(test)]
mod tests {

    use super::*;
    use std::u32;

    #[test]
    fn offsets_stop_at_zero() {
        let gc = |x, y| Cartesian2DCoordinate::new(x, y);
        assert_eq!(offset_coordinate(gc(0, 0), CompassPrimary::North), None);
        assert_eq!(offset_coordinate(gc(0, 0), CompassPrimary::West), None);
        assert_eq!(offset_coordinate(gc(0, 0), CompassPrimary::East), Some(gc(1, 0)));
        assert_eq!(offset_coordinate(gc(0, 0), CompassPrimary::South), Some(gc(0, 1)));
        assert_eq!(offset_coordinate(gc(u32::MAX, 0), CompassPrimary::East), None);
    }

    #[test]
    fn carving_order_is_x_then_y() {
        let offsets = CARVING_DIRECTIONS.iter().map(|d| d.offset()).collect::<Vec<_>>();
        assert_eq!(offsets, vec![(1, 0), (-1, 0), (0, 1), (0, -1)]);
    }

    #[test]
    fn direction_between_adjacent_cells() {
        let gc = |x, y| Cartesian2DCoordinate::new(x, y);
        assert_eq!(direction_between(gc(1, 1), gc(2, 1)), Some(CompassPrimary::East));
        assert_eq!(direction_between(gc(1, 1), gc(1, 0)), Some(CompassPrimary::North));
        assert_eq!(direction_between(gc(1, 1), gc(2, 2)), None);
        assert_eq!(direction_between(gc(1, 1), gc(1, 1)), None);
        for dir in CARVING_DIRECTIONS.iter() {
            assert_eq!(dir.opposite().opposite(), *dir);
        }
    }

    #[test]
    fn row_major_index_to_coordinate() {
        let c = Cartesian2DCoordinate::from_row_major_index(7, ColumnsCount(3));
        assert_eq!(c, Cartesian2DCoordinate::new(1, 2));
        assert!(c.is_within(ColumnsCount(3), RowsCount(3)));
        assert!(!c.is_within(ColumnsCount(3), RowsCount(2)));
    }
}
