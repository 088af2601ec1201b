//! Rectangular tile grid.
//!
//! A [`Grid`] is a fixed-size array of owned [`Tile`]s addressed by linear
//! index, with a designated charger cell. The same type serves two roles:
//! the simulation's ground truth (no `Unvisited` cells allowed) and a
//! robot's private memory (`Unvisited` marks territory not yet sensed).
//!
//! Cells are stored by value in one contiguous `Vec`; the slot index doubles
//! as the tile's identity, so replacing a tile is a plain assignment.

mod text;

use crate::error::GridError;
use crate::tile::Tile;

/// A step direction on the grid.
///
/// `None` is a real value in the movement vocabulary: actions that do not
/// move (cleaning, idling) report it, and [`Grid::neighbor_index`] maps it
/// to the same index.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
    None,
}

impl Direction {
    /// The four cardinal directions in the fixed iteration order used by
    /// every search in the engine. Keeping this order stable keeps BFS
    /// tie-breaking deterministic.
    pub const CARDINAL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];
}

/// Rectangular array of tiles with a single charger.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Grid {
    width: usize,
    height: usize,
    charger_index: usize,
    cells: Vec<Tile>,
}

impl Grid {
    /// Create a fully known grid: every cell a clean floor except the
    /// charger slot.
    ///
    /// Fails if `charger_index` does not fit the dimensions.
    pub fn new(width: usize, height: usize, charger_index: usize) -> Result<Self, GridError> {
        let size = width * height;
        if charger_index >= size {
            return Err(GridError::OutOfBounds {
                index: charger_index,
                size,
            });
        }
        let mut cells = vec![Tile::clean_floor(); size];
        cells[charger_index] = Tile::Charger;
        Ok(Self {
            width,
            height,
            charger_index,
            cells,
        })
    }

    /// Create a robot-memory grid: every cell `Unvisited` except the
    /// charger slot. The charger is seeded at creation so the memory always
    /// has a home to route to.
    pub fn unexplored(width: usize, height: usize, charger_index: usize) -> Result<Self, GridError> {
        let size = width * height;
        if charger_index >= size {
            return Err(GridError::OutOfBounds {
                index: charger_index,
                size,
            });
        }
        let mut cells = vec![Tile::Unvisited; size];
        cells[charger_index] = Tile::Charger;
        Ok(Self {
            width,
            height,
            charger_index,
            cells,
        })
    }

    /// Grid width in cells.
    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    /// Grid height in cells.
    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    /// Total number of cells.
    #[inline]
    pub fn size(&self) -> usize {
        self.cells.len()
    }

    /// Linear index of the charger cell.
    #[inline]
    pub fn charger_index(&self) -> usize {
        self.charger_index
    }

    /// Convert a linear index to `(row, col)`.
    #[inline]
    pub fn index_to_row_col(&self, index: usize) -> (usize, usize) {
        (index / self.width, index % self.width)
    }

    /// Convert `(row, col)` to a linear index.
    #[inline]
    pub fn row_col_to_index(&self, row: usize, col: usize) -> usize {
        row * self.width + col
    }

    /// Index of the neighbor in `direction`, or `None` at a boundary.
    ///
    /// Boundary checks use row/col arithmetic rather than raw index
    /// comparisons, so a `Left` from column 0 never wraps to the previous
    /// row. `Direction::None` returns the index unchanged (when in range).
    pub fn neighbor_index(&self, index: usize, direction: Direction) -> Option<usize> {
        if index >= self.size() {
            return None;
        }
        let (row, col) = self.index_to_row_col(index);
        match direction {
            Direction::Up => (row > 0).then(|| self.row_col_to_index(row - 1, col)),
            Direction::Down => {
                (row + 1 < self.height).then(|| self.row_col_to_index(row + 1, col))
            }
            Direction::Left => (col > 0).then(|| self.row_col_to_index(row, col - 1)),
            Direction::Right => {
                (col + 1 < self.width).then(|| self.row_col_to_index(row, col + 1))
            }
            Direction::None => Some(index),
        }
    }

    /// Tile at `index`, or `None` when out of range.
    #[inline]
    pub fn tile_at(&self, index: usize) -> Option<&Tile> {
        self.cells.get(index)
    }

    /// Mutable tile at `index`, or `None` when out of range.
    #[inline]
    pub fn tile_at_mut(&mut self, index: usize) -> Option<&mut Tile> {
        self.cells.get_mut(index)
    }

    /// Tile one step from `index` in `direction`.
    pub fn tile_toward(&self, index: usize, direction: Direction) -> Option<&Tile> {
        self.neighbor_index(index, direction)
            .and_then(|i| self.tile_at(i))
    }

    /// Replace the tile at `index`.
    ///
    /// Out-of-range is a hard error here (unlike `tile_at`): callers pass
    /// indices they already validated, so a miss is a programming bug.
    pub fn set_tile(&mut self, index: usize, tile: Tile) -> Result<(), GridError> {
        let size = self.size();
        match self.cells.get_mut(index) {
            Some(slot) => {
                *slot = tile;
                Ok(())
            }
            None => Err(GridError::OutOfBounds { index, size }),
        }
    }

    /// Can the robot step onto the tile at `index`?
    ///
    /// Out-of-range indices are simply not enterable.
    #[inline]
    pub fn can_enter(&self, index: usize) -> bool {
        self.tile_at(index).is_some_and(Tile::can_enter)
    }

    /// Check global invariants: cell count matches the dimensions and
    /// exactly one charger exists. `Unvisited` cells are tolerated only
    /// when `allow_unvisited` is set (robot memory).
    pub fn is_valid(&self, allow_unvisited: bool) -> bool {
        if self.cells.len() != self.width * self.height {
            return false;
        }
        let mut chargers = 0usize;
        for tile in &self.cells {
            match tile {
                Tile::Charger => chargers += 1,
                Tile::Unvisited if !allow_unvisited => return false,
                _ => {}
            }
        }
        chargers == 1
    }

    /// Iterate over `(index, tile)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (usize, &Tile)> {
        self.cells.iter().enumerate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_places_single_charger() {
        let grid = Grid::new(3, 3, 7).unwrap();
        assert_eq!(grid.width(), 3);
        assert_eq!(grid.height(), 3);
        assert_eq!(grid.size(), 9);
        assert_eq!(grid.charger_index(), 7);
        assert_eq!(grid.tile_at(7), Some(&Tile::Charger));
        assert_eq!(grid.tile_at(0), Some(&Tile::clean_floor()));
        assert!(grid.is_valid(false));
    }

    #[test]
    fn test_new_rejects_bad_charger() {
        assert!(matches!(
            Grid::new(3, 3, 9),
            Err(GridError::OutOfBounds { index: 9, size: 9 })
        ));
    }

    #[test]
    fn test_unexplored_memory_seed() {
        let grid = Grid::unexplored(4, 2, 5).unwrap();
        assert_eq!(grid.tile_at(5), Some(&Tile::Charger));
        assert_eq!(grid.tile_at(0), Some(&Tile::Unvisited));
        assert!(grid.is_valid(true));
        assert!(!grid.is_valid(false));
    }

    #[test]
    fn test_neighbor_index_corners() {
        let grid = Grid::new(3, 3, 4).unwrap();
        // Top-left corner
        assert_eq!(grid.neighbor_index(0, Direction::Up), None);
        assert_eq!(grid.neighbor_index(0, Direction::Left), None);
        assert_eq!(grid.neighbor_index(0, Direction::Right), Some(1));
        assert_eq!(grid.neighbor_index(0, Direction::Down), Some(3));
        // Bottom-right corner
        assert_eq!(grid.neighbor_index(8, Direction::Down), None);
        assert_eq!(grid.neighbor_index(8, Direction::Right), None);
        assert_eq!(grid.neighbor_index(8, Direction::Up), Some(5));
        assert_eq!(grid.neighbor_index(8, Direction::Left), Some(7));
    }

    #[test]
    fn test_neighbor_index_no_row_wrap() {
        let grid = Grid::new(3, 3, 4).unwrap();
        // Index 3 is the start of row 1; Left must not wrap to index 2.
        assert_eq!(grid.neighbor_index(3, Direction::Left), None);
        // Index 2 is the end of row 0; Right must not wrap to index 3.
        assert_eq!(grid.neighbor_index(2, Direction::Right), None);
    }

    #[test]
    fn test_neighbor_index_none_direction() {
        let grid = Grid::new(3, 3, 4).unwrap();
        assert_eq!(grid.neighbor_index(4, Direction::None), Some(4));
        assert_eq!(grid.neighbor_index(99, Direction::None), None);
    }

    #[test]
    fn test_tile_access_out_of_range() {
        let mut grid = Grid::new(2, 2, 0).unwrap();
        assert_eq!(grid.tile_at(4), None);
        assert!(!grid.can_enter(4));
        assert!(matches!(
            grid.set_tile(4, Tile::Obstacle),
            Err(GridError::OutOfBounds { index: 4, size: 4 })
        ));
    }

    #[test]
    fn test_set_tile_replaces_slot() {
        let mut grid = Grid::new(2, 2, 0).unwrap();
        grid.set_tile(3, Tile::floor(7)).unwrap();
        assert_eq!(grid.tile_at(3), Some(&Tile::floor(7)));
    }

    #[test]
    fn test_is_valid_detects_charger_count() {
        let mut grid = Grid::new(2, 2, 0).unwrap();
        grid.set_tile(3, Tile::Charger).unwrap();
        assert!(!grid.is_valid(false));
        grid.set_tile(0, Tile::clean_floor()).unwrap();
        grid.set_tile(3, Tile::clean_floor()).unwrap();
        assert!(!grid.is_valid(false));
    }

    #[test]
    fn test_tile_toward() {
        let grid = Grid::new(3, 3, 4).unwrap();
        assert_eq!(grid.tile_toward(4, Direction::Up), Some(&Tile::clean_floor()));
        assert_eq!(grid.tile_toward(0, Direction::Up), None);
        assert_eq!(grid.tile_toward(3, Direction::Right), Some(&Tile::Charger));
    }
}
