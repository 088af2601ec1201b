//! Tile variants for the cleaning grid.
//!
//! A tile is one cell of a [`Grid`](crate::grid::Grid). The four kinds are a
//! closed enum so that every place that cares about tile semantics (entry
//! permission, serialization, dirtiness) matches exhaustively.

use serde::{Deserialize, Serialize};

use crate::error::GridError;

/// Maximum dirtiness a floor tile can accumulate.
pub const MAX_DIRTINESS: u8 = 9;

/// One cell of the grid.
///
/// The tile kind hierarchy:
/// - `Floor` - traversable surface carrying a dirtiness level (0 = clean)
/// - `Obstacle` - impassable (furniture, walls)
/// - `Charger` - traversable home base; exactly one per valid map
/// - `Unvisited` - placeholder for territory the robot has not yet sensed;
///   only meaningful inside a robot's memory grid
///
/// Identity is positional: a tile is addressed by its linear index in the
/// owning grid and carries no id of its own.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Tile {
    /// Traversable floor with a dirtiness level in `0..=MAX_DIRTINESS`.
    Floor {
        /// 0 = perfectly clean, 9 = maximally dirty.
        dirtiness: u8,
    },
    /// Impassable cell.
    Obstacle,
    /// The robot's home base. Traversable.
    Charger,
    /// Not yet observed. Impassable for transit.
    Unvisited,
}

impl Tile {
    /// A clean floor tile.
    pub fn clean_floor() -> Self {
        Tile::Floor { dirtiness: 0 }
    }

    /// A floor tile with the given dirtiness, clamped to `0..=MAX_DIRTINESS`.
    pub fn floor(dirtiness: u8) -> Self {
        Tile::Floor {
            dirtiness: dirtiness.min(MAX_DIRTINESS),
        }
    }

    /// Can the robot step onto this tile?
    ///
    /// Unvisited counts as not enterable: the robot never routes *through*
    /// unknown territory, it only targets it during exploration search.
    #[inline]
    pub fn can_enter(&self) -> bool {
        matches!(self, Tile::Floor { .. } | Tile::Charger)
    }

    /// Is this a floor tile with dirtiness above zero?
    #[inline]
    pub fn is_dirty(&self) -> bool {
        matches!(self, Tile::Floor { dirtiness } if *dirtiness > 0)
    }

    /// Floor dirtiness, or `None` for non-floor tiles.
    #[inline]
    pub fn dirtiness(&self) -> Option<u8> {
        match self {
            Tile::Floor { dirtiness } => Some(*dirtiness),
            _ => None,
        }
    }

    /// Set floor dirtiness (clamped). No-op on non-floor tiles.
    pub fn set_dirtiness(&mut self, value: u8) {
        if let Tile::Floor { dirtiness } = self {
            *dirtiness = value.min(MAX_DIRTINESS);
        }
    }

    /// Add dirt to a floor tile, saturating at `MAX_DIRTINESS`.
    /// No-op on non-floor tiles.
    pub fn add_dirt(&mut self, amount: u8) {
        if let Tile::Floor { dirtiness } = self {
            *dirtiness = dirtiness.saturating_add(amount).min(MAX_DIRTINESS);
        }
    }

    /// Remove dirt from a floor tile, flooring at 0. No-op on non-floor tiles.
    pub fn clean(&mut self, amount: u8) {
        if let Tile::Floor { dirtiness } = self {
            *dirtiness = dirtiness.saturating_sub(amount);
        }
    }

    /// Single character used by the map text format.
    ///
    /// Floor renders as its dirtiness digit, so the format round-trips
    /// exactly.
    pub fn as_char(&self) -> char {
        match self {
            Tile::Floor { dirtiness } => (b'0' + dirtiness.min(&MAX_DIRTINESS)) as char,
            Tile::Obstacle => 'P',
            Tile::Charger => 'B',
            Tile::Unvisited => '?',
        }
    }

    /// Parse a map character.
    ///
    /// `'?'` is only accepted when `allow_unvisited` is set; ground-truth
    /// maps must be fully known.
    pub fn from_char(ch: char, row: usize, allow_unvisited: bool) -> Result<Self, GridError> {
        match ch {
            '0'..='9' => Ok(Tile::Floor {
                dirtiness: ch as u8 - b'0',
            }),
            'P' => Ok(Tile::Obstacle),
            'B' => Ok(Tile::Charger),
            '?' if allow_unvisited => Ok(Tile::Unvisited),
            '?' => Err(GridError::UnvisitedNotAllowed { row }),
            _ => Err(GridError::InvalidChar { ch, row }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_can_enter() {
        assert!(Tile::clean_floor().can_enter());
        assert!(Tile::floor(9).can_enter());
        assert!(Tile::Charger.can_enter());
        assert!(!Tile::Obstacle.can_enter());
        assert!(!Tile::Unvisited.can_enter());
    }

    #[test]
    fn test_dirt_saturates_at_max() {
        let mut tile = Tile::floor(7);
        tile.add_dirt(200);
        assert_eq!(tile.dirtiness(), Some(MAX_DIRTINESS));

        // Constructor clamps too
        assert_eq!(Tile::floor(42).dirtiness(), Some(MAX_DIRTINESS));
    }

    #[test]
    fn test_clean_floors_at_zero() {
        let mut tile = Tile::floor(3);
        tile.clean(1);
        assert_eq!(tile.dirtiness(), Some(2));
        tile.clean(200);
        assert_eq!(tile.dirtiness(), Some(0));
        assert!(!tile.is_dirty());
    }

    #[test]
    fn test_dirt_ops_ignore_non_floor() {
        let mut tile = Tile::Charger;
        tile.add_dirt(5);
        tile.clean(5);
        tile.set_dirtiness(5);
        assert_eq!(tile, Tile::Charger);
        assert_eq!(tile.dirtiness(), None);
    }

    #[test]
    fn test_char_round_trip() {
        for tile in [
            Tile::floor(0),
            Tile::floor(5),
            Tile::floor(9),
            Tile::Obstacle,
            Tile::Charger,
            Tile::Unvisited,
        ] {
            let parsed = Tile::from_char(tile.as_char(), 0, true).unwrap();
            assert_eq!(parsed, tile);
        }
    }

    #[test]
    fn test_unvisited_char_rejected_without_flag() {
        assert!(matches!(
            Tile::from_char('?', 3, false),
            Err(GridError::UnvisitedNotAllowed { row: 3 })
        ));
        assert!(Tile::from_char('?', 3, true).is_ok());
    }

    #[test]
    fn test_unknown_char_rejected() {
        assert!(matches!(
            Tile::from_char('R', 1, true),
            Err(GridError::InvalidChar { ch: 'R', row: 1 })
        ));
    }
}
