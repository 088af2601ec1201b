//! Map text format.
//!
//! One line per row, one character per tile:
//!
//! ```text
//! '0'..'9'  Floor with that dirtiness
//! 'P'       Obstacle
//! 'B'       Charger (exactly one required)
//! '?'       Unvisited (robot-memory maps only)
//! ```
//!
//! Inside a combined save file a blank line terminates the map block.
//! The format round-trips exactly: `Grid::parse(grid.render())` reproduces
//! the grid cell for cell.

use std::io::{BufRead, Write};

use crate::error::{GridError, SnapshotError};
use crate::tile::Tile;

use super::Grid;

impl Grid {
    /// Parse a map from text. Reading stops at the first blank line.
    ///
    /// `allow_unvisited` gates the `'?'` marker: ground-truth maps must be
    /// fully known, robot-memory snapshots may contain unexplored cells.
    pub fn parse(input: &str, allow_unvisited: bool) -> Result<Self, GridError> {
        let rows: Vec<&str> = input
            .lines()
            .take_while(|line| !line.trim().is_empty())
            .collect();
        Self::parse_rows(&rows, allow_unvisited)
    }

    fn parse_rows(rows: &[&str], allow_unvisited: bool) -> Result<Self, GridError> {
        if rows.is_empty() {
            return Err(GridError::EmptyMap);
        }

        let width = rows[0].chars().count();
        let height = rows.len();
        let mut cells = Vec::with_capacity(width * height);
        let mut chargers = 0usize;
        let mut charger_index = 0usize;

        for (row, line) in rows.iter().enumerate() {
            let row_len = line.chars().count();
            if row_len != width {
                return Err(GridError::RaggedRow {
                    row,
                    found: row_len,
                    expected: width,
                });
            }
            for ch in line.chars() {
                let tile = Tile::from_char(ch, row, allow_unvisited)?;
                if tile == Tile::Charger {
                    chargers += 1;
                    charger_index = cells.len();
                }
                cells.push(tile);
            }
        }

        if chargers != 1 {
            return Err(GridError::ChargerCount { count: chargers });
        }

        Ok(Self {
            width,
            height,
            charger_index,
            cells,
        })
    }

    /// Read a map block from a reader, consuming lines up to and including
    /// the terminating blank line (or EOF).
    pub fn from_text<R: BufRead>(
        reader: &mut R,
        allow_unvisited: bool,
    ) -> Result<Self, SnapshotError> {
        let mut rows: Vec<String> = Vec::new();
        let mut line = String::new();
        loop {
            line.clear();
            let read = reader.read_line(&mut line)?;
            if read == 0 || line.trim().is_empty() {
                break;
            }
            rows.push(line.trim_end_matches(['\r', '\n']).to_string());
        }
        let borrowed: Vec<&str> = rows.iter().map(String::as_str).collect();
        Ok(Self::parse_rows(&borrowed, allow_unvisited)?)
    }

    /// Render the map to its text form, one newline per row.
    pub fn render(&self) -> String {
        let mut out = String::with_capacity(self.size() + self.height);
        for row in 0..self.height {
            for col in 0..self.width {
                out.push(self.cells[self.row_col_to_index(row, col)].as_char());
            }
            out.push('\n');
        }
        out
    }

    /// Write the map block to a writer.
    pub fn to_text<W: Write>(&self, writer: &mut W) -> std::io::Result<()> {
        writer.write_all(self.render().as_bytes())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_parse_basic_map() {
        let grid = Grid::parse("012\n345\n6B8\n", false).unwrap();
        assert_eq!(grid.width(), 3);
        assert_eq!(grid.height(), 3);
        assert_eq!(grid.charger_index(), 7);
        assert_eq!(grid.tile_at(0), Some(&Tile::floor(0)));
        assert_eq!(grid.tile_at(5), Some(&Tile::floor(5)));
        assert_eq!(grid.tile_at(7), Some(&Tile::Charger));
        assert!(grid.is_valid(false));
    }

    #[test]
    fn test_parse_obstacles_and_unvisited() {
        let grid = Grid::parse("?P0\n0B0\n", true).unwrap();
        assert_eq!(grid.tile_at(0), Some(&Tile::Unvisited));
        assert_eq!(grid.tile_at(1), Some(&Tile::Obstacle));
        assert!(grid.is_valid(true));
    }

    #[test]
    fn test_parse_rejects_unvisited_in_ground_truth() {
        assert!(matches!(
            Grid::parse("?B\n00\n", false),
            Err(GridError::UnvisitedNotAllowed { row: 0 })
        ));
    }

    #[test]
    fn test_parse_rejects_ragged_rows() {
        assert!(matches!(
            Grid::parse("012\n34\n6B8\n", false),
            Err(GridError::RaggedRow {
                row: 1,
                found: 2,
                expected: 3
            })
        ));
    }

    #[test]
    fn test_parse_rejects_bad_charger_count() {
        assert!(matches!(
            Grid::parse("00\n00\n", false),
            Err(GridError::ChargerCount { count: 0 })
        ));
        assert!(matches!(
            Grid::parse("BB\n00\n", false),
            Err(GridError::ChargerCount { count: 2 })
        ));
    }

    #[test]
    fn test_parse_rejects_empty_input() {
        assert!(matches!(Grid::parse("", false), Err(GridError::EmptyMap)));
        assert!(matches!(
            Grid::parse("\n012\n", false),
            Err(GridError::EmptyMap)
        ));
    }

    #[test]
    fn test_parse_stops_at_blank_line() {
        let grid = Grid::parse("0B\n00\n\n999\n", false).unwrap();
        assert_eq!(grid.height(), 2);
    }

    #[test]
    fn test_render_round_trip() {
        let text = "09P\n3B5\nP78\n";
        let grid = Grid::parse(text, false).unwrap();
        assert_eq!(grid.render(), text);
        let again = Grid::parse(&grid.render(), false).unwrap();
        assert_eq!(again, grid);
    }

    #[test]
    fn test_memory_round_trip_with_unvisited() {
        let text = "??0\n?B1\n???\n";
        let grid = Grid::parse(text, true).unwrap();
        assert_eq!(grid.render(), text);
    }

    #[test]
    fn test_from_text_consumes_block() {
        let mut cursor = Cursor::new("0B\n00\n\nrest");
        let grid = Grid::from_text(&mut cursor, false).unwrap();
        assert_eq!(grid.size(), 4);
        let mut rest = String::new();
        cursor.read_line(&mut rest).unwrap();
        assert_eq!(rest, "rest");
    }
}
