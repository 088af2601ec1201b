//! Combined save file: ground-truth map block, blank line, robot snapshot.
//!
//! A file holding only a map is also accepted; loading one starts a fresh
//! robot at the map's charger.

use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;

use log::info;

use crate::error::SimError;
use crate::grid::Grid;
use crate::robot::Robot;

use super::Simulation;

/// Skip whitespace, reporting whether any content remains.
fn has_more_content<R: BufRead>(reader: &mut R) -> std::io::Result<bool> {
    loop {
        let buf = reader.fill_buf()?;
        if buf.is_empty() {
            return Ok(false);
        }
        match buf.iter().position(|b| !b.is_ascii_whitespace()) {
            Some(skip) => {
                reader.consume(skip);
                return Ok(true);
            }
            None => {
                let len = buf.len();
                reader.consume(len);
            }
        }
    }
}

impl Simulation {
    /// Load a simulation from save-file text.
    pub fn load<R: BufRead>(reader: &mut R) -> Result<Self, SimError> {
        let grid = Grid::from_text(reader, false)?;
        if has_more_content(reader)? {
            let robot = Robot::from_snapshot(reader)?;
            Simulation::from_parts(grid, robot)
        } else {
            info!("[Sim] no robot section in save, starting fresh");
            Ok(Simulation::from_grid(grid)?)
        }
    }

    pub fn load_from_path<P: AsRef<Path>>(path: P) -> Result<Self, SimError> {
        let file = File::open(path)?;
        Self::load(&mut BufReader::new(file))
    }

    /// Write the combined save file.
    pub fn save<W: Write>(&self, writer: &mut W) -> std::io::Result<()> {
        self.grid.to_text(writer)?;
        writeln!(writer)?;
        self.robot.to_snapshot(writer)
    }

    pub fn save_to_path<P: AsRef<Path>>(&self, path: P) -> std::io::Result<()> {
        let file = File::create(path)?;
        let mut writer = BufWriter::new(file);
        self.save(&mut writer)?;
        writer.flush()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{GridError, SnapshotError};
    use crate::robot::Mode;
    use std::io::Cursor;

    #[test]
    fn test_save_load_round_trip() {
        let grid = Grid::parse("302\n010\n0B4\n", false).unwrap();
        let mut sim = Simulation::from_grid(grid).unwrap();
        // Let the robot roam a little so its state is non-trivial.
        for _ in 0..5 {
            sim.step().unwrap();
        }

        let mut buffer = Vec::new();
        sim.save(&mut buffer).unwrap();
        let restored = Simulation::load(&mut Cursor::new(&buffer)).unwrap();
        assert_eq!(restored.grid(), sim.grid());
        assert_eq!(restored.robot(), sim.robot());
    }

    #[test]
    fn test_load_map_only_starts_fresh_robot() {
        let text = "012\n345\n6B8\n";
        let sim = Simulation::load(&mut Cursor::new(text)).unwrap();
        assert_eq!(sim.grid().charger_index(), 7);
        assert_eq!(sim.robot().position(), 7);
        assert_eq!(sim.robot().mode(), Mode::Explore);
        // Memory starts all-unknown except the charger.
        assert_eq!(
            sim.robot().memory().tile_at(0),
            Some(&crate::tile::Tile::Unvisited)
        );
    }

    #[test]
    fn test_load_rejects_unvisited_in_ground_truth() {
        let err = Simulation::load(&mut Cursor::new("?B\n")).unwrap_err();
        assert!(matches!(
            err,
            SimError::Snapshot(SnapshotError::Grid(GridError::UnvisitedNotAllowed {
                row: 0
            }))
        ));
    }

    #[test]
    fn test_load_rejects_mismatched_robot_section() {
        // Map is 3x1, the robot section carries a 2x1 memory.
        let text = "00B\n\n0B\n\n0 1 1 0\n2 0 0\n0\n";
        assert!(matches!(
            Simulation::load(&mut Cursor::new(text)),
            Err(SimError::Inconsistent { .. })
        ));
    }

    #[test]
    fn test_save_load_via_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("run.sav");
        let mut sim = Simulation::new(3, 3, 4).unwrap();
        sim.add_rubbish(0, 6).unwrap();
        sim.save_to_path(&path).unwrap();
        let restored = Simulation::load_from_path(&path).unwrap();
        assert_eq!(restored.grid(), sim.grid());
        assert_eq!(restored.robot(), sim.robot());
    }
}
