//! Robot snapshot persistence.
//!
//! A snapshot is the memory map block (`'?'` allowed, terminated by a blank
//! line) followed by whitespace-delimited scalar fields:
//!
//! ```text
//! position chargerIndex modeCode cleaningRate
//! flagCount flag0 flag1 ...
//! pathLength path0 path1 ...
//! ```
//!
//! Every index field is validated against the memory grid before the robot
//! is handed back; a snapshot that passes deserialization is safe to resume.

use std::collections::VecDeque;
use std::io::{BufRead, Write};

use crate::error::SnapshotError;
use crate::grid::Grid;

use super::{Mode, Robot};

fn next_field<'a, I>(fields: &mut I, field: &'static str) -> Result<usize, SnapshotError>
where
    I: Iterator<Item = &'a str>,
{
    let raw = fields.next().ok_or(SnapshotError::Truncated { field })?;
    raw.parse().map_err(|_| SnapshotError::BadNumber {
        field,
        value: raw.to_string(),
    })
}

impl Robot {
    /// Restore a robot from its snapshot text.
    pub fn from_snapshot<R: BufRead>(reader: &mut R) -> Result<Self, SnapshotError> {
        let memory = Grid::from_text(reader, true)?;
        let size = memory.size();

        let mut rest = String::new();
        reader.read_to_string(&mut rest)?;
        let mut fields = rest.split_whitespace();

        let position = next_field(&mut fields, "position")?;
        if position >= size {
            return Err(SnapshotError::PositionOutOfRange { position, size });
        }
        let home_index = next_field(&mut fields, "charger index")?;
        if home_index >= size {
            return Err(SnapshotError::ChargerOutOfRange {
                charger: home_index,
                size,
            });
        }
        let mode_code = next_field(&mut fields, "mode")?;
        let mode = u8::try_from(mode_code)
            .ok()
            .and_then(Mode::from_code)
            .ok_or(SnapshotError::BadMode {
                value: mode_code as u32,
            })?;
        let cleaning_rate = next_field(&mut fields, "cleaning rate")?.min(9) as u8;

        let flag_count = next_field(&mut fields, "flag count")?;
        if flag_count != size {
            return Err(SnapshotError::FlagCountMismatch {
                found: flag_count,
                expected: size,
            });
        }
        let mut revisit_flags = Vec::with_capacity(size);
        for _ in 0..size {
            revisit_flags.push(next_field(&mut fields, "revisit flag")? != 0);
        }

        let path_len = next_field(&mut fields, "path length")?;
        let mut pending_path = VecDeque::with_capacity(path_len);
        for _ in 0..path_len {
            let index = next_field(&mut fields, "path index")?;
            if index >= size {
                return Err(SnapshotError::PathIndexOutOfRange { index, size });
            }
            pending_path.push_back(index);
        }

        Ok(Self {
            position,
            home_index,
            memory,
            mode,
            pending_path,
            revisit_flags,
            cleaning_rate,
        })
    }

    /// Write the snapshot text for this robot.
    pub fn to_snapshot<W: Write>(&self, writer: &mut W) -> std::io::Result<()> {
        self.memory.to_text(writer)?;
        writeln!(writer)?;
        writeln!(
            writer,
            "{} {} {} {}",
            self.position,
            self.home_index,
            self.mode.as_code(),
            self.cleaning_rate
        )?;

        write!(writer, "{}", self.revisit_flags.len())?;
        for &flag in &self.revisit_flags {
            write!(writer, " {}", u8::from(flag))?;
        }
        writeln!(writer)?;

        write!(writer, "{}", self.pending_path.len())?;
        for &index in &self.pending_path {
            write!(writer, " {}", index)?;
        }
        writeln!(writer)
    }
}
