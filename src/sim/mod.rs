//! Simulation shell.
//!
//! Owns the ground-truth grid and the robot, and drives the tick loop:
//! sense, decide, apply. The two grids are never aliased; ground truth
//! reaches robot memory only through the per-tick sensing pass, and the
//! robot's actions reach ground truth only through the cleaning step here.
//! All randomness lives in this layer; the engine underneath is fully
//! deterministic.

mod persist;

use log::{debug, info};
use rand::Rng;

use crate::error::{GridError, SimError};
use crate::grid::{Direction, Grid};
use crate::robot::{Mode, Robot};
use crate::tile::{Tile, MAX_DIRTINESS};

#[derive(Debug)]
pub struct Simulation {
    grid: Grid,
    robot: Robot,
}

impl Simulation {
    /// Empty simulation: an all-clean floor with a charger, robot docked.
    pub fn new(width: usize, height: usize, charger_index: usize) -> Result<Self, GridError> {
        let grid = Grid::new(width, height, charger_index)?;
        let robot = Robot::new(width, height, charger_index)?;
        Ok(Self { grid, robot })
    }

    /// Simulation over an existing ground-truth map, fresh robot at the
    /// map's charger.
    pub fn from_grid(grid: Grid) -> Result<Self, GridError> {
        let robot = Robot::new(grid.width(), grid.height(), grid.charger_index())?;
        Ok(Self { grid, robot })
    }

    /// Reassemble a simulation from persisted parts. The robot's memory
    /// must agree with the map on dimensions and charger placement.
    pub fn from_parts(grid: Grid, robot: Robot) -> Result<Self, SimError> {
        if robot.memory().width() != grid.width() || robot.memory().height() != grid.height() {
            return Err(SimError::Inconsistent {
                reason: format!(
                    "robot memory is {}x{}, map is {}x{}",
                    robot.memory().width(),
                    robot.memory().height(),
                    grid.width(),
                    grid.height()
                ),
            });
        }
        if robot.home_index() != grid.charger_index() {
            return Err(SimError::Inconsistent {
                reason: format!(
                    "robot charger is at {}, map charger at {}",
                    robot.home_index(),
                    grid.charger_index()
                ),
            });
        }
        Ok(Self { grid, robot })
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn robot(&self) -> &Robot {
        &self.robot
    }

    /// Advance one tick: sense the robot's surroundings into its memory,
    /// let it decide, apply the action to ground truth.
    pub fn step(&mut self) -> Result<(Mode, Direction), SimError> {
        self.sense()?;
        let (action, direction) = self.robot.decide_action()?;
        if action == Mode::Clean && direction == Direction::None {
            let rate = self.robot.cleaning_rate();
            let position = self.robot.position();
            if let Some(tile) = self.grid.tile_at_mut(position) {
                tile.clean(rate);
            }
            debug!("[Sim] cleaned tile {} by {}", position, rate);
        } else {
            debug!(
                "[Sim] robot action {:?}, moved {:?} to {}",
                action,
                direction,
                self.robot.position()
            );
        }
        Ok((action, direction))
    }

    /// Run up to `max_steps` ticks, stopping early once the robot reports
    /// `Done`. Returns the number of ticks executed.
    pub fn run(&mut self, max_steps: usize) -> Result<usize, SimError> {
        for tick in 0..max_steps {
            let (action, _) = self.step()?;
            if action == Mode::Done {
                info!("[Sim] robot done after {} ticks", tick);
                return Ok(tick);
            }
        }
        Ok(max_steps)
    }

    /// Feed the robot's current tile and its four neighbors from ground
    /// truth into its memory.
    fn sense(&mut self) -> Result<(), GridError> {
        let position = self.robot.position();
        if let Some(&tile) = self.grid.tile_at(position) {
            self.robot.explore_tile(position, tile)?;
        }
        for direction in Direction::CARDINAL {
            if let Some(neighbor) = self.grid.neighbor_index(position, direction) {
                if let Some(&tile) = self.grid.tile_at(neighbor) {
                    self.robot.explore_tile(neighbor, tile)?;
                }
            }
        }
        Ok(())
    }

    /// Drop `amount` dirt on a ground-truth floor tile.
    pub fn add_rubbish(&mut self, index: usize, amount: u8) -> Result<(), SimError> {
        match self.grid.tile_at_mut(index) {
            Some(tile @ Tile::Floor { .. }) => {
                tile.add_dirt(amount);
                Ok(())
            }
            _ => Err(SimError::NotAFloor { index }),
        }
    }

    /// Scatter `total` units of dirt over random floor tiles, one unit at a
    /// time. Tiles saturate at the dirtiness cap, so placement is bounded
    /// retry; returns the amount actually placed.
    pub fn scatter_rubbish<R: Rng>(&mut self, total: usize, rng: &mut R) -> usize {
        let floors: Vec<usize> = self
            .grid
            .iter()
            .filter(|(_, tile)| matches!(tile, Tile::Floor { .. }))
            .map(|(index, _)| index)
            .collect();
        if floors.is_empty() {
            return 0;
        }
        let mut placed = 0;
        let mut attempts = 0;
        let attempt_cap = total * 8 + 16;
        while placed < total && attempts < attempt_cap {
            attempts += 1;
            let index = floors[rng.gen_range(0..floors.len())];
            let Some(tile) = self.grid.tile_at_mut(index) else {
                continue;
            };
            if tile.dirtiness().is_some_and(|d| d < MAX_DIRTINESS) {
                tile.add_dirt(1);
                placed += 1;
            }
        }
        info!("[Sim] scattered {} dirt over {} floors", placed, floors.len());
        placed
    }

    /// Order relays, forwarded to the robot unchanged.
    pub fn order_move_to(&mut self, index: usize) -> bool {
        self.robot.order_move_to(index)
    }

    pub fn order_go_home(&mut self) -> bool {
        self.robot.order_go_home()
    }

    pub fn order_clean(&mut self, center: usize, radius: usize) -> bool {
        self.robot.order_clean(center, radius)
    }

    pub fn order_clean_efficiently(&mut self) -> bool {
        self.robot.order_clean_efficiently()
    }

    pub fn reset_robot_memory(&mut self) -> Result<(), GridError> {
        self.robot.reset_memory()
    }

    pub fn set_robot_position(&mut self, index: usize) -> bool {
        self.robot.set_position(index)
    }

    /// Ground-truth map with the robot overlaid as `'R'`, followed by a
    /// one-line status summary.
    pub fn render(&self) -> String {
        let position = self.robot.position();
        let mut out = String::with_capacity(self.grid.size() + self.grid.height() + 48);
        for (index, tile) in self.grid.iter() {
            out.push(if index == position { 'R' } else { tile.as_char() });
            if (index + 1) % self.grid.width() == 0 {
                out.push('\n');
            }
        }
        out.push_str(&format!(
            "robot at {} mode {:?} route {} hops\n",
            position,
            self.robot.mode(),
            self.robot.pending_path().len()
        ));
        out
    }

    /// Total dirt left on the ground-truth map.
    pub fn remaining_dirt(&self) -> usize {
        self.grid
            .iter()
            .filter_map(|(_, tile)| tile.dirtiness())
            .map(usize::from)
            .sum()
    }
}
