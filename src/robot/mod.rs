//! Robot decision engine.
//!
//! The robot never touches ground truth directly. It owns a private memory
//! grid, seeded all-unknown except the charger, and the simulation shell
//! feeds sensed tiles into it one at a time through [`Robot::explore_tile`].
//! Every tick [`Robot::decide_action`] arbitrates between cleaning the tile
//! underfoot, following a pending route, and the mode-specific search
//! cascade, and reports the chosen action back to the shell.

mod search;
mod snapshot;

use std::collections::VecDeque;

use log::{debug, info, warn};

use crate::error::{GridError, RobotError};
use crate::grid::{Direction, Grid};
use crate::tile::Tile;

/// High-level task the robot is carrying out. The integer codes are the
/// snapshot wire values.
///
/// The same vocabulary describes the per-tick action: [`Robot::decide_action`]
/// reports the mode that drove the tick, paired with the direction walked.
/// A movement tick carries the driving mode (`Explore`, `Move`, or `Clean`)
/// and a cardinal direction; a cleaning-in-place tick is exactly
/// `(Clean, Direction::None)`, which is what the shell keys the ground-truth
/// dirt removal on.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Mode {
    /// Following an externally ordered route.
    Move = 0,
    /// Hunting down known dirt, then flagged tiles, then heading home.
    Clean = 1,
    /// Pushing the frontier of unknown territory.
    Explore = 2,
    /// Parked at the charger with nothing left to do.
    Done = 3,
}

impl Mode {
    pub fn as_code(self) -> u8 {
        self as u8
    }

    pub fn from_code(code: u8) -> Option<Self> {
        match code {
            0 => Some(Mode::Move),
            1 => Some(Mode::Clean),
            2 => Some(Mode::Explore),
            3 => Some(Mode::Done),
            _ => None,
        }
    }
}

/// Autonomous cleaning robot: belief state plus the per-tick decision logic.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Robot {
    position: usize,
    home_index: usize,
    memory: Grid,
    mode: Mode,
    pending_path: VecDeque<usize>,
    revisit_flags: Vec<bool>,
    cleaning_rate: u8,
}

impl Robot {
    /// Fresh robot docked at the charger of an all-unknown memory grid.
    pub fn new(width: usize, height: usize, charger_index: usize) -> Result<Self, GridError> {
        let memory = Grid::unexplored(width, height, charger_index)?;
        let size = memory.size();
        Ok(Self {
            position: charger_index,
            home_index: charger_index,
            memory,
            mode: Mode::Explore,
            pending_path: VecDeque::new(),
            revisit_flags: vec![false; size],
            cleaning_rate: 0,
        })
    }

    pub fn position(&self) -> usize {
        self.position
    }

    pub fn home_index(&self) -> usize {
        self.home_index
    }

    /// The robot's belief state. Read-only: ground truth enters exclusively
    /// through [`Robot::explore_tile`].
    pub fn memory(&self) -> &Grid {
        &self.memory
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Dirtiness of the tile the robot most recently decided to clean;
    /// zero whenever the last action was not a clean.
    pub fn cleaning_rate(&self) -> u8 {
        self.cleaning_rate
    }

    /// The route still to be walked, front = next hop.
    pub fn pending_path(&self) -> &VecDeque<usize> {
        &self.pending_path
    }

    /// Record a sensed tile in memory. Idempotent: sensing the same tile
    /// twice leaves memory unchanged.
    pub fn explore_tile(&mut self, index: usize, tile: Tile) -> Result<(), GridError> {
        self.memory.set_tile(index, tile)
    }

    /// Pick the action for this tick: `(action kind, direction travelled)`.
    /// The action kind reuses [`Mode`]: it names the task that produced the
    /// tick, and cleaning in place is distinguished by `Direction::None`
    /// (see the [`Mode`] docs).
    ///
    /// Cleaning the tile underfoot preempts everything. Otherwise the
    /// current mode runs its strategy; `Explore` and `Move` fall through to
    /// the `Clean` cascade when they have nothing left, so a single tick
    /// crosses at most two mode transitions and never recurses.
    ///
    /// Errors are fatal to the run: standing on a non-enterable memory tile
    /// means belief state was corrupted upstream, and `ChargerUnreachable`
    /// means the robot is sealed in with nothing left to try.
    pub fn decide_action(&mut self) -> Result<(Mode, Direction), RobotError> {
        if !self.memory.can_enter(self.position) {
            self.pending_path.clear();
            return Err(RobotError::InvalidTile {
                index: self.position,
            });
        }

        // Standing on a flagged tile satisfies the flag, whether or not the
        // robot came here for it.
        self.revisit_flags[self.position] = false;

        if let Some(&Tile::Floor { dirtiness }) = self.memory.tile_at(self.position) {
            if dirtiness > 0 {
                self.cleaning_rate = dirtiness;
                debug!(
                    "[Robot] cleaning tile {} at rate {}",
                    self.position, dirtiness
                );
                return Ok((Mode::Clean, Direction::None));
            }
        }
        self.cleaning_rate = 0;

        if self.mode == Mode::Done {
            return Ok((Mode::Done, Direction::None));
        }

        if self.mode == Mode::Explore {
            if !self.pending_path.is_empty() {
                let direction = self.move_one_step()?;
                return Ok((Mode::Explore, direction));
            }
            match search::nearest_unvisited(&self.memory, self.position) {
                Some(path) => {
                    self.pending_path = path;
                    let direction = self.move_one_step()?;
                    return Ok((Mode::Explore, direction));
                }
                None => {
                    debug!("[Robot] no reachable frontier left, switching to clean");
                    self.mode = Mode::Clean;
                }
            }
        }

        if self.mode == Mode::Move {
            if !self.pending_path.is_empty() {
                let direction = self.move_one_step()?;
                return Ok((Mode::Move, direction));
            }
            self.mode = Mode::Clean;
        }

        self.decide_clean()
    }

    /// The `Clean`-mode strategy cascade: adjacent dirt, pending route,
    /// nearest known dirt, nearest flagged tile, home, and finally a fresh
    /// exploration attempt before giving up.
    fn decide_clean(&mut self) -> Result<(Mode, Direction), RobotError> {
        // Dirt right next door interrupts whatever route was pending.
        for direction in Direction::CARDINAL {
            let Some(neighbor) = self.memory.neighbor_index(self.position, direction) else {
                continue;
            };
            let dirty = self
                .memory
                .tile_at(neighbor)
                .is_some_and(|tile| tile.is_dirty());
            if !dirty {
                continue;
            }
            if let Some(path) = search::path_to(&self.memory, self.position, neighbor) {
                self.pending_path = path;
                let direction = self.move_one_step()?;
                return Ok((Mode::Clean, direction));
            }
        }

        if !self.pending_path.is_empty() {
            let direction = self.move_one_step()?;
            return Ok((Mode::Clean, direction));
        }

        if let Some(path) =
            search::nearest_matching(&self.memory, self.position, |_, tile| tile.is_dirty())
        {
            debug!("[Robot] heading for dirt at {:?}", path.back());
            self.pending_path = path;
            let direction = self.move_one_step()?;
            return Ok((Mode::Clean, direction));
        }

        if let Some(path) =
            search::nearest_matching(&self.memory, self.position, |index, _| {
                self.revisit_flags[index]
            })
        {
            debug!("[Robot] heading for flagged tile at {:?}", path.back());
            self.pending_path = path;
            let direction = self.move_one_step()?;
            return Ok((Mode::Clean, direction));
        }

        match search::path_to(&self.memory, self.position, self.home_index) {
            Some(path) if path.is_empty() => {
                // Docked with nothing known to clean. One last look for
                // unknown territory before parking.
                if self.start_exploring() {
                    let direction = self.move_one_step()?;
                    Ok((Mode::Explore, direction))
                } else {
                    info!("[Robot] all done, parking at charger");
                    self.mode = Mode::Done;
                    Ok((Mode::Done, Direction::None))
                }
            }
            Some(path) => {
                debug!("[Robot] returning home, {} hops", path.len());
                self.pending_path = path;
                let direction = self.move_one_step()?;
                Ok((Mode::Clean, direction))
            }
            None => {
                if self.start_exploring() {
                    let direction = self.move_one_step()?;
                    Ok((Mode::Explore, direction))
                } else {
                    self.pending_path.clear();
                    Err(RobotError::ChargerUnreachable)
                }
            }
        }
    }

    /// Switch to `Explore` with a route to the nearest frontier, if any.
    fn start_exploring(&mut self) -> bool {
        match search::nearest_unvisited(&self.memory, self.position) {
            Some(path) => {
                self.mode = Mode::Explore;
                self.pending_path = path;
                true
            }
            None => false,
        }
    }

    /// Walk the next hop of the pending route.
    ///
    /// An empty route is a no-op (`Direction::None`). When the next hop is
    /// no longer an enterable neighbor (memory changed under the route),
    /// the route to the original destination is recomputed once; a second
    /// failure clears all route state and is fatal.
    fn move_one_step(&mut self) -> Result<Direction, RobotError> {
        let Some(next) = self.pending_path.pop_front() else {
            return Ok(Direction::None);
        };
        let destination = self.pending_path.back().copied().unwrap_or(next);

        if let Some(direction) = self.step_to(next) {
            return Ok(direction);
        }

        warn!(
            "[Robot] route broken at {}, recomputing toward {}",
            next, destination
        );
        let Some(path) = search::path_to(&self.memory, self.position, destination) else {
            self.pending_path.clear();
            return Err(RobotError::UnreachableTile { index: destination });
        };
        self.pending_path = path;
        let Some(next) = self.pending_path.pop_front() else {
            // Recomputed route is empty: we were already at the destination.
            return Ok(Direction::None);
        };
        match self.step_to(next) {
            Some(direction) => Ok(direction),
            None => {
                self.pending_path.clear();
                Err(RobotError::UnreachableTile { index: next })
            }
        }
    }

    /// Step onto `next` if it is an enterable cardinal neighbor, returning
    /// the direction walked.
    fn step_to(&mut self, next: usize) -> Option<Direction> {
        for direction in Direction::CARDINAL {
            if self.memory.neighbor_index(self.position, direction) == Some(next) {
                if self.memory.can_enter(next) {
                    self.position = next;
                    return Some(direction);
                }
                return None;
            }
        }
        None
    }

    /// Route back to the charger. Returns false if memory holds no path home.
    pub fn order_go_home(&mut self) -> bool {
        self.order_move_to(self.home_index)
    }

    /// Route to an arbitrary known tile. Returns false when the target is
    /// not enterable or not reachable in memory.
    pub fn order_move_to(&mut self, index: usize) -> bool {
        match search::path_to(&self.memory, self.position, index) {
            Some(path) => {
                info!("[Robot] ordered to {}, {} hops", index, path.len());
                self.pending_path = path;
                self.mode = Mode::Move;
                true
            }
            None => {
                warn!("[Robot] ordered to {}, no route in memory", index);
                false
            }
        }
    }

    /// Flag every known enterable tile within `radius` hops of `center` for
    /// a revisit sweep, and route to the center first. Returns false when
    /// the center is unreachable.
    pub fn order_clean(&mut self, center: usize, radius: usize) -> bool {
        let Some(path) = search::path_to(&self.memory, self.position, center) else {
            warn!("[Robot] clean order at {}, no route in memory", center);
            return false;
        };
        let targets = search::reachable_within(&self.memory, center, radius);
        info!(
            "[Robot] sweep ordered around {}: {} tiles flagged",
            center,
            targets.len()
        );
        for index in targets {
            self.revisit_flags[index] = true;
        }
        self.pending_path = path;
        self.mode = Mode::Move;
        true
    }

    /// Flag everything reachable in memory for a sweep from the current
    /// position outward.
    pub fn order_clean_efficiently(&mut self) -> bool {
        self.order_clean(self.position, self.memory.size())
    }

    /// Forget everything ever sensed: memory back to all-unknown except the
    /// charger, route and flags dropped. Position and mode survive; the
    /// shell's per-tick sensing restores the tile underfoot before the next
    /// decision.
    pub fn reset_memory(&mut self) -> Result<(), GridError> {
        info!("[Robot] memory wiped");
        self.memory = Grid::unexplored(self.memory.width(), self.memory.height(), self.home_index)?;
        self.pending_path.clear();
        self.revisit_flags = vec![false; self.memory.size()];
        self.cleaning_rate = 0;
        Ok(())
    }

    /// Teleport the robot (shell-side repositioning). Refused while the
    /// robot is mid-exploration or the target is not enterable in memory.
    pub fn set_position(&mut self, index: usize) -> bool {
        if self.mode == Mode::Explore || !self.memory.can_enter(index) {
            return false;
        }
        self.pending_path.clear();
        self.position = index;
        true
    }
}
