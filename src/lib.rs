//! Shuddhi - Discrete Cleaning-Robot Simulation
//!
//! A step-driven grid world in which an autonomous robot explores unknown
//! territory, builds a private memory map, and cleans every floor tile it
//! can reach before returning to its charger.
//!
//! ## Architecture
//!
//! - [`tile`] / [`grid`]: the world model. A [`grid::Grid`] is a fixed
//!   rectangle of [`tile::Tile`] cells addressed by linear index, with an
//!   exact text serialization.
//! - [`robot`]: the decision engine. The [`robot::Robot`] owns its own
//!   memory grid, runs BFS searches over it (shortest path, nearest
//!   frontier, nearest dirt), and arbitrates one action per tick through
//!   its explore/move/clean/done state machine. Deterministic and free of
//!   I/O.
//! - [`sim`]: the shell. [`sim::Simulation`] owns ground truth, feeds
//!   sensed tiles into robot memory each tick, applies cleaning, scatters
//!   dirt, and persists combined save files.
//!
//! ## Example
//!
//! ```
//! use shuddhi_sim::grid::Grid;
//! use shuddhi_sim::sim::Simulation;
//!
//! let grid = Grid::parse("302\n010\n0B4\n", false).unwrap();
//! let mut sim = Simulation::from_grid(grid).unwrap();
//! sim.run(200).unwrap();
//! assert_eq!(sim.remaining_dirt(), 0);
//! ```

pub mod config;
pub mod error;
pub mod grid;
pub mod robot;
pub mod sim;
pub mod tile;

pub use config::RunConfig;
pub use error::{GridError, RobotError, SimError, SnapshotError};
pub use grid::{Direction, Grid};
pub use robot::{Mode, Robot};
pub use sim::Simulation;
pub use tile::{Tile, MAX_DIRTINESS};
