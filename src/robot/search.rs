//! Breadth-first search primitives over the robot's memory grid.
//!
//! All searches walk only enterable cells, expand neighbors in the fixed
//! `Direction::CARDINAL` order (up, down, left, right) and break ties by
//! dequeue order, so results are fully deterministic for a given memory
//! state. A miss is an ordinary `None`, never an error: the decision
//! cascade treats it as "try the next strategy".

use std::collections::VecDeque;

use crate::grid::{Direction, Grid};
use crate::tile::Tile;

/// Parent-pointer scaffolding shared by every search below.
struct Bfs {
    visited: Vec<bool>,
    parent: Vec<usize>,
    queue: VecDeque<usize>,
}

impl Bfs {
    fn new(memory: &Grid, start: usize) -> Self {
        let size = memory.size();
        let mut bfs = Self {
            visited: vec![false; size],
            parent: vec![usize::MAX; size],
            queue: VecDeque::new(),
        };
        bfs.visited[start] = true;
        bfs.queue.push_back(start);
        bfs
    }

    /// Enqueue each enterable, not-yet-visited cardinal neighbor of `current`.
    fn expand(&mut self, memory: &Grid, current: usize) {
        for direction in Direction::CARDINAL {
            if let Some(neighbor) = memory.neighbor_index(current, direction) {
                if memory.can_enter(neighbor) && !self.visited[neighbor] {
                    self.visited[neighbor] = true;
                    self.parent[neighbor] = current;
                    self.queue.push_back(neighbor);
                }
            }
        }
    }

    /// Rebuild the route from `start` to `end` out of the parent pointers.
    /// The returned path excludes `start` and includes `end`; it is empty
    /// when the two coincide.
    fn reconstruct(&self, start: usize, end: usize) -> VecDeque<usize> {
        let mut route = Vec::new();
        let mut cursor = end;
        while cursor != start {
            route.push(cursor);
            cursor = self.parent[cursor];
        }
        route.reverse();
        route.into()
    }
}

/// Shortest path from `start` to `target` over enterable cells.
///
/// Returns `Some(empty)` when already there, `None` when the target is
/// unreachable (or not enterable).
pub(crate) fn path_to(memory: &Grid, start: usize, target: usize) -> Option<VecDeque<usize>> {
    if start >= memory.size() || target >= memory.size() {
        return None;
    }
    let mut bfs = Bfs::new(memory, start);
    while let Some(current) = bfs.queue.pop_front() {
        if current == target {
            return Some(bfs.reconstruct(start, target));
        }
        bfs.expand(memory, current);
    }
    None
}

/// Route to the nearest frontier: the closest enterable cell with an
/// `Unvisited` cardinal neighbor.
///
/// Unvisited territory is a search *destination*, never a transit cell, so
/// the route stops on the known cell next to it; the unknown tile itself is
/// left for the sensing pass to reveal. Returns `Some(empty)` when the
/// robot already stands on a frontier cell.
pub(crate) fn nearest_unvisited(memory: &Grid, start: usize) -> Option<VecDeque<usize>> {
    if start >= memory.size() {
        return None;
    }
    let mut bfs = Bfs::new(memory, start);
    while let Some(current) = bfs.queue.pop_front() {
        let is_frontier = Direction::CARDINAL.iter().any(|&direction| {
            matches!(
                memory.tile_toward(current, direction),
                Some(Tile::Unvisited)
            )
        });
        if is_frontier {
            return Some(bfs.reconstruct(start, current));
        }
        bfs.expand(memory, current);
    }
    None
}

/// Route to the nearest enterable cell matching `predicate`.
///
/// The predicate is tested in dequeue order, start cell included, so the
/// first match is the closest one (ties broken by the cardinal expansion
/// order).
pub(crate) fn nearest_matching<F>(
    memory: &Grid,
    start: usize,
    predicate: F,
) -> Option<VecDeque<usize>>
where
    F: Fn(usize, &Tile) -> bool,
{
    if start >= memory.size() {
        return None;
    }
    let mut bfs = Bfs::new(memory, start);
    while let Some(current) = bfs.queue.pop_front() {
        let tile = memory.tile_at(current)?;
        if predicate(current, tile) {
            return Some(bfs.reconstruct(start, current));
        }
        bfs.expand(memory, current);
    }
    None
}

/// Every enterable cell reachable from `center` in at most `radius` hops,
/// `center` included, in BFS dequeue order.
pub(crate) fn reachable_within(memory: &Grid, center: usize, radius: usize) -> Vec<usize> {
    if center >= memory.size() || !memory.can_enter(center) {
        return Vec::new();
    }
    let mut depth = vec![usize::MAX; memory.size()];
    depth[center] = 0;
    let mut queue = VecDeque::from([center]);
    let mut reached = Vec::new();
    while let Some(current) = queue.pop_front() {
        reached.push(current);
        if depth[current] == radius {
            continue;
        }
        for direction in Direction::CARDINAL {
            if let Some(neighbor) = memory.neighbor_index(current, direction) {
                if memory.can_enter(neighbor) && depth[neighbor] == usize::MAX {
                    depth[neighbor] = depth[current] + 1;
                    queue.push_back(neighbor);
                }
            }
        }
    }
    reached
}

#[cfg(test)]
mod tests {
    use super::*;

    fn open_grid() -> Grid {
        // 5x5, charger in the middle, everything else clean floor.
        Grid::new(5, 5, 12).unwrap()
    }

    fn manhattan(grid: &Grid, a: usize, b: usize) -> usize {
        let (ar, ac) = grid.index_to_row_col(a);
        let (br, bc) = grid.index_to_row_col(b);
        ar.abs_diff(br) + ac.abs_diff(bc)
    }

    #[test]
    fn test_path_length_is_manhattan_distance() {
        let grid = open_grid();
        for start in [0, 7, 12, 24] {
            for target in 0..grid.size() {
                let path = path_to(&grid, start, target).unwrap();
                assert_eq!(
                    path.len(),
                    manhattan(&grid, start, target),
                    "start={start} target={target}"
                );
            }
        }
    }

    #[test]
    fn test_path_to_self_is_empty() {
        let grid = open_grid();
        assert_eq!(path_to(&grid, 12, 12), Some(VecDeque::new()));
    }

    #[test]
    fn test_path_routes_around_obstacles() {
        // 0 P 0
        // 0 P 0
        // 0 B 0
        let grid = Grid::parse("0P0\n0P0\n0B0\n", false).unwrap();
        let path = path_to(&grid, 0, 2).unwrap();
        // Down the left edge, across the bottom, up the right edge.
        assert_eq!(path, VecDeque::from(vec![3, 6, 7, 8, 5, 2]));
    }

    #[test]
    fn test_path_to_unreachable_target() {
        // Target walled off in the corner.
        let grid = Grid::parse("0P0\nPP0\n00B\n", false).unwrap();
        assert_eq!(path_to(&grid, 8, 0), None);
        // Obstacles themselves are never valid targets.
        assert_eq!(path_to(&grid, 8, 1), None);
    }

    #[test]
    fn test_nearest_unvisited_stops_adjacent() {
        // ? 0 0
        // 0 0 B
        let grid = Grid::parse("?00\n00B\n", true).unwrap();
        let path = nearest_unvisited(&grid, 5).unwrap();
        // Frontier cells are 1 and 3 (both touch the unvisited corner).
        // BFS from 5 dequeues 2, 4, then 1, so cell 1 wins.
        assert_eq!(path, VecDeque::from(vec![2, 1]));
        // Route must never include the unvisited cell itself.
        assert!(!path.contains(&0));
    }

    #[test]
    fn test_nearest_unvisited_on_frontier_is_empty() {
        let grid = Grid::parse("?B\n00\n", true).unwrap();
        assert_eq!(nearest_unvisited(&grid, 1), Some(VecDeque::new()));
    }

    #[test]
    fn test_nearest_unvisited_none_when_fully_explored() {
        let grid = Grid::parse("000\n0B0\n000\n", false).unwrap();
        assert_eq!(nearest_unvisited(&grid, 4), None);
    }

    #[test]
    fn test_nearest_matching_finds_closest_dirty() {
        // 5 0 0
        // 0 B 0
        // 0 0 3
        let grid = Grid::parse("500\n0B0\n003\n", false).unwrap();
        let path = nearest_matching(&grid, 4, |_, tile| tile.is_dirty()).unwrap();
        // Both dirty tiles are 2 hops away; BFS from 4 expands up (1),
        // down (7), left (3), right (5), then dequeues 1 whose neighbors
        // include 0 -> tile 0 is found first.
        assert_eq!(*path.back().unwrap(), 0);
        assert_eq!(path.len(), 2);
    }

    #[test]
    fn test_nearest_matching_miss() {
        let grid = Grid::parse("000\n0B0\n000\n", false).unwrap();
        assert_eq!(
            nearest_matching(&grid, 4, |_, tile| tile.is_dirty()),
            None
        );
    }

    #[test]
    fn test_reachable_within_respects_radius() {
        let grid = open_grid();
        let near = reachable_within(&grid, 12, 1);
        // Center plus its four neighbors, in expansion order.
        assert_eq!(near, vec![12, 7, 17, 11, 13]);
        let everything = reachable_within(&grid, 12, 8);
        assert_eq!(everything.len(), 25);
    }

    #[test]
    fn test_reachable_within_skips_walled_off_cells() {
        let grid = Grid::parse("0P0\n0P0\n0PB\n", false).unwrap();
        let reached = reachable_within(&grid, 8, 10);
        // The left column is sealed off by the obstacle wall.
        assert_eq!(reached, vec![8, 5, 2]);
    }

    #[test]
    fn test_search_blocked_by_obstacle_ring() {
        // Robot boxed in at the center.
        let grid = Grid::parse("0P0\nPBP\n0P?\n", true).unwrap();
        assert_eq!(nearest_unvisited(&grid, 4), None);
        assert_eq!(path_to(&grid, 4, 0), None);
    }
}
