//! Breadth-first grid search.
//!
//! * **4-connected**; neighbours are always expanded in the order
//!   up, down, left, right, so equal-length routes resolve the same way on
//!   every call.
//! * Walls and cells for which the caller's obstacle snapshot answers
//!   `true` are impassable.  The goal is only refused when it is a wall.
//! * The returned path excludes the start and ends on the goal; an empty
//!   path means "already there" or "unreachable".

use std::collections::VecDeque;

use crate::world::{Cell, Grid, GridError};

/// Expansion order: up, down, left, right.
pub const NEIGHBOURS: [(i32, i32); 4] = [(0, -1), (0, 1), (-1, 0), (1, 0)];

/// Shortest hop-count route from `start` to `goal`.
///
/// `is_occupied` is consulted once per candidate cell and must describe a
/// snapshot that does not change during the search.
pub fn find_path<F>(
    grid: &Grid,
    start: Cell,
    goal: Cell,
    is_occupied: F,
) -> Result<Vec<Cell>, GridError>
where
    F: Fn(Cell) -> bool,
{
    grid.check(start)?;
    grid.check(goal)?;
    if start == goal || grid.blocked(goal) {
        return Ok(Vec::new());
    }

    let w = grid.width();
    let idx = |c: Cell| c.y as usize * w + c.x as usize;

    let mut visited = vec![false; w * grid.height()];
    let mut parent: Vec<Option<Cell>> = vec![None; w * grid.height()];
    let mut frontier = VecDeque::from([start]);
    visited[idx(start)] = true;

    while let Some(cur) = frontier.pop_front() {
        if cur == goal {
            break;
        }
        for (dx, dy) in NEIGHBOURS {
            let next = cur.offset(dx, dy);
            if !grid.in_bounds(next) || visited[idx(next)] {
                continue;
            }
            if grid.blocked(next) || (next != goal && is_occupied(next)) {
                continue;
            }
            visited[idx(next)] = true;
            parent[idx(next)] = Some(cur);
            frontier.push_back(next);
        }
    }

    if !visited[idx(goal)] {
        return Ok(Vec::new());
    }

    // goal → start along parent pointers, then flip
    let mut path = Vec::new();
    let mut cur = goal;
    while cur != start {
        path.push(cur);
        match parent[idx(cur)] {
            Some(p) => cur = p,
            None => break,
        }
    }
    path.reverse();
    Ok(path)
}

/*====================================================================*/
/*                                Tests                                */
/*====================================================================*/
