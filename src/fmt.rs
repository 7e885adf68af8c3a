use std::fmt;

use crate::solve::{Node, Outcome, SearchReport};
use crate::{Direction, Grid};

/// Width the left column is padded to.
const COLUMN_WIDTH: usize = 15;
const RULE_WIDTH: usize = 30;

/// A grid rendered next to the goal, one row per line under a titled header.
pub struct SideBySide<'a> {
    title: &'a str,
    state: &'a Grid,
    goal: &'a Grid,
}

impl<'a> SideBySide<'a> {
    pub fn new(title: &'a str, state: &'a Grid, goal: &'a Grid) -> Self {
        Self { title, state, goal }
    }
}

impl fmt::Display for SideBySide<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{:<COLUMN_WIDTH$} | Goal State", self.title)?;
        writeln!(f, "{}", "-".repeat(RULE_WIDTH))?;
        for (row, goal_row) in self.state.rows().zip(self.goal.rows()) {
            writeln!(f, "{:<COLUMN_WIDTH$} | {}", join_row(row), join_row(goal_row))?;
        }
        Ok(())
    }
}

fn join_row(row: &[u8]) -> String {
    row.iter()
        .map(|cell| cell.to_string())
        .collect::<Vec<_>>()
        .join(" ")
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.rows() {
            writeln!(f, "{}", join_row(row))?;
        }
        Ok(())
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.name())
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Current Cost: {}, Heuristic: {}, Total Cost: {}",
            self.cost,
            self.heuristic,
            self.total_cost(),
        )
    }
}

impl fmt::Display for SearchReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.outcome {
            Outcome::Solved(id) => {
                f.write_str("Solution found!")?;
                let path = &self.node(id).path;
                if !path.is_empty() {
                    write!(f, "\nMove log: {path}")?;
                }
                Ok(())
            }
            Outcome::LimitReached | Outcome::Exhausted => write!(
                f,
                "No solution found or stopped after {} expanded nodes.",
                self.max_expansions,
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn side_by_side_layout() {
        let state = Grid::from_rows([[1, 2, 0], [4, 5, 3], [7, 8, 6]]);
        let goal = Grid::from_rows([[1, 2, 3], [4, 5, 6], [7, 8, 0]]);
        let got = SideBySide::new("Initial State", &state, &goal).to_string();
        let expected = "\
Initial State   | Goal State
------------------------------
1 2 0           | 1 2 3
4 5 3           | 4 5 6
7 8 6           | 7 8 0
";
        assert_eq!(got, expected);
    }

    #[test]
    fn grid_display() {
        let grid = Grid::from_rows([[8, 1, 3], [0, 6, 2], [7, 5, 4]]);
        assert_eq!(grid.to_string(), "8 1 3\n0 6 2\n7 5 4\n");
    }
}
