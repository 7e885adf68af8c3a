use std::str::FromStr;

use anyhow::{ensure, Context, Result};

use crate::{Grid, Puzzle, SIZE};

/// Reads the next grid from `lines`: 3 rows of 3 whitespace-separated cells
/// holding each of 0..=8 exactly once. Blank lines are skipped.
pub fn parse_grid<'a>(lines: &mut impl Iterator<Item = &'a str>) -> Result<Grid> {
    let mut rows = [[0u8; 3]; 3];
    let mut seen = [false; 9];
    for (i, row) in rows.iter_mut().enumerate() {
        let line = lines
            .find(|line| !line.trim().is_empty())
            .with_context(|| format!("Missing row {}", i + 1))?;
        let tokens = line.split_whitespace().collect::<Vec<_>>();
        ensure!(
            tokens.len() == SIZE as usize,
            "Row {}: expecting {SIZE} cells, got {}",
            i + 1,
            tokens.len(),
        );
        for (cell, token) in row.iter_mut().zip(tokens) {
            let value = token
                .parse::<u8>()
                .with_context(|| format!("Row {}: invalid cell {token:?}", i + 1))?;
            ensure!(value <= 8, "Row {}: cell {value} out of range 0..=8", i + 1);
            ensure!(!seen[value as usize], "Row {}: duplicate cell {value}", i + 1);
            seen[value as usize] = true;
            *cell = value;
        }
    }
    Ok(Grid::from_rows(rows))
}

impl FromStr for Grid {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut lines = s.lines();
        let grid = parse_grid(&mut lines)?;
        ensure!(
            lines.all(|line| line.trim().is_empty()),
            "Trailing input after grid"
        );
        Ok(grid)
    }
}

impl FromStr for Puzzle {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut lines = s.lines();
        let initial = parse_grid(&mut lines).context("Invalid initial state")?;
        let goal = parse_grid(&mut lines).context("Invalid goal state")?;
        ensure!(
            lines.all(|line| line.trim().is_empty()),
            "Trailing input after goal state"
        );
        Ok(Puzzle { initial, goal })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn err(s: &str) -> String {
        format!("{:#}", s.parse::<Grid>().unwrap_err())
    }

    #[test]
    fn parses_rows_with_loose_whitespace() {
        let grid = "1 2 3\n\n  4\t5 6\n7 8  0 \n".parse::<Grid>().unwrap();
        assert_eq!(grid, Grid::from_rows([[1, 2, 3], [4, 5, 6], [7, 8, 0]]));
    }

    #[test]
    fn rejects_malformed_grids() {
        assert_eq!(err("1 2 3\n4 5 6\n"), "Missing row 3");
        assert_eq!(err("1 2 3\n4 5\n6 7 8 0"), "Row 2: expecting 3 cells, got 2");
        assert!(err("1 2 3\n4 x 6\n7 8 0").starts_with("Row 2: invalid cell \"x\""));
        assert_eq!(err("1 2 3\n4 5 6\n7 8 9"), "Row 3: cell 9 out of range 0..=8");
        assert_eq!(err("1 2 3\n4 5 6\n7 1 0"), "Row 3: duplicate cell 1");
        assert_eq!(err("1 2 3\n4 5 6\n7 8 0\n1"), "Trailing input after grid");
    }

    #[test]
    fn parses_puzzle() {
        let puzzle = "1 2 0\n4 5 3\n7 8 6\n\n1 2 3\n4 5 6\n7 8 0\n"
            .parse::<Puzzle>()
            .unwrap();
        assert_eq!(puzzle.initial, Grid::from_rows([[1, 2, 0], [4, 5, 3], [7, 8, 6]]));
        assert_eq!(puzzle.goal, Grid::from_rows([[1, 2, 3], [4, 5, 6], [7, 8, 0]]));
    }

    #[test]
    fn puzzle_errors_name_the_grid() {
        let err = "1 2 0\n4 5 3\n7 8 6\n1 2 3\n".parse::<Puzzle>().unwrap_err();
        assert_eq!(format!("{err:#}"), "Invalid goal state: Missing row 2");
    }
}
