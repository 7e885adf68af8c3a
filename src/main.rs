use std::io::{self, BufRead};
use std::path::PathBuf;

use anyhow::{ensure, Context, Result};
use clap::Parser;
use console::{style, Term};
use log::debug;
use tile_astar::solve::{self, Outcome, SearchConfig};
use tile_astar::{parse_grid, Grid, Puzzle, SIZE};

/// Turn-taking A* over the 3x3 sliding-tile puzzle, tracing every expansion.
#[derive(Parser)]
#[command(name = "tile-astar", version)]
struct Cli {
    /// File with the initial grid followed by the goal grid. Prompts on stdin if omitted.
    input: Option<PathBuf>,

    /// Stop after this many distinct states have been expanded.
    #[arg(long, default_value_t = solve::DEFAULT_MAX_EXPANSIONS)]
    max_expansions: usize,
}

fn read_grid(
    term: &Term,
    prompt: &str,
    lines: &mut impl Iterator<Item = io::Result<String>>,
) -> Result<Grid> {
    term.write_line(&style(prompt).for_stderr().bold().to_string())?;
    let mut rows = Vec::with_capacity(SIZE as usize);
    while rows.len() < SIZE as usize {
        let line = lines.next().context("Unexpected end of input")??;
        if !line.trim().is_empty() {
            rows.push(line);
        }
    }
    parse_grid(&mut rows.iter().map(String::as_str))
}

fn read_puzzle(cli: &Cli) -> Result<Puzzle> {
    if let Some(path) = &cli.input {
        let data = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        return data.parse::<Puzzle>().context("Failed to parse the puzzle");
    }

    let term = Term::stderr();
    let mut lines = io::stdin().lock().lines();
    let initial = read_grid(
        &term,
        "Enter the initial state (3x3 grid, rows separated by spaces):",
        &mut lines,
    )
    .context("Invalid initial state")?;
    let goal = read_grid(
        &term,
        "Enter the goal state (3x3 grid, rows separated by spaces):",
        &mut lines,
    )
    .context("Invalid goal state")?;
    Ok(Puzzle { initial, goal })
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    ensure!(cli.max_expansions > 0, "--max-expansions must be at least 1");

    let puzzle = read_puzzle(&cli)?;
    let config = SearchConfig {
        max_expansions: cli.max_expansions,
    };
    let report = solve::astar(&puzzle, &config, &mut io::stdout().lock())?;

    if let Outcome::Solved(id) = report.outcome {
        let mut lineage = report.lineage(id).collect::<Vec<_>>();
        lineage.reverse();
        for (i, node) in lineage.iter().enumerate() {
            debug!("Solution step {i}:\n{}", node.grid);
        }
        println!("{}", style(&report).green());
    } else {
        println!("{}", style(&report).red());
    }
    Ok(())
}
