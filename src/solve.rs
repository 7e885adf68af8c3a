//! Bounded A* over grid states.
//!
//! Only the tile holding the turn may move at each expansion. Every
//! expansion and every newly queued child is written to the trace as it
//! happens. The search stops at the goal or once `max_expansions` distinct
//! states have been expanded.

use std::cmp::Reverse;
use std::collections::BinaryHeap;
use std::io::Write;

use anyhow::Result;
use arrayvec::ArrayVec;
use log::{debug, info};

use crate::turn::TurnTracker;
use crate::{manhattan, Direction, Grid, Puzzle, SideBySide};

type IndexSet<K> = indexmap::IndexSet<K, fxhash::FxBuildHasher>;

pub const DEFAULT_MAX_EXPANSIONS: usize = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchConfig {
    pub max_expansions: usize,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            max_expansions: DEFAULT_MAX_EXPANSIONS,
        }
    }
}

/// Index of a node in the search arena. Assigned in creation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId(pub u32);

impl NodeId {
    fn index(self) -> usize {
        self.0 as usize
    }
}

/// The move that produced a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Step {
    pub tile: u8,
    pub dir: Direction,
}

#[derive(Debug, Clone)]
pub struct Node {
    pub grid: Grid,
    pub parent: Option<NodeId>,
    pub step: Option<Step>,
    pub cost: u32,
    pub heuristic: u32,
    /// `{tile}-{MOVE}-` for every move since the root.
    pub path: String,
}

impl Node {
    pub fn total_cost(&self) -> u32 {
        self.cost + self.heuristic
    }
}

/// Min-queue on total cost. Equal costs pop in creation order.
#[derive(Debug, Default)]
struct Frontier {
    heap: BinaryHeap<Reverse<(u32, NodeId)>>,
}

impl Frontier {
    fn push(&mut self, total_cost: u32, id: NodeId) {
        self.heap.push(Reverse((total_cost, id)));
    }

    fn pop(&mut self) -> Option<NodeId> {
        self.heap.pop().map(|Reverse((_, id))| id)
    }

    fn peek(&self) -> Option<NodeId> {
        self.heap.peek().map(|Reverse((_, id))| *id)
    }

    fn len(&self) -> usize {
        self.heap.len()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Solved(NodeId),
    LimitReached,
    Exhausted,
}

#[derive(Debug, Clone)]
pub struct SearchReport {
    pub outcome: Outcome,
    pub expanded: usize,
    pub max_expansions: usize,
    nodes: Vec<Node>,
    visited: IndexSet<String>,
}

impl SearchReport {
    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.index()]
    }

    pub fn solution(&self) -> Option<&Node> {
        match self.outcome {
            Outcome::Solved(id) => Some(self.node(id)),
            Outcome::LimitReached | Outcome::Exhausted => None,
        }
    }

    /// Canonical keys of the expanded states, in expansion order.
    pub fn expanded_keys(&self) -> impl Iterator<Item = &str> + '_ {
        self.visited.iter().map(String::as_str)
    }

    /// The node and its ancestors, ending at the root.
    pub fn lineage(&self, id: NodeId) -> impl Iterator<Item = &Node> + '_ {
        std::iter::successors(Some(self.node(id)), |node| {
            node.parent.map(|parent| self.node(parent))
        })
    }
}

/// Runs the search, writing the expansion trace to `out`.
pub fn astar(
    puzzle: &Puzzle,
    config: &SearchConfig,
    out: &mut dyn Write,
) -> Result<SearchReport> {
    Search {
        goal: &puzzle.goal,
        config,
        out,
        nodes: Vec::new(),
        frontier: Frontier::default(),
        visited: IndexSet::default(),
        turn: TurnTracker::new(),
        expanded: 0,
    }
    .run(&puzzle.initial)
}

struct Search<'a, 'w> {
    goal: &'a Grid,
    config: &'a SearchConfig,
    out: &'w mut dyn Write,
    nodes: Vec<Node>,
    frontier: Frontier,
    visited: IndexSet<String>,
    turn: TurnTracker,
    expanded: usize,
}

impl Search<'_, '_> {
    fn run(mut self, initial: &Grid) -> Result<SearchReport> {
        self.push(Node {
            grid: initial.clone(),
            parent: None,
            step: None,
            cost: 0,
            heuristic: manhattan(initial, self.goal),
            path: String::new(),
        });

        let outcome = loop {
            #[cfg(feature = "coz")]
            coz::scope!("Expansion");

            let Some(id) = self.frontier.pop() else {
                break Outcome::Exhausted;
            };
            let node = &self.nodes[id.index()];

            let before = self.turn.active();
            self.turn.skip_placed(&node.grid, self.goal);
            if before != self.turn.active() {
                debug!("Turn passes from tile {before} to {}", self.turn.active());
            }

            let key = node.grid.canonical_key();
            if self.visited.contains(&key) {
                debug!("Skipping already expanded state {key}");
                continue;
            }
            self.visited.insert(key);
            self.expanded += 1;

            #[cfg(feature = "coz")]
            coz::progress!("Expanded");

            self.report_expanded(id)?;

            if self.nodes[id.index()].grid == *self.goal {
                break Outcome::Solved(id);
            }
            if self.expanded >= self.config.max_expansions {
                writeln!(
                    self.out,
                    "Stopping search: the {} node limit has been reached.",
                    self.config.max_expansions,
                )?;
                break Outcome::LimitReached;
            }

            self.expand(id)?;
            self.turn.advance();
        };

        info!(
            "Search finished with {outcome:?} after {} expansions, {} nodes generated",
            self.expanded,
            self.nodes.len(),
        );
        Ok(SearchReport {
            outcome,
            expanded: self.expanded,
            max_expansions: self.config.max_expansions,
            nodes: self.nodes,
            visited: self.visited,
        })
    }

    fn push(&mut self, node: Node) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        self.frontier.push(node.total_cost(), id);
        self.nodes.push(node);
        id
    }

    fn expand(&mut self, parent_id: NodeId) -> Result<()> {
        let tile = self.turn.active();
        let parent = &self.nodes[parent_id.index()];
        let (parent_cost, parent_path) = (parent.cost, parent.path.clone());

        let mut children = ArrayVec::<NodeId, 4>::new();
        for succ in parent.grid.successors(tile) {
            if self.visited.contains(&succ.grid.canonical_key()) {
                continue;
            }
            let heuristic = manhattan(&succ.grid, self.goal);
            debug!("Queueing tile {} {} with heuristic {heuristic}", succ.tile, succ.dir);
            let path = format!(
                "{parent_path}{}-{}-",
                succ.tile,
                succ.dir.name().to_ascii_uppercase(),
            );
            children.push(self.push(Node {
                grid: succ.grid,
                parent: Some(parent_id),
                step: Some(Step {
                    tile: succ.tile,
                    dir: succ.dir,
                }),
                cost: parent_cost + succ.cost,
                heuristic,
                path,
            }));
        }
        debug!(
            "Tile {tile} produced {} new nodes, frontier size {}",
            children.len(),
            self.frontier.len(),
        );

        writeln!(self.out, "Fringe for the Node to be extended:")?;
        let best = self.frontier.peek();
        for id in children {
            let node = &self.nodes[id.index()];
            let marker = if best == Some(id) { " SELECTED" } else { "" };
            write!(
                self.out,
                "{}",
                SideBySide::new("State in Fringe", &node.grid, self.goal),
            )?;
            writeln!(self.out, "{node}{marker}\n")?;
        }
        Ok(())
    }

    fn report_expanded(&mut self, id: NodeId) -> Result<()> {
        let node = &self.nodes[id.index()];
        let title = if self.expanded == 1 {
            "Initial State"
        } else {
            "Current State"
        };
        writeln!(
            self.out,
            "++++++++++++++++++Expanded Node {}:++++++++++++++++++",
            self.expanded,
        )?;
        writeln!(self.out, "{}", SideBySide::new(title, &node.grid, self.goal))?;
        writeln!(self.out, "{node}\n")?;
        Ok(())
    }
}
