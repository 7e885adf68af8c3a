use std::ops::{Index, IndexMut};

use arrayvec::ArrayVec;

mod fmt;
mod parse;
pub mod solve;
pub mod turn;

pub use fmt::SideBySide;
pub use parse::parse_grid;

/// Side length of the board.
pub const SIZE: u8 = 3;

/// The blank cell.
pub const BLANK: u8 = 0;

/// Tiles that take turns moving and that the heuristic scores.
pub const TURN_TILES: u8 = 3;

/// Coordinates used for a tile that is not on the board.
const MISSING: (i8, i8) = (-1, -1);

/// Start and goal arrangements for one search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Puzzle {
    pub initial: Grid,
    pub goal: Grid,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Pos(pub u8, pub u8);

/// A 3x3 arrangement of the tiles 0..=8, stored row-major.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Grid {
    cells: [u8; 9],
}

impl Index<Pos> for Grid {
    type Output = u8;
    fn index(&self, pos: Pos) -> &Self::Output {
        &self.cells[pos.0 as usize * SIZE as usize + pos.1 as usize]
    }
}
impl IndexMut<Pos> for Grid {
    fn index_mut(&mut self, pos: Pos) -> &mut Self::Output {
        &mut self.cells[pos.0 as usize * SIZE as usize + pos.1 as usize]
    }
}

impl Grid {
    /// Builds a grid without checking that it is a permutation of 0..=8.
    pub fn from_rows(rows: [[u8; 3]; 3]) -> Self {
        let mut cells = [0; 9];
        for (dst, src) in cells.chunks_mut(SIZE as usize).zip(rows) {
            dst.copy_from_slice(&src);
        }
        Self { cells }
    }

    pub fn rows(&self) -> impl Iterator<Item = &[u8]> + '_ {
        self.cells.chunks(SIZE as usize)
    }

    fn cells(&self) -> impl Iterator<Item = (Pos, u8)> + '_ {
        let idx_iter = std::iter::successors(Some(Pos(0, 0)), |&Pos(x, y)| {
            Some(if y + 1 < SIZE {
                Pos(x, y + 1)
            } else {
                Pos(x + 1, 0)
            })
        });
        idx_iter.zip(self.cells.iter().copied())
    }

    pub fn position_of(&self, tile: u8) -> Option<Pos> {
        self.cells()
            .find(|&(_, cell)| cell == tile)
            .map(|(pos, _)| pos)
    }

    /// Row-major digits with rows joined by `,`, e.g. `123,456,780`.
    pub fn canonical_key(&self) -> String {
        let mut key = String::with_capacity(11);
        for (i, row) in self.rows().enumerate() {
            if i != 0 {
                key.push(',');
            }
            key.extend(row.iter().map(|&cell| char::from(b'0' + cell)));
        }
        key
    }

    /// Whether `tile` sits where `goal` has it. Two absent tiles count as placed.
    pub fn is_tile_placed(&self, goal: &Grid, tile: u8) -> bool {
        self.position_of(tile) == goal.position_of(tile)
    }

    fn sibling_pos(pos: Pos, dir: Direction) -> Option<Pos> {
        let (dx, dy) = dir.offset();
        let x = pos.0.checked_add_signed(dx)?;
        let y = pos.1.checked_add_signed(dy)?;
        if SIZE <= x || SIZE <= y {
            return None;
        }
        Some(Pos(x, y))
    }

    /// Every move of `tile` into an adjacent blank, in [`Direction::ALL`] order.
    pub fn successors(&self, tile: u8) -> ArrayVec<Successor, 4> {
        let mut out = ArrayVec::new();
        let Some(from) = self.position_of(tile) else {
            return out;
        };
        for dir in Direction::ALL {
            let Some(to) = Self::sibling_pos(from, dir) else {
                continue;
            };
            if self[to] != BLANK {
                continue;
            }
            let mut grid = self.clone();
            grid[to] = tile;
            grid[from] = BLANK;
            out.push(Successor {
                grid,
                dir,
                tile,
                cost: dir.cost(),
            });
        }
        out
    }

    fn coords(&self, tile: u8) -> (i8, i8) {
        self.position_of(tile)
            .map_or(MISSING, |Pos(x, y)| (x as i8, y as i8))
    }
}

/// Manhattan distance summed over the turn tiles 1..=3 only.
pub fn manhattan(grid: &Grid, goal: &Grid) -> u32 {
    (1..=TURN_TILES)
        .map(|tile| {
            let (x1, y1) = grid.coords(tile);
            let (x2, y2) = goal.coords(tile);
            u32::from(x1.abs_diff(x2)) + u32::from(y1.abs_diff(y2))
        })
        .sum()
}

/// Direction the moving tile travels in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Up = 0,
    Down,
    Left,
    Right,
}

impl Direction {
    pub const ALL: [Self; 4] = [Self::Up, Self::Down, Self::Left, Self::Right];

    fn offset(self) -> (i8, i8) {
        const OFFSETS: [(i8, i8); 4] = [(-1, 0), (1, 0), (0, -1), (0, 1)];
        OFFSETS[self as usize]
    }

    /// Vertical moves cost 1, horizontal moves cost 2.
    pub fn cost(self) -> u32 {
        match self {
            Direction::Up | Direction::Down => 1,
            Direction::Left | Direction::Right => 2,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Direction::Up => "up",
            Direction::Down => "down",
            Direction::Left => "left",
            Direction::Right => "right",
        }
    }
}

/// One generated move: the resulting grid and what produced it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Successor {
    pub grid: Grid,
    pub dir: Direction,
    pub tile: u8,
    pub cost: u32,
}
