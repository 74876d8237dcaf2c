use crate::Coords;
use Direction::*;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right
}

impl Direction {
    pub fn vector(self, cell_size: i32) -> Coords {
        match self {
            Up => (0, -cell_size),
            Down => (0, cell_size),
            Left => (-cell_size, 0),
            Right => (cell_size, 0),
        }
    }

    pub fn opposite(self) -> Direction {
        match self {
            Up => Down,
            Down => Up,
            Left => Right,
            Right => Left,
        }
    }
}

/// The board: a torus `width` x `height` pixels, split into square cells.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Grid {
    cell_size: i32,
    width: i32,
    height: i32,
}

impl Grid {
    pub fn new(cell_size: i32, width: i32, height: i32) -> Self {
        Grid { cell_size, width, height }
    }

    pub fn cell_size(&self) -> i32 {
        self.cell_size
    }

    pub fn cells_wide(&self) -> i32 {
        self.width / self.cell_size
    }

    pub fn cells_high(&self) -> i32 {
        self.height / self.cell_size
    }

    pub fn total_cells(&self) -> usize {
        self.cells_wide() as usize * self.cells_high() as usize
    }

    pub fn center(&self) -> Coords {
        self.cell(self.cells_wide() / 2, self.cells_high() / 2)
    }

    pub fn cell(&self, col: i32, row: i32) -> Coords {
        (col * self.cell_size, row * self.cell_size)
    }

    /// Reduces both axes modulo the board size. Never negative.
    pub fn wrap(&self, pos: Coords) -> Coords {
        (pos.0.rem_euclid(self.width), pos.1.rem_euclid(self.height))
    }

    pub fn step(&self, pos: Coords, dir: Direction) -> Coords {
        let (dx, dy) = dir.vector(self.cell_size);
        self.wrap((pos.0 + dx, pos.1 + dy))
    }

    pub fn contains(&self, pos: Coords) -> bool {
        (0..self.width).contains(&pos.0) && (0..self.height).contains(&pos.1)
    }

    #[cfg(test)]
    pub fn is_aligned(&self, pos: Coords) -> bool {
        pos.0 % self.cell_size == 0 && pos.1 % self.cell_size == 0
    }
}
