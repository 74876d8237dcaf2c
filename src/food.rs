use std::collections::HashSet;

use crate::Coords;
use crate::error::Result;
use crate::grid::Grid;
use crate::render::{Color, Drawable, Surface, FOOD_COLOR};

use rand::Rng;

pub struct Food {
    position: Coords,
    color: Color,
}

impl Food {
    /// Places the first piece of food. `None` if `occupied` covers the whole board.
    pub fn new<R: Rng>(grid: &Grid, occupied: &[Coords], rng: &mut R) -> Option<Self> {
        random_free_cell(grid, occupied, rng).map(|position| Food { position, color: FOOD_COLOR })
    }

    #[cfg(test)]
    pub fn at(position: Coords) -> Self {
        Food { position, color: FOOD_COLOR }
    }

    pub fn position(&self) -> Coords {
        self.position
    }

    /// Moves the food to a random cell not in `occupied` and returns it.
    /// Leaves the food untouched and returns `None` when no cell is free.
    pub fn relocate<R: Rng>(&mut self, grid: &Grid, occupied: &[Coords], rng: &mut R) -> Option<Coords> {
        let pos = random_free_cell(grid, occupied, rng)?;
        self.position = pos;
        Some(pos)
    }
}

impl Drawable for Food {
    fn draw(&self, surface: &mut dyn Surface, grid: &Grid) -> Result<()> {
        let size = grid.cell_size();
        surface.fill_rect(self.position.0, self.position.1, size, size, self.color)
    }
}

fn random_free_cell<R: Rng>(grid: &Grid, occupied: &[Coords], rng: &mut R) -> Option<Coords> {
    // Rejection sampling only terminates if there is somewhere left to land
    let taken: HashSet<&Coords> = occupied.iter().filter(|pos| grid.contains(**pos)).collect();
    if taken.len() >= grid.total_cells() {
        return None;
    }

    loop {
        let pos = grid.cell(rng.gen_range(0..grid.cells_wide()), rng.gen_range(0..grid.cells_high()));
        if !taken.contains(&pos) {
            return Some(pos);
        }
    }
}
