use crate::Coords;
use crate::error::Result;
use crate::grid::{Grid, Direction::{self, *}};
use crate::render::{Color, Drawable, Surface, BACKGROUND_COLOR, SNAKE_COLOR};
use MoveResult::*;

use tracing::{debug, info};

#[derive(Debug, PartialEq, Eq)]
pub enum MoveResult {
    Moved { new_head: Coords, old_tail: Option<Coords> },
    /// The head ran into the body. The snake has already been reset.
    Collided,
}

pub struct Snake {
    grid: Grid,
    // Head first
    positions: Vec<Coords>,
    direction: Direction,
    pending: Option<Direction>,
    target_length: usize,
    last: Option<Coords>,
    color: Color,
}

impl Snake {
    pub fn new(grid: Grid) -> Self {
        Snake {
            grid,
            positions: vec![grid.center()],
            direction: Right,
            pending: None,
            target_length: 1,
            last: None,
            color: SNAKE_COLOR,
        }
    }

    pub fn head(&self) -> Coords {
        self.positions[0]
    }

    pub fn positions(&self) -> &[Coords] {
        &self.positions
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn pending_direction(&self) -> Option<Direction> {
        self.pending
    }

    pub fn target_length(&self) -> usize {
        self.target_length
    }

    pub fn grow(&mut self) {
        self.target_length += 1;
    }

    /// Queues a turn for the next tick. Reversing onto the neck is ignored.
    pub fn set_pending_direction(&mut self, requested: Direction) {
        if requested == self.direction.opposite() {
            debug!(?requested, current = ?self.direction, "ignoring reversal");
            return;
        }

        self.pending = Some(requested);
    }

    pub fn update_direction(&mut self) {
        if let Some(dir) = self.pending.take() {
            self.direction = dir;
        }
    }

    pub fn move_step(&mut self) -> MoveResult {
        let new_head = self.grid.step(self.head(), self.direction);

        // The current tail is about to move out of the way, so it never counts
        let body = &self.positions[..self.positions.len() - 1];
        if body.contains(&new_head) {
            info!(length = self.positions.len(), ?new_head, "snake bit itself, resetting");
            self.reset();
            return Collided;
        }

        self.positions.insert(0, new_head);

        self.last = if self.positions.len() > self.target_length {
            self.positions.pop()
        } else {
            None
        };

        Moved { new_head, old_tail: self.last }
    }

    pub fn reset(&mut self) {
        self.target_length = 1;
        self.positions = vec![self.grid.center()];
        self.direction = Right;
        self.pending = None;
        self.last = None;
    }
}

impl Drawable for Snake {
    fn draw(&self, surface: &mut dyn Surface, grid: &Grid) -> Result<()> {
        let size = grid.cell_size();

        for pos in &self.positions {
            surface.fill_rect(pos.0, pos.1, size, size, self.color)?;
        }

        // Chasing the tail frees a cell the head immediately reoccupies
        if let Some(last) = self.last.filter(|pos| !self.positions.contains(pos)) {
            surface.fill_rect(last.0, last.1, size, size, BACKGROUND_COLOR)?;
        }

        Ok(())
    }
}
