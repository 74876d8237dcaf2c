use crate::error::Result;
use crate::grid::Grid;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Color { r, g, b }
    }
}

pub const BACKGROUND_COLOR: Color = Color::rgb(0, 0, 0);
pub const SNAKE_COLOR: Color = Color::rgb(0, 255, 0);
pub const FOOD_COLOR: Color = Color::rgb(255, 0, 0);

/// Anything the game can paint onto. Coordinates are in board pixels.
pub trait Surface {
    fn clear(&mut self, color: Color) -> Result<()>;
    fn fill_rect(&mut self, x: i32, y: i32, w: i32, h: i32, color: Color) -> Result<()>;
    fn present(&mut self) -> Result<()>;
}

pub trait Drawable {
    fn draw(&self, surface: &mut dyn Surface, grid: &Grid) -> Result<()>;
}

#[cfg(test)]
pub mod testing {
    use super::*;

    #[derive(Debug, Clone, PartialEq, Eq)]
    pub enum Op {
        Clear(Color),
        Fill { x: i32, y: i32, w: i32, h: i32, color: Color },
        Present,
    }

    /// Records every call so tests can inspect what a frame looked like.
    #[derive(Default)]
    pub struct RecordingSurface {
        pub ops: Vec<Op>,
    }

    impl RecordingSurface {
        pub fn fills_with(&self, color: Color) -> Vec<(i32, i32)> {
            self.ops.iter()
                .filter_map(|op| match op {
                    Op::Fill { x, y, color: c, .. } if *c == color => Some((*x, *y)),
                    _ => None,
                })
                .collect()
        }
    }

    impl Surface for RecordingSurface {
        fn clear(&mut self, color: Color) -> Result<()> {
            self.ops.push(Op::Clear(color));
            Ok(())
        }

        fn fill_rect(&mut self, x: i32, y: i32, w: i32, h: i32, color: Color) -> Result<()> {
            self.ops.push(Op::Fill { x, y, w, h, color });
            Ok(())
        }

        fn present(&mut self) -> Result<()> {
            self.ops.push(Op::Present);
            Ok(())
        }
    }
}
